use crate::authority::Authorization;
use crate::constants::*;
use crate::engine::MintEngine;
use crate::errors::MintError;
use crate::events::Withdrawn;
use crate::instructions::effects::{ProgramEffects, Treasury};
use crate::state::*;
use anchor_lang::prelude::*;

#[derive(Accounts)]
pub struct Withdraw<'info> {
    #[account(
        mut,
        seeds = [COLLECTION_SEED],
        bump = collection.bump,
        has_one = admin @ MintError::Unauthorized
    )]
    pub collection: Account<'info, Collection>,

    #[account(
        seeds = [REGISTRY_SEED],
        bump = collection.registry_bump
    )]
    pub registry: Account<'info, OwnerRegistry>,

    /// Treasury PDA (system-owned, holds mint payments)
    #[account(
        mut,
        seeds = [TREASURY_SEED],
        bump = collection.treasury_bump
    )]
    pub treasury: SystemAccount<'info>,

    #[account(mut)]
    pub admin: Signer<'info>,

    pub system_program: Program<'info, System>,
}

pub fn withdraw(ctx: Context<Withdraw>) -> Result<()> {
    let admin = ctx.accounts.admin.to_account_info();
    let auth = Authorization::from_account(&admin);
    let mut effects = ProgramEffects::new(
        admin,
        Some(Treasury {
            account: ctx.accounts.treasury.to_account_info(),
            bump: ctx.accounts.collection.treasury_bump,
            system_program: ctx.accounts.system_program.to_account_info(),
        }),
    )?;

    let accounts = &mut *ctx.accounts;
    let mut engine = MintEngine::new(&mut accounts.collection, &mut accounts.registry);
    let amount = engine.withdraw(&auth, &mut effects)?;

    msg!("Withdrew {} lamports to {}", amount, auth.caller());

    emit!(Withdrawn {
        recipient: auth.caller(),
        amount,
        timestamp: effects.timestamp,
    });

    Ok(())
}
