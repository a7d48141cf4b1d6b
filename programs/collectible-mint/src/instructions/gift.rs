use crate::authority::Authorization;
use crate::constants::*;
use crate::engine::MintEngine;
use crate::errors::MintError;
use crate::instructions::effects::ProgramEffects;
use crate::state::*;
use anchor_lang::prelude::*;

#[derive(Accounts)]
pub struct Gift<'info> {
    #[account(
        mut,
        seeds = [COLLECTION_SEED],
        bump = collection.bump,
        has_one = admin @ MintError::Unauthorized
    )]
    pub collection: Account<'info, Collection>,

    #[account(
        mut,
        seeds = [REGISTRY_SEED],
        bump = collection.registry_bump
    )]
    pub registry: Account<'info, OwnerRegistry>,

    pub admin: Signer<'info>,
}

pub fn gift(ctx: Context<Gift>, recipient: Pubkey, quantity: u32) -> Result<()> {
    let admin = ctx.accounts.admin.to_account_info();
    let auth = Authorization::from_account(&admin);
    let mut effects = ProgramEffects::new(admin, None)?;

    let accounts = &mut *ctx.accounts;
    let mut engine = MintEngine::new(&mut accounts.collection, &mut accounts.registry);
    let receipt = engine.gift(&auth, recipient, quantity, &mut effects)?;

    msg!(
        "Gifted {} item(s) to {}: ids={}..{}",
        quantity,
        recipient,
        receipt.token_ids.start,
        receipt.token_ids.end
    );

    Ok(())
}
