use crate::authority::Authorization;
use crate::constants::*;
use crate::errors::MintError;
use crate::events::SalePhaseChanged;
use crate::state::*;
use anchor_lang::prelude::*;

#[derive(Accounts)]
pub struct SetSalePhase<'info> {
    #[account(
        mut,
        seeds = [COLLECTION_SEED],
        bump = collection.bump,
        has_one = admin @ MintError::Unauthorized
    )]
    pub collection: Account<'info, Collection>,

    pub admin: Signer<'info>,
}

pub fn set_sale_phase(ctx: Context<SetSalePhase>, phase: u8) -> Result<()> {
    let auth = Authorization::from_account(&ctx.accounts.admin.to_account_info());
    let previous = ctx.accounts.collection.set_phase(&auth, phase)?;

    msg!("Sale phase: {:?} -> {}", previous, phase);

    emit!(SalePhaseChanged {
        previous: previous.into(),
        phase,
        admin: auth.caller(),
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}
