use crate::authority::Authorization;
use crate::constants::*;
use crate::errors::MintError;
use crate::events::AllowListRootChanged;
use crate::state::*;
use anchor_lang::prelude::*;

#[derive(Accounts)]
pub struct SetAllowListRoot<'info> {
    #[account(
        mut,
        seeds = [COLLECTION_SEED],
        bump = collection.bump,
        has_one = admin @ MintError::Unauthorized
    )]
    pub collection: Account<'info, Collection>,

    pub admin: Signer<'info>,
}

pub fn set_allow_list_root(ctx: Context<SetAllowListRoot>, root: [u8; 32]) -> Result<()> {
    let auth = Authorization::from_account(&ctx.accounts.admin.to_account_info());
    let previous = ctx.accounts.collection.set_root(&auth, root)?;

    emit!(AllowListRootChanged {
        previous,
        root,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}
