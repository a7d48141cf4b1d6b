use crate::constants::*;
use crate::state::*;
use anchor_lang::prelude::*;

/// Read-only view of the collection, used by the query instructions
#[derive(Accounts)]
pub struct ReadCollection<'info> {
    #[account(
        seeds = [COLLECTION_SEED],
        bump = collection.bump
    )]
    pub collection: Account<'info, Collection>,

    #[account(
        seeds = [REGISTRY_SEED],
        bump = collection.registry_bump
    )]
    pub registry: Account<'info, OwnerRegistry>,
}

pub fn is_on_whitelist(
    ctx: Context<ReadCollection>,
    address: Pubkey,
    proof: Vec<u8>,
) -> Result<bool> {
    Ok(ctx
        .accounts
        .collection
        .is_on_allow_list_packed(&address, &proof))
}

pub fn owner_of(ctx: Context<ReadCollection>, token_id: u32) -> Result<Pubkey> {
    ctx.accounts.registry.owner_of(token_id)
}

pub fn balance_of(ctx: Context<ReadCollection>, owner: Pubkey) -> Result<u32> {
    Ok(ctx.accounts.registry.balance_of(&owner))
}

pub fn total_supply(ctx: Context<ReadCollection>) -> Result<u32> {
    Ok(ctx.accounts.registry.total_supply())
}
