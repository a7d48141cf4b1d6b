use anchor_lang::prelude::*;

#[cfg(not(target_os = "solana"))]
pub mod allow_list_tree;
pub mod authority;
pub mod constants;
pub mod engine;
pub mod errors;
pub mod events;
pub mod instructions;
pub mod ledger;
pub mod merkle;
pub mod state;

use instructions::*;
use state::CollectionParams;

declare_id!("DYav4PwfaHEa5yzzkCtHbeJ3peQ7hoQn3XAxSukGUCtx");

#[program]
pub mod collectible_mint {
    use super::*;

    /// Create the collection, owner registry and treasury with deployment parameters
    pub fn initialize(ctx: Context<Initialize>, params: CollectionParams) -> Result<()> {
        instructions::initialize(ctx, params)
    }

    /// Set the sale phase: 0 closed, 1 allow-list, 2 public (admin only)
    pub fn set_sale_phase(ctx: Context<SetSalePhase>, phase: u8) -> Result<()> {
        instructions::set_sale_phase(ctx, phase)
    }

    /// Replace the allow-list Merkle root (admin only)
    pub fn set_allow_list_root(ctx: Context<SetAllowListRoot>, root: [u8; 32]) -> Result<()> {
        instructions::set_allow_list_root(ctx, root)
    }

    /// Mint during the public phase, paying `payment` lamports
    pub fn public_mint(ctx: Context<MintTokens>, quantity: u32, payment: u64) -> Result<()> {
        instructions::public_mint(ctx, quantity, payment)
    }

    /// Mint during the allow-list phase with a membership proof
    pub fn whitelist_mint(
        ctx: Context<MintTokens>,
        quantity: u32,
        proof: Vec<[u8; 32]>,
        payment: u64,
    ) -> Result<()> {
        instructions::whitelist_mint(ctx, quantity, proof, payment)
    }

    /// Issue items to `recipient` without payment (admin only)
    pub fn gift(ctx: Context<Gift>, recipient: Pubkey, quantity: u32) -> Result<()> {
        instructions::gift(ctx, recipient, quantity)
    }

    /// Move collected payments from the treasury to the admin (admin only)
    pub fn withdraw(ctx: Context<Withdraw>) -> Result<()> {
        instructions::withdraw(ctx)
    }

    /// Check allow-list membership; `proof` is the concatenated sibling digests
    pub fn is_on_whitelist(
        ctx: Context<ReadCollection>,
        address: Pubkey,
        proof: Vec<u8>,
    ) -> Result<bool> {
        instructions::is_on_whitelist(ctx, address, proof)
    }

    /// Owner of an issued token id
    pub fn owner_of(ctx: Context<ReadCollection>, token_id: u32) -> Result<Pubkey> {
        instructions::owner_of(ctx, token_id)
    }

    /// Number of items held by `owner`
    pub fn balance_of(ctx: Context<ReadCollection>, owner: Pubkey) -> Result<u32> {
        instructions::balance_of(ctx, owner)
    }

    /// Number of items issued so far
    pub fn total_supply(ctx: Context<ReadCollection>) -> Result<u32> {
        instructions::total_supply(ctx)
    }
}
