use anchor_lang::prelude::*;

/// Emitted when the collection is initialized
#[event]
pub struct Initialized {
    pub admin: Pubkey,
    pub max_supply: u32,
    pub public_price: u64,
    pub whitelist_price: u64,
    pub timestamp: i64,
}

/// Emitted when the sale phase changes
#[event]
pub struct SalePhaseChanged {
    pub previous: u8,
    pub phase: u8, // 0=closed, 1=allow-list, 2=public
    pub admin: Pubkey,
    pub timestamp: i64,
}

/// Emitted when the allow-list root is replaced
#[event]
pub struct AllowListRootChanged {
    pub previous: [u8; 32],
    pub root: [u8; 32],
    pub timestamp: i64,
}

/// Emitted once per issued token; `from` is the default pubkey for mints
#[event]
pub struct Transfer {
    pub from: Pubkey,
    pub to: Pubkey,
    pub token_id: u32,
    pub timestamp: i64,
}

/// Emitted when collected payments leave the treasury
#[event]
pub struct Withdrawn {
    pub recipient: Pubkey,
    pub amount: u64,
    pub timestamp: i64,
}
