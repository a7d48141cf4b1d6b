/// First token identifier handed out by the ledger
pub const TOKEN_ID_ORIGIN: u32 = 0;

/// Largest account the system program will create from inside a program
pub const MAX_ACCOUNT_INIT_SIZE: usize = 10 * 1024;

/// Upper bound on `max_supply`, limited by the owner registry account size
/// (32 bytes per owner under `MAX_ACCOUNT_INIT_SIZE`)
pub const MAX_COLLECTION_SIZE: u32 = 300;

/// Longest accepted Merkle proof (supports allow-lists of 2^32 entries)
pub const MAX_PROOF_DEPTH: usize = 32;

/// Default deployment parameters
pub const DEFAULT_MAX_SUPPLY: u32 = 6;
pub const DEFAULT_PUBLIC_PRICE: u64 = 100_000_000; // 0.1 SOL
pub const DEFAULT_PUBLIC_WALLET_CAP: u32 = 3;
pub const DEFAULT_WHITELIST_PRICE: u64 = 80_000_000; // 0.08 SOL
pub const DEFAULT_WHITELIST_WALLET_CAP: u32 = 3;
pub const DEFAULT_GIFT_CEILING: u32 = 4;

/// PDA seeds
pub const COLLECTION_SEED: &[u8] = b"collection";
pub const REGISTRY_SEED: &[u8] = b"registry";
pub const WALLET_SEED: &[u8] = b"wallet";
pub const TREASURY_SEED: &[u8] = b"treasury";

// Sale phase identifiers
pub const PHASE_CLOSED: u8 = 0;
pub const PHASE_ALLOW_LIST: u8 = 1;
pub const PHASE_PUBLIC: u8 = 2;
