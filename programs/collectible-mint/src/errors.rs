use anchor_lang::prelude::*;

#[error_code]
pub enum MintError {
    #[msg("Public sale is not active")]
    PublicSaleIsOff,

    #[msg("Allow-list sale is not active")]
    WhitelistSaleIsOff,

    #[msg("Quantity must be greater than zero")]
    MintZeroQuantity,

    #[msg("Attached payment does not cover quantity x unit price")]
    NotEnoughFundsForMinting,

    #[msg("Not enough items left in the collection")]
    NotEnoughNFTsLeft,

    #[msg("Mint limit per wallet reached for this phase")]
    MintLimitPerWalletReached,

    #[msg("Wallet is not on the allow-list")]
    WalletNotOnWhitelist,

    #[msg("Gift quantity exceeds the per-call ceiling")]
    GiftingTooManyAtOnce,

    #[msg("Mint already in progress: reentrant call rejected")]
    ReentrantCallRejected,

    #[msg("Unauthorized: admin only")]
    Unauthorized,

    #[msg("Invalid sale phase: must be 0 (closed), 1 (allow-list) or 2 (public)")]
    InvalidSalePhase,

    #[msg("Invalid max supply: must be between 1 and MAX_COLLECTION_SIZE")]
    InvalidMaxSupply,

    #[msg("Invalid per-wallet cap: must be between 1 and max supply")]
    InvalidWalletCap,

    #[msg("Invalid gift ceiling: must be between 1 and max supply")]
    InvalidGiftCeiling,

    #[msg("Arithmetic overflow")]
    ArithmeticOverflow,

    #[msg("Token has not been minted")]
    TokenNotMinted,

    #[msg("Invalid address encoding")]
    InvalidAddress,

    #[msg("Owner registry is out of sync with the supply ledger")]
    RegistryOutOfSync,

    #[msg("Treasury account is required to collect payment")]
    MissingTreasury,
}
