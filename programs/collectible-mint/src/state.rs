use crate::authority::Authorization;
use crate::constants::*;
use crate::errors::MintError;
use crate::ledger::SupplyLedger;
use crate::merkle;
use anchor_lang::prelude::*;
use std::ops::Range;

/// Sale phase gating which mint entry point is callable
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SalePhase {
    #[default]
    Closed,
    AllowListOnly,
    Public,
}

impl TryFrom<u8> for SalePhase {
    type Error = anchor_lang::error::Error;

    fn try_from(raw: u8) -> Result<Self> {
        match raw {
            PHASE_CLOSED => Ok(SalePhase::Closed),
            PHASE_ALLOW_LIST => Ok(SalePhase::AllowListOnly),
            PHASE_PUBLIC => Ok(SalePhase::Public),
            _ => err!(MintError::InvalidSalePhase),
        }
    }
}

impl From<SalePhase> for u8 {
    fn from(phase: SalePhase) -> u8 {
        match phase {
            SalePhase::Closed => PHASE_CLOSED,
            SalePhase::AllowListOnly => PHASE_ALLOW_LIST,
            SalePhase::Public => PHASE_PUBLIC,
        }
    }
}

/// Deployment parameters, validated once in `initialize`
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct CollectionParams {
    pub max_supply: u32,
    /// Lamports per item during the public phase
    pub public_price: u64,
    pub public_wallet_cap: u32,
    /// Lamports per item during the allow-list phase
    pub whitelist_price: u64,
    pub whitelist_wallet_cap: u32,
    /// Maximum quantity per `gift` call
    pub gift_ceiling: u32,
}

impl Default for CollectionParams {
    fn default() -> Self {
        Self {
            max_supply: DEFAULT_MAX_SUPPLY,
            public_price: DEFAULT_PUBLIC_PRICE,
            public_wallet_cap: DEFAULT_PUBLIC_WALLET_CAP,
            whitelist_price: DEFAULT_WHITELIST_PRICE,
            whitelist_wallet_cap: DEFAULT_WHITELIST_WALLET_CAP,
            gift_ceiling: DEFAULT_GIFT_CEILING,
        }
    }
}

impl CollectionParams {
    pub const LEN: usize = 4 + // max_supply
        8 + // public_price
        4 + // public_wallet_cap
        8 + // whitelist_price
        4 + // whitelist_wallet_cap
        4; // gift_ceiling

    pub fn validate(&self) -> Result<()> {
        require!(
            self.max_supply > 0 && self.max_supply <= MAX_COLLECTION_SIZE,
            MintError::InvalidMaxSupply
        );
        require!(
            self.public_wallet_cap > 0 && self.public_wallet_cap <= self.max_supply,
            MintError::InvalidWalletCap
        );
        require!(
            self.whitelist_wallet_cap > 0 && self.whitelist_wallet_cap <= self.max_supply,
            MintError::InvalidWalletCap
        );
        require!(
            self.gift_ceiling > 0 && self.gift_ceiling <= self.max_supply,
            MintError::InvalidGiftCeiling
        );
        Ok(())
    }

    /// Owner registry size for these parameters.
    ///
    /// Accounts are created before `validate` runs, so an oversized
    /// `max_supply` is clamped here and then rejected by `validate`.
    pub fn registry_space(&self) -> usize {
        OwnerRegistry::space_for(self.max_supply.min(MAX_COLLECTION_SIZE))
    }
}

/// Currently accepted allow-list snapshot
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AllowList {
    pub root: [u8; 32],
}

impl AllowList {
    pub const LEN: usize = 32;

    /// Replace the root, returning the previous one
    pub fn replace(&mut self, root: [u8; 32]) -> [u8; 32] {
        std::mem::replace(&mut self.root, root)
    }

    pub fn contains(&self, address: &Pubkey, proof: &[[u8; 32]]) -> bool {
        merkle::verify(&merkle::hash_leaf(address), proof, &self.root)
    }

    /// Same as [`AllowList::contains`] with the proof as concatenated digests
    pub fn contains_packed(&self, address: &Pubkey, proof: &[u8]) -> bool {
        merkle::verify_packed(&merkle::hash_leaf(address), proof, &self.root)
    }
}

/// Collection configuration and sale state
#[account]
pub struct Collection {
    /// Administrator public key
    pub admin: Pubkey,

    pub params: CollectionParams,

    pub phase: SalePhase,

    pub allow_list: AllowList,

    pub ledger: SupplyLedger,

    /// Payments received since the last withdrawal
    pub collected: u64,

    /// Held for the whole duration of a mint or withdrawal
    pub mint_locked: bool,

    /// PDA bumps
    pub bump: u8,
    pub registry_bump: u8,
    pub treasury_bump: u8,
}

impl Collection {
    pub const LEN: usize = 8 + // discriminator
        32 + // admin
        CollectionParams::LEN +
        1 +  // phase
        AllowList::LEN +
        SupplyLedger::LEN +
        8 +  // collected
        1 +  // mint_locked
        3; // bumps

    pub fn new(
        admin: Pubkey,
        params: CollectionParams,
        bump: u8,
        registry_bump: u8,
        treasury_bump: u8,
    ) -> Self {
        Self {
            admin,
            params,
            phase: SalePhase::Closed,
            allow_list: AllowList::default(),
            ledger: SupplyLedger::default(),
            collected: 0,
            mint_locked: false,
            bump,
            registry_bump,
            treasury_bump,
        }
    }

    pub fn current_phase(&self) -> SalePhase {
        self.phase
    }

    /// Move to any valid phase (admin only), returning the previous one
    pub fn set_phase(&mut self, auth: &Authorization, raw: u8) -> Result<SalePhase> {
        auth.require_admin(self)?;
        let phase = SalePhase::try_from(raw)?;
        Ok(std::mem::replace(&mut self.phase, phase))
    }

    pub fn current_root(&self) -> [u8; 32] {
        self.allow_list.root
    }

    /// Replace the allow-list root (admin only), returning the previous one
    pub fn set_root(&mut self, auth: &Authorization, root: [u8; 32]) -> Result<[u8; 32]> {
        auth.require_admin(self)?;
        Ok(self.allow_list.replace(root))
    }

    pub fn is_on_allow_list(&self, address: &Pubkey, proof: &[[u8; 32]]) -> bool {
        self.allow_list.contains(address, proof)
    }

    pub fn is_on_allow_list_packed(&self, address: &Pubkey, proof: &[u8]) -> bool {
        self.allow_list.contains_packed(address, proof)
    }
}

/// Per-wallet mint counter, created on the wallet's first mint
#[account]
pub struct WalletMints {
    pub wallet: Pubkey,

    /// Items minted through the sale phases (gifts excluded)
    pub minted: u32,

    /// PDA bump
    pub bump: u8,
}

impl WalletMints {
    pub const LEN: usize = 8 + // discriminator
        32 + // wallet
        4 +  // minted
        1; // bump

    pub fn new(wallet: Pubkey, bump: u8) -> Self {
        Self {
            wallet,
            minted: 0,
            bump,
        }
    }

    /// Record the owner of a freshly created counter
    pub fn bind(&mut self, wallet: Pubkey, bump: u8) {
        if self.wallet == Pubkey::default() {
            self.wallet = wallet;
            self.bump = bump;
        }
    }
}

/// Token ownership, indexed by `token_id - TOKEN_ID_ORIGIN`
#[account]
pub struct OwnerRegistry {
    pub owners: Vec<Pubkey>,

    /// Maximum number of owners (the collection's max supply)
    pub capacity: u32,

    /// PDA bump
    pub bump: u8,
}

impl OwnerRegistry {
    pub const BASE_LEN: usize = 8 + // discriminator
        4 +  // owners vec length
        4 +  // capacity
        1; // bump

    pub fn space_for(capacity: u32) -> usize {
        Self::BASE_LEN + (capacity as usize * 32)
    }

    pub fn new(capacity: u32, bump: u8) -> Self {
        Self {
            owners: Vec::with_capacity(capacity as usize),
            capacity,
            bump,
        }
    }

    /// Assign every identifier in `token_ids` to `owner`.
    ///
    /// The range must start exactly where the previous issuance ended.
    pub fn issue(&mut self, token_ids: Range<u32>, owner: Pubkey) -> Result<()> {
        require!(
            token_ids.start == self.next_token_id()?,
            MintError::RegistryOutOfSync
        );
        require!(
            token_ids.end - TOKEN_ID_ORIGIN <= self.capacity,
            MintError::NotEnoughNFTsLeft
        );

        self.owners.extend(token_ids.map(|_| owner));
        Ok(())
    }

    /// Drop every owner from position `issued` onwards
    pub fn truncate(&mut self, issued: u32) {
        self.owners.truncate(issued as usize);
    }

    pub fn owner_of(&self, token_id: u32) -> Result<Pubkey> {
        let index = token_id
            .checked_sub(TOKEN_ID_ORIGIN)
            .ok_or(MintError::TokenNotMinted)?;
        self.owners
            .get(index as usize)
            .copied()
            .ok_or_else(|| MintError::TokenNotMinted.into())
    }

    pub fn balance_of(&self, owner: &Pubkey) -> u32 {
        self.owners.iter().filter(|o| *o == owner).count() as u32
    }

    pub fn total_supply(&self) -> u32 {
        self.owners.len() as u32
    }

    fn next_token_id(&self) -> Result<u32> {
        TOKEN_ID_ORIGIN
            .checked_add(self.total_supply())
            .ok_or_else(|| MintError::ArithmeticOverflow.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::allow_list_tree::AllowListTree;

    fn collection(admin: Pubkey) -> Collection {
        Collection::new(admin, CollectionParams::default(), 255, 254, 253)
    }

    #[test]
    fn test_phase_from_raw() {
        assert_eq!(SalePhase::try_from(0).unwrap(), SalePhase::Closed);
        assert_eq!(SalePhase::try_from(1).unwrap(), SalePhase::AllowListOnly);
        assert_eq!(SalePhase::try_from(2).unwrap(), SalePhase::Public);
        assert_eq!(
            SalePhase::try_from(3).unwrap_err(),
            MintError::InvalidSalePhase.into()
        );
        assert_eq!(u8::from(SalePhase::Public), 2);
    }

    #[test]
    fn test_initial_state_is_closed_with_zero_root() {
        let c = collection(Pubkey::new_unique());
        assert_eq!(c.current_phase(), SalePhase::Closed);
        assert_eq!(c.current_root(), [0u8; 32]);
        assert_eq!(c.ledger.total_issued, 0);
        assert!(!c.mint_locked);
    }

    #[test]
    fn test_set_phase_any_direction() {
        let admin = Pubkey::new_unique();
        let auth = Authorization::new(admin, true);
        let mut c = collection(admin);

        assert_eq!(c.set_phase(&auth, 2).unwrap(), SalePhase::Closed);
        assert_eq!(c.set_phase(&auth, 1).unwrap(), SalePhase::Public);
        assert_eq!(c.set_phase(&auth, 0).unwrap(), SalePhase::AllowListOnly);
        assert_eq!(c.current_phase(), SalePhase::Closed);
    }

    #[test]
    fn test_set_phase_rejects_out_of_range() {
        let admin = Pubkey::new_unique();
        let mut c = collection(admin);
        c.phase = SalePhase::Public;

        let result = c.set_phase(&Authorization::new(admin, true), 3);
        assert_eq!(result.unwrap_err(), MintError::InvalidSalePhase.into());
        assert_eq!(c.current_phase(), SalePhase::Public);
    }

    #[test]
    fn test_set_phase_requires_admin() {
        let mut c = collection(Pubkey::new_unique());
        let intruder = Authorization::new(Pubkey::new_unique(), true);

        assert_eq!(
            c.set_phase(&intruder, 1).unwrap_err(),
            MintError::Unauthorized.into()
        );
        assert_eq!(c.current_phase(), SalePhase::Closed);
    }

    #[test]
    fn test_set_root() {
        let admin = Pubkey::new_unique();
        let mut c = collection(admin);

        let previous = c
            .set_root(&Authorization::new(admin, true), [7u8; 32])
            .unwrap();
        assert_eq!(previous, [0u8; 32]);
        assert_eq!(c.current_root(), [7u8; 32]);

        let result = c.set_root(&Authorization::new(Pubkey::new_unique(), true), [9u8; 32]);
        assert_eq!(result.unwrap_err(), MintError::Unauthorized.into());
        assert_eq!(c.current_root(), [7u8; 32]);
    }

    #[test]
    fn test_params_validation() {
        assert!(CollectionParams::default().validate().is_ok());

        let zero_supply = CollectionParams {
            max_supply: 0,
            ..Default::default()
        };
        assert_eq!(
            zero_supply.validate().unwrap_err(),
            MintError::InvalidMaxSupply.into()
        );

        let too_large = CollectionParams {
            max_supply: MAX_COLLECTION_SIZE + 1,
            ..Default::default()
        };
        assert_eq!(
            too_large.validate().unwrap_err(),
            MintError::InvalidMaxSupply.into()
        );

        let cap_over_supply = CollectionParams {
            whitelist_wallet_cap: DEFAULT_MAX_SUPPLY + 1,
            ..Default::default()
        };
        assert_eq!(
            cap_over_supply.validate().unwrap_err(),
            MintError::InvalidWalletCap.into()
        );

        let no_gifts = CollectionParams {
            gift_ceiling: 0,
            ..Default::default()
        };
        assert_eq!(
            no_gifts.validate().unwrap_err(),
            MintError::InvalidGiftCeiling.into()
        );
    }

    #[test]
    fn test_oversized_supply_reaches_validation() {
        let oversized = CollectionParams {
            max_supply: 400,
            ..Default::default()
        };

        assert!(oversized.registry_space() <= MAX_ACCOUNT_INIT_SIZE);
        assert_eq!(
            oversized.validate().unwrap_err(),
            MintError::InvalidMaxSupply.into()
        );

        let largest = CollectionParams {
            max_supply: MAX_COLLECTION_SIZE,
            ..Default::default()
        };
        assert!(largest.validate().is_ok());
        assert_eq!(largest.registry_space(), oversized.registry_space());
        assert!(largest.registry_space() <= MAX_ACCOUNT_INIT_SIZE);
        assert_eq!(
            CollectionParams::default().registry_space(),
            OwnerRegistry::space_for(DEFAULT_MAX_SUPPLY)
        );
    }

    #[test]
    fn test_packed_allow_list_proofs() {
        let admin = Pubkey::new_unique();
        let (a, b, c) = (Pubkey::new_unique(), Pubkey::new_unique(), Pubkey::new_unique());
        let tree = AllowListTree::from_addresses(&[a, b, c]);
        let mut col = collection(admin);
        col.set_root(&Authorization::new(admin, true), tree.root())
            .unwrap();

        let packed = tree.proof(&a).unwrap().concat();
        assert!(col.is_on_allow_list_packed(&a, &packed));
        assert!(!col.is_on_allow_list_packed(&c, &packed));

        // digests of the wrong width never verify
        assert!(!col.is_on_allow_list_packed(&a, &packed[..packed.len() - 1]));
        let mut padded = packed.clone();
        padded.push(0);
        assert!(!col.is_on_allow_list_packed(&a, &padded));
    }

    #[test]
    fn test_registry_issue_and_queries() {
        let a = Pubkey::new_unique();
        let b = Pubkey::new_unique();
        let mut registry = OwnerRegistry::new(6, 255);

        registry.issue(0..2, a).unwrap();
        registry.issue(2..3, b).unwrap();

        assert_eq!(registry.owner_of(0).unwrap(), a);
        assert_eq!(registry.owner_of(1).unwrap(), a);
        assert_eq!(registry.owner_of(2).unwrap(), b);
        assert_eq!(
            registry.owner_of(3).unwrap_err(),
            MintError::TokenNotMinted.into()
        );
        assert_eq!(registry.balance_of(&a), 2);
        assert_eq!(registry.balance_of(&b), 1);
        assert_eq!(registry.balance_of(&Pubkey::new_unique()), 0);
        assert_eq!(registry.total_supply(), 3);
    }

    #[test]
    fn test_registry_rejects_gaps_and_overflow() {
        let owner = Pubkey::new_unique();
        let mut registry = OwnerRegistry::new(3, 255);

        assert_eq!(
            registry.issue(1..2, owner).unwrap_err(),
            MintError::RegistryOutOfSync.into()
        );
        assert_eq!(
            registry.issue(0..4, owner).unwrap_err(),
            MintError::NotEnoughNFTsLeft.into()
        );
        assert_eq!(registry.total_supply(), 0);

        registry.issue(0..3, owner).unwrap();
        registry.truncate(1);
        assert_eq!(registry.total_supply(), 1);
    }

    #[test]
    fn test_wallet_bind_only_once() {
        let first = Pubkey::new_unique();
        let mut wallet = WalletMints::new(Pubkey::default(), 0);

        wallet.bind(first, 254);
        wallet.bind(Pubkey::new_unique(), 1);

        assert_eq!(wallet.wallet, first);
        assert_eq!(wallet.bump, 254);
    }
}
