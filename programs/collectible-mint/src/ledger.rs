use crate::constants::TOKEN_ID_ORIGIN;
use crate::errors::MintError;
use crate::state::WalletMints;
use anchor_lang::prelude::*;
use std::ops::Range;

/// Why a reservation was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReserveError {
    NotEnoughSupplyLeft,
    MintLimitPerWalletReached,
    Overflow,
}

impl From<ReserveError> for MintError {
    fn from(err: ReserveError) -> Self {
        match err {
            ReserveError::NotEnoughSupplyLeft => MintError::NotEnoughNFTsLeft,
            ReserveError::MintLimitPerWalletReached => MintError::MintLimitPerWalletReached,
            ReserveError::Overflow => MintError::ArithmeticOverflow,
        }
    }
}

/// Global issuance counter
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SupplyLedger {
    pub total_issued: u32,
}

impl SupplyLedger {
    pub const LEN: usize = 4;

    /// Reserve `quantity` sequential identifiers.
    ///
    /// `wallet` is charged against `phase_cap`; gift reservations pass `None`
    /// and are only bounded by `supply_cap`. Nothing is mutated on failure.
    pub fn reserve(
        &mut self,
        wallet: Option<&mut WalletMints>,
        quantity: u32,
        phase_cap: u32,
        supply_cap: u32,
    ) -> std::result::Result<Range<u32>, ReserveError> {
        let total = self
            .total_issued
            .checked_add(quantity)
            .ok_or(ReserveError::Overflow)?;
        if total > supply_cap {
            return Err(ReserveError::NotEnoughSupplyLeft);
        }

        if let Some(wallet) = wallet {
            let minted = wallet
                .minted
                .checked_add(quantity)
                .ok_or(ReserveError::Overflow)?;
            if minted > phase_cap {
                return Err(ReserveError::MintLimitPerWalletReached);
            }
            wallet.minted = minted;
        }

        let start = TOKEN_ID_ORIGIN
            .checked_add(self.total_issued)
            .ok_or(ReserveError::Overflow)?;
        let end = start.checked_add(quantity).ok_or(ReserveError::Overflow)?;
        self.total_issued = total;

        Ok(start..end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn wallet() -> WalletMints {
        WalletMints::new(Pubkey::new_unique(), 255)
    }

    #[test]
    fn test_reserve_assigns_contiguous_ranges() {
        let mut ledger = SupplyLedger::default();
        let mut a = wallet();
        let mut b = wallet();

        assert_eq!(ledger.reserve(Some(&mut a), 3, 3, 6), Ok(0..3));
        assert_eq!(ledger.reserve(Some(&mut b), 2, 3, 6), Ok(3..5));
        assert_eq!(ledger.total_issued, 5);
        assert_eq!(a.minted, 3);
        assert_eq!(b.minted, 2);
    }

    #[test]
    fn test_reserve_supply_exhausted() {
        let mut ledger = SupplyLedger { total_issued: 6 };
        let mut c = wallet();

        assert_eq!(
            ledger.reserve(Some(&mut c), 1, 3, 6),
            Err(ReserveError::NotEnoughSupplyLeft)
        );
        assert_eq!(ledger.total_issued, 6);
        assert_eq!(c.minted, 0);
    }

    #[test]
    fn test_reserve_wallet_cap() {
        let mut ledger = SupplyLedger::default();
        let mut a = wallet();

        ledger.reserve(Some(&mut a), 3, 3, 10).unwrap();
        assert_eq!(
            ledger.reserve(Some(&mut a), 1, 3, 10),
            Err(ReserveError::MintLimitPerWalletReached)
        );
        assert_eq!(ledger.total_issued, 3);
        assert_eq!(a.minted, 3);
    }

    #[test]
    fn test_reserve_without_wallet_ignores_phase_cap() {
        let mut ledger = SupplyLedger::default();

        assert_eq!(ledger.reserve(None, 4, 0, 6), Ok(0..4));
        assert_eq!(
            ledger.reserve(None, 3, 0, 6),
            Err(ReserveError::NotEnoughSupplyLeft)
        );
        assert_eq!(ledger.total_issued, 4);
    }

    #[test]
    fn test_reserve_overflow() {
        let mut ledger = SupplyLedger {
            total_issued: u32::MAX,
        };
        assert_eq!(
            ledger.reserve(None, 1, 0, u32::MAX),
            Err(ReserveError::Overflow)
        );
    }

    #[test]
    fn test_error_translation() {
        assert!(matches!(
            MintError::from(ReserveError::NotEnoughSupplyLeft),
            MintError::NotEnoughNFTsLeft
        ));
        assert!(matches!(
            MintError::from(ReserveError::MintLimitPerWalletReached),
            MintError::MintLimitPerWalletReached
        ));
    }

    proptest! {
        #[test]
        fn prop_ledger_never_exceeds_caps(
            supply_cap in 1u32..50,
            phase_cap in 1u32..10,
            requests in prop::collection::vec((0usize..4, 0u32..8), 0..64),
        ) {
            let mut ledger = SupplyLedger::default();
            let mut wallets: Vec<WalletMints> = (0..4).map(|_| wallet()).collect();
            let mut next_id = TOKEN_ID_ORIGIN;

            for (who, quantity) in requests {
                let before_total = ledger.total_issued;
                let before_minted = wallets[who].minted;

                match ledger.reserve(Some(&mut wallets[who]), quantity, phase_cap, supply_cap) {
                    Ok(ids) => {
                        prop_assert_eq!(ids.start, next_id);
                        prop_assert_eq!(ids.end - ids.start, quantity);
                        next_id = ids.end;
                    }
                    Err(_) => {
                        prop_assert_eq!(ledger.total_issued, before_total);
                        prop_assert_eq!(wallets[who].minted, before_minted);
                    }
                }

                prop_assert!(ledger.total_issued >= before_total);
                prop_assert!(ledger.total_issued <= supply_cap);
                prop_assert!(wallets[who].minted >= before_minted);
                prop_assert!(wallets[who].minted <= phase_cap);
            }
        }
    }
}
