use crate::authority::Authorization;
use crate::errors::MintError;
use crate::state::{Collection, OwnerRegistry, SalePhase, WalletMints};
use anchor_lang::prelude::*;
use std::ops::Range;

// ============================================================================
// MINT ADMISSION PIPELINE
// ============================================================================
//
// Every entry point that issues tokens or moves funds runs under the
// collection's `mint_locked` flag. The flag lives in account state, so a
// nested attempt triggered from an effect hook observes it and fails with
// `ReentrantCallRejected` before reading or writing the ledger.
//
// Check order for sale mints:
//   phase -> quantity -> (allow-list proof) -> payment -> ledger reserve
//
// Ledger, wallet counter, owner registry and collected balance are restored
// if anything after the reservation fails.
//
// ============================================================================

/// One mint attempt by `requester`
#[derive(Debug, Clone, Copy)]
pub struct MintRequest<'p> {
    pub requester: Pubkey,
    pub quantity: u32,
    pub proof: Option<&'p [[u8; 32]]>,
    /// Lamports attached to the request
    pub attached: u64,
}

impl<'p> MintRequest<'p> {
    pub fn public(requester: Pubkey, quantity: u32, attached: u64) -> Self {
        Self {
            requester,
            quantity,
            proof: None,
            attached,
        }
    }

    pub fn allow_listed(
        requester: Pubkey,
        quantity: u32,
        proof: &'p [[u8; 32]],
        attached: u64,
    ) -> Self {
        Self {
            requester,
            quantity,
            proof: Some(proof),
            attached,
        }
    }
}

/// Outcome of an accepted mint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MintReceipt {
    pub owner: Pubkey,
    pub token_ids: Range<u32>,
    /// Lamports credited to the collected balance
    pub paid: u64,
}

/// Side effects performed while the mint lock is held.
///
/// The program implementation moves lamports and emits events; both hooks
/// receive the engine so that any attempt to re-enter it is observable.
pub trait MintEffects {
    /// Called after the ledger commit of an accepted mint
    fn issued(&mut self, engine: &mut MintEngine<'_>, receipt: &MintReceipt) -> Result<()>;

    /// Called after the collected balance has been zeroed by a withdrawal
    fn paid_out(&mut self, engine: &mut MintEngine<'_>, recipient: Pubkey, amount: u64)
        -> Result<()>;
}

struct Snapshot {
    total_issued: u32,
    collected: u64,
    wallet_minted: Option<u32>,
}

pub struct MintEngine<'a> {
    collection: &'a mut Collection,
    registry: &'a mut OwnerRegistry,
}

impl<'a> MintEngine<'a> {
    pub fn new(collection: &'a mut Collection, registry: &'a mut OwnerRegistry) -> Self {
        Self {
            collection,
            registry,
        }
    }

    pub fn collection(&self) -> &Collection {
        &*self.collection
    }

    pub fn registry(&self) -> &OwnerRegistry {
        &*self.registry
    }

    pub fn public_mint(
        &mut self,
        wallet: &mut WalletMints,
        request: MintRequest<'_>,
        effects: &mut dyn MintEffects,
    ) -> Result<MintReceipt> {
        self.locked(|engine| {
            require!(
                engine.collection.current_phase() == SalePhase::Public,
                MintError::PublicSaleIsOff
            );
            require!(request.quantity > 0, MintError::MintZeroQuantity);

            let params = engine.collection.params;
            require_payment(request.quantity, params.public_price, request.attached)?;

            engine.admit(
                Some(wallet),
                request.requester,
                request.quantity,
                params.public_wallet_cap,
                request.attached,
                effects,
            )
        })
    }

    pub fn whitelist_mint(
        &mut self,
        wallet: &mut WalletMints,
        request: MintRequest<'_>,
        effects: &mut dyn MintEffects,
    ) -> Result<MintReceipt> {
        self.locked(|engine| {
            require!(
                engine.collection.current_phase() == SalePhase::AllowListOnly,
                MintError::WhitelistSaleIsOff
            );
            require!(request.quantity > 0, MintError::MintZeroQuantity);
            require!(
                engine
                    .collection
                    .is_on_allow_list(&request.requester, request.proof.unwrap_or_default()),
                MintError::WalletNotOnWhitelist
            );

            let params = engine.collection.params;
            require_payment(request.quantity, params.whitelist_price, request.attached)?;

            engine.admit(
                Some(wallet),
                request.requester,
                request.quantity,
                params.whitelist_wallet_cap,
                request.attached,
                effects,
            )
        })
    }

    /// Issue without payment or phase checks (admin only).
    ///
    /// Shares the identifier space and the supply cap with sale mints but
    /// leaves the recipient's wallet counter untouched.
    pub fn gift(
        &mut self,
        auth: &Authorization,
        recipient: Pubkey,
        quantity: u32,
        effects: &mut dyn MintEffects,
    ) -> Result<MintReceipt> {
        auth.require_admin(self.collection())?;

        self.locked(|engine| {
            require!(
                quantity <= engine.collection.params.gift_ceiling,
                MintError::GiftingTooManyAtOnce
            );
            require!(quantity > 0, MintError::MintZeroQuantity);

            engine.admit(None, recipient, quantity, 0, 0, effects)
        })
    }

    /// Hand the whole collected balance to the admin (admin only)
    pub fn withdraw(
        &mut self,
        auth: &Authorization,
        effects: &mut dyn MintEffects,
    ) -> Result<u64> {
        auth.require_admin(self.collection())?;

        self.locked(|engine| {
            let amount = std::mem::take(&mut engine.collection.collected);
            if let Err(err) = effects.paid_out(engine, auth.caller(), amount) {
                engine.collection.collected = amount;
                return Err(err);
            }
            Ok(amount)
        })
    }

    pub fn is_on_whitelist(&self, address: &Pubkey, proof: &[[u8; 32]]) -> bool {
        self.collection.is_on_allow_list(address, proof)
    }

    fn locked<T>(&mut self, f: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        require!(
            !self.collection.mint_locked,
            MintError::ReentrantCallRejected
        );

        self.collection.mint_locked = true;
        let result = f(self);
        self.collection.mint_locked = false;
        result
    }

    /// Reserve, record ownership, credit payment, then run the effects hook.
    /// `phase_cap` is ignored when no wallet is charged.
    fn admit(
        &mut self,
        mut wallet: Option<&mut WalletMints>,
        owner: Pubkey,
        quantity: u32,
        phase_cap: u32,
        paid: u64,
        effects: &mut dyn MintEffects,
    ) -> Result<MintReceipt> {
        let snapshot = Snapshot {
            total_issued: self.collection.ledger.total_issued,
            collected: self.collection.collected,
            wallet_minted: wallet.as_ref().map(|w| w.minted),
        };

        let supply_cap = self.collection.params.max_supply;
        let token_ids = self
            .collection
            .ledger
            .reserve(wallet.as_deref_mut(), quantity, phase_cap, supply_cap)
            .map_err(MintError::from)?;

        let receipt = MintReceipt {
            owner,
            token_ids,
            paid,
        };

        let outcome = self
            .commit(&receipt)
            .and_then(|()| effects.issued(self, &receipt));

        match outcome {
            Ok(()) => Ok(receipt),
            Err(err) => {
                self.rollback(&snapshot, wallet);
                Err(err)
            }
        }
    }

    fn commit(&mut self, receipt: &MintReceipt) -> Result<()> {
        self.registry
            .issue(receipt.token_ids.clone(), receipt.owner)?;
        self.collection.collected = self
            .collection
            .collected
            .checked_add(receipt.paid)
            .ok_or(MintError::ArithmeticOverflow)?;
        Ok(())
    }

    fn rollback(&mut self, snapshot: &Snapshot, wallet: Option<&mut WalletMints>) {
        self.collection.ledger.total_issued = snapshot.total_issued;
        self.collection.collected = snapshot.collected;
        self.registry.truncate(snapshot.total_issued);
        if let (Some(wallet), Some(minted)) = (wallet, snapshot.wallet_minted) {
            wallet.minted = minted;
        }
    }
}

fn require_payment(quantity: u32, unit_price: u64, attached: u64) -> Result<()> {
    // A price that overflows u64 can never be covered
    let due = unit_price
        .checked_mul(u64::from(quantity))
        .ok_or(MintError::NotEnoughFundsForMinting)?;
    require!(attached >= due, MintError::NotEnoughFundsForMinting);
    Ok(())
}
