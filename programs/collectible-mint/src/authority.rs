use crate::errors::MintError;
use crate::state::Collection;
use anchor_lang::prelude::*;

/// Capability presented to administrative operations.
///
/// Built from the transaction's signing account; restricted operations call
/// [`Authorization::require_admin`] before touching any state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Authorization {
    caller: Pubkey,
    signed: bool,
}

impl Authorization {
    pub fn new(caller: Pubkey, signed: bool) -> Self {
        Self { caller, signed }
    }

    pub fn from_account(account: &AccountInfo) -> Self {
        Self::new(*account.key, account.is_signer)
    }

    pub fn caller(&self) -> Pubkey {
        self.caller
    }

    /// Fails with `Unauthorized` unless the caller signed and is the collection admin
    pub fn require_admin(&self, collection: &Collection) -> Result<()> {
        require!(self.signed, MintError::Unauthorized);
        require_keys_eq!(self.caller, collection.admin, MintError::Unauthorized);
        Ok(())
    }
}
