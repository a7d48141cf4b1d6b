use crate::constants::TREASURY_SEED;
use crate::engine::{MintEffects, MintEngine, MintReceipt};
use crate::errors::MintError;
use crate::events::Transfer;
use anchor_lang::prelude::*;

/// Treasury PDA and the program needed to move lamports in or out of it
pub struct Treasury<'info> {
    pub account: AccountInfo<'info>,
    pub bump: u8,
    pub system_program: AccountInfo<'info>,
}

/// On-chain side of an admitted mint or withdrawal
pub struct ProgramEffects<'info> {
    /// Minter paying for a mint, or admin receiving a withdrawal
    pub authority: AccountInfo<'info>,
    pub treasury: Option<Treasury<'info>>,
    pub timestamp: i64,
}

impl<'info> ProgramEffects<'info> {
    pub fn new(authority: AccountInfo<'info>, treasury: Option<Treasury<'info>>) -> Result<Self> {
        Ok(Self {
            authority,
            treasury,
            timestamp: Clock::get()?.unix_timestamp,
        })
    }

    fn treasury(&self) -> Result<&Treasury<'info>> {
        self.treasury
            .as_ref()
            .ok_or_else(|| error!(MintError::MissingTreasury))
    }
}

impl<'info> MintEffects for ProgramEffects<'info> {
    fn issued(&mut self, _engine: &mut MintEngine<'_>, receipt: &MintReceipt) -> Result<()> {
        if receipt.paid > 0 {
            let treasury = self.treasury()?;
            let cpi_context = CpiContext::new(
                treasury.system_program.clone(),
                anchor_lang::system_program::Transfer {
                    from: self.authority.clone(),
                    to: treasury.account.clone(),
                },
            );
            anchor_lang::system_program::transfer(cpi_context, receipt.paid)?;
        }

        for token_id in receipt.token_ids.clone() {
            emit!(Transfer {
                from: Pubkey::default(),
                to: receipt.owner,
                token_id,
                timestamp: self.timestamp,
            });
        }

        Ok(())
    }

    fn paid_out(
        &mut self,
        _engine: &mut MintEngine<'_>,
        recipient: Pubkey,
        amount: u64,
    ) -> Result<()> {
        require_keys_eq!(recipient, self.authority.key(), MintError::Unauthorized);
        if amount == 0 {
            return Ok(());
        }

        // Treasury is a PDA owned by the system program, so sign with its seeds
        let treasury = self.treasury()?;
        let treasury_seeds = &[TREASURY_SEED, &[treasury.bump]];
        let signer_seeds = &[&treasury_seeds[..]];

        let cpi_context = CpiContext::new_with_signer(
            treasury.system_program.clone(),
            anchor_lang::system_program::Transfer {
                from: treasury.account.clone(),
                to: self.authority.clone(),
            },
            signer_seeds,
        );

        anchor_lang::system_program::transfer(cpi_context, amount)
    }
}
