use crate::constants::*;
use crate::engine::{MintEngine, MintReceipt, MintRequest};
use crate::instructions::effects::{ProgramEffects, Treasury};
use crate::state::*;
use anchor_lang::prelude::*;

/// Accounts shared by `public_mint` and `whitelist_mint`
#[derive(Accounts)]
pub struct MintTokens<'info> {
    #[account(
        mut,
        seeds = [COLLECTION_SEED],
        bump = collection.bump
    )]
    pub collection: Account<'info, Collection>,

    #[account(
        mut,
        seeds = [REGISTRY_SEED],
        bump = collection.registry_bump
    )]
    pub registry: Account<'info, OwnerRegistry>,

    #[account(
        init_if_needed,
        payer = minter,
        space = WalletMints::LEN,
        seeds = [WALLET_SEED, minter.key().as_ref()],
        bump
    )]
    pub wallet: Account<'info, WalletMints>,

    #[account(
        mut,
        seeds = [TREASURY_SEED],
        bump = collection.treasury_bump
    )]
    pub treasury: SystemAccount<'info>,

    #[account(mut)]
    pub minter: Signer<'info>,

    pub system_program: Program<'info, System>,
}

impl<'info> MintTokens<'info> {
    fn effects(&self) -> Result<ProgramEffects<'info>> {
        ProgramEffects::new(
            self.minter.to_account_info(),
            Some(Treasury {
                account: self.treasury.to_account_info(),
                bump: self.collection.treasury_bump,
                system_program: self.system_program.to_account_info(),
            }),
        )
    }
}

pub fn public_mint(ctx: Context<MintTokens>, quantity: u32, payment: u64) -> Result<()> {
    let wallet_bump = ctx.bumps.wallet;
    let mut effects = ctx.accounts.effects()?;

    let accounts = &mut *ctx.accounts;
    let minter = accounts.minter.key();
    accounts.wallet.bind(minter, wallet_bump);

    let mut engine = MintEngine::new(&mut accounts.collection, &mut accounts.registry);
    let receipt = engine.public_mint(
        &mut accounts.wallet,
        MintRequest::public(minter, quantity, payment),
        &mut effects,
    )?;

    log_receipt("public", &receipt);
    Ok(())
}

pub fn whitelist_mint(
    ctx: Context<MintTokens>,
    quantity: u32,
    proof: Vec<[u8; 32]>,
    payment: u64,
) -> Result<()> {
    let wallet_bump = ctx.bumps.wallet;
    let mut effects = ctx.accounts.effects()?;

    let accounts = &mut *ctx.accounts;
    let minter = accounts.minter.key();
    accounts.wallet.bind(minter, wallet_bump);

    let mut engine = MintEngine::new(&mut accounts.collection, &mut accounts.registry);
    let receipt = engine.whitelist_mint(
        &mut accounts.wallet,
        MintRequest::allow_listed(minter, quantity, &proof, payment),
        &mut effects,
    )?;

    log_receipt("allow-list", &receipt);
    Ok(())
}

fn log_receipt(sale: &str, receipt: &MintReceipt) {
    msg!(
        "{} mint: owner={} ids={}..{} paid={}",
        sale,
        receipt.owner,
        receipt.token_ids.start,
        receipt.token_ids.end,
        receipt.paid
    );
}
