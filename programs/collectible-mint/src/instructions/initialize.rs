use crate::constants::*;
use crate::events::Initialized;
use crate::state::*;
use anchor_lang::prelude::*;

#[derive(Accounts)]
#[instruction(params: CollectionParams)]
pub struct Initialize<'info> {
    #[account(
        init,
        payer = admin,
        space = Collection::LEN,
        seeds = [COLLECTION_SEED],
        bump
    )]
    pub collection: Account<'info, Collection>,

    #[account(
        init,
        payer = admin,
        space = params.registry_space(),
        seeds = [REGISTRY_SEED],
        bump
    )]
    pub registry: Account<'info, OwnerRegistry>,

    /// Treasury PDA (system-owned, holds mint payments)
    #[account(
        mut,
        seeds = [TREASURY_SEED],
        bump
    )]
    pub treasury: SystemAccount<'info>,

    #[account(mut)]
    pub admin: Signer<'info>,

    pub system_program: Program<'info, System>,
}

pub fn initialize(ctx: Context<Initialize>, params: CollectionParams) -> Result<()> {
    params.validate()?;

    let collection = &mut ctx.accounts.collection;
    collection.set_inner(Collection::new(
        ctx.accounts.admin.key(),
        params,
        ctx.bumps.collection,
        ctx.bumps.registry,
        ctx.bumps.treasury,
    ));

    let registry = &mut ctx.accounts.registry;
    registry.set_inner(OwnerRegistry::new(params.max_supply, ctx.bumps.registry));

    // Fund the treasury up to rent exemption so small payments can land in it
    let rent_exempt = Rent::get()?.minimum_balance(0);
    let shortfall = rent_exempt.saturating_sub(ctx.accounts.treasury.lamports());
    if shortfall > 0 {
        let cpi_context = CpiContext::new(
            ctx.accounts.system_program.to_account_info(),
            anchor_lang::system_program::Transfer {
                from: ctx.accounts.admin.to_account_info(),
                to: ctx.accounts.treasury.to_account_info(),
            },
        );
        anchor_lang::system_program::transfer(cpi_context, shortfall)?;
    }

    msg!(
        "Collection initialized: max_supply={}, public_price={}, whitelist_price={}",
        params.max_supply,
        params.public_price,
        params.whitelist_price
    );

    emit!(Initialized {
        admin: ctx.accounts.admin.key(),
        max_supply: params.max_supply,
        public_price: params.public_price,
        whitelist_price: params.whitelist_price,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}
