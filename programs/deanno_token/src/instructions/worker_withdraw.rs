//! WorkerWithdraw instruction
//!
//! Burns the worker's credit tokens and pays the stable asset out of the
//! program reserve (the config PDA's associated token account).

use pinocchio::{
    account_info::AccountInfo,
    program_error::ProgramError,
    pubkey::Pubkey,
    seeds,
    ProgramResult,
};

use crate::{
    constants::{ASSOCIATED_TOKEN_PROGRAM_ID, CONFIG_SEED, SYSTEM_PROGRAM_ID, WORKER_SEED},
    engine::{self, ExchangeTerms},
    errors::DeAnnoError,
    require,
    state::{ConfigAccount, WorkerAccount},
    utils::{
        associated_token_address, burn_from, create_holding_if_needed,
        read_mint_decimals, transfer_signed, validate_token_program, verify_pda, Holding,
    },
};

use super::{check_record, read_u64};

/// Worker withdraw accounts
/// Accounts:
/// 0. worker (signer, writable - pays for the stable ATA if missing)
/// 1. worker_account (PDA, writable)
/// 2. config (PDA, readonly - reserve authority)
/// 3. token_mint (writable)
/// 4. stable_mint (readonly)
/// 5. worker_token_account (writable)
/// 6. worker_stable_account (worker ATA of stable_mint, writable)
/// 7. reserve_stable_account (config ATA of stable_mint, writable)
/// 8. system_program
/// 9. token_program
/// 10. associated_token_program
pub struct WorkerWithdrawAccounts<'a> {
    pub worker: &'a AccountInfo,
    pub worker_account: &'a AccountInfo,
    pub config: &'a AccountInfo,
    pub token_mint: &'a AccountInfo,
    pub stable_mint: &'a AccountInfo,
    pub worker_token_account: &'a AccountInfo,
    pub worker_stable_account: &'a AccountInfo,
    pub reserve_stable_account: &'a AccountInfo,
    pub system_program: &'a AccountInfo,
    pub token_program: &'a AccountInfo,
    pub associated_token_program: &'a AccountInfo,
}

impl<'a> TryFrom<&'a [AccountInfo]> for WorkerWithdrawAccounts<'a> {
    type Error = ProgramError;

    fn try_from(accounts: &'a [AccountInfo]) -> Result<Self, Self::Error> {
        let [worker, worker_account, config, token_mint, stable_mint, worker_token_account, worker_stable_account, reserve_stable_account, system_program, token_program, associated_token_program, ..] = accounts else {
            return Err(ProgramError::NotEnoughAccountKeys);
        };

        if !worker.is_signer() {
            return Err(ProgramError::MissingRequiredSignature);
        }

        if system_program.key() != &SYSTEM_PROGRAM_ID
            || associated_token_program.key() != &ASSOCIATED_TOKEN_PROGRAM_ID
        {
            return Err(ProgramError::IncorrectProgramId);
        }
        validate_token_program(token_program)?;

        Ok(Self {
            worker,
            worker_account,
            config,
            token_mint,
            stable_mint,
            worker_token_account,
            worker_stable_account,
            reserve_stable_account,
            system_program,
            token_program,
            associated_token_program,
        })
    }
}

/// Process worker_withdraw instruction
/// Data: [amount: u64] in credit whole units
pub fn process_worker_withdraw(
    accounts: &[AccountInfo],
    data: &[u8],
    program_id: &Pubkey,
) -> ProgramResult {
    let ctx = WorkerWithdrawAccounts::try_from(accounts)?;
    let amount = read_u64(data, 0)?;

    check_record(ctx.config, program_id)?;
    check_record(ctx.worker_account, program_id)?;

    let (config_bump, token_price, withdraw_percent) = {
        let config_data = ctx.config.try_borrow_data()?;
        let config = ConfigAccount::load(&config_data)?;
        require!(ctx.token_mint.key() == &config.token_mint, DeAnnoError::InvalidMint);
        require!(ctx.stable_mint.key() == &config.stable_mint, DeAnnoError::InvalidMint);
        (config.bump, config.token_price(), config.withdraw_percent())
    };

    let (withdraw_limit, total_redeemed) = {
        let worker_data = ctx.worker_account.try_borrow_data()?;
        let worker = WorkerAccount::load(&worker_data)?;
        worker.authorize(ctx.worker.key())?;
        (worker.withdraw_limit(), worker.total_redeemed())
    };

    verify_pda(ctx.config, &[CONFIG_SEED], program_id)?;
    verify_pda(ctx.worker_account, &[WORKER_SEED, ctx.worker.key()], program_id)?;

    require!(
        ctx.worker_token_account.key()
            == &associated_token_address(ctx.worker.key(), ctx.token_mint.key()),
        DeAnnoError::InvalidTokenAccount
    );
    require!(
        ctx.worker_stable_account.key()
            == &associated_token_address(ctx.worker.key(), ctx.stable_mint.key()),
        DeAnnoError::InvalidTokenAccount
    );
    require!(
        ctx.reserve_stable_account.key()
            == &associated_token_address(ctx.config.key(), ctx.stable_mint.key()),
        DeAnnoError::InvalidTokenAccount
    );

    // Holdings that were never created read as empty
    let credit_holding =
        Holding::read_balance(ctx.worker_token_account, ctx.token_mint.key(), ctx.worker.key())?;
    let reserve_holding =
        Holding::read_balance(ctx.reserve_stable_account, ctx.stable_mint.key(), ctx.config.key())?;

    let terms = ExchangeTerms {
        token_price,
        withdraw_percent,
        credit_decimals: read_mint_decimals(ctx.token_mint)?,
        stable_decimals: read_mint_decimals(ctx.stable_mint)?,
    };

    let plan = engine::plan_withdrawal(
        withdraw_limit,
        total_redeemed,
        credit_holding,
        reserve_holding,
        amount,
        &terms,
    )?;

    create_holding_if_needed(
        ctx.worker,
        ctx.worker_stable_account,
        ctx.worker,
        ctx.stable_mint,
        ctx.system_program,
        ctx.token_program,
    )?;

    {
        let worker_data = &mut ctx.worker_account.try_borrow_mut_data()?;
        let worker = WorkerAccount::load_mut(worker_data)?;
        worker.set_withdraw_limit(plan.worker_withdraw_limit);
        worker.set_total_redeemed(plan.worker_total_redeemed);
    }

    burn_from(ctx.token_mint, ctx.worker_token_account, ctx.worker, plan.burn_amount)?;

    if plan.payout > 0 {
        let bump_ref = [config_bump];
        let signer_seeds = seeds!(CONFIG_SEED, &bump_ref);
        transfer_signed(
            ctx.reserve_stable_account,
            ctx.worker_stable_account,
            ctx.config,
            plan.payout,
            &signer_seeds,
        )?;
    }

    pinocchio::msg!("Credit tokens redeemed");

    Ok(())
}
