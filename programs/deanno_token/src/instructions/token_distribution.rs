//! TokenDistribution instruction
//!
//! Settles work: debits the demander's balance and mints the same number of
//! credit tokens into the worker's associated token account.

use pinocchio::{
    account_info::AccountInfo,
    program_error::ProgramError,
    pubkey::Pubkey,
    seeds,
    ProgramResult,
};

use crate::{
    constants::{
        ASSOCIATED_TOKEN_PROGRAM_ID, CONFIG_SEED, DEMANDER_SEED, SYSTEM_PROGRAM_ID, WORKER_SEED,
    },
    engine,
    errors::DeAnnoError,
    require,
    state::{ConfigAccount, DemanderAccount, WorkerAccount},
    utils::{
        associated_token_address, create_holding_if_needed, mint_credit, read_mint_decimals,
        validate_token_program, verify_pda,
    },
};

use super::{check_record, read_u64};

/// Token distribution accounts
/// Accounts:
/// 0. demander (signer, writable - pays for the worker ATA if missing)
/// 1. worker (readonly)
/// 2. demander_account (PDA, writable)
/// 3. worker_account (PDA, writable)
/// 4. config (PDA, readonly - mint authority)
/// 5. token_mint (writable)
/// 6. worker_token_account (worker ATA of token_mint, writable)
/// 7. system_program
/// 8. token_program
/// 9. associated_token_program
pub struct TokenDistributionAccounts<'a> {
    pub demander: &'a AccountInfo,
    pub worker: &'a AccountInfo,
    pub demander_account: &'a AccountInfo,
    pub worker_account: &'a AccountInfo,
    pub config: &'a AccountInfo,
    pub token_mint: &'a AccountInfo,
    pub worker_token_account: &'a AccountInfo,
    pub system_program: &'a AccountInfo,
    pub token_program: &'a AccountInfo,
    pub associated_token_program: &'a AccountInfo,
}

impl<'a> TryFrom<&'a [AccountInfo]> for TokenDistributionAccounts<'a> {
    type Error = ProgramError;

    fn try_from(accounts: &'a [AccountInfo]) -> Result<Self, Self::Error> {
        let [demander, worker, demander_account, worker_account, config, token_mint, worker_token_account, system_program, token_program, associated_token_program, ..] = accounts else {
            return Err(ProgramError::NotEnoughAccountKeys);
        };

        // Demander pays, so the demander signs
        if !demander.is_signer() {
            return Err(ProgramError::MissingRequiredSignature);
        }

        if system_program.key() != &SYSTEM_PROGRAM_ID
            || associated_token_program.key() != &ASSOCIATED_TOKEN_PROGRAM_ID
        {
            return Err(ProgramError::IncorrectProgramId);
        }
        validate_token_program(token_program)?;

        Ok(Self {
            demander,
            worker,
            demander_account,
            worker_account,
            config,
            token_mint,
            worker_token_account,
            system_program,
            token_program,
            associated_token_program,
        })
    }
}

/// Process token_distribution instruction
/// Data: [amount: u64] in credit whole units
pub fn process_token_distribution(
    accounts: &[AccountInfo],
    data: &[u8],
    program_id: &Pubkey,
) -> ProgramResult {
    let ctx = TokenDistributionAccounts::try_from(accounts)?;
    let amount = read_u64(data, 0)?;

    check_record(ctx.config, program_id)?;
    check_record(ctx.demander_account, program_id)?;
    check_record(ctx.worker_account, program_id)?;

    let config_bump = {
        let config_data = ctx.config.try_borrow_data()?;
        let config = ConfigAccount::load(&config_data)?;
        require!(ctx.token_mint.key() == &config.token_mint, DeAnnoError::InvalidMint);
        config.bump
    };

    // Owner checks precede address checks
    let (balance, total_spent) = {
        let demander_data = ctx.demander_account.try_borrow_data()?;
        let demander = DemanderAccount::load(&demander_data)?;
        demander.authorize(ctx.demander.key())?;
        (demander.balance(), demander.total_spent())
    };
    let (withdraw_limit, total_earned) = {
        let worker_data = ctx.worker_account.try_borrow_data()?;
        let worker = WorkerAccount::load(&worker_data)?;
        worker.authorize(ctx.worker.key())?;
        (worker.withdraw_limit(), worker.total_earned())
    };

    verify_pda(ctx.config, &[CONFIG_SEED], program_id)?;
    verify_pda(ctx.demander_account, &[DEMANDER_SEED, ctx.demander.key()], program_id)?;
    verify_pda(ctx.worker_account, &[WORKER_SEED, ctx.worker.key()], program_id)?;

    require!(
        ctx.worker_token_account.key()
            == &associated_token_address(ctx.worker.key(), ctx.token_mint.key()),
        DeAnnoError::InvalidTokenAccount
    );

    let plan = engine::plan_distribution(
        balance,
        total_spent,
        withdraw_limit,
        total_earned,
        amount,
        read_mint_decimals(ctx.token_mint)?,
    )?;

    create_holding_if_needed(
        ctx.demander,
        ctx.worker_token_account,
        ctx.worker,
        ctx.token_mint,
        ctx.system_program,
        ctx.token_program,
    )?;

    {
        let demander_data = &mut ctx.demander_account.try_borrow_mut_data()?;
        let demander = DemanderAccount::load_mut(demander_data)?;
        demander.set_balance(plan.demander_balance);
        demander.set_total_spent(plan.demander_total_spent);
    }
    {
        let worker_data = &mut ctx.worker_account.try_borrow_mut_data()?;
        let worker = WorkerAccount::load_mut(worker_data)?;
        worker.set_withdraw_limit(plan.worker_withdraw_limit);
        worker.set_total_earned(plan.worker_total_earned);
    }

    let bump_ref = [config_bump];
    let signer_seeds = seeds!(CONFIG_SEED, &bump_ref);
    mint_credit(
        ctx.token_mint,
        ctx.worker_token_account,
        ctx.config,
        plan.mint_amount,
        &signer_seeds,
    )?;

    pinocchio::msg!("Credit tokens distributed");

    Ok(())
}
