//! InitWorker instruction
//!
//! Creates the worker account keyed by the signing worker.

use pinocchio::{
    account_info::AccountInfo,
    program_error::ProgramError,
    pubkey::Pubkey,
    seeds,
    ProgramResult,
};

use crate::{
    constants::{SYSTEM_PROGRAM_ID, WORKER_SEED},
    errors::DeAnnoError,
    require,
    state::WorkerAccount,
    utils::{create_pda_account, is_allocated, verify_pda},
};

use super::read_optional_u64;

pub struct InitWorkerAccounts<'a> {
    pub worker: &'a AccountInfo,
    pub worker_account: &'a AccountInfo,
    pub system_program: &'a AccountInfo,
}

impl<'a> TryFrom<&'a [AccountInfo]> for InitWorkerAccounts<'a> {
    type Error = ProgramError;

    fn try_from(accounts: &'a [AccountInfo]) -> Result<Self, Self::Error> {
        let [worker, worker_account, system_program, ..] = accounts else {
            return Err(ProgramError::NotEnoughAccountKeys);
        };

        if !worker.is_signer() {
            return Err(ProgramError::MissingRequiredSignature);
        }
        if system_program.key() != &SYSTEM_PROGRAM_ID {
            return Err(ProgramError::IncorrectProgramId);
        }

        Ok(Self { worker, worker_account, system_program })
    }
}

/// Process init_worker instruction
/// Data: [withdraw_limit: u64] (optional, defaults to 0)
pub fn process_init_worker(
    accounts: &[AccountInfo],
    data: &[u8],
    program_id: &Pubkey,
) -> ProgramResult {
    let ctx = InitWorkerAccounts::try_from(accounts)?;
    let withdraw_limit = read_optional_u64(data)?;

    let bump = verify_pda(ctx.worker_account, &[WORKER_SEED, ctx.worker.key()], program_id)?;
    require!(!is_allocated(ctx.worker_account), DeAnnoError::AlreadyInitialized);

    let bump_ref = [bump];
    let signer_seeds = seeds!(WORKER_SEED, ctx.worker.key(), &bump_ref);

    create_pda_account(
        ctx.worker,
        ctx.worker_account,
        program_id,
        WorkerAccount::SPACE,
        &signer_seeds,
    )?;

    let worker_data = &mut ctx.worker_account.try_borrow_mut_data()?;
    let worker = WorkerAccount::init(worker_data)?;

    worker.owner = *ctx.worker.key();
    worker.set_withdraw_limit(withdraw_limit);
    worker.set_total_earned(0);
    worker.set_total_redeemed(0);
    worker.bump = bump;

    pinocchio::msg!("Worker account created");

    Ok(())
}
