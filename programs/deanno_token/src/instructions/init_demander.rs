//! InitDemander instruction
//!
//! Creates the demander account keyed by the signing demander.

use pinocchio::{
    account_info::AccountInfo,
    program_error::ProgramError,
    pubkey::Pubkey,
    seeds,
    ProgramResult,
};

use crate::{
    constants::{DEMANDER_SEED, SYSTEM_PROGRAM_ID},
    errors::DeAnnoError,
    require,
    state::DemanderAccount,
    utils::{create_pda_account, is_allocated, verify_pda},
};

use super::read_optional_u64;

pub struct InitDemanderAccounts<'a> {
    pub demander: &'a AccountInfo,
    pub demander_account: &'a AccountInfo,
    pub system_program: &'a AccountInfo,
}

impl<'a> TryFrom<&'a [AccountInfo]> for InitDemanderAccounts<'a> {
    type Error = ProgramError;

    fn try_from(accounts: &'a [AccountInfo]) -> Result<Self, Self::Error> {
        let [demander, demander_account, system_program, ..] = accounts else {
            return Err(ProgramError::NotEnoughAccountKeys);
        };

        if !demander.is_signer() {
            return Err(ProgramError::MissingRequiredSignature);
        }
        if system_program.key() != &SYSTEM_PROGRAM_ID {
            return Err(ProgramError::IncorrectProgramId);
        }

        Ok(Self { demander, demander_account, system_program })
    }
}

/// Process init_demander instruction
/// Data: [balance: u64] (optional, defaults to 0)
pub fn process_init_demander(
    accounts: &[AccountInfo],
    data: &[u8],
    program_id: &Pubkey,
) -> ProgramResult {
    let ctx = InitDemanderAccounts::try_from(accounts)?;
    let balance = read_optional_u64(data)?;

    let bump = verify_pda(ctx.demander_account, &[DEMANDER_SEED, ctx.demander.key()], program_id)?;
    require!(!is_allocated(ctx.demander_account), DeAnnoError::AlreadyInitialized);

    let bump_ref = [bump];
    let signer_seeds = seeds!(DEMANDER_SEED, ctx.demander.key(), &bump_ref);

    create_pda_account(
        ctx.demander,
        ctx.demander_account,
        program_id,
        DemanderAccount::SPACE,
        &signer_seeds,
    )?;

    let demander_data = &mut ctx.demander_account.try_borrow_mut_data()?;
    let demander = DemanderAccount::init(demander_data)?;

    demander.owner = *ctx.demander.key();
    demander.set_balance(balance);
    demander.set_total_spent(0);
    demander.bump = bump;

    pinocchio::msg!("Demander account created");

    Ok(())
}
