//! PDA creation and derivation helpers
//!
//! Every record lives at an address derived from fixed seeds plus the owning
//! identity. The runtime supplies the storage; these helpers create accounts at
//! those addresses and check that a passed account sits where it should.

use pinocchio::{
    account_info::AccountInfo,
    instruction::{Seed, Signer},
    program_error::ProgramError,
    pubkey::{find_program_address, Pubkey},
    sysvars::{rent::Rent, Sysvar},
    ProgramResult,
};
use pinocchio_system::instructions::CreateAccount;

use crate::{
    constants::{ASSOCIATED_TOKEN_PROGRAM_ID, TOKEN_PROGRAM_ID},
    errors::DeAnnoError,
    require,
};

/// Create a rent-exempt account at a PDA, signed with its seeds (bump included)
#[inline]
pub fn create_pda_account(
    payer: &AccountInfo,
    pda_account: &AccountInfo,
    owner: &Pubkey,
    space: usize,
    signer_seeds: &[Seed],
) -> ProgramResult {
    let rent = Rent::get()?;
    let lamports = rent.minimum_balance(space);

    CreateAccount {
        from: payer,
        to: pda_account,
        lamports,
        space: space as u64,
        owner,
    }
    .invoke_signed(&[Signer::from(signer_seeds)])
}

/// Derive the PDA for `seeds` and check that `account` is it; returns the bump
#[inline]
pub fn verify_pda(
    account: &AccountInfo,
    seeds: &[&[u8]],
    program_id: &Pubkey,
) -> Result<u8, ProgramError> {
    let (expected, bump) = find_program_address(seeds, program_id);
    require!(account.key() == &expected, DeAnnoError::InvalidPda);
    Ok(bump)
}

/// Associated token account address for (wallet, mint)
#[inline]
pub fn associated_token_address(wallet: &Pubkey, mint: &Pubkey) -> Pubkey {
    find_program_address(
        &[wallet, &TOKEN_PROGRAM_ID, mint],
        &ASSOCIATED_TOKEN_PROGRAM_ID,
    )
    .0
}

/// Account must be owned by this program (validate before deserializing)
#[inline(always)]
pub fn validate_program_owner(account: &AccountInfo, program_id: &Pubkey) -> ProgramResult {
    if account.owner() != program_id {
        return Err(ProgramError::IncorrectProgramId);
    }
    Ok(())
}

/// A record is present at the address (allocated data)
#[inline(always)]
pub fn is_allocated(account: &AccountInfo) -> bool {
    account.data_len() > 0
}
