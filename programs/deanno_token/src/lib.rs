//! DeAnno Token Program
//!
//! Credit-token accounting for a labeling marketplace:
//! - Demanders hold a prepaid balance and pay workers in credit tokens
//! - Workers redeem credit tokens for a stable asset held in the program reserve
//! - The redemption rate and the withdrawable share are fixed at initialization
//!
//! Built with Pinocchio for minimal binary size and compute usage.

#![cfg_attr(target_os = "solana", no_std)]

#[cfg(not(target_os = "solana"))]
extern crate std;

use pinocchio::{
    account_info::AccountInfo,
    program_error::ProgramError,
    pubkey::Pubkey,
    ProgramResult,
};

pub mod constants;
pub mod engine;
pub mod errors;
pub mod instructions;
pub mod state;
pub mod utils;

pub use errors::*;
pub use instructions::*;
pub use state::*;

// Program ID: 2ckWV1BszPt6hwfjyLP4FMSrR4zxbYhkXbnJcDWpq4Q7
pub const ID: Pubkey = [
    0x18, 0x04, 0x35, 0xd3, 0xcf, 0x17, 0xb5, 0x96,
    0x74, 0xaf, 0x14, 0x04, 0x2f, 0xd6, 0xfd, 0x67,
    0x52, 0xe4, 0x9b, 0x2b, 0xe9, 0x61, 0xa8, 0xdc,
    0xad, 0xde, 0x05, 0x10, 0xf4, 0xc6, 0x12, 0xb8,
];

// Entrypoint and allocator for BPF builds
#[cfg(not(feature = "no-entrypoint"))]
pinocchio::program_entrypoint!(process_instruction);
#[cfg(not(feature = "no-entrypoint"))]
pinocchio::default_allocator!();
#[cfg(not(feature = "no-entrypoint"))]
pinocchio::nostd_panic_handler!();

/// Main program entrypoint
pub fn process_instruction(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    instruction_data: &[u8],
) -> ProgramResult {
    let (discriminator, data) = instruction_data
        .split_first()
        .ok_or(ProgramError::InvalidInstructionData)?;

    match Instruction::try_from(*discriminator)? {
        // Setup
        Instruction::Initialize => process_initialize(accounts, data, program_id),
        Instruction::InitWorker => process_init_worker(accounts, data, program_id),
        Instruction::InitDemander => process_init_demander(accounts, data, program_id),

        // Credit flow
        Instruction::TokenDistribution => process_token_distribution(accounts, data, program_id),
        Instruction::WorkerWithdraw => process_worker_withdraw(accounts, data, program_id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_program_id() {
        assert_eq!(ID.len(), 32);
        assert_ne!(ID, constants::SYSTEM_PROGRAM_ID);
    }

    #[test]
    fn test_account_sizes() {
        assert_eq!(ConfigAccount::SPACE, 8 + ConfigAccount::LEN);
        assert!(ConfigAccount::SPACE < 200);
        assert!(WorkerAccount::SPACE < 100);
        assert!(DemanderAccount::SPACE < 100);
    }

    #[test]
    fn test_empty_instruction_rejected() {
        assert_eq!(
            process_instruction(&ID, &[], &[]),
            Err(ProgramError::InvalidInstructionData)
        );
    }

    #[test]
    fn test_unknown_discriminator_rejected() {
        assert_eq!(
            process_instruction(&ID, &[], &[9]),
            Err(ProgramError::InvalidInstructionData)
        );
    }
}
