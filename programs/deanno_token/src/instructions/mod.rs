//! Instruction handlers for the DeAnno token program
//!
//! Each instruction is implemented as a struct with TryFrom for account parsing
//! and a process function for execution.

mod initialize;
mod init_worker;
mod init_demander;
mod token_distribution;
mod worker_withdraw;

pub use initialize::*;
pub use init_worker::*;
pub use init_demander::*;
pub use token_distribution::*;
pub use worker_withdraw::*;

use pinocchio::{account_info::AccountInfo, program_error::ProgramError, pubkey::Pubkey};

use crate::{
    errors::DeAnnoError,
    require_some,
    utils::{is_allocated, validate_program_owner},
};

/// Instruction discriminators (single byte)
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Instruction {
    /// Create the credit mint, its metadata and the config
    Initialize = 0,
    /// Create a worker account
    InitWorker = 1,
    /// Create a demander account
    InitDemander = 2,
    /// Pay a worker in credit tokens from a demander's balance
    TokenDistribution = 3,
    /// Redeem credit tokens for the stable asset
    WorkerWithdraw = 4,
}

impl TryFrom<u8> for Instruction {
    type Error = ProgramError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Initialize),
            1 => Ok(Self::InitWorker),
            2 => Ok(Self::InitDemander),
            3 => Ok(Self::TokenDistribution),
            4 => Ok(Self::WorkerWithdraw),
            _ => Err(ProgramError::InvalidInstructionData),
        }
    }
}

/// Read a little-endian u64 at `offset`
#[inline(always)]
pub(crate) fn read_u64(data: &[u8], offset: usize) -> Result<u64, ProgramError> {
    data.get(offset..offset + 8)
        .and_then(|bytes| bytes.try_into().ok())
        .map(u64::from_le_bytes)
        .ok_or(ProgramError::InvalidInstructionData)
}

/// Optional trailing u64 argument (absent = 0)
#[inline(always)]
pub(crate) fn read_optional_u64(data: &[u8]) -> Result<u64, ProgramError> {
    if data.is_empty() {
        Ok(0)
    } else {
        read_u64(data, 0)
    }
}

/// Read a `u32` length-prefixed UTF-8 string at `offset`; returns it and the next offset
pub(crate) fn read_str(data: &[u8], offset: usize) -> Result<(&str, usize), ProgramError> {
    let len = data
        .get(offset..offset + 4)
        .and_then(|bytes| bytes.try_into().ok())
        .map(u32::from_le_bytes)
        .ok_or(ProgramError::InvalidInstructionData)? as usize;
    let start = offset + 4;
    let end = start.checked_add(len).ok_or(ProgramError::InvalidInstructionData)?;
    let bytes = require_some!(data.get(start..end), ProgramError::InvalidInstructionData);
    let value = core::str::from_utf8(bytes).map_err(|_| ProgramError::InvalidInstructionData)?;
    Ok((value, end))
}

/// A program record must exist at the address and belong to this program
#[inline(always)]
pub(crate) fn check_record(account: &AccountInfo, program_id: &Pubkey) -> Result<(), ProgramError> {
    if !is_allocated(account) {
        return Err(DeAnnoError::NotFound.into());
    }
    validate_program_owner(account, program_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instruction_discriminators() {
        assert_eq!(Instruction::try_from(0u8), Ok(Instruction::Initialize));
        assert_eq!(Instruction::try_from(4u8), Ok(Instruction::WorkerWithdraw));
        assert_eq!(
            Instruction::try_from(5u8),
            Err(ProgramError::InvalidInstructionData)
        );
    }

    #[test]
    fn test_read_u64() {
        let data = 50u64.to_le_bytes();
        assert_eq!(read_u64(&data, 0), Ok(50));
        assert_eq!(read_u64(&data[..7], 0), Err(ProgramError::InvalidInstructionData));
    }

    #[test]
    fn test_read_optional_u64_defaults_to_zero() {
        assert_eq!(read_optional_u64(&[]), Ok(0));
        assert_eq!(read_optional_u64(&100u64.to_le_bytes()), Ok(100));
        assert_eq!(read_optional_u64(&[1, 2, 3]), Err(ProgramError::InvalidInstructionData));
    }

    #[test]
    fn test_read_str() {
        let mut data = Vec::new();
        data.extend_from_slice(&3u32.to_le_bytes());
        data.extend_from_slice(b"DAN");
        data.push(0xff);
        let (value, next) = read_str(&data, 0).unwrap();
        assert_eq!(value, "DAN");
        assert_eq!(next, 7);
        // length runs past the end
        assert!(read_str(&data[..5], 0).is_err());
        // invalid utf-8
        let bad = [1, 0, 0, 0, 0xff];
        assert!(read_str(&bad, 0).is_err());
    }
}
