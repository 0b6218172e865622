//! Custom error codes for the DeAnno token program
//!
//! Error codes start at 6000 (Anchor convention for custom errors)

use pinocchio::program_error::ProgramError;
use thiserror::Error;

/// Custom error codes
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[repr(u32)]
pub enum DeAnnoError {
    /// Account already holds a record
    #[error("Account already initialized")]
    AlreadyInitialized = 6000,
    /// Referenced account holds no record
    #[error("Account not found")]
    NotFound = 6001,
    /// Caller is not the owner of the account
    #[error("Unauthorized")]
    Unauthorized = 6002,
    /// Out-of-range amount or configuration input
    #[error("Invalid parameter")]
    InvalidParameter = 6003,
    /// Balance or holding too low for the requested amount
    #[error("Insufficient funds")]
    InsufficientFunds = 6004,
    /// Program reserve cannot cover the payout
    #[error("Insufficient reserve")]
    InsufficientReserve = 6005,
    /// Widened arithmetic does not fit the target width
    #[error("Arithmetic overflow")]
    ArithmeticOverflow = 6006,
    /// Redemption larger than the worker's remaining withdraw limit
    #[error("Out of withdraw limit")]
    WithdrawLimitExceeded = 6007,
    /// Account address does not match its seeds
    #[error("Invalid PDA")]
    InvalidPda = 6008,
    /// Account data too short or malformed
    #[error("Invalid account data")]
    InvalidAccountData = 6009,
    /// Mint does not match the configured mint
    #[error("Invalid mint")]
    InvalidMint = 6010,
    /// Token account has the wrong mint, owner or program
    #[error("Invalid token account")]
    InvalidTokenAccount = 6011,
}

impl From<DeAnnoError> for ProgramError {
    fn from(e: DeAnnoError) -> Self {
        ProgramError::Custom(e as u32)
    }
}

/// Helper macro for returning custom errors
#[macro_export]
macro_rules! require {
    ($cond:expr, $err:expr) => {
        if !$cond {
            return Err($err.into());
        }
    };
}

/// Helper macro for Option unwrapping with custom error
#[macro_export]
macro_rules! require_some {
    ($opt:expr, $err:expr) => {
        match $opt {
            Some(v) => v,
            None => return Err($err.into()),
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes_map_to_custom() {
        assert_eq!(
            ProgramError::from(DeAnnoError::AlreadyInitialized),
            ProgramError::Custom(6000)
        );
        assert_eq!(
            ProgramError::from(DeAnnoError::InvalidTokenAccount),
            ProgramError::Custom(6011)
        );
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(DeAnnoError::InsufficientReserve.to_string(), "Insufficient reserve");
        assert_eq!(DeAnnoError::WithdrawLimitExceeded.to_string(), "Out of withdraw limit");
    }
}
