//! ConfigAccount state
//!
//! The program-wide singleton holding the credit mint and the exchange terms.

use pinocchio::{program_error::ProgramError, pubkey::Pubkey};
use core::mem::size_of;
use crate::errors::DeAnnoError;
use super::has_discriminator;

/// Global configuration account
///
/// Seeds: ["init"]
#[repr(C)]
pub struct ConfigAccount {
    /// Admin that initialized the program
    pub admin: Pubkey,
    /// Credit token mint controlled by this program
    pub token_mint: Pubkey,
    /// Stable-asset mint paid out on redemption
    pub stable_mint: Pubkey,
    /// Stable-asset whole units per credit whole unit
    token_price: [u8; 8],
    /// Percent of the redeemed value paid out, 0..=100
    withdraw_percent: [u8; 8],
    /// PDA bump seed of this account
    pub bump: u8,
    /// Padding for alignment
    pub _padding: [u8; 7],
}

impl ConfigAccount {
    /// Account discriminator
    pub const DISCRIMINATOR: [u8; 8] = [0x44, 0x65, 0x43, 0x6f, 0x6e, 0x66, 0x69, 0x67]; // "DeConfig"

    /// Size of the account data (without discriminator)
    pub const LEN: usize = size_of::<Self>();

    /// Total size including 8-byte discriminator
    pub const SPACE: usize = 8 + Self::LEN;

    /// Load from account data (validates discriminator and length)
    #[inline(always)]
    pub fn load(data: &[u8]) -> Result<&Self, ProgramError> {
        if data.len() < Self::SPACE {
            return Err(DeAnnoError::NotFound.into());
        }
        if !has_discriminator(data, &Self::DISCRIMINATOR) {
            return Err(DeAnnoError::NotFound.into());
        }
        Ok(unsafe { &*(data[8..].as_ptr() as *const Self) })
    }

    /// Initialize account data with discriminator
    #[inline(always)]
    pub fn init(data: &mut [u8]) -> Result<&mut Self, ProgramError> {
        if data.len() < Self::SPACE {
            return Err(DeAnnoError::InvalidAccountData.into());
        }
        if has_discriminator(data, &Self::DISCRIMINATOR) {
            return Err(DeAnnoError::AlreadyInitialized.into());
        }
        data[..8].copy_from_slice(&Self::DISCRIMINATOR);
        data[8..Self::SPACE].fill(0);
        Ok(unsafe { &mut *(data[8..].as_mut_ptr() as *mut Self) })
    }

    #[inline(always)]
    pub fn token_price(&self) -> u64 {
        u64::from_le_bytes(self.token_price)
    }

    #[inline(always)]
    pub fn set_token_price(&mut self, value: u64) {
        self.token_price = value.to_le_bytes();
    }

    #[inline(always)]
    pub fn withdraw_percent(&self) -> u64 {
        u64::from_le_bytes(self.withdraw_percent)
    }

    #[inline(always)]
    pub fn set_withdraw_percent(&mut self, value: u64) {
        self.withdraw_percent = value.to_le_bytes();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_size() {
        assert_eq!(ConfigAccount::LEN, 32 * 3 + 8 + 8 + 8);
        assert_eq!(ConfigAccount::SPACE, 8 + ConfigAccount::LEN);
    }

    #[test]
    fn test_config_init_then_load() {
        let mut data = vec![0u8; ConfigAccount::SPACE];
        {
            let config = ConfigAccount::init(&mut data).unwrap();
            config.admin = [7u8; 32];
            config.set_token_price(1);
            config.set_withdraw_percent(50);
            config.bump = 254;
        }
        let config = ConfigAccount::load(&data).unwrap();
        assert_eq!(config.admin, [7u8; 32]);
        assert_eq!(config.token_price(), 1);
        assert_eq!(config.withdraw_percent(), 50);
        assert_eq!(config.bump, 254);
    }

    #[test]
    fn test_config_second_init_fails() {
        let mut data = vec![0u8; ConfigAccount::SPACE];
        ConfigAccount::init(&mut data).unwrap();
        assert_eq!(
            ConfigAccount::init(&mut data).err(),
            Some(DeAnnoError::AlreadyInitialized.into())
        );
    }

    #[test]
    fn test_config_load_uninitialized() {
        let data = vec![0u8; ConfigAccount::SPACE];
        assert_eq!(ConfigAccount::load(&data).err(), Some(DeAnnoError::NotFound.into()));
        assert_eq!(ConfigAccount::load(&[]).err(), Some(DeAnnoError::NotFound.into()));
    }
}
