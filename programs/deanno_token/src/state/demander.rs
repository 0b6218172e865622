//! DemanderAccount state

use pinocchio::{program_error::ProgramError, pubkey::Pubkey};
use core::mem::size_of;
use crate::errors::DeAnnoError;
use super::has_discriminator;

/// Per-demander account
///
/// Seeds: ["demander", demander]
#[repr(C)]
pub struct DemanderAccount {
    /// The demander wallet that pays for work
    pub owner: Pubkey,
    /// Credit whole units still available to distribute
    balance: [u8; 8],
    /// Credit whole units distributed so far
    total_spent: [u8; 8],
    /// PDA bump seed
    pub bump: u8,
    /// Padding for alignment
    pub _padding: [u8; 7],
}

impl DemanderAccount {
    pub const DISCRIMINATOR: [u8; 8] = [0x44, 0x65, 0x44, 0x65, 0x6d, 0x61, 0x6e, 0x64]; // "DeDemand"

    pub const LEN: usize = size_of::<Self>();

    pub const SPACE: usize = 8 + Self::LEN;

    #[inline(always)]
    pub fn load(data: &[u8]) -> Result<&Self, ProgramError> {
        if data.len() < Self::SPACE || !has_discriminator(data, &Self::DISCRIMINATOR) {
            return Err(DeAnnoError::NotFound.into());
        }
        Ok(unsafe { &*(data[8..].as_ptr() as *const Self) })
    }

    #[inline(always)]
    pub fn load_mut(data: &mut [u8]) -> Result<&mut Self, ProgramError> {
        if data.len() < Self::SPACE || !has_discriminator(data, &Self::DISCRIMINATOR) {
            return Err(DeAnnoError::NotFound.into());
        }
        Ok(unsafe { &mut *(data[8..].as_mut_ptr() as *mut Self) })
    }

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
    pub fn balance(&self) -> u64 {
        u64::from_le_bytes(self.balance)
    }

    #[inline(always)]
    pub fn set_balance(&mut self, value: u64) {
        self.balance = value.to_le_bytes();
    }

    #[inline(always)]
    pub fn total_spent(&self) -> u64 {
        u64::from_le_bytes(self.total_spent)
    }

    #[inline(always)]
    pub fn set_total_spent(&mut self, value: u64) {
        self.total_spent = value.to_le_bytes();
    }

    #[inline(always)]
    pub fn is_owned_by(&self, key: &Pubkey) -> bool {
        &self.owner == key
    }

    /// Signer must be the stored owner
    #[inline(always)]
    pub fn authorize(&self, signer: &Pubkey) -> Result<(), ProgramError> {
        if !self.is_owned_by(signer) {
            return Err(DeAnnoError::Unauthorized.into());
        }
        Ok(())
    }
}
