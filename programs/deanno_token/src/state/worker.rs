//! WorkerAccount state

use pinocchio::{program_error::ProgramError, pubkey::Pubkey};
use core::mem::size_of;
use crate::errors::DeAnnoError;
use super::has_discriminator;

/// Per-worker account
///
/// Seeds: ["worker", worker]
#[repr(C)]
pub struct WorkerAccount {
    /// The worker wallet that authorizes withdrawals
    pub owner: Pubkey,
    /// Credit whole units the worker may still redeem
    withdraw_limit: [u8; 8],
    /// Credit whole units received through distributions
    total_earned: [u8; 8],
    /// Credit whole units redeemed for the stable asset
    total_redeemed: [u8; 8],
    /// PDA bump seed
    pub bump: u8,
    /// Padding for alignment
    pub _padding: [u8; 7],
}

impl WorkerAccount {
    pub const DISCRIMINATOR: [u8; 8] = [0x44, 0x65, 0x57, 0x6f, 0x72, 0x6b, 0x65, 0x72]; // "DeWorker"

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
    pub fn withdraw_limit(&self) -> u64 {
        u64::from_le_bytes(self.withdraw_limit)
    }

    #[inline(always)]
    pub fn set_withdraw_limit(&mut self, value: u64) {
        self.withdraw_limit = value.to_le_bytes();
    }

    #[inline(always)]
    pub fn total_earned(&self) -> u64 {
        u64::from_le_bytes(self.total_earned)
    }

    #[inline(always)]
    pub fn set_total_earned(&mut self, value: u64) {
        self.total_earned = value.to_le_bytes();
    }

    #[inline(always)]
    pub fn total_redeemed(&self) -> u64 {
        u64::from_le_bytes(self.total_redeemed)
    }

    #[inline(always)]
    pub fn set_total_redeemed(&mut self, value: u64) {
        self.total_redeemed = value.to_le_bytes();
    }

    /// Check the signer against the stored owner
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_worker_size() {
        assert_eq!(WorkerAccount::LEN, 32 + 8 * 3 + 8);
        assert_eq!(WorkerAccount::SPACE, 8 + WorkerAccount::LEN);
    }

    #[test]
    fn test_worker_roundtrip_through_buffer() {
        let mut data = vec![0u8; WorkerAccount::SPACE];
        {
            let worker = WorkerAccount::init(&mut data).unwrap();
            worker.owner = [3u8; 32];
            worker.set_withdraw_limit(100);
        }
        let worker = WorkerAccount::load_mut(&mut data).unwrap();
        assert_eq!(worker.withdraw_limit(), 100);
        assert_eq!(worker.total_earned(), 0);
        assert!(worker.is_owned_by(&[3u8; 32]));
        assert!(!worker.is_owned_by(&[4u8; 32]));
    }

    #[test]
    fn test_worker_init_twice_fails() {
        let mut data = vec![0u8; WorkerAccount::SPACE];
        WorkerAccount::init(&mut data).unwrap().set_withdraw_limit(5);
        assert_eq!(
            WorkerAccount::init(&mut data).err(),
            Some(DeAnnoError::AlreadyInitialized.into())
        );
        // the existing record is untouched
        assert_eq!(WorkerAccount::load(&data).unwrap().withdraw_limit(), 5);
    }

    #[test]
    fn test_worker_authorize_rejects_other_signer() {
        let mut data = vec![0u8; WorkerAccount::SPACE];
        WorkerAccount::init(&mut data).unwrap().owner = [3u8; 32];
        let worker = WorkerAccount::load(&data).unwrap();
        assert_eq!(worker.authorize(&[3u8; 32]), Ok(()));
        assert_eq!(worker.authorize(&[4u8; 32]), Err(DeAnnoError::Unauthorized.into()));
    }

    #[test]
    fn test_worker_short_buffer() {
        let mut data = vec![0u8; WorkerAccount::SPACE - 1];
        assert_eq!(
            WorkerAccount::init(&mut data).err(),
            Some(DeAnnoError::InvalidAccountData.into())
        );
    }
}
