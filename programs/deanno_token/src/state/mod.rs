//! Account state definitions for the DeAnno token program
//!
//! All structs use #[repr(C)] with byte-array fields, so they have alignment 1
//! and can be viewed in place over any account data buffer.

mod config;
mod worker;
mod demander;

pub use config::*;
pub use worker::*;
pub use demander::*;

/// Check whether account data already carries the given discriminator
#[inline(always)]
pub fn has_discriminator(data: &[u8], discriminator: &[u8; 8]) -> bool {
    data.len() >= 8 && &data[..8] == discriminator
}
