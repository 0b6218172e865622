//! Helpers shared by the instruction handlers

pub mod metadata;
pub mod pda;
pub mod token;

pub use metadata::*;
pub use pda::*;
pub use token::*;
