//! Program constants
//!
//! Seeds, token parameters and the ids of the programs this program calls into.

use pinocchio::pubkey::Pubkey;

// =============================================================================
// PDA Seeds
// =============================================================================

/// Global config account seed
pub const CONFIG_SEED: &[u8] = b"init";

/// Credit token mint seed
pub const MINT_SEED: &[u8] = b"deanno";

/// Worker account seed (followed by the worker key)
pub const WORKER_SEED: &[u8] = b"worker";

/// Demander account seed (followed by the demander key)
pub const DEMANDER_SEED: &[u8] = b"demander";

/// Metaplex metadata account seed
pub const METADATA_SEED: &[u8] = b"metadata";

// =============================================================================
// Token Parameters
// =============================================================================

/// Decimals of the credit token mint
pub const CREDIT_DECIMALS: u8 = 9;

/// Upper bound of `withdraw_percent`
pub const MAX_WITHDRAW_PERCENT: u64 = 100;

/// SPL Mint account size
pub const MINT_ACCOUNT_LEN: usize = 82;

/// Metaplex string limits
pub const MAX_NAME_LENGTH: usize = 32;
pub const MAX_SYMBOL_LENGTH: usize = 10;
pub const MAX_URI_LENGTH: usize = 200;

// =============================================================================
// Authorities and Mints
// =============================================================================

/// Only this key may run `initialize`: iSi6TRwqF6RU1R24wY3AWJv9miihmnNUENjEfn3FKTZ
pub const ADMIN: Pubkey = [
    0x0a, 0x9d, 0xe1, 0xc3, 0x4f, 0x34, 0x2b, 0x4f,
    0x0d, 0x74, 0x90, 0x2b, 0xcb, 0xbd, 0x1d, 0xa5,
    0xc8, 0xfc, 0x29, 0x44, 0x98, 0xf3, 0xba, 0x3a,
    0xd6, 0xe6, 0xb3, 0xfb, 0xfb, 0xd3, 0x25, 0xfc,
];

/// USDC mint: EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v
#[cfg(not(feature = "devnet"))]
pub const STABLE_MINT: Pubkey = [
    0xc6, 0xfa, 0x7a, 0xf3, 0xbe, 0xdb, 0xad, 0x3a,
    0x3d, 0x65, 0xf3, 0x6a, 0xab, 0xc9, 0x74, 0x31,
    0xb1, 0xbb, 0xe4, 0xc2, 0xd2, 0xf6, 0xe0, 0xe4,
    0x7c, 0xa6, 0x02, 0x03, 0x45, 0x2f, 0x5d, 0x61,
];

/// Devnet USDC mint: 4zMMC9srt5Ri5X14GAgXhaHii3GnPAEERYPJgZJDncDU
#[cfg(feature = "devnet")]
pub const STABLE_MINT: Pubkey = [
    0x3b, 0x44, 0x2c, 0xb3, 0x91, 0x21, 0x57, 0xf1,
    0x3a, 0x93, 0x3d, 0x01, 0x34, 0x28, 0x2d, 0x03,
    0x2b, 0x5f, 0xfe, 0xcd, 0x01, 0xa2, 0xdb, 0xf1,
    0xb7, 0x79, 0x06, 0x08, 0xdf, 0x00, 0x2e, 0xa7,
];

// =============================================================================
// Program IDs
// =============================================================================

/// System program ID (all zeros)
pub const SYSTEM_PROGRAM_ID: Pubkey = [0; 32];

/// SPL Token program: TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA
pub const TOKEN_PROGRAM_ID: Pubkey = [
    0x06, 0xdd, 0xf6, 0xe1, 0xd7, 0x65, 0xa1, 0x93,
    0xd9, 0xcb, 0xe1, 0x46, 0xce, 0xeb, 0x79, 0xac,
    0x1c, 0xb4, 0x85, 0xed, 0x5f, 0x5b, 0x37, 0x91,
    0x3a, 0x8c, 0xf5, 0x85, 0x7e, 0xff, 0x00, 0xa9,
];

/// Associated Token Account program: ATokenGPvbdGVxr1b2hvZbsiqW5xWH25efTNsLJA8knL
pub const ASSOCIATED_TOKEN_PROGRAM_ID: Pubkey = [
    0x8c, 0x97, 0x25, 0x8f, 0x4e, 0x24, 0x89, 0xf1,
    0xbb, 0x3d, 0x10, 0x29, 0x14, 0x8e, 0x0d, 0x83,
    0x0b, 0x5a, 0x13, 0x99, 0xda, 0xff, 0x10, 0x84,
    0x04, 0x8e, 0x7b, 0xd8, 0xdb, 0xe9, 0xf8, 0x59,
];

/// Metaplex Token Metadata program: metaqbxxUerdq28cj1RbAWkYQm3ybzjb6a8bt518x1s
pub const TOKEN_METADATA_PROGRAM_ID: Pubkey = [
    0x0b, 0x70, 0x65, 0xb1, 0xe3, 0xd1, 0x7c, 0x45,
    0x38, 0x9d, 0x52, 0x7f, 0x6b, 0x04, 0xc3, 0xcd,
    0x58, 0xb8, 0x6c, 0x73, 0x1a, 0xa0, 0xfd, 0xb5,
    0x49, 0xb6, 0xd1, 0xbc, 0x03, 0xf8, 0x29, 0x46,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_prefixes_unique() {
        let all_seeds = [CONFIG_SEED, MINT_SEED, WORKER_SEED, DEMANDER_SEED];
        for (i, a) in all_seeds.iter().enumerate() {
            for (j, b) in all_seeds.iter().enumerate() {
                if i != j {
                    assert_ne!(a, b, "Seed collision detected");
                }
            }
        }
    }

    #[test]
    fn test_program_ids_distinct() {
        assert_ne!(TOKEN_PROGRAM_ID, ASSOCIATED_TOKEN_PROGRAM_ID);
        assert_ne!(TOKEN_PROGRAM_ID, TOKEN_METADATA_PROGRAM_ID);
        assert_ne!(ADMIN, SYSTEM_PROGRAM_ID);
    }
}
