//! Metaplex token metadata CPI
//!
//! Display metadata for the credit mint is registered once, at `initialize`.
//! The instruction is encoded by hand (borsh layout of
//! `CreateMetadataAccountV3`) into a stack buffer.

use pinocchio::{
    account_info::AccountInfo,
    cpi::invoke_signed,
    instruction::{AccountMeta, Instruction, Seed, Signer},
    pubkey::Pubkey,
    ProgramResult,
};

use crate::{
    constants::{MAX_NAME_LENGTH, MAX_SYMBOL_LENGTH, MAX_URI_LENGTH, TOKEN_METADATA_PROGRAM_ID},
    errors::DeAnnoError,
};

/// CreateMetadataAccountV3 instruction discriminator
const CREATE_METADATA_ACCOUNT_V3: u8 = 33;

/// discriminator + three strings + fee + three None options + is_mutable + collection_details
pub const METADATA_IX_MAX_LEN: usize =
    1 + (4 + MAX_NAME_LENGTH) + (4 + MAX_SYMBOL_LENGTH) + (4 + MAX_URI_LENGTH) + 2 + 3 + 1 + 1;

/// Display metadata passed through `initialize`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TokenMetadata<'a> {
    pub name: &'a str,
    pub symbol: &'a str,
    pub uri: &'a str,
}

impl<'a> TokenMetadata<'a> {
    /// Reject strings Metaplex would refuse
    pub fn validate(&self) -> Result<(), DeAnnoError> {
        if self.name.len() > MAX_NAME_LENGTH
            || self.symbol.len() > MAX_SYMBOL_LENGTH
            || self.uri.len() > MAX_URI_LENGTH
        {
            return Err(DeAnnoError::InvalidParameter);
        }
        Ok(())
    }

    /// Encode the instruction data; returns the number of bytes written
    pub fn encode(&self, buf: &mut [u8; METADATA_IX_MAX_LEN]) -> Result<usize, DeAnnoError> {
        self.validate()?;

        let mut offset = 0;
        buf[offset] = CREATE_METADATA_ACCOUNT_V3;
        offset += 1;

        for field in [self.name, self.symbol, self.uri] {
            let bytes = field.as_bytes();
            buf[offset..offset + 4].copy_from_slice(&(bytes.len() as u32).to_le_bytes());
            offset += 4;
            buf[offset..offset + bytes.len()].copy_from_slice(bytes);
            offset += bytes.len();
        }

        // seller_fee_basis_points
        buf[offset..offset + 2].copy_from_slice(&0u16.to_le_bytes());
        offset += 2;
        // creators, collection, uses: None
        buf[offset..offset + 3].fill(0);
        offset += 3;
        // is_mutable
        buf[offset] = 1;
        offset += 1;
        // collection_details: None
        buf[offset] = 0;
        offset += 1;

        Ok(offset)
    }
}

/// Metadata accounts
pub struct MetadataAccounts<'a> {
    pub metadata: &'a AccountInfo,
    pub mint: &'a AccountInfo,
    /// PDA acting as both mint and update authority
    pub authority: &'a AccountInfo,
    pub payer: &'a AccountInfo,
    pub system_program: &'a AccountInfo,
    pub rent: &'a AccountInfo,
}

/// Register display metadata for the mint, signed by the authority PDA
pub fn create_metadata(
    accounts: &MetadataAccounts,
    metadata: &TokenMetadata,
    signer_seeds: &[Seed],
) -> ProgramResult {
    let mut data = [0u8; METADATA_IX_MAX_LEN];
    let len = metadata.encode(&mut data)?;

    let metas = [
        AccountMeta::writable(accounts.metadata.key()),
        AccountMeta::readonly(accounts.mint.key()),
        AccountMeta::readonly_signer(accounts.authority.key()),
        AccountMeta::writable_signer(accounts.payer.key()),
        AccountMeta::readonly_signer(accounts.authority.key()),
        AccountMeta::readonly(accounts.system_program.key()),
        AccountMeta::readonly(accounts.rent.key()),
    ];

    let program_id: Pubkey = TOKEN_METADATA_PROGRAM_ID;
    let instruction = Instruction {
        program_id: &program_id,
        accounts: &metas,
        data: &data[..len],
    };

    invoke_signed(
        &instruction,
        &[
            accounts.metadata,
            accounts.mint,
            accounts.authority,
            accounts.payer,
            accounts.authority,
            accounts.system_program,
            accounts.rent,
        ],
        &[Signer::from(signer_seeds)],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_layout() {
        let metadata = TokenMetadata { name: "DeAnno", symbol: "DAN", uri: "https://x" };
        let mut buf = [0u8; METADATA_IX_MAX_LEN];
        let len = metadata.encode(&mut buf).unwrap();

        assert_eq!(len, 1 + (4 + 6) + (4 + 3) + (4 + 9) + 2 + 3 + 1 + 1);
        assert_eq!(buf[0], 33);
        assert_eq!(&buf[1..5], &6u32.to_le_bytes());
        assert_eq!(&buf[5..11], b"DeAnno");
        assert_eq!(&buf[11..15], &3u32.to_le_bytes());
        assert_eq!(&buf[15..18], b"DAN");
        // is_mutable sits right before the trailing None
        assert_eq!(buf[len - 2], 1);
        assert_eq!(buf[len - 1], 0);
    }

    #[test]
    fn test_encode_max_lengths_fit() {
        let name = "n".repeat(MAX_NAME_LENGTH);
        let symbol = "s".repeat(MAX_SYMBOL_LENGTH);
        let uri = "u".repeat(MAX_URI_LENGTH);
        let metadata = TokenMetadata { name: &name, symbol: &symbol, uri: &uri };
        let mut buf = [0u8; METADATA_IX_MAX_LEN];
        assert_eq!(metadata.encode(&mut buf), Ok(METADATA_IX_MAX_LEN));
    }

    #[test]
    fn test_symbol_too_long() {
        let metadata = TokenMetadata { name: "DeAnno", symbol: "DANDANDANDA", uri: "" };
        assert_eq!(metadata.validate(), Err(DeAnnoError::InvalidParameter));
    }
}
