//! Initialize instruction
//!
//! Creates the credit mint (config PDA as mint authority), registers its
//! display metadata and writes the singleton config.

use pinocchio::{
    account_info::AccountInfo,
    program_error::ProgramError,
    pubkey::{find_program_address, Pubkey},
    seeds,
    ProgramResult,
};

use crate::{
    constants::{
        ADMIN, CONFIG_SEED, CREDIT_DECIMALS, METADATA_SEED, MINT_ACCOUNT_LEN, MINT_SEED,
        STABLE_MINT, SYSTEM_PROGRAM_ID, TOKEN_METADATA_PROGRAM_ID, TOKEN_PROGRAM_ID,
    },
    engine,
    errors::DeAnnoError,
    require,
    state::ConfigAccount,
    utils::{
        create_metadata, create_pda_account, initialize_mint, is_allocated, read_mint_decimals,
        validate_token_program, verify_pda, MetadataAccounts, TokenMetadata,
    },
};

use super::{read_str, read_u64};

/// Initialize instruction accounts
/// Accounts:
/// 0. admin (signer, writable)
/// 1. config (PDA ["init"], writable)
/// 2. token_mint (PDA ["deanno"], writable)
/// 3. metadata (Metaplex PDA of token_mint, writable)
/// 4. stable_mint (readonly)
/// 5. system_program
/// 6. token_program
/// 7. token_metadata_program
/// 8. rent sysvar
pub struct InitializeAccounts<'a> {
    pub admin: &'a AccountInfo,
    pub config: &'a AccountInfo,
    pub token_mint: &'a AccountInfo,
    pub metadata: &'a AccountInfo,
    pub stable_mint: &'a AccountInfo,
    pub system_program: &'a AccountInfo,
    pub token_program: &'a AccountInfo,
    pub token_metadata_program: &'a AccountInfo,
    pub rent: &'a AccountInfo,
}

impl<'a> TryFrom<&'a [AccountInfo]> for InitializeAccounts<'a> {
    type Error = ProgramError;

    fn try_from(accounts: &'a [AccountInfo]) -> Result<Self, Self::Error> {
        let [admin, config, token_mint, metadata, stable_mint, system_program, token_program, token_metadata_program, rent, ..] = accounts else {
            return Err(ProgramError::NotEnoughAccountKeys);
        };

        if !admin.is_signer() {
            return Err(ProgramError::MissingRequiredSignature);
        }
        require!(admin.key() == &ADMIN, DeAnnoError::Unauthorized);

        if system_program.key() != &SYSTEM_PROGRAM_ID {
            return Err(ProgramError::IncorrectProgramId);
        }
        validate_token_program(token_program)?;
        if token_metadata_program.key() != &TOKEN_METADATA_PROGRAM_ID {
            return Err(ProgramError::IncorrectProgramId);
        }

        Ok(Self {
            admin,
            config,
            token_mint,
            metadata,
            stable_mint,
            system_program,
            token_program,
            token_metadata_program,
            rent,
        })
    }
}

/// Instruction data for Initialize
/// Layout: [token_price: u64, withdraw_percent: u64, name: str, symbol: str, uri: str]
/// where str = [len: u32, utf-8 bytes]
pub struct InitializeData<'a> {
    pub token_price: u64,
    pub withdraw_percent: u64,
    pub metadata: TokenMetadata<'a>,
}

impl<'a> InitializeData<'a> {
    pub fn try_from_slice(data: &'a [u8]) -> Result<Self, ProgramError> {
        let token_price = read_u64(data, 0)?;
        let withdraw_percent = read_u64(data, 8)?;
        let (name, offset) = read_str(data, 16)?;
        let (symbol, offset) = read_str(data, offset)?;
        let (uri, _) = read_str(data, offset)?;

        Ok(Self {
            token_price,
            withdraw_percent,
            metadata: TokenMetadata { name, symbol, uri },
        })
    }
}

/// Process initialize instruction
pub fn process_initialize(
    accounts: &[AccountInfo],
    data: &[u8],
    program_id: &Pubkey,
) -> ProgramResult {
    let ctx = InitializeAccounts::try_from(accounts)?;
    let args = InitializeData::try_from_slice(data)?;

    engine::validate_terms(args.token_price, args.withdraw_percent)?;
    args.metadata.validate()?;

    let config_bump = verify_pda(ctx.config, &[CONFIG_SEED], program_id)?;
    let mint_bump = verify_pda(ctx.token_mint, &[MINT_SEED], program_id)?;

    let (expected_metadata, _) = find_program_address(
        &[METADATA_SEED, &TOKEN_METADATA_PROGRAM_ID, ctx.token_mint.key()],
        &TOKEN_METADATA_PROGRAM_ID,
    );
    require!(ctx.metadata.key() == &expected_metadata, DeAnnoError::InvalidPda);

    // Singleton: a record (or a mint) at either address means we already ran
    require!(!is_allocated(ctx.config), DeAnnoError::AlreadyInitialized);
    require!(!is_allocated(ctx.token_mint), DeAnnoError::AlreadyInitialized);

    require!(ctx.stable_mint.key() == &STABLE_MINT, DeAnnoError::InvalidMint);
    read_mint_decimals(ctx.stable_mint)?;

    let config_bump_ref = [config_bump];
    let config_seeds = seeds!(CONFIG_SEED, &config_bump_ref);
    let mint_bump_ref = [mint_bump];
    let mint_seeds = seeds!(MINT_SEED, &mint_bump_ref);

    create_pda_account(
        ctx.admin,
        ctx.config,
        program_id,
        ConfigAccount::SPACE,
        &config_seeds,
    )?;

    create_pda_account(
        ctx.admin,
        ctx.token_mint,
        &TOKEN_PROGRAM_ID,
        MINT_ACCOUNT_LEN,
        &mint_seeds,
    )?;
    initialize_mint(ctx.token_mint, CREDIT_DECIMALS, ctx.config.key())?;

    create_metadata(
        &MetadataAccounts {
            metadata: ctx.metadata,
            mint: ctx.token_mint,
            authority: ctx.config,
            payer: ctx.admin,
            system_program: ctx.system_program,
            rent: ctx.rent,
        },
        &args.metadata,
        &config_seeds,
    )?;

    let config_data = &mut ctx.config.try_borrow_mut_data()?;
    let config = ConfigAccount::init(config_data)?;

    config.admin = *ctx.admin.key();
    config.token_mint = *ctx.token_mint.key();
    config.stable_mint = *ctx.stable_mint.key();
    config.set_token_price(args.token_price);
    config.set_withdraw_percent(args.withdraw_percent);
    config.bump = config_bump;

    pinocchio::msg!("DeAnno config initialized");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(price: u64, percent: u64, name: &str, symbol: &str, uri: &str) -> Vec<u8> {
        let mut data = Vec::new();
        data.extend_from_slice(&price.to_le_bytes());
        data.extend_from_slice(&percent.to_le_bytes());
        for s in [name, symbol, uri] {
            data.extend_from_slice(&(s.len() as u32).to_le_bytes());
            data.extend_from_slice(s.as_bytes());
        }
        data
    }

    #[test]
    fn test_parse_initialize_data() {
        let data = encode(1, 50, "DeAnno", "DAN", "https://example.com/dan.json");
        let args = InitializeData::try_from_slice(&data).unwrap();
        assert_eq!(args.token_price, 1);
        assert_eq!(args.withdraw_percent, 50);
        assert_eq!(args.metadata.name, "DeAnno");
        assert_eq!(args.metadata.symbol, "DAN");
        assert_eq!(args.metadata.uri, "https://example.com/dan.json");
    }

    #[test]
    fn test_parse_initialize_data_truncated() {
        let data = encode(1, 50, "DeAnno", "DAN", "uri");
        assert!(InitializeData::try_from_slice(&data[..data.len() - 1]).is_err());
        assert!(InitializeData::try_from_slice(&data[..12]).is_err());
    }
}
