//! SPL Token helpers
//!
//! The credit token ledger lives in the SPL Token program. This module reads
//! holding and mint accounts in place and wraps the mint/burn/transfer CPIs.

use pinocchio::{
    account_info::AccountInfo,
    instruction::{Seed, Signer},
    program_error::ProgramError,
    pubkey::Pubkey,
    ProgramResult,
};
use pinocchio_associated_token_account::instructions::CreateIdempotent;
use pinocchio_token::instructions::{Burn, InitializeMint2, MintTo, Transfer};

use crate::{constants::TOKEN_PROGRAM_ID, errors::DeAnnoError, require};

// Token account layout: [0..32] mint, [32..64] owner, [64..72] amount
const TOKEN_ACCOUNT_MIN_LEN: usize = 72;

// Mint layout: [0..36] mint authority (COption), [36..44] supply, [44] decimals, [45] is_initialized
const MINT_MIN_LEN: usize = 46;

/// Fields of an SPL token account this program needs
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Holding {
    pub mint: Pubkey,
    pub owner: Pubkey,
    pub amount: u64,
}

impl Holding {
    /// Parse raw token account data
    pub fn parse(data: &[u8]) -> Result<Self, ProgramError> {
        if data.len() < TOKEN_ACCOUNT_MIN_LEN {
            return Err(DeAnnoError::InvalidTokenAccount.into());
        }
        let mut mint = [0u8; 32];
        let mut owner = [0u8; 32];
        let mut amount = [0u8; 8];
        mint.copy_from_slice(&data[0..32]);
        owner.copy_from_slice(&data[32..64]);
        amount.copy_from_slice(&data[64..72]);
        Ok(Self { mint, owner, amount: u64::from_le_bytes(amount) })
    }

    /// Parse token account data held by `program_owner` and check its mint and owner
    pub fn check(
        program_owner: &Pubkey,
        data: &[u8],
        expected_mint: &Pubkey,
        expected_owner: &Pubkey,
    ) -> Result<Self, ProgramError> {
        require!(program_owner == &TOKEN_PROGRAM_ID, DeAnnoError::InvalidTokenAccount);
        let holding = Self::parse(data)?;
        require!(&holding.mint == expected_mint, DeAnnoError::InvalidTokenAccount);
        require!(&holding.owner == expected_owner, DeAnnoError::InvalidTokenAccount);
        Ok(holding)
    }

    /// Amount in a holding that may not be created yet (empty data holds nothing)
    pub fn balance_or_zero(
        program_owner: &Pubkey,
        data: &[u8],
        expected_mint: &Pubkey,
        expected_owner: &Pubkey,
    ) -> Result<u64, ProgramError> {
        if data.is_empty() {
            return Ok(0);
        }
        Ok(Self::check(program_owner, data, expected_mint, expected_owner)?.amount)
    }

    /// Balance of an associated token account, 0 when it does not exist yet
    pub fn read_balance(
        account: &AccountInfo,
        expected_mint: &Pubkey,
        expected_owner: &Pubkey,
    ) -> Result<u64, ProgramError> {
        Self::balance_or_zero(
            account.owner(),
            &account.try_borrow_data()?,
            expected_mint,
            expected_owner,
        )
    }
}

/// Decimals of an initialized mint
pub fn parse_mint_decimals(data: &[u8]) -> Result<u8, ProgramError> {
    if data.len() < MINT_MIN_LEN || data[45] == 0 {
        return Err(DeAnnoError::InvalidMint.into());
    }
    Ok(data[44])
}

/// Read decimals from a mint account owned by the SPL Token program
pub fn read_mint_decimals(mint: &AccountInfo) -> Result<u8, ProgramError> {
    require!(mint.owner() == &TOKEN_PROGRAM_ID, DeAnnoError::InvalidMint);
    parse_mint_decimals(&mint.try_borrow_data()?)
}

/// Token program account must be the SPL Token program
#[inline(always)]
pub fn validate_token_program(token_program: &AccountInfo) -> ProgramResult {
    if token_program.key() != &TOKEN_PROGRAM_ID {
        return Err(ProgramError::IncorrectProgramId);
    }
    Ok(())
}

/// Initialize a freshly allocated mint with a PDA as mint authority
pub fn initialize_mint(mint: &AccountInfo, decimals: u8, authority: &Pubkey) -> ProgramResult {
    InitializeMint2 {
        mint,
        decimals,
        mint_authority: authority,
        freeze_authority: None,
    }
    .invoke()
}

/// Mint credit tokens, signed by the PDA mint authority
pub fn mint_credit(
    mint: &AccountInfo,
    destination: &AccountInfo,
    authority: &AccountInfo,
    amount: u64,
    signer_seeds: &[Seed],
) -> ProgramResult {
    MintTo {
        mint,
        account: destination,
        mint_authority: authority,
        amount,
    }
    .invoke_signed(&[Signer::from(signer_seeds)])
}

/// Burn tokens from a holding, signed by its owner in the transaction
pub fn burn_from(
    mint: &AccountInfo,
    source: &AccountInfo,
    owner: &AccountInfo,
    amount: u64,
) -> ProgramResult {
    Burn {
        account: source,
        mint,
        authority: owner,
        amount,
    }
    .invoke()
}

/// Transfer tokens out of a PDA-owned holding
pub fn transfer_signed(
    source: &AccountInfo,
    destination: &AccountInfo,
    authority: &AccountInfo,
    amount: u64,
    signer_seeds: &[Seed],
) -> ProgramResult {
    Transfer {
        from: source,
        to: destination,
        authority,
        amount,
    }
    .invoke_signed(&[Signer::from(signer_seeds)])
}

/// Create the associated token account for (wallet, mint) unless it exists
pub fn create_holding_if_needed(
    payer: &AccountInfo,
    holding: &AccountInfo,
    wallet: &AccountInfo,
    mint: &AccountInfo,
    system_program: &AccountInfo,
    token_program: &AccountInfo,
) -> ProgramResult {
    if holding.data_len() > 0 {
        return Ok(());
    }
    CreateIdempotent {
        funding_account: payer,
        account: holding,
        wallet,
        mint,
        system_program,
        token_program,
    }
    .invoke()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token_account_bytes(mint: Pubkey, owner: Pubkey, amount: u64) -> Vec<u8> {
        let mut data = vec![0u8; 165];
        data[0..32].copy_from_slice(&mint);
        data[32..64].copy_from_slice(&owner);
        data[64..72].copy_from_slice(&amount.to_le_bytes());
        data
    }

    #[test]
    fn test_parse_holding() {
        let data = token_account_bytes([1u8; 32], [2u8; 32], 50_000_000_000);
        let holding = Holding::parse(&data).unwrap();
        assert_eq!(holding.mint, [1u8; 32]);
        assert_eq!(holding.owner, [2u8; 32]);
        assert_eq!(holding.amount, 50_000_000_000);
    }

    #[test]
    fn test_parse_holding_too_short() {
        assert_eq!(
            Holding::parse(&[0u8; 71]).err(),
            Some(DeAnnoError::InvalidTokenAccount.into())
        );
    }

    #[test]
    fn test_check_holding_mint_and_owner() {
        let data = token_account_bytes([1u8; 32], [2u8; 32], 7);
        assert_eq!(Holding::check(&TOKEN_PROGRAM_ID, &data, &[1u8; 32], &[2u8; 32]).unwrap().amount, 7);
        assert_eq!(
            Holding::check(&TOKEN_PROGRAM_ID, &data, &[9u8; 32], &[2u8; 32]).err(),
            Some(DeAnnoError::InvalidTokenAccount.into())
        );
        assert_eq!(
            Holding::check(&[0u8; 32], &data, &[1u8; 32], &[2u8; 32]).err(),
            Some(DeAnnoError::InvalidTokenAccount.into())
        );
    }

    #[test]
    fn test_missing_holding_reads_as_empty() {
        // an uncreated account: no data, owned by the system program
        assert_eq!(Holding::balance_or_zero(&[0u8; 32], &[], &[1u8; 32], &[2u8; 32]), Ok(0));

        let data = token_account_bytes([1u8; 32], [2u8; 32], 50);
        assert_eq!(
            Holding::balance_or_zero(&TOKEN_PROGRAM_ID, &data, &[1u8; 32], &[2u8; 32]),
            Ok(50)
        );
        assert_eq!(
            Holding::balance_or_zero(&TOKEN_PROGRAM_ID, &data, &[1u8; 32], &[3u8; 32]).err(),
            Some(DeAnnoError::InvalidTokenAccount.into())
        );
    }

    #[test]
    fn test_withdraw_without_credit_account_is_insufficient_funds() {
        use crate::engine::{plan_withdrawal, ExchangeTerms};

        let credit = Holding::balance_or_zero(&[0u8; 32], &[], &[1u8; 32], &[2u8; 32]).unwrap();
        let terms = ExchangeTerms {
            token_price: 1,
            withdraw_percent: 50,
            credit_decimals: 9,
            stable_decimals: 6,
        };
        assert_eq!(
            plan_withdrawal(100, 0, credit, 1_000_000_000, 50, &terms),
            Err(DeAnnoError::InsufficientFunds)
        );
    }

    #[test]
    fn test_parse_mint_decimals() {
        let mut data = vec![0u8; 82];
        data[44] = 6;
        data[45] = 1;
        assert_eq!(parse_mint_decimals(&data), Ok(6));
    }

    #[test]
    fn test_parse_uninitialized_mint() {
        let mut data = vec![0u8; 82];
        data[44] = 9;
        assert_eq!(parse_mint_decimals(&data), Err(DeAnnoError::InvalidMint.into()));
    }
}
