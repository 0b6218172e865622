//! Accounting engine
//!
//! Pure transition functions behind the instructions. Each takes the current
//! values read from the accounts plus the instruction input and returns the
//! values to write back, or the error that aborts the instruction. Nothing
//! here touches an account, so every check completes before any write.

use crate::constants::MAX_WITHDRAW_PERCENT;
use crate::errors::DeAnnoError;

/// Exchange terms read from the config and the two mints
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExchangeTerms {
    /// Stable-asset whole units per credit whole unit
    pub token_price: u64,
    /// Percent of the redeemed value paid out
    pub withdraw_percent: u64,
    pub credit_decimals: u8,
    pub stable_decimals: u8,
}

/// Values to write back after a distribution
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DistributionPlan {
    pub demander_balance: u64,
    pub demander_total_spent: u64,
    pub worker_withdraw_limit: u64,
    pub worker_total_earned: u64,
    /// Credit base units to mint into the worker's holding
    pub mint_amount: u64,
}

/// Values to write back after a withdrawal
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WithdrawalPlan {
    pub worker_withdraw_limit: u64,
    pub worker_total_redeemed: u64,
    /// Credit base units to burn from the worker's holding
    pub burn_amount: u64,
    /// Stable base units to move from the reserve to the worker
    pub payout: u64,
}

/// Validate initial config parameters
pub fn validate_terms(token_price: u64, withdraw_percent: u64) -> Result<(), DeAnnoError> {
    if token_price == 0 || withdraw_percent > MAX_WITHDRAW_PERCENT {
        return Err(DeAnnoError::InvalidParameter);
    }
    Ok(())
}

/// Scale whole units to base units of a mint with `decimals`
pub fn to_base_units(amount: u64, decimals: u8) -> Result<u64, DeAnnoError> {
    let scale = 10u64
        .checked_pow(decimals as u32)
        .ok_or(DeAnnoError::ArithmeticOverflow)?;
    amount.checked_mul(scale).ok_or(DeAnnoError::ArithmeticOverflow)
}

/// Stable base units paid for redeeming `amount` credit whole units
///
/// `amount * token_price * 10^stable_decimals * withdraw_percent / 100`,
/// widened to u128 and truncated toward zero.
pub fn redemption_payout(amount: u64, terms: &ExchangeTerms) -> Result<u64, DeAnnoError> {
    let scale = 10u128
        .checked_pow(terms.stable_decimals as u32)
        .ok_or(DeAnnoError::ArithmeticOverflow)?;
    let gross = (amount as u128)
        .checked_mul(terms.token_price as u128)
        .and_then(|v| v.checked_mul(scale))
        .and_then(|v| v.checked_mul(terms.withdraw_percent as u128))
        .ok_or(DeAnnoError::ArithmeticOverflow)?;
    let payout = gross / MAX_WITHDRAW_PERCENT as u128;
    u64::try_from(payout).map_err(|_| DeAnnoError::ArithmeticOverflow)
}

/// Settle `amount` credit units of work from a demander to a worker
pub fn plan_distribution(
    demander_balance: u64,
    demander_total_spent: u64,
    worker_withdraw_limit: u64,
    worker_total_earned: u64,
    amount: u64,
    credit_decimals: u8,
) -> Result<DistributionPlan, DeAnnoError> {
    if amount == 0 {
        return Err(DeAnnoError::InvalidParameter);
    }
    let demander_balance = demander_balance
        .checked_sub(amount)
        .ok_or(DeAnnoError::InsufficientFunds)?;
    let mint_amount = to_base_units(amount, credit_decimals)?;
    let worker_withdraw_limit = worker_withdraw_limit
        .checked_add(amount)
        .ok_or(DeAnnoError::ArithmeticOverflow)?;

    Ok(DistributionPlan {
        demander_balance,
        demander_total_spent: demander_total_spent.saturating_add(amount),
        worker_withdraw_limit,
        worker_total_earned: worker_total_earned.saturating_add(amount),
        mint_amount,
    })
}

/// Redeem `amount` credit whole units for the stable asset
///
/// `credit_holding` and `reserve_holding` are the current base-unit balances
/// of the worker's credit account and the program's stable reserve.
pub fn plan_withdrawal(
    worker_withdraw_limit: u64,
    worker_total_redeemed: u64,
    credit_holding: u64,
    reserve_holding: u64,
    amount: u64,
    terms: &ExchangeTerms,
) -> Result<WithdrawalPlan, DeAnnoError> {
    if amount == 0 {
        return Err(DeAnnoError::InvalidParameter);
    }
    let burn_amount = to_base_units(amount, terms.credit_decimals)?;
    if credit_holding < burn_amount {
        return Err(DeAnnoError::InsufficientFunds);
    }
    let worker_withdraw_limit = worker_withdraw_limit
        .checked_sub(amount)
        .ok_or(DeAnnoError::WithdrawLimitExceeded)?;
    let payout = redemption_payout(amount, terms)?;
    if reserve_holding < payout {
        return Err(DeAnnoError::InsufficientReserve);
    }

    Ok(WithdrawalPlan {
        worker_withdraw_limit,
        worker_total_redeemed: worker_total_redeemed.saturating_add(amount),
        burn_amount,
        payout,
    })
}
