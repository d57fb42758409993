//! Money calculation utilities using rust_decimal for precision
//!
//! Amounts are `Decimal` end to end. Anything derived from a percentage is
//! rounded to 2 decimal places (half away from zero) before it is stored or
//! added to other amounts, so sums of stored values are exact.

use rust_decimal::prelude::*;
use shared::error::{AppError, AppResult, ErrorCode};

/// Rounding strategy for monetary values (2 decimal places, half-up)
pub const DECIMAL_PLACES: u32 = 2;

/// Round a monetary value to 2 decimal places
#[inline]
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// `amount × percent / 100`, rounded to 2 decimal places
///
/// `percent` uses the 0-100 interface convention (15 = 15%).
pub fn percent_of(amount: Decimal, percent: Decimal) -> AppResult<Decimal> {
    amount
        .checked_mul(percent)
        .and_then(|v| v.checked_div(Decimal::ONE_HUNDRED))
        .map(round_money)
        .ok_or_else(|| amount_overflow(format!("{} × {}%", amount, percent)))
}

/// Sum amounts, failing instead of overflowing
pub fn checked_sum<I>(values: I) -> AppResult<Decimal>
where
    I: IntoIterator<Item = Decimal>,
{
    values.into_iter().try_fold(Decimal::ZERO, |acc, v| {
        acc.checked_add(v)
            .ok_or_else(|| amount_overflow(format!("{} + {}", acc, v)))
    })
}

/// Error for an amount that does not fit in a `Decimal`
pub fn amount_overflow(context: impl std::fmt::Display) -> AppError {
    AppError::with_message(
        ErrorCode::InvalidAmount,
        format!("Amount out of range: {}", context),
    )
}

/// Clamp a percentage into [0, 100]
#[inline]
pub fn clamp_percent(percent: Decimal) -> Decimal {
    percent.max(Decimal::ZERO).min(Decimal::ONE_HUNDRED)
}

/// Round a distance for reporting, 2 decimal places
///
/// Non-finite input becomes 0.
#[inline]
pub fn round_km(km: f64) -> f64 {
    Decimal::from_f64(km)
        .map(|d| d.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|d| d.to_f64())
        .unwrap_or_else(|| {
            tracing::error!(value = ?km, "Non-finite distance, defaulting to zero");
            0.0
        })
}
