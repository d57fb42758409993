//! Money limits shared by request validation and settings validation

use rust_decimal::Decimal;

/// Fraction digits of every stored amount
pub const MONEY_SCALE: u32 = 2;

/// Largest accepted single amount (price, option price, settings fee)
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(1_000_000_000, 0, 0, false, 0);

/// Largest accepted quantity of one cart line
pub const MAX_QUANTITY: u32 = 10_000;

/// No more than 2 fraction digits (`10.50`, `10.500` ok; `10.005` not)
pub fn has_money_scale(value: Decimal) -> bool {
    value.round_dp(MONEY_SCALE) == value
}

/// Non-negative, at most [`MAX_AMOUNT`], at most 2 fraction digits
pub fn is_valid_amount(value: Decimal) -> bool {
    value >= Decimal::ZERO && value <= MAX_AMOUNT && has_money_scale(value)
}
