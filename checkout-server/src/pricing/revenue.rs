//! Revenue Splitter
//!
//! Splits one priced sub-order between merchant, platform and rider:
//!
//! ```text
//! merchant = subtotal
//! combined = delivery_fee + multi_merchant_fee
//! app      = round2(combined × pct / 100) + markup
//! rider    = convenience_fee + (combined - round2(combined × pct / 100))
//! ```
//!
//! The delivery fee and the multi-merchant fee are combined *before* the
//! percentage applies. The rider receives the remainder of the combined fees,
//! so `merchant + app + rider == total` holds exactly.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::error::AppResult;

use super::money::{checked_sum, clamp_percent, percent_of};

/// Fee components of one sub-order
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FeeBreakdown {
    pub subtotal: Decimal,
    pub markup: Decimal,
    pub delivery_fee: Decimal,
    pub multi_merchant_fee: Decimal,
    pub convenience_fee: Decimal,
}

impl FeeBreakdown {
    /// Delivery fee + multi-merchant fee
    pub fn combined_fees(&self) -> AppResult<Decimal> {
        checked_sum([self.delivery_fee, self.multi_merchant_fee])
    }

    /// What the customer pays for this sub-order
    pub fn total(&self) -> AppResult<Decimal> {
        checked_sum([
            self.subtotal,
            self.markup,
            self.delivery_fee,
            self.multi_merchant_fee,
            self.convenience_fee,
        ])
    }
}

/// Earnings of each party for one sub-order
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RevenueSplit {
    /// Percentage snapshot the split was computed with (0-100)
    pub app_earnings_percentage_used: Decimal,
    pub merchant_earnings: Decimal,
    pub app_earnings: Decimal,
    pub rider_earnings: Decimal,
}

impl RevenueSplit {
    pub fn sum(&self) -> Decimal {
        self.merchant_earnings + self.app_earnings + self.rider_earnings
    }

    /// Shares add up to the order total
    pub fn is_conserved(&self, total: Decimal) -> bool {
        self.sum() == total
    }
}

/// Split a sub-order's fees using the given app-earnings percentage
///
/// The percentage is the snapshot captured when the order was priced, never
/// the live setting. Values outside 0-100 are clamped. Fails with
/// `InvalidAmount` when an amount leaves the `Decimal` range.
pub fn split_revenue(
    fees: &FeeBreakdown,
    app_earnings_percentage: Decimal,
) -> AppResult<RevenueSplit> {
    let pct = clamp_percent(app_earnings_percentage);
    let combined = fees.combined_fees()?;
    let app_fee_share = percent_of(combined, pct)?;
    // 0 ≤ app_fee_share ≤ combined
    let rider_fee_share = combined - app_fee_share;

    Ok(RevenueSplit {
        app_earnings_percentage_used: pct,
        merchant_earnings: fees.subtotal,
        app_earnings: checked_sum([app_fee_share, fees.markup])?,
        rider_earnings: checked_sum([fees.convenience_fee, rider_fee_share])?,
    })
}
