//! Earnings Report Model
//!
//! Aggregates read the split amounts persisted on each order. Nothing here
//! looks at live rate settings.

use super::order::PricedOrder;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Report filter (GET /api/reports/earnings query)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EarningsQuery {
    /// Inclusive lower bound on `created_at` (Unix millis)
    pub from: Option<i64>,
    /// Exclusive upper bound on `created_at` (Unix millis)
    pub to: Option<i64>,
    pub restaurant_id: Option<String>,
}

/// Summed monetary fields over a set of orders
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EarningsTotals {
    pub order_count: u64,
    pub subtotal: Decimal,
    pub markup: Decimal,
    pub delivery_fee: Decimal,
    pub multi_merchant_fee: Decimal,
    pub convenience_fee: Decimal,
    pub total: Decimal,
    pub merchant_earnings: Decimal,
    pub app_earnings: Decimal,
    pub rider_earnings: Decimal,
}

impl EarningsTotals {
    pub fn add(&mut self, order: &PricedOrder) {
        self.order_count += 1;
        self.subtotal += order.subtotal;
        self.markup += order.markup;
        self.delivery_fee += order.delivery_fee;
        self.multi_merchant_fee += order.multi_merchant_fee;
        self.convenience_fee += order.convenience_fee;
        self.total += order.total;
        self.merchant_earnings += order.merchant_earnings_amount;
        self.app_earnings += order.app_earnings_amount;
        self.rider_earnings += order.rider_earnings_amount;
    }
}

/// Per-restaurant breakdown row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestaurantEarnings {
    pub restaurant_id: String,
    pub restaurant_name: String,
    pub totals: EarningsTotals,
}

/// Earnings report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EarningsReport {
    pub from: Option<i64>,
    pub to: Option<i64>,
    pub totals: EarningsTotals,
    pub by_restaurant: Vec<RestaurantEarnings>,
}
