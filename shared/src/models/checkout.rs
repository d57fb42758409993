//! Checkout request / response payloads

use super::cart::MerchantCart;
use super::order::DeliveryInfo;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// POST /api/checkout body
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CheckoutRequest {
    /// One cart per restaurant, in the order the customer added them
    pub carts: Vec<MerchantCart>,
    #[validate(nested)]
    pub delivery: DeliveryInfo,
    /// `cash`, `gcash`, `maya` / `paymaya`, `card`, `wallet`
    pub payment_method: String,
}

/// Created sub-order summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckoutOrderSummary {
    pub order_id: i64,
    pub restaurant_id: String,
    pub total: Decimal,
}

/// POST /api/checkout response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckoutResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_group_id: Option<String>,
    pub orders: Vec<CheckoutOrderSummary>,
    /// Sum of all sub-order totals (what the customer pays)
    pub customer_total: Decimal,
}
