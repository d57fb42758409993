//! Priced Order Model
//!
//! A [`PricedOrder`] is persisted once per merchant sub-order at checkout.
//! Monetary fields are frozen at creation; only `status` and `updated_at`
//! change afterwards.

use super::cart::SelectedOption;
use super::geo::GeoPoint;
use super::payment::PaymentMethod;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Fulfillment status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    Accepted,
    Preparing,
    Ready,
    PickedUp,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }

    /// Forward-only lifecycle; cancellation allowed until the food is ready
    pub fn can_transition_to(&self, next: OrderStatus) -> bool {
        use OrderStatus::*;
        matches!(
            (self, next),
            (Pending, Accepted)
                | (Accepted, Preparing)
                | (Preparing, Ready)
                | (Ready, PickedUp)
                | (PickedUp, Delivered)
                | (Pending | Accepted | Preparing, Cancelled)
        )
    }
}

/// Delivery destination and contact
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct DeliveryInfo {
    #[validate(length(max = 500, message = "address is too long"))]
    pub address: String,
    #[serde(default)]
    pub location: Option<GeoPoint>,
    #[validate(length(max = 100, message = "contact name is too long"))]
    pub contact_name: String,
    #[validate(length(max = 20, message = "contact phone is too long"))]
    pub contact_phone: String,
    #[serde(default)]
    #[validate(length(max = 500, message = "notes are too long"))]
    pub notes: Option<String>,
}

/// Persisted order line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    pub menu_item_id: String,
    pub name: String,
    pub unit_base_price: Decimal,
    pub quantity: u32,
    pub selected_options: Vec<SelectedOption>,
    /// (unit_base_price + sum(option prices)) × quantity
    pub line_total: Decimal,
}

/// Persisted, priced merchant sub-order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricedOrder {
    pub id: i64,
    /// Shared by all sub-orders of one multi-merchant checkout
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_group_id: Option<String>,
    pub restaurant_id: String,
    pub restaurant_name: String,
    pub items: Vec<OrderLine>,

    // === Pricing (frozen) ===
    pub subtotal: Decimal,
    pub markup_percent: Decimal,
    pub markup: Decimal,
    /// Customer-to-merchant distance of this sub-order, 0 when coordinates were missing
    pub distance_km: f64,
    pub delivery_fee: Decimal,
    pub multi_merchant_fee: Decimal,
    pub convenience_fee: Decimal,
    pub total: Decimal,

    // === Revenue split (frozen) ===
    pub app_earnings_percentage_used: Decimal,
    pub app_earnings_amount: Decimal,
    pub rider_earnings_amount: Decimal,
    pub merchant_earnings_amount: Decimal,

    pub delivery: DeliveryInfo,
    pub payment_method: PaymentMethod,
    pub status: OrderStatus,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Status update payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderStatusUpdate {
    pub status: OrderStatus,
}
