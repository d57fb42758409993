//! Cart models
//!
//! A customer's cart is a flat list of [`CartLineItem`]s, each tagged with the
//! restaurant it came from. At checkout the lines are grouped into one
//! [`MerchantCart`] per restaurant.

use super::geo::GeoPoint;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Selected option (size, add-on, ...) with its additive price delta
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectedOption {
    pub name: String,
    #[serde(default)]
    pub price: Decimal,
}

/// Restaurant identity and pricing attributes carried by every cart line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MerchantInfo {
    pub restaurant_id: String,
    pub restaurant_name: String,
    /// Merchant-specific markup percentage (15 = 15%)
    #[serde(default)]
    pub markup_percent: Decimal,
    #[serde(default)]
    pub location: Option<GeoPoint>,
}

/// One item inside a merchant cart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub menu_item_id: String,
    pub name: String,
    pub unit_base_price: Decimal,
    pub quantity: u32,
    #[serde(default)]
    pub selected_options: Vec<SelectedOption>,
}

impl CartItem {
    /// Same menu item with the same option set
    pub fn is_same_line(&self, other: &CartItem) -> bool {
        self.menu_item_id == other.menu_item_id && self.selected_options == other.selected_options
    }
}

/// Flat cart line tagged with its originating restaurant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLineItem {
    pub merchant: MerchantInfo,
    #[serde(flatten)]
    pub item: CartItem,
}

/// All items of one restaurant in a checkout
///
/// Invariant: every item belongs to `restaurant_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MerchantCart {
    pub restaurant_id: String,
    pub restaurant_name: String,
    #[serde(default)]
    pub markup_percent: Decimal,
    #[serde(default)]
    pub location: Option<GeoPoint>,
    pub items: Vec<CartItem>,
}

impl MerchantCart {
    /// Empty cart for the given merchant
    pub fn for_merchant(merchant: &MerchantInfo) -> Self {
        Self {
            restaurant_id: merchant.restaurant_id.clone(),
            restaurant_name: merchant.restaurant_name.clone(),
            markup_percent: merchant.markup_percent,
            location: merchant.location,
            items: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
