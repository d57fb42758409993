//! Rate Settings Model
//!
//! Admin-editable, process-wide pricing configuration. A checkout reads one
//! snapshot of these settings and every figure it produces is frozen onto the
//! created orders.

use super::money::{MAX_AMOUNT, has_money_scale};
use super::payment::PaymentMethod;
use crate::error::{AppError, AppResult};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// What to do when the delivery address has no coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoordinatePolicy {
    /// Charge `base_delivery_fee` and report distance 0
    #[default]
    FallbackToBaseRate,
    /// Reject the checkout
    Required,
}

/// Pricing configuration (配送费、加价、平台抽成)
///
/// Every field has a default so a partially configured deployment still
/// prices orders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RateSettings {
    /// Delivery fee for distances up to and including 1 km
    pub base_delivery_fee: Decimal,
    /// Fee per whole kilometer beyond the first
    pub per_km_rate: Decimal,
    /// Fixed fee per merchant sub-order, paid to the rider
    pub convenience_fee: Decimal,
    pub show_convenience_fee: bool,
    /// Fee per additional merchant beyond the first
    pub multi_merchant_fee: Decimal,
    /// Platform share of (delivery fee + multi-merchant fee), 0-100
    pub app_earnings_percentage: Decimal,
    pub max_merchants_per_order: u32,
    pub coordinate_policy: CoordinatePolicy,
    pub enabled_payment_methods: Vec<PaymentMethod>,
}

impl Default for RateSettings {
    fn default() -> Self {
        Self {
            base_delivery_fee: Decimal::new(25, 0),
            per_km_rate: Decimal::new(15, 0),
            convenience_fee: Decimal::new(15, 0),
            show_convenience_fee: true,
            multi_merchant_fee: Decimal::new(20, 0),
            app_earnings_percentage: Decimal::new(50, 0),
            max_merchants_per_order: 2,
            coordinate_policy: CoordinatePolicy::FallbackToBaseRate,
            enabled_payment_methods: PaymentMethod::ALL.to_vec(),
        }
    }
}

impl RateSettings {
    pub fn is_payment_method_enabled(&self, method: PaymentMethod) -> bool {
        self.enabled_payment_methods.contains(&method)
    }

    /// Check value ranges; returns the first violation found
    pub fn validate(&self) -> AppResult<()> {
        let amounts = [
            ("base_delivery_fee", self.base_delivery_fee),
            ("per_km_rate", self.per_km_rate),
            ("convenience_fee", self.convenience_fee),
            ("multi_merchant_fee", self.multi_merchant_fee),
        ];
        for (field, value) in amounts {
            if value < Decimal::ZERO || value > MAX_AMOUNT {
                return Err(AppError::settings_invalid(format!(
                    "{} must be between 0 and {}, got {}",
                    field, MAX_AMOUNT, value
                ))
                .with_detail("field", field));
            }
            if !has_money_scale(value) {
                return Err(AppError::settings_invalid(format!(
                    "{} must have at most 2 decimal places, got {}",
                    field, value
                ))
                .with_detail("field", field));
            }
        }

        if self.app_earnings_percentage < Decimal::ZERO
            || self.app_earnings_percentage > Decimal::ONE_HUNDRED
        {
            return Err(AppError::settings_invalid(format!(
                "app_earnings_percentage must be between 0 and 100, got {}",
                self.app_earnings_percentage
            ))
            .with_detail("field", "app_earnings_percentage"));
        }

        if self.max_merchants_per_order == 0 {
            return Err(
                AppError::settings_invalid("max_merchants_per_order must be at least 1")
                    .with_detail("field", "max_merchants_per_order"),
            );
        }

        if self.enabled_payment_methods.is_empty() {
            return Err(
                AppError::settings_invalid("at least one payment method must be enabled")
                    .with_detail("field", "enabled_payment_methods"),
            );
        }

        Ok(())
    }

    /// Apply a partial update, returning the merged settings (not yet validated)
    pub fn merged(&self, update: RateSettingsUpdate) -> Self {
        let mut next = self.clone();
        if let Some(v) = update.base_delivery_fee {
            next.base_delivery_fee = v;
        }
        if let Some(v) = update.per_km_rate {
            next.per_km_rate = v;
        }
        if let Some(v) = update.convenience_fee {
            next.convenience_fee = v;
        }
        if let Some(v) = update.show_convenience_fee {
            next.show_convenience_fee = v;
        }
        if let Some(v) = update.multi_merchant_fee {
            next.multi_merchant_fee = v;
        }
        if let Some(v) = update.app_earnings_percentage {
            next.app_earnings_percentage = v;
        }
        if let Some(v) = update.max_merchants_per_order {
            next.max_merchants_per_order = v;
        }
        if let Some(v) = update.coordinate_policy {
            next.coordinate_policy = v;
        }
        if let Some(methods) = update.enabled_payment_methods {
            next.enabled_payment_methods.clear();
            for method in methods {
                if !next.enabled_payment_methods.contains(&method) {
                    next.enabled_payment_methods.push(method);
                }
            }
        }
        next
    }
}

/// Partial update payload for [`RateSettings`]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RateSettingsUpdate {
    pub base_delivery_fee: Option<Decimal>,
    pub per_km_rate: Option<Decimal>,
    pub convenience_fee: Option<Decimal>,
    pub show_convenience_fee: Option<bool>,
    pub multi_merchant_fee: Option<Decimal>,
    pub app_earnings_percentage: Option<Decimal>,
    pub max_merchants_per_order: Option<u32>,
    pub coordinate_policy: Option<CoordinatePolicy>,
    pub enabled_payment_methods: Option<Vec<PaymentMethod>>,
}
