//! Checkout Service - order creation
//!
//! # Flow
//!
//! ```text
//! CheckoutRequest
//!   → settings snapshot (read once)
//!   → validate
//!   → price_checkout (group fees, per-order totals)
//!   → split_revenue per sub-order (percentage frozen on the order)
//!   → ids, group id, status = pending
//!   → OrderStorage::store_group (one transaction)
//!   → CheckoutResponse
//! ```

use serde::Serialize;
use shared::error::{AppError, AppResult};
use shared::models::{
    CheckoutOrderSummary, CheckoutRequest, CheckoutResponse, DeliveryInfo, OrderStatus,
    PaymentMethod, PricedOrder, RateSettings,
};
use shared::util::{now_millis, snowflake_id};
use std::collections::HashSet;
use uuid::Uuid;

use super::validation::validate_checkout;
use crate::orders::OrderStorage;
use crate::pricing::{CheckoutPricing, RevenueSplit, SubOrderPricing, price_checkout, split_revenue};
use crate::settings::SettingsStore;

/// Priced sub-order with its revenue split (quote only, not persisted)
#[derive(Debug, Clone, Serialize)]
pub struct QuotedOrder {
    #[serde(flatten)]
    pub pricing: SubOrderPricing,
    pub split: RevenueSplit,
}

/// POST /api/checkout/quote response
#[derive(Debug, Clone, Serialize)]
pub struct CheckoutQuote {
    pub merchant_count: usize,
    pub group_delivery_fee: rust_decimal::Decimal,
    pub group_distance_km: f64,
    pub multi_merchant_fee_total: rust_decimal::Decimal,
    pub customer_total: rust_decimal::Decimal,
    pub orders: Vec<QuotedOrder>,
}

#[derive(Clone, Debug)]
pub struct CheckoutService {
    storage: OrderStorage,
    settings: SettingsStore,
}

impl CheckoutService {
    pub fn new(storage: OrderStorage, settings: SettingsStore) -> Self {
        Self { storage, settings }
    }

    /// Price a request without persisting anything
    pub fn quote(&self, request: &CheckoutRequest) -> AppResult<CheckoutQuote> {
        let settings = self.settings.snapshot();
        let (_, pricing) = self.validate_and_price(request, &settings)?;

        let split_pct = settings.app_earnings_percentage;
        let orders = pricing
            .orders
            .iter()
            .map(|o| -> AppResult<QuotedOrder> {
                Ok(QuotedOrder {
                    split: split_revenue(&o.fees(), split_pct)?,
                    pricing: o.clone(),
                })
            })
            .collect::<AppResult<Vec<QuotedOrder>>>()?;

        Ok(CheckoutQuote {
            merchant_count: pricing.merchant_count,
            group_delivery_fee: pricing.group_delivery_fee,
            group_distance_km: pricing.group_distance_km,
            multi_merchant_fee_total: pricing.multi_merchant_fee_total,
            customer_total: pricing.customer_total,
            orders,
        })
    }

    /// Price and persist a checkout group
    pub fn checkout(&self, request: &CheckoutRequest) -> AppResult<CheckoutResponse> {
        // Read once; concurrent admin edits do not affect this checkout
        let settings = self.settings.snapshot();
        let (payment_method, pricing) = self.validate_and_price(request, &settings)?;

        let order_group_id = pricing
            .is_multi_merchant()
            .then(|| Uuid::new_v4().to_string());
        let ids = unique_order_ids(pricing.orders.len());
        let orders = assemble_orders(
            &pricing,
            &settings,
            &request.delivery,
            payment_method,
            order_group_id.clone(),
            &ids,
            now_millis(),
        )?;

        self.storage.store_group(&orders).inspect_err(|e| {
            tracing::error!(
                error = %e,
                order_group_id = ?order_group_id,
                "Failed to persist checkout group, nothing committed"
            );
        })?;

        tracing::info!(
            order_group_id = ?order_group_id,
            order_ids = ?ids,
            merchant_count = pricing.merchant_count,
            customer_total = %pricing.customer_total,
            payment_method = %payment_method,
            "Checkout completed"
        );

        Ok(CheckoutResponse {
            order_group_id,
            orders: orders
                .iter()
                .map(|o| CheckoutOrderSummary {
                    order_id: o.id,
                    restaurant_id: o.restaurant_id.clone(),
                    total: o.total,
                })
                .collect(),
            customer_total: pricing.customer_total,
        })
    }

    fn validate_and_price(
        &self,
        request: &CheckoutRequest,
        settings: &RateSettings,
    ) -> AppResult<(PaymentMethod, CheckoutPricing)> {
        let payment_method = validate_checkout(request, settings).inspect_err(|e| {
            tracing::warn!(code = %e.code, message = %e.message, "Checkout rejected");
        })?;
        let pricing = price_checkout(&request.carts, request.delivery.location, settings)?;
        Ok((payment_method, pricing))
    }
}

/// Build the persisted orders for a priced checkout
///
/// `ids` must hold one id per sub-order. The revenue split uses the
/// percentage from `settings` and stores it on every order.
pub fn assemble_orders(
    pricing: &CheckoutPricing,
    settings: &RateSettings,
    delivery: &DeliveryInfo,
    payment_method: PaymentMethod,
    order_group_id: Option<String>,
    ids: &[i64],
    now: i64,
) -> AppResult<Vec<PricedOrder>> {
    if ids.len() != pricing.orders.len() {
        return Err(AppError::internal(format!(
            "Expected {} order ids, got {}",
            pricing.orders.len(),
            ids.len()
        )));
    }

    pricing
        .orders
        .iter()
        .zip(ids)
        .map(|(sub, &id)| {
            let fees = sub.fees();
            let split = split_revenue(&fees, settings.app_earnings_percentage)?;
            if !split.is_conserved(sub.total) {
                return Err(AppError::internal(format!(
                    "Revenue split for restaurant {} does not add up to {}",
                    sub.restaurant_id, sub.total
                )));
            }

            Ok(PricedOrder {
                id,
                order_group_id: order_group_id.clone(),
                restaurant_id: sub.restaurant_id.clone(),
                restaurant_name: sub.restaurant_name.clone(),
                items: sub.lines.clone(),
                subtotal: sub.subtotal,
                markup_percent: sub.markup_percent,
                markup: sub.markup,
                distance_km: sub.distance_km,
                delivery_fee: sub.delivery_fee,
                multi_merchant_fee: sub.multi_merchant_fee,
                convenience_fee: sub.convenience_fee,
                total: sub.total,
                app_earnings_percentage_used: split.app_earnings_percentage_used,
                app_earnings_amount: split.app_earnings,
                rider_earnings_amount: split.rider_earnings,
                merchant_earnings_amount: split.merchant_earnings,
                delivery: delivery.clone(),
                payment_method,
                status: OrderStatus::Pending,
                created_at: now,
                updated_at: now,
            })
        })
        .collect()
}

/// Snowflake ids, distinct within one checkout
fn unique_order_ids(count: usize) -> Vec<i64> {
    let mut seen = HashSet::with_capacity(count);
    let mut ids = Vec::with_capacity(count);
    while ids.len() < count {
        let id = snowflake_id();
        if seen.insert(id) {
            ids.push(id);
        }
    }
    ids
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use shared::error::ErrorCode;
    use shared::models::{CartItem, GeoPoint, MerchantCart, RateSettingsUpdate};

    fn service() -> (CheckoutService, OrderStorage, SettingsStore) {
        let storage = OrderStorage::open_in_memory().unwrap();
        let settings = SettingsStore::load(storage.clone()).unwrap();
        (
            CheckoutService::new(storage.clone(), settings.clone()),
            storage,
            settings,
        )
    }

    fn cart(id: &str, price: rust_decimal::Decimal, lon: f64) -> MerchantCart {
        MerchantCart {
            restaurant_id: id.into(),
            restaurant_name: format!("Restaurant {}", id),
            markup_percent: dec!(15),
            location: Some(GeoPoint::new(0.0, lon)),
            items: vec![CartItem {
                menu_item_id: format!("{}-meal", id),
                name: "Meal".into(),
                unit_base_price: price,
                quantity: 1,
                selected_options: vec![],
            }],
        }
    }

    fn request(carts: Vec<MerchantCart>) -> CheckoutRequest {
        CheckoutRequest {
            carts,
            delivery: DeliveryInfo {
                address: "Equator Rd".into(),
                location: Some(GeoPoint::new(0.0, 0.0)),
                contact_name: "Ana".into(),
                contact_phone: "09170000001".into(),
                notes: Some("Gate 2".into()),
            },
            payment_method: "cash".into(),
        }
    }

    #[test]
    fn test_single_merchant_checkout_persists_split() {
        let (service, storage, _) = service();
        let response = service
            .checkout(&request(vec![cart("a", dec!(500), 0.0225)]))
            .unwrap();

        assert!(response.order_group_id.is_none());
        assert_eq!(response.orders.len(), 1);
        assert_eq!(response.customer_total, dec!(645));

        let order = storage.get_order(response.orders[0].order_id).unwrap().unwrap();
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.app_earnings_amount, dec!(102.50));
        assert_eq!(order.rider_earnings_amount, dec!(42.50));
        assert_eq!(order.merchant_earnings_amount, dec!(500));
        assert_eq!(order.app_earnings_percentage_used, dec!(50));
        assert_eq!(order.delivery.notes.as_deref(), Some("Gate 2"));
    }

    #[test]
    fn test_multi_merchant_checkout_creates_group() {
        let (service, storage, _) = service();
        let response = service
            .checkout(&request(vec![
                cart("a", dec!(300), 0.0225),
                cart("b", dec!(200), 0.005),
            ]))
            .unwrap();

        let group_id = response.order_group_id.clone().unwrap();
        assert_eq!(response.customer_total, dec!(680));

        let group = storage.get_group(&group_id).unwrap().unwrap();
        assert_eq!(group.len(), 2);
        assert_eq!(group[0].total, dec!(435));
        assert_eq!(group[1].total, dec!(245));
        assert!(group.iter().all(|o| o.order_group_id.as_deref() == Some(group_id.as_str())));
        assert_ne!(group[0].id, group[1].id);
    }

    #[test]
    fn test_quote_does_not_persist() {
        let (service, storage, _) = service();
        let quote = service
            .quote(&request(vec![cart("a", dec!(500), 0.0225)]))
            .unwrap();
        assert_eq!(quote.customer_total, dec!(645));
        assert_eq!(quote.orders[0].split.app_earnings, dec!(102.50));
        assert!(storage.list_orders().unwrap().is_empty());
    }

    #[test]
    fn test_rejected_checkout_persists_nothing() {
        let (service, storage, _) = service();
        let mut req = request(vec![cart("a", dec!(100), 0.01)]);
        req.payment_method = "bitcoin".into();
        let err = service.checkout(&req).unwrap_err();
        assert_eq!(err.code, ErrorCode::PaymentInvalidMethod);
        assert!(storage.list_orders().unwrap().is_empty());
    }

    #[test]
    fn test_huge_price_rejected_without_panic() {
        let (service, storage, _) = service();
        let mut c = cart("a", dec!(30000000000000000000000000000), 0.01);
        c.items[0].quantity = 3;

        let err = service.checkout(&request(vec![c])).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidAmount);
        assert!(storage.list_orders().unwrap().is_empty());
    }

    #[test]
    fn test_sub_cent_price_rejected() {
        let (service, storage, _) = service();
        let err = service
            .checkout(&request(vec![cart("a", dec!(10.005), 0.01)]))
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidAmount);
        assert!(storage.list_orders().unwrap().is_empty());
    }

    #[test]
    fn test_settings_change_does_not_touch_existing_orders() {
        let (service, storage, settings) = service();
        let response = service
            .checkout(&request(vec![cart("a", dec!(500), 0.0225)]))
            .unwrap();
        let order_id = response.orders[0].order_id;

        settings
            .update(RateSettingsUpdate {
                app_earnings_percentage: Some(dec!(80)),
                ..Default::default()
            })
            .unwrap();

        let order = storage.get_order(order_id).unwrap().unwrap();
        assert_eq!(order.app_earnings_percentage_used, dec!(50));
        assert_eq!(order.app_earnings_amount, dec!(102.50));

        // New checkouts use the new percentage
        let next = service
            .checkout(&request(vec![cart("a", dec!(500), 0.0225)]))
            .unwrap();
        let next = storage.get_order(next.orders[0].order_id).unwrap().unwrap();
        assert_eq!(next.app_earnings_percentage_used, dec!(80));
        // 55 × 0.8 + 75
        assert_eq!(next.app_earnings_amount, dec!(119));
    }

    #[test]
    fn test_assemble_orders_requires_one_id_per_order() {
        let settings = RateSettings::default();
        let pricing = price_checkout(&[cart("a", dec!(100), 0.0)], None, &settings).unwrap();
        let delivery = request(vec![]).delivery;
        let err = assemble_orders(&pricing, &settings, &delivery, PaymentMethod::Cash, None, &[], 0)
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InternalError);
    }

    #[test]
    fn test_unique_order_ids() {
        let ids = unique_order_ids(50);
        let set: HashSet<i64> = ids.iter().copied().collect();
        assert_eq!(set.len(), 50);
    }
}
