//! Checkout Pricing Engine
//!
//! Prices a checkout of one or more [`MerchantCart`]s against a frozen
//! [`RateSettings`] snapshot.
//!
//! # Calculation Steps
//! 1. Per cart: line totals, subtotal, markup
//! 2. Per cart: individual delivery fee / distance against the merchant
//! 3. Group delivery fee = max of the individual fees (farthest merchant)
//! 4. Multi-merchant fee = (merchant_count - 1) × `multi_merchant_fee`
//! 5. Both group fees go to the fee carrier, all other sub-orders get 0
//! 6. Convenience fee on every sub-order when enabled
//! 7. total = subtotal + markup + delivery_fee + multi_merchant_fee + convenience_fee
//!
//! The fee carrier is the cart at index 0 of the input, i.e. the merchant the
//! customer added first. Callers that reorder carts change the carrier.
//!
//! Pure computation: no I/O, no clock, no ids.

use rust_decimal::Decimal;
use serde::Serialize;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{CartItem, CoordinatePolicy, GeoPoint, MerchantCart, OrderLine, RateSettings};
use std::collections::HashSet;

use super::distance::quote_delivery;
use super::money::{amount_overflow, checked_sum, percent_of};
use super::revenue::FeeBreakdown;

/// Index of the sub-order that carries the group delivery and multi-merchant fees
pub const FEE_CARRIER_INDEX: usize = 0;

/// Priced merchant sub-order (not yet split or persisted)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubOrderPricing {
    pub restaurant_id: String,
    pub restaurant_name: String,
    pub lines: Vec<OrderLine>,
    pub subtotal: Decimal,
    pub markup_percent: Decimal,
    pub markup: Decimal,
    /// Customer → this merchant, 0 when coordinates were missing
    pub distance_km: f64,
    /// Fee this merchant would charge on its own
    pub individual_delivery_fee: Decimal,
    /// Charged fee: the group fee on the carrier, 0 elsewhere
    pub delivery_fee: Decimal,
    pub multi_merchant_fee: Decimal,
    pub convenience_fee: Decimal,
    pub total: Decimal,
    pub is_fee_carrier: bool,
}

impl SubOrderPricing {
    pub fn fees(&self) -> FeeBreakdown {
        FeeBreakdown {
            subtotal: self.subtotal,
            markup: self.markup,
            delivery_fee: self.delivery_fee,
            multi_merchant_fee: self.multi_merchant_fee,
            convenience_fee: self.convenience_fee,
        }
    }
}

/// Result of pricing a whole checkout
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckoutPricing {
    pub merchant_count: usize,
    /// Max of the individual delivery fees
    pub group_delivery_fee: Decimal,
    /// Max of the individual distances
    pub group_distance_km: f64,
    pub multi_merchant_fee_total: Decimal,
    /// Same order as the input carts
    pub orders: Vec<SubOrderPricing>,
    /// Sum of all sub-order totals
    pub customer_total: Decimal,
}

impl CheckoutPricing {
    pub fn is_multi_merchant(&self) -> bool {
        self.merchant_count > 1
    }

    pub fn fee_carrier(&self) -> Option<&SubOrderPricing> {
        self.orders.get(FEE_CARRIER_INDEX)
    }
}

/// (unit_base_price + Σ option prices) × quantity
///
/// Fails with `InvalidAmount` instead of overflowing.
pub fn line_total(item: &CartItem) -> AppResult<Decimal> {
    let unit = checked_sum(
        std::iter::once(item.unit_base_price).chain(item.selected_options.iter().map(|o| o.price)),
    )?;
    unit.checked_mul(Decimal::from(item.quantity)).ok_or_else(|| {
        amount_overflow(format!("{} × {}", unit, item.quantity))
            .with_detail("menu_item_id", item.menu_item_id.clone())
    })
}

/// Order lines and subtotal of one cart
pub fn cart_subtotal(cart: &MerchantCart) -> AppResult<(Vec<OrderLine>, Decimal)> {
    let lines = cart
        .items
        .iter()
        .map(|item| -> AppResult<OrderLine> {
            Ok(OrderLine {
                menu_item_id: item.menu_item_id.clone(),
                name: item.name.clone(),
                unit_base_price: item.unit_base_price,
                quantity: item.quantity,
                selected_options: item.selected_options.clone(),
                line_total: line_total(item)?,
            })
        })
        .collect::<AppResult<Vec<OrderLine>>>()?;
    let subtotal = checked_sum(lines.iter().map(|l| l.line_total))?;
    Ok((lines, subtotal))
}

/// Reject inputs the engine must not price
///
/// - no carts, or a cart with zero items
/// - the same restaurant in two carts
/// - more carts than `max_merchants_per_order`
/// - no delivery coordinates while the policy requires them
pub fn check_preconditions(
    carts: &[MerchantCart],
    delivery_location: Option<GeoPoint>,
    settings: &RateSettings,
) -> AppResult<()> {
    if carts.is_empty() {
        return Err(AppError::with_message(ErrorCode::CartEmpty, "Checkout has no carts"));
    }

    if let Some(empty) = carts.iter().find(|c| c.is_empty()) {
        return Err(AppError::cart_empty(&empty.restaurant_id));
    }

    let mut seen = HashSet::with_capacity(carts.len());
    for cart in carts {
        if !seen.insert(cart.restaurant_id.as_str()) {
            return Err(AppError::with_message(
                ErrorCode::DuplicateMerchant,
                format!("Restaurant {} appears in more than one cart", cart.restaurant_id),
            )
            .with_detail("restaurant_id", cart.restaurant_id.clone()));
        }
    }

    if carts.len() > settings.max_merchants_per_order as usize {
        return Err(AppError::too_many_merchants(
            carts.len(),
            settings.max_merchants_per_order,
        ));
    }

    if settings.coordinate_policy == CoordinatePolicy::Required && delivery_location.is_none() {
        return Err(AppError::new(ErrorCode::DeliveryCoordinatesRequired));
    }

    Ok(())
}

/// Price a checkout
///
/// `settings` must be the snapshot taken for this checkout; it is only read.
pub fn price_checkout(
    carts: &[MerchantCart],
    delivery_location: Option<GeoPoint>,
    settings: &RateSettings,
) -> AppResult<CheckoutPricing> {
    check_preconditions(carts, delivery_location, settings)?;

    let merchant_count = carts.len();

    // Steps 1-2
    let mut orders: Vec<SubOrderPricing> = carts
        .iter()
        .enumerate()
        .map(|(index, cart)| -> AppResult<SubOrderPricing> {
            let (lines, subtotal) = cart_subtotal(cart)
                .map_err(|e| e.with_detail("restaurant_id", cart.restaurant_id.clone()))?;
            let markup = percent_of(subtotal, cart.markup_percent)?;
            let quote = quote_delivery(
                delivery_location,
                cart.location,
                settings.base_delivery_fee,
                settings.per_km_rate,
            );
            Ok(SubOrderPricing {
                restaurant_id: cart.restaurant_id.clone(),
                restaurant_name: cart.restaurant_name.clone(),
                lines,
                subtotal,
                markup_percent: cart.markup_percent,
                markup,
                distance_km: quote.distance_km,
                individual_delivery_fee: quote.fee,
                delivery_fee: Decimal::ZERO,
                multi_merchant_fee: Decimal::ZERO,
                convenience_fee: Decimal::ZERO,
                total: Decimal::ZERO,
                is_fee_carrier: index == FEE_CARRIER_INDEX,
            })
        })
        .collect::<AppResult<Vec<SubOrderPricing>>>()?;

    // Step 3
    let group_delivery_fee = orders
        .iter()
        .map(|o| o.individual_delivery_fee)
        .max()
        .unwrap_or(Decimal::ZERO);
    let group_distance_km = orders.iter().map(|o| o.distance_km).fold(0.0, f64::max);

    // Step 4
    let multi_merchant_fee_total = if merchant_count > 1 {
        let extra = Decimal::from(merchant_count - 1);
        extra
            .checked_mul(settings.multi_merchant_fee)
            .ok_or_else(|| amount_overflow(format!("{} × {}", extra, settings.multi_merchant_fee)))?
    } else {
        Decimal::ZERO
    };

    // Step 6
    let convenience_fee = if settings.show_convenience_fee {
        settings.convenience_fee
    } else {
        Decimal::ZERO
    };

    // Steps 5 + 7
    for order in &mut orders {
        if order.is_fee_carrier {
            order.delivery_fee = group_delivery_fee;
            order.multi_merchant_fee = multi_merchant_fee_total;
        }
        order.convenience_fee = convenience_fee;
        order.total = order.fees().total()?;
    }

    let customer_total = checked_sum(orders.iter().map(|o| o.total))?;

    tracing::debug!(
        merchant_count,
        group_delivery_fee = %group_delivery_fee,
        multi_merchant_fee = %multi_merchant_fee_total,
        customer_total = %customer_total,
        "Checkout priced"
    );

    Ok(CheckoutPricing {
        merchant_count,
        group_delivery_fee,
        group_distance_km,
        multi_merchant_fee_total,
        orders,
        customer_total,
    })
}
