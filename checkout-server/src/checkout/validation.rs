//! Checkout request validation
//!
//! Every check runs before any pricing and fails with its own error code so
//! the client can correct the request and retry.

use rust_decimal::Decimal;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{
    CheckoutRequest, DeliveryInfo, GeoPoint, MAX_AMOUNT, MAX_QUANTITY, PaymentMethod,
    RateSettings, has_money_scale, is_valid_amount,
};
use validator::Validate;

use crate::pricing::check_preconditions;

/// Validate a checkout request against a settings snapshot
///
/// Returns the parsed payment method.
pub fn validate_checkout(request: &CheckoutRequest, settings: &RateSettings) -> AppResult<PaymentMethod> {
    validate_delivery(&request.delivery)?;
    request.validate()?;
    validate_items(request)?;
    check_preconditions(&request.carts, request.delivery.location, settings)?;
    validate_merchant_locations(request)?;
    parse_payment_method(&request.payment_method, settings)
}

/// Address and contact must be present; coordinates must be in range
pub fn validate_delivery(delivery: &DeliveryInfo) -> AppResult<()> {
    if delivery.address.trim().is_empty() {
        return Err(AppError::new(ErrorCode::DeliveryAddressRequired).with_detail("field", "address"));
    }
    if delivery.contact_name.trim().is_empty() {
        return Err(AppError::new(ErrorCode::ContactRequired).with_detail("field", "contact_name"));
    }
    if delivery.contact_phone.trim().is_empty() {
        return Err(AppError::new(ErrorCode::ContactRequired).with_detail("field", "contact_phone"));
    }
    if let Some(location) = delivery.location {
        check_coordinates(location, "delivery.location")?;
    }
    Ok(())
}

/// Quantities in 1..=MAX_QUANTITY, prices are 2-decimal amounts up to
/// MAX_AMOUNT, markup within 0-100 with at most 2 decimals
fn validate_items(request: &CheckoutRequest) -> AppResult<()> {
    for cart in &request.carts {
        let markup = cart.markup_percent;
        if markup < Decimal::ZERO || markup > Decimal::ONE_HUNDRED || !has_money_scale(markup) {
            return Err(AppError::with_message(
                ErrorCode::InvalidAmount,
                format!(
                    "Markup for restaurant {} must be between 0 and 100 with at most 2 decimals, got {}",
                    cart.restaurant_id, markup
                ),
            )
            .with_detail("restaurant_id", cart.restaurant_id.clone()));
        }

        for item in &cart.items {
            if item.quantity == 0 || item.quantity > MAX_QUANTITY {
                return Err(AppError::with_message(
                    ErrorCode::InvalidQuantity,
                    format!(
                        "Quantity of {} must be between 1 and {}, got {}",
                        item.name, MAX_QUANTITY, item.quantity
                    ),
                )
                .with_detail("menu_item_id", item.menu_item_id.clone()));
            }
            if !is_valid_amount(item.unit_base_price) {
                return Err(invalid_price(
                    format!("Price of {}", item.name),
                    item.unit_base_price,
                )
                .with_detail("menu_item_id", item.menu_item_id.clone()));
            }
            if let Some(option) = item.selected_options.iter().find(|o| !is_valid_amount(o.price)) {
                return Err(invalid_price(
                    format!("Option {} of {}", option.name, item.name),
                    option.price,
                )
                .with_detail("menu_item_id", item.menu_item_id.clone()));
            }
        }
    }
    Ok(())
}

fn invalid_price(what: String, value: Decimal) -> AppError {
    AppError::with_message(
        ErrorCode::InvalidAmount,
        format!(
            "{} must be between 0 and {} with at most 2 decimals, got {}",
            what, MAX_AMOUNT, value
        ),
    )
}

fn validate_merchant_locations(request: &CheckoutRequest) -> AppResult<()> {
    for cart in &request.carts {
        if let Some(location) = cart.location {
            check_coordinates(location, "merchant.location")
                .map_err(|e| e.with_detail("restaurant_id", cart.restaurant_id.clone()))?;
        }
    }
    Ok(())
}

fn check_coordinates(location: GeoPoint, field: &str) -> AppResult<()> {
    if location.is_valid() {
        return Ok(());
    }
    Err(AppError::with_message(
        ErrorCode::InvalidCoordinates,
        format!(
            "Coordinates ({}, {}) are out of range",
            location.latitude, location.longitude
        ),
    )
    .with_detail("field", field.to_string()))
}

/// Parse the payment method string and check it is enabled
pub fn parse_payment_method(raw: &str, settings: &RateSettings) -> AppResult<PaymentMethod> {
    let method: PaymentMethod = raw.parse().map_err(|_| {
        AppError::with_message(
            ErrorCode::PaymentInvalidMethod,
            format!("Unknown payment method: {}", raw),
        )
        .with_detail("payment_method", raw.to_string())
    })?;

    if !settings.is_payment_method_enabled(method) {
        return Err(AppError::with_message(
            ErrorCode::PaymentMethodDisabled,
            format!("Payment method {} is not enabled", method),
        )
        .with_detail("payment_method", method.as_str()));
    }

    Ok(method)
}
