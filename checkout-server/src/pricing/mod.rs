//! Pricing Module
//!
//! Synchronous, side-effect-free pricing core:
//! - [`distance`]: great-circle distance and delivery fee bands
//! - [`aggregate`]: flat cart lines → one cart per restaurant
//! - [`checkout`]: multi-merchant checkout pricing and fee assignment
//! - [`revenue`]: merchant / app / rider split
//!
//! All amounts are `Decimal`; see [`money`] for rounding.

pub mod aggregate;
pub mod checkout;
pub mod distance;
pub mod money;
pub mod revenue;

pub use aggregate::{MerchantCarts, group_by_merchant};
pub use checkout::{
    CheckoutPricing, FEE_CARRIER_INDEX, SubOrderPricing, cart_subtotal, check_preconditions,
    line_total, price_checkout,
};
pub use distance::{DeliveryQuote, EARTH_RADIUS_KM, delivery_fee_for_distance, haversine_km, quote_delivery};
pub use money::{checked_sum, percent_of, round_money};
pub use revenue::{FeeBreakdown, RevenueSplit, split_revenue};
