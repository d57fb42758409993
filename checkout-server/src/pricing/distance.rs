//! Distance / Delivery Fee Calculator
//!
//! Great-circle distance on a spherical Earth and the distance-banded
//! delivery fee:
//!
//! ```text
//! coordinates missing      → fee = base, distance = 0
//! ceil(distance_km) <= 1   → fee = base
//! otherwise                → fee = base + (ceil(distance_km) - 1) × per_km
//! ```
//!
//! The distance is always rounded *up* to the next whole kilometer before the
//! per-km rate applies.

use rust_decimal::Decimal;
use serde::Serialize;
use shared::models::GeoPoint;

use super::money::round_km;

/// Mean Earth radius (km)
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Delivery fee and the distance it was derived from
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DeliveryQuote {
    /// Great-circle distance, 2 decimals; 0 when unknown
    pub distance_km: f64,
    /// Whole kilometers billed (ceil of distance); 0 when unknown
    pub billed_km: u64,
    pub fee: Decimal,
    /// False when either coordinate pair was missing
    pub distance_known: bool,
}

/// Haversine distance between two points in kilometers
pub fn haversine_km(from: GeoPoint, to: GeoPoint) -> f64 {
    let lat1 = from.latitude.to_radians();
    let lat2 = to.latitude.to_radians();
    let d_lat = (to.latitude - from.latitude).to_radians();
    let d_lon = (to.longitude - from.longitude).to_radians();

    let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_KM * c
}

/// Fee for a known distance
///
/// `base_fee` and `per_km_rate` are expected to be non-negative; the result
/// is clamped at zero regardless.
pub fn delivery_fee_for_distance(distance_km: f64, base_fee: Decimal, per_km_rate: Decimal) -> Decimal {
    let billed_km = billed_kilometers(distance_km);
    fee_for_billed_km(billed_km, base_fee, per_km_rate)
}

/// Quote the delivery fee between a customer and a merchant
///
/// Missing (or non-finite) coordinates fall back to `base_fee` with a
/// reported distance of 0. This is not an error.
pub fn quote_delivery(
    customer: Option<GeoPoint>,
    merchant: Option<GeoPoint>,
    base_fee: Decimal,
    per_km_rate: Decimal,
) -> DeliveryQuote {
    let distance = match (customer, merchant) {
        (Some(c), Some(m)) => Some(haversine_km(c, m)).filter(|d| d.is_finite()),
        _ => None,
    };

    match distance {
        Some(km) => {
            let billed_km = billed_kilometers(km);
            DeliveryQuote {
                distance_km: round_km(km),
                billed_km,
                fee: fee_for_billed_km(billed_km, base_fee, per_km_rate),
                distance_known: true,
            }
        }
        None => DeliveryQuote {
            distance_km: 0.0,
            billed_km: 0,
            fee: base_fee.max(Decimal::ZERO),
            distance_known: false,
        },
    }
}

/// ceil(distance) as whole kilometers
fn billed_kilometers(distance_km: f64) -> u64 {
    if !distance_km.is_finite() || distance_km <= 0.0 {
        return 0;
    }
    distance_km.ceil() as u64
}

fn fee_for_billed_km(billed_km: u64, base_fee: Decimal, per_km_rate: Decimal) -> Decimal {
    let fee = if billed_km <= 1 {
        base_fee
    } else {
        base_fee + Decimal::from(billed_km - 1) * per_km_rate
    };
    fee.max(Decimal::ZERO)
}
