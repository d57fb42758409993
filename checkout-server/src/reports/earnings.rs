//! Earnings aggregation
//!
//! Sums the split amounts frozen on each order. Live rate settings are never
//! consulted, so a report over old orders stays stable after settings change.

use shared::error::AppResult;
use shared::models::{
    EarningsQuery, EarningsReport, EarningsTotals, OrderStatus, PricedOrder, RestaurantEarnings,
};

use crate::orders::OrderStorage;

/// Load orders from storage and aggregate them
pub fn earnings_report(storage: &OrderStorage, query: &EarningsQuery) -> AppResult<EarningsReport> {
    let orders = storage.list_orders()?;
    Ok(build_earnings_report(&orders, query))
}

/// Aggregate a set of orders
///
/// Filters: `from` inclusive, `to` exclusive (both `created_at` millis),
/// optional restaurant. Cancelled orders are excluded. Restaurants appear in
/// order of their first matching order.
pub fn build_earnings_report(orders: &[PricedOrder], query: &EarningsQuery) -> EarningsReport {
    let mut totals = EarningsTotals::default();
    let mut by_restaurant: Vec<RestaurantEarnings> = Vec::new();

    for order in orders.iter().filter(|o| matches(o, query)) {
        totals.add(order);

        match by_restaurant
            .iter_mut()
            .find(|r| r.restaurant_id == order.restaurant_id)
        {
            Some(row) => row.totals.add(order),
            None => {
                let mut row = RestaurantEarnings {
                    restaurant_id: order.restaurant_id.clone(),
                    restaurant_name: order.restaurant_name.clone(),
                    totals: EarningsTotals::default(),
                };
                row.totals.add(order);
                by_restaurant.push(row);
            }
        }
    }

    EarningsReport {
        from: query.from,
        to: query.to,
        totals,
        by_restaurant,
    }
}

fn matches(order: &PricedOrder, query: &EarningsQuery) -> bool {
    if order.status == OrderStatus::Cancelled {
        return false;
    }
    if query.from.is_some_and(|from| order.created_at < from) {
        return false;
    }
    if query.to.is_some_and(|to| order.created_at >= to) {
        return false;
    }
    if let Some(restaurant_id) = &query.restaurant_id
        && &order.restaurant_id != restaurant_id
    {
        return false;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use shared::models::{DeliveryInfo, PaymentMethod};

    fn order(id: i64, restaurant: &str, created_at: i64, status: OrderStatus) -> PricedOrder {
        PricedOrder {
            id,
            order_group_id: None,
            restaurant_id: restaurant.into(),
            restaurant_name: restaurant.to_uppercase(),
            items: vec![],
            subtotal: dec!(500),
            markup_percent: dec!(15),
            markup: dec!(75),
            distance_km: 2.5,
            delivery_fee: dec!(55),
            multi_merchant_fee: Decimal::ZERO,
            convenience_fee: dec!(15),
            total: dec!(645),
            app_earnings_percentage_used: dec!(50),
            app_earnings_amount: dec!(102.50),
            rider_earnings_amount: dec!(42.50),
            merchant_earnings_amount: dec!(500),
            delivery: DeliveryInfo {
                address: "x".into(),
                location: None,
                contact_name: "x".into(),
                contact_phone: "x".into(),
                notes: None,
            },
            payment_method: PaymentMethod::Cash,
            status,
            created_at,
            updated_at: created_at,
        }
    }

    #[test]
    fn test_totals_and_breakdown() {
        let orders = vec![
            order(1, "a", 100, OrderStatus::Delivered),
            order(2, "b", 200, OrderStatus::Pending),
            order(3, "a", 300, OrderStatus::Accepted),
        ];
        let report = build_earnings_report(&orders, &EarningsQuery::default());

        assert_eq!(report.totals.order_count, 3);
        assert_eq!(report.totals.total, dec!(1935));
        assert_eq!(report.totals.app_earnings, dec!(307.50));
        assert_eq!(
            report.totals.merchant_earnings + report.totals.app_earnings + report.totals.rider_earnings,
            report.totals.total
        );

        assert_eq!(report.by_restaurant.len(), 2);
        assert_eq!(report.by_restaurant[0].restaurant_id, "a");
        assert_eq!(report.by_restaurant[0].totals.order_count, 2);
    }

    #[test]
    fn test_filters() {
        let orders = vec![
            order(1, "a", 100, OrderStatus::Delivered),
            order(2, "b", 200, OrderStatus::Delivered),
            order(3, "a", 300, OrderStatus::Cancelled),
            order(4, "a", 400, OrderStatus::Delivered),
        ];

        let query = EarningsQuery {
            from: Some(100),
            to: Some(400),
            restaurant_id: None,
        };
        let report = build_earnings_report(&orders, &query);
        // 4 is outside [100, 400), 3 is cancelled
        assert_eq!(report.totals.order_count, 2);

        let query = EarningsQuery {
            restaurant_id: Some("a".into()),
            ..Default::default()
        };
        let report = build_earnings_report(&orders, &query);
        assert_eq!(report.totals.order_count, 2);
        assert_eq!(report.by_restaurant.len(), 1);
    }

    #[test]
    fn test_empty_report() {
        let report = build_earnings_report(&[], &EarningsQuery::default());
        assert_eq!(report.totals, EarningsTotals::default());
        assert!(report.by_restaurant.is_empty());
    }
}
