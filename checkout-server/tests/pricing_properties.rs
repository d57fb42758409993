//! 定价性质测试 (proptest)
//!
//! 金额以分生成，保证输入本身就是两位小数

use checkout_server::pricing::{
    FeeBreakdown, delivery_fee_for_distance, price_checkout, split_revenue,
};
use proptest::prelude::*;
use proptest::test_runner::Config;
use rust_decimal::Decimal;
use shared::models::{CartItem, GeoPoint, MerchantCart, RateSettings};

fn cents(value: u32) -> Decimal {
    Decimal::new(i64::from(value), 2)
}

fn arb_fees() -> impl Strategy<Value = FeeBreakdown> {
    (
        0u32..5_000_000,
        0u32..1_000_000,
        0u32..100_000,
        0u32..100_000,
        0u32..10_000,
    )
        .prop_map(|(subtotal, markup, delivery, multi, convenience)| FeeBreakdown {
            subtotal: cents(subtotal),
            markup: cents(markup),
            delivery_fee: cents(delivery),
            multi_merchant_fee: cents(multi),
            convenience_fee: cents(convenience),
        })
}

fn cart(index: usize, price_cents: u32, lon: f64) -> MerchantCart {
    MerchantCart {
        restaurant_id: format!("r{}", index),
        restaurant_name: format!("Restaurant {}", index),
        markup_percent: Decimal::new(15, 0),
        location: Some(GeoPoint::new(14.6, 121.0 + lon)),
        items: vec![CartItem {
            menu_item_id: format!("m{}", index),
            name: "Meal".to_string(),
            unit_base_price: cents(price_cents),
            quantity: 1,
            selected_options: vec![],
        }],
    }
}

proptest! {
    #![proptest_config(Config::with_cases(256))]

    #[test]
    fn split_conserves_total(fees in arb_fees(), pct_bp in 0u32..=10_000) {
        let pct = Decimal::new(i64::from(pct_bp), 2);
        let split = split_revenue(&fees, pct).unwrap();

        prop_assert_eq!(split.sum(), fees.total().unwrap());
        prop_assert_eq!(split.merchant_earnings, fees.subtotal);
        prop_assert!(split.app_earnings >= fees.markup);
        prop_assert!(split.rider_earnings >= fees.convenience_fee);
        prop_assert!(split.app_earnings.scale() <= 2);
        prop_assert!(split.rider_earnings.scale() <= 2);
    }

    #[test]
    fn delivery_fee_is_monotonic(
        a in 0.0f64..200.0,
        b in 0.0f64..200.0,
        base in 0u32..10_000,
        per_km in 0u32..5_000,
    ) {
        let (near, far) = if a <= b { (a, b) } else { (b, a) };
        let near_fee = delivery_fee_for_distance(near, cents(base), cents(per_km));
        let far_fee = delivery_fee_for_distance(far, cents(base), cents(per_km));

        prop_assert!(near_fee <= far_fee);
        prop_assert!(near_fee >= cents(base));
    }

    #[test]
    fn group_fees_charged_once(
        merchants in prop::collection::vec((100u32..500_000, 0.0f64..0.2), 1..=5),
        show_convenience in any::<bool>(),
    ) {
        let settings = RateSettings {
            max_merchants_per_order: 5,
            show_convenience_fee: show_convenience,
            ..RateSettings::default()
        };
        let carts: Vec<MerchantCart> = merchants
            .iter()
            .enumerate()
            .map(|(i, (price, lon))| cart(i, *price, *lon))
            .collect();
        let customer = Some(GeoPoint::new(14.6, 121.0));
        let snapshot = settings.clone();

        let pricing = price_checkout(&carts, customer, &settings).unwrap();
        let n = carts.len();

        let max_individual = pricing
            .orders
            .iter()
            .map(|o| o.individual_delivery_fee)
            .max()
            .unwrap();
        let delivery: Decimal = pricing.orders.iter().map(|o| o.delivery_fee).sum();
        let multi: Decimal = pricing.orders.iter().map(|o| o.multi_merchant_fee).sum();
        let convenience: Decimal = pricing.orders.iter().map(|o| o.convenience_fee).sum();
        let totals: Decimal = pricing.orders.iter().map(|o| o.total).sum();

        prop_assert_eq!(delivery, max_individual);
        prop_assert_eq!(multi, Decimal::from(n - 1) * settings.multi_merchant_fee);
        let expected_convenience = if show_convenience {
            Decimal::from(n) * settings.convenience_fee
        } else {
            Decimal::ZERO
        };
        prop_assert_eq!(convenience, expected_convenience);
        prop_assert_eq!(totals, pricing.customer_total);
        prop_assert_eq!(pricing.orders.iter().filter(|o| o.is_fee_carrier).count(), 1);
        prop_assert!(pricing.orders[0].is_fee_carrier);

        for order in pricing.orders.iter().filter(|o| !o.is_fee_carrier) {
            prop_assert_eq!(order.delivery_fee, Decimal::ZERO);
            prop_assert_eq!(order.multi_merchant_fee, Decimal::ZERO);
        }

        for order in &pricing.orders {
            let split = split_revenue(&order.fees(), settings.app_earnings_percentage).unwrap();
            prop_assert!(split.is_conserved(order.total));
        }

        prop_assert_eq!(&settings, &snapshot);
    }
}
