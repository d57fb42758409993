//! HTTP API 测试 - 通过 oneshot 调用完整 Router (含中间件)

use axum::Router;
use axum::body::Body;
use checkout_server::{Config, ServerState, build_app};
use http::{Method, Request, StatusCode};
use http_body_util::BodyExt;
use rust_decimal_macros::dec;
use serde_json::{Value, json};
use shared::models::{CheckoutResponse, PricedOrder, RateSettings};
use tower::ServiceExt;

fn app() -> Router {
    let state = ServerState::in_memory(Config::default()).unwrap();
    build_app(state)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    let request = match body {
        Some(json) => builder.body(Body::from(json.to_string())).unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

fn checkout_body(carts: Value, payment_method: &str) -> Value {
    json!({
        "carts": carts,
        "delivery": {
            "address": "12 Mabini St",
            "location": { "latitude": 0.0, "longitude": 0.0 },
            "contact_name": "Lea",
            "contact_phone": "09171234567"
        },
        "payment_method": payment_method
    })
}

fn one_cart() -> Value {
    json!([{
        "restaurant_id": "adobo",
        "restaurant_name": "Adobo House",
        "markup_percent": 15,
        "location": { "latitude": 0.0, "longitude": 0.0225 },
        "items": [
            { "menu_item_id": "chicken", "name": "Chicken adobo", "unit_base_price": 250, "quantity": 2 }
        ]
    }])
}

#[tokio::test]
async fn health_reports_ok() {
    let app = app();
    let (status, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"]["status"], "ok");
}

#[tokio::test]
async fn checkout_then_fetch_order() {
    let app = app();
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/checkout",
        Some(checkout_body(one_cart(), "cash")),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let response: CheckoutResponse = serde_json::from_value(body).unwrap();
    assert_eq!(response.customer_total, dec!(645));
    let order_id = response.orders[0].order_id;

    let (status, body) = send(&app, Method::GET, &format!("/api/orders/{}", order_id), None).await;
    assert_eq!(status, StatusCode::OK);
    let order: PricedOrder = serde_json::from_value(body).unwrap();
    assert_eq!(order.app_earnings_amount, dec!(102.50));
    assert_eq!(order.rider_earnings_amount, dec!(42.50));

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/api/orders/{}/status", order_id),
        Some(json!({ "status": "accepted" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "accepted");

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/api/orders/{}/status", order_id),
        Some(json!({ "status": "delivered" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], 4008);
}

#[tokio::test]
async fn quote_is_not_persisted() {
    let app = app();
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/checkout/quote",
        Some(checkout_body(one_cart(), "cash")),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["merchant_count"], 1);

    let (_, orders) = send(&app, Method::GET, "/api/orders", None).await;
    assert_eq!(orders.as_array().map(Vec::len), Some(0));
}

#[tokio::test]
async fn checkout_rejections_map_to_error_codes() {
    let app = app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/checkout",
        Some(checkout_body(json!([]), "cash")),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 4003);

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/checkout",
        Some(checkout_body(one_cart(), "bitcoin")),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 5001);

    let mut sub_cent = one_cart();
    sub_cent[0]["items"][0]["unit_base_price"] = json!("10.005");
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/checkout",
        Some(checkout_body(sub_cent, "cash")),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 4005);

    let (status, _) = send(&app, Method::GET, "/api/orders/42", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn settings_update_and_validation() {
    let app = app();

    let (status, body) = send(
        &app,
        Method::PUT,
        "/api/settings",
        Some(json!({ "app_earnings_percentage": 70 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let settings: RateSettings = serde_json::from_value(body).unwrap();
    assert_eq!(settings.app_earnings_percentage, dec!(70));

    let (status, body) = send(
        &app,
        Method::PUT,
        "/api/settings",
        Some(json!({ "app_earnings_percentage": 150 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 7001);

    let (_, body) = send(&app, Method::GET, "/api/settings", None).await;
    let settings: RateSettings = serde_json::from_value(body).unwrap();
    assert_eq!(settings.app_earnings_percentage, dec!(70));
}

#[tokio::test]
async fn earnings_report_sums_orders() {
    let app = app();
    for _ in 0..2 {
        let (status, _) = send(
            &app,
            Method::POST,
            "/api/checkout",
            Some(checkout_body(one_cart(), "gcash")),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, body) = send(&app, Method::GET, "/api/reports/earnings", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totals"]["order_count"], 2);

    let (status, _) = send(&app, Method::GET, "/api/reports/earnings?from=10&to=5", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
