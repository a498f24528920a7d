use actix_web::{http::StatusCode, test::TestRequest, web, web::ServiceConfig};
use seva_common::Paise;
use seva_engine::{traits::PaymentGatewayError, OrderApi};
use serde_json::json;

use super::{
    helpers::{json, send},
    mocks::MockGateway,
};
use crate::routes::{health, CreateOrderRoute};

#[actix_web::test]
async fn health_endpoint() {
    let (status, body) = send(TestRequest::get().uri("/health"), |cfg| {
        cfg.service(health);
    })
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "👍️\n");
}

#[actix_web::test]
async fn create_order_passes_minor_units_to_the_gateway() {
    let _ = env_logger::try_init().ok();
    let mut gateway = MockGateway::new();
    gateway
        .expect_create_order()
        .withf(|req| req.amount == Paise::from(25_000) && req.currency == "INR" && req.receipt.starts_with("receipt_"))
        .times(1)
        .returning(|req| Ok(json!({"id": "order_EKwxwAgItmmXdp", "amount": req.amount.value(), "status": "created"})));
    let req = TestRequest::post().uri("/payment/create-order").set_json(json!({"amount": 250}));
    let (status, body) = send(req, configure(gateway)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json(&body), json!({"order": {"id": "order_EKwxwAgItmmXdp", "amount": 25000, "status": "created"}}));
}

#[actix_web::test]
async fn create_order_accepts_numeric_strings() {
    let _ = env_logger::try_init().ok();
    let mut gateway = MockGateway::new();
    gateway
        .expect_create_order()
        .withf(|req| req.amount == Paise::from(9_950) && req.currency == "USD")
        .times(1)
        .returning(|_| Ok(json!({"id": "order_1"})));
    let req =
        TestRequest::post().uri("/payment/create-order").set_json(json!({"amount": "99.50", "currency": "usd"}));
    let (status, _) = send(req, configure(gateway)).await;
    assert_eq!(status, StatusCode::OK);
}

#[actix_web::test]
async fn invalid_amounts_never_reach_the_gateway() {
    let _ = env_logger::try_init().ok();
    for amount in [json!(0), json!(-5), json!("abc"), json!(null)] {
        let mut gateway = MockGateway::new();
        gateway.expect_create_order().times(0);
        let req = TestRequest::post().uri("/payment/create-order").set_json(json!({ "amount": amount }));
        let (status, body) = send(req, configure(gateway)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "amount {amount}");
        assert!(json(&body)["error"].as_str().unwrap().contains("amount"), "{body}");
    }
}

#[actix_web::test]
async fn gateway_failure_is_a_bad_gateway() {
    let _ = env_logger::try_init().ok();
    let mut gateway = MockGateway::new();
    gateway
        .expect_create_order()
        .returning(|_| Err(PaymentGatewayError::Rejected("BAD_REQUEST_ERROR: Authentication failed".into())));
    let req = TestRequest::post().uri("/payment/create-order").set_json(json!({"amount": 250}));
    let (status, body) = send(req, configure(gateway)).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(json(&body)["error"].as_str().unwrap().contains("Authentication failed"));
}

#[actix_web::test]
async fn malformed_json_is_a_bad_request() {
    let _ = env_logger::try_init().ok();
    let mut gateway = MockGateway::new();
    gateway.expect_create_order().times(0);
    let req = TestRequest::post()
        .uri("/payment/create-order")
        .insert_header(("content-type", "application/json"))
        .set_payload("{\"amount\": ");
    let (status, body) = send(req, configure(gateway)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json(&body)["error"].as_str().unwrap().starts_with("Could not read request body"));
}

fn configure(gateway: MockGateway) -> impl FnOnce(&mut ServiceConfig) {
    move |cfg| {
        let api = OrderApi::new(gateway);
        cfg.service(CreateOrderRoute::<MockGateway>::new()).app_data(web::Data::new(api));
    }
}
