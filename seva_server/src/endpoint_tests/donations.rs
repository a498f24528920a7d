use actix_web::{http::StatusCode, test::TestRequest, web, web::ServiceConfig};
use seva_common::Paise;
use seva_engine::{
    db_types::{Donation, NewDonation},
    events::EventProducers,
    traits::{CampaignStoreError, GatewayPayment, GatewayPaymentStatus, LedgerError, PaymentGatewayError},
    AggregationApi,
    DonationFlowApi,
};
use serde_json::json;

use super::{
    helpers::{campaign, donation, json, send},
    mocks::{MockDatabase, MockGateway},
};
use crate::routes::{CampaignDonationsRoute, CampaignTotalRoute, DonateRoute};

fn donation_body(amount: serde_json::Value) -> serde_json::Value {
    json!({
        "campaignId": "c1",
        "name": "Asha",
        "amount": amount,
        "phone": "98123 45678",
        "razorpay_payment_id": "pay_1"
    })
}

fn captured_payment(rupees: i64) -> GatewayPayment {
    GatewayPayment {
        payment_id: "pay_1".to_string(),
        amount: Paise::from_major(rupees),
        currency: "INR".to_string(),
        status: GatewayPaymentStatus::Captured,
        order_id: Some("order_1".to_string()),
    }
}

fn stored(id: i64) -> impl Fn(NewDonation) -> Result<Donation, LedgerError> {
    move |d| {
        Ok(Donation {
            id,
            campaign_id: d.campaign_id,
            name: d.name,
            amount: d.amount,
            email: d.email,
            phone: d.phone,
            payment_reference: d.payment_reference,
            created_at: d.created_at,
        })
    }
}

fn campaign_exists(db: &mut MockDatabase) {
    db.expect_fetch_campaign().returning(|id| Ok(Some(campaign(id.as_str(), "owner-1"))));
}

#[actix_web::test]
async fn donation_is_recorded() {
    let _ = env_logger::try_init().ok();
    let mut db = MockDatabase::new();
    let mut gateway = MockGateway::new();
    campaign_exists(&mut db);
    gateway.expect_fetch_payment().times(1).returning(|_| Ok(captured_payment(500)));
    db.expect_insert_donation()
        .withf(|d| d.amount == Paise::from_major(500) && d.phone == "+919812345678")
        .times(1)
        .returning(stored(11));
    db.expect_increment_raised()
        .withf(|id, amount| id.as_str() == "c1" && *amount == Paise::from_major(500))
        .times(1)
        .returning(|_, _| Ok(()));
    let req = TestRequest::post().uri("/donations/donate").set_json(donation_body(json!(500)));
    let (status, body) = send(req, configure(db, gateway)).await;
    assert_eq!(status, StatusCode::CREATED);
    let body = json(&body);
    assert_eq!(body["success"], true);
    assert_eq!(body["counterUpdated"], true);
    assert_eq!(body["duplicate"], false);
    assert_eq!(body["donation"]["id"], 11);
    assert_eq!(body["donation"]["amount"], 500);
    assert_eq!(body["donation"]["paymentReference"], "pay_1");
}

#[actix_web::test]
async fn counter_failure_does_not_fail_the_donation() {
    let _ = env_logger::try_init().ok();
    let mut db = MockDatabase::new();
    let mut gateway = MockGateway::new();
    campaign_exists(&mut db);
    gateway.expect_fetch_payment().returning(|_| Ok(captured_payment(1500)));
    db.expect_insert_donation().times(1).returning(stored(12));
    db.expect_increment_raised().returning(|_, _| Err(CampaignStoreError::DatabaseError("database is locked".into())));
    let req = TestRequest::post().uri("/donations/donate").set_json(donation_body(json!("1500")));
    let (status, body) = send(req, configure(db, gateway)).await;
    assert_eq!(status, StatusCode::CREATED);
    let body = json(&body);
    assert_eq!(body["success"], true);
    assert_eq!(body["counterUpdated"], false);
}

#[actix_web::test]
async fn invalid_donations_are_rejected_with_every_bad_field() {
    let _ = env_logger::try_init().ok();
    // No expectations: any storage or gateway call fails the test
    let db = MockDatabase::new();
    let gateway = MockGateway::new();
    let req = TestRequest::post().uri("/donations/donate").set_json(json!({
        "campaignId": "c1",
        "amount": -10,
        "phone": "12345"
    }));
    let (status, body) = send(req, configure(db, gateway)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let body = json(&body);
    let fields = body["fields"].as_array().unwrap().iter().map(|f| f["field"].as_str().unwrap()).collect::<Vec<_>>();
    assert!(fields.contains(&"name"), "{fields:?}");
    assert!(fields.contains(&"amount"), "{fields:?}");
    assert!(fields.contains(&"phone"), "{fields:?}");
    assert!(fields.contains(&"paymentReference"), "{fields:?}");
}

#[actix_web::test]
async fn unknown_campaign_is_not_found() {
    let _ = env_logger::try_init().ok();
    let mut db = MockDatabase::new();
    let mut gateway = MockGateway::new();
    db.expect_fetch_campaign().returning(|_| Ok(None));
    db.expect_insert_donation().times(0);
    gateway.expect_fetch_payment().times(0);
    let req = TestRequest::post().uri("/donations/donate").set_json(donation_body(json!(500)));
    let (status, body) = send(req, configure(db, gateway)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(json(&body)["error"].as_str().unwrap().contains("c1"));
}

#[actix_web::test]
async fn unsettled_payment_is_refused() {
    let _ = env_logger::try_init().ok();
    let mut db = MockDatabase::new();
    let mut gateway = MockGateway::new();
    campaign_exists(&mut db);
    gateway.expect_fetch_payment().returning(|_| {
        let mut payment = captured_payment(500);
        payment.status = GatewayPaymentStatus::Failed;
        Ok(payment)
    });
    db.expect_insert_donation().times(0);
    let req = TestRequest::post().uri("/donations/donate").set_json(donation_body(json!(500)));
    let (status, _) = send(req, configure(db, gateway)).await;
    assert_eq!(status, StatusCode::PAYMENT_REQUIRED);
}

#[actix_web::test]
async fn amount_mismatch_is_refused() {
    let _ = env_logger::try_init().ok();
    let mut db = MockDatabase::new();
    let mut gateway = MockGateway::new();
    campaign_exists(&mut db);
    gateway.expect_fetch_payment().returning(|_| Ok(captured_payment(5)));
    db.expect_insert_donation().times(0);
    let req = TestRequest::post().uri("/donations/donate").set_json(donation_body(json!(500)));
    let (status, _) = send(req, configure(db, gateway)).await;
    assert_eq!(status, StatusCode::PAYMENT_REQUIRED);
}

#[actix_web::test]
async fn payment_answered_for_another_id_is_refused() {
    let _ = env_logger::try_init().ok();
    let mut db = MockDatabase::new();
    let mut gateway = MockGateway::new();
    campaign_exists(&mut db);
    gateway.expect_fetch_payment().returning(|_| {
        let mut payment = captured_payment(500);
        payment.payment_id = "pay_2".to_string();
        Ok(payment)
    });
    db.expect_insert_donation().times(0);
    let req = TestRequest::post().uri("/donations/donate").set_json(donation_body(json!(500)));
    let (status, _) = send(req, configure(db, gateway)).await;
    assert_eq!(status, StatusCode::PAYMENT_REQUIRED);
}

#[actix_web::test]
async fn malformed_payment_references_never_reach_the_gateway() {
    let _ = env_logger::try_init().ok();
    for reference in ["pay_1#dup1", "pay_1?dup=2", "pay_1/dup3"] {
        let mut db = MockDatabase::new();
        let mut gateway = MockGateway::new();
        db.expect_fetch_campaign().times(0);
        db.expect_insert_donation().times(0);
        gateway.expect_fetch_payment().times(0);
        let mut body = donation_body(json!(500));
        body["razorpay_payment_id"] = json!(reference);
        let req = TestRequest::post().uri("/donations/donate").set_json(body);
        let (status, body) = send(req, configure(db, gateway)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{reference}");
        let fields = json(&body)["fields"].as_array().unwrap().iter().map(|f| f["field"].clone()).collect::<Vec<_>>();
        assert_eq!(fields, vec![json!("paymentReference")], "{reference}");
    }
}

#[actix_web::test]
async fn gateway_outage_is_a_bad_gateway() {
    let _ = env_logger::try_init().ok();
    let mut db = MockDatabase::new();
    let mut gateway = MockGateway::new();
    campaign_exists(&mut db);
    gateway.expect_fetch_payment().returning(|_| Err(PaymentGatewayError::Unavailable("connection reset".into())));
    db.expect_insert_donation().times(0);
    let req = TestRequest::post().uri("/donations/donate").set_json(donation_body(json!(500)));
    let (status, _) = send(req, configure(db, gateway)).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
}

#[actix_web::test]
async fn resubmitted_payment_replays_the_original_donation() {
    let _ = env_logger::try_init().ok();
    let mut db = MockDatabase::new();
    let mut gateway = MockGateway::new();
    campaign_exists(&mut db);
    gateway.expect_fetch_payment().returning(|_| Ok(captured_payment(500)));
    db.expect_insert_donation().returning(|_| Err(LedgerError::DuplicatePaymentReference("pay_1".into())));
    db.expect_fetch_donation_by_reference().returning(|_| Ok(Some(donation(7, "c1", 500, "pay_1"))));
    db.expect_increment_raised().times(0);
    let req = TestRequest::post().uri("/donations/donate").set_json(donation_body(json!(500)));
    let (status, body) = send(req, configure(db, gateway)).await;
    assert_eq!(status, StatusCode::OK);
    let body = json(&body);
    assert_eq!(body["duplicate"], true);
    assert_eq!(body["donation"]["id"], 7);
}

#[actix_web::test]
async fn reused_payment_reference_is_a_conflict() {
    let _ = env_logger::try_init().ok();
    let mut db = MockDatabase::new();
    let mut gateway = MockGateway::new();
    campaign_exists(&mut db);
    gateway.expect_fetch_payment().returning(|_| Ok(captured_payment(500)));
    db.expect_insert_donation().returning(|_| Err(LedgerError::DuplicatePaymentReference("pay_1".into())));
    db.expect_fetch_donation_by_reference().returning(|_| Ok(Some(donation(7, "other-campaign", 500, "pay_1"))));
    let req = TestRequest::post().uri("/donations/donate").set_json(donation_body(json!(500)));
    let (status, _) = send(req, configure(db, gateway)).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[actix_web::test]
async fn campaign_total_is_summed_from_the_ledger() {
    let _ = env_logger::try_init().ok();
    let mut db = MockDatabase::new();
    db.expect_sum_for_campaign()
        .withf(|id| id.as_str() == "c1")
        .returning(|_| Ok(Paise::from_major(500) + Paise::from_major(1500)));
    let (status, body) = send(TestRequest::get().uri("/donations/total/c1"), configure_totals(db)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json(&body), json!({"total": 2000}));
}

#[actix_web::test]
async fn campaign_without_donations_has_zero_total() {
    let _ = env_logger::try_init().ok();
    let mut db = MockDatabase::new();
    db.expect_sum_for_campaign().returning(|_| Ok(Paise::default()));
    let (status, body) = send(TestRequest::get().uri("/donations/total/nobody-gave"), configure_totals(db)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json(&body), json!({"total": 0}));
}

#[actix_web::test]
async fn campaign_donations_are_listed() {
    let _ = env_logger::try_init().ok();
    let mut db = MockDatabase::new();
    db.expect_fetch_donations_for_campaign()
        .withf(|id| id.as_str() == "c1")
        .returning(|_| Ok(vec![donation(2, "c1", 1500, "pay_2"), donation(1, "c1", 500, "pay_1")]));
    let (status, body) = send(TestRequest::get().uri("/donations/campaign/c1"), configure_totals(db)).await;
    assert_eq!(status, StatusCode::OK);
    let body = json(&body);
    assert_eq!(body.as_array().unwrap().len(), 2);
    assert_eq!(body[0]["id"], 2);
    assert_eq!(body[0]["amount"], 1500);
    assert_eq!(body[1]["paymentReference"], "pay_1");
}

fn configure(db: MockDatabase, gateway: MockGateway) -> impl FnOnce(&mut ServiceConfig) {
    move |cfg| {
        let api = DonationFlowApi::new(db, gateway, EventProducers::default());
        cfg.service(DonateRoute::<MockDatabase, MockGateway>::new()).app_data(web::Data::new(api));
    }
}

fn configure_totals(db: MockDatabase) -> impl FnOnce(&mut ServiceConfig) {
    move |cfg| {
        let api = AggregationApi::new(db);
        cfg.service(CampaignTotalRoute::<MockDatabase>::new())
            .service(CampaignDonationsRoute::<MockDatabase>::new())
            .app_data(web::Data::new(api));
    }
}
