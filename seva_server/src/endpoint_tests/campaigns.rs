use actix_web::{http::StatusCode, test::TestRequest, web, web::ServiceConfig};
use chrono::Utc;
use seva_common::Paise;
use seva_engine::{db_types::CampaignId, AggregationApi, CampaignApi};
use serde_json::json;

use super::{
    helpers::{campaign, issue_token, json, send},
    mocks::MockDatabase,
};
use crate::routes::{CampaignByIdRoute, CampaignsRoute, CreateCampaignRoute, MyCampaignsRoute, UpdateCampaignRoute};

fn bearer(user_id: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {}", issue_token(user_id)))
}

#[actix_web::test]
async fn campaign_listing_carries_ledger_totals() {
    let _ = env_logger::try_init().ok();
    let mut db = MockDatabase::new();
    db.expect_search_campaigns().times(1).returning(|_| Ok(vec![campaign("c1", "owner-1"), campaign("c2", "owner-2")]));
    db.expect_sums_for_campaigns()
        .withf(|ids| ids.len() == 2)
        .returning(|_| Ok(vec![(CampaignId::from("c1"), Paise::from_major(500) + Paise::from_major(1500))]));
    let (status, body) = send(TestRequest::get().uri("/campaigns"), configure_reads(db)).await;
    assert_eq!(status, StatusCode::OK);
    let body = json(&body);
    assert_eq!(body[0]["id"], "c1");
    assert_eq!(body[0]["goal"], 100_000);
    assert_eq!(body[0]["totalAmount"], 2000);
    assert_eq!(body[0]["raised"], 2000);
    assert_eq!(body[1]["id"], "c2");
    assert_eq!(body[1]["totalAmount"], 0);
}

#[actix_web::test]
async fn campaign_listing_filters() {
    let _ = env_logger::try_init().ok();
    let mut db = MockDatabase::new();
    db.expect_search_campaigns()
        .withf(|q| q.search.as_deref() == Some("knee") && q.created_by.as_deref() == Some("owner-1"))
        .times(1)
        .returning(|_| Ok(vec![]));
    let req = TestRequest::get().uri("/campaigns?search=knee&createdBy=owner-1");
    let (status, body) = send(req, configure_reads(db)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "[]");
}

#[actix_web::test]
async fn unknown_query_parameters_are_rejected() {
    let _ = env_logger::try_init().ok();
    let db = MockDatabase::new();
    let (status, _) = send(TestRequest::get().uri("/campaigns?colour=blue"), configure_reads(db)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn campaign_detail() {
    let _ = env_logger::try_init().ok();
    let mut db = MockDatabase::new();
    db.expect_fetch_campaign().returning(|id| Ok(Some(campaign(id.as_str(), "owner-1"))));
    db.expect_sum_for_campaign().returning(|_| Ok(Paise::from_major(750)));
    let (status, body) = send(TestRequest::get().uri("/campaigns/c9"), configure_reads(db)).await;
    assert_eq!(status, StatusCode::OK);
    let body = json(&body);
    assert_eq!(body["id"], "c9");
    assert_eq!(body["totalAmount"], 750);
    assert_eq!(body["beneficiaryName"], "Ravi Kumar");
}

#[actix_web::test]
async fn missing_campaign_is_not_found() {
    let _ = env_logger::try_init().ok();
    let mut db = MockDatabase::new();
    db.expect_fetch_campaign().returning(|_| Ok(None));
    let (status, body) = send(TestRequest::get().uri("/campaigns/nope"), configure_reads(db)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(json(&body)["error"].as_str().unwrap().contains("nope"));
}

#[actix_web::test]
async fn my_campaigns_requires_a_token() {
    let _ = env_logger::try_init().ok();
    let db = MockDatabase::new();
    let (status, body) = send(TestRequest::get().uri("/campaigns/my-campaigns"), configure_reads(db)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(json(&body)["error"].as_str().unwrap().contains("bearer token"));
}

#[actix_web::test]
async fn my_campaigns_rejects_forged_tokens() {
    let _ = env_logger::try_init().ok();
    let db = MockDatabase::new();
    let mut token = issue_token("owner-1");
    let n = token.len();
    token.replace_range(n - 6..n - 1, "AAAAA");
    let req = TestRequest::get().uri("/campaigns/my-campaigns").insert_header(("Authorization", format!("Bearer {token}")));
    let (status, _) = send(req, configure_reads(db)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn my_campaigns_lists_only_the_callers_campaigns() {
    let _ = env_logger::try_init().ok();
    let mut db = MockDatabase::new();
    db.expect_search_campaigns()
        .withf(|q| q.created_by.as_deref() == Some("owner-1"))
        .times(1)
        .returning(|_| Ok(vec![campaign("c1", "owner-1")]));
    db.expect_sums_for_campaigns().returning(|_| Ok(vec![]));
    let req = TestRequest::get().uri("/campaigns/my-campaigns").insert_header(bearer("owner-1"));
    let (status, body) = send(req, configure_reads(db)).await;
    assert_eq!(status, StatusCode::OK);
    let body = json(&body);
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["createdBy"], "owner-1");
}

fn new_campaign_body() -> serde_json::Value {
    json!({
        "title": "Help Ravi walk again",
        "description": "Knee surgery",
        "goal": 100000,
        "organizer": "Meera Nair",
        "beneficiaryName": "Ravi Kumar",
        "medicalCondition": "Torn ACL",
        "email": "meera@example.com",
        "phone": "+919876543210",
        "story": "Ravi is a delivery rider."
    })
}

#[actix_web::test]
async fn create_campaign() {
    let _ = env_logger::try_init().ok();
    let mut db = MockDatabase::new();
    db.expect_insert_campaign()
        .withf(|c| c.created_by == "owner-1" && c.goal == Paise::from_major(100_000))
        .times(1)
        .returning(|c| {
            let mut stored = campaign(c.campaign_id.as_str(), &c.created_by);
            stored.title = c.title;
            stored.created_at = Utc::now();
            Ok(stored)
        });
    let req = TestRequest::post().uri("/campaigns").insert_header(bearer("owner-1")).set_json(new_campaign_body());
    let (status, body) = send(req, configure_writes(db)).await;
    assert_eq!(status, StatusCode::CREATED);
    let body = json(&body);
    assert_eq!(body["createdBy"], "owner-1");
    assert_eq!(body["raised"], 0);
}

#[actix_web::test]
async fn create_campaign_requires_a_token() {
    let _ = env_logger::try_init().ok();
    let db = MockDatabase::new();
    let req = TestRequest::post().uri("/campaigns").set_json(new_campaign_body());
    let (status, _) = send(req, configure_writes(db)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn create_campaign_validates_fields() {
    let _ = env_logger::try_init().ok();
    let db = MockDatabase::new();
    let req = TestRequest::post()
        .uri("/campaigns")
        .insert_header(bearer("owner-1"))
        .set_json(json!({"title": "Help Ravi", "goal": -1}));
    let (status, body) = send(req, configure_writes(db)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let fields = json(&body)["fields"].as_array().unwrap().len();
    assert!(fields >= 2);
}

#[actix_web::test]
async fn owner_can_update_campaign() {
    let _ = env_logger::try_init().ok();
    let mut db = MockDatabase::new();
    db.expect_fetch_campaign().returning(|id| Ok(Some(campaign(id.as_str(), "owner-1"))));
    db.expect_update_campaign()
        .withf(|id, update| id.as_str() == "c1" && update.title.as_deref() == Some("Ravi's surgery fund"))
        .times(1)
        .returning(|id, update| {
            let mut c = campaign(id.as_str(), "owner-1");
            c.title = update.title.unwrap_or_default();
            Ok(Some(c))
        });
    let req = TestRequest::put()
        .uri("/campaigns/c1")
        .insert_header(bearer("owner-1"))
        .set_json(json!({"title": "Ravi's surgery fund"}));
    let (status, body) = send(req, configure_writes(db)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json(&body)["title"], "Ravi's surgery fund");
}

#[actix_web::test]
async fn only_the_owner_can_update_a_campaign() {
    let _ = env_logger::try_init().ok();
    let mut db = MockDatabase::new();
    db.expect_fetch_campaign().returning(|id| Ok(Some(campaign(id.as_str(), "owner-1"))));
    db.expect_update_campaign().times(0);
    let req = TestRequest::put().uri("/campaigns/c1").insert_header(bearer("intruder")).set_json(json!({"goal": 1}));
    let (status, _) = send(req, configure_writes(db)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn updating_a_missing_campaign_is_not_found() {
    let _ = env_logger::try_init().ok();
    let mut db = MockDatabase::new();
    db.expect_fetch_campaign().returning(|_| Ok(None));
    let req = TestRequest::put().uri("/campaigns/c1").insert_header(bearer("owner-1")).set_json(json!({"goal": 1}));
    let (status, _) = send(req, configure_writes(db)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

fn configure_reads(db: MockDatabase) -> impl FnOnce(&mut ServiceConfig) {
    move |cfg| {
        cfg.service(CampaignsRoute::<MockDatabase>::new())
            .service(MyCampaignsRoute::<MockDatabase>::new())
            .service(CampaignByIdRoute::<MockDatabase>::new())
            .app_data(web::Data::new(AggregationApi::new(db)));
    }
}

fn configure_writes(db: MockDatabase) -> impl FnOnce(&mut ServiceConfig) {
    move |cfg| {
        cfg.service(CreateCampaignRoute::<MockDatabase>::new())
            .service(UpdateCampaignRoute::<MockDatabase>::new())
            .app_data(web::Data::new(CampaignApi::new(db)));
    }
}
