use std::time::Duration;

use actix_web::{dev::Server, http::KeepAlive, middleware::Logger, web, App, HttpServer};
use log::*;
use provider_tools::razorpay::RazorpayApi;
use seva_engine::{events::EventProducers, AggregationApi, CampaignApi, DonationFlowApi, OrderApi, SqliteDatabase};

use crate::{
    auth::TokenVerifier,
    config::ServerConfig,
    errors::ServerError,
    integrations::{razorpay::RazorpayGateway, sms::create_sms_event_handlers},
    reconcile_worker::start_reconcile_worker,
    routes::{
        health,
        CampaignByIdRoute,
        CampaignDonationsRoute,
        CampaignTotalRoute,
        CampaignsRoute,
        CreateCampaignRoute,
        CreateOrderRoute,
        DonateRoute,
        MyCampaignsRoute,
        UpdateCampaignRoute,
    },
};

pub async fn run_server(config: ServerConfig) -> Result<(), ServerError> {
    let db = SqliteDatabase::new_with_url(&config.database_url, 25)
        .await
        .map_err(|e| ServerError::InitializeError(e.to_string()))?;
    db.run_migrations().await.map_err(|e| ServerError::InitializeError(e.to_string()))?;
    let razorpay = RazorpayApi::new(config.razorpay.clone()).map_err(|e| ServerError::InitializeError(e.to_string()))?;
    let gateway = RazorpayGateway::new(razorpay);
    let handlers = create_sms_event_handlers(config.twilio.clone(), config.sms_timeout)
        .map_err(|e| ServerError::InitializeError(e.to_string()))?;
    let producers = handlers.producers();
    handlers.start_handlers();
    if let Some(interval) = config.reconcile_interval {
        let _ = start_reconcile_worker(db.clone(), interval);
    }
    let srv = create_server_instance(config, db, gateway, producers)?;
    srv.await.map_err(|e| ServerError::Unspecified(e.to_string()))
}

pub fn create_server_instance(
    config: ServerConfig,
    db: SqliteDatabase,
    gateway: RazorpayGateway,
    producers: EventProducers,
) -> Result<Server, ServerError> {
    info!("💻️ Payment verification is {}", if config.verify_payments { "on" } else { "OFF" });
    let srv = HttpServer::new(move || {
        let order_api = OrderApi::new(gateway.clone())
            .with_timeout(config.gateway_timeout)
            .with_default_currency(config.default_currency.clone());
        let donation_api = DonationFlowApi::new(db.clone(), gateway.clone(), producers.clone())
            .with_payment_verification(config.verify_payments)
            .with_gateway_timeout(config.gateway_timeout)
            .with_currency(config.default_currency.clone());
        let aggregation_api = AggregationApi::new(db.clone());
        let campaign_api = CampaignApi::new(db.clone());
        let verifier = TokenVerifier::new(&config.jwt_secret);
        let api_scope = web::scope("/api")
            .service(CreateOrderRoute::<RazorpayGateway>::new())
            .service(DonateRoute::<SqliteDatabase, RazorpayGateway>::new())
            .service(CampaignTotalRoute::<SqliteDatabase>::new())
            .service(CampaignDonationsRoute::<SqliteDatabase>::new())
            .service(CampaignsRoute::<SqliteDatabase>::new())
            .service(CreateCampaignRoute::<SqliteDatabase>::new())
            // Must be registered ahead of /campaigns/{campaign_id}
            .service(MyCampaignsRoute::<SqliteDatabase>::new())
            .service(CampaignByIdRoute::<SqliteDatabase>::new())
            .service(UpdateCampaignRoute::<SqliteDatabase>::new());
        App::new()
            .wrap(Logger::new("%t (%D ms) %s %a %{Host}i %U").log_target("seva::access_log"))
            .app_data(json_config())
            .app_data(query_config())
            .app_data(web::Data::new(order_api))
            .app_data(web::Data::new(donation_api))
            .app_data(web::Data::new(aggregation_api))
            .app_data(web::Data::new(campaign_api))
            .app_data(web::Data::new(verifier))
            .service(health)
            .service(api_scope)
    })
    .keep_alive(KeepAlive::Timeout(Duration::from_secs(600)))
    .bind((config.host.as_str(), config.port))?
    .run();
    Ok(srv)
}

/// Malformed JSON bodies get the same JSON error shape as every other failure.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| ServerError::InvalidRequestBody(err.to_string()).into())
}

pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req| ServerError::InvalidRequestPath(err.to_string()).into())
}
