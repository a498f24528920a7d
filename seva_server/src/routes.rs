//! Request handler definitions
//!
//! Define each route and its handler here. Handlers stay thin: they unpack the request, call one engine API and shape
//! the response. Anything longer belongs in the engine.
//!
//! Handlers must not block the worker thread. Every storage and gateway call is a future, so await it rather than
//! reaching for a blocking client.
use actix_web::{get, web, HttpResponse, Responder};
use log::*;
use seva_engine::{
    campaign_objects::{CampaignQueryFilter, CampaignUpdateRequest, NewCampaignRequest},
    db_types::CampaignId,
    donation_objects::DonationRequest,
    order_objects::NewOrderRequest,
    traits::{CampaignManagement, PaymentGateway, SevaDatabase},
    AggregationApi,
    CampaignApi,
    DonationFlowApi,
    OrderApi,
};

use crate::{
    auth::OwnerClaims,
    data_objects::{DonationResponse, TotalResponse},
    errors::ServerError,
};

// Web-actix cannot handle generics in handlers, so it's implemented manually using the `route!` macro.
// Each bound becomes one type parameter of the route, named `T{Bound}`, in the order given.
#[macro_export]
macro_rules! route {
    ($name:ident => $method:ident $path:literal) => {
        paste::paste! { pub struct [<$name:camel Route>];}
        paste::paste! {
            impl [<$name:camel Route>] {
                #[allow(clippy::new_without_default)]
                pub fn new() -> Self { Self }
            }
        }
        paste::paste! {
            impl actix_web::dev::HttpServiceFactory for [<$name:camel Route>] {
                fn register(self, config: &mut actix_web::dev::AppService) {
                    let res = actix_web::Resource::new($path)
                        .name(stringify!($name))
                        .guard(actix_web::guard::$method())
                        .to($name);
                    actix_web::dev::HttpServiceFactory::register(res, config);
                }
            }
        }
    };

    ($name:ident => $method:ident $path:literal impl $($bounds:ident),+) => {
        paste::paste! { pub struct [<$name:camel Route>]< $( [< T $bounds:camel> ],)+ >( $( core::marker::PhantomData<fn() -> [< T $bounds:camel> ] >,)+ );}
        paste::paste! { impl< $( [< T $bounds:camel> ],)+ > [<$name:camel Route>]< $( [< T $bounds:camel> ],)+ > {
            #[allow(clippy::new_without_default)]
            pub fn new() -> Self {
                Self($( core::marker::PhantomData::<fn() -> [< T $bounds:camel> ] >,)+)
            }
        }}
        paste::paste! { impl<$( [< T $bounds:camel >] , )+> actix_web::dev::HttpServiceFactory for [<$name:camel Route>]<$([<T $bounds:camel>],)+>
        where
            $([<T $bounds:camel>]: $bounds + 'static,)+
        {
            fn register(self, config: &mut actix_web::dev::AppService) {
                let res = actix_web::Resource::new($path)
                    .name(stringify!($name))
                    .guard(actix_web::guard::$method())
                    .to($name::< $( [< T $bounds:camel >], )+>);
                actix_web::dev::HttpServiceFactory::register(res, config);
            }
        }}
    };
}

// ----------------------------------------------   Health  ----------------------------------------------------
#[get("/health")]
pub async fn health() -> impl Responder {
    trace!("💻️ Received health check request");
    HttpResponse::Ok().body("👍️\n")
}

//----------------------------------------------   Payments  ----------------------------------------------------
route!(create_order => Post "/payment/create-order" impl PaymentGateway);
/// Opens a payment order with the gateway. The body is `{"amount": 250, "currency": "INR"}`, with the amount in
/// rupees and the currency optional. The gateway's order object is returned unchanged under `order`.
pub async fn create_order<G: PaymentGateway>(
    body: web::Json<NewOrderRequest>,
    api: web::Data<OrderApi<G>>,
) -> Result<HttpResponse, ServerError> {
    trace!("💻️ Received create order request: {body:?}");
    let ack = api.create_order(body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ack))
}

//----------------------------------------------   Donations  ----------------------------------------------------
route!(donate => Post "/donations/donate" impl SevaDatabase, PaymentGateway);
/// Records a donation once the donor's payment has gone through. Responds with 201 for a new donation and 200 when
/// the same payment is submitted again.
pub async fn donate<B, G>(
    body: web::Json<DonationRequest>,
    api: web::Data<DonationFlowApi<B, G>>,
) -> Result<HttpResponse, ServerError>
where
    B: SevaDatabase,
    G: PaymentGateway,
{
    let request = body.into_inner();
    debug!("💻️ Received donation of {:?} for campaign {:?}", request.amount, request.campaign_id);
    let receipt = api.record_donation(request).await?;
    let response = DonationResponse::from(receipt);
    if response.duplicate {
        Ok(HttpResponse::Ok().json(response))
    } else {
        Ok(HttpResponse::Created().json(response))
    }
}

route!(campaign_total => Get "/donations/total/{campaign_id}" impl SevaDatabase);
pub async fn campaign_total<B: SevaDatabase>(
    path: web::Path<String>,
    api: web::Data<AggregationApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let campaign_id = CampaignId::from(path.into_inner());
    trace!("💻️ Fetching total for campaign {campaign_id}");
    let total = api.total_for_campaign(&campaign_id).await?;
    Ok(HttpResponse::Ok().json(TotalResponse { total }))
}

route!(campaign_donations => Get "/donations/campaign/{campaign_id}" impl SevaDatabase);
pub async fn campaign_donations<B: SevaDatabase>(
    path: web::Path<String>,
    api: web::Data<AggregationApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let campaign_id = CampaignId::from(path.into_inner());
    trace!("💻️ Fetching donations for campaign {campaign_id}");
    let donations = api.donations_for_campaign(&campaign_id).await?;
    Ok(HttpResponse::Ok().json(donations))
}

//----------------------------------------------   Campaigns  ----------------------------------------------------
route!(campaigns => Get "/campaigns" impl SevaDatabase);
/// Lists campaigns, newest first, each with its `totalAmount`. Optional query parameters: `search`, `createdBy`,
/// `since` and `until` (RFC 3339 timestamps).
pub async fn campaigns<B: SevaDatabase>(
    query: web::Query<CampaignQueryFilter>,
    api: web::Data<AggregationApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let query = query.into_inner();
    trace!("💻️ Listing campaigns. {query:?}");
    let campaigns = api.campaigns_with_totals(query).await?;
    Ok(HttpResponse::Ok().json(campaigns))
}

route!(my_campaigns => Get "/campaigns/my-campaigns" impl SevaDatabase);
pub async fn my_campaigns<B: SevaDatabase>(
    claims: OwnerClaims,
    api: web::Data<AggregationApi<B>>,
) -> Result<HttpResponse, ServerError> {
    trace!("💻️ Listing campaigns for {}", claims.id);
    let query = CampaignQueryFilter::default().with_owner(claims.id);
    let campaigns = api.campaigns_with_totals(query).await?;
    Ok(HttpResponse::Ok().json(campaigns))
}

route!(campaign_by_id => Get "/campaigns/{campaign_id}" impl SevaDatabase);
pub async fn campaign_by_id<B: SevaDatabase>(
    path: web::Path<String>,
    api: web::Data<AggregationApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let campaign_id = CampaignId::from(path.into_inner());
    let campaign = api
        .campaign_with_total(&campaign_id)
        .await?
        .ok_or_else(|| ServerError::NoRecordFound(format!("Campaign {campaign_id} does not exist")))?;
    Ok(HttpResponse::Ok().json(campaign))
}

route!(create_campaign => Post "/campaigns" impl CampaignManagement);
pub async fn create_campaign<B: CampaignManagement>(
    claims: OwnerClaims,
    body: web::Json<NewCampaignRequest>,
    api: web::Data<CampaignApi<B>>,
) -> Result<HttpResponse, ServerError> {
    debug!("💻️ User {} is creating a campaign", claims.id);
    let campaign = api.create_campaign(&claims.id, body.into_inner()).await?;
    Ok(HttpResponse::Created().json(campaign))
}

route!(update_campaign => Put "/campaigns/{campaign_id}" impl CampaignManagement);
pub async fn update_campaign<B: CampaignManagement>(
    claims: OwnerClaims,
    path: web::Path<String>,
    body: web::Json<CampaignUpdateRequest>,
    api: web::Data<CampaignApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let campaign_id = CampaignId::from(path.into_inner());
    debug!("💻️ User {} is editing campaign {campaign_id}", claims.id);
    let campaign = api.update_campaign(&claims.id, &campaign_id, body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(campaign))
}
