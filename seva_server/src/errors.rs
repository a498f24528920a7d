use actix_web::{
    error::ResponseError,
    http::{header::ContentType, StatusCode},
    HttpResponse,
};
use log::error;
use seva_engine::{validation::ValidationErrors, AggregationError, CampaignError, DonationError, OrderError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Could not initialize server. {0}")]
    InitializeError(String),
    #[error("An error occurred on the backend of the server. {0}")]
    BackendError(String),
    #[error("Could not read request body: {0}")]
    InvalidRequestBody(String),
    #[error("Could not read request path: {0}")]
    InvalidRequestPath(String),
    #[error("{0}")]
    ValidationError(ValidationErrors),
    #[error("The data was not found. {0}")]
    NoRecordFound(String),
    #[error("{0}")]
    PaymentVerificationFailed(String),
    #[error("{0}")]
    Conflict(String),
    #[error("Payment gateway error. {0}")]
    GatewayError(String),
    #[error("An I/O error happened in the server. {0}")]
    IOError(#[from] std::io::Error),
    #[error("Invalid server configuration. {0}")]
    ConfigurationError(String),
    #[error("Authentication Error. {0}")]
    AuthenticationError(#[from] AuthError),
    #[error("Insufficient Permissions. {0}")]
    InsufficientPermissions(String),
    #[error("UnspecifiedError. {0}")]
    Unspecified(String),
}

impl ResponseError for ServerError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequestBody(_) => StatusCode::BAD_REQUEST,
            Self::InvalidRequestPath(_) => StatusCode::BAD_REQUEST,
            Self::ValidationError(_) => StatusCode::BAD_REQUEST,
            Self::AuthenticationError(_) => StatusCode::UNAUTHORIZED,
            Self::PaymentVerificationFailed(_) => StatusCode::PAYMENT_REQUIRED,
            Self::InsufficientPermissions(_) => StatusCode::FORBIDDEN,
            Self::NoRecordFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::GatewayError(_) => StatusCode::BAD_GATEWAY,
            Self::InitializeError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::BackendError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::IOError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::ConfigurationError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Unspecified(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            Self::ValidationError(fields) => serde_json::json!({ "error": self.to_string(), "fields": fields }),
            _ => serde_json::json!({ "error": self.to_string() }),
        };
        HttpResponse::build(self.status_code()).insert_header(ContentType::json()).body(body.to_string())
    }
}

#[derive(Debug, Clone, Error)]
pub enum AuthError {
    #[error("No bearer token was provided.")]
    MissingToken,
    #[error("The bearer token is not valid. {0}")]
    InvalidToken(String),
    #[error("The token verifier has not been configured.")]
    VerifierNotConfigured,
}

impl From<OrderError> for ServerError {
    fn from(e: OrderError) -> Self {
        match e {
            OrderError::InvalidAmount(msg) => Self::ValidationError(single_field_error("amount", msg)),
            OrderError::InvalidCurrency(code) => {
                Self::ValidationError(single_field_error("currency", format!("'{code}' is not a currency code")))
            },
            OrderError::OrderCreationFailed(_) => Self::GatewayError(e.to_string()),
        }
    }
}

fn single_field_error<S: Into<String>>(field: &str, message: S) -> ValidationErrors {
    let mut errors = ValidationErrors::default();
    errors.add(field, message);
    errors
}

impl From<DonationError> for ServerError {
    fn from(e: DonationError) -> Self {
        match e {
            DonationError::Validation(fields) => Self::ValidationError(fields),
            DonationError::CampaignNotFound(_) => Self::NoRecordFound(e.to_string()),
            DonationError::PaymentVerificationFailed(_) => Self::PaymentVerificationFailed(e.to_string()),
            DonationError::GatewayUnavailable(_) => Self::GatewayError(e.to_string()),
            DonationError::PaymentReferenceConflict(_) => Self::Conflict(e.to_string()),
            DonationError::Persistence(_) => {
                error!("💻️ Donation could not be persisted. {e}");
                Self::BackendError(e.to_string())
            },
        }
    }
}

impl From<AggregationError> for ServerError {
    fn from(e: AggregationError) -> Self {
        Self::BackendError(e.to_string())
    }
}

impl From<CampaignError> for ServerError {
    fn from(e: CampaignError) -> Self {
        match e {
            CampaignError::Validation(fields) => Self::ValidationError(fields),
            CampaignError::NotFound(_) => Self::NoRecordFound(e.to_string()),
            CampaignError::NotOwner(_) => Self::InsufficientPermissions(e.to_string()),
            CampaignError::DatabaseError(_) => Self::BackendError(e.to_string()),
        }
    }
}
