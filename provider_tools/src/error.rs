use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum ProviderApiError {
    #[error("Could not initialize client: {0}")]
    Initialization(String),
    #[error("Could not reach the provider: {0}")]
    RestRequestError(String),
    #[error("Invalid REST response: {0}")]
    RestResponseError(String),
    #[error("Could not deserialize JSON: {0}")]
    JsonError(String),
    #[error("Query failed. Error {status}. {message}")]
    QueryError { status: u16, message: String },
}

impl ProviderApiError {
    /// True for failures where the provider could not be reached or did not answer in time.
    pub fn is_transport_error(&self) -> bool {
        matches!(self, ProviderApiError::RestRequestError(_))
    }

    /// The HTTP status the provider answered with, if it got that far.
    pub fn status(&self) -> Option<u16> {
        match self {
            ProviderApiError::QueryError { status, .. } => Some(*status),
            _ => None,
        }
    }
}
