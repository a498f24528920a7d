use thiserror::Error;

use crate::{
    db_types::CampaignId,
    seva_api::validation::ValidationErrors,
    traits::{CampaignStoreError, LedgerError},
};

#[derive(Debug, Clone, Error)]
pub enum OrderError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Invalid currency code: {0}")]
    InvalidCurrency(String),
    #[error("Order creation failed. {0}")]
    OrderCreationFailed(String),
}

#[derive(Debug, Clone, Error)]
pub enum DonationError {
    #[error("{0}")]
    Validation(ValidationErrors),
    #[error("Campaign {0} does not exist")]
    CampaignNotFound(CampaignId),
    #[error("Payment could not be verified. {0}")]
    PaymentVerificationFailed(String),
    #[error("The payment gateway is unavailable. {0}")]
    GatewayUnavailable(String),
    #[error("Payment reference {0} has already been used for a different donation")]
    PaymentReferenceConflict(String),
    #[error("The donation could not be saved. {0}")]
    Persistence(String),
}

impl From<ValidationErrors> for DonationError {
    fn from(e: ValidationErrors) -> Self {
        Self::Validation(e)
    }
}

impl From<CampaignStoreError> for DonationError {
    fn from(e: CampaignStoreError) -> Self {
        match e {
            CampaignStoreError::CampaignNotFound(id) => Self::CampaignNotFound(id),
            e => Self::Persistence(e.to_string()),
        }
    }
}

impl From<LedgerError> for DonationError {
    fn from(e: LedgerError) -> Self {
        match e {
            LedgerError::UnknownCampaign(id) => Self::CampaignNotFound(id),
            LedgerError::DuplicatePaymentReference(r) => Self::PaymentReferenceConflict(r),
            LedgerError::DatabaseError(s) => Self::Persistence(s),
        }
    }
}

#[derive(Debug, Clone, Error)]
pub enum AggregationError {
    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl From<LedgerError> for AggregationError {
    fn from(e: LedgerError) -> Self {
        Self::DatabaseError(e.to_string())
    }
}

impl From<CampaignStoreError> for AggregationError {
    fn from(e: CampaignStoreError) -> Self {
        Self::DatabaseError(e.to_string())
    }
}

#[derive(Debug, Clone, Error)]
pub enum CampaignError {
    #[error("{0}")]
    Validation(ValidationErrors),
    #[error("Campaign {0} does not exist")]
    NotFound(CampaignId),
    #[error("Only the owner of campaign {0} may edit it")]
    NotOwner(CampaignId),
    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl From<ValidationErrors> for CampaignError {
    fn from(e: ValidationErrors) -> Self {
        Self::Validation(e)
    }
}

impl From<CampaignStoreError> for CampaignError {
    fn from(e: CampaignStoreError) -> Self {
        match e {
            CampaignStoreError::CampaignNotFound(id) => Self::NotFound(id),
            e => Self::DatabaseError(e.to_string()),
        }
    }
}
