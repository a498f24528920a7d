//! Bearer token authentication for the campaign owner endpoints.
//!
//! Tokens are issued by the user-facing auth service (not this server) as HS256 JWTs. The only claim we care about is
//! the user id, which becomes the owner of any campaign the user creates.
use actix_web::{dev::Payload, http::header::AUTHORIZATION, web, FromRequest, HttpRequest};
use futures::future::{ready, Ready};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use log::*;
use serde::{Deserialize, Serialize};
use seva_common::Secret;

use crate::errors::{AuthError, ServerError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnerClaims {
    /// The user id of the caller
    #[serde(alias = "sub")]
    pub id: String,
    pub exp: u64,
}

pub struct TokenVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl TokenVerifier {
    pub fn new(secret: &Secret<String>) -> Self {
        let key = DecodingKey::from_secret(secret.reveal().as_bytes());
        let validation = Validation::new(Algorithm::HS256);
        Self { key, validation }
    }

    pub fn verify(&self, token: &str) -> Result<OwnerClaims, AuthError> {
        decode::<OwnerClaims>(token, &self.key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| AuthError::InvalidToken(e.to_string()))
    }
}

fn bearer_token(req: &HttpRequest) -> Result<&str, AuthError> {
    let header = req.headers().get(AUTHORIZATION).ok_or(AuthError::MissingToken)?;
    let value = header.to_str().map_err(|e| AuthError::InvalidToken(e.to_string()))?;
    value
        .strip_prefix("Bearer ")
        .or_else(|| value.strip_prefix("bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or(AuthError::MissingToken)
}

fn claims_from_request(req: &HttpRequest) -> Result<OwnerClaims, AuthError> {
    let verifier = req.app_data::<web::Data<TokenVerifier>>().ok_or(AuthError::VerifierNotConfigured)?;
    let token = bearer_token(req)?;
    let claims = verifier.verify(token)?;
    trace!("💻️ Bearer token accepted for user {}", claims.id);
    Ok(claims)
}

impl FromRequest for OwnerClaims {
    type Error = ServerError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let result = claims_from_request(req).map_err(|e| {
            debug!("💻️ Rejecting unauthenticated request to {}. {e}", req.path());
            match e {
                AuthError::VerifierNotConfigured => ServerError::ConfigurationError(e.to_string()),
                e => ServerError::AuthenticationError(e),
            }
        });
        ready(result)
    }
}
