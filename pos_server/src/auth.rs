//! Merchant authentication.
//!
//! Callers authenticate with their Square access token in the `Authorization` header, either bare or as
//! `Bearer <token>`. [`MerchantAuthFactory`](crate::middleware::MerchantAuthFactory) resolves the token to a
//! [`MerchantSession`] once per request and stores it in the request extensions, where handlers pick it up with the
//! [`AuthenticatedMerchant`] extractor.
use actix_web::{dev::Payload, http::header::AUTHORIZATION, FromRequest, HttpMessage, HttpRequest};
use futures::future::{ready, Ready};
use log::*;
use pos_common::{helpers::strip_bearer_prefix, Secret};
use pos_engine::MerchantSession;

use crate::errors::ServerError;

/// Reads the access token from the `Authorization` header. Missing, unreadable and blank headers all yield `None`.
pub fn access_token_from_request(req: &HttpRequest) -> Option<Secret<String>> {
    let value = req.headers().get(AUTHORIZATION)?.to_str().ok()?;
    let token = strip_bearer_prefix(value);
    if token.is_empty() {
        return None;
    }
    Some(Secret::new(token.to_string()))
}

/// The merchant making the current request.
#[derive(Debug, Clone)]
pub struct AuthenticatedMerchant(pub MerchantSession);

impl AuthenticatedMerchant {
    pub fn session(&self) -> &MerchantSession {
        &self.0
    }
}

impl FromRequest for AuthenticatedMerchant {
    type Error = ServerError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let session = req.extensions().get::<MerchantSession>().cloned();
        let result = session.map(AuthenticatedMerchant).ok_or_else(|| {
            warn!("🔑️ No merchant session found for {}. Is the route behind the auth middleware?", req.path());
            ServerError::AuthenticationError("No merchant session for this request".to_string())
        });
        ready(result)
    }
}
