use std::fmt::Debug;

use log::*;
use pos_common::Secret;

use crate::{
    db_types::{NewRestaurant, Restaurant},
    helpers::token_digest,
    pos_api::errors::RestaurantApiError,
    traits::{PaymentsGateway, RestaurantManagement},
};

/// The authenticated context for a request: the restaurant the token belongs to, and the token itself, which is
/// needed again for every call made to the payments platform on the restaurant's behalf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MerchantSession {
    pub restaurant: Restaurant,
    pub access_token: Secret<String>,
}

/// `RestaurantApi` is the restaurant directory. It maps access tokens to restaurants, provisioning a restaurant the
/// first time a token is seen.
pub struct RestaurantApi<B, G> {
    db: B,
    gateway: G,
}

impl<B, G> Debug for RestaurantApi<B, G> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "RestaurantApi")
    }
}

impl<B: Clone, G: Clone> Clone for RestaurantApi<B, G> {
    fn clone(&self) -> Self {
        Self { db: self.db.clone(), gateway: self.gateway.clone() }
    }
}

impl<B, G> RestaurantApi<B, G> {
    pub fn new(db: B, gateway: G) -> Self {
        Self { db, gateway }
    }
}

impl<B, G> RestaurantApi<B, G>
where
    B: RestaurantManagement,
    G: PaymentsGateway,
{
    /// Resolves an access token to a merchant session.
    ///
    /// The payments platform is asked to identify the merchant on every call, so a revoked token stops working
    /// immediately even if its restaurant is already known. A restaurant is created from the merchant id and its first
    /// location the first time a token is seen.
    pub async fn resolve(&self, token: &Secret<String>) -> Result<MerchantSession, RestaurantApiError> {
        if token.is_blank() {
            return Err(RestaurantApiError::NotAuthenticated);
        }
        let identity = self.gateway.resolve_merchant(token).await.map_err(|e| {
            warn!("🔑️ Could not resolve merchant for access token. {e}");
            RestaurantApiError::UpstreamUnavailable(e.to_string())
        })?;
        let digest = token_digest(token);
        let restaurant = match self.db.fetch_restaurant_by_token_hash(&digest).await? {
            Some(r) => {
                trace!("🔑️ Token belongs to restaurant #{}", r.id);
                r
            },
            None => {
                let location_id = identity.location_ids.first().cloned().ok_or_else(|| {
                    warn!("🔑️ Merchant {} has no locations", identity.merchant_id);
                    RestaurantApiError::UpstreamUnavailable(format!(
                        "Merchant {} has no locations",
                        identity.merchant_id
                    ))
                })?;
                let new_restaurant = NewRestaurant::new(digest, identity.merchant_id, location_id);
                let r = self.db.fetch_or_create_restaurant(new_restaurant).await?;
                info!("🔑️ Restaurant #{} ({}) resolved for location {}", r.id, r.name, r.location_id);
                r
            },
        };
        Ok(MerchantSession { restaurant, access_token: token.clone() })
    }
}
