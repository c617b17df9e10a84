use std::sync::Arc;

use log::*;
use pos_common::Secret;
use reqwest::{
    header::{HeaderMap, HeaderValue},
    Client,
    Method,
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::{
    config::SquareConfig,
    data_objects::{Location, SquareErrorResponse, TokenStatus},
    CreateOrderRequest,
    CreatePaymentRequest,
    SquareApiError,
    SquareOrder,
    SquarePayment,
};

#[derive(Clone)]
pub struct SquareApi {
    config: SquareConfig,
    client: Arc<Client>,
}

impl SquareApi {
    pub fn new(config: SquareConfig) -> Result<Self, SquareApiError> {
        let mut headers = HeaderMap::with_capacity(2);
        let version = HeaderValue::from_str(config.api_version.as_str())
            .map_err(|e| SquareApiError::Initialization(e.to_string()))?;
        headers.insert("Square-Version", version);
        headers.insert("Content-Type", HeaderValue::from_static("application/json"));
        let client = Client::builder()
            .default_headers(headers)
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| SquareApiError::Initialization(e.to_string()))?;
        Ok(Self { config, client: Arc::new(client) })
    }

    pub fn config(&self) -> &SquareConfig {
        &self.config
    }

    pub fn currency(&self) -> &str {
        self.config.currency.as_str()
    }

    /// Sends a request on behalf of the merchant that owns `token`.
    pub async fn rest_query<T: DeserializeOwned, B: Serialize>(
        &self,
        method: Method,
        path: &str,
        token: &Secret<String>,
        body: Option<B>,
    ) -> Result<T, SquareApiError> {
        if token.is_blank() {
            return Err(SquareApiError::MissingAccessToken);
        }
        let url = self.url(path);
        trace!("Sending REST query: {method} {url}");
        let mut req = self.client.request(method, url).bearer_auth(token.reveal());
        if let Some(body) = body {
            req = req.json(&body);
        }
        let response = req.send().await.map_err(|e| SquareApiError::RestRequestError(e.to_string()))?;
        let status = response.status();
        if status.is_success() {
            trace!("REST query successful. {status}");
            response.json::<T>().await.map_err(|e| SquareApiError::JsonError(e.to_string()))
        } else {
            let status = status.as_u16();
            let text = response.text().await.map_err(|e| SquareApiError::RestResponseError(e.to_string()))?;
            let message = match serde_json::from_str::<SquareErrorResponse>(&text) {
                Ok(errors) if !errors.errors.is_empty() => errors.summary(),
                _ => text,
            };
            debug!("REST query failed with status {status}: {message}");
            Err(SquareApiError::QueryError { status, message })
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.config.base_url)
    }

    /// Asks Square which merchant (if any) the access token belongs to.
    pub async fn retrieve_token_status(&self, token: &Secret<String>) -> Result<TokenStatus, SquareApiError> {
        debug!("Retrieving access token status");
        let status = self.rest_query::<TokenStatus, ()>(Method::POST, "/oauth2/token/status", token, None).await?;
        trace!("Token status: merchant {:?}, expires {:?}", status.merchant_id, status.expires_at);
        Ok(status)
    }

    pub async fn list_locations(&self, token: &Secret<String>) -> Result<Vec<Location>, SquareApiError> {
        #[derive(Deserialize)]
        struct LocationsResponse {
            #[serde(default)]
            locations: Vec<Location>,
        }
        debug!("Fetching merchant locations");
        let result = self.rest_query::<LocationsResponse, ()>(Method::GET, "/v2/locations", token, None).await?;
        debug!("Fetched {} locations", result.locations.len());
        Ok(result.locations)
    }

    pub async fn create_order(
        &self,
        token: &Secret<String>,
        request: CreateOrderRequest,
    ) -> Result<SquareOrder, SquareApiError> {
        #[derive(Deserialize)]
        struct OrderResponse {
            order: Option<SquareOrder>,
        }
        debug!("Creating order at location {} with {} items", request.order.location_id, request.order.line_items.len());
        let result = self.rest_query::<OrderResponse, _>(Method::POST, "/v2/orders", token, Some(request)).await?;
        let order = result.order.ok_or(SquareApiError::EmptyResponse)?;
        info!("Created remote order {}", order.id);
        Ok(order)
    }

    pub async fn create_payment(
        &self,
        token: &Secret<String>,
        request: CreatePaymentRequest,
    ) -> Result<SquarePayment, SquareApiError> {
        #[derive(Deserialize)]
        struct PaymentResponse {
            payment: Option<SquarePayment>,
        }
        debug!("Creating {} payment against order {}", request.source_id, request.order_id);
        let result = self.rest_query::<PaymentResponse, _>(Method::POST, "/v2/payments", token, Some(request)).await?;
        let payment = result.payment.ok_or(SquareApiError::EmptyResponse)?;
        info!("Created remote payment {} ({})", payment.id, payment.status);
        Ok(payment)
    }
}
