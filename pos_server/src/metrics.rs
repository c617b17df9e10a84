//! Prometheus metrics.
//!
//! Counters:
//! - `pos_http_requests_total` by method, route and status
//! - `pos_orders_created_total`
//! - `pos_payments_recorded_total` by whether the payment closed the order
//!
//! Histograms:
//! - `pos_http_request_duration_seconds` by method, route and status
//!
//! The recorder is installed once at startup. `GET /metrics` renders everything recorded so far.
use std::time::Instant;

use actix_web::{dev::ServiceResponse, get, web, Error, HttpResponse, Responder};
use log::*;
use metrics::{counter, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

use crate::errors::ServerError;

/// Requests that fail before routing (e.g. rejected by the auth middleware) are labelled with this route.
pub const UNMATCHED_ROUTE: &str = "unmatched";

/// Installs the global metrics recorder and returns the handle used to render it.
pub fn install_recorder() -> Result<PrometheusHandle, ServerError> {
    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| ServerError::InitializeError(format!("Could not install the metrics recorder. {e}")))?;
    info!("🚀️ Metrics recorder installed");
    Ok(handle)
}

pub fn record_request(method: &str, route: &str, status: u16, duration_secs: f64) {
    let labels = [("method", method.to_string()), ("route", route.to_string()), ("status", status.to_string())];
    counter!("pos_http_requests_total", &labels).increment(1);
    histogram!("pos_http_request_duration_seconds", &labels).record(duration_secs);
}

/// Records a finished request. Routes are labelled by their pattern (`/v1/orders/{order_id}`), never the raw path.
pub fn observe_response<B>(method: &str, started: Instant, result: &Result<ServiceResponse<B>, Error>) {
    let elapsed = started.elapsed().as_secs_f64();
    match result {
        Ok(res) => {
            let route = res.request().match_pattern().unwrap_or_else(|| UNMATCHED_ROUTE.to_string());
            record_request(method, &route, res.status().as_u16(), elapsed);
        },
        Err(e) => record_request(method, UNMATCHED_ROUTE, e.as_response_error().status_code().as_u16(), elapsed),
    }
}

pub fn record_order_created() {
    counter!("pos_orders_created_total").increment(1);
}

pub fn record_payment(closed_order: bool) {
    counter!("pos_payments_recorded_total", "closed" => closed_order.to_string()).increment(1);
}

#[get("/metrics")]
pub async fn prometheus_metrics(handle: web::Data<PrometheusHandle>) -> impl Responder {
    HttpResponse::Ok().content_type("text/plain; version=0.0.4").body(handle.render())
}
