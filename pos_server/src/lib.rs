//! # Restaurant point-of-sale server
//! This crate hosts the HTTP server for the restaurant point-of-sale. It is responsible for:
//! Authenticating merchants by their Square access token.
//! Accepting orders and payments from front-of-house devices and handing them to the engine.
//! Translating engine requests into Square API calls ([`integrations::square`]).
//!
//! ## Configuration
//! The server is configured via environment variables. See [config](config/index.html) for more information.
//!
//! ## Routes
//! The server exposes the following routes:
//! * `/health`: A health check route that returns a 200 OK response.
//! * `/livez`, `/readyz`: Liveness and readiness checks. `/readyz` answers 503 while the database is unreachable.
//! * `/metrics`: Prometheus metrics.
//! * `POST /v1/orders`: Create an order.
//! * `GET /v1/orders/{orderId}`: Fetch an order belonging to the caller's restaurant.
//! * `GET /v1/orders/table/{tableNumber}`: Fetch the orders for a table.
//! * `POST /v1/orders/{orderId}/pay`: Apply a payment to an order.
//!
//! Every `/v1` route requires an `Authorization` header. All routes are rate limited per client IP and answer CORS
//! requests from any origin.

pub mod auth;
pub mod cli;
pub mod config;
pub mod data_objects;
pub mod errors;
pub mod integrations;
pub mod metrics;
pub mod middleware;
pub mod routes;
pub mod server;
