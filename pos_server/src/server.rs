use std::time::{Duration, Instant};

use actix_governor::Governor;
use actix_web::{
    dev::{Server, Service},
    http::KeepAlive,
    middleware::Logger,
    web,
    App,
    HttpServer,
};
use log::*;
use metrics_exporter_prometheus::PrometheusHandle;
use pos_engine::{OrderFlowApi, OrderManagement, PaymentsGateway, RestaurantApi, RestaurantManagement, SqliteDatabase};
use square_tools::SquareApi;

use crate::{
    config::ServerConfig,
    errors::ServerError,
    integrations::SquareGateway,
    metrics::{install_recorder, observe_response, prometheus_metrics},
    middleware::{cors_policy, rate_limiter_config, MerchantAuthFactory},
    routes::{health, livez, CreateOrderRoute, OrderByIdRoute, OrdersForTableRoute, PayOrderRoute, ReadyzRoute},
};

pub async fn run_server(config: ServerConfig) -> Result<(), ServerError> {
    let db = SqliteDatabase::new_with_url(&config.database_url, config.db_max_connections)
        .await
        .map_err(|e| ServerError::InitializeError(e.to_string()))?;
    db.run_migrations().await.map_err(|e| ServerError::InitializeError(e.to_string()))?;
    let api = SquareApi::new(config.square.clone()).map_err(|e| ServerError::InitializeError(e.to_string()))?;
    let gateway = SquareGateway::new(api);
    let metrics = install_recorder()?;
    let srv = create_server_instance(config, db, gateway, metrics)?;
    srv.await.map_err(|e| ServerError::Unspecified(e.to_string()))
}

pub fn create_server_instance(
    config: ServerConfig,
    db: SqliteDatabase,
    gateway: SquareGateway,
    metrics: PrometheusHandle,
) -> Result<Server, ServerError> {
    let rate_limits = rate_limiter_config(&config.rate_limit)?;
    let srv = HttpServer::new(move || {
        let directory = RestaurantApi::new(db.clone(), gateway.clone());
        let orders_api = OrderFlowApi::new(db.clone(), gateway.clone());
        App::new()
            .wrap(Governor::new(&rate_limits))
            .wrap_fn(|req, srv| {
                let started = Instant::now();
                let method = req.method().to_string();
                let fut = srv.call(req);
                async move {
                    let result = fut.await;
                    observe_response(&method, started, &result);
                    result
                }
            })
            .wrap(cors_policy())
            .wrap(Logger::new("%t (%D ms) %s %a %{Host}i %U").log_target("pos::access_log"))
            .app_data(web::Data::new(directory))
            .app_data(web::Data::new(orders_api))
            .app_data(web::Data::new(metrics.clone()))
            .configure(configure_routes::<SqliteDatabase, SquareGateway>)
    })
    .keep_alive(KeepAlive::Timeout(Duration::from_secs(600)))
    .bind((config.host.as_str(), config.port))?
    .run();
    info!("🚀️ Server listening on {}:{}", config.host, config.port);
    Ok(srv)
}

/// Registers every route. `RestaurantApi<B, G>`, `OrderFlowApi<B, G>` and the `PrometheusHandle` must already be
/// registered as app data.
pub fn configure_routes<B, G>(cfg: &mut web::ServiceConfig)
where
    B: OrderManagement + RestaurantManagement + 'static,
    G: PaymentsGateway + 'static,
{
    let v1_scope = web::scope("/v1")
        .app_data(json_config())
        .wrap(MerchantAuthFactory::<B, G>::new())
        .service(CreateOrderRoute::<B, G>::new())
        .service(OrdersForTableRoute::<B, G>::new())
        .service(OrderByIdRoute::<B, G>::new())
        .service(PayOrderRoute::<B, G>::new());
    cfg.service(health)
        .service(livez)
        .service(ReadyzRoute::<B, G>::new())
        .service(prometheus_metrics)
        .service(v1_scope);
}

/// Malformed request bodies get the same JSON error body as every other failure.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, req| {
        debug!("💻️ Invalid request body for {}. {err}", req.path());
        ServerError::InvalidRequestBody(err.to_string()).into()
    })
}
