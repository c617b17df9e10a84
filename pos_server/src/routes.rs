//! Request handler definitions
//!
//! Define each route and it handler here.
//! Handlers that are more than a line or two MUST go into a separate module. Keep this module neat and tidy 🙏
//!
//! A note about performance:
//! Since each worker thread processes its requests sequentially, handlers which block the current thread will cause the
//! current worker to stop processing new requests. Every engine call (database or payments platform) is therefore an
//! async function, and handlers only ever `.await` them.
//!
//! All `/v1` handlers take an [`AuthenticatedMerchant`], which is only available behind
//! [`MerchantAuthFactory`](crate::middleware::MerchantAuthFactory).
use actix_web::{get, web, HttpResponse, Responder};
use log::*;
use pos_engine::{
    order_objects::{NewOrder, PaymentRequest},
    OrderFlowApi,
    OrderManagement,
    PaymentsGateway,
};

use crate::{
    auth::AuthenticatedMerchant,
    data_objects::{CreateOrderRequest, PayOrderRequest, StatusResponse, PAYMENT_SUCCESS_MESSAGE},
    errors::ServerError,
    metrics,
};

// Web-actix cannot handle generics in handlers, so it's implemented manually using the `route!` macro
#[macro_export]
macro_rules! route {
    ($name:ident => $method:ident $path:literal impl $($bounds:ty),+) => {
        paste::paste! { pub struct [<$name:camel Route>]< $( [< T $bounds:camel> ],)+ >( $( core::marker::PhantomData<fn() -> [< T $bounds:camel> ] >,)+ );}
        paste::paste! { impl< $( [< T $bounds:camel> ],)+ > [<$name:camel Route>]< $( [< T $bounds:camel> ],)+ > {
            #[allow(clippy::new_without_default)]
            pub fn new() -> Self {
                Self($( core::marker::PhantomData::<fn() -> [< T $bounds:camel> ] >,)+)
            }
        }}
        paste::paste! { impl<$( [< T $bounds:camel >] , )+> actix_web::dev::HttpServiceFactory for [<$name:camel Route>]<$([<T $bounds:camel>],)+>
        where
            $([<T $bounds:camel>]: $bounds + 'static,)+
        {
            fn register(self, config: &mut actix_web::dev::AppService) {
                let res = actix_web::Resource::new($path)
                    .name(stringify!($name))
                    .guard(actix_web::guard::$method())
                    .to($name::< $( [< T $bounds:camel >], )+>);
                actix_web::dev::HttpServiceFactory::register(res, config);
            }
        }}
    };
}

#[get("/health")]
pub async fn health() -> impl Responder {
    HttpResponse::Ok().body("👍️\n")
}

/// Liveness check. Answers as long as the workers are running.
#[get("/livez")]
pub async fn livez() -> impl Responder {
    HttpResponse::Ok().body("OK")
}

route!(readyz => Get "/readyz" impl OrderManagement, PaymentsGateway);
/// Readiness check. The service is only ready while the order store answers queries.
pub async fn readyz<B: OrderManagement, G: PaymentsGateway>(
    api: web::Data<OrderFlowApi<B, G>>,
) -> Result<HttpResponse, ServerError> {
    api.check_storage().await.map_err(|e| {
        warn!("💻️ Readiness check failed. {e}");
        ServerError::ServiceUnavailable(e.to_string())
    })?;
    Ok(HttpResponse::Ok().body("OK"))
}

//----------------------------------------------   Orders  ----------------------------------------------------
route!(create_order => Post "/orders" impl OrderManagement, PaymentsGateway);
/// Creates the order on the payments platform and stores it against the caller's restaurant.
pub async fn create_order<B: OrderManagement, G: PaymentsGateway>(
    merchant: AuthenticatedMerchant,
    body: web::Json<CreateOrderRequest>,
    api: web::Data<OrderFlowApi<B, G>>,
) -> Result<HttpResponse, ServerError> {
    let session = merchant.session();
    debug!("💻️ POST create order for table {} ({} items)", body.table_number, body.items.len());
    let new_order = NewOrder::try_from(body.into_inner())?;
    let order = api.create_order(session, new_order).await?;
    metrics::record_order_created();
    info!("💻️ Order {} created for table {} at restaurant #{}", order.id, order.table_number, order.restaurant_id);
    Ok(HttpResponse::Ok().json(order))
}

route!(order_by_id => Get "/orders/{order_id}" impl OrderManagement, PaymentsGateway);
pub async fn order_by_id<B: OrderManagement, G: PaymentsGateway>(
    merchant: AuthenticatedMerchant,
    path: web::Path<String>,
    api: web::Data<OrderFlowApi<B, G>>,
) -> Result<HttpResponse, ServerError> {
    let order_id = path.into_inner();
    debug!("💻️ GET order {order_id}");
    let order = api.fetch_order(merchant.session(), &order_id).await?;
    Ok(HttpResponse::Ok().json(order))
}

route!(orders_for_table => Get "/orders/table/{table_number}" impl OrderManagement, PaymentsGateway);
pub async fn orders_for_table<B: OrderManagement, G: PaymentsGateway>(
    merchant: AuthenticatedMerchant,
    path: web::Path<String>,
    api: web::Data<OrderFlowApi<B, G>>,
) -> Result<HttpResponse, ServerError> {
    let table_number = path.into_inner();
    debug!("💻️ GET orders for table {table_number}");
    let orders = api.fetch_orders_for_table(merchant.session(), &table_number).await?;
    Ok(HttpResponse::Ok().json(orders))
}

route!(pay_order => Post "/orders/{order_id}/pay" impl OrderManagement, PaymentsGateway);
/// Takes a payment on the payments platform and adds it to the order's ledger.
pub async fn pay_order<B: OrderManagement, G: PaymentsGateway>(
    merchant: AuthenticatedMerchant,
    path: web::Path<String>,
    body: web::Json<PayOrderRequest>,
    api: web::Data<OrderFlowApi<B, G>>,
) -> Result<HttpResponse, ServerError> {
    let order_id = path.into_inner();
    let payment = PaymentRequest::from(body.into_inner());
    debug!(
        "💻️ POST payment {} for order {order_id}. Bill: {}, tip: {}",
        payment.payment_id, payment.bill_amount, payment.tip_amount
    );
    let order = api.apply_payment(merchant.session(), &order_id, payment).await?;
    metrics::record_payment(order.is_closed);
    info!(
        "💻️ Payment applied to order {order_id}. Paid {} of {}. Closed: {}",
        order.totals.paid, order.totals.due, order.is_closed
    );
    Ok(HttpResponse::Ok().json(StatusResponse::new(PAYMENT_SUCCESS_MESSAGE)))
}
