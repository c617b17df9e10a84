//! Merchant authentication middleware for the point-of-sale server.
//! This middleware can be placed on any route or service.
//!
//! It reads the access token from the `Authorization` header and asks the restaurant directory to resolve it. If the
//! token belongs to a merchant, the resulting [`MerchantSession`] is stored in the request extensions and the request
//! is allowed to continue. Otherwise, a 401 Unauthorized response is returned.
//!
//! The directory must be registered as `web::Data<RestaurantApi<R, G>>` with the same type parameters as the factory.
use std::{future::Future, marker::PhantomData, pin::Pin, rc::Rc};

use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    web,
    Error,
    HttpMessage,
};
use futures::future::{ok, Ready};
use log::*;
use pos_engine::{PaymentsGateway, RestaurantApi, RestaurantManagement};

use crate::{auth::access_token_from_request, errors::ServerError};

pub struct MerchantAuthFactory<R, G> {
    _backends: PhantomData<fn() -> (R, G)>,
}

impl<R, G> MerchantAuthFactory<R, G> {
    pub fn new() -> Self {
        Self { _backends: PhantomData }
    }
}

impl<R, G> Default for MerchantAuthFactory<R, G> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S, B, R, G> Transform<S, ServiceRequest> for MerchantAuthFactory<R, G>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
    R: RestaurantManagement + 'static,
    G: PaymentsGateway + 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = MerchantAuthService<S, R, G>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(MerchantAuthService { service: Rc::new(service), _backends: PhantomData })
    }
}

pub struct MerchantAuthService<S, R, G> {
    service: Rc<S>,
    _backends: PhantomData<fn() -> (R, G)>,
}

impl<S, B, R, G> Service<ServiceRequest> for MerchantAuthService<S, R, G>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
    R: RestaurantManagement + 'static,
    G: PaymentsGateway + 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        Box::pin(async move {
            let directory = req.app_data::<web::Data<RestaurantApi<R, G>>>().cloned().ok_or_else(|| {
                error!("🔑️ No restaurant directory has been registered with the app");
                ServerError::InitializeError("The restaurant directory is not configured".to_string())
            })?;
            let token = access_token_from_request(req.request()).ok_or_else(|| {
                debug!("🔑️ Request to {} has no access token", req.path());
                ServerError::AuthenticationError("An access token is required".to_string())
            })?;
            let session = directory.resolve(&token).await.map_err(ServerError::from)?;
            trace!("🔑️ Request to {} authenticated for restaurant #{}", req.path(), session.restaurant.id);
            req.extensions_mut().insert(session);
            service.call(req).await
        })
    }
}
