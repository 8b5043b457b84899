/// HTTP middleware utilities for blog-service
///
/// Admin mode is a plain query flag (`?admin=true`) rather than an
/// authenticated identity; it only toggles draft visibility and write access.
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::{web, Error, FromRequest, HttpRequest};
use futures::future::LocalBoxFuture;
use std::future::{ready, Ready};
use std::rc::Rc;
use std::time::Instant;

use crate::error::AppError;

// =====================================================================
// Admin mode
// =====================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AdminMode(pub bool);

impl AdminMode {
    pub fn is_admin(&self) -> bool {
        self.0
    }

    /// Gate for write endpoints.
    pub fn require(&self) -> Result<(), AppError> {
        if self.0 {
            Ok(())
        } else {
            Err(AppError::Forbidden(
                "admin mode is required for this operation".to_string(),
            ))
        }
    }
}

/// The first `admin` parameter, URL-decoded, must be exactly `true`.
/// Any other value, or an undecodable query, means visitor mode.
pub fn admin_from_query(query: &str) -> bool {
    match web::Query::<Vec<(String, String)>>::from_query(query) {
        Ok(pairs) => pairs
            .iter()
            .find(|(key, _)| key == "admin")
            .map_or(false, |(_, value)| value == "true"),
        Err(_) => false,
    }
}

impl FromRequest for AdminMode {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        ready(Ok(AdminMode(admin_from_query(req.query_string()))))
    }
}

// =====================================================================
// Request timing
// =====================================================================

pub struct MetricsMiddleware;

impl<S, B> Transform<S, ServiceRequest> for MetricsMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = MetricsMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(MetricsMiddlewareService {
            service: Rc::new(service),
        }))
    }
}

pub struct MetricsMiddlewareService<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for MetricsMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        let path = req.path().to_string();
        let method = req.method().to_string();
        let admin = admin_from_query(req.query_string());
        let start = Instant::now();

        Box::pin(async move {
            let res = service.call(req).await;
            let elapsed = start.elapsed().as_millis();
            tracing::debug!(%method, %path, admin, %elapsed, "request completed");
            res
        })
    }
}
