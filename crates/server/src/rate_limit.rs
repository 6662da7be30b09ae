//! Rate limiting middleware for HTTP requests.

use std::{
    fmt::Display,
    future::Future,
    pin::Pin,
    sync::Arc,
    task::{Context, Poll},
    time::Duration,
};

use axum::body::Body;
use config::RateLimitConfig;
use context::TenantIdentity;
use http::{HeaderValue, Request, Response, StatusCode};
use rate_limit::{RateLimitError, RateLimitManager};
use tower::Layer;

#[derive(Clone)]
pub(crate) struct RateLimitLayer {
    manager: Option<Arc<RateLimitManager>>,
}

impl RateLimitLayer {
    pub fn new(config: &RateLimitConfig) -> Self {
        let manager = config
            .enabled
            .then(|| Arc::new(RateLimitManager::new(&config.per_tenant)));

        Self { manager }
    }
}

impl<Service> Layer<Service> for RateLimitLayer
where
    Service: Send + Clone,
{
    type Service = RateLimitService<Service>;

    fn layer(&self, next: Service) -> Self::Service {
        RateLimitService {
            next,
            layer: self.clone(),
        }
    }
}

#[derive(Clone)]
pub(crate) struct RateLimitService<Service> {
    next: Service,
    layer: RateLimitLayer,
}

impl<Service, ReqBody> tower::Service<Request<ReqBody>> for RateLimitService<Service>
where
    Service: tower::Service<Request<ReqBody>, Response = Response<Body>> + Send + Clone + 'static,
    Service::Future: Send,
    Service::Error: Display + 'static,
    ReqBody: http_body::Body + Send + 'static,
{
    type Response = http::Response<Body>;
    type Error = Service::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Response<Body>, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.next.poll_ready(cx)
    }

    fn call(&mut self, req: Request<ReqBody>) -> Self::Future {
        let mut next = self.next.clone();

        let Some(manager) = self.layer.manager.clone() else {
            return Box::pin(next.call(req));
        };

        Box::pin(async move {
            // The authentication layer runs first; only requests it let
            // through carry an identity. Unauthenticated traffic therefore
            // never consults or mutates any tenant's window.
            let identity = req.extensions().get::<TenantIdentity>().cloned();

            let Some(tenant) = identity else {
                return next.call(req).await;
            };

            let err = match manager.check_request(&tenant.id) {
                Ok(()) => return next.call(req).await,
                Err(err) => err,
            };

            // Routine backpressure, not a fault.
            log::debug!("request for tenant {} throttled: {err}", tenant.id);

            let RateLimitError::Exceeded { retry_after } = err;

            let response = Response::builder()
                .status(StatusCode::TOO_MANY_REQUESTS)
                .header(http::header::RETRY_AFTER, retry_after_header(retry_after))
                .header(http::header::CONTENT_TYPE, "text/plain")
                .body(Body::from("Rate limit exceeded"))
                .unwrap();

            Ok(response)
        })
    }
}

/// Clients are told to wait whole seconds, rounded up, so a client honoring
/// the header lands after the oldest admission has left the window.
fn retry_after_header(retry_after: Duration) -> HeaderValue {
    let seconds = retry_after.as_secs_f64().ceil() as u64;

    HeaderValue::from_str(&seconds.to_string()).unwrap_or(HeaderValue::from_static("1"))
}
