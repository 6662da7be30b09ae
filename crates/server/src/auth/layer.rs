use std::{
    fmt::Display,
    future::Future,
    pin::Pin,
    sync::Arc,
    task::{Context, Poll},
};

use axum::body::Body;
use context::TenantIdentity;
use http::{Request, Response, StatusCode, request::Parts};
use serde::Serialize;
use tower::Layer;

use super::{AuthResult, error::AuthError, registry::TenantRegistry};

/// Header clients use to pass their API key.
const API_KEY_HEADER: &str = "x-api-key";

#[derive(Clone)]
pub(crate) struct AuthLayer {
    registry: Arc<TenantRegistry>,
}

impl AuthLayer {
    pub fn new(registry: Arc<TenantRegistry>) -> Self {
        Self { registry }
    }
}

impl<Service> Layer<Service> for AuthLayer
where
    Service: Send + Clone,
{
    type Service = AuthService<Service>;

    fn layer(&self, next: Service) -> Self::Service {
        AuthService {
            next,
            registry: self.registry.clone(),
        }
    }
}

#[derive(Clone)]
pub(crate) struct AuthService<Service> {
    next: Service,
    registry: Arc<TenantRegistry>,
}

impl<Service, ReqBody> tower::Service<Request<ReqBody>> for AuthService<Service>
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
        let registry = self.registry.clone();

        Box::pin(async move {
            let (mut parts, body) = req.into_parts();

            match authenticate(&registry, &parts) {
                Ok(tenant) => {
                    parts.extensions.insert(tenant);
                    next.call(Request::from_parts(parts, body)).await
                }
                Err(auth_error) => {
                    log::debug!("request rejected: {auth_error}");

                    #[derive(Serialize)]
                    struct Content {
                        error: &'static str,
                    }

                    // A missing key and an unknown key produce the same
                    // response, so callers cannot probe which keys exist.
                    let (status_code, error) = match auth_error {
                        AuthError::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized"),
                    };

                    let response = Response::builder()
                        .status(status_code)
                        .header(http::header::CONTENT_TYPE, "application/json")
                        .body(Body::from(serde_json::to_vec(&Content { error }).unwrap()))
                        .unwrap();

                    Ok(response)
                }
            }
        })
    }
}

fn authenticate(registry: &TenantRegistry, parts: &Parts) -> AuthResult<TenantIdentity> {
    let api_key = parts
        .headers
        .get(API_KEY_HEADER)
        .and_then(|value| value.to_str().ok())
        .ok_or(AuthError::Unauthorized)?;

    registry.resolve(api_key).cloned().ok_or(AuthError::Unauthorized)
}
