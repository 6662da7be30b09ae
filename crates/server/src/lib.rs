//! HTTP surface of the gateway: the request gate and route assembly.

mod auth;
mod error;
pub mod logger;
mod rate_limit;

use std::{net::SocketAddr, sync::Arc, time::Duration};

use agents::Store;
use auth::{AuthLayer, TenantRegistry};
use axum::{Json, Router, routing::get};
use axum_server::tls_rustls::RustlsConfig;
use config::Config;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

use crate::rate_limit::RateLimitLayer;

pub(crate) type Result<T> = std::result::Result<T, error::Error>;

pub struct ServeConfig {
    pub listen_address: SocketAddr,
    pub config: Config,
    pub shutdown_signal: CancellationToken,
    pub log_filter: String,
}

pub async fn serve(
    ServeConfig {
        listen_address,
        config,
        shutdown_signal,
        log_filter,
    }: ServeConfig,
) -> crate::Result<()> {
    logger::init(&log_filter);

    log::info!("tenant registry initialized with {} tenants", config.tenants.len());

    let registry = Arc::new(TenantRegistry::from_config(&config.tenants));
    let store = Arc::new(Store::default());

    // Auth is the outer layer, so the rate limiter only ever sees requests
    // that already carry a tenant identity.
    let api = agents::router(store)
        .layer(RateLimitLayer::new(&config.server.rate_limits))
        .layer(AuthLayer::new(registry));

    let mut app = Router::new().merge(api);

    // The health endpoint sits outside the gate; probes carry no API key.
    if config.server.health.enabled {
        app = app.route(&config.server.health.path, get(health));
    }

    let listener = TcpListener::bind(listen_address).await.map_err(error::Error::Bind)?;

    match &config.server.tls {
        Some(tls_config) => {
            let rustls_config = RustlsConfig::from_pem_file(&tls_config.certificate, &tls_config.key)
                .await
                .map_err(|e| error::Error::Tls(e.to_string()))?;

            log::info!("listening on https://{listen_address}");

            let std_listener = listener.into_std().map_err(error::Error::Bind)?;

            let handle = axum_server::Handle::new();

            {
                let handle = handle.clone();
                let shutdown_signal = shutdown_signal.clone();

                tokio::spawn(async move {
                    shutdown_signal.cancelled().await;
                    handle.graceful_shutdown(Some(Duration::from_secs(5)));
                });
            }

            axum_server::from_tcp_rustls(std_listener, rustls_config)
                .handle(handle)
                .serve(app.into_make_service())
                .await
                .map_err(error::Error::Server)?;
        }
        None => {
            log::info!("listening on http://{listen_address}");

            axum::serve(listener, app)
                .with_graceful_shutdown(shutdown_signal.cancelled_owned())
                .await
                .map_err(error::Error::Server)?;
        }
    }

    Ok(())
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "healthy" }))
}
