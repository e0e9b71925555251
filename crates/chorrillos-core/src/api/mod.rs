//! HTTP API in front of the resolver.
//!
//! `GET /api/resolve-url?url=...` and `POST /api/resolve-url` (`{"url": ...}`)
//! return `{ resolvedUrl, lat, lng, redirects }`. `GET /api/geocode/reverse`
//! proxies a reverse lookup for the registration form.

mod error;
mod routes;

pub use error::ApiError;

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::{
    http::{header::CONTENT_TYPE, Method},
    routing::get,
    Router,
};
use tokio::{net::TcpListener, signal};
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use crate::config::{ChorrillosConfig, GeocodeConfig};
use crate::fetch_head::CurlExpander;
use crate::resolver::CoordinateResolver;

#[derive(Clone)]
pub struct ApiState {
    pub resolver: CoordinateResolver,
    pub geocode: Arc<GeocodeConfig>,
}

impl ApiState {
    pub fn new(resolver: CoordinateResolver, geocode: GeocodeConfig) -> Self {
        Self {
            resolver,
            geocode: Arc::new(geocode),
        }
    }

    /// Production state: libcurl expander with the configured HTTP settings.
    pub fn from_config(cfg: &ChorrillosConfig) -> Self {
        let expander = Arc::new(CurlExpander::new(cfg.http.clone()));
        Self::new(
            CoordinateResolver::new(expander, cfg.expand_mode),
            cfg.geocode.clone(),
        )
    }
}

pub fn router(state: ApiState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .route("/api", get(routes::banner))
        .route(
            "/api/resolve-url",
            get(routes::resolve_get).post(routes::resolve_post),
        )
        .route("/api/geocode/reverse", get(routes::reverse_geocode))
        .layer(cors)
        .with_state(state)
}

/// Binds `cfg.bind` and serves until Ctrl+C / SIGTERM.
pub async fn serve(cfg: &ChorrillosConfig) -> Result<()> {
    let address = cfg.bind_addr()?;
    let app = router(ApiState::from_config(cfg));

    let listener = TcpListener::bind(address)
        .await
        .with_context(|| format!("bind {address}"))?;
    info!("Server running on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");

        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;

        info!("Received terminate signal, shutting down");
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
