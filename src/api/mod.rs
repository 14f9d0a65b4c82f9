//! HTTP surface: routes, shared state and the server loop.

pub mod handlers;

use crate::config;
use crate::store::PortfolioStore;
use anyhow::{Context, Result};
use axum::http::{header, HeaderValue, Method};
use axum::routing::{get, MethodRouter};
use axum::Router;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

/// State cloned into every handler.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn PortfolioStore>,
    pub default_profile_id: Option<i64>,
}

impl AppState {
    pub fn new(store: Arc<dyn PortfolioStore>, default_profile_id: Option<i64>) -> Self {
        Self {
            store,
            default_profile_id,
        }
    }
}

/// API routes relative to the prefix. Each path answers with and without a
/// trailing slash.
pub fn routes() -> Router<AppState> {
    let table: Vec<(&str, MethodRouter<AppState>)> = vec![
        ("/health", get(handlers::health)),
        ("/profile", get(handlers::default_profile)),
        (
            "/profile/:id",
            get(handlers::get_profile)
                .patch(handlers::patch_profile)
                .put(handlers::put_profile),
        ),
        ("/projects", get(handlers::list_projects)),
        ("/skills/top", get(handlers::top_skills)),
        ("/search", get(handlers::search)),
    ];

    table
        .into_iter()
        .fold(Router::new(), |router, (path, method)| {
            router
                .route(path, method.clone())
                .route(&format!("{path}/"), method)
        })
}

fn cors_layer(origins: &[String]) -> Result<CorsLayer> {
    let origins = origins
        .iter()
        .map(|o| HeaderValue::from_str(o.trim()).with_context(|| format!("invalid origin {o}")))
        .collect::<Result<Vec<_>>>()?;
    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::PUT, Method::PATCH, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT, header::AUTHORIZATION])
        .allow_credentials(true))
}

/// Full application: routes nested under the configured prefix, plus CORS and
/// request tracing.
pub fn router(state: AppState, server: &config::Server) -> Result<Router> {
    let api = routes().with_state(state);
    let app = if server.api_prefix.is_empty() {
        api
    } else {
        Router::new().nest(&server.api_prefix, api)
    };
    Ok(app
        .layer(cors_layer(&server.cors_allowed_origins)?)
        .layer(TraceLayer::new_for_http()))
}

/// Serve `app` until Ctrl-C.
pub async fn serve(app: Router, addr: SocketAddr) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(%addr, "http server listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(tokio::signal::ctrl_c()))
        .await?;
    Ok(())
}

/// Resolves once `signal` fires. If the handler cannot be installed the
/// server keeps running.
async fn shutdown_signal(signal: impl Future<Output = std::io::Result<()>>) {
    match signal.await {
        Ok(()) => info!("shutdown signal received"),
        Err(err) => {
            warn!(error = %err, "failed to install Ctrl-C handler, serving without graceful shutdown");
            std::future::pending::<()>().await;
        }
    }
}
