//! # Server Setup
//!
//! Server initialization, route registration, and HTTP server startup.
//!
//! This module provides the main server setup function that creates the Axum router,
//! registers all routes, applies middleware, and starts the HTTP server.

// region: --- Imports
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, patch, post},
    Router,
};
use lib_core::{Config, ServiceCatalog};
use lib_core::catalog::DEFAULT_SERVICE_NAMES;
use lib_utils::envs::{get_env, get_env_or};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::{error, info};

use crate::handlers;
use crate::middleware::{log_requests, map_res, require_session, stamp_req};
use crate::services::BackendClient;
// endregion: --- Imports

/// Largest request body accepted (multipart uploads included).
pub const MAX_BODY_BYTES: usize = 20 * 1024 * 1024;

// region: --- AppState
/// Application state shared across all routes
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub backend: BackendClient,
    pub catalog: Arc<ServiceCatalog>,
}

impl AppState {
    /// Build the state from a validated config.
    pub fn new(config: Config, catalog: ServiceCatalog) -> lib_core::Result<Self> {
        let backend = BackendClient::new(&config.backend_url, config.backend_timeout())?;
        Ok(Self {
            config,
            backend,
            catalog: Arc::new(catalog),
        })
    }
}

impl axum::extract::FromRef<AppState> for Config {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}

impl axum::extract::FromRef<AppState> for BackendClient {
    fn from_ref(state: &AppState) -> Self {
        state.backend.clone()
    }
}

impl axum::extract::FromRef<AppState> for Arc<ServiceCatalog> {
    fn from_ref(state: &AppState) -> Self {
        state.catalog.clone()
    }
}
// endregion: --- AppState

// region: --- Server Configuration
/// Server configuration
pub struct ServerConfig {
    /// Bind address (e.g., "127.0.0.1:3000")
    pub bind_address: String,
    /// Allowed CORS origins
    pub allowed_origins: Vec<String>,
}

impl ServerConfig {
    /// Read `BIND_ADDRESS` and `ALLOWED_ORIGINS`, falling back to the defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let bind_address = get_env_or("BIND_ADDRESS", &defaults.bind_address);
        let allowed_origins = match get_env("ALLOWED_ORIGINS") {
            Ok(list) => list
                .split(',')
                .map(str::trim)
                .filter(|o| !o.is_empty())
                .map(str::to_string)
                .collect(),
            Err(_) => defaults.allowed_origins,
        };

        Self {
            bind_address,
            allowed_origins,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:3000".to_string(),
            allowed_origins: vec![
                "http://localhost:3000".to_string(),
                "http://127.0.0.1:3000".to_string(),
            ],
        }
    }
}
// endregion: --- Server Configuration

// region: --- Server Setup
/// Initialize tracing from `LOG_LEVEL` (default `info`).
fn init_tracing() -> anyhow::Result<String> {
    let log_level = get_env_or("LOG_LEVEL", "info").to_lowercase();

    let filter = match log_level.as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => tracing_subscriber::EnvFilter::new(&log_level),
        _ => tracing_subscriber::EnvFilter::new("info"),
    };

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_line_number(true)
        .with_file(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to set global tracing subscriber: {}", e))?;

    Ok(log_level)
}

/// Build the service catalog for this environment.
///
/// Outside production an invalid table stops startup; in production the
/// catalog keeps what it can and logs the rest.
fn build_catalog(config: &Config) -> lib_core::Result<ServiceCatalog> {
    if config.is_production() {
        return Ok(ServiceCatalog::lenient(DEFAULT_SERVICE_NAMES));
    }
    ServiceCatalog::new(DEFAULT_SERVICE_NAMES).map_err(|e| {
        error!("[CATALOG] {}", e);
        e
    })
}

/// Initialize and start the HTTP server
///
/// # Arguments
///
/// * `server` - Listener and CORS settings
/// * `config` - Gateway configuration, built once by the caller
///
/// # Errors
///
/// This function will return an error if:
/// - Configuration validation fails
/// - The service catalog is invalid (non-production)
/// - The backend HTTP client cannot be built
/// - Server binding fails
pub async fn start_server(server: ServerConfig, config: Config) -> anyhow::Result<()> {
    let log_level = init_tracing()?;

    info!(" IVREX GATEWAY STARTING");
    info!(" Log level: {}", log_level);

    config.validate().map_err(|e| anyhow::anyhow!(e))?;
    info!(" Backend: {}", config.backend_url);
    info!(
        " Session lifetime: {}m (refresh window {}m)",
        config.session_max_age_minutes, config.session_refresh_window_minutes
    );

    let catalog = build_catalog(&config)?;
    info!(" Service catalog loaded ({} names)", catalog.len());

    let state = AppState::new(config, catalog)?;
    let app = create_router(state, &server.allowed_origins);

    let listener = tokio::net::TcpListener::bind(&server.bind_address).await?;

    info!(" SERVER READY: http://{}", server.bind_address);
    log_server_info();

    axum::serve(listener, app).await?;
    Ok(())
}

/// Create the main application router with all routes
pub fn create_router(state: AppState, allowed_origins: &[String]) -> Router {
    use axum::http::{header, HeaderValue, Method};

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    info!("[ROUTE SETUP] Registering HTTP routes...");

    // Everything here sits behind the session gate
    let protected = Router::new()
        .route("/api/auth/refresh", post(handlers::auth::refresh))
        .route("/api/auth/session", get(handlers::auth::session))
        .route("/api/auth/logout", post(handlers::auth::logout))
        .route("/api/admin/users", get(handlers::users::list_users))
        .route("/api/admin/users/{id}", patch(handlers::users::update_user))
        .route(
            "/api/challenges",
            get(handlers::challenges::forward).post(handlers::challenges::forward),
        )
        .route(
            "/api/challenges/link-subscription",
            get(handlers::challenges::forward).post(handlers::challenges::link_subscription),
        )
        .route(
            "/api/challenges/{*rest}",
            get(handlers::challenges::forward).post(handlers::challenges::forward),
        )
        .route(
            "/api/subscriptions",
            get(handlers::subscriptions::list_mine).post(handlers::subscriptions::create),
        )
        .route(
            "/api/signals",
            get(handlers::signals::list_signals).post(handlers::signals::create_signal),
        )
        .route("/api/signals/{id}/close", post(handlers::signals::close_signal))
        .route_layer(axum::middleware::from_fn_with_state(state.clone(), require_session));

    Router::new()
        .route("/api/auth/login", post(handlers::auth::login))
        .route("/api/signup", post(handlers::signup::signup))
        .route("/health", get(|| async { "OK" }))
        .merge(protected)
        .fallback(handlers::not_found)
        .with_state(state)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        // Uniform { message } bodies for framework-generated errors
        .layer(axum::middleware::from_fn(map_res))
        // Comprehensive request/response logging
        .layer(axum::middleware::from_fn(log_requests))
        // Tower HTTP trace layer for spans
        .layer(
            tower_http::trace::TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    let request_id = request
                        .extensions()
                        .get::<crate::middleware::RequestStamp>()
                        .map(|s| s.id.clone())
                        .unwrap_or_else(|| "unknown".to_string());
                    tracing::info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = %request.method(),
                        uri = %request.uri(),
                    )
                })
                .on_failure(|error: tower_http::classify::ServerErrorsFailureClass, latency: std::time::Duration, _span: &tracing::Span| {
                    tracing::error!(
                        error = ?error,
                        latency_ms = latency.as_millis(),
                        "[HTTP FAILURE] Error: {:?}, Latency: {}ms",
                        error,
                        latency.as_millis()
                    );
                }),
        )
        // Request stamping (adds request ID) - outermost so every layer sees it
        .layer(axum::middleware::from_fn(stamp_req))
        .layer(cors)
}

/// Log server information
fn log_server_info() {
    info!(" SESSION:");
    info!("   • POST /api/auth/login");
    info!("   • POST /api/auth/refresh");
    info!("   • GET  /api/auth/session");
    info!("   • POST /api/auth/logout");
    info!("   • POST /api/signup");
    info!(" ADMIN:");
    info!("   • GET   /api/admin/users");
    info!("   • PATCH /api/admin/users/{{id}}");
    info!(" CHALLENGES:");
    info!("   • GET|POST /api/challenges[/...]");
    info!("   • POST     /api/challenges/link-subscription");
    info!(" SUBSCRIPTIONS:");
    info!("   • GET|POST /api/subscriptions");
    info!(" SIGNALS:");
    info!("   • GET|POST /api/signals");
    info!("   • POST     /api/signals/{{id}}/close");
    info!(" HEALTH:");
    info!("   • GET  /health");
}
// endregion: --- Server Setup

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_config_reads_origin_list() {
        std::env::set_var("ALLOWED_ORIGINS", "https://app.ivrex.io, ,https://admin.ivrex.io");
        let server = ServerConfig::from_env();
        std::env::remove_var("ALLOWED_ORIGINS");

        assert_eq!(
            server.allowed_origins,
            vec!["https://app.ivrex.io".to_string(), "https://admin.ivrex.io".to_string()]
        );
        assert_eq!(ServerConfig::from_env().allowed_origins, ServerConfig::default().allowed_origins);
    }
}
