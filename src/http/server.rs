//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum Router with all handlers
//! - Wire up middleware (tracing, request ID, CORS, security headers, limits)
//! - Normalize paths ahead of routing (trailing slash, literal segment case)
//! - Bind server to listener
//! - Serve until the shutdown signal fires

use std::any::Any;
use std::sync::Arc;
use std::time::{Duration, Instant};
use axum::{
    extract::{FromRef, Request},
    Router, ServiceExt,
};
use tokio::net::TcpListener;
use tower::util::MapRequest;
use tower_http::{
    catch_panic::CatchPanicLayer, normalize_path::NormalizePath, timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::api;
use crate::config::{AppConfig, Environment};
use crate::data::DataSource;
use crate::http::request::{
    canonicalize_path, make_request_span, propagate_request_id_layer, set_request_id_layer,
};
use crate::lifecycle::ShutdownSignal;
use crate::security;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub source: Arc<DataSource>,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let source = DataSource::new(&config.data.path, config.data.reload);
        Self {
            config: Arc::new(config),
            source: Arc::new(source),
            started_at: Instant::now(),
        }
    }
}

impl FromRef<AppState> for Environment {
    fn from_ref(state: &AppState) -> Self {
        state.config.environment.clone()
    }
}

/// The router behind path normalization; this is what gets served.
pub type AppService = NormalizePath<MapRequest<Router, fn(Request) -> Request>>;

/// HTTP server for the NID API.
pub struct HttpServer {
    router: Router,
    config: Arc<AppConfig>,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        let state = AppState::new(config);
        let config = state.config.clone();
        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &AppConfig, state: AppState) -> Router {
        let environment = config.environment.clone();

        let router = api::routes(state)
            .layer(security::body_limit(config.security.max_body_size))
            .layer(CatchPanicLayer::custom(move |panic: Box<dyn Any + Send + 'static>| {
                api::system::panic_response(panic, environment.clone())
            }))
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(security::build_cors_layer(&config.security.cors_allowed_origins));

        let router = if config.security.enable_headers {
            security::with_security_headers(router)
        } else {
            router
        };

        router
            .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
            .layer(propagate_request_id_layer())
            .layer(set_request_id_layer())
    }

    /// The fully layered router, without path normalization.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// The router as served: trailing slashes trimmed, then literal segments case-folded.
    pub fn service(&self) -> AppService {
        let canonicalize: fn(Request) -> Request = canonicalize_path;
        NormalizePath::trim_trailing_slash(MapRequest::new(self.router.clone(), canonicalize))
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: ShutdownSignal,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            data_path = %self.config.data.path,
            reload = ?self.config.data.reload,
            environment = %self.config.environment,
            "HTTP server starting"
        );

        let service = self.service();
        axum::serve(listener, ServiceExt::<Request>::into_make_service(service))
            .with_graceful_shutdown(async move {
                shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }
}
