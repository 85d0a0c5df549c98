//! Service endpoints and last-resort handlers.

use std::any::Any;
use axum::{
    extract::{OriginalUri, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;

use crate::config::Environment;
use crate::http::AppState;

#[derive(Serialize)]
pub struct Welcome {
    pub message: &'static str,
    pub timestamp: String,
    pub status: &'static str,
}

#[derive(Serialize)]
pub struct Health {
    pub status: &'static str,
    /// Seconds since the server started.
    pub uptime: f64,
    pub timestamp: String,
}

#[derive(Serialize)]
pub struct ApiStatus {
    pub message: &'static str,
    pub version: &'static str,
    pub environment: Environment,
}

#[derive(Serialize)]
pub struct RouteNotFound {
    pub error: &'static str,
    pub path: String,
}

#[derive(Serialize)]
pub struct InternalError {
    pub error: &'static str,
    pub message: String,
}

fn now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// GET /
pub async fn welcome() -> Json<Welcome> {
    Json(Welcome {
        message: "Welcome to NID Mock Server",
        timestamp: now(),
        status: "running",
    })
}

/// GET /health
pub async fn health(State(state): State<AppState>) -> Json<Health> {
    Json(Health {
        status: "healthy",
        uptime: state.started_at.elapsed().as_secs_f64(),
        timestamp: now(),
    })
}

/// GET /api/status
pub async fn api_status(State(state): State<AppState>) -> Json<ApiStatus> {
    Json(ApiStatus {
        message: "API is running",
        version: env!("CARGO_PKG_VERSION"),
        environment: state.config.environment.clone(),
    })
}

/// Any path or method no route accepts.
pub async fn not_found(OriginalUri(uri): OriginalUri) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(RouteNotFound {
            error: "Route not found",
            path: uri.to_string(),
        }),
    )
        .into_response()
}

/// Response for a handler that panicked.
pub fn panic_response(panic: Box<dyn Any + Send + 'static>, environment: Environment) -> Response {
    let detail = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };
    tracing::error!(error = %detail, "Handler panicked");

    internal_error(detail, &environment)
}

/// Last-resort 500 for faults no route handles itself. `detail` is only exposed in development.
pub fn internal_error(detail: String, environment: &Environment) -> Response {
    let message = if environment.is_development() {
        detail
    } else {
        "Internal server error".to_string()
    };

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(InternalError {
            error: "Something went wrong!",
            message,
        }),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use serde_json::{json, Value};

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_panic_detail_only_in_development() {
        let dev = panic_response(Box::new("index out of bounds"), Environment::Development);
        assert_eq!(dev.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(dev).await,
            json!({"error": "Something went wrong!", "message": "index out of bounds"})
        );

        let prod = panic_response(Box::new(String::from("secret")), Environment::Production);
        assert_eq!(
            body_json(prod).await,
            json!({"error": "Something went wrong!", "message": "Internal server error"})
        );
    }

    #[tokio::test]
    async fn test_unknown_environment_hides_detail() {
        let staging = internal_error("boom".into(), &Environment::from("staging"));
        assert_eq!(body_json(staging).await["message"], "Internal server error");
    }
}
