//! Request identification, path normalization and access logging.
//!
//! # Responsibilities
//! - Assign a UUID `x-request-id` to requests that arrive without one
//! - Echo the id back on the response
//! - Fold the case of literal route segments before routing
//! - Open one tracing span per request carrying method, path and id
//!
//! # Design Decisions
//! - Request ID added as early as possible (outermost layer)
//! - A client-supplied id is kept, not replaced
//! - Parameter segments keep their case; NID numbers are case-sensitive

use std::sync::LazyLock;
use axum::{
    body::Body,
    extract::Request,
    http::{uri::PathAndQuery, HeaderName, Uri},
};
use tower_http::request_id::{
    MakeRequestUuid, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use tracing::Span;

use crate::api;

pub const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

static ROUTE_TEMPLATES: LazyLock<Vec<String>> = LazyLock::new(api::route_templates);

/// Layer assigning a request id.
pub fn set_request_id_layer() -> SetRequestIdLayer<MakeRequestUuid> {
    SetRequestIdLayer::new(X_REQUEST_ID, MakeRequestUuid)
}

/// Layer copying the request id onto the response.
pub fn propagate_request_id_layer() -> PropagateRequestIdLayer {
    PropagateRequestIdLayer::new(X_REQUEST_ID)
}

/// Spell the literal segments of a known route the way the router registers them.
///
/// `/API/NID/ID/7` becomes `/api/nid/id/7`; `/Search/Name/RAHIM` keeps `RAHIM`.
/// Returns `None` for paths no route template fits.
pub fn canonical_path(path: &str) -> Option<String> {
    let segments: Vec<&str> = path.split('/').collect();

    ROUTE_TEMPLATES.iter().find_map(|template| {
        let pattern: Vec<&str> = template.split('/').collect();
        if pattern.len() != segments.len() {
            return None;
        }

        let mut canonical = Vec::with_capacity(segments.len());
        for (expected, actual) in pattern.iter().zip(&segments) {
            if expected.starts_with('{') {
                canonical.push(*actual);
            } else if expected.eq_ignore_ascii_case(actual) {
                canonical.push(*expected);
            } else {
                return None;
            }
        }
        Some(canonical.join("/"))
    })
}

/// Rewrite the request path to its canonical spelling, keeping the query string.
pub fn canonicalize_path(mut request: Request) -> Request {
    let Some(path) = canonical_path(request.uri().path()) else {
        return request;
    };
    if path == request.uri().path() {
        return request;
    }

    let path_and_query = match request.uri().query() {
        Some(query) => format!("{}?{}", path, query),
        None => path,
    };

    let mut parts = request.uri().clone().into_parts();
    let Ok(path_and_query) = path_and_query.parse::<PathAndQuery>() else {
        return request;
    };
    parts.path_and_query = Some(path_and_query);

    if let Ok(uri) = Uri::from_parts(parts) {
        *request.uri_mut() = uri;
    }
    request
}

/// Span factory for `TraceLayer`.
pub fn make_request_span(request: &Request<Body>) -> Span {
    let request_id = request
        .extensions()
        .get::<RequestId>()
        .and_then(|id| id.header_value().to_str().ok())
        .unwrap_or("unknown");

    tracing::info_span!(
        "request",
        method = %request.method(),
        uri = %request.uri(),
        request_id = %request_id,
    )
}
