//! Response envelope and error mapping.
//!
//! # Responsibilities
//! - Wrap every lookup result in the `{success, data, count, error}` envelope
//! - Map lookup failures to HTTP status codes
//! - Keep internal error text out of response bodies
//!
//! # Design Decisions
//! - Failure messages are fixed strings chosen at the route, never formatted from errors
//! - Fault details go to the log only

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::lookup::LookupError;

pub const MISSING_FIND_PARAMS: &str = "Missing required query parameters: nidnumber and dob";
pub const NID_NOT_FOUND: &str = "NID not found";
pub const FETCH_FAILED: &str = "Failed to fetch NID data";
pub const SEARCH_FAILED: &str = "Failed to search NID data";
pub const DISTRICT_FAILED: &str = "Failed to fetch NID data by district";
pub const DIVISION_FAILED: &str = "Failed to fetch NID data by division";

/// Uniform JSON wrapper for lookup responses.
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub success: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<&'static str>,
}

impl<T: Serialize> Envelope<T> {
    /// Success carrying one object.
    pub fn single(data: T) -> Self {
        Self {
            success: true,
            count: None,
            data: Some(data),
            error: None,
        }
    }
}

impl<T: Serialize> Envelope<Vec<T>> {
    /// Success carrying a collection and its length.
    pub fn many(data: Vec<T>) -> Self {
        Self {
            success: true,
            count: Some(data.len()),
            data: Some(data),
            error: None,
        }
    }
}

impl Envelope<()> {
    pub fn failure(error: &'static str) -> Self {
        Self {
            success: false,
            count: None,
            data: None,
            error: Some(error),
        }
    }
}

/// Route-level failure.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Required input was missing (400).
    #[error("{0}")]
    Validation(&'static str),

    /// Single-record lookup found nothing (404).
    #[error("{0}")]
    NotFound(&'static str),

    /// Anything else (500). `detail` is logged, never returned.
    #[error("{message}: {detail}")]
    Internal {
        message: &'static str,
        detail: String,
    },
}

impl ApiError {
    /// Convert a lookup failure, using `failure` as the 500 message for this route.
    pub fn from_lookup(err: LookupError, failure: &'static str) -> Self {
        match err {
            LookupError::Validation => ApiError::Validation(MISSING_FIND_PARAMS),
            LookupError::NotFound => ApiError::NotFound(NID_NOT_FOUND),
            LookupError::Fault(fault) => ApiError::Internal {
                message: failure,
                detail: fault.to_string(),
            },
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> &'static str {
        match self {
            ApiError::Validation(message) | ApiError::NotFound(message) => *message,
            ApiError::Internal { message, .. } => *message,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Internal { message, detail } = &self {
            tracing::error!(error = %detail, "{}", message);
        }
        (self.status(), Json(Envelope::failure(self.message()))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lookup::FieldFault;
    use serde_json::json;

    #[test]
    fn test_envelope_shapes() {
        let single = serde_json::to_value(Envelope::single(json!({"id": 1}))).unwrap();
        assert_eq!(single, json!({"success": true, "data": {"id": 1}}));

        let many = serde_json::to_value(Envelope::many(vec![1, 2, 3])).unwrap();
        assert_eq!(many, json!({"success": true, "count": 3, "data": [1, 2, 3]}));

        let empty = serde_json::to_value(Envelope::<Vec<u8>>::many(vec![])).unwrap();
        assert_eq!(empty, json!({"success": true, "count": 0, "data": []}));

        let failure = serde_json::to_value(Envelope::failure(NID_NOT_FOUND)).unwrap();
        assert_eq!(failure, json!({"success": false, "error": "NID not found"}));
    }

    #[test]
    fn test_lookup_error_mapping() {
        let err = ApiError::from_lookup(LookupError::Validation, FETCH_FAILED);
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.message(), MISSING_FIND_PARAMS);

        let err = ApiError::from_lookup(LookupError::NotFound, FETCH_FAILED);
        assert_eq!(err.status(), StatusCode::NOT_FOUND);

        let fault = FieldFault {
            record: "id=4".into(),
            field: "address.district",
        };
        let err = ApiError::from_lookup(LookupError::Fault(fault), DISTRICT_FAILED);
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message(), DISTRICT_FAILED);
        assert!(err.to_string().contains("address.district"));
    }
}
