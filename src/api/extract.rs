//! Lenient body extraction for `POST /find`.
//!
//! Accepts a JSON object or a url-encoded form. A missing or empty body, or one in
//! any other content type, is treated as an empty object so the handler reports the
//! missing fields with its own 400 message. A declared JSON body that does not parse
//! is a fault and gets the last-resort 500. An oversized body is rejected with 413.

use std::collections::HashMap;
use axum::{
    body::Bytes,
    extract::{FromRef, FromRequest, Request},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Form,
};
use serde_json::{Map, Value};

use crate::api::system::internal_error;
use crate::config::Environment;

/// Top-level fields of the request body.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct FindBody(pub Map<String, Value>);

impl FindBody {
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }
}

fn content_type(request: &Request) -> Option<String> {
    let value = request.headers().get(header::CONTENT_TYPE)?.to_str().ok()?;
    let mime = value.split(';').next()?.trim().to_ascii_lowercase();
    Some(mime)
}

fn is_json(mime: &str) -> bool {
    mime == "application/json" || (mime.starts_with("application/") && mime.ends_with("+json"))
}

/// Parse a declared JSON body. Only an object or an array may appear at the top level.
fn parse_json(bytes: &[u8]) -> Result<FindBody, String> {
    if bytes.is_empty() {
        return Ok(FindBody::default());
    }

    match bytes.iter().find(|b| !b.is_ascii_whitespace()) {
        Some(b'{') | Some(b'[') => {}
        _ => return Err("JSON body must be an object or an array".to_string()),
    }

    match serde_json::from_slice::<Value>(bytes).map_err(|e| e.to_string())? {
        Value::Object(fields) => Ok(FindBody(fields)),
        _ => Ok(FindBody::default()),
    }
}

impl<S> FromRequest<S> for FindBody
where
    S: Send + Sync,
    Environment: FromRef<S>,
{
    type Rejection = Response;

    async fn from_request(request: Request, state: &S) -> Result<Self, Self::Rejection> {
        let mime = content_type(&request);

        if mime.as_deref() == Some("application/x-www-form-urlencoded") {
            return match Form::<HashMap<String, String>>::from_request(request, state).await {
                Ok(Form(fields)) => Ok(FindBody(
                    fields
                        .into_iter()
                        .map(|(k, v)| (k, Value::String(v)))
                        .collect(),
                )),
                Err(rejection) if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE => {
                    Err(rejection.into_response())
                }
                Err(rejection) => {
                    tracing::debug!(error = %rejection.body_text(), "Ignoring unreadable form body");
                    Ok(FindBody::default())
                }
            };
        }

        if !mime.as_deref().is_some_and(is_json) {
            return Ok(FindBody::default());
        }

        let bytes = Bytes::from_request(request, state)
            .await
            .map_err(IntoResponse::into_response)?;

        parse_json(&bytes).map_err(|detail| {
            tracing::error!(error = %detail, "Malformed JSON body");
            internal_error(detail, &Environment::from_ref(state))
        })
    }
}
