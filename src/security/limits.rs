//! Request limits.
//!
//! Bodies over the configured size are rejected with 413 Payload Too Large
//! before any handler parses them.

use axum::extract::DefaultBodyLimit;

pub fn body_limit(max_body_size: usize) -> DefaultBodyLimit {
    DefaultBodyLimit::max(max_body_size)
}
