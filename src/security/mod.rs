//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request:
//!     → cors.rs (preflight, origin check)
//!     → limits.rs (request body size)
//!     → Route handlers
//! Outgoing response:
//!     → headers.rs (security headers)
//! ```
//!
//! # Design Decisions
//! - No authentication: the server is a read-only mock
//! - Headers are added only when a handler has not set them

pub mod cors;
pub mod headers;
pub mod limits;

pub use cors::build_cors_layer;
pub use headers::with_security_headers;
pub use limits::body_limit;
