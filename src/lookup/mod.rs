//! Lookup engine.
//!
//! # Data Flow
//! ```text
//! Query (from a route handler)
//!     → engine.rs (build matcher, pick first-match or filter semantics)
//!     → matcher.rs (evaluate each record, guard field access)
//!     → Return: Outcome::Single / Outcome::Many, or LookupError
//! ```
//!
//! # Design Decisions
//! - Linear scan in dataset order; first match wins for single-record queries
//! - String predicates fold ASCII case on both sides
//! - Matchers borrow records; the dataset is never mutated

pub mod engine;
pub mod matcher;

pub use engine::{execute, parse_id, LookupError, Outcome, Query};
pub use matcher::{FieldFault, RecordMatcher};
