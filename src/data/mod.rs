//! Dataset subsystem.
//!
//! # Data Flow
//! ```text
//! NIDs.json (JSON array)
//!     → loader.rs (read & parse, degrade to empty on failure)
//!     → record.rs (raw element kept, typed field accessors)
//!     → source.rs (fresh reload per request, or mtime-keyed snapshot)
//!     → Arc<Dataset> handed to the lookup engine
//! ```
//!
//! # Design Decisions
//! - The dataset is read-only; no write path exists
//! - Load failures never reach the client as errors, only as "no data"
//! - Every array element is a record; partial or oddly typed records still pass through

pub mod loader;
pub mod record;
pub mod source;

pub use loader::{load, try_load, SourceError};
pub use record::{Dataset, Record};
pub use source::{DataSource, ReloadMode};
