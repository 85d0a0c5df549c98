//! NID Mock Server
//!
//! Serves static National ID records from a local JSON file over HTTP.
//!
//! # Architecture Overview
//!
//! ```text
//!   Client Request
//!   ──────────────▶ request id → trace → security headers → CORS → timeout
//!                        │
//!                        ▼
//!                   api (routes at / and /api/nid)
//!                        │
//!                        ▼
//!                   data::DataSource ──▶ mock-data/NIDs.json
//!                        │
//!                        ▼
//!                   lookup::execute (matchers, first-match / filter)
//!                        │
//!   ◀────────────── http::response (envelope, status mapping)
//! ```

use clap::Parser;
use nid_mock_server::lifecycle::{self, Cli};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    lifecycle::run(cli).await?;
    Ok(())
}
