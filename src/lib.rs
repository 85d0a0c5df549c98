//! NID Mock Server Library

pub mod api;
pub mod config;
pub mod data;
pub mod http;
pub mod lifecycle;
pub mod lookup;
pub mod observability;
pub mod security;

pub use config::AppConfig;
pub use http::HttpServer;
pub use lifecycle::{Shutdown, ShutdownSignal};
