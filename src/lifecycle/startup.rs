//! Startup orchestration.
//!
//! # Responsibilities
//! - Resolve configuration: file, then environment, then command line
//! - Initialize logging and metrics
//! - Bind the listener and serve until shutdown
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Listener binds last (traffic only when ready)

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use clap::Parser;
use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::loader::read_config;
use crate::config::{apply_env_overrides, validate_config, AppConfig, ConfigError};
use crate::http::HttpServer;
use crate::lifecycle::{signals, Shutdown};
use crate::observability::{logging, metrics};

/// Config file picked up from the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "nid-mock.toml";

#[derive(Debug, Parser)]
#[command(name = "nid-mock-server")]
#[command(about = "Mock HTTP API serving National ID records from a JSON file", long_about = None)]
pub struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Bind address, overriding config and PORT.
    #[arg(short, long)]
    pub bind: Option<String>,

    /// Path to the NID JSON dataset, overriding config and NID_DATA_PATH.
    #[arg(short, long)]
    pub data: Option<String>,
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to initialize logging: {0}")]
    Logging(#[from] tracing_subscriber::util::TryInitError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Build the effective configuration for this process.
pub fn resolve_config(cli: &Cli) -> Result<AppConfig, ConfigError> {
    let mut config = match &cli.config {
        Some(path) => read_config(path)?,
        None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
            read_config(Path::new(DEFAULT_CONFIG_FILE))?
        }
        None => AppConfig::default(),
    };

    apply_env_overrides(&mut config)?;

    if let Some(bind) = &cli.bind {
        config.listener.bind_address = bind.clone();
    }
    if let Some(data) = &cli.data {
        config.data.path = data.clone();
    }

    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Start the server and block until it shuts down.
pub async fn run(cli: Cli) -> Result<(), StartupError> {
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            eprintln!("warning: failed to read .env: {}", e);
        }
    }

    let config = resolve_config(&cli)?;
    logging::init_logging(&config.observability)?;

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "nid-mock-server starting");
    tracing::info!(
        bind_address = %config.listener.bind_address,
        data_path = %config.data.path,
        environment = %config.environment,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        // Checked by validate_config.
        if let Ok(addr) = config.observability.metrics_address.parse::<SocketAddr>() {
            metrics::init_metrics(addr);
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let local_addr = listener.local_addr()?;
    tracing::info!(address = %local_addr, "Listening for connections");
    tracing::info!("Health check: http://{}/health", local_addr);
    tracing::info!("API status: http://{}/api/status", local_addr);

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.signal();
    signals::spawn_signal_listener(shutdown);

    HttpServer::new(config).run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
