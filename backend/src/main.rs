//! Main entry point for the Master BIS backend.
//!
//! This file parses the command line, initializes logging, seeds the stores
//! and serves the Axum router until Ctrl-C.

use std::io::IsTerminal;
use std::path::PathBuf;

use clap::Parser;
use masterbis_backend::config::LogFormat;
use masterbis_backend::{app, AppState, Config};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug, Parser)]
#[command(name = "masterbis", version, about = "Master BIS course portal backend")]
struct Cli {
    /// TOML configuration file.
    #[arg(long, env = "MASTERBIS_CONFIG")]
    config: Option<PathBuf>,
}

fn init_logging(format: LogFormat) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let use_json = match format {
        LogFormat::Json => true,
        LogFormat::Text => false,
        LogFormat::Auto => !std::io::stdout().is_terminal(),
    };

    if use_json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().json().flatten_event(true))
            .init();
    } else {
        tracing_subscriber::registry().with(env_filter).with(fmt::layer()).init();
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
    }
    tracing::info!("shutting down");
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;
    init_logging(config.log_format);

    let addr = config.listen_addr;
    let state = AppState::in_memory(config).await?;

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("listening on {}", addr);

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}
