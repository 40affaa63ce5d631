mod cmd;

use std::process::ExitCode;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use analyzer::config::Config;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let config = Config::from_env()?;

    // stdout carries the rendered result; logs go to stderr.
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting resume analyzer v{}", env!("CARGO_PKG_VERSION"));

    cmd::run(config).await
}
