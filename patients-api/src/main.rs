use std::{io, sync::Arc};

use anyhow::{Context, Result};
use clap::Parser;
use data_protection::LogSink;
use patients_api::{build_router, config, AppState};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let args = config::Args::parse();

    // Service diagnostics go to stderr; stdout carries the redacted log entries.
    let filter = match &args.log_level {
        Some(directive) => EnvFilter::try_new(directive)
            .with_context(|| format!("invalid log level `{directive}`"))?,
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let policy = config::load_policy(args.policy.as_deref())?;
    info!(
        redactors = policy.len(),
        unresolved = ?policy.unresolved(),
        "redaction policy loaded"
    );

    let sink = LogSink::builder(Arc::new(policy))
        .category("patients_api")
        .format(args.log_format.into())
        .min_level(args.sink_level)
        .build();
    let app = build_router(AppState::new(sink));

    let listener = TcpListener::bind(args.bind)
        .await
        .with_context(|| format!("failed to bind {}", args.bind))?;
    info!(addr = %args.bind, "patients-api listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("patients-api stopped");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("received ctrl-c, shutting down");
    }
}
