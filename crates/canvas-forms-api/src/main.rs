//! Canvas Forms API server
//!
//! ```bash
//! canvas-forms-api --bind 0.0.0.0:8080
//! RUST_LOG=debug canvas-forms-api
//! ```

use anyhow::Context;
use canvas_forms_api::{build_router, AppState};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "canvas-forms-api")]
#[command(version)]
#[command(about = "Canvas Forms submission endpoint", long_about = None)]
struct Cli {
    /// Address to listen on
    #[arg(long, env = "CANVAS_FORMS_BIND", default_value = "0.0.0.0:8080")]
    bind: String,

    /// Log filter, used when RUST_LOG is unset
    #[arg(long, env = "CANVAS_FORMS_LOG", default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| cli.log_level.clone()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let app = build_router(AppState::in_memory());

    let listener = tokio::net::TcpListener::bind(&cli.bind)
        .await
        .with_context(|| format!("failed to bind {}", cli.bind))?;
    tracing::info!("Canvas Forms API listening on {}", cli.bind);

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
