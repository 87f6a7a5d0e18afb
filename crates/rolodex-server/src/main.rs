//! Rolodex server binary.
//!
//! Reads `rolodex.toml` (or the path given with `--config`) plus environment
//! overrides, opens the contact store once, and serves the JSON API and the
//! static UI assets over HTTP until SIGINT/SIGTERM.

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use clap::Parser;
use rolodex_server::{ServerConfig, router, shutdown_signal};
use rolodex_store_sqlite::SqliteStore;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Rolodex contact API server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "rolodex.toml")]
  config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let server_cfg = ServerConfig::load(Some(cli.config.as_path()))
    .context("failed to load configuration")?;

  // Without a store there is nothing to serve.
  let store = SqliteStore::connect(&server_cfg.store_uri)
    .await
    .with_context(|| format!("failed to open store at {:?}", server_cfg.store_uri))?;
  tracing::info!("Database connection ready");

  let app = router(Arc::new(store.clone()), &server_cfg);
  let address = server_cfg.address();

  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;
  tracing::info!("Listening on http://{}", listener.local_addr()?);

  axum::serve(listener, app)
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("server error")?;

  store.close().await.context("failed to close store")?;
  tracing::info!("Store closed");

  Ok(())
}
