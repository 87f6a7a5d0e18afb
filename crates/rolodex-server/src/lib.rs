//! HTTP server wiring for Rolodex.
//!
//! Loads [`ServerConfig`], mounts the JSON API from `rolodex-api` next to the
//! static UI assets, and provides the shutdown signal used by the binary.

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use axum::Router;
use config::{Config, ConfigError, Environment, File};
use rolodex_core::store::ContactStore;
use serde::Deserialize;
use tower_http::{services::ServeDir, trace::TraceLayer};

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_STORE_URI: &str = "sqlite://rolodex.db";
pub const DEFAULT_STATIC_DIR: &str = "public";

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct ServerConfig {
  pub host:       String,
  pub port:       u16,
  /// Connection string for the document store.
  pub store_uri:  String,
  /// Directory served for every path the API does not claim.
  pub static_dir: PathBuf,
}

impl ServerConfig {
  /// Load from `file` (if it exists) and the process environment.
  pub fn load(file: Option<&Path>) -> Result<Self, ConfigError> {
    Self::load_from(file, std::env::vars().collect())
  }

  /// Layer, lowest to highest precedence: defaults, `file`, `ROLODEX_*`
  /// variables, then the bare `PORT` and `STORE_URI` variables.
  pub fn load_from(
    file: Option<&Path>,
    env: config::Map<String, String>,
  ) -> Result<Self, ConfigError> {
    let port      = env.get("PORT").cloned();
    let store_uri = env.get("STORE_URI").cloned();

    let mut builder = Config::builder()
      .set_default("host", DEFAULT_HOST)?
      .set_default("port", i64::from(DEFAULT_PORT))?
      .set_default("store_uri", DEFAULT_STORE_URI)?
      .set_default("static_dir", DEFAULT_STATIC_DIR)?;

    if let Some(path) = file {
      builder = builder.add_source(File::from(path).required(false));
    }

    builder
      .add_source(Environment::with_prefix("ROLODEX").source(Some(env)))
      .set_override_option("port", port)?
      .set_override_option("store_uri", store_uri)?
      .build()?
      .try_deserialize()
  }

  /// `host:port`, suitable for [`tokio::net::TcpListener::bind`].
  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// The full application: `/contacts` API with static files as the fallback.
pub fn router<S>(store: Arc<S>, config: &ServerConfig) -> Router
where
  S: ContactStore + 'static,
{
  rolodex_api::api_router(store)
    .fallback_service(ServeDir::new(&config.static_dir))
    .layer(TraceLayer::new_for_http())
}

// ─── Shutdown ─────────────────────────────────────────────────────────────────

/// Resolves on SIGINT or SIGTERM (Ctrl-C elsewhere).
pub async fn shutdown_signal() {
  #[cfg(unix)]
  {
    use tokio::signal::unix::{SignalKind, signal};
    match (
      signal(SignalKind::terminate()),
      signal(SignalKind::interrupt()),
    ) {
      (Ok(mut sigterm), Ok(mut sigint)) => {
        tokio::select! {
          _ = sigterm.recv() => {}
          _ = sigint.recv() => {}
        }
      }
      (Err(e), _) | (_, Err(e)) => {
        tracing::warn!("cannot install signal handlers ({e}); falling back to Ctrl-C");
        let _ = tokio::signal::ctrl_c().await;
      }
    }
  }
  #[cfg(not(unix))]
  {
    let _ = tokio::signal::ctrl_c().await;
  }
  tracing::info!("Shutdown signal received");
}

// ─── Tests ────────────────────────────────────────────────────────────────────
