//! veriface-server binary.
//!
//! Reads `config.toml` (or the path specified with `--config`), opens an
//! in-process SQLite identity store, and serves the enrollment/verification
//! API over HTTP under `/api`.

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use anyhow::Context as _;
use axum::{
  Router,
  http::{HeaderValue, Method, header},
};
use clap::Parser;
use serde::Deserialize;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use veriface_api::ApiState;
use veriface_store_sqlite::SqliteStore;

#[derive(Parser)]
#[command(author, version, about = "Veriface enrollment/verification server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,
}

/// Runtime server configuration, deserialised from `config.toml` and
/// `VERIFACE_*` environment variables. Every field has a default so the demo
/// runs with no config file at all.
#[derive(Debug, Clone, Deserialize)]
struct ServerConfig {
  #[serde(default = "defaults::host")]
  host: String,
  #[serde(default = "defaults::port")]
  port: u16,
  #[serde(default = "defaults::store_path")]
  store_path: PathBuf,
  /// Maximum Euclidean distance at which a probe matches an enrolled
  /// descriptor. Calibrate against real embedding data before trusting it
  /// for anything beyond a demo.
  #[serde(default = "defaults::match_threshold")]
  match_threshold: f32,
  /// Browser origin allowed to call the API (the capture frontend).
  #[serde(default = "defaults::cors_allow_origin")]
  cors_allow_origin: String,
}

mod defaults {
  use std::path::PathBuf;

  pub fn host() -> String { "127.0.0.1".to_string() }
  pub fn port() -> u16 { 8080 }
  pub fn store_path() -> PathBuf { PathBuf::from("veriface.db") }
  pub fn match_threshold() -> f32 { 0.5 }
  pub fn cors_allow_origin() -> String { "http://localhost:5173".to_string() }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  // Load configuration.
  let settings = config::Config::builder()
    .add_source(config::File::from(cli.config).required(false))
    .add_source(config::Environment::with_prefix("VERIFACE"))
    .build()
    .context("failed to read config file")?;

  let server_cfg: ServerConfig = settings
    .try_deserialize()
    .context("failed to deserialise ServerConfig")?;

  // Expand `~` in store path.
  let store_path = expand_tilde(&server_cfg.store_path);

  // Open SQLite store.
  let store = SqliteStore::open(&store_path)
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;

  let state = ApiState {
    store: Arc::new(store),
    match_threshold: server_cfg.match_threshold,
  };

  let cors_origin = server_cfg
    .cors_allow_origin
    .parse::<HeaderValue>()
    .context("invalid cors_allow_origin")?;
  let cors = CorsLayer::new()
    .allow_origin(cors_origin)
    .allow_methods([Method::GET, Method::POST])
    .allow_headers([header::CONTENT_TYPE]);

  let app = Router::new()
    .nest("/api", veriface_api::api_router(state))
    .layer(cors)
    .layer(TraceLayer::new_for_http());

  let address = format!("{}:{}", server_cfg.host, server_cfg.port);

  tracing::info!(
    store = %store_path.display(),
    threshold = server_cfg.match_threshold,
    "Listening on http://{address}"
  );
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
