//! recupera server binary.
//!
//! Reads `config.toml` (or the path given with `--config`), opens the SQLite
//! lead store, and serves the intake form, admin panel and lead API over
//! HTTP. `RECUPERA_*` environment variables override the file; `PORT`
//! overrides everything for the listening port.

use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;
use recupera_server::{AppState, ServerConfig};
use recupera_store_sqlite::SqliteStore;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Recupera lead-capture server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
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

  let server_cfg = ServerConfig::load(&cli.config)
    .with_context(|| format!("failed to load configuration from {:?}", cli.config))?;

  let store = SqliteStore::open(&server_cfg.store_path)
    .await
    .with_context(|| format!("failed to open store at {:?}", server_cfg.store_path))?;
  tracing::info!(path = ?server_cfg.store_path, "lead store ready");

  let address = server_cfg.address();
  let state = AppState::new(store, server_cfg);
  let app = recupera_server::router(state);

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}
