use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

use portfolio_api::api::{self, AppState};
use portfolio_api::config;
use portfolio_api::db;
use portfolio_api::store::SqliteStore;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Path to YAML config file
    #[arg(long, default_value = "config.yaml")]
    config: PathBuf,

    /// Override `server.bind` from the config file
    #[arg(long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();

    let args = Args::parse();
    let mut cfg = config::load(Some(&args.config))?;
    if let Some(bind) = args.bind {
        cfg.server.bind = bind;
    }
    cfg.ensure_dirs()?;
    let addr = cfg.bind_addr()?;

    let pool = db::init_pool(&cfg.database_url()).await?;
    db::run_migrations(&pool).await?;

    let state = AppState::new(Arc::new(SqliteStore::new(pool)), cfg.profile.default_id);
    let app = api::router(state, &cfg.server)?;

    info!(prefix = %cfg.server.api_prefix, "starting portfolio api");
    api::serve(app, addr).await
}
