use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use portfolio_api::config;
use portfolio_api::db;
use portfolio_api::seed;

#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "Wipe the database and fill it with sample skills, projects and a profile"
)]
struct Args {
    /// Path to YAML config file
    #[arg(long, default_value = "config.yaml")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();

    let args = Args::parse();
    let cfg = config::load(Some(&args.config))?;
    cfg.ensure_dirs()?;

    let pool = db::init_pool(&cfg.database_url()).await?;
    db::run_migrations(&pool).await?;

    let summary = seed::seed(&pool).await?;
    println!(
        "Database seeded! {} skills, {} projects, profile id {}",
        summary.skills, summary.projects, summary.profile_id
    );
    Ok(())
}
