use fids::config::{FidsConfig, load_environment, log_env_files};
use fids::db::{connect, pending_migrations, run_migrations};

/// Applies pending schema migrations to the configured store.
/// `--check` only lists them and exits non-zero when any are pending.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env_files = load_environment()?;
    let config = FidsConfig::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();
    log_env_files(&env_files);

    let check_only = std::env::args().skip(1).any(|arg| arg == "--check");

    let pool = connect(&config.database_url).await?;
    let pending = pending_migrations(&pool).await?;

    if pending.is_empty() {
        println!("Database is up to date ✓");
        return Ok(());
    }

    println!("Pending migrations:");
    for version in &pending {
        println!("    {}", version);
    }

    if check_only {
        anyhow::bail!("{} migration(s) pending", pending.len());
    }

    run_migrations(&pool).await?;
    println!("Applied {} migration(s) ✓", pending.len());
    Ok(())
}
