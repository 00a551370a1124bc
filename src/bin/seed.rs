use clap::Parser;
use football_academy::config::DatabaseConfig;
use football_academy::seed::{AcademySeeder, SeedConfig};
use tracing_subscriber::EnvFilter;

/// Generate demo data: teams for every age group, seasons of match and
/// training history, injuries, development plans and family accounts.
#[derive(Parser, Debug)]
#[command(name = "academy-seed")]
struct Args {
    /// SQLite database URL (defaults to DATABASE_URL)
    #[arg(long)]
    database_url: Option<String>,

    /// Wipe existing academy data before seeding
    #[arg(long)]
    clear: bool,

    /// Number of seasons to generate, ending with the current one
    #[arg(long, default_value_t = 3)]
    seasons: u32,

    /// Fixed RNG seed; reruns reproduce the identical academy
    #[arg(long)]
    rng_seed: Option<u64>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let args = Args::parse();

    let mut db_config = DatabaseConfig::from_env()?;
    if let Some(url) = args.database_url {
        db_config.database_url = url;
    }

    let db = db_config.create_pool_and_migrate().await?;

    let config = SeedConfig {
        seasons: args.seasons,
        clear: args.clear,
        rng_seed: args.rng_seed,
    };

    AcademySeeder::new(db, config).run().await?;

    Ok(())
}
