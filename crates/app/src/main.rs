//! Boutique Operator CLI

use std::{path::PathBuf, process};

use boutique_app::{
    database::{self, Db},
    domain::products::PgProductsService,
    seeding,
};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "boutique-app", about = "Boutique operator CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Apply pending database migrations
    Migrate(DatabaseArgs),

    /// Load the brand catalogs into the database
    Seed(SeedArgs),
}

#[derive(Debug, Args)]
struct DatabaseArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL")]
    database_url: String,
}

#[derive(Debug, Args)]
struct SeedArgs {
    #[command(flatten)]
    database: DatabaseArgs,

    /// Directory holding `celeste.json` and `mewave.json`
    #[arg(long, env = "ASSETS_DIR", default_value = "../assets/products")]
    assets_dir: PathBuf,

    /// Apply migrations before seeding
    #[arg(long, default_value_t = false)]
    migrate: bool,
}

#[tokio::main]
pub async fn main() {
    let _env = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .compact()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    if let Err(error) = run(cli).await {
        eprintln!("{error}");
        process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), String> {
    match cli.command {
        Commands::Migrate(args) => migrate(&args).await,
        Commands::Seed(args) => seed(args).await,
    }
}

async fn migrate(args: &DatabaseArgs) -> Result<(), String> {
    let pool = database::connect(&args.database_url, 1)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    database::migrate(&pool)
        .await
        .map_err(|error| format!("failed to apply migrations: {error}"))?;

    println!("migrations applied");

    Ok(())
}

async fn seed(args: SeedArgs) -> Result<(), String> {
    let pool = database::connect(&args.database.database_url, 2)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    if args.migrate {
        database::migrate(&pool)
            .await
            .map_err(|error| format!("failed to apply migrations: {error}"))?;
    }

    let products = PgProductsService::new(Db::new(pool));

    let summary = seeding::seed(&products, &args.assets_dir)
        .await
        .map_err(|error| format!("failed to seed catalog: {error}"))?;

    println!("stores: {}", summary.stores);
    println!("products: {}", summary.products);
    println!("skipped: {}", summary.skipped);

    Ok(())
}
