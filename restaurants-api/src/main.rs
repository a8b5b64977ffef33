use std::path::PathBuf;

use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use restaurants_api::{config::Config, db, router, seed, AppState};
use tracing::info;

#[derive(Parser)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run pending migrations, then serve the HTTP API
    Serve,
    /// Run pending migrations and exit
    Migrate,
    /// Replace all rows with the contents of a JSON seed file
    Seed {
        #[arg(default_value = "data/dev.json")]
        path: PathBuf,
    },
}

#[tokio::main]
pub async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config = Config::from_env()?;

    match cli.command {
        Commands::Serve => serve(config).await,
        Commands::Migrate => Ok(db::run_migrations(&config.database_url).await?),
        Commands::Seed { path } => {
            db::run_migrations(&config.database_url).await?;
            let data = seed::SeedData::from_file(&path)?;
            let mut conn = db::establish_connection(&config.database_url).await?;
            seed::seed(&mut conn, &data).await?;
            Ok(())
        }
    }
}

async fn serve(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    db::run_migrations(&config.database_url).await?;

    let pool = db::establish_pool(&config.database_url, config.pool_size)?;
    let app = router(AppState::new(pool));

    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    info!("Restaurants API listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Restaurants API stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
