use catalog::core::{AppState, Config, db};
use catalog::{create_router, seed};
use clap::{Parser, Subcommand};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "catalog")]
#[command(about = "Library catalog HTTP/JSON service", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP server (default)
    Serve,

    /// Fill the database with demo users, libraries, genres, authors, books and comments
    Seed {
        /// Seed for the random owner/genre choices
        #[arg(long)]
        rng_seed: Option<u64>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let config = Config::from_env().inspect_err(|e| error!("Configuration error: {}", e))?;
    config.log_info();

    let pool = db::connect(&config).await?;
    let state = Arc::new(AppState::new(pool, config.jwt_secret.clone()));

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => {
            let app = create_router(state);

            let addr = format!("{}:{}", config.server_host, config.server_port);
            let listener = TcpListener::bind(&addr).await?;
            info!("Server listening on http://{}", addr);

            axum::serve(listener, app).await?;
        }
        Command::Seed { rng_seed } => {
            let report = seed::fill(&state, rng_seed).await?;
            info!(
                "Seeded {} users, {} libraries, {} genres, {} authors, {} books, {} comments",
                report.users,
                report.libraries,
                report.genres,
                report.authors,
                report.books,
                report.comments
            );
        }
    }

    Ok(())
}
