use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use habitlog_core::config::db_path_from_env;
use habitlog_core::{DEFAULT_HISTOGRAM_HOURS, DEFAULT_PIVOT_DAYS};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "habitlog")]
#[command(about = "Personal habit and medicine tracker", long_about = None)]
#[command(version)]
struct Cli {
    /// SQLite database file (overrides HABITLOG_DB_PATH)
    #[arg(long, global = true)]
    db: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API server
    Serve {
        #[arg(short, long, env = "PORT", default_value = "3000")]
        port: u16,
        #[arg(short = 'H', long, default_value = "127.0.0.1")]
        host: String,
    },
    /// Issue a fresh access/refresh token pair
    Tokens {
        /// Print JSON instead of KEY=value lines
        #[arg(long)]
        json: bool,
    },
    /// Daily dose totals for one substance, ending today
    Pivot {
        name: String,
        #[arg(short, long, default_value_t = DEFAULT_PIVOT_DAYS)]
        days: u32,
    },
    /// Doses per hour for one substance, ending with the current hour
    Histogram {
        name: String,
        #[arg(short = 'n', long, default_value_t = DEFAULT_HISTOGRAM_HOURS)]
        hours: u32,
    },
    /// Every substance name on record
    Substances,
    /// Row counts
    Stats,
    /// Apply pending schema migrations
    Migrate,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let db_path = cli.db.unwrap_or_else(db_path_from_env);

    match cli.command {
        Commands::Serve { port, host } => commands::serve::run(db_path, &host, port).await,
        Commands::Tokens { json } => commands::tokens::run(json),
        Commands::Pivot { name, days } => commands::report::run_pivot(&db_path, &name, days).await,
        Commands::Histogram { name, hours } => {
            commands::report::run_histogram(&db_path, &name, hours).await
        },
        Commands::Substances => commands::report::run_substances(&db_path).await,
        Commands::Stats => commands::report::run_stats(&db_path).await,
        Commands::Migrate => commands::migrate::run(&db_path),
    }
}
