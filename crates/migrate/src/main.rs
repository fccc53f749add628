use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use shared::{
    config::{Config, ConnectionManager},
    migrations::MigrationExecutor,
    utils::init_logger,
};
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(name = "migrate", version, about = "Apply and inspect storefront schema migrations")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Apply pending migrations, optionally stopping at TARGET
    Migrate {
        target: Option<String>,
    },
    /// List every migration and whether it has been applied
    Showmigrations,
    /// Print the SQL a migration would run
    Sqlmigrate {
        name: String,
    },
    /// Fail when the migrations no longer produce the declared models
    Check,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    dotenv::dotenv().ok();

    let cli = Cli::parse();
    let config = Config::init().context("Failed to load configuration")?;

    init_logger("migrate", config.is_dev, config.enable_file_log);

    let pool = ConnectionManager::new_pool(
        &config.database_url,
        config.db_min_conn,
        config.db_max_conn,
    )
    .await
    .context("Failed to connect to database")?;

    let executor =
        MigrationExecutor::from_history(pool).context("Failed to load migration history")?;

    match cli.command {
        Commands::Migrate { target } => {
            let report = executor
                .migrate(target.as_deref())
                .await
                .context("Migration failed")?;
            for name in &report.applied {
                println!("  Applying {name}... OK");
            }
            info!("✅ {} migration(s) applied", report.applied.len());
        }
        Commands::Showmigrations => {
            for status in executor.show().await? {
                let mark = if status.is_applied() { "X" } else { " " };
                println!(" [{mark}] {}", status.name);
            }
        }
        Commands::Sqlmigrate { name } => {
            for statement in executor.sql_for(&name)? {
                println!("{statement}");
            }
        }
        Commands::Check => {
            let changes = executor.check()?;
            if !changes.is_empty() {
                for change in &changes {
                    println!("  - {change}");
                }
                error!("❌ Models have changes not reflected in migrations");
                return Ok(ExitCode::FAILURE);
            }
            println!("No changes detected");
        }
    }

    Ok(ExitCode::SUCCESS)
}
