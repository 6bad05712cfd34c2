mod config;
mod database;
mod entities;
mod forms;
mod http_server;
mod logging;
mod ports;
mod services;
#[cfg(test)]
mod test_utils;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use color_eyre::{
    Result,
    eyre::{Context, eyre},
};

use crate::{config::Config, database::Database, logging::init_tracing};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// The config file to use
    #[arg(short, long, env = "SHOWBOOK_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Log filter, e.g. `info` or `showbook=debug,tower_http=debug`
    #[arg(long, default_value = "info", global = true, env = "LOG_LEVEL")]
    log_level: String,

    /// Also write logs to this file
    #[arg(long, env = "SHOWBOOK_LOG_FILE", global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Serve the booking site
    Serve {
        /// The port to run the server on (default: from config)
        #[arg(short, long, env = "SHOWBOOK_HTTP_PORT")]
        port: Option<u16>,

        /// The address to bind to (default: from config)
        #[arg(long, env = "SHOWBOOK_HOST")]
        host: Option<String>,
    },
    /// Manage the database schema
    #[command(subcommand)]
    Migrate(MigrateCommands),
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Subcommand, Debug)]
enum MigrateCommands {
    /// Apply all pending migrations
    Up,
    /// Roll back the most recent migrations
    Down {
        /// How many migrations to roll back
        #[arg(short, long, default_value_t = 1)]
        steps: u32,
    },
    /// Show which migrations are applied
    Status,
}

#[derive(Subcommand, Debug)]
enum ConfigCommands {
    /// Create a default config file, if it doesn't exist
    CreateDefault,
    /// Print the path to the config file
    Path,
}

fn config_command(command: ConfigCommands, config_path: Option<PathBuf>) -> Result<()> {
    let path = config_path.or_else(Config::config_path);
    match command {
        ConfigCommands::CreateDefault => {
            let path = path.ok_or_else(|| eyre!("No default config path found"))?;
            tracing::debug!("Creating default config");
            Config::create_default(&path)?;
            tracing::info!("Default config created at {}", path.display());
        }
        ConfigCommands::Path => match path {
            Some(path) => println!("{}", path.display()),
            None => println!("No default config path found"),
        },
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let args = Args::parse();
    init_tracing(&args.log_level, args.log_file.as_deref())?;

    tracing::debug!("Showbook starting");

    let load_config = || {
        Config::load(args.config.as_deref()).wrap_err("Failed to load showbook config")
    };

    match args.command {
        Commands::Config(command) => config_command(command, args.config.clone())?,
        Commands::Serve { port, host } => {
            let config = load_config()?;
            let port = port.unwrap_or(config.http.port);
            let host = host.unwrap_or_else(|| config.http.host.clone());

            let database = Database::open(&config.database_path()).await?;

            tracing::info!("Starting HTTP server on {}:{}", host, port);
            http_server::app::start(&host, port, database, config).await?;
        }
        Commands::Migrate(command) => {
            let config = load_config()?;
            let database = Database::connect(&config.database_path()).await?;
            match command {
                MigrateCommands::Up => {
                    database.migrate_up().await?;
                    tracing::info!("Migrations applied");
                }
                MigrateCommands::Down { steps } => {
                    database.migrate_down(steps).await?;
                    tracing::info!("Rolled back {} migration(s)", steps);
                }
                MigrateCommands::Status => database.migration_status().await?,
            }
        }
    }

    Ok(())
}
