//! pantryctl - terminal inventory tracker for perishable food
//!
//! Starts (or creates) a local PostgreSQL container, runs the interactive
//! command loop against it, and stops the container on the way out:
//! - `add`, `update`, `delete` manage items and their expiry dates
//! - `view`, `lookup`, `sort` list them
//! - `exit` ends the session
//!
//! `--memory` skips the container and keeps items in process.

use std::io;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use pantryctl_store::{MemoryItemStore, PgItemStore};
use tracing::{debug, error};

mod command;
mod config;
mod container;
mod render;
mod session;
mod tracing_setup;

use config::ConnectionArgs;
use container::STARTUP_GUIDANCE;
use session::Session;
use tracing_setup::TracingConfig;

#[derive(Parser, Debug)]
#[command(
    name = "pantryctl",
    author,
    version,
    about = "Track perishable food and when it expires",
    long_about = "Interactive inventory tracker for perishable food. Items are stored in a \
                  PostgreSQL database running in a local container that pantryctl starts \
                  and stops for you."
)]
struct Cli {
    /// Keep items in memory for this session only (no container, no database)
    #[arg(long)]
    memory: bool,

    /// Enable debug logging on stderr
    #[arg(long)]
    debug: bool,

    #[command(flatten)]
    connection: ConnectionArgs,
}

#[tokio::main]
async fn main() -> ExitCode {
    // Before parsing, so .env values feed clap's env fallbacks
    let loaded_env = config::load_dotenv();
    let cli = Cli::parse();

    if let Err(err) = tracing_setup::init(&TracingConfig { debug: cli.debug }) {
        eprintln!("Failed to initialize logging: {err}");
    }
    config::log_loaded(&loaded_env);

    let result = if cli.memory {
        run_in_memory().await
    } else {
        run_with_database(&cli.connection).await
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %format!("{err:#}"), "Session ended with an error");
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run_in_memory() -> Result<()> {
    let store = MemoryItemStore::new();
    let mut session = Session::new(&store, io::stdin().lock(), io::stdout());
    session.run().await?;
    Ok(())
}

async fn run_with_database(connection: &ConnectionArgs) -> Result<()> {
    let container = connection.container_config();
    let database_config = connection.database_config(&container);

    let database = match container::start_database(&container) {
        Ok(database) => database,
        Err(err) => {
            eprintln!("Failed to start the database.");
            eprintln!("{STARTUP_GUIDANCE}");
            return Err(err).context("Database container did not start");
        }
    };

    let store = match PgItemStore::connect(&database_config).await {
        Ok(store) => store,
        Err(err) => {
            eprintln!("Failed to connect to the database.");
            eprintln!("{STARTUP_GUIDANCE}");
            database.stop_best_effort();
            return Err(err).with_context(|| {
                format!("Database unreachable at {}", database_config.redacted_url())
            });
        }
    };

    debug!(container = database.name(), "Session starting");
    let mut session = Session::new(&store, io::stdin().lock(), io::stdout());
    let outcome = session.run().await;
    drop(session);

    store.close().await;
    database.stop_best_effort();
    outcome
}
