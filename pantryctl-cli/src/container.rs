//! Database container lifecycle
//!
//! `start_database` runs `<runtime> start <name>` and, when that fails,
//! creates the container with `<runtime> run ... -d <image>`. The returned
//! [`RunningDatabase`] is consumed by `stop`, so a session releases the
//! container exactly once.

use std::process::{Command, ExitStatus};

use pantryctl_core::config::CONTAINER_POSTGRES_PORT;
use pantryctl_core::ContainerConfig;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Shown after any failure to bring the database up
pub const STARTUP_GUIDANCE: &str = "Make sure the container runtime is running \
(e.g. open Docker Desktop and wait for the engine to start), then run pantryctl again.";

#[derive(Error, Debug)]
pub enum ContainerError {
    #[error("failed to run `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{command}` exited with {status}")]
    Failed { command: String, status: ExitStatus },
}

/// Arguments for restarting an existing container
fn start_args(config: &ContainerConfig) -> Vec<String> {
    vec!["start".to_string(), config.name.clone()]
}

/// Arguments for creating and starting a new container
fn run_args(config: &ContainerConfig) -> Vec<String> {
    vec![
        "run".to_string(),
        "--name".to_string(),
        config.name.clone(),
        "-e".to_string(),
        format!("POSTGRES_USER={}", config.user),
        "-e".to_string(),
        format!("POSTGRES_PASSWORD={}", config.password),
        "-e".to_string(),
        format!("POSTGRES_DB={}", config.database),
        "-p".to_string(),
        format!("{}:{}", config.port, CONTAINER_POSTGRES_PORT),
        "-d".to_string(),
        config.image.clone(),
    ]
}

fn stop_args(config: &ContainerConfig) -> Vec<String> {
    vec!["stop".to_string(), config.name.clone()]
}

/// Command line for messages; the password never appears in it.
fn describe(runtime: &str, args: &[String]) -> String {
    let shown: Vec<String> = args
        .iter()
        .map(|arg| {
            if arg.starts_with("POSTGRES_PASSWORD=") {
                "POSTGRES_PASSWORD=***".to_string()
            } else {
                arg.clone()
            }
        })
        .collect();
    format!("{} {}", runtime, shown.join(" "))
}

/// Run the runtime with inherited stdio, failing on a non-zero exit.
fn run_runtime(runtime: &str, args: &[String]) -> Result<(), ContainerError> {
    let command = describe(runtime, args);
    debug!(command = %command, "Running container runtime");

    let status = Command::new(runtime)
        .args(args)
        .status()
        .map_err(|source| ContainerError::Spawn {
            command: command.clone(),
            source,
        })?;

    if !status.success() {
        return Err(ContainerError::Failed { command, status });
    }
    Ok(())
}

/// Start the named container, creating it first if it does not exist.
pub fn start_database(config: &ContainerConfig) -> Result<RunningDatabase, ContainerError> {
    println!("Starting the database...");

    if let Err(err) = run_runtime(&config.runtime, &start_args(config)) {
        // Spawn errors mean the runtime itself is missing; `run` would fail the same way
        if matches!(err, ContainerError::Spawn { .. }) {
            return Err(err);
        }
        info!(container = %config.name, "Container not startable, creating it");
        run_runtime(&config.runtime, &run_args(config))?;
    }

    println!("Database started successfully.");
    info!(container = %config.name, "Database container running");
    Ok(RunningDatabase {
        config: config.clone(),
    })
}

/// Handle to a container started by this session
#[derive(Debug)]
#[must_use = "a running database must be stopped"]
pub struct RunningDatabase {
    config: ContainerConfig,
}

impl RunningDatabase {
    pub fn name(&self) -> &str {
        &self.config.name
    }

    /// Stop the container.
    pub fn stop(self) -> Result<(), ContainerError> {
        println!("Stopping the database...");
        run_runtime(&self.config.runtime, &stop_args(&self.config))?;
        println!("Database stopped successfully.");
        info!(container = %self.config.name, "Database container stopped");
        Ok(())
    }

    /// Stop the container, reporting but otherwise ignoring failure.
    pub fn stop_best_effort(self) {
        let name = self.config.name.clone();
        if let Err(err) = self.stop() {
            eprintln!("Failed to stop the database. {err}");
            warn!(container = %name, error = %err, "Failed to stop database container");
        }
    }
}
