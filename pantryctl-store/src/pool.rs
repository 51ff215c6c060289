//! Database connection pool management
//!
//! Uses sqlx PgPool with explicit connection limits.

use std::time::{Duration, Instant};

use pantryctl_core::DatabaseConfig;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::{debug, info};

/// Delay between readiness probes while a container is starting.
const READY_POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Per-attempt cap on acquiring a connection.
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

/// Create a PostgreSQL connection pool.
///
/// # Errors
///
/// Returns an error if the first connection fails.
///
/// # Example
///
/// ```ignore
/// let pool = create_pool(&DatabaseConfig::resolve(None, &container, timeout)).await?;
/// ```
pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(ACQUIRE_TIMEOUT)
        .connect(&config.url)
        .await
}

/// Connect, polling until the server accepts connections or
/// `config.ready_timeout` elapses.
///
/// A container that was just started needs a few seconds before PostgreSQL
/// listens on its port. Only errors that look like "not up yet" are polled
/// through; anything else (bad credentials, unknown host) fails at once.
pub async fn wait_until_ready(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    let start = Instant::now();
    let mut attempts = 0u32;

    loop {
        attempts += 1;

        match create_pool(config).await {
            Ok(pool) => {
                info!(
                    url = %config.redacted_url(),
                    attempts,
                    "Connected to database"
                );
                return Ok(pool);
            }
            Err(err) if is_starting_up(&err) && start.elapsed() < config.ready_timeout => {
                debug!(
                    attempt = attempts,
                    delay_ms = READY_POLL_INTERVAL.as_millis() as u64,
                    error = %err,
                    "Database not ready, waiting"
                );
                tokio::time::sleep(READY_POLL_INTERVAL).await;
            }
            Err(err) => return Err(err),
        }
    }
}

/// Errors a PostgreSQL server produces while it is still booting.
fn is_starting_up(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Io(_) | sqlx::Error::PoolTimedOut | sqlx::Error::Protocol(_) => true,
        // 57P03: cannot_connect_now ("the database system is starting up")
        sqlx::Error::Database(db) => db.code().as_deref() == Some("57P03"),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pantryctl_core::ContainerConfig;

    #[test]
    fn io_errors_count_as_starting_up() {
        let refused = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        assert!(is_starting_up(&sqlx::Error::Io(refused)));
        assert!(is_starting_up(&sqlx::Error::PoolTimedOut));
        assert!(!is_starting_up(&sqlx::Error::RowNotFound));
        assert!(!is_starting_up(&sqlx::Error::Configuration("bad url".into())));
    }

    #[tokio::test]
    async fn malformed_url_fails_without_waiting() {
        let config = DatabaseConfig::resolve(
            Some("not a url".to_string()),
            &ContainerConfig::default(),
            Duration::from_secs(60),
        );
        let started = Instant::now();
        assert!(wait_until_ready(&config).await.is_err());
        assert!(started.elapsed() < Duration::from_secs(10));
    }

    // Integration tests require a real database
    // Run with: DATABASE_URL=postgres://... cargo test -p pantryctl-store -- --ignored

    #[tokio::test]
    #[ignore = "requires database"]
    async fn pool_acquires_connection() {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let config = DatabaseConfig::resolve(Some(url), &ContainerConfig::default(), Duration::ZERO);
        let pool = wait_until_ready(&config).await.expect("pool creation failed");

        let result: (i32,) = sqlx::query_as("SELECT 1")
            .fetch_one(&pool)
            .await
            .expect("query failed");

        assert_eq!(result.0, 1);
    }
}
