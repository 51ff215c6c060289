//! Session configuration
//!
//! Built once at startup (the CLI fills these from flags, environment and
//! `.env` files) and handed by reference to the container lifecycle and the
//! store.

use std::time::Duration;

/// Default container name when `DOCKER_CONTAINER_NAME` is unset
pub const DEFAULT_CONTAINER_NAME: &str = "pantryctl-db";

/// Port PostgreSQL listens on inside the container
pub const CONTAINER_POSTGRES_PORT: u16 = 5432;

/// How to run the local database container
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerConfig {
    /// Container runtime binary (`docker`, `podman`, ...)
    pub runtime: String,
    pub name: String,
    pub image: String,
    pub user: String,
    pub password: String,
    /// Host port mapped to the container's 5432
    pub port: u16,
    pub database: String,
}

impl Default for ContainerConfig {
    fn default() -> Self {
        Self {
            runtime: "docker".to_string(),
            name: DEFAULT_CONTAINER_NAME.to_string(),
            image: "postgres".to_string(),
            user: "postgres".to_string(),
            password: "postgres".to_string(),
            port: CONTAINER_POSTGRES_PORT,
            database: "pantry".to_string(),
        }
    }
}

impl ContainerConfig {
    /// Connection string for the database this container serves on localhost.
    pub fn local_database_url(&self) -> String {
        format!(
            "postgres://{}:{}@localhost:{}/{}",
            urlencoding::encode(&self.user),
            urlencoding::encode(&self.password),
            self.port,
            urlencoding::encode(&self.database)
        )
    }
}

/// How to reach the database once it is running
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub url: String,
    /// Kept low: there is exactly one operator
    pub max_connections: u32,
    /// Upper bound on waiting for a freshly started container to accept connections
    pub ready_timeout: Duration,
}

impl DatabaseConfig {
    /// Use `explicit_url` when given, otherwise derive it from the container settings.
    pub fn resolve(
        explicit_url: Option<String>,
        container: &ContainerConfig,
        ready_timeout: Duration,
    ) -> Self {
        let url = explicit_url
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| container.local_database_url());
        Self {
            url,
            max_connections: 2,
            ready_timeout,
        }
    }

    /// URL with any password replaced, for logs.
    pub fn redacted_url(&self) -> String {
        redact_password(&self.url)
    }
}

fn redact_password(url: &str) -> String {
    let Some(scheme_end) = url.find("://") else {
        return url.to_string();
    };
    let rest = &url[scheme_end + 3..];
    let Some(at) = rest.rfind('@') else {
        return url.to_string();
    };
    let userinfo = &rest[..at];
    match userinfo.find(':') {
        Some(colon) => format!(
            "{}{}:***{}",
            &url[..scheme_end + 3],
            &userinfo[..colon],
            &rest[at..]
        ),
        None => url.to_string(),
    }
}
