//! Service settings, read by `agenda_kernel::config::load_config`.
//!
//! Every section and field has a default, so an empty source yields a runnable setup:
//! plain HTTP on port 4000, an in-memory store and `access.log` in the working directory.

use serde::Deserialize;
use std::net::{IpAddr, Ipv4Addr};
use std::path::PathBuf;

pub const DEFAULT_PORT: u16 = 4000;
pub const DEFAULT_DATABASE_URL: &str = "mem://";
pub const DEFAULT_NAMESPACE: &str = "agenda";
pub const DEFAULT_DATABASE: &str = "contatos";
pub const DEFAULT_ACCESS_LOG: &str = "access.log";
pub const DEFAULT_ACCESS_LOG_CAPACITY: usize = 1024;
pub const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub access_log: AccessLogConfig,
    pub logging: LoggingConfig,
}

/// Where the HTTP listener binds.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub address: IpAddr,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { address: Ipv4Addr::UNSPECIFIED.into(), port: DEFAULT_PORT }
    }
}

/// Contact store location. Any URL the `SurrealDB` `any` engine accepts.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub url: String,
    pub namespace: String,
    pub database: String,
    /// Root sign-in for remote engines; embedded engines run without it.
    pub credentials: Option<DatabaseCredentials>,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_DATABASE_URL.to_owned(),
            namespace: DEFAULT_NAMESPACE.to_owned(),
            database: DEFAULT_DATABASE.to_owned(),
            credentials: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DatabaseCredentials {
    pub username: String,
    pub password: String,
}

/// Request access log sink.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AccessLogConfig {
    /// File the access lines are appended to, relative to the working directory.
    pub path: PathBuf,
    /// Entries buffered between request handlers and the writer task.
    pub capacity: usize,
}

impl Default for AccessLogConfig {
    fn default() -> Self {
        Self { path: DEFAULT_ACCESS_LOG.into(), capacity: DEFAULT_ACCESS_LOG_CAPACITY }
    }
}

/// Diagnostic (tracing) output.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive; `RUST_LOG` takes precedence.
    pub filter: String,
    /// Also write daily rolling files here. Console only when unset.
    pub directory: Option<PathBuf>,
    /// Write the rolling files as JSON lines.
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { filter: DEFAULT_LOG_FILTER.to_owned(), directory: None, json: false }
    }
}
