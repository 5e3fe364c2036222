//! # Database
//!
//! Opens the [SurrealDB](https://surrealdb.com) session that stores submitted contacts.
//!
//! The `any` engine picks the backend from the URL scheme: `mem://` for tests and local runs,
//! `rocksdb://` behind the `storage-rocksdb` feature, `ws://` or `http://` for a server.
//! Every connect waits for the engine to report healthy and applies the embedded schema.
//!
//! ```rust
//! use agenda_database::{ConnectOptions, Database, DatabaseError};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), DatabaseError> {
//!     let db = Database::connect(ConnectOptions::in_memory("agenda", "contatos")).await?;
//!     db.health().await?;
//!     Ok(())
//! }
//! ```

mod error;
mod schema;

pub use error::{DatabaseError, DatabaseErrorExt};

use std::ops::Deref;
use std::time::Duration;
use surrealdb::Surreal;
use surrealdb::engine::any::{self, Any};
use surrealdb::opt::auth::Root;
use tracing::{info, instrument, warn};

const HEALTH_ATTEMPTS: u32 = 3;
const FIRST_RETRY_DELAY: Duration = Duration::from_millis(500);

/// Where and as whom to connect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectOptions {
    pub url: String,
    pub namespace: String,
    pub database: String,
    /// Root sign-in, needed by remote servers. Embedded engines ignore it.
    pub root: Option<(String, String)>,
}

impl ConnectOptions {
    pub fn in_memory(namespace: impl Into<String>, database: impl Into<String>) -> Self {
        Self {
            url: "mem://".to_owned(),
            namespace: namespace.into(),
            database: database.into(),
            root: None,
        }
    }

    fn validate(&self) -> Result<(), DatabaseError> {
        let missing = [("url", &self.url), ("namespace", &self.namespace), ("database", &self.database)]
            .into_iter()
            .find(|(_, value)| value.trim().is_empty());

        match missing {
            Some((name, _)) => Err(DatabaseError::Validation {
                message: format!("Database {name} is empty").into(),
                context: None,
            }),
            None => Ok(()),
        }
    }
}

/// Shared handle to the contact store session. Clones share one connection.
#[derive(Debug, Clone)]
pub struct Database {
    client: Surreal<Any>,
}

impl Database {
    /// Connects, selects the namespace and database, then applies the schema.
    ///
    /// # Errors
    /// * [`DatabaseError::Validation`] if the URL, namespace or database is blank.
    /// * [`DatabaseError::Connection`] if the engine cannot start or stays unhealthy.
    /// * [`DatabaseError::Auth`] if root sign-in is refused.
    /// * [`DatabaseError::Surreal`] or [`DatabaseError::Schema`] if the session or schema fails.
    #[instrument(skip_all, fields(url = %options.url, ns = %options.namespace, db = %options.database))]
    pub async fn connect(options: ConnectOptions) -> Result<Self, DatabaseError> {
        options.validate()?;
        let ConnectOptions { url, namespace, database, root } = options;

        let client = any::connect(&url).await.map_err(|e| DatabaseError::Connection {
            message: e.to_string().into(),
            context: Some(format!("Starting engine for {url}").into()),
        })?;
        wait_until_healthy(&client, &url).await?;

        if let Some((username, password)) = root {
            client.signin(Root { username, password }).await.map_err(|e| DatabaseError::Auth {
                message: e.to_string().into(),
                context: Some(url.clone().into()),
            })?;
        }

        client.use_ns(&namespace).use_db(&database).await.context("Selecting contact store")?;

        for script in schema::apply(&client).await? {
            info!(script, "Schema script applied");
        }
        info!(%namespace, %database, "Contact store ready");

        Ok(Self { client })
    }
}

async fn wait_until_healthy(client: &Surreal<Any>, url: &str) -> Result<(), DatabaseError> {
    let mut delay = FIRST_RETRY_DELAY;

    for attempt in 1..=HEALTH_ATTEMPTS {
        match client.health().await {
            Ok(()) => return Ok(()),
            Err(e) if attempt < HEALTH_ATTEMPTS => {
                warn!(attempt, ?delay, error = %e, "Contact store not healthy yet");
                tokio::time::sleep(delay).await;
                delay *= 2;
            },
            Err(e) => {
                return Err(DatabaseError::Connection {
                    message: e.to_string().into(),
                    context: Some(format!("{url} unhealthy after {HEALTH_ATTEMPTS} checks").into()),
                });
            },
        }
    }

    Ok(())
}

impl Deref for Database {
    type Target = Surreal<Any>;

    fn deref(&self) -> &Self::Target {
        &self.client
    }
}
