//! # Agenda Server
//!
//! Serves the contact form over HTTP. Contacts live in `SurrealDB`; every request is
//! appended to the access log by a background writer.
//!
//! ```no_run
//! use agenda_domain::config::ApiConfig;
//! use agenda_server::Server;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> anyhow::Result<()> {
//!     Server::new(ApiConfig::default()).await?.run().await
//! }
//! ```

mod router;

use agenda_contacts::SurrealContactRepository;
use agenda_database::{ConnectOptions, Database};
use agenda_domain::config::{ApiConfig, DatabaseConfig};
use agenda_logger::{AccessLog, AccessLogWorker};
use anyhow::{Context, Result};
use axum::Router;
use axum_server::Handle;
use std::io::{self, Write};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::signal;
use tracing::{error, info, warn};

/// In-flight requests get this long to finish after a shutdown signal.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(30);
const ACCESS_LOG_DRAIN: Duration = Duration::from_secs(5);

/// The contact service, wired and ready to listen.
#[must_use = "call .run().await to start serving"]
#[derive(Debug)]
pub struct Server {
    address: SocketAddr,
    router: Router,
    access_log: AccessLogWorker,
}

impl Server {
    /// Opens the contact store and starts the access log writer.
    ///
    /// # Errors
    /// Fails when the database cannot be reached or the access log settings are invalid.
    pub async fn new(cfg: ApiConfig) -> Result<Self> {
        let address = SocketAddr::new(cfg.server.address, cfg.server.port);

        let db = Database::connect(connect_options(&cfg.database))
            .await
            .context("Failed to open the contact database")?;

        let (log, access_log) = AccessLog::builder()
            .path(&cfg.access_log.path)
            .capacity(cfg.access_log.capacity)
            .spawn()
            .context("Failed to start the access log writer")?;

        let router = router::init(Arc::new(SurrealContactRepository::new(db)), log);
        info!(%address, "Contact service ready");

        Ok(Self { address, router, access_log })
    }

    /// The address [`run`](Self::run) binds to.
    #[must_use]
    pub const fn address(&self) -> SocketAddr {
        self.address
    }

    /// The fully layered router, for driving requests without a listener.
    #[must_use]
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Serves until Ctrl+C or SIGTERM, then drains the access log.
    ///
    /// The start-up line goes to stdout once the socket is bound, whatever the log filter.
    ///
    /// # Errors
    /// Returns an error if the address cannot be bound.
    pub async fn run(self) -> Result<()> {
        let Self { address, router, access_log } = self;
        let handle = Handle::<SocketAddr>::new();

        tokio::spawn(stop_on_signal(handle.clone()));
        let listening = handle.clone();
        tokio::spawn(async move {
            if let Some(bound) = listening.listening().await
                && let Err(e) = announce(&mut io::stdout().lock(), bound)
            {
                warn!("Could not write the start-up line: {e}");
            }
        });

        axum_server::bind(address)
            .handle(handle)
            .serve(router.into_make_service())
            .await
            .with_context(|| format!("HTTP server on {address} failed"))?;

        if tokio::time::timeout(ACCESS_LOG_DRAIN, access_log.finish()).await.is_err() {
            warn!("Access log writer did not drain in time");
        }
        info!("Stopped");
        Ok(())
    }
}

fn connect_options(cfg: &DatabaseConfig) -> ConnectOptions {
    ConnectOptions {
        url: cfg.url.clone(),
        namespace: cfg.namespace.clone(),
        database: cfg.database.clone(),
        root: cfg.credentials.as_ref().map(|c| (c.username.clone(), c.password.clone())),
    }
}

/// Writes the line announcing where the service listens.
fn announce(out: &mut impl Write, address: SocketAddr) -> io::Result<()> {
    writeln!(out, "rodando... http://{address}")?;
    out.flush()
}

async fn stop_on_signal(handle: Handle<SocketAddr>) {
    match shutdown_signal().await {
        Ok(()) => {
            info!("Shutdown signal received, finishing in-flight requests");
            handle.graceful_shutdown(Some(SHUTDOWN_GRACE));
        },
        Err(e) => error!("Cannot listen for shutdown signals: {e:#}"),
    }
}

async fn shutdown_signal() -> Result<()> {
    let ctrl_c = async { signal::ctrl_c().await.context("Ctrl+C handler") };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .context("SIGTERM handler")?
            .recv()
            .await;
        Ok::<_, anyhow::Error>(())
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<Result<()>>();

    tokio::select! {
        res = ctrl_c => res,
        res = terminate => res,
    }
}
