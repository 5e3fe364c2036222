//! # Contacts
//!
//! The contact submission slice: a form page, a submission endpoint and a listing.
//!
//! * [`validation`] turns a raw [`ContactForm`](agenda_domain::contact::ContactForm) into a
//!   [`Contact`](agenda_domain::contact::Contact) or the list of violated rules.
//! * [`ContactRepository`] is the storage port; [`SurrealContactRepository`] implements it
//!   over the shared database handle.
//! * [`router`] wires the three routes around a repository.
//!
//! ## Example
//!
//! ```rust,no_run
//! use agenda_contacts::{SurrealContactRepository, router};
//! use agenda_database::{ConnectOptions, Database};
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let db = Database::connect(ConnectOptions::in_memory("agenda", "contatos")).await?;
//! let app = router(Arc::new(SurrealContactRepository::new(db)));
//! # let _ = app;
//! # Ok(())
//! # }
//! ```

mod error;
mod handlers;
mod repository;
pub mod validation;
mod views;

pub use crate::error::{ContactsError, ContactsErrorExt};
pub use crate::repository::{ContactRepository, SurrealContactRepository};
pub use crate::views::{ContactListView, IndexView};

use agenda_domain::constants::{CONTACTS_PATH, INDEX_PATH};
use axum::Router;
use axum::routing::get;
use std::sync::Arc;

/// Shared state of the contact routes.
#[derive(Debug, Clone)]
pub(crate) struct ContactsState {
    repository: Arc<dyn ContactRepository>,
}

/// Builds the contact routes:
///
/// * `GET /` renders the submission form.
/// * `POST /` validates a URL-encoded submission and stores it.
/// * `GET /contatos` lists every stored contact.
pub fn router(repository: Arc<dyn ContactRepository>) -> Router {
    Router::new()
        .route(INDEX_PATH, get(handlers::form_page).post(handlers::submit))
        .route(CONTACTS_PATH, get(handlers::list))
        .with_state(ContactsState { repository })
}
