use crate::error::ContactsError;
use agenda_database::{Database, DatabaseErrorExt};
use agenda_domain::contact::Contact;
use async_trait::async_trait;
use std::fmt::Debug;
use surrealdb::types::SurrealValue;
use tracing::instrument;

const CREATE_CONTACT: &str =
    "CREATE contato SET nome = $nome, telefone = $telefone, email = $email";

// Ordering happens in the inner select so the sort keys stay out of the projection.
// `created_at` has nanosecond resolution; rows stamped in the same instant fall back to
// record id order, which is deterministic but not necessarily insertion order.
const LIST_CONTACTS: &str = "SELECT name, phone, email FROM \
     (SELECT id, nome AS name, telefone AS phone, email, created_at FROM contato \
      ORDER BY created_at ASC, id ASC)";

/// Storage port for submitted contacts.
#[async_trait]
pub trait ContactRepository: Debug + Send + Sync {
    /// Stores one validated contact.
    async fn create(&self, contact: Contact) -> Result<(), ContactsError>;

    /// Returns every stored contact, oldest first. Two calls without a write in between
    /// return the same sequence.
    async fn list_all(&self) -> Result<Vec<Contact>, ContactsError>;
}

#[derive(Debug, SurrealValue)]
struct ContactRow {
    name: String,
    phone: String,
    email: String,
}

impl From<ContactRow> for Contact {
    fn from(row: ContactRow) -> Self {
        Self { name: row.name, phone: row.phone, email: row.email }
    }
}

/// [`ContactRepository`] backed by the `contato` table.
#[derive(Debug, Clone)]
pub struct SurrealContactRepository {
    db: Database,
}

impl SurrealContactRepository {
    #[must_use]
    pub const fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ContactRepository for SurrealContactRepository {
    #[instrument(skip_all)]
    async fn create(&self, contact: Contact) -> Result<(), ContactsError> {
        self.db
            .query(CREATE_CONTACT)
            .bind(("nome", contact.name))
            .bind(("telefone", contact.phone))
            .bind(("email", contact.email))
            .await
            .context("Sending contact insert")?
            .check()
            .map_err(surrealdb::Error::from)
            .context("Inserting contact")?;

        Ok(())
    }

    #[instrument(skip_all)]
    async fn list_all(&self) -> Result<Vec<Contact>, ContactsError> {
        let rows = self
            .db
            .query(LIST_CONTACTS)
            .await
            .context("Loading contacts")?
            .take::<Vec<ContactRow>>(0)
            .context("Parsing contacts")?;

        Ok(rows.into_iter().map(Contact::from).collect())
    }
}
