use crate::error::{DatabaseError, DatabaseErrorExt};
use surrealdb::Surreal;
use surrealdb::engine::any::Any;

/// A schema script embedded at compile time.
///
/// Scripts must be idempotent (`DEFINE ... IF NOT EXISTS`): all of them run on every boot.
#[derive(Debug)]
pub(crate) struct SchemaScript {
    pub name: &'static str,
    pub source: &'static str,
}

const SCRIPTS: &[SchemaScript] =
    &[SchemaScript { name: "contato", source: include_str!("../schema/contato.surql") }];

pub(crate) async fn apply(db: &Surreal<Any>) -> Result<Vec<&'static str>, DatabaseError> {
    let mut applied = Vec::with_capacity(SCRIPTS.len());

    for script in SCRIPTS {
        if script.source.trim().is_empty() {
            return Err(DatabaseError::Schema {
                message: format!("Schema script '{}' is empty", script.name).into(),
                context: None,
            });
        }

        db.query(script.source)
            .await
            .context(format!("Sending schema script '{}'", script.name))?
            .check()
            .map_err(surrealdb::Error::from)
            .context(format!("Executing schema script '{}'", script.name))?;

        applied.push(script.name);
    }

    Ok(applied)
}
