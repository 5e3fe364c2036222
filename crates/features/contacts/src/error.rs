use agenda_database::DatabaseError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use std::borrow::Cow;
use tracing::error;

/// A specialized [`ContactsError`] enum of this crate.
#[derive(Debug, thiserror::Error)]
pub enum ContactsError {
    /// The contact store rejected or could not run a query.
    #[error("Contact store error{}: {source}", format_context(.context))]
    Store {
        #[source]
        source: DatabaseError,
        context: Option<Cow<'static, str>>,
    },

    /// A view template failed to render.
    #[error("View rendering error{}: {source}", format_context(.context))]
    Render {
        #[source]
        source: askama::Error,
        context: Option<Cow<'static, str>>,
    },

    /// Internal fallback for unexpected issues or logic errors.
    #[error("Internal contacts error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl From<DatabaseError> for ContactsError {
    fn from(source: DatabaseError) -> Self {
        Self::Store { source, context: None }
    }
}

impl From<askama::Error> for ContactsError {
    fn from(source: askama::Error) -> Self {
        Self::Render { source, context: None }
    }
}

pub trait ContactsErrorExt<T> {
    fn context(self, context: impl Into<Cow<'static, str>>) -> Result<T, ContactsError>;
}

impl<T, E: Into<ContactsError>> ContactsErrorExt<T> for Result<T, E> {
    fn context(self, context: impl Into<Cow<'static, str>>) -> Result<T, ContactsError> {
        self.map_err(|e| {
            let mut e = e.into();
            match &mut e {
                ContactsError::Store { context: c, .. }
                | ContactsError::Render { context: c, .. }
                | ContactsError::Internal { context: c, .. } => *c = Some(context.into()),
            }
            e
        })
    }
}

/// Unrecovered failures surface as a bare 500; the cause only goes to the operator log.
impl IntoResponse for ContactsError {
    fn into_response(self) -> Response {
        error!(error = %self, "Request failed");
        StatusCode::INTERNAL_SERVER_ERROR.into_response()
    }
}

fn format_context(context: &Option<Cow<'static, str>>) -> Cow<'static, str> {
    context.as_ref().map_or(Cow::Borrowed(""), |c| Cow::Owned(format!(" ({c})")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_is_rendered_in_display() {
        let err: Result<(), ContactsError> =
            Err(ContactsError::Internal { message: "boom".into(), context: None });
        let err = err.context("Saving contact").unwrap_err();
        assert_eq!(err.to_string(), "Internal contacts error (Saving contact): boom");
    }

    #[test]
    fn database_errors_convert_with_context() {
        let source = DatabaseError::Connection { message: "refused".into(), context: None };
        let err = Err::<(), _>(source).context("Listing contacts").unwrap_err();
        assert!(matches!(err, ContactsError::Store { context: Some(_), .. }));
        assert!(err.to_string().starts_with("Contact store error (Listing contacts)"));
    }

    #[test]
    fn into_response_hides_the_cause() {
        let err = ContactsError::Internal { message: "secret detail".into(), context: None };
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
