use crate::ContactsState;
use crate::error::{ContactsError, ContactsErrorExt};
use crate::validation::validate;
use crate::views::{ContactListView, IndexView};
use agenda_domain::constants::{LIST_FAILED_MESSAGE, SAVED_MESSAGE};
use agenda_domain::contact::ContactForm;
use askama::Template;
use axum::Form;
use axum::extract::State;
use axum::extract::rejection::FormRejection;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use tracing::{debug, error, info};

pub(crate) async fn form_page() -> Result<Html<String>, ContactsError> {
    let html = IndexView::default().render().context("Rendering submission form")?;
    Ok(Html(html))
}

/// Rejected submissions still answer `200`, with the joined messages as the body.
///
/// The body is read as raw pairs so that a repeated key only fails its own field.
pub(crate) async fn submit(
    State(state): State<ContactsState>,
    pairs: Result<Form<Vec<(String, String)>>, FormRejection>,
) -> Result<String, ContactsError> {
    let form = pairs.map_or_else(
        |rejection| {
            debug!(%rejection, "Submission body is not URL-encoded, validating as empty");
            ContactForm::default()
        },
        |Form(pairs)| ContactForm::from_pairs(pairs),
    );

    match validate(&form) {
        Ok(contact) => {
            state.repository.create(contact).await?;
            info!("Contact saved");
            Ok(SAVED_MESSAGE.to_owned())
        },
        Err(errors) => {
            debug!(%errors, "Submission rejected");
            Ok(errors.to_string())
        },
    }
}

pub(crate) async fn list(State(state): State<ContactsState>) -> Response {
    match render_listing(&state).await {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            error!(error = %e, "Failed to list contacts");
            (StatusCode::INTERNAL_SERVER_ERROR, LIST_FAILED_MESSAGE).into_response()
        },
    }
}

async fn render_listing(state: &ContactsState) -> Result<String, ContactsError> {
    let contacts = state.repository.list_all().await?;
    ContactListView::new(&contacts).render().context("Rendering contact list")
}
