use agenda_domain::constants::{CONTACTS_PATH, EMAIL_FIELD, INDEX_PATH, NAME_FIELD, PHONE_FIELD};
use agenda_domain::contact::Contact;
use askama::Template;

/// The submission form.
#[derive(Debug, Template)]
#[template(path = "index.html")]
pub struct IndexView {
    action: &'static str,
    list_href: &'static str,
    name_field: &'static str,
    phone_field: &'static str,
    email_field: &'static str,
}

impl Default for IndexView {
    fn default() -> Self {
        Self {
            action: INDEX_PATH,
            list_href: CONTACTS_PATH,
            name_field: NAME_FIELD,
            phone_field: PHONE_FIELD,
            email_field: EMAIL_FIELD,
        }
    }
}

/// Every stored contact, in storage order.
#[derive(Debug, Template)]
#[template(path = "contatos.html")]
pub struct ContactListView<'a> {
    contacts: &'a [Contact],
    form_href: &'static str,
}

impl<'a> ContactListView<'a> {
    #[must_use]
    pub const fn new(contacts: &'a [Contact]) -> Self {
        Self { contacts, form_href: INDEX_PATH }
    }
}
