//! Submission rules for a contact.
//!
//! [`validate`] checks every field and collects one message per violated rule, in field
//! order (name, phone, email). It never stops at the first failure.

use agenda_domain::constants::MESSAGE_DELIMITER;
use agenda_domain::contact::{Contact, ContactForm, Field, FormValue};
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

/// Name absent, or sent more than once.
pub const NAME_REQUIRED: &str = "Campo nome é obrigatório";
pub const NAME_TOO_SHORT: &str = "O nome deve ter no mínimo 03 caracteres.";
/// Phone absent. The phone rule carries no custom wording for this case.
pub const PHONE_REQUIRED: &str = "Required";
/// Phone sent more than once.
pub const PHONE_NOT_TEXT: &str = "Expected string, received array";
pub const PHONE_INVALID: &str = "Deve enviar um telefone válido";
/// Email absent, repeated or malformed.
pub const EMAIL_INVALID: &str = "Deve ser um e-mail válido.";

/// Minimum name length, counted in UTF-16 code units as browsers count `minlength`.
///
/// A character outside the Basic Multilingual Plane (`"𝄞"`) counts as two.
pub const NAME_MIN_LEN: usize = 3;

static PHONE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\(\d{2}\) \d{5}-\d{4}$").expect("Failed to compile phone regex")
});

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9_'+\-.]*[A-Za-z0-9_+\-]@([A-Za-z0-9][A-Za-z0-9\-]*\.)+[A-Za-z]{2,}$")
        .expect("Failed to compile email regex")
});

/// One violated rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    pub field: Field,
    pub message: &'static str,
}

/// Every rule a submission violated, in field order.
///
/// Displays as the messages joined by `;`, which is also the response body of a
/// rejected submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    issues: Vec<ValidationIssue>,
}

impl ValidationErrors {
    #[must_use]
    pub fn issues(&self) -> &[ValidationIssue] {
        &self.issues
    }

    pub fn messages(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.issues.iter().map(|issue| issue.message)
    }

    #[must_use]
    pub fn contains(&self, field: Field) -> bool {
        self.issues.iter().any(|issue| issue.field == field)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    fn check<'a>(&mut self, field: Field, outcome: Result<&'a str, &'static str>) -> Option<&'a str> {
        outcome.map_err(|message| self.issues.push(ValidationIssue { field, message })).ok()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, message) in self.messages().enumerate() {
            if i > 0 {
                f.write_str(MESSAGE_DELIMITER)?;
            }
            f.write_str(message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Validates a raw submission into a [`Contact`].
///
/// Values are taken as submitted; nothing is trimmed or normalized.
///
/// # Errors
/// Returns [`ValidationErrors`] holding one issue per violated rule.
///
/// # Example
/// ```rust
/// use agenda_contacts::validation::{validate, NAME_TOO_SHORT};
/// use agenda_domain::contact::ContactForm;
///
/// let form = ContactForm::filled("Jo", "(11) 91234-5678", "a@b.com");
/// let errors = validate(&form).unwrap_err();
/// assert_eq!(errors.to_string(), NAME_TOO_SHORT);
/// ```
pub fn validate(form: &ContactForm) -> Result<Contact, ValidationErrors> {
    let mut errors = ValidationErrors::default();

    let name = errors.check(Field::Name, check_name(form.get(Field::Name)));
    let phone = errors.check(Field::Phone, check_phone(form.get(Field::Phone)));
    let email = errors.check(Field::Email, check_email(form.get(Field::Email)));

    match (name, phone, email) {
        (Some(name), Some(phone), Some(email)) => Ok(Contact::new(name, phone, email)),
        _ => Err(errors),
    }
}

fn check_name(value: Option<&FormValue>) -> Result<&str, &'static str> {
    match value.and_then(FormValue::as_text) {
        None => Err(NAME_REQUIRED),
        Some(name) if name.encode_utf16().count() < NAME_MIN_LEN => Err(NAME_TOO_SHORT),
        Some(name) => Ok(name),
    }
}

fn check_phone(value: Option<&FormValue>) -> Result<&str, &'static str> {
    match value {
        None => Err(PHONE_REQUIRED),
        Some(FormValue::List(_)) => Err(PHONE_NOT_TEXT),
        Some(FormValue::Text(phone)) if PHONE_PATTERN.is_match(phone) => Ok(phone.as_str()),
        Some(FormValue::Text(_)) => Err(PHONE_INVALID),
    }
}

fn check_email(value: Option<&FormValue>) -> Result<&str, &'static str> {
    value.and_then(FormValue::as_text).filter(|e| is_valid_email(e)).ok_or(EMAIL_INVALID)
}

fn is_valid_email(email: &str) -> bool {
    // The pattern cannot express the local-part dot rules without lookaround.
    let Some((local, _)) = email.split_once('@') else {
        return false;
    };
    !local.starts_with('.') && !local.contains("..") && EMAIL_PATTERN.is_match(email)
}
