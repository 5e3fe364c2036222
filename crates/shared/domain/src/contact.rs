use crate::constants::{EMAIL_FIELD, NAME_FIELD, PHONE_FIELD};
use serde::{Deserialize, Serialize};

/// A submitted contact that passed validation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Contact {
    pub name: String,
    pub phone: String,
    pub email: String,
}

impl Contact {
    pub fn new(name: impl Into<String>, phone: impl Into<String>, email: impl Into<String>) -> Self {
        Self { name: name.into(), phone: phone.into(), email: email.into() }
    }
}

/// A field of the submission form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Phone,
    Email,
}

impl Field {
    pub const ALL: [Self; 3] = [Self::Name, Self::Phone, Self::Email];

    /// Key of the field in the submitted form.
    #[must_use]
    pub const fn wire_name(self) -> &'static str {
        match self {
            Self::Name => NAME_FIELD,
            Self::Phone => PHONE_FIELD,
            Self::Email => EMAIL_FIELD,
        }
    }

    #[must_use]
    pub fn from_wire_name(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.wire_name() == key)
    }
}

/// What the browser sent for one field: a single value, or the same key several times.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FormValue {
    Text(String),
    List(Vec<String>),
}

impl FormValue {
    /// The value when exactly one was sent.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::List(_) => None,
        }
    }

    fn push(self, value: String) -> Self {
        match self {
            Self::Text(first) => Self::List(vec![first, value]),
            Self::List(mut values) => {
                values.push(value);
                Self::List(values)
            },
        }
    }
}

/// Raw form submission, as posted by the browser.
///
/// Every field is optional: a missing field is a validation concern, not a decoding one.
/// Unknown fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactForm {
    #[serde(rename = "nome")]
    pub name: Option<FormValue>,
    #[serde(rename = "telefone")]
    pub phone: Option<FormValue>,
    pub email: Option<FormValue>,
}

impl ContactForm {
    /// Builds a form with every field present once.
    pub fn filled(
        name: impl Into<String>,
        phone: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            name: Some(FormValue::Text(name.into())),
            phone: Some(FormValue::Text(phone.into())),
            email: Some(FormValue::Text(email.into())),
        }
    }

    /// Folds decoded `key=value` pairs into a form.
    ///
    /// A key sent more than once becomes a [`FormValue::List`] for that field alone, so the
    /// other fields are still judged on their own values.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        pairs.into_iter().fold(Self::default(), |mut form, (key, value)| {
            if let Some(field) = Field::from_wire_name(key.as_ref()) {
                let slot = form.slot(field);
                let value = value.into();
                *slot = Some(match slot.take() {
                    None => FormValue::Text(value),
                    Some(existing) => existing.push(value),
                });
            }
            form
        })
    }

    /// The submitted value of `field`, if any.
    #[must_use]
    pub const fn get(&self, field: Field) -> Option<&FormValue> {
        match field {
            Field::Name => self.name.as_ref(),
            Field::Phone => self.phone.as_ref(),
            Field::Email => self.email.as_ref(),
        }
    }

    const fn slot(&mut self, field: Field) -> &mut Option<FormValue> {
        match field {
            Field::Name => &mut self.name,
            Field::Phone => &mut self.phone,
            Field::Email => &mut self.email,
        }
    }
}
