/// Route serving the submission form (GET) and receiving submissions (POST).
pub const INDEX_PATH: &str = "/";
/// Route listing every stored contact.
pub const CONTACTS_PATH: &str = "/contatos";

/// Form field carrying the contact name.
pub const NAME_FIELD: &str = "nome";
/// Form field carrying the contact phone.
pub const PHONE_FIELD: &str = "telefone";
/// Form field carrying the contact email.
pub const EMAIL_FIELD: &str = "email";

/// Delimiter between validation messages in a rejected submission response.
pub const MESSAGE_DELIMITER: &str = ";";

/// Body returned after a contact has been stored.
pub const SAVED_MESSAGE: &str = "Contato salvo com sucesso";
/// Body returned when the listing cannot be produced.
pub const LIST_FAILED_MESSAGE: &str = "Erro ao listar os contatos";
