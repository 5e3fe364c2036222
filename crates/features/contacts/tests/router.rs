use agenda_contacts::validation::{
    EMAIL_INVALID, NAME_REQUIRED, NAME_TOO_SHORT, PHONE_INVALID, PHONE_REQUIRED,
};
use agenda_contacts::{ContactRepository, ContactsError, router};
use agenda_domain::constants::{LIST_FAILED_MESSAGE, SAVED_MESSAGE};
use agenda_domain::contact::Contact;
use async_trait::async_trait;
use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

const ANA: &str = "nome=Ana+Silva&telefone=%2811%29+91234-5678&email=ana%40b.com";
const BRUNO: &str = "nome=Bruno+Lima&telefone=%2821%29+99876-5432&email=bruno%40c.com";

#[derive(Debug, Default)]
struct MemoryRepository {
    contacts: Mutex<Vec<Contact>>,
}

impl MemoryRepository {
    fn stored(&self) -> Vec<Contact> {
        self.contacts.lock().unwrap().clone()
    }
}

#[async_trait]
impl ContactRepository for MemoryRepository {
    async fn create(&self, contact: Contact) -> Result<(), ContactsError> {
        self.contacts.lock().unwrap().push(contact);
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<Contact>, ContactsError> {
        Ok(self.stored())
    }
}

#[derive(Debug)]
struct UnreachableRepository;

#[async_trait]
impl ContactRepository for UnreachableRepository {
    async fn create(&self, _contact: Contact) -> Result<(), ContactsError> {
        Err(ContactsError::Internal { message: "store unreachable".into(), context: None })
    }

    async fn list_all(&self) -> Result<Vec<Contact>, ContactsError> {
        Err(ContactsError::Internal { message: "store unreachable".into(), context: None })
    }
}

/// Posts an already URL-encoded body.
fn post_form(body: &'static str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, String) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

#[tokio::test]
async fn form_page_is_html() {
    let app = router(Arc::new(MemoryRepository::default()));
    let response = app.oneshot(get("/")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap();
    assert!(content_type.starts_with("text/html"));
}

#[tokio::test]
async fn short_name_is_rejected_without_storing() {
    let repo = Arc::new(MemoryRepository::default());
    let app = router(repo.clone());

    let (status, body) =
        send(&app, post_form("nome=Jo&telefone=%2811%29+91234-5678&email=a%40b.com")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, NAME_TOO_SHORT);
    assert!(repo.stored().is_empty());
}

#[tokio::test]
async fn unmasked_phone_is_rejected() {
    let repo = Arc::new(MemoryRepository::default());
    let app = router(repo.clone());

    let (status, body) =
        send(&app, post_form("nome=Ana+Silva&telefone=11912345678&email=ana%40b.com")).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.split(';').any(|m| m == PHONE_INVALID), "got {body}");
    assert!(repo.stored().is_empty());
}

#[tokio::test]
async fn invalid_email_is_rejected() {
    let app = router(Arc::new(MemoryRepository::default()));
    let (_, body) =
        send(&app, post_form("nome=Ana+Silva&telefone=%2811%29+91234-5678&email=ana%40")).await;
    assert_eq!(body, EMAIL_INVALID);
}

#[tokio::test]
async fn every_violation_is_reported() {
    let app = router(Arc::new(MemoryRepository::default()));
    let (_, body) = send(&app, post_form("nome=Jo&telefone=123&email=nope")).await;
    assert_eq!(body, format!("{NAME_TOO_SHORT};{PHONE_INVALID};{EMAIL_INVALID}"));
}

#[tokio::test]
async fn missing_phone_has_its_own_message() {
    let app = router(Arc::new(MemoryRepository::default()));
    let (_, body) = send(&app, post_form("nome=Ana+Silva&email=ana%40b.com")).await;
    assert_eq!(body, PHONE_REQUIRED);
}

#[tokio::test]
async fn repeated_key_fails_only_that_field() {
    let repo = Arc::new(MemoryRepository::default());
    let app = router(repo.clone());

    let (status, body) = send(
        &app,
        post_form("nome=Ana+Silva&nome=Bob+Lima&telefone=%2811%29+91234-5678&email=ana%40b.com"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, NAME_REQUIRED);
    assert!(repo.stored().is_empty());
}

#[tokio::test]
async fn valid_submission_is_stored_once() {
    let repo = Arc::new(MemoryRepository::default());
    let app = router(repo.clone());

    let (status, body) = send(&app, post_form(ANA)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, SAVED_MESSAGE);
    assert_eq!(repo.stored(), vec![Contact::new("Ana Silva", "(11) 91234-5678", "ana@b.com")]);
}

#[tokio::test]
async fn non_form_body_counts_as_empty_submission() {
    let repo = Arc::new(MemoryRepository::default());
    let app = router(repo.clone());
    let request = Request::builder()
        .method("POST")
        .uri("/")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"nome":"Ana Silva"}"#))
        .unwrap();

    let (status, body) = send(&app, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, format!("{NAME_REQUIRED};{PHONE_REQUIRED};{EMAIL_INVALID}"));
    assert!(repo.stored().is_empty());
}

#[tokio::test]
async fn listing_shows_contacts_and_is_stable() {
    let app = router(Arc::new(MemoryRepository::default()));
    send(&app, post_form(ANA)).await;
    send(&app, post_form(BRUNO)).await;

    let (status, first) = send(&app, get("/contatos")).await;
    let (_, second) = send(&app, get("/contatos")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(first, second);
    let ana = first.find("Ana Silva").expect("first contact listed");
    let bruno = first.find("Bruno Lima").expect("second contact listed");
    assert!(ana < bruno);
}

#[tokio::test]
async fn listing_with_unreachable_store_is_a_500() {
    let app = router(Arc::new(UnreachableRepository));

    let (status, body) = send(&app, get("/contatos")).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, LIST_FAILED_MESSAGE);
}

#[tokio::test]
async fn failed_insert_is_an_opaque_500() {
    let app = router(Arc::new(UnreachableRepository));

    let (status, body) = send(&app, post_form(ANA)).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(!body.contains("unreachable"));
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let app = router(Arc::new(MemoryRepository::default()));
    let (status, _) = send(&app, get("/nada")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
