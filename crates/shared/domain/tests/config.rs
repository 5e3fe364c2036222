use agenda_domain::config::{
    AccessLogConfig, ApiConfig, DEFAULT_PORT, DatabaseConfig, LoggingConfig, ServerConfig,
};
use serde_json::json;
use std::path::PathBuf;

#[test]
fn defaults_describe_a_local_setup() {
    let server = ServerConfig::default();
    assert_eq!(server.port, 4000);
    assert!(server.address.is_unspecified());

    let db = DatabaseConfig::default();
    assert_eq!(db.url, "mem://");
    assert_eq!(db.namespace, "agenda");
    assert_eq!(db.database, "contatos");
    assert!(db.credentials.is_none());

    let access = AccessLogConfig::default();
    assert_eq!(access.path, PathBuf::from("access.log"));
    assert!(access.capacity > 0);

    let logging = LoggingConfig::default();
    assert_eq!(logging.filter, "info");
    assert!(logging.directory.is_none());
}

#[test]
fn empty_document_equals_defaults() {
    let cfg: ApiConfig = serde_json::from_value(json!({})).expect("config deserialize");
    assert_eq!(cfg, ApiConfig::default());
}

#[test]
fn sections_merge_with_defaults() {
    let raw = json!({
        "server": { "port": 8080 },
        "database": { "url": "ws://db:8000", "credentials": { "username": "u", "password": "p" } },
        "access_log": { "path": "/var/log/agenda/access.log" },
        "logging": { "filter": "agenda=debug", "json": true }
    });

    let cfg: ApiConfig = serde_json::from_value(raw).expect("config deserialize");
    assert_eq!(cfg.server.port, 8080);
    assert!(cfg.server.address.is_unspecified());
    assert_eq!(cfg.database.url, "ws://db:8000");
    assert_eq!(cfg.database.namespace, "agenda");
    assert_eq!(cfg.database.credentials.as_ref().map(|c| c.username.as_str()), Some("u"));
    assert_eq!(cfg.access_log.path, PathBuf::from("/var/log/agenda/access.log"));
    assert_eq!(cfg.access_log.capacity, AccessLogConfig::default().capacity);
    assert_eq!(cfg.logging.filter, "agenda=debug");
    assert!(cfg.logging.json);
    assert_ne!(cfg.server.port, DEFAULT_PORT);
}

#[test]
fn credentials_need_both_fields() {
    let raw = json!({ "database": { "credentials": { "username": "root" } } });
    assert!(serde_json::from_value::<ApiConfig>(raw).is_err());
}
