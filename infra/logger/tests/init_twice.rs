use agenda_logger::{Logger, LoggerError};

#[test]
fn second_init_reports_the_installed_subscriber() {
    let _logger = Logger::builder()
        .name("agenda-init-twice")
        .filter("info")
        .init()
        .expect("first init should succeed");

    let err = Logger::builder()
        .name("agenda-init-twice")
        .init()
        .expect_err("second init should fail");

    assert!(
        matches!(err, LoggerError::Subscriber { context: Some(_), .. }),
        "expected subscriber error with context, got {err}"
    );
}
