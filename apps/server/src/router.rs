use agenda_contacts::ContactRepository;
use agenda_kernel::server::access_log;
use agenda_logger::AccessLog;
use axum::Router;
use axum::middleware::from_fn_with_state;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Composes the application router.
///
/// The access log layer is outermost so that every request is recorded, including those
/// no route matches.
pub(crate) fn init(repository: Arc<dyn ContactRepository>, log: AccessLog) -> Router {
    agenda_contacts::router(repository)
        .layer(TraceLayer::new_for_http())
        .layer(from_fn_with_state(log, access_log))
}
