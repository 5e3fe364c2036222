use agenda_logger::{AccessEntry, AccessLog};
use axum::extract::{Request, State};
use axum::http::uri::PathAndQuery;
use axum::middleware::Next;
use axum::response::Response;

/// Records every request in the access log before it reaches routing.
///
/// The entry carries the original request target (path and query). Recording never waits
/// on the writer, so a slow or failing disk cannot delay the response.
///
/// ```rust,ignore
/// let app = router.layer(axum::middleware::from_fn_with_state(log, access_log));
/// ```
pub async fn access_log(State(log): State<AccessLog>, request: Request, next: Next) -> Response {
    let uri = request.uri();
    let target = uri.path_and_query().map_or_else(|| uri.path(), PathAndQuery::as_str);
    log.record(AccessEntry::now(request.method().as_str(), target));

    next.run(request).await
}
