use crate::state::AppState;
use axum::extract::{Request, State};
use axum::http::{HeaderMap, HeaderValue};
use axum::middleware::Next;
use axum::response::Response;
use commander_application::context::AppContext;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::Instrument;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

#[must_use]
pub(crate) fn extract_request_id(headers: &HeaderMap, seed: &AtomicU64) -> String {
    headers
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(ToString::to_string)
        .unwrap_or_else(|| {
            let id = seed.fetch_add(1, Ordering::Relaxed);
            format!("req-{id:016x}")
        })
}

/// 为每个请求建立 `AppContext` 并在 span 中记录请求标识，响应时回写 `x-request-id`
pub(crate) async fn request_tracing_middleware<S>(
    State(state): State<AppState<S>>,
    mut request: Request,
    next: Next,
) -> Response
where
    S: Send + Sync + 'static,
{
    let request_id = extract_request_id(request.headers(), &state.request_id_seed);
    let span = tracing::info_span!(
        "http.request",
        request_id = %request_id,
        method = %request.method(),
        route = %request.uri().path(),
    );

    request.extensions_mut().insert(
        AppContext::builder()
            .request_id(request_id.clone())
            .build(),
    );

    let mut response = next.run(request).instrument(span.clone()).await;
    span.in_scope(|| tracing::info!(status = response.status().as_u16(), "request completed"));
    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    response
}
