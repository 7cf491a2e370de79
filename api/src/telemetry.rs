//! Request telemetry middleware.
//!
//! Every non-OPTIONS request handled by the router is timed and appended to
//! the `api_response_logs` table, which feeds the traffic statistics and
//! dashboard endpoints. Logging failures are reported but never fail the
//! request itself.

use axum::{
    body::{Body, HttpBody},
    extract::State,
    http::{HeaderMap, Method, Request, header::CONTENT_LENGTH},
    middleware::Next,
    response::Response,
};
use db::models::api_response_log::{Model as LogModel, RequestRecord};
use std::time::Instant;
use util::state::AppState;

fn content_length(headers: &HeaderMap) -> i32 {
    headers
        .get(CONTENT_LENGTH)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.parse().ok())
        .unwrap_or(0)
}

/// Records one log row per handled request.
///
/// `cache_hit` is decided before dispatch by asking the response cache
/// whether it holds a live entry under the request's cache key. Cacheable
/// handlers use the same key (path plus query string), so a hit here means
/// the handler will serve the cached body.
pub async fn record_request(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    if req.method() == Method::OPTIONS {
        return next.run(req).await;
    }

    let method = req.method().to_string();
    let endpoint = req.uri().path().to_string();
    let cache_key = match req.uri().query() {
        Some(query) => format!("{endpoint}?{query}"),
        None => endpoint.clone(),
    };
    let cache_hit = state.cache().contains(&cache_key).await;
    let request_size_bytes = content_length(req.headers());

    let start = Instant::now();
    let response = next.run(req).await;
    let response_time_ms = start.elapsed().as_secs_f64() * 1000.0;

    let status_code = i32::from(response.status().as_u16());
    let response_size_bytes = response
        .body()
        .size_hint()
        .exact()
        .map(|bytes| bytes as i32)
        .unwrap_or_else(|| content_length(response.headers()));

    tracing::info!(
        %method,
        %endpoint,
        status_code,
        response_time_ms,
        cache_hit,
        "handled request"
    );

    let record = RequestRecord {
        endpoint,
        method,
        response_time_ms,
        status_code,
        user_id: None,
        cache_hit,
        query_count: 0,
        request_size_bytes,
        response_size_bytes,
    };
    if let Err(err) = LogModel::insert_record(state.db(), record).await {
        tracing::error!("Failed to record request telemetry: {err}");
    }

    response
}
