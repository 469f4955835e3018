use crate::dispatch::Dispatch;
use crate::error::Result;
use crate::protocol::RpcRequest;
use crate::state::AppState;
use axum::{
    body::Bytes,
    extract::State,
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;

/// POST /mcp - JSON-RPC 2.0 endpoint.
///
/// # Flow
/// 1. Parse and validate the envelope (protocol errors answer at HTTP 200)
/// 2. Auth gate on the method (401 outside the envelope)
/// 3. Dispatch: envelope at HTTP 200, or 204 for notifications
pub async fn mcp_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response> {
    let start_time = std::time::Instant::now();

    let outcome = handle(&state, &headers, &body);

    // Recorded for every exit: protocol errors, 401s and dispatched replies.
    metrics::histogram!("mcp_request_latency_ms")
        .record(start_time.elapsed().as_secs_f64() * 1000.0);

    outcome
}

fn handle(state: &AppState, headers: &HeaderMap, body: &[u8]) -> Result<Response> {
    let request = match RpcRequest::parse(body) {
        Ok(request) => request,
        Err(rejected) => {
            tracing::debug!(
                code = rejected.error.code(),
                body_len = body.len(),
                "Rejected JSON-RPC envelope"
            );
            metrics::counter!("mcp_errors_total", "code" => rejected.error.code().to_string())
                .increment(1);
            return Ok(Json(rejected.into_response()).into_response());
        }
    };

    state
        .auth
        .authorize(&request.method, headers.get(AUTHORIZATION))?;

    let response = match state.server.dispatch(request) {
        Dispatch::Reply(envelope) => Json(envelope).into_response(),
        Dispatch::Acknowledged => StatusCode::NO_CONTENT.into_response(),
    };

    Ok(response)
}
