use axum::body::Body;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use futures_util::StreamExt;
use medboard_logging::{board_info, board_warn};

use crate::GatewayState;

/// Event-stream passthrough of the backend's generic stream endpoint.
///
/// Chunks are forwarded verbatim as they arrive; the only transformation is
/// the error mapping `Body::from_stream` requires. A non-success upstream
/// status is propagated body-less, and the upstream reader is dropped (and
/// with it the connection) on every exit path.
pub(crate) async fn logging(State(state): State<GatewayState>) -> Response {
    let backend = match state.client.get(state.stream_url.clone()).send().await {
        Ok(response) => response,
        Err(err) => {
            board_warn!("stream relay could not reach backend: {err}");
            return StatusCode::BAD_GATEWAY.into_response();
        }
    };

    let status = backend.status();
    if !status.is_success() {
        board_warn!("stream relay propagating upstream status {status}");
        return StatusCode::from_u16(status.as_u16())
            .unwrap_or(StatusCode::BAD_GATEWAY)
            .into_response();
    }

    board_info!("stream relay client connected");
    let stream = backend
        .bytes_stream()
        .map(|chunk| chunk.map_err(std::io::Error::other));

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "text/event-stream")
        .header(header::CACHE_CONTROL, "no-cache")
        .header(header::CONNECTION, "keep-alive")
        .body(Body::from_stream(stream))
        .unwrap_or_else(|_| StatusCode::INTERNAL_SERVER_ERROR.into_response())
}
