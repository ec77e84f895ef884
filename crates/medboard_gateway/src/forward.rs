use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use medboard_logging::{board_info, board_warn};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::GatewayState;

#[derive(Deserialize)]
pub(crate) struct ProcessRequest {
    url: Option<String>,
}

/// Forwards a process job as `{"tld": url}` and maps the backend outcome
/// onto a fixed acknowledgment. A single backend failure surfaces
/// immediately; there are no retries.
pub(crate) async fn process(
    State(state): State<GatewayState>,
    headers: HeaderMap,
    Json(request): Json<ProcessRequest>,
) -> (StatusCode, Json<Value>) {
    if let Err(denied) = state.authorize(&headers) {
        return denied;
    }
    let Some(url) = request.url else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "message": "URL is required" })),
        );
    };

    // The URL itself may name a customer site; log its length only.
    board_info!("forwarding process request, url_len={}", url.len());
    let result = state
        .client
        .post(state.process_url.clone())
        .json(&json!({ "tld": url }))
        .send()
        .await;

    match result {
        Ok(response) if response.status().is_success() => (
            StatusCode::OK,
            Json(json!({ "message": "Processing initiated" })),
        ),
        Ok(response) => {
            board_warn!("backend process endpoint returned {}", response.status());
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "message": "Error processing website" })),
            )
        }
        Err(err) => {
            board_warn!("backend process endpoint unreachable: {err}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "message": "Error processing website" })),
            )
        }
    }
}

#[derive(Deserialize, Serialize)]
pub(crate) struct QueryRequest {
    tld: String,
    questions: Vec<String>,
}

/// Forwards a query job to the backend unchanged.
pub(crate) async fn query(
    State(state): State<GatewayState>,
    headers: HeaderMap,
    Json(request): Json<QueryRequest>,
) -> (StatusCode, Json<Value>) {
    if let Err(denied) = state.authorize(&headers) {
        return denied;
    }

    board_info!(
        "forwarding query request, question_count={}",
        request.questions.len()
    );
    let result = state
        .client
        .post(state.query_url.clone())
        .json(&request)
        .send()
        .await;

    match result {
        Ok(response) if response.status().is_success() => (
            StatusCode::OK,
            Json(json!({ "message": "Query submitted successfully" })),
        ),
        Ok(response) => {
            board_warn!("backend query endpoint returned {}", response.status());
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "message": "Error submitting query" })),
            )
        }
        Err(err) => {
            board_warn!("backend query endpoint unreachable: {err}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "message": "Error submitting query" })),
            )
        }
    }
}
