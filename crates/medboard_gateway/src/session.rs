use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::{header, HeaderMap, StatusCode};
use axum::Json;
use medboard_logging::{board_info, board_warn};
use rand::RngCore;
use serde::Deserialize;
use serde_json::{json, Value};
use sha2::{Digest, Sha256};

use crate::GatewayState;

/// Static operator credential pair, verified server-side at login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperatorCredentials {
    pub email: String,
    pub password: String,
}

/// In-process store of issued session tokens.
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    tokens: Arc<Mutex<HashSet<String>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&self, email: &str) -> String {
        let token = mint_token(email);
        self.tokens
            .lock()
            .expect("lock sessions")
            .insert(token.clone());
        token
    }

    pub fn contains(&self, token: &str) -> bool {
        self.tokens.lock().expect("lock sessions").contains(token)
    }
}

fn mint_token(email: &str) -> String {
    let mut nonce = [0u8; 16];
    rand::thread_rng().fill_bytes(&mut nonce);
    let mut hasher = Sha256::new();
    hasher.update(email.as_bytes());
    hasher.update(nonce);
    let digest = hasher.finalize();
    let mut hex = String::with_capacity(32);
    for byte in digest.iter().take(16) {
        use std::fmt::Write;
        let _ = write!(&mut hex, "{byte:02x}");
    }
    hex
}

#[derive(Deserialize)]
pub(crate) struct LoginRequest {
    email: String,
    password: String,
}

/// Issues an explicit session token after verifying the configured operator
/// credential pair. With no pair configured the gateway runs open.
pub(crate) async fn login(
    State(state): State<GatewayState>,
    Json(request): Json<LoginRequest>,
) -> (StatusCode, Json<Value>) {
    let Some(credentials) = &state.credentials else {
        let token = state.sessions.issue(&request.email);
        return (StatusCode::OK, Json(json!({ "token": token })));
    };

    if request.email == credentials.email && request.password == credentials.password {
        board_info!("operator session issued");
        let token = state.sessions.issue(&request.email);
        (StatusCode::OK, Json(json!({ "token": token })))
    } else {
        board_warn!("login rejected");
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "message": "Invalid credentials" })),
        )
    }
}

impl GatewayState {
    /// Bearer-token check for the submission gateways. Open when no
    /// credential pair is configured.
    pub(crate) fn authorize(
        &self,
        headers: &HeaderMap,
    ) -> Result<(), (StatusCode, Json<Value>)> {
        if self.credentials.is_none() {
            return Ok(());
        }
        let token = headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "));
        match token {
            Some(token) if self.sessions.contains(token) => Ok(()),
            _ => Err((
                StatusCode::UNAUTHORIZED,
                Json(json!({ "message": "Unauthorized" })),
            )),
        }
    }
}
