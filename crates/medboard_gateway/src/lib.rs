//! Same-origin gateway in front of the scraping/research backend.
//!
//! Relays the backend's event stream to dashboard clients and forwards
//! operator submissions, mapping backend outcomes onto fixed acknowledgment
//! responses. Holds no state beyond issued session tokens.
mod forward;
mod relay;
mod session;

use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use medboard_logging::board_info;
use reqwest::Url;
use serde_json::{json, Value};

pub use session::{OperatorCredentials, SessionStore};

/// Gateway runtime configuration, read from the environment by the binary.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub backend_base: Url,
    pub bind_addr: String,
    pub credentials: Option<OperatorCredentials>,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing environment variable {0}")]
    MissingVar(&'static str),
    #[error("invalid backend url: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("operator email and password must be set together")]
    PartialCredentials,
}

impl GatewayConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let backend_base = std::env::var("MEDBOARD_API_URL")
            .map_err(|_| ConfigError::MissingVar("MEDBOARD_API_URL"))?;
        let backend_base = Url::parse(&backend_base)?;
        let bind_addr =
            std::env::var("MEDBOARD_BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:3000".to_string());
        let email = std::env::var("MEDBOARD_OPERATOR_EMAIL").ok();
        let password = std::env::var("MEDBOARD_OPERATOR_PASSWORD").ok();
        let credentials = match (email, password) {
            (Some(email), Some(password)) => Some(OperatorCredentials { email, password }),
            (None, None) => None,
            _ => return Err(ConfigError::PartialCredentials),
        };
        Ok(Self {
            backend_base,
            bind_addr,
            credentials,
        })
    }
}

/// Shared handler state: one reqwest client plus the resolved backend URLs.
#[derive(Clone)]
pub(crate) struct GatewayState {
    pub(crate) client: reqwest::Client,
    pub(crate) stream_url: Url,
    pub(crate) process_url: Url,
    pub(crate) query_url: Url,
    pub(crate) sessions: SessionStore,
    pub(crate) credentials: Option<OperatorCredentials>,
}

pub fn router(config: &GatewayConfig) -> Result<Router, url::ParseError> {
    let state = GatewayState {
        client: reqwest::Client::new(),
        stream_url: join(&config.backend_base, "stream/")?,
        process_url: join(&config.backend_base, "process/")?,
        query_url: join(&config.backend_base, "query/")?,
        sessions: SessionStore::new(),
        credentials: config.credentials.clone(),
    };

    Ok(Router::new()
        .route("/api/logging", get(relay::logging))
        .route("/api/process", post(forward::process))
        .route("/api/query", post(forward::query))
        .route("/api/login", post(session::login))
        .route("/api/health", get(health))
        .with_state(state))
}

/// Binds and serves the gateway until the process exits.
pub async fn serve(config: GatewayConfig) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let app = router(&config)?;
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    board_info!(
        "gateway listening on {} in front of {}",
        config.bind_addr,
        config.backend_base
    );
    axum::serve(listener, app).await?;
    Ok(())
}

async fn health() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

fn join(base: &Url, path: &str) -> Result<Url, url::ParseError> {
    let mut base = base.clone();
    if !base.path().ends_with('/') {
        let mut with_slash = base.path().to_string();
        with_slash.push('/');
        base.set_path(&with_slash);
    }
    base.join(path)
}
