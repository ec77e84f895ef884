use reqwest::Url;
use serde::Deserialize;
use serde_json::json;

use crate::engine::EngineConfig;
use crate::types::{Ack, Session, SubmitError, SubmitFailure};

/// Gateway-facing submission surface, kept behind a trait so the command
/// pump can run against a test double.
#[async_trait::async_trait]
pub trait Submitter: Send + Sync {
    async fn login(&self, email: &str, password: &str) -> Result<Session, SubmitError>;

    async fn submit_process(
        &self,
        url: &str,
        session: Option<&Session>,
    ) -> Result<Ack, SubmitError>;

    async fn submit_research(
        &self,
        tld: &str,
        questions: &[String],
        session: Option<&Session>,
    ) -> Result<Ack, SubmitError>;
}

/// JSON client for the same-origin gateway endpoints.
#[derive(Debug, Clone)]
pub struct GatewayClient {
    client: reqwest::Client,
    login_url: Url,
    process_url: Url,
    query_url: Url,
}

#[derive(Deserialize)]
struct LoginReply {
    token: String,
}

impl GatewayClient {
    pub fn new(config: &EngineConfig) -> Result<Self, SubmitError> {
        let client = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .build()
            .map_err(|err| SubmitError::new(SubmitFailure::Network, err.to_string()))?;
        Ok(Self {
            client,
            login_url: config.login_url().clone(),
            process_url: config.process_url().clone(),
            query_url: config.query_url().clone(),
        })
    }

    async fn post_json(
        &self,
        url: &Url,
        body: &serde_json::Value,
        session: Option<&Session>,
    ) -> Result<reqwest::Response, SubmitError> {
        let mut request = self.client.post(url.clone()).json(body);
        if let Some(session) = session {
            request = request.bearer_auth(&session.token);
        }
        let response = request.send().await.map_err(map_submit_error)?;
        let status = response.status();
        if !status.is_success() {
            return Err(SubmitError::new(
                SubmitFailure::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }
        Ok(response)
    }

    async fn post_for_ack(
        &self,
        url: &Url,
        body: &serde_json::Value,
        session: Option<&Session>,
    ) -> Result<Ack, SubmitError> {
        let response = self.post_json(url, body, session).await?;
        response
            .json::<Ack>()
            .await
            .map_err(|err| SubmitError::new(SubmitFailure::BadReply, err.to_string()))
    }
}

#[async_trait::async_trait]
impl Submitter for GatewayClient {
    async fn login(&self, email: &str, password: &str) -> Result<Session, SubmitError> {
        let body = json!({ "email": email, "password": password });
        let response = self.post_json(&self.login_url, &body, None).await?;
        let reply = response
            .json::<LoginReply>()
            .await
            .map_err(|err| SubmitError::new(SubmitFailure::BadReply, err.to_string()))?;
        Ok(Session {
            token: reply.token,
        })
    }

    async fn submit_process(
        &self,
        url: &str,
        session: Option<&Session>,
    ) -> Result<Ack, SubmitError> {
        let body = json!({ "url": url });
        self.post_for_ack(&self.process_url, &body, session).await
    }

    async fn submit_research(
        &self,
        tld: &str,
        questions: &[String],
        session: Option<&Session>,
    ) -> Result<Ack, SubmitError> {
        let body = json!({ "tld": tld, "questions": questions });
        self.post_for_ack(&self.query_url, &body, session).await
    }
}

fn map_submit_error(err: reqwest::Error) -> SubmitError {
    if err.is_timeout() {
        return SubmitError::new(SubmitFailure::Timeout, err.to_string());
    }
    SubmitError::new(SubmitFailure::Network, err.to_string())
}
