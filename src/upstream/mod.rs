use std::time::Duration;

use async_trait::async_trait;
use chat_core::{ChatRequest, KeywordResponder, Responder, ResponderError, wire};
use tracing::{debug, error};

use crate::config::RelayConfig;

/// Calls the backend responder over HTTP with a JSON body.
#[derive(Debug, Clone)]
pub struct HttpResponder {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpResponder {
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client, endpoint: endpoint.to_string() })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// One POST to the backend. The future is `Send`, so handlers can await it.
    pub async fn forward(&self, request: &ChatRequest) -> Result<String, ResponderError> {
        let resp = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = resp.status();
        let body = resp.text().await.map_err(|e| self.transport_error(e))?;

        if !status.is_success() {
            let reason = status.canonical_reason().unwrap_or_default();
            return Err(wire::failure_from_status(status.as_u16(), reason, &body));
        }

        debug!(endpoint = %self.endpoint, "Backend replied");
        wire::reply_from_body(&body)
    }

    fn transport_error(&self, e: reqwest::Error) -> ResponderError {
        error!("Backend request to {} failed: {e}", self.endpoint);
        if e.is_timeout() {
            ResponderError::Timeout
        } else {
            ResponderError::Network(e.to_string())
        }
    }
}

#[async_trait(?Send)]
impl Responder for HttpResponder {
    async fn respond(&self, request: &ChatRequest) -> Result<String, ResponderError> {
        self.forward(request).await
    }
}

/// Where the relay gets its replies from.
#[derive(Debug, Clone)]
pub enum Upstream {
    Http(HttpResponder),
    Demo(KeywordResponder),
}

impl Upstream {
    pub fn from_config(config: &RelayConfig) -> Result<Self, reqwest::Error> {
        if config.demo_mode {
            return Ok(Upstream::Demo(KeywordResponder));
        }
        HttpResponder::new(&config.backend_url, config.backend_timeout).map(Upstream::Http)
    }

    pub async fn forward(&self, request: &ChatRequest) -> Result<String, ResponderError> {
        match self {
            Upstream::Http(http) => http.forward(request).await,
            Upstream::Demo(demo) => Ok(demo.reply(&request.message)),
        }
    }

    pub fn describe(&self) -> String {
        match self {
            Upstream::Http(http) => http.endpoint().to_string(),
            Upstream::Demo(_) => "demo keyword responder".to_string(),
        }
    }
}
