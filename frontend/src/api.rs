use async_trait::async_trait;
use chat_core::{ChatRequest, Responder, ResponderError, wire};
use gloo_net::http::Request;

/// Same-origin relay endpoint.
const CHAT_ENDPOINT: &str = "/api/chat";

/// Sends turns to the relay with a browser `fetch`.
#[derive(Clone, Debug)]
pub struct RelayResponder {
    endpoint: String,
}

impl Default for RelayResponder {
    fn default() -> Self {
        Self { endpoint: CHAT_ENDPOINT.to_string() }
    }
}

#[async_trait(?Send)]
impl Responder for RelayResponder {
    async fn respond(&self, request: &ChatRequest) -> Result<String, ResponderError> {
        let resp = Request::post(&self.endpoint)
            .json(request)
            .map_err(|e| ResponderError::MalformedBody(format!("Serialize error: {e}")))?
            .send()
            .await
            .map_err(|e| ResponderError::Network(e.to_string()))?;

        let body = resp
            .text()
            .await
            .map_err(|e| ResponderError::Network(e.to_string()))?;

        if !resp.ok() {
            return Err(wire::failure_from_status(resp.status(), &resp.status_text(), &body));
        }

        wire::reply_from_body(&body)
    }
}
