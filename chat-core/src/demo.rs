use async_trait::async_trait;

use crate::dispatcher::Responder;
use crate::errors::ResponderError;
use crate::wire::ChatRequest;

const GREETING: &str = "Hello! How can I help you today?";
const HELP: &str = "I'm here to help! I can answer questions, provide information, \
                    and assist with various tasks. What would you like to know?";
const FEATURES: &str = "I offer several features including answering questions, providing \
                        information, assisting with tasks, and engaging in natural \
                        conversations. Is there something specific you'd like to know about?";
const IDENTITY: &str = "I'm an AI assistant designed to provide helpful, accurate, and \
                        friendly responses to your questions and requests.";
const FALLBACK: &str = "That's an interesting question. As an AI assistant, I'm designed to \
                        provide helpful information and assistance. Can you provide more \
                        details about what you'd like to know?";

// Checked in order; first hit wins.
const RULES: &[(&[&str], &str)] = &[
    (&["hello", "hi"], GREETING),
    (&["help", "can you"], HELP),
    (&["feature", "do"], FEATURES),
    (&["who", "what are you"], IDENTITY),
];

/// Canned responder for running the widget without a backend.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordResponder;

impl KeywordResponder {
    pub fn reply(&self, message: &str) -> String {
        let lower = message.to_lowercase();
        RULES
            .iter()
            .find(|(keywords, _)| keywords.iter().any(|k| lower.contains(k)))
            .map_or(FALLBACK, |(_, reply)| *reply)
            .to_string()
    }
}

#[async_trait(?Send)]
impl Responder for KeywordResponder {
    async fn respond(&self, request: &ChatRequest) -> Result<String, ResponderError> {
        Ok(self.reply(&request.message))
    }
}
