use anyhow::{anyhow, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::chat::Message;

/// Production endpoint of the advisor backend.
pub const DEFAULT_ENDPOINT: &str = "https://ia-coche-backend.onrender.com/chat";

#[derive(Serialize)]
struct ChatRequest<'a> {
    messages: &'a [Message],
}

#[derive(Deserialize)]
struct ChatResponse {
    response: Message,
}

/// HTTP client for the conversational backend.
#[derive(Clone)]
pub struct AdvisorClient {
    client: Client,
    endpoint: String,
}

impl AdvisorClient {
    pub fn new(endpoint: &str) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.to_string(),
        }
    }

    /// Send the full conversation and return the advisor's single reply.
    ///
    /// Any non-2xx status, transport failure, or malformed body is one
    /// undifferentiated connection error; the payload is not interpreted.
    pub async fn send(&self, messages: &[Message]) -> Result<Message> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&ChatRequest { messages })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(anyhow!(
                "advisor backend returned status {}",
                response.status()
            ));
        }

        let chat_response: ChatResponse = response.json().await?;
        Ok(chat_response.response)
    }
}
