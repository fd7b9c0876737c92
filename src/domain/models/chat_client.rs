#[cfg(test)]
#[path = "chat_client_test.rs"]
mod tests;

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use serde_derive::Deserialize;
use serde_derive::Serialize;
use serde_json::Value;

use super::DeliveryFailure;
use super::ExchangeOutcome;

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

impl ChatRequest {
    pub fn new(message: &str) -> ChatRequest {
        return ChatRequest {
            message: message.to_string(),
        };
    }
}

/// Servers are loose about the reply's type, so any JSON value is accepted and
/// shown as text.
#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatReply {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply: Option<Value>,
    /// Older servers answer with `response` instead of `reply`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<Value>,
}

/// Empty strings, zero, `false` and `null` count as blank.
fn is_blank(value: &Value) -> bool {
    return match value {
        Value::Null => true,
        Value::Bool(flag) => !flag,
        Value::Number(number) => number.as_f64() == Some(0.0),
        Value::String(text) => text.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    };
}

fn as_text(value: Value) -> String {
    return match value {
        Value::String(text) => text,
        other => other.to_string(),
    };
}

impl ChatReply {
    /// Picks the text to display. A non-blank `reply` wins, a blank one gives
    /// way to `response`. Non-string values are shown as their JSON text.
    pub fn into_text(self) -> ExchangeOutcome {
        match (self.reply, self.response) {
            (Some(reply), _) if !is_blank(&reply) => return Ok(as_text(reply)),
            (_, Some(response)) => return Ok(as_text(response)),
            (Some(reply), None) => return Ok(as_text(reply)),
            (None, None) => {
                return Err(DeliveryFailure::Malformed(
                    "response has no reply field".to_string(),
                ));
            }
        }
    }
}

#[async_trait]
pub trait ChatClient {
    /// Used at startup to tell the user early when the server can't be reached.
    async fn health_check(&self) -> Result<()>;

    /// Sends one user message and waits for the reply text. Every failure,
    /// including a body that can't be read, comes back as a `DeliveryFailure`.
    async fn send(&self, request: ChatRequest) -> ExchangeOutcome;
}

pub type ChatClientRef = Arc<dyn ChatClient + Send + Sync>;
