#[cfg(test)]
#[path = "http_test.rs"]
mod tests;

use std::time::Duration;

use anyhow::bail;
use anyhow::Result;
use async_trait::async_trait;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::ChatClient;
use crate::domain::models::ChatReply;
use crate::domain::models::ChatRequest;
use crate::domain::models::DeliveryFailure;
use crate::domain::models::ExchangeOutcome;

fn delivery_failure(err: reqwest::Error) -> DeliveryFailure {
    if err.is_timeout() {
        return DeliveryFailure::Timeout;
    }

    return DeliveryFailure::Transport(err.to_string());
}

/// Talks to a chat server over HTTP: `POST {url}/chat` with a JSON body.
pub struct HttpChatClient {
    url: String,
    health_check_timeout: u64,
}

impl Default for HttpChatClient {
    fn default() -> HttpChatClient {
        return HttpChatClient {
            url: Config::get(ConfigKey::ServerURL),
            health_check_timeout: Config::get_millis(ConfigKey::HealthCheckTimeout)
                .unwrap_or(1000),
        };
    }
}

impl HttpChatClient {
    fn endpoint(&self, path: &str) -> String {
        return format!("{url}/{path}", url = self.url.trim_end_matches('/'));
    }
}

#[async_trait]
impl ChatClient for HttpChatClient {
    #[allow(clippy::implicit_return)]
    async fn health_check(&self) -> Result<()> {
        if self.url.is_empty() {
            bail!("Server URL is not defined");
        }

        let res = reqwest::Client::new()
            .get(self.endpoint(""))
            .timeout(Duration::from_millis(self.health_check_timeout))
            .send()
            .await;

        let status = match res {
            Ok(res) => res.status().as_u16(),
            Err(err) => {
                tracing::error!(error = ?err, url = %self.url, "Chat server is not reachable");
                bail!(format!("Chat server at {} is not reachable", self.url));
            }
        };

        if status >= 400 {
            tracing::error!(status = status, "Chat server health check failed");
            bail!(format!(
                "Chat server at {} failed its health check with status {status}",
                self.url
            ));
        }

        return Ok(());
    }

    #[allow(clippy::implicit_return)]
    async fn send(&self, request: ChatRequest) -> ExchangeOutcome {
        let res = reqwest::Client::new()
            .post(self.endpoint("chat"))
            .json(&request)
            .send()
            .await
            .map_err(delivery_failure)?;

        let status = res.status().as_u16();
        let body = res.text().await.map_err(delivery_failure)?;

        // JSON bodies are read whatever the status.
        let reply = serde_json::from_str::<ChatReply>(&body).map_err(|err| {
            tracing::error!(status = status, error = ?err, "Chat server sent an unreadable body");
            return DeliveryFailure::Malformed(format!(
                "server responded with status {status}: {err}"
            ));
        })?;

        if status >= 400 {
            tracing::warn!(status = status, "Chat server answered with an error status");
        }

        return reply.into_text();
    }
}
