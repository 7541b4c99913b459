//! Slack HTTP client.

use crate::error::SlackError;
use crate::types::*;
use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Default Slack Web API base URL.
pub const DEFAULT_API_URL: &str = "https://slack.com/api";

/// Outbound chat capability used by the bot to answer commands.
#[async_trait]
pub trait ChatClient: Send + Sync {
    /// Post a plain-text message to a channel.
    async fn post_text(&self, channel: &str, text: &str) -> Result<(), SlackError>;
}

/// Slack Web API client authenticated with a bot token.
#[derive(Clone)]
pub struct SlackClient {
    client: Client,
    base_url: String,
    token: SecretString,
}

impl SlackClient {
    /// Create a new Slack client.
    pub fn new(
        token: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Result<Self, SlackError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: SecretString::new(token.into()),
        })
    }

    /// Identity of the bot token (`auth.test`).
    #[instrument(skip(self))]
    pub async fn auth_test(&self) -> Result<AuthTestResponse, SlackError> {
        let response = self
            .client
            .post(format!("{}/auth.test", self.base_url))
            .bearer_auth(self.token.expose_secret())
            .send()
            .await?;

        if !response.status().is_success() {
            let msg = response.text().await.unwrap_or_default();
            return Err(SlackError::Api(msg));
        }

        let auth: AuthTestResponse = response.json().await?;
        if !auth.ok {
            return Err(SlackError::Api(
                auth.error.unwrap_or_else(|| "unknown_error".into()),
            ));
        }
        Ok(auth)
    }
}

#[async_trait]
impl ChatClient for SlackClient {
    #[instrument(skip(self, text))]
    async fn post_text(&self, channel: &str, text: &str) -> Result<(), SlackError> {
        let request = PostMessageRequest {
            channel: channel.to_string(),
            text: text.to_string(),
        };

        let response = self
            .client
            .post(format!("{}/chat.postMessage", self.base_url))
            .bearer_auth(self.token.expose_secret())
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let msg = response.text().await.unwrap_or_default();
            warn!("Send failed: {} {}", status, msg);
            return Err(SlackError::SendFailed(format!("{}: {}", status, msg)));
        }

        let body: ApiResponse = response.json().await?;
        if !body.ok {
            let reason = body.error.unwrap_or_else(|| "unknown_error".into());
            warn!("Slack rejected message: {}", reason);
            return Err(SlackError::Api(reason));
        }

        debug!(ts = ?body.ts, "Sent message to {}", channel);
        Ok(())
    }
}
