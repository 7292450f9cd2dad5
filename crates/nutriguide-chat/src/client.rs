//! HTTP implementation of the backend services.
//!
//! One `reqwest::Client` shared by the food lookup, chat and liveness
//! endpoints. The configured request timeout applies to every call; expiry
//! surfaces as [`ServiceError::Transport`].

use std::time::Duration;

use async_trait::async_trait;
use nutriguide_core::config::ServicesConfig;
use tracing::{debug, warn};

use crate::error::ServiceError;
use crate::services::{ChatBackend, ChatReply, ChatRequest, FoodInfo, FoodLookup, StatusReply};

/// Client for the nutrition backend.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    base_url: String,
    food_info_path: String,
    chat_path: String,
    status_path: String,
}

impl HttpBackend {
    /// Build a client from the services section of the configuration.
    pub fn new(config: &ServicesConfig) -> Result<Self, ServiceError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| ServiceError::Transport(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            food_info_path: config.food_info_path.clone(),
            chat_path: config.chat_path.clone(),
            status_path: config.status_path.clone(),
        })
    }

    /// Override the base URL (tests point this at a local stub).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Hit the liveness endpoint once.
    pub async fn check_status(&self) -> Result<StatusReply, ServiceError> {
        let url = self.url(&self.status_path);
        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ServiceError::Status(status.as_u16()));
        }
        Ok(response.json::<StatusReply>().await?)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl FoodLookup for HttpBackend {
    async fn lookup(&self, food_name: &str) -> Result<FoodInfo, ServiceError> {
        let url = self.url(&self.food_info_path);
        debug!(food_name, %url, "Food lookup request");

        let response = self
            .client
            .get(&url)
            .query(&[("food_name", food_name)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            // The service reports misses as `{"error": ..}` with a 4xx status
            let body = response.text().await.unwrap_or_default();
            let reason = serde_json::from_str::<FoodInfo>(&body)
                .ok()
                .and_then(|info| info.error);
            warn!(status = status.as_u16(), ?reason, "Food lookup rejected");
            return Err(match reason {
                Some(msg) => ServiceError::NotFound(msg),
                None => ServiceError::Status(status.as_u16()),
            });
        }

        let info: FoodInfo = response.json().await?;
        if let Some(msg) = info.error {
            return Err(ServiceError::NotFound(msg));
        }
        Ok(info)
    }
}

#[async_trait]
impl ChatBackend for HttpBackend {
    async fn send(&self, message: &str) -> Result<ChatReply, ServiceError> {
        let url = self.url(&self.chat_path);
        debug!(%url, len = message.len(), "Chat request");

        let body = ChatRequest {
            message: message.to_string(),
        };
        let response = self.client.post(&url).json(&body).send().await?;

        // A reply with a `response` field is usable whatever the status
        let status = response.status();
        let text = response.text().await?;
        match serde_json::from_str::<ChatReply>(&text) {
            Ok(reply) => {
                if !status.is_success() {
                    warn!(status = status.as_u16(), "Chat service replied with error status");
                }
                Ok(reply)
            }
            Err(_) if !status.is_success() => Err(ServiceError::Status(status.as_u16())),
            Err(e) => Err(ServiceError::Malformed(e.to_string())),
        }
    }
}
