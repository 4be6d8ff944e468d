use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, header::CONTENT_TYPE};
use tracing::debug;

use crate::domain::notification::NotificationMessage;
use crate::error::{AppError, AppResult};
use crate::services::NotificationService;

/// Incoming-webhook client for the chat channel.
pub struct SlackWebhook {
    http: Client,
    url: String,
}

impl SlackWebhook {
    pub fn new(url: String, timeout: Duration) -> AppResult<Self> {
        let http = Client::builder().timeout(timeout).build().map_err(|err| {
            AppError::Configuration(format!("failed to build webhook HTTP client: {err}"))
        })?;
        Ok(Self { http, url })
    }
}

#[async_trait]
impl NotificationService for SlackWebhook {
    async fn notify(&self, message: &NotificationMessage) -> AppResult<()> {
        debug!("posting chat notification");
        // The webhook URL embeds its own credential, so errors drop it.
        let response = self
            .http
            .post(&self.url)
            .header(CONTENT_TYPE, "application/json")
            .json(message)
            .send()
            .await
            .map_err(|err| {
                if err.is_timeout() {
                    AppError::Timeout("chat webhook call timed out".to_string())
                } else {
                    AppError::Notification(format!(
                        "failed to call chat webhook: {}",
                        err.without_url()
                    ))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unable to read response>".to_string());
            return Err(AppError::Notification(format!(
                "chat webhook responded with {status}: {body}"
            )));
        }
        Ok(())
    }
}
