//! Telegram Bot API adapter. Implements Messenger via `sendMessage`.

use crate::domain::{ChatId, DeliveryReceipt, DomainError, FormattedMessage};
use crate::ports::Messenger;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

/// Hard limit on `text` length enforced by Telegram (characters after entity parsing).
pub const MAX_MESSAGE_CHARS: usize = 4096;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

/// Bot API messenger.
///
/// The token is only ever placed in the request path; it is never logged or
/// included in returned errors.
pub struct TelegramBotMessenger {
    client: Client,
    api_url: String,
    token: String,
}

#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    chat_id: &'a str,
    text: &'a str,
    disable_web_page_preview: bool,
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    ok: bool,
    #[serde(default)]
    result: Option<SentMessage>,
    #[serde(default)]
    error_code: Option<u16>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    parameters: Option<ResponseParameters>,
}

#[derive(Debug, Deserialize)]
struct SentMessage {
    message_id: i64,
}

#[derive(Debug, Deserialize)]
struct ResponseParameters {
    #[serde(default)]
    retry_after: Option<u64>,
}

impl TelegramBotMessenger {
    /// # Arguments
    /// * `api_url` - Bot API base (e.g. "https://api.telegram.org"), no trailing slash
    /// * `token` - Bot token from @BotFather
    pub fn new(api_url: impl Into<String>, token: impl Into<String>) -> Result<Self, DomainError> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| DomainError::Delivery(format!("HTTP client init failed: {}", e)))?;
        Ok(Self {
            client,
            api_url: api_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
        })
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/bot{}/{}", self.api_url, self.token, method)
    }

    /// Map a non-ok Bot API answer to a domain error.
    fn classify_failure(status: StatusCode, body: Option<ApiResponse>) -> DomainError {
        let description = body
            .as_ref()
            .and_then(|b| b.description.clone())
            .unwrap_or_else(|| "no description".to_string());
        let code = body
            .as_ref()
            .and_then(|b| b.error_code)
            .unwrap_or(status.as_u16());

        match code {
            429 => {
                let retry_after = body
                    .and_then(|b| b.parameters)
                    .and_then(|p| p.retry_after)
                    .unwrap_or(0);
                DomainError::RateLimited { retry_after }
            }
            401 | 404 => DomainError::Delivery(format!(
                "bot credential rejected ({}): {}",
                code, description
            )),
            403 => DomainError::Delivery(format!(
                "bot may not post to this chat ({}): {}",
                code, description
            )),
            _ => DomainError::Delivery(format!("Bot API error {}: {}", code, description)),
        }
    }
}

#[async_trait::async_trait]
impl Messenger for TelegramBotMessenger {
    async fn send(
        &self,
        destination: &ChatId,
        message: &FormattedMessage,
    ) -> Result<DeliveryReceipt, DomainError> {
        let chars = message.char_len();
        if chars > MAX_MESSAGE_CHARS {
            return Err(DomainError::Delivery(format!(
                "message is {} characters, Telegram allows {}",
                chars, MAX_MESSAGE_CHARS
            )));
        }

        let request = SendMessageRequest {
            chat_id: destination.as_str(),
            text: message.text(),
            disable_web_page_preview: true,
        };

        debug!(chat_id = %destination, chars, "calling sendMessage");
        let response = self
            .client
            .post(self.method_url("sendMessage"))
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                // reqwest embeds the URL (and so the token) in its Display output.
                DomainError::Delivery(format!("request failed: {}", e.without_url()))
            })?;

        let status = response.status();
        let body: Option<ApiResponse> = response.json().await.ok();

        match body {
            Some(ApiResponse {
                ok: true,
                result: Some(sent),
                ..
            }) if status.is_success() => Ok(DeliveryReceipt {
                chat_id: destination.clone(),
                message_id: Some(sent.message_id),
            }),
            other => {
                let err = Self::classify_failure(status, other);
                warn!(status = %status, error = %err, "Bot API returned error");
                Err(err)
            }
        }
    }
}
