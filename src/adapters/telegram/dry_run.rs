//! Dry-run messenger. Logs and records messages instead of calling the Bot API.
//!
//! Used by `--dry-run` to check scraping and formatting without posting to the chat.

use crate::domain::{ChatId, DeliveryReceipt, DomainError, FormattedMessage};
use crate::ports::Messenger;
use std::sync::Mutex;
use tracing::info;

#[derive(Default)]
pub struct DryRunMessenger {
    sent: Mutex<Vec<(ChatId, String)>>,
    echo: bool,
}

impl DryRunMessenger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Also print each message to stdout.
    pub fn with_echo() -> Self {
        Self {
            echo: true,
            ..Self::default()
        }
    }

    /// Messages seen so far, in send order.
    pub fn sent(&self) -> Vec<(ChatId, String)> {
        self.sent
            .lock()
            .map(|g| g.clone())
            .unwrap_or_default()
    }
}

#[async_trait::async_trait]
impl Messenger for DryRunMessenger {
    async fn send(
        &self,
        destination: &ChatId,
        message: &FormattedMessage,
    ) -> Result<DeliveryReceipt, DomainError> {
        info!(chat_id = %destination, chars = message.char_len(), "[DRY RUN] message not sent");
        if self.echo {
            println!("{}", message.text());
        }
        self.sent
            .lock()
            .map_err(|_| DomainError::Delivery("dry-run recorder poisoned".into()))?
            .push((destination.clone(), message.text().to_string()));
        Ok(DeliveryReceipt {
            chat_id: destination.clone(),
            message_id: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::WorkoutText;
    use crate::usecases::formatter::format_workout;
    use chrono::NaiveDate;

    #[tokio::test]
    async fn test_records_without_message_id() {
        let messenger = DryRunMessenger::new();
        let msg = format_workout(
            &WorkoutText::new("Annie"),
            NaiveDate::from_ymd_opt(2026, 1, 2).unwrap(),
        )
        .unwrap();

        let receipt = messenger.send(&ChatId::new("@box"), &msg).await.unwrap();
        assert_eq!(receipt.message_id, None);

        let sent = messenger.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0.as_str(), "@box");
        assert_eq!(sent[0].1, msg.text());
    }
}
