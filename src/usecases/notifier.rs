//! Deliver a formatted message to the single configured chat. One transport call, no retry.

use crate::domain::{ChatId, DeliveryReceipt, DomainError, FormattedMessage};
use crate::ports::Messenger;
use std::sync::Arc;
use tracing::{error, info};

pub struct Notifier {
    messenger: Arc<dyn Messenger>,
    chat_id: ChatId,
}

impl Notifier {
    pub fn new(messenger: Arc<dyn Messenger>, chat_id: ChatId) -> Self {
        Self { messenger, chat_id }
    }

    pub async fn notify(&self, message: &FormattedMessage) -> Result<DeliveryReceipt, DomainError> {
        if message.text().trim().is_empty() {
            return Err(DomainError::Format("refusing to deliver an empty message".into()));
        }

        match self.messenger.send(&self.chat_id, message).await {
            Ok(receipt) => {
                info!(
                    chat_id = %self.chat_id,
                    message_id = ?receipt.message_id,
                    "message delivered"
                );
                Ok(receipt)
            }
            Err(e) => {
                error!(chat_id = %self.chat_id, error = %e, "delivery failed");
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ErrorKind, WorkoutText};
    use crate::usecases::formatter::format_workout;
    use chrono::NaiveDate;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Transport that rejects the bot credential and counts attempts.
    #[derive(Default)]
    struct RejectingMessenger {
        calls: AtomicUsize,
    }

    #[async_trait::async_trait]
    impl Messenger for RejectingMessenger {
        async fn send(
            &self,
            _destination: &ChatId,
            _message: &FormattedMessage,
        ) -> Result<DeliveryReceipt, DomainError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(DomainError::Delivery("401 Unauthorized".into()))
        }
    }

    #[tokio::test]
    async fn test_rejected_credential_is_not_retried() {
        let messenger = Arc::new(RejectingMessenger::default());
        let notifier = Notifier::new(messenger.clone(), ChatId::new("42"));
        let msg = format_workout(
            &WorkoutText::new("Murph"),
            NaiveDate::from_ymd_opt(2026, 5, 25).unwrap(),
        )
        .unwrap();

        let err = notifier.notify(&msg).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Delivery);
        assert_eq!(messenger.calls.load(Ordering::SeqCst), 1);
    }
}
