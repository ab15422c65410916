//! Outbound ports. Application calls into infrastructure.
//!
//! Implemented by adapters.

use crate::domain::{ChatId, DeliveryReceipt, DomainError, FormattedMessage};

/// Page text source. Hides the browser engine behind a single call.
#[async_trait::async_trait]
pub trait PageFetcher: Send + Sync {
    /// Open `url`, reach the workout content region and return its visible text.
    ///
    /// Returns `DomainError::Extraction` when the page or region is unavailable.
    async fn fetch_page_text(&self, url: &str) -> Result<String, DomainError>;
}

/// Chat transport. One call = one outbound message.
#[async_trait::async_trait]
pub trait Messenger: Send + Sync {
    /// Send `message` to `destination`. Implementations must not retry.
    async fn send(
        &self,
        destination: &ChatId,
        message: &FormattedMessage,
    ) -> Result<DeliveryReceipt, DomainError>;
}
