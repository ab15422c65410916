//! Daily WOD flow: extract -> format -> notify. All-or-nothing, single pass.

use crate::domain::{DeliveryReceipt, DomainError};
use crate::usecases::extractor::WodExtractor;
use crate::usecases::formatter::format_workout;
use crate::usecases::notifier::Notifier;
use chrono::NaiveDate;
use tracing::info;

pub struct WodService {
    extractor: WodExtractor,
    notifier: Notifier,
}

impl WodService {
    pub fn new(extractor: WodExtractor, notifier: Notifier) -> Self {
        Self {
            extractor,
            notifier,
        }
    }

    /// Run the flow for `today`. The message is built fully before any send is attempted.
    pub async fn run(&self, today: NaiveDate) -> Result<DeliveryReceipt, DomainError> {
        let workout = self.extractor.extract().await?;
        let message = format_workout(&workout, today)?;
        info!(date = %today, chars = message.char_len(), "workout formatted");
        self.notifier.notify(&message).await
    }
}
