//! Obtain today's workout text through the PageFetcher port, bounded by a timeout.
//!
//! No retry: the next scheduled run is the retry.

use crate::domain::{DomainError, WorkoutText};
use crate::ports::PageFetcher;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{info, warn};

pub struct WodExtractor {
    fetcher: Arc<dyn PageFetcher>,
    url: String,
    timeout: Duration,
}

impl WodExtractor {
    pub fn new(fetcher: Arc<dyn PageFetcher>, url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            fetcher,
            url: url.into(),
            timeout,
        }
    }

    /// Fetch the workout. Fails with `ExtractionTimeout` once `timeout` elapses,
    /// and with `Extraction` when the page returns nothing readable.
    pub async fn extract(&self) -> Result<WorkoutText, DomainError> {
        let started = Instant::now();
        info!(url = %self.url, timeout_secs = self.timeout.as_secs(), "extracting workout");

        let text = tokio::time::timeout(self.timeout, self.fetcher.fetch_page_text(&self.url))
            .await
            .map_err(|_| {
                warn!(url = %self.url, "workout region did not render in time");
                DomainError::ExtractionTimeout {
                    seconds: self.timeout.as_secs(),
                }
            })??;

        let workout = WorkoutText::new(text);
        if workout.is_blank() {
            return Err(DomainError::Extraction(format!(
                "content region on {} is empty",
                self.url
            )));
        }

        info!(
            chars = workout.as_str().chars().count(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "workout extracted"
        );
        Ok(workout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorKind;

    struct StaticPage(&'static str);

    #[async_trait::async_trait]
    impl PageFetcher for StaticPage {
        async fn fetch_page_text(&self, _url: &str) -> Result<String, DomainError> {
            Ok(self.0.to_string())
        }
    }

    /// Page whose content region never renders.
    struct NeverRenders;

    #[async_trait::async_trait]
    impl PageFetcher for NeverRenders {
        async fn fetch_page_text(&self, _url: &str) -> Result<String, DomainError> {
            std::future::pending::<()>().await;
            unreachable!()
        }
    }

    struct LayoutChanged;

    #[async_trait::async_trait]
    impl PageFetcher for LayoutChanged {
        async fn fetch_page_text(&self, url: &str) -> Result<String, DomainError> {
            Err(DomainError::Extraction(format!("no <article> on {}", url)))
        }
    }

    #[tokio::test]
    async fn test_returns_page_text() {
        let ex = WodExtractor::new(
            Arc::new(StaticPage("Fran: 21-15-9")),
            "https://example.com",
            Duration::from_secs(5),
        );
        assert_eq!(ex.extract().await.unwrap().as_str(), "Fran: 21-15-9");
    }

    #[tokio::test(start_paused = true)]
    async fn test_times_out_within_bound() {
        let ex = WodExtractor::new(
            Arc::new(NeverRenders),
            "https://example.com",
            Duration::from_secs(30),
        );
        let start = tokio::time::Instant::now();
        let err = ex.extract().await.unwrap_err();
        let waited = start.elapsed();

        assert!(matches!(err, DomainError::ExtractionTimeout { seconds: 30 }));
        assert!(waited >= Duration::from_secs(30));
        assert!(waited < Duration::from_secs(31));
    }

    #[tokio::test]
    async fn test_missing_region_propagates() {
        let ex = WodExtractor::new(
            Arc::new(LayoutChanged),
            "https://example.com",
            Duration::from_secs(5),
        );
        let err = ex.extract().await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Extraction);
    }

    #[tokio::test]
    async fn test_blank_region_is_extraction_error() {
        let ex = WodExtractor::new(
            Arc::new(StaticPage(" \n ")),
            "https://example.com",
            Duration::from_secs(5),
        );
        assert!(matches!(ex.extract().await, Err(DomainError::Extraction(_))));
    }
}
