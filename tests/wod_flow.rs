use chrono::NaiveDate;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use wod_courier::adapters::telegram::DryRunMessenger;
use wod_courier::domain::{ChatId, DomainError, ErrorKind};
use wod_courier::ports::PageFetcher;
use wod_courier::usecases::formatter::{FOOTER, HEADER};
use wod_courier::usecases::{Dispatcher, Mode, Notifier, RunOutcome, WodExtractor, WodService};

/// Serves fixed text and counts how often the page was opened.
struct FakePage {
    text: &'static str,
    calls: AtomicUsize,
}

impl FakePage {
    fn new(text: &'static str) -> Self {
        Self {
            text,
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait::async_trait]
impl PageFetcher for FakePage {
    async fn fetch_page_text(&self, url: &str) -> Result<String, DomainError> {
        assert_eq!(url, "https://gym.example/");
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.text.to_string())
    }
}

fn dispatcher(page: Arc<FakePage>, messenger: Arc<DryRunMessenger>) -> Dispatcher {
    let extractor = WodExtractor::new(page, "https://gym.example/", Duration::from_secs(10));
    let notifier = Notifier::new(messenger, ChatId::new("-100555"));
    Dispatcher::new(WodService::new(extractor, notifier))
}

#[tokio::test]
async fn test_wod_end_to_end() {
    let page = Arc::new(FakePage::new("5 rounds: 10 pushups, 15 squats"));
    let messenger = Arc::new(DryRunMessenger::new());
    let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();

    let outcome = dispatcher(page.clone(), messenger.clone())
        .run(Mode::Wod, today)
        .await
        .unwrap();
    let RunOutcome::WodDelivered(receipt) = outcome;
    assert_eq!(receipt.chat_id.as_str(), "-100555");

    let sent = messenger.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].0.as_str(), "-100555");
    let body = "5 rounds: 10 pushups, 15 squats";
    assert_eq!(sent[0].1, format!("{HEADER}\n19/10/2026 (Monday)\n\n{body}\n\n{FOOTER}"));
    assert!(sent[0].1.starts_with("\u{1F3CB}\u{FE0F}\u{200D}\u{2642}\u{FE0F} CROSSFIT PANDA"));
    assert_eq!(page.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_blank_page_sends_nothing() {
    let page = Arc::new(FakePage::new("   \n  "));
    let messenger = Arc::new(DryRunMessenger::new());
    let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();

    let err = dispatcher(page, messenger.clone())
        .run(Mode::Wod, today)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Extraction);
    assert!(messenger.sent().is_empty());
}

#[tokio::test]
async fn test_registration_mode_not_implemented() {
    let page = Arc::new(FakePage::new("Fran"));
    let messenger = Arc::new(DryRunMessenger::new());
    let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();

    let err = dispatcher(page.clone(), messenger.clone())
        .run(Mode::Registration, today)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Unsupported);
    assert_eq!(page.calls.load(Ordering::SeqCst), 0);
    assert!(messenger.sent().is_empty());
}
