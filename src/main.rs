//! Wiring & DI. Entry point: parse mode, load config, bootstrap adapters, run one flow.
//! No business logic here; flows live in the use cases.

use clap::Parser;
use dotenv::dotenv;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use wod_courier::adapters::browser::{BrowserOptions, ChromiumPageFetcher};
use wod_courier::adapters::telegram::{DryRunMessenger, TelegramBotMessenger};
use wod_courier::ports::{Messenger, PageFetcher};
use wod_courier::shared::config::AppConfig;
use wod_courier::usecases::{Dispatcher, Mode, Notifier, RunOutcome, WodExtractor, WodService};

/// Daily WOD courier. Intended to be invoked once a day by an external scheduler.
#[derive(Parser)]
#[command(name = "wod-courier", version)]
#[command(about = "Scrape today's workout and forward it to Telegram")]
struct Cli {
    /// Flow to run: wod | registration
    mode: Mode,

    /// Log and print the message instead of sending it
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let env_loaded = dotenv();
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match &env_loaded {
        Ok(path) => info!(path = %path.display(), "loaded .env"),
        Err(_) => info!(cwd = %cwd.display(), "no .env found (check CWD)"),
    }

    let cli = Cli::parse();

    let cfg = AppConfig::load().inspect_err(|e| error!(error = %e, "startup failed"))?;
    info!(
        mode = %cli.mode,
        url = %cfg.wod_site_url,
        chat_id = %cfg.chat_id,
        dry_run = cli.dry_run,
        "configuration loaded"
    );

    // --- Browser (launched per fetch, closed before the extractor's bound) ---
    let browser_options =
        BrowserOptions::within(cfg.page_timeout, cfg.headless, cfg.chrome_executable.clone());
    let fetcher: Arc<dyn PageFetcher> = Arc::new(ChromiumPageFetcher::new(browser_options));

    // --- Chat transport ---
    let messenger: Arc<dyn Messenger> = if cli.dry_run {
        Arc::new(DryRunMessenger::with_echo())
    } else {
        Arc::new(TelegramBotMessenger::new(
            cfg.telegram_api_url.clone(),
            cfg.telegram_token.clone(),
        )?)
    };

    // --- Services ---
    let extractor = WodExtractor::new(fetcher, cfg.wod_site_url.clone(), cfg.page_timeout);
    let notifier = Notifier::new(messenger, cfg.chat_id.clone());
    let dispatcher = Dispatcher::new(WodService::new(extractor, notifier));

    let today = chrono::Local::now().date_naive();
    match dispatcher.run(cli.mode, today).await {
        Ok(RunOutcome::WodDelivered(receipt)) => {
            info!(chat_id = %receipt.chat_id, message_id = ?receipt.message_id, "WOD sent");
            Ok(())
        }
        Err(e) => {
            error!(mode = %cli.mode, kind = ?e.kind(), error = %e, "run failed");
            Err(e.into())
        }
    }
}
