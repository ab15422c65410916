//! Telegram delivery adapters.

pub mod bot_api;
pub mod dry_run;

pub use bot_api::TelegramBotMessenger;
pub use dry_run::DryRunMessenger;
