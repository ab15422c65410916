//! Infrastructure adapters. Implement outbound ports.
//!
//! Headless browser, Telegram Bot API. Map errors to DomainError.

pub mod browser;
pub mod telegram;
