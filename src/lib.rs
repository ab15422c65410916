//! wod-courier: daily WOD scraper and Telegram forwarder with Hexagonal Architecture.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod shared;
pub mod usecases;
