//! Mode selection. Maps the CLI mode onto a flow and runs it to completion.

use crate::domain::{DeliveryReceipt, DomainError};
use crate::usecases::wod_service::WodService;
use chrono::NaiveDate;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Scrape today's workout and send it.
    Wod,
    /// Class registration on the booking platform. Not implemented.
    Registration,
}

impl FromStr for Mode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "wod" => Ok(Mode::Wod),
            "registration" | "bookweek" => Ok(Mode::Registration),
            other => Err(DomainError::Unsupported(format!(
                "unknown mode {:?} (available: wod | registration)",
                other
            ))),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Wod => f.write_str("wod"),
            Mode::Registration => f.write_str("registration"),
        }
    }
}

/// Outcome of a finished run.
#[derive(Debug)]
pub enum RunOutcome {
    WodDelivered(DeliveryReceipt),
}

pub struct Dispatcher {
    wod: WodService,
}

impl Dispatcher {
    pub fn new(wod: WodService) -> Self {
        Self { wod }
    }

    pub async fn run(&self, mode: Mode, today: NaiveDate) -> Result<RunOutcome, DomainError> {
        match mode {
            Mode::Wod => self.wod.run(today).await.map(RunOutcome::WodDelivered),
            Mode::Registration => Err(DomainError::Unsupported(
                "registration flow is not implemented".into(),
            )),
        }
    }
}
