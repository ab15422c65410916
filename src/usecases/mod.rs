//! Application use cases. Orchestrate domain logic via ports.

pub mod dispatcher;
pub mod extractor;
pub mod formatter;
pub mod notifier;
pub mod wod_service;

pub use dispatcher::{Dispatcher, Mode, RunOutcome};
pub use extractor::WodExtractor;
pub use formatter::format_workout;
pub use notifier::Notifier;
pub use wod_service::WodService;
