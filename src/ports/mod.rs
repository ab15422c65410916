//! Port traits. API boundaries for the hexagon.
//!
//! - Outbound: Called by application into infrastructure (browser, chat transport)

pub mod outbound;

pub use outbound::{Messenger, PageFetcher};
