//! Browser adapters. Implement PageFetcher.

pub mod chromium;

pub use chromium::{run_script, BrowserOptions, ChromiumPageFetcher, ScriptedPage, WodPageScript};
