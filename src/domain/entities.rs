//! Domain entities. Pure values that flow through one run.
//!
//! No browser/HTTP types here — adapters map into these.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Raw workout text as read from the page. Exists for a single invocation only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkoutText(String);

impl WorkoutText {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when nothing but whitespace was extracted.
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

/// Message ready for delivery. Built only by the formatter, never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedMessage {
    text: String,
    body: String,
}

impl FormattedMessage {
    /// Wraps an already normalized, non-empty body into its final text.
    pub(crate) fn new(text: String, body: String) -> Self {
        debug_assert!(!body.is_empty());
        Self { text, body }
    }

    /// Full text as sent to the chat (header, date, body, footer).
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Normalized workout body without the template.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Length in characters, the unit Telegram limits on.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

impl fmt::Display for FormattedMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Chat destination. Numeric id (`-100…`) or public `@channel` username.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChatId(String);

impl ChatId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into().trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ChatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Transport-confirmed delivery. Not stored anywhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryReceipt {
    pub chat_id: ChatId,
    /// Message id assigned by the transport; `None` for dry runs.
    pub message_id: Option<i64>,
}
