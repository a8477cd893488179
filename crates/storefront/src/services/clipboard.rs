//! Clipboard sink and the transient "copied" indicator.

use std::time::Duration;

use thiserror::Error;
use tokio::time::Instant;

/// Errors from a clipboard sink.
#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("Clipboard unavailable: {0}")]
    Unavailable(String),
}

/// Write-only text sink.
pub trait Clipboard {
    /// Place `text` on the clipboard.
    ///
    /// # Errors
    ///
    /// Returns `ClipboardError` if the sink rejects the write.
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// Clipboard that records writes.
///
/// The server cannot reach the shopper's clipboard; handlers capture the text
/// here and return it so the browser performs the actual write.
#[derive(Debug, Default)]
pub struct CapturedClipboard {
    writes: Vec<String>,
}

impl CapturedClipboard {
    /// The most recent write.
    #[must_use]
    pub fn last(&self) -> Option<&str> {
        self.writes.last().map(String::as_str)
    }

    /// Consume the sink, returning the most recent write.
    #[must_use]
    pub fn into_last(mut self) -> Option<String> {
        self.writes.pop()
    }
}

impl Clipboard for CapturedClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.writes.push(text.to_owned());
        Ok(())
    }
}

/// Indicator that stays set for a fixed time after a copy.
///
/// Holds an expiry instant instead of a pending timer, so there is nothing to
/// cancel when the owner goes away.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CopyFlag {
    until: Option<Instant>,
}

impl CopyFlag {
    /// Set the flag at `now` for `duration`. Re-arming extends it.
    pub fn arm(&mut self, now: Instant, duration: Duration) {
        self.until = Some(now + duration);
    }

    /// Whether the flag is set at `now`.
    #[must_use]
    pub fn is_set(&self, now: Instant) -> bool {
        self.until.is_some_and(|until| now < until)
    }

    /// Time left before the flag clears, zero once clear.
    #[must_use]
    pub fn remaining(&self, now: Instant) -> Duration {
        self.until
            .map_or(Duration::ZERO, |until| until.saturating_duration_since(now))
    }
}
