//! General-purpose helpers: unique ids and date formatting.

use std::cell::Cell;
use std::rc::Rc;

use sheetfake_core::Temporal;

/// Prefix of every generated id
pub const UUID_PREFIX: &str = "mock-uuid";

/// Id generation and date formatting.
#[derive(Debug, Clone, Default)]
pub struct Utilities {
    counter: Rc<Cell<u64>>,
}

impl Utilities {
    pub fn new() -> Self {
        Self::default()
    }

    /// Generate an id of the form `mock-uuid-<millis>-<n>`.
    ///
    /// `n` counts up per handle family, so ids never repeat even within the same
    /// millisecond.
    pub fn uuid(&self) -> String {
        let n = self.counter.get() + 1;
        self.counter.set(n);
        let millis = chrono::Utc::now().timestamp_millis();
        format!("{UUID_PREFIX}-{millis}-{n}")
    }

    /// Format a temporal with one of the supported patterns.
    ///
    /// Recognized patterns are `yyyy-MM-dd HH:mm:ss`, `yyyy-MM-dd` and `HH:mm:ss`;
    /// anything else yields the full ISO instant text. The time zone is accepted for
    /// signature compatibility and not applied. Returns `None` for an invalid
    /// temporal.
    pub fn format_date(&self, temporal: &Temporal, time_zone: &str, pattern: &str) -> Option<String> {
        let datetime = temporal.datetime()?;
        tracing::trace!("format_date({pattern:?}) ignoring time zone {time_zone:?}");
        let text = match pattern {
            "yyyy-MM-dd HH:mm:ss" => datetime.format("%Y-%m-%d %H:%M:%S").to_string(),
            "yyyy-MM-dd" => datetime.format("%Y-%m-%d").to_string(),
            "HH:mm:ss" => datetime.format("%H:%M:%S").to_string(),
            _ => return temporal.to_iso_string(),
        };
        Some(text)
    }

    /// Does nothing; tests never wait.
    pub fn sleep(&self, _millis: u64) {}
}
