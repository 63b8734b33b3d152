//! Tracing integration for outcome-rail.
//!
//! This module wires the notification channel into the `tracing` ecosystem
//! and records the active span on failing outcomes.
//!
//! # Feature Flag
//!
//! Requires the `tracing` feature:
//!
//! ```toml
//! [dependencies]
//! outcome-rail = { version = "0.1", features = ["tracing"] }
//! ```
//!
//! # Examples
//!
//! ```
//! use outcome_rail::{tracing_ext, NotificationChannel};
//!
//! // Log every failure routed through the global channel.
//! tracing_ext::install(NotificationChannel::global());
//! ```

use tracing::Span;

use crate::notify::NotificationChannel;
use crate::types::error::Error;
use crate::types::{OptionalOutcome, Outcome};

/// Extension key under which [`OutcomeSpanExt`] records the span.
pub const SPAN_KEY: &str = "span";

/// Emits one `error` event describing `error`.
///
/// The message field is left out for sensitive errors.
pub fn log_failure(error: &Error) {
    let code = error.error_code();
    let identifier = error.identifier();
    if error.is_sensitive() {
        tracing::error!(
            target: "outcome_rail",
            title = error.title(),
            code,
            identifier,
            "operation failed"
        );
    } else {
        tracing::error!(
            target: "outcome_rail",
            title = error.title(),
            code,
            identifier,
            message = error.message(),
            "operation failed"
        );
    }
}

/// Registers [`log_failure`] as an observe hook of `channel`.
pub fn install(channel: &NotificationChannel) {
    channel.on_observe(log_failure);
}

/// Returns a copy of `error` recording the name of `span`.
pub fn attach_span(error: &Error, span: &Span) -> Error {
    let name = span.metadata().map_or("unknown", |metadata| metadata.name());
    error.with_extension(SPAN_KEY, format!("in span '{name}'"))
}

/// Extension trait recording span context on failing outcomes.
pub trait OutcomeSpanExt: Sized {
    /// Records the current span on a failure.
    fn with_current_span(self) -> Self {
        self.with_span(&Span::current())
    }

    /// Records `span` on a failure.
    fn with_span(self, span: &Span) -> Self;
}

impl<T> OutcomeSpanExt for Outcome<T> {
    fn with_span(self, span: &Span) -> Self {
        self.with_error(|error| attach_span(&error, span))
    }
}

impl<T> OutcomeSpanExt for OptionalOutcome<T> {
    fn with_span(self, span: &Span) -> Self {
        self.with_error(|error| attach_span(&error, span))
    }
}
