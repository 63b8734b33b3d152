//! Call-site capture: backtraces trimmed to the frames that matter.
//!
//! A raw backtrace starts inside the backtrace machinery and ends in the
//! runtime entry point. [`FrameFilter`] walks the frames innermost-outward:
//!
//! - a frame matching a *hidden* rule is skipped;
//! - the first frame matching a *boundary* rule ends the trace (exclusive);
//! - every other frame is kept.
//!
//! Hidden frames never count as boundaries, so hiding a helper keeps its
//! caller as the first visible frame.
//!
//! # Examples
//!
//! ```
//! use outcome_rail::diagnostics::{filter_trace, FrameFilter};
//!
//! let raw = "\
//!    0: std::backtrace::Backtrace::force_capture
//!    1: app::audit::record
//!    2: app::handler::save
//!              at ./src/handler.rs:40:13
//!    3: std::rt::lang_start
//! ";
//!
//! let filter = FrameFilter::new().hide_prefix("app::audit::");
//! assert_eq!(filter_trace(&filter, raw), "   at app::handler::save in ./src/handler.rs:40:13");
//! ```

use std::backtrace::{Backtrace, BacktraceStatus};
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

mod frame;

pub use frame::{parse_frames, Frame};

use crate::notify::NotificationChannel;

const DEFAULT_HIDDEN_PREFIXES: &[&str] = &[
    "std::backtrace",
    "backtrace::",
    "outcome_rail::",
    "core::ops::function::",
    "std::panicking::",
    "std::panic::catch_unwind",
    "core::panic::unwind_safe::",
    "__rust_try",
];

const DEFAULT_HIDDEN_CONTAINING: &[&str] = &[" as core::ops::function::Fn"];

const DEFAULT_BOUNDARY_PREFIXES: &[&str] = &["std::rt::lang_start", "test::run_test", "tokio::runtime::"];

const DEFAULT_BOUNDARY_CONTAINING: &[&str] = &["__rust_begin_short_backtrace"];

type Predicate = Arc<dyn Fn(&Frame) -> bool + Send + Sync>;

#[derive(Clone)]
enum Matcher {
    Prefix(Cow<'static, str>),
    Containing(Cow<'static, str>),
    Predicate(Predicate),
}

impl Matcher {
    fn matches(&self, frame: &Frame) -> bool {
        match self {
            Self::Prefix(prefix) => frame.path().starts_with(prefix.as_ref()),
            Self::Containing(needle) => frame.symbol().contains(needle.as_ref()),
            Self::Predicate(predicate) => predicate(frame),
        }
    }
}

impl fmt::Debug for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Prefix(prefix) => f.debug_tuple("Prefix").field(prefix).finish(),
            Self::Containing(needle) => f.debug_tuple("Containing").field(needle).finish(),
            Self::Predicate(_) => f.write_str("Predicate(..)"),
        }
    }
}

/// Registry of hidden and boundary frame rules.
#[derive(Debug, Clone)]
pub struct FrameFilter {
    hidden: Vec<Matcher>,
    boundaries: Vec<Matcher>,
}

impl Default for FrameFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameFilter {
    /// A filter with the default rules.
    ///
    /// Backtrace machinery, this crate's frames, closure shims and the
    /// unwind frames around callbacks are hidden; traces end at the runtime
    /// entry point.
    pub fn new() -> Self {
        let prefix = |p: &&'static str| Matcher::Prefix(Cow::Borrowed(*p));
        let containing = |p: &&'static str| Matcher::Containing(Cow::Borrowed(*p));

        Self {
            hidden: DEFAULT_HIDDEN_PREFIXES
                .iter()
                .map(prefix)
                .chain(DEFAULT_HIDDEN_CONTAINING.iter().map(containing))
                .collect(),
            boundaries: DEFAULT_BOUNDARY_PREFIXES
                .iter()
                .map(prefix)
                .chain(DEFAULT_BOUNDARY_CONTAINING.iter().map(containing))
                .collect(),
        }
    }

    /// A filter without any rule; every frame is kept.
    pub fn empty() -> Self {
        Self { hidden: Vec::new(), boundaries: Vec::new() }
    }

    /// Hides frames whose symbol path starts with `prefix`.
    #[must_use]
    pub fn hide_prefix(mut self, prefix: impl Into<Cow<'static, str>>) -> Self {
        self.hidden.push(Matcher::Prefix(prefix.into()));
        self
    }

    /// Hides frames whose symbol contains `needle`.
    #[must_use]
    pub fn hide_containing(mut self, needle: impl Into<Cow<'static, str>>) -> Self {
        self.hidden.push(Matcher::Containing(needle.into()));
        self
    }

    #[must_use]
    pub fn hide_if<P>(mut self, predicate: P) -> Self
    where
        P: Fn(&Frame) -> bool + Send + Sync + 'static,
    {
        self.hidden.push(Matcher::Predicate(Arc::new(predicate)));
        self
    }

    /// Ends traces at frames whose symbol path starts with `prefix`.
    #[must_use]
    pub fn boundary_prefix(mut self, prefix: impl Into<Cow<'static, str>>) -> Self {
        self.boundaries.push(Matcher::Prefix(prefix.into()));
        self
    }

    #[must_use]
    pub fn boundary_if<P>(mut self, predicate: P) -> Self
    where
        P: Fn(&Frame) -> bool + Send + Sync + 'static,
    {
        self.boundaries.push(Matcher::Predicate(Arc::new(predicate)));
        self
    }

    pub fn is_hidden(&self, frame: &Frame) -> bool {
        self.hidden.iter().any(|rule| rule.matches(frame))
    }

    pub fn is_boundary(&self, frame: &Frame) -> bool {
        self.boundaries.iter().any(|rule| rule.matches(frame))
    }

    /// Keeps the visible frames in front of the first boundary.
    pub fn apply<I>(&self, frames: I) -> Vec<Frame>
    where
        I: IntoIterator<Item = Frame>,
    {
        frames
            .into_iter()
            .filter(|frame| !self.is_hidden(frame))
            .take_while(|frame| !self.is_boundary(frame))
            .collect()
    }

    /// Captures the current call stack regardless of `RUST_BACKTRACE`.
    pub fn capture(&self) -> String {
        filter_trace(self, &Backtrace::force_capture().to_string())
    }

    /// Captures the current call stack if the environment enables backtraces.
    ///
    /// Returns `None` when capture is disabled or leaves no visible frame.
    pub fn capture_if_enabled(&self) -> Option<String> {
        let backtrace = Backtrace::capture();
        if backtrace.status() != BacktraceStatus::Captured {
            return None;
        }
        let trace = filter_trace(self, &backtrace.to_string());
        (!trace.is_empty()).then_some(trace)
    }
}

/// Filters the text of a rendered backtrace, one `   at …` line per frame.
pub fn filter_trace(filter: &FrameFilter, text: &str) -> String {
    filter
        .apply(parse_frames(text))
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Captures the caller's trace with the frame rules of the global channel.
pub fn capture_call_site() -> String {
    NotificationChannel::global().with_frames(FrameFilter::capture)
}
