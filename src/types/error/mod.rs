//! Structured error record carried by failing outcomes.
//!
//! [`Error`] is an immutable, cheaply clonable handle. Cloning shares the same
//! instance, so clones keep the same identity (see [`Error::ptr_eq`]); every
//! `with_*` method and [`ErrorBuilder::build`] produce a new instance.
//!
//! Equality and hashing are structural over the title, message, error code and
//! identifier only. Stack traces and extensions are diagnostic payload and do
//! not take part, so two captures of "the same" failure compare equal.
//!
//! # Examples
//!
//! ```
//! use outcome_rail::Error;
//!
//! let err = Error::builder()
//!     .title("Validation")
//!     .message("email is malformed")
//!     .code(422)
//!     .identifier("req-17")
//!     .extension("field", "email")
//!     .build();
//!
//! assert_eq!(err.title(), "Validation");
//! assert_eq!(err.error_code(), Some(422));
//! assert!(err.to_string().starts_with("Validation: email is malformed"));
//! ```

use std::borrow::Cow;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::iter::FusedIterator;
use std::sync::{Arc, LazyLock};

use crate::types::report::ErrorReport;

mod composite;
mod extensions;
mod fingerprint;
#[cfg(feature = "serde")]
mod serde_impl;

pub use composite::CauseRole;
pub use extensions::{Extension, Extensions};
pub use fingerprint::FingerprintConfig;

pub(crate) const DEFAULT_TITLE: &str = "Error";
pub(crate) const DEFAULT_MESSAGE: &str = "An unexpected error has occurred.";

static DEFAULT_ERROR: LazyLock<Error> = LazyLock::new(|| ErrorBuilder::new().build());

/// Immutable diagnostic record describing a failure.
#[must_use]
#[derive(Clone)]
pub struct Error {
    pub(crate) repr: Arc<ErrorRepr>,
}

#[derive(Debug, Clone)]
pub(crate) struct ErrorRepr {
    pub(crate) title: Cow<'static, str>,
    pub(crate) message: Cow<'static, str>,
    pub(crate) error_code: Option<i32>,
    pub(crate) identifier: Option<String>,
    pub(crate) is_sensitive: bool,
    pub(crate) stack_trace: Option<String>,
    pub(crate) extensions: Extensions,
    pub(crate) inner: Option<Error>,
}

impl Error {
    /// Title of the error exposed by an optional outcome in the `None` state.
    pub const NO_VALUE_TITLE: &'static str = "NoValue";
    /// Title given to callback faults classified as cancellation.
    pub const CANCELLED_TITLE: &'static str = "OperationCancelled";
    /// Title given to callback faults raised as plain panics.
    pub const PANIC_TITLE: &'static str = "Panic";

    /// Creates an error with the default title and the given message.
    #[inline]
    pub fn new(message: impl Into<Cow<'static, str>>) -> Self {
        Self::builder().message(message).build()
    }

    /// Returns a builder starting from the default title and message.
    #[inline]
    pub fn builder() -> ErrorBuilder {
        ErrorBuilder::new()
    }

    /// Returns a builder pre-filled with every field of this error.
    ///
    /// The built error is a new instance, never the receiver.
    #[inline]
    pub fn to_builder(&self) -> ErrorBuilder {
        ErrorBuilder { repr: (*self.repr).clone() }
    }

    /// The "no value" error reported for absent optional values.
    ///
    /// Each call returns a fresh instance so that separate absences are
    /// routed through the notification channel independently.
    pub fn no_value() -> Self {
        Self::builder()
            .title(Self::NO_VALUE_TITLE)
            .message("No value is available.")
            .build()
    }

    /// The error recorded when a callback signals cancellation.
    pub fn cancelled(reason: Option<&str>) -> Self {
        let message = match reason {
            Some(reason) if !reason.trim().is_empty() => {
                Cow::Owned(format!("The operation was cancelled: {reason}"))
            },
            _ => Cow::Borrowed("The operation was cancelled."),
        };
        Self::builder().title(Self::CANCELLED_TITLE).message(message).build()
    }

    #[inline]
    pub fn title(&self) -> &str {
        &self.repr.title
    }

    #[inline]
    pub fn message(&self) -> &str {
        &self.repr.message
    }

    #[inline]
    pub fn error_code(&self) -> Option<i32> {
        self.repr.error_code
    }

    /// Correlation identifier, if one was attached.
    #[inline]
    pub fn identifier(&self) -> Option<&str> {
        self.repr.identifier.as_deref()
    }

    /// Whether rendering must redact everything but title, code and identifier.
    #[inline]
    pub fn is_sensitive(&self) -> bool {
        self.repr.is_sensitive
    }

    #[inline]
    pub fn stack_trace(&self) -> Option<&str> {
        self.repr.stack_trace.as_deref()
    }

    #[inline]
    pub fn extensions(&self) -> &Extensions {
        &self.repr.extensions
    }

    /// Looks up a single extension by name.
    #[inline]
    pub fn extension(&self, key: &str) -> Option<&Extension> {
        self.repr.extensions.get(key)
    }

    /// The direct cause of this error.
    #[inline]
    pub fn inner_error(&self) -> Option<&Error> {
        self.repr.inner.as_ref()
    }

    /// Iterates over this error followed by every inner error, outermost first.
    #[inline]
    pub fn chain(&self) -> Chain<'_> {
        Chain { next: Some(self) }
    }

    /// Iterates over the inner errors only, outermost first.
    #[inline]
    pub fn inner_errors(&self) -> Chain<'_> {
        Chain { next: self.inner_error() }
    }

    /// The innermost error of the causal chain (the receiver if it has no cause).
    pub fn root_cause(&self) -> &Error {
        let mut current = self;
        while let Some(inner) = current.inner_error() {
            current = inner;
        }
        current
    }

    /// Returns `true` if both handles point at the same instance.
    #[inline]
    pub fn ptr_eq(&self, other: &Error) -> bool {
        Arc::ptr_eq(&self.repr, &other.repr)
    }

    /// Returns `true` for errors produced from a cancellation signal.
    #[inline]
    pub fn is_cancellation(&self) -> bool {
        self.title() == Self::CANCELLED_TITLE
    }

    /// Returns `true` for the "no value" error of an absent optional value.
    #[inline]
    pub fn is_no_value(&self) -> bool {
        self.title() == Self::NO_VALUE_TITLE
    }

    /// Returns a report builder for customizing how the error is rendered.
    #[inline]
    pub fn report(&self) -> ErrorReport<'_> {
        ErrorReport::new(self)
    }

    pub fn with_title(&self, title: impl Into<Cow<'static, str>>) -> Self {
        self.to_builder().title(title).build()
    }

    pub fn with_message(&self, message: impl Into<Cow<'static, str>>) -> Self {
        self.to_builder().message(message).build()
    }

    pub fn with_code(&self, code: i32) -> Self {
        self.to_builder().code(code).build()
    }

    pub fn with_identifier(&self, identifier: impl Into<String>) -> Self {
        self.to_builder().identifier(identifier).build()
    }

    pub fn with_sensitive(&self, sensitive: bool) -> Self {
        self.to_builder().sensitive(sensitive).build()
    }

    pub fn with_stack_trace(&self, trace: impl Into<String>) -> Self {
        self.to_builder().stack_trace(trace).build()
    }

    pub fn with_extension(
        &self,
        key: impl Into<Cow<'static, str>>,
        value: impl Into<Extension>,
    ) -> Self {
        self.to_builder().extension(key, value).build()
    }

    /// Returns a copy of this error caused by `inner`, replacing any previous cause.
    pub fn with_inner(&self, inner: Error) -> Self {
        self.to_builder().inner(inner).build()
    }

    #[inline]
    pub(crate) fn addr(&self) -> usize {
        Arc::as_ptr(&self.repr) as usize
    }
}

impl Default for Error {
    /// Returns the process-wide default error.
    ///
    /// Every call yields a handle to the same instance.
    fn default() -> Self {
        DEFAULT_ERROR.clone()
    }
}

impl PartialEq for Error {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
            || (self.repr.title == other.repr.title
                && self.repr.message == other.repr.message
                && self.repr.error_code == other.repr.error_code
                && self.repr.identifier == other.repr.identifier)
    }
}

impl Eq for Error {}

impl Hash for Error {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.repr.title.hash(state);
        self.repr.message.hash(state);
        self.repr.error_code.hash(state);
        self.repr.identifier.hash(state);
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("Error");
        s.field("title", &self.title()).field("message", &self.message());
        if let Some(code) = self.error_code() {
            s.field("error_code", &code);
        }
        if let Some(identifier) = self.identifier() {
            s.field("identifier", &identifier);
        }
        if self.is_sensitive() {
            s.field("is_sensitive", &true);
        }
        if !self.extensions().is_empty() {
            s.field("extensions", self.extensions());
        }
        if let Some(inner) = self.inner_error() {
            s.field("inner_error", inner);
        }
        s.finish_non_exhaustive()
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.report(), f)
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.inner_error().map(|inner| inner as &(dyn std::error::Error + 'static))
    }
}

impl From<&'static str> for Error {
    #[inline]
    fn from(message: &'static str) -> Self {
        Self::new(message)
    }
}

impl From<String> for Error {
    #[inline]
    fn from(message: String) -> Self {
        Self::new(message)
    }
}

impl From<Cow<'static, str>> for Error {
    #[inline]
    fn from(message: Cow<'static, str>) -> Self {
        Self::new(message)
    }
}

impl From<ErrorBuilder> for Error {
    #[inline]
    fn from(builder: ErrorBuilder) -> Self {
        builder.build()
    }
}

/// Iterator over an error and its causes, produced by [`Error::chain`].
#[derive(Debug, Clone)]
pub struct Chain<'a> {
    next: Option<&'a Error>,
}

impl<'a> Iterator for Chain<'a> {
    type Item = &'a Error;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.inner_error();
        Some(current)
    }
}

impl FusedIterator for Chain<'_> {}

/// Builder for [`Error`].
///
/// Empty or whitespace-only titles and messages fall back to the defaults
/// instead of being rejected.
#[must_use]
#[derive(Debug, Clone)]
pub struct ErrorBuilder {
    repr: ErrorRepr,
}

impl Default for ErrorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ErrorBuilder {
    pub fn new() -> Self {
        Self {
            repr: ErrorRepr {
                title: Cow::Borrowed(DEFAULT_TITLE),
                message: Cow::Borrowed(DEFAULT_MESSAGE),
                error_code: None,
                identifier: None,
                is_sensitive: false,
                stack_trace: None,
                extensions: Extensions::new(),
                inner: None,
            },
        }
    }

    pub fn title(mut self, title: impl Into<Cow<'static, str>>) -> Self {
        self.repr.title = non_empty(title.into(), DEFAULT_TITLE);
        self
    }

    pub fn message(mut self, message: impl Into<Cow<'static, str>>) -> Self {
        self.repr.message = non_empty(message.into(), DEFAULT_MESSAGE);
        self
    }

    pub fn code(mut self, code: i32) -> Self {
        self.repr.error_code = Some(code);
        self
    }

    pub fn maybe_code(mut self, code: Option<i32>) -> Self {
        self.repr.error_code = code;
        self
    }

    pub fn identifier(mut self, identifier: impl Into<String>) -> Self {
        self.repr.identifier = Some(identifier.into());
        self
    }

    pub fn maybe_identifier(mut self, identifier: Option<String>) -> Self {
        self.repr.identifier = identifier;
        self
    }

    pub fn sensitive(mut self, sensitive: bool) -> Self {
        self.repr.is_sensitive = sensitive;
        self
    }

    pub fn stack_trace(mut self, trace: impl Into<String>) -> Self {
        let trace = trace.into();
        self.repr.stack_trace = (!trace.trim().is_empty()).then_some(trace);
        self
    }

    /// Adds an extension, replacing the value of an existing key in place.
    pub fn extension(
        mut self,
        key: impl Into<Cow<'static, str>>,
        value: impl Into<Extension>,
    ) -> Self {
        self.repr.extensions.insert(key, value);
        self
    }

    pub fn extensions<I, K, V>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<Cow<'static, str>>,
        V: Into<Extension>,
    {
        self.repr.extensions.extend(entries);
        self
    }

    pub fn inner(mut self, inner: Error) -> Self {
        self.repr.inner = Some(inner);
        self
    }

    pub(crate) fn set_inner(mut self, inner: Option<Error>) -> Self {
        self.repr.inner = inner;
        self
    }

    pub(crate) fn take_extension(&mut self, key: &str) -> Option<Extension> {
        self.repr.extensions.remove(key)
    }

    pub(crate) fn has_stack_trace(&self) -> bool {
        self.repr.stack_trace.is_some()
    }

    pub fn build(self) -> Error {
        Error { repr: Arc::new(self.repr) }
    }
}

fn non_empty(value: Cow<'static, str>, fallback: &'static str) -> Cow<'static, str> {
    if value.trim().is_empty() {
        Cow::Borrowed(fallback)
    } else {
        value
    }
}
