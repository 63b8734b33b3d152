use std::borrow::Cow;
use std::char::TryFromCharError;
use std::net::AddrParseError;
use std::num::{ParseFloatError, ParseIntError, TryFromIntError};
use std::str::Utf8Error;
use std::string::FromUtf8Error;
use std::{fmt, io};

use crate::types::error::Extensions;

/// Lists the extra fields of an error type for [`Error`](crate::Error)
/// adaptation.
///
/// Implementations are registered with
/// [`ExceptionAdapter::register`](super::ExceptionAdapter::register). Fields
/// named like well-known members (`source`, `message`, `backtrace`, ...) and
/// fields holding errors are dropped by the adapter; causes always travel
/// through `source()`.
///
/// # Examples
///
/// ```
/// use std::fmt;
///
/// use outcome_rail::adapter::{ExceptionAdapter, HarvestFields};
/// use outcome_rail::Extensions;
///
/// #[derive(Debug)]
/// struct QuotaExceeded {
///     limit: u32,
/// }
///
/// impl fmt::Display for QuotaExceeded {
///     fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
///         write!(f, "quota of {} requests exceeded", self.limit)
///     }
/// }
///
/// impl std::error::Error for QuotaExceeded {}
///
/// impl HarvestFields for QuotaExceeded {
///     fn error_code(&self) -> Option<i32> {
///         Some(429)
///     }
///
///     fn harvest(&self, fields: &mut Extensions) {
///         fields.insert("limit", self.limit);
///     }
/// }
///
/// let adapter = ExceptionAdapter::new();
/// adapter.register::<QuotaExceeded>();
///
/// let error = adapter.adapt(&QuotaExceeded { limit: 100 });
/// assert_eq!(error.title(), "QuotaExceeded");
/// assert_eq!(error.error_code(), Some(429));
/// assert_eq!(error.extension("limit").map(ToString::to_string).as_deref(), Some("100"));
/// ```
pub trait HarvestFields: std::error::Error + 'static {
    /// Category label; defaults to the short type name.
    fn title(&self) -> Cow<'static, str> {
        Cow::Borrowed(short_type_name::<Self>())
    }

    fn error_code(&self) -> Option<i32> {
        None
    }

    /// Adds the type's extra fields.
    fn harvest(&self, fields: &mut Extensions) {
        let _ = fields;
    }
}

/// `alloc::string::FromUtf8Error` → `FromUtf8Error`, generic arguments dropped.
pub(crate) fn short_type_name<T: ?Sized>() -> &'static str {
    let full = std::any::type_name::<T>();
    let path = full.split('<').next().unwrap_or(full);
    path.rsplit("::").next().unwrap_or(path)
}

impl HarvestFields for io::Error {
    fn title(&self) -> Cow<'static, str> {
        Cow::Borrowed("IoError")
    }

    fn error_code(&self) -> Option<i32> {
        self.raw_os_error()
    }

    fn harvest(&self, fields: &mut Extensions) {
        fields.insert("kind", format!("{:?}", self.kind()));
    }
}

impl HarvestFields for ParseIntError {
    fn harvest(&self, fields: &mut Extensions) {
        fields.insert("kind", format!("{:?}", self.kind()));
    }
}

impl HarvestFields for Utf8Error {
    fn harvest(&self, fields: &mut Extensions) {
        fields.insert("valid_up_to", self.valid_up_to());
        if let Some(len) = self.error_len() {
            fields.insert("error_len", len);
        }
    }
}

impl HarvestFields for FromUtf8Error {
    fn harvest(&self, fields: &mut Extensions) {
        self.utf8_error().harvest(fields);
    }
}

impl HarvestFields for ParseFloatError {}
impl HarvestFields for TryFromIntError {}
impl HarvestFields for TryFromCharError {}
impl HarvestFields for AddrParseError {}
impl HarvestFields for fmt::Error {}
