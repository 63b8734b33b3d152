//! Conversion of arbitrary `std::error::Error` values into [`Error`].
//!
//! Adaptation walks the `source()` chain and produces one [`Error`] per level,
//! the `inner_error` chain mirroring the nesting. A level that already is an
//! [`Error`] is reused as is, together with everything below it.
//!
//! Per level, the first registered [`HarvestFields`] implementation whose
//! type matches supplies the title, error code and extra fields. The message
//! is the level's `Display` output.
//!
//! # Examples
//!
//! ```
//! use outcome_rail::Error;
//!
//! let parse = "12x".parse::<u8>().unwrap_err();
//! let error = Error::from_exception(&parse);
//!
//! assert_eq!(error.title(), "ParseIntError");
//! assert_eq!(error.message(), "invalid digit found in string");
//! assert_eq!(error.extension("kind").map(ToString::to_string).as_deref(), Some("InvalidDigit"));
//! ```

use std::borrow::Cow;
use std::error::Error as StdError;
use std::fmt;
use std::sync::{Arc, LazyLock, PoisonError, RwLock};

mod harvest;

pub use harvest::HarvestFields;
pub(crate) use harvest::short_type_name;

use crate::types::error::{Error, ErrorBuilder, Extensions, DEFAULT_TITLE};

/// Member names never harvested as extensions.
pub const DEFAULT_EXCLUDED: &[&str] = &[
    "source",
    "cause",
    "message",
    "description",
    "backtrace",
    "location",
    "stack_trace",
    "target_site",
    "inner",
];

static GLOBAL: LazyLock<ExceptionAdapter> = LazyLock::new(ExceptionAdapter::new);

struct Harvest {
    title: Cow<'static, str>,
    error_code: Option<i32>,
    fields: Extensions,
}

type Harvester = Arc<dyn Fn(&(dyn StdError + 'static)) -> Option<Harvest> + Send + Sync>;

/// Registry of field harvesters plus the exclude-list.
pub struct ExceptionAdapter {
    harvesters: RwLock<Vec<Harvester>>,
    excluded: RwLock<Vec<Cow<'static, str>>>,
}

impl Default for ExceptionAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ExceptionAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let harvesters = self.harvesters.read().unwrap_or_else(PoisonError::into_inner).len();
        let excluded = self.excluded.read().unwrap_or_else(PoisonError::into_inner);
        f.debug_struct("ExceptionAdapter")
            .field("harvesters", &harvesters)
            .field("excluded", &*excluded)
            .finish()
    }
}

impl ExceptionAdapter {
    /// An adapter with the built-in harvesters for common std errors.
    pub fn new() -> Self {
        let adapter = Self::empty();
        adapter.register::<std::io::Error>();
        adapter.register::<std::num::ParseIntError>();
        adapter.register::<std::num::ParseFloatError>();
        adapter.register::<std::num::TryFromIntError>();
        adapter.register::<std::char::TryFromCharError>();
        adapter.register::<std::str::Utf8Error>();
        adapter.register::<std::string::FromUtf8Error>();
        adapter.register::<std::net::AddrParseError>();
        adapter.register::<fmt::Error>();
        adapter
    }

    /// An adapter without harvesters, using the default exclude-list.
    pub fn empty() -> Self {
        Self {
            harvesters: RwLock::new(Vec::new()),
            excluded: RwLock::new(DEFAULT_EXCLUDED.iter().map(|name| Cow::Borrowed(*name)).collect()),
        }
    }

    /// The process-wide adapter used by [`Error::from_exception`].
    #[inline]
    pub fn global() -> &'static ExceptionAdapter {
        &GLOBAL
    }

    /// Registers the harvester of `E`. Later registrations take precedence.
    pub fn register<E: HarvestFields>(&self) {
        let harvester: Harvester = Arc::new(|error: &(dyn StdError + 'static)| {
            let error = error.downcast_ref::<E>()?;
            let mut fields = Extensions::new();
            error.harvest(&mut fields);
            Some(Harvest { title: error.title(), error_code: error.error_code(), fields })
        });
        self.harvesters.write().unwrap_or_else(PoisonError::into_inner).push(harvester);
    }

    /// Adds a member name to the exclude-list.
    ///
    /// Names are compared ignoring ASCII case and underscores, so `stackTrace`
    /// and `stack_trace` are the same member.
    pub fn exclude(&self, name: impl Into<Cow<'static, str>>) {
        self.excluded.write().unwrap_or_else(PoisonError::into_inner).push(name.into());
    }

    pub fn is_excluded(&self, name: &str) -> bool {
        let name = normalize(name);
        self.excluded
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .any(|excluded| normalize(excluded) == name)
    }

    /// Adapts `error` and its causes.
    pub fn adapt<E: StdError + 'static>(&self, error: &E) -> Error {
        self.adapt_level(error, Some(short_type_name::<E>()))
    }

    /// Adapts a type-erased error; unregistered levels get the default title.
    pub fn adapt_dyn(&self, error: &(dyn StdError + 'static)) -> Error {
        self.adapt_level(error, None)
    }

    fn adapt_level(&self, top: &(dyn StdError + 'static), top_title: Option<&'static str>) -> Error {
        let mut levels = Vec::new();
        let mut next = Some(top);
        while let Some(level) = next {
            levels.push(level);
            if level.is::<Error>() {
                break;
            }
            next = level.source();
        }

        let mut inner: Option<Error> = None;
        for (depth, level) in levels.into_iter().enumerate().rev() {
            if let Some(existing) = level.downcast_ref::<Error>() {
                inner = Some(existing.clone());
                continue;
            }
            let fallback = if depth == 0 { top_title } else { None };
            inner = Some(self.convert(level, fallback).set_inner(inner).build());
        }

        inner.unwrap_or_default()
    }

    fn convert(&self, level: &(dyn StdError + 'static), fallback: Option<&'static str>) -> ErrorBuilder {
        let builder = Error::builder().message(level.to_string());

        let harvest = {
            let harvesters = self.harvesters.read().unwrap_or_else(PoisonError::into_inner);
            harvesters.iter().rev().find_map(|harvester| harvester(level))
        };

        match harvest {
            Some(harvest) => {
                let mut fields = harvest.fields;
                fields.retain(|name, value| !value.is_error() && !self.is_excluded(name));
                builder
                    .title(harvest.title)
                    .maybe_code(harvest.error_code)
                    .extensions(fields.iter().map(|(name, value)| (name.to_owned(), value.clone())))
            },
            None => builder.title(fallback.unwrap_or(DEFAULT_TITLE)),
        }
    }
}

fn normalize(name: &str) -> String {
    name.chars().filter(|c| *c != '_').map(|c| c.to_ascii_lowercase()).collect()
}

impl Error {
    /// Adapts a `std::error::Error` and its `source()` chain with the global
    /// [`ExceptionAdapter`].
    ///
    /// ```
    /// use std::io;
    ///
    /// use outcome_rail::Error;
    ///
    /// let io = io::Error::new(io::ErrorKind::NotFound, "config.toml is missing");
    /// let error = Error::from_exception(&io);
    /// assert_eq!(error.title(), "IoError");
    /// assert_eq!(error.message(), "config.toml is missing");
    /// ```
    pub fn from_exception<E: StdError + 'static>(error: &E) -> Error {
        ExceptionAdapter::global().adapt(error)
    }

    pub fn from_dyn_exception(error: &(dyn StdError + 'static)) -> Error {
        ExceptionAdapter::global().adapt_dyn(error)
    }

    /// Adapts `error`, then lets `overrides` adjust the top-level error only.
    ///
    /// ```
    /// use outcome_rail::Error;
    ///
    /// let parse = "x".parse::<i32>().unwrap_err();
    /// let error = Error::from_exception_with(&parse, |b| b.message("port is not a number").code(2));
    /// assert_eq!(error.message(), "port is not a number");
    /// assert_eq!(error.error_code(), Some(2));
    /// ```
    pub fn from_exception_with<E, F>(error: &E, overrides: F) -> Error
    where
        E: StdError + 'static,
        F: FnOnce(ErrorBuilder) -> ErrorBuilder,
    {
        overrides(Error::from_exception(error).to_builder()).build()
    }
}
