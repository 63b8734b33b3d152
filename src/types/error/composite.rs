//! Aggregation of several causes into a single [`Error`].
//!
//! A composite error is an ordinary `Error` titled [`Error::COMPOSITE_TITLE`]
//! whose inner chain holds one link per cause, in order. Each link compares
//! equal to the cause it stands for and carries a `causeRole` annotation. A
//! cause's own previous inner chain is kept under the `causeInner` extension
//! of its link.

use std::fmt;

use super::{Error, Extension};

pub(crate) const CAUSE_ROLE_KEY: &str = "causeRole";
pub(crate) const CAUSE_INNER_KEY: &str = "causeInner";

/// Role a cause plays inside a composite error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CauseRole {
    /// The failure that was being handled.
    Original,
    /// A failure raised while handling an earlier one, e.g. a faulting callback.
    Incidental,
}

impl CauseRole {
    #[inline]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Original => "original",
            Self::Incidental => "incidental",
        }
    }

    fn parse(value: &str) -> Option<Self> {
        match value {
            "original" => Some(Self::Original),
            "incidental" => Some(Self::Incidental),
            _ => None,
        }
    }
}

impl fmt::Display for CauseRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Error {
    pub const COMPOSITE_TITLE: &'static str = "CompositeError";

    /// Aggregates `causes` into one error whose inner chain lists them in order.
    ///
    /// The composite takes its error code and identifier from the first cause
    /// and is sensitive if any cause is.
    ///
    /// # Examples
    ///
    /// ```
    /// use outcome_rail::{CauseRole, Error};
    ///
    /// let first = Error::new("write failed");
    /// let second = Error::new("rollback failed");
    /// let composite = Error::composite([
    ///     (CauseRole::Original, first.clone()),
    ///     (CauseRole::Incidental, second.clone()),
    /// ]);
    ///
    /// let chain: Vec<_> = composite.inner_errors().collect();
    /// assert_eq!(chain, [&first, &second]);
    /// ```
    pub fn composite<I>(causes: I) -> Error
    where
        I: IntoIterator<Item = (CauseRole, Error)>,
    {
        let causes: Vec<(CauseRole, Error)> = causes.into_iter().collect();

        let mut builder = Error::builder()
            .title(Self::COMPOSITE_TITLE)
            .message(match causes.len() {
                1 => "1 error occurred.".to_owned(),
                n => format!("{n} errors occurred."),
            })
            .sensitive(causes.iter().any(|(_, cause)| cause.is_sensitive()));

        if let Some((_, first)) = causes.first() {
            builder = builder
                .maybe_code(first.error_code())
                .maybe_identifier(first.identifier().map(str::to_owned));
        }

        let chain = causes
            .into_iter()
            .rev()
            .fold(None, |next, (role, cause)| Some(link(role, &cause, next)));

        builder.set_inner(chain).build()
    }

    /// Returns `true` if this error was produced by [`Error::composite`].
    pub fn is_composite(&self) -> bool {
        self.title() == Self::COMPOSITE_TITLE
            && self.inner_error().is_some_and(|inner| inner.cause_role().is_some())
    }

    /// The role annotation of a composite link, if this error is one.
    pub fn cause_role(&self) -> Option<CauseRole> {
        self.extension(CAUSE_ROLE_KEY)?.as_text().and_then(CauseRole::parse)
    }

    /// Recovers the causes of a composite error in order.
    ///
    /// A non-composite error reports itself as its single original cause.
    pub fn causes(&self) -> Vec<(CauseRole, Error)> {
        if !self.is_composite() {
            return vec![(CauseRole::Original, self.clone())];
        }
        self.inner_errors().map_while(unlink).collect()
    }

    /// Combines this error with a fault raised while it was being handled.
    ///
    /// An existing composite is extended rather than nested.
    pub fn with_incidental(&self, fault: Error) -> Error {
        let mut causes = self.causes();
        causes.push((CauseRole::Incidental, fault));
        Error::composite(causes)
    }
}

fn link(role: CauseRole, cause: &Error, next: Option<Error>) -> Error {
    let mut builder = cause.to_builder();
    if let Some(prior) = cause.inner_error() {
        builder = builder.extension(CAUSE_INNER_KEY, prior.clone());
    }
    builder
        .extension(CAUSE_ROLE_KEY, role.as_str())
        .set_inner(next)
        .build()
}

fn unlink(link: &Error) -> Option<(CauseRole, Error)> {
    let role = link.cause_role()?;
    let mut builder = link.to_builder();
    builder.take_extension(CAUSE_ROLE_KEY);
    let prior = match builder.take_extension(CAUSE_INNER_KEY) {
        Some(Extension::Error(prior)) => Some(prior),
        _ => None,
    };
    Some((role, builder.set_inner(prior).build()))
}
