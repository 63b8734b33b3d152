use std::fmt;

/// Discriminant of an outcome, independent of its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutcomeState {
    Success,
    None,
    Fail,
}

impl fmt::Display for OutcomeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Success => "Success",
            Self::None => "None",
            Self::Fail => "Fail",
        })
    }
}

/// Returned (or panicked with) when a payload is read from the wrong state.
///
/// This signals a programming error, never a domain failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidState {
    requested: &'static str,
    actual: OutcomeState,
}

impl InvalidState {
    #[inline]
    pub(crate) const fn value(actual: OutcomeState) -> Self {
        Self { requested: "value", actual }
    }

    #[inline]
    pub(crate) const fn error(actual: OutcomeState) -> Self {
        Self { requested: "error", actual }
    }

    /// The state the outcome was actually in.
    #[inline]
    pub const fn actual(&self) -> OutcomeState {
        self.actual
    }
}

impl fmt::Display for InvalidState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cannot access the {} of an outcome in the {} state", self.requested, self.actual)
    }
}

impl std::error::Error for InvalidState {}
