//! Convenience re-exports for common usage patterns.
//!
//! Import everything with:
//!
//! ```
//! use outcome_rail::prelude::*;
//! ```
//!
//! # What's Included
//!
//! - **Macros**: [`fail!`]
//! - **Types**: [`Outcome`], [`OptionalOutcome`], [`Error`], [`CauseRole`]
//! - **Traits**: [`OutcomeKind`], [`ResultExt`], [`OptionExt`], [`OutcomeIterExt`]
//! - **Async** (feature `async`): [`FutureFaultExt`](crate::async_ext::FutureFaultExt)
//!
//! # Examples
//!
//! ```
//! use outcome_rail::prelude::*;
//!
//! fn read_config(path: &str) -> Outcome<String> {
//!     std::fs::read_to_string(path).into_outcome()
//! }
//!
//! let config = read_config("/definitely/missing.toml");
//! assert_eq!(config.error().title(), "IoError");
//! ```

// Macros
pub use crate::fail;

// Core types
pub use crate::types::{CauseRole, Error, OptionalOutcome, Outcome};

// Traits
pub use crate::convert::OutcomeIterExt;
pub use crate::traits::{OptionExt, OutcomeKind, ResultExt};

#[cfg(feature = "async")]
pub use crate::async_ext::FutureFaultExt;
