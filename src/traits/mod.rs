//! Core traits shared by the outcome kinds.
//!
//! - [`OutcomeKind`]: constructor surface common to both outcome kinds
//! - [`ResultExt`] / [`OptionExt`]: bridges from `Result` and `Option`
//!
//! # Examples
//!
//! ```
//! use outcome_rail::traits::OptionExt;
//! use outcome_rail::Outcome;
//!
//! let missing: Outcome<u32> = None.into_outcome_or("no port configured");
//! assert_eq!(missing.error().message(), "no port configured");
//! ```

pub mod outcome_kind;
pub mod result_ext;

pub use outcome_kind::OutcomeKind;
pub use result_ext::{OptionExt, ResultExt};
