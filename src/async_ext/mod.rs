//! Async extensions for outcomes.
//!
//! This module applies the callback fault rules of the synchronous
//! combinators to async code: a panic raised by the callback or while polling
//! the future it returned becomes a failing outcome.
//!
//! # Feature Flag
//!
//! Requires the `async` feature to be enabled:
//!
//! ```toml
//! [dependencies]
//! outcome-rail = { version = "0.1", features = ["async"] }
//! ```
//!
//! # Examples
//!
//! ```
//! use outcome_rail::Outcome;
//!
//! async fn load(id: u32) -> Outcome<String> {
//!     if id == 0 {
//!         return Outcome::fail("no such record");
//!     }
//!     Outcome::success(format!("record {id}"))
//! }
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let name = Outcome::success(3).flat_map_async(load).await;
//! assert_eq!(name.into_value().as_deref(), Some("record 3"));
//!
//! let missing = Outcome::success(0)
//!     .flat_map_async(load)
//!     .await
//!     .rescue_async(|_| async { Outcome::success("placeholder".to_owned()) })
//!     .await;
//! assert_eq!(missing.into_value().as_deref(), Some("placeholder"));
//! # });
//! ```

mod catch_fault;
mod combinators;
mod future_ext;

pub use catch_fault::CatchFault;
pub use future_ext::FutureFaultExt;
