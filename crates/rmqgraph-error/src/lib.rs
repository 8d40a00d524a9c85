//! # rmqgraph-error
//!
//! Unified error handling for rmqgraph.
//!
//! - **ErrorKind**: what went wrong (e.g. DeserializationFailed, Unsupported)
//! - **Operation**: where it went wrong, chained as the error travels up
//! - **Context**: key/value pairs that help locate the cause
//! - **Source**: the wrapped underlying error, if any
//!
//! ```rust
//! use rmqgraph_error::{Error, ErrorKind};
//!
//! fn example() -> Result<(), Error> {
//!     Err(Error::new(ErrorKind::DeserializationFailed, "expected `,`")
//!         .with_operation("definitions::from_path")
//!         .with_context("path", "broker.json"))
//! }
//! ```
//!
//! Only fatal conditions are errors. Bindings that fail to resolve are
//! reported as diagnostics by `rmqgraph-core` and never surface here.

mod error;
mod kind;

pub use error::Error;
pub use kind::ErrorKind;

/// Result type alias using rmqgraph Error
pub type Result<T> = std::result::Result<T, Error>;
