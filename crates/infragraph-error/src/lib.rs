//! # infragraph-error
//!
//! Unified error handling for infragraph - following OpenDAL's error handling practices.
//!
//! ## Design Philosophy
//!
//! - **ErrorKind**: Know what error occurred (e.g., RenderFailed, SpecInvalid)
//! - **ErrorStatus**: Decide how to handle it (Permanent, Temporary, Persistent)
//! - **Error Context**: Assist in locating the cause with rich context
//! - **Error Source**: Wrap underlying errors without leaking raw types
//!
//! ## Usage
//!
//! ```rust
//! use infragraph_error::{Error, ErrorKind};
//!
//! fn example() -> Result<(), Error> {
//!     Err(Error::new(ErrorKind::RenderFailed, "edge references unknown node")
//!         .with_operation("dot::render")
//!         .with_context("edge_from", "api-stack/handler")
//!         .with_context("edge_to", "orders-table"))
//! }
//! ```
//!
//! ## Principles
//!
//! - All functions return `Result<T, infragraph_error::Error>`
//! - External errors are wrapped with `set_source(err)`
//! - Same error handled once, subsequent ops only append context
//! - Don't abuse `From<OtherError>` to prevent raw error leakage

mod error;
mod kind;
mod status;

pub use error::Error;
pub use kind::ErrorKind;
pub use status::ErrorStatus;

/// Result type alias using infragraph Error
pub type Result<T> = std::result::Result<T, Error>;
