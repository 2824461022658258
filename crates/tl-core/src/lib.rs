//! tl-core: stable foundation for tankloop.
//!
//! Contains:
//! - numeric (Real + tolerances + float guards)
//! - error (shared error types)

pub mod error;
pub mod numeric;

pub use error::{TlError, TlResult};
pub use numeric::*;
