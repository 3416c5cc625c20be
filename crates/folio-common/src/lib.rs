//! # Folio Common
//!
//! Shared error types, logging bootstrap and test helpers for the Folio
//! workspace.
//!
//! Every other crate in the workspace depends on this one for the
//! [`FolioError`] conversions used at the binary boundary and for the
//! `tracing` subscriber setup.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod logging;

#[cfg(any(test, feature = "testing"))]
pub mod test_utils;

pub use error::{FolioError, Result};
pub use logging::{init_logging, LogFormat, LoggingConfig};
