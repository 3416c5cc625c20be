//! # Folio Config
//!
//! Configuration for the Folio site: schema, defaults, YAML loading with
//! environment variable overrides, and validation.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod defaults;
pub mod loader;
pub mod schema;
pub mod validator;

pub use loader::{ConfigError, ConfigLoader};
pub use schema::*;
pub use validator::ConfigValidator;
