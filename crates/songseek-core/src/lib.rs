//! # songseek-core
//!
//! Canonical catalog types, duration normalization and error handling shared
//! by every songseek backend adapter.

pub mod error;
pub mod types;

pub use error::{Error, HttpError, Result};
pub use types::*;
