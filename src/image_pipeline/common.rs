//! Shared pipeline pieces
//!
//! Holds the error type every stage of the TIFF to PNG pipeline returns.

pub mod error;

pub use error::{ConversionError, Result};
