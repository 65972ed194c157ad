//! Core utilities and common types for FLARE.

pub mod error;
pub mod types;

pub use error::{Error, Result};
pub use types::*;
