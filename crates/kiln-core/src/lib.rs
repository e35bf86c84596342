//! Core utilities shared by Kiln crates
//!
//! Holds the error type, user-facing error formatting and the platform
//! specific locations Kiln reads its configuration from.

pub mod core;

pub use crate::core::error::{KilnError, KilnResult};
pub use crate::core::error_help::{format_error_with_help, ErrorHelp};
