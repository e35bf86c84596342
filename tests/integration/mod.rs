//! Integration tests module
//!
//! This module contains integration tests for the Kiln CLI commands.

pub mod common;
pub mod config;
pub mod fetch;
pub mod install;
pub mod package;
