//! CLI command implementations
//!
//! This module contains all CLI command implementations.

pub mod clean;
pub mod init;
pub mod validate;
