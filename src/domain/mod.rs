//! Domain types for scour.
//!
//! The domain layer provides the error taxonomy ([`ScourError`]) and the
//! crate-wide [`Result`] alias. Fatal conditions (load/save failures,
//! unsupported media) are distinguished from recoverable ones, which the
//! detection and adapter layers log and absorb locally.

pub mod errors;
pub mod result;

// Re-export commonly used types for convenience
pub use errors::ScourError;
pub use result::Result;
