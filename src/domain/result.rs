//! Result type alias for scour
//!
//! Provides a convenient Result type alias that uses ScourError as the
//! error type.

use super::errors::ScourError;

/// Result type alias for scour operations
///
/// Use this throughout the codebase for fallible operations.
///
/// # Examples
///
/// ```
/// use scour::domain::result::Result;
/// use scour::domain::errors::ScourError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(ScourError::UnsupportedMedium("dwg".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, ScourError>;
