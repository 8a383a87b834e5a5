//! Result type aliases for Sunlog.

use crate::SunlogError;

/// A specialized `Result` type for Sunlog operations.
pub type SunlogResult<T> = Result<T, SunlogError>;
