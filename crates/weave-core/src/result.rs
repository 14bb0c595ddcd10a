//! Result type alias for Weave operations

use crate::error::WeaveError;

/// Standard Result type for Weave operations
pub type Result<T> = std::result::Result<T, WeaveError>;
