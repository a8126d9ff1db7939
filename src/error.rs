//! Error types for the cache crate
//!
//! The store itself is infallible; errors only arise at the configuration
//! boundary.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the crate.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// A configuration value could not be interpreted
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

// == Result Type Alias ==
/// Convenience Result type for the crate.
pub type Result<T> = std::result::Result<T, CacheError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CacheError::InvalidConfig("LRU_MAX_BYTES=abc".to_string());
        assert_eq!(err.to_string(), "Invalid configuration: LRU_MAX_BYTES=abc");
    }
}
