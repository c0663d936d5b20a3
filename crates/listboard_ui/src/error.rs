//! Error types for section configuration.

use thiserror::Error;

/// Errors surfaced when a section is built from an incomplete or invalid configuration.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A structurally mandatory value was never provided
    #[error("Missing required field: {field}")]
    MissingField {
        /// Name of the missing field
        field: &'static str,
    },

    /// The section identity is empty
    #[error("Section id must not be empty")]
    EmptyId,

    /// An extent is negative or not finite
    #[error("Invalid {field}: {value} (must be finite and non-negative)")]
    InvalidExtent {
        /// Name of the offending field
        field: &'static str,
        /// The rejected value
        value: f32,
    },
}
