//! Scroll view error types

use thiserror::Error;

/// Errors surfaced by the scroll view
#[derive(Error, Debug)]
pub enum ScrollError {
    /// A second child was attached to a view that already has one
    #[error("ScrollView accepts only one child")]
    ChildAlreadyAttached,

    /// Configuration text could not be parsed
    #[error("failed to parse scroll configuration: {0}")]
    Config(#[from] toml::de::Error),

    /// Configuration parsed but holds unusable values
    #[error("invalid scroll configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for scroll view operations
pub type Result<T> = std::result::Result<T, ScrollError>;
