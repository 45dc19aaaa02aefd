//! # Form Error Types
//!
//! Errors raised while editing forms, loading config or reading CLI input.
//!
//! Pricing never fails; everything here is about the surroundings: an item
//! index that no longer exists, a form that would lose its last row, or a
//! config file that cannot be read.

use erp_core::FieldErrors;
use thiserror::Error;

/// Result type alias for form operations.
pub type FormResult<T> = Result<T, FormError>;

#[derive(Debug, Error)]
pub enum FormError {
    // =========================================================================
    // Editing Errors
    // =========================================================================
    /// Item index does not exist (row removed by a previous edit).
    #[error("Item {index} does not exist (document has {len} items)")]
    ItemOutOfRange { index: usize, len: usize },

    /// A document must keep at least one line item.
    #[error("A document must have at least one item")]
    LastItem,

    /// Submit-time validation failed.
    #[error("Form is invalid: {0}")]
    Invalid(#[from] FieldErrors),

    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Config values are inconsistent.
    #[error("Invalid forms configuration: {0}")]
    InvalidConfig(String),

    /// Failed to save config file.
    #[error("Failed to save config: {0}")]
    ConfigSaveFailed(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Config write error: {0}")]
    TomlWrite(#[from] toml::ser::Error),

    // =========================================================================
    // Input Errors
    // =========================================================================
    #[error("Invalid document JSON: {0}")]
    Json(#[from] serde_json::Error),
}
