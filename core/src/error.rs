//! # Error Handling
//!
//! Provides the unified `AppError` enum used across the workspace.

use derive_more::{Display, From};

/// The Global Error Enum.
///
/// We use `derive_more` for boilerplate.
/// Note: String errors default to `General`.
#[derive(Debug, Display, From)]
pub enum AppError {
    /// Wrapper for standard IO errors.
    #[display("IO Error: {_0}")]
    Io(std::io::Error),

    /// The collection, or a body declared as JSON, is not valid JSON.
    #[display("JSON Error: {_0}")]
    Json(serde_json::Error),

    /// YAML serialization of the output document failed.
    #[display("YAML Error: {_0}")]
    Yaml(serde_yaml::Error),

    /// A raw-mode request body whose payload is not text.
    #[from(ignore)]
    #[display("Invalid body in request '{request}': {reason}")]
    InvalidBody {
        /// Name of the offending request.
        request: String,
        /// What was wrong with the payload.
        reason: String,
    },

    /// Generic errors.
    #[display("General Error: {_0}")]
    General(String),
}

/// Manual implementation of the standard Error trait.
impl std::error::Error for AppError {}

/// Helper type alias for Result using AppError.
pub type AppResult<T> = Result<T, AppError>;
