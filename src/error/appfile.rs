//! Appfile-related errors

use super::VelaError;

/// Creates an appfile not found error
pub fn not_found(path: impl Into<String>) -> VelaError {
    VelaError::AppfileNotFound { path: path.into() }
}

/// Creates an appfile parse failed error
pub fn parse_failed(path: impl Into<String>, reason: impl Into<String>) -> VelaError {
    VelaError::AppfileParseFailed {
        path: path.into(),
        reason: reason.into(),
    }
}

/// Creates an invalid appfile error
pub fn invalid(message: impl Into<String>) -> VelaError {
    VelaError::AppfileInvalid {
        message: message.into(),
    }
}
