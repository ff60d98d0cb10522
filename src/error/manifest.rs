//! Deploy manifest encoding errors

use super::VelaError;

/// Creates a resource encode failed error
pub fn encode_failed(name: impl Into<String>, reason: impl Into<String>) -> VelaError {
    VelaError::EncodeFailed {
        name: name.into(),
        reason: reason.into(),
    }
}
