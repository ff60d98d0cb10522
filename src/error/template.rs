//! Template resolution and expansion errors

use super::VelaError;

/// Creates a template not found error
pub fn not_found(service: impl Into<String>, workload_type: impl Into<String>) -> VelaError {
    VelaError::TemplateNotFound {
        service: service.into(),
        workload_type: workload_type.into(),
    }
}

/// Creates a template parse failed error
pub fn parse_failed(path: impl Into<String>, reason: impl Into<String>) -> VelaError {
    VelaError::TemplateParseFailed {
        path: path.into(),
        reason: reason.into(),
    }
}

/// Creates a parameter expansion failed error
pub fn expansion_failed(service: impl Into<String>, reason: impl Into<String>) -> VelaError {
    VelaError::ParameterExpansionFailed {
        service: service.into(),
        reason: reason.into(),
    }
}
