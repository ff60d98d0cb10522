//! Cluster object store errors

use super::VelaError;

/// Creates a cluster get failed error
pub fn get_failed(
    kind: impl Into<String>,
    namespace: impl Into<String>,
    name: impl Into<String>,
    reason: impl Into<String>,
) -> VelaError {
    VelaError::ClusterGetFailed {
        kind: kind.into(),
        namespace: namespace.into(),
        name: name.into(),
        reason: reason.into(),
    }
}

/// Creates a cluster upsert failed error
pub fn upsert_failed(
    kind: impl Into<String>,
    namespace: impl Into<String>,
    name: impl Into<String>,
    reason: impl Into<String>,
) -> VelaError {
    VelaError::ClusterUpsertFailed {
        kind: kind.into(),
        namespace: namespace.into(),
        name: name.into(),
        reason: reason.into(),
    }
}
