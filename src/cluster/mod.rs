//! Cluster object store
//!
//! The reconciler talks to the control plane through [`ObjectStore`]: a
//! generic object store keyed by (namespace, name, kind) supporting get and
//! an idempotent upsert. Backends only distinguish "not found" from every
//! other failure; the reconciler decides what each means.
//!
//! [`FsStore`] is the default backend, keeping the control-plane state as a
//! directory of YAML documents. Real cluster connectivity sits behind the
//! same trait and is out of scope here.

pub mod fs;
#[cfg(test)]
pub mod memory;

pub use fs::FsStore;

use thiserror::Error;

use crate::resource::Resource;

/// Errors surfaced by object store backends
#[derive(Debug, Error)]
pub enum StoreError {
    /// The object does not exist; expected during a first deploy
    #[error("not found")]
    NotFound,

    /// Any other backend failure
    #[error("{0}")]
    Backend(String),
}

/// A cluster-side object store keyed by (namespace, name, kind)
pub trait ObjectStore {
    /// Fetch the stored document for an object
    fn get(&self, namespace: &str, name: &str, kind: &str) -> Result<String, StoreError>;

    /// Create the object if absent, else replace it, preserving identity
    fn upsert(&self, resource: &Resource) -> Result<(), StoreError>;
}
