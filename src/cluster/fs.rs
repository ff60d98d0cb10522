//! Filesystem-backed object store
//!
//! Objects live at `<root>/<namespace>/<kind>/<name>.yaml`, whole-document
//! per file. Writes replace the document in place, which makes upsert
//! naturally idempotent.

use std::path::{Path, PathBuf};

use crate::env::vela_home;
use crate::resource::Resource;

use super::{ObjectStore, StoreError};

/// Environment variable overriding the store root
const CLUSTER_DIR_VAR: &str = "VELA_CLUSTER_DIR";

/// Default store directory under `$VELA_HOME`
const CLUSTER_DIR: &str = "cluster";

/// Object store over a local directory tree
#[derive(Debug)]
pub struct FsStore {
    root: PathBuf,
}

impl FsStore {
    /// Create a store rooted at an explicit directory
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Open the default store: `$VELA_CLUSTER_DIR` if set, else
    /// `$VELA_HOME/cluster`
    pub fn open_default() -> crate::error::Result<Self> {
        if let Ok(dir) = std::env::var(CLUSTER_DIR_VAR) {
            return Ok(Self::new(dir));
        }
        Ok(Self::new(vela_home()?.join(CLUSTER_DIR)))
    }

    #[allow(dead_code)]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn object_path(&self, namespace: &str, name: &str, kind: &str) -> PathBuf {
        self.root
            .join(namespace)
            .join(kind)
            .join(format!("{name}.yaml"))
    }
}

impl ObjectStore for FsStore {
    fn get(&self, namespace: &str, name: &str, kind: &str) -> Result<String, StoreError> {
        let path = self.object_path(namespace, name, kind);
        match std::fs::read_to_string(&path) {
            Ok(doc) => Ok(doc),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(StoreError::NotFound),
            Err(e) => Err(StoreError::Backend(format!("{}: {}", path.display(), e))),
        }
    }

    fn upsert(&self, resource: &Resource) -> Result<(), StoreError> {
        let doc = resource
            .to_yaml()
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        let path = self.object_path(resource.namespace(), resource.name(), resource.kind());
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| StoreError::Backend(format!("{}: {}", parent.display(), e)))?;
        }
        std::fs::write(&path, doc)
            .map_err(|e| StoreError::Backend(format!("{}: {}", path.display(), e)))
    }
}
