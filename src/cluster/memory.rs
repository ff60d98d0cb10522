//! In-memory object store with an operation trace, for tests
//!
//! Records every get and upsert in call order so ordering guarantees can be
//! asserted, and can be armed to fail the Nth upsert for partial-failure
//! tests.

use std::cell::RefCell;
use std::collections::HashMap;

use crate::resource::Resource;

use super::{ObjectStore, StoreError};

/// One recorded store operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Op {
    Get { kind: String, name: String },
    Upsert { kind: String, name: String },
}

#[derive(Default)]
pub struct MemoryStore {
    objects: RefCell<HashMap<(String, String, String), String>>,
    ops: RefCell<Vec<Op>>,
    upserts_seen: RefCell<usize>,
    fail_upsert_at: Option<usize>,
    fail_gets: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose `n`th upsert (1-based) fails with a backend error
    pub fn failing_at(n: usize) -> Self {
        Self {
            fail_upsert_at: Some(n),
            ..Self::default()
        }
    }

    /// A store whose every get fails with a backend error
    pub fn failing_gets() -> Self {
        Self {
            fail_gets: true,
            ..Self::default()
        }
    }

    pub fn ops(&self) -> Vec<Op> {
        self.ops.borrow().clone()
    }

    pub fn contains(&self, namespace: &str, name: &str, kind: &str) -> bool {
        self.objects
            .borrow()
            .contains_key(&key(namespace, name, kind))
    }

    pub fn document(&self, namespace: &str, name: &str, kind: &str) -> Option<String> {
        self.objects.borrow().get(&key(namespace, name, kind)).cloned()
    }

    pub fn len(&self) -> usize {
        self.objects.borrow().len()
    }

    /// Snapshot of all stored documents, for state comparisons
    pub fn snapshot(&self) -> HashMap<(String, String, String), String> {
        self.objects.borrow().clone()
    }
}

fn key(namespace: &str, name: &str, kind: &str) -> (String, String, String) {
    (namespace.to_string(), name.to_string(), kind.to_string())
}

impl ObjectStore for MemoryStore {
    fn get(&self, namespace: &str, name: &str, kind: &str) -> Result<String, StoreError> {
        if self.fail_gets {
            return Err(StoreError::Backend("injected lookup failure".to_string()));
        }
        self.ops.borrow_mut().push(Op::Get {
            kind: kind.to_string(),
            name: name.to_string(),
        });
        self.objects
            .borrow()
            .get(&key(namespace, name, kind))
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    fn upsert(&self, resource: &Resource) -> Result<(), StoreError> {
        let seen = {
            let mut upserts = self.upserts_seen.borrow_mut();
            *upserts += 1;
            *upserts
        };
        if self.fail_upsert_at == Some(seen) {
            return Err(StoreError::Backend("injected backend failure".to_string()));
        }

        self.ops.borrow_mut().push(Op::Upsert {
            kind: resource.kind().to_string(),
            name: resource.name().to_string(),
        });

        let doc = resource
            .to_yaml()
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        self.objects.borrow_mut().insert(
            key(resource.namespace(), resource.name(), resource.kind()),
            doc,
        );
        Ok(())
    }
}
