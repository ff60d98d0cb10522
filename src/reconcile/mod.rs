//! Reconciler
//!
//! Applies a bundle so that repeated runs converge on the same cluster
//! state: look up the application configuration (the branch is
//! informational only), upsert every component in bundle order, then upsert
//! the configuration last. The configuration declares references to its
//! components, so applying it first could transiently reference components
//! that do not exist yet; the ordering is a correctness guarantee, not a
//! convenience.
//!
//! One invocation progresses from the existence check, through the
//! components in order, to the configuration, and any step can fail
//! terminally with the originating error. There is no retry loop and no
//! rollback: a failed
//! component upsert leaves earlier upserts in place, and re-running the
//! whole command is the recovery path (upserts are idempotent).
//!
//! When the configuration already exists, the update is applied in place.
//! That branch is the seam for a future staged canary update gated on user
//! approval; it is intentionally not implemented.

use std::time::{Duration, Instant};

use indicatif::{ProgressBar, ProgressStyle};

use crate::cluster::{ObjectStore, StoreError};
use crate::error::{Result, VelaError, cluster_get_failed, cluster_upsert_failed};
use crate::resource::{APP_CONFIG_KIND, Bundle, Resource};
use crate::ui::Reporter;

/// Time budget for one apply
///
/// Checked before every cluster call. The `up` command passes an unbounded
/// deadline; embedders can bound the total apply time instead.
#[derive(Debug, Clone, Copy, Default)]
pub struct Deadline(Option<Instant>);

impl Deadline {
    /// No time budget
    pub fn none() -> Self {
        Self(None)
    }

    /// Expire after the given budget from now
    pub fn within(budget: Duration) -> Self {
        Self(Instant::now().checked_add(budget))
    }

    fn check(&self, operation: &str) -> Result<()> {
        match self.0 {
            Some(at) if Instant::now() >= at => Err(VelaError::DeadlineExceeded {
                operation: operation.to_string(),
            }),
            _ => Ok(()),
        }
    }
}

/// Outcome of a successful apply
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Applied {
    /// Whether the application configuration already existed beforehand
    #[allow(dead_code)]
    pub existed: bool,
}

/// Applies bundles against an object store
pub struct Reconciler<'a, S: ObjectStore> {
    store: &'a S,
    deadline: Deadline,
}

impl<'a, S: ObjectStore> Reconciler<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self {
            store,
            deadline: Deadline::none(),
        }
    }

    pub fn with_deadline(mut self, deadline: Deadline) -> Self {
        self.deadline = deadline;
        self
    }

    /// Apply a bundle: components in order, configuration last
    pub fn apply(&self, bundle: &Bundle, reporter: &mut Reporter) -> Result<Applied> {
        let namespace = &bundle.configuration.metadata.namespace;
        let name = &bundle.configuration.metadata.name;

        reporter.blank();
        reporter.info("Checking if app has been deployed...");
        self.deadline.check("checking existing deployment")?;
        let existed = match self.store.get(namespace, name, APP_CONFIG_KIND) {
            Ok(_) => {
                reporter.info("app existed, updating existing deployment...");
                true
            }
            Err(StoreError::NotFound) => {
                reporter.info("app has not been deployed, creating a new deployment...");
                false
            }
            Err(StoreError::Backend(reason)) => {
                return Err(cluster_get_failed(APP_CONFIG_KIND, namespace, name, reason));
            }
        };

        self.apply_components(bundle)?;

        self.deadline.check("applying application configuration")?;
        self.upsert(&Resource::Configuration(bundle.configuration.clone()))?;

        Ok(Applied { existed })
    }

    fn apply_components(&self, bundle: &Bundle) -> Result<()> {
        let progress = component_progress(bundle.components.len() as u64);

        for component in &bundle.components {
            let name = &component.metadata.name;
            progress.set_message(format!("Applying component ({name}) ..."));

            self.deadline
                .check(&format!("applying component '{name}'"))?;
            self.upsert(&Resource::Component(component.clone()))?;
            progress.inc(1);
        }

        progress.finish_and_clear();
        Ok(())
    }

    fn upsert(&self, resource: &Resource) -> Result<()> {
        self.store.upsert(resource).map_err(|e| {
            cluster_upsert_failed(
                resource.kind(),
                resource.namespace(),
                resource.name(),
                e.to_string(),
            )
        })
    }
}

fn component_progress(total: u64) -> ProgressBar {
    let progress = ProgressBar::new(total);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("[{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );
    progress
}
