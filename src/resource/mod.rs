//! Canonical deployment resources
//!
//! The cluster-facing objects are a closed set of two tagged variants:
//! the application configuration (one per application, referencing its
//! components) and the component (one per service, carrying the rendered
//! workload). Kind and version tags are fixed at construction and never
//! inferred from data.

use serde::{Deserialize, Serialize};
use serde_yaml::Value;

use crate::error::{Result, appfile_invalid, encode_failed};

/// API version shared by both resource kinds
pub const API_VERSION: &str = "core.oam.dev/v1alpha2";

/// Kind tag of the application configuration resource
pub const APP_CONFIG_KIND: &str = "ApplicationConfiguration";

/// Kind tag of the component resource
pub const COMPONENT_KIND: &str = "Component";

/// Fixed kind/version tags carried by every encoded resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeMeta {
    #[serde(rename = "apiVersion")]
    pub api_version: String,
    pub kind: String,
}

/// Resource identity within the cluster
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    pub name: String,
    pub namespace: String,
}

/// Declares how a named set of components compose into one application
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationConfiguration {
    #[serde(flatten)]
    pub type_meta: TypeMeta,
    pub metadata: Metadata,
    pub spec: AppConfigSpec,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfigSpec {
    pub components: Vec<ComponentRef>,
}

/// Reference from the application configuration to one component
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentRef {
    #[serde(rename = "componentName")]
    pub component_name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub traits: Vec<ComponentTrait>,
}

/// Trait configuration attached to a component reference
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentTrait {
    #[serde(rename = "trait")]
    pub spec: Value,
}

/// Describes one deployable unit's workload specification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Component {
    #[serde(flatten)]
    pub type_meta: TypeMeta,
    pub metadata: Metadata,
    pub spec: ComponentSpec,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentSpec {
    pub workload: Value,
}

impl ApplicationConfiguration {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>, components: Vec<ComponentRef>) -> Self {
        Self {
            type_meta: TypeMeta {
                api_version: API_VERSION.to_string(),
                kind: APP_CONFIG_KIND.to_string(),
            },
            metadata: Metadata {
                name: name.into(),
                namespace: namespace.into(),
            },
            spec: AppConfigSpec { components },
        }
    }
}

impl Component {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>, workload: Value) -> Self {
        Self {
            type_meta: TypeMeta {
                api_version: API_VERSION.to_string(),
                kind: COMPONENT_KIND.to_string(),
            },
            metadata: Metadata {
                name: name.into(),
                namespace: namespace.into(),
            },
            spec: ComponentSpec { workload },
        }
    }
}

/// Either cluster-facing resource, for store operations keyed by kind
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Resource {
    Configuration(ApplicationConfiguration),
    Component(Component),
}

impl Resource {
    pub fn kind(&self) -> &str {
        match self {
            Resource::Configuration(r) => &r.type_meta.kind,
            Resource::Component(r) => &r.type_meta.kind,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Resource::Configuration(r) => &r.metadata.name,
            Resource::Component(r) => &r.metadata.name,
        }
    }

    pub fn namespace(&self) -> &str {
        match self {
            Resource::Configuration(r) => &r.metadata.namespace,
            Resource::Component(r) => &r.metadata.namespace,
        }
    }

    /// Encode this resource as one YAML document
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| encode_failed(self.name(), e.to_string()))
    }
}

/// The canonical pair produced by one build: the application configuration
/// plus its components in declaration order
#[derive(Debug, Clone, PartialEq)]
pub struct Bundle {
    pub configuration: ApplicationConfiguration,
    pub components: Vec<Component>,
}

impl Bundle {
    /// Check the bundle invariants: unique component names, component
    /// references matching the component list exactly and in order, and a
    /// single namespace across every resource.
    pub fn validate(&self) -> Result<()> {
        let namespace = &self.configuration.metadata.namespace;

        let mut seen = std::collections::HashSet::new();
        for component in &self.components {
            if !seen.insert(component.metadata.name.as_str()) {
                return Err(appfile_invalid(format!(
                    "duplicate component name '{}'",
                    component.metadata.name
                )));
            }
            if component.metadata.namespace != *namespace {
                return Err(appfile_invalid(format!(
                    "component '{}' is in namespace '{}', expected '{}'",
                    component.metadata.name, component.metadata.namespace, namespace
                )));
            }
        }

        let referenced: Vec<_> = self
            .configuration
            .spec
            .components
            .iter()
            .map(|r| r.component_name.as_str())
            .collect();
        let present: Vec<_> = self
            .components
            .iter()
            .map(|c| c.metadata.name.as_str())
            .collect();
        if referenced != present {
            return Err(appfile_invalid(format!(
                "component references {referenced:?} do not match components {present:?}"
            )));
        }

        Ok(())
    }
}
