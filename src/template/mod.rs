//! Component templates and parameter expansion
//!
//! A template maps a service `type` to a base workload object plus the
//! parameters a service may set on it. The store holds the built-in
//! templates (`webservice`, `worker`, `task`) and any user templates found
//! under `$VELA_HOME/templates`; user templates shadow built-ins by name.

pub mod fieldpath;

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use serde_yaml::{Mapping, Value};
use walkdir::WalkDir;

use crate::env::vela_home;
use crate::error::{Result, parameter_expansion_failed, template_parse_failed};

/// Directory under `$VELA_HOME` scanned for user templates
const TEMPLATES_DIR: &str = "templates";

const WEBSERVICE: &str = r#"
name: webservice
workload:
  apiVersion: core.oam.dev/v1alpha2
  kind: ContainerizedWorkload
  spec:
    containers:
      - name: main
        image: ""
parameters:
  - name: image
    required: true
    fieldPaths:
      - spec.containers[0].image
  - name: port
    default: 80
    fieldPaths:
      - spec.containers[0].ports[0].containerPort
  - name: cmd
    fieldPaths:
      - spec.containers[0].command
"#;

const WORKER: &str = r#"
name: worker
workload:
  apiVersion: core.oam.dev/v1alpha2
  kind: ContainerizedWorkload
  spec:
    containers:
      - name: main
        image: ""
parameters:
  - name: image
    required: true
    fieldPaths:
      - spec.containers[0].image
  - name: cmd
    fieldPaths:
      - spec.containers[0].command
"#;

const TASK: &str = r#"
name: task
workload:
  apiVersion: batch/v1
  kind: Job
  spec:
    template:
      spec:
        containers:
          - name: main
            image: ""
        restartPolicy: Never
parameters:
  - name: image
    required: true
    fieldPaths:
      - spec.template.spec.containers[0].image
  - name: cmd
    fieldPaths:
      - spec.template.spec.containers[0].command
  - name: count
    fieldPaths:
      - spec.completions
"#;

/// A loaded component template
#[derive(Debug, Clone, Deserialize)]
pub struct Template {
    pub name: String,
    pub workload: Value,
    #[serde(default)]
    pub parameters: Vec<Parameter>,
}

/// One parameter a template accepts
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Parameter {
    pub name: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub field_paths: Vec<String>,
    #[serde(default)]
    pub default: Option<Value>,
}

/// All templates available to one run
#[derive(Debug, Default)]
pub struct TemplateStore {
    templates: HashMap<String, Template>,
}

impl TemplateStore {
    /// Load built-in templates plus user templates from `$VELA_HOME/templates`
    pub fn load() -> Result<Self> {
        let user_dir = vela_home()?.join(TEMPLATES_DIR);
        Self::load_from(Some(&user_dir))
    }

    /// Load built-in templates plus user templates from an explicit directory
    pub fn load_from(user_dir: Option<&Path>) -> Result<Self> {
        let mut store = Self::default();

        for raw in [WEBSERVICE, WORKER, TASK] {
            store.insert(parse_template(raw, "<builtin>")?);
        }

        if let Some(dir) = user_dir.filter(|d| d.is_dir()) {
            for entry in WalkDir::new(dir).sort_by_file_name() {
                let entry = entry.map_err(|e| {
                    template_parse_failed(dir.display().to_string(), e.to_string())
                })?;
                if !entry.file_type().is_file() {
                    continue;
                }
                let path = entry.path();
                if !matches!(
                    path.extension().and_then(|e| e.to_str()),
                    Some("yaml" | "yml")
                ) {
                    continue;
                }

                let raw = std::fs::read_to_string(path).map_err(|e| {
                    template_parse_failed(path.display().to_string(), e.to_string())
                })?;
                store.insert(parse_template(&raw, &path.display().to_string())?);
            }
        }

        Ok(store)
    }

    fn insert(&mut self, template: Template) {
        self.templates.insert(template.name.clone(), template);
    }

    /// Look up a template by workload type name
    pub fn get(&self, name: &str) -> Option<&Template> {
        self.templates.get(name)
    }

    #[allow(dead_code)]
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

fn parse_template(raw: &str, origin: &str) -> Result<Template> {
    let template: Template =
        serde_yaml::from_str(raw).map_err(|e| template_parse_failed(origin, e.to_string()))?;

    if template.name.trim().is_empty() {
        return Err(template_parse_failed(origin, "missing template 'name'"));
    }
    if !template.workload.is_mapping() {
        return Err(template_parse_failed(origin, "'workload' must be a mapping"));
    }

    Ok(template)
}

impl Template {
    /// Expand this template with a service's parameter values
    ///
    /// Starts from the base workload, sets every supplied value at its field
    /// paths, then applies defaults. Unknown parameter names, and required
    /// parameters with neither a value nor a default, fail the expansion.
    pub fn render(&self, service: &str, settings: &Mapping) -> Result<Value> {
        let mut workload = self.workload.clone();

        for (key, value) in settings {
            let name = key.as_str().ok_or_else(|| {
                parameter_expansion_failed(service, "parameter names must be strings")
            })?;
            let parameter = self.parameters.iter().find(|p| p.name == name).ok_or_else(|| {
                parameter_expansion_failed(
                    service,
                    format!("unknown parameter '{}' for type '{}'", name, self.name),
                )
            })?;
            set_at_paths(&mut workload, parameter, value, service)?;
        }

        for parameter in &self.parameters {
            let supplied = settings.contains_key(&Value::from(parameter.name.as_str()));
            if supplied {
                continue;
            }
            if let Some(default) = &parameter.default {
                set_at_paths(&mut workload, parameter, default, service)?;
            } else if parameter.required {
                return Err(parameter_expansion_failed(
                    service,
                    format!("missing required parameter '{}'", parameter.name),
                ));
            }
        }

        Ok(workload)
    }
}

fn set_at_paths(
    workload: &mut Value,
    parameter: &Parameter,
    value: &Value,
    service: &str,
) -> Result<()> {
    for path in &parameter.field_paths {
        fieldpath::set(workload, path, value.clone())
            .map_err(|e| parameter_expansion_failed(service, e))?;
    }
    Ok(())
}
