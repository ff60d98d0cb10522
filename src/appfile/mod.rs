//! Appfile model and loader
//!
//! The appfile (`vela.yaml` by default) declares one application: a name and
//! an ordered set of services. Service order in the YAML mapping is the
//! declaration order and is preserved all the way into the applied bundle.
//!
//! Each service entry is a mapping: an optional `type` selecting the
//! component template (default `webservice`), an optional `traits` section,
//! and workload parameter values for everything else.

use std::path::{Path, PathBuf};

use normpath::PathExt;
use serde::Deserialize;
use serde_yaml::{Mapping, Value};

use crate::error::{Result, appfile_invalid, appfile_not_found, appfile_parse_failed, file_read_failed};

/// Default appfile name looked up in the current directory
pub const DEFAULT_APPFILE: &str = "vela.yaml";

/// Workload type used when a service declares none
pub const DEFAULT_WORKLOAD_TYPE: &str = "webservice";

/// Service keys that are not workload parameters
const TYPE_KEY: &str = "type";
const TRAITS_KEY: &str = "traits";

/// Parsed application model, immutable after load
#[derive(Debug, Clone)]
pub struct AppFile {
    /// Application name
    pub name: String,
    /// Services in declaration order
    pub services: Vec<Service>,
}

/// One deployable unit declared in the appfile
#[derive(Debug, Clone)]
pub struct Service {
    /// Service name (unique within the appfile)
    pub name: String,
    /// Component template reference
    pub workload_type: String,
    /// Workload parameter values, in declaration order
    pub settings: Mapping,
    /// Trait attachments for this service
    pub traits: Vec<TraitSpec>,
}

/// A trait attached to a service
#[derive(Debug, Clone)]
pub struct TraitSpec {
    pub name: String,
    pub properties: Value,
}

#[derive(Debug, Deserialize)]
struct RawAppFile {
    #[serde(default)]
    name: String,
    #[serde(default)]
    services: Mapping,
}

impl AppFile {
    /// Load an appfile from the given path, or from `vela.yaml` when absent
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::from_file(&display_path(p)),
            None => Self::from_file(Path::new(DEFAULT_APPFILE)),
        }
    }

    /// Load an appfile from an explicit path
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(appfile_not_found(path.display().to_string()));
            }
            Err(e) => {
                return Err(file_read_failed(
                    path.display().to_string(),
                    e.to_string(),
                ));
            }
        };

        Self::from_yaml(&raw, &path.display().to_string())
    }

    /// Parse and validate appfile contents
    pub fn from_yaml(raw: &str, origin: &str) -> Result<Self> {
        let parsed: RawAppFile =
            serde_yaml::from_str(raw).map_err(|e| appfile_parse_failed(origin, e.to_string()))?;

        if parsed.name.trim().is_empty() {
            return Err(appfile_invalid("missing application 'name'"));
        }
        if parsed.services.is_empty() {
            return Err(appfile_invalid("no services declared"));
        }

        let mut services = Vec::with_capacity(parsed.services.len());
        for (key, value) in parsed.services {
            services.push(parse_service(&key, value)?);
        }

        Ok(Self {
            name: parsed.name,
            services,
        })
    }
}

fn parse_service(key: &Value, value: Value) -> Result<Service> {
    let name = match key {
        Value::String(s) if !s.trim().is_empty() => s.clone(),
        _ => return Err(appfile_invalid("service names must be non-empty strings")),
    };

    let Value::Mapping(entries) = value else {
        return Err(appfile_invalid(format!("service '{name}' must be a mapping")));
    };

    let mut workload_type = DEFAULT_WORKLOAD_TYPE.to_string();
    let mut traits = Vec::new();
    let mut settings = Mapping::new();

    for (entry_key, entry_value) in entries {
        let key_name = entry_key.as_str().map(str::to_string);
        match key_name.as_deref() {
            Some(TYPE_KEY) => {
                workload_type = entry_value
                    .as_str()
                    .map(str::to_string)
                    .ok_or_else(|| {
                        appfile_invalid(format!("service '{name}': 'type' must be a string"))
                    })?;
            }
            Some(TRAITS_KEY) => {
                traits = parse_traits(&name, entry_value)?;
            }
            Some(_) => {
                settings.insert(entry_key, entry_value);
            }
            None => {
                return Err(appfile_invalid(format!(
                    "service '{name}': parameter names must be strings"
                )));
            }
        }
    }

    Ok(Service {
        name,
        workload_type,
        settings,
        traits,
    })
}

fn parse_traits(service: &str, value: Value) -> Result<Vec<TraitSpec>> {
    let Value::Mapping(entries) = value else {
        return Err(appfile_invalid(format!(
            "service '{service}': 'traits' must be a mapping"
        )));
    };

    let mut traits = Vec::with_capacity(entries.len());
    for (key, properties) in entries {
        let name = key.as_str().map(str::to_string).ok_or_else(|| {
            appfile_invalid(format!("service '{service}': trait names must be strings"))
        })?;
        traits.push(TraitSpec { name, properties });
    }
    Ok(traits)
}

/// Normalize an explicit path for readable error messages; the path as given
/// is kept when normalization fails (e.g. the file does not exist yet).
fn display_path(path: &Path) -> PathBuf {
    path.normalize()
        .map(|np| np.into_path_buf())
        .unwrap_or_else(|_| path.to_path_buf())
}
