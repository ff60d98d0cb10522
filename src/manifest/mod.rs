//! Bundle Serializer
//!
//! Renders a bundle as one multi-document YAML manifest (configuration
//! first, then the components in builder order, documents separated by a
//! literal `---` line) and persists it to `.vela/deploy.yaml` for
//! inspection. The file is an audit artifact: overwritten on every run,
//! never read back by the pipeline.

use std::path::{Path, PathBuf};

use crate::error::{Result, file_write_failed};
use crate::resource::{Bundle, Resource};

/// Fixed relative path of the deploy manifest
pub const DEPLOY_FILE: &str = ".vela/deploy.yaml";

/// Hash prefix for BLAKE3 digests
const HASH_PREFIX: &str = "blake3:";

/// Result of persisting a manifest
#[derive(Debug)]
pub struct WrittenManifest {
    /// Where the manifest was written
    #[allow(dead_code)]
    pub path: PathBuf,
    /// Content digest of the written bytes
    pub digest: String,
}

/// Render a bundle as a multi-document manifest
pub fn render(bundle: &Bundle) -> Result<String> {
    let mut out = String::new();

    push_document(
        &mut out,
        &Resource::Configuration(bundle.configuration.clone()),
        false,
    )?;
    for component in &bundle.components {
        push_document(&mut out, &Resource::Component(component.clone()), true)?;
    }

    Ok(out)
}

fn push_document(out: &mut String, resource: &Resource, separator: bool) -> Result<()> {
    if separator {
        out.push_str("---\n");
    }
    let doc = resource.to_yaml()?;
    out.push_str(&doc);
    if !doc.ends_with('\n') {
        out.push('\n');
    }
    Ok(())
}

/// BLAKE3 digest of manifest content
pub fn digest(content: &str) -> String {
    format!("{}{}", HASH_PREFIX, blake3::hash(content.as_bytes()).to_hex())
}

/// Render and persist a bundle under `root` (owner-only permissions)
pub fn write(bundle: &Bundle, root: &Path) -> Result<WrittenManifest> {
    let content = render(bundle)?;
    let path = root.join(DEPLOY_FILE);

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| file_write_failed(parent.display().to_string(), e.to_string()))?;
        restrict_permissions(parent, 0o700)?;
    }

    std::fs::write(&path, &content)
        .map_err(|e| file_write_failed(path.display().to_string(), e.to_string()))?;
    restrict_permissions(&path, 0o600)?;

    Ok(WrittenManifest {
        path,
        digest: digest(&content),
    })
}

#[cfg(unix)]
fn restrict_permissions(path: &Path, mode: u32) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    std::fs::set_permissions(path, std::fs::Permissions::from_mode(mode))
        .map_err(|e| file_write_failed(path.display().to_string(), e.to_string()))
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path, _mode: u32) -> Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::{ApplicationConfiguration, Component, ComponentRef};
    use tempfile::TempDir;

    fn workload(image: &str) -> serde_yaml::Value {
        serde_yaml::from_str(&format!(
            "apiVersion: core.oam.dev/v1alpha2\nkind: ContainerizedWorkload\nspec:\n  containers:\n    - image: {image}\n"
        ))
        .unwrap()
    }

    fn bundle() -> Bundle {
        let components = vec![
            Component::new("demo", "web", workload("nginx:1.21")),
            Component::new("demo", "cache", workload("redis:6")),
        ];
        let references = components
            .iter()
            .map(|c| ComponentRef {
                component_name: c.metadata.name.clone(),
                traits: vec![],
            })
            .collect();
        Bundle {
            configuration: ApplicationConfiguration::new("demo", "app", references),
            components,
        }
    }

    #[test]
    fn test_three_documents_in_order() {
        let manifest = render(&bundle()).unwrap();

        let docs: Vec<&str> = manifest.split("---\n").collect();
        assert_eq!(docs.len(), 3);
        assert!(docs[0].contains("kind: ApplicationConfiguration"));
        assert!(docs[0].contains("name: app"));
        assert!(docs[1].contains("kind: Component"));
        assert!(docs[1].contains("name: web"));
        assert!(docs[2].contains("name: cache"));
        for doc in docs {
            assert!(doc.contains("namespace: demo"));
            assert!(doc.ends_with('\n'));
        }
    }

    #[test]
    fn test_configuration_references_survive_encoding() {
        let manifest = render(&bundle()).unwrap();
        assert!(manifest.contains("componentName: web"));
        assert!(manifest.contains("componentName: cache"));
    }

    #[test]
    fn test_write_creates_deploy_file() {
        let temp = TempDir::new().unwrap();
        let written = write(&bundle(), temp.path()).unwrap();

        assert_eq!(written.path, temp.path().join(DEPLOY_FILE));
        let on_disk = std::fs::read_to_string(&written.path).unwrap();
        assert_eq!(on_disk, render(&bundle()).unwrap());
        assert!(written.digest.starts_with("blake3:"));
    }

    #[test]
    fn test_write_overwrites_previous_artifact() {
        let temp = TempDir::new().unwrap();
        write(&bundle(), temp.path()).unwrap();

        let mut second = bundle();
        second.components.truncate(1);
        second.configuration.spec.components.truncate(1);
        let written = write(&second, temp.path()).unwrap();

        let on_disk = std::fs::read_to_string(&written.path).unwrap();
        assert!(!on_disk.contains("cache"));
    }

    #[test]
    fn test_digest_tracks_content() {
        let first = render(&bundle()).unwrap();
        assert_eq!(digest(&first), digest(&first));

        let mut changed = bundle();
        changed.components[0].metadata.name = "api".to_string();
        changed.configuration.spec.components[0].component_name = "api".to_string();
        let second = render(&changed).unwrap();
        assert_ne!(digest(&first), digest(&second));
    }

    #[cfg(unix)]
    #[test]
    fn test_owner_only_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        let written = write(&bundle(), temp.path()).unwrap();

        let file_mode = std::fs::metadata(&written.path).unwrap().permissions().mode();
        assert_eq!(file_mode & 0o777, 0o600);

        let dir_mode = std::fs::metadata(temp.path().join(".vela"))
            .unwrap()
            .permissions()
            .mode();
        assert_eq!(dir_mode & 0o777, 0o700);
    }
}
