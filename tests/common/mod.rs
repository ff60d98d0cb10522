//! Common test utilities for Vela integration tests

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;

/// A test project with its own vela home, for integration tests
#[allow(dead_code)]
pub struct TestProject {
    /// Project directory the command runs in
    pub temp: TempDir,
    /// Isolated `VELA_HOME`
    pub home: TempDir,
}

#[allow(dead_code)]
impl TestProject {
    /// Create a new isolated project
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create project directory");
        let home = TempDir::new().expect("Failed to create home directory");
        Self { temp, home }
    }

    /// Project directory path
    pub fn path(&self) -> &Path {
        self.temp.path()
    }

    /// Write the default appfile
    pub fn write_appfile(&self, content: &str) {
        self.write_file("vela.yaml", content);
    }

    /// Write a file in the project directory
    pub fn write_file(&self, path: &str, content: &str) {
        let file_path = self.temp.path().join(path);
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&file_path, content).expect("Failed to write file");
    }

    /// Read a file from the project directory
    pub fn read_file(&self, path: &str) -> String {
        std::fs::read_to_string(self.temp.path().join(path)).expect("Failed to read file")
    }

    /// Check if a file exists in the project directory
    pub fn file_exists(&self, path: &str) -> bool {
        self.temp.path().join(path).exists()
    }

    /// Create an environment under the test home and mark it current
    pub fn set_env(&self, name: &str, namespace: &str, domain: &str) {
        let envs = self.home.path().join("envs");
        std::fs::create_dir_all(&envs).expect("Failed to create envs directory");
        std::fs::write(
            envs.join(format!("{name}.json")),
            format!(
                "{{\"name\":\"{name}\",\"namespace\":\"{namespace}\",\"domain\":\"{domain}\"}}"
            ),
        )
        .expect("Failed to write env file");
        std::fs::write(self.home.path().join("curenv"), name)
            .expect("Failed to write curenv file");
    }

    /// Write a user template under the test home
    pub fn write_template(&self, file: &str, content: &str) {
        let dir = self.home.path().join("templates");
        std::fs::create_dir_all(&dir).expect("Failed to create templates directory");
        std::fs::write(dir.join(file), content).expect("Failed to write template");
    }

    /// Path of a stored cluster object under the default store root
    pub fn cluster_object(&self, namespace: &str, kind: &str, name: &str) -> PathBuf {
        self.home
            .path()
            .join("cluster")
            .join(namespace)
            .join(kind)
            .join(format!("{name}.yaml"))
    }

    /// A vela command running in the project with the isolated home
    pub fn vela(&self) -> Command {
        let mut cmd = Command::cargo_bin("vela").expect("Failed to find vela binary");
        cmd.current_dir(self.temp.path())
            .env("VELA_HOME", self.home.path())
            .env_remove("VELA_CLUSTER_DIR");
        cmd
    }
}
