use std::path::PathBuf;

use tempfile::TempDir;

use crate::core::Document;
use crate::settings::parse_documents;

/// The five built-in default documents (`doc-A` .. `doc-E`).
#[must_use]
pub fn default_documents() -> Vec<Document> {
    parse_documents(&[]).expect("default documents are valid")
}

/// Build documents from `(id, attraction)` pairs.
#[must_use]
pub fn documents(pairs: &[(&str, f64)]) -> Vec<Document> {
    pairs
        .iter()
        .map(|(doc_id, attraction)| {
            Document::new(*doc_id, *attraction).expect("fixture document is valid")
        })
        .collect()
}

/// Test fixture providing an isolated working directory.
pub struct LabFixture {
    pub temp_dir: TempDir,
    pub data_path: PathBuf,
}

impl Default for LabFixture {
    fn default() -> Self {
        Self::new()
    }
}

impl LabFixture {
    #[must_use]
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let data_path = temp_dir.path().to_path_buf();

        println!("[FIXTURE] Created temp directory: {data_path:?}");

        Self {
            temp_dir,
            data_path,
        }
    }

    /// Create a file with content, making parent directories as needed.
    #[must_use]
    pub fn create_file(&self, relative_path: &str, content: &str) -> PathBuf {
        let full_path = self.data_path.join(relative_path);
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        std::fs::write(&full_path, content).expect("Failed to write file");
        println!(
            "[FIXTURE] Created file: {:?} ({} bytes)",
            full_path,
            content.len()
        );
        full_path
    }

    #[must_use]
    pub fn create_config(&self, toml: &str) -> PathBuf {
        self.create_file("rank-bandit-lab.toml", toml)
    }

    #[must_use]
    pub fn create_scenario(&self, name: &str, json: &str) -> PathBuf {
        self.create_file(&format!("scenarios/{name}.json"), json)
    }

    /// Path under the fixture for a log that does not exist yet.
    #[must_use]
    pub fn log_path(&self, label: &str) -> PathBuf {
        self.data_path.join("logs").join(format!("{label}.json"))
    }
}

impl Drop for LabFixture {
    fn drop(&mut self) {
        println!("[FIXTURE] Cleaning up temp directory: {:?}", self.data_path);
    }
}
