//! Template persistence.
//!
//! `TemplateStore` is the seam to whatever backend keeps templates. A store
//! persists a document whole or not at all.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use shared::{GalleryTemplate, TemplateError};

/// Errors reported by a template store
#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("template '{0}' not found")]
    NotFound(String),
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("stored document is invalid: {0}")]
    Document(#[from] TemplateError),
    /// Backend refused the write (network down, quota, ...)
    #[error("store rejected the template: {0}")]
    Rejected(String),
}

impl PersistenceError {
    /// Transient failures worth retrying
    pub fn is_retryable(&self) -> bool {
        matches!(self, PersistenceError::Io(_) | PersistenceError::Rejected(_))
    }
}

/// Backend that keeps serialized templates
pub trait TemplateStore {
    /// Load a template by id
    fn load(&self, id: &str) -> Result<GalleryTemplate, PersistenceError>;

    /// Persist a template and return its id (assigned when the template has none)
    fn save(&mut self, template: &GalleryTemplate) -> Result<String, PersistenceError>;

    /// Ids of all stored templates
    fn list(&self) -> Result<Vec<String>, PersistenceError>;
}

fn id_for(template: &GalleryTemplate) -> String {
    template
        .id
        .clone()
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string())
}

/// Stores each template as `<id>.json` in a directory
pub struct FileTemplateStore {
    dir: PathBuf,
}

impl FileTemplateStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Store in the platform data directory
    pub fn default_location() -> Option<Self> {
        directories::ProjectDirs::from("com", "gallery", "gallery-editor")
            .map(|dirs| Self::new(dirs.data_dir().join("templates")))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, id: &str) -> PathBuf {
        self.dir.join(format!("{id}.json"))
    }
}

impl TemplateStore for FileTemplateStore {
    fn load(&self, id: &str) -> Result<GalleryTemplate, PersistenceError> {
        let path = self.path_for(id);
        let json = match std::fs::read_to_string(&path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(PersistenceError::NotFound(id.to_string()))
            }
            Err(e) => return Err(e.into()),
        };
        let mut template = GalleryTemplate::from_json(&json)?;
        template.id = Some(id.to_string());
        Ok(template)
    }

    fn save(&mut self, template: &GalleryTemplate) -> Result<String, PersistenceError> {
        let id = id_for(template);
        let mut stored = template.clone();
        stored.id = Some(id.clone());
        let json = stored.to_json()?;

        std::fs::create_dir_all(&self.dir)?;
        // Write-then-rename so a failed write never leaves half a document
        let tmp = self.dir.join(format!("{id}.json.tmp"));
        std::fs::write(&tmp, json)?;
        std::fs::rename(&tmp, self.path_for(&id))?;

        tracing::debug!("Stored template {id} in {}", self.dir.display());
        Ok(id)
    }

    fn list(&self) -> Result<Vec<String>, PersistenceError> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }
        let mut ids = Vec::new();
        for entry in std::fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) == Some("json") {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    ids.push(stem.to_string());
                }
            }
        }
        ids.sort();
        Ok(ids)
    }
}

/// In-memory store, keeps serialized documents like a real backend would
#[derive(Default)]
pub struct MemoryTemplateStore {
    documents: HashMap<String, serde_json::Value>,
}

impl MemoryTemplateStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

impl TemplateStore for MemoryTemplateStore {
    fn load(&self, id: &str) -> Result<GalleryTemplate, PersistenceError> {
        let doc = self
            .documents
            .get(id)
            .cloned()
            .ok_or_else(|| PersistenceError::NotFound(id.to_string()))?;
        Ok(GalleryTemplate::from_document(doc)?)
    }

    fn save(&mut self, template: &GalleryTemplate) -> Result<String, PersistenceError> {
        let id = id_for(template);
        let mut stored = template.clone();
        stored.id = Some(id.clone());
        self.documents.insert(id.clone(), stored.to_document()?);
        Ok(id)
    }

    fn list(&self) -> Result<Vec<String>, PersistenceError> {
        let mut ids: Vec<String> = self.documents.keys().cloned().collect();
        ids.sort();
        Ok(ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::saveable_template;

    #[test]
    fn test_file_store_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileTemplateStore::new(dir.path());
        let template = saveable_template();

        let id = store.save(&template).unwrap();
        let loaded = store.load(&id).unwrap();

        let mut expected = template;
        expected.id = Some(id.clone());
        assert_eq!(loaded, expected);
        assert_eq!(store.list().unwrap(), vec![id]);
    }

    #[test]
    fn test_file_store_keeps_existing_id() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileTemplateStore::new(dir.path().join("nested"));
        let mut template = saveable_template();
        template.id = Some("hall-a".to_string());

        assert_eq!(store.save(&template).unwrap(), "hall-a");
        assert!(dir.path().join("nested").join("hall-a.json").exists());
        assert!(!dir.path().join("nested").join("hall-a.json.tmp").exists());
    }

    #[test]
    fn test_file_store_missing_template() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileTemplateStore::new(dir.path());
        assert!(matches!(
            store.load("nope"),
            Err(PersistenceError::NotFound(id)) if id == "nope"
        ));
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn test_memory_store_roundtrip() {
        let mut store = MemoryTemplateStore::new();
        let id = store.save(&saveable_template()).unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.load(&id).unwrap().name, saveable_template().name);
    }

    #[test]
    fn test_retryable_errors() {
        assert!(PersistenceError::Rejected("offline".into()).is_retryable());
        assert!(!PersistenceError::NotFound("x".into()).is_retryable());
    }
}
