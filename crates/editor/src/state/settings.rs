//! Editor settings

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use shared::{ColliderShape, DEFAULT_WALL_CLEARANCE, MAX_ARTWORKS_PER_WALL};

fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("com", "gallery", "gallery-editor")
}

/// Wall layout settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutSettings {
    /// Gap between the artwork plane and the wall surface
    pub wall_clearance: f64,
    /// Upper bound for artworks per wall
    pub max_artworks_per_wall: u32,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            wall_clearance: DEFAULT_WALL_CLEARANCE,
            max_artworks_per_wall: MAX_ARTWORKS_PER_WALL,
        }
    }
}

/// Where templates are kept
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StorageSettings {
    /// Overrides the platform data directory
    #[serde(default)]
    pub templates_dir: Option<PathBuf>,
}

/// All editor settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EditorSettings {
    #[serde(default)]
    pub layout: LayoutSettings,
    /// Shape picked for new colliders
    #[serde(default)]
    pub default_collider_shape: ColliderShape,
    #[serde(default)]
    pub storage: StorageSettings,
}

impl EditorSettings {
    /// Load settings from the config directory, or defaults if not found
    pub fn load() -> Self {
        project_dirs()
            .map(|dirs| Self::load_from(&dirs.config_dir().join("settings.json")))
            .unwrap_or_default()
    }

    /// Load settings from a file, or defaults if it is missing or unreadable
    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(settings) => settings,
                Err(e) => {
                    tracing::warn!("Ignoring invalid settings file {}: {e}", path.display());
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }

    /// Save settings to the config directory
    pub fn save(&self) {
        if let Some(dirs) = project_dirs() {
            let config_dir = dirs.config_dir();
            if std::fs::create_dir_all(config_dir).is_ok() {
                if let Err(e) = self.save_to(&config_dir.join("settings.json")) {
                    tracing::warn!("Failed to save settings: {e}");
                }
            }
        }
    }

    pub fn save_to(&self, path: &Path) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
    }

    /// Resolved templates directory
    pub fn templates_dir(&self) -> Option<PathBuf> {
        self.storage
            .templates_dir
            .clone()
            .or_else(|| project_dirs().map(|d| d.data_dir().join("templates")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let s = EditorSettings::default();
        assert_eq!(s.layout.wall_clearance, 0.15);
        assert_eq!(s.layout.max_artworks_per_wall, 8);
        assert_eq!(s.default_collider_shape, ColliderShape::Box);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let mut s = EditorSettings::default();
        s.layout.wall_clearance = 0.3;
        s.default_collider_shape = ColliderShape::Curved;
        s.storage.templates_dir = Some(dir.path().join("templates"));

        s.save_to(&path).unwrap();
        assert_eq!(EditorSettings::load_from(&path), s);
        assert_eq!(s.templates_dir(), Some(dir.path().join("templates")));
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{"default_collider_shape": "curved"}"#).unwrap();

        let s = EditorSettings::load_from(&path);
        assert_eq!(s.default_collider_shape, ColliderShape::Curved);
        assert_eq!(s.layout, LayoutSettings::default());
    }

    #[test]
    fn test_invalid_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{ nope").unwrap();
        assert_eq!(EditorSettings::load_from(&path), EditorSettings::default());
    }
}
