//! Launcher preferences persisted between sessions.
//!
//! Unlike the settings snapshot, which belongs to the renderer, these are
//! the launcher's own conveniences (recently used scene files).

use crate::error::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// How many scene files the recent list keeps.
pub const MAX_RECENT_SCENES: usize = 8;

/// User preferences stored as JSON in the user's config directory
/// (e.g., `~/.config/render-launcher/preferences.json` on Linux).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Preferences {
    /// Scene files used for past launches, most recent first.
    #[serde(default)]
    pub recent_scenes: Vec<String>,
}

impl Preferences {
    /// Returns the path to the preferences file.
    ///
    /// Creates the config directory if it doesn't exist.
    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "render-launcher").map(|dirs| {
            let config_dir = dirs.config_dir();
            if !config_dir.exists() {
                let _ = fs::create_dir_all(config_dir);
            }
            config_dir.join("preferences.json")
        })
    }

    /// Loads preferences from disk, falling back to defaults if missing or unreadable.
    pub fn load() -> Self {
        Self::config_path()
            .and_then(|path| fs::read_to_string(&path).ok())
            .and_then(|content| serde_json::from_str(&content).ok())
            .unwrap_or_default()
    }

    /// Persists preferences to disk.
    ///
    /// # Errors
    /// Returns an error if serialization or file writing fails.
    pub fn save(&self) -> Result<()> {
        if let Some(path) = Self::config_path() {
            let json = serde_json::to_string_pretty(self)?;
            fs::write(path, json)?;
        }
        Ok(())
    }

    /// Moves `scene` to the front of the recent list.
    pub fn remember_scene(&mut self, scene: &str) {
        if scene.is_empty() {
            return;
        }
        self.recent_scenes.retain(|s| s != scene);
        self.recent_scenes.insert(0, scene.to_string());
        self.recent_scenes.truncate(MAX_RECENT_SCENES);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remember_scene_moves_to_front_without_duplicates() {
        let mut prefs = Preferences::default();
        prefs.remember_scene("a.dae");
        prefs.remember_scene("b.dae");
        prefs.remember_scene("a.dae");
        assert_eq!(prefs.recent_scenes, vec!["a.dae", "b.dae"]);
    }

    #[test]
    fn test_remember_scene_caps_list() {
        let mut prefs = Preferences::default();
        for i in 0..12 {
            prefs.remember_scene(&format!("scene{}.dae", i));
        }
        assert_eq!(prefs.recent_scenes.len(), MAX_RECENT_SCENES);
        assert_eq!(prefs.recent_scenes[0], "scene11.dae");
    }

    #[test]
    fn test_remember_scene_ignores_empty() {
        let mut prefs = Preferences::default();
        prefs.remember_scene("");
        assert!(prefs.recent_scenes.is_empty());
    }

    #[test]
    fn test_json_missing_fields_use_defaults() {
        let prefs: Preferences = serde_json::from_str("{}").unwrap();
        assert_eq!(prefs, Preferences::default());
    }
}
