use std::path::PathBuf;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

pub struct ConfigPlugin;

impl Plugin for ConfigPlugin {
    fn build(&self, app: &mut App) {
        let config = LauncherConfig::load();
        app.insert_resource(config);
    }
}

/// Launcher preferences plus the values menus seed their parameters from.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LauncherConfig {
    pub check_for_updates: bool,
    pub load_latest_replay: bool,
    pub skip_map_update: bool,
    pub show_json_paths: bool,
    pub show_file_after: bool,
    pub preview_selected: bool,
    /// 0.0–1.0.
    pub preview_volume: f64,

    pub speed: f32,
    pub pitch: f32,
    pub approach_rate: f32,
    pub overall_difficulty: f32,
    pub circle_size: f32,
    pub hp_drain: f32,
    pub mirrors: i32,
    pub tags: i32,
}

impl Default for LauncherConfig {
    fn default() -> Self {
        Self {
            check_for_updates: true,
            load_latest_replay: false,
            skip_map_update: false,
            show_json_paths: false,
            show_file_after: true,
            preview_selected: true,
            preview_volume: 0.25,
            speed: 1.0,
            pitch: 1.0,
            approach_rate: 9.0,
            overall_difficulty: 8.0,
            circle_size: 4.0,
            hp_drain: 6.0,
            mirrors: 1,
            tags: 1,
        }
    }
}

impl LauncherConfig {
    fn config_path() -> Option<PathBuf> {
        let dirs = directories::ProjectDirs::from("", "", "Launchpad")?;
        Some(dirs.config_dir().join("launcher.json"))
    }

    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            info!("No config directory available, using defaults");
            return Self::default();
        };

        match std::fs::read_to_string(&path) {
            Ok(contents) => match Self::from_json(&contents) {
                Ok(config) => {
                    info!("Loaded launcher config from {:?}", path);
                    config
                }
                Err(e) => {
                    warn!("Failed to parse launcher config {:?}: {}, using defaults", path, e);
                    Self::default()
                }
            },
            Err(_) => {
                info!("No launcher config found, using defaults");
                Self::default()
            }
        }
    }

    pub fn save(&self) {
        let Some(path) = Self::config_path() else {
            warn!("No config directory available, cannot save launcher config");
            return;
        };

        if let Some(parent) = path.parent() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                warn!("Failed to create config directory {:?}: {}", parent, e);
                return;
            }
        }

        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(e) = std::fs::write(&path, json) {
                    warn!("Failed to write launcher config to {:?}: {}", path, e);
                } else {
                    info!("Saved launcher config to {:?}", path);
                }
            }
            Err(e) => {
                warn!("Failed to serialize launcher config: {}", e);
            }
        }
    }

    /// Parses a stored config and corrects values a hand edit may have broken.
    fn from_json(contents: &str) -> serde_json::Result<Self> {
        let mut config = serde_json::from_str::<Self>(contents)?;
        config.sanitize();
        Ok(config)
    }

    fn sanitize(&mut self) {
        self.preview_volume = self.preview_volume.clamp(0.0, 1.0);
        self.mirrors = self.mirrors.max(1);
        self.tags = self.tags.max(1);
    }

    /// Preview volume as the 0–100 percentage the settings slider edits.
    pub fn preview_percent(&self) -> i32 {
        (self.preview_volume * 100.0).round() as i32
    }

    pub fn set_preview_percent(&mut self, percent: i32) {
        self.preview_volume = f64::from(percent.clamp(0, 100)) / 100.0;
    }
}
