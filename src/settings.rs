//! Game settings
//!
//! Supplied once at startup (defaults or a JSON file) and validated before
//! the game is allowed to start.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::audio::Sound;
use crate::catalog::Catalog;
use crate::consts::*;
use crate::error::ConfigError;

/// Audio preferences and sound library
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    /// Mute everything
    pub muted: bool,
    /// Background track started with the game
    pub music_track: Option<String>,
    /// One-shot effects, looked up by cue name
    pub sfx_sounds: Vec<Sound>,
    /// Music tracks, looked up by title
    pub music_sounds: Vec<Sound>,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            master_volume: 1.0,
            sfx_volume: 1.0,
            music_volume: 1.0,
            muted: false,
            music_track: Some("Theme".to_string()),
            sfx_sounds: ["Spawn", "Click", "Collect", "Win", "Lose"]
                .iter()
                .map(|title| Sound::new(*title, format!("sfx/{}.ogg", title.to_lowercase())))
                .collect(),
            music_sounds: vec![Sound::new("Theme", "music/theme.ogg")],
        }
    }
}

/// Game settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Gameplay ===
    /// Shapes in the first batch (and after a restart)
    pub initial_shapes_count: u32,
    /// Collection bar slots
    pub action_bar_capacity: usize,
    /// Seconds between spawned shapes
    pub spawn_delay: f32,
    /// Seconds between a restart request and the new batch
    pub restart_delay: f32,

    // === Spawn area ===
    /// Where new shapes appear
    pub spawn_origin: Vec2,
    /// Horizontal random offset (±)
    pub spawn_jitter: f32,

    // === Catalogs ===
    pub catalog: Catalog,

    // === Audio ===
    pub audio: AudioSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            initial_shapes_count: DEFAULT_SHAPES_COUNT,
            action_bar_capacity: DEFAULT_BAR_CAPACITY,
            spawn_delay: DEFAULT_SPAWN_DELAY,
            restart_delay: DEFAULT_RESTART_DELAY,

            spawn_origin: Vec2::new(0.0, 4.0),
            spawn_jitter: DEFAULT_SPAWN_JITTER,

            catalog: Catalog::default(),

            audio: AudioSettings::default(),
        }
    }
}

impl Settings {
    /// Parse settings from JSON (missing fields fall back to defaults)
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load and validate settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json_str(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Check everything the game needs before it may start
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.catalog.validate()?;

        if self.action_bar_capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        if self.initial_shapes_count == 0 {
            return Err(ConfigError::ZeroShapesCount);
        }

        for (name, value) in [
            ("spawn_delay", self.spawn_delay),
            ("restart_delay", self.restart_delay),
            ("spawn_jitter", self.spawn_jitter),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidDuration { name, value });
            }
        }

        Ok(())
    }

    /// Ticks between two spawned shapes
    pub fn spawn_cadence_ticks(&self) -> u32 {
        crate::seconds_to_ticks(self.spawn_delay)
    }

    /// Ticks between a restart request and the fresh batch
    pub fn restart_delay_ticks(&self) -> u32 {
        crate::seconds_to_ticks(self.restart_delay)
    }
}
