//! Audio cues
//!
//! The game core only asks for named cues. What actually makes noise is an
//! [`AudioBackend`]; a missing sound or a failing backend is logged and
//! otherwise ignored.

use serde::{Deserialize, Serialize};

use crate::error::AudioError;
use crate::settings::AudioSettings;

/// Sound effect cues requested by the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioCue {
    /// Shape dropped into the field
    Spawn,
    /// Shape tapped
    Click,
    /// Triple cleared from the bar
    Collect,
    /// Field and bar cleared
    Win,
    /// Bar filled up
    Lose,
}

impl AudioCue {
    /// Library title for this cue
    pub fn name(&self) -> &'static str {
        match self {
            AudioCue::Spawn => "Spawn",
            AudioCue::Click => "Click",
            AudioCue::Collect => "Collect",
            AudioCue::Win => "Win",
            AudioCue::Lose => "Lose",
        }
    }
}

/// A library entry: title the game asks for, clip the backend plays
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sound {
    pub title: String,
    pub clip: String,
}

impl Sound {
    pub fn new(title: impl Into<String>, clip: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            clip: clip.into(),
        }
    }
}

/// Something that can play clips
pub trait AudioBackend {
    fn play_one_shot(&mut self, clip: &str, volume: f32) -> Result<(), AudioError>;
    fn play_music(&mut self, clip: &str, volume: f32) -> Result<(), AudioError>;
}

/// Backend that only logs (headless runs)
#[derive(Debug, Default)]
pub struct LogBackend;

impl AudioBackend for LogBackend {
    fn play_one_shot(&mut self, clip: &str, volume: f32) -> Result<(), AudioError> {
        log::debug!("sfx {} @ {:.2}", clip, volume);
        Ok(())
    }

    fn play_music(&mut self, clip: &str, volume: f32) -> Result<(), AudioError> {
        log::debug!("music {} @ {:.2}", clip, volume);
        Ok(())
    }
}

/// Audio manager for the game
pub struct AudioManager {
    backend: Box<dyn AudioBackend>,
    sfx_sounds: Vec<Sound>,
    music_sounds: Vec<Sound>,
    master_volume: f32,
    sfx_volume: f32,
    music_volume: f32,
    muted: bool,
}

impl AudioManager {
    pub fn new(settings: &AudioSettings, backend: Box<dyn AudioBackend>) -> Self {
        Self {
            backend,
            sfx_sounds: settings.sfx_sounds.clone(),
            music_sounds: settings.music_sounds.clone(),
            master_volume: settings.master_volume.clamp(0.0, 1.0),
            sfx_volume: settings.sfx_volume.clamp(0.0, 1.0),
            music_volume: settings.music_volume.clamp(0.0, 1.0),
            muted: settings.muted,
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Set music volume (0.0 - 1.0)
    pub fn set_music_volume(&mut self, vol: f32) {
        self.music_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn effective_volume(&self, channel: f32) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * channel
        }
    }

    /// Play a sound effect cue
    pub fn play(&mut self, cue: AudioCue) {
        let vol = self.effective_volume(self.sfx_volume);
        if vol <= 0.0 {
            return;
        }

        let Some(sound) = self.sfx_sounds.iter().find(|s| s.title == cue.name()) else {
            log::warn!("Sound not found: {}", cue.name());
            return;
        };

        if let Err(e) = self.backend.play_one_shot(&sound.clip, vol) {
            log::warn!("Failed to play {}: {}", cue.name(), e);
        }
    }

    /// Start a music track by title
    pub fn play_music(&mut self, title: &str) {
        let vol = self.effective_volume(self.music_volume);
        if vol <= 0.0 {
            return;
        }

        let Some(sound) = self.music_sounds.iter().find(|s| s.title == title) else {
            log::warn!("Music not found: {}", title);
            return;
        };

        if let Err(e) = self.backend.play_music(&sound.clip, vol) {
            log::warn!("Failed to play music {}: {}", title, e);
        }
    }
}
