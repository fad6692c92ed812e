//! Error types
//!
//! Only configuration problems are fatal. Gameplay rejections (click while
//! spawning, reshuffle after game over, ...) are outcome values, not errors.

use thiserror::Error;

/// Invalid startup configuration - the game refuses to start
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("shape type catalog is empty")]
    EmptyShapeTypes,

    #[error("animal type catalog is empty")]
    EmptyAnimalTypes,

    #[error("border color catalog is empty")]
    EmptyBorderColors,

    #[error("action bar capacity must be at least 1")]
    ZeroCapacity,

    #[error("initial shapes count must be at least 1")]
    ZeroShapesCount,

    #[error("{name} must be a finite, non-negative number (got {value})")]
    InvalidDuration { name: &'static str, value: f32 },

    #[error("failed to read settings file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Collection bar refused an insert
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InsertError {
    #[error("collection bar is full ({capacity} slots)")]
    Full { capacity: usize },
}

/// Audio backend failure (never fatal)
#[derive(Debug, Error)]
pub enum AudioError {
    #[error("audio backend unavailable")]
    Unavailable,

    #[error("failed to play clip '{clip}': {reason}")]
    Playback { clip: String, reason: String },
}
