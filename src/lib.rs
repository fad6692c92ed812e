//! Animal Match - a triple-matching shape puzzle
//!
//! Core modules:
//! - `sim`: Deterministic simulation (variant pool, spawning, collection bar, state machine)
//! - `catalog`: Shape/animal/color catalogs and their visual traits
//! - `settings`: Startup configuration and validation
//! - `audio`: Named audio cues routed to a pluggable backend
//! - `presentation`: Renderer/UI collaborator interface
//! - `game`: Root object wiring the simulation to its collaborators

pub mod audio;
pub mod catalog;
pub mod error;
pub mod game;
pub mod presentation;
pub mod settings;
pub mod sim;

pub use error::ConfigError;
pub use game::Game;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz is plenty for a tap puzzle)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Shapes spawned at game start and on restart
    pub const DEFAULT_SHAPES_COUNT: u32 = 39;
    /// Slots in the collection bar
    pub const DEFAULT_BAR_CAPACITY: usize = 7;
    /// Seconds between two spawned shapes
    pub const DEFAULT_SPAWN_DELAY: f32 = 0.2;
    /// Seconds between a restart request and the fresh batch
    pub const DEFAULT_RESTART_DELAY: f32 = 0.2;
    /// Horizontal spawn spread (± world units)
    pub const DEFAULT_SPAWN_JITTER: f32 = 2.0;

    /// Items in a matching group
    pub const MATCH_SIZE: usize = 3;

    /// Mass of heavy shapes (everything else is 1.0)
    pub const HEAVY_MASS: f32 = 20.0;
}

/// Convert a duration in seconds to whole simulation ticks
#[inline]
pub fn seconds_to_ticks(secs: f32) -> u32 {
    if secs <= 0.0 {
        0
    } else {
        (secs / consts::SIM_DT).round() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seconds_to_ticks() {
        assert_eq!(seconds_to_ticks(0.0), 0);
        assert_eq!(seconds_to_ticks(-1.0), 0);
        assert_eq!(seconds_to_ticks(0.2), 12);
        assert_eq!(seconds_to_ticks(1.0), 60);
    }
}
