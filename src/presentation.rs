//! Presentation collaborator
//!
//! Whatever draws the game (sprites, UI widgets) implements [`Presenter`].
//! The core calls it as a side effect of state changes and never waits on it.

use crate::catalog::Color;
use crate::sim::{BarSlot, InstanceId, ShapeInstance, SlotId};

/// Which top-level screen is visible
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Playing,
    Win,
    Lose,
}

/// Sprites and tint for one variant. `None` sprites are missing assets.
#[derive(Debug, Clone, PartialEq)]
pub struct VariantVisuals {
    pub shape_sprite: Option<String>,
    pub border_sprite: Option<String>,
    pub animal_sprite: Option<String>,
    pub color: Color,
}

impl VariantVisuals {
    /// Names of the sprite slots that have no asset
    pub fn missing(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.shape_sprite.is_none() {
            missing.push("shape");
        }
        if self.border_sprite.is_none() {
            missing.push("border");
        }
        if self.animal_sprite.is_none() {
            missing.push("animal");
        }
        missing
    }
}

/// Renderer / UI interface the game core drives
pub trait Presenter {
    /// A shape appeared in the field
    fn place_instance(&mut self, instance: &ShapeInstance, visuals: &VariantVisuals);
    /// A shape left the field (tapped or cleared)
    fn remove_instance(&mut self, id: InstanceId);
    /// A shape was added to the collection bar
    fn place_bar_slot(&mut self, slot: &BarSlot, visuals: &VariantVisuals);
    /// A bar slot was removed (matched or cleared)
    fn remove_bar_slot(&mut self, id: SlotId);
    fn show_screen(&mut self, screen: Screen);
    /// Reshuffle button interactable or not
    fn set_reshuffle_enabled(&mut self, enabled: bool);
}

/// Presenter that narrates to the log (headless runs)
#[derive(Debug, Default)]
pub struct LogPresenter;

impl Presenter for LogPresenter {
    fn place_instance(&mut self, instance: &ShapeInstance, _visuals: &VariantVisuals) {
        log::debug!(
            "+ field #{} {} at ({:.2}, {:.2})",
            instance.id.0,
            instance.variant,
            instance.pos.x,
            instance.pos.y
        );
    }

    fn remove_instance(&mut self, id: InstanceId) {
        log::debug!("- field #{}", id.0);
    }

    fn place_bar_slot(&mut self, slot: &BarSlot, _visuals: &VariantVisuals) {
        log::debug!("+ bar #{} {}", slot.id.0, slot.variant);
    }

    fn remove_bar_slot(&mut self, id: SlotId) {
        log::debug!("- bar #{}", id.0);
    }

    fn show_screen(&mut self, screen: Screen) {
        log::info!("Screen: {:?}", screen);
    }

    fn set_reshuffle_enabled(&mut self, enabled: bool) {
        log::debug!("Reshuffle {}", if enabled { "enabled" } else { "disabled" });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_sprites() {
        let visuals = VariantVisuals {
            shape_sprite: Some("shapes/circle.png".into()),
            border_sprite: None,
            animal_sprite: None,
            color: Color::RED,
        };
        assert_eq!(visuals.missing(), vec!["border", "animal"]);
    }
}
