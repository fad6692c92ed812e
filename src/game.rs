//! Game root
//!
//! Owns the simulation state and its collaborators. Input is queued as
//! commands and applied on the next fixed-step tick; the events each tick
//! produces are then forwarded to the presenter, audio and listeners.

use std::collections::VecDeque;

use crate::audio::{AudioBackend, AudioCue, AudioManager};
use crate::consts::{MAX_SUBSTEPS, SIM_DT};
use crate::error::ConfigError;
use crate::presentation::{Presenter, Screen, VariantVisuals};
use crate::settings::Settings;
use crate::sim::{Command, GameEvent, GameState, InstanceId, ShapeVariant, TickInput, tick};

type TripleListener = Box<dyn FnMut(ShapeVariant)>;

/// A running game with its presentation and audio attached
pub struct Game {
    state: GameState,
    audio: AudioManager,
    presenter: Box<dyn Presenter>,
    commands: VecDeque<Command>,
    accumulator: f32,
    autoplay: bool,
    triple_listeners: Vec<TripleListener>,
}

impl Game {
    /// Build a game and queue its start. Nothing is spawned until the first
    /// `update`.
    pub fn new(
        settings: &Settings,
        seed: u64,
        presenter: Box<dyn Presenter>,
        audio_backend: Box<dyn AudioBackend>,
    ) -> Result<Self, ConfigError> {
        let state = GameState::new(settings, seed)?;
        let mut audio = AudioManager::new(&settings.audio, audio_backend);
        let mut presenter = presenter;

        if let Some(track) = &settings.audio.music_track {
            audio.play_music(track);
        }
        presenter.show_screen(Screen::Playing);
        presenter.set_reshuffle_enabled(false);

        log::info!("New game (seed {})", seed);

        Ok(Self {
            state,
            audio,
            presenter,
            commands: VecDeque::from([Command::StartGame]),
            accumulator: 0.0,
            autoplay: false,
            triple_listeners: Vec::new(),
        })
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn enqueue(&mut self, command: Command) {
        self.commands.push_back(command);
    }

    /// Player tapped a shape in the field
    pub fn click(&mut self, id: InstanceId) {
        self.enqueue(Command::ShapeClicked(id));
    }

    pub fn request_reshuffle(&mut self) {
        self.enqueue(Command::Reshuffle);
    }

    pub fn request_restart(&mut self) {
        self.enqueue(Command::Restart);
    }

    /// Let the game tap shapes by itself
    pub fn set_autoplay(&mut self, enabled: bool) {
        self.autoplay = enabled;
    }

    pub fn can_reshuffle(&self) -> bool {
        self.state.can_reshuffle()
    }

    /// Called with the matched variant every time a triple leaves the bar.
    /// Listeners are dropped on restart.
    pub fn on_triple_removed(&mut self, listener: impl FnMut(ShapeVariant) + 'static) {
        self.triple_listeners.push(Box::new(listener));
    }

    /// Run as many fixed ticks as `dt` covers. Returns the number of ticks run.
    pub fn update(&mut self, dt: f32) -> u32 {
        let dt = dt.min(0.1);
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            let input = TickInput {
                commands: self.commands.drain(..).collect(),
                autoplay: self.autoplay,
            };
            tick(&mut self.state, &input);
            self.accumulator -= SIM_DT;
            substeps += 1;

            for event in self.state.drain_events() {
                self.dispatch(event);
            }
        }

        substeps
    }

    fn visuals(&self, variant: &ShapeVariant) -> VariantVisuals {
        let visuals = self.state.catalog().visuals(variant);
        let missing = visuals.missing();
        if !missing.is_empty() {
            log::warn!("{} has no {} sprite", variant, missing.join("/"));
        }
        visuals
    }

    fn dispatch(&mut self, event: GameEvent) {
        match event {
            GameEvent::SpawnStarted { count } => {
                log::debug!("Spawn started ({} shapes)", count);
            }
            GameEvent::ShapeSpawned(instance) => {
                let visuals = self.visuals(&instance.variant);
                self.presenter.place_instance(&instance, &visuals);
                self.audio.play(AudioCue::Spawn);
            }
            GameEvent::SpawnFinished => {
                log::debug!("Spawn finished, {} shapes in play", self.state.field().len());
            }
            GameEvent::ShapeCollected { instance, slot } => {
                self.audio.play(AudioCue::Click);
                self.presenter.remove_instance(instance);
                let visuals = self.visuals(&slot.variant);
                self.presenter.place_bar_slot(&slot, &visuals);
            }
            GameEvent::TripleRemoved { slots, variant } => {
                self.audio.play(AudioCue::Collect);
                for slot in slots {
                    self.presenter.remove_bar_slot(slot);
                }
                for listener in &mut self.triple_listeners {
                    listener(variant);
                }
            }
            GameEvent::FieldCleared(ids) => {
                for id in ids {
                    self.presenter.remove_instance(id);
                }
            }
            GameEvent::BarCleared(ids) => {
                for id in ids {
                    self.presenter.remove_bar_slot(id);
                }
            }
            GameEvent::ReshuffleAvailability(enabled) => {
                self.presenter.set_reshuffle_enabled(enabled);
            }
            GameEvent::Won => {
                self.audio.play(AudioCue::Win);
                self.presenter.show_screen(Screen::Win);
            }
            GameEvent::Lost => {
                self.audio.play(AudioCue::Lose);
                self.presenter.show_screen(Screen::Lose);
            }
            GameEvent::Restarted => {
                self.triple_listeners.clear();
                self.presenter.show_screen(Screen::Playing);
            }
        }
    }
}
