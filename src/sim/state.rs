//! Game state and core simulation types
//!
//! `GameState` is the single owner of everything that changes during play:
//! the variant pool, the field, the collection bar, the in-flight spawn run
//! and the outgoing event list. Transitions live in `tick`.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::bar::{BarSlot, CollectionBar, SlotId};
use super::field::{FieldState, InstanceId, ShapeInstance};
use super::pool::VariantPool;
use super::spawn::{SpawnRun, plan_batch};
use super::variant::ShapeVariant;
use crate::catalog::Catalog;
use crate::consts::MATCH_SIZE;
use crate::error::ConfigError;
use crate::settings::Settings;

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Constructed, nothing generated yet
    Idle,
    /// A batch is being emitted (or a restart is pending)
    Spawning,
    /// Accepting taps
    Ready,
    /// Field and bar cleared - terminal until restart
    Won,
    /// Bar filled without a match - terminal until restart
    Lost,
}

/// Things that happened during a tick, for the presentation/audio layers
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    SpawnStarted {
        count: usize,
    },
    ShapeSpawned(ShapeInstance),
    SpawnFinished,
    /// Shape moved from the field into the bar
    ShapeCollected {
        instance: InstanceId,
        slot: BarSlot,
    },
    TripleRemoved {
        slots: [SlotId; MATCH_SIZE],
        variant: ShapeVariant,
    },
    FieldCleared(Vec<InstanceId>),
    BarCleared(Vec<SlotId>),
    ReshuffleAvailability(bool),
    Won,
    Lost,
    Restarted,
}

/// Gameplay numbers derived from settings
#[derive(Debug, Clone, PartialEq)]
pub struct Rules {
    pub initial_shapes_count: u32,
    pub bar_capacity: usize,
    pub spawn_cadence_ticks: u32,
    pub restart_delay_ticks: u32,
    pub spawn_origin: Vec2,
    pub spawn_jitter: f32,
}

impl Rules {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            initial_shapes_count: settings.initial_shapes_count,
            bar_capacity: settings.action_bar_capacity,
            spawn_cadence_ticks: settings.spawn_cadence_ticks(),
            restart_delay_ticks: settings.restart_delay_ticks(),
            spawn_origin: settings.spawn_origin,
            spawn_jitter: settings.spawn_jitter,
        }
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    rng: Pcg32,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub(super) phase: GamePhase,
    pub(super) game_over: bool,
    rules: Rules,
    catalog: Catalog,
    pub(super) pool: VariantPool,
    pub(super) field: FieldState,
    pub(super) bar: CollectionBar,
    pub(super) spawn_run: Option<SpawnRun>,
    /// Ticks left before a requested restart spawns the new batch
    pub(super) restart_countdown: Option<u32>,
    reshuffle_enabled: bool,
    events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// Validate settings and build an idle game
    pub fn new(settings: &Settings, seed: u64) -> Result<Self, ConfigError> {
        settings.validate()?;
        let rules = Rules::from_settings(settings);

        Ok(Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            time_ticks: 0,
            phase: GamePhase::Idle,
            game_over: false,
            bar: CollectionBar::new(rules.bar_capacity),
            rules,
            catalog: settings.catalog.clone(),
            pool: VariantPool::default(),
            field: FieldState::new(),
            spawn_run: None,
            restart_countdown: None,
            reshuffle_enabled: false,
            events: Vec::new(),
            next_id: 1,
        })
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// True while a batch is being emitted or a restart is pending.
    /// Taps and reshuffles are refused meanwhile.
    pub fn is_spawning(&self) -> bool {
        self.spawn_run.is_some() || self.restart_countdown.is_some()
    }

    pub fn can_reshuffle(&self) -> bool {
        self.phase == GamePhase::Ready && !self.is_spawning() && !self.game_over
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn pool(&self) -> &VariantPool {
        &self.pool
    }

    pub fn field(&self) -> &FieldState {
        &self.field
    }

    pub fn bar(&self) -> &CollectionBar {
        &self.bar
    }

    /// Planned shapes of the current run not yet placed
    pub fn pending_spawns(&self) -> usize {
        self.spawn_run.as_ref().map_or(0, |run| run.remaining())
    }

    /// Events produced since the last drain
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub(super) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    fn next_instance_id(&mut self) -> InstanceId {
        let id = self.next_id;
        self.next_id += 1;
        InstanceId(id)
    }

    /// Rebuild the variant pool from the catalogs
    pub(super) fn regenerate_pool(&mut self) {
        self.pool = VariantPool::generate(
            &self.catalog.shape_kinds(),
            &self.catalog.animal_kinds(),
            &self.catalog.border_colors,
        );
    }

    /// Plan a batch and start emitting it. The previous run must already be
    /// finished or aborted.
    pub(super) fn start_batch(&mut self, requested: u32) {
        debug_assert!(self.spawn_run.is_none(), "overlapping spawn runs");

        let plan = plan_batch(requested, &self.pool, &mut self.rng);
        log::info!("Spawning batch of {} shapes", plan.len());

        self.push_event(GameEvent::SpawnStarted { count: plan.len() });
        self.spawn_run = Some(SpawnRun::new(plan, self.rules.spawn_cadence_ticks));
        self.phase = GamePhase::Spawning;
    }

    /// Stop the in-flight run, discarding whatever it has not placed yet
    pub(super) fn abort_spawn(&mut self) {
        if let Some(run) = self.spawn_run.take() {
            let discarded = run.abort();
            log::debug!("Aborted spawn run ({} shapes discarded)", discarded);
        }
    }

    /// Empty the field and the bar
    pub(super) fn clear_board(&mut self) {
        debug_assert!(self.spawn_run.is_none(), "clearing during a spawn run");

        let instances = self.field.clear();
        if !instances.is_empty() {
            self.push_event(GameEvent::FieldCleared(instances));
        }
        let slots = self.bar.clear();
        if !slots.is_empty() {
            self.push_event(GameEvent::BarCleared(slots));
        }
    }

    /// Place one instance of a variant in the spawn area
    pub(super) fn spawn_instance(&mut self, variant: ShapeVariant) {
        let id = self.next_instance_id();
        let jitter = self.rules.spawn_jitter;
        let offset = if jitter > 0.0 {
            self.rng.random_range(-jitter..=jitter)
        } else {
            0.0
        };
        let pos = self.rules.spawn_origin + Vec2::new(offset, 0.0);

        let instance = ShapeInstance::new(id, variant, pos);
        log::debug!("Spawned #{} {}", id.0, variant);
        self.field.insert(instance.clone());
        self.push_event(GameEvent::ShapeSpawned(instance));
    }

    /// Emit a reshuffle availability event if it changed
    pub(super) fn sync_reshuffle(&mut self) {
        let enabled = self.can_reshuffle();
        if enabled != self.reshuffle_enabled {
            self.reshuffle_enabled = enabled;
            self.push_event(GameEvent::ReshuffleAvailability(enabled));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_idle() {
        let state = GameState::new(&Settings::default(), 1).unwrap();
        assert_eq!(state.phase(), GamePhase::Idle);
        assert!(!state.is_spawning());
        assert!(!state.is_game_over());
        assert!(state.field().is_empty());
        assert!(state.bar().is_empty());
        assert_eq!(state.bar().capacity(), 7);
    }

    #[test]
    fn test_invalid_settings_refused() {
        let mut settings = Settings::default();
        settings.catalog.shape_types.clear();
        assert!(matches!(
            GameState::new(&settings, 1),
            Err(ConfigError::EmptyShapeTypes)
        ));
    }

    #[test]
    fn test_start_batch_sets_spawning() {
        let mut state = GameState::new(&Settings::default(), 1).unwrap();
        state.regenerate_pool();
        state.start_batch(9);
        assert!(state.is_spawning());
        assert_eq!(state.phase(), GamePhase::Spawning);
        assert_eq!(state.pending_spawns(), 9);
        assert_eq!(state.drain_events(), vec![GameEvent::SpawnStarted { count: 9 }]);
        assert!(state.events().is_empty());
    }

    #[test]
    fn test_spawn_positions_within_jitter() {
        let settings = Settings::default();
        let mut state = GameState::new(&settings, 77).unwrap();
        state.regenerate_pool();
        let variant = state.pool().variants()[0];
        for _ in 0..50 {
            state.spawn_instance(variant);
        }
        for instance in state.field().iter() {
            assert!((instance.pos.x - settings.spawn_origin.x).abs() <= settings.spawn_jitter);
            assert_eq!(instance.pos.y, settings.spawn_origin.y);
        }
    }

    #[test]
    fn test_clear_board_reports_handles() {
        let mut state = GameState::new(&Settings::default(), 1).unwrap();
        state.regenerate_pool();
        let variant = state.pool().variants()[0];
        state.spawn_instance(variant);
        state.spawn_instance(variant);
        state.drain_events();

        state.clear_board();
        assert_eq!(
            state.drain_events(),
            vec![GameEvent::FieldCleared(vec![InstanceId(1), InstanceId(2)])]
        );
        assert!(state.field().is_empty());
    }
}
