//! Fixed timestep simulation tick
//!
//! Drains the commands queued for this tick, then advances the restart
//! timer and the spawn run. Each command is fully resolved (including any
//! triple removal) before the next one is looked at.

use super::bar::MatchOutcome;
use super::field::InstanceId;
use super::spawn::SpawnStep;
use super::state::{GameEvent, GamePhase, GameState};

/// Requests from the input/UI layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Generate the pool and the first batch
    StartGame,
    /// Player tapped a shape
    ShapeClicked(InstanceId),
    /// Re-spawn everything still in play
    Reshuffle,
    /// Throw everything away and start over
    Restart,
}

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Processed in order
    pub commands: Vec<Command>,
    /// Idle/demo mode - the game taps shapes by itself
    pub autoplay: bool,
}

/// Why a tap was ignored
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    Spawning,
    BarFull,
    GameOver,
    /// Already collected, cleared, or never existed
    NotInField,
}

/// Result of a tap
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    Rejected(RejectReason),
    Collected(MatchOutcome),
}

/// Result of a reshuffle request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReshuffleOutcome {
    /// A batch of this many shapes was started
    Started { count: usize },
    Rejected(RejectReason),
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput) {
    state.time_ticks += 1;

    for command in &input.commands {
        apply_command(state, *command);
    }

    advance_restart(state);
    advance_spawn(state);

    if input.autoplay {
        if let Some(id) = pick_autoplay_target(state) {
            click_shape(state, id);
        }
    }

    state.sync_reshuffle();
}

/// Dispatch a single command
pub fn apply_command(state: &mut GameState, command: Command) {
    match command {
        Command::StartGame => start_game(state),
        Command::ShapeClicked(id) => {
            click_shape(state, id);
        }
        Command::Reshuffle => {
            reshuffle(state);
        }
        Command::Restart => restart(state),
    }
}

/// Idle -> Spawning: build the pool and the first batch
pub fn start_game(state: &mut GameState) {
    if state.phase != GamePhase::Idle {
        log::debug!("Start ignored: game already running");
        return;
    }

    state.regenerate_pool();
    state.start_batch(state.rules().initial_shapes_count);
}

/// Move a tapped shape from the field into the bar and resolve matches
pub fn click_shape(state: &mut GameState, id: InstanceId) -> ClickOutcome {
    let reject = |reason: RejectReason| {
        log::debug!("Click on #{} ignored: {:?}", id.0, reason);
        ClickOutcome::Rejected(reason)
    };

    if state.game_over {
        return reject(RejectReason::GameOver);
    }
    if state.is_spawning() {
        return reject(RejectReason::Spawning);
    }
    if state.bar.is_full() {
        return reject(RejectReason::BarFull);
    }
    let Some(variant) = state.field.get(id).map(|i| i.variant) else {
        return reject(RejectReason::NotInField);
    };

    // Insert first so a refused insert leaves the shape in the field
    let slot = match state.bar.insert(variant) {
        Ok(slot) => slot,
        Err(_) => return reject(RejectReason::BarFull),
    };
    state.field.remove(id);
    state.push_event(GameEvent::ShapeCollected { instance: id, slot });

    let outcome = state.bar.check_and_resolve_match();
    match outcome {
        MatchOutcome::TripleRemoved { slots, variant } => {
            state.push_event(GameEvent::TripleRemoved { slots, variant });
            if state.field.is_empty() && state.bar.is_empty() {
                finish(state, GamePhase::Won);
            }
        }
        MatchOutcome::BarFull => finish(state, GamePhase::Lost),
        MatchOutcome::None => {}
    }

    ClickOutcome::Collected(outcome)
}

/// Clear the field and bar and spawn the same number of shapes again
pub fn reshuffle(state: &mut GameState) -> ReshuffleOutcome {
    let reject = |reason: RejectReason| {
        log::debug!("Reshuffle ignored: {:?}", reason);
        ReshuffleOutcome::Rejected(reason)
    };

    if state.game_over {
        return reject(RejectReason::GameOver);
    }
    if state.is_spawning() || state.phase != GamePhase::Ready {
        return reject(RejectReason::Spawning);
    }

    let total = state.field.len() + state.bar.len();
    log::info!("Reshuffling {} shapes", total);

    state.clear_board();
    state.start_batch(total as u32);

    ReshuffleOutcome::Started {
        count: state.pending_spawns(),
    }
}

/// Abort whatever is going on, clear everything, and schedule a fresh game
pub fn restart(state: &mut GameState) {
    if state.phase == GamePhase::Idle {
        start_game(state);
        return;
    }
    if state.restart_countdown.is_some() {
        log::debug!("Restart ignored: already restarting");
        return;
    }

    log::info!("Restarting");
    state.abort_spawn();
    state.clear_board();
    state.game_over = false;
    state.phase = GamePhase::Spawning;
    state.restart_countdown = Some(state.rules().restart_delay_ticks);
    state.push_event(GameEvent::Restarted);
}

/// Count down a pending restart; when it expires, regenerate and respawn
fn advance_restart(state: &mut GameState) {
    let Some(ticks) = state.restart_countdown else {
        return;
    };

    if ticks > 0 {
        state.restart_countdown = Some(ticks - 1);
        return;
    }

    state.restart_countdown = None;
    state.regenerate_pool();
    state.start_batch(state.rules().initial_shapes_count);
}

/// Let the spawn run place its next shape
fn advance_spawn(state: &mut GameState) {
    let Some(step) = state.spawn_run.as_mut().map(|run| run.step()) else {
        return;
    };

    match step {
        SpawnStep::Waiting => {}
        SpawnStep::Emit(variant) => state.spawn_instance(variant),
        SpawnStep::Finished => {
            state.spawn_run = None;
            state.push_event(GameEvent::SpawnFinished);
            if !state.game_over {
                state.phase = GamePhase::Ready;
            }
        }
    }
}

fn finish(state: &mut GameState, phase: GamePhase) {
    state.phase = phase;
    state.game_over = true;
    match phase {
        GamePhase::Won => {
            log::info!("Field cleared - you win!");
            state.push_event(GameEvent::Won);
        }
        _ => {
            log::info!("Collection bar full - game over");
            state.push_event(GameEvent::Lost);
        }
    }
}

/// Demo player: continue the bar's current run if possible, otherwise start
/// on the most common variant in the field
pub fn pick_autoplay_target(state: &GameState) -> Option<InstanceId> {
    if state.phase != GamePhase::Ready || state.is_spawning() || state.game_over {
        return None;
    }

    if let Some(tail) = state.bar.tail_variant() {
        if let Some(instance) = state.field.first_of(&tail) {
            return Some(instance.id);
        }
    }

    let mut best: Option<(usize, InstanceId)> = None;
    for instance in state.field.iter() {
        let count = state.field.count_of(&instance.variant);
        if best.is_none_or(|(best_count, _)| count > best_count) {
            best = Some((count, instance.id));
        }
    }
    best.map(|(_, id)| id)
}
