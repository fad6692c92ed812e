//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by instance/slot ID)
//! - No rendering, audio or platform dependencies

pub mod bar;
pub mod field;
pub mod pool;
pub mod spawn;
pub mod state;
pub mod tick;
pub mod variant;

pub use bar::{BarSlot, CollectionBar, MatchOutcome, SlotId};
pub use field::{FieldState, InstanceId, ShapeInstance};
pub use pool::VariantPool;
pub use spawn::{BatchPlan, SpawnRun, SpawnStep, plan_batch};
pub use state::{GameEvent, GamePhase, GameState, Rules};
pub use tick::{ClickOutcome, Command, RejectReason, ReshuffleOutcome, TickInput, tick};
pub use variant::ShapeVariant;
