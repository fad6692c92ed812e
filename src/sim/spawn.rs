//! Spawn scheduling
//!
//! A batch is planned in full (triplets drawn, then shuffled) before any of
//! it is emitted. Emission then drips one shape per cadence interval.

use std::collections::VecDeque;

use rand::Rng;

use super::pool::VariantPool;
use super::variant::ShapeVariant;
use crate::consts::MATCH_SIZE;

/// A planned batch, ready to be emitted
#[derive(Debug, Clone)]
pub struct BatchPlan {
    /// Count the caller asked for
    pub requested: u32,
    /// Shuffled variants, length a multiple of 3
    pub variants: Vec<ShapeVariant>,
}

impl BatchPlan {
    /// True if the requested count had to be rounded to whole triplets.
    /// This is the reportable signal for the rounding warning.
    pub fn was_rounded(&self) -> bool {
        self.variants.len() != self.requested as usize
    }

    pub fn len(&self) -> usize {
        self.variants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }
}

/// Round down to a multiple of 3, never below 3
#[inline]
pub fn round_to_triplets(requested: u32) -> u32 {
    let m = MATCH_SIZE as u32;
    ((requested / m) * m).max(m)
}

/// Draw `count / 3` variants with replacement and repeat each three times.
/// Consecutive groups of three are identical (the pre-shuffle view).
pub fn draw_triplets<R: Rng + ?Sized>(count: u32, pool: &VariantPool, rng: &mut R) -> Vec<ShapeVariant> {
    let groups = count as usize / MATCH_SIZE;
    let mut variants = Vec::with_capacity(groups * MATCH_SIZE);
    for _ in 0..groups {
        let Some(variant) = pool.draw_random(rng) else {
            break;
        };
        variants.extend(std::iter::repeat_n(variant, MATCH_SIZE));
    }
    variants
}

/// Uniform in-place permutation: each slot swaps with a random later-or-equal slot
pub fn shuffle<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    let len = items.len();
    for i in 0..len {
        let j = rng.random_range(i..len);
        items.swap(i, j);
    }
}

/// Turn a requested count into a shuffled, triplet-completable batch.
///
/// Counts that are not a multiple of 3 are rounded down (minimum 3), logged
/// as a warning and flagged by [`BatchPlan::was_rounded`]. An empty pool
/// yields an empty plan.
pub fn plan_batch<R: Rng + ?Sized>(requested: u32, pool: &VariantPool, rng: &mut R) -> BatchPlan {
    let count = round_to_triplets(requested);
    if count != requested {
        log::warn!(
            "Batch size {} is not a multiple of {}, spawning {} instead",
            requested,
            MATCH_SIZE,
            count
        );
    }

    let mut variants = draw_triplets(count, pool, rng);
    shuffle(&mut variants, rng);

    BatchPlan { requested, variants }
}

/// What a spawn run did this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnStep {
    /// Cadence interval not elapsed yet
    Waiting,
    /// Place this variant now
    Emit(ShapeVariant),
    /// All emitted and the final interval elapsed
    Finished,
}

/// An in-flight emission of a planned batch
#[derive(Debug, Clone)]
pub struct SpawnRun {
    pending: VecDeque<ShapeVariant>,
    cadence_ticks: u32,
    /// Ticks until the next emission is allowed
    cooldown: u32,
    emitted: usize,
}

impl SpawnRun {
    pub fn new(plan: BatchPlan, cadence_ticks: u32) -> Self {
        Self {
            pending: plan.variants.into(),
            cadence_ticks,
            cooldown: 0,
            emitted: 0,
        }
    }

    /// Advance one tick.
    ///
    /// The first shape comes out on the first step, then one every
    /// `cadence_ticks` steps. The run finishes one interval after the last
    /// shape (immediately for an empty run).
    pub fn step(&mut self) -> SpawnStep {
        if self.cooldown > 0 {
            self.cooldown -= 1;
            if self.cooldown > 0 {
                return SpawnStep::Waiting;
            }
        }

        match self.pending.pop_front() {
            Some(variant) => {
                self.cooldown = self.cadence_ticks;
                self.emitted += 1;
                SpawnStep::Emit(variant)
            }
            None => SpawnStep::Finished,
        }
    }

    /// Planned shapes not emitted yet
    pub fn remaining(&self) -> usize {
        self.pending.len()
    }

    pub fn emitted(&self) -> usize {
        self.emitted
    }

    /// Drop the rest of the batch. Returns how many shapes were discarded.
    pub fn abort(mut self) -> usize {
        let discarded = self.pending.len();
        self.pending.clear();
        discarded
    }
}
