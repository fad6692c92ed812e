//! Collection bar: tapped shapes queue up here and clear in triples

use serde::{Deserialize, Serialize};

use super::variant::ShapeVariant;
use crate::consts::MATCH_SIZE;
use crate::error::InsertError;

/// Handle of a bar slot. Ids increase with insertion order and are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SlotId(pub u32);

/// One collected shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BarSlot {
    pub id: SlotId,
    pub variant: ShapeVariant,
}

/// Result of a match check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOutcome {
    /// Nothing to do
    None,
    /// The last three slots matched and were removed (oldest first)
    TripleRemoved {
        slots: [SlotId; MATCH_SIZE],
        variant: ShapeVariant,
    },
    /// No match and no room left
    BarFull,
}

/// Capacity-bounded, insertion-ordered list of collected variants
#[derive(Debug, Clone)]
pub struct CollectionBar {
    slots: Vec<BarSlot>,
    capacity: usize,
    next_id: u32,
    /// Set by insert, consumed by the match check
    unchecked: bool,
}

impl CollectionBar {
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            capacity,
            next_id: 1,
            unchecked: false,
        }
    }

    /// Append a variant. Refuses when the bar is already at capacity.
    pub fn insert(&mut self, variant: ShapeVariant) -> Result<BarSlot, InsertError> {
        if self.is_full() {
            return Err(InsertError::Full {
                capacity: self.capacity,
            });
        }

        let slot = BarSlot {
            id: SlotId(self.next_id),
            variant,
        };
        self.next_id += 1;
        self.slots.push(slot);
        self.unchecked = true;
        Ok(slot)
    }

    /// Resolve the most recent insert.
    ///
    /// Only the last three slots are compared. A triple split by an
    /// unrelated insert in between is never found again; the bar does not
    /// scan for matches elsewhere. Calling this again without a new insert
    /// returns `None`.
    pub fn check_and_resolve_match(&mut self) -> MatchOutcome {
        if !self.unchecked {
            return MatchOutcome::None;
        }
        self.unchecked = false;

        if self.slots.len() >= MATCH_SIZE {
            let tail = &self.slots[self.slots.len() - MATCH_SIZE..];
            let variant = tail[0].variant;
            if tail.iter().all(|s| s.variant == variant) {
                let slots = [tail[0].id, tail[1].id, tail[2].id];
                self.slots.truncate(self.slots.len() - MATCH_SIZE);
                return MatchOutcome::TripleRemoved { slots, variant };
            }
        }

        if self.is_full() {
            MatchOutcome::BarFull
        } else {
            MatchOutcome::None
        }
    }

    /// Remove every slot, returning the removed handles
    pub fn clear(&mut self) -> Vec<SlotId> {
        self.unchecked = false;
        self.slots.drain(..).map(|s| s.id).collect()
    }

    /// Variant of the newest slot
    pub fn tail_variant(&self) -> Option<ShapeVariant> {
        self.slots.last().map(|s| s.variant)
    }

    /// How many of the newest slots share the tail variant
    pub fn tail_run(&self) -> usize {
        let Some(tail) = self.tail_variant() else {
            return 0;
        };
        self.slots.iter().rev().take_while(|s| s.variant == tail).count()
    }

    pub fn slots(&self) -> &[BarSlot] {
        &self.slots
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.slots.len() >= self.capacity
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::catalog::{AnimalKind, Color, ShapeKind};

    const A: ShapeVariant = ShapeVariant::new(ShapeKind::Circle, Color::RED, AnimalKind::Fox);
    const B: ShapeVariant = ShapeVariant::new(ShapeKind::Square, Color::RED, AnimalKind::Fox);
    const C: ShapeVariant = ShapeVariant::new(ShapeKind::Circle, Color::BLUE, AnimalKind::Pig);

    fn collect(bar: &mut CollectionBar, variant: ShapeVariant) -> MatchOutcome {
        bar.insert(variant).unwrap();
        bar.check_and_resolve_match()
    }

    #[test]
    fn test_three_in_a_row_clears() {
        let mut bar = CollectionBar::new(7);
        assert_eq!(collect(&mut bar, A), MatchOutcome::None);
        assert_eq!(collect(&mut bar, A), MatchOutcome::None);
        let outcome = collect(&mut bar, A);
        assert_eq!(
            outcome,
            MatchOutcome::TripleRemoved {
                slots: [SlotId(1), SlotId(2), SlotId(3)],
                variant: A,
            }
        );
        assert!(bar.is_empty());
    }

    #[test]
    fn test_second_check_is_none() {
        let mut bar = CollectionBar::new(7);
        collect(&mut bar, A);
        collect(&mut bar, A);
        assert!(matches!(collect(&mut bar, A), MatchOutcome::TripleRemoved { .. }));
        assert_eq!(bar.check_and_resolve_match(), MatchOutcome::None);
    }

    #[test]
    fn test_bar_full_reported_once() {
        let mut bar = CollectionBar::new(3);
        collect(&mut bar, A);
        collect(&mut bar, B);
        assert_eq!(collect(&mut bar, C), MatchOutcome::BarFull);
        assert_eq!(bar.check_and_resolve_match(), MatchOutcome::None);
    }

    #[test]
    fn test_insert_when_full_fails() {
        let mut bar = CollectionBar::new(2);
        bar.insert(A).unwrap();
        bar.insert(B).unwrap();
        assert_eq!(bar.insert(C), Err(InsertError::Full { capacity: 2 }));
        assert_eq!(bar.len(), 2);
    }

    #[test]
    fn test_split_triple_is_missed() {
        // A A B A: the three A's are never the last three, so they stay
        let mut bar = CollectionBar::new(7);
        collect(&mut bar, A);
        collect(&mut bar, A);
        collect(&mut bar, B);
        assert_eq!(collect(&mut bar, A), MatchOutcome::None);
        assert_eq!(bar.len(), 4);
    }

    #[test]
    fn test_match_on_last_slot_fills_bar() {
        // Filling the last slot with a completing item is a clear, not a loss
        let mut bar = CollectionBar::new(3);
        collect(&mut bar, A);
        collect(&mut bar, A);
        assert!(matches!(collect(&mut bar, A), MatchOutcome::TripleRemoved { .. }));
    }

    #[test]
    fn test_earlier_slots_survive_match() {
        let mut bar = CollectionBar::new(7);
        collect(&mut bar, B);
        collect(&mut bar, A);
        collect(&mut bar, A);
        collect(&mut bar, A);
        assert_eq!(bar.slots().len(), 1);
        assert_eq!(bar.tail_variant(), Some(B));
    }

    #[test]
    fn test_tail_run() {
        let mut bar = CollectionBar::new(7);
        assert_eq!(bar.tail_run(), 0);
        collect(&mut bar, B);
        collect(&mut bar, A);
        collect(&mut bar, A);
        assert_eq!(bar.tail_run(), 2);
    }

    #[test]
    fn test_clear_keeps_ids_unique() {
        let mut bar = CollectionBar::new(7);
        bar.insert(A).unwrap();
        bar.insert(B).unwrap();
        assert_eq!(bar.clear(), vec![SlotId(1), SlotId(2)]);
        assert_eq!(bar.insert(C).unwrap().id, SlotId(3));
        assert_eq!(bar.check_and_resolve_match(), MatchOutcome::None);
    }

    fn arb_variant() -> impl Strategy<Value = ShapeVariant> {
        prop_oneof![Just(A), Just(B), Just(C)]
    }

    proptest! {
        #[test]
        fn prop_never_exceeds_capacity(
            capacity in 1usize..10,
            inserts in proptest::collection::vec(arb_variant(), 0..60),
        ) {
            let mut bar = CollectionBar::new(capacity);
            for variant in inserts {
                if bar.is_full() {
                    prop_assert!(bar.insert(variant).is_err());
                } else {
                    bar.insert(variant).unwrap();
                    bar.check_and_resolve_match();
                }
                prop_assert!(bar.len() <= capacity);
            }
        }

        #[test]
        fn prop_no_triple_left_at_tail(inserts in proptest::collection::vec(arb_variant(), 0..40)) {
            let mut bar = CollectionBar::new(64);
            for variant in inserts {
                bar.insert(variant).unwrap();
                bar.check_and_resolve_match();
                prop_assert!(bar.tail_run() < 3);
            }
        }
    }
}
