//! The field: spawned shapes waiting to be tapped

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::variant::ShapeVariant;
use crate::consts::HEAVY_MASS;

/// Handle of a live shape instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct InstanceId(pub u32);

/// A placed shape the player can tap
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeInstance {
    pub id: InstanceId,
    pub variant: ShapeVariant,
    pub pos: Vec2,
    /// Derived from the variant's shape kind
    pub heavy: bool,
}

impl ShapeInstance {
    pub fn new(id: InstanceId, variant: ShapeVariant, pos: Vec2) -> Self {
        Self {
            id,
            variant,
            pos,
            heavy: variant.is_heavy(),
        }
    }

    /// Physics mass hint for the presentation layer
    pub fn mass(&self) -> f32 {
        if self.heavy { HEAVY_MASS } else { 1.0 }
    }
}

/// Currently spawned, clickable instances (sorted by id)
#[derive(Debug, Clone, Default)]
pub struct FieldState {
    instances: Vec<ShapeInstance>,
}

impl FieldState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a freshly spawned instance. Ids are allocated increasing, so
    /// pushing keeps the list sorted.
    pub fn insert(&mut self, instance: ShapeInstance) {
        debug_assert!(
            self.instances.last().is_none_or(|last| last.id < instance.id),
            "instance ids must be increasing"
        );
        self.instances.push(instance);
    }

    /// Take an instance out of the field (`None` if it is not here)
    pub fn remove(&mut self, id: InstanceId) -> Option<ShapeInstance> {
        let idx = self.instances.binary_search_by_key(&id, |i| i.id).ok()?;
        Some(self.instances.remove(idx))
    }

    pub fn contains(&self, id: InstanceId) -> bool {
        self.get(id).is_some()
    }

    pub fn get(&self, id: InstanceId) -> Option<&ShapeInstance> {
        self.instances
            .binary_search_by_key(&id, |i| i.id)
            .ok()
            .map(|idx| &self.instances[idx])
    }

    /// Remove everything, returning the removed handles
    pub fn clear(&mut self) -> Vec<InstanceId> {
        self.instances.drain(..).map(|i| i.id).collect()
    }

    /// How many instances of a variant are in the field
    pub fn count_of(&self, variant: &ShapeVariant) -> usize {
        self.instances.iter().filter(|i| i.variant == *variant).count()
    }

    /// Lowest-id instance of a variant
    pub fn first_of(&self, variant: &ShapeVariant) -> Option<&ShapeInstance> {
        self.instances.iter().find(|i| i.variant == *variant)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ShapeInstance> {
        self.instances.iter()
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{AnimalKind, Color, ShapeKind};

    fn variant(animal: AnimalKind) -> ShapeVariant {
        ShapeVariant::new(ShapeKind::Circle, Color::RED, animal)
    }

    fn field_with(animals: &[AnimalKind]) -> FieldState {
        let mut field = FieldState::new();
        for (i, &animal) in animals.iter().enumerate() {
            field.insert(ShapeInstance::new(InstanceId(i as u32 + 1), variant(animal), Vec2::ZERO));
        }
        field
    }

    #[test]
    fn test_insert_and_remove() {
        let mut field = field_with(&[AnimalKind::Fox, AnimalKind::Pig, AnimalKind::Fox]);
        assert_eq!(field.len(), 3);

        let removed = field.remove(InstanceId(2)).unwrap();
        assert_eq!(removed.variant, variant(AnimalKind::Pig));
        assert!(!field.contains(InstanceId(2)));
        assert_eq!(field.len(), 2);
    }

    #[test]
    fn test_remove_twice_is_none() {
        let mut field = field_with(&[AnimalKind::Fox]);
        assert!(field.remove(InstanceId(1)).is_some());
        assert!(field.remove(InstanceId(1)).is_none());
        assert!(field.remove(InstanceId(99)).is_none());
    }

    #[test]
    fn test_counts_and_first() {
        let field = field_with(&[AnimalKind::Pig, AnimalKind::Fox, AnimalKind::Fox]);
        assert_eq!(field.count_of(&variant(AnimalKind::Fox)), 2);
        assert_eq!(field.first_of(&variant(AnimalKind::Fox)).unwrap().id, InstanceId(2));
        assert!(field.first_of(&variant(AnimalKind::Wolf)).is_none());
    }

    #[test]
    fn test_clear_returns_handles() {
        let mut field = field_with(&[AnimalKind::Pig, AnimalKind::Fox]);
        assert_eq!(field.clear(), vec![InstanceId(1), InstanceId(2)]);
        assert!(field.is_empty());
    }

    #[test]
    fn test_heavy_mass() {
        let heavy = ShapeVariant::new(ShapeKind::Heavy, Color::RED, AnimalKind::Fox);
        let instance = ShapeInstance::new(InstanceId(1), heavy, Vec2::ZERO);
        assert!(instance.heavy);
        assert_eq!(instance.mass(), HEAVY_MASS);

        let light = ShapeInstance::new(InstanceId(2), variant(AnimalKind::Fox), Vec2::ZERO);
        assert_eq!(light.mass(), 1.0);
    }
}
