//! Variant pool: every combination the catalogs allow

use std::collections::HashSet;

use rand::Rng;

use super::variant::ShapeVariant;
use crate::catalog::{AnimalKind, Color, ShapeKind};

/// The full cartesian product of shape kinds × animal kinds × colors
#[derive(Debug, Clone, Default)]
pub struct VariantPool {
    variants: Vec<ShapeVariant>,
}

impl VariantPool {
    /// Build the pool. Returns an empty pool if any input is empty.
    ///
    /// Order is shape-major, then animal, then color. Duplicate combinations
    /// (from duplicated catalog entries) are kept once.
    pub fn generate(shapes: &[ShapeKind], animals: &[AnimalKind], colors: &[Color]) -> Self {
        if shapes.is_empty() || animals.is_empty() || colors.is_empty() {
            log::warn!(
                "Cannot build variant pool: {} shapes, {} animals, {} colors",
                shapes.len(),
                animals.len(),
                colors.len()
            );
            return Self::default();
        }

        let mut variants = Vec::with_capacity(shapes.len() * animals.len() * colors.len());
        let mut seen = HashSet::with_capacity(variants.capacity());
        let mut duplicates = 0usize;
        for &shape in shapes {
            for &animal in animals {
                for &color in colors {
                    let variant = ShapeVariant::new(shape, color, animal);
                    if seen.insert(variant) {
                        variants.push(variant);
                    } else {
                        duplicates += 1;
                    }
                }
            }
        }

        if duplicates > 0 {
            log::warn!("Skipped {} duplicate variants (duplicate catalog entries?)", duplicates);
        }
        log::info!("Generated {} possible variants", variants.len());

        Self { variants }
    }

    /// Uniform draw with replacement. `None` only if the pool is empty.
    pub fn draw_random<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<ShapeVariant> {
        if self.variants.is_empty() {
            return None;
        }
        let idx = rng.random_range(0..self.variants.len());
        Some(self.variants[idx])
    }

    pub fn len(&self) -> usize {
        self.variants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }

    pub fn contains(&self, variant: &ShapeVariant) -> bool {
        self.variants.contains(variant)
    }

    pub fn variants(&self) -> &[ShapeVariant] {
        &self.variants
    }
}
