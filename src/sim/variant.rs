//! Shape variants: the identity matching pieces share

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::catalog::{AnimalKind, Color, ShapeKind};

/// Immutable (shape, color, animal) triple. Two pieces match when their
/// variants are equal field by field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ShapeVariant {
    pub shape: ShapeKind,
    pub color: Color,
    pub animal: AnimalKind,
}

impl ShapeVariant {
    pub const fn new(shape: ShapeKind, color: Color, animal: AnimalKind) -> Self {
        Self {
            shape,
            color,
            animal,
        }
    }

    #[inline]
    pub fn is_heavy(&self) -> bool {
        self.shape.is_heavy()
    }
}

impl fmt::Display for ShapeVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} #{:08x}",
            self.animal.as_str(),
            self.shape.as_str(),
            self.color.to_u32()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structural_equality() {
        let a = ShapeVariant::new(ShapeKind::Circle, Color::RED, AnimalKind::Fox);
        let b = ShapeVariant::new(ShapeKind::Circle, Color::RED, AnimalKind::Fox);
        assert_eq!(a, b);

        assert_ne!(a, ShapeVariant::new(ShapeKind::Square, Color::RED, AnimalKind::Fox));
        assert_ne!(a, ShapeVariant::new(ShapeKind::Circle, Color::BLUE, AnimalKind::Fox));
        assert_ne!(a, ShapeVariant::new(ShapeKind::Circle, Color::RED, AnimalKind::Pig));
    }

    #[test]
    fn test_display() {
        let v = ShapeVariant::new(ShapeKind::Heavy, Color::rgb(1, 2, 3), AnimalKind::Wolf);
        assert_eq!(v.to_string(), "Wolf Heavy #010203ff");
        assert!(v.is_heavy());
    }
}
