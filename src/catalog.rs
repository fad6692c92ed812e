//! Shape, animal and color catalogs
//!
//! The catalogs are static data assets: each entry names a kind plus the
//! sprites the presentation layer should use for it. Gameplay only cares
//! about the kinds (and the heavy trait); sprites are passed through.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::presentation::VariantVisuals;
use crate::sim::ShapeVariant;

/// Shape kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum ShapeKind {
    #[default]
    Circle,
    Square,
    Triangle,
    /// Same click rules, but falls like a brick
    Heavy,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 4] = [
        ShapeKind::Circle,
        ShapeKind::Square,
        ShapeKind::Triangle,
        ShapeKind::Heavy,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeKind::Circle => "Circle",
            ShapeKind::Square => "Square",
            ShapeKind::Triangle => "Triangle",
            ShapeKind::Heavy => "Heavy",
        }
    }

    /// Whether instances of this shape get the heavy physics trait
    pub fn is_heavy(&self) -> bool {
        matches!(self, ShapeKind::Heavy)
    }
}

/// Animal kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum AnimalKind {
    #[default]
    Wolf,
    Pig,
    Chick,
    Chicken,
    Crocodile,
    Fox,
    Giraffe,
}

impl AnimalKind {
    pub const ALL: [AnimalKind; 7] = [
        AnimalKind::Wolf,
        AnimalKind::Pig,
        AnimalKind::Chick,
        AnimalKind::Chicken,
        AnimalKind::Crocodile,
        AnimalKind::Fox,
        AnimalKind::Giraffe,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AnimalKind::Wolf => "Wolf",
            AnimalKind::Pig => "Pig",
            AnimalKind::Chick => "Chick",
            AnimalKind::Chicken => "Chicken",
            AnimalKind::Crocodile => "Crocodile",
            AnimalKind::Fox => "Fox",
            AnimalKind::Giraffe => "Giraffe",
        }
    }
}

/// RGBA8 color. Integer channels so variants get exact structural equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    #[serde(default = "opaque")]
    pub a: u8,
}

fn opaque() -> u8 {
    255
}

impl Color {
    pub const RED: Color = Color::rgb(0xe5, 0x3e, 0x3e);
    pub const GREEN: Color = Color::rgb(0x38, 0xa1, 0x69);
    pub const BLUE: Color = Color::rgb(0x31, 0x82, 0xce);
    pub const YELLOW: Color = Color::rgb(0xec, 0xc9, 0x4b);
    pub const PURPLE: Color = Color::rgb(0x80, 0x5a, 0xd5);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Packed 0xRRGGBBAA
    pub fn to_u32(&self) -> u32 {
        u32::from_be_bytes([self.r, self.g, self.b, self.a])
    }
}

/// Shape catalog entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeTypeAsset {
    pub kind: ShapeKind,
    #[serde(default)]
    pub shape_sprite: Option<String>,
    #[serde(default)]
    pub border_sprite: Option<String>,
}

impl ShapeTypeAsset {
    pub fn new(kind: ShapeKind) -> Self {
        let name = kind.as_str().to_lowercase();
        Self {
            kind,
            shape_sprite: Some(format!("shapes/{name}.png")),
            border_sprite: Some(format!("shapes/{name}_border.png")),
        }
    }
}

/// Animal catalog entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimalTypeAsset {
    pub kind: AnimalKind,
    #[serde(default)]
    pub sprite: Option<String>,
}

impl AnimalTypeAsset {
    pub fn new(kind: AnimalKind) -> Self {
        Self {
            kind,
            sprite: Some(format!("animals/{}.png", kind.as_str().to_lowercase())),
        }
    }
}

/// The three catalogs the variant pool is built from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Catalog {
    pub shape_types: Vec<ShapeTypeAsset>,
    pub animal_types: Vec<AnimalTypeAsset>,
    pub border_colors: Vec<Color>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            shape_types: ShapeKind::ALL.iter().copied().map(ShapeTypeAsset::new).collect(),
            animal_types: AnimalKind::ALL.iter().copied().map(AnimalTypeAsset::new).collect(),
            border_colors: vec![
                Color::RED,
                Color::GREEN,
                Color::BLUE,
                Color::YELLOW,
                Color::PURPLE,
            ],
        }
    }
}

impl Catalog {
    /// Reject empty catalogs
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.shape_types.is_empty() {
            return Err(ConfigError::EmptyShapeTypes);
        }
        if self.animal_types.is_empty() {
            return Err(ConfigError::EmptyAnimalTypes);
        }
        if self.border_colors.is_empty() {
            return Err(ConfigError::EmptyBorderColors);
        }
        Ok(())
    }

    pub fn shape_kinds(&self) -> Vec<ShapeKind> {
        self.shape_types.iter().map(|s| s.kind).collect()
    }

    pub fn animal_kinds(&self) -> Vec<AnimalKind> {
        self.animal_types.iter().map(|a| a.kind).collect()
    }

    /// Resolve the sprites for a variant (first catalog entry of each kind wins)
    pub fn visuals(&self, variant: &ShapeVariant) -> VariantVisuals {
        let shape = self.shape_types.iter().find(|s| s.kind == variant.shape);
        let animal = self.animal_types.iter().find(|a| a.kind == variant.animal);

        VariantVisuals {
            shape_sprite: shape.and_then(|s| s.shape_sprite.clone()),
            border_sprite: shape.and_then(|s| s.border_sprite.clone()),
            animal_sprite: animal.and_then(|a| a.sprite.clone()),
            color: variant.color,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog_is_valid() {
        let catalog = Catalog::default();
        assert!(catalog.validate().is_ok());
        assert_eq!(catalog.shape_types.len(), 4);
        assert_eq!(catalog.animal_types.len(), 7);
    }

    #[test]
    fn test_empty_catalogs_rejected() {
        let mut catalog = Catalog::default();
        catalog.animal_types.clear();
        assert!(matches!(catalog.validate(), Err(ConfigError::EmptyAnimalTypes)));

        let mut catalog = Catalog::default();
        catalog.border_colors.clear();
        assert!(matches!(catalog.validate(), Err(ConfigError::EmptyBorderColors)));

        let mut catalog = Catalog::default();
        catalog.shape_types.clear();
        assert!(matches!(catalog.validate(), Err(ConfigError::EmptyShapeTypes)));
    }

    #[test]
    fn test_only_heavy_is_heavy() {
        assert!(ShapeKind::Heavy.is_heavy());
        assert!(!ShapeKind::Circle.is_heavy());
        assert!(!ShapeKind::Square.is_heavy());
        assert!(!ShapeKind::Triangle.is_heavy());
    }

    #[test]
    fn test_visuals_missing_sprite() {
        let mut catalog = Catalog::default();
        catalog.animal_types[0].sprite = None;
        let variant = ShapeVariant::new(ShapeKind::Square, Color::BLUE, catalog.animal_types[0].kind);

        let visuals = catalog.visuals(&variant);
        assert_eq!(visuals.shape_sprite.as_deref(), Some("shapes/square.png"));
        assert!(visuals.animal_sprite.is_none());
        assert_eq!(visuals.color, Color::BLUE);
    }

    #[test]
    fn test_color_alpha_defaults_to_opaque() {
        let color: Color = serde_json::from_str(r#"{"r":1,"g":2,"b":3}"#).unwrap();
        assert_eq!(color, Color::rgb(1, 2, 3));
        assert_eq!(color.to_u32(), 0x010203ff);
    }
}
