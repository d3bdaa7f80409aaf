//! # Settings
//!
//! The JSON document that configures map size, the camera, the starting
//! player and every enemy archetype. Sections missing from a file fall back
//! to the values shipped in `settings.json`.

use crate::{BurrowError, BurrowResult, Camera, Graphic, Species, Trait};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Slack allowed when checking that trait weights sum to at most one.
const WEIGHT_EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapSettings {
    pub height: usize,
    pub width: usize,
    pub wall_threshold: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerSettings {
    pub health: i32,
    pub strength: i32,
    pub graphic: Graphic,
}

/// Starting values for one enemy archetype at depth zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemySettings {
    pub health: i32,
    pub strength: i32,
    pub graphic: Graphic,
    /// Probability of spawning with each trait; the remainder means none
    #[serde(default)]
    pub traits: BTreeMap<Trait, f64>,
    /// Inclusive range of corpse sizes
    pub size_range: (i32, i32),
    #[serde(default)]
    pub damage_range: (i32, i32),
    #[serde(default)]
    pub toughness: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemSettings {
    pub graphic: Graphic,
}

/// The whole configuration document.
///
/// # Examples
///
/// ```
/// use burrow::Settings;
///
/// let settings = Settings::from_json_str(r#"{ "debug": true }"#).unwrap();
/// assert!(settings.debug);
/// assert_eq!(settings.map, Settings::default().map);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub map: MapSettings,
    pub camera: Camera,
    pub player: PlayerSettings,
    /// Archetypes keyed by species name
    pub enemy: BTreeMap<String, EnemySettings>,
    pub hole: ItemSettings,
    pub corpse: ItemSettings,
    /// Draws the camera anchor on the map
    pub debug: bool,
}

impl Settings {
    /// Reads and validates a settings file.
    pub fn load(path: impl AsRef<Path>) -> BurrowResult<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let settings = Self::from_json_str(&text)?;
        log::info!("loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Parses and validates a settings document.
    pub fn from_json_str(text: &str) -> BurrowResult<Self> {
        let settings: Settings = serde_json::from_str(text)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json_string(&self) -> BurrowResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// The configured archetypes paired with their species, in name order.
    pub fn species(&self) -> BurrowResult<Vec<(Species, &EnemySettings)>> {
        self.enemy
            .iter()
            .map(|(kind, enemy)| Ok((kind.parse::<Species>()?, enemy)))
            .collect()
    }

    /// Checks the cross-field constraints serde cannot express.
    pub fn validate(&self) -> BurrowResult<()> {
        if self.map.height == 0 || self.map.width == 0 {
            return Err(config_error("map must have at least one cell"));
        }
        if !(0.0..=1.0).contains(&self.map.wall_threshold) {
            return Err(config_error(format!(
                "map.wall_threshold {} is outside [0, 1]",
                self.map.wall_threshold
            )));
        }
        if self.camera.height <= 0
            || self.camera.width <= 0
            || self.camera.height as usize > self.map.height
            || self.camera.width as usize > self.map.width
        {
            return Err(config_error(format!(
                "camera of {}x{} does not fit the {}x{} map",
                self.camera.width, self.camera.height, self.map.width, self.map.height
            )));
        }
        if self.camera.tracking_radius < 0 {
            return Err(config_error("camera.tracking_radius must not be negative"));
        }
        if self.player.health <= 0 {
            return Err(config_error("player.health must be positive"));
        }

        for (species, enemy) in self.species()? {
            let kind = species.name();
            if enemy.health <= 0 {
                return Err(config_error(format!("enemy.{}.health must be positive", kind)));
            }
            let (low, high) = enemy.size_range;
            if low < 0 || low > high {
                return Err(config_error(format!(
                    "enemy.{}.size_range [{}, {}] is empty",
                    kind, low, high
                )));
            }
            if enemy.traits.values().any(|&weight| weight < 0.0) {
                return Err(config_error(format!(
                    "enemy.{}.traits has a negative weight",
                    kind
                )));
            }
            let total: f64 = enemy.traits.values().sum();
            if total > 1.0 + WEIGHT_EPSILON {
                return Err(config_error(format!(
                    "enemy.{}.traits sum to {}, more than 1",
                    kind, total
                )));
            }
        }
        Ok(())
    }
}

fn config_error(message: impl Into<String>) -> BurrowError {
    BurrowError::Configuration(message.into())
}

impl Default for MapSettings {
    fn default() -> Self {
        Self {
            height: 60,
            width: 100,
            wall_threshold: 0.45,
        }
    }
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            health: 30,
            strength: 2,
            graphic: Graphic::new('@', [198, 211, 19]),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        let mut enemy = BTreeMap::new();
        enemy.insert(
            "beetle".to_string(),
            EnemySettings {
                health: 10,
                strength: 3,
                graphic: Graphic::new('b', [90, 160, 60]),
                traits: BTreeMap::from([(Trait::Jaws, 0.4), (Trait::Shell, 0.2)]),
                size_range: (2, 4),
                damage_range: (0, 0),
                toughness: 0,
            },
        );
        enemy.insert(
            "centipede".to_string(),
            EnemySettings {
                health: 7,
                strength: 2,
                graphic: Graphic::new('c', [220, 140, 40]),
                traits: BTreeMap::from([(Trait::Bristles, 0.4), (Trait::VenomSacs, 0.2)]),
                size_range: (1, 3),
                damage_range: (0, 0),
                toughness: 0,
            },
        );
        enemy.insert(
            "pillbug".to_string(),
            EnemySettings {
                health: 8,
                strength: 1,
                graphic: Graphic::new('p', [150, 150, 170]),
                traits: BTreeMap::from([(Trait::Shell, 0.5)]),
                size_range: (2, 3),
                damage_range: (0, 0),
                toughness: 1,
            },
        );
        enemy.insert(
            "spider".to_string(),
            EnemySettings {
                health: 6,
                strength: 2,
                graphic: Graphic::new('s', [200, 60, 60]),
                traits: BTreeMap::from([(Trait::Fangs, 0.3), (Trait::VenomSacs, 0.2)]),
                size_range: (1, 2),
                damage_range: (0, 2),
                toughness: 0,
            },
        );

        Self {
            map: MapSettings::default(),
            camera: Camera {
                height: 30,
                width: 60,
                tracking_radius: 10,
            },
            player: PlayerSettings::default(),
            enemy,
            hole: ItemSettings {
                graphic: Graphic::new('O', [120, 80, 40]),
            },
            corpse: ItemSettings {
                graphic: Graphic::new('%', [140, 40, 40]),
            },
            debug: false,
        }
    }
}
