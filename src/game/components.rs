//! # Components
//!
//! Typed attributes attached to entities, plus the tags that mark their
//! capabilities.

use crate::{BoundingBox, BurrowError, BurrowResult, Vector};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Capability markers carried by entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Tag {
    Player,
    Actor,
    Enemy,
    Solid,
    Item,
    Edible,
    Hole,
    Spider,
    Pillbug,
    Beetle,
    Centipede,
}

/// Enemy archetypes, keyed by name in the settings file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Species {
    Spider,
    Pillbug,
    Beetle,
    Centipede,
}

impl Species {
    /// The species tag.
    pub fn tag(self) -> Tag {
        match self {
            Species::Spider => Tag::Spider,
            Species::Pillbug => Tag::Pillbug,
            Species::Beetle => Tag::Beetle,
            Species::Centipede => Tag::Centipede,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Species::Spider => "spider",
            Species::Pillbug => "pillbug",
            Species::Beetle => "beetle",
            Species::Centipede => "centipede",
        }
    }
}

impl FromStr for Species {
    type Err = BurrowError;

    fn from_str(kind: &str) -> BurrowResult<Self> {
        match kind.to_lowercase().as_str() {
            "spider" => Ok(Species::Spider),
            "pillbug" => Ok(Species::Pillbug),
            "beetle" => Ok(Species::Beetle),
            "centipede" => Ok(Species::Centipede),
            other => Err(BurrowError::Configuration(format!(
                "no strategy registered for enemy kind '{}'",
                other
            ))),
        }
    }
}

/// A permanent stat modifier gained by eating a corpse that carried it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Trait {
    #[serde(rename = "shell")]
    Shell,
    #[serde(rename = "fangs")]
    Fangs,
    #[serde(rename = "jaws")]
    Jaws,
    #[serde(rename = "bristles")]
    Bristles,
    #[serde(rename = "venom sacs")]
    VenomSacs,
}

impl fmt::Display for Trait {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Trait::Shell => "shell",
            Trait::Fangs => "fangs",
            Trait::Jaws => "jaws",
            Trait::Bristles => "bristles",
            Trait::VenomSacs => "venom sacs",
        };
        f.write_str(name)
    }
}

/// Combat and metabolism statistics.
///
/// # Examples
///
/// ```
/// use burrow::{Stats, Trait};
///
/// let stats = Stats::new(10, 3);
/// assert_eq!(stats.max_health, 10);
/// assert_eq!(stats.acquire_trait(Trait::Jaws).strength, 4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    pub health: i32,
    pub max_health: i32,
    pub strength: i32,
    /// Random bonus damage drawn from `[low, high)`
    pub damage_range: (i32, i32),
    /// Flat reduction of incoming damage
    pub toughness: i32,
    /// Damage dealt back to whoever lands a hit
    pub toxicity: i32,
    /// Shrinks the radius at which enemies notice this entity
    pub camouflage: i32,
    /// Corpse size absorbed per turn of eating
    pub digestion: i32,
    /// Flat bonus damage on every hit
    pub venom: i32,
}

impl Stats {
    /// Creates full-health stats with the given strength.
    pub fn new(health: i32, strength: i32) -> Self {
        Self {
            health,
            max_health: health,
            strength,
            damage_range: (0, 0),
            toughness: 0,
            toxicity: 0,
            camouflage: 0,
            digestion: 1,
            venom: 0,
        }
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0
    }

    pub fn is_injured(&self) -> bool {
        self.health < self.max_health
    }

    /// Returns these stats with `health` clamped into `[0, max_health]`.
    pub fn with_health(mut self, health: i32) -> Self {
        self.health = health.clamp(0, self.max_health);
        self
    }

    /// Returns these stats with `amount` health restored, capped at max.
    pub fn healed(self, amount: i32) -> Self {
        self.with_health(self.health + amount)
    }

    /// Returns these stats with the permanent effect of `trait_` applied.
    pub fn acquire_trait(mut self, trait_: Trait) -> Self {
        match trait_ {
            Trait::Jaws => self.strength += 1,
            Trait::Shell => self.toughness += 1,
            Trait::Fangs => self.damage_range.1 += 1,
            Trait::VenomSacs => self.venom += 1,
            Trait::Bristles => self.toxicity += 1,
        }
        self
    }
}

impl fmt::Display for Stats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Health: {}/{}", self.health, self.max_health)?;
        let bar = if self.max_health > 0 {
            (10 * self.health.max(0) / self.max_health) as usize
        } else {
            0
        };
        writeln!(f, "{}", "|".repeat(bar))?;
        write!(f, "Strength: {}", self.strength)?;
        if self.damage_range.1 > self.damage_range.0 {
            write!(f, " (+{}-{})", self.damage_range.0, self.damage_range.1 - 1)?;
        }
        if self.toughness != 0 {
            write!(f, "\nToughness: {}", self.toughness)?;
        }
        if self.toxicity != 0 {
            write!(f, "\nToxicity: {}", self.toxicity)?;
        }
        if self.camouflage != 0 {
            write!(f, "\nCamouflage: {}", self.camouflage)?;
        }
        if self.venom != 0 {
            write!(f, "\nVenom: {}", self.venom)?;
        }
        if self.digestion > 1 {
            write!(f, "\nDigestion: {}", self.digestion)?;
        }
        Ok(())
    }
}

/// A character glyph with foreground and background colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Graphic {
    #[serde(rename = "char")]
    pub ch: char,
    #[serde(default = "Graphic::default_fg")]
    pub fg: [u8; 3],
    #[serde(default = "Graphic::default_bg")]
    pub bg: [u8; 3],
}

impl Graphic {
    pub fn new(ch: char, fg: [u8; 3]) -> Self {
        Self {
            ch,
            fg,
            bg: Self::default_bg(),
        }
    }

    fn default_fg() -> [u8; 3] {
        [255, 255, 255]
    }

    fn default_bg() -> [u8; 3] {
        [0, 0, 0]
    }
}

impl Default for Graphic {
    fn default() -> Self {
        Self::new('!', Self::default_fg())
    }
}

/// The viewport onto the map. Its entity's position is the view's top-left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Camera {
    pub height: i32,
    pub width: i32,
    pub tracking_radius: i32,
}

impl Camera {
    /// The visible region when the camera sits at `position`.
    pub fn bounding_box(&self, position: Vector) -> BoundingBox {
        BoundingBox::from_top_left(position, self.height, self.width)
    }

    /// The region the player may roam before the camera follows.
    pub fn tracking_box(&self, position: Vector) -> BoundingBox {
        BoundingBox::centered(
            self.bounding_box(position).center(),
            self.tracking_radius,
            self.tracking_radius,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_species_parsing() {
        assert_eq!("spider".parse::<Species>().unwrap(), Species::Spider);
        assert_eq!("Beetle".parse::<Species>().unwrap(), Species::Beetle);
        let err = "slug".parse::<Species>().unwrap_err();
        assert!(err.to_string().contains("slug"));
    }

    #[test]
    fn test_each_trait_raises_one_stat() {
        let base = Stats::new(10, 2);
        assert_eq!(base.acquire_trait(Trait::Jaws).strength, 3);
        assert_eq!(base.acquire_trait(Trait::Shell).toughness, 1);
        assert_eq!(base.acquire_trait(Trait::Fangs).damage_range, (0, 1));
        assert_eq!(base.acquire_trait(Trait::VenomSacs).venom, 1);
        assert_eq!(base.acquire_trait(Trait::Bristles).toxicity, 1);
    }

    #[test]
    fn test_health_is_clamped() {
        let stats = Stats::new(10, 1);
        assert_eq!(stats.with_health(-4).health, 0);
        assert_eq!(stats.with_health(4).healed(100).health, 10);
        assert!(stats.with_health(0).is_dead());
        assert!(stats.with_health(9).is_injured());
    }

    #[test]
    fn test_trait_names_match_settings_keys() {
        let parsed: Trait = serde_json::from_str("\"venom sacs\"").unwrap();
        assert_eq!(parsed, Trait::VenomSacs);
        assert_eq!(Trait::VenomSacs.to_string(), "venom sacs");
    }

    #[test]
    fn test_camera_tracking_box_is_centered_on_view() {
        let camera = Camera {
            height: 10,
            width: 20,
            tracking_radius: 4,
        };
        let tracking = camera.tracking_box(Vector::new(0, 0));
        assert_eq!(tracking.center(), Vector::new(10, 5));
        assert_eq!(tracking.width(), 4);
    }
}
