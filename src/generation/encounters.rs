//! # Encounter Generation
//!
//! Enemy creation: depth-scaled stats, a weighted trait roll and the
//! archetype's starting strategy.

use crate::config::DEPTH_SCALING;
use crate::settings::EnemySettings;
use crate::{EntityId, EntityRecord, Species, Stats, Strategy, Tag, Trait, Vector, World};
use rand::Rng;
use std::collections::BTreeMap;

/// The multiplier applied to enemy stats at `depth`.
///
/// # Examples
///
/// ```
/// use burrow::depth_factor;
///
/// assert_eq!(depth_factor(0), 1.0);
/// assert!((depth_factor(2) - 1.69).abs() < 1e-9);
/// ```
pub fn depth_factor(depth: u32) -> f64 {
    DEPTH_SCALING.powi(depth as i32)
}

/// Base stats of an archetype scaled for `depth`. Scalar stats keep their
/// integer part and the damage range upper bound grows by the whole factor.
pub fn scaled_stats(enemy: &EnemySettings, depth: u32) -> Stats {
    let factor = depth_factor(depth);
    let mut stats = Stats::new(
        (enemy.health as f64 * factor) as i32,
        (enemy.strength as f64 * factor) as i32,
    );
    stats.damage_range = (enemy.damage_range.0, enemy.damage_range.1 + factor as i32);
    stats.toughness = enemy.toughness;
    stats
}

/// Picks at most one trait, each with its configured probability. Whatever
/// probability is left over means no trait.
pub fn roll_trait<R: Rng + ?Sized>(traits: &BTreeMap<Trait, f64>, rng: &mut R) -> Option<Trait> {
    let roll: f64 = rng.gen();
    let mut cumulative = 0.0;
    for (&candidate, &weight) in traits {
        cumulative += weight;
        if roll < cumulative {
            return Some(candidate);
        }
    }
    None
}

/// Spawns one enemy of `species` at `position`.
pub fn spawn_enemy(
    world: &mut World,
    species: Species,
    enemy: &EnemySettings,
    position: Vector,
) -> EntityId {
    let depth = world.depth();
    let carried_trait = roll_trait(&enemy.traits, world.rng());
    let (low, high) = enemy.size_range;
    let size = world.rng().gen_range(low..=high);

    let mut stats = scaled_stats(enemy, depth);
    if let Some(carried) = carried_trait {
        stats = stats.acquire_trait(carried);
    }

    world.spawn(
        EntityRecord::new()
            .with_position(position)
            .with_name(species.name())
            .with_tags(&[Tag::Enemy, Tag::Actor, Tag::Solid, species.tag()])
            .with_graphic(enemy.graphic)
            .with_stats(stats)
            .with_strategy(Strategy::for_species(species))
            .with_size(size)
            .with_trait(carried_trait),
    )
}
