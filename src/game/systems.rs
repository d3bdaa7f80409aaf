//! # Turn Systems
//!
//! The pieces of the turn pipeline that act on a single level: movement with
//! collision classification, melee damage, eating, enemy turns, the death
//! sweep and the camera follow. Level transitions belong to
//! [`GameState`](crate::GameState) since they replace the whole world.

use crate::{
    corpse_record, move_inside, BoundingBox, BurrowError, BurrowResult, EntityId, Graphic, Stats,
    Tag, Vector, World,
};
use rand::Rng;

/// What an attempted move ran into.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollisionReport {
    /// The cell the entity tried to enter
    pub target: Vector,
    /// Whether the entity now stands on `target`
    pub moved: bool,
    /// Solid occupants that blocked the move
    pub obstacles: Vec<EntityId>,
    /// Non-solid occupants of the target cell
    pub occupants: Vec<EntityId>,
}

impl CollisionReport {
    /// Whether the move met nothing at all.
    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty() && self.occupants.is_empty()
    }
}

/// Attempts to move `entity` by `direction`.
///
/// A wall or off-map target leaves the entity in place and reports nothing.
/// Any Solid occupant blocks the move and is listed in
/// [`CollisionReport::obstacles`]; otherwise a nonzero move goes ahead and
/// the remaining occupants are listed for the caller to trigger or eat.
pub fn collide_entity(
    world: &mut World,
    entity: EntityId,
    direction: Vector,
) -> BurrowResult<CollisionReport> {
    let position = world
        .position(entity)
        .ok_or(BurrowError::EntityNotFound(entity))?;
    let target = position + direction;
    let mut report = CollisionReport {
        target,
        ..CollisionReport::default()
    };

    if world.map().is_blocked(target) {
        return Ok(report);
    }

    let (obstacles, occupants): (Vec<EntityId>, Vec<EntityId>) = world
        .entities_at(target)
        .into_iter()
        .filter(|&id| id != entity)
        .partition(|&id| world.has_tag(id, Tag::Solid));
    report.obstacles = obstacles;
    report.occupants = occupants;

    if report.obstacles.is_empty() && !direction.is_zero() {
        world.set_position(entity, target)?;
        report.moved = true;
    }
    Ok(report)
}

/// Damage an attack deals before the random bonus is drawn: strength plus
/// venom plus `bonus`, less toughness, never below zero nor above the
/// defender's remaining health.
///
/// # Examples
///
/// ```
/// use burrow::{compute_damage, Stats};
///
/// let attacker = Stats::new(10, 4);
/// let mut defender = Stats::new(3, 1);
/// assert_eq!(compute_damage(&attacker, &defender, 0), 3);
/// defender.toughness = 9;
/// assert_eq!(compute_damage(&attacker, &defender, 0), 0);
/// ```
pub fn compute_damage(attacker: &Stats, defender: &Stats, bonus: i32) -> i32 {
    let raw = attacker.strength + attacker.venom + bonus - defender.toughness;
    raw.clamp(0, defender.health.max(0))
}

/// Draws the random bonus from `[low, high)`, or `low` for an empty range.
pub fn roll_bonus<R: Rng + ?Sized>(damage_range: (i32, i32), rng: &mut R) -> i32 {
    let (low, high) = damage_range;
    if low < high {
        rng.gen_range(low..high)
    } else {
        low
    }
}

/// Resolves a melee hit of `attacker` on `defender` and returns the attacker.
///
/// Nothing happens unless both carry stats. A toxic defender poisons an
/// attacker that managed to hurt it.
pub fn handle_collision(
    world: &mut World,
    attacker: EntityId,
    defender: EntityId,
) -> BurrowResult<EntityId> {
    let (attacker_stats, defender_stats) = match (world.stats(attacker), world.stats(defender)) {
        (Some(a), Some(d)) => (a, d),
        _ => return Ok(attacker),
    };

    let bonus = roll_bonus(attacker_stats.damage_range, world.rng());
    let damage = compute_damage(&attacker_stats, &defender_stats, bonus);
    world.set_stats(defender, defender_stats.with_health(defender_stats.health - damage))?;

    let attacker_name = world.name(attacker);
    let defender_name = world.name(defender);
    log::debug!("{} hit {} for {} ({} bonus)", attacker_name, defender_name, damage, bonus);
    world.log(format!("{} hit {} for {} damage", attacker_name, defender_name, damage));

    if damage > 0 && defender_stats.toxicity > 0 {
        let poison = defender_stats.toxicity.min(attacker_stats.health.max(0));
        world.set_stats(attacker, attacker_stats.with_health(attacker_stats.health - poison))?;
        let verb = if world.has_tag(attacker, Tag::Player) { "are" } else { "is" };
        world.log(format!("{} {} poisoned for {} damage", attacker_name, verb, poison));
    }
    Ok(attacker)
}

/// Resolves resting on a cell shared with `occupant`: eating it if edible.
/// Returns whether anything was eaten.
pub fn handle_rest(world: &mut World, entity: EntityId, occupant: EntityId) -> BurrowResult<bool> {
    if world.has_tag(occupant, Tag::Edible) && world.stats(entity).is_some() {
        digest(world, entity, occupant)?;
        Ok(true)
    } else {
        Ok(false)
    }
}

/// Lets `eater` take one turn's worth of `corpse`.
///
/// Healing is twice the amount eaten. A fully eaten corpse disappears and
/// grants the trait it carried.
pub fn digest(world: &mut World, eater: EntityId, corpse: EntityId) -> BurrowResult<()> {
    let stats = world
        .stats(eater)
        .ok_or(BurrowError::EntityNotFound(eater))?;
    let (remaining, carried_trait) = {
        let record = world
            .get(corpse)
            .ok_or(BurrowError::EntityNotFound(corpse))?;
        (record.size.unwrap_or(0).max(0), record.carried_trait)
    };

    let eaten = stats.digestion.max(0).min(remaining);
    let mut fed = stats.healed(2 * eaten);
    let left = remaining - eaten;
    let eater_name = world.name(eater);
    let corpse_name = world.name(corpse);
    world.log(format!("{} ate some of the {}", eater_name, corpse_name));

    if left == 0 {
        world.despawn(corpse);
        world.log(format!("{} finished the {}", eater_name, corpse_name));
        if let Some(carried) = carried_trait {
            fed = fed.acquire_trait(carried);
            world.log(format!("{} gained {}", eater_name, carried));
        }
    } else if let Some(record) = world.get_mut(corpse) {
        record.size = Some(left);
    }
    world.set_stats(eater, fed)
}

/// Moves every living enemy, then advances every enemy's strategy.
///
/// All moves and attacks of a turn happen before any strategy changes, so no
/// enemy reacts to another's transition within the same turn.
pub fn enemy_turns(world: &mut World, player: EntityId) -> BurrowResult<()> {
    let enemies = world.query(&[Tag::Enemy]);

    for &enemy in &enemies {
        if !is_alive(world, enemy) {
            continue;
        }
        let strategy = world
            .get(enemy)
            .and_then(|record| record.strategy)
            .ok_or_else(|| BurrowError::MissingStrategy {
                name: world.name(enemy),
            })?;
        let direction = strategy.movement(world, enemy, player)?;
        let report = collide_entity(world, enemy, direction)?;
        for obstacle in report.obstacles {
            handle_collision(world, enemy, obstacle)?;
        }
    }

    for &enemy in &enemies {
        if !is_alive(world, enemy) {
            continue;
        }
        let strategy = world
            .get(enemy)
            .and_then(|record| record.strategy)
            .ok_or_else(|| BurrowError::MissingStrategy {
                name: world.name(enemy),
            })?;
        let next = strategy.advance(world, enemy, player)?;
        if let Some(record) = world.get_mut(enemy) {
            record.strategy = Some(next);
        }
    }
    Ok(())
}

fn is_alive(world: &World, entity: EntityId) -> bool {
    world.contains(entity) && !world.stats(entity).map(|s| s.is_dead()).unwrap_or(false)
}

/// Replaces every dead enemy with a corpse and returns how many died.
pub fn sweep_dead(world: &mut World, corpse_graphic: Graphic) -> BurrowResult<u32> {
    let mut killed = 0;
    for enemy in world.query(&[Tag::Enemy]) {
        if world.stats(enemy).map(|stats| stats.is_dead()).unwrap_or(false) {
            kill(world, enemy, corpse_graphic)?;
            killed += 1;
        }
    }
    Ok(killed)
}

/// Removes a dead enemy, leaving a corpse in its place. Returns the corpse.
pub fn kill(
    world: &mut World,
    enemy: EntityId,
    corpse_graphic: Graphic,
) -> BurrowResult<Option<EntityId>> {
    if world.has_tag(enemy, Tag::Player) {
        return Ok(None);
    }
    let record = world
        .despawn(enemy)
        .ok_or(BurrowError::EntityNotFound(enemy))?;
    let name = record.name.clone().unwrap_or_else(|| "(unnamed)".to_string());
    world.log(format!("{} died", name));
    log::debug!("{} {} died", name, enemy);

    let position = match record.position() {
        Some(position) if record.tags.contains(&Tag::Enemy) => position,
        _ => return Ok(None),
    };
    let corpse = world.spawn(corpse_record(
        &name,
        position,
        record.size.unwrap_or(0),
        record.carried_trait,
        corpse_graphic,
    ));
    Ok(Some(corpse))
}

/// Slides the camera along each axis of `delta` on which the player has
/// left its tracking box in the direction of travel, keeping the view inside
/// the map.
pub fn move_camera(world: &mut World, player: EntityId, delta: Vector) -> BurrowResult<()> {
    let (camera_id, camera, position) = match world.camera() {
        Some(camera) => camera,
        None => return Ok(()),
    };
    let player_position = world
        .position(player)
        .ok_or(BurrowError::EntityNotFound(player))?;
    let tracking = camera.tracking_box(position);
    let shift = Vector::new(
        axis_shift(delta.x, player_position.x, tracking.left(), tracking.right()),
        axis_shift(delta.y, player_position.y, tracking.top(), tracking.bottom()),
    );
    if shift.is_zero() {
        return Ok(());
    }

    let view = camera.bounding_box(position + shift);
    let view = move_inside(view, world.map().bounds())?;
    world.set_position(camera_id, view.top_left)
}

fn axis_shift(delta: i32, at: i32, low: i32, high: i32) -> i32 {
    if (delta > 0 && at > high) || (delta < 0 && at < low) {
        delta
    } else {
        0
    }
}

/// Places the camera so the view is centered on the player, inside the map.
pub fn center_camera(world: &mut World, player: EntityId) -> BurrowResult<()> {
    let (camera_id, camera, _) = match world.camera() {
        Some(camera) => camera,
        None => return Ok(()),
    };
    let player_position = world
        .position(player)
        .ok_or(BurrowError::EntityNotFound(player))?;
    let view = BoundingBox::centered(player_position, camera.height, camera.width);
    let view = move_inside(view, world.map().bounds())?;
    world.set_position(camera_id, view.top_left)
}
