//! # Enemy AI
//!
//! One finite-state machine per enemy archetype. Each turn an enemy first
//! asks its [`Strategy`] for a movement against the current state, and only
//! after every enemy has moved does it commit the strategy returned by
//! [`Strategy::next_state`].

use crate::{
    in_sight, BurrowError, BurrowResult, EntityId, Pathfinder, Species, Tag, Vector, World,
};
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::mem;

pub const SPIDER_ALERT_RADIUS: u32 = 20;
pub const SPIDER_WAIT_TURNS: u32 = 4;
pub const PILLBUG_PERSEVERANCE: u32 = 3;
pub const BEETLE_ALERT_RADIUS: u32 = 5;
pub const BEETLE_PERSEVERANCE: u32 = 2;

const CARDINAL_STEPS: [Vector; 4] = [
    Vector::new(0, -1),
    Vector::new(0, 1),
    Vector::new(-1, 0),
    Vector::new(1, 0),
];

const BEETLE_LEAPS: [Vector; 4] = [
    Vector::new(2, 0),
    Vector::new(-2, 0),
    Vector::new(0, 2),
    Vector::new(0, -2),
];

/// What an enemy is currently doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AiState {
    Wandering,
    Hunting,
    Fighting,
    /// Idle for the given number of further turns
    Waiting(u32),
}

impl AiState {
    fn same_phase(self, other: AiState) -> bool {
        mem::discriminant(&self) == mem::discriminant(&other)
    }
}

/// Fresh observations of the player taken from an enemy's cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Perception {
    /// The player's cell lies in the enemy's field of view
    pub visible: bool,
    /// Exactly one axis delta to the player has magnitude one
    pub adjacent: bool,
    pub injured: bool,
    /// Manhattan distance to the player
    pub distance: i32,
}

impl Perception {
    /// Observes `player` from `entity`. Visibility is only computed when an
    /// alert radius is given, shrunk by the player's camouflage.
    pub fn observe(
        world: &World,
        entity: EntityId,
        player: EntityId,
        alert_radius: Option<u32>,
    ) -> BurrowResult<Self> {
        let position = world
            .position(entity)
            .ok_or(BurrowError::EntityNotFound(entity))?;
        let target = world
            .position(player)
            .ok_or(BurrowError::EntityNotFound(player))?;
        let delta = target - position;

        let visible = match alert_radius {
            Some(radius) => {
                let camouflage = world
                    .stats(player)
                    .map(|stats| stats.camouflage.max(0) as u32)
                    .unwrap_or(0);
                in_sight(world.map(), position, target, radius.saturating_sub(camouflage))
            }
            None => false,
        };

        Ok(Self {
            visible,
            adjacent: (delta.x.abs() == 1) ^ (delta.y.abs() == 1),
            injured: world
                .stats(entity)
                .map(|stats| stats.is_injured())
                .unwrap_or(false),
            distance: delta.manhattan(),
        })
    }
}

/// Ambush hunter: pursues anything it can see within a wide radius.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpiderStrategy {
    pub state: AiState,
    pub alert_radius: u32,
}

impl Default for SpiderStrategy {
    fn default() -> Self {
        Self {
            state: AiState::Wandering,
            alert_radius: SPIDER_ALERT_RADIUS,
        }
    }
}

impl SpiderStrategy {
    fn next_state(&self, seen: &Perception) -> Self {
        let state = match self.state {
            AiState::Wandering if seen.visible => AiState::Hunting,
            AiState::Wandering => AiState::Wandering,
            AiState::Hunting if seen.adjacent => AiState::Fighting,
            AiState::Hunting if !seen.visible => AiState::Waiting(SPIDER_WAIT_TURNS),
            AiState::Hunting => AiState::Hunting,
            AiState::Fighting if !seen.adjacent => AiState::Hunting,
            AiState::Fighting => AiState::Fighting,
            AiState::Waiting(_) if seen.visible => AiState::Hunting,
            AiState::Waiting(turns) => count_down(turns),
        };
        Self {
            state,
            alert_radius: self.alert_radius,
        }
    }
}

/// Passive grazer that only fights back once hurt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PillbugStrategy {
    pub state: AiState,
    pub perseverance: u32,
}

impl Default for PillbugStrategy {
    fn default() -> Self {
        Self {
            state: AiState::Wandering,
            perseverance: PILLBUG_PERSEVERANCE,
        }
    }
}

impl PillbugStrategy {
    fn next_state(&self, seen: &Perception) -> Self {
        let provoked = seen.adjacent && seen.injured;
        let (state, perseverance) = match self.state {
            AiState::Wandering if provoked => (AiState::Fighting, self.perseverance),
            AiState::Wandering => (AiState::Waiting(0), self.perseverance),
            AiState::Waiting(_) if provoked => (AiState::Fighting, self.perseverance),
            AiState::Waiting(turns) => (count_down(turns), self.perseverance),
            AiState::Hunting | AiState::Fighting => pursue(self.state, seen, self.perseverance),
        };
        Self {
            state,
            perseverance: settle_perseverance(
                self.state,
                state,
                perseverance,
                PILLBUG_PERSEVERANCE,
            ),
        }
    }
}

/// Territorial charger that lunges two cells at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BeetleStrategy {
    pub state: AiState,
    pub alert_radius: u32,
    pub perseverance: u32,
}

impl Default for BeetleStrategy {
    fn default() -> Self {
        Self {
            state: AiState::Wandering,
            alert_radius: BEETLE_ALERT_RADIUS,
            perseverance: BEETLE_PERSEVERANCE,
        }
    }
}

impl BeetleStrategy {
    fn next_state(&self, seen: &Perception) -> Self {
        let near = seen.distance < self.alert_radius as i32;
        let (state, perseverance) = match self.state {
            AiState::Wandering if near => (AiState::Hunting, self.perseverance),
            AiState::Wandering => (AiState::Waiting(0), self.perseverance),
            AiState::Waiting(_) if near => (AiState::Hunting, self.perseverance),
            AiState::Waiting(turns) => (count_down(turns), self.perseverance),
            AiState::Hunting | AiState::Fighting => pursue(self.state, seen, self.perseverance),
        };
        Self {
            state,
            alert_radius: self.alert_radius,
            perseverance: settle_perseverance(
                self.state,
                state,
                perseverance,
                BEETLE_PERSEVERANCE,
            ),
        }
    }
}

fn count_down(turns: u32) -> AiState {
    if turns > 0 {
        AiState::Waiting(turns - 1)
    } else {
        AiState::Wandering
    }
}

/// Hunting and Fighting rules shared by the persevering archetypes.
fn pursue(state: AiState, seen: &Perception, perseverance: u32) -> (AiState, u32) {
    match state {
        AiState::Fighting if !seen.adjacent => (AiState::Hunting, perseverance),
        AiState::Hunting if seen.adjacent => (AiState::Fighting, perseverance),
        AiState::Hunting if perseverance == 0 => (AiState::Wandering, perseverance),
        AiState::Hunting => (AiState::Hunting, perseverance - 1),
        other => (other, perseverance),
    }
}

/// A change of phase restores the archetype's full perseverance.
fn settle_perseverance(from: AiState, to: AiState, perseverance: u32, default: u32) -> u32 {
    if from.same_phase(to) {
        perseverance
    } else {
        default
    }
}

/// The behaviour attached to every enemy.
///
/// # Examples
///
/// ```
/// use burrow::{AiState, Perception, Species, Strategy};
///
/// let spider = Strategy::for_species(Species::Spider);
/// let seen = Perception { visible: true, ..Perception::default() };
/// assert_eq!(spider.next_state(&seen).state(), AiState::Hunting);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Strategy {
    Spider(SpiderStrategy),
    Pillbug(PillbugStrategy),
    Beetle(BeetleStrategy),
}

impl Strategy {
    /// The starting strategy for a species. Centipedes hunt like spiders.
    pub fn for_species(species: Species) -> Self {
        match species {
            Species::Spider | Species::Centipede => Strategy::Spider(SpiderStrategy::default()),
            Species::Pillbug => Strategy::Pillbug(PillbugStrategy::default()),
            Species::Beetle => Strategy::Beetle(BeetleStrategy::default()),
        }
    }

    pub fn state(&self) -> AiState {
        match self {
            Strategy::Spider(spider) => spider.state,
            Strategy::Pillbug(pillbug) => pillbug.state,
            Strategy::Beetle(beetle) => beetle.state,
        }
    }

    /// Radius used for the visibility check, if this strategy looks at all.
    pub fn alert_radius(&self) -> Option<u32> {
        match self {
            Strategy::Spider(spider) => Some(spider.alert_radius),
            Strategy::Pillbug(_) => None,
            Strategy::Beetle(_) => None,
        }
    }

    /// The strategy for the next turn given what the enemy perceives now.
    pub fn next_state(&self, seen: &Perception) -> Strategy {
        match self {
            Strategy::Spider(spider) => Strategy::Spider(spider.next_state(seen)),
            Strategy::Pillbug(pillbug) => Strategy::Pillbug(pillbug.next_state(seen)),
            Strategy::Beetle(beetle) => Strategy::Beetle(beetle.next_state(seen)),
        }
    }

    /// Observes the player and returns the strategy for the next turn.
    pub fn advance(
        &self,
        world: &World,
        entity: EntityId,
        player: EntityId,
    ) -> BurrowResult<Strategy> {
        let seen = Perception::observe(world, entity, player, self.alert_radius())?;
        let next = self.next_state(&seen);
        if next.state() != self.state() {
            log::debug!(
                "{} {}: {:?} -> {:?}",
                world.name(entity),
                entity,
                self.state(),
                next.state()
            );
        }
        Ok(next)
    }

    /// The displacement `entity` attempts this turn.
    pub fn movement(
        &self,
        world: &mut World,
        entity: EntityId,
        player: EntityId,
    ) -> BurrowResult<Vector> {
        let position = world
            .position(entity)
            .ok_or(BurrowError::EntityNotFound(entity))?;
        let target = world
            .position(player)
            .ok_or(BurrowError::EntityNotFound(player))?;

        let delta = match (self, self.state()) {
            (_, AiState::Waiting(_)) => Vector::zero(),
            (Strategy::Beetle(_), AiState::Hunting) => move_towards(world, position, target, 2),
            (_, AiState::Hunting) | (_, AiState::Fighting) => {
                move_towards(world, position, target, 1)
            }
            (Strategy::Beetle(_), AiState::Wandering) => {
                let steps: Vec<Vector> = CARDINAL_STEPS
                    .iter()
                    .chain(BEETLE_LEAPS.iter())
                    .copied()
                    .collect();
                wander(world, position, player, &steps)
            }
            (_, AiState::Wandering) => wander(world, position, player, &CARDINAL_STEPS),
        };
        Ok(delta)
    }
}

/// One step of the shortest path from `from` towards `to`, blocking every
/// cell held by a Solid entity except the destination itself.
pub fn move_towards(world: &World, from: Vector, to: Vector, distance: usize) -> Vector {
    let mut pathfinder = Pathfinder::new(world.map());
    for solid in world.query(&[Tag::Solid]) {
        if let Some(position) = world.position(solid) {
            if position != to && position != from {
                pathfinder.block(position);
            }
        }
    }
    pathfinder.step_towards(from, to, distance)
}

/// Whether an enemy at `from` may wander by `step`: the target is on the
/// map, not a wall, and not held by a Solid entity other than the player.
pub fn can_move(world: &World, from: Vector, step: Vector, player: EntityId) -> bool {
    let target = from + step;
    !world.map().is_blocked(target) && !world.is_occupied_by_solid(target, &[player])
}

fn wander(world: &mut World, from: Vector, player: EntityId, steps: &[Vector]) -> Vector {
    let legal: Vec<Vector> = steps
        .iter()
        .copied()
        .filter(|&step| can_move(world, from, step, player))
        .collect();
    legal.choose(world.rng()).copied().unwrap_or_else(Vector::zero)
}
