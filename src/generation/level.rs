//! # Level Assembly
//!
//! Builds a complete level: carves the cave, places the player and the hole
//! in diagonally opposite quadrants, scatters the enemies and centers the
//! camera on the player.

use crate::config::{ENEMIES_PER_KIND, MAX_LEVEL_ATTEMPTS};
use crate::{
    center_camera, spawn_enemy, spawn_hole, BurrowError, BurrowResult, CaveGenerator, EntityId,
    EntityRecord, Generator, Graphic, MessageLog, Settings, Stats, Tag, Vector, World,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// The name the player goes by in messages.
pub const PLAYER_NAME: &str = "you";

/// One quarter of the map, split at its center.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quadrant {
    NorthWest,
    NorthEast,
    SouthWest,
    SouthEast,
}

impl Quadrant {
    pub const ALL: [Quadrant; 4] = [
        Quadrant::NorthWest,
        Quadrant::NorthEast,
        Quadrant::SouthWest,
        Quadrant::SouthEast,
    ];

    /// The diagonally opposite quadrant.
    pub fn opposite(self) -> Quadrant {
        match self {
            Quadrant::NorthWest => Quadrant::SouthEast,
            Quadrant::NorthEast => Quadrant::SouthWest,
            Quadrant::SouthWest => Quadrant::NorthEast,
            Quadrant::SouthEast => Quadrant::NorthWest,
        }
    }

    /// Whether `point` falls in this quadrant of a map centered on `center`.
    pub fn contains(self, point: Vector, center: Vector) -> bool {
        let west = point.x < center.x;
        let north = point.y < center.y;
        match self {
            Quadrant::NorthWest => west && north,
            Quadrant::NorthEast => !west && north,
            Quadrant::SouthWest => west && !north,
            Quadrant::SouthEast => !west && !north,
        }
    }
}

/// A freshly assembled level.
#[derive(Debug, Clone)]
pub struct Level {
    pub world: World,
    pub player: EntityId,
}

/// Assembles the level at `depth`.
///
/// The world's own RNG is seeded from `rng`, so retrying with the same
/// generator continues the same deterministic sequence. The player starts
/// with `carried_stats` when descending, or fresh stats from the settings.
pub fn assemble_level(
    settings: &Settings,
    depth: u32,
    rng: &mut StdRng,
    messages: &MessageLog,
    carried_stats: Option<Stats>,
) -> BurrowResult<Level> {
    let generator = CaveGenerator::new(
        settings.map.height,
        settings.map.width,
        settings.map.wall_threshold,
        true,
    );
    let mut level_rng = StdRng::seed_from_u64(rng.gen());
    let map = generator.generate(&mut level_rng)?;
    generator.validate(&map)?;

    let center = map.bounds().center();
    let mut free = map.floor_positions();
    let mut world = World::new(map, level_rng, depth, messages.clone());

    let quadrant = Quadrant::ALL[world.rng().gen_range(0..Quadrant::ALL.len())];
    let player_position = take_in_quadrant(&mut world, &mut free, quadrant, center)?;
    let hole_position = take_in_quadrant(&mut world, &mut free, quadrant.opposite(), center)?;

    let stats = carried_stats
        .unwrap_or_else(|| Stats::new(settings.player.health, settings.player.strength));
    let player = world.spawn(
        EntityRecord::new()
            .with_position(player_position)
            .with_name(PLAYER_NAME)
            .with_tags(&[Tag::Player, Tag::Actor, Tag::Solid])
            .with_graphic(settings.player.graphic)
            .with_stats(stats),
    );
    spawn_hole(&mut world, hole_position, settings.hole.graphic);

    let mut spawned = 0;
    for (species, enemy) in settings.species()? {
        for _ in 0..ENEMIES_PER_KIND {
            if free.is_empty() {
                break;
            }
            let index = world.rng().gen_range(0..free.len());
            let position = free.swap_remove(index);
            spawn_enemy(&mut world, species, enemy, position);
            spawned += 1;
        }
    }

    let mut camera = EntityRecord::new()
        .with_position(Vector::zero())
        .with_camera(settings.camera);
    if settings.debug {
        camera = camera.with_graphic(Graphic::new('+', [255, 0, 0]));
    }
    world.spawn(camera);
    center_camera(&mut world, player)?;

    log::info!(
        "assembled depth {}: player in {:?}, {} enemies, {} free cells left",
        depth,
        quadrant,
        spawned,
        free.len()
    );
    Ok(Level { world, player })
}

/// Assembles a level, regenerating the cave when an attempt cannot place
/// the player or the hole.
pub fn assemble_level_with_retries(
    settings: &Settings,
    depth: u32,
    rng: &mut StdRng,
    messages: &MessageLog,
    carried_stats: Option<Stats>,
) -> BurrowResult<Level> {
    let mut last_error = None;
    for attempt in 1..=MAX_LEVEL_ATTEMPTS {
        match assemble_level(settings, depth, rng, messages, carried_stats) {
            Ok(level) => return Ok(level),
            Err(BurrowError::GenerationFailed(reason)) => {
                log::warn!(
                    "level generation attempt {}/{} failed: {}",
                    attempt,
                    MAX_LEVEL_ATTEMPTS,
                    reason
                );
                last_error = Some(reason);
            }
            Err(other) => return Err(other),
        }
    }
    Err(BurrowError::GenerationFailed(format!(
        "no usable level after {} attempts: {}",
        MAX_LEVEL_ATTEMPTS,
        last_error.unwrap_or_default()
    )))
}

fn take_in_quadrant(
    world: &mut World,
    free: &mut Vec<Vector>,
    quadrant: Quadrant,
    center: Vector,
) -> BurrowResult<Vector> {
    let candidates: Vec<usize> = free
        .iter()
        .enumerate()
        .filter(|(_, &cell)| quadrant.contains(cell, center))
        .map(|(index, _)| index)
        .collect();
    if candidates.is_empty() {
        return Err(BurrowError::GenerationFailed(format!(
            "no free cell in the {:?} quadrant",
            quadrant
        )));
    }
    let index = candidates[world.rng().gen_range(0..candidates.len())];
    Ok(free.remove(index))
}
