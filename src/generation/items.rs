//! # Item Placement
//!
//! Records for the non-actor entities of a level: the hole leading down and
//! the corpses left by dead enemies.

use crate::{EntityId, EntityRecord, Graphic, Tag, Trait, Vector, World};

/// The name every hole carries.
pub const HOLE_NAME: &str = "hole";

/// Spawns the hole that leads to the next depth.
pub fn spawn_hole(world: &mut World, position: Vector, graphic: Graphic) -> EntityId {
    world.spawn(
        EntityRecord::new()
            .with_position(position)
            .with_name(HOLE_NAME)
            .with_tags(&[Tag::Item, Tag::Hole])
            .with_graphic(graphic),
    )
}

/// A corpse of `name` that can be eaten `size` times over and passes on
/// `carried_trait` to whoever finishes it.
pub fn corpse_record(
    name: &str,
    position: Vector,
    size: i32,
    carried_trait: Option<Trait>,
    graphic: Graphic,
) -> EntityRecord {
    EntityRecord::new()
        .with_position(position)
        .with_name(format!("{} corpse", name))
        .with_tags(&[Tag::Item, Tag::Edible])
        .with_graphic(graphic)
        .with_size(size)
        .with_trait(carried_trait)
}
