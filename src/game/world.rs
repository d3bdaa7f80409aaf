//! # World Store
//!
//! Entity identities with their typed components and tags, a spatial index
//! from cell to occupants, and the world-global resources of one level: the
//! map, the random number generator, the depth and the message log.

use crate::{
    new_entity_id, Camera, EntityId, Graphic, Map, MessageLog, Stats, Strategy, Tag, Trait,
    BurrowError, BurrowResult, Vector,
};
use rand::rngs::StdRng;
use std::collections::{BTreeSet, HashMap};

/// The components and tags of a single entity.
///
/// Built with the `with_*` methods before it is handed to
/// [`World::spawn`]. The position is private so it can only change through
/// [`World::set_position`], which keeps the spatial index in step.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntityRecord {
    position: Option<Vector>,
    pub tags: BTreeSet<Tag>,
    pub name: Option<String>,
    pub graphic: Option<Graphic>,
    pub stats: Option<Stats>,
    pub strategy: Option<Strategy>,
    /// Remaining food for corpses, body size for the living
    pub size: Option<i32>,
    pub carried_trait: Option<Trait>,
    pub camera: Option<Camera>,
}

impl EntityRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn position(&self) -> Option<Vector> {
        self.position
    }

    pub fn with_position(mut self, position: Vector) -> Self {
        self.position = Some(position);
        self
    }

    pub fn with_tags(mut self, tags: &[Tag]) -> Self {
        self.tags.extend(tags.iter().copied());
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_graphic(mut self, graphic: Graphic) -> Self {
        self.graphic = Some(graphic);
        self
    }

    pub fn with_stats(mut self, stats: Stats) -> Self {
        self.stats = Some(stats);
        self
    }

    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = Some(strategy);
        self
    }

    pub fn with_size(mut self, size: i32) -> Self {
        self.size = Some(size);
        self
    }

    pub fn with_trait(mut self, carried_trait: Option<Trait>) -> Self {
        self.carried_trait = carried_trait;
        self
    }

    pub fn with_camera(mut self, camera: Camera) -> Self {
        self.camera = Some(camera);
        self
    }
}

/// All entities of one level plus the level's global resources.
#[derive(Debug, Clone)]
pub struct World {
    map: Map,
    entities: HashMap<EntityId, EntityRecord>,
    /// Live identities in spawn order; queries iterate this
    spawn_order: Vec<EntityId>,
    position_index: HashMap<Vector, Vec<EntityId>>,
    rng: StdRng,
    depth: u32,
    messages: MessageLog,
}

impl World {
    /// Creates an empty world over `map`.
    pub fn new(map: Map, rng: StdRng, depth: u32, messages: MessageLog) -> Self {
        Self {
            map,
            entities: HashMap::new(),
            spawn_order: Vec::new(),
            position_index: HashMap::new(),
            rng,
            depth,
            messages,
        }
    }

    pub fn map(&self) -> &Map {
        &self.map
    }

    pub fn rng(&mut self) -> &mut StdRng {
        &mut self.rng
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    pub fn messages(&self) -> &MessageLog {
        &self.messages
    }

    /// Appends a player-facing message.
    pub fn log(&mut self, message: impl AsRef<str>) {
        self.messages.log(message);
    }

    /// Adds an entity and returns its new identity.
    pub fn spawn(&mut self, record: EntityRecord) -> EntityId {
        let mut id = new_entity_id(&mut self.rng);
        while self.entities.contains_key(&id) {
            id = new_entity_id(&mut self.rng);
        }
        if let Some(position) = record.position.filter(|_| record.camera.is_none()) {
            self.index_insert(id, position);
        }
        self.entities.insert(id, record);
        self.spawn_order.push(id);
        id
    }

    /// Removes an entity, returning its record if it existed.
    pub fn despawn(&mut self, id: EntityId) -> Option<EntityRecord> {
        let record = self.entities.remove(&id)?;
        if let Some(position) = record.position {
            self.index_remove(id, position);
        }
        self.spawn_order.retain(|&other| other != id);
        Some(record)
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.entities.contains_key(&id)
    }

    pub fn get(&self, id: EntityId) -> Option<&EntityRecord> {
        self.entities.get(&id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut EntityRecord> {
        self.entities.get_mut(&id)
    }

    fn record(&self, id: EntityId) -> BurrowResult<&EntityRecord> {
        self.entities.get(&id).ok_or(BurrowError::EntityNotFound(id))
    }

    fn record_mut(&mut self, id: EntityId) -> BurrowResult<&mut EntityRecord> {
        self.entities
            .get_mut(&id)
            .ok_or(BurrowError::EntityNotFound(id))
    }

    pub fn position(&self, id: EntityId) -> Option<Vector> {
        self.entities.get(&id).and_then(|record| record.position)
    }

    /// Moves an entity, updating the spatial index.
    ///
    /// The camera is not an occupant of the cell it sits on, so it never
    /// enters the index.
    pub fn set_position(&mut self, id: EntityId, position: Vector) -> BurrowResult<()> {
        let record = self.record(id)?;
        let old = record.position;
        let indexed = record.camera.is_none();
        if let Some(old) = old {
            self.index_remove(id, old);
        }
        self.record_mut(id)?.position = Some(position);
        if indexed {
            self.index_insert(id, position);
        }
        Ok(())
    }

    pub fn stats(&self, id: EntityId) -> Option<Stats> {
        self.entities.get(&id).and_then(|record| record.stats)
    }

    pub fn set_stats(&mut self, id: EntityId, stats: Stats) -> BurrowResult<()> {
        self.record_mut(id)?.stats = Some(stats);
        Ok(())
    }

    /// The entity's name, or a placeholder for unnamed entities.
    pub fn name(&self, id: EntityId) -> String {
        self.entities
            .get(&id)
            .and_then(|record| record.name.clone())
            .unwrap_or_else(|| "(unnamed)".to_string())
    }

    pub fn add_tag(&mut self, id: EntityId, tag: Tag) -> BurrowResult<()> {
        self.record_mut(id)?.tags.insert(tag);
        Ok(())
    }

    pub fn remove_tag(&mut self, id: EntityId, tag: Tag) -> BurrowResult<()> {
        self.record_mut(id)?.tags.remove(&tag);
        Ok(())
    }

    /// Whether the entity exists and carries `tag`.
    pub fn has_tag(&self, id: EntityId, tag: Tag) -> bool {
        self.entities
            .get(&id)
            .map(|record| record.tags.contains(&tag))
            .unwrap_or(false)
    }

    /// Every entity carrying all of `tags`, in spawn order.
    pub fn query(&self, tags: &[Tag]) -> Vec<EntityId> {
        self.spawn_order
            .iter()
            .copied()
            .filter(|id| {
                self.entities
                    .get(id)
                    .map(|record| tags.iter().all(|tag| record.tags.contains(tag)))
                    .unwrap_or(false)
            })
            .collect()
    }

    /// Every entity occupying `position`.
    pub fn entities_at(&self, position: Vector) -> Vec<EntityId> {
        self.position_index
            .get(&position)
            .cloned()
            .unwrap_or_default()
    }

    /// Whether any Solid entity other than those in `except` occupies
    /// `position`.
    pub fn is_occupied_by_solid(&self, position: Vector, except: &[EntityId]) -> bool {
        self.position_index
            .get(&position)
            .map(|ids| {
                ids.iter()
                    .any(|id| !except.contains(id) && self.has_tag(*id, Tag::Solid))
            })
            .unwrap_or(false)
    }

    /// The camera entity with its component and position.
    pub fn camera(&self) -> Option<(EntityId, Camera, Vector)> {
        self.spawn_order.iter().find_map(|&id| {
            let record = self.entities.get(&id)?;
            Some((id, record.camera?, record.position?))
        })
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    fn index_insert(&mut self, id: EntityId, position: Vector) {
        self.position_index.entry(position).or_default().push(id);
    }

    fn index_remove(&mut self, id: EntityId, position: Vector) {
        if let Some(ids) = self.position_index.get_mut(&position) {
            ids.retain(|&other| other != id);
            if ids.is_empty() {
                self.position_index.remove(&position);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn world() -> World {
        World::new(Map::open(5, 5), StdRng::seed_from_u64(1), 0, MessageLog::new())
    }

    #[test]
    fn test_spawn_indexes_position() {
        let mut world = world();
        let id = world.spawn(
            EntityRecord::new()
                .with_position(Vector::new(2, 3))
                .with_tags(&[Tag::Solid]),
        );
        assert_eq!(world.entities_at(Vector::new(2, 3)), vec![id]);
        assert!(world.is_occupied_by_solid(Vector::new(2, 3), &[]));
        assert!(!world.is_occupied_by_solid(Vector::new(2, 3), &[id]));
    }

    #[test]
    fn test_set_position_keeps_index_current() {
        let mut world = world();
        let id = world.spawn(EntityRecord::new().with_position(Vector::new(0, 0)));
        world.set_position(id, Vector::new(1, 0)).unwrap();
        assert!(world.entities_at(Vector::new(0, 0)).is_empty());
        assert_eq!(world.entities_at(Vector::new(1, 0)), vec![id]);
        assert_eq!(world.position(id), Some(Vector::new(1, 0)));
    }

    #[test]
    fn test_despawn_clears_everything() {
        let mut world = world();
        let id = world.spawn(
            EntityRecord::new()
                .with_position(Vector::new(4, 4))
                .with_tags(&[Tag::Enemy]),
        );
        assert!(world.despawn(id).is_some());
        assert!(world.entities_at(Vector::new(4, 4)).is_empty());
        assert!(world.query(&[Tag::Enemy]).is_empty());
        assert!(world.despawn(id).is_none());
        assert!(matches!(
            world.set_position(id, Vector::zero()),
            Err(BurrowError::EntityNotFound(_))
        ));
    }

    #[test]
    fn test_query_preserves_spawn_order() {
        let mut world = world();
        let ids: Vec<_> = (0..5)
            .map(|i| {
                world.spawn(
                    EntityRecord::new()
                        .with_position(Vector::new(i, 0))
                        .with_tags(&[Tag::Enemy, Tag::Solid]),
                )
            })
            .collect();
        world.spawn(EntityRecord::new().with_tags(&[Tag::Enemy]));
        assert_eq!(world.query(&[Tag::Enemy, Tag::Solid]), ids);
    }

    #[test]
    fn test_seeded_worlds_produce_the_same_ids() {
        let mut first = world();
        let mut second = world();
        assert_eq!(
            first.spawn(EntityRecord::new()),
            second.spawn(EntityRecord::new())
        );
    }

    #[test]
    fn test_tags_and_camera_lookup() {
        let mut world = world();
        let id = world.spawn(EntityRecord::new().with_name("beetle"));
        world.add_tag(id, Tag::Beetle).unwrap();
        assert!(world.has_tag(id, Tag::Beetle));
        world.remove_tag(id, Tag::Beetle).unwrap();
        assert!(!world.has_tag(id, Tag::Beetle));
        assert_eq!(world.name(id), "beetle");
        assert!(world.camera().is_none());

        let camera = Camera {
            height: 3,
            width: 3,
            tracking_radius: 1,
        };
        let cam = world.spawn(
            EntityRecord::new()
                .with_position(Vector::new(1, 1))
                .with_camera(camera),
        );
        assert_eq!(world.camera(), Some((cam, camera, Vector::new(1, 1))));
        assert!(world.entities_at(Vector::new(1, 1)).is_empty());
        world.set_position(cam, Vector::new(2, 2)).unwrap();
        assert!(world.entities_at(Vector::new(2, 2)).is_empty());
    }
}
