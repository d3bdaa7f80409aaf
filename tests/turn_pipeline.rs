//! Integration tests for the per-turn protocol on hand-built levels.

use burrow::{
    collide_entity, AiState, BurrowResult, EntityRecord, GameState, Level, Map, MessageLog,
    Settings, Species, Stats, Strategy, Tag, Trait, TurnOutcome, Vector, World,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn level(rows: &[&str], player_at: Vector) -> BurrowResult<Level> {
    let map = Map::from_rows(rows)?;
    let mut world = World::new(map, StdRng::seed_from_u64(7), 0, MessageLog::new());
    let player = world.spawn(
        EntityRecord::new()
            .with_position(player_at)
            .with_name("you")
            .with_tags(&[Tag::Player, Tag::Actor, Tag::Solid])
            .with_stats(Stats::new(30, 2)),
    );
    Ok(Level { world, player })
}

#[test]
fn test_three_by_three_open_map() -> BurrowResult<()> {
    let mut level = level(&["...", "...", "..."], Vector::new(0, 0))?;
    let player = level.player;

    let report = collide_entity(&mut level.world, player, Vector::zero())?;
    assert!(report.is_empty());
    assert!(!report.moved);
    assert_eq!(level.world.position(player), Some(Vector::new(0, 0)));

    let report = collide_entity(&mut level.world, player, Vector::new(1, 0))?;
    assert!(report.is_empty());
    assert!(report.moved);
    assert_eq!(level.world.position(player), Some(Vector::new(1, 0)));
    assert_eq!(level.world.entities_at(Vector::new(1, 0)), vec![player]);
    assert!(level.world.entities_at(Vector::new(0, 0)).is_empty());
    Ok(())
}

#[test]
fn test_session_turns_on_an_open_map() -> BurrowResult<()> {
    let level = level(&["...", "...", "..."], Vector::new(0, 0))?;
    let mut game = GameState::from_level(Settings::default(), level, 1);

    assert_eq!(game.take_turn(Vector::zero())?, TurnOutcome::Continue);
    assert_eq!(game.player_position(), Some(Vector::new(0, 0)));
    assert_eq!(game.take_turn(Vector::new(1, 0))?, TurnOutcome::Continue);
    assert_eq!(game.player_position(), Some(Vector::new(1, 0)));

    // Off the map and into nothing: the turn still passes.
    assert_eq!(game.take_turn(Vector::new(0, -1))?, TurnOutcome::Continue);
    assert_eq!(game.player_position(), Some(Vector::new(1, 0)));
    assert_eq!(game.turn_number, 3);
    assert_eq!(game.statistics.steps_taken, 1);
    Ok(())
}

#[test]
fn test_kill_then_eat_grants_the_trait() -> BurrowResult<()> {
    let mut level = level(&["....."], Vector::new(0, 0))?;
    let enemy = level.world.spawn(
        EntityRecord::new()
            .with_position(Vector::new(1, 0))
            .with_name("beetle")
            .with_tags(&[Tag::Enemy, Tag::Actor, Tag::Solid, Tag::Beetle])
            .with_stats(Stats::new(2, 1))
            .with_strategy(Strategy::for_species(Species::Beetle))
            .with_size(1)
            .with_trait(Some(Trait::Shell)),
    );
    let mut game = GameState::from_level(Settings::default(), level, 1);

    game.take_turn(Vector::new(1, 0))?;
    assert!(!game.world.contains(enemy));
    let corpse = game.world.query(&[Tag::Edible]);
    assert_eq!(corpse.len(), 1);

    game.take_turn(Vector::new(1, 0))?;
    assert_eq!(game.player_position(), Some(Vector::new(1, 0)));
    game.take_turn(Vector::zero())?;
    assert!(game.world.query(&[Tag::Edible]).is_empty());
    assert_eq!(game.player_stats().map(|stats| stats.toughness), Some(1));
    assert!(game
        .messages()
        .iter()
        .any(|message| message == "You gained shell"));
    Ok(())
}

#[test]
fn test_hunting_spider_closes_in_through_a_corridor() -> BurrowResult<()> {
    let mut level = level(&["#######", "#.....#", "#######"], Vector::new(1, 1))?;
    let spider = level.world.spawn(
        EntityRecord::new()
            .with_position(Vector::new(5, 1))
            .with_name("spider")
            .with_tags(&[Tag::Enemy, Tag::Actor, Tag::Solid, Tag::Spider])
            .with_stats(Stats::new(6, 0))
            .with_strategy(Strategy::for_species(Species::Spider)),
    );
    let mut game = GameState::from_level(Settings::default(), level, 1);

    // The corridor leaves one way to wander; the spider spots the player on
    // that first step, then hunts one cell per turn and stops to fight.
    game.take_turn(Vector::zero())?;
    assert_eq!(game.world.position(spider), Some(Vector::new(4, 1)));
    game.take_turn(Vector::zero())?;
    assert_eq!(game.world.position(spider), Some(Vector::new(3, 1)));
    game.take_turn(Vector::zero())?;
    assert_eq!(game.world.position(spider), Some(Vector::new(2, 1)));
    game.take_turn(Vector::zero())?;
    assert_eq!(game.world.position(spider), Some(Vector::new(2, 1)));
    let strategy = game.world.get(spider).and_then(|record| record.strategy);
    assert_eq!(strategy.map(|strategy| strategy.state()), Some(AiState::Fighting));
    Ok(())
}
