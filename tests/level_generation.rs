//! Integration tests for cave generation, level assembly and whole sessions
//! started from a settings file.

use burrow::config::{ENEMIES_PER_KIND, MAX_GENERATIONS};
use burrow::{
    assemble_level_with_retries, generation_step, BurrowResult, CaveGenerator, GameState,
    Generator, MessageLog, Settings, Tag, TurnOutcome, Vector,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io::Write;
use tempfile::NamedTempFile;

fn small_settings() -> Settings {
    let mut settings = Settings::default();
    settings.map.height = 30;
    settings.map.width = 40;
    settings.camera.height = 10;
    settings.camera.width = 20;
    settings.camera.tracking_radius = 4;
    settings
}

#[test]
fn test_caves_are_reproducible_and_bounded() -> BurrowResult<()> {
    let generator = CaveGenerator::new(40, 60, 0.45, true);
    for seed in 0..10 {
        let first = generator.carve(&mut StdRng::seed_from_u64(seed));
        let second = generator.carve(&mut StdRng::seed_from_u64(seed));
        assert_eq!(first.map, second.map);
        assert!(first.passes <= MAX_GENERATIONS);
        if first.converged {
            assert_eq!(generation_step(&first.map, true, first.passes - 1), first.map);
        }

        let map = generator.generate(&mut StdRng::seed_from_u64(seed))?;
        assert_eq!(map, first.map);
        assert_eq!(generator.generator_type(), "CaveGenerator");
    }
    Ok(())
}

#[test]
fn test_default_sized_level() -> BurrowResult<()> {
    let settings = Settings::default();
    let mut rng = StdRng::seed_from_u64(2024);
    let level = assemble_level_with_retries(&settings, 0, &mut rng, &MessageLog::new(), None)?;
    let world = &level.world;
    assert_eq!(world.map().height(), 60);
    assert_eq!(world.map().width(), 100);
    assert_eq!(world.query(&[Tag::Enemy]).len(), 4 * ENEMIES_PER_KIND);
    assert_eq!(world.query(&[Tag::Hole]).len(), 1);
    assert_eq!(world.query(&[Tag::Player]), vec![level.player]);
    assert!(world.camera().is_some());
    Ok(())
}

#[test]
fn test_session_from_a_settings_file() -> BurrowResult<()> {
    let mut file = NamedTempFile::new()?;
    file.write_all(small_settings().to_json_string()?.as_bytes())?;
    let settings = Settings::load(file.path())?;
    assert_eq!(settings, small_settings());

    let mut game = GameState::new(settings, 99)?;
    let moves = [
        Vector::new(1, 0),
        Vector::new(0, 1),
        Vector::new(-1, 0),
        Vector::new(0, -1),
        Vector::zero(),
    ];
    for &step in moves.iter().cycle().take(50) {
        match game.take_turn(step)? {
            TurnOutcome::PlayerDied | TurnOutcome::GameOver => break,
            TurnOutcome::Descended { .. } | TurnOutcome::Continue => {}
        }
        let stats = game.player_stats().expect("player has stats");
        assert!(stats.health >= 0 && stats.health <= stats.max_health);
        let position = game.player_position().expect("player has a position");
        assert!(!game.world.map().is_wall(position));
    }
    assert!(game.turn_number >= 1);
    Ok(())
}
