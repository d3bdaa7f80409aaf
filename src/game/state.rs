//! # Game State Module
//!
//! The session object that owns the current level and runs the per-turn
//! protocol.
//!
//! A turn resolves in a fixed order: the player's move with its collision,
//! trigger or meal; every enemy's move and attack; every enemy's state
//! transition; the death sweep; and finally the camera follow. Nothing is
//! observable between those steps because the renderer only sees the state
//! once [`GameState::take_turn`] returns.

use crate::{
    assemble_level_with_retries, collide_entity, enemy_turns, handle_collision, handle_rest,
    move_camera, sweep_dead, BurrowError, BurrowResult, Direction, EntityId, Level, MessageLog,
    Settings, Stats, Tag, Vector, World,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

/// What a turn led to, for the scene layer to react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnOutcome {
    /// Play goes on on the same level
    Continue,
    /// The player fell down a hole; the level was replaced
    Descended { depth: u32 },
    /// The player's health reached zero this turn
    PlayerDied,
    /// The session already ended; nothing happened
    GameOver,
}

/// Game completion state for handling endings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameCompletionState {
    /// Game is still in progress
    Playing,
    /// Player died
    PlayerDied,
}

/// Game statistics tracking player progress.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStatistics {
    /// Number of enemies that died
    pub enemies_defeated: u32,
    /// Deepest level reached
    pub max_depth_reached: u32,
    /// Total steps taken
    pub steps_taken: u64,
}

impl GameStatistics {
    /// Creates new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }
}

/// One play session: the current level plus everything that survives a
/// descent.
#[derive(Debug, Clone)]
pub struct GameState {
    /// The current level
    pub world: World,
    /// The player entity ID on the current level
    pub player: EntityId,
    pub settings: Settings,
    /// Current game turn number
    pub turn_number: u64,
    /// Seed the session was started from
    pub rng_seed: u64,
    pub completion_state: GameCompletionState,
    pub statistics: GameStatistics,
    /// Seeds each new level
    rng: StdRng,
}

impl GameState {
    /// Starts a session at depth zero.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use burrow::{GameState, Settings, Vector};
    ///
    /// let mut game = GameState::new(Settings::default(), 42).unwrap();
    /// game.take_turn(Vector::new(1, 0)).unwrap();
    /// assert_eq!(game.turn_number, 1);
    /// ```
    pub fn new(settings: Settings, seed: u64) -> BurrowResult<Self> {
        settings.validate()?;
        let mut rng = StdRng::seed_from_u64(seed);
        let mut messages = MessageLog::new();
        messages.log("you crawl into the burrow");
        let level = assemble_level_with_retries(&settings, 0, &mut rng, &messages, None)?;
        log::info!("new game with seed {}", seed);
        Ok(Self::with_rng(settings, level, seed, rng))
    }

    /// Starts a session on an already built level.
    pub fn from_level(settings: Settings, level: Level, seed: u64) -> Self {
        Self::with_rng(settings, level, seed, StdRng::seed_from_u64(seed))
    }

    fn with_rng(settings: Settings, level: Level, seed: u64, rng: StdRng) -> Self {
        let depth = level.world.depth();
        Self {
            world: level.world,
            player: level.player,
            settings,
            turn_number: 0,
            rng_seed: seed,
            completion_state: GameCompletionState::Playing,
            statistics: GameStatistics {
                max_depth_reached: depth,
                ..GameStatistics::new()
            },
            rng,
        }
    }

    pub fn depth(&self) -> u32 {
        self.world.depth()
    }

    pub fn player_stats(&self) -> Option<Stats> {
        self.world.stats(self.player)
    }

    pub fn player_position(&self) -> Option<Vector> {
        self.world.position(self.player)
    }

    pub fn messages(&self) -> &MessageLog {
        self.world.messages()
    }

    pub fn is_game_ended(&self) -> bool {
        self.completion_state != GameCompletionState::Playing
    }

    /// Runs a turn for a movement key.
    pub fn take_direction(&mut self, direction: Direction) -> BurrowResult<TurnOutcome> {
        self.take_turn(direction.to_delta())
    }

    /// Runs one full turn with the player attempting to move by `direction`.
    /// A zero direction rests in place, eating whatever lies there.
    pub fn take_turn(&mut self, direction: Vector) -> BurrowResult<TurnOutcome> {
        if self.is_game_ended() {
            return Ok(TurnOutcome::GameOver);
        }
        self.turn_number += 1;
        let player = self.player;
        let before = self
            .world
            .position(player)
            .ok_or(BurrowError::EntityNotFound(player))?;

        let report = collide_entity(&mut self.world, player, direction)?;
        for &obstacle in &report.obstacles {
            handle_collision(&mut self.world, player, obstacle)?;
        }
        if report.moved {
            self.statistics.steps_taken += 1;
            for &occupant in &report.occupants {
                if self.handle_trigger(occupant)?.is_some() {
                    return Ok(TurnOutcome::Descended {
                        depth: self.depth(),
                    });
                }
            }
        } else if direction.is_zero() {
            for &occupant in &report.occupants {
                handle_rest(&mut self.world, player, occupant)?;
            }
        }

        enemy_turns(&mut self.world, player)?;
        let corpse_graphic = self.settings.corpse.graphic;
        self.statistics.enemies_defeated += sweep_dead(&mut self.world, corpse_graphic)?;

        let after = self
            .world
            .position(player)
            .ok_or(BurrowError::EntityNotFound(player))?;
        move_camera(&mut self.world, player, after - before)?;

        if self.player_stats().map(|stats| stats.is_dead()).unwrap_or(false) {
            self.completion_state = GameCompletionState::PlayerDied;
            self.world.log("you died");
            log::info!(
                "player died on turn {} at depth {}",
                self.turn_number,
                self.depth()
            );
            return Ok(TurnOutcome::PlayerDied);
        }
        Ok(TurnOutcome::Continue)
    }

    /// Resolves the player stepping onto `occupant`. Only holes react: they
    /// replace the level with the next one down and return the new player.
    pub fn handle_trigger(&mut self, occupant: EntityId) -> BurrowResult<Option<EntityId>> {
        if !self.world.has_tag(occupant, Tag::Hole) {
            return Ok(None);
        }
        self.descend().map(Some)
    }

    /// Replaces the current level with the next one down, keeping the
    /// player's stats and the message history.
    pub fn descend(&mut self) -> BurrowResult<EntityId> {
        let depth = self.depth() + 1;
        let carried = self.player_stats();
        let mut messages = self.world.messages().clone();
        messages.log(format!("you fall deeper, to depth {}", depth));

        let level =
            assemble_level_with_retries(&self.settings, depth, &mut self.rng, &messages, carried)?;
        self.world = level.world;
        self.player = level.player;
        self.statistics.max_depth_reached = self.statistics.max_depth_reached.max(depth);
        log::info!("descended to depth {}", depth);
        Ok(self.player)
    }
}
