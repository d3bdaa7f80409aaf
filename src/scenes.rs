//! # Scene Management System
//!
//! Switches between play, the pause menu and the death screen. Key handling
//! is kept apart from the frame loop so scene transitions can be driven
//! without a window.

use crate::{
    menu_command_for_key, BurrowResult, GameState, InputHandler, MacroquadDisplay, MenuCommand,
    PlayerInput, Settings, TurnOutcome,
};
use macroquad::prelude::*;

/// Entries of the pause menu, in display order.
pub const MENU_OPTIONS: [&str; 3] = ["Continue", "Restart", "Quit"];

/// Represents the current scene in the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scene {
    /// Normal gameplay
    Playing,
    /// Pause menu with the highlighted entry
    Menu { cursor: usize },
    /// Death screen
    GameOver,
}

/// The main scene manager that coordinates all game scenes
pub struct SceneManager {
    scene: Scene,
    game: GameState,
    settings: Settings,
    input: InputHandler,
    display: MacroquadDisplay,
    quit: bool,
}

impl SceneManager {
    /// Starts a session from `seed` in the playing scene.
    pub fn new(settings: Settings, seed: u64, input: InputHandler) -> BurrowResult<Self> {
        let game = GameState::new(settings.clone(), seed)?;
        Ok(Self {
            scene: Scene::Playing,
            game,
            settings,
            input,
            display: MacroquadDisplay::new(),
            quit: false,
        })
    }

    pub fn scene(&self) -> Scene {
        self.scene
    }

    pub fn game(&self) -> &GameState {
        &self.game
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Runs the main scene loop until the game exits
    pub async fn run(&mut self) -> BurrowResult<()> {
        loop {
            if let Some(key) = self.input.poll_key() {
                self.handle_key(key)?;
            }
            if self.quit {
                log::info!("quitting after {} turns", self.game.turn_number);
                break;
            }
            self.render()?;
            next_frame().await;
        }
        Ok(())
    }

    fn render(&self) -> BurrowResult<()> {
        match self.scene {
            Scene::Playing => self.display.render_game(&self.game),
            Scene::Menu { cursor } => self.display.render_menu(&MENU_OPTIONS, cursor),
            Scene::GameOver => self
                .display
                .render_game_over(&self.game.statistics, self.game.turn_number),
        }
    }

    /// Applies one key press to the current scene.
    pub fn handle_key(&mut self, key: KeyCode) -> BurrowResult<()> {
        match self.scene {
            Scene::Playing => self.update_playing(key),
            Scene::Menu { cursor } => self.update_menu(cursor, key),
            Scene::GameOver => self.update_game_over(key),
        }
    }

    fn update_playing(&mut self, key: KeyCode) -> BurrowResult<()> {
        match self.input.player_input(key) {
            Some(PlayerInput::Move(direction)) => {
                match self.game.take_direction(direction)? {
                    TurnOutcome::PlayerDied | TurnOutcome::GameOver => self.scene = Scene::GameOver,
                    TurnOutcome::Descended { depth } => log::debug!("now at depth {}", depth),
                    TurnOutcome::Continue => {}
                }
            }
            Some(PlayerInput::OpenMenu) => self.scene = Scene::Menu { cursor: 0 },
            None => {}
        }
        Ok(())
    }

    fn update_menu(&mut self, cursor: usize, key: KeyCode) -> BurrowResult<()> {
        match menu_command_for_key(key) {
            Some(MenuCommand::Up) => {
                self.scene = Scene::Menu {
                    cursor: cursor.saturating_sub(1),
                }
            }
            Some(MenuCommand::Down) => {
                self.scene = Scene::Menu {
                    cursor: (cursor + 1).min(MENU_OPTIONS.len() - 1),
                }
            }
            Some(MenuCommand::Select) => match cursor {
                0 => self.scene = Scene::Playing,
                1 => self.restart()?,
                _ => self.quit = true,
            },
            Some(MenuCommand::Back) => self.scene = Scene::Playing,
            Some(MenuCommand::NewGame) | None => {}
        }
        Ok(())
    }

    fn update_game_over(&mut self, key: KeyCode) -> BurrowResult<()> {
        match menu_command_for_key(key) {
            Some(MenuCommand::NewGame) => self.restart()?,
            Some(MenuCommand::Back) => self.quit = true,
            _ => {}
        }
        Ok(())
    }

    /// Starts a new game with a fresh cave
    fn restart(&mut self) -> BurrowResult<()> {
        let seed = self.game.rng_seed.wrapping_add(1);
        log::info!("starting new game with seed {}", seed);
        self.game = GameState::new(self.settings.clone(), seed)?;
        self.scene = Scene::Playing;
        Ok(())
    }
}
