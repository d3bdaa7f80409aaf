//! # Input Module
//!
//! Keyboard handling. Keys are translated into [`PlayerInput`] during play
//! and into [`MenuCommand`] on the menu and game over screens; the
//! translation itself is a pure function of the key so it can be tested
//! without a window.

use crate::Direction;
use macroquad::prelude::*;

/// Input handler for processing player commands.
#[derive(Debug, Clone, Copy)]
pub struct InputHandler {
    /// Whether to enable Vi-style movement keys (hjklyubn)
    pub vi_keys_enabled: bool,
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl InputHandler {
    /// Creates a new input handler.
    ///
    /// # Examples
    ///
    /// ```
    /// use burrow::InputHandler;
    ///
    /// let input_handler = InputHandler::new();
    /// assert!(input_handler.vi_keys_enabled);
    /// ```
    pub fn new() -> Self {
        Self {
            vi_keys_enabled: true,
        }
    }

    /// The key pressed since the last frame, if any.
    pub fn poll_key(&self) -> Option<KeyCode> {
        get_last_key_pressed()
    }

    /// Translates a key pressed during play.
    pub fn player_input(&self, key: KeyCode) -> Option<PlayerInput> {
        if key == KeyCode::Escape {
            return Some(PlayerInput::OpenMenu);
        }
        direction_for_key(key, self.vi_keys_enabled).map(PlayerInput::Move)
    }
}

/// Player input during play.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerInput {
    /// Move (or attack, or rest for [`Direction::Wait`])
    Move(Direction),
    /// Pause and show the menu
    OpenMenu,
}

/// Navigation on the menu and game over screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuCommand {
    Up,
    Down,
    Select,
    Back,
    NewGame,
}

/// The movement a key stands for.
///
/// # Examples
///
/// ```
/// use burrow::{direction_for_key, Direction};
/// use macroquad::prelude::KeyCode;
///
/// assert_eq!(direction_for_key(KeyCode::Up, true), Some(Direction::North));
/// assert_eq!(direction_for_key(KeyCode::Y, true), Some(Direction::Northwest));
/// assert_eq!(direction_for_key(KeyCode::Y, false), None);
/// ```
pub fn direction_for_key(key: KeyCode, vi_keys: bool) -> Option<Direction> {
    let direction = match key {
        KeyCode::Up | KeyCode::W | KeyCode::Kp8 => Direction::North,
        KeyCode::Down | KeyCode::S | KeyCode::Kp2 => Direction::South,
        KeyCode::Left | KeyCode::A | KeyCode::Kp4 => Direction::West,
        KeyCode::Right | KeyCode::D | KeyCode::Kp6 => Direction::East,
        KeyCode::Home | KeyCode::Kp7 => Direction::Northwest,
        KeyCode::PageUp | KeyCode::Kp9 => Direction::Northeast,
        KeyCode::End | KeyCode::Kp1 => Direction::Southwest,
        KeyCode::PageDown | KeyCode::Kp3 => Direction::Southeast,
        KeyCode::Space | KeyCode::Period | KeyCode::Kp5 => Direction::Wait,
        _ if vi_keys => return vi_direction(key),
        _ => return None,
    };
    Some(direction)
}

fn vi_direction(key: KeyCode) -> Option<Direction> {
    match key {
        KeyCode::K => Some(Direction::North),
        KeyCode::J => Some(Direction::South),
        KeyCode::H => Some(Direction::West),
        KeyCode::L => Some(Direction::East),
        KeyCode::Y => Some(Direction::Northwest),
        KeyCode::U => Some(Direction::Northeast),
        KeyCode::B => Some(Direction::Southwest),
        KeyCode::N => Some(Direction::Southeast),
        _ => None,
    }
}

/// The menu command a key stands for.
pub fn menu_command_for_key(key: KeyCode) -> Option<MenuCommand> {
    match key {
        KeyCode::Up | KeyCode::W | KeyCode::K => Some(MenuCommand::Up),
        KeyCode::Down | KeyCode::S | KeyCode::J => Some(MenuCommand::Down),
        KeyCode::Enter | KeyCode::KpEnter | KeyCode::Space => Some(MenuCommand::Select),
        KeyCode::Escape => Some(MenuCommand::Back),
        KeyCode::N => Some(MenuCommand::NewGame),
        _ => None,
    }
}
