//! # Display Management
//!
//! Draws the camera's view of the cave, the player's stats and the message
//! log with macroquad. Nothing here mutates the game.

use crate::{BurrowResult, GameState, GameStatistics, Graphic, Tag, Vector, World};
use macroquad::prelude::*;

const WALL: Graphic = Graphic {
    ch: '#',
    fg: [110, 100, 90],
    bg: [40, 32, 28],
};

const FLOOR: Graphic = Graphic {
    ch: '.',
    fg: [70, 60, 55],
    bg: [0, 0, 0],
};

/// Macroquad display manager for the game.
#[derive(Debug, Clone)]
pub struct MacroquadDisplay {
    /// Tile size in pixels
    pub tile_size: f32,
    /// UI panel width in pixels
    pub ui_panel_width: f32,
    /// Number of log lines shown under the map
    pub message_rows: usize,
}

impl Default for MacroquadDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl MacroquadDisplay {
    pub fn new() -> Self {
        Self {
            tile_size: 16.0,
            ui_panel_width: 260.0,
            message_rows: 5,
        }
    }

    /// Renders the complete game screen.
    pub fn render_game(&self, game: &GameState) -> BurrowResult<()> {
        clear_background(BLACK);
        let (height, width) = self.render_map(&game.world);
        let map_right = width as f32 * self.tile_size;
        let map_bottom = height as f32 * self.tile_size;
        self.render_panel(game, map_right + 10.0);
        self.render_messages(game, map_bottom + 20.0);
        Ok(())
    }

    /// Draws the cells and entities under the camera, returning the view's
    /// size in cells.
    fn render_map(&self, world: &World) -> (i32, i32) {
        let (camera, anchor) = match world.camera() {
            Some((_, camera, position)) => (camera, position),
            None => return (0, 0),
        };
        let view = camera.bounding_box(anchor);

        for y in view.top()..view.bottom() {
            for x in view.left()..view.right() {
                let cell = Vector::new(x, y);
                let graphic = if world.map().is_wall(cell) { WALL } else { FLOOR };
                self.draw_glyph(cell - anchor, graphic);
            }
        }
        for (cell, graphic) in glyph_layers(world) {
            if view.contains(cell) && cell.x < view.right() && cell.y < view.bottom() {
                self.draw_glyph(cell - anchor, graphic);
            }
        }
        (camera.height, camera.width)
    }

    fn draw_glyph(&self, screen_cell: Vector, graphic: Graphic) {
        let x = screen_cell.x as f32 * self.tile_size;
        let y = screen_cell.y as f32 * self.tile_size;
        draw_rectangle(x, y, self.tile_size, self.tile_size, rgb(graphic.bg));
        let mut buffer = [0u8; 4];
        draw_text(
            graphic.ch.encode_utf8(&mut buffer),
            x + self.tile_size * 0.2,
            y + self.tile_size * 0.85,
            self.tile_size * 1.1,
            rgb(graphic.fg),
        );
    }

    fn render_panel(&self, game: &GameState, panel_x: f32) {
        let line_height = 20.0;
        let mut line_y = 24.0;
        draw_text("BURROW", panel_x, line_y, 24.0, WHITE);
        line_y += line_height * 1.5;

        draw_text(&format!("Depth: {}", game.depth()), panel_x, line_y, 18.0, SKYBLUE);
        line_y += line_height;
        draw_text(&format!("Turn: {}", game.turn_number), panel_x, line_y, 18.0, SKYBLUE);
        line_y += line_height * 1.5;

        if let Some(stats) = game.player_stats() {
            let color = if stats.health * 3 <= stats.max_health { RED } else { WHITE };
            for line in stats.to_string().lines() {
                draw_text(line, panel_x, line_y, 18.0, color);
                line_y += line_height;
            }
        }
        line_y += line_height;

        draw_text("Controls:", panel_x, line_y, 18.0, GREEN);
        line_y += line_height;
        for control in [
            "Arrows/WASD/hjkl: Move",
            "Home/PgUp/End/PgDn: Diagonals",
            "SPACE: Rest and eat",
            "ESC: Menu",
        ] {
            draw_text(control, panel_x, line_y, 16.0, WHITE);
            line_y += line_height;
        }
    }

    fn render_messages(&self, game: &GameState, top: f32) {
        let line_height = 18.0;
        for (i, message) in game.messages().latest(self.message_rows).enumerate() {
            draw_text(message, 10.0, top + i as f32 * line_height, 16.0, LIGHTGRAY);
        }
    }

    /// Draws the pause menu with `cursor` highlighting one of `options`.
    pub fn render_menu(&self, options: &[&str], cursor: usize) -> BurrowResult<()> {
        clear_background(BLACK);
        let center_x = screen_width() / 2.0;
        let mut line_y = screen_height() / 3.0;
        draw_text("BURROW", center_x - 60.0, line_y, 40.0, WHITE);
        line_y += 60.0;
        for (i, option) in options.iter().enumerate() {
            let (label, color) = if i == cursor {
                (format!("> {}", option), YELLOW)
            } else {
                (format!("  {}", option), GRAY)
            };
            draw_text(&label, center_x - 60.0, line_y, 28.0, color);
            line_y += 36.0;
        }
        Ok(())
    }

    /// Draws the death screen.
    pub fn render_game_over(&self, statistics: &GameStatistics, turns: u64) -> BurrowResult<()> {
        clear_background(BLACK);
        let center_x = screen_width() / 2.0;
        let mut line_y = screen_height() / 3.0;
        draw_text("YOU DIED", center_x - 90.0, line_y, 48.0, RED);
        line_y += 60.0;
        for line in [
            format!("Deepest level: {}", statistics.max_depth_reached),
            format!("Enemies defeated: {}", statistics.enemies_defeated),
            format!("Steps taken: {}", statistics.steps_taken),
            format!("Turns survived: {}", turns),
        ] {
            draw_text(&line, center_x - 90.0, line_y, 22.0, WHITE);
            line_y += 28.0;
        }
        line_y += 20.0;
        draw_text("N: New game    ESC: Quit", center_x - 90.0, line_y, 22.0, GRAY);
        Ok(())
    }
}

/// Every drawable entity with its cell, in painting order: items first,
/// then the other actors, then the player, then the camera anchor.
pub fn glyph_layers(world: &World) -> Vec<(Vector, Graphic)> {
    let mut layers: Vec<(u8, Vector, Graphic)> = world
        .query(&[])
        .into_iter()
        .filter_map(|id| {
            let record = world.get(id)?;
            let layer = if record.camera.is_some() {
                3
            } else if record.tags.contains(&Tag::Player) {
                2
            } else if record.tags.contains(&Tag::Actor) {
                1
            } else {
                0
            };
            Some((layer, record.position()?, record.graphic?))
        })
        .collect();
    layers.sort_by_key(|&(layer, _, _)| layer);
    layers
        .into_iter()
        .map(|(_, cell, graphic)| (cell, graphic))
        .collect()
}

fn rgb([r, g, b]: [u8; 3]) -> Color {
    Color::from_rgba(r, g, b, 255)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{EntityRecord, Map, MessageLog};
    use ::rand::rngs::StdRng;
    use ::rand::SeedableRng;

    #[test]
    fn test_player_is_painted_over_items_and_enemies() {
        let mut world = World::new(Map::open(3, 3), StdRng::seed_from_u64(0), 0, MessageLog::new());
        let cell = Vector::new(1, 1);
        world.spawn(
            EntityRecord::new()
                .with_position(cell)
                .with_tags(&[Tag::Player, Tag::Actor])
                .with_graphic(Graphic::new('@', [255, 255, 0])),
        );
        world.spawn(
            EntityRecord::new()
                .with_position(cell)
                .with_tags(&[Tag::Item])
                .with_graphic(Graphic::new('%', [255, 0, 0])),
        );
        world.spawn(
            EntityRecord::new()
                .with_position(Vector::new(2, 1))
                .with_tags(&[Tag::Enemy, Tag::Actor])
                .with_graphic(Graphic::new('s', [255, 0, 0])),
        );
        world.spawn(EntityRecord::new().with_position(Vector::new(0, 0)));

        let glyphs: Vec<char> = glyph_layers(&world).iter().map(|(_, g)| g.ch).collect();
        assert_eq!(glyphs, vec!['%', 's', '@']);
    }
}
