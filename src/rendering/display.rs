//! # Display Management
//!
//! Draws the dungeon and the status panel with macroquad.
//!
//! The screen is a character grid: the map fills the top rows and a short
//! panel below holds the health bar, depth, turn counter and recent messages.

use crate::config;
use crate::game::color;
use crate::game::{GameState, Grid, Position, Rgb, TileGraphic, SHROUD};
use macroquad::prelude::*;

/// Rows reserved below the map for the status panel.
pub const PANEL_ROWS: i32 = 7;
/// Width of the health bar in cells.
pub const BAR_WIDTH: i32 = 20;

/// Converts a game color to a macroquad color.
pub fn to_color(rgb: Rgb) -> Color {
    Color::from_rgba(rgb.0, rgb.1, rgb.2, 255)
}

/// How the cell at `pos` should look given what the player knows about it.
pub fn tile_graphic_at(grid: &Grid, pos: Position) -> TileGraphic {
    match grid.tile(pos) {
        Some(tile) if grid.is_visible(pos) => tile.light,
        Some(tile) if grid.is_explored(pos) => tile.dark,
        _ => SHROUD,
    }
}

/// Filled width of a bar showing `value` out of `maximum`.
pub fn bar_fill(value: i32, maximum: i32, total_width: f32) -> f32 {
    if maximum <= 0 {
        return 0.0;
    }
    (value.clamp(0, maximum) as f32 / maximum as f32) * total_width
}

/// Macroquad display manager for the game.
///
/// Handles map display, the status panel and screen layout.
pub struct MacroquadDisplay {
    /// Map width in cells
    pub map_width: i32,
    /// Map height in cells
    pub map_height: i32,
    /// Side of one cell in pixels
    pub cell_size: f32,
    /// Text size in pixels
    pub font_size: f32,
}

impl MacroquadDisplay {
    /// Creates a display sized for a `map_width` x `map_height` map.
    ///
    /// # Examples
    ///
    /// ```
    /// use tombs::MacroquadDisplay;
    ///
    /// let display = MacroquadDisplay::new(80, 43);
    /// assert_eq!(display.rows(), 50);
    /// ```
    pub fn new(map_width: i32, map_height: i32) -> Self {
        let rows = map_height + PANEL_ROWS;
        let cell_size = (config::WINDOW_WIDTH / map_width.max(1) as f32)
            .min(config::WINDOW_HEIGHT / rows.max(1) as f32)
            .floor()
            .max(4.0);
        Self {
            map_width,
            map_height,
            cell_size,
            font_size: cell_size * 1.1,
        }
    }

    /// Total rows on screen, map and panel together.
    pub fn rows(&self) -> i32 {
        self.map_height + PANEL_ROWS
    }

    pub fn cell_vec(&self) -> Vec2 {
        Vec2::new(self.cell_size, self.cell_size)
    }

    /// Renders the complete game screen.
    pub fn render_game(&self, state: &GameState) {
        clear_background(BLACK);
        self.render_map(&state.grid);
        self.render_entities(state);
        self.render_status(state);
        self.render_messages(state);
    }

    /// Renders every tile the player has seen.
    fn render_map(&self, grid: &Grid) {
        for pos in grid.positions() {
            let graphic = tile_graphic_at(grid, pos);
            self.draw_cell(pos.x, pos.y, graphic.glyph, graphic.fg, graphic.bg);
        }
    }

    /// Renders visible entities, lowest render order first.
    fn render_entities(&self, state: &GameState) {
        for entity in state.render_entities() {
            if !state.grid.is_visible(entity.position) {
                continue;
            }
            let bg = tile_graphic_at(&state.grid, entity.position).bg;
            self.draw_cell(
                entity.position.x,
                entity.position.y,
                entity.glyph,
                entity.color,
                bg,
            );
        }
    }

    fn render_status(&self, state: &GameState) {
        let fighter = &state.entities.actor(state.player_id).fighter;
        let top = self.map_height + 2;
        self.draw_bar(
            1,
            top,
            &format!("HP: {}/{}", fighter.hp(), fighter.max_hp()),
            fighter.hp(),
            fighter.max_hp(),
        );
        self.draw_text_at(1, top + 2, &format!("Dungeon level: {}", state.depth()), color::WHITE);
        self.draw_text_at(1, top + 3, &format!("Turn: {}", state.turn_number), color::WHITE);
    }

    /// Renders the newest messages, oldest at the top.
    fn render_messages(&self, state: &GameState) {
        let left = BAR_WIDTH + 2;
        let top = self.map_height + 1;
        for (row, message) in state
            .messages
            .recent(config::VISIBLE_MESSAGES)
            .iter()
            .enumerate()
        {
            self.draw_text_at(left, top + row as i32, &message.full_text(), message.color);
        }
    }

    /// Outlines the targeting cursor and, for area effects, its reach.
    pub fn render_targeting(&self, cursor: Position, radius: Option<i32>) {
        let highlight = Color::new(1.0, 1.0, 1.0, 0.25);
        if let Some(radius) = radius {
            for y in (cursor.y - radius + 1)..(cursor.y + radius) {
                for x in (cursor.x - radius + 1)..(cursor.x + radius) {
                    draw_rectangle(
                        x as f32 * self.cell_size,
                        y as f32 * self.cell_size,
                        self.cell_size,
                        self.cell_size,
                        highlight,
                    );
                }
            }
        }
        draw_rectangle_lines(
            cursor.x as f32 * self.cell_size,
            cursor.y as f32 * self.cell_size,
            self.cell_size,
            self.cell_size,
            2.0,
            WHITE,
        );
    }

    fn draw_bar(&self, x: i32, y: i32, label: &str, value: i32, maximum: i32) {
        let left = x as f32 * self.cell_size;
        let top = y as f32 * self.cell_size;
        let width = BAR_WIDTH as f32 * self.cell_size;
        draw_rectangle(left, top, width, self.cell_size, to_color(color::BAR_EMPTY));
        draw_rectangle(
            left,
            top,
            bar_fill(value, maximum, width),
            self.cell_size,
            to_color(color::BAR_FILLED),
        );
        self.draw_text_at(x + 1, y, label, color::BAR_TEXT);
    }

    /// Draws one glyph on a filled cell.
    pub fn draw_cell(&self, x: i32, y: i32, glyph: char, fg: Rgb, bg: Rgb) {
        let left = x as f32 * self.cell_size;
        let top = y as f32 * self.cell_size;
        draw_rectangle(left, top, self.cell_size, self.cell_size, to_color(bg));
        if glyph != ' ' {
            let mut buffer = [0u8; 4];
            draw_text(
                glyph.encode_utf8(&mut buffer),
                left + self.cell_size * 0.2,
                top + self.cell_size * 0.85,
                self.font_size,
                to_color(fg),
            );
        }
    }

    /// Draws text starting at a cell, baseline inside that row.
    pub fn draw_text_at(&self, x: i32, y: i32, text: &str, fg: Rgb) {
        draw_text(
            text,
            x as f32 * self.cell_size,
            y as f32 * self.cell_size + self.cell_size * 0.85,
            self.font_size,
            to_color(fg),
        );
    }

    /// Draws text centered horizontally on row `y`.
    pub fn draw_centered(&self, y: i32, text: &str, fg: Rgb) {
        let measured = measure_text(text, None, self.font_size as u16, 1.0);
        let columns = self.map_width as f32 * self.cell_size;
        draw_text(
            text,
            ((columns - measured.width) / 2.0).max(0.0),
            y as f32 * self.cell_size + self.cell_size * 0.85,
            self.font_size,
            to_color(fg),
        );
    }

    /// Fills a rectangle of cells with a translucent backdrop.
    pub fn draw_frame(&self, x: i32, y: i32, width: i32, height: i32) {
        let left = x as f32 * self.cell_size;
        let top = y as f32 * self.cell_size;
        let w = width as f32 * self.cell_size;
        let h = height as f32 * self.cell_size;
        draw_rectangle(left, top, w, h, Color::new(0.0, 0.0, 0.0, 0.85));
        draw_rectangle_lines(left, top, w, h, 1.0, WHITE);
    }
}
