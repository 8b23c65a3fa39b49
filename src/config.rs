// src/config.rs
use bevy::prelude::*;

pub const FIELD_WIDTH: usize = 10;
pub const FIELD_HEIGHT: usize = 24;
pub const CELL_SIZE: f32 = 30.0;
pub const WINDOW_WIDTH: f32 = 800.0;
pub const WINDOW_HEIGHT: f32 = 800.0;
pub const WINDOW_TITLE: &str = "Tetris";

// Seconds between gravity steps.
pub const UPDATE_DELAY: f64 = 0.5;
// Seconds a resting piece waits before it is locked into the field.
pub const LOCK_DELAY: f64 = 0.75;

/// Tunables shared by the session and the rendering systems.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct GameConfig {
    pub field_width: usize,
    pub field_height: usize,
    pub cell_size: f32,
    pub window_width: f32,
    pub window_height: f32,
    pub window_title: String,
    pub update_delay: f64,
    pub lock_delay: f64,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,
            cell_size: CELL_SIZE,
            window_width: WINDOW_WIDTH,
            window_height: WINDOW_HEIGHT,
            window_title: WINDOW_TITLE.to_string(),
            update_delay: UPDATE_DELAY,
            lock_delay: LOCK_DELAY,
        }
    }
}

impl GameConfig {
    /// World-space center of field cell (col, row). Row 0 is the top row and
    /// the field is centered on the origin.
    pub fn cell_center(&self, col: i32, row: i32) -> Vec2 {
        let half_w = (self.field_width as f32 - 1.0) / 2.0;
        let half_h = (self.field_height as f32 - 1.0) / 2.0;
        Vec2::new(
            (col as f32 - half_w) * self.cell_size,
            (half_h - row as f32) * self.cell_size,
        )
    }

    /// Top-left corner of the field in world space.
    pub fn field_top_left(&self) -> Vec2 {
        Vec2::new(
            -(self.field_width as f32) * self.cell_size / 2.0,
            self.field_height as f32 * self.cell_size / 2.0,
        )
    }
}
