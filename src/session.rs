// src/session.rs
use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::collision::{is_valid, project};
use crate::config::GameConfig;
use crate::field::Field;
use crate::piece::{Piece, ShapeKind};

#[derive(States, Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub enum GameState {
    #[default]
    Playing,
    GameOver,
}

/// Player commands, produced by the input layer and applied by `Session::apply`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    MoveLeft,
    MoveRight,
    SoftDrop,
    RotateCW,
    RotateCCW,
    HardDrop,
    PrintField,
}

/// Points for clearing `cleared` rows with one piece.
pub fn line_clear_points(cleared: usize) -> u32 {
    match cleared {
        1 => 40,
        2 => 100,
        3 => 300,
        4 => 1200,
        _ => 0,
    }
}

/// The single game in progress. Time is passed in as seconds on the
/// render clock.
#[derive(Resource)]
pub struct Session {
    pub field: Field,
    pub piece: Piece,
    pub previous: Piece,
    pub next: Piece,
    pub score: u32,
    pub state: GameState,
    pub last_gravity_tick: f64,
    pub lock_timer_start: f64,
    pub update_delay: f64,
    pub lock_delay: f64,
    rng: StdRng,
}

impl Session {
    pub fn new(config: &GameConfig, now: f64) -> Self {
        Self::with_rng(config, now, StdRng::from_entropy())
    }

    /// The first piece is always an O; the preview is random.
    pub fn with_rng(config: &GameConfig, now: f64, mut rng: StdRng) -> Self {
        let piece = Piece::new(ShapeKind::O);
        let next = Piece::new(rng.gen());
        Session {
            field: Field::new(config.field_width, config.field_height),
            piece,
            previous: piece.snapshot(),
            next,
            score: 0,
            state: GameState::Playing,
            last_gravity_tick: now,
            lock_timer_start: now,
            update_delay: config.update_delay,
            lock_delay: config.lock_delay,
            rng,
        }
    }

    pub fn is_game_over(&self) -> bool {
        self.state == GameState::GameOver
    }

    pub fn apply(&mut self, action: Action) {
        match action {
            Action::MoveLeft => self.handle_move(-1, 0),
            Action::MoveRight => self.handle_move(1, 0),
            Action::SoftDrop => self.handle_move(0, 1),
            Action::RotateCW => self.handle_rotate(1),
            Action::RotateCCW => self.handle_rotate(-1),
            Action::HardDrop => self.hard_drop(),
            Action::PrintField => info!("field:\n{}", self.field),
        }
    }

    pub fn handle_move(&mut self, dx: i32, dy: i32) {
        if self.is_game_over() {
            return;
        }
        self.piece.move_by(dx, dy);
        if !is_valid(&self.piece, &self.field) {
            self.piece.move_by(-dx, -dy);
        }
    }

    pub fn handle_rotate(&mut self, direction: i32) {
        if self.is_game_over() {
            return;
        }
        self.piece.rotate(direction);
        if !is_valid(&self.piece, &self.field) {
            self.piece.rotate(-direction);
        }
    }

    /// Landing position of the active piece.
    pub fn projection(&self) -> Piece {
        project(&self.piece, &self.field)
    }

    /// Locks `piece` into the field, scores cleared rows and spawns the next
    /// piece. `piece` must be in a valid position.
    pub fn place(&mut self, piece: Piece) {
        if self.is_game_over() {
            return;
        }
        self.field.place(&piece);
        debug!(
            "locked {:?} rotation {} at {}",
            piece.kind(),
            piece.rotation(),
            piece.position()
        );
        self.clear_rows();

        self.piece.reset(Some(self.next.kind()));
        self.next.reset(Some(self.rng.gen()));

        if !is_valid(&self.piece, &self.field) {
            self.state = GameState::GameOver;
            info!("game over, final score {}", self.score);
        }
    }

    pub fn hard_drop(&mut self) {
        if self.is_game_over() {
            return;
        }
        self.place(self.projection());
        self.clear_rows();
    }

    fn clear_rows(&mut self) {
        let cleared = self.field.clear_full_rows();
        let points = line_clear_points(cleared);
        self.score += points;
        if cleared > 0 {
            info!(
                "cleared {} rows for {} points, score {}",
                cleared, points, self.score
            );
        }
    }

    /// One frame: keep the piece inside the field, then advance the game
    /// unless it is over.
    pub fn update(&mut self, now: f64) {
        let max = IVec2::new(self.field.width() as i32 - 1, self.field.height() as i32 - 1);
        self.piece.clamp(IVec2::ZERO, max);
        if !self.is_game_over() {
            self.step(now);
        }
    }

    fn step(&mut self, now: f64) {
        if !is_valid(&self.piece, &self.field) {
            self.piece.restore_from(&self.previous);
        }

        if now - self.last_gravity_tick >= self.update_delay {
            self.last_gravity_tick = now;
            self.piece.move_by(0, 1);
            if !is_valid(&self.piece, &self.field) {
                self.piece.move_by(0, -1);
            }
        }

        let projected = self.projection();
        if self.piece.position().y != projected.position().y {
            self.lock_timer_start = now;
        }

        if now - self.lock_timer_start >= self.lock_delay {
            self.place(self.piece);
        }

        self.previous = self.piece.snapshot();
    }
}
