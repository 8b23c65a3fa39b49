// src/render.rs
use bevy::prelude::*;
use bevy::sprite::Anchor;

use crate::config::GameConfig;
use crate::piece::Piece;
use crate::session::Session;

const EMPTY_COLOR: Color = Color::srgb(0.0, 0.0, 0.0);
const GRID_COLOR: Color = Color::srgb(75.0 / 255.0, 80.0 / 255.0, 85.0 / 255.0);
const SCORE_FONT_SIZE: f32 = 28.0;

/// One sprite per field cell.
#[derive(Component, Debug, Clone, Copy)]
pub struct FieldCell(pub IVec2);

/// One sprite per cell of the 4x4 next-piece preview.
#[derive(Component, Debug, Clone, Copy)]
pub struct PreviewCell(pub IVec2);

#[derive(Component)]
pub struct ScoreText;

#[derive(Component)]
pub struct GameOverText;

pub fn setup_board(mut commands: Commands, config: Res<GameConfig>) {
    let size = Vec2::splat(config.cell_size - 1.0);

    for row in 0..config.field_height as i32 {
        for col in 0..config.field_width as i32 {
            let center = config.cell_center(col, row);
            commands.spawn((
                Sprite::from_color(EMPTY_COLOR, size),
                Transform::from_translation(center.extend(0.0)),
                FieldCell(IVec2::new(col, row)),
            ));
        }
    }

    // Preview sits two columns right of the field, two rows down.
    let preview_origin = IVec2::new(config.field_width as i32 + 2, 2);
    for row in 0..4 {
        for col in 0..4 {
            let offset = IVec2::new(col, row);
            let center = config.cell_center(preview_origin.x + col, preview_origin.y + row);
            commands.spawn((
                Sprite::from_color(Color::NONE, size),
                Transform::from_translation(center.extend(0.0)),
                PreviewCell(offset),
            ));
        }
    }

    commands.spawn((
        Text2d::new("Score: 0"),
        TextFont {
            font_size: SCORE_FONT_SIZE,
            ..default()
        },
        TextColor(Color::WHITE),
        Anchor::BottomCenter,
        Transform::from_translation(score_text_translation(&config)),
        ScoreText,
    ));
}

/// Bottom edge of the score line, just above the field.
pub fn score_text_translation(config: &GameConfig) -> Vec3 {
    Vec3::new(0.0, config.field_top_left().y + 2.0, 1.0)
}

/// Color of field cell `cell`: locked cells first, then the active piece,
/// then the landing projection.
pub fn cell_color(session: &Session, projection: Option<&Piece>, cell: IVec2) -> Color {
    if let Some(kind) = session.field.cell_at(cell.x, cell.y) {
        return kind.color();
    }
    if session.piece.covers(cell) {
        return session.piece.kind().color();
    }
    match projection {
        Some(ghost) if ghost.covers(cell) => ghost.kind().faded_color(),
        _ => EMPTY_COLOR,
    }
}

pub fn draw_field_system(session: Res<Session>, mut cells: Query<(&FieldCell, &mut Sprite)>) {
    let projection = (!session.is_game_over()).then(|| session.projection());
    for (cell, mut sprite) in &mut cells {
        sprite.color = cell_color(&session, projection.as_ref(), cell.0);
    }
}

pub fn draw_preview_system(session: Res<Session>, mut cells: Query<(&PreviewCell, &mut Sprite)>) {
    let next = &session.next;
    for (cell, mut sprite) in &mut cells {
        sprite.color = if next.local_cells().any(|local| local == cell.0) {
            next.kind().color()
        } else {
            Color::NONE
        };
    }
}

pub fn draw_grid_system(mut gizmos: Gizmos, config: Res<GameConfig>) {
    let top_left = config.field_top_left();
    let width = config.field_width as f32 * config.cell_size;
    let height = config.field_height as f32 * config.cell_size;

    for col in 0..=config.field_width {
        let x = top_left.x + col as f32 * config.cell_size;
        gizmos.line_2d(Vec2::new(x, top_left.y), Vec2::new(x, top_left.y - height), GRID_COLOR);
    }
    for row in 0..=config.field_height {
        let y = top_left.y - row as f32 * config.cell_size;
        gizmos.line_2d(Vec2::new(top_left.x, y), Vec2::new(top_left.x + width, y), GRID_COLOR);
    }
}

pub fn update_score_text(session: Res<Session>, mut texts: Query<&mut Text2d, With<ScoreText>>) {
    for mut text in &mut texts {
        text.0 = format!("Score: {}", session.score);
    }
}

pub fn setup_game_over_screen(mut commands: Commands, session: Res<Session>) {
    info!("Game over with score {}", session.score);
    commands.spawn((
        Text2d::new("GAME OVER"),
        TextFont {
            font_size: 64.0,
            ..default()
        },
        TextColor(Color::WHITE),
        Transform::from_xyz(0.0, 0.0, 2.0),
        GameOverText,
    ));
}
