// src/main.rs
mod collision;
mod config;
mod field;
mod input;
mod piece;
mod render;
mod session;

use bevy::prelude::*;
use bevy::window::WindowResolution;
use config::GameConfig;
use input::player_input_system;
use render::{
    draw_field_system, draw_grid_system, draw_preview_system, setup_board,
    setup_game_over_screen, update_score_text,
};
use session::{GameState, Session};

fn setup_game(mut commands: Commands, config: Res<GameConfig>, time: Res<Time>) {
    commands.spawn(Camera2d);
    commands.insert_resource(Session::new(&config, time.elapsed_secs_f64()));
    info!(
        "Game setup complete ({}x{} field).",
        config.field_width, config.field_height
    );
}

// Clamps the active piece and advances gravity/lock timers.
fn advance_session_system(time: Res<Time>, mut session: ResMut<Session>) {
    session.update(time.elapsed_secs_f64());
}

fn sync_game_state(
    session: Res<Session>,
    state: Res<State<GameState>>,
    mut next_game_state: ResMut<NextState<GameState>>,
) {
    if session.state != *state.get() {
        next_game_state.set(session.state);
    }
}

fn main() -> AppExit {
    let config = GameConfig::default();
    let window = Window {
        title: config.window_title.clone(),
        resolution: WindowResolution::new(config.window_width, config.window_height),
        resizable: false,
        ..default()
    };

    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(window),
            ..default()
        }))
        .insert_resource(config)
        .init_state::<GameState>()
        .add_systems(Startup, (setup_game, setup_board).chain())
        .add_systems(
            Update,
            (
                player_input_system,
                advance_session_system,
                sync_game_state,
                (
                    draw_field_system,
                    draw_preview_system,
                    draw_grid_system,
                    update_score_text,
                ),
            )
                .chain(),
        )
        .add_systems(OnEnter(GameState::GameOver), setup_game_over_screen)
        .run()
}
