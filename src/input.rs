// src/input.rs
use bevy::prelude::*;

use crate::session::{Action, Session};

// On-press bindings.
pub const KEY_BINDINGS: [(KeyCode, Action); 7] = [
    (KeyCode::KeyD, Action::MoveRight),
    (KeyCode::KeyA, Action::MoveLeft),
    (KeyCode::KeyS, Action::SoftDrop),
    (KeyCode::KeyE, Action::RotateCW),
    (KeyCode::KeyQ, Action::RotateCCW),
    (KeyCode::Space, Action::HardDrop),
    (KeyCode::KeyP, Action::PrintField),
];

pub fn action_for_key(key: KeyCode) -> Option<Action> {
    KEY_BINDINGS
        .iter()
        .find(|(bound, _)| *bound == key)
        .map(|&(_, action)| action)
}

/// Actions whose keys went down this frame.
pub fn pressed_actions(keyboard_input: &ButtonInput<KeyCode>) -> Vec<Action> {
    keyboard_input
        .get_just_pressed()
        .filter_map(|&key| action_for_key(key))
        .collect()
}

pub fn player_input_system(
    keyboard_input: Res<ButtonInput<KeyCode>>,
    mut session: ResMut<Session>,
) {
    for action in pressed_actions(&keyboard_input) {
        session.apply(action);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_action_is_bound_once() {
        for (i, (key, action)) in KEY_BINDINGS.iter().enumerate() {
            assert_eq!(action_for_key(*key), Some(*action));
            assert!(KEY_BINDINGS[i + 1..].iter().all(|(k, a)| k != key && a != action));
        }
        assert_eq!(action_for_key(KeyCode::KeyZ), None);
    }

    #[test]
    fn test_pressed_actions_only_reports_new_presses() {
        let mut keyboard_input = ButtonInput::<KeyCode>::default();
        keyboard_input.press(KeyCode::KeyA);
        keyboard_input.press(KeyCode::Space);
        keyboard_input.press(KeyCode::KeyZ);
        let actions = pressed_actions(&keyboard_input);
        assert_eq!(actions.len(), 2);
        assert!(actions.contains(&Action::MoveLeft));
        assert!(actions.contains(&Action::HardDrop));

        keyboard_input.clear();
        assert!(pressed_actions(&keyboard_input).is_empty());
    }
}
