//! Action-to-key bindings, loaded as part of the game config.

use crate::InputState;
use serde::{Deserialize, Serialize};

/// Keys bound to each flight action. Any listed key activates the action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub pitch_up: Vec<String>,
    pub pitch_down: Vec<String>,
    pub roll_left: Vec<String>,
    pub roll_right: Vec<String>,
    pub speed_up: Vec<String>,
    pub speed_down: Vec<String>,
    pub fire: Vec<String>,
    /// Single key: the camera toggle is edge-triggered on one physical key.
    pub camera_toggle: String,
}

fn keys(codes: &[&str]) -> Vec<String> {
    codes.iter().map(|c| (*c).to_owned()).collect()
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            pitch_up: keys(&["KeyS", "ArrowDown"]),
            pitch_down: keys(&["KeyW", "ArrowUp"]),
            roll_left: keys(&["KeyA", "ArrowLeft"]),
            roll_right: keys(&["KeyD", "ArrowRight"]),
            speed_up: keys(&["ShiftLeft", "ShiftRight"]),
            speed_down: keys(&["ControlLeft", "ControlRight"]),
            fire: keys(&["Space"]),
            camera_toggle: "KeyC".to_owned(),
        }
    }
}

impl KeyBindings {
    /// Resolve two opposing key groups into -1, 0 or 1. Holding both cancels out.
    pub fn axis(input: &InputState, positive: &[String], negative: &[String]) -> f32 {
        let mut value = 0.0;
        if input.any_down(positive) {
            value += 1.0;
        }
        if input.any_down(negative) {
            value -= 1.0;
        }
        value
    }

    pub fn is_firing(&self, input: &InputState) -> bool {
        input.any_down(&self.fire)
    }

    /// A fresh [`InputState`] whose toggle watches this binding set's camera key.
    pub fn input_state(&self) -> InputState {
        InputState::new(self.camera_toggle.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::KeyState;

    #[test]
    fn axis_resolves_to_unit_steps() {
        let b = KeyBindings::default();
        let mut input = b.input_state();
        assert_eq!(KeyBindings::axis(&input, &b.roll_left, &b.roll_right), 0.0);

        input.process_keyboard("ArrowLeft", KeyState::Pressed);
        assert_eq!(KeyBindings::axis(&input, &b.roll_left, &b.roll_right), 1.0);

        input.process_keyboard("KeyD", KeyState::Pressed);
        assert_eq!(KeyBindings::axis(&input, &b.roll_left, &b.roll_right), 0.0);

        input.process_keyboard("ArrowLeft", KeyState::Released);
        assert_eq!(KeyBindings::axis(&input, &b.roll_left, &b.roll_right), -1.0);
    }

    #[test]
    fn toggle_key_comes_from_bindings() {
        let b = KeyBindings {
            camera_toggle: "KeyV".to_owned(),
            ..Default::default()
        };
        let mut input = b.input_state();
        input.process_keyboard("KeyV", KeyState::Pressed);
        assert!(input.consume_toggle());
    }
}
