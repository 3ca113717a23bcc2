//! Input handling for keyboard and pointer.
//!
//! The host input layer writes into [`InputState`] as events arrive; the
//! simulation reads it once per tick. Key codes are the host's string codes
//! (`"KeyW"`, `"ArrowUp"`, `"Space"`, ...).

pub mod bindings;

pub use bindings::KeyBindings;

use glam::Vec2;
use std::collections::HashSet;

/// Whether a key or button went down or up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyState {
    Pressed,
    Released,
}

/// Manages input state for the current frame.
#[derive(Debug, Default)]
pub struct InputState {
    /// Keys currently held down.
    keys_held: HashSet<String>,

    /// Key whose presses drive [`InputState::consume_toggle`].
    toggle_key: String,
    /// Toggle key state observed at the previous `consume_toggle` call.
    toggle_was_down: bool,

    /// Primary pointer button held (dragging).
    pointer_held: bool,
    /// Drag movement latched for this frame.
    drag_delta: Vec2,
    /// Drag movement accumulated since the last `begin_frame`.
    accumulated_drag: Vec2,
    /// Wheel movement latched for this frame.
    wheel_delta: f32,
    /// Wheel movement accumulated since the last `begin_frame`.
    accumulated_wheel: f32,
}

impl InputState {
    /// Create an input state whose edge-triggered toggle watches `toggle_key`.
    pub fn new(toggle_key: impl Into<String>) -> Self {
        Self {
            toggle_key: toggle_key.into(),
            ..Default::default()
        }
    }

    /// Latch pointer deltas accumulated since the previous frame. Call at the start of each frame.
    pub fn begin_frame(&mut self) {
        self.drag_delta = self.accumulated_drag;
        self.accumulated_drag = Vec2::ZERO;
        self.wheel_delta = self.accumulated_wheel;
        self.accumulated_wheel = 0.0;
    }

    /// Process a keyboard event.
    pub fn process_keyboard(&mut self, code: &str, state: KeyState) {
        match state {
            KeyState::Pressed => {
                // Auto-repeat sends repeated presses; the set makes them idempotent.
                if !self.keys_held.contains(code) {
                    self.keys_held.insert(code.to_owned());
                }
            }
            KeyState::Released => {
                self.keys_held.remove(code);
            }
        }
    }

    /// Drop every held key, e.g. when the host window loses focus and key-ups would be lost.
    pub fn release_all(&mut self) {
        if !self.keys_held.is_empty() {
            log::debug!("Releasing {} held keys", self.keys_held.len());
        }
        self.keys_held.clear();
        self.pointer_held = false;
    }

    /// Process the primary pointer button.
    pub fn process_pointer_button(&mut self, state: KeyState) {
        self.pointer_held = state == KeyState::Pressed;
    }

    /// Process pointer movement. Only counted while the primary button is held.
    pub fn process_pointer_motion(&mut self, delta: (f64, f64)) {
        if self.pointer_held {
            self.accumulated_drag.x += delta.0 as f32;
            self.accumulated_drag.y += delta.1 as f32;
        }
    }

    /// Process wheel movement. Positive values scroll away from the user (zoom in).
    pub fn process_wheel(&mut self, delta: f64) {
        self.accumulated_wheel += delta as f32;
    }

    // Query methods

    /// Check if a key is currently held. Unknown codes read as not held.
    pub fn is_down(&self, code: &str) -> bool {
        self.keys_held.contains(code)
    }

    /// True if any of `codes` is held.
    pub fn any_down<S: AsRef<str>>(&self, codes: &[S]) -> bool {
        codes.iter().any(|c| self.is_down(c.as_ref()))
    }

    /// Edge-triggered read of the toggle key: true exactly once per physical press.
    ///
    /// Call once per tick. Holding the key across many ticks yields a single `true`.
    pub fn consume_toggle(&mut self) -> bool {
        let down = self.is_down(&self.toggle_key);
        let fired = down && !self.toggle_was_down;
        self.toggle_was_down = down;
        fired
    }

    pub fn toggle_key(&self) -> &str {
        &self.toggle_key
    }

    pub fn is_dragging(&self) -> bool {
        self.pointer_held
    }

    /// Get the drag movement for this frame.
    pub fn drag_delta(&self) -> Vec2 {
        self.drag_delta
    }

    /// Get the wheel movement for this frame.
    pub fn wheel_delta(&self) -> f32 {
        self.wheel_delta
    }
}
