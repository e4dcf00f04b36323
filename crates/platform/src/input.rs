//! Input handling for keyboard and pointer.
//!
//! Events are accumulated between frames; the host drains per-frame deltas
//! (drag, scroll) once per tick and calls [`InputState::begin_frame`].

use std::collections::HashSet;

pub use winit::keyboard::KeyCode;

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

impl MouseButton {
    /// Map a winit button; extra buttons are not tracked.
    pub fn from_winit(button: winit::event::MouseButton) -> Option<Self> {
        match button {
            winit::event::MouseButton::Left => Some(Self::Left),
            winit::event::MouseButton::Right => Some(Self::Right),
            winit::event::MouseButton::Middle => Some(Self::Middle),
            _ => None,
        }
    }
}

/// Tracks the current state of keyboard and pointer input.
#[derive(Debug, Default)]
pub struct InputState {
    /// Currently pressed keys
    pressed_keys: HashSet<KeyCode>,
    /// Keys that were just pressed this frame
    just_pressed_keys: HashSet<KeyCode>,

    /// Currently pressed mouse buttons
    pressed_buttons: HashSet<MouseButton>,

    /// Last known pointer position, if the pointer has been seen
    pointer: Option<(f32, f32)>,
    /// Pointer movement accumulated this frame
    pointer_delta: (f32, f32),
    /// Scroll accumulated this frame, in lines
    scroll: f32,
}

impl InputState {
    /// Create a new input state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Call at the beginning of each frame to clear per-frame state.
    pub fn begin_frame(&mut self) {
        self.just_pressed_keys.clear();
        self.pointer_delta = (0.0, 0.0);
        self.scroll = 0.0;
    }

    /// Handle a key press event.
    pub fn on_key_pressed(&mut self, key: KeyCode) {
        if self.pressed_keys.insert(key) {
            self.just_pressed_keys.insert(key);
        }
    }

    /// Handle a key release event.
    pub fn on_key_released(&mut self, key: KeyCode) {
        self.pressed_keys.remove(&key);
    }

    /// Handle a mouse button press event.
    pub fn on_mouse_pressed(&mut self, button: MouseButton) {
        self.pressed_buttons.insert(button);
    }

    /// Handle a mouse button release event.
    pub fn on_mouse_released(&mut self, button: MouseButton) {
        self.pressed_buttons.remove(&button);
    }

    /// Handle pointer movement. Deltas accumulate until the next frame; the
    /// first sighting of the pointer produces no delta.
    pub fn on_pointer_moved(&mut self, x: f32, y: f32) {
        if let Some((old_x, old_y)) = self.pointer {
            self.pointer_delta.0 += x - old_x;
            self.pointer_delta.1 += y - old_y;
        }
        self.pointer = Some((x, y));
    }

    /// The pointer left the window; the next movement starts fresh.
    pub fn on_pointer_left(&mut self) {
        self.pointer = None;
    }

    /// Handle scroll, in lines. Positive is away from the user.
    pub fn on_scroll(&mut self, lines: f32) {
        self.scroll += lines;
    }

    /// Check if a key is currently pressed.
    pub fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.pressed_keys.contains(&key)
    }

    /// Check if a key was just pressed this frame.
    pub fn is_key_just_pressed(&self, key: KeyCode) -> bool {
        self.just_pressed_keys.contains(&key)
    }

    /// Check if a mouse button is currently pressed.
    pub fn is_mouse_pressed(&self, button: MouseButton) -> bool {
        self.pressed_buttons.contains(&button)
    }

    /// Pointer movement while `button` is held, accumulated this frame.
    pub fn drag_delta(&self, button: MouseButton) -> Option<(f32, f32)> {
        (self.is_mouse_pressed(button) && self.pointer_delta != (0.0, 0.0))
            .then_some(self.pointer_delta)
    }

    /// Scroll accumulated this frame.
    pub fn scroll(&self) -> f32 {
        self.scroll
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_just_pressed_lasts_one_frame() {
        let mut input = InputState::new();
        input.on_key_pressed(KeyCode::KeyR);
        assert!(input.is_key_just_pressed(KeyCode::KeyR));

        // Key repeat does not re-trigger
        input.begin_frame();
        input.on_key_pressed(KeyCode::KeyR);
        assert!(input.is_key_pressed(KeyCode::KeyR));
        assert!(!input.is_key_just_pressed(KeyCode::KeyR));

        input.on_key_released(KeyCode::KeyR);
        assert!(!input.is_key_pressed(KeyCode::KeyR));
    }

    #[test]
    fn test_drag_accumulates_while_pressed() {
        let mut input = InputState::new();
        input.on_pointer_moved(10.0, 10.0);
        input.on_pointer_moved(15.0, 8.0);
        assert_eq!(input.drag_delta(MouseButton::Left), None);

        input.on_mouse_pressed(MouseButton::Left);
        input.on_pointer_moved(20.0, 10.0);
        assert_eq!(input.drag_delta(MouseButton::Left), Some((10.0, 0.0)));

        input.begin_frame();
        assert_eq!(input.drag_delta(MouseButton::Left), None);
        input.on_pointer_moved(21.0, 13.0);
        assert_eq!(input.drag_delta(MouseButton::Left), Some((1.0, 3.0)));
    }

    #[test]
    fn test_pointer_reentry_has_no_jump() {
        let mut input = InputState::new();
        input.on_mouse_pressed(MouseButton::Left);
        input.on_pointer_moved(0.0, 0.0);
        input.on_pointer_left();
        input.on_pointer_moved(500.0, 500.0);
        assert_eq!(input.drag_delta(MouseButton::Left), None);
    }

    #[test]
    fn test_scroll_resets_each_frame() {
        let mut input = InputState::new();
        input.on_scroll(1.0);
        input.on_scroll(2.0);
        assert_eq!(input.scroll(), 3.0);
        input.begin_frame();
        assert_eq!(input.scroll(), 0.0);
    }
}
