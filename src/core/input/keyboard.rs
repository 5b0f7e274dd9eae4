//=========================================================================
// Keyboard & Mouse State
//=========================================================================
//
// Held state plus per-frame press/release deltas for keys and mouse
// buttons.
//
// Frame lifecycle: begin_frame() → apply()* → query
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashSet;

use glam::Vec2;

//=== Internal Dependencies ===============================================

use super::event::{KeyCode, Modifiers, MouseButton};

//=== KeyboardState =======================================================

#[derive(Debug, Default)]
pub struct KeyboardState {
    //--- Persistent State (survives frame boundary) ----------------------
    keys_down: HashSet<KeyCode>,
    buttons_down: HashSet<MouseButton>,
    cursor: Vec2,
    modifiers: Modifiers,

    //--- Frame Deltas (reset by begin_frame) -----------------------------
    keys_pressed: HashSet<KeyCode>,
    keys_released: HashSet<KeyCode>,
    buttons_pressed: HashSet<MouseButton>,
    buttons_released: HashSet<MouseButton>,
    cursor_at_frame_start: Vec2,
}

impl KeyboardState {
    pub fn new() -> Self {
        Self::default()
    }

    //--- Frame Processing -------------------------------------------------

    /// Clears per-frame deltas.
    pub(super) fn begin_frame(&mut self) {
        self.keys_pressed.clear();
        self.keys_released.clear();
        self.buttons_pressed.clear();
        self.buttons_released.clear();
        self.cursor_at_frame_start = self.cursor;
    }

    pub(super) fn key_down(&mut self, key: KeyCode, modifiers: Modifiers) {
        self.modifiers = modifiers;
        // Auto-repeat arrives as repeated downs; only the first one counts.
        if self.keys_down.insert(key) {
            self.keys_pressed.insert(key);
        }
    }

    pub(super) fn key_up(&mut self, key: KeyCode, modifiers: Modifiers) {
        self.modifiers = modifiers;
        if self.keys_down.remove(&key) {
            self.keys_released.insert(key);
        }
    }

    pub(super) fn button_down(&mut self, button: MouseButton, modifiers: Modifiers) {
        self.modifiers = modifiers;
        if self.buttons_down.insert(button) {
            self.buttons_pressed.insert(button);
        }
    }

    pub(super) fn button_up(&mut self, button: MouseButton, modifiers: Modifiers) {
        self.modifiers = modifiers;
        if self.buttons_down.remove(&button) {
            self.buttons_released.insert(button);
        }
    }

    pub(super) fn cursor_moved(&mut self, x: f32, y: f32) {
        self.cursor = Vec2::new(x, y);
    }

    /// Drops held state, e.g. when the window loses focus.
    pub(super) fn release_all(&mut self) {
        self.keys_released.extend(self.keys_down.drain());
        self.buttons_released.extend(self.buttons_down.drain());
        self.modifiers = Modifiers::NONE;
    }

    //=====================================================================
    // Query API - Keyboard
    //=====================================================================

    /// UP → DOWN this frame.
    pub fn was_key_just_pressed(&self, key: KeyCode) -> bool {
        self.keys_pressed.contains(&key)
    }

    /// DOWN → UP this frame.
    pub fn was_key_just_released(&self, key: KeyCode) -> bool {
        self.keys_released.contains(&key)
    }

    pub fn is_key_down(&self, key: KeyCode) -> bool {
        self.keys_down.contains(&key)
    }

    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    //=====================================================================
    // Query API - Mouse
    //=====================================================================

    pub fn was_mouse_just_pressed(&self, button: MouseButton) -> bool {
        self.buttons_pressed.contains(&button)
    }

    pub fn was_mouse_just_released(&self, button: MouseButton) -> bool {
        self.buttons_released.contains(&button)
    }

    pub fn is_mouse_down(&self, button: MouseButton) -> bool {
        self.buttons_down.contains(&button)
    }

    pub fn cursor_position(&self) -> Vec2 {
        self.cursor
    }

    /// Movement since the start of the frame.
    pub fn cursor_delta(&self) -> Vec2 {
        self.cursor - self.cursor_at_frame_start
    }
}

//=========================================================================
// Tests
//=========================================================================
