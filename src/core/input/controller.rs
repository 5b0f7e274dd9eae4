//=========================================================================
// Controller State
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashSet;

//=== Internal Dependencies ===============================================

use super::event::ControllerButton;

//=== Constants ===========================================================

pub const MAX_CONTROLLERS: usize = 4;

//=== ControllerState =====================================================

/// Button state for one gamepad slot.
#[derive(Debug, Default)]
pub struct ControllerState {
    connected: bool,
    down: HashSet<ControllerButton>,
    pressed: HashSet<ControllerButton>,
    released: HashSet<ControllerButton>,
}

impl ControllerState {
    pub(super) fn begin_frame(&mut self) {
        self.pressed.clear();
        self.released.clear();
    }

    pub(super) fn set_connected(&mut self, connected: bool) {
        self.connected = connected;
        if !connected {
            self.release_all();
        }
    }

    pub(super) fn release_all(&mut self) {
        self.released.extend(self.down.drain());
    }

    pub(super) fn button_down(&mut self, button: ControllerButton) {
        // A button event implies a live pad.
        self.connected = true;
        if self.down.insert(button) {
            self.pressed.insert(button);
        }
    }

    pub(super) fn button_up(&mut self, button: ControllerButton) {
        if self.down.remove(&button) {
            self.released.insert(button);
        }
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    pub fn was_button_just_pressed(&self, button: ControllerButton) -> bool {
        self.pressed.contains(&button)
    }

    pub fn was_button_just_released(&self, button: ControllerButton) -> bool {
        self.released.contains(&button)
    }

    pub fn is_button_down(&self, button: ControllerButton) -> bool {
        self.down.contains(&button)
    }
}

//=========================================================================
// Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn button_edges_reset_each_frame() {
        let mut pad = ControllerState::default();
        pad.button_down(ControllerButton::Start);

        assert!(pad.is_connected());
        assert!(pad.was_button_just_pressed(ControllerButton::Start));

        pad.begin_frame();
        assert!(!pad.was_button_just_pressed(ControllerButton::Start));
        assert!(pad.is_button_down(ControllerButton::Start));
    }

    #[test]
    fn disconnect_releases_held_buttons() {
        let mut pad = ControllerState::default();
        pad.button_down(ControllerButton::A);
        pad.begin_frame();

        pad.set_connected(false);

        assert!(!pad.is_connected());
        assert!(!pad.is_button_down(ControllerButton::A));
        assert!(pad.was_button_just_released(ControllerButton::A));
    }
}
