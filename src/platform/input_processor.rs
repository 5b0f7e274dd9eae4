//=========================================================================
// Input Processor
//=========================================================================
//
// Converts winit window events into portable InputEvents.
//
//   winit WindowEvent → InputProcessor → InputEvent → InputSink
//
// Modifier state is cached from ModifiersChanged and stamped onto every
// subsequent key and mouse button event. Keys without a mapping are
// dropped (returns None).
//
//=========================================================================

//=== External Dependencies ===============================================

use winit::{
    event::ElementState,
    event::{KeyEvent, MouseButton as WinitMouseButton},
    keyboard::{KeyCode as WinitKeyCode, ModifiersState, PhysicalKey},
};

//=== Internal Dependencies ===============================================

use crate::core::input::{InputEvent, KeyCode, Modifiers, MouseButton};

//=== InputProcessor ======================================================

pub(crate) struct InputProcessor {
    current_modifiers: Modifiers,
}

impl InputProcessor {
    pub(crate) fn new() -> Self {
        Self {
            current_modifiers: Modifiers::NONE,
        }
    }

    //--- Modifier State ---------------------------------------------------

    pub(crate) fn update_modifiers(&mut self, modifiers_state: ModifiersState) {
        self.current_modifiers = Modifiers::from(modifiers_state);
    }

    pub(crate) fn current_modifiers(&self) -> Modifiers {
        self.current_modifiers
    }

    //--- Event Processing -------------------------------------------------

    /// Key repeats are dropped; the input subsystem derives held state.
    pub(crate) fn process_key_event(&self, key_event: &KeyEvent) -> Option<InputEvent> {
        if key_event.repeat {
            return None;
        }

        let key_code = match key_event.physical_key {
            PhysicalKey::Code(code) => KeyCode::from(code),
            _ => return None,
        };

        if matches!(key_code, KeyCode::Unidentified) {
            return None;
        }

        Some(self.create_key_input_event(key_code, key_event.state))
    }

    pub(crate) fn process_mouse_button(
        &self,
        button: WinitMouseButton,
        state: ElementState,
    ) -> InputEvent {
        let button = MouseButton::from(button);
        let modifiers = self.current_modifiers;

        match state {
            ElementState::Pressed => InputEvent::MouseButtonDown { button, modifiers },
            ElementState::Released => InputEvent::MouseButtonUp { button, modifiers },
        }
    }

    pub(crate) fn process_mouse_move(&self, x: f64, y: f64) -> InputEvent {
        InputEvent::MouseMoved { x: x as f32, y: y as f32 }
    }

    fn create_key_input_event(&self, key: KeyCode, state: ElementState) -> InputEvent {
        let modifiers = self.current_modifiers;
        match state {
            ElementState::Pressed => InputEvent::KeyDown { key, modifiers },
            ElementState::Released => InputEvent::KeyUp { key, modifiers },
        }
    }
}

//=========================================================================
// Winit Conversions
//=========================================================================

/// winit already folds macOS Cmd into the logo key and Option into Alt.
impl From<ModifiersState> for Modifiers {
    fn from(state: ModifiersState) -> Self {
        Self {
            shift: state.shift_key(),
            ctrl: state.control_key(),
            alt: state.alt_key(),
        }
    }
}

/// Every mapped key has the same variant name on both sides.
macro_rules! same_name_keys {
    ($code:expr; $($key:ident),* $(,)?) => {
        match $code {
            $(WinitKeyCode::$key => KeyCode::$key,)*
            _ => KeyCode::Unidentified,
        }
    };
}

impl From<WinitKeyCode> for KeyCode {
    fn from(code: WinitKeyCode) -> Self {
        same_name_keys!(code;
            Digit0, Digit1, Digit2, Digit3, Digit4,
            Digit5, Digit6, Digit7, Digit8, Digit9,

            KeyA, KeyB, KeyC, KeyD, KeyE, KeyF, KeyG, KeyH, KeyI,
            KeyJ, KeyK, KeyL, KeyM, KeyN, KeyO, KeyP, KeyQ, KeyR,
            KeyS, KeyT, KeyU, KeyV, KeyW, KeyX, KeyY, KeyZ,

            F1, F2, F3, F4, F5, F6, F7, F8, F9, F10, F11, F12,

            ArrowUp, ArrowDown, ArrowLeft, ArrowRight,

            Space, Enter, Escape, Tab, Backspace, Delete, Backquote,
        )
    }
}

impl From<WinitMouseButton> for MouseButton {
    fn from(button: WinitMouseButton) -> Self {
        match button {
            WinitMouseButton::Left => MouseButton::Left,
            WinitMouseButton::Right => MouseButton::Right,
            WinitMouseButton::Middle => MouseButton::Middle,
            _ => MouseButton::Other,
        }
    }
}

//=========================================================================
// Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn make_modifiers(shift: bool, ctrl: bool, alt: bool) -> ModifiersState {
        let mut state = ModifiersState::empty();
        if shift { state.insert(ModifiersState::SHIFT); }
        if ctrl { state.insert(ModifiersState::CONTROL); }
        if alt { state.insert(ModifiersState::ALT); }
        state
    }

    //=====================================================================
    // Modifier Tracking
    //=====================================================================

    #[test]
    fn starts_with_no_modifiers() {
        let processor = InputProcessor::new();
        assert_eq!(processor.current_modifiers(), Modifiers::NONE);
    }

    #[test]
    fn key_events_carry_cached_modifiers() {
        let mut processor = InputProcessor::new();
        processor.update_modifiers(make_modifiers(false, true, false));

        let event = processor.create_key_input_event(KeyCode::F8, ElementState::Pressed);

        assert_eq!(event, InputEvent::KeyDown { key: KeyCode::F8, modifiers: Modifiers::CTRL });
    }

    #[test]
    fn released_key_maps_to_key_up() {
        let processor = InputProcessor::new();
        let event = processor.create_key_input_event(KeyCode::Escape, ElementState::Released);
        assert_eq!(event, InputEvent::key_up(KeyCode::Escape));
    }

    #[test]
    fn modifiers_persist_across_event_kinds() {
        let mut processor = InputProcessor::new();
        processor.update_modifiers(make_modifiers(true, false, false));

        let click = processor.process_mouse_button(WinitMouseButton::Left, ElementState::Pressed);
        let key = processor.create_key_input_event(KeyCode::Space, ElementState::Pressed);

        assert!(matches!(click, InputEvent::MouseButtonDown { modifiers, .. } if modifiers.shift));
        assert!(matches!(key, InputEvent::KeyDown { modifiers, .. } if modifiers.shift));
    }

    #[test]
    fn mouse_move_narrows_to_f32() {
        let processor = InputProcessor::new();
        assert_eq!(
            processor.process_mouse_move(123.5, 456.25),
            InputEvent::MouseMoved { x: 123.5, y: 456.25 }
        );
    }

    //=====================================================================
    // Key Mapping
    //=====================================================================

    #[test]
    fn runtime_hotkeys_are_mapped() {
        assert_eq!(KeyCode::from(WinitKeyCode::F8), KeyCode::F8);
        assert_eq!(KeyCode::from(WinitKeyCode::KeyP), KeyCode::KeyP);
        assert_eq!(KeyCode::from(WinitKeyCode::KeyO), KeyCode::KeyO);
        assert_eq!(KeyCode::from(WinitKeyCode::KeyT), KeyCode::KeyT);
        assert_eq!(KeyCode::from(WinitKeyCode::Backquote), KeyCode::Backquote);
    }

    #[test]
    fn exotic_keys_are_unidentified() {
        assert_eq!(KeyCode::from(WinitKeyCode::F13), KeyCode::Unidentified);
        assert_eq!(KeyCode::from(WinitKeyCode::NumpadAdd), KeyCode::Unidentified);
    }

    #[test]
    fn side_mouse_buttons_fold_to_other() {
        assert_eq!(MouseButton::from(WinitMouseButton::Middle), MouseButton::Middle);
        assert_eq!(MouseButton::from(WinitMouseButton::Back), MouseButton::Other);
        assert_eq!(MouseButton::from(WinitMouseButton::Other(7)), MouseButton::Other);
    }
}
