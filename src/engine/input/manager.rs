// Input manager - routes window keyboard events into input state

use super::config::InputConfig;
use super::state::InputState;
use crate::game::world::Controls;
use winit::event::{ElementState, KeyEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Keyboard input for the local player
#[derive(Debug, Default)]
pub struct InputManager {
    config: InputConfig,
    state: InputState,
}

impl InputManager {
    /// Process a keyboard event from winit
    pub fn process_keyboard_event(&mut self, event: &KeyEvent) {
        // Only process physical key presses
        if let PhysicalKey::Code(key_code) = event.physical_key {
            // Auto-repeat is not a fresh press
            if event.repeat {
                return;
            }
            self.process_key(key_code, event.state);
        }
    }

    /// Apply a key transition
    pub fn process_key(&mut self, key: KeyCode, state: ElementState) {
        let Some(action) = self.config.get_action(key) else {
            return;
        };

        match state {
            ElementState::Pressed => self.state.press(action),
            ElementState::Released => self.state.release(action),
        }
    }

    /// Player intent for the next tick
    pub fn controls(&self) -> Controls {
        self.state.controls()
    }

    /// Call after every tick so a press only counts once
    pub fn end_tick(&mut self) {
        self.state.end_tick();
    }

    /// Drop all held keys (focus lost)
    pub fn reset(&mut self) {
        self.state.reset();
    }
}
