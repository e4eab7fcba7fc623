// Held and edge-triggered action state

use super::action::Action;
use crate::core::DirectionFlags;
use crate::game::world::Controls;
use std::collections::HashSet;

/// Input state for the local player
#[derive(Debug, Default)]
pub struct InputState {
    /// Actions currently held
    pressed: HashSet<Action>,

    /// Actions that went down since the last tick
    just_pressed: HashSet<Action>,
}

impl InputState {
    /// Check if an action is currently pressed
    pub fn is_pressed(&self, action: Action) -> bool {
        self.pressed.contains(&action)
    }

    /// Check if an action was just pressed this tick
    pub fn just_pressed(&self, action: Action) -> bool {
        self.just_pressed.contains(&action)
    }

    /// Register an action press. Pressing an already held action is not a new press.
    pub(crate) fn press(&mut self, action: Action) {
        if self.pressed.insert(action) {
            self.just_pressed.insert(action);
        }
    }

    /// Register an action release. A press in the same tick still counts.
    pub(crate) fn release(&mut self, action: Action) {
        self.pressed.remove(&action);
    }

    /// Clear edge state; call once after each tick consumed the input
    pub fn end_tick(&mut self) {
        self.just_pressed.clear();
    }

    /// Release everything, e.g. when the window loses focus
    pub fn reset(&mut self) {
        self.pressed.clear();
        self.just_pressed.clear();
    }

    /// Held state of the four movement actions
    pub fn direction_flags(&self) -> DirectionFlags {
        DirectionFlags {
            left: self.is_pressed(Action::MoveLeft),
            right: self.is_pressed(Action::MoveRight),
            up: self.is_pressed(Action::MoveUp),
            down: self.is_pressed(Action::MoveDown),
        }
    }

    /// Player intent for the next tick
    pub fn controls(&self) -> Controls {
        Controls {
            direction: self.direction_flags().to_vector(),
            attack_pressed: self.just_pressed(Action::Attack),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::IVec2;

    #[test]
    fn test_press_action() {
        let mut input = InputState::default();
        input.press(Action::Attack);
        assert!(input.is_pressed(Action::Attack));
        assert!(input.just_pressed(Action::Attack));
    }

    #[test]
    fn test_release_action() {
        let mut input = InputState::default();
        input.press(Action::MoveUp);
        input.end_tick();
        input.release(Action::MoveUp);
        assert!(!input.is_pressed(Action::MoveUp));
        assert!(!input.just_pressed(Action::MoveUp));
    }

    #[test]
    fn test_release_unpressed_action() {
        let mut input = InputState::default();
        input.release(Action::MoveUp);
        assert!(!input.is_pressed(Action::MoveUp));
        assert_eq!(input.controls(), Controls::default());
    }

    #[test]
    fn test_just_pressed_cleared_on_end_tick() {
        let mut input = InputState::default();
        input.press(Action::Attack);
        input.end_tick();
        assert!(input.is_pressed(Action::Attack));
        assert!(!input.just_pressed(Action::Attack));
    }

    #[test]
    fn test_held_key_is_not_a_fresh_press() {
        let mut input = InputState::default();
        input.press(Action::Attack);
        input.end_tick();
        input.press(Action::Attack);
        assert!(!input.just_pressed(Action::Attack));
        assert!(!input.controls().attack_pressed);
    }

    #[test]
    fn test_controls_direction() {
        let mut input = InputState::default();
        assert_eq!(input.controls(), Controls::default());

        input.press(Action::MoveRight);
        input.press(Action::MoveUp);
        assert_eq!(input.controls().direction, IVec2::new(1, -1));

        input.press(Action::MoveLeft);
        assert_eq!(input.controls().direction, IVec2::new(0, -1));
    }

    #[test]
    fn test_controls_attack_edge() {
        let mut input = InputState::default();
        input.press(Action::Attack);
        assert!(input.controls().attack_pressed);
        input.end_tick();
        assert!(!input.controls().attack_pressed);
    }

    #[test]
    fn test_reset() {
        let mut input = InputState::default();
        input.press(Action::MoveDown);
        input.press(Action::Attack);
        input.reset();
        assert_eq!(input.direction_flags(), DirectionFlags::default());
        assert!(!input.just_pressed(Action::Attack));
    }
}
