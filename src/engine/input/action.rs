// Game action definitions and default key bindings

use winit::keyboard::KeyCode;

/// Represents all possible in-game actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    // Movement
    MoveLeft,
    MoveRight,
    MoveUp,
    MoveDown,

    // Combat
    Attack,
}

/// Default keyboard bindings: arrow keys move, space attacks
pub fn default_bindings() -> Vec<(KeyCode, Action)> {
    vec![
        (KeyCode::ArrowLeft, Action::MoveLeft),
        (KeyCode::ArrowRight, Action::MoveRight),
        (KeyCode::ArrowUp, Action::MoveUp),
        (KeyCode::ArrowDown, Action::MoveDown),
        (KeyCode::Space, Action::Attack),
    ]
}
