// Input handling system
//
// Keyboard events are mapped to actions through `InputConfig`, tracked per tick by
// `InputState`, and turned into `Controls` for the world update.
//
// ## Usage Example
//
// ```rust
// let mut input = InputManager::default();
//
// // In the event loop
// input.process_keyboard_event(&key_event);
//
// // Once per tick
// world.tick(&input.controls(), now_ms);
// input.end_tick();
// ```

pub mod action;
pub mod config;
pub mod manager;
pub mod state;

pub use manager::InputManager;
