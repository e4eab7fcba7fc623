// Core helpers shared by engine and game code

pub mod math;

pub use math::{DirectionFlags, Rect};
