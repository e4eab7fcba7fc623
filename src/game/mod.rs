// Game logic: entities, their behaviours and the per-tick world update

pub mod animation;
pub mod attack;
pub mod chase;
pub mod config;
pub mod entity;
pub mod pose;
pub mod session;
pub mod world;

pub use config::{Edition, GameConfig};
pub use session::{DrawItem, Session};
