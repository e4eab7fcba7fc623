// Asset loading
//
// Sprite sheets are read from disk once, before the game loop starts. Any missing or
// malformed file is an error; nothing is substituted.

mod loader;
mod sheet;

pub use loader::AssetLoader;
pub use sheet::SpriteSheet;

/// Asset loading errors
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("Asset not found: {0}")]
    NotFound(String),

    #[error("Failed to load asset: {0}")]
    LoadError(String),

    #[error("Pose directory has no frames: {0}")]
    EmptyPose(String),

    #[error("Sprite sheet {name} is incomplete: {reason}")]
    IncompleteSheet { name: String, reason: String },

    #[error("No frame {frame} for pose {pose}")]
    MissingFrame { pose: String, frame: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
