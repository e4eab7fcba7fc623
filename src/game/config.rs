// Game configuration presets
//
// There is no config file; each edition is a fixed preset. The command line picks the
// edition and the asset directory.

use std::path::PathBuf;

use glam::Vec2;

use super::attack::ATTACK_COOLDOWN_MS;
use super::chase::DEFAULT_DETECTION_RADIUS;
use crate::core::Rect;
use crate::engine::game_loop::DEFAULT_TICK_RATE;

/// Which release of the game to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, clap::ValueEnum)]
pub enum Edition {
    /// Walk-only, grid-sliced sheet, 500x500 window
    Classic,
    /// Attack plus a chasing enemy, per-pose sprite directories
    #[default]
    Chase,
    /// Attack without an enemy
    Melee,
}

/// Where a character's frames come from
#[derive(Debug, Clone, PartialEq)]
pub enum SheetSource {
    /// One image sliced into fixed-size cells (column = frame, row = pose code)
    Grid {
        path: PathBuf,
        cell_width: u32,
        cell_height: u32,
    },
    /// One subdirectory per pose label
    Directories { path: PathBuf },
}

/// Spawn parameters for an animated character
#[derive(Debug, Clone, PartialEq)]
pub struct CharacterSpec {
    pub bounds: Rect,
    pub speed: f32,
    pub sheet: SheetSource,
}

/// Enemy spawn parameters
#[derive(Debug, Clone, PartialEq)]
pub struct EnemySpec {
    pub character: CharacterSpec,
    pub detection_radius: f32,
}

/// A static image placed in the world
#[derive(Debug, Clone, PartialEq)]
pub struct PropSpec {
    pub bounds: Rect,
    /// Image path relative to the assets directory
    pub image: PathBuf,
}

/// Window parameters
#[derive(Debug, Clone, PartialEq)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl WindowConfig {
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }
}

/// Everything needed to set up a session
#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    pub edition: Edition,
    pub window: WindowConfig,
    pub tick_rate: u32,
    pub assets_dir: PathBuf,
    pub player: CharacterSpec,
    /// Attack cooldown in milliseconds; `None` disables attacking
    pub attack_cooldown_ms: Option<u64>,
    pub enemy: Option<EnemySpec>,
    /// Static props, drawn beneath the characters
    pub props: Vec<PropSpec>,
    pub show_hitboxes: bool,
    /// Drop the attack pose when an attack ends instead of holding it until the next move
    pub release_attack_pose: bool,
}

impl GameConfig {
    /// Preset for an edition, with assets under `data/`
    pub fn for_edition(edition: Edition) -> Self {
        match edition {
            Edition::Classic => Self::classic(),
            Edition::Chase => Self::chase(),
            Edition::Melee => Self::melee(),
        }
    }

    /// First release: walking only
    pub fn classic() -> Self {
        let window = WindowConfig {
            title: "Sprite Arena".to_string(),
            width: 500,
            height: 500,
        };
        let player = CharacterSpec {
            bounds: Rect::new(500.0 / 2.0, 500.0 / 2.0, 100.0, 100.0),
            speed: 2.0,
            sheet: SheetSource::Grid {
                path: PathBuf::from("spritesheet_rus01.png"),
                cell_width: 32,
                cell_height: 32,
            },
        };

        Self {
            edition: Edition::Classic,
            window,
            tick_rate: DEFAULT_TICK_RATE,
            assets_dir: PathBuf::from("data"),
            player,
            attack_cooldown_ms: None,
            enemy: None,
            props: Vec::new(),
            show_hitboxes: false,
            release_attack_pose: false,
        }
    }

    /// Second release: attack and a chasing enemy
    pub fn chase() -> Self {
        let enemy = EnemySpec {
            character: CharacterSpec {
                bounds: Rect::new(100.0, 100.0, 100.0, 100.0),
                speed: 2.0,
                sheet: SheetSource::Directories {
                    path: PathBuf::from("enemy"),
                },
            },
            detection_radius: DEFAULT_DETECTION_RADIUS,
        };

        Self {
            edition: Edition::Chase,
            enemy: Some(enemy),
            ..Self::melee()
        }
    }

    /// Third release: attack, no enemy
    pub fn melee() -> Self {
        let window = WindowConfig {
            title: "Sprite Arena".to_string(),
            width: 1280,
            height: 720,
        };
        let player = CharacterSpec {
            bounds: Rect::new(1280.0 / 2.0, 720.0 / 2.0, 100.0, 100.0),
            speed: 3.0,
            sheet: SheetSource::Directories {
                path: PathBuf::from("player"),
            },
        };

        Self {
            edition: Edition::Melee,
            window,
            tick_rate: DEFAULT_TICK_RATE,
            assets_dir: PathBuf::from("data"),
            player,
            attack_cooldown_ms: Some(ATTACK_COOLDOWN_MS),
            enemy: None,
            props: Vec::new(),
            show_hitboxes: true,
            release_attack_pose: false,
        }
    }

    pub fn with_assets_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.assets_dir = dir.into();
        self
    }

    pub fn screen_size(&self) -> Vec2 {
        self.window.size()
    }

    pub fn attack_enabled(&self) -> bool {
        self.attack_cooldown_ms.is_some()
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::for_edition(Edition::default())
    }
}
