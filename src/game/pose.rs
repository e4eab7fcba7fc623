// Pose classification for animated characters

use glam::IVec2;

/// Facing direction, reduced from eight directions to five.
/// Left/right variants share a pose and differ only by horizontal flip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Down,
    DownHorizontal,
    Horizontal,
    UpHorizontal,
    Up,
}

impl Direction {
    /// All directions in pose-code order
    pub const ALL: [Direction; 5] = [
        Direction::Down,
        Direction::DownHorizontal,
        Direction::Horizontal,
        Direction::UpHorizontal,
        Direction::Up,
    ];

    /// Pick the direction for a per-tick velocity.
    ///
    /// Returns `None` when no row matches (notably for a zero vector); callers keep
    /// their previous pose in that case.
    pub fn classify(velocity: IVec2) -> Option<Self> {
        let (vx, vy) = (velocity.x, velocity.y);
        if vx == 0 && vy == 1 {
            Some(Self::Down)
        } else if vx != 0 && vy == 1 {
            Some(Self::DownHorizontal)
        } else if vx != 0 && vy == 0 {
            Some(Self::Horizontal)
        } else if vx != 0 && vy == -1 {
            Some(Self::UpHorizontal)
        } else if vx == 0 && vy == -1 {
            Some(Self::Up)
        } else {
            None
        }
    }

    /// Row index in a grid-sliced sprite sheet
    pub fn code(&self) -> u32 {
        match self {
            Self::Down => 0,
            Self::DownHorizontal => 1,
            Self::Horizontal => 2,
            Self::UpHorizontal => 3,
            Self::Up => 4,
        }
    }

    /// Directory name in a per-pose sprite layout
    pub fn label(&self) -> &'static str {
        match self {
            Self::Down => "down",
            Self::DownHorizontal => "down_horizontal",
            Self::Horizontal => "horizontal",
            Self::UpHorizontal => "up_horizontal",
            Self::Up => "up",
        }
    }
}

/// Animation category: which frame sequence is drawn and which timer regime runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pose {
    Locomotion(Direction),
    Attack(Direction),
}

impl Default for Pose {
    fn default() -> Self {
        Self::Locomotion(Direction::Down)
    }
}

impl Pose {
    /// The ten poses a per-pose sprite directory provides
    pub const ALL: [Pose; 10] = [
        Pose::Locomotion(Direction::Down),
        Pose::Locomotion(Direction::DownHorizontal),
        Pose::Locomotion(Direction::Horizontal),
        Pose::Locomotion(Direction::UpHorizontal),
        Pose::Locomotion(Direction::Up),
        Pose::Attack(Direction::Down),
        Pose::Attack(Direction::DownHorizontal),
        Pose::Attack(Direction::Horizontal),
        Pose::Attack(Direction::UpHorizontal),
        Pose::Attack(Direction::Up),
    ];

    pub fn direction(&self) -> Direction {
        match *self {
            Self::Locomotion(direction) | Self::Attack(direction) => direction,
        }
    }

    pub fn is_attack(&self) -> bool {
        matches!(self, Self::Attack(_))
    }

    /// Attack variant facing the same way
    pub fn to_attack(self) -> Self {
        Self::Attack(self.direction())
    }

    /// Locomotion variant facing the same way
    pub fn to_locomotion(self) -> Self {
        Self::Locomotion(self.direction())
    }

    /// Directory label, e.g. `up_horizontal` or `up_horizontal_attack`
    pub fn label(&self) -> String {
        match self {
            Self::Locomotion(direction) => direction.label().to_string(),
            Self::Attack(direction) => format!("{}_attack", direction.label()),
        }
    }
}
