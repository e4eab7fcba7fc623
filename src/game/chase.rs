// Radius-based chase behaviour

use glam::{IVec2, Vec2};

use crate::core::DirectionFlags;

/// Default distance at which an enemy notices the player, in pixels
pub const DEFAULT_DETECTION_RADIUS: f32 = 300.0;

/// Steers toward a target once it comes within `detection_radius`.
///
/// Flags are rebuilt from scratch each tick, so a target sitting on the radius can make
/// the chaser start and stop on alternate ticks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChaseBehavior {
    pub detection_radius: f32,
    pub flags: DirectionFlags,
}

impl Default for ChaseBehavior {
    fn default() -> Self {
        Self::new(DEFAULT_DETECTION_RADIUS)
    }
}

impl ChaseBehavior {
    pub fn new(detection_radius: f32) -> Self {
        Self {
            detection_radius,
            flags: DirectionFlags::default(),
        }
    }

    pub fn in_range(&self, from: Vec2, target: Vec2) -> bool {
        from.distance_squared(target) <= self.detection_radius * self.detection_radius
    }

    pub fn is_chasing(&self) -> bool {
        self.flags != DirectionFlags::default()
    }

    /// Velocity toward `target` for this tick
    pub fn steer(&mut self, from: Vec2, target: Vec2) -> IVec2 {
        self.flags = if self.in_range(from, target) {
            DirectionFlags {
                left: from.x > target.x,
                right: from.x < target.x,
                up: from.y > target.y,
                down: from.y < target.y,
            }
        } else {
            DirectionFlags::default()
        };

        self.flags.to_vector()
    }
}
