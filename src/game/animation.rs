// Sprite-sheet animation state, advanced once per tick

use glam::IVec2;

use super::pose::{Direction, Pose};

/// Ticks a locomotion frame stays on screen
pub const LOCOMOTION_TICKS_PER_FRAME: u32 = 5;
/// Frames in a locomotion cycle
pub const LOCOMOTION_FRAME_COUNT: usize = 6;
/// Tick threshold after which attack frames start advancing
pub const ATTACK_TICKS_PER_FRAME: u32 = 10;
/// Attack playback holds on this frame
pub const ATTACK_LAST_FRAME: usize = 2;

/// Per-entity animation state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AnimationState {
    pub pose: Pose,
    /// Index into the current pose's frame sequence
    pub frame: usize,
    /// Ticks since the last frame advance
    pub frame_timer: u32,
    pub flip_horizontal: bool,
}

impl AnimationState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset_frame(&mut self) {
        self.frame = 0;
    }

    /// Advance facing, pose and frame for one tick of movement.
    pub fn advance(&mut self, velocity: IVec2, attacking: bool) {
        // Facing is sticky: a purely vertical or zero velocity keeps the last one
        if velocity.x < 0 {
            self.flip_horizontal = true;
        } else if velocity.x > 0 {
            self.flip_horizontal = false;
        }

        if attacking {
            self.pose = self.pose.to_attack();
        } else if let Some(direction) = Direction::classify(velocity) {
            self.pose = Pose::Locomotion(direction);
        }

        match self.pose {
            Pose::Locomotion(_) => self.advance_locomotion(velocity),
            Pose::Attack(_) => self.advance_attack(),
        }
    }

    fn advance_locomotion(&mut self, velocity: IVec2) {
        if velocity == IVec2::ZERO {
            self.frame = 0;
            return;
        }

        self.frame_timer = self.frame_timer.saturating_add(1);
        if self.frame_timer < LOCOMOTION_TICKS_PER_FRAME {
            return;
        }

        self.frame += 1;
        if self.frame >= LOCOMOTION_FRAME_COUNT {
            self.frame = 0;
        }
        self.frame_timer = 0;
    }

    // The timer keeps counting past the threshold; it only resets once a locomotion
    // pose takes over again. Reaching the last frame does not leave the attack pose:
    // it stays until movement reclassifies it.
    fn advance_attack(&mut self) {
        self.frame_timer = self.frame_timer.saturating_add(1);
        if self.frame_timer < ATTACK_TICKS_PER_FRAME {
            return;
        }

        if self.frame >= ATTACK_LAST_FRAME {
            return;
        }
        self.frame += 1;
    }
}
