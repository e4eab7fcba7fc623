// Math utilities and screen-space geometry

use glam::{IVec2, Vec2};

/// Axis-aligned rectangle in screen pixels (top-left origin, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Top-left corner
    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Move the rectangle by `delta`
    pub fn translate(&mut self, delta: Vec2) {
        self.x += delta.x;
        self.y += delta.y;
    }

    /// Keep the rectangle inside `[0, bounds.x - width] x [0, bounds.y - height]`.
    ///
    /// The upper bound is applied first, then the lower one, so a rectangle larger than
    /// the bounds ends up pinned at 0.
    pub fn clamp_within(&mut self, bounds: Vec2) {
        self.x = self.x.min(bounds.x - self.width).max(0.0);
        self.y = self.y.min(bounds.y - self.height).max(0.0);
    }
}

/// Four held/not-held directional flags
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DirectionFlags {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

impl DirectionFlags {
    /// `(right - left, down - up)`, each flag counted as 0 or 1
    pub fn to_vector(self) -> IVec2 {
        IVec2::new(
            self.right as i32 - self.left as i32,
            self.down as i32 - self.up as i32,
        )
    }
}
