// Screen-space camera: logical pixels, origin at the top-left corner

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec2};

/// Fixed 2D camera covering the logical screen
#[derive(Debug, Clone)]
pub struct Camera {
    /// Logical screen size in pixels
    size: Vec2,
    /// View-projection matrix
    view_proj: Mat4,
}

impl Camera {
    pub fn new(width: f32, height: f32) -> Self {
        let mut camera = Self {
            size: Vec2::new(width, height),
            view_proj: Mat4::IDENTITY,
        };
        camera.update_view_proj();
        camera
    }

    // y grows downwards, matching entity coordinates
    fn update_view_proj(&mut self) {
        self.view_proj = Mat4::orthographic_rh(0.0, self.size.x, self.size.y, 0.0, -1.0, 1.0);
    }

    /// Get the view-projection matrix
    pub fn view_proj_matrix(&self) -> Mat4 {
        self.view_proj
    }
}

/// Camera uniform for GPU
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
}

impl CameraUniform {
    pub fn new(camera: &Camera) -> Self {
        Self {
            view_proj: camera.view_proj_matrix().to_cols_array_2d(),
        }
    }
}
