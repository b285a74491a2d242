//! Mapping between the normalized simulation box and the window surface

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec2};

/// Canvas uniform for GPU
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct CanvasUniform {
    pub view_proj: [[f32; 4]; 4],
    pub size_px: [f32; 2],
    pub radius_px: f32,
    pub _padding: f32,
}

/// The window surface, stretched over the [0,1]×[0,1] simulation box
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width.max(1);
        self.height = height.max(1);
    }

    /// Normalized box (y up) to clip space
    pub fn view_projection(&self) -> Mat4 {
        Mat4::orthographic_rh(0.0, 1.0, 0.0, 1.0, -1.0, 1.0)
    }

    /// Particle radius in pixels. Uses the shorter edge so circles stay round
    /// and never overflow a non-square window.
    pub fn radius_px(&self, radius_fraction: f32) -> f32 {
        radius_fraction * self.width.min(self.height) as f32
    }

    /// Cursor position in window pixels (y down) to the normalized box (y up)
    pub fn normalize_cursor(&self, x: f64, y: f64) -> Vec2 {
        Vec2::new(
            (x / self.width as f64) as f32,
            1.0 - (y / self.height as f64) as f32,
        )
    }

    pub fn to_uniform(&self, radius_fraction: f32) -> CanvasUniform {
        CanvasUniform {
            view_proj: self.view_projection().to_cols_array_2d(),
            size_px: [self.width as f32, self.height as f32],
            radius_px: self.radius_px(radius_fraction),
            _padding: 0.0,
        }
    }
}
