//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    /// Bytes between consecutive vertices in a buffer
    pub const STRIDE: usize = std::mem::size_of::<Vertex>();
    /// Byte offset of `color` within a vertex
    pub const COLOR_OFFSET: usize = std::mem::size_of::<[f32; 2]>();

    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }
}

/// Raw bytes for uploading to a vertex buffer
pub fn as_bytes(vertices: &[Vertex]) -> &[u8] {
    bytemuck::cast_slice(vertices)
}

/// Scale a color's alpha
pub fn faded(color: [f32; 4], alpha: f32) -> [f32; 4] {
    [color[0], color[1], color[2], color[3] * alpha.clamp(0.0, 1.0)]
}

/// Colors for game elements
pub mod colors {
    pub const BACKGROUND: [f32; 4] = [0.02, 0.02, 0.05, 1.0];
    pub const TURRET: [f32; 4] = [0.2, 0.8, 0.4, 1.0];
    pub const ENEMY: [f32; 4] = [0.9, 0.2, 0.2, 1.0];
    pub const ENEMY_DYING: [f32; 4] = [0.9, 0.6, 0.2, 1.0];
    pub const BEAM: [f32; 4] = [1.0, 1.0, 0.6, 0.9];
    /// Aim line while charging with a target in range
    pub const AIM_LOCKED: [f32; 4] = [1.0, 0.3, 0.3, 0.6];
    pub const AIM: [f32; 4] = [0.6, 0.6, 0.7, 0.4];
    pub const HORIZON: [f32; 4] = [0.3, 0.3, 0.4, 1.0];
}
