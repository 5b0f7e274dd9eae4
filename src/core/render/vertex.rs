//=========================================================================
// Vertex Format
//=========================================================================
//
// Position/colour/uv vertex. `#[repr(C)]` + Pod so a backend can upload a
// `&[Vertex]` as raw bytes.
//
//=========================================================================

//=== External Dependencies ===============================================

use bytemuck::{Pod, Zeroable};
use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

//=== Rgba8 ===============================================================

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Pod, Zeroable, Serialize, Deserialize)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const WHITE: Self = Self::new(255, 255, 255, 255);
    pub const BLACK: Self = Self::new(0, 0, 0, 255);
    pub const GREY: Self = Self::new(127, 127, 127, 255);
    pub const YELLOW: Self = Self::new(255, 255, 0, 255);
    pub const GREEN: Self = Self::new(0, 255, 0, 255);
    pub const TRANSLUCENT_BLACK: Self = Self::new(0, 0, 0, 160);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

impl Default for Rgba8 {
    fn default() -> Self {
        Self::WHITE
    }
}

//=== Vertex ==============================================================

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub color: Rgba8,
    pub uv: [f32; 2],
}

impl Vertex {
    pub fn new(position: Vec3, color: Rgba8, uv: Vec2) -> Self {
        Self {
            position: position.to_array(),
            color,
            uv: uv.to_array(),
        }
    }

    /// Untextured vertex on the z = 0 plane.
    pub fn flat(position: Vec2, color: Rgba8) -> Self {
        Self::new(position.extend(0.0), color, Vec2::ZERO)
    }

    pub fn position_2d(&self) -> Vec2 {
        Vec2::new(self.position[0], self.position[1])
    }
}

//=========================================================================
// Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_is_tightly_packed() {
        assert_eq!(std::mem::size_of::<Vertex>(), 24);
        let verts = [Vertex::flat(Vec2::new(1.0, 2.0), Rgba8::GREEN); 2];
        assert_eq!(bytemuck::cast_slice::<Vertex, u8>(&verts).len(), 48);
    }

    #[test]
    fn flat_vertex_sits_on_z_zero() {
        let v = Vertex::flat(Vec2::new(3.0, 4.0), Rgba8::YELLOW);
        assert_eq!(v.position, [3.0, 4.0, 0.0]);
        assert_eq!(v.position_2d(), Vec2::new(3.0, 4.0));
        assert_eq!(v.uv, [0.0, 0.0]);
    }
}
