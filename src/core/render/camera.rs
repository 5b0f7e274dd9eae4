//=========================================================================
// Camera
//=========================================================================

//=== External Dependencies ===============================================

use glam::{Mat4, Vec2};

//=== Camera ==============================================================

/// Named orthographic view over a 2D rectangle.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    name: &'static str,
    bottom_left: Vec2,
    top_right: Vec2,
}

impl Camera {
    pub fn orthographic(name: &'static str, bottom_left: Vec2, top_right: Vec2) -> Self {
        Self {
            name,
            bottom_left,
            top_right,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn set_orthographic_view(&mut self, bottom_left: Vec2, top_right: Vec2) {
        self.bottom_left = bottom_left;
        self.top_right = top_right;
    }

    pub fn bottom_left(&self) -> Vec2 {
        self.bottom_left
    }

    pub fn top_right(&self) -> Vec2 {
        self.top_right
    }

    pub fn top_left(&self) -> Vec2 {
        Vec2::new(self.bottom_left.x, self.top_right.y)
    }

    pub fn projection(&self) -> Mat4 {
        Mat4::orthographic_rh(
            self.bottom_left.x,
            self.top_right.x,
            self.bottom_left.y,
            self.top_right.y,
            0.0,
            1.0,
        )
    }
}

//=========================================================================
// Tests
//=========================================================================
