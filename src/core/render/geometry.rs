//=========================================================================
// 2D Geometry Builders
//=========================================================================
//
// Append triangle-list vertices for simple screen-space shapes.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::f32::consts::TAU;

use glam::Vec2;

//=== Internal Dependencies ===============================================

use super::vertex::{Rgba8, Vertex};

//=== Constants ===========================================================

pub const RING_SIDES: usize = 32;
pub const VERTS_PER_RING_SIDE: usize = 6;
pub const VERTS_PER_SEGMENT: usize = 6;

//=== Aabb2 ===============================================================

/// Axis-aligned rectangle, `mins` bottom-left and `maxs` top-right.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb2 {
    pub mins: Vec2,
    pub maxs: Vec2,
}

impl Aabb2 {
    pub const fn new(mins: Vec2, maxs: Vec2) -> Self {
        Self { mins, maxs }
    }

    pub fn width(&self) -> f32 {
        self.maxs.x - self.mins.x
    }

    pub fn height(&self) -> f32 {
        self.maxs.y - self.mins.y
    }

    pub fn center(&self) -> Vec2 {
        (self.mins + self.maxs) * 0.5
    }
}

//=== Builders ============================================================

/// Hollow circle of `RING_SIDES` quads, `thickness` centred on `radius`.
pub fn add_verts_for_ring_2d(
    verts: &mut Vec<Vertex>,
    center: Vec2,
    radius: f32,
    thickness: f32,
    color: Rgba8,
) {
    let half = thickness * 0.5;
    let inner = radius - half;
    let outer = radius + half;
    let step = TAU / RING_SIDES as f32;

    verts.reserve(RING_SIDES * VERTS_PER_RING_SIDE);

    for side in 0..RING_SIDES {
        let start = Vec2::from_angle(step * side as f32);
        let end = Vec2::from_angle(step * (side + 1) as f32);

        let inner_start = center + start * inner;
        let inner_end = center + end * inner;
        let outer_start = center + start * outer;
        let outer_end = center + end * outer;

        push_quad(verts, inner_start, outer_start, outer_end, inner_end, color);
    }
}

/// Thick segment with square caps extended `thickness / 2` past each end.
pub fn add_verts_for_line_segment_2d(
    verts: &mut Vec<Vertex>,
    start: Vec2,
    end: Vec2,
    thickness: f32,
    color: Rgba8,
) {
    let half = thickness * 0.5;
    let forward = (end - start).normalize_or_zero() * half;
    let left = forward.perp();

    let start_left = start - forward + left;
    let start_right = start - forward - left;
    let end_left = end + forward + left;
    let end_right = end + forward - left;

    push_quad(verts, start_right, end_right, end_left, start_left, color);
}

/// Filled rectangle.
pub fn add_verts_for_aabb2_2d(verts: &mut Vec<Vertex>, bounds: Aabb2, color: Rgba8) {
    let bl = bounds.mins;
    let tr = bounds.maxs;
    let br = Vec2::new(tr.x, bl.y);
    let tl = Vec2::new(bl.x, tr.y);

    push_quad(verts, bl, br, tr, tl, color);
}

/// Two counter-clockwise triangles for quad `a b c d`.
fn push_quad(verts: &mut Vec<Vertex>, a: Vec2, b: Vec2, c: Vec2, d: Vec2, color: Rgba8) {
    verts.extend(
        [a, b, c, a, c, d]
            .into_iter()
            .map(|p| Vertex::flat(p, color)),
    );
}

//=========================================================================
// Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn ring_has_six_verts_per_side() {
        let mut verts = Vec::new();
        add_verts_for_ring_2d(&mut verts, Vec2::new(800.0, 400.0), 300.0, 10.0, Rgba8::YELLOW);

        assert_eq!(verts.len(), RING_SIDES * VERTS_PER_RING_SIDE);
        assert!(verts.iter().all(|v| v.color == Rgba8::YELLOW));
    }

    #[test]
    fn ring_verts_lie_on_inner_or_outer_edge() {
        let center = Vec2::new(800.0, 400.0);
        let mut verts = Vec::new();
        add_verts_for_ring_2d(&mut verts, center, 300.0, 10.0, Rgba8::YELLOW);

        for v in &verts {
            let d = v.position_2d().distance(center);
            assert!(
                (d - 295.0).abs() < 1e-2 || (d - 305.0).abs() < 1e-2,
                "vertex at distance {d}"
            );
        }
    }

    #[test]
    fn segment_is_one_quad_with_caps() {
        let mut verts = Vec::new();
        add_verts_for_line_segment_2d(
            &mut verts,
            Vec2::new(0.0, 0.0),
            Vec2::new(100.0, 0.0),
            10.0,
            Rgba8::GREEN,
        );

        assert_eq!(verts.len(), VERTS_PER_SEGMENT);
        let min_x = verts.iter().map(|v| v.position[0]).fold(f32::MAX, f32::min);
        let max_x = verts.iter().map(|v| v.position[0]).fold(f32::MIN, f32::max);
        let max_y = verts.iter().map(|v| v.position[1]).fold(f32::MIN, f32::max);

        assert_relative_eq!(min_x, -5.0);
        assert_relative_eq!(max_x, 105.0);
        assert_relative_eq!(max_y, 5.0);
    }

    #[test]
    fn degenerate_segment_does_not_produce_nan() {
        let mut verts = Vec::new();
        let p = Vec2::new(3.0, 3.0);
        add_verts_for_line_segment_2d(&mut verts, p, p, 10.0, Rgba8::GREEN);

        assert!(verts.iter().all(|v| v.position.iter().all(|c| c.is_finite())));
    }

    #[test]
    fn aabb_covers_bounds() {
        let bounds = Aabb2::new(Vec2::ZERO, Vec2::new(1600.0, 30.0));
        let mut verts = Vec::new();
        add_verts_for_aabb2_2d(&mut verts, bounds, Rgba8::TRANSLUCENT_BLACK);

        assert_eq!(verts.len(), 6);
        assert_relative_eq!(bounds.width(), 1600.0);
        assert_relative_eq!(bounds.height(), 30.0);
        assert_eq!(bounds.center(), Vec2::new(800.0, 15.0));
    }
}
