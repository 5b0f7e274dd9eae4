//=========================================================================
// Render Types
//=========================================================================
//
// Data handed to the render subsystem: coloured vertices, cameras,
// fixed-function pipeline modes and the 2D geometry builders used to
// fill vertex lists.
//
//=========================================================================

//=== Module Declarations =================================================

mod camera;
mod geometry;
mod modes;
mod vertex;

//=== Public API ==========================================================

pub use camera::Camera;
pub use geometry::{
    add_verts_for_aabb2_2d, add_verts_for_line_segment_2d, add_verts_for_ring_2d, Aabb2,
    RING_SIDES, VERTS_PER_RING_SIDE, VERTS_PER_SEGMENT,
};
pub use modes::{
    BlendMode, DepthMode, ModelConstants, RasterizerMode, SamplerMode, ShaderHandle,
    TextureHandle,
};
pub use vertex::{Rgba8, Vertex};
