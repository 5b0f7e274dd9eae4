//=========================================================================
// Headless Renderer
//=========================================================================

//=== External Dependencies ===============================================

use log::info;

//=== Internal Dependencies ===============================================

use super::CallLog;
use crate::core::render::{
    BlendMode, Camera, DepthMode, ModelConstants, RasterizerMode, Rgba8, SamplerMode,
    ShaderHandle, TextureHandle, Vertex,
};
use crate::core::subsystem::{RenderSubsystem, Subsystem, SubsystemError, SurfaceHandle};

//=== HeadlessRenderer ====================================================

/// Accepts every submission and records it. Draws count vertices only.
pub struct HeadlessRenderer {
    log: CallLog,
    surface: SurfaceHandle,
    vertices_this_frame: usize,
}

impl HeadlessRenderer {
    pub fn new(log: CallLog, surface: SurfaceHandle) -> Self {
        Self {
            log,
            surface,
            vertices_this_frame: 0,
        }
    }

    pub fn vertices_this_frame(&self) -> usize {
        self.vertices_this_frame
    }
}

impl Subsystem for HeadlessRenderer {
    fn name(&self) -> &'static str {
        "Renderer"
    }

    fn startup(&mut self) -> Result<(), SubsystemError> {
        self.log.record("Renderer.startup");
        info!(target: "platform", "Headless renderer bound to {:?}", self.surface);
        Ok(())
    }

    fn begin_frame(&mut self) {
        self.vertices_this_frame = 0;
        self.log.record("Renderer.begin_frame");
    }

    fn end_frame(&mut self) {
        self.log.record("Renderer.end_frame");
    }

    fn shutdown(&mut self) {
        self.log.record("Renderer.shutdown");
    }
}

impl RenderSubsystem for HeadlessRenderer {
    fn clear_screen(&mut self, color: Rgba8) {
        self.log.record(format!(
            "Renderer.clear_screen({},{},{},{})",
            color.r, color.g, color.b, color.a
        ));
    }

    fn begin_camera(&mut self, camera: &Camera) {
        self.log.record(format!("Renderer.begin_camera({})", camera.name()));
    }

    fn end_camera(&mut self, camera: &Camera) {
        self.log.record(format!("Renderer.end_camera({})", camera.name()));
    }

    fn set_model_constants(&mut self, _constants: ModelConstants) {
        self.log.record("Renderer.set_model_constants");
    }

    fn set_blend_mode(&mut self, mode: BlendMode) {
        self.log.record(format!("Renderer.set_blend_mode({mode:?})"));
    }

    fn set_rasterizer_mode(&mut self, mode: RasterizerMode) {
        self.log.record(format!("Renderer.set_rasterizer_mode({mode:?})"));
    }

    fn set_sampler_mode(&mut self, mode: SamplerMode) {
        self.log.record(format!("Renderer.set_sampler_mode({mode:?})"));
    }

    fn set_depth_mode(&mut self, mode: DepthMode) {
        self.log.record(format!("Renderer.set_depth_mode({mode:?})"));
    }

    fn bind_texture(&mut self, texture: Option<TextureHandle>) {
        self.log.record(format!("Renderer.bind_texture({texture:?})"));
    }

    fn bind_shader(&mut self, shader: Option<ShaderHandle>) {
        self.log.record(format!("Renderer.bind_shader({shader:?})"));
    }

    fn draw_vertex_array(&mut self, vertices: &[Vertex]) {
        self.vertices_this_frame += vertices.len();
        self.log.record(format!("Renderer.draw_vertex_array({})", vertices.len()));
    }
}
