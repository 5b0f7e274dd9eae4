//=========================================================================
// Subsystem Contracts
//=========================================================================
//
// Capability traits the application core consumes. Implementations live
// elsewhere (platform layer, headless collaborators); the core only ever
// talks to these.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::sync::atomic::{AtomicU64, Ordering};

use glam::UVec2;
use serde::{Deserialize, Serialize};

//=== Internal Dependencies ===============================================

use super::Subsystem;
use crate::core::audio::SoundSender;
use crate::core::input::{ControllerButton, InputSink, KeyCode};
use crate::core::render::{
    Aabb2, BlendMode, Camera, DepthMode, ModelConstants, RasterizerMode, Rgba8,
    SamplerMode, ShaderHandle, TextureHandle, Vertex,
};

//=== Window Types ========================================================

/// Opaque handle to the drawable surface a window owns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SurfaceHandle(pub u64);

impl SurfaceHandle {
    /// Process-unique handle, available before the OS window exists.
    pub fn allocate() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DisplayMode {
    #[default]
    Windowed,
    Fullscreen,
}

impl DisplayMode {
    pub fn toggled(self) -> Self {
        match self {
            DisplayMode::Windowed => DisplayMode::Fullscreen,
            DisplayMode::Fullscreen => DisplayMode::Windowed,
        }
    }
}

/// Pointer: visible, free cursor. Relative: hidden, confined, delta-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorMode {
    #[default]
    Pointer,
    Relative,
}

//=== InputSubsystem ======================================================

pub trait InputSubsystem: Subsystem {
    /// Sender producers (the window) push raw input events into.
    fn event_sink(&self) -> InputSink;

    /// Applies every event queued on the sink since the last call.
    fn process_pending(&mut self);

    fn was_key_just_pressed(&self, key: KeyCode) -> bool;
    fn was_key_just_released(&self, key: KeyCode) -> bool;
    fn is_key_down(&self, key: KeyCode) -> bool;

    fn was_button_just_pressed(&self, controller: usize, button: ControllerButton) -> bool;
    fn is_button_down(&self, controller: usize, button: ControllerButton) -> bool;
}

//=== WindowSubsystem =====================================================

pub trait WindowSubsystem: Subsystem {
    fn surface(&self) -> SurfaceHandle;

    /// Drawable size in physical pixels.
    fn client_dimensions(&self) -> UVec2;

    fn has_focus(&self) -> bool;

    fn display_mode(&self) -> DisplayMode;
    fn set_display_mode(&mut self, mode: DisplayMode);

    fn cursor_mode(&self) -> CursorMode;
    fn set_cursor_mode(&mut self, mode: CursorMode);
}

//=== RenderSubsystem =====================================================

/// Immediate-mode submission contract.
pub trait RenderSubsystem: Subsystem {
    fn clear_screen(&mut self, color: Rgba8);

    fn begin_camera(&mut self, camera: &Camera);
    fn end_camera(&mut self, camera: &Camera);

    fn set_model_constants(&mut self, constants: ModelConstants);

    fn set_blend_mode(&mut self, mode: BlendMode);
    fn set_rasterizer_mode(&mut self, mode: RasterizerMode);
    fn set_sampler_mode(&mut self, mode: SamplerMode);
    fn set_depth_mode(&mut self, mode: DepthMode);

    /// `None` binds the default white texture.
    fn bind_texture(&mut self, texture: Option<TextureHandle>);

    /// `None` binds the default shader.
    fn bind_shader(&mut self, shader: Option<ShaderHandle>);

    fn draw_vertex_array(&mut self, vertices: &[Vertex]);
}

//=== ConsoleSubsystem ====================================================

pub trait ConsoleSubsystem: Subsystem {
    fn is_open(&self) -> bool;
    fn set_open(&mut self, open: bool);

    /// Runs one command line.
    fn execute(&mut self, command_line: &str);

    /// Draws the console strip into `bounds` (screen space).
    fn render(&self, renderer: &mut dyn RenderSubsystem, bounds: Aabb2);
}

//=== AudioSubsystem ======================================================

pub trait AudioSubsystem: Subsystem {
    /// Cloneable sender; requests are played on the next phase the audio
    /// subsystem runs.
    fn sound_requests(&self) -> SoundSender;
}

//=========================================================================
// Tests
//=========================================================================
