//=========================================================================
// Pipeline Modes
//=========================================================================

use glam::Mat4;

use super::vertex::Rgba8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BlendMode {
    #[default]
    Opaque,
    Alpha,
    Additive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RasterizerMode {
    SolidCullNone,
    #[default]
    SolidCullBack,
    WireframeCullNone,
    WireframeCullBack,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SamplerMode {
    PointClamp,
    #[default]
    BilinearClamp,
    BilinearWrap,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DepthMode {
    #[default]
    Disabled,
    ReadOnlyAlways,
    ReadOnlyLessEqual,
    ReadWriteLessEqual,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShaderHandle(pub u32);

/// Per-draw transform and tint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelConstants {
    pub model: Mat4,
    pub tint: Rgba8,
}

impl Default for ModelConstants {
    fn default() -> Self {
        Self {
            model: Mat4::IDENTITY,
            tint: Rgba8::WHITE,
        }
    }
}
