/// Tagged union of the three hardware surface descriptor kinds

use super::render_target::{ColorTarget, DepthTarget};
use super::resource::GenericImage;

/// A hardware surface descriptor, as handed over by the register-state parser
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceDescriptor {
    /// Texture resource bound to a shader
    GenericImage(GenericImage),
    /// Color render target
    ColorTarget(ColorTarget),
    /// Depth-stencil render target
    DepthTarget(DepthTarget),
}

impl SourceDescriptor {
    /// Short kind name for diagnostics
    pub fn kind(&self) -> &'static str {
        match self {
            SourceDescriptor::GenericImage(_) => "image",
            SourceDescriptor::ColorTarget(_) => "color target",
            SourceDescriptor::DepthTarget(_) => "depth target",
        }
    }
}

impl From<GenericImage> for SourceDescriptor {
    fn from(image: GenericImage) -> Self {
        SourceDescriptor::GenericImage(image)
    }
}

impl From<ColorTarget> for SourceDescriptor {
    fn from(target: ColorTarget) -> Self {
        SourceDescriptor::ColorTarget(target)
    }
}

impl From<DepthTarget> for SourceDescriptor {
    fn from(target: DepthTarget) -> Self {
        SourceDescriptor::DepthTarget(target)
    }
}

#[cfg(test)]
#[path = "source_tests.rs"]
mod tests;
