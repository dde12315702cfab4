/// Texture resource descriptor (T#) fields and the shader binding hints that
/// travel with it.

use super::pixel_format::{DataFormat, NumberFormat};

register_enum! {
    /// Resource type of an image descriptor
    pub enum ImageType {
        Invalid = 0,
        Color1D = 8,
        Color2D = 9,
        Color3D = 10,
        Cube = 11,
        Color1DArray = 12,
        Color2DArray = 13,
        Color2DMsaa = 14,
        Color2DMsaaArray = 15,
    }
}

impl ImageType {
    /// Multi-sampled image types (single mip level only)
    pub fn is_msaa(self) -> bool {
        matches!(self, ImageType::Color2DMsaa | ImageType::Color2DMsaaArray)
    }
}

register_enum! {
    /// Destination channel select (`DST_SEL_*` fields)
    pub enum CompSwizzle {
        Zero = 0,
        One = 1,
        Red = 4,
        Green = 5,
        Blue = 6,
        Alpha = 7,
    }
}

/// Per-channel destination select of an image descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CompMapping {
    pub r: CompSwizzle,
    pub g: CompSwizzle,
    pub b: CompSwizzle,
    pub a: CompSwizzle,
}

impl CompMapping {
    /// RGBA passthrough
    pub const IDENTITY: CompMapping = CompMapping {
        r: CompSwizzle::Red,
        g: CompSwizzle::Green,
        b: CompSwizzle::Blue,
        a: CompSwizzle::Alpha,
    };
}

impl Default for CompMapping {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// How a shader binds an image resource
///
/// These are properties of the shader's resource declaration, not of the
/// hardware descriptor: the same descriptor may be bound as sampled in one
/// draw and as storage in the next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ImageBinding {
    /// Bound for image stores/atomics
    pub is_storage: bool,
    /// Sampled as depth data (texel view over a depth image)
    pub is_depth: bool,
    /// Shader declares an arrayed image
    pub is_array: bool,
}

/// Generic image source descriptor
///
/// Hardware image descriptor fields merged with the shader binding hints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GenericImage {
    pub data_format: DataFormat,
    pub number_format: NumberFormat,
    pub image_type: ImageType,
    pub base_level: u32,
    pub last_level: u32,
    pub base_array: u32,
    pub last_array: u32,
    pub is_depth_sampled: bool,
    pub is_array_requested: bool,
    pub component_select: CompMapping,
    pub storage_requested: bool,
}

impl GenericImage {
    /// Single-level, single-layer 2D image with identity swizzle, sampled
    pub fn new(data_format: DataFormat, number_format: NumberFormat, image_type: ImageType) -> Self {
        Self {
            data_format,
            number_format,
            image_type,
            base_level: 0,
            last_level: 0,
            base_array: 0,
            last_array: 0,
            is_depth_sampled: false,
            is_array_requested: false,
            component_select: CompMapping::IDENTITY,
            storage_requested: false,
        }
    }

    /// Apply the shader binding hints of the consuming resource declaration
    pub fn with_binding(mut self, binding: ImageBinding) -> Self {
        self.storage_requested = binding.is_storage;
        self.is_depth_sampled = binding.is_depth;
        self.is_array_requested = binding.is_array;
        self
    }

    /// Set the mip range (inclusive)
    pub fn with_levels(mut self, base_level: u32, last_level: u32) -> Self {
        self.base_level = base_level;
        self.last_level = last_level;
        self
    }

    /// Set the array range (inclusive)
    pub fn with_layers(mut self, base_array: u32, last_array: u32) -> Self {
        self.base_array = base_array;
        self.last_array = last_array;
        self
    }

    /// Set the destination channel select
    pub fn with_swizzle(mut self, component_select: CompMapping) -> Self {
        self.component_select = component_select;
        self
    }

    /// The binding hints currently applied
    pub fn binding(&self) -> ImageBinding {
        ImageBinding {
            is_storage: self.storage_requested,
            is_depth: self.is_depth_sampled,
            is_array: self.is_array_requested,
        }
    }
}
