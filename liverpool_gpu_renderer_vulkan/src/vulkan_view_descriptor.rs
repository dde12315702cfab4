/// View descriptor builder - hardware surface descriptors to normalized views
///
/// Each constructor is pure: it reads the format tables and the caller's
/// descriptor, applies the hardware quirk corrections and returns a
/// `ViewDescriptor` that realization can bind to a physical image.

use ash::vk;
use liverpool_gpu::liverpool::{Error, Result, VideoCore};
use liverpool_gpu::liverpool::amdgpu::{ColorTarget, DepthTarget, GenericImage, SourceDescriptor};
use liverpool_gpu::liverpool::log::LogSeverity;
use liverpool_gpu::video_trace;
use crate::vulkan_format::{
    adjust_color_swap, component_swizzle, image_view_type, promote_format_to_depth,
    resolve_color_format, resolve_depth_format,
};

const SOURCE: &str = "liverpool::vulkan::view_descriptor";

/// Normalized description of one view into an image
///
/// Transient: built per bind and consumed by realization. Two descriptors that
/// compare equal always realize to interchangeable views of the same image,
/// which is what lets the view cache key on them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ViewDescriptor {
    pub vk_format: vk::Format,
    pub view_type: vk::ImageViewType,
    pub is_storage: bool,
    pub base_mip_level: u32,
    pub mip_level_count: u32,
    pub base_array_layer: u32,
    pub array_layer_count: u32,
    /// Channel swizzle in r, g, b, a order
    pub components: [vk::ComponentSwizzle; 4],
}

/// Swizzle of views that pass channels through unchanged
pub const IDENTITY_SWIZZLE: [vk::ComponentSwizzle; 4] = [vk::ComponentSwizzle::IDENTITY; 4];

/// Defensive clamps for malformed hardware ranges
///
/// These depend on the view dimension, not the format, and are applied by the
/// builders after the raw counts are computed.
pub mod view_policy {
    use ash::vk;
    use liverpool_gpu::liverpool::amdgpu::ImageType;

    /// Faces of a single cube map
    pub const CUBE_FACES: u32 = 6;

    /// Titles bind cube arrays where the shader declares a single cube
    pub fn clamp_cube_layers(layers: u32) -> u32 {
        layers.min(CUBE_FACES)
    }

    /// Volume views have one layer; their array range is stale and never read
    ///
    /// Returns the forced layer count, or `None` when the range applies.
    pub fn volume_layers(view_type: vk::ImageViewType) -> Option<u32> {
        (view_type == vk::ImageViewType::TYPE_3D).then_some(1)
    }

    /// Multi-sampled images have a single level; their level range is never read
    ///
    /// Returns the forced level count, or `None` when the range applies.
    pub fn msaa_levels(image_type: ImageType) -> Option<u32> {
        image_type.is_msaa().then_some(1)
    }

    /// Render targets bind one layer as 2D and several as a 2D array
    pub fn target_view_type(layers: u32) -> vk::ImageViewType {
        if layers > 1 {
            vk::ImageViewType::TYPE_2D_ARRAY
        } else {
            vk::ImageViewType::TYPE_2D
        }
    }
}

impl ViewDescriptor {
    /// Build the view of a shader-bound texture resource
    ///
    /// Storage binding decides three things: the sRGB number format falls back
    /// to UNORM, the destination select is dropped, and the view keeps the
    /// storage usage bit at realization.
    ///
    /// # Errors
    ///
    /// `UnsupportedFormat` when the format pair has no host format,
    /// `InvalidDescriptor` for reversed ranges or an invalid image type.
    pub fn from_generic_image(image: &GenericImage) -> Result<Self> {
        let is_storage = image.storage_requested;

        let number_format = if is_storage {
            image.number_format.without_srgb()
        } else {
            image.number_format
        };
        let mut vk_format = resolve_color_format(image.data_format, number_format)?.vk_format;
        if image.is_depth_sampled {
            vk_format = promote_format_to_depth(vk_format)?;
        }

        let mip_level_count = match view_policy::msaa_levels(image.image_type) {
            Some(levels) => levels,
            None => inclusive_count("mip", image.base_level, image.last_level)?,
        };

        let mut view_type = image_view_type(image.image_type)?;
        if view_type == vk::ImageViewType::CUBE && image.is_array_requested {
            view_type = vk::ImageViewType::CUBE_ARRAY;
        }

        let (base_array_layer, array_layer_count) = match view_policy::volume_layers(view_type) {
            Some(layers) => (0, layers),
            None => {
                let layers = inclusive_count("array", image.base_array, image.last_array)?;
                if view_type == vk::ImageViewType::CUBE {
                    (image.base_array, view_policy::clamp_cube_layers(layers))
                } else {
                    (image.base_array, layers)
                }
            }
        };

        let components = if is_storage {
            IDENTITY_SWIZZLE
        } else {
            let select = image.component_select;
            [select.r, select.g, select.b, select.a].map(component_swizzle)
        };

        Ok(Self {
            vk_format,
            view_type,
            is_storage,
            base_mip_level: image.base_level,
            mip_level_count,
            base_array_layer,
            array_layer_count,
            components,
        })
    }

    /// Build the attachment view of a color render target
    ///
    /// # Errors
    ///
    /// `UnsupportedFormat` for an unmapped format pair, `InvalidDescriptor` when
    /// the first slice is past the end of the surface.
    pub fn from_color_target(target: &ColorTarget) -> Result<Self> {
        let base_format = resolve_color_format(target.data_format, target.number_format)?.vk_format;
        let array_layer_count = slice_count(target.slice_start, target.total_slices)?;

        Ok(Self {
            vk_format: adjust_color_swap(base_format, target.swap_mode),
            view_type: view_policy::target_view_type(array_layer_count),
            is_storage: false,
            base_mip_level: 0,
            mip_level_count: 1,
            base_array_layer: target.slice_start,
            array_layer_count,
            components: IDENTITY_SWIZZLE,
        })
    }

    /// Build the attachment view of a depth-stencil target
    ///
    /// A depth-writing target keeps the storage usage bit on its view.
    ///
    /// # Errors
    ///
    /// `UnsupportedFormat` for an unmapped z/stencil pair, `InvalidDescriptor`
    /// when the first slice is past the end of the surface.
    pub fn from_depth_target(target: &DepthTarget) -> Result<Self> {
        let vk_format = resolve_depth_format(target.z_format, target.stencil_format)?.vk_format;
        let array_layer_count = slice_count(target.slice_start, target.total_slices)?;

        Ok(Self {
            vk_format,
            view_type: view_policy::target_view_type(array_layer_count),
            is_storage: target.write_enable,
            base_mip_level: 0,
            mip_level_count: 1,
            base_array_layer: target.slice_start,
            array_layer_count,
            components: IDENTITY_SWIZZLE,
        })
    }

    /// Build the view of any hardware surface descriptor
    pub fn from_source(source: &SourceDescriptor) -> Result<Self> {
        let descriptor = match source {
            SourceDescriptor::GenericImage(image) => Self::from_generic_image(image),
            SourceDescriptor::ColorTarget(target) => Self::from_color_target(target),
            SourceDescriptor::DepthTarget(target) => Self::from_depth_target(target),
        }?;
        video_trace!(SOURCE, "{} -> {:?}", source.kind(), descriptor);
        Ok(descriptor)
    }

    /// Swizzle as the Vulkan create-info expects it
    pub fn component_mapping(&self) -> vk::ComponentMapping {
        let [r, g, b, a] = self.components;
        vk::ComponentMapping { r, g, b, a }
    }

    /// Check the structural invariants every built descriptor satisfies
    ///
    /// # Errors
    ///
    /// `InvalidDescriptor` naming the first violated rule.
    pub fn validate(&self) -> Result<()> {
        if self.vk_format == vk::Format::UNDEFINED {
            return Err(Error::InvalidDescriptor("view has an undefined format".to_string()));
        }
        if self.mip_level_count == 0 {
            return Err(Error::InvalidDescriptor("view has no mip level".to_string()));
        }
        if self.array_layer_count == 0 {
            return Err(Error::InvalidDescriptor("view has no array layer".to_string()));
        }
        if self.view_type == vk::ImageViewType::CUBE && self.array_layer_count > view_policy::CUBE_FACES {
            return Err(Error::InvalidDescriptor(format!(
                "cube view spans {} layers",
                self.array_layer_count
            )));
        }
        if self.view_type == vk::ImageViewType::TYPE_3D && self.array_layer_count != 1 {
            return Err(Error::InvalidDescriptor(format!(
                "3D view spans {} layers",
                self.array_layer_count
            )));
        }
        Ok(())
    }
}

/// Element count of an inclusive `[base, last]` hardware range
fn inclusive_count(what: &str, base: u32, last: u32) -> Result<u32> {
    match last.checked_sub(base) {
        Some(span) => Ok(span.saturating_add(1)),
        None => Err(invalid("reversed range", format!("{} range {}..={} is reversed", what, base, last))),
    }
}

/// Number of bound slices of a render target
fn slice_count(slice_start: u32, total_slices: u32) -> Result<u32> {
    match total_slices.checked_sub(slice_start) {
        Some(count) if count > 0 => Ok(count),
        _ => Err(invalid("slice past end", format!(
            "slice {} is outside a {}-slice surface",
            slice_start, total_slices
        ))),
    }
}

/// Report a malformed descriptor once per kind of defect, not per guest value
fn invalid(kind: &'static str, what: String) -> Error {
    VideoCore::log_once(LogSeverity::Warn, SOURCE, kind, format!("malformed descriptor, {}", what));
    Error::InvalidDescriptor(what)
}

#[cfg(test)]
#[path = "vulkan_view_descriptor_tests.rs"]
mod tests;
