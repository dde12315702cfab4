/*!
# Liverpool GPU - Vulkan View Backend

Vulkan implementation of the surface/view translation layer.

This crate resolves the hardware surface descriptors of `liverpool_gpu` into
Vulkan formats and view descriptors, and realizes those descriptors as image
views on physical images owned by the texture cache. Vulkan bindings come from
Ash; no GPU is needed for anything but the final `vkCreateImageView` call.

## Data flow

```text
SourceDescriptor -> ViewDescriptor -> ViewPlan (+ PhysicalImage) -> ImageView
```
*/

// Vulkan implementation modules
mod vulkan_format;
mod vulkan_view_descriptor;
mod vulkan_image_view;
mod vulkan_view_cache;

pub use vulkan_view_descriptor::{ViewDescriptor, IDENTITY_SWIZZLE, view_policy};
pub use vulkan_image_view::{ImageId, ImageView, PhysicalImage, ViewDevice, ViewPlan};
pub use vulkan_view_cache::{ImageViewCache, ImageViewId};

/// Format resolution tables and hardware vocabulary translation
pub mod format {
    pub use crate::vulkan_format::{
        adjust_color_swap, component_mapping, component_swizzle, depth_formats, image_view_type,
        promote_format_to_depth, resolve_color_format, resolve_depth_format, surface_formats,
        DepthFormatInfo, DepthFormatKey, FormatEntry, FormatKey, SurfaceFormatInfo,
        BUFFER_READ, BUFFER_WRITE, DEPTH_STENCIL, IMAGE_READ, IMAGE_WRITE, MRT,
    };
}
