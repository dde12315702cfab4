/// Image view - realization of a view descriptor on a physical image
///
/// The physical image belongs to the texture cache. Realization reconciles the
/// logical descriptor with what the image really is (its usage, aspect and
/// allocation format), asks the image for a device-supported format and
/// creates the Vulkan view.

use std::sync::Arc;
use ash::vk;
use liverpool_gpu::liverpool::{Error, Result, VideoCore};
use liverpool_gpu::liverpool::log::LogSeverity;
use liverpool_gpu::{video_debug, video_err};
use crate::vulkan_view_descriptor::ViewDescriptor;

const SOURCE: &str = "liverpool::vulkan::image_view";

/// Identity of a physical image, assigned by the texture cache
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ImageId(pub u64);

/// A physical image as exposed by the texture cache
pub trait PhysicalImage {
    /// Stable identity within the texture cache
    fn id(&self) -> ImageId;

    /// Vulkan image handle
    fn native_handle(&self) -> vk::Image;

    /// Usage the image was created with
    fn usage_flags(&self) -> vk::ImageUsageFlags;

    /// Planes the image carries (color, depth, stencil)
    fn aspect_mask(&self) -> vk::ImageAspectFlags;

    /// Format the image was actually allocated with
    fn pixel_format(&self) -> vk::Format;

    /// Features the image's format had to provide at allocation
    fn format_features(&self) -> vk::FormatFeatureFlags2;

    /// Resolve a requested format to one the device supports with `features`
    ///
    /// Returns `None` when the device offers no compatible format.
    fn supported_format(&self, format: vk::Format, features: vk::FormatFeatureFlags2) -> Option<vk::Format>;
}

/// Creation and destruction of image views on a device
///
/// Implemented for `ash::Device`. Callers serialize creation against a shared
/// device themselves.
pub trait ViewDevice: Send + Sync {
    fn create_image_view(&self, create_info: &vk::ImageViewCreateInfo<'_>) -> Result<vk::ImageView>;
    fn destroy_image_view(&self, view: vk::ImageView);
}

impl ViewDevice for ash::Device {
    fn create_image_view(&self, create_info: &vk::ImageViewCreateInfo<'_>) -> Result<vk::ImageView> {
        let created = unsafe { ash::Device::create_image_view(self, create_info, None) };
        created.map_err(|result| match result {
            vk::Result::ERROR_OUT_OF_HOST_MEMORY | vk::Result::ERROR_OUT_OF_DEVICE_MEMORY => Error::OutOfMemory,
            other => video_err!(SOURCE, BackendError, "vkCreateImageView failed: {:?}", other),
        })
    }

    fn destroy_image_view(&self, view: vk::ImageView) {
        unsafe {
            ash::Device::destroy_image_view(self, view, None);
        }
    }
}

/// Everything a view creation needs, resolved against one physical image
#[derive(Debug, Clone, Copy)]
pub struct ViewPlan {
    pub image: vk::Image,
    pub view_type: vk::ImageViewType,
    /// Device-supported format the view is created with
    pub format: vk::Format,
    pub usage: vk::ImageUsageFlags,
    pub components: vk::ComponentMapping,
    pub subresource_range: vk::ImageSubresourceRange,
}

/// Texel formats a shader uses to read the depth plane
fn aliases_depth(format: vk::Format) -> bool {
    matches!(
        format,
        vk::Format::R32_SFLOAT | vk::Format::D32_SFLOAT | vk::Format::R16_UNORM | vk::Format::D16_UNORM
    )
}

/// Texel formats a shader uses to read the stencil plane
fn aliases_stencil(format: vk::Format) -> bool {
    matches!(format, vk::Format::R8_UINT | vk::Format::R8_UNORM)
}

impl ViewPlan {
    /// Resolve `desc` against `image` without touching the device
    ///
    /// # Errors
    ///
    /// `UnsupportedFormat` if the device supports no format compatible with the
    /// view's format and the image's features.
    pub fn new<I: PhysicalImage + ?Sized>(image: &I, desc: &ViewDescriptor) -> Result<Self> {
        let mut usage = image.usage_flags();
        if !desc.is_storage {
            usage &= !vk::ImageUsageFlags::STORAGE;
        }

        let mut format = desc.vk_format;
        let image_aspect = image.aspect_mask();
        let mut aspect = image_aspect;

        // Depth and stencil images sampled through a plain texel view
        if image_aspect.contains(vk::ImageAspectFlags::DEPTH) && aliases_depth(format) {
            format = image.pixel_format();
            aspect = vk::ImageAspectFlags::DEPTH;
        }
        if image_aspect.contains(vk::ImageAspectFlags::STENCIL) && aliases_stencil(format) {
            format = image.pixel_format();
            aspect = vk::ImageAspectFlags::STENCIL;
        }

        let features = image.format_features();
        let format = match image.supported_format(format, features) {
            Some(supported) => supported,
            None => {
                let what = format!("{:?} with {:?}", format, features);
                // Keyed on the format alone, image features vary per allocation
                VideoCore::log_once(
                    LogSeverity::Warn,
                    SOURCE,
                    &format!("device format {:?}", format),
                    format!("device supports no format for {}, skipping view", what),
                );
                return Err(Error::UnsupportedFormat(what));
            }
        };

        Ok(Self {
            image: image.native_handle(),
            view_type: desc.view_type,
            format,
            usage,
            components: desc.component_mapping(),
            subresource_range: vk::ImageSubresourceRange {
                aspect_mask: aspect,
                base_mip_level: desc.base_mip_level,
                level_count: desc.mip_level_count,
                base_array_layer: desc.base_array_layer,
                layer_count: desc.array_layer_count,
            },
        })
    }

    /// Aspect the view addresses
    pub fn aspect(&self) -> vk::ImageAspectFlags {
        self.subresource_range.aspect_mask
    }
}

/// A realized Vulkan image view
///
/// Owned by exactly one cache slot. Not `Clone`: the handle is destroyed
/// exactly once, when the view is dropped.
pub struct ImageView {
    handle: vk::ImageView,
    image_id: ImageId,
    descriptor: ViewDescriptor,
    plan: ViewPlan,
    device: Arc<dyn ViewDevice>,
}

impl ImageView {
    /// Realize `desc` on `image`
    ///
    /// # Errors
    ///
    /// `UnsupportedFormat` from planning (no device call is made in that case),
    /// `OutOfMemory` or `BackendError` if the device rejects the view.
    pub fn new<I: PhysicalImage + ?Sized>(
        device: Arc<dyn ViewDevice>,
        image: &I,
        desc: &ViewDescriptor,
    ) -> Result<Self> {
        let plan = ViewPlan::new(image, desc)?;

        let mut usage_info = vk::ImageViewUsageCreateInfo::default().usage(plan.usage);
        let create_info = vk::ImageViewCreateInfo::default()
            .push_next(&mut usage_info)
            .image(plan.image)
            .view_type(plan.view_type)
            .format(plan.format)
            .components(plan.components)
            .subresource_range(plan.subresource_range);

        let handle = device.create_image_view(&create_info)?;
        video_debug!(
            SOURCE,
            "Created {:?} view {:?} of image {:?} ({:?}, levels {}+{}, layers {}+{})",
            plan.view_type,
            handle,
            image.id(),
            plan.format,
            plan.subresource_range.base_mip_level,
            plan.subresource_range.level_count,
            plan.subresource_range.base_array_layer,
            plan.subresource_range.layer_count,
        );

        Ok(Self {
            handle,
            image_id: image.id(),
            descriptor: *desc,
            plan,
            device,
        })
    }

    /// Vulkan view handle
    pub fn handle(&self) -> vk::ImageView {
        self.handle
    }

    /// Image the view is bound to
    pub fn image_id(&self) -> ImageId {
        self.image_id
    }

    /// Descriptor the view was realized from
    pub fn descriptor(&self) -> &ViewDescriptor {
        &self.descriptor
    }

    /// Resolved creation parameters
    pub fn plan(&self) -> &ViewPlan {
        &self.plan
    }
}

impl std::fmt::Debug for ImageView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageView")
            .field("handle", &self.handle)
            .field("image_id", &self.image_id)
            .field("plan", &self.plan)
            .finish()
    }
}

impl Drop for ImageView {
    fn drop(&mut self) {
        self.device.destroy_image_view(self.handle);
    }
}

#[cfg(test)]
#[path = "vulkan_image_view_tests.rs"]
mod tests;
