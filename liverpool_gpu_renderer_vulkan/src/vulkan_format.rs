/// Format resolution tables - hardware formats to Vulkan formats
///
/// Fixed, ordered mappings from (data format, number format) and
/// (z format, stencil format) pairs to a Vulkan format plus the features an
/// image of that format needs. Lookups are exact: a missing key is an
/// `UnsupportedFormat` error, never a fallback layout.

use ash::vk;
use liverpool_gpu::liverpool::{Error, Result, VideoCore};
use liverpool_gpu::liverpool::amdgpu::{
    CompMapping, CompSwizzle, DataFormat, ImageType, NumberFormat, StencilFormat, SwapMode, ZFormat,
};
use liverpool_gpu::liverpool::log::LogSeverity;
use liverpool_gpu::video_trace;

const SOURCE: &str = "liverpool::vulkan::format";

// ===== FEATURE GROUPS =====

const fn combine(flags: &[vk::FormatFeatureFlags2]) -> vk::FormatFeatureFlags2 {
    let mut raw = 0;
    let mut i = 0;
    while i < flags.len() {
        raw |= flags[i].as_raw();
        i += 1;
    }
    vk::FormatFeatureFlags2::from_raw(raw)
}

/// Sampling and transfers
pub const IMAGE_READ: vk::FormatFeatureFlags2 = combine(&[
    vk::FormatFeatureFlags2::SAMPLED_IMAGE,
    vk::FormatFeatureFlags2::TRANSFER_SRC,
    vk::FormatFeatureFlags2::TRANSFER_DST,
]);
/// Image stores
pub const IMAGE_WRITE: vk::FormatFeatureFlags2 = vk::FormatFeatureFlags2::STORAGE_IMAGE;
/// Color attachment
pub const MRT: vk::FormatFeatureFlags2 = vk::FormatFeatureFlags2::COLOR_ATTACHMENT;
/// Depth-stencil attachment that can also be sampled
pub const DEPTH_STENCIL: vk::FormatFeatureFlags2 = combine(&[
    vk::FormatFeatureFlags2::DEPTH_STENCIL_ATTACHMENT,
    IMAGE_READ,
]);
/// Texel buffer and vertex fetch
pub const BUFFER_READ: vk::FormatFeatureFlags2 = combine(&[
    vk::FormatFeatureFlags2::UNIFORM_TEXEL_BUFFER,
    vk::FormatFeatureFlags2::VERTEX_BUFFER,
]);
/// Storage texel buffer
pub const BUFFER_WRITE: vk::FormatFeatureFlags2 = vk::FormatFeatureFlags2::STORAGE_TEXEL_BUFFER;

const COLOR: vk::FormatFeatureFlags2 = combine(&[IMAGE_READ, IMAGE_WRITE, MRT, BUFFER_READ, BUFFER_WRITE]);
const SRGB: vk::FormatFeatureFlags2 = combine(&[IMAGE_READ, MRT]);
const PACKED: vk::FormatFeatureFlags2 = combine(&[IMAGE_READ, MRT]);
const SCALED: vk::FormatFeatureFlags2 = BUFFER_READ;
const COMPRESSED: vk::FormatFeatureFlags2 = IMAGE_READ;

// ===== TABLE TYPES =====

/// Key of the color surface table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FormatKey {
    pub data_format: DataFormat,
    pub number_format: NumberFormat,
}

/// Key of the depth surface table; `StencilFormat::Invalid` selects depth-only formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DepthFormatKey {
    pub z_format: ZFormat,
    pub stencil_format: StencilFormat,
}

/// Resolved host format and the features an image of that format needs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FormatEntry {
    pub vk_format: vk::Format,
    pub features: vk::FormatFeatureFlags2,
}

/// One row of the color surface table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceFormatInfo {
    pub key: FormatKey,
    pub entry: FormatEntry,
}

/// One row of the depth surface table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DepthFormatInfo {
    pub key: DepthFormatKey,
    pub entry: FormatEntry,
}

const fn surface(
    data_format: DataFormat,
    number_format: NumberFormat,
    vk_format: vk::Format,
    features: vk::FormatFeatureFlags2,
) -> SurfaceFormatInfo {
    SurfaceFormatInfo {
        key: FormatKey { data_format, number_format },
        entry: FormatEntry { vk_format, features },
    }
}

const fn depth(z_format: ZFormat, stencil_format: StencilFormat, vk_format: vk::Format) -> DepthFormatInfo {
    DepthFormatInfo {
        key: DepthFormatKey { z_format, stencil_format },
        entry: FormatEntry { vk_format, features: DEPTH_STENCIL },
    }
}

// ===== TABLES =====

use DataFormat as D;
use NumberFormat as N;

const SURFACE_FORMATS: &[SurfaceFormatInfo] = &[
    // 8
    surface(D::Format8, N::Unorm, vk::Format::R8_UNORM, COLOR),
    surface(D::Format8, N::Snorm, vk::Format::R8_SNORM, COLOR),
    surface(D::Format8, N::Uscaled, vk::Format::R8_USCALED, SCALED),
    surface(D::Format8, N::Sscaled, vk::Format::R8_SSCALED, SCALED),
    surface(D::Format8, N::Uint, vk::Format::R8_UINT, COLOR),
    surface(D::Format8, N::Sint, vk::Format::R8_SINT, COLOR),
    surface(D::Format8, N::Srgb, vk::Format::R8_SRGB, SRGB),
    // 16
    surface(D::Format16, N::Unorm, vk::Format::R16_UNORM, COLOR),
    surface(D::Format16, N::Snorm, vk::Format::R16_SNORM, COLOR),
    surface(D::Format16, N::Uscaled, vk::Format::R16_USCALED, SCALED),
    surface(D::Format16, N::Sscaled, vk::Format::R16_SSCALED, SCALED),
    surface(D::Format16, N::Uint, vk::Format::R16_UINT, COLOR),
    surface(D::Format16, N::Sint, vk::Format::R16_SINT, COLOR),
    surface(D::Format16, N::Float, vk::Format::R16_SFLOAT, COLOR),
    // 8_8
    surface(D::Format8_8, N::Unorm, vk::Format::R8G8_UNORM, COLOR),
    surface(D::Format8_8, N::Snorm, vk::Format::R8G8_SNORM, COLOR),
    surface(D::Format8_8, N::Uscaled, vk::Format::R8G8_USCALED, SCALED),
    surface(D::Format8_8, N::Sscaled, vk::Format::R8G8_SSCALED, SCALED),
    surface(D::Format8_8, N::Uint, vk::Format::R8G8_UINT, COLOR),
    surface(D::Format8_8, N::Sint, vk::Format::R8G8_SINT, COLOR),
    surface(D::Format8_8, N::Srgb, vk::Format::R8G8_SRGB, SRGB),
    // 32
    surface(D::Format32, N::Uint, vk::Format::R32_UINT, COLOR),
    surface(D::Format32, N::Sint, vk::Format::R32_SINT, COLOR),
    surface(D::Format32, N::Float, vk::Format::R32_SFLOAT, COLOR),
    // 16_16
    surface(D::Format16_16, N::Unorm, vk::Format::R16G16_UNORM, COLOR),
    surface(D::Format16_16, N::Snorm, vk::Format::R16G16_SNORM, COLOR),
    surface(D::Format16_16, N::Uscaled, vk::Format::R16G16_USCALED, SCALED),
    surface(D::Format16_16, N::Sscaled, vk::Format::R16G16_SSCALED, SCALED),
    surface(D::Format16_16, N::Uint, vk::Format::R16G16_UINT, COLOR),
    surface(D::Format16_16, N::Sint, vk::Format::R16G16_SINT, COLOR),
    surface(D::Format16_16, N::Float, vk::Format::R16G16_SFLOAT, COLOR),
    // 10_11_11 / 11_11_10
    surface(D::Format10_11_11, N::Float, vk::Format::B10G11R11_UFLOAT_PACK32, COLOR),
    surface(D::Format11_11_10, N::Float, vk::Format::B10G11R11_UFLOAT_PACK32, COLOR),
    // 2_10_10_10
    surface(D::Format2_10_10_10, N::Unorm, vk::Format::A2B10G10R10_UNORM_PACK32, COLOR),
    surface(D::Format2_10_10_10, N::Snorm, vk::Format::A2B10G10R10_SNORM_PACK32, SCALED),
    surface(D::Format2_10_10_10, N::Uscaled, vk::Format::A2B10G10R10_USCALED_PACK32, SCALED),
    surface(D::Format2_10_10_10, N::Sscaled, vk::Format::A2B10G10R10_SSCALED_PACK32, SCALED),
    surface(D::Format2_10_10_10, N::Uint, vk::Format::A2B10G10R10_UINT_PACK32, COLOR),
    surface(D::Format2_10_10_10, N::Sint, vk::Format::A2B10G10R10_SINT_PACK32, SCALED),
    // 8_8_8_8
    surface(D::Format8_8_8_8, N::Unorm, vk::Format::R8G8B8A8_UNORM, COLOR),
    surface(D::Format8_8_8_8, N::Snorm, vk::Format::R8G8B8A8_SNORM, COLOR),
    surface(D::Format8_8_8_8, N::Uscaled, vk::Format::R8G8B8A8_USCALED, SCALED),
    surface(D::Format8_8_8_8, N::Sscaled, vk::Format::R8G8B8A8_SSCALED, SCALED),
    surface(D::Format8_8_8_8, N::Uint, vk::Format::R8G8B8A8_UINT, COLOR),
    surface(D::Format8_8_8_8, N::Sint, vk::Format::R8G8B8A8_SINT, COLOR),
    surface(D::Format8_8_8_8, N::Srgb, vk::Format::R8G8B8A8_SRGB, SRGB),
    // 32_32
    surface(D::Format32_32, N::Uint, vk::Format::R32G32_UINT, COLOR),
    surface(D::Format32_32, N::Sint, vk::Format::R32G32_SINT, COLOR),
    surface(D::Format32_32, N::Float, vk::Format::R32G32_SFLOAT, COLOR),
    // 16_16_16_16
    surface(D::Format16_16_16_16, N::Unorm, vk::Format::R16G16B16A16_UNORM, COLOR),
    surface(D::Format16_16_16_16, N::Snorm, vk::Format::R16G16B16A16_SNORM, COLOR),
    surface(D::Format16_16_16_16, N::Uscaled, vk::Format::R16G16B16A16_USCALED, SCALED),
    surface(D::Format16_16_16_16, N::Sscaled, vk::Format::R16G16B16A16_SSCALED, SCALED),
    surface(D::Format16_16_16_16, N::Uint, vk::Format::R16G16B16A16_UINT, COLOR),
    surface(D::Format16_16_16_16, N::Sint, vk::Format::R16G16B16A16_SINT, COLOR),
    surface(D::Format16_16_16_16, N::Float, vk::Format::R16G16B16A16_SFLOAT, COLOR),
    // 32_32_32
    surface(D::Format32_32_32, N::Uint, vk::Format::R32G32B32_UINT, BUFFER_READ),
    surface(D::Format32_32_32, N::Sint, vk::Format::R32G32B32_SINT, BUFFER_READ),
    surface(D::Format32_32_32, N::Float, vk::Format::R32G32B32_SFLOAT, BUFFER_READ),
    // 32_32_32_32
    surface(D::Format32_32_32_32, N::Uint, vk::Format::R32G32B32A32_UINT, COLOR),
    surface(D::Format32_32_32_32, N::Sint, vk::Format::R32G32B32A32_SINT, COLOR),
    surface(D::Format32_32_32_32, N::Float, vk::Format::R32G32B32A32_SFLOAT, COLOR),
    // 16-bit packed
    surface(D::Format5_6_5, N::Unorm, vk::Format::B5G6R5_UNORM_PACK16, PACKED),
    surface(D::Format1_5_5_5, N::Unorm, vk::Format::A1R5G5B5_UNORM_PACK16, PACKED),
    surface(D::Format5_5_5_1, N::Unorm, vk::Format::R5G5B5A1_UNORM_PACK16, PACKED),
    surface(D::Format4_4_4_4, N::Unorm, vk::Format::R4G4B4A4_UNORM_PACK16, PACKED),
    // Depth-stencil texel layout
    surface(D::FormatX24_8_32, N::Float, vk::Format::D32_SFLOAT_S8_UINT, DEPTH_STENCIL),
    // Subsampled
    surface(D::FormatGB_GR, N::Unorm, vk::Format::B8G8R8G8_422_UNORM, IMAGE_READ),
    surface(D::FormatBG_RG, N::Unorm, vk::Format::G8B8G8R8_422_UNORM, IMAGE_READ),
    // Shared exponent
    surface(D::Format5_9_9_9, N::Float, vk::Format::E5B9G9R9_UFLOAT_PACK32, IMAGE_READ),
    // Block compressed
    surface(D::FormatBc1, N::Unorm, vk::Format::BC1_RGBA_UNORM_BLOCK, COMPRESSED),
    surface(D::FormatBc1, N::Srgb, vk::Format::BC1_RGBA_SRGB_BLOCK, COMPRESSED),
    surface(D::FormatBc2, N::Unorm, vk::Format::BC2_UNORM_BLOCK, COMPRESSED),
    surface(D::FormatBc2, N::Srgb, vk::Format::BC2_SRGB_BLOCK, COMPRESSED),
    surface(D::FormatBc3, N::Unorm, vk::Format::BC3_UNORM_BLOCK, COMPRESSED),
    surface(D::FormatBc3, N::Srgb, vk::Format::BC3_SRGB_BLOCK, COMPRESSED),
    surface(D::FormatBc4, N::Unorm, vk::Format::BC4_UNORM_BLOCK, COMPRESSED),
    surface(D::FormatBc4, N::Snorm, vk::Format::BC4_SNORM_BLOCK, COMPRESSED),
    surface(D::FormatBc5, N::Unorm, vk::Format::BC5_UNORM_BLOCK, COMPRESSED),
    surface(D::FormatBc5, N::Snorm, vk::Format::BC5_SNORM_BLOCK, COMPRESSED),
    surface(D::FormatBc6, N::Unorm, vk::Format::BC6H_UFLOAT_BLOCK, COMPRESSED),
    surface(D::FormatBc6, N::Snorm, vk::Format::BC6H_SFLOAT_BLOCK, COMPRESSED),
    surface(D::FormatBc7, N::Unorm, vk::Format::BC7_UNORM_BLOCK, COMPRESSED),
    surface(D::FormatBc7, N::Srgb, vk::Format::BC7_SRGB_BLOCK, COMPRESSED),
];

const DEPTH_FORMATS: &[DepthFormatInfo] = &[
    depth(ZFormat::Invalid, StencilFormat::Stencil8, vk::Format::S8_UINT),
    depth(ZFormat::Z16, StencilFormat::Invalid, vk::Format::D16_UNORM),
    depth(ZFormat::Z16, StencilFormat::Stencil8, vk::Format::D16_UNORM_S8_UINT),
    depth(ZFormat::Z32Float, StencilFormat::Invalid, vk::Format::D32_SFLOAT),
    depth(ZFormat::Z32Float, StencilFormat::Stencil8, vk::Format::D32_SFLOAT_S8_UINT),
];

/// Channel-reordered counterparts written by the color block for a given swap mode
const COLOR_SWAPS: &[(SwapMode, vk::Format, vk::Format)] = &[
    (SwapMode::Alternate, vk::Format::R8G8B8A8_UNORM, vk::Format::B8G8R8A8_UNORM),
    (SwapMode::Alternate, vk::Format::B8G8R8A8_UNORM, vk::Format::R8G8B8A8_UNORM),
    (SwapMode::Alternate, vk::Format::R8G8B8A8_SRGB, vk::Format::B8G8R8A8_SRGB),
    (SwapMode::Alternate, vk::Format::B8G8R8A8_SRGB, vk::Format::R8G8B8A8_SRGB),
    (SwapMode::Alternate, vk::Format::A2B10G10R10_UNORM_PACK32, vk::Format::A2R10G10B10_UNORM_PACK32),
    (SwapMode::StandardReverse, vk::Format::R8G8B8A8_UNORM, vk::Format::A8B8G8R8_UNORM_PACK32),
    (SwapMode::StandardReverse, vk::Format::R8G8B8A8_SRGB, vk::Format::A8B8G8R8_SRGB_PACK32),
];

// ===== LOOKUPS =====

/// The ordered color surface table
pub fn surface_formats() -> &'static [SurfaceFormatInfo] {
    SURFACE_FORMATS
}

/// The ordered depth surface table
pub fn depth_formats() -> &'static [DepthFormatInfo] {
    DEPTH_FORMATS
}

/// Resolve a hardware color format pair to a Vulkan format
///
/// # Errors
///
/// `UnsupportedFormat` if the pair has no table entry. The miss is reported once
/// per distinct pair.
pub fn resolve_color_format(data_format: DataFormat, number_format: NumberFormat) -> Result<FormatEntry> {
    let key = FormatKey { data_format, number_format };
    match SURFACE_FORMATS.iter().find(|info| info.key == key) {
        Some(info) => {
            video_trace!(SOURCE, "{:?}/{:?} -> {:?}", data_format, number_format, info.entry.vk_format);
            Ok(info.entry)
        }
        None => Err(unsupported(format!("{:?}/{:?}", data_format, number_format))),
    }
}

/// Resolve a depth/stencil format pair to a Vulkan format
///
/// # Errors
///
/// `UnsupportedFormat` if the pair has no table entry (including a surface with
/// neither depth nor stencil plane).
pub fn resolve_depth_format(z_format: ZFormat, stencil_format: StencilFormat) -> Result<FormatEntry> {
    let key = DepthFormatKey { z_format, stencil_format };
    match DEPTH_FORMATS.iter().find(|info| info.key == key) {
        Some(info) => Ok(info.entry),
        None => Err(unsupported(format!("depth {:?}/{:?}", z_format, stencil_format))),
    }
}

/// Apply the color block's channel swap to a resolved color format
///
/// Returns the swapped counterpart when one exists, the input otherwise.
/// `SwapMode::NO_SWAP` is always the identity.
pub fn adjust_color_swap(format: vk::Format, swap_mode: SwapMode) -> vk::Format {
    COLOR_SWAPS
        .iter()
        .find(|(mode, base, _)| *mode == swap_mode && *base == format)
        .map(|(_, _, swapped)| *swapped)
        .unwrap_or(format)
}

/// Substitute the depth-typed format for a texel format sampled as depth
///
/// The two packed 8-bit x4 formats map to `R32_UINT` so packed depth-stencil
/// bytes pass through without reinterpretation.
///
/// # Errors
///
/// Any other input is a builder defect: panics when `Config::panic_on_unreachable`
/// is set, otherwise reports `UnsupportedFormat`.
pub fn promote_format_to_depth(format: vk::Format) -> Result<vk::Format> {
    match format {
        vk::Format::R32_SFLOAT => Ok(vk::Format::D32_SFLOAT),
        vk::Format::R16_UNORM => Ok(vk::Format::D16_UNORM),
        vk::Format::R8G8B8A8_UNORM | vk::Format::R8G8B8A8_SRGB => Ok(vk::Format::R32_UINT),
        other => Err(VideoCore::unreachable(
            SOURCE,
            format!("no depth counterpart for {:?}", other),
        )),
    }
}

/// Translate one hardware channel select
pub fn component_swizzle(swizzle: CompSwizzle) -> vk::ComponentSwizzle {
    match swizzle {
        CompSwizzle::Zero => vk::ComponentSwizzle::ZERO,
        CompSwizzle::One => vk::ComponentSwizzle::ONE,
        CompSwizzle::Red => vk::ComponentSwizzle::R,
        CompSwizzle::Green => vk::ComponentSwizzle::G,
        CompSwizzle::Blue => vk::ComponentSwizzle::B,
        CompSwizzle::Alpha => vk::ComponentSwizzle::A,
    }
}

/// Translate a hardware destination select into a Vulkan component mapping
pub fn component_mapping(mapping: CompMapping) -> vk::ComponentMapping {
    vk::ComponentMapping {
        r: component_swizzle(mapping.r),
        g: component_swizzle(mapping.g),
        b: component_swizzle(mapping.b),
        a: component_swizzle(mapping.a),
    }
}

/// View type for a hardware image type
///
/// # Errors
///
/// `InvalidDescriptor` for `ImageType::Invalid`.
pub fn image_view_type(image_type: ImageType) -> Result<vk::ImageViewType> {
    match image_type {
        ImageType::Color1D => Ok(vk::ImageViewType::TYPE_1D),
        ImageType::Color1DArray => Ok(vk::ImageViewType::TYPE_1D_ARRAY),
        ImageType::Color2D | ImageType::Color2DMsaa => Ok(vk::ImageViewType::TYPE_2D),
        ImageType::Color2DArray | ImageType::Color2DMsaaArray => Ok(vk::ImageViewType::TYPE_2D_ARRAY),
        ImageType::Color3D => Ok(vk::ImageViewType::TYPE_3D),
        ImageType::Cube => Ok(vk::ImageViewType::CUBE),
        ImageType::Invalid => Err(Error::InvalidDescriptor(
            "image descriptor has an invalid resource type".to_string(),
        )),
    }
}

fn unsupported(what: String) -> Error {
    VideoCore::log_once(
        LogSeverity::Warn,
        SOURCE,
        &what,
        format!("no host format for {}, skipping view", what),
    );
    Error::UnsupportedFormat(what)
}

#[cfg(test)]
#[path = "vulkan_format_tests.rs"]
mod tests;
