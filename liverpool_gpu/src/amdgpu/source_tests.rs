/// Tests for the source descriptor types and binding hints

use super::*;
use crate::amdgpu::{
    CompMapping, CompSwizzle, DataFormat, DepthTarget, ImageBinding, ImageType, NumberFormat,
    StencilFormat, SwapMode, ZFormat, ColorTarget, GenericImage,
};

#[test]
fn test_generic_image_defaults() {
    let image = GenericImage::new(DataFormat::Format8_8_8_8, NumberFormat::Unorm, ImageType::Color2D);
    assert_eq!(image.base_level, 0);
    assert_eq!(image.last_level, 0);
    assert_eq!(image.component_select, CompMapping::IDENTITY);
    assert_eq!(image.binding(), ImageBinding::default());
}

#[test]
fn test_generic_image_with_binding_round_trips_hints() {
    let binding = ImageBinding { is_storage: true, is_depth: false, is_array: true };
    let image = GenericImage::new(DataFormat::Format32, NumberFormat::Float, ImageType::Cube)
        .with_binding(binding);

    assert!(image.storage_requested);
    assert!(!image.is_depth_sampled);
    assert!(image.is_array_requested);
    assert_eq!(image.binding(), binding);
}

#[test]
fn test_generic_image_builders() {
    let swizzle = CompMapping {
        r: CompSwizzle::Blue,
        g: CompSwizzle::Green,
        b: CompSwizzle::Red,
        a: CompSwizzle::One,
    };
    let image = GenericImage::new(DataFormat::Format8_8_8_8, NumberFormat::Srgb, ImageType::Color2DArray)
        .with_levels(1, 4)
        .with_layers(2, 7)
        .with_swizzle(swizzle);

    assert_eq!((image.base_level, image.last_level), (1, 4));
    assert_eq!((image.base_array, image.last_array), (2, 7));
    assert_eq!(image.component_select, swizzle);
}

#[test]
fn test_image_type_msaa() {
    assert!(ImageType::Color2DMsaa.is_msaa());
    assert!(ImageType::Color2DMsaaArray.is_msaa());
    assert!(!ImageType::Color2D.is_msaa());
    assert_eq!(ImageType::try_from(11), Ok(ImageType::Cube));
}

#[test]
fn test_source_descriptor_from_variants() {
    let color = ColorTarget {
        data_format: DataFormat::Format8_8_8_8,
        number_format: NumberFormat::Unorm,
        swap_mode: SwapMode::NO_SWAP,
        slice_start: 0,
        total_slices: 1,
    };
    let depth = DepthTarget {
        z_format: ZFormat::Z32Float,
        stencil_format: StencilFormat::Invalid,
        slice_start: 0,
        total_slices: 1,
        write_enable: true,
    };

    assert_eq!(SourceDescriptor::from(color).kind(), "color target");
    assert_eq!(SourceDescriptor::from(depth).kind(), "depth target");
    assert!(!depth.has_stencil());
    assert_eq!(SwapMode::NO_SWAP, SwapMode::Standard);
}
