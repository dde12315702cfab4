/// Tests for the image view arena: reuse, eviction and stale keys

use super::*;
use ash::vk;
use ash::vk::Handle;
use liverpool_gpu::liverpool::Error;
use liverpool_gpu::liverpool::amdgpu::{
    ColorTarget, DataFormat, GenericImage, ImageType, NumberFormat, SwapMode,
};
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

#[derive(Default)]
struct CountingDevice {
    next_handle: AtomicU64,
    creates: AtomicUsize,
    destroys: AtomicUsize,
}

impl ViewDevice for CountingDevice {
    fn create_image_view(&self, _create_info: &vk::ImageViewCreateInfo<'_>) -> Result<vk::ImageView> {
        self.creates.fetch_add(1, Ordering::SeqCst);
        Ok(vk::ImageView::from_raw(self.next_handle.fetch_add(1, Ordering::SeqCst) + 1))
    }

    fn destroy_image_view(&self, _view: vk::ImageView) {
        self.destroys.fetch_add(1, Ordering::SeqCst);
    }
}

struct TestImage {
    id: u64,
    supported: bool,
}

impl PhysicalImage for TestImage {
    fn id(&self) -> ImageId {
        ImageId(self.id)
    }

    fn native_handle(&self) -> vk::Image {
        vk::Image::from_raw(self.id)
    }

    fn usage_flags(&self) -> vk::ImageUsageFlags {
        vk::ImageUsageFlags::SAMPLED | vk::ImageUsageFlags::COLOR_ATTACHMENT
    }

    fn aspect_mask(&self) -> vk::ImageAspectFlags {
        vk::ImageAspectFlags::COLOR
    }

    fn pixel_format(&self) -> vk::Format {
        vk::Format::R8G8B8A8_UNORM
    }

    fn format_features(&self) -> vk::FormatFeatureFlags2 {
        vk::FormatFeatureFlags2::SAMPLED_IMAGE | vk::FormatFeatureFlags2::COLOR_ATTACHMENT
    }

    fn supported_format(&self, format: vk::Format, _features: vk::FormatFeatureFlags2) -> Option<vk::Format> {
        self.supported.then_some(format)
    }
}

fn image(id: u64) -> TestImage {
    TestImage { id, supported: true }
}

fn sampled_view() -> ViewDescriptor {
    let source = GenericImage::new(DataFormat::Format8_8_8_8, NumberFormat::Unorm, ImageType::Color2D);
    ViewDescriptor::from_generic_image(&source).unwrap()
}

fn target_view() -> ViewDescriptor {
    ViewDescriptor::from_color_target(&ColorTarget {
        data_format: DataFormat::Format8_8_8_8,
        number_format: NumberFormat::Unorm,
        swap_mode: SwapMode::NO_SWAP,
        slice_start: 0,
        total_slices: 1,
    })
    .unwrap()
}

fn setup() -> (Arc<CountingDevice>, ImageViewCache) {
    let device = Arc::new(CountingDevice::default());
    let cache = ImageViewCache::new(device.clone());
    (device, cache)
}

#[test]
fn test_find_or_create_reuses_identical_request() {
    let (device, mut cache) = setup();
    let first = cache.find_or_create(&image(1), &sampled_view()).unwrap();
    let second = cache.find_or_create(&image(1), &sampled_view()).unwrap();

    assert_eq!(first, second);
    assert_eq!(cache.len(), 1);
    assert_eq!(device.creates.load(Ordering::SeqCst), 1);
}

#[test]
fn test_find_or_create_distinguishes_descriptor_and_image() {
    let (device, mut cache) = setup();
    let a = cache.find_or_create(&image(1), &sampled_view()).unwrap();
    let b = cache.find_or_create(&image(1), &target_view()).unwrap();
    let c = cache.find_or_create(&image(2), &sampled_view()).unwrap();

    assert_ne!(a, b);
    assert_ne!(a, c);
    assert_eq!(cache.len(), 3);
    assert_eq!(device.creates.load(Ordering::SeqCst), 3);
    assert_eq!(cache.get(c).unwrap().image_id(), ImageId(2));
}

#[test]
fn test_evict_image_drops_all_its_views() {
    let (device, mut cache) = setup();
    let a = cache.find_or_create(&image(1), &sampled_view()).unwrap();
    let b = cache.find_or_create(&image(1), &target_view()).unwrap();
    let c = cache.find_or_create(&image(2), &sampled_view()).unwrap();

    assert_eq!(cache.views_of(ImageId(1)).count(), 2);
    assert_eq!(cache.evict_image(ImageId(1)), 2);
    assert_eq!(device.destroys.load(Ordering::SeqCst), 2);

    assert!(cache.get(a).is_none());
    assert!(cache.get(b).is_none());
    assert!(cache.contains(c));
    assert_eq!(cache.evict_image(ImageId(1)), 0);
}

#[test]
fn test_recreate_after_eviction_gets_new_key() {
    let (device, mut cache) = setup();
    let old = cache.find_or_create(&image(1), &sampled_view()).unwrap();
    cache.evict_image(ImageId(1));
    let new = cache.find_or_create(&image(1), &sampled_view()).unwrap();

    assert_ne!(old, new);
    assert!(cache.get(old).is_none());
    assert_eq!(device.creates.load(Ordering::SeqCst), 2);
}

#[test]
fn test_remove_single_view() {
    let (device, mut cache) = setup();
    let id = cache.find_or_create(&image(1), &sampled_view()).unwrap();

    assert!(cache.remove(id));
    assert!(!cache.remove(id));
    assert!(cache.is_empty());
    assert_eq!(device.destroys.load(Ordering::SeqCst), 1);

    cache.find_or_create(&image(1), &sampled_view()).unwrap();
    assert_eq!(device.creates.load(Ordering::SeqCst), 2);
}

#[test]
fn test_failed_realization_inserts_nothing() {
    let (device, mut cache) = setup();
    let unsupported = TestImage { id: 3, supported: false };

    let result = cache.find_or_create(&unsupported, &sampled_view());
    assert!(matches!(result, Err(Error::UnsupportedFormat(_))));
    assert!(cache.is_empty());
    assert_eq!(device.creates.load(Ordering::SeqCst), 0);
}

#[test]
fn test_clear_and_drop_destroy_every_view() {
    let (device, mut cache) = setup();
    cache.find_or_create(&image(1), &sampled_view()).unwrap();
    cache.find_or_create(&image(2), &sampled_view()).unwrap();
    cache.clear();
    assert_eq!(device.destroys.load(Ordering::SeqCst), 2);

    cache.find_or_create(&image(1), &target_view()).unwrap();
    drop(cache);
    assert_eq!(device.destroys.load(Ordering::SeqCst), 3);
}
