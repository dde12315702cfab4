/// Image view cache - arena owning every realized view
///
/// Uses a SlotMap so cache slots own their views and callers hold stable
/// `ImageViewId` keys. Evicting an image drops all of its views in one pass;
/// keys of evicted views simply stop resolving.

use std::sync::Arc;
use rustc_hash::FxHashMap;
use slotmap::{new_key_type, SlotMap};
use liverpool_gpu::liverpool::Result;
use liverpool_gpu::video_debug;
use crate::vulkan_image_view::{ImageId, ImageView, PhysicalImage, ViewDevice};
use crate::vulkan_view_descriptor::ViewDescriptor;

const SOURCE: &str = "liverpool::vulkan::view_cache";

// ===== SLOT MAP KEY =====

new_key_type! {
    /// Stable key for an ImageView within an ImageViewCache.
    ///
    /// A key becomes invalid only when its view is evicted.
    pub struct ImageViewId;
}

/// Owner of the realized views of every physical image
///
/// Not internally synchronized: the texture cache holds its own lock around
/// `find_or_create` and the eviction calls.
pub struct ImageViewCache {
    /// Device the views are created on
    device: Arc<dyn ViewDevice>,
    /// Realized views
    views: SlotMap<ImageViewId, ImageView>,
    /// Reuse index over (image, descriptor)
    lookup: FxHashMap<(ImageId, ViewDescriptor), ImageViewId>,
}

impl ImageViewCache {
    /// Create an empty cache creating its views on `device`
    pub fn new(device: Arc<dyn ViewDevice>) -> Self {
        Self {
            device,
            views: SlotMap::with_key(),
            lookup: FxHashMap::default(),
        }
    }

    /// Return the view of `desc` on `image`, realizing it on first request
    ///
    /// # Errors
    ///
    /// Any realization error. Nothing is inserted on failure.
    pub fn find_or_create<I: PhysicalImage + ?Sized>(
        &mut self,
        image: &I,
        desc: &ViewDescriptor,
    ) -> Result<ImageViewId> {
        let key = (image.id(), *desc);
        if let Some(&id) = self.lookup.get(&key) {
            return Ok(id);
        }

        let view = ImageView::new(Arc::clone(&self.device), image, desc)?;
        let id = self.views.insert(view);
        self.lookup.insert(key, id);
        Ok(id)
    }

    /// Resolve a view key
    pub fn get(&self, id: ImageViewId) -> Option<&ImageView> {
        self.views.get(id)
    }

    /// True while `id` refers to a live view
    pub fn contains(&self, id: ImageViewId) -> bool {
        self.views.contains_key(id)
    }

    /// Drop a single view
    ///
    /// Returns false if the key is stale.
    pub fn remove(&mut self, id: ImageViewId) -> bool {
        match self.views.remove(id) {
            Some(view) => {
                self.lookup.remove(&(view.image_id(), *view.descriptor()));
                true
            }
            None => false,
        }
    }

    /// Drop every view of `image_id`, returning how many were destroyed
    pub fn evict_image(&mut self, image_id: ImageId) -> usize {
        let before = self.views.len();
        self.views.retain(|_, view| view.image_id() != image_id);
        self.lookup.retain(|(owner, _), _| *owner != image_id);

        let evicted = before - self.views.len();
        if evicted > 0 {
            video_debug!(SOURCE, "Evicted {} view(s) of image {:?}", evicted, image_id);
        }
        evicted
    }

    /// Keys of the live views of `image_id`
    pub fn views_of(&self, image_id: ImageId) -> impl Iterator<Item = ImageViewId> + '_ {
        self.views
            .iter()
            .filter(move |(_, view)| view.image_id() == image_id)
            .map(|(id, _)| id)
    }

    /// Number of live views
    pub fn len(&self) -> usize {
        self.views.len()
    }

    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }

    /// Drop every view
    pub fn clear(&mut self) {
        self.lookup.clear();
        self.views.clear();
    }
}

#[cfg(test)]
#[path = "vulkan_view_cache_tests.rs"]
mod tests;
