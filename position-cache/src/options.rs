use alloc::sync::Arc;
use alloc::vec::Vec;

use crate::{CellSize, GridOffset, GridPositionChanges, PositionChanges, Rect, ScrollDirection};

/// Measures one list item: `(item, index, 0)`.
///
/// The third argument is always `0` for lists; it keeps the signature aligned with
/// [`CellSizeFn`].
pub type ItemSizeFn<T> = Arc<dyn Fn(&T, usize, usize) -> u32 + Send + Sync>;

/// Measures one grid cell: `(item, row, column)`.
pub type CellSizeFn<T> = Arc<dyn Fn(&T, usize, usize) -> CellSize + Send + Sync>;

/// A callback fired after a recompute moved something.
pub type OnChangeCallback = Arc<dyn Fn(PositionChanges) + Send + Sync>;

/// Grid counterpart of [`OnChangeCallback`].
pub type OnGridChangeCallback = Arc<dyn Fn(GridPositionChanges) + Send + Sync>;

/// Distances, in viewport multiples, that drive window recomputes and render ranges.
///
/// These are tuning knobs, not invariants: any values keep the offset table consistent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WindowTuning {
    /// Pixels measured before the pivot (pivot included).
    pub before_viewports: u32,
    /// Pixels measured after the pivot (pivot included).
    pub after_viewports: u32,
    /// Replaces `before`/`after` on the side the viewport is scrolling toward.
    pub lead_viewports: u32,
    /// How far past the first rendered item `get_last` reaches.
    pub render_viewports: u32,
}

impl Default for WindowTuning {
    fn default() -> Self {
        Self {
            before_viewports: 2,
            after_viewports: 2,
            lead_viewports: 3,
            render_viewports: 3,
        }
    }
}

impl WindowTuning {
    /// Returns the `(before, after)` pixel distances for a window recompute.
    pub fn distances(&self, viewport: u32, direction: Option<ScrollDirection>) -> (u64, u64) {
        let (before, after) = match direction {
            Some(ScrollDirection::Forward) => (self.before_viewports, self.lead_viewports),
            Some(ScrollDirection::Backward) => (self.lead_viewports, self.after_viewports),
            None => (self.before_viewports, self.after_viewports),
        };
        let viewport = viewport as u64;
        (
            viewport.saturating_mul(before as u64),
            viewport.saturating_mul(after as u64),
        )
    }

    pub fn render_distance(&self, viewport: u32) -> u64 {
        (viewport as u64).saturating_mul(self.render_viewports as u64)
    }
}

/// Configuration for [`crate::PositionCache`].
///
/// Cheap to clone: the items and closures live behind `Arc`s, so adapters can tweak a field and
/// rebuild the cache without reallocating.
pub struct PositionCacheOptions<T> {
    pub items: Arc<[T]>,
    pub item_size: ItemSizeFn<T>,
    /// Size of the visible area along the scroll axis.
    pub viewport_size: u32,
    /// Scroll offset the cache starts from.
    pub initial_offset: u64,
    pub on_change: Option<OnChangeCallback>,
    pub tuning: WindowTuning,
}

impl<T> Clone for PositionCacheOptions<T> {
    fn clone(&self) -> Self {
        Self {
            items: Arc::clone(&self.items),
            item_size: Arc::clone(&self.item_size),
            viewport_size: self.viewport_size,
            initial_offset: self.initial_offset,
            on_change: self.on_change.clone(),
            tuning: self.tuning,
        }
    }
}

impl<T> PositionCacheOptions<T> {
    /// Creates options for a list.
    ///
    /// `item_size(item, index, 0)` should return the real size of the item along the scroll
    /// axis. It is only called for items inside a recompute window.
    pub fn new(
        items: impl Into<Arc<[T]>>,
        item_size: impl Fn(&T, usize, usize) -> u32 + Send + Sync + 'static,
        viewport_size: u32,
    ) -> Self {
        Self {
            items: items.into(),
            item_size: Arc::new(item_size),
            viewport_size,
            initial_offset: 0,
            on_change: None,
            tuning: WindowTuning::default(),
        }
    }

    pub fn with_items(mut self, items: impl Into<Arc<[T]>>) -> Self {
        self.items = items.into();
        self
    }

    pub fn with_item_size(
        mut self,
        item_size: impl Fn(&T, usize, usize) -> u32 + Send + Sync + 'static,
    ) -> Self {
        self.item_size = Arc::new(item_size);
        self
    }

    pub fn with_viewport_size(mut self, viewport_size: u32) -> Self {
        self.viewport_size = viewport_size;
        self
    }

    pub fn with_initial_offset(mut self, initial_offset: u64) -> Self {
        self.initial_offset = initial_offset;
        self
    }

    pub fn with_on_change(
        mut self,
        on_change: Option<impl Fn(PositionChanges) + Send + Sync + 'static>,
    ) -> Self {
        self.on_change = on_change.map(|f| Arc::new(f) as _);
        self
    }

    pub fn with_tuning(mut self, tuning: WindowTuning) -> Self {
        self.tuning = tuning;
        self
    }

    /// Whether switching to `next` invalidates a cache built from `self`.
    ///
    /// Items and the size function are compared by identity (`Arc::ptr_eq`).
    pub fn requires_rebuild(&self, next: &Self) -> bool {
        !Arc::ptr_eq(&self.items, &next.items)
            || !Arc::ptr_eq(&self.item_size, &next.item_size)
            || self.viewport_size != next.viewport_size
            || self.tuning != next.tuning
    }
}

impl<T> core::fmt::Debug for PositionCacheOptions<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PositionCacheOptions")
            .field("count", &self.items.len())
            .field("viewport_size", &self.viewport_size)
            .field("initial_offset", &self.initial_offset)
            .field("tuning", &self.tuning)
            .finish_non_exhaustive()
    }
}

/// Configuration for [`crate::GridPositionCache`].
///
/// `items` holds rows of cells; rows may have different lengths.
pub struct GridPositionCacheOptions<T> {
    pub items: Arc<[Vec<T>]>,
    pub item_size: CellSizeFn<T>,
    pub viewport: Rect,
    pub initial_offset: GridOffset,
    pub on_change: Option<OnGridChangeCallback>,
    pub tuning: WindowTuning,
}

impl<T> Clone for GridPositionCacheOptions<T> {
    fn clone(&self) -> Self {
        Self {
            items: Arc::clone(&self.items),
            item_size: Arc::clone(&self.item_size),
            viewport: self.viewport,
            initial_offset: self.initial_offset,
            on_change: self.on_change.clone(),
            tuning: self.tuning,
        }
    }
}

impl<T> GridPositionCacheOptions<T> {
    pub fn new(
        items: impl Into<Arc<[Vec<T>]>>,
        item_size: impl Fn(&T, usize, usize) -> CellSize + Send + Sync + 'static,
        viewport: Rect,
    ) -> Self {
        Self {
            items: items.into(),
            item_size: Arc::new(item_size),
            viewport,
            initial_offset: GridOffset::default(),
            on_change: None,
            tuning: WindowTuning::default(),
        }
    }

    pub fn with_items(mut self, items: impl Into<Arc<[Vec<T>]>>) -> Self {
        self.items = items.into();
        self
    }

    pub fn with_item_size(
        mut self,
        item_size: impl Fn(&T, usize, usize) -> CellSize + Send + Sync + 'static,
    ) -> Self {
        self.item_size = Arc::new(item_size);
        self
    }

    pub fn with_viewport(mut self, viewport: Rect) -> Self {
        self.viewport = viewport;
        self
    }

    pub fn with_initial_offset(mut self, initial_offset: GridOffset) -> Self {
        self.initial_offset = initial_offset;
        self
    }

    pub fn with_on_change(
        mut self,
        on_change: Option<impl Fn(GridPositionChanges) + Send + Sync + 'static>,
    ) -> Self {
        self.on_change = on_change.map(|f| Arc::new(f) as _);
        self
    }

    pub fn with_tuning(mut self, tuning: WindowTuning) -> Self {
        self.tuning = tuning;
        self
    }

    /// Whether switching to `next` invalidates a cache built from `self`.
    pub fn requires_rebuild(&self, next: &Self) -> bool {
        !Arc::ptr_eq(&self.items, &next.items)
            || !Arc::ptr_eq(&self.item_size, &next.item_size)
            || self.viewport != next.viewport
            || self.tuning != next.tuning
    }
}

impl<T> core::fmt::Debug for GridPositionCacheOptions<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("GridPositionCacheOptions")
            .field("rows", &self.items.len())
            .field("viewport", &self.viewport)
            .field("initial_offset", &self.initial_offset)
            .field("tuning", &self.tuning)
            .finish_non_exhaustive()
    }
}
