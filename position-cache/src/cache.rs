use alloc::sync::Arc;
use alloc::vec::Vec;

use crate::key::PivotSet;
use crate::offsets::{
    calculate_positions, default_positions, first_within_tolerance, last_within, locate,
    measure_window, merge_positions_in_place, normalize_index, signed_diff, total_size,
    viewport_numbers,
};
use crate::{
    DEFAULT_ITEM_SIZE, ItemPosition, PositionCacheOptions, PositionChanges, ScrollDirection,
    ScrollState, ViewportNumbers,
};

/// Offset table for a list whose item sizes are only known once measured.
///
/// A fresh cache treats every item as [`DEFAULT_ITEM_SIZE`]. Each recompute measures a bounded
/// window around a pivot index (see [`crate::WindowTuning`]) and splices it into the table,
/// so measurement cost stays proportional to the viewport, not the collection.
///
/// The cache is meant to be short-lived: when the items, the size function, or the viewport
/// size change, build a new one. The scroll offset is owned by the caller and pushed in with
/// [`Self::set_scroll_offset`]; the cache only reads it.
#[derive(Clone, Debug)]
pub struct PositionCache<T> {
    options: PositionCacheOptions<T>,
    positions: Vec<ItemPosition>,
    computed: PivotSet<usize>,
    scroll: ScrollState,
}

impl<T> PositionCache<T> {
    pub fn new(options: PositionCacheOptions<T>) -> Self {
        pdebug!(
            count = options.items.len(),
            viewport_size = options.viewport_size,
            initial_offset = options.initial_offset,
            "PositionCache::new"
        );
        Self {
            positions: default_positions(options.items.len(), DEFAULT_ITEM_SIZE),
            computed: PivotSet::new(),
            scroll: ScrollState::new(options.initial_offset),
            options,
        }
    }

    pub fn options(&self) -> &PositionCacheOptions<T> {
        &self.options
    }

    pub fn positions(&self) -> &[ItemPosition] {
        &self.positions
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn viewport_size(&self) -> u32 {
        self.options.viewport_size
    }

    pub fn scroll_offset(&self) -> u64 {
        self.scroll.offset
    }

    pub fn scroll_state(&self) -> ScrollState {
        self.scroll
    }

    pub fn scroll_direction(&self) -> Option<ScrollDirection> {
        self.scroll.direction
    }

    /// Mirrors the caller's scroll offset. Also updates the scroll direction.
    pub fn set_scroll_offset(&mut self, offset: u64) {
        self.scroll.scroll_to(offset);
    }

    /// Moves the scroll offset but keeps the scroll direction.
    ///
    /// Meant for jump compensation: the offset moves because the content moved, not because
    /// the user scrolled.
    pub fn shift_scroll_offset(&mut self, offset: u64) {
        self.scroll.shift_to(offset);
    }

    pub fn set_on_change(
        &mut self,
        on_change: Option<impl Fn(PositionChanges) + Send + Sync + 'static>,
    ) {
        self.options.on_change = on_change.map(|f| Arc::new(f) as _);
    }

    /// Whether `index` already served as a pivot for [`Self::update_by_index_with_changes`].
    pub fn is_computed(&self, index: usize) -> bool {
        self.computed.contains(&index)
    }

    pub fn computed_len(&self) -> usize {
        self.computed.len()
    }

    /// Recomputes the window around `index` (negative values count from the end).
    ///
    /// Always does the work, even for pivots that were computed before.
    pub fn update_by_index(&mut self, index: isize) {
        if self.positions.is_empty() {
            return;
        }
        let pivot = normalize_index(index, self.positions.len());
        self.recompute(pivot);
    }

    /// Recomputes the window around `index` once per pivot and reports how the layout moved.
    ///
    /// `jump` is measured on the item that was first in the viewport before the recompute.
    /// Calling this again with a pivot that was already computed returns empty changes.
    pub fn update_by_index_with_changes(&mut self, index: isize) -> PositionChanges {
        if self.positions.is_empty() {
            return PositionChanges::default();
        }
        let pivot = normalize_index(index, self.positions.len());
        self.recompute_with_changes(pivot)
    }

    /// Recomputes around the item under `offset` and notifies `on_change`.
    pub fn update_by_scroll_position(&mut self, offset: u64) -> PositionChanges {
        if self.positions.is_empty() {
            return PositionChanges::default();
        }
        let pivot = locate(offset, &self.positions);
        let changes = self.recompute_with_changes(pivot);
        self.notify(changes);
        changes
    }

    /// Recomputes around `offset`, then returns the index under it.
    pub fn find_by_position(&mut self, offset: u64) -> usize {
        self.update_by_scroll_position(offset);
        locate(offset, &self.positions)
    }

    /// Returns the position of `index` after making sure its window is computed.
    ///
    /// Notifies `on_change` when the recompute moved anything. An empty cache yields a zeroed
    /// entry.
    pub fn at(&mut self, index: isize) -> ItemPosition {
        self.at_with_changes(index).0
    }

    /// [`Self::at`], also returning what the recompute changed.
    pub fn at_with_changes(&mut self, index: isize) -> (ItemPosition, PositionChanges) {
        if self.positions.is_empty() {
            return (ItemPosition::default(), PositionChanges::default());
        }
        let pivot = normalize_index(index, self.positions.len());
        let changes = self.recompute_with_changes(pivot);
        self.notify(changes);
        (self.positions[pivot], changes)
    }

    /// Index of the item under `offset`, without recomputing anything.
    pub fn locate(&self, offset: u64) -> usize {
        locate(offset, &self.positions)
    }

    pub fn numbers_in_viewport(&self) -> ViewportNumbers {
        viewport_numbers(&self.positions, self.scroll.offset, self.options.viewport_size)
    }

    /// Clamps a candidate first-rendered index to the current scroll position.
    ///
    /// The candidate is kept while it stays within `tolerated_count` of the item one viewport
    /// above the scroll offset.
    pub fn get_first(&self, candidate: usize) -> usize {
        first_within_tolerance(
            &self.positions,
            self.scroll.offset,
            self.options.viewport_size,
            candidate,
        )
    }

    /// Last index to render when rendering starts at `first`.
    pub fn get_last(&self, first: usize) -> usize {
        let distance = self
            .options
            .tuning
            .render_distance(self.options.viewport_size);
        last_within(&self.positions, first, distance)
    }

    /// Full scrollable extent.
    pub fn total_size(&self) -> u64 {
        total_size(&self.positions)
    }

    fn recompute_with_changes(&mut self, pivot: usize) -> PositionChanges {
        if !self.computed.insert(pivot) {
            ptrace!(pivot, "update_by_index_with_changes: pivot already computed");
            return PositionChanges::default();
        }

        let anchor = locate(self.scroll.offset, &self.positions);
        let anchor_before = self.positions[anchor].position;
        let total_before = self.total_size();

        self.recompute(pivot);

        let changes = PositionChanges {
            jump: signed_diff(self.positions[anchor].position, anchor_before),
            total_size_diff: signed_diff(self.total_size(), total_before),
        };
        pdebug!(
            pivot,
            anchor,
            jump = changes.jump,
            total_size_diff = changes.total_size_diff,
            "update_by_index_with_changes"
        );
        changes
    }

    fn recompute(&mut self, pivot: usize) {
        let (before, after) = self
            .options
            .tuning
            .distances(self.options.viewport_size, self.scroll.direction);
        let items = &self.options.items;
        let item_size = &self.options.item_size;

        let window = measure_window(items.len(), pivot, before, after, |i| {
            item_size(&items[i], i, 0)
        });
        let start = window.start;
        let fresh = calculate_positions(&items[start..window.end()], start, |_, i| {
            window.sizes[i - start]
        });
        merge_positions_in_place(&mut self.positions, &fresh, start);

        ptrace!(pivot, start, end = window.end(), before, after, "update_by_index");
    }

    fn notify(&self, changes: PositionChanges) {
        if changes.is_empty() {
            return;
        }
        if let Some(cb) = &self.options.on_change {
            cb(changes);
        }
    }
}
