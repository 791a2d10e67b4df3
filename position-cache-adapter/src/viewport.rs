use alloc::sync::Arc;
use alloc::vec::Vec;

use position_cache::{
    CellSize, GridIndex, GridOffset, GridPositionCacheOptions, GridPositionChanges, GridSize,
    PositionCacheOptions, Rect,
};

use crate::{Layout, LayoutOptions};

/// Inclusive range of rendered indices along one axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IndexRange {
    pub first: usize,
    pub last: usize,
}

impl IndexRange {
    pub fn len(&self) -> usize {
        self.last.saturating_sub(self.first) + 1
    }

    pub fn contains(&self, index: usize) -> bool {
        (self.first..=self.last).contains(&index)
    }
}

/// Rendered rows and columns of a grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridRange {
    pub rows: IndexRange,
    pub cols: IndexRange,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RenderRange {
    List(IndexRange),
    Grid(GridRange),
}

/// The rendered items together with the items actually inside the viewport.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RenderedRange {
    pub render: RenderRange,
    pub viewport: RenderRange,
}

/// Which viewport edge [`ViewportCoordinator::scroll_in_view`] steps toward.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScrollTo {
    Start,
    End,
}

/// Outcome of a scroll event or a rebuild.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ViewportUpdate {
    /// Corrected scroll offset, set only when the coordinator moved the scroll position.
    ///
    /// The adapter must write it back to its scroll container.
    pub scroll_offset: Option<GridOffset>,
    /// Size of the spacer that gives the scroll container its full extent.
    pub spacer: GridSize,
    pub range_changed: bool,
}

/// A framework-neutral coordinator between a scroll container and a position cache.
///
/// It owns one cache (list or grid, chosen at construction) and the scroll state around it:
/// - folds every change report into the spacer size and, for jumps, into the scroll offset,
///   so the item at the top of the viewport stays where the user saw it
/// - tracks the rendered range with hysteresis: small scrolls keep the same range
///
/// This type does not hold any UI objects. Adapters drive it by calling [`Self::on_scroll`]
/// when the UI reports a scroll offset change, then render [`Self::render_range`] translated
/// by [`Self::content_offset`] inside a spacer of [`Self::spacer_size`].
///
/// Lists use the `main` component of every offset, size and index; `cross` is always 0.
#[derive(Clone, Debug)]
pub struct ViewportCoordinator<T> {
    layout: Layout<T>,
    scroll: GridOffset,
    spacer: GridSize,
    range: RenderRange,
}

impl<T> ViewportCoordinator<T> {
    pub fn new(options: impl Into<LayoutOptions<T>>) -> Self {
        let layout = Layout::new(options.into());
        let scroll = layout.initial_offset();
        let mut coordinator = Self {
            spacer: layout.total_size(),
            range: layout.render_range(scroll, None),
            layout,
            scroll,
        };
        coordinator.settle(scroll, None);
        coordinator
    }

    pub fn list(options: PositionCacheOptions<T>) -> Self {
        Self::new(options)
    }

    pub fn grid(options: GridPositionCacheOptions<T>) -> Self {
        Self::new(options)
    }

    pub fn layout(&self) -> &Layout<T> {
        &self.layout
    }

    pub fn options(&self) -> LayoutOptions<T> {
        self.layout.options()
    }

    pub fn is_empty(&self) -> bool {
        self.layout.is_empty()
    }

    pub fn scroll_offset(&self) -> GridOffset {
        self.scroll
    }

    pub fn spacer_size(&self) -> GridSize {
        self.spacer
    }

    /// Items to render. Meaningless while the layout is empty.
    pub fn render_range(&self) -> RenderRange {
        self.range
    }

    /// Where the rendered block starts: the position of its first item.
    pub fn content_offset(&self) -> GridOffset {
        self.layout.offset_of(self.range)
    }

    /// The render range plus the first and last items under the viewport.
    pub fn rendered_range(&self) -> RenderedRange {
        RenderedRange {
            render: self.range,
            viewport: self.layout.viewport_range(),
        }
    }

    /// Call this when the UI reports a scroll offset change (e.g. user wheel/drag).
    pub fn on_scroll(&mut self, offset: impl Into<GridOffset>) -> ViewportUpdate {
        let offset = self.layout.normalize_offset(offset.into());
        let previous = self.range;
        self.settle(offset, Some(previous))
    }

    /// Scrolls so `index` starts at the top of the viewport, or as close as the content allows.
    ///
    /// The window around `index` is computed through `at`, so `on_change` fires for it.
    pub fn scroll_to_index(&mut self, index: impl Into<GridIndex>) -> ViewportUpdate {
        let index = index.into();
        let before = self.scroll;
        let previous = self.range;
        let (target, changes) = self.layout.prepare_index(index);
        // The scroll position is about to be replaced, so only the extent change matters.
        self.grow_spacer(changes);
        let target = self.layout.clamp_offset(target);
        adebug!(
            main = index.main,
            cross = index.cross,
            target_main = target.main,
            target_cross = target.cross,
            "scroll_to_index"
        );
        self.on_scroll(target);
        ViewportUpdate {
            scroll_offset: (self.scroll != before).then_some(self.scroll),
            spacer: self.spacer,
            range_changed: self.range != previous,
        }
    }

    /// Steps the viewport by one item when `index` reaches its `to` edge.
    ///
    /// Meant for keyboard navigation: with [`ScrollTo::Start`], an index above the first
    /// visible item scrolls the viewport back by one item; with [`ScrollTo::End`], an index on
    /// or past the last visible item moves it forward by one. Grids check rows before columns.
    /// Does nothing while `index` is comfortably inside the viewport.
    pub fn scroll_in_view(&mut self, index: impl Into<GridIndex>, to: ScrollTo) -> ViewportUpdate {
        let index = index.into();
        if self.is_empty() {
            return self.unchanged();
        }
        let target = match self.layout.viewport_range() {
            RenderRange::List(visible) => step_toward(index.main, visible, to).map(GridIndex::from),
            RenderRange::Grid(visible) => {
                match (
                    step_toward(index.main, visible.rows, to),
                    step_toward(index.cross, visible.cols, to),
                ) {
                    (Some(row), _) => Some(GridIndex::new(row, visible.cols.first)),
                    (None, Some(col)) => Some(GridIndex::new(visible.rows.first, col)),
                    (None, None) => None,
                }
            }
        };
        match target {
            Some(target) => self.scroll_to_index(target),
            None => self.unchanged(),
        }
    }

    /// Rebuilds the cache for a new viewport extent. Lists only use `viewport.main`.
    pub fn set_viewport_size(&mut self, viewport: impl Into<Rect>) -> ViewportUpdate {
        let viewport = viewport.into();
        let next = match self.options() {
            LayoutOptions::List(o) => LayoutOptions::List(o.with_viewport_size(viewport.main)),
            LayoutOptions::Grid(o) => LayoutOptions::Grid(o.with_viewport(viewport)),
        };
        self.update_options(next)
    }

    /// Replaces the items of a list layout. Returns `None` for grids.
    pub fn set_items(&mut self, items: impl Into<Arc<[T]>>) -> Option<ViewportUpdate> {
        match self.options() {
            LayoutOptions::List(o) => Some(self.rebuild(o.with_items(items).into())),
            LayoutOptions::Grid(_) => {
                awarn!("set_items: layout is a grid, use set_rows");
                None
            }
        }
    }

    /// Replaces the rows of a grid layout. Returns `None` for lists.
    pub fn set_rows(&mut self, rows: impl Into<Arc<[Vec<T>]>>) -> Option<ViewportUpdate> {
        match self.options() {
            LayoutOptions::Grid(o) => Some(self.rebuild(o.with_items(rows).into())),
            LayoutOptions::List(_) => {
                awarn!("set_rows: layout is a list, use set_items");
                None
            }
        }
    }

    /// Replaces the size function of a list layout. Returns `None` for grids.
    pub fn set_item_size(
        &mut self,
        item_size: impl Fn(&T, usize, usize) -> u32 + Send + Sync + 'static,
    ) -> Option<ViewportUpdate> {
        match self.options() {
            LayoutOptions::List(o) => Some(self.rebuild(o.with_item_size(item_size).into())),
            LayoutOptions::Grid(_) => {
                awarn!("set_item_size: layout is a grid, use set_cell_size");
                None
            }
        }
    }

    /// Replaces the size function of a grid layout. Returns `None` for lists.
    pub fn set_cell_size(
        &mut self,
        cell_size: impl Fn(&T, usize, usize) -> CellSize + Send + Sync + 'static,
    ) -> Option<ViewportUpdate> {
        match self.options() {
            LayoutOptions::Grid(o) => Some(self.rebuild(o.with_item_size(cell_size).into())),
            LayoutOptions::List(_) => {
                awarn!("set_cell_size: layout is a list, use set_item_size");
                None
            }
        }
    }

    /// Applies new options, rebuilding the cache only when the layout depends on what changed.
    ///
    /// A change of `on_change` alone keeps every measured window.
    pub fn update_options(&mut self, options: impl Into<LayoutOptions<T>>) -> ViewportUpdate {
        let next = options.into();
        if self.options().requires_rebuild(&next) {
            return self.rebuild(next);
        }
        self.layout.set_on_change(&next);
        self.unchanged()
    }

    fn unchanged(&self) -> ViewportUpdate {
        ViewportUpdate {
            scroll_offset: None,
            spacer: self.spacer,
            range_changed: false,
        }
    }

    /// New cache, same scroll offset (clamped to the new content).
    fn rebuild(&mut self, options: LayoutOptions<T>) -> ViewportUpdate {
        let before = self.scroll;
        let previous = self.range;
        self.layout = Layout::new(options.with_initial_offset(before));
        self.spacer = self.layout.total_size();
        self.settle(before, None);

        let clamped = self.layout.clamp_offset(self.scroll);
        if clamped != self.scroll {
            self.scroll = clamped;
            self.layout.shift_scroll_offset(clamped);
            self.range = self.layout.render_range(clamped, None);
        }
        adebug!(
            scroll_main = self.scroll.main,
            scroll_cross = self.scroll.cross,
            spacer_main = self.spacer.main,
            spacer_cross = self.spacer.cross,
            "rebuild"
        );
        ViewportUpdate {
            scroll_offset: (self.scroll != before).then_some(self.scroll),
            spacer: self.spacer,
            range_changed: self.range != previous,
        }
    }

    /// Pushes `offset` into the cache, recomputes the window under it and re-ranges.
    ///
    /// `previous: None` picks the range from scratch.
    fn settle(&mut self, offset: GridOffset, previous: Option<RenderRange>) -> ViewportUpdate {
        self.scroll = offset;
        self.layout.set_scroll_offset(offset);
        let changes = self.layout.update_by_scroll_position(offset);
        let jumped = self.apply(changes);

        let range = self.layout.render_range(self.scroll, previous);
        let range_changed = previous != Some(range);
        self.range = range;

        atrace!(
            scroll_main = self.scroll.main,
            scroll_cross = self.scroll.cross,
            jumped,
            range_changed,
            "settle"
        );
        ViewportUpdate {
            scroll_offset: jumped.then_some(self.scroll),
            spacer: self.spacer,
            range_changed,
        }
    }

    /// Resizes the spacer, then moves the scroll offset by the jump. Returns whether it moved.
    fn apply(&mut self, changes: GridPositionChanges) -> bool {
        self.grow_spacer(changes);
        let before = self.scroll;
        self.scroll.main = self.scroll.main.saturating_add_signed(changes.main.jump);
        self.scroll.cross = self.scroll.cross.saturating_add_signed(changes.cross.jump);
        if self.scroll == before {
            return false;
        }
        // The content moved under the viewport; the user's scroll direction stands.
        self.layout.shift_scroll_offset(self.scroll);
        true
    }

    fn grow_spacer(&mut self, changes: GridPositionChanges) {
        self.spacer.main = self
            .spacer
            .main
            .saturating_add_signed(changes.main.total_size_diff);
        self.spacer.cross = self
            .spacer
            .cross
            .saturating_add_signed(changes.cross.total_size_diff);
        debug_assert_eq!(self.spacer, self.layout.total_size());
    }
}

/// The item to bring to the viewport start along one axis, if `index` sits on the `to` edge.
fn step_toward(index: usize, visible: IndexRange, to: ScrollTo) -> Option<usize> {
    match to {
        ScrollTo::Start if index < visible.first => Some(visible.first - 1),
        ScrollTo::End if index.saturating_add(1) >= visible.last => Some(visible.first + 1),
        _ => None,
    }
}
