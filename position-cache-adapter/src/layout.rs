use core::fmt;

use position_cache::{
    GridIndex, GridOffset, GridPositionCache, GridPositionCacheOptions, GridPositionChanges,
    GridSize, PositionCache, PositionCacheOptions, PositionChanges, Rect,
};

use crate::{GridRange, IndexRange, RenderRange};

/// Options for either layout kind.
pub enum LayoutOptions<T> {
    List(PositionCacheOptions<T>),
    Grid(GridPositionCacheOptions<T>),
}

impl<T> Clone for LayoutOptions<T> {
    fn clone(&self) -> Self {
        match self {
            Self::List(o) => Self::List(o.clone()),
            Self::Grid(o) => Self::Grid(o.clone()),
        }
    }
}

impl<T> fmt::Debug for LayoutOptions<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::List(o) => f.debug_tuple("List").field(o).finish(),
            Self::Grid(o) => f.debug_tuple("Grid").field(o).finish(),
        }
    }
}

impl<T> From<PositionCacheOptions<T>> for LayoutOptions<T> {
    fn from(options: PositionCacheOptions<T>) -> Self {
        Self::List(options)
    }
}

impl<T> From<GridPositionCacheOptions<T>> for LayoutOptions<T> {
    fn from(options: GridPositionCacheOptions<T>) -> Self {
        Self::Grid(options)
    }
}

impl<T> LayoutOptions<T> {
    /// Switching between list and grid always rebuilds.
    pub fn requires_rebuild(&self, next: &Self) -> bool {
        match (self, next) {
            (Self::List(a), Self::List(b)) => a.requires_rebuild(b),
            (Self::Grid(a), Self::Grid(b)) => a.requires_rebuild(b),
            _ => true,
        }
    }

    pub fn with_initial_offset(self, offset: GridOffset) -> Self {
        match self {
            Self::List(o) => Self::List(o.with_initial_offset(offset.main)),
            Self::Grid(o) => Self::Grid(o.with_initial_offset(offset)),
        }
    }
}

/// The cache a coordinator drives. The kind is fixed when the coordinator is built.
#[derive(Clone, Debug)]
pub enum Layout<T> {
    List(PositionCache<T>),
    Grid(GridPositionCache<T>),
}

impl<T> Layout<T> {
    pub(crate) fn new(options: LayoutOptions<T>) -> Self {
        match options {
            LayoutOptions::List(o) => Self::List(PositionCache::new(o)),
            LayoutOptions::Grid(o) => Self::Grid(GridPositionCache::new(o)),
        }
    }

    pub fn options(&self) -> LayoutOptions<T> {
        match self {
            Self::List(c) => LayoutOptions::List(c.options().clone()),
            Self::Grid(c) => LayoutOptions::Grid(c.options().clone()),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Self::List(c) => c.is_empty(),
            Self::Grid(c) => c.is_empty(),
        }
    }

    /// Viewport extent; a list has no cross extent.
    pub fn viewport(&self) -> Rect {
        match self {
            Self::List(c) => Rect::from(c.viewport_size()),
            Self::Grid(c) => c.viewport(),
        }
    }

    pub fn total_size(&self) -> GridSize {
        match self {
            Self::List(c) => GridSize {
                main: c.total_size(),
                cross: 0,
            },
            Self::Grid(c) => c.total_size(),
        }
    }

    /// Drops the cross component for lists.
    pub(crate) fn normalize_offset(&self, offset: GridOffset) -> GridOffset {
        match self {
            Self::List(_) => GridOffset::from(offset.main),
            Self::Grid(_) => offset,
        }
    }

    /// Caps `offset` so the viewport never extends past the content.
    pub(crate) fn clamp_offset(&self, offset: GridOffset) -> GridOffset {
        let total = self.total_size();
        let viewport = self.viewport();
        GridOffset {
            main: offset.main.min(total.main.saturating_sub(viewport.main as u64)),
            cross: offset.cross.min(total.cross.saturating_sub(viewport.cross as u64)),
        }
    }

    pub(crate) fn initial_offset(&self) -> GridOffset {
        match self {
            Self::List(c) => GridOffset::from(c.options().initial_offset),
            Self::Grid(c) => c.options().initial_offset,
        }
    }

    pub(crate) fn set_scroll_offset(&mut self, offset: GridOffset) {
        match self {
            Self::List(c) => c.set_scroll_offset(offset.main),
            Self::Grid(c) => c.set_scroll_offset(offset),
        }
    }

    /// Moves the cache's scroll offset without changing its scroll direction.
    pub(crate) fn shift_scroll_offset(&mut self, offset: GridOffset) {
        match self {
            Self::List(c) => c.shift_scroll_offset(offset.main),
            Self::Grid(c) => c.shift_scroll_offset(offset),
        }
    }

    pub(crate) fn update_by_scroll_position(&mut self, offset: GridOffset) -> GridPositionChanges {
        match self {
            Self::List(c) => list_changes(c.update_by_scroll_position(offset.main)),
            Self::Grid(c) => c.update_by_scroll_position(offset),
        }
    }

    /// Positions `index` through `at`, so `on_change` hears about it, and returns where it
    /// starts.
    pub(crate) fn prepare_index(&mut self, index: GridIndex) -> (GridOffset, GridPositionChanges) {
        match self {
            Self::List(c) => {
                let pivot = isize::try_from(index.main).unwrap_or(isize::MAX);
                let (position, changes) = c.at_with_changes(pivot);
                (GridOffset::from(position.position), list_changes(changes))
            }
            Self::Grid(c) => {
                let (position, changes) = c.at_with_changes(index);
                let start = GridOffset {
                    main: position.main.position,
                    cross: position.cross.position,
                };
                (start, changes)
            }
        }
    }

    /// First and last items actually inside the viewport.
    pub(crate) fn viewport_range(&self) -> RenderRange {
        match self {
            Self::List(c) => {
                let numbers = c.numbers_in_viewport();
                RenderRange::List(IndexRange {
                    first: numbers.first,
                    last: numbers.last,
                })
            }
            Self::Grid(c) => {
                let numbers = c.numbers_in_viewport();
                RenderRange::Grid(GridRange {
                    rows: IndexRange {
                        first: numbers.rows.first,
                        last: numbers.rows.last,
                    },
                    cols: IndexRange {
                        first: numbers.cols.first,
                        last: numbers.cols.last,
                    },
                })
            }
        }
    }

    /// Copies the change callback of `options` into the live cache.
    pub(crate) fn set_on_change(&mut self, options: &LayoutOptions<T>) {
        match (self, options) {
            (Self::List(c), LayoutOptions::List(o)) => {
                c.set_on_change(o.on_change.clone().map(|cb| move |ch: PositionChanges| cb(ch)));
            }
            (Self::Grid(c), LayoutOptions::Grid(o)) => {
                c.set_on_change(
                    o.on_change
                        .clone()
                        .map(|cb| move |ch: GridPositionChanges| cb(ch)),
                );
            }
            _ => {}
        }
    }

    /// Next render range, keeping `previous` while it is within tolerance.
    pub(crate) fn render_range(
        &self,
        scroll: GridOffset,
        previous: Option<RenderRange>,
    ) -> RenderRange {
        match self {
            Self::List(c) => {
                let candidate = match previous {
                    Some(RenderRange::List(r)) => r.first,
                    _ => c.locate(scroll.main.saturating_sub(c.viewport_size() as u64)),
                };
                let first = c.get_first(candidate);
                RenderRange::List(IndexRange {
                    first,
                    last: c.get_last(first),
                })
            }
            Self::Grid(c) => {
                let candidate = match previous {
                    Some(RenderRange::Grid(r)) => GridIndex::new(r.rows.first, r.cols.first),
                    _ => {
                        let viewport = c.viewport();
                        c.locate(GridOffset {
                            main: scroll.main.saturating_sub(viewport.main as u64),
                            cross: scroll.cross.saturating_sub(viewport.cross as u64),
                        })
                    }
                };
                let first = c.get_first(candidate);
                let last = c.get_last(first);
                RenderRange::Grid(GridRange {
                    rows: IndexRange {
                        first: first.main,
                        last: last.main,
                    },
                    cols: IndexRange {
                        first: first.cross,
                        last: last.cross,
                    },
                })
            }
        }
    }

    /// Start of the first rendered item (or cell) of `range`.
    pub(crate) fn offset_of(&self, range: RenderRange) -> GridOffset {
        match (self, range) {
            (Self::List(c), RenderRange::List(r)) => {
                GridOffset::from(c.positions().get(r.first).map_or(0, |p| p.position))
            }
            (Self::Grid(c), RenderRange::Grid(r)) => {
                let positions = c.positions();
                GridOffset {
                    main: positions.main_axis.get(r.rows.first).map_or(0, |p| p.position),
                    cross: positions.cross_axis.get(r.cols.first).map_or(0, |p| p.position),
                }
            }
            _ => GridOffset::default(),
        }
    }
}

fn list_changes(main: PositionChanges) -> GridPositionChanges {
    GridPositionChanges {
        main,
        cross: PositionChanges::default(),
    }
}
