/// Placeholder size for items that were never measured (list axis and grid main axis).
pub const DEFAULT_ITEM_SIZE: u32 = 40;

/// Placeholder size for grid columns that were never measured.
pub const DEFAULT_CROSS_SIZE: u32 = 40;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScrollDirection {
    Forward,
    Backward,
}

/// Size and start offset of one item along an axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemPosition {
    pub size: u32,
    pub position: u64,
}

impl ItemPosition {
    pub const fn new(size: u32, position: u64) -> Self {
        Self { size, position }
    }

    pub fn end(&self) -> u64 {
        self.position.saturating_add(self.size as u64)
    }
}

/// Viewport geometry where `main` is the scroll axis and `cross` the perpendicular one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    pub main: u32,
    pub cross: u32,
}

/// A list viewport: only the scroll axis has an extent.
impl From<u32> for Rect {
    fn from(main: u32) -> Self {
        Self { main, cross: 0 }
    }
}

/// Size of a single grid cell as reported by the caller's size function.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellSize {
    pub main: u32,
    pub cross: u32,
}

/// A `(row, column)` pair. `main` indexes rows, `cross` indexes columns.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridIndex {
    pub main: usize,
    pub cross: usize,
}

impl GridIndex {
    pub const fn new(main: usize, cross: usize) -> Self {
        Self { main, cross }
    }
}

/// A list index addresses the main axis.
impl From<usize> for GridIndex {
    fn from(main: usize) -> Self {
        Self { main, cross: 0 }
    }
}

/// Scroll offsets along both grid axes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridOffset {
    pub main: u64,
    pub cross: u64,
}

impl From<u64> for GridOffset {
    fn from(main: u64) -> Self {
        Self { main, cross: 0 }
    }
}

/// Full scrollable extent of a grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridSize {
    pub main: u64,
    pub cross: u64,
}

/// Row and column entries of a single cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridItemPosition {
    pub main: ItemPosition,
    pub cross: ItemPosition,
}

/// What a window recompute did to the layout.
///
/// - `jump`: how far the item that was first in the viewport moved.
/// - `total_size_diff`: how much the scrollable extent grew (or shrank).
///
/// Consumers resize their spacer by `total_size_diff` first, then add `jump` to the scroll
/// offset so the content under the viewport stays put.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PositionChanges {
    pub jump: i64,
    pub total_size_diff: i64,
}

impl PositionChanges {
    pub fn is_empty(&self) -> bool {
        self.jump == 0 && self.total_size_diff == 0
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridPositionChanges {
    pub main: PositionChanges,
    pub cross: PositionChanges,
}

impl GridPositionChanges {
    pub fn is_empty(&self) -> bool {
        self.main.is_empty() && self.cross.is_empty()
    }
}

/// Items bracketing the viewport.
///
/// `tolerated_count` is half the visible count (rounded up); adapters only re-range the
/// rendered block once the first index drifts further than that.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ViewportNumbers {
    pub first: usize,
    pub last: usize,
    pub count: usize,
    pub tolerated_count: usize,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridViewportNumbers {
    pub rows: ViewportNumbers,
    pub cols: ViewportNumbers,
}
