//! Incrementally computed item offsets for virtual scrolling.
//!
//! For viewport coordination (render ranges, jump compensation, spacer sizing), see the
//! `position-cache-adapter` crate.
//!
//! Virtual scrolling only renders the visible slice of a large collection. The hard part is
//! knowing where each item starts when item sizes are unknown until measured, expensive to
//! measure for the whole collection, and free to change. This crate keeps an offset table
//! (`{size, position}` per item) where:
//!
//! - unmeasured items hold a placeholder size ([`DEFAULT_ITEM_SIZE`]),
//! - a bounded window around any index of interest is measured on demand through a
//!   caller-supplied size function,
//! - the measured window is spliced into the table and everything after it re-chained,
//! - every recompute reports the `jump` of the item at the top of the viewport and the change
//!   in total size, so the caller can keep the view visually stable.
//!
//! [`PositionCache`] covers lists, [`GridPositionCache`] covers grids (rows × columns).
//!
//! It is UI-agnostic. A TUI/GUI layer is expected to provide:
//! - the items and a size function
//! - viewport size
//! - scroll offset
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod cache;
mod grid;
mod grid_cache;
mod key;
mod offsets;
mod options;
mod state;
mod types;


pub use cache::PositionCache;
pub use grid::{
    GridPositions, calculate_grid_positions, default_grid_positions, merge_grid_positions,
};
pub use grid_cache::GridPositionCache;
pub use offsets::{
    calculate_positions, default_positions, locate, merge_positions, normalize_index,
    total_size,
};
pub use options::{
    CellSizeFn, GridPositionCacheOptions, ItemSizeFn, OnChangeCallback, OnGridChangeCallback,
    PositionCacheOptions, WindowTuning,
};
pub use state::{GridScrollState, ScrollState};
pub use types::{
    CellSize, DEFAULT_CROSS_SIZE, DEFAULT_ITEM_SIZE, GridIndex, GridItemPosition, GridOffset,
    GridPositionChanges, GridSize, GridViewportNumbers, ItemPosition, PositionChanges, Rect,
    ScrollDirection, ViewportNumbers,
};
