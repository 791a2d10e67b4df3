use alloc::vec;
use alloc::vec::Vec;
use core::ops::Range;

use crate::offsets::{calculate_positions, default_positions, merge_positions_in_place};
use crate::{CellSize, DEFAULT_CROSS_SIZE, DEFAULT_ITEM_SIZE, GridIndex, ItemPosition};

/// Offset tables of a grid: one entry per row (`main_axis`) and per column (`cross_axis`).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridPositions {
    pub main_axis: Vec<ItemPosition>,
    pub cross_axis: Vec<ItemPosition>,
}

/// Placeholder tables for `rows`. The column count is the length of the longest row.
pub fn default_grid_positions<T>(rows: &[Vec<T>]) -> GridPositions {
    let cols = rows.iter().map(Vec::len).max().unwrap_or(0);
    GridPositions {
        main_axis: default_positions(rows.len(), DEFAULT_ITEM_SIZE),
        cross_axis: default_positions(cols, DEFAULT_CROSS_SIZE),
    }
}

/// Measures every existing cell in `row_range × col_range`.
///
/// A row is as tall as its tallest cell in the window and a column as wide as its widest
/// cell in the window. Missing cells of ragged rows are skipped; a row or column without any
/// cell in the window keeps its default size. Both returned axes are chained from 0.
pub fn calculate_grid_positions<T>(
    rows: &[Vec<T>],
    row_range: Range<usize>,
    col_range: Range<usize>,
    mut size_of: impl FnMut(&T, usize, usize) -> CellSize,
) -> GridPositions {
    let mut row_sizes = Vec::with_capacity(row_range.len());
    let mut col_sizes: Vec<Option<u32>> = vec![None; col_range.len()];

    for r in row_range {
        let mut row_size: Option<u32> = None;
        if let Some(row) = rows.get(r) {
            let end = col_range.end.min(row.len());
            for c in col_range.start..end {
                let size = size_of(&row[c], r, c);
                row_size = Some(row_size.map_or(size.main, |m| m.max(size.main)));
                let col = &mut col_sizes[c - col_range.start];
                *col = Some(col.map_or(size.cross, |m| m.max(size.cross)));
            }
        }
        row_sizes.push(row_size.unwrap_or(DEFAULT_ITEM_SIZE));
    }

    let col_sizes: Vec<u32> = col_sizes
        .into_iter()
        .map(|s| s.unwrap_or(DEFAULT_CROSS_SIZE))
        .collect();

    GridPositions {
        main_axis: calculate_positions(&row_sizes, 0, |&s, _| s),
        cross_axis: calculate_positions(&col_sizes, 0, |&s, _| s),
    }
}

/// Merges `fresh` into a copy of `grid`, each axis on its own.
///
/// `at.main` is where the fresh rows start, `at.cross` where the fresh columns start.
pub fn merge_grid_positions(
    grid: &GridPositions,
    fresh: &GridPositions,
    at: GridIndex,
) -> GridPositions {
    let mut out = grid.clone();
    merge_grid_positions_in_place(&mut out, fresh, at);
    out
}

pub(crate) fn merge_grid_positions_in_place(
    grid: &mut GridPositions,
    fresh: &GridPositions,
    at: GridIndex,
) {
    merge_positions_in_place(&mut grid.main_axis, &fresh.main_axis, at.main);
    merge_positions_in_place(&mut grid.cross_axis, &fresh.cross_axis, at.cross);
}
