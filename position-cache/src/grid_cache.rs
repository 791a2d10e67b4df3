use alloc::sync::Arc;

use crate::grid::{
    GridPositions, calculate_grid_positions, default_grid_positions,
    merge_grid_positions_in_place,
};
use crate::key::{CellMemo, PivotSet};
use crate::offsets::{
    first_within_tolerance, last_within, locate, measure_window, signed_diff, total_size,
    viewport_numbers,
};
use crate::{
    CellSize, DEFAULT_CROSS_SIZE, DEFAULT_ITEM_SIZE, GridIndex, GridItemPosition, GridOffset,
    GridPositionCacheOptions, GridPositionChanges, GridScrollState, GridSize,
    GridViewportNumbers, PositionChanges, Rect,
};

/// Two-axis counterpart of [`crate::PositionCache`].
///
/// Rows live on the main axis, columns on the cross axis. Each recompute measures a rectangle
/// of cells around the pivot; row heights and column widths are reduced from it separately and
/// merged into their own axis, so a recompute that leaves one axis' window unchanged does not
/// move that axis.
#[derive(Clone, Debug)]
pub struct GridPositionCache<T> {
    options: GridPositionCacheOptions<T>,
    positions: GridPositions,
    computed: PivotSet<GridIndex>,
    scroll: GridScrollState,
}

impl<T> GridPositionCache<T> {
    pub fn new(options: GridPositionCacheOptions<T>) -> Self {
        let positions = default_grid_positions(&options.items);
        pdebug!(
            rows = positions.main_axis.len(),
            cols = positions.cross_axis.len(),
            viewport_main = options.viewport.main,
            viewport_cross = options.viewport.cross,
            "GridPositionCache::new"
        );
        Self {
            positions,
            computed: PivotSet::new(),
            scroll: GridScrollState::new(options.initial_offset),
            options,
        }
    }

    pub fn options(&self) -> &GridPositionCacheOptions<T> {
        &self.options
    }

    pub fn positions(&self) -> &GridPositions {
        &self.positions
    }

    pub fn rows(&self) -> usize {
        self.positions.main_axis.len()
    }

    pub fn cols(&self) -> usize {
        self.positions.cross_axis.len()
    }

    /// `true` when there is no cell at all.
    pub fn is_empty(&self) -> bool {
        self.rows() == 0 || self.cols() == 0
    }

    pub fn viewport(&self) -> Rect {
        self.options.viewport
    }

    pub fn scroll_offset(&self) -> GridOffset {
        self.scroll.offset()
    }

    pub fn scroll_state(&self) -> GridScrollState {
        self.scroll
    }

    pub fn set_scroll_offset(&mut self, offset: GridOffset) {
        self.scroll.scroll_to(offset);
    }

    /// Moves the scroll offset on both axes but keeps their scroll directions.
    pub fn shift_scroll_offset(&mut self, offset: GridOffset) {
        self.scroll.shift_to(offset);
    }

    pub fn set_on_change(
        &mut self,
        on_change: Option<impl Fn(GridPositionChanges) + Send + Sync + 'static>,
    ) {
        self.options.on_change = on_change.map(|f| Arc::new(f) as _);
    }

    pub fn is_computed(&self, index: GridIndex) -> bool {
        self.computed.contains(&index)
    }

    pub fn computed_len(&self) -> usize {
        self.computed.len()
    }

    /// Recomputes the cell window around `index` (clamped to the grid).
    pub fn update_by_index(&mut self, index: GridIndex) {
        if self.is_empty() {
            return;
        }
        let pivot = self.clamp_index(index);
        self.recompute(pivot);
    }

    /// Recomputes once per pivot and reports per-axis changes.
    ///
    /// The row jump is measured on the first visible row and the column jump on the first
    /// visible column, both taken before the recompute.
    pub fn update_by_index_with_changes(&mut self, index: GridIndex) -> GridPositionChanges {
        if self.is_empty() {
            return GridPositionChanges::default();
        }
        let pivot = self.clamp_index(index);
        self.recompute_with_changes(pivot)
    }

    /// Recomputes around the cell under `offset` and notifies `on_change`.
    pub fn update_by_scroll_position(&mut self, offset: GridOffset) -> GridPositionChanges {
        if self.is_empty() {
            return GridPositionChanges::default();
        }
        let pivot = self.locate(offset);
        let changes = self.recompute_with_changes(pivot);
        self.notify(changes);
        changes
    }

    pub fn find_by_position(&mut self, offset: GridOffset) -> GridIndex {
        self.update_by_scroll_position(offset);
        self.locate(offset)
    }

    /// Returns the row and column entries of `index` after computing its window.
    pub fn at(&mut self, index: GridIndex) -> GridItemPosition {
        self.at_with_changes(index).0
    }

    /// [`Self::at`], also returning what the recompute changed.
    pub fn at_with_changes(&mut self, index: GridIndex) -> (GridItemPosition, GridPositionChanges) {
        if self.is_empty() {
            return (GridItemPosition::default(), GridPositionChanges::default());
        }
        let pivot = self.clamp_index(index);
        let changes = self.recompute_with_changes(pivot);
        self.notify(changes);
        let position = GridItemPosition {
            main: self.positions.main_axis[pivot.main],
            cross: self.positions.cross_axis[pivot.cross],
        };
        (position, changes)
    }

    /// Cell under `offset`, without recomputing anything.
    pub fn locate(&self, offset: GridOffset) -> GridIndex {
        GridIndex {
            main: locate(offset.main, &self.positions.main_axis),
            cross: locate(offset.cross, &self.positions.cross_axis),
        }
    }

    pub fn numbers_in_viewport(&self) -> GridViewportNumbers {
        GridViewportNumbers {
            rows: viewport_numbers(
                &self.positions.main_axis,
                self.scroll.main.offset,
                self.options.viewport.main,
            ),
            cols: viewport_numbers(
                &self.positions.cross_axis,
                self.scroll.cross.offset,
                self.options.viewport.cross,
            ),
        }
    }

    /// Per-axis [`crate::PositionCache::get_first`].
    pub fn get_first(&self, candidate: GridIndex) -> GridIndex {
        GridIndex {
            main: first_within_tolerance(
                &self.positions.main_axis,
                self.scroll.main.offset,
                self.options.viewport.main,
                candidate.main,
            ),
            cross: first_within_tolerance(
                &self.positions.cross_axis,
                self.scroll.cross.offset,
                self.options.viewport.cross,
                candidate.cross,
            ),
        }
    }

    /// Per-axis [`crate::PositionCache::get_last`].
    pub fn get_last(&self, first: GridIndex) -> GridIndex {
        let tuning = &self.options.tuning;
        GridIndex {
            main: last_within(
                &self.positions.main_axis,
                first.main,
                tuning.render_distance(self.options.viewport.main),
            ),
            cross: last_within(
                &self.positions.cross_axis,
                first.cross,
                tuning.render_distance(self.options.viewport.cross),
            ),
        }
    }

    pub fn total_size(&self) -> GridSize {
        GridSize {
            main: total_size(&self.positions.main_axis),
            cross: total_size(&self.positions.cross_axis),
        }
    }

    fn clamp_index(&self, index: GridIndex) -> GridIndex {
        GridIndex {
            main: index.main.min(self.rows().saturating_sub(1)),
            cross: index.cross.min(self.cols().saturating_sub(1)),
        }
    }

    fn recompute_with_changes(&mut self, pivot: GridIndex) -> GridPositionChanges {
        if !self.computed.insert(pivot) {
            ptrace!(
                main = pivot.main,
                cross = pivot.cross,
                "grid update_by_index_with_changes: pivot already computed"
            );
            return GridPositionChanges::default();
        }

        let anchor = self.locate(self.scroll.offset());
        let row_before = self.positions.main_axis[anchor.main].position;
        let col_before = self.positions.cross_axis[anchor.cross].position;
        let total_before = self.total_size();

        self.recompute(pivot);

        let total_after = self.total_size();
        let changes = GridPositionChanges {
            main: PositionChanges {
                jump: signed_diff(self.positions.main_axis[anchor.main].position, row_before),
                total_size_diff: signed_diff(total_after.main, total_before.main),
            },
            cross: PositionChanges {
                jump: signed_diff(self.positions.cross_axis[anchor.cross].position, col_before),
                total_size_diff: signed_diff(total_after.cross, total_before.cross),
            },
        };
        pdebug!(
            main = pivot.main,
            cross = pivot.cross,
            main_jump = changes.main.jump,
            cross_jump = changes.cross.jump,
            "grid update_by_index_with_changes"
        );
        changes
    }

    fn recompute(&mut self, pivot: GridIndex) {
        let tuning = self.options.tuning;
        let viewport = self.options.viewport;
        let rows = &self.options.items;
        let item_size = &self.options.item_size;
        let mut memo: CellMemo<GridIndex, CellSize> = CellMemo::new();

        // Row heights are sampled along the pivot column, column widths along the pivot row.
        let (before, after) = tuning.distances(viewport.main, self.scroll.main.direction);
        let row_window = measure_window(rows.len(), pivot.main, before, after, |r| {
            let row = &rows[r];
            match row.len() {
                0 => DEFAULT_ITEM_SIZE,
                n => {
                    let c = pivot.cross.min(n - 1);
                    let size = item_size(&row[c], r, c);
                    memo.insert(GridIndex::new(r, c), size);
                    size.main
                }
            }
        });
        let (before, after) = tuning.distances(viewport.cross, self.scroll.cross.direction);
        let pivot_row = &rows[pivot.main];
        let cols = self.positions.cross_axis.len();
        let col_window = measure_window(cols, pivot.cross, before, after, |c| {
            let Some(item) = pivot_row.get(c) else {
                return DEFAULT_CROSS_SIZE;
            };
            let size = *memo
                .entry(GridIndex::new(pivot.main, c))
                .or_insert_with(|| item_size(item, pivot.main, c));
            size.cross
        });

        let fresh = calculate_grid_positions(
            rows,
            row_window.start..row_window.end(),
            col_window.start..col_window.end(),
            |item, r, c| {
                *memo
                    .entry(GridIndex::new(r, c))
                    .or_insert_with(|| item_size(item, r, c))
            },
        );
        merge_grid_positions_in_place(
            &mut self.positions,
            &fresh,
            GridIndex::new(row_window.start, col_window.start),
        );

        ptrace!(
            main = pivot.main,
            cross = pivot.cross,
            rows_start = row_window.start,
            rows_end = row_window.end(),
            cols_start = col_window.start,
            cols_end = col_window.end(),
            "grid update_by_index"
        );
    }

    fn notify(&self, changes: GridPositionChanges) {
        if changes.is_empty() {
            return;
        }
        if let Some(cb) = &self.options.on_change {
            cb(changes);
        }
    }
}
