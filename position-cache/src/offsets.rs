use alloc::vec::Vec;

use crate::{ItemPosition, ViewportNumbers};

/// Builds a table of `len` placeholder entries of `size`, chained from 0.
pub fn default_positions(len: usize, size: u32) -> Vec<ItemPosition> {
    (0..len)
        .map(|i| ItemPosition {
            size,
            position: (i as u64).saturating_mul(size as u64),
        })
        .collect()
}

/// Returns the index whose span contains `offset`.
///
/// This is the greatest `i` with `table[i].position <= offset`. Offsets before the first
/// entry resolve to `0`, offsets at or past the last entry resolve to the last index, and an
/// empty table resolves to `0`.
///
/// `table` must be sorted by non-decreasing `position`. Runs in `O(log n)`.
pub fn locate(offset: u64, table: &[ItemPosition]) -> usize {
    table
        .partition_point(|p| p.position <= offset)
        .saturating_sub(1)
}

/// `end()` of the last entry, or `0` for an empty table.
pub fn total_size(table: &[ItemPosition]) -> u64 {
    table.last().map_or(0, ItemPosition::end)
}

/// Maps a possibly negative index onto `0..len`.
///
/// Negative values count from the end (`-1` is the last item). Anything out of range is
/// clamped; an empty collection always yields `0`.
pub fn normalize_index(index: isize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    if index < 0 {
        len - index.unsigned_abs().min(len)
    } else {
        (index as usize).min(len - 1)
    }
}

/// `a - b` as a signed delta, saturating at the `i64` bounds.
pub(crate) fn signed_diff(a: u64, b: u64) -> i64 {
    (a as i128 - b as i128).clamp(i64::MIN as i128, i64::MAX as i128) as i64
}

/// Items bracketing `[offset, offset + viewport]` on one axis.
pub(crate) fn viewport_numbers(table: &[ItemPosition], offset: u64, viewport: u32) -> ViewportNumbers {
    if table.is_empty() {
        return ViewportNumbers::default();
    }
    let first = locate(offset, table);
    let last = locate(offset.saturating_add(viewport as u64), table);
    let count = last.saturating_sub(first) + 1;
    ViewportNumbers {
        first,
        last,
        count,
        tolerated_count: count.div_ceil(2),
    }
}

/// Keeps `candidate` as the first rendered index unless it drifted further than the tolerated
/// count from the item one viewport above `offset`.
pub(crate) fn first_within_tolerance(
    table: &[ItemPosition],
    offset: u64,
    viewport: u32,
    candidate: usize,
) -> usize {
    let numbers = viewport_numbers(table, offset, viewport);
    let first = locate(offset.saturating_sub(viewport as u64), table);
    if candidate.abs_diff(first) > numbers.tolerated_count {
        first
    } else {
        candidate
    }
}

/// Index reached `distance` pixels past the start of `first`, capped at the table end.
pub(crate) fn last_within(table: &[ItemPosition], first: usize, distance: u64) -> usize {
    let Some(start) = table.get(first.min(table.len().saturating_sub(1))) else {
        return 0;
    };
    let target = start
        .position
        .saturating_add(distance)
        .min(total_size(table));
    locate(target, table)
}

/// Computes chained positions for a contiguous slice of the collection.
///
/// `size_of` receives each item with its absolute index (`first_index + i`). The returned
/// positions start at 0; [`merge_positions`] glues them onto the table.
pub fn calculate_positions<T>(
    items: &[T],
    first_index: usize,
    mut size_of: impl FnMut(&T, usize) -> u32,
) -> Vec<ItemPosition> {
    let mut out = Vec::with_capacity(items.len());
    let mut position = 0u64;
    for (i, item) in items.iter().enumerate() {
        let size = size_of(item, first_index + i);
        out.push(ItemPosition { size, position });
        position = position.saturating_add(size as u64);
    }
    out
}

/// Splices `fresh` into a copy of `table` at `insert_index` and re-chains what follows.
///
/// Exactly `fresh.len()` entries are replaced. The spliced block is shifted so it starts at
/// the end of `table[insert_index - 1]` (or 0). Following entries are re-chained until the
/// first one that already lines up.
pub fn merge_positions(
    table: &[ItemPosition],
    fresh: &[ItemPosition],
    insert_index: usize,
) -> Vec<ItemPosition> {
    let mut out = table.to_vec();
    merge_positions_in_place(&mut out, fresh, insert_index);
    out
}

/// In-place variant of [`merge_positions`] for tables owned by a cache.
pub(crate) fn merge_positions_in_place(
    table: &mut [ItemPosition],
    fresh: &[ItemPosition],
    insert_index: usize,
) {
    let len = table.len();
    if insert_index >= len {
        if !fresh.is_empty() {
            pwarn!(
                insert_index,
                len,
                "merge_positions: insert index out of bounds"
            );
        }
        return;
    }

    let take = fresh.len().min(len - insert_index);
    if take < fresh.len() {
        pwarn!(
            insert_index,
            window = fresh.len(),
            len,
            "merge_positions: window overruns the table, truncating"
        );
    }

    let shift = if insert_index == 0 {
        0
    } else {
        table[insert_index - 1].end()
    };
    let base = fresh.first().map_or(0, |p| p.position);
    for (slot, p) in table[insert_index..insert_index + take]
        .iter_mut()
        .zip(fresh)
    {
        *slot = ItemPosition {
            size: p.size,
            position: p.position.saturating_sub(base).saturating_add(shift),
        };
    }

    let mut rechained = 0usize;
    for i in (insert_index + take).max(1)..len {
        let expected = table[i - 1].end();
        if table[i].position == expected {
            break;
        }
        table[i].position = expected;
        rechained = rechained.saturating_add(1);
    }
    ptrace!(insert_index, window = take, rechained, "merge_positions");
}

/// A contiguous run of measured sizes starting at `start`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Window {
    pub(crate) start: usize,
    pub(crate) sizes: Vec<u32>,
}

impl Window {
    pub(crate) fn end(&self) -> usize {
        self.start + self.sizes.len()
    }
}

/// Measures items around `pivot` until `before` pixels are covered going back and `after`
/// pixels going forward. Both walks count the pivot, which is measured once.
///
/// Requires `pivot < len`.
pub(crate) fn measure_window(
    len: usize,
    pivot: usize,
    before: u64,
    after: u64,
    mut size_at: impl FnMut(usize) -> u32,
) -> Window {
    debug_assert!(pivot < len, "pivot out of bounds (pivot={pivot}, len={len})");

    let mut sizes = Vec::new();
    let mut covered = 0u64;
    let mut idx = pivot;
    loop {
        let size = size_at(idx);
        sizes.push(size);
        covered = covered.saturating_add(size as u64);
        if covered >= before || idx == 0 {
            break;
        }
        idx -= 1;
    }
    let start = idx;
    sizes.reverse();

    let mut covered = sizes.last().copied().unwrap_or(0) as u64;
    let mut idx = pivot + 1;
    while covered < after && idx < len {
        let size = size_at(idx);
        sizes.push(size);
        covered = covered.saturating_add(size as u64);
        idx += 1;
    }

    Window { start, sizes }
}
