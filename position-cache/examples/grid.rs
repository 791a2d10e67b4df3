// Example: a photo grid with ragged rows and per-cell sizes.
use position_cache::{
    CellSize, GridIndex, GridOffset, GridPositionCache, GridPositionCacheOptions, Rect,
};

fn main() {
    let rows: Vec<Vec<(u32, u32)>> = (0..500)
        .map(|r| {
            (0..(8 + r % 5))
                .map(|c| (120 + (r % 3) as u32 * 30, 160 + (c % 4) as u32 * 20))
                .collect()
        })
        .collect();

    let mut cache = GridPositionCache::new(GridPositionCacheOptions::new(
        rows,
        |&(h, w): &(u32, u32), _, _| CellSize { main: h, cross: w },
        Rect { main: 900, cross: 1200 },
    ));
    println!(
        "rows={} cols={} total={:?}",
        cache.rows(),
        cache.cols(),
        cache.total_size()
    );

    let changes = cache.update_by_index_with_changes(GridIndex::new(0, 0));
    println!("first window: {changes:?}");

    cache.set_scroll_offset(GridOffset { main: 8_000, cross: 0 });
    let changes = cache.update_by_scroll_position(GridOffset { main: 8_000, cross: 0 });
    println!("after scrolling: {changes:?} total={:?}", cache.total_size());

    let cell = cache.at(GridIndex::new(250, 3));
    println!("cell (250, 3) at {cell:?}");
    println!("viewport numbers: {:?}", cache.numbers_in_viewport());
}
