use crate::*;

use alloc::sync::Arc;
use alloc::vec;
use alloc::vec::Vec;
use core::sync::atomic::{AtomicUsize, Ordering};

use position_cache::{
    CellSize, GridIndex, GridOffset, GridPositionCache, GridPositionCacheOptions, GridSize,
    PositionCache, PositionCacheOptions, PositionChanges, Rect, ScrollDirection,
};

fn list_of(count: usize, size: u32, viewport: u32) -> ViewportCoordinator<usize> {
    let items: Vec<usize> = (0..count).collect();
    ViewportCoordinator::list(PositionCacheOptions::new(
        items,
        move |_, _, _| size,
        viewport,
    ))
}

fn as_list<T>(c: &ViewportCoordinator<T>) -> &PositionCache<T> {
    match c.layout() {
        Layout::List(cache) => cache,
        Layout::Grid(_) => panic!("expected a list layout"),
    }
}

fn as_grid<T>(c: &ViewportCoordinator<T>) -> &GridPositionCache<T> {
    match c.layout() {
        Layout::Grid(cache) => cache,
        Layout::List(_) => panic!("expected a grid layout"),
    }
}

fn list_range(first: usize, last: usize) -> RenderRange {
    RenderRange::List(IndexRange { first, last })
}

#[test]
fn construction_primes_window_under_scroll() {
    let c = list_of(100, 200, 200);
    let cache = as_list(&c);
    assert_eq!(cache.positions()[1].size, 200);
    assert_eq!(cache.positions()[2].size, 40);
    assert_eq!(c.spacer_size(), GridSize { main: 4320, cross: 0 });
    assert_eq!(c.scroll_offset(), GridOffset::default());
    assert_eq!(c.render_range(), list_range(0, 7));
    assert_eq!(c.content_offset(), GridOffset::default());
}

#[test]
fn on_scroll_keeps_anchor_item_in_place() {
    let mut c = list_of(100, 200, 200);

    let anchor = as_list(&c).locate(2010);
    assert_eq!(anchor, 42);
    let in_view = 2010 - as_list(&c).positions()[anchor].position;
    assert_eq!(in_view, 10);

    let update = c.on_scroll(2010u64);
    assert_eq!(update.scroll_offset, Some(GridOffset::from(2170u64)));
    assert_eq!(update.spacer, GridSize { main: 4960, cross: 0 });
    assert!(update.range_changed);

    let cache = as_list(&c);
    assert_eq!(cache.scroll_offset(), 2170);
    assert_eq!(cache.locate(2170), anchor);
    assert_eq!(2170 - cache.positions()[anchor].position, in_view);
    assert_eq!(c.spacer_size().main, cache.total_size());

    assert_eq!(c.render_range(), list_range(41, 44));
    assert_eq!(c.content_offset(), GridOffset::from(1960u64));
}

#[test]
fn small_scrolls_keep_render_range() {
    // Real sizes match the placeholder, so nothing ever jumps.
    let mut c = list_of(1000, 40, 200);
    assert_eq!(c.render_range(), list_range(0, 15));

    let update = c.on_scroll(40u64);
    assert_eq!(update.scroll_offset, None);
    assert!(!update.range_changed);

    let update = c.on_scroll(400u64);
    assert!(update.range_changed);
    assert_eq!(c.render_range(), list_range(5, 20));

    let update = c.on_scroll(440u64);
    assert!(!update.range_changed);
    assert_eq!(c.render_range(), list_range(5, 20));

    let update = c.on_scroll(560u64);
    assert!(update.range_changed);
    assert_eq!(c.render_range(), list_range(9, 24));
    assert_eq!(c.content_offset(), GridOffset::from(360u64));
}

#[test]
fn scroll_to_index_lands_on_item_start() {
    let mut c = list_of(100, 200, 200);

    let update = c.scroll_to_index(50usize);
    let applied = update.scroll_offset.expect("scroll offset moved");
    let cache = as_list(&c);
    assert_eq!(applied.main, cache.positions()[50].position);
    assert_eq!(applied.main, 2480);
    assert_eq!(update.spacer.main, 4800);
    assert_eq!(c.spacer_size().main, cache.total_size());
    assert!(update.range_changed);
    match c.render_range() {
        RenderRange::List(r) => assert!(r.contains(50)),
        RenderRange::Grid(_) => panic!("expected a list range"),
    }

    // The last item cannot be scrolled to the top of the viewport.
    let applied = c.scroll_to_index(500usize).scroll_offset.expect("scroll offset moved");
    assert_eq!(applied.main, c.spacer_size().main - 200);
    assert_eq!(applied.main, as_list(&c).positions()[99].position);

    // Already there.
    let update = c.scroll_to_index(99usize);
    assert_eq!(update.scroll_offset, None);
    assert!(!update.range_changed);
}

#[test]
fn scroll_to_index_notifies_on_change() {
    let seen = Arc::new(std::sync::Mutex::new(Vec::<PositionChanges>::new()));
    let items: Vec<usize> = (0..100).collect();
    let mut c = ViewportCoordinator::list(
        PositionCacheOptions::new(items, |_, _, _| 200, 200).with_on_change(Some({
            let seen = Arc::clone(&seen);
            move |changes: PositionChanges| seen.lock().unwrap().push(changes)
        })),
    );
    // Priming the window under the initial offset measures items 0 and 1.
    assert_eq!(
        *seen.lock().unwrap(),
        vec![PositionChanges {
            jump: 0,
            total_size_diff: 320
        }]
    );

    let update = c.scroll_to_index(50usize);
    assert_eq!(update.spacer.main, 4800);
    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 2);
    assert_eq!(
        seen[1],
        PositionChanges {
            jump: 0,
            total_size_diff: 480
        }
    );
}

#[test]
fn jump_compensation_keeps_scroll_direction() {
    let mut c = list_of(1000, 200, 200);
    c.on_scroll(100_000u64);
    assert_eq!(as_list(&c).scroll_direction(), Some(ScrollDirection::Forward));

    // Scrolling back lands on unmeasured items; the window grows above the anchor.
    let update = c.on_scroll(30_000u64);
    assert_eq!(update.scroll_offset, Some(GridOffset::from(30_320u64)));
    let cache = as_list(&c);
    assert_eq!(cache.scroll_offset(), 30_320);
    assert_eq!(cache.scroll_direction(), Some(ScrollDirection::Backward));
}

#[test]
fn rendered_range_reports_visible_items() {
    let mut c = list_of(1000, 40, 200);
    c.on_scroll(400u64);
    let rendered = c.rendered_range();
    assert_eq!(rendered.render, list_range(5, 20));
    assert_eq!(rendered.viewport, list_range(10, 15));
}

#[test]
fn scroll_in_view_steps_one_item_at_the_edges() {
    let mut c = list_of(1000, 40, 200);
    c.on_scroll(400u64);

    let update = c.scroll_in_view(9usize, ScrollTo::Start);
    assert_eq!(update.scroll_offset, Some(GridOffset::from(360u64)));
    assert_eq!(c.rendered_range().viewport, list_range(9, 14));

    let update = c.scroll_in_view(12usize, ScrollTo::Start);
    assert_eq!(update.scroll_offset, None);
    assert!(!update.range_changed);

    // The last visible item is only partly shown.
    let update = c.scroll_in_view(13usize, ScrollTo::End);
    assert_eq!(update.scroll_offset, Some(GridOffset::from(400u64)));
    assert_eq!(c.rendered_range().viewport, list_range(10, 15));

    let update = c.scroll_in_view(11usize, ScrollTo::End);
    assert_eq!(update.scroll_offset, None);
    assert_eq!(c.scroll_offset(), GridOffset::from(400u64));
}

#[test]
fn grid_scroll_in_view_checks_rows_first() {
    let rows: Vec<Vec<u8>> = (0..50).map(|_| vec![0u8; 20]).collect();
    let mut c = ViewportCoordinator::grid(GridPositionCacheOptions::new(
        rows,
        |_, _, _| CellSize { main: 40, cross: 40 },
        Rect { main: 200, cross: 200 },
    ));
    c.on_scroll(GridOffset { main: 400, cross: 400 });
    assert_eq!(
        c.rendered_range().viewport,
        RenderRange::Grid(GridRange {
            rows: IndexRange { first: 10, last: 15 },
            cols: IndexRange { first: 10, last: 15 },
        })
    );

    let update = c.scroll_in_view(GridIndex::new(9, 12), ScrollTo::Start);
    assert_eq!(update.scroll_offset, Some(GridOffset { main: 360, cross: 400 }));

    let update = c.scroll_in_view(GridIndex::new(12, 9), ScrollTo::Start);
    assert_eq!(update.scroll_offset, Some(GridOffset { main: 360, cross: 360 }));

    let update = c.scroll_in_view(GridIndex::new(13, 9), ScrollTo::End);
    assert_eq!(update.scroll_offset, Some(GridOffset { main: 400, cross: 360 }));

    let update = c.scroll_in_view(GridIndex::new(11, 11), ScrollTo::End);
    assert_eq!(update.scroll_offset, None);
}

#[test]
fn grid_coordinator_compensates_main_axis_jump() {
    let rows: Vec<Vec<u8>> = (0..50).map(|_| vec![0u8; 20]).collect();
    let mut c = ViewportCoordinator::grid(GridPositionCacheOptions::new(
        rows,
        |_, _, _| CellSize { main: 100, cross: 150 },
        Rect { main: 200, cross: 300 },
    ));
    assert_eq!(c.spacer_size(), GridSize { main: 2240, cross: 1240 });
    assert_eq!(
        c.render_range(),
        RenderRange::Grid(GridRange {
            rows: IndexRange { first: 0, last: 9 },
            cols: IndexRange { first: 0, last: 11 },
        })
    );

    let update = c.on_scroll(GridOffset { main: 1000, cross: 0 });
    assert_eq!(update.scroll_offset, Some(GridOffset { main: 1180, cross: 0 }));
    assert_eq!(update.spacer, GridSize { main: 2780, cross: 1240 });

    let cache = as_grid(&c);
    assert_eq!(cache.positions().main_axis[19].position, 1180);
    assert_eq!(c.spacer_size(), cache.total_size());
    assert_eq!(
        c.render_range(),
        RenderRange::Grid(GridRange {
            rows: IndexRange { first: 17, last: 23 },
            cols: IndexRange { first: 0, last: 11 },
        })
    );
    assert_eq!(c.content_offset(), GridOffset { main: 980, cross: 0 });
}

#[test]
fn viewport_change_rebuilds_cache() {
    let mut c = list_of(100, 200, 200);

    let update = c.set_viewport_size(400u32);
    let cache = as_list(&c);
    assert_eq!(cache.viewport_size(), 400);
    assert_eq!(cache.computed_len(), 1);
    assert_eq!(update.scroll_offset, None);
    assert_eq!(update.spacer.main, 4640);
    assert!(update.range_changed);
    assert_eq!(c.render_range(), list_range(0, 14));

    // Same extent: nothing to rebuild.
    let update = c.set_viewport_size(400u32);
    assert!(!update.range_changed);
    assert_eq!(update.spacer.main, 4640);
    assert_eq!(as_list(&c).computed_len(), 1);
}

#[test]
fn callback_swap_keeps_measured_windows() {
    let mut c = list_of(100, 200, 200);
    c.on_scroll(1000u64);
    let computed = as_list(&c).computed_len();
    let positions = as_list(&c).positions().to_vec();

    let calls = Arc::new(AtomicUsize::new(0));
    let LayoutOptions::List(opts) = c.options() else {
        panic!("expected list options");
    };
    let update = c.update_options(opts.with_on_change(Some({
        let calls = Arc::clone(&calls);
        move |_: PositionChanges| {
            calls.fetch_add(1, Ordering::Relaxed);
        }
    })));
    assert_eq!(update.scroll_offset, None);
    assert!(!update.range_changed);
    assert_eq!(as_list(&c).computed_len(), computed);
    assert_eq!(as_list(&c).positions(), &positions[..]);

    c.on_scroll(3000u64);
    assert_eq!(calls.load(Ordering::Relaxed), 1);
}

#[test]
fn replacing_items_clamps_scroll() {
    let mut c = list_of(100, 200, 200);
    let update = c.on_scroll(2000u64);
    assert_eq!(update.scroll_offset, Some(GridOffset::from(2160u64)));

    let items: Vec<usize> = (0..10).collect();
    let update = c.set_items(items).expect("list layout");
    assert_eq!(update.scroll_offset, Some(GridOffset::from(520u64)));
    assert_eq!(update.spacer.main, 720);
    assert_eq!(c.scroll_offset().main, 520);
    assert_eq!(as_list(&c).scroll_offset(), 520);
    assert_eq!(c.render_range(), list_range(8, 9));
}

#[test]
fn size_function_swap_rebuilds() {
    let mut c = list_of(100, 200, 200);
    let update = c.set_item_size(|_, _, _| 100).expect("list layout");
    assert_eq!(update.spacer.main, 4000 + 4 * 60);
    assert_eq!(as_list(&c).positions()[3].size, 100);
    assert_eq!(c.set_cell_size(|_, _, _| CellSize::default()), None);
}

#[test]
fn layout_specific_setters_reject_other_kind() {
    let rows: Vec<Vec<u8>> = vec![vec![0; 3]; 3];
    let mut c = ViewportCoordinator::grid(GridPositionCacheOptions::new(
        rows,
        |_, _, _| CellSize { main: 10, cross: 10 },
        Rect { main: 20, cross: 20 },
    ));
    assert_eq!(c.set_items(vec![1u8, 2, 3]), None);
    assert_eq!(c.set_item_size(|_, _, _| 1), None);

    let update = c.set_rows(vec![vec![0u8; 2]; 5]).expect("grid layout");
    assert_eq!(as_grid(&c).rows(), 5);
    assert_eq!(as_grid(&c).cols(), 2);
    assert_eq!(update.spacer, as_grid(&c).total_size());
}

#[test]
fn switching_layout_kind_rebuilds() {
    let mut c = list_of(10, 40, 100);
    let rows: Vec<Vec<usize>> = (0..4).map(|r| (0..3).map(|c| r * 3 + c).collect()).collect();
    let update = c.update_options(GridPositionCacheOptions::new(
        rows,
        |_, _, _| CellSize { main: 40, cross: 40 },
        Rect { main: 100, cross: 100 },
    ));
    assert!(update.range_changed);
    assert!(matches!(c.layout(), Layout::Grid(_)));
    assert!(matches!(c.render_range(), RenderRange::Grid(_)));
    assert_eq!(c.spacer_size(), GridSize { main: 160, cross: 120 });
}

#[test]
fn list_ignores_cross_offsets() {
    let mut c = list_of(100, 40, 200);
    c.on_scroll(GridOffset { main: 80, cross: 500 });
    assert_eq!(c.scroll_offset(), GridOffset::from(80u64));
}

#[test]
fn empty_list_is_inert() {
    let mut c = list_of(0, 200, 200);
    assert!(c.is_empty());
    assert_eq!(c.spacer_size(), GridSize::default());

    let update = c.on_scroll(100u64);
    assert_eq!(update.scroll_offset, None);
    assert_eq!(update.spacer, GridSize::default());
    assert_eq!(c.scroll_to_index(5usize).scroll_offset, None);
    assert_eq!(c.scroll_in_view(5usize, ScrollTo::End).scroll_offset, None);
    assert_eq!(c.content_offset(), GridOffset::default());
}
