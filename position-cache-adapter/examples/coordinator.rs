use position_cache::PositionCacheOptions;
use position_cache_adapter::{RenderRange, ScrollTo, ViewportCoordinator};

fn main() {
    // Example: drive a coordinator the way a scroll container would.
    //
    // The adapter flow is typically:
    // 1) forward every scroll event to `on_scroll`
    // 2) write back `scroll_offset` when the coordinator corrected it
    // 3) resize the spacer and render the current range at `content_offset`
    let items: Vec<u32> = (0..5_000).map(|i| 24 + (i % 9) * 12).collect();
    let mut c = ViewportCoordinator::list(PositionCacheOptions::new(
        items,
        |&h: &u32, _, _| h,
        480,
    ));

    for offset in [0u64, 300, 2_000, 2_100, 40_000] {
        let update = c.on_scroll(offset);
        if let Some(corrected) = update.scroll_offset {
            println!("scroll {offset} corrected to {}", corrected.main);
        }
        if let RenderRange::List(r) = c.render_range() {
            println!(
                "render {}..={} at {} spacer={} changed={}",
                r.first,
                r.last,
                c.content_offset().main,
                update.spacer.main,
                update.range_changed
            );
        }
    }

    let update = c.scroll_to_index(4_999usize);
    println!("after scroll_to_index: {update:?}");

    // Keyboard navigation: moving the selection onto the last visible row steps one row down.
    c.scroll_to_index(100usize);
    if let RenderRange::List(visible) = c.rendered_range().viewport {
        let update = c.scroll_in_view(visible.last, ScrollTo::End);
        println!("after scroll_in_view: {update:?}");
    }

    let update = c.set_viewport_size(720u32);
    println!("after resize: {update:?}");
}
