// Example: a chat-like list whose message heights depend on their text.
use position_cache::{PositionCache, PositionCacheOptions, PositionChanges};

fn main() {
    let messages: Vec<String> = (0..10_000)
        .map(|i| "lorem ipsum ".repeat(1 + i % 7))
        .collect();

    // One 20px line per 40 characters, plus padding.
    let opts = PositionCacheOptions::new(
        messages,
        |m: &String, _, _| 16 + 20 * (m.len() as u32).div_ceil(40),
        600,
    )
    .with_on_change(Some(|c: PositionChanges| println!("on_change: {c:?}")));
    let mut cache = PositionCache::new(opts);

    println!("total_size before={}", cache.total_size());
    let first = cache.update_by_scroll_position(0);
    println!("measured top window: {first:?}");

    cache.set_scroll_offset(120_000);
    let index = cache.find_by_position(120_000);
    println!("item under 120000: {index} at {:?}", cache.positions()[index]);

    let numbers = cache.numbers_in_viewport();
    let render_first = cache.get_first(numbers.first);
    println!(
        "viewport={numbers:?} render={}..={}",
        render_first,
        cache.get_last(render_first)
    );

    println!("last item: {:?}", cache.at(-1));
    println!("total_size after={}", cache.total_size());
}
