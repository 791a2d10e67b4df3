//! Adapter utilities for the `position-cache` crate.
//!
//! The `position-cache` crate is UI-agnostic and focuses on the offset math. This crate
//! provides a small, framework-neutral coordinator that adapters put between their scroll
//! container and the cache:
//!
//! - Jump compensation (measured items above the viewport do not shift the visible content)
//! - Spacer sizing as the scrollable extent changes
//! - Render ranges with hysteresis, for lists and grids
//! - Index navigation (`scroll_to_index`, `scroll_in_view`)
//!
//! This crate is intentionally framework-agnostic (no ratatui/egui bindings).
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod layout;
mod viewport;

#[cfg(test)]
mod tests;

pub use layout::{Layout, LayoutOptions};
pub use viewport::{
    GridRange, IndexRange, RenderRange, RenderedRange, ScrollTo, ViewportCoordinator,
    ViewportUpdate,
};
