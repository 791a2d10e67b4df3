use crate::{GridOffset, ScrollDirection};

/// A lightweight, serializable snapshot of a list cache's scroll state.
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollState {
    pub offset: u64,
    pub direction: Option<ScrollDirection>,
}

impl ScrollState {
    pub(crate) fn new(offset: u64) -> Self {
        Self {
            offset,
            direction: None,
        }
    }

    /// Moves to `offset`, keeping the previous direction when the offset does not change.
    pub(crate) fn scroll_to(&mut self, offset: u64) {
        self.direction = match offset.cmp(&self.offset) {
            core::cmp::Ordering::Greater => Some(ScrollDirection::Forward),
            core::cmp::Ordering::Less => Some(ScrollDirection::Backward),
            core::cmp::Ordering::Equal => self.direction,
        };
        self.offset = offset;
    }

    /// Moves to `offset` without touching the direction.
    pub(crate) fn shift_to(&mut self, offset: u64) {
        self.offset = offset;
    }
}

/// Scroll state of a grid cache, tracked independently per axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridScrollState {
    pub main: ScrollState,
    pub cross: ScrollState,
}

impl GridScrollState {
    pub(crate) fn new(offset: GridOffset) -> Self {
        Self {
            main: ScrollState::new(offset.main),
            cross: ScrollState::new(offset.cross),
        }
    }

    pub(crate) fn scroll_to(&mut self, offset: GridOffset) {
        self.main.scroll_to(offset.main);
        self.cross.scroll_to(offset.cross);
    }

    pub(crate) fn shift_to(&mut self, offset: GridOffset) {
        self.main.shift_to(offset.main);
        self.cross.shift_to(offset.cross);
    }

    pub fn offset(&self) -> GridOffset {
        GridOffset {
            main: self.main.offset,
            cross: self.cross.offset,
        }
    }
}
