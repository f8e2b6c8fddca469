//! Point-in-time view of a rotation, for rendering.

use std::fmt;
use std::sync::Arc;

/// Lifecycle state of a rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationState {
    /// No items attached; nothing is shown and nothing is scheduled.
    Empty,
    /// Items attached and auto-advance is running.
    Active,
    /// Items attached, auto-advance suspended until resumed.
    Paused,
}

impl RotationState {
    /// Whether automatic advancing should be scheduled.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        matches!(self, Self::Active)
    }
}

impl fmt::Display for RotationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Empty => "empty",
            Self::Active => "active",
            Self::Paused => "paused",
        };
        f.write_str(label)
    }
}

/// Indices shown by a window of `window` items starting at `offset`,
/// wrapping around the end of a list of `len` items.
pub(crate) fn window_indices(
    offset: usize,
    len: usize,
    window: usize,
) -> impl Iterator<Item = usize> {
    (0..window.min(len)).map(move |step| (offset + step) % len)
}

/// Everything a presentation layer needs to draw one frame: the visible
/// items, the position indicator, and whether navigation controls apply.
#[derive(Debug)]
pub struct RotationSnapshot<T> {
    /// The full attached list.
    pub items: Arc<[T]>,
    /// Index of the first visible item.
    pub offset: usize,
    /// Configured window size.
    pub window_size: usize,
    /// Lifecycle state.
    pub state: RotationState,
    /// Number of timer-driven advances since the driver started.
    pub auto_advances: u64,
}

impl<T> Clone for RotationSnapshot<T> {
    fn clone(&self) -> Self {
        Self {
            items: Arc::clone(&self.items),
            offset: self.offset,
            window_size: self.window_size,
            state: self.state,
            auto_advances: self.auto_advances,
        }
    }
}

impl<T> RotationSnapshot<T> {
    /// Number of attached items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether no items are attached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Indices of the visible items, in display order.
    #[must_use]
    pub fn visible_indices(&self) -> Vec<usize> {
        window_indices(self.offset, self.items.len(), self.window_size).collect()
    }

    /// The visible items, in display order.
    #[must_use]
    pub fn visible(&self) -> Vec<&T> {
        window_indices(self.offset, self.items.len(), self.window_size)
            .map(|index| &self.items[index])
            .collect()
    }

    /// Whether prev/next would bring an unseen item into view.
    #[must_use]
    pub fn can_navigate(&self) -> bool {
        self.items.len() > self.window_size
    }

    /// One flag per item, set for the item at the current offset.
    #[must_use]
    pub fn indicators(&self) -> Vec<bool> {
        (0..self.items.len()).map(|index| index == self.offset).collect()
    }
}
