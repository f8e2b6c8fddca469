//! Cyclic window over a shared list.
//!
//! The engine is a plain state machine. It never schedules anything itself;
//! see [`RotationDriver`](super::RotationDriver) for timer-driven advancing.
//! Every operation is total: index arithmetic is taken modulo a non-zero
//! length, and operations on an empty engine are no-ops.

use std::sync::Arc;

use super::snapshot::{RotationSnapshot, RotationState, window_indices};

/// Default number of simultaneously visible items.
pub const DEFAULT_WINDOW_SIZE: usize = 3;

/// Rotating window over an ordered list.
///
/// The list is shared, not copied, and is never reordered.
#[derive(Debug)]
pub struct RotationEngine<T> {
    items: Arc<[T]>,
    offset: usize,
    window_size: usize,
    running: bool,
}

impl<T> Default for RotationEngine<T> {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW_SIZE)
    }
}

impl<T> RotationEngine<T> {
    /// Create an empty engine showing `window_size` items at a time.
    ///
    /// A window size of zero is treated as one.
    #[must_use]
    pub fn new(window_size: usize) -> Self {
        Self {
            items: Arc::from(Vec::new()),
            offset: 0,
            window_size: window_size.max(1),
            running: false,
        }
    }

    /// Create an engine and attach `items` immediately.
    #[must_use]
    pub fn with_items(items: impl Into<Arc<[T]>>, window_size: usize) -> Self {
        let mut engine = Self::new(window_size);
        engine.attach(items);
        engine
    }

    /// Replace the list. Resets the offset and starts running if the list
    /// is non-empty.
    pub fn attach(&mut self, items: impl Into<Arc<[T]>>) {
        self.items = items.into();
        self.offset = 0;
        self.running = !self.items.is_empty();
    }

    /// Drop the list, returning to [`RotationState::Empty`].
    pub fn detach(&mut self) {
        self.attach(Vec::new());
    }

    /// Move forward by one, wrapping to the start.
    pub fn advance(&mut self) {
        let len = self.items.len();
        if len > 0 {
            self.offset = (self.offset + 1) % len;
        }
    }

    /// Move back by one, wrapping to the end.
    pub fn retreat(&mut self) {
        let len = self.items.len();
        if len > 0 {
            self.offset = (self.offset + len - 1) % len;
        }
    }

    /// Move to `index`, normalized modulo the list length. Negative indices
    /// count from the end.
    pub fn jump_to(&mut self, index: i64) {
        let len = self.items.len();
        if len == 0 {
            return;
        }
        let modulus = i64::try_from(len).unwrap_or(i64::MAX);
        self.offset = usize::try_from(index.rem_euclid(modulus)).unwrap_or(0);
    }

    /// Suspend automatic advancing. No-op when empty.
    pub fn pause(&mut self) {
        if !self.items.is_empty() {
            self.running = false;
        }
    }

    /// Resume automatic advancing. No-op when empty.
    pub fn resume(&mut self) {
        if !self.items.is_empty() {
            self.running = true;
        }
    }

    /// Change the window size (minimum one). Resets the offset.
    pub fn set_window_size(&mut self, window_size: usize) {
        self.window_size = window_size.max(1);
        self.offset = 0;
    }

    /// Items currently in view: `min(window_size, len)` of them, starting at
    /// the offset and wrapping around.
    #[must_use]
    pub fn visible_window(&self) -> Vec<&T> {
        window_indices(self.offset, self.items.len(), self.window_size)
            .map(|index| &self.items[index])
            .collect()
    }

    /// Index of the first visible item.
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// Configured window size.
    #[must_use]
    pub const fn window_size(&self) -> usize {
        self.window_size
    }

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

    /// The attached list.
    #[must_use]
    pub const fn items(&self) -> &Arc<[T]> {
        &self.items
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> RotationState {
        if self.items.is_empty() {
            RotationState::Empty
        } else if self.running {
            RotationState::Active
        } else {
            RotationState::Paused
        }
    }

    /// Whether automatic advancing should be scheduled.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.state().is_running()
    }

    /// Cheap point-in-time copy for rendering.
    #[must_use]
    pub fn snapshot(&self) -> RotationSnapshot<T> {
        RotationSnapshot {
            items: Arc::clone(&self.items),
            offset: self.offset,
            window_size: self.window_size,
            state: self.state(),
            auto_advances: 0,
        }
    }
}
