//! Staging buffer for high-frequency state.
//!
//! A [`Staged`] value keeps two copies: a `live` copy that gesture handlers
//! mutate on every pointer event, and a `committed` copy that is the canonical,
//! externally observable value. Only [`Staged::commit`] moves the live copy
//! into the committed slot, so hosts see one change per gesture instead of one
//! per frame.

#[cfg(test)]
#[path = "staging_test.rs"]
mod staging_test;

/// A live/committed pair. See the module docs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Staged<T> {
    live: T,
    committed: T,
}

impl<T: Copy + PartialEq> Staged<T> {
    /// Start with both copies equal to `value`.
    #[must_use]
    pub fn new(value: T) -> Self {
        Self { live: value, committed: value }
    }

    /// The fast-path value that rendering should use mid-gesture.
    #[must_use]
    pub fn live(&self) -> T {
        self.live
    }

    /// The canonical value last flushed by [`Staged::commit`] or [`Staged::reset`].
    #[must_use]
    pub fn committed(&self) -> T {
        self.committed
    }

    /// True when the live copy has diverged from the committed one.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.live != self.committed
    }

    /// Mutate the live copy in place.
    pub fn stage<F>(&mut self, f: F)
    where
        F: FnOnce(&mut T),
    {
        f(&mut self.live);
    }

    /// Flush the live copy. Returns the new committed value if it changed.
    pub fn commit(&mut self) -> Option<T> {
        if self.is_dirty() {
            self.committed = self.live;
            Some(self.committed)
        } else {
            None
        }
    }

    /// Drop uncommitted changes, restoring the live copy from the committed one.
    pub fn discard(&mut self) {
        self.live = self.committed;
    }

    /// Overwrite both copies. Used for external replacement (snapshot load, reset view).
    pub fn reset(&mut self, value: T) {
        self.live = value;
        self.committed = value;
    }
}
