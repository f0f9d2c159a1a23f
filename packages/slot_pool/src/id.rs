use std::fmt;

/// A stable identifier for one slot of a [`SlotPool`][crate::SlotPool].
///
/// Identifiers are minted by the pool when an item is inserted and stay valid until that
/// item is removed or the pool is rebuilt from scratch. They are plain indexes under the
/// hood, so copying and comparing them is free.
///
/// An identifier is a claim, not a guarantee: the pool re-checks it on every use and
/// reports stale or foreign identifiers as errors instead of resolving them to some
/// unrelated item that may have reused the slot in the meantime. Presenting an
/// identifier to a pool other than the one that minted it is not detected and may
/// resolve to an arbitrary slot of that pool.
///
/// Identifiers display as the bare slot index because the diagnostic dump formats embed
/// them in their output.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct SlotId {
    index: usize,
}

impl SlotId {
    pub(crate) fn new(index: usize) -> Self {
        Self { index }
    }

    /// The raw index of the slot within the pool storage.
    #[must_use]
    pub fn index(self) -> usize {
        self.index
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.index)
    }
}
