use slot_pool::{PoolError, SlotId};
use thiserror::Error;

/// Errors that can occur when operating on a [`RingList`][crate::RingList].
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ListError {
    /// The position does not reference a list element.
    ///
    /// Positions are zero-based element indexes counted from the node that follows
    /// the anchor. Reads and removals accept `0..len`; insertion additionally
    /// accepts `len`, meaning append.
    #[error("position {pos} is out of bounds for a list of length {len}")]
    BadPos {
        /// The position that was requested.
        pos: usize,

        /// Number of elements in the list at the time of the call.
        len: usize,
    },

    /// The identifier does not reference a list element.
    ///
    /// Raised for identifiers that belong to a different list, for stale identifiers
    /// whose node has since been removed, and for the anchor, which addresses the
    /// ring itself rather than any element in it.
    #[error("id {id} does not reference a list element")]
    BadId {
        /// The offending identifier.
        id: SlotId,

        /// The pool-level failure, when the identifier failed to resolve at all.
        /// Absent when the identifier resolved but named the anchor.
        #[source]
        source: Option<PoolError>,
    },

    /// A ring link failed to resolve while navigating the list.
    ///
    /// Ring links are maintained by the list itself, so this reports damaged list
    /// structure rather than a caller mistake.
    #[error("ring link to {id} did not resolve; the list structure is damaged")]
    BadNodePointer {
        /// The identifier the damaged link carried.
        id: SlotId,

        /// The pool-level failure behind the bad link.
        #[source]
        source: PoolError,
    },

    /// An operation on the backing pool failed. Growing storage to fit a new node
    /// is the usual trigger.
    #[error(transparent)]
    Pool(#[from] PoolError),
}

impl ListError {
    pub(crate) fn bad_pos(pos: usize, len: usize) -> Self {
        tracing::debug!("rejecting position {pos}: the list holds {len} elements");
        Self::BadPos { pos, len }
    }

    pub(crate) fn bad_id(id: SlotId, source: Option<PoolError>) -> Self {
        tracing::debug!("rejecting id {id}: it does not reference a list element");
        Self::BadId { id, source }
    }

    pub(crate) fn bad_node_pointer(id: SlotId, source: PoolError) -> Self {
        tracing::debug!("ring link to {id} did not resolve: {source}");
        Self::BadNodePointer { id, source }
    }
}

/// A specialized `Result` type for ring list operations, returning the crate's
/// [`ListError`] type as the error value.
pub(crate) type Result<T> = std::result::Result<T, ListError>;
