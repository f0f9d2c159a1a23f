use std::collections::TryReserveError;

use thiserror::Error;

use crate::SlotId;

/// Errors that can occur when operating on a [`SlotPool`][crate::SlotPool].
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PoolError {
    /// The identifier does not reference any slot of this pool.
    ///
    /// Identifiers are only minted for slots that exist, so this typically means the
    /// identifier came from a different pool or from before the pool was rebuilt.
    #[error("slot id {id} is out of bounds for a pool of capacity {capacity}")]
    BadId {
        /// The offending identifier.
        id: SlotId,

        /// Capacity of the pool at the time of the call.
        capacity: usize,
    },

    /// The slot exists but holds no item because it has since been freed.
    #[error("slot {id} no longer holds an item; it was freed after the id was obtained")]
    UseAfterFree {
        /// The offending identifier.
        id: SlotId,
    },

    /// The slot was asked to be freed but is already free.
    #[error("slot {id} is already free")]
    DoubleFree {
        /// The offending identifier.
        id: SlotId,
    },

    /// The requested capacity is too large for any allocator to ever satisfy because its
    /// byte size is not representable.
    #[error("capacity of {capacity} slots exceeds the representable pool size")]
    BadCapacity {
        /// The capacity that was requested, in slots.
        capacity: usize,
    },

    /// The backing storage for the requested capacity could not be acquired.
    #[error("failed to allocate pool storage")]
    Allocation {
        /// The underlying storage failure.
        #[from]
        source: TryReserveError,
    },
}

impl PoolError {
    pub(crate) fn bad_id(id: SlotId, capacity: usize) -> Self {
        tracing::debug!("rejecting slot id {id}: out of bounds for capacity {capacity}");
        Self::BadId { id, capacity }
    }

    pub(crate) fn use_after_free(id: SlotId) -> Self {
        tracing::debug!("rejecting slot id {id}: slot was freed after the id was obtained");
        Self::UseAfterFree { id }
    }

    pub(crate) fn double_free(id: SlotId) -> Self {
        tracing::debug!("rejecting removal of slot {id}: slot is already free");
        Self::DoubleFree { id }
    }

    pub(crate) fn bad_capacity(capacity: usize) -> Self {
        tracing::debug!("rejecting capacity of {capacity} slots: byte size not representable");
        Self::BadCapacity { capacity }
    }
}

/// A specialized `Result` type for pool operations, returning the crate's
/// [`PoolError`] type as the error value.
pub(crate) type Result<T> = std::result::Result<T, PoolError>;
