use slot_pool::SlotId;

/// One node of a [`RingList`][crate::RingList].
///
/// A node carries its element data together with the identifiers of its ring
/// neighbors and of its own slot. The self identifier is what lets diagnostic
/// renderers label a node without knowing which slot they found it in.
#[derive(Debug)]
pub struct Node<T> {
    pub(crate) data: T,
    pub(crate) next: SlotId,
    pub(crate) prev: SlotId,
    pub(crate) id: SlotId,
}

impl<T> Node<T> {
    /// The element data carried by this node.
    #[must_use]
    pub fn data(&self) -> &T {
        &self.data
    }

    /// The identifier of the node that follows this one in the ring.
    #[must_use]
    pub fn next(&self) -> SlotId {
        self.next
    }

    /// The identifier of the node that precedes this one in the ring.
    #[must_use]
    pub fn prev(&self) -> SlotId {
        self.prev
    }

    /// The identifier of the slot this node occupies.
    #[must_use]
    pub fn id(&self) -> SlotId {
        self.id
    }

    pub(crate) fn into_data(self) -> T {
        self.data
    }
}
