use crate::SlotId;

/// One cell of pool storage.
///
/// Every cell is always initialized: it either holds an item or is threaded into the
/// free chain. There is no third state, which is what makes stale identifiers detectable
/// at the slot level instead of silently resolving to reused or garbage contents.
#[derive(Debug)]
pub(crate) enum Slot<T> {
    /// The slot is vacant and linked into the free chain.
    /// `None` means this slot terminates the chain.
    Free { next_free: Option<SlotId> },

    /// The slot holds an item.
    Live { value: T },
}

impl<T> Slot<T> {
    pub(crate) fn view(&self) -> SlotView<'_, T> {
        match self {
            Self::Free { next_free } => SlotView::Free {
                next_free: *next_free,
            },
            Self::Live { value } => SlotView::Live { value },
        }
    }
}

/// A borrowed view of one pool slot, as yielded by
/// [`SlotPool::slots()`][crate::SlotPool::slots].
///
/// Diagnostic tooling renders vacant slots alongside occupied ones, so the view exposes
/// the free chain link of a vacant slot just like it exposes the value of an occupied
/// one.
#[derive(Clone, Copy, Debug)]
#[non_exhaustive]
pub enum SlotView<'s, T> {
    /// The slot is vacant.
    Free {
        /// The next slot in the free chain, or `None` if this slot terminates it.
        next_free: Option<SlotId>,
    },

    /// The slot holds an item.
    Live {
        /// The stored item.
        value: &'s T,
    },
}

impl<'s, T> SlotView<'s, T> {
    /// Whether the slot holds an item.
    #[must_use]
    pub fn is_live(&self) -> bool {
        matches!(self, Self::Live { .. })
    }

    /// The stored item, if the slot holds one.
    #[must_use]
    pub fn value(&self) -> Option<&'s T> {
        match self {
            Self::Live { value } => Some(value),
            Self::Free { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_reflects_slot_state() {
        let live = Slot::Live { value: 7_usize };
        assert!(live.view().is_live());
        assert_eq!(live.view().value(), Some(&7));

        let free = Slot::<usize>::Free {
            next_free: Some(SlotId::new(3)),
        };
        assert!(!free.view().is_live());
        assert_eq!(free.view().value(), None);
        assert!(matches!(
            free.view(),
            SlotView::Free {
                next_free: Some(id)
            } if id.index() == 3
        ));
    }
}
