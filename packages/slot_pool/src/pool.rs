use std::io;
use std::iter;
use std::mem;
use std::slice;

use crate::{PoolError, Result, Slot, SlotId, SlotView};

/// A growable object pool that addresses its items through stable [`SlotId`] handles.
///
/// The pool stores items in a contiguous run of slots. A vacant slot carries a link to
/// the next vacant slot, forming an intrusive free chain, so inserting never scans for
/// space. When the chain runs out, the storage doubles; existing identifiers survive
/// growth because items are addressed by index, not by memory location.
///
/// Identifiers are validated on every use. Looking up an identifier whose slot has been
/// freed fails with [`PoolError::UseAfterFree`], and freeing a slot twice fails with
/// [`PoolError::DoubleFree`]. Note that a freed slot is eventually reused: once a new
/// item occupies it, the old identifier becomes indistinguishable from the new one.
///
/// The pool is designed for single-threaded use. It can be sent to another thread when
/// the items allow it, and shared use requires external synchronization such as a mutex.
///
/// # Example
///
/// ```
/// use slot_pool::SlotPool;
///
/// # fn main() -> Result<(), slot_pool::PoolError> {
/// let mut pool = SlotPool::new();
///
/// let first = pool.insert(10)?;
/// let second = pool.insert(20)?;
///
/// assert_eq!(*pool.get(first)?, 10);
/// assert_eq!(pool.remove(second)?, 20);
///
/// // The freed slot is reused by the next insert.
/// let third = pool.insert(30)?;
/// assert_eq!(third, second);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct SlotPool<T> {
    /// Backing storage. Every cell is initialized at all times, either holding an item
    /// or linking into the free chain. Its length is the pool capacity; it never
    /// shrinks.
    slots: Vec<Slot<T>>,

    /// Head of the intrusive free chain threaded through the vacant slots, or `None`
    /// when every slot is occupied. Think of it as a stack of the most recently freed
    /// slots, with the stack entries stored in the slots themselves.
    free_head: Option<SlotId>,

    /// Number of occupied slots. Derivable from the storage but kept for O(1) `len()`.
    len: usize,
}

impl<T> SlotPool<T> {
    /// Capacity of a pool created by [`new()`][Self::new], in slots.
    ///
    /// A requested capacity of zero is rounded up to this value.
    pub const DEFAULT_CAPACITY: usize = 2;

    /// Creates a pool with the default starting capacity.
    ///
    /// # Panics
    ///
    /// Panics if storage for the default capacity cannot be allocated. Use
    /// [`with_capacity()`][Self::with_capacity] to handle allocation failure as a
    /// result value.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
            .expect("allocating the default two-slot pool failed; treating that as fatal")
    }

    /// Creates a pool with at least `capacity` slots of storage.
    ///
    /// A `capacity` of zero selects the default starting capacity. The slots of the new
    /// pool form a free chain in ascending index order, so a fresh pool hands out
    /// identifiers `0, 1, 2, ..` for consecutive inserts.
    ///
    /// # Example
    ///
    /// ```
    /// use slot_pool::SlotPool;
    ///
    /// # fn main() -> Result<(), slot_pool::PoolError> {
    /// let mut pool = SlotPool::with_capacity(64)?;
    /// assert_eq!(pool.capacity(), 64);
    ///
    /// let id = pool.insert("payload")?;
    /// assert_eq!(id.index(), 0);
    /// # Ok(())
    /// # }
    /// ```
    ///
    /// # Errors
    ///
    /// Fails with [`PoolError::BadCapacity`] when the byte size of the requested
    /// storage is not representable, and with [`PoolError::Allocation`] when the
    /// allocator refuses the request.
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        let capacity = if capacity == 0 {
            Self::DEFAULT_CAPACITY
        } else {
            capacity
        };

        if !Self::byte_size_representable(capacity) {
            return Err(PoolError::bad_capacity(capacity));
        }

        let mut slots = Vec::new();
        slots.try_reserve_exact(capacity)?;

        chain_onto(&mut slots, capacity, None);

        Ok(Self {
            slots,
            free_head: Some(SlotId::new(0)),
            len: 0,
        })
    }

    /// Inserts an item and returns the identifier of the slot it occupies.
    ///
    /// The slot is taken from the head of the free chain. When the chain is exhausted
    /// the storage doubles first, so a mix of inserts and removals settles into reusing
    /// the same slots instead of growing without bound.
    ///
    /// # Example
    ///
    /// ```
    /// use slot_pool::SlotPool;
    ///
    /// # fn main() -> Result<(), slot_pool::PoolError> {
    /// let mut pool = SlotPool::new();
    ///
    /// let id = pool.insert(1234)?;
    /// assert_eq!(*pool.get(id)?, 1234);
    /// # Ok(())
    /// # }
    /// ```
    ///
    /// # Errors
    ///
    /// Fails with [`PoolError::BadCapacity`] or [`PoolError::Allocation`] when the pool
    /// is full and growing it fails. The item is dropped in that case.
    pub fn insert(&mut self, value: T) -> Result<SlotId> {
        Ok(self.begin_insert()?.insert(value))
    }

    /// Prepares to insert an item, exposing the identifier of its future slot before
    /// the item has to exist.
    ///
    /// This is for items that want to carry their own identifier, such as nodes that
    /// link back to themselves. Dropping the inserter without calling
    /// [`insert()`][Inserter::insert] leaves the pool unchanged.
    ///
    /// # Example
    ///
    /// ```
    /// use slot_pool::{SlotId, SlotPool};
    ///
    /// struct SelfAware {
    ///     me: SlotId,
    /// }
    ///
    /// # fn main() -> Result<(), slot_pool::PoolError> {
    /// let mut pool = SlotPool::new();
    ///
    /// let inserter = pool.begin_insert()?;
    /// let me = inserter.id();
    /// let id = inserter.insert(SelfAware { me });
    ///
    /// assert_eq!(pool.get(id)?.me, id);
    /// # Ok(())
    /// # }
    /// ```
    ///
    /// # Errors
    ///
    /// Fails with [`PoolError::BadCapacity`] or [`PoolError::Allocation`] when the pool
    /// is full and growing it fails.
    pub fn begin_insert(&mut self) -> Result<Inserter<'_, T>> {
        #[cfg(debug_assertions)]
        self.integrity_check();

        let id = match self.free_head {
            Some(id) => id,
            None => {
                // The chain is exhausted, so double the storage. Capacity is never
                // zero, which means this always adds at least one vacant slot.
                self.grow(self.capacity())?;

                self.free_head
                    .expect("growing just pushed fresh slots onto the free chain")
            }
        };

        Ok(Inserter { pool: self, id })
    }

    /// Removes the item in the identified slot and returns it.
    ///
    /// The slot joins the front of the free chain, making it the first candidate for
    /// reuse by the next insert.
    ///
    /// # Example
    ///
    /// ```
    /// use slot_pool::SlotPool;
    ///
    /// # fn main() -> Result<(), slot_pool::PoolError> {
    /// let mut pool = SlotPool::new();
    ///
    /// let id = pool.insert("transient".to_string())?;
    /// assert_eq!(pool.remove(id)?, "transient");
    /// assert!(pool.is_empty());
    /// # Ok(())
    /// # }
    /// ```
    ///
    /// # Errors
    ///
    /// Fails with [`PoolError::BadId`] when the identifier does not reference a slot of
    /// this pool, and with [`PoolError::DoubleFree`] when the slot is already free.
    pub fn remove(&mut self, id: SlotId) -> Result<T> {
        let free_head = self.free_head;
        let capacity = self.slots.len();

        let slot = self
            .slots
            .get_mut(id.index())
            .ok_or_else(|| PoolError::bad_id(id, capacity))?;

        if matches!(slot, Slot::Free { .. }) {
            return Err(PoolError::double_free(id));
        }

        // Push the freed slot onto the front of the free chain.
        let replaced = mem::replace(
            slot,
            Slot::Free {
                next_free: free_head,
            },
        );
        self.free_head = Some(id);

        self.len = self
            .len
            .checked_sub(1)
            .expect("a live slot was just freed, so the occupied count was non-zero");

        let Slot::Live { value } = replaced else {
            unreachable!("liveness was checked before the slot was replaced");
        };

        Ok(value)
    }

    /// Returns a reference to the item in the identified slot.
    ///
    /// # Errors
    ///
    /// Fails with [`PoolError::BadId`] when the identifier does not reference a slot of
    /// this pool, and with [`PoolError::UseAfterFree`] when the slot no longer holds an
    /// item.
    pub fn get(&self, id: SlotId) -> Result<&T> {
        match self.slots.get(id.index()) {
            Some(Slot::Live { value }) => Ok(value),
            Some(Slot::Free { .. }) => Err(PoolError::use_after_free(id)),
            None => Err(PoolError::bad_id(id, self.slots.len())),
        }
    }

    /// Returns a mutable reference to the item in the identified slot.
    ///
    /// # Example
    ///
    /// ```
    /// use slot_pool::SlotPool;
    ///
    /// # fn main() -> Result<(), slot_pool::PoolError> {
    /// let mut pool = SlotPool::new();
    ///
    /// let id = pool.insert("Alice".to_string())?;
    /// pool.get_mut(id)?.push_str(" Smith");
    ///
    /// assert_eq!(*pool.get(id)?, "Alice Smith");
    /// # Ok(())
    /// # }
    /// ```
    ///
    /// # Errors
    ///
    /// Fails with [`PoolError::BadId`] when the identifier does not reference a slot of
    /// this pool, and with [`PoolError::UseAfterFree`] when the slot no longer holds an
    /// item.
    pub fn get_mut(&mut self, id: SlotId) -> Result<&mut T> {
        let capacity = self.slots.len();

        match self.slots.get_mut(id.index()) {
            Some(Slot::Live { value }) => Ok(value),
            Some(Slot::Free { .. }) => Err(PoolError::use_after_free(id)),
            None => Err(PoolError::bad_id(id, capacity)),
        }
    }

    /// Whether the identifier currently resolves to an item in this pool.
    #[must_use]
    pub fn contains(&self, id: SlotId) -> bool {
        matches!(self.slots.get(id.index()), Some(Slot::Live { .. }))
    }

    /// The number of items in the pool.
    #[must_use]
    #[cfg_attr(test, mutants::skip)] // Can be mutated to infinitely growing memory use.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the pool holds no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The number of slots in the pool storage, occupied or not.
    ///
    /// Capacity never decreases; a pool that grew to fit a burst of items keeps its
    /// storage after they are removed.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Ensures the pool can accept at least `additional` more items without growing.
    ///
    /// A single burst-sized reservation is cheaper than letting a burst of inserts
    /// trigger several doublings in a row.
    ///
    /// # Errors
    ///
    /// Fails with [`PoolError::BadCapacity`] when the resulting storage would not be
    /// representable, and with [`PoolError::Allocation`] when the allocator refuses the
    /// request. The pool is unchanged in both cases.
    #[cfg_attr(test, mutants::skip)] // Can be mutated to infinitely growing memory use.
    pub fn reserve(&mut self, additional: usize) -> Result<()> {
        let vacant = self
            .capacity()
            .checked_sub(self.len)
            .expect("occupied count never exceeds capacity");

        if vacant >= additional {
            return Ok(());
        }

        let shortfall = additional
            .checked_sub(vacant)
            .expect("guarded by the early return above");

        // Grow by at least the current capacity so that mixing reserve with insert
        // keeps the same amortized doubling as plain inserts.
        self.grow(shortfall.max(self.capacity()))
    }

    /// Iterates over every slot of the pool in index order, vacant slots included.
    ///
    /// Occupied slots expose their item and vacant slots expose their free chain link.
    /// This is the raw-storage view that diagnostic renderers consume; for the items
    /// alone, use [`iter()`][Self::iter].
    pub fn slots(&self) -> impl Iterator<Item = (SlotId, SlotView<'_, T>)> {
        self.slots
            .iter()
            .enumerate()
            .map(|(index, slot)| (SlotId::new(index), slot.view()))
    }

    /// Iterates over the items of the pool in slot index order, with their identifiers.
    ///
    /// # Example
    ///
    /// ```
    /// use slot_pool::SlotPool;
    ///
    /// # fn main() -> Result<(), slot_pool::PoolError> {
    /// let mut pool = SlotPool::new();
    /// pool.insert('a')?;
    /// pool.insert('b')?;
    ///
    /// let items: Vec<char> = pool.iter().map(|(_, item)| *item).collect();
    /// assert_eq!(items, ['a', 'b']);
    /// # Ok(())
    /// # }
    /// ```
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            inner: self.slots.iter().enumerate(),
        }
    }

    /// Iterates over the vacant slots in chain order, starting at the chain head.
    ///
    /// This is the order in which [`insert()`][Self::insert] will consume the slots.
    pub fn free_chain(&self) -> impl Iterator<Item = SlotId> {
        iter::successors(self.free_head, |id| match self.slots.get(id.index()) {
            Some(Slot::Free { next_free }) => *next_free,
            _ => None,
        })
    }

    /// Writes the free chain to `output` as `(id)->(id)->` text, ending with a newline.
    ///
    /// The chain head is leftmost. An exhausted chain produces only the newline.
    ///
    /// # Errors
    ///
    /// Propagates any failure of the output sink.
    pub fn write_free_chain(&self, output: &mut impl io::Write) -> io::Result<()> {
        for id in self.free_chain() {
            write!(output, "({id})->")?;
        }

        writeln!(output)
    }

    /// Whether pool storage of `capacity` slots has a representable byte size.
    ///
    /// Allocations may not exceed `isize::MAX` bytes. A capacity beyond that limit can
    /// never be satisfied, which is a different failure from the allocator refusing a
    /// representable request.
    fn byte_size_representable(capacity: usize) -> bool {
        let max_bytes = usize::try_from(isize::MAX).expect("isize::MAX is a positive constant");

        capacity
            .checked_mul(size_of::<Slot<T>>())
            .is_some_and(|bytes| bytes <= max_bytes)
    }

    /// Grows the storage by `additional` slots.
    ///
    /// The fresh slots take the front of the free chain, linked among themselves in
    /// ascending index order, and any surviving chain is linked after them. Nothing
    /// that was vacant before the growth ever becomes unreachable.
    #[cfg_attr(test, mutants::skip)] // Can be mutated to infinitely growing memory use.
    fn grow(&mut self, additional: usize) -> Result<()> {
        debug_assert!(additional > 0, "growth must add at least one slot");

        let old_capacity = self.capacity();
        let new_capacity = old_capacity
            .checked_add(additional)
            .filter(|&total| Self::byte_size_representable(total))
            .ok_or_else(|| PoolError::bad_capacity(old_capacity.saturating_add(additional)))?;

        self.slots.try_reserve_exact(additional)?;

        let survivors = self.free_head;
        chain_onto(&mut self.slots, additional, survivors);
        self.free_head = Some(SlotId::new(old_capacity));

        debug_assert_eq!(self.capacity(), new_capacity);

        Ok(())
    }

    #[cfg(debug_assertions)]
    #[cfg_attr(test, mutants::skip)] // This is essentially test logic, mutation is meaningless.
    pub(crate) fn integrity_check(&self) {
        let capacity = self.slots.len();

        let mut chain_visited = vec![false; capacity];
        let mut chain_len = 0_usize;

        let mut cursor = self.free_head;

        while let Some(id) = cursor {
            assert!(
                id.index() < capacity,
                "free chain link {id} is out of bounds for capacity {capacity}"
            );

            let visited = chain_visited
                .get_mut(id.index())
                .expect("guarded by the bounds assert above");
            assert!(!*visited, "free chain visits slot {id} more than once");
            *visited = true;

            chain_len = chain_len
                .checked_add(1)
                .expect("chain length is bounded by capacity, which fits in usize");

            cursor = match self.slots.get(id.index()) {
                Some(Slot::Free { next_free }) => *next_free,
                Some(Slot::Live { .. }) => {
                    panic!("free chain link {id} references an occupied slot")
                }
                None => unreachable!("guarded by the bounds assert above"),
            };
        }

        let mut vacant_count = 0_usize;

        for (index, slot) in self.slots.iter().enumerate() {
            if matches!(slot, Slot::Free { .. }) {
                assert!(
                    *chain_visited.get(index).expect("guarded by loop range"),
                    "vacant slot {index} is not reachable through the free chain"
                );

                vacant_count = vacant_count
                    .checked_add(1)
                    .expect("vacant count is bounded by capacity, which fits in usize");
            }
        }

        assert!(
            chain_len == vacant_count,
            "free chain length {chain_len} disagrees with vacant slot count {vacant_count}"
        );

        let expected_len = capacity
            .checked_sub(vacant_count)
            .expect("vacant count cannot exceed capacity");
        assert!(
            self.len == expected_len,
            "occupied count {} disagrees with storage contents {expected_len}",
            self.len
        );
    }
}

impl<T> Default for SlotPool<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// A pending insertion into a [`SlotPool`].
///
/// Created by [`SlotPool::begin_insert()`], which has already picked the slot the item
/// will occupy. Read the slot via [`id()`][Self::id], then either complete the
/// insertion with [`insert()`][Self::insert] or drop the inserter to abandon it.
#[derive(Debug)]
pub struct Inserter<'p, T> {
    pool: &'p mut SlotPool<T>,
    id: SlotId,
}

impl<T> Inserter<'_, T> {
    /// The identifier of the slot the item will occupy once inserted.
    #[must_use]
    pub fn id(&self) -> SlotId {
        self.id
    }

    /// Inserts the item, consuming the inserter and returning the identifier it
    /// promised.
    pub fn insert(self, value: T) -> SlotId {
        let slot = self
            .pool
            .slots
            .get_mut(self.id.index())
            .expect("free chain links always stay within pool storage");

        let next_free = match slot {
            Slot::Free { next_free } => *next_free,
            Slot::Live { .. } => panic!("free chain head {} references an occupied slot", self.id),
        };

        *slot = Slot::Live { value };
        self.pool.free_head = next_free;
        self.pool.len = self
            .pool
            .len
            .checked_add(1)
            .expect("occupied count is bounded by capacity, which fits in usize");

        self.id
    }
}

/// Appends `additional` vacant slots to `slots`, chained to each other in ascending
/// index order, with the final fresh slot linking to `tail`.
fn chain_onto<T>(slots: &mut Vec<Slot<T>>, additional: usize, tail: Option<SlotId>) {
    let start = slots.len();
    let end = start
        .checked_add(additional)
        .expect("callers validate the total capacity before extending storage");

    slots.extend((start..end).map(|index| Slot::Free {
        next_free: index
            .checked_add(1)
            .filter(|&next| next < end)
            .map(SlotId::new)
            .or(tail),
    }));
}

/// Iterator over the items of a [`SlotPool`], in slot index order.
///
/// Created by [`SlotPool::iter()`].
#[derive(Debug)]
pub struct Iter<'p, T> {
    inner: iter::Enumerate<slice::Iter<'p, Slot<T>>>,
}

impl<'p, T> Iterator for Iter<'p, T> {
    type Item = (SlotId, &'p T);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (index, slot) = self.inner.next()?;

            if let Slot::Live { value } = slot {
                return Some((SlotId::new(index), value));
            }
        }
    }
}

impl<'p, T> IntoIterator for &'p SlotPool<T> {
    type Item = (SlotId, &'p T);
    type IntoIter = Iter<'p, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::fmt::Debug;
    use std::rc::Rc;

    use static_assertions::assert_impl_all;

    use super::*;

    assert_impl_all!(SlotPool<String>: Send, Sync, Debug);

    #[test]
    fn smoke_test() {
        let mut pool = SlotPool::new();

        let a = pool.insert(42).unwrap();
        let b = pool.insert(43).unwrap();
        let c = pool.insert(44).unwrap();

        assert_eq!(pool.len(), 3);
        assert_eq!(*pool.get(a).unwrap(), 42);
        assert_eq!(*pool.get(b).unwrap(), 43);
        assert_eq!(*pool.get(c).unwrap(), 44);

        assert_eq!(pool.remove(b).unwrap(), 43);
        assert_eq!(pool.len(), 2);

        let d = pool.insert(45).unwrap();

        assert_eq!(*pool.get(a).unwrap(), 42);
        assert_eq!(*pool.get(c).unwrap(), 44);
        assert_eq!(*pool.get(d).unwrap(), 45);
    }

    #[test]
    fn new_pool_has_default_capacity() {
        let pool = SlotPool::<usize>::new();

        assert_eq!(pool.capacity(), SlotPool::<usize>::DEFAULT_CAPACITY);
        assert_eq!(pool.len(), 0);
        assert!(pool.is_empty());
    }

    #[test]
    fn with_capacity_zero_selects_default() {
        let pool = SlotPool::<usize>::with_capacity(0).unwrap();

        assert_eq!(pool.capacity(), SlotPool::<usize>::DEFAULT_CAPACITY);
    }

    #[test]
    fn with_capacity_honors_request() {
        let pool = SlotPool::<usize>::with_capacity(17).unwrap();

        assert_eq!(pool.capacity(), 17);
        assert!(pool.is_empty());
    }

    #[test]
    fn absurd_capacity_is_rejected() {
        let result = SlotPool::<u64>::with_capacity(usize::MAX);

        assert!(matches!(
            result,
            Err(PoolError::BadCapacity {
                capacity: usize::MAX
            })
        ));
    }

    #[test]
    fn fresh_pool_hands_out_ascending_ids() {
        let mut pool = SlotPool::with_capacity(4).unwrap();

        for expected in 0..4 {
            let id = pool.insert(expected).unwrap();
            assert_eq!(id.index(), expected);
        }
    }

    #[test]
    fn grows_by_doubling_when_full() {
        let mut pool = SlotPool::new();

        let a = pool.insert("a").unwrap();
        let b = pool.insert("b").unwrap();
        assert_eq!(pool.capacity(), 2);

        let c = pool.insert("c").unwrap();
        assert_eq!(pool.capacity(), 4);

        // Growth relocates storage but identifiers keep resolving.
        assert_eq!(*pool.get(a).unwrap(), "a");
        assert_eq!(*pool.get(b).unwrap(), "b");
        assert_eq!(*pool.get(c).unwrap(), "c");
    }

    #[test]
    fn freed_slot_is_reused_first() {
        let mut pool = SlotPool::with_capacity(4).unwrap();

        let a = pool.insert(1).unwrap();
        let _b = pool.insert(2).unwrap();

        pool.remove(a).unwrap();

        // The most recently freed slot sits at the head of the chain.
        let c = pool.insert(3).unwrap();
        assert_eq!(c, a);
    }

    #[test]
    fn inserter_exposes_id_before_insert() {
        let mut pool = SlotPool::with_capacity(4).unwrap();

        let inserter = pool.begin_insert().unwrap();
        let promised = inserter.id();
        let id = inserter.insert(promised.index());

        assert_eq!(id, promised);
        assert_eq!(*pool.get(id).unwrap(), promised.index());
    }

    #[test]
    fn abandoned_inserter_leaves_pool_unchanged() {
        let mut pool = SlotPool::<usize>::with_capacity(4).unwrap();

        let inserter = pool.begin_insert().unwrap();
        let promised = inserter.id();
        drop(inserter);

        assert_eq!(pool.len(), 0);

        // The slot was never taken off the free chain.
        assert_eq!(pool.insert(7).unwrap(), promised);
    }

    #[test]
    fn growth_links_fresh_slots_ahead_of_survivors() {
        let mut pool = SlotPool::with_capacity(2).unwrap();

        // Occupy slot 0, leaving slot 1 as the only chain entry.
        _ = pool.insert("x").unwrap();

        // Vacant (1) < requested (3), so this grows by the current capacity.
        pool.reserve(3).unwrap();
        assert_eq!(pool.capacity(), 4);

        let chain: Vec<usize> = pool.free_chain().map(SlotId::index).collect();
        assert_eq!(chain, [2, 3, 1]);
    }

    #[test]
    fn remove_of_out_of_bounds_id_fails() {
        let mut pool = SlotPool::<u32>::new();
        let id = pool.insert(5).unwrap();

        // Grow a second pool to mint an id beyond the first pool's bounds.
        let mut other = SlotPool::with_capacity(8).unwrap();
        for value in 0..4 {
            _ = other.insert(value).unwrap();
        }
        let far = other.insert(4).unwrap();

        assert!(matches!(
            pool.remove(far),
            Err(PoolError::BadId { capacity: 2, .. })
        ));

        // The first pool's item is untouched.
        assert_eq!(*pool.get(id).unwrap(), 5);
    }

    #[test]
    fn get_after_remove_fails() {
        let mut pool = SlotPool::new();

        let id = pool.insert(7).unwrap();
        pool.remove(id).unwrap();

        assert!(matches!(pool.get(id), Err(PoolError::UseAfterFree { .. })));
        assert!(matches!(
            pool.get_mut(id),
            Err(PoolError::UseAfterFree { .. })
        ));
    }

    #[test]
    fn double_remove_fails() {
        let mut pool = SlotPool::new();

        let id = pool.insert(7).unwrap();
        pool.remove(id).unwrap();

        assert!(matches!(
            pool.remove(id),
            Err(PoolError::DoubleFree { .. })
        ));
        assert!(pool.is_empty());
    }

    #[test]
    fn contains_reflects_liveness() {
        let mut pool = SlotPool::new();

        let id = pool.insert(7).unwrap();
        assert!(pool.contains(id));

        pool.remove(id).unwrap();
        assert!(!pool.contains(id));
    }

    #[test]
    fn iter_yields_live_slots_in_index_order() {
        let mut pool = SlotPool::with_capacity(4).unwrap();

        let a = pool.insert('a').unwrap();
        let b = pool.insert('b').unwrap();
        let c = pool.insert('c').unwrap();
        pool.remove(b).unwrap();

        let items: Vec<(SlotId, char)> = pool.iter().map(|(id, item)| (id, *item)).collect();
        assert_eq!(items, [(a, 'a'), (c, 'c')]);

        // The reference iterator matches.
        let via_into_iter: Vec<(SlotId, char)> =
            (&pool).into_iter().map(|(id, item)| (id, *item)).collect();
        assert_eq!(via_into_iter, items);
    }

    #[test]
    fn slots_exposes_chain_links_of_vacant_slots() {
        let pool = SlotPool::<usize>::with_capacity(3).unwrap();

        let views: Vec<Option<usize>> = pool
            .slots()
            .map(|(_, view)| match view {
                SlotView::Free { next_free } => next_free.map(SlotId::index),
                _ => panic!("fresh pool has no occupied slots"),
            })
            .collect();

        assert_eq!(views, [Some(1), Some(2), None]);
    }

    #[test]
    fn free_chain_of_fresh_pool_is_ascending() {
        let pool = SlotPool::<usize>::with_capacity(3).unwrap();

        let chain: Vec<usize> = pool.free_chain().map(SlotId::index).collect();
        assert_eq!(chain, [0, 1, 2]);
    }

    #[test]
    fn free_chain_is_empty_when_pool_is_full() {
        let mut pool = SlotPool::with_capacity(2).unwrap();
        _ = pool.insert(1).unwrap();
        _ = pool.insert(2).unwrap();

        assert_eq!(pool.free_chain().count(), 0);
    }

    #[test]
    fn write_free_chain_uses_arrow_format() {
        let pool = SlotPool::<usize>::with_capacity(3).unwrap();

        let mut output = Vec::new();
        pool.write_free_chain(&mut output).unwrap();

        assert_eq!(String::from_utf8(output).unwrap(), "(0)->(1)->(2)->\n");
    }

    #[test]
    fn write_free_chain_of_full_pool_is_bare_newline() {
        let mut pool = SlotPool::with_capacity(2).unwrap();
        _ = pool.insert(1).unwrap();
        _ = pool.insert(2).unwrap();

        let mut output = Vec::new();
        pool.write_free_chain(&mut output).unwrap();

        assert_eq!(String::from_utf8(output).unwrap(), "\n");
    }

    #[test]
    fn reserve_within_existing_capacity_is_noop() {
        let mut pool = SlotPool::<usize>::with_capacity(8).unwrap();

        pool.reserve(8).unwrap();
        assert_eq!(pool.capacity(), 8);
    }

    #[test]
    fn reserve_makes_room_for_burst() {
        let mut pool = SlotPool::with_capacity(2).unwrap();
        _ = pool.insert(0).unwrap();

        pool.reserve(10).unwrap();
        let reserved_capacity = pool.capacity();
        assert!(reserved_capacity >= 11);

        // The burst fits without further growth.
        for value in 0..10 {
            _ = pool.insert(value).unwrap();
        }
        assert_eq!(pool.capacity(), reserved_capacity);
    }

    #[test]
    fn calls_drop_on_remove() {
        struct Countdown {
            drops: Rc<Cell<usize>>,
        }

        impl Drop for Countdown {
            fn drop(&mut self) {
                self.drops.set(self.drops.get() + 1);
            }
        }

        let drops = Rc::new(Cell::new(0));
        let mut pool = SlotPool::new();

        let id = pool
            .insert(Countdown {
                drops: Rc::clone(&drops),
            })
            .unwrap();

        assert_eq!(drops.get(), 0);

        drop(pool.remove(id).unwrap());
        assert_eq!(drops.get(), 1);
    }

    #[test]
    fn drops_remaining_items_with_pool() {
        struct Countdown {
            drops: Rc<Cell<usize>>,
        }

        impl Drop for Countdown {
            fn drop(&mut self) {
                self.drops.set(self.drops.get() + 1);
            }
        }

        let drops = Rc::new(Cell::new(0));

        {
            let mut pool = SlotPool::new();
            for _ in 0..3 {
                _ = pool
                    .insert(Countdown {
                        drops: Rc::clone(&drops),
                    })
                    .unwrap();
            }
        }

        assert_eq!(drops.get(), 3);
    }

    #[test]
    fn default_matches_new() {
        let pool = SlotPool::<usize>::default();

        assert_eq!(pool.capacity(), SlotPool::<usize>::DEFAULT_CAPACITY);
        assert!(pool.is_empty());
    }
}
