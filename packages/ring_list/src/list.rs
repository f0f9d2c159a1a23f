use std::mem;

use slot_pool::{PoolError, SlotId, SlotPool};

use crate::{ListError, Node, Result};

/// A doubly linked list stored in a [`SlotPool`], closed into a ring by one permanent
/// anchor node.
///
/// Every node lives in a pool slot and addresses its neighbors by [`SlotId`], so the
/// list can be inspected, rendered and rebuilt without chasing memory addresses. The
/// anchor carries no element; it exists so that the ring is never empty and link
/// surgery needs no head or tail special cases. The first element follows the anchor
/// and the last element precedes it.
///
/// Elements are addressed either by the identifier returned at insertion, which
/// resolves in O(1), or by zero-based position, which costs a walk from the anchor.
/// Identifiers stay valid across growth and across removal of other elements. After
/// heavy churn the identifiers scatter; [`linearize()`][Self::linearize] rebuilds the
/// backing pool in traversal order to make them contiguous again.
///
/// # Example
///
/// ```
/// use ring_list::RingList;
///
/// # fn main() -> Result<(), ring_list::ListError> {
/// let mut list = RingList::new();
///
/// let red = list.push_back("red")?;
/// list.push_back("green")?;
/// list.insert_after(red, "yellow")?;
///
/// let colors: Vec<&str> = list.iter().copied().collect();
/// assert_eq!(colors, ["red", "yellow", "green"]);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct RingList<T> {
    /// Backing storage. Holds the anchor node plus one node per element.
    pool: SlotPool<Node<T>>,

    /// Identifier of the anchor node. The anchor is created together with the list
    /// and is never removed or replaced while the list exists.
    anchor: SlotId,

    /// Number of elements. The anchor does not count.
    len: usize,
}

impl<T> RingList<T>
where
    T: Default,
{
    /// Creates a list with room for one element before the backing pool first grows.
    ///
    /// The anchor node is created immediately and carries a default value in its
    /// unused data field, which is why `T: Default` is required.
    ///
    /// # Panics
    ///
    /// Panics if storage for the smallest possible list cannot be allocated. Use
    /// [`with_capacity()`][Self::with_capacity] to handle allocation failure as a
    /// result value.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(1)
            .expect("allocating the smallest possible list failed; treating that as fatal")
    }

    /// Creates a list with room for `capacity` elements before the backing pool first
    /// grows.
    ///
    /// The backing pool is sized one slot larger than `capacity` because the anchor
    /// node occupies a slot of its own.
    ///
    /// # Errors
    ///
    /// Fails with [`PoolError::BadCapacity`] when the byte size of the requested
    /// storage is not representable, and with [`PoolError::Allocation`] when the
    /// allocator refuses the request.
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        // Saturation turns an unrepresentable capacity request over to the pool,
        // which rejects it as oversized.
        let mut pool = SlotPool::with_capacity(capacity.saturating_add(1))?;
        let anchor = insert_self_linked(&mut pool, T::default());

        Ok(Self {
            pool,
            anchor,
            len: 0,
        })
    }
}

impl<T> RingList<T> {
    /// The identifier of the anchor node.
    ///
    /// The anchor is a valid insertion point ([`insert_after()`][Self::insert_after]
    /// with the anchor prepends) and a valid navigation origin, but it is not an
    /// element: removal and data access reject it.
    #[must_use]
    pub fn anchor(&self) -> SlotId {
        self.anchor
    }

    /// Number of elements in the list.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the list contains no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of elements the list can hold before the backing pool grows.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.pool
            .capacity()
            .checked_sub(1)
            .expect("the pool always holds at least the anchor node")
    }

    /// The pool backing this list.
    ///
    /// Every occupied slot holds either the anchor or an element node; the vacant
    /// slots form the pool's free chain. This is the raw storage view that
    /// [`write_pool_graphviz()`][Self::write_pool_graphviz] renders.
    #[must_use]
    pub fn pool(&self) -> &SlotPool<Node<T>> {
        &self.pool
    }

    /// Resolves an identifier to its node, exposing the element data and ring links.
    ///
    /// The anchor resolves too; use [`RingList::anchor()`] to recognize it.
    ///
    /// # Errors
    ///
    /// Fails with [`ListError::BadId`] when `id` does not reference a node of this
    /// list.
    pub fn node(&self, id: SlotId) -> Result<&Node<T>> {
        self.pool
            .get(id)
            .map_err(|source| ListError::bad_id(id, Some(source)))
    }

    /// Resolves a zero-based position to its node.
    ///
    /// Position 0 is the node following the anchor. The walk costs O(`pos`).
    ///
    /// # Example
    ///
    /// ```
    /// use ring_list::RingList;
    ///
    /// # fn main() -> Result<(), ring_list::ListError> {
    /// let list: RingList<i32> = (10..=30).step_by(10).collect();
    ///
    /// assert_eq!(*list.node_at(1)?.data(), 20);
    /// assert!(list.node_at(3).is_err());
    /// # Ok(())
    /// # }
    /// ```
    ///
    /// # Errors
    ///
    /// Fails with [`ListError::BadPos`] when `pos >= len()`.
    pub fn node_at(&self, pos: usize) -> Result<&Node<T>> {
        if pos >= self.len {
            return Err(ListError::bad_pos(pos, self.len));
        }

        let hops = pos
            .checked_add(1)
            .expect("the bounds check above keeps pos below the element count");
        let id = self.walk_from_anchor(hops)?;

        self.pool
            .get(id)
            .map_err(|source| ListError::bad_node_pointer(id, source))
    }

    /// The identifier of the node following `id` in the ring.
    ///
    /// Following `next` repeatedly cycles through every element and the anchor.
    ///
    /// # Errors
    ///
    /// Fails with [`ListError::BadId`] when `id` does not reference a node of this
    /// list.
    pub fn next_of(&self, id: SlotId) -> Result<SlotId> {
        self.node(id).map(Node::next)
    }

    /// The identifier of the node preceding `id` in the ring.
    ///
    /// # Errors
    ///
    /// Fails with [`ListError::BadId`] when `id` does not reference a node of this
    /// list.
    pub fn prev_of(&self, id: SlotId) -> Result<SlotId> {
        self.node(id).map(Node::prev)
    }

    /// A mutable reference to the element data of the node `id`.
    ///
    /// # Errors
    ///
    /// Fails with [`ListError::BadId`] when `id` is the anchor or does not reference
    /// a node of this list.
    pub fn data_mut(&mut self, id: SlotId) -> Result<&mut T> {
        if id == self.anchor {
            return Err(ListError::bad_id(id, None));
        }

        self.pool
            .get_mut(id)
            .map(|node| &mut node.data)
            .map_err(|source| ListError::bad_id(id, Some(source)))
    }

    /// A reference to the first element, if any.
    #[must_use]
    pub fn front(&self) -> Option<&T> {
        if self.is_empty() {
            return None;
        }

        Some(
            self.node_at(0)
                .map(Node::data)
                .expect("a non-empty intact ring always has an element at position 0"),
        )
    }

    /// A reference to the last element, if any.
    #[must_use]
    pub fn back(&self) -> Option<&T> {
        let last = self.len.checked_sub(1)?;

        Some(
            self.node_at(last)
                .map(Node::data)
                .expect("a non-empty intact ring always has an element at its final position"),
        )
    }

    /// Inserts an element immediately after the node `after`, returning the new
    /// element's identifier.
    ///
    /// Inserting after the anchor prepends; inserting after the last element appends.
    /// The backing pool grows by doubling when it is full, which leaves every
    /// existing identifier valid.
    ///
    /// # Example
    ///
    /// ```
    /// use ring_list::RingList;
    ///
    /// # fn main() -> Result<(), ring_list::ListError> {
    /// let mut list = RingList::new();
    ///
    /// let first = list.insert_after(list.anchor(), 1)?;
    /// list.insert_after(first, 2)?;
    ///
    /// let items: Vec<i32> = list.iter().copied().collect();
    /// assert_eq!(items, [1, 2]);
    /// # Ok(())
    /// # }
    /// ```
    ///
    /// # Errors
    ///
    /// Fails with [`ListError::BadId`] when `after` does not reference a node of this
    /// list, and with [`ListError::Pool`] when the backing pool is full and growing
    /// it fails. The element is dropped in the failure case.
    pub fn insert_after(&mut self, after: SlotId, data: T) -> Result<SlotId> {
        #[cfg(debug_assertions)]
        self.integrity_check();

        let next = self
            .pool
            .get(after)
            .map(|node| node.next)
            .map_err(|source| ListError::bad_id(after, Some(source)))?;

        // Resolving the successor up front keeps the ring untouched if it turns out
        // to be damaged.
        _ = self
            .pool
            .get(next)
            .map_err(|source| ListError::bad_node_pointer(next, source))?;

        let inserter = self.pool.begin_insert()?;
        let id = inserter.id();
        _ = inserter.insert(Node {
            data,
            next,
            prev: after,
            id,
        });

        self.pool
            .get_mut(after)
            .expect("resolved above and unaffected by the insertion")
            .next = id;
        self.pool
            .get_mut(next)
            .expect("resolved above and unaffected by the insertion")
            .prev = id;

        self.len = self
            .len
            .checked_add(1)
            .expect("element count is bounded by pool capacity, which fits in usize");

        Ok(id)
    }

    /// Inserts an element at a zero-based position, returning its identifier.
    ///
    /// Position 0 prepends and position [`len()`][Self::len] appends; position `pos`
    /// makes the new element the one reported by
    /// [`node_at(pos)`][Self::node_at]. The walk to the insertion point costs
    /// O(`pos`).
    ///
    /// # Errors
    ///
    /// Fails with [`ListError::BadPos`] when `pos > len()`, and with
    /// [`ListError::Pool`] when the backing pool is full and growing it fails.
    pub fn insert_at(&mut self, pos: usize, data: T) -> Result<SlotId> {
        if pos > self.len {
            return Err(ListError::bad_pos(pos, self.len));
        }

        let after = self.walk_from_anchor(pos)?;

        self.insert_after(after, data)
    }

    /// Removes the element `id` from the list, returning its data.
    ///
    /// The neighbors are relinked to each other and the node's slot returns to the
    /// pool's free chain, making `id` stale. Identifiers of other elements are
    /// unaffected.
    ///
    /// # Errors
    ///
    /// Fails with [`ListError::BadId`] when `id` is the anchor, is stale or does not
    /// reference a node of this list.
    pub fn remove(&mut self, id: SlotId) -> Result<T> {
        #[cfg(debug_assertions)]
        self.integrity_check();

        if id == self.anchor {
            return Err(ListError::bad_id(id, None));
        }

        let (prev, next) = self
            .pool
            .get(id)
            .map(|node| (node.prev, node.next))
            .map_err(|source| ListError::bad_id(id, Some(source)))?;

        // Both neighbors must resolve before either link is rewritten.
        _ = self
            .pool
            .get(prev)
            .map_err(|source| ListError::bad_node_pointer(prev, source))?;
        _ = self
            .pool
            .get(next)
            .map_err(|source| ListError::bad_node_pointer(next, source))?;

        self.pool
            .get_mut(prev)
            .expect("resolved above; nothing has moved since")
            .next = next;
        self.pool
            .get_mut(next)
            .expect("resolved above; nothing has moved since")
            .prev = prev;

        let node = self
            .pool
            .remove(id)
            .expect("resolved above, so the pool must hold it");

        self.len = self
            .len
            .checked_sub(1)
            .expect("an element was just removed, so the count cannot be zero");

        Ok(node.into_data())
    }

    /// Removes the element at a zero-based position, returning its data.
    ///
    /// The walk to the element costs O(`pos`). This is the inverse of
    /// [`insert_at()`][Self::insert_at]: inserting at `pos` and then removing at
    /// `pos` returns the list to its previous shape.
    ///
    /// # Errors
    ///
    /// Fails with [`ListError::BadPos`] when `pos >= len()`.
    pub fn remove_at(&mut self, pos: usize) -> Result<T> {
        if pos >= self.len {
            return Err(ListError::bad_pos(pos, self.len));
        }

        let hops = pos
            .checked_add(1)
            .expect("the bounds check above keeps pos below the element count");
        let id = self.walk_from_anchor(hops)?;

        self.remove(id)
    }

    /// Inserts an element at the front of the list, returning its identifier.
    ///
    /// # Errors
    ///
    /// Fails with [`ListError::Pool`] when the backing pool is full and growing it
    /// fails.
    pub fn push_front(&mut self, data: T) -> Result<SlotId> {
        self.insert_after(self.anchor, data)
    }

    /// Inserts an element at the back of the list, returning its identifier.
    ///
    /// # Errors
    ///
    /// Fails with [`ListError::Pool`] when the backing pool is full and growing it
    /// fails.
    pub fn push_back(&mut self, data: T) -> Result<SlotId> {
        let last = self
            .pool
            .get(self.anchor)
            .map(|node| node.prev)
            .map_err(|source| ListError::bad_node_pointer(self.anchor, source))?;

        self.insert_after(last, data)
    }

    /// Removes and returns the first element, or `None` if the list is empty.
    pub fn pop_front(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }

        Some(
            self.remove_at(0)
                .expect("a non-empty intact ring always has an element at position 0"),
        )
    }

    /// Removes and returns the last element, or `None` if the list is empty.
    pub fn pop_back(&mut self) -> Option<T> {
        let last = self.len.checked_sub(1)?;

        Some(
            self.remove_at(last)
                .expect("a non-empty intact ring always has an element at its final position"),
        )
    }

    /// Iterates over references to the elements, in ring order from the anchor.
    pub fn iter(&self) -> Iter<'_, T> {
        let first = self
            .pool
            .get(self.anchor)
            .map(|node| node.next)
            .expect("the anchor node lives for as long as the list itself");

        Iter {
            list: self,
            cursor: first,
            remaining: self.len,
        }
    }

    /// Rebuilds the backing pool so that identifiers run contiguously in traversal
    /// order.
    ///
    /// After linearizing, the anchor holds identifier 0 and the element at position
    /// `pos` holds identifier `pos + 1`. Traversal order and element data are
    /// unchanged, but all previously returned identifiers go stale. The new pool has
    /// the same capacity as the old one, so the operation is also a defragmentation
    /// of the free chain. Linearizing an already linear list is a no-op apart from
    /// the identifier invalidation.
    ///
    /// # Example
    ///
    /// ```
    /// use ring_list::RingList;
    ///
    /// # fn main() -> Result<(), ring_list::ListError> {
    /// let mut list: RingList<i32> = (1..=3).collect();
    ///
    /// // Churn scatters the identifiers.
    /// let id = list.push_front(0)?;
    /// list.remove(id)?;
    ///
    /// list.linearize()?;
    ///
    /// let items: Vec<i32> = list.iter().copied().collect();
    /// assert_eq!(items, [1, 2, 3]);
    /// assert_eq!(list.node_at(0)?.id().index(), 1);
    /// assert_eq!(list.node_at(2)?.id().index(), 3);
    /// # Ok(())
    /// # }
    /// ```
    ///
    /// # Errors
    ///
    /// Fails with [`ListError::Pool`] when storage for the rebuilt pool cannot be
    /// allocated. The list is left unchanged in that case; the old storage is only
    /// released once the rebuild has completed.
    pub fn linearize(&mut self) -> Result<()> {
        #[cfg(debug_assertions)]
        self.integrity_check();

        // Pass one: record the ring order. Nothing is modified, so failing here
        // leaves the list fully usable.
        let mut order = Vec::new();
        order.try_reserve_exact(self.len).map_err(PoolError::from)?;

        let mut cursor = self
            .pool
            .get(self.anchor)
            .map(|node| node.next)
            .map_err(|source| ListError::bad_node_pointer(self.anchor, source))?;

        for _ in 0..self.len {
            let node = self
                .pool
                .get(cursor)
                .map_err(|source| ListError::bad_node_pointer(cursor, source))?;

            order.push(node.id);
            cursor = node.next;
        }

        // Pass two: move every node into a fresh pool, in ring order. Allocating the
        // fresh pool is the last fallible step.
        let fresh = SlotPool::with_capacity(self.pool.capacity())?;
        let mut old = mem::replace(&mut self.pool, fresh);

        let anchor_data = old
            .remove(self.anchor)
            .expect("the anchor node lives for as long as the list itself")
            .into_data();
        self.anchor = insert_self_linked(&mut self.pool, anchor_data);

        let mut previous = self.anchor;
        for id in order {
            let data = old
                .remove(id)
                .expect("collected from the ring walk, where every id resolved")
                .into_data();
            let fresh_id = insert_self_linked(&mut self.pool, data);

            self.pool
                .get_mut(previous)
                .expect("just inserted into the fresh pool")
                .next = fresh_id;
            self.pool
                .get_mut(fresh_id)
                .expect("just inserted into the fresh pool")
                .prev = previous;

            previous = fresh_id;
        }

        self.pool
            .get_mut(previous)
            .expect("just inserted into the fresh pool")
            .next = self.anchor;
        self.pool
            .get_mut(self.anchor)
            .expect("the anchor is the first node of the fresh pool")
            .prev = previous;

        debug_assert_eq!(
            self.anchor.index(),
            0,
            "a fresh pool hands out identifier 0 first"
        );

        #[cfg(debug_assertions)]
        self.integrity_check();

        Ok(())
    }

    /// Follows `next` links from the anchor, `hops` times.
    fn walk_from_anchor(&self, hops: usize) -> Result<SlotId> {
        let mut cursor = self.anchor;

        for _ in 0..hops {
            cursor = self
                .pool
                .get(cursor)
                .map(|node| node.next)
                .map_err(|source| ListError::bad_node_pointer(cursor, source))?;
        }

        Ok(cursor)
    }

    #[cfg(debug_assertions)]
    #[cfg_attr(test, mutants::skip)] // This is essentially test logic, mutation is meaningless.
    fn integrity_check(&self) {
        let mut cursor = self.anchor;
        let mut steps: usize = 0;

        loop {
            let node = match self.pool.get(cursor) {
                Ok(node) => node,
                Err(error) => panic!("ring node {cursor} did not resolve: {error}"),
            };

            assert_eq!(
                node.id, cursor,
                "node in slot {cursor} believes it is {}",
                node.id
            );

            let next = match self.pool.get(node.next) {
                Ok(next) => next,
                Err(error) => panic!(
                    "ring link {cursor} -> {} did not resolve: {error}",
                    node.next
                ),
            };

            assert_eq!(
                next.prev, cursor,
                "asymmetric link: {cursor} -> {} is not mirrored",
                node.next
            );

            steps = steps
                .checked_add(1)
                .expect("ring length is bounded by pool capacity, which fits in usize");
            assert!(
                steps <= self.len.saturating_add(1),
                "ring traversal exceeded the recorded element count"
            );

            cursor = node.next;
            if cursor == self.anchor {
                break;
            }
        }

        assert_eq!(
            steps,
            self.len.saturating_add(1),
            "ring node count does not match the recorded element count"
        );
        assert_eq!(
            self.pool.len(),
            steps,
            "the pool holds occupied slots that are not part of the ring"
        );
    }
}

impl<T> Default for RingList<T>
where
    T: Default,
{
    fn default() -> Self {
        Self::new()
    }
}

/// Appends every item of the iterator to the back of the list.
///
/// # Panics
///
/// Panics if the backing pool is full and growing it fails.
impl<T> Extend<T> for RingList<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            _ = self
                .push_back(item)
                .expect("ran out of memory while extending the list; treating that as fatal");
        }
    }
}

impl<T> FromIterator<T> for RingList<T>
where
    T: Default,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Self::new();
        list.extend(iter);

        list
    }
}

/// Iterator over references to the elements of a [`RingList`], in ring order.
///
/// Created by [`RingList::iter()`].
#[derive(Debug)]
pub struct Iter<'l, T> {
    list: &'l RingList<T>,
    cursor: SlotId,
    remaining: usize,
}

impl<'l, T> Iterator for Iter<'l, T> {
    type Item = &'l T;

    fn next(&mut self) -> Option<Self::Item> {
        self.remaining = self.remaining.checked_sub(1)?;

        let node = self
            .list
            .pool
            .get(self.cursor)
            .expect("ring links visited within the element count always resolve");

        self.cursor = node.next;

        Some(&node.data)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<'l, T> IntoIterator for &'l RingList<T> {
    type Item = &'l T;
    type IntoIter = Iter<'l, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Inserts a node that links to itself in both directions, returning its identifier.
///
/// The caller is responsible for having sized the pool so that the insertion cannot
/// require growth that might fail.
fn insert_self_linked<T>(pool: &mut SlotPool<Node<T>>, data: T) -> SlotId {
    let inserter = pool
        .begin_insert()
        .expect("the pool was sized with room for this node");
    let id = inserter.id();

    inserter.insert(Node {
        data,
        next: id,
        prev: id,
        id,
    })
}
