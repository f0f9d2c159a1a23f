//! A doubly linked list whose nodes live in a growable slot pool.
//!
//! [`RingList`] stores its nodes in a [`SlotPool`] instead of allocating each one
//! separately, and the nodes address each other by [`SlotId`]. One permanent anchor
//! node closes the list into a ring, which removes every head and tail special case
//! from the link surgery: the first element follows the anchor and the last element
//! precedes it.
//!
//! Elements are reachable two ways. The identifier returned at insertion resolves in
//! O(1) and stays valid until that element is removed, surviving both pool growth and
//! removal of other elements. A zero-based position resolves with an O(pos) walk from
//! the anchor. After heavy churn the identifiers scatter across the pool;
//! [`RingList::linearize()`] rebuilds the pool in traversal order so that they run
//! contiguously again.
//!
//! The list can render itself for inspection: [`RingList::write_dump()`] prints the
//! ring as text and [`RingList::write_graphviz()`] and
//! [`RingList::write_pool_graphviz()`] emit GraphViz digraphs of the logical ring and
//! of the raw slot storage.
//!
//! # Example
//!
//! ```
//! use ring_list::RingList;
//!
//! # fn main() -> Result<(), ring_list::ListError> {
//! let mut list = RingList::new();
//!
//! let red = list.push_back("red")?;
//! list.push_back("green")?;
//! list.insert_after(red, "yellow")?;
//!
//! let colors: Vec<&str> = list.iter().copied().collect();
//! assert_eq!(colors, ["red", "yellow", "green"]);
//!
//! // Elements can also be addressed by zero-based position.
//! assert_eq!(list.remove_at(1)?, "yellow");
//! # Ok(())
//! # }
//! ```

mod dump;
mod error;
mod list;
mod node;

pub use error::*;
pub use list::*;
pub use node::*;

pub use slot_pool::{PoolError, SlotId, SlotPool, SlotView};
