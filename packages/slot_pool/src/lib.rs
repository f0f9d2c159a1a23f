//! A growable object pool that hands out stable integer identifiers for its items.
//!
//! [`SlotPool`] stores items in a contiguous run of slots. Inserting an item yields a
//! [`SlotId`] that remains valid until that exact item is removed, no matter how many
//! other items come and go or how often the pool grows. Vacant slots are threaded into
//! an intrusive free chain, so insertion does not scan for space.
//!
//! Every slot is inspectable: [`SlotPool::slots()`] exposes the free chain links of
//! vacant slots alongside the values of occupied ones, which is what diagnostic tooling
//! built on top of this pool consumes.
//!
//! Stale identifiers are detected rather than trusted. A lookup through an identifier
//! whose slot has since been freed fails with [`PoolError::UseAfterFree`], and freeing
//! the same slot twice fails with [`PoolError::DoubleFree`].
//!
//! # Example
//!
//! ```
//! use slot_pool::SlotPool;
//!
//! # fn main() -> Result<(), slot_pool::PoolError> {
//! let mut pool = SlotPool::new();
//!
//! let alice = pool.insert("Alice")?;
//! let bob = pool.insert("Bob")?;
//!
//! assert_eq!(*pool.get(alice)?, "Alice");
//!
//! pool.remove(bob)?;
//!
//! // The identifier of the removed item no longer resolves.
//! assert!(pool.get(bob).is_err());
//! // Other identifiers are unaffected.
//! assert_eq!(*pool.get(alice)?, "Alice");
//! # Ok(())
//! # }
//! ```

mod error;
mod id;
mod pool;
mod slot;

pub use error::*;
pub use id::*;
pub use pool::*;
pub use slot::*;
