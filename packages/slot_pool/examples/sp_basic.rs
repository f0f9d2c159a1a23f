//! Basic usage of the `slot_pool` crate:
//!
//! * Creating a pool.
//! * Adding items.
//! * Retrieving and modifying items.
//! * Removing items and inspecting the free chain.

use std::error::Error;
use std::io;

use slot_pool::SlotPool;

fn main() -> Result<(), Box<dyn Error>> {
    let mut pool = SlotPool::new();

    // Inserting an item yields an identifier that looks the item up later.
    let alice = pool.insert("Alice".to_string())?;
    let bob = pool.insert("Bob".to_string())?;
    let charlie = pool.insert("Charlie".to_string())?;

    println!(
        "Pool contains {} items in {} slots",
        pool.len(),
        pool.capacity()
    );

    println!("Retrieved item: {}", pool.get(alice)?);

    // Removing items pushes their slots onto the free chain, ready for reuse.
    pool.remove(bob)?;
    pool.remove(charlie)?;

    print!("Free chain after removals: ");
    pool.write_free_chain(&mut io::stdout().lock())?;

    // Items can also be modified in place.
    pool.get_mut(alice)?.push_str(" Smith");
    println!("Modified item: {}", pool.get(alice)?);

    Ok(())
}
