//! Basic usage of the `ring_list` crate:
//!
//! * Creating a list.
//! * Inserting by identifier and by zero-based position.
//! * Navigating the ring.
//! * Removing items.

use std::error::Error;

use ring_list::RingList;

fn main() -> Result<(), Box<dyn Error>> {
    let mut list = RingList::new();

    // Every insertion hands back an identifier that stays valid until that
    // element is removed, no matter what happens to the rest of the list.
    let alpha = list.push_back("alpha".to_string())?;
    _ = list.push_back("gamma".to_string())?;
    let beta = list.insert_after(alpha, "beta".to_string())?;

    println!(
        "List contains {} items, with room for {} before the pool grows",
        list.len(),
        list.capacity()
    );

    // Positions are zero-based, counted from the element after the anchor.
    _ = list.insert_at(3, "delta".to_string())?;

    for (pos, item) in list.iter().enumerate() {
        println!("position {pos}: {item}");
    }

    // The ring wraps: following `next` past the last element reaches the anchor,
    // and the element after the anchor is the front again.
    let after_beta = list.next_of(beta)?;
    println!("after {beta} comes {}: {}", after_beta, list.node(after_beta)?.data());

    println!("removed by id: {}", list.remove(beta)?);
    println!("removed by position: {}", list.remove_at(0)?);

    // Items can be modified in place through their identifier.
    let gamma = list.node_at(0)?.id();
    list.data_mut(gamma)?.push_str(" ray");

    println!("final order: {:?}", list.iter().collect::<Vec<_>>());

    Ok(())
}
