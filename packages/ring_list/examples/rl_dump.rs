//! Rendering a list through each diagnostic writer:
//!
//! * Plain-text ring dump.
//! * GraphViz digraph of the logical ring.
//! * GraphViz digraph of the raw slot storage, free chain included.
//!
//! Pipe the GraphViz sections through `dot -Tsvg` to draw them.

use std::error::Error;
use std::io::{self, Write};

use ring_list::RingList;

fn main() -> Result<(), Box<dyn Error>> {
    let mut list = RingList::new();

    // Build by position so that ring order and slot order diverge immediately.
    for (pos, value) in [(0, 200), (0, 100), (2, 600), (2, 500), (2, 400), (2, 300)] {
        _ = list.insert_at(pos, value)?;
    }

    let mut stdout = io::stdout().lock();

    writeln!(stdout, "freshly built:")?;
    list.write_dump(&mut stdout)?;

    // Removals hand their slots back to the pool, interleaving the free chain
    // with the ring.
    _ = list.remove_at(0)?;
    _ = list.remove_at(2)?;

    writeln!(stdout, "\nfree chain after removals:")?;
    list.pool().write_free_chain(&mut stdout)?;

    writeln!(stdout, "\nraw storage after removals:")?;
    list.write_pool_graphviz(&mut stdout)?;

    // Rebuild the pool in traversal order: identifiers become contiguous again.
    list.linearize()?;

    writeln!(stdout, "\nafter linearize:")?;
    list.write_dump(&mut stdout)?;

    writeln!(stdout, "\nlogical ring after linearize:")?;
    list.write_graphviz(&mut stdout)?;

    Ok(())
}
