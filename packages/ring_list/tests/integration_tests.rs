//! Integration tests for the `ring_list` package.
//!
//! These exercise position-based editing, identifier stability across growth,
//! linearization and the diagnostic writers together, the way a caller that builds
//! and reworks a sequence would.

use itertools::Itertools;
use ring_list::{ListError, RingList};

/// Positions used through this file follow the list convention: zero-based, counted
/// from the node after the anchor, with `len` itself valid only for insertion.
fn build_by_position() -> RingList<i32> {
    let mut list = RingList::new();

    for (pos, value) in [(0, 200), (0, 100), (2, 600), (2, 500), (2, 400), (2, 300)] {
        _ = list.insert_at(pos, value).unwrap();
    }

    list
}

#[test]
fn position_inserts_interleave_into_sorted_order() {
    let list = build_by_position();

    assert_eq!(
        list.iter().copied().collect::<Vec<_>>(),
        [100, 200, 300, 400, 500, 600]
    );
    assert_eq!(list.len(), 6);
}

#[test]
fn fresh_list_hands_out_ascending_ids_in_insertion_order() {
    let list = build_by_position();

    // The pool chains fresh slots in ascending index order, so the n-th insertion
    // into a never-removed-from list receives identifier n. Traversal order reflects
    // the positions instead: 100 was inserted second, so it carries identifier 2.
    let ids: Vec<usize> = (0..list.len())
        .map(|pos| list.node_at(pos).unwrap().id().index())
        .collect();

    assert_eq!(ids, [2, 1, 6, 5, 4, 3]);
}

#[test]
fn removals_by_position_and_id_interleave() {
    let mut list = build_by_position();

    assert_eq!(list.remove_at(0).unwrap(), 100);
    assert_eq!(list.remove_at(4).unwrap(), 600);

    let id_of_400 = list.node_at(2).unwrap().id();
    assert_eq!(list.remove(id_of_400).unwrap(), 400);

    assert_eq!(list.iter().copied().collect::<Vec<_>>(), [200, 300, 500]);
}

#[test]
fn insert_and_remove_at_every_position_are_inverses() {
    let len = build_by_position().len();

    for pos in 0..=len {
        let mut list = build_by_position();

        _ = list.insert_at(pos, 999).unwrap();
        assert_eq!(*list.node_at(pos).unwrap().data(), 999);
        assert_eq!(list.remove_at(pos).unwrap(), 999);

        assert_eq!(
            list.iter().copied().collect::<Vec<_>>(),
            [100, 200, 300, 400, 500, 600],
            "insert/remove at position {pos} did not round-trip"
        );
    }
}

#[test]
fn out_of_range_positions_report_bad_pos_not_bad_id() {
    let mut list = build_by_position();
    let len = list.len();

    // The bounds check fires before any ring walk, so an oversized position cannot
    // wrap past the anchor and masquerade as an identifier problem.
    let read = list.node_at(len).unwrap_err();
    assert!(matches!(read, ListError::BadPos { pos, len: reported } if pos == len && reported == len));

    let removal = list.remove_at(usize::MAX).unwrap_err();
    assert!(matches!(removal, ListError::BadPos { .. }));

    let insertion = list.insert_at(len.checked_add(1).unwrap(), 0).unwrap_err();
    assert!(matches!(insertion, ListError::BadPos { .. }));

    assert_eq!(list.len(), len);
}

#[test]
fn ids_survive_growth_but_not_removal() {
    let mut list = RingList::with_capacity(1).unwrap();

    let first = list.push_back(String::from("kept")).unwrap();
    for value in 0..20 {
        _ = list.push_back(value.to_string()).unwrap();
    }

    assert_eq!(list.node(first).unwrap().data(), "kept");

    let removed = list.remove(first).unwrap();
    assert_eq!(removed, "kept");
    assert!(matches!(
        list.node(first).unwrap_err(),
        ListError::BadId { source: Some(_), .. }
    ));
}

#[test]
fn linearize_renumbers_in_traversal_order() {
    let mut list = build_by_position();

    // Churn the front so that slot order and ring order diverge further.
    assert_eq!(list.pop_front(), Some(100));
    assert_eq!(list.pop_front(), Some(200));
    _ = list.push_back(700).unwrap();

    let capacity_before = list.capacity();

    list.linearize().unwrap();

    assert_eq!(
        list.iter().copied().collect::<Vec<_>>(),
        [300, 400, 500, 600, 700]
    );
    assert_eq!(list.anchor().index(), 0);
    assert_eq!(list.capacity(), capacity_before);

    for pos in 0..list.len() {
        let node = list.node_at(pos).unwrap();
        assert_eq!(node.id().index(), pos.checked_add(1).unwrap());
    }
}

#[test]
fn linearize_is_idempotent() {
    let mut list = build_by_position();
    _ = list.remove_at(3).unwrap();

    list.linearize().unwrap();

    let snapshot: Vec<(usize, i32)> = (0..list.len())
        .map(|pos| {
            let node = list.node_at(pos).unwrap();
            (node.id().index(), *node.data())
        })
        .collect();

    list.linearize().unwrap();

    let repeated: Vec<(usize, i32)> = (0..list.len())
        .map(|pos| {
            let node = list.node_at(pos).unwrap();
            (node.id().index(), *node.data())
        })
        .collect();

    assert_eq!(snapshot, repeated);
}

#[test]
fn linearize_invalidates_previous_ids() {
    let mut list = build_by_position();
    _ = list.pop_front().unwrap();

    // The churned list holds five elements, so the rebuilt pool occupies slots 0
    // through 5 and leaves the upper slots vacant.
    let high = list.node_at(1).unwrap().id();
    let low = list.node_at(4).unwrap().id();
    assert_eq!(high.index(), 6);
    assert_eq!(low.index(), 3);

    list.linearize().unwrap();

    // An old identifier above the new occupied range fails to resolve at all; one
    // inside the range now names whichever element was renumbered onto that slot.
    assert!(list.node(high).is_err());
    assert_eq!(*list.node(low).unwrap().data(), 400);
}

#[test]
fn free_chain_is_observable_through_the_pool() {
    let mut list = build_by_position();

    // Capacity grew 2 -> 4 -> 8 while building, leaving slot 7 vacant. Removals
    // push their slots onto the chain head in turn.
    assert_eq!(list.remove_at(0).unwrap(), 100);
    assert_eq!(list.remove_at(0).unwrap(), 200);

    let mut rendered = Vec::new();
    list.pool().write_free_chain(&mut rendered).unwrap();

    assert_eq!(String::from_utf8(rendered).unwrap(), "(1)->(2)->(7)->\n");
}

#[test]
fn diagnostic_writers_render_a_churned_ring() {
    let mut list = build_by_position();
    _ = list.remove_at(1).unwrap();

    let mut dump = Vec::new();
    list.write_dump(&mut dump).unwrap();
    let dump = String::from_utf8(dump).unwrap();

    // Banner, anchor, five elements, banner.
    assert_eq!(dump.lines().count(), 8);
    assert_eq!(dump.lines().next(), Some("==== ring dump ===="));
    assert_eq!(dump.lines().last(), Some("==== ring dump ===="));
    assert!(dump.contains("| data=500 |"));
    assert!(!dump.contains("| data=200 |"));

    let mut ring = Vec::new();
    list.write_graphviz(&mut ring).unwrap();
    let ring = String::from_utf8(ring).unwrap();

    assert!(ring.starts_with("digraph ring {"));
    assert!(ring.ends_with("}\n"));
    // One label statement per ring node: the anchor plus five elements.
    assert_eq!(ring.matches("shape=record").count(), 6);

    let mut storage = Vec::new();
    list.write_pool_graphviz(&mut storage).unwrap();
    let storage = String::from_utf8(storage).unwrap();

    // Every slot of the pool appears, vacant ones rendered dashed.
    assert_eq!(storage.matches("shape=record").count(), list.pool().capacity());
    assert_eq!(storage.matches("style=dashed, label").count(), 2);
}

#[test]
fn elements_join_in_ring_order() {
    let list = build_by_position();

    assert_eq!(list.iter().join(" -> "), "100 -> 200 -> 300 -> 400 -> 500 -> 600");
}
