//! Insertion-ordered maps and handle-based lists.
//!
//! Run with: cargo run --example ordered_map

use ordered_json::{List, OrderedMap};

fn main() {
    let mut scores = OrderedMap::new();
    scores.set("carol", 71);
    scores.set("alice", 93);
    scores.set("bob", 85);

    // Updating a key keeps its position
    scores.set("carol", 78);
    println!("after update: {:?}", scores);

    // Removing and re-adding moves it to the end
    scores.remove("alice");
    scores.set("alice", 95);
    println!("after re-insert: {:?}", scores);

    let mut late = OrderedMap::new();
    late.set("bob", 88);
    late.set("dave", 60);
    scores.copy_from(&late);
    println!("after merge: {:?}", scores);

    // Walk the entries through the linked handles
    let mut entry = scores.front();
    while let Some(e) = entry {
        println!("  {} => {}", e.key(), e.value());
        entry = e.next();
    }

    let mut queue: List<&str> = List::new();
    let first = queue.push_back("parse");
    queue.push_back("check");
    let last = queue.push_back("emit");
    queue.move_to_front(last);
    queue.insert_after("lower", first);
    println!("queue: {}", queue.iter().copied().collect::<Vec<_>>().join(" -> "));

    queue.remove(first);
    // The handle is dead after removal
    assert!(queue.get(first).is_none());
    println!("queue without parse: {:?}", queue.values());
}
