use ordered_json::{ordered_map, OrderedMap};

fn assert_pairs<K, V>(map: &OrderedMap<K, V>, keys: &[K], values: &[V])
where
    K: std::hash::Hash + Eq + Clone + std::fmt::Debug,
    V: PartialEq + std::fmt::Debug,
{
    assert_eq!(map.len(), keys.len());
    assert_eq!(map.keys().collect::<Vec<_>>(), keys.iter().collect::<Vec<_>>());
    assert_eq!(map.values().collect::<Vec<_>>(), values.iter().collect::<Vec<_>>());

    // forward via entries, backward via the double-ended iterator
    let mut i = 0;
    let mut entry = map.front();
    while let Some(e) = entry {
        assert_eq!(e.key(), &keys[i]);
        assert_eq!(e.value(), &values[i]);
        i += 1;
        entry = e.next();
    }
    assert_eq!(i, keys.len());

    let reversed: Vec<_> = map.iter().rev().map(|(k, _)| k).collect();
    assert_eq!(reversed, keys.iter().rev().collect::<Vec<_>>());
}

#[test]
fn test_basic_features() {
    let n = 100;
    let mut map = OrderedMap::new();

    for i in 0..n {
        assert_eq!(map.len(), i as usize);
        assert_eq!(map.set(i, 2 * i), None);
        assert_eq!(map.len(), i as usize + 1);
    }

    for i in 0..n {
        assert_eq!(map.get(&i), Some(&(2 * i)));
        let entry = map.get_entry(&i).unwrap();
        assert_eq!(entry.key(), &i);
        assert_eq!(entry.value(), &(2 * i));
    }

    let keys: Vec<i32> = (0..n).collect();
    let values: Vec<i32> = (0..n).map(|i| 2 * i).collect();
    assert_pairs(&map, &keys, &values);

    let entries = map.entries();
    assert_eq!(entries.len(), n as usize);
    for (i, e) in entries.iter().enumerate() {
        assert_eq!(*e.key(), i as i32);
        assert_eq!(*e.value(), 2 * i as i32);
    }

    // backward walk
    let mut i = n - 1;
    let mut entry = map.back();
    while let Some(e) = entry {
        assert_eq!(e.key(), &i);
        assert_eq!(e.value(), &(2 * i));
        i -= 1;
        entry = e.prev();
    }
    assert_eq!(i, -1);

    // forward walk starting from a known key
    let mut i = 42;
    let mut entry = map.get_entry(&i);
    while let Some(e) = entry {
        assert_eq!(e.key(), &i);
        i += 1;
        entry = e.next();
    }
    assert_eq!(i, n);

    // double the values of even keys
    for j in 0..n / 2 {
        let i = 2 * j;
        assert_eq!(map.set(i, 4 * i), Some(2 * i));
    }

    // and delete odd keys
    for j in 0..n / 2 {
        let i = 2 * j + 1;
        let len = (n - j) as usize;
        assert_eq!(map.len(), len);
        assert_eq!(map.remove(&i), Some(2 * i));
        assert_eq!(map.len(), len - 1);

        assert_eq!(map.remove(&i), None);
        assert_eq!(map.len(), len - 1);
    }

    for j in 0..n / 2 {
        let even = 2 * j;
        assert_eq!(map.get(&even), Some(&(4 * even)));
        let odd = 2 * j + 1;
        assert_eq!(map.get(&odd), None);
        assert!(!map.contains_key(&odd));
    }

    let keys: Vec<i32> = (0..n).step_by(2).collect();
    let values: Vec<i32> = keys.iter().map(|i| 4 * i).collect();
    assert_pairs(&map, &keys, &values);
}

#[test]
fn test_updating_does_not_change_order() {
    let mut map = ordered_map! {"foo" => "bar", "12" => "28", "78" => "100", "bar" => "baz"};

    assert_eq!(map.set("78", "102"), Some("100"));
    assert_pairs(
        &map,
        &["foo", "12", "78", "bar"],
        &["bar", "28", "102", "baz"],
    );
}

#[test]
fn test_deleting_and_reinserting_changes_order() {
    let mut map = OrderedMap::new();
    map.set("foo", "bar");
    map.set("12", "28");
    map.set("78", "100");
    map.set("bar", "baz");

    assert_eq!(map.remove("78"), Some("100"));
    assert_eq!(map.set("78", "100"), None);

    assert_pairs(
        &map,
        &["foo", "12", "bar", "78"],
        &["bar", "28", "baz", "100"],
    );
}

#[test]
fn test_set_keeps_first_position() {
    let mut map = OrderedMap::new();
    map.set("a", 1);
    map.set("b", 2);
    map.set("a", 3);

    assert_pairs(&map, &["a", "b"], &[3, 2]);
}

#[test]
fn test_empty_map_operations() {
    let mut map: OrderedMap<String, i32> = OrderedMap::new();

    assert_eq!(map.get("foo"), None);
    assert_eq!(map.remove("bar"), None);
    assert_eq!(map.remove("bar"), None);
    assert_eq!(map.len(), 0);
    assert!(map.front().is_none());
    assert!(map.back().is_none());
    assert!(map.entries().is_empty());
    assert!(!map.move_to_front("foo"));
    assert!(!map.move_to_back("foo"));
}

#[derive(Debug, Clone, PartialEq)]
struct Dummy {
    value: String,
}

impl Dummy {
    fn new(value: &str) -> Self {
        Dummy {
            value: value.to_string(),
        }
    }
}

#[test]
fn test_struct_values() {
    let mut map = OrderedMap::new();
    map.set("foo", Dummy::new("foo!"));
    map.set("bar", Dummy::new("bar!"));

    assert_eq!(map.get("foo").map(|d| d.value.as_str()), Some("foo!"));

    let old = map.set("bar", Dummy::new("baz!"));
    assert_eq!(old, Some(Dummy::new("bar!")));
    assert_eq!(map.get("bar").map(|d| d.value.as_str()), Some("baz!"));

    if let Some(d) = map.get_mut("foo") {
        d.value.push('?');
    }
    assert_eq!(map.get("foo"), Some(&Dummy::new("foo!?")));
}

#[test]
fn test_many_keys_keep_insertion_order() {
    for n in [0usize, 10, 20, 100, 1000, 10000] {
        let mut map = OrderedMap::with_capacity(n);
        let mut keys = Vec::with_capacity(n);
        let mut values = Vec::with_capacity(n);

        // a cheap scrambler so keys are not inserted in sorted order
        for i in 0..n {
            let scrambled = (i as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15) >> 16;
            let key = format!("{}_{:x}", i, scrambled);
            let value = format!("{:x}", scrambled.rotate_left(17));
            assert_eq!(map.set(key.clone(), value.clone()), None);
            keys.push(key);
            values.push(value);
        }

        assert_pairs(&map, &keys, &values);
    }
}

#[test]
fn test_copy_from_keeps_receiver_order() {
    let mut dst = ordered_map! {"a" => 1, "b" => 2, "c" => 3};
    let src = ordered_map! {"d" => 40, "b" => 20, "e" => 50, "a" => 10};

    dst.copy_from(&src);

    assert_pairs(&dst, &["a", "b", "c", "d", "e"], &[10, 20, 3, 40, 50]);
    // source untouched
    assert_pairs(&src, &["d", "b", "e", "a"], &[40, 20, 50, 10]);
}

#[test]
fn test_copy_from_into_empty_and_from_empty() {
    let src = ordered_map! {"x" => 1, "y" => 2};

    let mut dst = OrderedMap::new();
    dst.copy_from(&src);
    assert_eq!(dst, src);

    let before = dst.clone();
    dst.copy_from(&OrderedMap::new());
    assert_eq!(dst, before);
}

#[test]
fn test_move_to_front_and_back() {
    let mut map = ordered_map! {"a" => 1, "b" => 2, "c" => 3};

    assert!(map.move_to_front("c"));
    assert_pairs(&map, &["c", "a", "b"], &[3, 1, 2]);
    assert!(!map.move_to_front("c"));

    assert!(map.move_to_back("c"));
    assert_pairs(&map, &["a", "b", "c"], &[1, 2, 3]);
    assert!(!map.move_to_back("c"));
    assert!(!map.move_to_back("missing"));
}

#[test]
fn test_remove_entry_and_clear() {
    let mut map = ordered_map! {"a".to_string() => 1, "b".to_string() => 2};

    assert_eq!(map.remove_entry("a"), Some(("a".to_string(), 1)));
    assert_eq!(map.remove_entry("a"), None);
    assert_eq!(map.len(), 1);

    map.clear();
    assert!(map.is_empty());
    assert!(map.front().is_none());
    assert_eq!(map.get("b"), None);

    map.set("b".to_string(), 3);
    assert_eq!(map.get("b"), Some(&3));
    assert_eq!(map.len(), 1);
}

#[test]
fn test_entries_is_a_snapshot() {
    let mut map = ordered_map! {"a" => 1, "b" => 2};
    let keys: Vec<&str> = map.entries().iter().map(|e| *e.key()).collect();

    map.set("c", 3);
    map.remove("a");

    assert_eq!(keys, vec!["a", "b"]);
    assert_eq!(map.keys().copied().collect::<Vec<_>>(), vec!["b", "c"]);
}

#[test]
fn test_mutable_iteration() {
    let mut map = ordered_map! {"a" => 1, "b" => 2, "c" => 3};

    for v in map.values_mut() {
        *v *= 10;
    }
    for (k, v) in map.iter_mut() {
        if *k == "b" {
            *v += 1;
        }
    }
    assert_pairs(&map, &["a", "b", "c"], &[10, 21, 30]);
}

#[test]
fn test_equality_respects_order() {
    let ab = ordered_map! {"a" => 1, "b" => 2};
    let ba = ordered_map! {"b" => 2, "a" => 1};
    assert_ne!(ab, ba);
    assert_eq!(ab, ab.clone());
}

#[test]
fn test_collect_and_into_iter() {
    let map: OrderedMap<String, usize> = ["x", "y", "x", "z"]
        .iter()
        .enumerate()
        .map(|(i, k)| (k.to_string(), i))
        .collect();
    assert_pairs(
        &map,
        &["x".to_string(), "y".to_string(), "z".to_string()],
        &[2, 1, 3],
    );

    let pairs: Vec<(String, usize)> = map.into_iter().collect();
    assert_eq!(
        pairs,
        vec![
            ("x".to_string(), 2),
            ("y".to_string(), 1),
            ("z".to_string(), 3)
        ]
    );
}

#[test]
fn test_debug_and_display() {
    let map = ordered_map! {"b" => 1, "a" => 2};
    assert_eq!(format!("{:?}", map), r#"{"b": 1, "a": 2}"#);
    assert_eq!(map.to_string(), r#"{"b":1,"a":2}"#);
}
