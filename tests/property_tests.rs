//! Property-based tests for the containers and the codec.
//!
//! The containers are checked against simple models (`Vec` and `VecDeque`) under
//! random operation sequences; the codec is checked for round trips over random
//! values.

use ordered_json::{
    from_str, to_string, to_string_pretty, to_string_with_options, EncodeOptions, List,
    OrderedMap, Value,
};
use proptest::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

fn roundtrip<T: Serialize + for<'de> Deserialize<'de> + PartialEq + std::fmt::Debug>(
    value: &T,
) -> bool {
    match to_string(value) {
        Ok(serialized) => match from_str::<T>(&serialized) {
            Ok(deserialized) => *value == deserialized,
            Err(e) => {
                eprintln!("Deserialize failed: {}", e);
                eprintln!("Serialized was: {}", serialized);
                false
            }
        },
        Err(e) => {
            eprintln!("Serialize failed: {}", e);
            false
        }
    }
}

#[derive(Debug, Clone)]
enum MapOp {
    Set(u8, i32),
    Remove(u8),
    MoveToFront(u8),
    MoveToBack(u8),
}

fn map_op() -> impl Strategy<Value = MapOp> {
    // a small key space so keys collide often
    prop_oneof![
        4 => (0u8..16, any::<i32>()).prop_map(|(k, v)| MapOp::Set(k, v)),
        2 => (0u8..16).prop_map(MapOp::Remove),
        1 => (0u8..16).prop_map(MapOp::MoveToFront),
        1 => (0u8..16).prop_map(MapOp::MoveToBack),
    ]
}

#[derive(Debug, Clone)]
enum ListOp {
    PushFront(i32),
    PushBack(i32),
    Remove(usize),
    MoveToFront(usize),
    MoveToBack(usize),
    InsertAfter(usize, i32),
}

fn list_op() -> impl Strategy<Value = ListOp> {
    prop_oneof![
        any::<i32>().prop_map(ListOp::PushFront),
        any::<i32>().prop_map(ListOp::PushBack),
        any::<usize>().prop_map(ListOp::Remove),
        any::<usize>().prop_map(ListOp::MoveToFront),
        any::<usize>().prop_map(ListOp::MoveToBack),
        (any::<usize>(), any::<i32>()).prop_map(|(i, v)| ListOp::InsertAfter(i, v)),
    ]
}

fn finite_f64() -> impl Strategy<Value = f64> {
    prop_oneof![
        any::<i32>().prop_map(f64::from),
        any::<f64>().prop_filter("finite", |f| f.is_finite()),
    ]
}

fn arb_value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        finite_f64().prop_map(Value::Number),
        any::<String>().prop_map(Value::String),
    ];
    leaf.prop_recursive(4, 48, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6)
                .prop_map(|items| Value::Array(items.into_iter().collect())),
            prop::collection::vec(("[a-z]{0,4}", inner), 0..6)
                .prop_map(|entries| entries.into_iter().collect::<Value>()),
        ]
    })
}

proptest! {
    #[test]
    fn prop_map_matches_model(ops in prop::collection::vec(map_op(), 0..200)) {
        let mut map = OrderedMap::new();
        let mut model: Vec<(u8, i32)> = Vec::new();

        for op in ops {
            match op {
                MapOp::Set(k, v) => {
                    let expected = match model.iter_mut().find(|(key, _)| *key == k) {
                        Some(entry) => Some(std::mem::replace(&mut entry.1, v)),
                        None => {
                            model.push((k, v));
                            None
                        }
                    };
                    prop_assert_eq!(map.set(k, v), expected);
                }
                MapOp::Remove(k) => {
                    let expected = model
                        .iter()
                        .position(|(key, _)| *key == k)
                        .map(|i| model.remove(i).1);
                    prop_assert_eq!(map.remove(&k), expected);
                }
                MapOp::MoveToFront(k) => {
                    let pos = model.iter().position(|(key, _)| *key == k);
                    if let Some(i) = pos {
                        let entry = model.remove(i);
                        model.insert(0, entry);
                    }
                    prop_assert_eq!(map.move_to_front(&k), pos.map_or(false, |i| i != 0));
                }
                MapOp::MoveToBack(k) => {
                    let pos = model.iter().position(|(key, _)| *key == k);
                    let last = model.len().wrapping_sub(1);
                    if let Some(i) = pos {
                        let entry = model.remove(i);
                        model.push(entry);
                    }
                    prop_assert_eq!(map.move_to_back(&k), pos.map_or(false, |i| i != last));
                }
            }

            prop_assert_eq!(map.len(), model.len());
        }

        let pairs: Vec<(u8, i32)> = map.iter().map(|(k, v)| (*k, *v)).collect();
        prop_assert_eq!(&pairs, &model);
        let reversed: Vec<(u8, i32)> = map.iter().rev().map(|(k, v)| (*k, *v)).collect();
        prop_assert_eq!(reversed, model.iter().rev().copied().collect::<Vec<_>>());
        for (k, v) in &model {
            prop_assert_eq!(map.get(k), Some(v));
        }
    }

    #[test]
    fn prop_copy_from_is_ordered_merge(
        dst in prop::collection::vec((0u8..12, any::<i16>()), 0..20),
        src in prop::collection::vec((0u8..12, any::<i16>()), 0..20),
    ) {
        let mut merged: OrderedMap<u8, i16> = dst.iter().copied().collect();
        let source: OrderedMap<u8, i16> = src.iter().copied().collect();
        let dst_keys: Vec<u8> = merged.keys().copied().collect();

        merged.copy_from(&source);

        let keys: Vec<u8> = merged.keys().copied().collect();
        // existing keys keep their order at the front
        prop_assert_eq!(&keys[..dst_keys.len()], &dst_keys[..]);
        // new keys follow in source order
        let appended: Vec<u8> = source.keys().copied().filter(|k| !dst_keys.contains(k)).collect();
        prop_assert_eq!(&keys[dst_keys.len()..], &appended[..]);
        for (k, v) in source.iter() {
            prop_assert_eq!(merged.get(k), Some(v));
        }
    }

    #[test]
    fn prop_list_matches_model(ops in prop::collection::vec(list_op(), 0..200)) {
        let mut list = List::new();
        let mut model: VecDeque<i32> = VecDeque::new();

        for op in ops {
            match op {
                ListOp::PushFront(v) => {
                    list.push_front(v);
                    model.push_front(v);
                }
                ListOp::PushBack(v) => {
                    list.push_back(v);
                    model.push_back(v);
                }
                ListOp::Remove(i) if !model.is_empty() => {
                    let i = i % model.len();
                    let id = list.at(i as isize).unwrap();
                    prop_assert_eq!(list.remove(id), model.remove(i));
                    prop_assert_eq!(list.remove(id), None);
                }
                ListOp::MoveToFront(i) if !model.is_empty() => {
                    let i = i % model.len();
                    let id = list.at(i as isize).unwrap();
                    prop_assert_eq!(list.move_to_front(id), i != 0);
                    if let Some(v) = model.remove(i) {
                        model.push_front(v);
                    }
                }
                ListOp::MoveToBack(i) if !model.is_empty() => {
                    let i = i % model.len();
                    let id = list.at(i as isize).unwrap();
                    prop_assert_eq!(list.move_to_back(id), i != model.len() - 1);
                    if let Some(v) = model.remove(i) {
                        model.push_back(v);
                    }
                }
                ListOp::InsertAfter(i, v) if !model.is_empty() => {
                    let i = i % model.len();
                    let id = list.at(i as isize).unwrap();
                    let new = list.insert_after(v, id).unwrap();
                    prop_assert_eq!(list.next(id), Some(new));
                    model.insert(i + 1, v);
                }
                _ => {}
            }
            prop_assert_eq!(list.len(), model.len());
        }

        let values: Vec<i32> = list.iter().copied().collect();
        prop_assert_eq!(&values, &model.iter().copied().collect::<Vec<_>>());
        let reversed: Vec<i32> = list.iter().rev().copied().collect();
        prop_assert_eq!(reversed, model.iter().rev().copied().collect::<Vec<_>>());
        if !model.is_empty() {
            prop_assert_eq!(list.get_at(-1), model.back());
        }
        prop_assert_eq!(list.at(model.len() as isize), None);
    }

    #[test]
    fn prop_value_roundtrip(value in arb_value()) {
        prop_assert!(roundtrip(&value));
    }

    #[test]
    fn prop_compact_and_pretty_agree(value in arb_value(), indent in 0usize..5) {
        let compact = to_string(&value).unwrap();
        let pretty = to_string_with_options(&value, EncodeOptions::pretty().with_indent(indent)).unwrap();
        let from_compact: Value = from_str(&compact).unwrap();
        let from_pretty: Value = from_str(&pretty).unwrap();
        prop_assert_eq!(from_compact, from_pretty);
    }

    #[test]
    fn prop_output_parses_with_serde_json(value in arb_value()) {
        for text in [to_string(&value).unwrap(), to_string_pretty(&value).unwrap()] {
            let reference: Result<serde_json::Value, _> = serde_json::from_str(&text);
            prop_assert!(reference.is_ok(), "serde_json rejected {}", text);
        }
    }

    #[test]
    fn prop_i32(n in any::<i32>()) {
        prop_assert!(roundtrip(&n));
    }

    #[test]
    fn prop_i64_within_f64_precision(n in -(1i64 << 53)..=(1i64 << 53)) {
        prop_assert!(roundtrip(&n));
    }

    #[test]
    fn prop_f64(f in finite_f64()) {
        prop_assert!(roundtrip(&f));
    }

    #[test]
    fn prop_string(s in any::<String>()) {
        prop_assert!(roundtrip(&s));
    }

    #[test]
    fn prop_vec_of_options(v in prop::collection::vec(proptest::option::of(any::<i16>()), 0..20)) {
        prop_assert!(roundtrip(&v));
    }

    #[test]
    fn prop_truncated_input_never_decodes(value in arb_value(), cut in any::<prop::sample::Index>()) {
        let text = to_string_pretty(&value).unwrap();
        let trimmed = text.trim_end();
        if trimmed.starts_with('[') || trimmed.starts_with('{') {
            let mut end = cut.index(trimmed.len());
            while !trimmed.is_char_boundary(end) {
                end -= 1;
            }
            prop_assert!(from_str::<Value>(&trimmed[..end]).is_err());
        }
    }
}
