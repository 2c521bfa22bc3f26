//! Insertion-ordered map.
//!
//! This module provides [`OrderedMap`], a hash map whose iteration order is the order
//! in which keys were first inserted. It is built from two parts kept in lock-step:
//!
//! - a [`List`] of entries, which fixes the order;
//! - a hash index from key to the entry's [`ItemId`], which gives O(1) lookup.
//!
//! ## Ordering rules
//!
//! - Setting a new key appends it at the back.
//! - Setting an existing key replaces the value in place. The key does not move.
//! - Removing a key and setting it again moves it to the back.
//!
//! ```rust
//! use ordered_json::OrderedMap;
//!
//! let mut map = OrderedMap::new();
//! map.set("a", 1);
//! map.set("b", 2);
//! map.set("a", 3);
//! assert_eq!(map.keys().copied().collect::<Vec<_>>(), vec!["a", "b"]);
//! assert_eq!(map.get("a"), Some(&3));
//!
//! map.remove("a");
//! map.set("a", 4);
//! assert_eq!(map.keys().copied().collect::<Vec<_>>(), vec!["b", "a"]);
//! ```

use crate::list::{self, ItemId, ItemRef, List};
use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::iter::FusedIterator;
use std::marker::PhantomData;

/// One key/value record, stored as a node of the map's list.
#[derive(Clone, Debug)]
struct Entry<K, V> {
    key: K,
    value: V,
}

/// A hash map that remembers insertion order.
///
/// # Examples
///
/// ```rust
/// use ordered_json::OrderedMap;
///
/// let mut map = OrderedMap::new();
/// assert_eq!(map.set("first".to_string(), 1), None);
/// assert_eq!(map.set("second".to_string(), 2), None);
/// assert_eq!(map.set("first".to_string(), 10), Some(1));
///
/// let pairs: Vec<_> = map.iter().map(|(k, v)| (k.as_str(), *v)).collect();
/// assert_eq!(pairs, vec![("first", 10), ("second", 2)]);
/// ```
pub struct OrderedMap<K, V> {
    index: HashMap<K, ItemId>,
    list: List<Entry<K, V>>,
}

impl<K, V> OrderedMap<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates an empty `OrderedMap`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordered_json::OrderedMap;
    ///
    /// let map: OrderedMap<String, i32> = OrderedMap::new();
    /// assert!(map.is_empty());
    /// assert!(map.front().is_none());
    /// ```
    #[must_use]
    pub fn new() -> Self {
        OrderedMap {
            index: HashMap::new(),
            list: List::new(),
        }
    }

    /// Creates an empty `OrderedMap` with room for `capacity` entries.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        OrderedMap {
            index: HashMap::with_capacity(capacity),
            list: List::with_capacity(capacity),
        }
    }

    /// Returns the number of entries.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.list.len()
    }

    /// Returns `true` if the map has no entries.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Inserts or updates `key`.
    ///
    /// A new key is appended at the back and `None` is returned. For an existing key
    /// the value is replaced without moving the entry, and the previous value is
    /// returned.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordered_json::OrderedMap;
    ///
    /// let mut map = OrderedMap::new();
    /// assert_eq!(map.set("key", 42), None);
    /// assert_eq!(map.set("key", 43), Some(42));
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn set(&mut self, key: K, value: V) -> Option<V> {
        if let Some(&id) = self.index.get(&key) {
            if let Some(entry) = self.list.get_mut(id) {
                return Some(std::mem::replace(&mut entry.value, value));
            }
        }
        let id = self.list.push_back(Entry {
            key: key.clone(),
            value,
        });
        self.index.insert(key, id);
        None
    }

    /// Returns a reference to the value of `key`.
    #[must_use]
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let id = *self.index.get(key)?;
        self.list.get(id).map(|entry| &entry.value)
    }

    /// Returns a mutable reference to the value of `key`.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let id = *self.index.get(key)?;
        self.list.get_mut(id).map(|entry| &mut entry.value)
    }

    /// Returns `true` if the map contains `key`.
    #[must_use]
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.contains_key(key)
    }

    /// Returns the live entry of `key`, from which the map can be walked forwards or
    /// backwards.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordered_json::OrderedMap;
    ///
    /// let map: OrderedMap<i32, i32> = (0..5).map(|i| (i, i * 2)).collect();
    ///
    /// let mut keys = Vec::new();
    /// let mut entry = map.get_entry(&2);
    /// while let Some(e) = entry {
    ///     keys.push(*e.key());
    ///     entry = e.next();
    /// }
    /// assert_eq!(keys, vec![2, 3, 4]);
    /// ```
    #[must_use]
    pub fn get_entry<Q>(&self, key: &Q) -> Option<EntryRef<'_, K, V>>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let id = *self.index.get(key)?;
        self.list.item(id).map(EntryRef::new)
    }

    /// Removes `key` and returns its value. Removing an absent key returns `None`
    /// and changes nothing.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.remove_entry(key).map(|(_, value)| value)
    }

    /// Removes `key` and returns the stored key and value.
    pub fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let id = self.index.remove(key)?;
        self.list
            .remove(id)
            .map(|entry| (entry.key, entry.value))
    }

    /// Moves `key` to the front. Returns `true` if the order changed.
    pub fn move_to_front<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        match self.index.get(key) {
            Some(&id) => self.list.move_to_front(id),
            None => false,
        }
    }

    /// Moves `key` to the back. Returns `true` if the order changed.
    pub fn move_to_back<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        match self.index.get(key) {
            Some(&id) => self.list.move_to_back(id),
            None => false,
        }
    }

    /// Returns the oldest entry.
    #[must_use]
    pub fn front(&self) -> Option<EntryRef<'_, K, V>> {
        self.list.front_item().map(EntryRef::new)
    }

    /// Returns the newest entry.
    #[must_use]
    pub fn back(&self) -> Option<EntryRef<'_, K, V>> {
        self.list.back_item().map(EntryRef::new)
    }

    /// Returns an iterator over the keys, in order.
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys {
            inner: self.list.iter(),
        }
    }

    /// Returns an iterator over the values, in order.
    pub fn values(&self) -> Values<'_, K, V> {
        Values {
            inner: self.list.iter(),
        }
    }

    /// Returns an iterator over mutable references to the values, in order.
    pub fn values_mut(&mut self) -> impl DoubleEndedIterator<Item = &mut V> + '_ {
        self.list.iter_mut().map(|entry| &mut entry.value)
    }

    /// Returns the entries in their current order.
    #[must_use]
    pub fn entries(&self) -> Vec<EntryRef<'_, K, V>> {
        let mut entries = Vec::with_capacity(self.len());
        let mut entry = self.front();
        while let Some(e) = entry {
            entry = e.next();
            entries.push(e);
        }
        entries
    }

    /// Returns an iterator over key/value pairs, in order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            inner: self.list.iter(),
        }
    }

    /// Returns an iterator over keys and mutable values, in order.
    pub fn iter_mut(&mut self) -> impl DoubleEndedIterator<Item = (&K, &mut V)> + '_ {
        self.list.iter_mut().map(|entry| {
            let Entry { key, value } = entry;
            (&*key, value)
        })
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.index.clear();
        self.list.clear();
    }
}

impl<K, V> OrderedMap<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    /// Merges every entry of `src` into this map.
    ///
    /// Keys already present keep their position and take `src`'s value. New keys
    /// are appended in `src`'s order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordered_json::OrderedMap;
    ///
    /// let mut dst: OrderedMap<&str, i32> = vec![("a", 1), ("b", 2), ("c", 3)].into_iter().collect();
    /// let src: OrderedMap<&str, i32> = vec![("d", 40), ("b", 20)].into_iter().collect();
    ///
    /// dst.copy_from(&src);
    /// let pairs: Vec<_> = dst.iter().map(|(k, v)| (*k, *v)).collect();
    /// assert_eq!(pairs, vec![("a", 1), ("b", 20), ("c", 3), ("d", 40)]);
    /// ```
    pub fn copy_from(&mut self, src: &OrderedMap<K, V>) {
        for (key, value) in src.iter() {
            self.set(key.clone(), value.clone());
        }
    }
}

/// A borrowed view of one map entry that can step to its neighbours.
pub struct EntryRef<'a, K, V> {
    item: ItemRef<'a, Entry<K, V>>,
}

impl<'a, K, V> EntryRef<'a, K, V> {
    fn new(item: ItemRef<'a, Entry<K, V>>) -> Self {
        EntryRef { item }
    }

    /// The entry's key.
    #[must_use]
    pub fn key(&self) -> &'a K {
        &self.item.value().key
    }

    /// The entry's value.
    #[must_use]
    pub fn value(&self) -> &'a V {
        &self.item.value().value
    }

    /// The next newer entry.
    #[must_use]
    pub fn next(&self) -> Option<EntryRef<'a, K, V>> {
        self.item.next().map(EntryRef::new)
    }

    /// The next older entry.
    #[must_use]
    pub fn prev(&self) -> Option<EntryRef<'a, K, V>> {
        self.item.prev().map(EntryRef::new)
    }
}

impl<K, V> Clone for EntryRef<'_, K, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, V> Copy for EntryRef<'_, K, V> {}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for EntryRef<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("EntryRef")
            .field(self.key())
            .field(self.value())
            .finish()
    }
}

/// Iterator over the key/value pairs of an [`OrderedMap`].
pub struct Iter<'a, K, V> {
    inner: list::Iter<'a, Entry<K, V>>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|entry| (&entry.key, &entry.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for Iter<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|entry| (&entry.key, &entry.value))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

/// Iterator over the keys of an [`OrderedMap`].
pub struct Keys<'a, K, V> {
    inner: list::Iter<'a, Entry<K, V>>,
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<&'a K> {
        self.inner.next().map(|entry| &entry.key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for Keys<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|entry| &entry.key)
    }
}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {}

/// Iterator over the values of an [`OrderedMap`].
pub struct Values<'a, K, V> {
    inner: list::Iter<'a, Entry<K, V>>,
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<&'a V> {
        self.inner.next().map(|entry| &entry.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for Values<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|entry| &entry.value)
    }
}

impl<K, V> ExactSizeIterator for Values<'_, K, V> {}

/// Owning iterator over the key/value pairs of an [`OrderedMap`].
pub struct IntoIter<K, V> {
    inner: list::IntoIter<Entry<K, V>>,
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<(K, V)> {
        self.inner.next().map(|entry| (entry.key, entry.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for IntoIter<K, V> {
    fn next_back(&mut self) -> Option<(K, V)> {
        self.inner.next_back().map(|entry| (entry.key, entry.value))
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}

impl<K, V> Default for OrderedMap<K, V>
where
    K: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> Clone for OrderedMap<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    fn clone(&self) -> Self {
        self.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for OrderedMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.list.iter().map(|entry| (&entry.key, &entry.value)))
            .finish()
    }
}

/// Renders the map as compact JSON.
impl<K, V> fmt::Display for OrderedMap<K, V>
where
    K: Eq + Hash + Clone + Serialize,
    V: Serialize,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match crate::to_string(self) {
            Ok(json) => f.write_str(&json),
            Err(err) => write!(f, "<{}>", err),
        }
    }
}

/// Two maps are equal when they hold equal pairs in the same order.
impl<K, V> PartialEq for OrderedMap<K, V>
where
    K: Eq + Hash + Clone,
    V: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<K, V> Eq for OrderedMap<K, V>
where
    K: Eq + Hash + Clone,
    V: Eq,
{
}

impl<K, V> FromIterator<(K, V)> for OrderedMap<K, V>
where
    K: Eq + Hash + Clone,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut map = OrderedMap::new();
        map.extend(iter);
        map
    }
}

impl<K, V> Extend<(K, V)> for OrderedMap<K, V>
where
    K: Eq + Hash + Clone,
{
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.set(key, value);
        }
    }
}

impl<K, V> IntoIterator for OrderedMap<K, V> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            inner: self.list.into_iter(),
        }
    }
}

impl<'a, K, V> IntoIterator for &'a OrderedMap<K, V>
where
    K: Eq + Hash + Clone,
{
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V> Serialize for OrderedMap<K, V>
where
    K: Eq + Hash + Clone + Serialize,
    V: Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self.iter() {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<'de, K, V> Deserialize<'de> for OrderedMap<K, V>
where
    K: Eq + Hash + Clone + Deserialize<'de>,
    V: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct OrderedMapVisitor<K, V>(PhantomData<(K, V)>);

        impl<'de, K, V> Visitor<'de> for OrderedMapVisitor<K, V>
        where
            K: Eq + Hash + Clone + Deserialize<'de>,
            V: Deserialize<'de>,
        {
            type Value = OrderedMap<K, V>;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a map")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut map = OrderedMap::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((key, value)) = access.next_entry()? {
                    map.set(key, value);
                }
                Ok(map)
            }
        }

        deserializer.deserialize_map(OrderedMapVisitor(PhantomData))
    }
}
