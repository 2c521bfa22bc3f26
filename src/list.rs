//! Doubly linked list with a sentinel node.
//!
//! [`List`] is the ordered sequence that backs [`OrderedMap`](crate::OrderedMap),
//! and it can also be used on its own. Nodes live in an arena owned by the list and
//! callers refer to them through [`ItemId`] handles.
//!
//! ## Handles
//!
//! An [`ItemId`] records which list created it, the arena slot, and the slot's
//! generation. Every operation that takes a handle checks all three in O(1).
//! A handle that belongs to another list, or that points at a node that has since
//! been removed, is rejected. The operation then does nothing and returns `None`
//! or `false`. It never panics.
//!
//! ```rust
//! use ordered_json::List;
//!
//! let mut list = List::new();
//! let a = list.push_back("a");
//! let b = list.push_back("b");
//! list.push_front("z");
//!
//! assert!(list.move_to_front(b));
//! assert_eq!(list.iter().copied().collect::<Vec<_>>(), vec!["b", "z", "a"]);
//!
//! assert_eq!(list.remove(a), Some("a"));
//! // `a` is stale now
//! assert_eq!(list.remove(a), None);
//! assert!(!list.move_to_back(a));
//! ```
//!
//! ## Traversal
//!
//! Besides the usual iterators, a list can be walked handle by handle with
//! [`List::front`] and [`List::next`]. Capturing the next handle before removing the
//! current one makes removal during traversal safe:
//!
//! ```rust
//! use ordered_json::List;
//!
//! let mut list: List<i32> = (1..=6).collect();
//! let mut cursor = list.front();
//! while let Some(id) = cursor {
//!     cursor = list.next(id);
//!     if list.get(id).map_or(false, |v| v % 2 == 0) {
//!         list.remove(id);
//!     }
//! }
//! assert_eq!(list.iter().copied().collect::<Vec<_>>(), vec![1, 3, 5]);
//! ```

use serde::de::{Deserialize, Deserializer, SeqAccess, Visitor};
use serde::ser::{Serialize, SerializeSeq, Serializer};
use std::fmt;
use std::iter::FusedIterator;
use std::marker::PhantomData;
use std::sync::atomic::{AtomicU64, Ordering};

/// Arena slot of the sentinel node.
const SENTINEL: usize = 0;

/// Link value of a detached node.
const NIL: usize = usize::MAX;

static NEXT_LIST_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of one list instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
struct ListId(u64);

impl ListId {
    fn fresh() -> Self {
        ListId(NEXT_LIST_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// Handle to a node of a [`List`].
///
/// Handles are cheap to copy and stay valid until the node is removed or the list
/// is cleared. Stale handles and handles from other lists are rejected by every
/// operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ItemId {
    owner: ListId,
    slot: usize,
    generation: u32,
}

#[derive(Clone, Debug)]
struct Node<T> {
    value: Option<T>,
    prev: usize,
    next: usize,
    // back-reference to the owning list, `None` while detached
    owner: Option<ListId>,
    generation: u32,
}

impl<T> Node<T> {
    fn sentinel() -> Self {
        Node {
            value: None,
            prev: SENTINEL,
            next: SENTINEL,
            owner: None,
            generation: 0,
        }
    }
}

/// A doubly linked list.
///
/// All insert, remove and move operations are O(1) given a handle. Indexed access
/// with [`List::at`] walks from the nearer end.
///
/// # Examples
///
/// ```rust
/// use ordered_json::List;
///
/// let mut list = List::new();
/// list.push_back(2);
/// list.push_back(3);
/// list.push_front(1);
///
/// assert_eq!(list.len(), 3);
/// assert_eq!(list.get_at(-1), Some(&3));
/// assert_eq!(list.get_at(3), None);
/// ```
pub struct List<T> {
    id: ListId,
    nodes: Vec<Node<T>>,
    free: Vec<usize>,
    len: usize,
}

impl<T> List<T> {
    /// Creates an empty list.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty list with room for `capacity` nodes.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let mut nodes = Vec::with_capacity(capacity + 1);
        nodes.push(Node::sentinel());
        List {
            id: ListId::fresh(),
            nodes,
            free: Vec::new(),
            len: 0,
        }
    }

    /// Returns the number of values in the list. O(1).
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the list holds no values.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns `true` if `id` refers to a live node of this list.
    #[must_use]
    pub fn owns(&self, id: ItemId) -> bool {
        self.resolve(id).is_some()
    }

    /// Returns the handle of the first node, or `None` if the list is empty.
    #[must_use]
    pub fn front(&self) -> Option<ItemId> {
        self.handle_at(self.nodes[SENTINEL].next)
    }

    /// Returns the handle of the last node, or `None` if the list is empty.
    #[must_use]
    pub fn back(&self) -> Option<ItemId> {
        self.handle_at(self.nodes[SENTINEL].prev)
    }

    /// Returns the handle following `id`.
    #[must_use]
    pub fn next(&self, id: ItemId) -> Option<ItemId> {
        let slot = self.resolve(id)?;
        self.handle_at(self.nodes[slot].next)
    }

    /// Returns the handle preceding `id`.
    #[must_use]
    pub fn prev(&self, id: ItemId) -> Option<ItemId> {
        let slot = self.resolve(id)?;
        self.handle_at(self.nodes[slot].prev)
    }

    /// Walks `n` steps from `id`, forward for positive `n` and backward for
    /// negative `n`. Returns `None` when the walk leaves the list.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordered_json::List;
    ///
    /// let list: List<char> = "abcde".chars().collect();
    /// let c = list.at(2).unwrap();
    /// assert_eq!(list.offset(c, 2).and_then(|id| list.get(id)), Some(&'e'));
    /// assert_eq!(list.offset(c, -2).and_then(|id| list.get(id)), Some(&'a'));
    /// assert_eq!(list.offset(c, 3), None);
    /// ```
    #[must_use]
    pub fn offset(&self, id: ItemId, n: isize) -> Option<ItemId> {
        let mut slot = self.resolve(id)?;
        for _ in 0..n.unsigned_abs() {
            slot = if n > 0 {
                self.nodes[slot].next
            } else {
                self.nodes[slot].prev
            };
            if slot == SENTINEL {
                return None;
            }
        }
        self.handle_at(slot)
    }

    /// Returns the handle at `index`.
    ///
    /// Negative indices count from the back, so `-1` is the last node.
    /// Indices outside `-len..len` return `None`. The walk starts from whichever
    /// end is closer.
    #[must_use]
    pub fn at(&self, index: isize) -> Option<ItemId> {
        let len = isize::try_from(self.len).ok()?;
        if index < -len || index >= len {
            return None;
        }
        let index = if index < 0 { index + len } else { index };

        let mut slot;
        if index < len / 2 {
            slot = self.nodes[SENTINEL].next;
            for _ in 0..index {
                slot = self.nodes[slot].next;
            }
        } else {
            slot = self.nodes[SENTINEL].prev;
            for _ in 0..(len - 1 - index) {
                slot = self.nodes[slot].prev;
            }
        }
        self.handle_at(slot)
    }

    /// Returns a reference to the value at `index` (see [`List::at`]).
    #[must_use]
    pub fn get_at(&self, index: isize) -> Option<&T> {
        self.at(index).and_then(|id| self.get(id))
    }

    /// Returns a reference to the value of `id`.
    #[must_use]
    pub fn get(&self, id: ItemId) -> Option<&T> {
        let slot = self.resolve(id)?;
        self.nodes[slot].value.as_ref()
    }

    /// Returns a mutable reference to the value of `id`.
    pub fn get_mut(&mut self, id: ItemId) -> Option<&mut T> {
        let slot = self.resolve(id)?;
        self.nodes[slot].value.as_mut()
    }

    /// Returns a borrowed view of the node `id`, which can step to its neighbours.
    #[must_use]
    pub fn item(&self, id: ItemId) -> Option<ItemRef<'_, T>> {
        let slot = self.resolve(id)?;
        self.item_at(slot)
    }

    /// Returns a view of the first node.
    #[must_use]
    pub fn front_item(&self) -> Option<ItemRef<'_, T>> {
        self.item_at(self.nodes[SENTINEL].next)
    }

    /// Returns a view of the last node.
    #[must_use]
    pub fn back_item(&self) -> Option<ItemRef<'_, T>> {
        self.item_at(self.nodes[SENTINEL].prev)
    }

    /// Inserts `value` at the front and returns its handle.
    pub fn push_front(&mut self, value: T) -> ItemId {
        self.insert_value(value, SENTINEL)
    }

    /// Inserts `value` at the back and returns its handle.
    pub fn push_back(&mut self, value: T) -> ItemId {
        let last = self.nodes[SENTINEL].prev;
        self.insert_value(value, last)
    }

    /// Inserts all `values` at the front, keeping their order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordered_json::List;
    ///
    /// let mut list: List<i32> = vec![4, 5].into_iter().collect();
    /// list.push_front_all([1, 2, 3]);
    /// assert_eq!(list.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3, 4, 5]);
    /// ```
    pub fn push_front_all<I>(&mut self, values: I)
    where
        I: IntoIterator<Item = T>,
    {
        let mut at = SENTINEL;
        for value in values {
            at = self.insert_value(value, at).slot;
        }
    }

    /// Inserts all `values` at the back, keeping their order.
    pub fn push_back_all<I>(&mut self, values: I)
    where
        I: IntoIterator<Item = T>,
    {
        for value in values {
            self.push_back(value);
        }
    }

    /// Inserts `value` immediately before `at`.
    ///
    /// Returns `None` and leaves the list untouched if `at` is not a live node of
    /// this list.
    pub fn insert_before(&mut self, value: T, at: ItemId) -> Option<ItemId> {
        let slot = self.resolve(at)?;
        let prev = self.nodes[slot].prev;
        Some(self.insert_value(value, prev))
    }

    /// Inserts `value` immediately after `at`.
    ///
    /// Returns `None` and leaves the list untouched if `at` is not a live node of
    /// this list.
    pub fn insert_after(&mut self, value: T, at: ItemId) -> Option<ItemId> {
        let slot = self.resolve(at)?;
        Some(self.insert_value(value, slot))
    }

    /// Removes the node `id` and returns its value.
    ///
    /// Foreign and stale handles are ignored and yield `None`.
    pub fn remove(&mut self, id: ItemId) -> Option<T> {
        let slot = self.resolve(id)?;
        self.remove_slot(slot)
    }

    /// Removes and returns the first value.
    pub fn pop_front(&mut self) -> Option<T> {
        let first = self.front()?;
        self.remove(first)
    }

    /// Removes and returns the last value.
    pub fn pop_back(&mut self) -> Option<T> {
        let last = self.back()?;
        self.remove(last)
    }

    /// Moves `id` to the front. Returns `true` if the list changed.
    pub fn move_to_front(&mut self, id: ItemId) -> bool {
        match self.resolve(id) {
            Some(slot) if self.nodes[SENTINEL].next != slot => {
                self.relink_after(slot, SENTINEL);
                true
            }
            _ => false,
        }
    }

    /// Moves `id` to the back. Returns `true` if the list changed.
    pub fn move_to_back(&mut self, id: ItemId) -> bool {
        match self.resolve(id) {
            Some(slot) if self.nodes[SENTINEL].prev != slot => {
                let last = self.nodes[SENTINEL].prev;
                self.relink_after(slot, last);
                true
            }
            _ => false,
        }
    }

    /// Moves `id` to sit immediately before `at`.
    ///
    /// Returns `false` without changing anything if either handle is not a live
    /// node of this list, if `id == at`, or if `id` already precedes `at`.
    pub fn move_before(&mut self, id: ItemId, at: ItemId) -> bool {
        let (Some(slot), Some(mark)) = (self.resolve(id), self.resolve(at)) else {
            return false;
        };
        if slot == mark || self.nodes[mark].prev == slot {
            return false;
        }
        let target = self.nodes[mark].prev;
        self.relink_after(slot, target);
        true
    }

    /// Moves `id` to sit immediately after `at`.
    ///
    /// Returns `false` without changing anything if either handle is not a live
    /// node of this list, if `id == at`, or if `id` already follows `at`.
    pub fn move_after(&mut self, id: ItemId, at: ItemId) -> bool {
        let (Some(slot), Some(mark)) = (self.resolve(id), self.resolve(at)) else {
            return false;
        };
        if slot == mark || self.nodes[mark].next == slot {
            return false;
        }
        self.relink_after(slot, mark);
        true
    }

    /// Exchanges the values held by `a` and `b`; the nodes keep their positions.
    ///
    /// Returns `false` if either handle is rejected or `a == b`.
    pub fn swap(&mut self, a: ItemId, b: ItemId) -> bool {
        let (Some(sa), Some(sb)) = (self.resolve(a), self.resolve(b)) else {
            return false;
        };
        if sa == sb {
            return false;
        }
        let va = self.nodes[sa].value.take();
        let vb = std::mem::replace(&mut self.nodes[sb].value, va);
        self.nodes[sa].value = vb;
        true
    }

    /// Linear search for the first value matching `predicate`.
    ///
    /// Returns its index and handle.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordered_json::List;
    ///
    /// let list: List<&str> = vec!["a", "bb", "ccc"].into_iter().collect();
    /// let (index, id) = list.search(|s| s.len() == 2).unwrap();
    /// assert_eq!(index, 1);
    /// assert_eq!(list.get(id), Some(&"bb"));
    /// assert!(list.search(|s| s.is_empty()).is_none());
    /// ```
    pub fn search<F>(&self, mut predicate: F) -> Option<(usize, ItemId)>
    where
        F: FnMut(&T) -> bool,
    {
        let mut slot = self.nodes[SENTINEL].next;
        let mut index = 0;
        while slot != SENTINEL {
            if let Some(value) = &self.nodes[slot].value {
                if predicate(value) {
                    return Some((index, self.handle(slot)));
                }
            }
            slot = self.nodes[slot].next;
            index += 1;
        }
        None
    }

    /// Removes every node. All outstanding handles become foreign to this list.
    pub fn clear(&mut self) {
        self.nodes.truncate(1);
        self.nodes[SENTINEL] = Node::sentinel();
        self.free.clear();
        self.len = 0;
        self.id = ListId::fresh();
    }

    /// Returns references to all values, front to back.
    #[must_use]
    pub fn values(&self) -> Vec<&T> {
        self.iter().collect()
    }

    /// Returns a front-to-back iterator. It is double-ended, so `.rev()` walks
    /// back to front.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            nodes: &self.nodes,
            front: self.nodes[SENTINEL].next,
            back: self.nodes[SENTINEL].prev,
            remaining: self.len,
        }
    }

    /// Returns a front-to-back iterator of mutable references.
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        let front = self.nodes[SENTINEL].next;
        let back = self.nodes[SENTINEL].prev;
        IterMut {
            nodes: self.nodes.as_mut_ptr(),
            front,
            back,
            remaining: self.len,
            _marker: PhantomData,
        }
    }

    fn resolve(&self, id: ItemId) -> Option<usize> {
        if id.owner != self.id {
            return None;
        }
        let node = self.nodes.get(id.slot)?;
        (node.owner == Some(self.id) && node.generation == id.generation).then_some(id.slot)
    }

    fn handle(&self, slot: usize) -> ItemId {
        ItemId {
            owner: self.id,
            slot,
            generation: self.nodes[slot].generation,
        }
    }

    fn handle_at(&self, slot: usize) -> Option<ItemId> {
        (slot != SENTINEL && slot != NIL).then(|| self.handle(slot))
    }

    fn item_at(&self, slot: usize) -> Option<ItemRef<'_, T>> {
        if slot == SENTINEL || slot == NIL {
            return None;
        }
        let value = self.nodes[slot].value.as_ref()?;
        Some(ItemRef {
            list: self,
            slot,
            value,
        })
    }

    fn allocate(&mut self, value: T) -> usize {
        match self.free.pop() {
            Some(slot) => {
                self.nodes[slot].value = Some(value);
                slot
            }
            None => {
                self.nodes.push(Node {
                    value: Some(value),
                    prev: NIL,
                    next: NIL,
                    owner: None,
                    generation: 0,
                });
                self.nodes.len() - 1
            }
        }
    }

    fn insert_value(&mut self, value: T, at: usize) -> ItemId {
        let slot = self.allocate(value);
        self.link_after(slot, at);
        self.len += 1;
        self.handle(slot)
    }

    fn link_after(&mut self, slot: usize, at: usize) {
        let next = self.nodes[at].next;
        self.nodes[at].next = slot;
        self.nodes[next].prev = slot;
        let node = &mut self.nodes[slot];
        node.prev = at;
        node.next = next;
        node.owner = Some(self.id);
    }

    fn unlink(&mut self, slot: usize) {
        let (prev, next) = (self.nodes[slot].prev, self.nodes[slot].next);
        self.nodes[prev].next = next;
        self.nodes[next].prev = prev;
    }

    fn relink_after(&mut self, slot: usize, at: usize) {
        if slot == at {
            return;
        }
        self.unlink(slot);
        self.link_after(slot, at);
    }

    fn remove_slot(&mut self, slot: usize) -> Option<T> {
        self.unlink(slot);
        let node = &mut self.nodes[slot];
        node.prev = NIL;
        node.next = NIL;
        node.owner = None;
        node.generation = node.generation.wrapping_add(1);
        let value = node.value.take();
        self.free.push(slot);
        self.len -= 1;
        value
    }
}

impl<T: PartialEq> List<T> {
    /// Returns `true` if some value equals `value`.
    #[must_use]
    pub fn contains(&self, value: &T) -> bool {
        self.search(|v| v == value).is_some()
    }

    /// Removes the first value equal to `value`. Returns `true` if one was removed.
    pub fn delete(&mut self, value: &T) -> bool {
        match self.search(|v| v == value) {
            Some((_, id)) => self.remove(id).is_some(),
            None => false,
        }
    }

    /// Removes every value equal to `value` and returns how many were removed.
    pub fn delete_all(&mut self, value: &T) -> usize {
        let mut removed = 0;
        let mut cursor = self.front();
        while let Some(id) = cursor {
            cursor = self.next(id);
            if self.get(id) == Some(value) {
                self.remove(id);
                removed += 1;
            }
        }
        removed
    }
}

impl<T: Clone> List<T> {
    /// Appends a copy of every value of `other`. `other` is not modified.
    ///
    /// To append a list to itself, pass a clone:
    ///
    /// ```rust
    /// use ordered_json::List;
    ///
    /// let mut list: List<i32> = vec![1, 2].into_iter().collect();
    /// list.push_back_list(&list.clone());
    /// assert_eq!(list.iter().copied().collect::<Vec<_>>(), vec![1, 2, 1, 2]);
    /// ```
    pub fn push_back_list(&mut self, other: &List<T>) {
        for value in other.iter() {
            self.push_back(value.clone());
        }
    }

    /// Prepends a copy of every value of `other`, keeping their order.
    pub fn push_front_list(&mut self, other: &List<T>) {
        for value in other.iter().rev() {
            self.push_front(value.clone());
        }
    }
}

/// A borrowed view of one node, able to step to its neighbours.
pub struct ItemRef<'a, T> {
    list: &'a List<T>,
    slot: usize,
    value: &'a T,
}

impl<'a, T> ItemRef<'a, T> {
    /// The handle of this node.
    #[must_use]
    pub fn id(&self) -> ItemId {
        self.list.handle(self.slot)
    }

    /// The value stored in this node.
    #[must_use]
    pub fn value(&self) -> &'a T {
        self.value
    }

    /// The following node, or `None` at the back.
    #[must_use]
    pub fn next(&self) -> Option<ItemRef<'a, T>> {
        self.list.item_at(self.list.nodes[self.slot].next)
    }

    /// The preceding node, or `None` at the front.
    #[must_use]
    pub fn prev(&self) -> Option<ItemRef<'a, T>> {
        self.list.item_at(self.list.nodes[self.slot].prev)
    }
}

impl<T> Clone for ItemRef<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for ItemRef<'_, T> {}

impl<T: fmt::Debug> fmt::Debug for ItemRef<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ItemRef").field(self.value).finish()
    }
}

/// Iterator over references to the values of a [`List`].
pub struct Iter<'a, T> {
    nodes: &'a [Node<T>],
    front: usize,
    back: usize,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.remaining == 0 {
            return None;
        }
        let node = &self.nodes[self.front];
        self.front = node.next;
        self.remaining -= 1;
        node.value.as_ref()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<&'a T> {
        if self.remaining == 0 {
            return None;
        }
        let node = &self.nodes[self.back];
        self.back = node.prev;
        self.remaining -= 1;
        node.value.as_ref()
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Iter { ..*self }
    }
}

/// Iterator over mutable references to the values of a [`List`].
///
/// Walks the node links like [`Iter`], holding the arena as a raw pointer so it
/// can hand out `&mut T` for nodes in link order.
pub struct IterMut<'a, T> {
    nodes: *mut Node<T>,
    front: usize,
    back: usize,
    remaining: usize,
    _marker: PhantomData<&'a mut Node<T>>,
}

// SAFETY: IterMut behaves like `&'a mut [Node<T>]`.
unsafe impl<T: Send> Send for IterMut<'_, T> {}
unsafe impl<T: Sync> Sync for IterMut<'_, T> {}

impl<'a, T> IterMut<'a, T> {
    /// # Safety
    ///
    /// `slot` must be a live slot that has not been yielded yet.
    unsafe fn node(&mut self, slot: usize) -> &'a mut Node<T> {
        // SAFETY: the arena is exclusively borrowed for 'a and is not resized
        // while the iterator lives; the caller guarantees the slot is unaliased.
        unsafe { &mut *self.nodes.add(slot) }
    }
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<&'a mut T> {
        if self.remaining == 0 {
            return None;
        }
        // SAFETY: `remaining` stops the two ends from crossing, so every live
        // slot is visited once.
        let node = unsafe { self.node(self.front) };
        self.front = node.next;
        self.remaining -= 1;
        node.value.as_mut()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T> DoubleEndedIterator for IterMut<'a, T> {
    fn next_back(&mut self) -> Option<&'a mut T> {
        if self.remaining == 0 {
            return None;
        }
        // SAFETY: as in `next`.
        let node = unsafe { self.node(self.back) };
        self.back = node.prev;
        self.remaining -= 1;
        node.value.as_mut()
    }
}

impl<T> ExactSizeIterator for IterMut<'_, T> {}

impl<T> FusedIterator for IterMut<'_, T> {}

/// Owning iterator over the values of a [`List`].
pub struct IntoIter<T> {
    list: List<T>,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.list.pop_front()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.list.len, Some(self.list.len))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<T> {
        self.list.pop_back()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> Default for List<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for List<T> {
    fn clone(&self) -> Self {
        let id = ListId::fresh();
        let nodes = self
            .nodes
            .iter()
            .map(|node| Node {
                value: node.value.clone(),
                prev: node.prev,
                next: node.next,
                owner: node.owner.map(|_| id),
                generation: node.generation,
            })
            .collect();
        List {
            id,
            nodes,
            free: self.free.clone(),
            len: self.len,
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for List<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// Renders the list as compact JSON.
impl<T: Serialize> fmt::Display for List<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match crate::to_string(self) {
            Ok(json) => f.write_str(&json),
            Err(err) => write!(f, "<{}>", err),
        }
    }
}

impl<T: PartialEq> PartialEq for List<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for List<T> {}

impl<T> FromIterator<T> for List<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = List::new();
        list.push_back_all(iter);
        list
    }
}

impl<T> Extend<T> for List<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.push_back_all(iter);
    }
}

impl<T> From<Vec<T>> for List<T> {
    fn from(values: Vec<T>) -> Self {
        values.into_iter().collect()
    }
}

impl<T> IntoIterator for List<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> IntoIter<T> {
        IntoIter { list: self }
    }
}

impl<'a, T> IntoIterator for &'a List<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut List<T> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> IterMut<'a, T> {
        self.iter_mut()
    }
}

impl<T: Serialize> Serialize for List<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(self.len))?;
        for value in self.iter() {
            seq.serialize_element(value)?;
        }
        seq.end()
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for List<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ListVisitor<T>(PhantomData<T>);

        impl<'de, T: Deserialize<'de>> Visitor<'de> for ListVisitor<T> {
            type Value = List<T>;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a sequence")
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let mut list = List::with_capacity(seq.size_hint().unwrap_or(0));
                while let Some(value) = seq.next_element()? {
                    list.push_back(value);
                }
                Ok(list)
            }
        }

        deserializer.deserialize_seq(ListVisitor(PhantomData))
    }
}
