//! Recency List Module
//!
//! Doubly linked list that records access order for LRU eviction.
//!
//! Nodes live in a `Vec` arena and link to each other by index. Slots 0
//! and 1 are the head and tail sentinels; real entries always sit between
//! them, least recently used right after the head and most recently used
//! right before the tail. Freed slots are recycled through a free list.

use crate::cache::entry::Entry;

/// Arena index of the head sentinel (least recently used side).
const HEAD: usize = 0;
/// Arena index of the tail sentinel (most recently used side).
const TAIL: usize = 1;

// == Node ==
#[derive(Debug)]
struct Node<K, V> {
    /// `None` for sentinels and for slots on the free list
    entry: Option<Entry<K, V>>,
    prev: usize,
    next: usize,
}

impl<K, V> Node<K, V> {
    fn sentinel(prev: usize, next: usize) -> Self {
        Self {
            entry: None,
            prev,
            next,
        }
    }
}

// == Recency List ==
/// Owns every cache entry and keeps them ordered by recency.
#[derive(Debug)]
pub(crate) struct RecencyList<K, V> {
    nodes: Vec<Node<K, V>>,
    free: Vec<usize>,
    len: usize,
}

impl<K, V> RecencyList<K, V> {
    // == Constructor ==
    /// Creates a list holding only the two sentinels pointing at each other.
    pub(crate) fn new() -> Self {
        Self {
            nodes: vec![Node::sentinel(HEAD, TAIL), Node::sentinel(HEAD, TAIL)],
            free: Vec::new(),
            len: 0,
        }
    }

    // == Length ==
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    // == Push Back ==
    /// Links `entry` at the most recently used end and returns its slot.
    pub(crate) fn push_back(&mut self, entry: Entry<K, V>) -> usize {
        let prev = self.nodes[TAIL].prev;
        let node = Node {
            entry: Some(entry),
            prev,
            next: TAIL,
        };

        let idx = match self.free.pop() {
            Some(idx) => {
                self.nodes[idx] = node;
                idx
            }
            None => {
                self.nodes.push(node);
                self.nodes.len() - 1
            }
        };

        self.nodes[prev].next = idx;
        self.nodes[TAIL].prev = idx;
        self.len += 1;
        idx
    }

    // == Remove ==
    /// Unlinks the node at `idx`, frees its slot and hands back the entry.
    ///
    /// Returns `None` for sentinels and already-freed slots.
    pub(crate) fn remove(&mut self, idx: usize) -> Option<Entry<K, V>> {
        let entry = self.nodes.get_mut(idx)?.entry.take()?;
        self.unlink(idx);
        self.free.push(idx);
        self.len -= 1;
        Some(entry)
    }

    // == Move To Back ==
    /// Marks the node at `idx` as most recently used.
    pub(crate) fn move_to_back(&mut self, idx: usize) {
        if idx < 2 || self.nodes[TAIL].prev == idx {
            return;
        }
        self.unlink(idx);

        let prev = self.nodes[TAIL].prev;
        self.nodes[idx].prev = prev;
        self.nodes[idx].next = TAIL;
        self.nodes[prev].next = idx;
        self.nodes[TAIL].prev = idx;
    }

    // == Front ==
    /// Slot of the least recently used entry, if any.
    pub(crate) fn front(&self) -> Option<usize> {
        let first = self.nodes[HEAD].next;
        (first != TAIL).then_some(first)
    }

    // == Get ==
    pub(crate) fn get(&self, idx: usize) -> Option<&Entry<K, V>> {
        self.nodes.get(idx)?.entry.as_ref()
    }

    // == Iterators ==
    /// Walks entries from least to most recently used, yielding slots.
    pub(crate) fn iter(&self) -> impl Iterator<Item = (usize, &Entry<K, V>)> + '_ {
        let mut cursor = self.nodes[HEAD].next;
        std::iter::from_fn(move || {
            if cursor == TAIL {
                return None;
            }
            let idx = cursor;
            let node = &self.nodes[idx];
            cursor = node.next;
            node.entry.as_ref().map(|entry| (idx, entry))
        })
    }

    /// Walks entries from most to least recently used.
    pub(crate) fn iter_rev(&self) -> impl Iterator<Item = &Entry<K, V>> + '_ {
        let mut cursor = self.nodes[TAIL].prev;
        std::iter::from_fn(move || {
            if cursor == HEAD {
                return None;
            }
            let node = &self.nodes[cursor];
            cursor = node.prev;
            node.entry.as_ref()
        })
    }

    // == Clear ==
    /// Drops every entry and relinks the sentinels to each other.
    pub(crate) fn clear(&mut self) {
        self.nodes.truncate(2);
        self.nodes[HEAD].next = TAIL;
        self.nodes[TAIL].prev = HEAD;
        self.free.clear();
        self.len = 0;
    }

    fn unlink(&mut self, idx: usize) {
        let (prev, next) = (self.nodes[idx].prev, self.nodes[idx].next);
        self.nodes[prev].next = next;
        self.nodes[next].prev = prev;
    }
}
