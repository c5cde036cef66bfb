//! Recency List Module
//!
//! Tracks access order for LRU eviction.
//!
//! A doubly-linked list threaded through a slab of nodes, plus a key-to-node
//! index, so that touching a key on every read stays O(1) instead of
//! degrading to a linear scan as the cache fills up:
//! - Head = Least recently used (next eviction victim)
//! - Tail = Most recently used

use std::collections::HashMap;

#[derive(Debug)]
struct Node {
    key: String,
    prev: Option<usize>,
    next: Option<usize>,
}

// == Recency List ==
/// Ordered record of key touches, least recent at the head.
///
/// Freed slab slots are recycled, so long-lived lists do not grow beyond the
/// peak number of tracked keys.
#[derive(Debug, Default)]
pub struct RecencyList {
    nodes: Vec<Node>,
    index: HashMap<String, usize>,
    head: Option<usize>,
    tail: Option<usize>,
    free: Vec<usize>,
}

impl RecencyList {
    // == Constructor ==
    /// Creates a new empty recency list.
    pub fn new() -> Self {
        Self::default()
    }

    // == Touch ==
    /// Marks a key as most recently used.
    ///
    /// An already-tracked key is relinked at the tail; a new key gets a fresh
    /// node at the tail. Both paths are O(1).
    pub fn touch(&mut self, key: &str) {
        if let Some(&idx) = self.index.get(key) {
            if self.tail == Some(idx) {
                return;
            }
            self.unlink(idx);
            self.push_tail(idx);
        } else {
            let idx = self.alloc(key.to_string());
            self.index.insert(key.to_string(), idx);
            self.push_tail(idx);
        }
    }

    // == Remove ==
    /// Removes a key from the list. Returns false if it was not tracked.
    pub fn remove(&mut self, key: &str) -> bool {
        match self.index.remove(key) {
            Some(idx) => {
                self.unlink(idx);
                self.release(idx);
                true
            }
            None => false,
        }
    }

    // == Pop LRU ==
    /// Removes and returns the least recently used key, if any.
    pub fn pop_lru(&mut self) -> Option<String> {
        let idx = self.head?;
        self.unlink(idx);
        let key = std::mem::take(&mut self.nodes[idx].key);
        self.index.remove(&key);
        self.free.push(idx);
        Some(key)
    }

    // == Peek LRU ==
    /// Returns the least recently used key without removing it.
    pub fn peek_lru(&self) -> Option<&str> {
        self.head.map(|idx| self.nodes[idx].key.as_str())
    }

    // == Length ==
    /// Returns the number of tracked keys.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    // == Contains ==
    /// Checks if a key is being tracked.
    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    // == Clear ==
    /// Drops every tracked key.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.index.clear();
        self.free.clear();
        self.head = None;
        self.tail = None;
    }

    // == Internal Helpers ==
    /// Detaches a node from the list, fixing head/tail as needed. The node
    /// itself stays allocated.
    fn unlink(&mut self, idx: usize) {
        let prev = self.nodes[idx].prev;
        let next = self.nodes[idx].next;

        match prev {
            Some(p) => self.nodes[p].next = next,
            None => self.head = next,
        }
        match next {
            Some(n) => self.nodes[n].prev = prev,
            None => self.tail = prev,
        }

        self.nodes[idx].prev = None;
        self.nodes[idx].next = None;
    }

    /// Appends a detached node at the tail (most recently used).
    fn push_tail(&mut self, idx: usize) {
        self.nodes[idx].prev = self.tail;
        self.nodes[idx].next = None;

        match self.tail {
            Some(t) => self.nodes[t].next = Some(idx),
            None => self.head = Some(idx),
        }
        self.tail = Some(idx);
    }

    /// Takes a slab slot for a new node, recycling a freed one if available.
    fn alloc(&mut self, key: String) -> usize {
        let node = Node {
            key,
            prev: None,
            next: None,
        };
        match self.free.pop() {
            Some(idx) => {
                self.nodes[idx] = node;
                idx
            }
            None => {
                self.nodes.push(node);
                self.nodes.len() - 1
            }
        }
    }

    /// Returns a detached node's slot to the free list.
    fn release(&mut self, idx: usize) {
        self.nodes[idx].key = String::new();
        self.free.push(idx);
    }
}
