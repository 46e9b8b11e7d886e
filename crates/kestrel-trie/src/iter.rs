//! In-order traversal.
//!
//! Child indices correspond to consecutive key prefixes, so a left-to-right
//! walk yields keys in ascending unsigned byte-lexicographic order. The
//! traversal is an explicit DFS whose stack holds one frame per trie level;
//! the stack *is* the iterator state, so the sequence is lazy.
//!
//! Iterators borrow the store; the borrow checker rules out mutation while
//! one is live.

use bytes::Bytes;

use crate::engine::TrieEngine;
use crate::pointer::{NodeRef, Slot};

struct Frame {
    node: NodeRef,
    /// Next child index to inspect.
    next: usize,
}

/// Ascending iterator over `(key, value)` pairs.
pub struct Entries<'a> {
    engine: &'a TrieEngine,
    stack: Vec<Frame>,
}

impl<'a> Entries<'a> {
    pub(crate) fn new(engine: &'a TrieEngine) -> Self {
        let mut stack = Vec::with_capacity(engine.max_depth());
        if engine.is_initialized() {
            stack.push(Frame {
                node: NodeRef::Root,
                next: 0,
            });
        }
        Self { engine, stack }
    }
}

impl Iterator for Entries<'_> {
    type Item = (Bytes, Bytes);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let engine = self.engine;
            let frame = self.stack.last_mut()?;
            if frame.next >= engine.fanout_of(frame.node) {
                self.stack.pop();
                continue;
            }
            let child = frame.next;
            frame.next += 1;
            match engine.read_slot(frame.node, child) {
                Slot::Empty => {}
                Slot::Leaf(index) => {
                    return Some((
                        Bytes::copy_from_slice(engine.leaf_key(index)),
                        Bytes::copy_from_slice(engine.leaf_value(index)),
                    ));
                }
                Slot::Node(index) => {
                    self.stack.push(Frame {
                        node: NodeRef::Interior(index),
                        next: 0,
                    });
                }
            }
        }
    }
}

struct RevFrame {
    node: NodeRef,
    /// Children left to inspect; the next index is `remaining - 1`.
    remaining: usize,
}

/// Descending iterator over `(key, value)` pairs.
pub struct EntriesRev<'a> {
    engine: &'a TrieEngine,
    stack: Vec<RevFrame>,
}

impl<'a> EntriesRev<'a> {
    pub(crate) fn new(engine: &'a TrieEngine) -> Self {
        let mut stack = Vec::with_capacity(engine.max_depth());
        if engine.is_initialized() {
            stack.push(RevFrame {
                node: NodeRef::Root,
                remaining: engine.fanout_of(NodeRef::Root),
            });
        }
        Self { engine, stack }
    }
}

impl Iterator for EntriesRev<'_> {
    type Item = (Bytes, Bytes);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let engine = self.engine;
            let frame = self.stack.last_mut()?;
            if frame.remaining == 0 {
                self.stack.pop();
                continue;
            }
            frame.remaining -= 1;
            let child = frame.remaining;
            match engine.read_slot(frame.node, child) {
                Slot::Empty => {}
                Slot::Leaf(index) => {
                    return Some((
                        Bytes::copy_from_slice(engine.leaf_key(index)),
                        Bytes::copy_from_slice(engine.leaf_value(index)),
                    ));
                }
                Slot::Node(index) => {
                    let node = NodeRef::Interior(index);
                    self.stack.push(RevFrame {
                        node,
                        remaining: engine.fanout_of(node),
                    });
                }
            }
        }
    }
}

/// Ascending iterator over keys.
pub struct Keys<'a>(pub(crate) Entries<'a>);

impl Iterator for Keys<'_> {
    type Item = Bytes;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|(key, _)| key)
    }
}

/// Descending iterator over keys.
pub struct KeysRev<'a>(pub(crate) EntriesRev<'a>);

impl Iterator for KeysRev<'_> {
    type Item = Bytes;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|(key, _)| key)
    }
}

/// Ascending iterator over values.
pub struct Vals<'a>(pub(crate) Entries<'a>);

impl Iterator for Vals<'_> {
    type Item = Bytes;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|(_, value)| value)
    }
}

/// Descending iterator over values.
pub struct ValsRev<'a>(pub(crate) EntriesRev<'a>);

impl Iterator for ValsRev<'_> {
    type Item = Bytes;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|(_, value)| value)
    }
}
