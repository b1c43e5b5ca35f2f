use crate::cell::Position;
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashSet};

/// One queued cell. Ordered so that `BinaryHeap` pops the lowest
/// (priority, sequence) pair first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Entry {
    priority: u32,
    sequence: u64,
    pos: Position,
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap (BinaryHeap is max-heap by default)
        other
            .priority
            .cmp(&self.priority)
            // Tie-breaker: earlier insertion wins
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

/// Priority queue with an explicit membership set, since a heap cannot be
/// queried for containment.
#[derive(Debug, Default)]
pub struct Frontier {
    heap: BinaryHeap<Entry>,
    members: HashSet<Position>,
    next_sequence: u64,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `pos` with the next sequence number. Returns false (and queues
    /// nothing) when `pos` is already a member.
    pub fn push(&mut self, priority: u32, pos: Position) -> bool {
        if !self.members.insert(pos) {
            return false;
        }
        self.heap.push(Entry {
            priority,
            sequence: self.next_sequence,
            pos,
        });
        self.next_sequence += 1;
        true
    }

    pub fn pop(&mut self) -> Option<Position> {
        let entry = self.heap.pop()?;
        self.members.remove(&entry.pos);
        Some(entry.pos)
    }

    pub fn contains(&self, pos: &Position) -> bool {
        self.members.contains(pos)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}
