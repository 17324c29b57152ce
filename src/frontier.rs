//! Orderings for the set of discovered but not yet expanded cells.
//!
//! All frontiers accept a key on [push](Frontier::push); the insertion-ordered ones ignore it.
//! Duplicates are allowed: a relaxing search may push a cell again with a better key and leaves
//! it to the driver to discard the stale entry when it surfaces.
use core::fmt;
use std::cmp::Ordering;
use std::collections::{BinaryHeap, VecDeque};

use crate::cell::Cell;

pub trait Frontier: fmt::Debug {
    fn push(&mut self, cell: Cell, key: u32);
    fn pop(&mut self) -> Option<Cell>;
    fn len(&self) -> usize;
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// First in, first out.
#[derive(Clone, Debug, Default)]
pub struct FifoFrontier {
    queue: VecDeque<Cell>,
}

impl Frontier for FifoFrontier {
    fn push(&mut self, cell: Cell, _key: u32) {
        self.queue.push_back(cell);
    }
    fn pop(&mut self) -> Option<Cell> {
        self.queue.pop_front()
    }
    fn len(&self) -> usize {
        self.queue.len()
    }
}

/// Last in, first out.
#[derive(Clone, Debug, Default)]
pub struct LifoFrontier {
    stack: Vec<Cell>,
}

impl Frontier for LifoFrontier {
    fn push(&mut self, cell: Cell, _key: u32) {
        self.stack.push(cell);
    }
    fn pop(&mut self) -> Option<Cell> {
        self.stack.pop()
    }
    fn len(&self) -> usize {
        self.stack.len()
    }
}

#[derive(Clone, Debug)]
struct SmallestKeyHolder {
    key: u32,
    sequence: u64,
    cell: Cell,
}

impl Eq for SmallestKeyHolder {}

impl PartialEq for SmallestKeyHolder {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key && self.sequence == other.sequence
    }
}

impl PartialOrd for SmallestKeyHolder {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SmallestKeyHolder {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is a max-heap: reverse on the key, then favour the earlier insertion so
        // that equal keys come out in the order they went in
        match other.key.cmp(&self.key) {
            Ordering::Equal => other.sequence.cmp(&self.sequence),
            s => s,
        }
    }
}

/// Pops the smallest key first. Equal keys are popped in insertion order, which keeps runs
/// reproducible.
#[derive(Clone, Debug, Default)]
pub struct MinKeyFrontier {
    heap: BinaryHeap<SmallestKeyHolder>,
    sequence: u64,
}

impl MinKeyFrontier {
    /// Key of the entry that would be popped next.
    pub fn peek_key(&self) -> Option<u32> {
        self.heap.peek().map(|h| h.key)
    }
}

impl Frontier for MinKeyFrontier {
    fn push(&mut self, cell: Cell, key: u32) {
        self.heap.push(SmallestKeyHolder {
            key,
            sequence: self.sequence,
            cell,
        });
        self.sequence += 1;
    }
    fn pop(&mut self) -> Option<Cell> {
        self.heap.pop().map(|h| h.cell)
    }
    fn len(&self) -> usize {
        self.heap.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(frontier: &mut dyn Frontier) -> Vec<Cell> {
        std::iter::from_fn(|| frontier.pop()).collect()
    }

    fn cells(n: i32) -> Vec<Cell> {
        (0..n).map(|i| Cell::new(0, i)).collect()
    }

    #[test]
    fn fifo_and_lifo_ignore_keys() {
        let mut fifo = FifoFrontier::default();
        let mut lifo = LifoFrontier::default();
        for (cell, key) in cells(3).into_iter().zip([5, 1, 3]) {
            fifo.push(cell, key);
            lifo.push(cell, key);
        }
        assert_eq!(drain(&mut fifo), cells(3));
        let mut reversed = cells(3);
        reversed.reverse();
        assert_eq!(drain(&mut lifo), reversed);
        assert!(fifo.is_empty() && lifo.is_empty());
    }

    #[test]
    fn min_key_pops_smallest_first() {
        let mut frontier = MinKeyFrontier::default();
        let c = cells(4);
        frontier.push(c[0], 7);
        frontier.push(c[1], 2);
        frontier.push(c[2], 9);
        frontier.push(c[3], 0);
        assert_eq!(frontier.peek_key(), Some(0));
        assert_eq!(drain(&mut frontier), vec![c[3], c[1], c[0], c[2]]);
    }

    #[test]
    fn min_key_ties_are_stable() {
        let mut frontier = MinKeyFrontier::default();
        let c = cells(6);
        for (i, cell) in c.iter().enumerate() {
            frontier.push(*cell, (i % 2) as u32);
        }
        assert_eq!(drain(&mut frontier), vec![c[0], c[2], c[4], c[1], c[3], c[5]]);
    }

    #[test]
    fn min_key_keeps_duplicates() {
        let mut frontier = MinKeyFrontier::default();
        let cell = Cell::new(1, 1);
        frontier.push(cell, 4);
        frontier.push(cell, 2);
        assert_eq!(frontier.len(), 2);
        assert_eq!(drain(&mut frontier), vec![cell, cell]);
    }
}
