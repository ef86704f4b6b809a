//! Priority queue of discovered but unexpanded states.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use super::state::StateId;

#[derive(Debug, Clone, Copy)]
struct Entry {
    priority: f64,
    seq: u64,
    state: StateId,
}

// BinaryHeap is a max-heap, so both keys are flipped: the lowest priority
// pops first, and among equal priorities the earliest insertion.
impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .priority
            .total_cmp(&self.priority)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Entry {}

/// Min-priority frontier ordered by `(priority, insertion order)`.
#[derive(Debug, Default)]
pub struct Frontier {
    heap: BinaryHeap<Entry>,
    next_seq: u64,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, state: StateId, priority: f64) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Entry {
            priority,
            seq,
            state,
        });
    }

    /// Remove the state with the lowest priority.
    pub fn pop(&mut self) -> Option<StateId> {
        self.heap.pop().map(|entry| entry.state)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Pops come out sorted by (priority, insertion order)
        #[test]
        fn pops_sorted(priorities in prop::collection::vec(0u8..20, 0..50)) {
            let mut frontier = Frontier::new();
            for (i, p) in priorities.iter().enumerate() {
                frontier.push(StateId::from_index(i), f64::from(*p) / 2.0);
            }

            let mut expected: Vec<(u8, usize)> =
                priorities.iter().enumerate().map(|(i, p)| (*p, i)).collect();
            expected.sort();

            let popped: Vec<usize> = std::iter::from_fn(|| frontier.pop())
                .map(|id| id.index())
                .collect();
            let expected: Vec<usize> = expected.into_iter().map(|(_, i)| i).collect();
            prop_assert_eq!(popped, expected);
        }
    }
}
