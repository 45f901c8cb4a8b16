//! Prefix events and the max-heap that orders them by similarity upper
//! bound, driving the join's prefix filter.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::tokenize::RecordTokens;

/// Which side of the join a record belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn other(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// A (upper-bound, side, record-index, position, token) prefix marker.
/// `BinaryHeap` in std is a max-heap, so ordering directly on `upper_bound`
/// gives the max-heap-by-upper-bound the algorithm needs.
#[derive(Debug, Clone)]
pub struct PrefixEvent {
    pub upper_bound: f64,
    pub side: Side,
    pub record_index: usize,
    pub position: usize,
    pub token: String,
}

impl PartialEq for PrefixEvent {
    fn eq(&self, other: &Self) -> bool {
        self.upper_bound == other.upper_bound
    }
}

impl Eq for PrefixEvent {}

impl PartialOrd for PrefixEvent {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PrefixEvent {
    fn cmp(&self, other: &Self) -> Ordering {
        // total_cmp gives a deterministic, panic-free order; upper bounds
        // are never NaN here since record length is always > 0.
        self.upper_bound.total_cmp(&other.upper_bound)
    }
}

/// Build the initial event heap for both sides' tokenized record lists.
pub fn generate_prefix_events(
    lrecords: &[RecordTokens],
    rrecords: &[RecordTokens],
) -> BinaryHeap<PrefixEvent> {
    let mut heap = BinaryHeap::new();
    push_events(lrecords, Side::Left, &mut heap);
    push_events(rrecords, Side::Right, &mut heap);
    heap
}

fn push_events(records: &[RecordTokens], side: Side, heap: &mut BinaryHeap<PrefixEvent>) {
    for (record_index, record) in records.iter().enumerate() {
        let length = record.len();
        if length == 0 {
            continue;
        }
        for (position, token) in record.iter().enumerate() {
            heap.push(PrefixEvent {
                upper_bound: calc_threshold(position, length),
                side,
                record_index,
                position,
                token: token.clone(),
            });
        }
    }
}

/// The similarity upper bound implied by matching at `position` in a
/// record of `length` distinct tokens: 1 - position/length.
pub fn calc_threshold(position: usize, length: usize) -> f64 {
    1.0 - (position as f64) / (length as f64)
}
