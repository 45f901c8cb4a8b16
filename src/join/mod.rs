//! The algorithmic core: a prefix-filter driven top-k set similarity join,
//! adapted to exclude a caller-supplied candidate set.

pub mod events;
pub mod heap;

use std::collections::{HashMap, HashSet};

use events::{generate_prefix_events, Side};
use heap::{ScoredPair, TopKHeap};

use crate::candidates::IndexedCandidateSet;
use crate::tokenize::RecordTokens;

/// Why the main loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationReason {
    /// The top-k heap was full and its minimum similarity already met or
    /// exceeded the best bound any remaining event could offer.
    Pruned,
    /// The event heap ran dry before the pruning invariant could fire,
    /// meaning every candidate pair was considered.
    EventsExhausted,
}

/// The result of a join run: the scored pairs and why the main loop
/// stopped producing more of them.
#[derive(Debug, Clone)]
pub struct JoinOutcome {
    pub pairs: Vec<ScoredPair>,
    pub reason: TerminationReason,
}

/// Run the top-k similarity join, excluding `candidates`, returning at
/// most `k` pairs sorted by similarity descending.
///
/// `lrecords` and `rrecords` must already be sorted by the global token
/// order (see `order::sort_records_by_order`).
pub fn topk_join(
    lrecords: &[RecordTokens],
    rrecords: &[RecordTokens],
    candidates: &IndexedCandidateSet,
    k: usize,
) -> JoinOutcome {
    let lsets: Vec<HashSet<&str>> = lrecords
        .iter()
        .map(|r| r.iter().map(|t| t.as_str()).collect())
        .collect();
    let rsets: Vec<HashSet<&str>> = rrecords
        .iter()
        .map(|r| r.iter().map(|t| t.as_str()).collect())
        .collect();

    let mut events = generate_prefix_events(lrecords, rrecords);
    let mut inv: [HashMap<String, Vec<usize>>; 2] = [HashMap::new(), HashMap::new()];
    let mut seen: HashSet<(usize, usize)> = HashSet::new();
    let mut top = TopKHeap::new(k);
    let mut reason = TerminationReason::EventsExhausted;

    while let Some(peeked_bound) = events.peek().map(|e| e.upper_bound) {
        if top.is_full() {
            if let Some(min_sim) = top.min_similarity() {
                if min_sim >= peeked_bound {
                    reason = TerminationReason::Pruned;
                    break;
                }
            }
        }

        let event = events.pop().expect("peek just confirmed non-empty");
        let this_idx = side_index(event.side);
        let other_idx = side_index(event.side.other());

        if let Some(other_records) = inv[other_idx].get(&event.token) {
            for &other_record_idx in other_records {
                let (li, ri) = match event.side {
                    Side::Left => (event.record_index, other_record_idx),
                    Side::Right => (other_record_idx, event.record_index),
                };
                if candidates.contains(&(li, ri)) || seen.contains(&(li, ri)) {
                    continue;
                }
                let similarity = jaccard(&lsets[li], &rsets[ri]);
                top.offer(ScoredPair {
                    similarity,
                    left_index: li,
                    right_index: ri,
                });
                seen.insert((li, ri));
            }
        }

        inv[this_idx]
            .entry(event.token.clone())
            .or_default()
            .push(event.record_index);
    }

    JoinOutcome {
        pairs: top.into_sorted_vec(),
        reason,
    }
}

fn side_index(side: Side) -> usize {
    match side {
        Side::Left => 0,
        Side::Right => 1,
    }
}

/// J = |A∩B| / (|A|+|B|-|A∩B|); 0 when both sets are empty.
fn jaccard(a: &HashSet<&str>, b: &HashSet<&str>) -> f64 {
    let l_len = a.len();
    let r_len = b.len();
    if l_len + r_len == 0 {
        return 0.0;
    }
    let intersect = a.intersection(b).count();
    intersect as f64 / (l_len + r_len - intersect) as f64
}
