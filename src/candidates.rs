//! Translates the caller's candidate (exclusion) set from key values into
//! row indices ready for the join.

use std::collections::HashSet;

use crate::config::JoinConfig;
use crate::error::{DebugBlockerError, Result};
use crate::record::{Table, Value};

/// The excluded-pair set in index space, ready for the Top-K Joiner.
pub type IndexedCandidateSet = HashSet<(usize, usize)>;

/// Translate the candidate set from (left-key, right-key) pairs to
/// (left-index, right-index) pairs using per-table key -> index maps.
///
/// Fails with `DuplicateKey` if either table has a repeated key. An
/// unresolvable candidate key is fatal (`UnknownKey`) unless
/// `config.strict_candidate_keys` is `false`, in which case that row is
/// skipped.
pub fn index_candidates(
    ltable: &Table,
    rtable: &Table,
    candidates: &[(Value, Value)],
    config: &JoinConfig,
) -> Result<IndexedCandidateSet> {
    let lmap = ltable.key_to_index_map(config.strict_duplicate_keys)?;
    let rmap = rtable.key_to_index_map(config.strict_duplicate_keys)?;

    let mut indexed = HashSet::with_capacity(candidates.len());
    for (lkey, rkey) in candidates {
        let lidx = lmap.get(lkey);
        let ridx = rmap.get(rkey);
        match (lidx, ridx) {
            (Some(&li), Some(&ri)) => {
                indexed.insert((li, ri));
            }
            _ => {
                if config.strict_candidate_keys {
                    let (table, key) = if lidx.is_none() {
                        (ltable.name.clone(), lkey.stringify())
                    } else {
                        (rtable.name.clone(), rkey.stringify())
                    };
                    return Err(DebugBlockerError::UnknownKey { table, key });
                }
            }
        }
    }
    Ok(indexed)
}
