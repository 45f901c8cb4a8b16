//! Debugs a blocking step used in entity resolution.
//!
//! Given two record tables and a candidate set produced by an upstream
//! blocker, [`debug_blocker`] returns the `k` pairs outside the candidate
//! set with the highest token-set Jaccard similarity on a chosen subset of
//! textual attributes -- the pairs most likely to be true matches the
//! blocker discarded.
//!
//! Table loading, key-metadata management, the blocker itself, and
//! reattaching arbitrary result columns are all out of scope: this crate's
//! contract starts at two in-memory [`Table`]s and ends at an ordered list
//! of [`Match`]es.

pub mod align;
pub mod candidates;
pub mod config;
pub mod error;
pub mod join;
pub mod order;
pub mod record;
pub mod select;
pub mod tokenize;

pub use align::{Correspondence, CorrespondenceSource, SameNameCorrespondenceSource};
pub use config::JoinConfig;
pub use error::{DebugBlockerError, Result};
pub use record::{Table, Value};

/// One emitted match: a caller-facing resolution of a scored pair back to
/// the tables' own key values.
#[derive(Debug, Clone, PartialEq)]
pub struct Match {
    pub rank: usize,
    pub similarity: f64,
    pub left_key: Value,
    pub right_key: Value,
}

/// Debug a blocker's output: find the `k` highest-Jaccard pairs in
/// `(ltable x rtable) \ candidates`.
///
/// `correspondence` is the user-supplied attribute correspondence, or
/// `None` to defer to the default [`SameNameCorrespondenceSource`].
/// `candidates` is the blocker's candidate set, expressed as (left-key,
/// right-key) pairs drawn from `ltable`/`rtable`'s key columns.
pub fn debug_blocker(
    ltable: &Table,
    rtable: &Table,
    candidates: &[(Value, Value)],
    correspondence: Option<&Correspondence>,
    k: usize,
    config: &JoinConfig,
) -> Result<Vec<Match>> {
    debug_blocker_with_source(
        ltable,
        rtable,
        candidates,
        correspondence,
        k,
        config,
        &SameNameCorrespondenceSource,
    )
}

/// Like [`debug_blocker`], but with an explicit [`CorrespondenceSource`]
/// for callers that have a richer schema-matching strategy than
/// same-name-column pairing.
pub fn debug_blocker_with_source(
    ltable: &Table,
    rtable: &Table,
    candidates: &[(Value, Value)],
    correspondence: Option<&Correspondence>,
    k: usize,
    config: &JoinConfig,
    source: &dyn CorrespondenceSource,
) -> Result<Vec<Match>> {
    if k == 0 {
        return Err(DebugBlockerError::InvalidArgument {
            reason: "output size must be > 0".to_string(),
        });
    }
    if ltable.is_empty() {
        return Err(DebugBlockerError::InvalidArgument {
            reason: format!("{} is empty", ltable.name),
        });
    }
    if rtable.is_empty() {
        return Err(DebugBlockerError::InvalidArgument {
            reason: format!("{} is empty", rtable.name),
        });
    }

    let (lfiltered, rfiltered, _corres) = align::align(ltable, rtable, correspondence, source)?;
    tracing::debug!(
        aligned_columns = lfiltered.columns.len(),
        "schema alignment complete"
    );

    let feature_list = select::select_features(&lfiltered, &rfiltered, &ltable.key)?;
    tracing::debug!(selected = feature_list.len(), "feature selection complete");

    let lkey_to_index = lfiltered.key_to_index_map(config.strict_duplicate_keys)?;
    let rkey_to_index = rfiltered.key_to_index_map(config.strict_duplicate_keys)?;

    let mut lrecords = tokenize::tokenize_table(&lfiltered, &feature_list);
    let mut rrecords = tokenize::tokenize_table(&rfiltered, &feature_list);
    tracing::debug!(
        ltable_records = lrecords.len(),
        rtable_records = rrecords.len(),
        "tokenization complete"
    );

    let indexed_candidates =
        candidates::index_candidates(&lfiltered, &rfiltered, candidates, config)?;

    let token_order = order::build_global_token_order(&lrecords, &rrecords);
    order::sort_records_by_order(&mut lrecords, &token_order);
    order::sort_records_by_order(&mut rrecords, &token_order);
    tracing::debug!(vocabulary = token_order.len(), "token ordering complete");

    let outcome = join::topk_join(&lrecords, &rrecords, &indexed_candidates, k);
    tracing::info!(
        pairs_returned = outcome.pairs.len(),
        requested_k = k,
        reason = ?outcome.reason,
        "join terminated"
    );

    let index_to_lkey = invert_index_map(&lkey_to_index);
    let index_to_rkey = invert_index_map(&rkey_to_index);

    let matches = outcome
        .pairs
        .into_iter()
        .enumerate()
        .map(|(rank, pair)| Match {
            rank,
            similarity: pair.similarity,
            left_key: index_to_lkey[&pair.left_index].clone(),
            right_key: index_to_rkey[&pair.right_index].clone(),
        })
        .collect();

    Ok(matches)
}

fn invert_index_map(
    map: &std::collections::HashMap<Value, usize>,
) -> std::collections::HashMap<usize, Value> {
    map.iter().map(|(k, &v)| (v, k.clone())).collect()
}
