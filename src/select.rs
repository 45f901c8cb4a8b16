//! Scores aligned columns by non-emptiness and value-uniqueness and picks
//! a subset of them to tokenize for the join.

use crate::error::{DebugBlockerError, Result};
use crate::record::{Table, Value};

/// Score each aligned non-key column by non-emptiness + value-uniqueness on
/// each side, take the per-column product, and pick a subset: all of them
/// when there are 3 or fewer, the top 3 when there are 4 or 5, otherwise
/// the top half.
///
/// Returns the selected column positions, sorted ascending by original
/// index. `ltable` and `rtable` must already be aligned (same column count,
/// positionally corresponding) by `align::align`.
pub fn select_features(ltable: &Table, rtable: &Table, lkey: &str) -> Result<Vec<usize>> {
    if ltable.columns.len() != rtable.columns.len() {
        return Err(DebugBlockerError::SchemaMismatch {
            left_cols: ltable.columns.len(),
            right_cols: rtable.columns.len(),
        });
    }

    let lkey_index = ltable.key_index().map_err(|_| DebugBlockerError::UnknownColumn {
        table: ltable.name.clone(),
        column: lkey.to_string(),
    })?;

    let lweight = feature_weight(ltable)?;
    let rweight = feature_weight(rtable)?;

    let mut ranked: Vec<(usize, f64)> = lweight
        .iter()
        .zip(rweight.iter())
        .enumerate()
        .map(|(i, (lw, rw))| (i, lw * rw))
        .filter(|(i, _)| *i != lkey_index)
        .collect();

    // Stable sort descending by weight; ties keep ascending original order
    // because the sort is stable and the input is already index-ascending.
    ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    let n = ranked.len();
    let num_selected = if n <= 3 {
        n
    } else if n <= 5 {
        3
    } else {
        n / 2
    };

    let mut selected: Vec<usize> = ranked.into_iter().take(num_selected).map(|(i, _)| i).collect();
    selected.sort_unstable();
    Ok(selected)
}

/// weight(c) = non_empty_ratio + selectivity, per column.
fn feature_weight(table: &Table) -> Result<Vec<f64>> {
    let num_records = table.len();
    if num_records == 0 {
        return Err(DebugBlockerError::InvalidArgument {
            reason: format!("{} is empty", table.name),
        });
    }

    let mut weights = Vec::with_capacity(table.columns.len());
    for col_idx in 0..table.columns.len() {
        let mut value_set: std::collections::HashSet<&Value> = std::collections::HashSet::new();
        let mut non_empty_count = 0usize;
        for row in &table.rows {
            let v = &row[col_idx];
            if v.is_null() || v.stringify().is_empty() {
                continue;
            }
            value_set.insert(v);
            non_empty_count += 1;
        }
        let selectivity = if non_empty_count == 0 {
            0.0
        } else {
            value_set.len() as f64 / non_empty_count as f64
        };
        let non_empty_ratio = non_empty_count as f64 / num_records as f64;
        weights.push(non_empty_ratio + selectivity);
    }
    Ok(weights)
}
