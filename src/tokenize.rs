//! Concatenates a record's selected columns into a deduplicated token list.

use std::collections::HashMap;

use crate::record::Table;

/// A tokenized record: a sequence of pairwise-distinct tokens, duplicates
/// disambiguated by a `_<n>` suffix in encounter order.
pub type RecordTokens = Vec<String>;

/// Tokenize every record in `table`, concatenating the selected columns
/// (in the given order) and lowercasing, whitespace-splitting, and
/// deduplicating within each record.
pub fn tokenize_table(table: &Table, feature_columns: &[usize]) -> Vec<RecordTokens> {
    // Tokenize column-by-column first: more cache-friendly than iterating
    // row-by-row and matches the reference implementation's structure.
    let column_tokens: Vec<Vec<Vec<String>>> = feature_columns
        .iter()
        .map(|&col_idx| tokenize_column(table, col_idx))
        .collect();

    let mut record_list = Vec::with_capacity(table.len());
    for row_idx in 0..table.len() {
        let mut token_list = Vec::new();
        let mut counts: HashMap<String, u32> = HashMap::new();
        for col in &column_tokens {
            for token in &col[row_idx] {
                if token.is_empty() {
                    continue;
                }
                let occurrence = counts.entry(token.clone()).or_insert(0);
                if *occurrence == 0 {
                    token_list.push(token.clone());
                } else {
                    token_list.push(format!("{}_{}", token, occurrence));
                }
                *occurrence += 1;
            }
        }
        record_list.push(token_list);
    }
    record_list
}

/// Tokenize a single column: lowercase and split on single-space, per cell.
fn tokenize_column(table: &Table, col_idx: usize) -> Vec<Vec<String>> {
    table
        .rows
        .iter()
        .map(|row| {
            let s = row[col_idx].stringify();
            if s.is_empty() {
                vec![String::new()]
            } else {
                s.to_lowercase().split(' ').map(|t| t.to_string()).collect()
            }
        })
        .collect()
}
