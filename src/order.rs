//! Builds a global token frequency order and sorts each record's tokens by
//! it, rarest first, so the prefix filter sees low-frequency tokens early.

use std::collections::HashMap;

use crate::tokenize::RecordTokens;

/// ord[token] = number of records (across both tables) containing that
/// token at least once.
pub type TokenOrder = HashMap<String, u64>;

/// Build the global token order from both tables' tokenized record lists.
pub fn build_global_token_order(lrecords: &[RecordTokens], rrecords: &[RecordTokens]) -> TokenOrder {
    let mut order = TokenOrder::new();
    accumulate(lrecords, &mut order);
    accumulate(rrecords, &mut order);
    order
}

fn accumulate(records: &[RecordTokens], order: &mut TokenOrder) {
    for record in records {
        for token in record {
            *order.entry(token.clone()).or_insert(0) += 1;
        }
    }
}

/// Sort each record's tokens by (frequency ascending, token lexicographic
/// ascending), in place. Tokens absent from `order` are dropped defensively
/// (cannot happen given `order` is built from the same record lists).
pub fn sort_records_by_order(records: &mut [RecordTokens], order: &TokenOrder) {
    for record in records.iter_mut() {
        record.retain(|token| order.contains_key(token));
        record.sort_by(|a, b| {
            let fa = order[a];
            let fb = order[b];
            fa.cmp(&fb).then_with(|| a.cmp(b))
        });
    }
}
