//! End-to-end scenarios and property checks for `debug_blocker`.

use debugblocker::{debug_blocker, DebugBlockerError, JoinConfig, Table, Value};

fn table(name: &str, columns: &[&str], key: &str, rows: Vec<Vec<Value>>) -> Table {
    Table::new(
        name,
        columns.iter().map(|s| s.to_string()).collect(),
        key,
        rows,
    )
}

// ---------------------------------------------------------------------------
// Concrete scenarios
// ---------------------------------------------------------------------------

#[test]
fn scenario_multi_token_jaccard() {
    let l = table(
        "l",
        &["id", "t"],
        "id",
        vec![vec![1i64.into(), "the quick brown fox".into()]],
    );
    let r = table(
        "r",
        &["id", "t"],
        "id",
        vec![vec![9i64.into(), "quick brown fox jumps".into()]],
    );
    let result = debug_blocker(&l, &r, &[], None, 1, &JoinConfig::default()).unwrap();
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].rank, 0);
    assert!((result[0].similarity - 0.6).abs() < 1e-9);
    assert_eq!(result[0].left_key, Value::from(1i64));
    assert_eq!(result[0].right_key, Value::from(9i64));
}

#[test]
fn scenario_duplicate_token_within_record() {
    let l = table(
        "l",
        &["id", "t"],
        "id",
        vec![vec![1i64.into(), "foo foo bar".into()]],
    );
    let r = table(
        "r",
        &["id", "t"],
        "id",
        vec![vec![9i64.into(), "foo bar baz".into()]],
    );
    let result = debug_blocker(&l, &r, &[], None, 1, &JoinConfig::default()).unwrap();
    assert_eq!(result.len(), 1);
    assert!((result[0].similarity - 0.5).abs() < 1e-9);
}

// ---------------------------------------------------------------------------
// Property-based-style checks over a small fixed universe
// ---------------------------------------------------------------------------

fn people_tables() -> (Table, Table) {
    let l = table(
        "people_l",
        &["id", "name", "city"],
        "id",
        vec![
            vec![1i64.into(), "alan turing".into(), "london".into()],
            vec![2i64.into(), "marie curie".into(), "warsaw".into()],
            vec![3i64.into(), "ada lovelace".into(), "london".into()],
        ],
    );
    let r = table(
        "people_r",
        &["id", "name", "city"],
        "id",
        vec![
            vec![10i64.into(), "alan turing".into(), "london".into()],
            vec![11i64.into(), "isaac newton".into(), "cambridge".into()],
            vec![12i64.into(), "ada lovelace".into(), "london uk".into()],
        ],
    );
    (l, r)
}

#[test]
fn result_length_never_exceeds_k() {
    let (l, r) = people_tables();
    for k in [1usize, 2, 5, 100] {
        let result = debug_blocker(&l, &r, &[], None, k, &JoinConfig::default()).unwrap();
        assert!(result.len() <= k);
    }
}

#[test]
fn excluded_pairs_never_reappear() {
    let (l, r) = people_tables();
    let unfiltered = debug_blocker(&l, &r, &[], None, 10, &JoinConfig::default()).unwrap();
    assert!(!unfiltered.is_empty());

    let excluded: Vec<(Value, Value)> = unfiltered
        .iter()
        .map(|m| (m.left_key.clone(), m.right_key.clone()))
        .collect();
    let filtered = debug_blocker(&l, &r, &excluded, None, 10, &JoinConfig::default()).unwrap();

    for m in &filtered {
        assert!(!excluded.contains(&(m.left_key.clone(), m.right_key.clone())));
    }
}

#[test]
fn similarities_are_monotone_non_increasing_and_in_unit_range() {
    let (l, r) = people_tables();
    let result = debug_blocker(&l, &r, &[], None, 10, &JoinConfig::default()).unwrap();
    for m in &result {
        assert!((0.0..=1.0).contains(&m.similarity));
    }
    for w in result.windows(2) {
        assert!(w[0].similarity >= w[1].similarity);
    }
}

#[test]
fn removing_a_candidate_does_not_decrease_its_similarity_once_reachable() {
    let (l, r) = people_tables();
    let all = debug_blocker(&l, &r, &[], None, 10, &JoinConfig::default()).unwrap();
    let top = &all[0];

    let candidates = vec![(top.left_key.clone(), top.right_key.clone())];
    let with_excluded = debug_blocker(&l, &r, &candidates, None, 10, &JoinConfig::default())
        .unwrap();

    assert!(with_excluded
        .iter()
        .all(|m| !(m.left_key == top.left_key && m.right_key == top.right_key)));
    for m in &with_excluded {
        assert!(m.similarity <= top.similarity);
    }
}

#[test]
fn row_order_permutation_preserves_output_multiset() {
    let (l, r) = people_tables();
    let mut l_rows_reversed = l.rows.clone();
    l_rows_reversed.reverse();
    let l_reversed = Table::new("people_l", l.columns.clone(), l.key.clone(), l_rows_reversed);

    let original = debug_blocker(&l, &r, &[], None, 10, &JoinConfig::default()).unwrap();
    let permuted = debug_blocker(&l_reversed, &r, &[], None, 10, &JoinConfig::default()).unwrap();

    let mut original_set: Vec<(Value, Value)> = original
        .iter()
        .map(|m| (m.left_key.clone(), m.right_key.clone()))
        .collect();
    let mut permuted_set: Vec<(Value, Value)> = permuted
        .iter()
        .map(|m| (m.left_key.clone(), m.right_key.clone()))
        .collect();
    original_set.sort_by_key(|(l, r)| (l.stringify(), r.stringify()));
    permuted_set.sort_by_key(|(l, r)| (l.stringify(), r.stringify()));
    assert_eq!(original_set, permuted_set);
}

#[test]
fn k_equals_one_returns_the_single_best_pair() {
    let (l, r) = people_tables();
    let top1 = debug_blocker(&l, &r, &[], None, 1, &JoinConfig::default()).unwrap();
    let top_many = debug_blocker(&l, &r, &[], None, 10, &JoinConfig::default()).unwrap();
    assert_eq!(top1.len(), 1);
    assert_eq!(top1[0].similarity, top_many[0].similarity);
}

#[test]
fn empty_candidate_set_matches_unfiltered_top_k() {
    let (l, r) = people_tables();
    let empty_explicit: Vec<(Value, Value)> = Vec::new();
    let with_empty = debug_blocker(&l, &r, &empty_explicit, None, 5, &JoinConfig::default())
        .unwrap();
    let without = debug_blocker(&l, &r, &[], None, 5, &JoinConfig::default()).unwrap();
    assert_eq!(with_empty, without);
}

#[test]
fn all_numeric_non_key_columns_fail_with_empty_correspondence() {
    let l = table(
        "l",
        &["id", "age"],
        "id",
        vec![vec![1i64.into(), 30i64.into()]],
    );
    let r = table(
        "r",
        &["id", "age"],
        "id",
        vec![vec![10i64.into(), 31i64.into()]],
    );
    let err = debug_blocker(&l, &r, &[], None, 1, &JoinConfig::default()).unwrap_err();
    assert!(matches!(err, DebugBlockerError::EmptyCorrespondence));
}

#[test]
fn unknown_candidate_key_is_reported() {
    let (l, r) = people_tables();
    let bogus = vec![(Value::from(999i64), Value::from(10i64))];
    let err = debug_blocker(&l, &r, &bogus, None, 1, &JoinConfig::default()).unwrap_err();
    assert!(matches!(err, DebugBlockerError::UnknownKey { .. }));
}

#[test]
fn lenient_config_skips_unknown_candidate_keys() {
    let (l, r) = people_tables();
    let bogus = vec![(Value::from(999i64), Value::from(10i64))];
    let mut config = JoinConfig::default();
    config.strict_candidate_keys = false;
    let result = debug_blocker(&l, &r, &bogus, None, 5, &config).unwrap();
    assert!(!result.is_empty());
}
