//! Resolves an attribute correspondence between two tables and narrows
//! each to the aligned, non-numeric-numeric columns.

use crate::error::{DebugBlockerError, Result};
use crate::record::{Table, Value};

/// An ordered attribute correspondence between two tables' columns.
#[derive(Debug, Clone, Default)]
pub struct Correspondence(pub Vec<(String, String)>);

impl Correspondence {
    pub fn new(pairs: Vec<(String, String)>) -> Self {
        Self(pairs)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// The external schema collaborator consulted when the caller supplies no
/// correspondence. Out of scope for this core in the general case (schema
/// matching is its own hard problem); the default strategy below covers the
/// common case of two tables sharing column names.
pub trait CorrespondenceSource {
    fn build(&self, ltable: &Table, rtable: &Table) -> Vec<(String, String)>;
}

/// Pairs columns that share the same name on both sides, in ltable's
/// column order.
#[derive(Debug, Default)]
pub struct SameNameCorrespondenceSource;

impl CorrespondenceSource for SameNameCorrespondenceSource {
    fn build(&self, ltable: &Table, rtable: &Table) -> Vec<(String, String)> {
        ltable
            .columns
            .iter()
            .filter(|c| rtable.columns.contains(c))
            .map(|c| (c.clone(), c.clone()))
            .collect()
    }
}

/// Validate and complete the attribute correspondence, filter out
/// numeric-numeric pairs (other than the key pair), and narrow both tables
/// to the aligned columns.
///
/// Returns the two narrowed tables, column-aligned positionally, plus the
/// final correspondence list used to build them.
pub fn align(
    ltable: &Table,
    rtable: &Table,
    user_corres: Option<&Correspondence>,
    source: &dyn CorrespondenceSource,
) -> Result<(Table, Table, Correspondence)> {
    check_user_correspondence(ltable, rtable, user_corres)?;

    let mut corres = resolve_correspondence(ltable, rtable, user_corres, source)?;
    ensure_key_pair(&mut corres, &ltable.key, &rtable.key);
    filter_numeric_numeric(ltable, rtable, &mut corres)?;

    let lcols: Vec<String> = corres.0.iter().map(|(l, _)| l.clone()).collect();
    let rcols: Vec<String> = corres.0.iter().map(|(_, r)| r.clone()).collect();

    let lfiltered = ltable.project(&lcols);
    let rfiltered = rtable.project(&rcols);

    if lfiltered.columns.len() != rfiltered.columns.len() {
        return Err(DebugBlockerError::SchemaMismatch {
            left_cols: lfiltered.columns.len(),
            right_cols: rfiltered.columns.len(),
        });
    }

    Ok((lfiltered, rfiltered, corres))
}

fn check_user_correspondence(
    ltable: &Table,
    rtable: &Table,
    user_corres: Option<&Correspondence>,
) -> Result<()> {
    let Some(corres) = user_corres else {
        return Ok(());
    };
    for (lcol, rcol) in &corres.0 {
        if !ltable.columns.contains(lcol) {
            return Err(DebugBlockerError::UnknownColumn {
                table: ltable.name.clone(),
                column: lcol.clone(),
            });
        }
        if !rtable.columns.contains(rcol) {
            return Err(DebugBlockerError::UnknownColumn {
                table: rtable.name.clone(),
                column: rcol.clone(),
            });
        }
    }
    Ok(())
}

fn resolve_correspondence(
    ltable: &Table,
    rtable: &Table,
    user_corres: Option<&Correspondence>,
    source: &dyn CorrespondenceSource,
) -> Result<Correspondence> {
    match user_corres {
        Some(c) if !c.is_empty() => Ok(c.clone()),
        _ => {
            let pairs = source.build(ltable, rtable);
            if pairs.is_empty() {
                return Err(DebugBlockerError::EmptyCorrespondence);
            }
            Ok(Correspondence::new(pairs))
        }
    }
}

fn ensure_key_pair(corres: &mut Correspondence, lkey: &str, rkey: &str) {
    let key_pair = (lkey.to_string(), rkey.to_string());
    if !corres.0.contains(&key_pair) {
        corres.0.push(key_pair);
    }
}

/// Remove pairs where both sides are numeric, unless the pair is the key
/// pair. Raises `EmptyCorrespondence` if only the key pair survives.
fn filter_numeric_numeric(
    ltable: &Table,
    rtable: &Table,
    corres: &mut Correspondence,
) -> Result<()> {
    let lkey = ltable.key.clone();
    let rkey = rtable.key.clone();

    corres.0.retain(|(lcol, rcol)| {
        if lcol == &lkey && rcol == &rkey {
            return true;
        }
        let lidx = ltable.column_index(lcol);
        let ridx = rtable.column_index(rcol);
        match (lidx, ridx) {
            (Ok(li), Ok(ri)) => {
                let lnumeric = column_is_numeric(ltable, li);
                let rnumeric = column_is_numeric(rtable, ri);
                !(lnumeric && rnumeric)
            }
            _ => true,
        }
    });

    if corres.0.len() == 1 && corres.0[0] == (lkey, rkey) {
        return Err(DebugBlockerError::EmptyCorrespondence);
    }

    Ok(())
}

/// A column is numeric iff every non-null value in it is `Value::Number`.
fn column_is_numeric(table: &Table, col_idx: usize) -> bool {
    table
        .rows
        .iter()
        .map(|row| &row[col_idx])
        .filter(|v| !v.is_null())
        .all(|v| v.is_numeric())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Table;

    fn table(name: &str, columns: &[&str], key: &str, rows: Vec<Vec<Value>>) -> Table {
        Table::new(
            name,
            columns.iter().map(|s| s.to_string()).collect(),
            key,
            rows,
        )
    }

    #[test]
    fn default_correspondence_matches_same_names() {
        let l = table(
            "l",
            &["id", "name"],
            "id",
            vec![vec![1i64.into(), "alan turing".into()]],
        );
        let r = table(
            "r",
            &["id", "name"],
            "id",
            vec![vec![10i64.into(), "alan turing".into()]],
        );
        let (lf, rf, corres) = align(&l, &r, None, &SameNameCorrespondenceSource).unwrap();
        assert_eq!(lf.columns, vec!["id", "name"]);
        assert_eq!(rf.columns, vec!["id", "name"]);
        assert_eq!(corres.0.len(), 2);
    }

    #[test]
    fn numeric_numeric_pair_is_filtered() {
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
        let err = align(&l, &r, None, &SameNameCorrespondenceSource).unwrap_err();
        assert!(matches!(err, DebugBlockerError::EmptyCorrespondence));
    }

    #[test]
    fn unknown_column_in_user_correspondence_fails() {
        let l = table("l", &["id", "name"], "id", vec![]);
        let r = table("r", &["id", "name"], "id", vec![]);
        let corres = Correspondence::new(vec![("name".into(), "bogus".into())]);
        let err = align(&l, &r, Some(&corres), &SameNameCorrespondenceSource).unwrap_err();
        assert!(matches!(err, DebugBlockerError::UnknownColumn { .. }));
    }

    #[test]
    fn textual_numeric_pair_is_retained() {
        let l = table(
            "l",
            &["id", "zip"],
            "id",
            vec![vec![1i64.into(), "10001".into()]],
        );
        let r = table(
            "r",
            &["id", "zip"],
            "id",
            vec![vec![10i64.into(), 10001i64.into()]],
        );
        let (lf, rf, _) = align(&l, &r, None, &SameNameCorrespondenceSource).unwrap();
        assert_eq!(lf.columns, vec!["id", "zip"]);
        assert_eq!(rf.columns, vec!["id", "zip"]);
    }

    #[test]
    fn key_pair_always_appended() {
        let l = table(
            "l",
            &["id", "name"],
            "id",
            vec![vec![1i64.into(), "a".into()]],
        );
        let r = table(
            "r",
            &["id", "name"],
            "id",
            vec![vec![10i64.into(), "a".into()]],
        );
        let corres = Correspondence::new(vec![("name".into(), "name".into())]);
        let (_, _, out) = align(&l, &r, Some(&corres), &SameNameCorrespondenceSource).unwrap();
        assert!(out.0.contains(&("id".to_string(), "id".to_string())));
    }
}
