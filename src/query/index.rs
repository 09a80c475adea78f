// src/query/index.rs

use crate::error::{AnalyticsError, Result};
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

/// Maps each row's key to its position in `rows`.
///
/// Fails on the first duplicate so that lookups through the index are
/// unambiguous.
pub fn position_index<K, T>(
    table: &'static str,
    rows: &[T],
    key: impl Fn(&T) -> K,
) -> Result<HashMap<K, usize>>
where
    K: Eq + Hash + Debug,
{
    let mut index = HashMap::with_capacity(rows.len());
    for (pos, row) in rows.iter().enumerate() {
        let k = key(row);
        if index.contains_key(&k) {
            return Err(AnalyticsError::DuplicateKey {
                table,
                key: format!("{k:?}"),
            });
        }
        index.insert(k, pos);
    }
    Ok(index)
}

/// Resolves a key through a position index.
pub fn lookup<'a, K, T>(
    rows: &'a [T],
    index: &HashMap<K, usize>,
    key: &K,
) -> Option<&'a T>
where
    K: Eq + Hash,
{
    index.get(key).and_then(|&pos| rows.get(pos))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_keys_are_rejected() {
        let rows = vec![(1, "a"), (2, "b"), (1, "c")];
        let err = position_index("pairs", &rows, |r| r.0).unwrap_err();
        assert!(matches!(err, AnalyticsError::DuplicateKey { table: "pairs", .. }));
    }

    #[test]
    fn lookup_returns_the_indexed_row() {
        let rows = vec![(10, "x"), (20, "y")];
        let index = position_index("pairs", &rows, |r| r.0).unwrap();
        assert_eq!(lookup(&rows, &index, &20), Some(&(20, "y")));
        assert_eq!(lookup(&rows, &index, &30), None);
    }
}
