//! Explicit group-by primitives used by the metric modules.
//!
//! Every "group by X, aggregate Y" step in the report is expressed through
//! these helpers so the grouping and reduction logic can be unit-tested
//! with literal inputs, independent of any particular table.

use std::collections::HashMap;

// ── Counting ──────────────────────────────────────────────────────────────────

/// Count items per key. Keys appear in first-encountered order.
pub fn count_by<T, F>(items: &[T], key_fn: F) -> Vec<(String, u64)>
where
    F: Fn(&T) -> String,
{
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut counts: Vec<(String, u64)> = Vec::new();
    for item in items {
        let key = key_fn(item);
        match index.get(&key) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(key.clone(), counts.len());
                counts.push((key, 1));
            }
        }
    }
    counts
}

/// Sort counts descending. The sort is stable, so equal counts keep their
/// first-encountered order.
pub fn sort_descending(mut counts: Vec<(String, u64)>) -> Vec<(String, u64)> {
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

/// Sort counts descending and keep the first `n`.
pub fn top_n(counts: Vec<(String, u64)>, n: usize) -> Vec<(String, u64)> {
    let mut sorted = sort_descending(counts);
    sorted.truncate(n);
    sorted
}

// ── Means ─────────────────────────────────────────────────────────────────────

/// Mean of `value_fn` per key. Keys appear in first-encountered order.
///
/// Rows for which `value_fn` returns `None` are skipped entirely: they
/// contribute neither to the sum nor to the divisor. A key whose rows all
/// return `None` is absent from the result, so no group ever divides by
/// zero.
pub fn mean_by<T, F, V>(items: &[T], key_fn: F, value_fn: V) -> Vec<(String, f64)>
where
    F: Fn(&T) -> String,
    V: Fn(&T) -> Option<f64>,
{
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<(String, f64, u64)> = Vec::new();
    for item in items {
        let Some(value) = value_fn(item) else {
            continue;
        };
        let key = key_fn(item);
        match index.get(&key) {
            Some(&i) => {
                groups[i].1 += value;
                groups[i].2 += 1;
            }
            None => {
                index.insert(key.clone(), groups.len());
                groups.push((key, value, 1));
            }
        }
    }
    groups
        .into_iter()
        .map(|(key, sum, count)| (key, sum / count as f64))
        .collect()
}

// ── Rounding ──────────────────────────────────────────────────────────────────

/// Round to one decimal place.
pub fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

/// Round to two decimal places.
pub fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── count_by ──────────────────────────────────────────────────────────────

    #[test]
    fn test_count_by_first_seen_order() {
        let items = vec!["b", "a", "b", "c", "a", "b"];
        let counts = count_by(&items, |s| s.to_string());
        assert_eq!(
            counts,
            vec![
                ("b".to_string(), 3),
                ("a".to_string(), 2),
                ("c".to_string(), 1)
            ]
        );
    }

    #[test]
    fn test_count_by_empty() {
        let items: Vec<&str> = vec![];
        assert!(count_by(&items, |s| s.to_string()).is_empty());
    }

    // ── top_n ─────────────────────────────────────────────────────────────────

    #[test]
    fn test_top_n_descending_with_truncation() {
        let counts = vec![
            ("a".to_string(), 1),
            ("b".to_string(), 5),
            ("c".to_string(), 3),
        ];
        let top = top_n(counts, 2);
        assert_eq!(top, vec![("b".to_string(), 5), ("c".to_string(), 3)]);
    }

    #[test]
    fn test_top_n_ties_keep_first_encountered_order() {
        let items = vec!["x", "y", "z", "x", "y", "z"];
        let top = top_n(count_by(&items, |s| s.to_string()), 3);
        let keys: Vec<&str> = top.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["x", "y", "z"]);
    }

    #[test]
    fn test_top_n_shorter_than_n() {
        let counts = vec![("only".to_string(), 2)];
        assert_eq!(top_n(counts, 10).len(), 1);
    }

    // ── mean_by ───────────────────────────────────────────────────────────────

    #[test]
    fn test_mean_by_basic() {
        let items = vec![("g", 4.0), ("g", 5.0), ("h", 2.0)];
        let means = mean_by(&items, |(k, _)| k.to_string(), |(_, v)| Some(*v));
        assert_eq!(means.len(), 2);
        assert_eq!(means[0].0, "g");
        assert!((means[0].1 - 4.5).abs() < 1e-9);
        assert!((means[1].1 - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_mean_by_skips_missing_values() {
        // Missing values are excluded from both sum and divisor.
        let items = vec![("g", Some(4.0)), ("g", None), ("g", Some(5.0))];
        let means = mean_by(&items, |(k, _)| k.to_string(), |(_, v)| *v);
        assert_eq!(means.len(), 1);
        assert!((means[0].1 - 4.5).abs() < 1e-9);
    }

    #[test]
    fn test_mean_by_all_missing_key_absent() {
        let items = vec![("g", None::<f64>), ("h", Some(3.0))];
        let means = mean_by(&items, |(k, _)| k.to_string(), |(_, v)| *v);
        let keys: Vec<&str> = means.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["h"]);
    }

    // ── rounding ──────────────────────────────────────────────────────────────

    #[test]
    fn test_round_helpers() {
        assert_eq!(round2(0.333_333), 0.33);
        assert_eq!(round2(4.556), 4.56);
        assert_eq!(round1(3.14), 3.1);
        assert_eq!(round1(2.25), 2.3);
    }
}
