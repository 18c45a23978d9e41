//! Search-behavior metrics over the search table.

use std::collections::BTreeMap;

use chrono::Timelike;
use insight_core::buckets::STOPWORDS;
use insight_core::report::MetricMap;
use regex::Regex;

use crate::groupby::{count_by, top_n};
use crate::loader::LibraryDataset;

/// Query-token frequencies and search volume by hour of day.
///
/// Returns an empty mapping when the dataset has no search events.
pub fn search_patterns(data: &LibraryDataset) -> MetricMap {
    let mut results = MetricMap::new();
    if data.searches.is_empty() {
        return results;
    }

    // Twenty most frequent query tokens, lower-cased and tokenized on word
    // boundaries, with stopwords removed.
    let tokens = tokenize_queries(data.searches.iter().map(|s| s.query.as_str()));
    let term_counts = count_by(&tokens, |t| t.clone());
    results.insert(
        "top_search_terms",
        MetricMap::from_counts(top_n(term_counts, 20)),
    );

    // Searches per hour of day: only hours with activity, ascending.
    let mut hourly: BTreeMap<u32, u64> = BTreeMap::new();
    for search in &data.searches {
        *hourly.entry(search.timestamp.hour()).or_insert(0) += 1;
    }
    results.insert(
        "searches_by_hour",
        MetricMap::from_counts(hourly.into_iter().map(|(h, c)| (h.to_string(), c))),
    );

    results
}

/// Split queries into lower-cased word tokens, dropping stopwords. Token
/// order follows query order, which is what gives count ties their
/// first-encountered tie break.
fn tokenize_queries<'a>(queries: impl Iterator<Item = &'a str>) -> Vec<String> {
    let word_re = Regex::new(r"\b\w+\b").expect("regex is valid");
    let mut tokens = Vec::new();
    for query in queries {
        let lowered = query.to_lowercase();
        for m in word_re.find_iter(&lowered) {
            let word = m.as_str();
            if STOPWORDS.contains(&word) {
                continue;
            }
            tokens.push(word.to_string());
        }
    }
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;
    use insight_core::models::SearchRow;

    // ── Fixtures ──────────────────────────────────────────────────────────────

    fn search(ts: &str, query: &str) -> SearchRow {
        SearchRow {
            user_id: "u1".to_string(),
            timestamp: crate::loader::parse_timestamp(ts).unwrap(),
            query: query.to_string(),
        }
    }

    // ── Tokenization ──────────────────────────────────────────────────────────

    #[test]
    fn test_stopwords_removed() {
        let tokens = tokenize_queries(std::iter::once("the best book in the library"));
        assert_eq!(tokens, vec!["best", "book", "library"]);
    }

    #[test]
    fn test_tokens_lowercased_and_split_on_punctuation() {
        let tokens = tokenize_queries(std::iter::once("Sci-Fi: Dune's sequels?"));
        assert_eq!(tokens, vec!["sci", "fi", "dune", "s", "sequels"]);
    }

    // ── search_patterns ───────────────────────────────────────────────────────

    #[test]
    fn test_empty_search_table_is_empty_result() {
        let data = LibraryDataset::default();
        assert!(search_patterns(&data).is_empty());
    }

    #[test]
    fn test_top_search_terms_counted_across_queries() {
        let data = LibraryDataset {
            searches: vec![
                search("2024-06-01T09:00:00", "the best book in the library"),
                search("2024-06-01T14:00:00", "book recommendations"),
            ],
            ..Default::default()
        };

        let results = search_patterns(&data);
        let terms = results.get("top_search_terms").unwrap().as_mapping().unwrap();
        assert_eq!(terms.get("book").unwrap().as_integer(), Some(2));
        assert_eq!(terms.get("best").unwrap().as_integer(), Some(1));
        assert!(terms.get("the").is_none());
        // Highest count first.
        assert_eq!(terms.keys().next(), Some("book"));
    }

    #[test]
    fn test_top_search_terms_capped_at_twenty() {
        let query: String = (0..25)
            .map(|i| format!("word{}", i))
            .collect::<Vec<_>>()
            .join(" ");
        let data = LibraryDataset {
            searches: vec![search("2024-06-01T09:00:00", &query)],
            ..Default::default()
        };

        let results = search_patterns(&data);
        let terms = results.get("top_search_terms").unwrap().as_mapping().unwrap();
        assert_eq!(terms.len(), 20);
        // Ties broken by first-encountered order.
        assert_eq!(terms.keys().next(), Some("word0"));
    }

    #[test]
    fn test_searches_by_hour_ascending_present_only() {
        let data = LibraryDataset {
            searches: vec![
                search("2024-06-01T23:10:00", "a"),
                search("2024-06-02T06:00:00", "b"),
                search("2024-06-03T23:59:00", "c"),
            ],
            ..Default::default()
        };

        let results = search_patterns(&data);
        let hourly = results.get("searches_by_hour").unwrap().as_mapping().unwrap();
        let keys: Vec<&str> = hourly.keys().collect();
        assert_eq!(keys, vec!["6", "23"]);
        assert_eq!(hourly.get("23").unwrap().as_integer(), Some(2));
    }
}
