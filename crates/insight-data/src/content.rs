//! Content-performance metrics over the borrow table.

use insight_core::report::MetricMap;

use crate::groupby::{count_by, mean_by, round2, sort_descending, top_n};
use crate::loader::LibraryDataset;

/// Title, genre and author performance metrics.
///
/// Returns an empty mapping when the dataset has no borrow events.
pub fn content_performance(data: &LibraryDataset) -> MetricMap {
    let mut results = MetricMap::new();
    if data.borrows.is_empty() {
        return results;
    }

    // Ten most-borrowed titles by event count.
    let title_counts = count_by(&data.borrows, |b| b.title.clone());
    results.insert(
        "top_borrowed_books",
        MetricMap::from_counts(top_n(title_counts, 10)),
    );

    // Borrow events per genre, all genres, descending.
    let genre_counts = count_by(&data.borrows, |b| b.genre.clone());
    results.insert(
        "genre_popularity",
        MetricMap::from_counts(sort_descending(genre_counts)),
    );

    // Mean rating per genre; events without a recorded rating are skipped,
    // and a genre with no rated events at all is omitted.
    let avg_ratings = mean_by(&data.borrows, |b| b.genre.clone(), |b| b.rating);
    results.insert(
        "avg_ratings_by_genre",
        MetricMap::from_floats(avg_ratings.into_iter().map(|(k, v)| (k, round2(v)))),
    );

    // Completion flag averaged as a 0/1 fraction per genre.
    let completion = mean_by(
        &data.borrows,
        |b| b.genre.clone(),
        |b| Some(if b.completed { 1.0 } else { 0.0 }),
    );
    results.insert(
        "completion_rates",
        MetricMap::from_floats(completion.into_iter().map(|(k, v)| (k, round2(v)))),
    );

    // Ten most-borrowed authors by event count.
    let author_counts = count_by(&data.borrows, |b| b.author.clone());
    results.insert("top_authors", MetricMap::from_counts(top_n(author_counts, 10)));

    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use insight_core::models::BorrowRow;

    // ── Fixtures ──────────────────────────────────────────────────────────────

    fn borrow(
        title: &str,
        author: &str,
        genre: &str,
        rating: Option<f64>,
        completed: bool,
    ) -> BorrowRow {
        BorrowRow {
            user_id: "u1".to_string(),
            book_id: "b1".to_string(),
            title: title.to_string(),
            author: author.to_string(),
            genre: genre.to_string(),
            borrowed_date: crate::loader::parse_timestamp("2024-05-01T10:00:00").unwrap(),
            return_date: None,
            rating,
            completed,
        }
    }

    // ── Empty input ───────────────────────────────────────────────────────────

    #[test]
    fn test_empty_borrow_table_is_empty_result_not_error() {
        let data = LibraryDataset::default();
        let results = content_performance(&data);
        assert!(results.is_empty());
    }

    // ── Ratings and counts ────────────────────────────────────────────────────

    #[test]
    fn test_fiction_ratings_averaged() {
        // Two Fiction borrows rated 4 and 5: popularity 2, mean 4.5.
        let data = LibraryDataset {
            borrows: vec![
                borrow("Book A", "Author A", "Fiction", Some(4.0), true),
                borrow("Book B", "Author B", "Fiction", Some(5.0), false),
            ],
            ..Default::default()
        };

        let results = content_performance(&data);
        let popularity = results.get("genre_popularity").unwrap().as_mapping().unwrap();
        assert_eq!(popularity.get("Fiction").unwrap().as_integer(), Some(2));

        let ratings = results
            .get("avg_ratings_by_genre")
            .unwrap()
            .as_mapping()
            .unwrap();
        assert_eq!(ratings.get("Fiction").unwrap().as_float(), Some(4.5));
    }

    #[test]
    fn test_missing_ratings_skipped_not_zeroed() {
        let data = LibraryDataset {
            borrows: vec![
                borrow("Book A", "Author A", "Fiction", Some(4.0), false),
                borrow("Book B", "Author B", "Fiction", None, false),
                borrow("Book C", "Author C", "Mystery", None, false),
            ],
            ..Default::default()
        };

        let results = content_performance(&data);
        let ratings = results
            .get("avg_ratings_by_genre")
            .unwrap()
            .as_mapping()
            .unwrap();
        // The unrated event does not drag the Fiction mean down.
        assert_eq!(ratings.get("Fiction").unwrap().as_float(), Some(4.0));
        // A genre with no rated events is omitted, not reported as 0.
        assert!(ratings.get("Mystery").is_none());
        // But it still counts toward popularity.
        let popularity = results.get("genre_popularity").unwrap().as_mapping().unwrap();
        assert_eq!(popularity.get("Mystery").unwrap().as_integer(), Some(1));
    }

    #[test]
    fn test_completion_rates_are_fractions() {
        let data = LibraryDataset {
            borrows: vec![
                borrow("Book A", "Author A", "Fiction", None, true),
                borrow("Book B", "Author B", "Fiction", None, false),
                borrow("Book C", "Author C", "Fiction", None, false),
            ],
            ..Default::default()
        };

        let results = content_performance(&data);
        let rates = results.get("completion_rates").unwrap().as_mapping().unwrap();
        assert_eq!(rates.get("Fiction").unwrap().as_float(), Some(0.33));
    }

    // ── Top-N orderings ───────────────────────────────────────────────────────

    #[test]
    fn test_top_borrowed_books_capped_at_ten() {
        let borrows: Vec<BorrowRow> = (0..15)
            .map(|i| borrow(&format!("Title {}", i), "Author", "Fiction", None, false))
            .collect();
        let data = LibraryDataset {
            borrows,
            ..Default::default()
        };

        let results = content_performance(&data);
        let top = results.get("top_borrowed_books").unwrap().as_mapping().unwrap();
        assert_eq!(top.len(), 10);
        // Ties broken by first-encountered order.
        assert_eq!(top.keys().next(), Some("Title 0"));
    }

    #[test]
    fn test_genre_popularity_descending() {
        let data = LibraryDataset {
            borrows: vec![
                borrow("A", "X", "Mystery", None, false),
                borrow("B", "X", "Fiction", None, false),
                borrow("C", "X", "Fiction", None, false),
            ],
            ..Default::default()
        };

        let results = content_performance(&data);
        let popularity = results.get("genre_popularity").unwrap().as_mapping().unwrap();
        let keys: Vec<&str> = popularity.keys().collect();
        assert_eq!(keys, vec!["Fiction", "Mystery"]);
    }

    #[test]
    fn test_top_authors_by_event_count() {
        let data = LibraryDataset {
            borrows: vec![
                borrow("A", "Le Guin", "Fantasy", None, false),
                borrow("B", "Le Guin", "Fantasy", None, false),
                borrow("C", "Herbert", "Science Fiction", None, false),
            ],
            ..Default::default()
        };

        let results = content_performance(&data);
        let authors = results.get("top_authors").unwrap().as_mapping().unwrap();
        assert_eq!(authors.keys().next(), Some("Le Guin"));
        assert_eq!(authors.get("Le Guin").unwrap().as_integer(), Some(2));
    }
}
