//! User segmentation by demographics and content preferences.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use insight_core::report::MetricMap;

use crate::groupby::{count_by, round2, sort_descending, top_n};
use crate::loader::LibraryDataset;

/// Demographic distributions and, when borrows exist, genre preferences
/// crossed with age range.
pub fn user_segments(data: &LibraryDataset) -> MetricMap {
    let mut results = MetricMap::new();

    results.insert(
        "account_type_distribution",
        MetricMap::from_counts(sort_descending(count_by(&data.users, |u| {
            u.account_type.clone()
        }))),
    );
    results.insert(
        "age_distribution",
        MetricMap::from_counts(sort_descending(count_by(&data.users, |u| {
            u.age_range.clone()
        }))),
    );
    results.insert(
        "education_distribution",
        MetricMap::from_counts(sort_descending(count_by(&data.users, |u| {
            u.education_level.clone()
        }))),
    );
    results.insert(
        "top_professions",
        MetricMap::from_counts(top_n(
            count_by(&data.users, |u| u.profession.clone()),
            10,
        )),
    );

    if !data.borrows.is_empty() {
        results.insert("genre_preferences_by_age", genre_preferences_by_age(data));
    }

    results
}

/// For every (age range, genre) pair, the fraction of that age range's
/// borrow events falling in that genre.
///
/// Absent pairs report 0.0 so every genre carries the same age-range keys;
/// both key levels are sorted lexicographically. Fractions for one age
/// range sum to 1.0 across genres (up to 2-decimal rounding).
fn genre_preferences_by_age(data: &LibraryDataset) -> MetricMap {
    // Join each borrow event to its borrower's age range.
    let age_by_user: HashMap<&str, &str> = data
        .users
        .iter()
        .map(|u| (u.user_id.as_str(), u.age_range.as_str()))
        .collect();

    let mut pair_counts: BTreeMap<(&str, &str), u64> = BTreeMap::new();
    let mut age_totals: BTreeMap<&str, u64> = BTreeMap::new();
    let mut genres: BTreeSet<&str> = BTreeSet::new();

    for event in &data.borrows {
        let Some(&age) = age_by_user.get(event.user_id.as_str()) else {
            continue;
        };
        *pair_counts.entry((age, event.genre.as_str())).or_insert(0) += 1;
        *age_totals.entry(age).or_insert(0) += 1;
        genres.insert(event.genre.as_str());
    }

    let mut by_genre = MetricMap::new();
    for genre in genres {
        let mut by_age = MetricMap::new();
        for (&age, &total) in &age_totals {
            let count = pair_counts.get(&(age, genre)).copied().unwrap_or(0);
            by_age.insert(age.to_string(), round2(count as f64 / total as f64));
        }
        by_genre.insert(genre.to_string(), by_age);
    }
    by_genre
}
