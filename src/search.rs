//! Fuzzy search over library collections.
//!
//! The engine is generic: callers describe which fields of their record type
//! are searchable through [`SearchKey`]s, each with a weight. Presets exist
//! for every library record type.
//!
//! For one-off queries use [`search`]. Callers that query the same collection
//! repeatedly (every committed keystroke) should build a [`SearchIndex`] once
//! and reuse it.

mod fuzzy;
mod index;
mod keys;

pub use fuzzy::{match_positions, substring_distance};
pub use index::{Hit, SearchIndex};
pub use keys::{SearchKey, album_keys, artist_keys, folder_keys, playlist_keys, track_keys};

pub const DEFAULT_THRESHOLD: f64 = 0.6;

/// Rank `collection` against `query`, best match first.
///
/// A blank query returns the whole collection in its original order. Items
/// that match on no key are left out. Ties keep collection order.
pub fn search<'a, T>(collection: &'a [T], query: &str, keys: &[SearchKey<T>]) -> Vec<&'a T> {
    search_with_threshold(collection, query, keys, DEFAULT_THRESHOLD)
}

pub fn search_with_threshold<'a, T>(
    collection: &'a [T],
    query: &str,
    keys: &[SearchKey<T>],
    threshold: f64,
) -> Vec<&'a T> {
    if query.trim().is_empty() {
        return collection.iter().collect();
    }

    SearchIndex::build(collection, keys, threshold)
        .search(query)
        .into_iter()
        .map(|i| &collection[i])
        .collect()
}
