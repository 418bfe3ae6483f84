use super::fuzzy;
use super::keys::SearchKey;

/// Pre-lowercased field values for one collection.
///
/// Building it walks the collection once; every query after that only runs
/// the scorer, so a collection that does not change between keystrokes is
/// never re-tokenized.
#[derive(Debug, Clone)]
pub struct SearchIndex {
    /// `fields[item][key]` holds every lowercased value of that key.
    fields: Vec<Vec<Vec<Vec<char>>>>,
    weights: Vec<f64>,
    threshold: f64,
}

/// One ranked hit: position in the indexed collection and its relevance.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Hit {
    pub index: usize,
    pub score: f64,
}

impl SearchIndex {
    pub fn build<T>(collection: &[T], keys: &[SearchKey<T>], threshold: f64) -> Self {
        let fields = collection
            .iter()
            .map(|item| {
                keys.iter()
                    .map(|key| {
                        key.values(item)
                            .into_iter()
                            .map(|v| v.to_lowercase().chars().collect())
                            .collect()
                    })
                    .collect()
            })
            .collect();

        Self {
            fields,
            weights: keys.iter().map(|k| k.weight).collect(),
            threshold,
        }
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Rank the indexed collection against `query`.
    ///
    /// A blank query returns every position in original order with score 1.
    pub fn hits(&self, query: &str) -> Vec<Hit> {
        let query = query.trim();
        if query.is_empty() {
            return (0..self.fields.len())
                .map(|index| Hit { index, score: 1.0 })
                .collect();
        }

        let query: Vec<char> = query.to_lowercase().chars().collect();
        let mut hits: Vec<Hit> = self
            .fields
            .iter()
            .enumerate()
            .filter_map(|(index, item)| {
                self.score_item(&query, item)
                    .map(|score| Hit { index, score })
            })
            .collect();

        // Stable: equal scores keep collection order.
        hits.sort_by(|a, b| b.score.total_cmp(&a.score));
        hits
    }

    /// Ranked positions only.
    pub fn search(&self, query: &str) -> Vec<usize> {
        self.hits(query).into_iter().map(|h| h.index).collect()
    }

    fn score_item(&self, query: &[char], item: &[Vec<Vec<char>>]) -> Option<f64> {
        item.iter()
            .zip(&self.weights)
            .filter_map(|(values, weight)| {
                values
                    .iter()
                    .filter_map(|v| fuzzy::score(query, v, self.threshold))
                    .max_by(f64::total_cmp)
                    .map(|s| s * weight)
            })
            .max_by(f64::total_cmp)
    }
}
