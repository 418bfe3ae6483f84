//! Field scoring.
//!
//! A field scores in `[0, 1]`, higher is better, `None` means no match. Two
//! strategies run and the better one wins:
//!
//! * approximate substring: optimal string alignment distance between the
//!   query and the closest substring of the field (typos, transpositions);
//! * in-order subsequence: every query character appears in order, scored by
//!   how tightly the matches cluster.

/// Subsequence matches never outrank a clean typo match.
const SUBSEQUENCE_WEIGHT: f64 = 0.5;

/// Score `query` against `text`. Both must already be lowercased.
pub fn score(query: &[char], text: &[char], threshold: f64) -> Option<f64> {
    if query.is_empty() {
        return Some(1.0);
    }
    if text.is_empty() {
        return None;
    }

    let len = query.len() as f64;
    let approx = substring_distance(query, text)
        .map(|d| d as f64 / len)
        .filter(|ratio| *ratio <= threshold)
        .map(|ratio| 1.0 - ratio);

    let subsequence = match_positions(query, text).map(|positions| {
        let span = positions[positions.len() - 1] - positions[0] + 1;
        SUBSEQUENCE_WEIGHT * len / span as f64
    });

    match (approx, subsequence) {
        (Some(a), Some(s)) => Some(a.max(s)),
        (a, s) => a.or(s),
    }
}

/// Smallest edit distance between `query` and any substring of `text`.
///
/// Sellers' variant of the edit distance table: the first row is all zeros so
/// a match may start anywhere, and the answer is the minimum of the last row.
/// Adjacent transpositions cost one edit.
pub fn substring_distance(query: &[char], text: &[char]) -> Option<usize> {
    if query.is_empty() {
        return Some(0);
    }
    let n = text.len();

    let mut before: Vec<usize> = vec![0; n + 1];
    let mut prev: Vec<usize> = vec![0; n + 1];
    let mut cur: Vec<usize> = vec![0; n + 1];

    for i in 1..=query.len() {
        cur[0] = i;
        for j in 1..=n {
            let cost = usize::from(query[i - 1] != text[j - 1]);
            let mut best = (prev[j] + 1).min(cur[j - 1] + 1).min(prev[j - 1] + cost);
            if i > 1 && j > 1 && query[i - 1] == text[j - 2] && query[i - 2] == text[j - 1] {
                best = best.min(before[j - 2] + 1);
            }
            cur[j] = best;
        }
        std::mem::swap(&mut before, &mut prev);
        std::mem::swap(&mut prev, &mut cur);
    }

    prev.iter().copied().min()
}

/// Greedy left-to-right subsequence match; returns the matched char positions.
pub fn match_positions(query: &[char], text: &[char]) -> Option<Vec<usize>> {
    if query.is_empty() {
        return None;
    }

    let mut positions = Vec::with_capacity(query.len());
    let mut chars = text.iter().enumerate();

    for qc in query {
        loop {
            match chars.next() {
                Some((ti, tc)) if tc == qc => {
                    positions.push(ti);
                    break;
                }
                Some(_) => continue,
                None => return None,
            }
        }
    }

    Some(positions)
}
