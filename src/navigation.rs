//! Breadcrumbs for folder navigation.
//!
//! Everything here is syntactic: paths are split on `/` and never touched on
//! disk.

use crate::library::SubPath;

pub const SEPARATOR: char = '/';

fn segments(path: &str) -> Vec<&str> {
    path.split(SEPARATOR).filter(|s| !s.is_empty()).collect()
}

/// Split `full_path` into breadcrumbs, one per non-empty segment.
///
/// Each breadcrumb carries the cumulative path up to itself so it can be
/// navigated to directly. Only the last one is active. Absolute inputs keep
/// their leading separator; `"/"` and `""` produce no breadcrumbs.
pub fn decompose(full_path: &str) -> Vec<SubPath> {
    let absolute = full_path.starts_with(SEPARATOR);
    let parts = segments(full_path);
    let last = parts.len().saturating_sub(1);

    let mut path = String::new();
    parts
        .iter()
        .enumerate()
        .map(|(i, name)| {
            if absolute || i > 0 {
                path.push(SEPARATOR);
            }
            path.push_str(name);
            SubPath {
                name: name.to_string(),
                path: path.clone(),
                active: i == last,
            }
        })
        .collect()
}

/// Breadcrumbs after navigating to `new_path` from the current `trail`.
///
/// Going back up to a folder already on the trail keeps the deeper crumbs so
/// the user can step forward again; only the active marker moves. Any other
/// destination starts a fresh trail.
pub fn navigate(new_path: &str, trail: &[SubPath]) -> Vec<SubPath> {
    let target = segments(new_path);
    if target.is_empty() {
        return Vec::new();
    }

    let deepest = trail.last().map(|c| segments(&c.path)).unwrap_or_default();
    let same_root = trail
        .first()
        .map(|c| c.path.starts_with(SEPARATOR) == new_path.starts_with(SEPARATOR))
        .unwrap_or(false);

    if same_root && deepest.len() >= target.len() && deepest[..target.len()] == target[..] {
        let active = target.len() - 1;
        return trail
            .iter()
            .enumerate()
            .map(|(i, crumb)| SubPath {
                active: i == active,
                ..crumb.clone()
            })
            .collect();
    }

    decompose(new_path)
}

/// The parent folder of `path`, or `None` at the top.
pub fn parent(path: &str) -> Option<String> {
    let crumbs = decompose(path);
    if crumbs.len() < 2 {
        return None;
    }
    crumbs.into_iter().rev().nth(1).map(|c| c.path)
}
