//! Durable local state.
//!
//! A single JSON file per installation maps string keys to values. Only
//! state that is explicitly written here survives a restart; the keys the
//! browser itself uses are listed in [`keys`].

mod recent;
mod store;

pub use recent::RecentPaths;
pub use store::Cache;

/// Well-known cache keys.
pub mod keys {
    pub const RECENT_PATHS: &str = "recent-paths";
    pub const LAST_FOLDER: &str = "last-folder";
    pub const LAST_QUERY: &str = "last-query";
    pub const LAST_ORIGIN: &str = "last-origin";

    /// Key for a persisted preference value.
    pub fn preference(name: &str) -> String {
        format!("pref:{name}")
    }
}
