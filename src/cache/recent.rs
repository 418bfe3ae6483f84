use super::store::Cache;

/// Most-recently-opened folder paths, newest first, stored in the cache.
#[derive(Debug, Clone)]
pub struct RecentPaths {
    cache: Cache,
    key: String,
    capacity: usize,
}

impl RecentPaths {
    pub fn new(cache: Cache, key: impl Into<String>, capacity: usize) -> Self {
        Self {
            cache,
            key: key.into(),
            capacity: capacity.max(1),
        }
    }

    /// Stored paths, trimmed to the current capacity.
    pub fn list(&self) -> Vec<String> {
        let mut paths: Vec<String> = self.cache.get(&self.key).unwrap_or_default();
        paths.truncate(self.capacity);
        paths
    }

    /// Move `path` to the front, dropping duplicates and the oldest overflow.
    pub fn push(&self, path: &str) {
        let mut paths = self.list();
        paths.retain(|p| p != path);
        paths.insert(0, path.to_string());
        paths.truncate(self.capacity);
        self.cache.set(&self.key, &paths);
    }

    pub fn clear(&self) {
        self.cache.remove(&self.key);
    }
}
