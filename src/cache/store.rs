use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

#[derive(Debug, Default)]
struct Inner {
    path: Option<PathBuf>,
    entries: BTreeMap<String, Value>,
}

/// Key/value state that survives restarts.
///
/// Values are stored as JSON. Clones share the same store; all access
/// happens on one thread. Every write rewrites the backing file; a failed
/// write is logged and the in-memory value is still updated.
#[derive(Debug, Clone, Default)]
pub struct Cache {
    inner: Rc<RefCell<Inner>>,
}

impl Cache {
    /// A cache that never touches the disk.
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Open the cache file at `path`.
    ///
    /// A missing file starts empty. So does an unreadable or corrupt one,
    /// after a warning; it is overwritten on the next write.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match fs::read(&path) {
            Ok(bytes) => match serde_json::from_slice::<BTreeMap<String, Value>>(&bytes) {
                Ok(entries) => entries,
                Err(e) => {
                    log::warn!("ignoring corrupt cache file {}: {e}", path.display());
                    BTreeMap::new()
                }
            },
            Err(e) if e.kind() == io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                log::warn!("cannot read cache file {}: {e}", path.display());
                BTreeMap::new()
            }
        };
        log::debug!("opened cache {} with {} keys", path.display(), entries.len());

        Self {
            inner: Rc::new(RefCell::new(Inner {
                path: Some(path),
                entries,
            })),
        }
    }

    pub fn path(&self) -> Option<PathBuf> {
        self.inner.borrow().path.clone()
    }

    /// Read `key` as `T`. Missing keys and values of another shape are misses.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let inner = self.inner.borrow();
        let value = inner.entries.get(key)?;
        match T::deserialize(value) {
            Ok(v) => Some(v),
            Err(e) => {
                log::debug!("cache key {key:?} does not decode: {e}");
                None
            }
        }
    }

    /// Store `value` under `key`. A value that serializes to `null`
    /// (such as `None`) removes the key instead.
    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) {
        let value = match serde_json::to_value(value) {
            Ok(v) => v,
            Err(e) => {
                log::warn!("cannot serialize cache key {key:?}: {e}");
                return;
            }
        };

        {
            let mut inner = self.inner.borrow_mut();
            if value.is_null() {
                if inner.entries.remove(key).is_none() {
                    return;
                }
            } else {
                inner.entries.insert(key.to_string(), value);
            }
        }
        self.persist();
    }

    pub fn remove(&self, key: &str) {
        let removed = self.inner.borrow_mut().entries.remove(key).is_some();
        if removed {
            self.persist();
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.inner.borrow().entries.contains_key(key)
    }

    pub fn keys(&self) -> Vec<String> {
        self.inner.borrow().entries.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.borrow().entries.is_empty()
    }

    fn persist(&self) {
        let inner = self.inner.borrow();
        let Some(path) = inner.path.as_deref() else {
            return;
        };
        if let Err(e) = write_atomic(path, &inner.entries) {
            log::warn!("cannot write cache file {}: {e}", path.display());
        }
    }
}

/// Write through a sibling temp file so readers never see half a file.
fn write_atomic(path: &Path, entries: &BTreeMap<String, Value>) -> io::Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    let bytes = serde_json::to_vec(entries).map_err(io::Error::other)?;
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);
    fs::write(&tmp, bytes)?;
    fs::rename(&tmp, path)
}
