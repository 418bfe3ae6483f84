use std::fmt;

use crate::library::{AlbumInfo, Artist, Folder, Playlist, Track};

/// A searchable field of `T` and how much a match on it counts.
///
/// The accessor returns every value of the field; absent optional fields
/// return nothing and multi-valued fields (artists) return each entry.
pub struct SearchKey<T> {
    pub name: &'static str,
    pub weight: f64,
    pub accessor: fn(&T) -> Vec<&str>,
}

impl<T> SearchKey<T> {
    pub fn new(name: &'static str, weight: f64, accessor: fn(&T) -> Vec<&str>) -> Self {
        Self {
            name,
            weight,
            accessor,
        }
    }

    pub fn values<'a>(&self, item: &'a T) -> Vec<&'a str> {
        (self.accessor)(item)
    }
}

// Manual impls: a derive would demand `T: Clone`/`T: Debug`.
impl<T> Clone for SearchKey<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for SearchKey<T> {}

impl<T> fmt::Debug for SearchKey<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchKey")
            .field("name", &self.name)
            .field("weight", &self.weight)
            .finish()
    }
}

fn one(value: &str) -> Vec<&str> {
    vec![value]
}

fn maybe(value: Option<&String>) -> Vec<&str> {
    value.map(String::as_str).into_iter().collect()
}

pub fn track_keys() -> Vec<SearchKey<Track>> {
    vec![
        SearchKey::new("title", 1.0, |t: &Track| one(&t.title)),
        SearchKey::new("artists", 0.8, |t: &Track| {
            t.artists.iter().map(String::as_str).collect()
        }),
        SearchKey::new("album", 0.5, |t: &Track| maybe(t.album.as_ref())),
    ]
}

pub fn album_keys() -> Vec<SearchKey<AlbumInfo>> {
    vec![
        SearchKey::new("title", 1.0, |a: &AlbumInfo| one(&a.title)),
        SearchKey::new("artist", 0.8, |a: &AlbumInfo| one(&a.artist)),
    ]
}

pub fn artist_keys() -> Vec<SearchKey<Artist>> {
    vec![SearchKey::new("name", 1.0, |a: &Artist| one(&a.name))]
}

pub fn folder_keys() -> Vec<SearchKey<Folder>> {
    vec![SearchKey::new("name", 1.0, |f: &Folder| one(&f.name))]
}

pub fn playlist_keys() -> Vec<SearchKey<Playlist>> {
    vec![
        SearchKey::new("name", 1.0, |p: &Playlist| one(&p.name)),
        SearchKey::new("description", 0.5, |p: &Playlist| maybe(p.description.as_ref())),
    ]
}
