//! Application model types: `Browser` and `SearchResults`.

use std::time::{Duration, Instant};

use crate::cache::{Cache, RecentPaths, keys};
use crate::config::Settings;
use crate::debounce::{Clock, Debounced, SystemClock};
use crate::library::{AlbumInfo, Artist, Folder, Library, Origin, Playlist, SubPath, Track};
use crate::navigation;
use crate::observe::SubscriptionId;
use crate::search::{
    SearchIndex, album_keys, artist_keys, folder_keys, playlist_keys, track_keys,
};

/// Ranked matches for one committed query, as positions into the library.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchResults {
    pub query: String,
    pub tracks: Vec<usize>,
    pub albums: Vec<usize>,
    pub artists: Vec<usize>,
    pub folders: Vec<usize>,
    pub playlists: Vec<usize>,
}

impl SearchResults {
    pub fn total(&self) -> usize {
        self.tracks.len()
            + self.albums.len()
            + self.artists.len()
            + self.folders.len()
            + self.playlists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

#[derive(Debug, Clone)]
struct Indexes {
    tracks: SearchIndex,
    albums: SearchIndex,
    artists: SearchIndex,
    folders: SearchIndex,
    playlists: SearchIndex,
}

impl Indexes {
    fn build(library: &Library, threshold: f64) -> Self {
        Self {
            tracks: SearchIndex::build(&library.tracks, &track_keys(), threshold),
            albums: SearchIndex::build(&library.albums, &album_keys(), threshold),
            artists: SearchIndex::build(&library.artists, &artist_keys(), threshold),
            folders: SearchIndex::build(&library.folders, &folder_keys(), threshold),
            playlists: SearchIndex::build(&library.playlists, &playlist_keys(), threshold),
        }
    }
}

/// Everything a front end needs to browse one library.
///
/// The browser is single-threaded. Its owner feeds it raw query text with
/// [`set_query`](Self::set_query) and calls [`poll`](Self::poll) whenever
/// [`time_until_settle`](Self::time_until_settle) runs out; results only
/// change when a query commits or the library is replaced.
pub struct Browser<C: Clock = SystemClock> {
    library: Library,
    query: Debounced<String, C>,
    indexes: Indexes,
    threshold: f64,
    limit: Option<usize>,
    results: SearchResults,
    cache: Cache,
    recent: RecentPaths,
    trail: Vec<SubPath>,
    current: Option<String>,
    origin: Option<Origin>,
}

impl Browser<SystemClock> {
    pub fn new(library: Library, cache: Cache, settings: &Settings) -> Self {
        Self::with_clock(library, cache, settings, SystemClock)
    }
}

impl<C: Clock> Browser<C> {
    pub fn with_clock(library: Library, cache: Cache, settings: &Settings, clock: C) -> Self {
        let threshold = settings.search.threshold;
        let indexes = Indexes::build(&library, threshold);
        let recent = RecentPaths::new(
            cache.clone(),
            keys::RECENT_PATHS,
            settings.cache.recent_paths,
        );

        let mut browser = Self {
            library,
            query: Debounced::with_clock(String::new(), settings.debounce(), clock),
            indexes,
            threshold,
            limit: settings.search.limit,
            results: SearchResults::default(),
            cache,
            recent,
            trail: Vec::new(),
            current: None,
            origin: None,
        };
        browser.run_search();
        browser
    }

    pub fn library(&self) -> &Library {
        &self.library
    }

    pub fn cache(&self) -> &Cache {
        &self.cache
    }

    /// Replace the whole library and re-run the committed query against it.
    pub fn set_library(&mut self, library: Library) {
        self.indexes = Indexes::build(&library, self.threshold);
        self.library = library;
        self.run_search();
    }

    /// Replace only the folder listing, e.g. after opening another folder.
    pub fn set_folders(&mut self, folders: Vec<Folder>) {
        self.indexes.folders = SearchIndex::build(&folders, &folder_keys(), self.threshold);
        self.library.folders = folders;
        self.results.folders = self.ranked(&self.indexes.folders);
    }

    /// Feed raw input. The search only runs once the input settles.
    pub fn set_query(&mut self, raw: impl Into<String>) {
        self.query.set_raw(raw.into());
    }

    pub fn raw_query(&self) -> &str {
        self.query.raw()
    }

    pub fn committed_query(&self) -> &str {
        self.query.committed()
    }

    /// Time left before a pending query commits, `None` if nothing is pending.
    pub fn time_until_settle(&self) -> Option<Duration> {
        self.query.time_until_settle()
    }

    /// Commit the query if it has settled. Returns true when results changed.
    pub fn poll(&mut self) -> bool {
        if !self.query.poll() {
            return false;
        }
        self.on_commit();
        true
    }

    /// Commit a pending query now, skipping the rest of the quiet period.
    pub fn flush_query(&mut self) -> bool {
        if !self.query.flush() {
            return false;
        }
        self.on_commit();
        true
    }

    /// Be told about every committed query.
    pub fn subscribe_query(&mut self, callback: impl FnMut(&String) + 'static) -> SubscriptionId {
        self.query.subscribe(callback)
    }

    pub fn unsubscribe_query(&mut self, id: SubscriptionId) -> bool {
        self.query.unsubscribe(id)
    }

    fn on_commit(&mut self) {
        self.run_search();
        let query = self.query.committed().trim();
        if query.is_empty() {
            self.cache.remove(keys::LAST_QUERY);
        } else {
            self.cache.set(keys::LAST_QUERY, query);
        }
    }

    pub fn results(&self) -> &SearchResults {
        &self.results
    }

    pub fn tracks(&self) -> Vec<&Track> {
        resolve(&self.library.tracks, &self.results.tracks)
    }

    pub fn albums(&self) -> Vec<&AlbumInfo> {
        resolve(&self.library.albums, &self.results.albums)
    }

    pub fn artists(&self) -> Vec<&Artist> {
        resolve(&self.library.artists, &self.results.artists)
    }

    pub fn folders(&self) -> Vec<&Folder> {
        resolve(&self.library.folders, &self.results.folders)
    }

    pub fn playlists(&self) -> Vec<&Playlist> {
        resolve(&self.library.playlists, &self.results.playlists)
    }

    fn run_search(&mut self) {
        let started = Instant::now();
        self.results = SearchResults {
            query: self.query.committed().clone(),
            tracks: self.ranked(&self.indexes.tracks),
            albums: self.ranked(&self.indexes.albums),
            artists: self.ranked(&self.indexes.artists),
            folders: self.ranked(&self.indexes.folders),
            playlists: self.ranked(&self.indexes.playlists),
        };
        log::debug!(
            "search {:?}: {} results in {:?}",
            self.results.query,
            self.results.total(),
            started.elapsed()
        );
    }

    fn ranked(&self, index: &SearchIndex) -> Vec<usize> {
        let query = self.query.committed();
        let mut hits = index.search(query);
        if let Some(limit) = self.limit.filter(|_| !query.trim().is_empty()) {
            hits.truncate(limit);
        }
        hits
    }

    pub fn breadcrumbs(&self) -> &[SubPath] {
        &self.trail
    }

    pub fn current_folder(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Move to `path`, updating breadcrumbs and the persisted history.
    pub fn open_folder(&mut self, path: &str) {
        self.trail = navigation::navigate(path, &self.trail);
        self.current = Some(path.to_string());
        self.recent.push(path);
        self.cache.set(keys::LAST_FOLDER, path);
        self.set_origin(Origin::Folder {
            path: path.to_string(),
            name: self
                .trail
                .iter()
                .find(|c| c.active)
                .map(|c| c.name.clone())
                .unwrap_or_default(),
        });
    }

    /// Open the parent of the current folder. Returns the new folder, if any.
    pub fn go_up(&mut self) -> Option<String> {
        let parent = navigation::parent(self.current.as_deref()?)?;
        self.open_folder(&parent);
        Some(parent)
    }

    pub fn recent_paths(&self) -> Vec<String> {
        self.recent.list()
    }

    /// Where the tracks on screen came from.
    pub fn origin(&self) -> Option<&Origin> {
        self.origin.as_ref()
    }

    pub fn set_origin(&mut self, origin: Origin) {
        self.cache.set(keys::LAST_ORIGIN, &origin);
        self.origin = Some(origin);
    }

    /// Pick up where the last session stopped: reopen the last folder and
    /// commit the last query immediately. Returns the folder that was opened.
    pub fn restore(&mut self) -> Option<String> {
        self.origin = self.cache.get(keys::LAST_ORIGIN);

        if let Some(query) = self.cache.get::<String>(keys::LAST_QUERY) {
            log::debug!("restoring query {query:?}");
            self.query.set_raw(query);
            self.flush_query();
        }

        let folder = self.cache.get::<String>(keys::LAST_FOLDER)?;
        log::debug!("restoring folder {folder}");
        self.trail = navigation::navigate(&folder, &self.trail);
        self.current = Some(folder.clone());
        Some(folder)
    }

    /// Stop reacting to input. Pending queries are dropped without committing.
    pub fn close(&mut self) {
        self.query.dispose();
    }
}

fn resolve<'a, T>(items: &'a [T], positions: &[usize]) -> Vec<&'a T> {
    positions.iter().filter_map(|&i| items.get(i)).collect()
}
