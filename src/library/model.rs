//! Library record types.
//!
//! Every record is plain data. Optional fields are skipped when serializing so
//! a missing value round-trips as "absent" rather than `null`.

use serde::{Deserialize, Serialize};

/// A single audio file as known to the library.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub trackid: String,
    pub title: String,
    /// Track artists in display order.
    #[serde(default)]
    pub artists: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub album: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub albumartist: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub albumhash: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filepath: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    /// Duration in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<u32>,
    /// Bitrate in kbps.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bitrate: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tracknumber: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disknumber: Option<u32>,
    /// Position inside whichever ordered list currently holds the track.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<usize>,
    /// Image reference (URL or cache key).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl Track {
    /// Create a track with only its identifying fields set.
    pub fn new(trackid: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            trackid: trackid.into(),
            title: title.into(),
            artists: Vec::new(),
            album: None,
            albumartist: None,
            albumhash: None,
            folder: None,
            filepath: None,
            genre: None,
            length: None,
            bitrate: None,
            tracknumber: None,
            disknumber: None,
            index: None,
            image: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Folder {
    pub name: String,
    /// Absolute path; unique per folder.
    pub path: String,
    #[serde(default)]
    pub trackcount: u32,
    #[serde(default)]
    pub subdircount: u32,
    #[serde(default)]
    pub is_sym: bool,
}

/// Album summary. The three kind flags are independent of each other.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlbumInfo {
    pub albumid: String,
    #[serde(default)]
    pub hash: String,
    pub title: String,
    #[serde(default)]
    pub artist: String,
    #[serde(default)]
    pub count: u32,
    /// Total duration in seconds.
    #[serde(default)]
    pub duration: u64,
    /// Free-form release date as found in the tags.
    #[serde(default)]
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default)]
    pub is_compilation: bool,
    #[serde(default)]
    pub is_soundtrack: bool,
    #[serde(default)]
    pub is_single: bool,
    /// Palette extracted from the cover art, most dominant first.
    #[serde(default)]
    pub colors: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artist {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Playlist {
    pub playlistid: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tracks: Option<Vec<Track>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
    #[serde(
        rename = "lastUpdated",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub last_updated: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumb: Option<String>,
}

impl Playlist {
    /// Number of tracks to display.
    ///
    /// The stored `count` can be stale, so the loaded track list wins when present.
    pub fn track_count(&self) -> usize {
        match (&self.tracks, self.count) {
            (Some(tracks), _) => tracks.len(),
            (None, Some(count)) => count as usize,
            (None, None) => 0,
        }
    }
}

/// One breadcrumb segment of a folder path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubPath {
    pub name: String,
    pub path: String,
    pub active: bool,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotifType {
    Info,
    Success,
    Error,
    Warning,
}

/// Transient user-facing message. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub text: String,
    pub kind: NotifType,
}

impl Notification {
    pub fn new(text: impl Into<String>, kind: NotifType) -> Self {
        Self {
            text: text.into(),
            kind,
        }
    }
}

/// Context menu entry. What happens on click is up to the front end.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuOption {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default)]
    pub critical: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<MenuOption>,
}

impl MenuOption {
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }
}

/// Where the currently listed tracks came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Origin {
    Folder { path: String, name: String },
    Album { name: String, albumartist: String },
    Playlist { name: String, playlistid: String },
    Search { query: String },
}

/// All collections a browser session works with.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Library {
    #[serde(default)]
    pub tracks: Vec<Track>,
    #[serde(default)]
    pub folders: Vec<Folder>,
    #[serde(default)]
    pub albums: Vec<AlbumInfo>,
    #[serde(default)]
    pub artists: Vec<Artist>,
    #[serde(default)]
    pub playlists: Vec<Playlist>,
}

impl Library {
    /// Build a library from tracks alone, deriving albums and artists.
    pub fn from_tracks(tracks: Vec<Track>) -> Self {
        let albums = super::album::albums_from_tracks(&tracks);
        let artists = super::album::artists_from_tracks(&tracks);
        Self {
            tracks,
            folders: Vec::new(),
            albums,
            artists,
            playlists: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
            && self.folders.is_empty()
            && self.albums.is_empty()
            && self.artists.is_empty()
            && self.playlists.is_empty()
    }
}
