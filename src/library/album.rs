use std::collections::HashMap;
use std::collections::HashSet;

use super::model::{AlbumInfo, Artist, Track};

/// Stable album key: title + artist, lowercased, alphanumerics only.
pub fn album_hash(title: &str, artist: &str) -> String {
    title
        .chars()
        .chain(artist.chars())
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

fn album_artist(track: &Track) -> &str {
    track
        .albumartist
        .as_deref()
        .or_else(|| track.artists.first().map(String::as_str))
        .unwrap_or("")
}

/// Group tracks into albums, in order of first appearance.
///
/// Tracks without an album are skipped. Durations of tracks without a length
/// count as zero.
pub fn albums_from_tracks(tracks: &[Track]) -> Vec<AlbumInfo> {
    let mut albums: Vec<AlbumInfo> = Vec::new();
    let mut by_hash: HashMap<String, usize> = HashMap::new();

    for track in tracks {
        let Some(title) = track.album.as_deref().filter(|a| !a.trim().is_empty()) else {
            continue;
        };
        let artist = album_artist(track);
        let hash = track
            .albumhash
            .clone()
            .unwrap_or_else(|| album_hash(title, artist));

        let slot = *by_hash.entry(hash.clone()).or_insert_with(|| {
            albums.push(AlbumInfo {
                albumid: hash.clone(),
                hash: hash.clone(),
                title: title.to_string(),
                artist: artist.to_string(),
                count: 0,
                duration: 0,
                date: String::new(),
                image: track.image.clone(),
                is_compilation: false,
                is_soundtrack: false,
                is_single: false,
                colors: Vec::new(),
            });
            albums.len() - 1
        });

        let album = &mut albums[slot];
        album.count += 1;
        album.duration += u64::from(track.length.unwrap_or(0));
        if album.image.is_none() {
            album.image = track.image.clone();
        }
    }

    for album in &mut albums {
        album.is_single = album.count == 1;
    }

    albums
}

/// Unique artists across all tracks, first spelling wins (case-insensitive).
pub fn artists_from_tracks(tracks: &[Track]) -> Vec<Artist> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut artists = Vec::new();

    for name in tracks.iter().flat_map(|t| t.artists.iter()) {
        let name = name.trim();
        if name.is_empty() {
            continue;
        }
        if seen.insert(name.to_lowercase()) {
            artists.push(Artist {
                name: name.to_string(),
                image: None,
            });
        }
    }

    artists
}

/// Sort tracks by disc number, then track number, and refresh indices.
/// Missing numbers sort first.
pub fn sort_by_track_no(tracks: &mut [Track]) {
    tracks.sort_by_key(|t| (t.disknumber.unwrap_or(0), t.tracknumber.unwrap_or(0)));
    reindex(tracks);
}

/// Recompute `index` from each track's position.
pub fn reindex(tracks: &mut [Track]) {
    for (i, track) in tracks.iter_mut().enumerate() {
        track.index = Some(i);
    }
}

/// Move a track inside an ordered list and refresh indices.
///
/// Returns `false` (and leaves the list untouched) when either position is out of bounds.
pub fn move_track(tracks: &mut Vec<Track>, from: usize, to: usize) -> bool {
    if from >= tracks.len() || to >= tracks.len() {
        return false;
    }
    let track = tracks.remove(from);
    tracks.insert(to, track);
    reindex(tracks);
    true
}
