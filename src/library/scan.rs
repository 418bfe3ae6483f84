use std::path::Path;

use lofty::prelude::{Accessor, AudioFile, TaggedFileExt};
use walkdir::{DirEntry, WalkDir};

use crate::config::LibrarySettings;

use super::album::{album_hash, reindex};
use super::display::display_from_fields;
use super::model::{Folder, Track};

/// Contents of one directory: its sub-folders and the tracks directly inside it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FolderListing {
    pub folders: Vec<Folder>,
    pub tracks: Vec<Track>,
}

fn is_audio_file(path: &Path, settings: &LibrarySettings) -> bool {
    let exts: Vec<String> = settings
        .extensions
        .iter()
        .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|e| !e.is_empty())
        .collect();

    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            exts.iter().any(|e| e == &ext)
        })
        .unwrap_or(false)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

fn visible(entry: &DirEntry, settings: &LibrarySettings) -> bool {
    settings.include_hidden || entry.depth() == 0 || !is_hidden(entry.path())
}

/// Split a raw artist tag into individual names.
pub fn split_artists(raw: &str, separators: &[String]) -> Vec<String> {
    let mut names = vec![raw.to_string()];
    for sep in separators.iter().filter(|s| !s.is_empty()) {
        names = names
            .iter()
            .flat_map(|n| n.split(sep.as_str()))
            .map(str::to_string)
            .collect();
    }
    names
        .into_iter()
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
        .collect()
}

/// Build a track record for one audio file. Unreadable tags leave the
/// optional fields empty and the title falls back to the file stem.
pub fn read_track(path: &Path, settings: &LibrarySettings) -> Track {
    let filepath = path.display().to_string();
    let default_title = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("UNKNOWN")
        .to_string();

    let mut track = Track::new(filepath.clone(), default_title);
    track.filepath = Some(filepath);
    track.folder = path.parent().map(|p| p.display().to_string());

    match lofty::read_from_path(path) {
        Ok(tagged) => {
            let properties = tagged.properties();
            track.length = u32::try_from(properties.duration().as_secs()).ok();
            track.bitrate = properties.audio_bitrate();

            if let Some(tag) = tagged.primary_tag().or_else(|| tagged.first_tag()) {
                if let Some(v) = tag.title().filter(|v| !v.trim().is_empty()) {
                    track.title = v.trim().to_string();
                }
                if let Some(v) = tag.artist() {
                    track.artists = split_artists(&v, &settings.artist_separators);
                }
                if let Some(v) = tag.album().filter(|v| !v.trim().is_empty()) {
                    track.album = Some(v.trim().to_string());
                }
                if let Some(v) = tag.genre().filter(|v| !v.trim().is_empty()) {
                    track.genre = Some(v.trim().to_string());
                }
                track.tracknumber = tag.track();
                track.disknumber = tag.disk();
            }
        }
        Err(e) => log::debug!("no tags for {}: {e}", path.display()),
    }

    if let Some(album) = track.album.as_deref() {
        let artist = track.artists.first().map(String::as_str).unwrap_or("");
        let hash = album_hash(album, artist);
        track.albumartist = track.artists.first().cloned();
        track.image = Some(format!("{hash}.webp"));
        track.albumhash = Some(hash);
    }

    track
}

/// Recursively collect every audio file under `dir`, sorted by display string.
pub fn scan(dir: &Path, settings: &LibrarySettings) -> Vec<Track> {
    let mut walker = WalkDir::new(dir).follow_links(settings.follow_links);

    // Non-recursive = only the root directory.
    let depth_cap = if settings.recursive {
        settings.max_depth
    } else {
        Some(1)
    };
    if let Some(d) = depth_cap {
        walker = walker.max_depth(d);
    }

    let mut keyed: Vec<(String, Track)> = walker
        .into_iter()
        .filter_entry(|e| visible(e, settings))
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file() || e.path().is_file())
        .filter(|e| is_audio_file(e.path(), settings))
        .map(|e| {
            let track = read_track(e.path(), settings);
            let key = display_from_fields(
                &track,
                &settings.display_fields,
                &settings.display_separator,
            )
            .to_lowercase();
            (key, track)
        })
        .collect();

    keyed.sort_by(|a, b| a.0.cmp(&b.0));
    let mut tracks: Vec<Track> = keyed.into_iter().map(|(_, t)| t).collect();
    reindex(&mut tracks);

    log::debug!("scanned {} tracks under {}", tracks.len(), dir.display());
    tracks
}

fn count_folder(dir: &Path, settings: &LibrarySettings) -> (u32, u32) {
    let mut tracks = 0u32;
    let mut subdirs = 0u32;

    for entry in WalkDir::new(dir)
        .min_depth(1)
        .follow_links(settings.follow_links)
        .into_iter()
        .filter_entry(|e| visible(e, settings))
        .filter_map(Result::ok)
    {
        if entry.file_type().is_dir() {
            if entry.depth() == 1 {
                subdirs += 1;
            }
        } else if is_audio_file(entry.path(), settings) {
            tracks += 1;
        }
    }

    (tracks, subdirs)
}

/// List the immediate children of `dir`.
///
/// Folder track counts are recursive; `subdircount` only counts direct
/// children. Walkdir's loop detection keeps symlinked cycles finite.
pub fn list_folder(dir: &Path, settings: &LibrarySettings) -> FolderListing {
    let mut listing = FolderListing::default();

    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(settings.follow_links)
        .into_iter()
        .filter_entry(|e| visible(e, settings))
        .filter_map(Result::ok)
    {
        let path = entry.path();
        if entry.file_type().is_dir() {
            let (trackcount, subdircount) = count_folder(path, settings);
            listing.folders.push(Folder {
                name: entry.file_name().to_string_lossy().into_owned(),
                path: path.display().to_string(),
                trackcount,
                subdircount,
                is_sym: entry.path_is_symlink(),
            });
        } else if is_audio_file(path, settings) {
            listing.tracks.push(read_track(path, settings));
        }
    }

    listing
        .folders
        .sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
    listing.tracks.sort_by(|a, b| {
        a.title
            .to_lowercase()
            .cmp(&b.title.to_lowercase())
            .then_with(|| a.trackid.cmp(&b.trackid))
    });
    reindex(&mut listing.tracks);

    listing
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TrackDisplayField;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn is_audio_file_matches_configured_extensions_case_insensitive() {
        let settings = LibrarySettings::default();
        assert!(is_audio_file(Path::new("/tmp/a.mp3"), &settings));
        assert!(is_audio_file(Path::new("/tmp/a.MP3"), &settings));
        assert!(is_audio_file(Path::new("/tmp/a.flac"), &settings));
        assert!(!is_audio_file(Path::new("/tmp/a.txt"), &settings));
        assert!(!is_audio_file(Path::new("/tmp/a"), &settings));
    }

    #[test]
    fn split_artists_uses_every_separator() {
        let seps = vec![", ".to_string(), ";".to_string()];
        assert_eq!(
            split_artists("Peter Gabriel, Kate Bush; Youssou N'Dour", &seps),
            vec!["Peter Gabriel", "Kate Bush", "Youssou N'Dour"]
        );
        assert_eq!(split_artists("  ", &seps), Vec::<String>::new());
    }

    #[test]
    fn scan_filters_non_audio_sorts_and_indexes() {
        let dir = tempdir().unwrap();

        fs::write(dir.path().join("b.MP3"), b"not a real mp3").unwrap();
        fs::write(dir.path().join("A.ogg"), b"not a real ogg").unwrap();
        fs::write(dir.path().join("c.txt"), b"ignore me").unwrap();

        let settings = LibrarySettings {
            display_fields: vec![TrackDisplayField::Title],
            ..LibrarySettings::default()
        };
        let tracks = scan(dir.path(), &settings);
        assert_eq!(tracks.len(), 2);
        assert_eq!(tracks[0].title, "A");
        assert_eq!(tracks[0].index, Some(0));
        assert_eq!(tracks[1].title, "b");
        assert_eq!(tracks[1].index, Some(1));
        assert_eq!(
            tracks[1].folder.as_deref(),
            Some(dir.path().display().to_string().as_str())
        );
    }

    #[test]
    fn scan_respects_include_hidden_false() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(".hidden.mp3"), b"not real").unwrap();
        fs::write(dir.path().join("visible.mp3"), b"not real").unwrap();

        let settings = LibrarySettings {
            include_hidden: false,
            ..LibrarySettings::default()
        };
        let tracks = scan(dir.path(), &settings);

        assert_eq!(tracks.len(), 1);
        assert_eq!(tracks[0].title, "visible");
    }

    #[test]
    fn scan_respects_recursive_false() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("root.mp3"), b"not real").unwrap();
        let sub = dir.path().join("sub");
        fs::create_dir_all(&sub).unwrap();
        fs::write(sub.join("child.mp3"), b"not real").unwrap();

        let settings = LibrarySettings {
            recursive: false,
            ..LibrarySettings::default()
        };
        let tracks = scan(dir.path(), &settings);
        assert_eq!(tracks.len(), 1);
        assert_eq!(tracks[0].title, "root");
    }

    #[test]
    fn list_folder_counts_tracks_recursively() {
        let dir = tempdir().unwrap();
        let rock = dir.path().join("Rock");
        let album = rock.join("Album");
        fs::create_dir_all(&album).unwrap();
        fs::create_dir_all(dir.path().join("Jazz")).unwrap();
        fs::write(dir.path().join("loose.flac"), b"not real").unwrap();
        fs::write(rock.join("single.mp3"), b"not real").unwrap();
        fs::write(album.join("one.mp3"), b"not real").unwrap();
        fs::write(album.join("cover.jpg"), b"not audio").unwrap();

        let listing = list_folder(dir.path(), &LibrarySettings::default());

        let names: Vec<&str> = listing.folders.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["Jazz", "Rock"]);

        let rock = &listing.folders[1];
        assert_eq!(rock.trackcount, 2);
        assert_eq!(rock.subdircount, 1);
        assert!(!rock.is_sym);
        assert_eq!(listing.folders[0].trackcount, 0);

        assert_eq!(listing.tracks.len(), 1);
        assert_eq!(listing.tracks[0].title, "loose");
    }
}
