use std::path::Path;

use crate::config::TrackDisplayField;

use super::model::Track;

/// Build a display string for a track according to the provided `fields` and separator.
///
/// This composes metadata fields (artists, title, album, filename, path) in the
/// configured order and falls back to `title` when no parts were produced.
pub fn display_from_fields(track: &Track, fields: &[TrackDisplayField], sep: &str) -> String {
    let mut parts: Vec<String> = Vec::new();
    let title = track.title.trim();
    let artists = joined_artists(&track.artists);

    for f in fields {
        match f {
            TrackDisplayField::Display => {
                // "display" on its own means "artists - title".
                if let Some(a) = artists.as_deref() {
                    parts.push(a.to_string());
                }
                if !title.is_empty() {
                    parts.push(title.to_string());
                }
            }
            TrackDisplayField::Title => {
                if !title.is_empty() {
                    parts.push(title.to_string());
                }
            }
            TrackDisplayField::Artist => {
                if let Some(a) = artists.as_deref() {
                    parts.push(a.to_string());
                }
            }
            TrackDisplayField::Album => {
                if let Some(a) = track.album.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
                    parts.push(a.to_string());
                }
            }
            TrackDisplayField::Filename => {
                if let Some(stem) = track
                    .filepath
                    .as_deref()
                    .and_then(|p| Path::new(p).file_stem())
                    .and_then(|s| s.to_str())
                    .filter(|s| !s.trim().is_empty())
                {
                    parts.push(stem.to_string());
                }
            }
            TrackDisplayField::Path => {
                if let Some(p) = track.filepath.as_deref() {
                    parts.push(p.to_string());
                }
            }
        }
    }

    if parts.is_empty() {
        track.title.clone()
    } else {
        parts.join(sep)
    }
}

fn joined_artists(artists: &[String]) -> Option<String> {
    let names: Vec<&str> = artists
        .iter()
        .map(|a| a.trim())
        .filter(|a| !a.is_empty())
        .collect();
    if names.is_empty() {
        None
    } else {
        Some(names.join(", "))
    }
}

/// Format a duration in seconds.
///
/// Short form is `m:ss` or `h:mm:ss`. Long form spells out units, e.g.
/// `1 hr 5 min` or `3 min 20 sec`.
pub fn format_seconds(seconds: u64, long: bool) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;

    if long {
        if hours > 0 {
            format!("{hours} hr {minutes} min")
        } else if minutes > 0 {
            format!("{minutes} min {secs} sec")
        } else {
            format!("{secs} sec")
        }
    } else if hours > 0 {
        format!("{hours}:{minutes:02}:{secs:02}")
    } else {
        format!("{minutes}:{secs:02}")
    }
}

/// Group digits in thousands: `1234567` -> `1,234,567`.
pub fn put_commas(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
