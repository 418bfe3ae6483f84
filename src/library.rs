//! Library records and the helpers that derive or load them.
//!
//! `library::model` holds the plain record types. Album/artist derivation and
//! ordering helpers live in `library::album`, formatting in `library::display`,
//! and the local filesystem scanner in `library::scan`.

mod album;
mod display;
mod model;
mod scan;

pub use album::{
    album_hash, albums_from_tracks, artists_from_tracks, move_track, reindex, sort_by_track_no,
};
pub use display::{display_from_fields, format_seconds, put_commas};
pub use model::*;
pub use scan::{FolderListing, list_folder, read_track, scan, split_artists};

#[cfg(test)]
mod tests;
