//! Library browsing core: fuzzy search over tracks, albums, artists, folders
//! and playlists, a debounced query, breadcrumb navigation and a small
//! durable cache for state that should survive a restart.

pub mod app;
pub mod cache;
pub mod config;
pub mod debounce;
pub mod library;
pub mod navigation;
pub mod observe;
pub mod preferences;
pub mod runtime;
pub mod search;
pub mod source;
