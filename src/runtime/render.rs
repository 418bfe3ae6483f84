//! Plain-text rendering of breadcrumbs and search results.

use std::io::{self, Write};

use crate::app::Browser;
use crate::config::Settings;
use crate::debounce::Clock;
use crate::library::{SubPath, display_from_fields, format_seconds, put_commas};

/// Rows printed per section before the rest is summarised.
const MAX_ROWS: usize = 10;

/// `music / Rock / [Album]`, with the active crumb bracketed.
pub fn breadcrumbs(out: &mut impl Write, crumbs: &[SubPath]) -> io::Result<()> {
    if crumbs.is_empty() {
        return writeln!(out, "/");
    }
    let line = crumbs
        .iter()
        .map(|c| {
            if c.active {
                format!("[{}]", c.name)
            } else {
                c.name.clone()
            }
        })
        .collect::<Vec<_>>()
        .join(" / ");
    writeln!(out, "{line}")
}

pub fn results<C: Clock>(
    out: &mut impl Write,
    browser: &Browser<C>,
    settings: &Settings,
) -> io::Result<()> {
    let results = browser.results();
    let query = results.query.trim();
    if query.is_empty() {
        writeln!(out, "{} items", put_commas(results.total() as u64))?;
    } else {
        writeln!(
            out,
            "{} results for {query:?}",
            put_commas(results.total() as u64)
        )?;
    }

    let lib = &settings.library;
    section(out, "Tracks", browser.tracks(), |t| {
        let name = display_from_fields(t, &lib.display_fields, &lib.display_separator);
        match t.length {
            Some(secs) => format!("{name}  {}", format_seconds(u64::from(secs), false)),
            None => name,
        }
    })?;
    section(out, "Albums", browser.albums(), |a| {
        format!(
            "{} - {} ({} tracks, {})",
            a.title,
            a.artist,
            a.count,
            format_seconds(a.duration, true)
        )
    })?;
    section(out, "Artists", browser.artists(), |a| a.name.clone())?;
    section(out, "Folders", browser.folders(), |f| {
        format!("{}/ ({} tracks)", f.name, put_commas(u64::from(f.trackcount)))
    })?;
    section(out, "Playlists", browser.playlists(), |p| {
        format!("{} ({} tracks)", p.name, p.track_count())
    })
}

fn section<T>(
    out: &mut impl Write,
    title: &str,
    items: Vec<&T>,
    line: impl Fn(&T) -> String,
) -> io::Result<()> {
    if items.is_empty() {
        return Ok(());
    }
    writeln!(out, "{title}:")?;
    for &item in items.iter().take(MAX_ROWS) {
        writeln!(out, "  {}", line(item))?;
    }
    if items.len() > MAX_ROWS {
        writeln!(out, "  ... {} more", items.len() - MAX_ROWS)?;
    }
    Ok(())
}
