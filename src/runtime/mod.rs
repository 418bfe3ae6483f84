use std::env;
use std::io::{self, BufRead};
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;

use crate::app::Browser;
use crate::cache::Cache;
use crate::config::Settings;
use crate::library::{Library, list_folder, scan};

mod event_loop;
mod render;
mod settings;

pub use event_loop::Command;
pub use settings::load_settings;

/// Scan `dir` (or the configured root, or the working directory) and browse
/// it interactively from stdin until `:q` or end of input.
pub fn run(dir: Option<PathBuf>) -> Result<(), Box<dyn std::error::Error>> {
    let settings = load_settings();

    let dir = dir
        .or_else(|| settings.library.root.clone())
        .or_else(|| env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("Music"));

    let cache = open_cache(&settings);
    let mut library = Library::from_tracks(scan(&dir, &settings.library));
    library.folders = list_folder(&dir, &settings.library).folders;
    log::info!(
        "scanned {}: {} tracks, {} albums, {} artists",
        dir.display(),
        library.tracks.len(),
        library.albums.len(),
        library.artists.len()
    );

    let mut browser = Browser::new(library, cache, &settings);
    let mut stdout = io::stdout().lock();

    event_loop::resume(&mut browser, &settings, &dir, &mut stdout)?;

    let lines = spawn_stdin_reader();
    event_loop::run(&mut browser, &settings, &lines, &mut stdout)?;
    Ok(())
}

fn open_cache(settings: &Settings) -> Cache {
    if !settings.cache.enabled {
        return Cache::in_memory();
    }
    match settings.cache_path() {
        Some(path) => Cache::open(path),
        None => {
            log::warn!("no cache location available; state will not be kept");
            Cache::in_memory()
        }
    }
}

/// Forward stdin lines over a channel so the main loop can wait on input and
/// the debounce deadline at the same time.
fn spawn_stdin_reader() -> mpsc::Receiver<String> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
    });
    rx
}
