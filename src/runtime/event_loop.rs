use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{Receiver, RecvTimeoutError};

use crate::app::Browser;
use crate::config;
use crate::debounce::Clock;
use crate::library::{Origin, list_folder};
use crate::runtime::render;

/// One line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Anything that is not a command is query text.
    Query(String),
    Cd(String),
    Up,
    Recent,
    Quit,
    Unknown(String),
}

impl Command {
    pub fn parse(line: &str) -> Self {
        let Some(rest) = line.trim_end_matches(['\r', '\n']).strip_prefix(':') else {
            return Self::Query(line.trim_end_matches(['\r', '\n']).to_string());
        };
        let (name, arg) = match rest.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (rest.trim(), ""),
        };
        match (name, arg) {
            ("cd", "..") | ("up", _) => Self::Up,
            ("cd", "") => Self::Unknown("cd needs a folder".into()),
            ("cd", path) => Self::Cd(path.to_string()),
            ("recent", _) => Self::Recent,
            ("q" | "quit", _) => Self::Quit,
            _ => Self::Unknown(format!("unknown command :{name}")),
        }
    }
}

/// Main input loop. Reads lines from `lines` until `:q` or end of input,
/// waking up in between whenever a pending query is due to settle.
pub fn run<C: Clock>(
    browser: &mut Browser<C>,
    settings: &config::Settings,
    lines: &Receiver<String>,
    out: &mut impl Write,
) -> io::Result<()> {
    loop {
        let next = match browser.time_until_settle() {
            Some(wait) => match lines.recv_timeout(wait) {
                Ok(line) => Some(line),
                Err(RecvTimeoutError::Timeout) => None,
                Err(RecvTimeoutError::Disconnected) => break,
            },
            None => match lines.recv() {
                Ok(line) => Some(line),
                Err(_) => break,
            },
        };

        if let Some(line) = next {
            match Command::parse(&line) {
                Command::Query(text) => browser.set_query(text),
                Command::Cd(arg) => {
                    let target = resolve(browser.current_folder(), &arg);
                    open(browser, settings, &target, out)?;
                }
                Command::Up => match browser.go_up() {
                    Some(parent) => {
                        browser.set_folders(list_folder(Path::new(&parent), &settings.library).folders);
                        render::breadcrumbs(out, browser.breadcrumbs())?;
                        render::results(out, browser, settings)?;
                    }
                    None => writeln!(out, "already at the top")?,
                },
                Command::Recent => {
                    for (i, path) in browser.recent_paths().iter().enumerate() {
                        writeln!(out, "{:>2}  {path}", i + 1)?;
                    }
                }
                Command::Quit => {
                    browser.close();
                    return Ok(());
                }
                Command::Unknown(msg) => writeln!(out, "{msg}")?,
            }
        }

        if browser.poll() {
            render::results(out, browser, settings)?;
        }
        out.flush()?;
    }

    // End of input: whatever was typed last still gets an answer.
    if browser.flush_query() {
        render::results(out, browser, settings)?;
    }
    browser.close();
    out.flush()
}

fn resolve(current: Option<&str>, arg: &str) -> PathBuf {
    let path = Path::new(arg);
    match current {
        Some(cur) if path.is_relative() => Path::new(cur).join(path),
        _ => path.to_path_buf(),
    }
}

/// Open `dir` in the browser and show its contents.
pub fn open<C: Clock>(
    browser: &mut Browser<C>,
    settings: &config::Settings,
    dir: &Path,
    out: &mut impl Write,
) -> io::Result<()> {
    if !dir.is_dir() {
        log::warn!("not a folder: {}", dir.display());
        return writeln!(out, "no such folder: {}", dir.display());
    }
    let listing = list_folder(dir, &settings.library);
    browser.open_folder(&dir.display().to_string());
    browser.set_folders(listing.folders);
    render::breadcrumbs(out, browser.breadcrumbs())?;
    writeln!(out, "{} tracks here", listing.tracks.len())?;
    render::results(out, browser, settings)
}

/// Reopen the folder the last session ended in, or `root` when that folder
/// is gone or lies outside it.
pub fn resume<C: Clock>(
    browser: &mut Browser<C>,
    settings: &config::Settings,
    root: &Path,
    out: &mut impl Write,
) -> io::Result<()> {
    let last = browser.restore();
    let origin = browser.origin().cloned();

    let dir = match last.as_deref().map(Path::new) {
        Some(last) if last.starts_with(root) && last.is_dir() => last.to_path_buf(),
        _ => root.to_path_buf(),
    };
    open(browser, settings, &dir, out)?;

    // A saved album, playlist or search origin outlives reopening the folder.
    if let Some(origin) = origin.filter(|o| !matches!(o, Origin::Folder { .. })) {
        browser.set_origin(origin);
    }
    Ok(())
}
