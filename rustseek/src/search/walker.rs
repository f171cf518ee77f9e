use std::collections::VecDeque;
use std::fs::{self, ReadDir};
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, trace, warn};

use super::matcher::NameMatcher;
use crate::results::WalkStats;

/// Walks a directory tree and yields the canonical absolute path of every
/// regular file whose name matches.
///
/// The walk is lazy: directories are opened as the iterator advances and a
/// match surfaces as soon as its directory is reached. Whether a whole
/// subtree contained anything is simply whether the iterator yielded at
/// all, no matter how deep the match sat.
///
/// Error containment is per scope. An unreadable subdirectory is skipped
/// without touching its siblings, an entry whose metadata is unavailable is
/// skipped by itself, and only failure to open the root aborts the walk.
pub struct TreeWalker {
    matcher: NameMatcher,
    recursive: bool,
    current: Option<ReadDir>,
    pending: VecDeque<PathBuf>,
    stats: WalkStats,
}

impl TreeWalker {
    /// Opens `root` for enumeration. This is the only walk error a caller
    /// sees as fatal; everything below the root degrades to skip counters.
    pub fn open(root: &Path, matcher: NameMatcher, recursive: bool) -> io::Result<Self> {
        let current = fs::read_dir(root)?;
        Ok(Self {
            matcher,
            recursive,
            current: Some(current),
            pending: VecDeque::new(),
            stats: WalkStats {
                dirs_visited: 1,
                ..WalkStats::default()
            },
        })
    }

    /// Counters for the walk so far. Complete once the iterator is
    /// exhausted.
    pub fn stats(&self) -> &WalkStats {
        &self.stats
    }
}

impl Iterator for TreeWalker {
    type Item = PathBuf;

    fn next(&mut self) -> Option<PathBuf> {
        loop {
            let entry = match self.current.as_mut().and_then(|iter| iter.next()) {
                Some(entry) => entry,
                None => {
                    // Current directory exhausted; open the next queued
                    // one. An empty queue ends the walk.
                    self.current = None;
                    let next_dir = self.pending.pop_front()?;
                    match fs::read_dir(&next_dir) {
                        Ok(iter) => {
                            self.stats.dirs_visited += 1;
                            self.current = Some(iter);
                        }
                        Err(e) => {
                            self.stats.dirs_skipped += 1;
                            warn!("cannot open directory {}: {}", next_dir.display(), e);
                        }
                    }
                    continue;
                }
            };

            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    self.stats.entries_skipped += 1;
                    warn!("unreadable directory entry: {}", e);
                    continue;
                }
            };

            self.stats.entries_examined += 1;
            let path = entry.path();

            // metadata() follows symlinks, so a link counts as whatever it
            // points at and a dangling link is skipped here.
            let meta = match fs::metadata(&path) {
                Ok(meta) => meta,
                Err(e) => {
                    self.stats.entries_skipped += 1;
                    warn!("cannot stat {}: {}", path.display(), e);
                    continue;
                }
            };

            if meta.is_file() {
                let file_name = entry.file_name();
                let name = match file_name.to_str() {
                    Some(name) => name,
                    // A name that is not valid UTF-8 cannot equal any
                    // target string.
                    None => continue,
                };
                if self.matcher.is_match(name) {
                    match resolve_match_path(&path) {
                        Ok(resolved) => {
                            trace!("match at {}", resolved.display());
                            return Some(resolved);
                        }
                        Err(e) => {
                            self.stats.resolve_failures += 1;
                            debug!("cannot resolve {}: {}", path.display(), e);
                        }
                    }
                }
            } else if meta.is_dir() && self.recursive {
                self.pending.push_back(path);
            }
        }
    }
}

/// Absolute form of a confirmed match. Canonicalization consults the
/// filesystem, so a file that vanished between enumeration and here is
/// dropped rather than reported with a dead path.
fn resolve_match_path(path: &Path) -> io::Result<PathBuf> {
    let canonical = fs::canonicalize(path)?;
    Ok(strip_unc_prefix(&canonical))
}

/// Strips the Windows UNC prefix (\\?\) from a path if present
fn strip_unc_prefix(p: &Path) -> PathBuf {
    let s = p.display().to_string();
    if let Some(stripped) = s.strip_prefix(r"\\?\") {
        PathBuf::from(stripped)
    } else {
        p.to_path_buf()
    }
}
