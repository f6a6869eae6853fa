//! Directory listing collaborators.
//!
//! A lister returns the *names* of the immediate children of one directory
//! that pass an [`EntryFilter`]. Turning names into full paths and ordering
//! them is the resolver's job.

pub mod listfile;

use crate::location::extension_of;
use std::io;
use std::path::Path;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;
use tracing::warn;
use walkdir::DirEntry;
use walkdir::WalkDir;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EntryFilter {
    /// Subdirectories that are neither hidden nor system entries.
    Directories,
    /// Files whose lower-cased extension equals the given one (dot included).
    Extension(String),
}

impl EntryFilter {
    /// Mask handed to external listing commands.
    pub fn mask(&self) -> String {
        match self {
            Self::Directories => "a:d+s-".to_string(),
            Self::Extension(extension) => format!("*{extension}"),
        }
    }
}

#[derive(Debug, Error)]
pub enum ListingError {
    #[error("failed to read directory {}: {source}", path.display())]
    ReadDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to prepare a list file: {0}")]
    TempFile(#[source] io::Error),
    #[error("failed to launch listing command `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },
    #[error("listing command `{program}` exited with {status}")]
    CommandFailed { program: String, status: String },
    #[error("listing command `{program}` timed out after {}ms", timeout.as_millis())]
    TimedOut { program: String, timeout: Duration },
    #[error("failed to read list file {}: {source}", path.display())]
    ReadList {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub trait DirectoryLister {
    fn list(&self, dir: &str, filter: &EntryFilter) -> Result<Vec<String>, ListingError>;
}

/// Lists directly from the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsLister;

impl DirectoryLister for FsLister {
    fn list(&self, dir: &str, filter: &EntryFilter) -> Result<Vec<String>, ListingError> {
        let root = Path::new(dir);
        let mut names = Vec::new();
        for entry in WalkDir::new(root).min_depth(1).max_depth(1) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) if err.depth() == 0 => {
                    return Err(ListingError::ReadDir {
                        path: root.to_path_buf(),
                        source: err.into(),
                    });
                }
                Err(err) => {
                    warn!("skipping unreadable entry in {dir}: {err}");
                    continue;
                }
            };
            let Some(name) = entry.file_name().to_str() else {
                warn!("skipping non UTF-8 entry {:?}", entry.path());
                continue;
            };
            if matches_filter(&entry, name, filter) {
                names.push(name.to_string());
            }
        }
        Ok(names)
    }
}

fn matches_filter(entry: &DirEntry, name: &str, filter: &EntryFilter) -> bool {
    match filter {
        EntryFilter::Directories => is_visible_dir(entry, name),
        EntryFilter::Extension(extension) => {
            is_file(entry) && extension_of(name) == *extension
        }
    }
}

fn is_file(entry: &DirEntry) -> bool {
    if entry.path_is_symlink() {
        return entry.path().is_file();
    }
    entry.file_type().is_file()
}

fn is_visible_dir(entry: &DirEntry, name: &str) -> bool {
    let is_dir = if entry.path_is_symlink() {
        entry.path().is_dir()
    } else {
        entry.file_type().is_dir()
    };
    is_dir && !is_hidden_or_system(entry, name)
}

#[cfg(windows)]
fn is_hidden_or_system(entry: &DirEntry, _name: &str) -> bool {
    use std::os::windows::fs::MetadataExt;
    const FILE_ATTRIBUTE_HIDDEN: u32 = 0x2;
    const FILE_ATTRIBUTE_SYSTEM: u32 = 0x4;
    entry
        .metadata()
        .map(|meta| meta.file_attributes() & (FILE_ATTRIBUTE_HIDDEN | FILE_ATTRIBUTE_SYSTEM) != 0)
        .unwrap_or(true)
}

#[cfg(not(windows))]
fn is_hidden_or_system(_entry: &DirEntry, name: &str) -> bool {
    name.starts_with('.')
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::tempdir;

    fn sorted(mut names: Vec<String>) -> Vec<String> {
        names.sort();
        names
    }

    #[test]
    fn lists_visible_directories_only() {
        let dir = tempdir().unwrap();
        for name in ["alpha", "Beta", ".hidden"] {
            fs::create_dir(dir.path().join(name)).unwrap();
        }
        fs::write(dir.path().join("file.txt"), "").unwrap();
        fs::create_dir_all(dir.path().join("alpha").join("nested")).unwrap();

        let names = FsLister
            .list(dir.path().to_str().unwrap(), &EntryFilter::Directories)
            .unwrap();
        assert_eq!(sorted(names), vec!["Beta", "alpha"]);
    }

    #[test]
    fn lists_files_by_extension() {
        let dir = tempdir().unwrap();
        for name in ["a.TXT", "b.txt", "c.md", "txt"] {
            fs::write(dir.path().join(name), "").unwrap();
        }
        fs::create_dir(dir.path().join("d.txt")).unwrap();

        let names = FsLister
            .list(
                dir.path().to_str().unwrap(),
                &EntryFilter::Extension(".txt".to_string()),
            )
            .unwrap();
        assert_eq!(sorted(names), vec!["a.TXT", "b.txt", "txt"]);
    }

    #[test]
    fn missing_directory_fails() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("gone");
        let err = FsLister
            .list(missing.to_str().unwrap(), &EntryFilter::Directories)
            .unwrap_err();
        assert_matches!(err, ListingError::ReadDir { .. });
    }

    #[test]
    fn masks_for_external_listers() {
        assert_eq!(EntryFilter::Directories.mask(), "a:d+s-");
        assert_eq!(EntryFilter::Extension(".exe".to_string()).mask(), "*.exe");
    }
}
