//! Listing through an external command that writes one entry per line into a
//! list file, the way file-manager hosts expose their own search tools.

use super::DirectoryLister;
use super::EntryFilter;
use super::ListingError;
use crate::lines::read_lines;
use std::io;
use std::process::Command;
use std::process::Stdio;
use std::thread;
use std::time::Duration;
use std::time::Instant;
use tempfile::TempPath;
use tracing::debug;
use tracing::warn;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);
const POLL_INTERVAL: Duration = Duration::from_millis(10);

const DIR_PLACEHOLDER: &str = "{dir}";
const MASK_PLACEHOLDER: &str = "{mask}";
const LISTFILE_PLACEHOLDER: &str = "{listfile}";

/// Hands out scratch paths for list files.
pub trait TempPathProvider {
    fn scratch_path(&self) -> io::Result<TempPath>;
}

/// Scratch files in the system temp directory, removed when dropped.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScratchDir;

impl TempPathProvider for ScratchDir {
    fn scratch_path(&self) -> io::Result<TempPath> {
        Ok(tempfile::Builder::new()
            .prefix("adjacent-")
            .suffix(".list")
            .tempfile()?
            .into_temp_path())
    }
}

pub struct ListfileLister {
    program: String,
    args: Vec<String>,
    timeout: Duration,
    temp: Box<dyn TempPathProvider>,
}

impl ListfileLister {
    /// `args` may contain `{dir}`, `{mask}` and `{listfile}` placeholders.
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
            timeout: DEFAULT_TIMEOUT,
            temp: Box::new(ScratchDir),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_temp_provider(mut self, temp: Box<dyn TempPathProvider>) -> Self {
        self.temp = temp;
        self
    }

    fn render_args(&self, dir: &str, mask: &str, listfile: &str) -> Vec<String> {
        self.args
            .iter()
            .map(|arg| {
                arg.replace(DIR_PLACEHOLDER, dir)
                    .replace(MASK_PLACEHOLDER, mask)
                    .replace(LISTFILE_PLACEHOLDER, listfile)
            })
            .collect()
    }

    fn run(&self, args: &[String]) -> Result<(), ListingError> {
        let mut child = Command::new(&self.program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| ListingError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        let started = Instant::now();
        loop {
            let polled = child.try_wait().map_err(|source| ListingError::Spawn {
                program: self.program.clone(),
                source,
            })?;
            if let Some(status) = polled {
                if status.success() {
                    return Ok(());
                }
                return Err(ListingError::CommandFailed {
                    program: self.program.clone(),
                    status: status.to_string(),
                });
            }
            if started.elapsed() >= self.timeout {
                if let Err(err) = child.kill() {
                    warn!("failed to kill {} after {:?}: {err}", self.program, self.timeout);
                }
                if let Err(err) = child.wait() {
                    warn!("failed to reap {}: {err}", self.program);
                }
                return Err(ListingError::TimedOut {
                    program: self.program.clone(),
                    timeout: self.timeout,
                });
            }
            thread::sleep(POLL_INTERVAL);
        }
    }
}

impl DirectoryLister for ListfileLister {
    fn list(&self, dir: &str, filter: &EntryFilter) -> Result<Vec<String>, ListingError> {
        let listfile = self.temp.scratch_path().map_err(ListingError::TempFile)?;
        let listfile_arg = listfile.to_string_lossy().into_owned();
        let args = self.render_args(dir, &filter.mask(), &listfile_arg);
        debug!("listing {dir} via {} {args:?}", self.program);
        self.run(&args)?;

        let data = read_lines(&listfile).map_err(|source| ListingError::ReadList {
            path: listfile.to_path_buf(),
            source,
        })?;
        Ok(data
            .lines
            .iter()
            .filter_map(|line| entry_name(line))
            .map(str::to_string)
            .collect())
    }
}

/// Hosts may write bare names or full paths; keep the last component.
fn entry_name(line: &str) -> Option<&str> {
    let trimmed = line.trim().trim_end_matches(['\\', '/']);
    let name = trimmed
        .rsplit(['\\', '/'])
        .next()
        .unwrap_or(trimmed);
    (!name.is_empty()).then_some(name)
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;

    fn shell(script: &str) -> ListfileLister {
        ListfileLister::new(
            "sh",
            vec![
                "-c".to_string(),
                script.to_string(),
                "lister".to_string(),
                "{dir}".to_string(),
                "{mask}".to_string(),
                "{listfile}".to_string(),
            ],
        )
    }

    #[test]
    fn reads_names_and_paths_from_the_list_file() {
        let lister = shell(r#"printf '%s\r\n' "$1/alpha/" beta "$2" > "$3""#);
        let names = lister
            .list("/srv/data", &EntryFilter::Directories)
            .unwrap();
        assert_eq!(names, vec!["alpha", "beta", "a:d+s-"]);
    }

    #[test]
    fn non_zero_exit_is_reported() {
        let err = shell("exit 3")
            .list("/srv", &EntryFilter::Directories)
            .unwrap_err();
        assert_matches!(err, ListingError::CommandFailed { .. });
    }

    #[test]
    fn slow_commands_time_out() {
        let err = shell("sleep 5")
            .with_timeout(Duration::from_millis(100))
            .list("/srv", &EntryFilter::Directories)
            .unwrap_err();
        assert_matches!(err, ListingError::TimedOut { .. });
    }

    #[test]
    fn missing_program_fails_to_spawn() {
        let err = ListfileLister::new("/nonexistent/lister", Vec::new())
            .list("/srv", &EntryFilter::Directories)
            .unwrap_err();
        assert_matches!(err, ListingError::Spawn { .. });
    }

    /// Scratch files inside a directory the test owns.
    struct InDir(PathBuf);

    impl TempPathProvider for InDir {
        fn scratch_path(&self) -> io::Result<TempPath> {
            Ok(tempfile::Builder::new()
                .prefix("scratch-")
                .tempfile_in(&self.0)?
                .into_temp_path())
        }
    }

    struct Unavailable;

    impl TempPathProvider for Unavailable {
        fn scratch_path(&self) -> io::Result<TempPath> {
            Err(io::Error::from(io::ErrorKind::PermissionDenied))
        }
    }

    #[test]
    fn list_file_comes_from_the_temp_provider() {
        let scratch = tempfile::tempdir().unwrap();
        let dir_name = scratch
            .path()
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap()
            .to_string();
        let names = shell(r#"printf '%s\n' "${3%/*}" > "$3""#)
            .with_temp_provider(Box::new(InDir(scratch.path().to_path_buf())))
            .list("/srv", &EntryFilter::Directories)
            .unwrap();
        assert_eq!(names, vec![dir_name]);
    }

    #[test]
    fn temp_provider_failure_is_reported() {
        let err = shell("true")
            .with_temp_provider(Box::new(Unavailable))
            .list("/srv", &EntryFilter::Directories)
            .unwrap_err();
        assert_matches!(err, ListingError::TempFile(_));
    }

    #[test]
    fn entry_names() {
        assert_eq!(entry_name(r"C:\work\alpha\"), Some("alpha"));
        assert_eq!(entry_name("beta"), Some("beta"));
        assert_eq!(entry_name("   "), None);
    }
}
