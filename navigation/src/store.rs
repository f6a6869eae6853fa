use crate::context::NavSnapshot;
use std::fs;
use std::io;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use thiserror::Error;
use tracing::warn;

pub const STATE_FILENAME: &str = "state.json";
const TMP_SUFFIX: &str = ".tmp";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to access navigation state {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to serialize navigation state: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Keeps the cache and stay session between launches of the command.
#[derive(Debug, Clone)]
pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    pub fn new(home: &Path) -> Self {
        Self {
            path: home.join(STATE_FILENAME),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A missing or unreadable state file yields an empty snapshot.
    pub fn load(&self) -> Result<NavSnapshot, StoreError> {
        let data = match fs::read(&self.path) {
            Ok(data) => data,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Ok(NavSnapshot::default());
            }
            Err(source) => {
                return Err(StoreError::Io {
                    path: self.path.clone(),
                    source,
                });
            }
        };
        match serde_json::from_slice(&data) {
            Ok(snapshot) => Ok(snapshot),
            Err(err) => {
                warn!(
                    "navigation state at {:?} is unreadable ({err}); starting fresh",
                    self.path
                );
                Ok(NavSnapshot::default())
            }
        }
    }

    pub fn save(&self, snapshot: &NavSnapshot) -> Result<(), StoreError> {
        let data = serde_json::to_vec_pretty(snapshot)?;
        let tmp_path = self.tmp_path();
        self.write_atomic(&tmp_path, &data)
            .map_err(|source| StoreError::Io {
                path: self.path.clone(),
                source,
            })
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(TMP_SUFFIX);
        PathBuf::from(name)
    }

    fn write_atomic(&self, tmp_path: &Path, data: &[u8]) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        {
            let mut file = fs::File::create(tmp_path)?;
            file.write_all(data)?;
            file.sync_all()?;
        }
        fs::rename(tmp_path, &self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::CacheKey;
    use crate::location::ContainerKind;
    use crate::stay::StayState;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn missing_file_is_empty() {
        let dir = tempdir().unwrap();
        let store = StateStore::new(dir.path());
        assert_eq!(store.load().unwrap(), NavSnapshot::default());
    }

    #[test]
    fn saved_state_is_loaded_back() {
        let dir = tempdir().unwrap();
        let store = StateStore::new(&dir.path().join("nested"));
        let mut snapshot = NavSnapshot {
            stay: StayState::Armed {
                session: "adjacent".to_string(),
                debounce_ms: 2000,
                deadline_ms: 99,
            },
            ..NavSnapshot::default()
        };
        snapshot.cache.store(
            CacheKey {
                parent_dir: "/data".to_string(),
                kind: ContainerKind::Directory,
                extension: None,
            },
            vec!["a".to_string(), "b".to_string()],
        );

        store.save(&snapshot).unwrap();
        assert_eq!(store.load().unwrap(), snapshot);
        assert!(!store.tmp_path().exists());
    }

    #[test]
    fn corrupted_file_starts_fresh() {
        let dir = tempdir().unwrap();
        let store = StateStore::new(dir.path());
        fs::write(store.path(), "{not json").unwrap();
        assert_eq!(store.load().unwrap(), NavSnapshot::default());
    }
}
