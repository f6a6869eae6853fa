use crate::direction::Direction;
use crate::language::Language;
use crate::listing::DirectoryLister;
use crate::listing::FsLister;
use crate::listing::listfile::DEFAULT_TIMEOUT;
use crate::listing::listfile::ListfileLister;
use serde::Deserialize;
use std::fs;
use std::io;
use std::path::Path;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

pub const CONFIG_FILENAME: &str = "config.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("listing.command must name a program")]
    EmptyListingCommand,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct NavigatorConfig {
    /// Used when the direction argument is missing or not recognised.
    pub default_direction: Direction,
    /// `None` follows the OS locale.
    pub language: Option<Language>,
    pub listing: ListingConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ListingConfig {
    /// External command and its arguments; `{dir}`, `{mask}` and `{listfile}`
    /// are substituted. Unset lists the filesystem directly.
    pub command: Option<Vec<String>>,
    pub timeout_ms: u64,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            command: None,
            timeout_ms: u64::try_from(DEFAULT_TIMEOUT.as_millis()).unwrap_or(u64::MAX),
        }
    }
}

impl NavigatorConfig {
    /// A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn language(&self) -> Language {
        self.language.unwrap_or_else(Language::detect)
    }

    pub fn lister(&self) -> Result<Box<dyn DirectoryLister>, ConfigError> {
        let Some(command) = &self.listing.command else {
            return Ok(Box::new(FsLister));
        };
        let (program, args) = command
            .split_first()
            .ok_or(ConfigError::EmptyListingCommand)?;
        Ok(Box::new(
            ListfileLister::new(program.clone(), args.to_vec())
                .with_timeout(Duration::from_millis(self.listing.timeout_ms)),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn missing_file_means_defaults() {
        let dir = tempdir().unwrap();
        let config = NavigatorConfig::load(&dir.path().join(CONFIG_FILENAME)).unwrap();
        assert_eq!(config, NavigatorConfig::default());
        assert_eq!(config.default_direction, Direction::Next);
        assert_eq!(config.listing.timeout_ms, 5000);
    }

    #[test]
    fn parses_every_field() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        fs::write(
            &path,
            r#"
default_direction = "previous"
language = "ja"

[listing]
command = ["lister", "{dir}", "{listfile}"]
timeout_ms = 250
"#,
        )
        .unwrap();
        let config = NavigatorConfig::load(&path).unwrap();
        assert_eq!(config.default_direction, Direction::Previous);
        assert_eq!(config.language(), Language::Ja);
        assert_eq!(
            config.listing.command,
            Some(vec![
                "lister".to_string(),
                "{dir}".to_string(),
                "{listfile}".to_string()
            ])
        );
        assert_eq!(config.listing.timeout_ms, 250);
    }

    #[test]
    fn rejects_bad_values() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        fs::write(&path, "default_direction = \"sideways\"\n").unwrap();
        assert_matches!(
            NavigatorConfig::load(&path),
            Err(ConfigError::Parse { .. })
        );
    }

    #[test]
    fn empty_listing_command_is_rejected() {
        let config = NavigatorConfig {
            listing: ListingConfig {
                command: Some(Vec::new()),
                ..ListingConfig::default()
            },
            ..NavigatorConfig::default()
        };
        assert_matches!(config.lister().err(), Some(ConfigError::EmptyListingCommand));
    }
}
