use crate::location::ContainerKind;
use crate::location::Location;
use serde::Deserialize;
use serde::Serialize;

/// What a cached listing was computed for. The extension only matters for
/// file groups; directory listings are keyed by the parent alone.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CacheKey {
    pub parent_dir: String,
    pub kind: ContainerKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extension: Option<String>,
}

impl CacheKey {
    pub fn for_location(location: &Location) -> Self {
        let kind = location.directory_type().kind();
        let extension = match kind {
            ContainerKind::FileGroup => Some(location.extension().to_string()),
            _ => None,
        };
        Self {
            parent_dir: location.parent_dir().to_string(),
            kind,
            extension,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct CachedListing {
    key: CacheKey,
    names: Vec<String>,
}

/// Holds the most recent unsorted listing. Sorting happens per invocation
/// because consecutive invocations may go in different directions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionCache {
    #[serde(default)]
    entry: Option<CachedListing>,
}

impl ResolutionCache {
    pub fn lookup(&self, key: &CacheKey) -> Option<&[String]> {
        self.entry
            .as_ref()
            .filter(|entry| entry.key == *key)
            .map(|entry| entry.names.as_slice())
    }

    pub fn store(&mut self, key: CacheKey, names: Vec<String>) {
        self.entry = Some(CachedListing { key, names });
    }

    pub fn invalidate(&mut self) {
        self.entry = None;
    }

    pub fn is_empty(&self) -> bool {
        self.entry.is_none()
    }

    pub fn key(&self) -> Option<&CacheKey> {
        self.entry.as_ref().map(|entry| &entry.key)
    }
}
