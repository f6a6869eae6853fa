use crate::cache::CacheKey;
use crate::cache::ResolutionCache;
use crate::direction::SortPolicy;
use crate::error::NavigateError;
use crate::listing::DirectoryLister;
use crate::listing::EntryFilter;
use crate::location::ContainerKind;
use crate::location::Location;
use tracing::debug;

/// Sibling paths sorted for one direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateSet {
    paths: Vec<String>,
}

impl CandidateSet {
    pub fn paths(&self) -> &[String] {
        &self.paths
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn position(&self, identity: &str) -> Option<usize> {
        self.paths.iter().position(|path| path == identity)
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.paths.get(index).map(String::as_str)
    }
}

pub fn entry_filter(location: &Location) -> Result<EntryFilter, NavigateError> {
    match location.directory_type().kind() {
        ContainerKind::Directory => Ok(EntryFilter::Directories),
        ContainerKind::FileGroup => Ok(EntryFilter::Extension(location.extension().to_string())),
        ContainerKind::Unknown | ContainerKind::Unsupported => {
            Err(NavigateError::UnsupportedType {
                directory_type: location.directory_type(),
            })
        }
    }
}

/// Enumerates (or reuses) the siblings of `location` and sorts them for
/// `policy`. The cache is only read when `reuse_cache` is set, but every
/// fresh listing replaces it.
pub fn resolve(
    location: &Location,
    policy: &SortPolicy,
    lister: &dyn DirectoryLister,
    cache: &mut ResolutionCache,
    reuse_cache: bool,
) -> Result<CandidateSet, NavigateError> {
    let filter = entry_filter(location)?;
    let key = CacheKey::for_location(location);

    let cached = if reuse_cache {
        cache.lookup(&key).map(<[String]>::to_vec)
    } else {
        None
    };
    let mut names = match cached {
        Some(names) => {
            debug!("reusing {} cached entries for {}", names.len(), key.parent_dir);
            names
        }
        None => {
            let names = lister.list(location.parent_dir(), &filter)?;
            debug!("listed {} entries in {}", names.len(), key.parent_dir);
            cache.store(key, names.clone());
            names
        }
    };

    if names.len() <= 1 {
        return Err(NavigateError::EmptyResult);
    }

    policy.sort(&mut names);
    Ok(CandidateSet {
        paths: names
            .iter()
            .map(|name| location.sibling_path(name))
            .collect(),
    })
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::direction::Direction;
    use crate::listing::ListingError;
    use crate::location::DirectoryType;
    use assert_matches::assert_matches;
    use pretty_assertions::assert_eq;
    use std::cell::Cell;
    use std::collections::HashMap;
    use std::io;

    /// In-memory lister that counts how often it is asked.
    #[derive(Default)]
    pub(crate) struct FakeLister {
        dirs: HashMap<String, Vec<String>>,
        calls: Cell<usize>,
    }

    impl FakeLister {
        pub(crate) fn with_dir(mut self, dir: &str, names: &[&str]) -> Self {
            self.dirs.insert(
                dir.to_string(),
                names.iter().map(ToString::to_string).collect(),
            );
            self
        }

        pub(crate) fn calls(&self) -> usize {
            self.calls.get()
        }
    }

    impl DirectoryLister for FakeLister {
        fn list(&self, dir: &str, _filter: &EntryFilter) -> Result<Vec<String>, ListingError> {
            self.calls.set(self.calls.get() + 1);
            self.dirs
                .get(dir)
                .cloned()
                .ok_or_else(|| ListingError::ReadDir {
                    path: dir.into(),
                    source: io::Error::from(io::ErrorKind::NotFound),
                })
        }
    }

    fn location(raw: &str) -> Location {
        Location::parse(raw, DirectoryType::DIRECTORY).unwrap()
    }

    #[test]
    fn sorts_full_paths_for_the_direction() {
        let lister = FakeLister::default().with_dir("/data", &["beta", "Alpha", "gamma"]);
        let mut cache = ResolutionCache::default();
        let previous = resolve(
            &location("/data/beta"),
            &SortPolicy::for_direction(Direction::Previous),
            &lister,
            &mut cache,
            false,
        )
        .unwrap();
        assert_eq!(previous.paths(), ["/data/Alpha/", "/data/beta/", "/data/gamma/"]);
        assert_eq!(previous.len(), 3);
        assert!(!previous.is_empty());

        let next = resolve(
            &location("/data/beta"),
            &SortPolicy::for_direction(Direction::Next),
            &lister,
            &mut cache,
            false,
        )
        .unwrap();
        assert_eq!(next.paths(), ["/data/gamma/", "/data/beta/", "/data/Alpha/"]);
    }

    #[test]
    fn single_entry_is_an_empty_result() {
        let lister = FakeLister::default().with_dir("/data", &["only"]);
        for direction in [Direction::Previous, Direction::Next] {
            let err = resolve(
                &location("/data/only"),
                &SortPolicy::for_direction(direction),
                &lister,
                &mut ResolutionCache::default(),
                false,
            )
            .unwrap_err();
            assert_eq!(err, NavigateError::EmptyResult);
        }
    }

    #[test]
    fn unsupported_types_are_rejected_before_listing() {
        let lister = FakeLister::default().with_dir("/data", &["a", "b"]);
        for raw in [0, 2, 97] {
            let location = Location::parse("/data/a", DirectoryType(raw)).unwrap();
            let err = resolve(
                &location,
                &SortPolicy::for_direction(Direction::Next),
                &lister,
                &mut ResolutionCache::default(),
                false,
            )
            .unwrap_err();
            assert_eq!(
                err,
                NavigateError::UnsupportedType {
                    directory_type: DirectoryType(raw)
                }
            );
        }
        assert_eq!(lister.calls(), 0);
    }

    #[test]
    fn listing_failures_become_enumeration_errors() {
        let lister = FakeLister::default();
        let err = resolve(
            &location("/missing/a"),
            &SortPolicy::for_direction(Direction::Next),
            &lister,
            &mut ResolutionCache::default(),
            false,
        )
        .unwrap_err();
        assert_matches!(err, NavigateError::EnumerationFailed { message } if message.contains("/missing"));
    }

    #[test]
    fn cache_is_read_only_when_allowed() {
        let lister = FakeLister::default().with_dir("/data", &["a", "b", "c"]);
        let policy = SortPolicy::for_direction(Direction::Next);
        let mut cache = ResolutionCache::default();

        resolve(&location("/data/a"), &policy, &lister, &mut cache, true).unwrap();
        resolve(&location("/data/b"), &policy, &lister, &mut cache, true).unwrap();
        assert_eq!(lister.calls(), 1);

        resolve(&location("/data/c"), &policy, &lister, &mut cache, false).unwrap();
        assert_eq!(lister.calls(), 2);
    }

    #[test]
    fn file_groups_use_the_extension() {
        let lister = FakeLister::default().with_dir("/docs", &["b.txt", "A.TXT"]);
        let location = Location::parse("/docs/b.txt", DirectoryType(4)).unwrap();
        let set = resolve(
            &location,
            &SortPolicy::for_direction(Direction::Previous),
            &lister,
            &mut ResolutionCache::default(),
            false,
        )
        .unwrap();
        assert_eq!(set.paths(), ["/docs/A.TXT", "/docs/b.txt"]);
        assert_eq!(set.position(location.identity()), Some(1));
    }
}
