use crate::error::NavigateError;
use serde::Deserialize;
use serde::Serialize;
use std::fmt;

const SEPARATORS: [char; 2] = ['\\', '/'];

const DIRECTORY_SIBLING_TYPES: &[u32] = &[1, 3];
const FILE_SIBLING_TYPES: &[u32] = &[4, 61, 62, 63, 64, 96];

/// Raw directory-type classifier reported by the host for the focused view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DirectoryType(pub u32);

impl DirectoryType {
    pub const UNKNOWN: Self = Self(0);
    pub const DIRECTORY: Self = Self(1);

    pub fn kind(self) -> ContainerKind {
        if self == Self::UNKNOWN {
            ContainerKind::Unknown
        } else if DIRECTORY_SIBLING_TYPES.contains(&self.0) {
            ContainerKind::Directory
        } else if FILE_SIBLING_TYPES.contains(&self.0) {
            ContainerKind::FileGroup
        } else {
            ContainerKind::Unsupported
        }
    }
}

impl fmt::Display for DirectoryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What the siblings of the focused item are.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContainerKind {
    Unknown,
    /// Directories among directories.
    Directory,
    /// Files among files sharing the same extension.
    FileGroup,
    Unsupported,
}

/// A focused item split into its parent directory, name and extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    path: String,
    parent_dir: String,
    name: String,
    extension: String,
    directory_type: DirectoryType,
    separator: char,
}

impl Location {
    pub fn parse(raw: &str, directory_type: DirectoryType) -> Result<Self, NavigateError> {
        let trimmed = raw.trim_end_matches(SEPARATORS);
        let Some(split) = trimmed.rfind(SEPARATORS) else {
            return Err(NavigateError::RootReached);
        };
        let separator = if trimmed[split..].starts_with('/') {
            '/'
        } else {
            '\\'
        };
        let name = &trimmed[split + 1..];
        let parent_dir = match &trimmed[..split] {
            "" if separator == '/' => "/",
            "" => return Err(NavigateError::RootReached),
            parent => parent,
        };

        Ok(Self {
            path: format!("{trimmed}{separator}"),
            parent_dir: parent_dir.to_string(),
            name: name.to_string(),
            extension: extension_of(name),
            directory_type,
            separator,
        })
    }

    /// Full path, always ending with a separator.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn parent_dir(&self) -> &str {
        &self.parent_dir
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    pub fn directory_type(&self) -> DirectoryType {
        self.directory_type
    }

    pub fn separator(&self) -> char {
        self.separator
    }

    /// The string candidates are compared against. Directory candidates keep
    /// their trailing separator, file candidates do not.
    pub fn identity(&self) -> &str {
        match self.directory_type.kind() {
            ContainerKind::FileGroup => &self.path[..self.path.len() - self.separator.len_utf8()],
            _ => &self.path,
        }
    }

    /// Full path of a sibling called `name`, shaped like [`Location::identity`].
    pub fn sibling_path(&self, name: &str) -> String {
        let mut path = self.parent_dir.clone();
        if !path.ends_with(SEPARATORS) {
            path.push(self.separator);
        }
        path.push_str(name);
        if self.directory_type.kind() != ContainerKind::FileGroup {
            path.push(self.separator);
        }
        path
    }
}

/// Lower-cased, dot-prefixed extension. Names without a usable `.` use the
/// whole name, so `favorites` yields `.favorites`.
pub fn extension_of(name: &str) -> String {
    let stem = match name.rfind('.') {
        Some(dot) if dot + 1 < name.len() => &name[dot + 1..],
        _ => name,
    };
    format!(".{}", stem.to_lowercase())
}

/// `true` for virtual paths such as `#:\favorites` whose drive component is a
/// non-alphanumeric marker instead of a drive letter.
pub fn is_namespace_path(path: &str) -> bool {
    let mut chars = path.chars();
    matches!(
        (chars.next(), chars.next()),
        (Some(marker), Some(':')) if !marker.is_alphanumeric()
    )
}

/// The host's view of the focused item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Focus {
    /// Real filesystem path that gets parsed and enumerated.
    pub real_path: String,
    /// Virtual path the user is looking at, when it differs from the real one.
    pub namespace: Option<String>,
    pub directory_type: DirectoryType,
}

impl Focus {
    pub fn new(real_path: impl Into<String>, directory_type: DirectoryType) -> Self {
        Self {
            real_path: real_path.into(),
            namespace: None,
            directory_type,
        }
    }

    /// Build a focus from the displayed path and its real counterpart. The
    /// real path is navigated whenever it is known; the display path is only
    /// kept when it is a namespace view.
    pub fn from_views(display: &str, real: Option<&str>, directory_type: DirectoryType) -> Self {
        match real {
            Some(real) if is_namespace_path(display) => Self {
                real_path: real.to_string(),
                namespace: Some(display.to_string()),
                directory_type,
            },
            Some(real) => Self::new(real, directory_type),
            None => Self::new(display, directory_type),
        }
    }
}
