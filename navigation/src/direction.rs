use serde::Deserialize;
use serde::Serialize;
use std::cmp::Ordering;

pub const TOP_MESSAGE: &str = "<Top>";
pub const BOTTOM_MESSAGE: &str = "<Bottom>";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Previous,
    #[default]
    Next,
}

impl Direction {
    /// Accepts the host's numeric form (`0`/`1`) as well as the words.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "0" | "prev" | "previous" => Some(Self::Previous),
            "1" | "next" => Some(Self::Next),
            _ => None,
        }
    }

    pub fn parse_or(raw: Option<&str>, fallback: Self) -> Self {
        raw.and_then(Self::parse).unwrap_or(fallback)
    }

    pub fn opposite(self) -> Self {
        match self {
            Self::Previous => Self::Next,
            Self::Next => Self::Previous,
        }
    }
}

/// Ordering constants for one direction. The list is sorted so that the
/// wanted neighbour always sits right before the current item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortPolicy {
    pub direction: Direction,
    pub less: Ordering,
    pub greater: Ordering,
    pub boundary_message: &'static str,
}

impl SortPolicy {
    pub fn for_direction(direction: Direction) -> Self {
        match direction {
            Direction::Previous => Self {
                direction,
                less: Ordering::Less,
                greater: Ordering::Greater,
                boundary_message: TOP_MESSAGE,
            },
            Direction::Next => Self {
                direction,
                less: Ordering::Greater,
                greater: Ordering::Less,
                boundary_message: BOTTOM_MESSAGE,
            },
        }
    }

    /// Case-insensitive comparison; the raw strings break ties so that the
    /// order stays total and the two directions stay exact mirrors.
    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        let ordering = a
            .to_lowercase()
            .cmp(&b.to_lowercase())
            .then_with(|| a.cmp(b));
        match ordering {
            Ordering::Less => self.less,
            Ordering::Greater => self.greater,
            Ordering::Equal => Ordering::Equal,
        }
    }

    pub fn sort(&self, items: &mut [String]) {
        items.sort_by(|a, b| self.compare(a, b));
    }
}
