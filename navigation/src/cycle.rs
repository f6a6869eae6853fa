use crate::direction::SortPolicy;
use crate::resolver::CandidateSet;
use tracing::debug;

const SEPARATORS: [char; 2] = ['\\', '/'];

/// Result of one move through a [`CandidateSet`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    /// Index of the current item (0 when it was not found).
    pub current: usize,
    /// Where to jump; `None` when already at the boundary.
    pub target: Option<String>,
    /// Set when this move lands on (or stays at) the last reachable entry.
    pub boundary: Option<&'static str>,
}

/// The neighbour is the entry sorted right before the current one. The
/// boundary message is announced one step early: the move that lands on the
/// last entry already reports it, and moving again repeats it without a jump.
pub fn step(candidates: &CandidateSet, policy: &SortPolicy, identity: &str) -> Step {
    let current = candidates.position(identity).unwrap_or_else(|| {
        debug!("{identity} is not among its siblings; starting from the first entry");
        0
    });
    let target = current
        .checked_sub(1)
        .and_then(|index| candidates.get(index))
        .map(str::to_string);
    let boundary = (current < 2).then_some(policy.boundary_message);
    Step {
        current,
        target,
        boundary,
    }
}

/// Map a real target path back into the namespace the user is browsing.
///
/// `real_dir` is the real path of the focused item and `namespace` the path
/// it is displayed under. Their parents are swapped as prefixes of `target`,
/// and the remainder takes the namespace's separator.
pub fn reconcile_namespace(target: &str, real_dir: &str, namespace: &str) -> String {
    let real_parent = parent_of(real_dir);
    let rest = match target.strip_prefix(real_parent) {
        Some(rest)
            if !real_parent.is_empty()
                && (real_parent.ends_with(SEPARATORS) || rest.starts_with(SEPARATORS)) =>
        {
            rest.trim_start_matches(SEPARATORS)
        }
        _ => return target.to_string(),
    };
    let separator = separator_of(namespace);
    let namespace_parent = parent_of(namespace).trim_end_matches(SEPARATORS);
    let rest: String = rest
        .chars()
        .map(|c| if SEPARATORS.contains(&c) { separator } else { c })
        .collect();
    format!("{namespace_parent}{separator}{rest}")
}

/// Parent of `path` without its trailing separator; `/` for POSIX top-level
/// entries.
fn parent_of(path: &str) -> &str {
    let trimmed = path.trim_end_matches(SEPARATORS);
    match trimmed.rfind(SEPARATORS) {
        Some(0) if trimmed.starts_with('/') => "/",
        Some(index) => &trimmed[..index],
        None => trimmed,
    }
}

fn separator_of(path: &str) -> char {
    if path.contains('\\') { '\\' } else { '/' }
}
