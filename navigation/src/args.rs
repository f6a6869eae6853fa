use crate::direction::Direction;

const DEBUG_SWITCH: &str = "DEBUG";

/// Positional arguments as the host passes them: direction (`0`/`1`),
/// debounce milliseconds, and an optional `DEBUG` switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvocationArgs {
    pub direction: Direction,
    /// `None` when missing or not a number.
    pub debounce_ms: Option<u64>,
    pub debug: bool,
}

impl InvocationArgs {
    pub fn from_positional<S: AsRef<str>>(args: &[S], default_direction: Direction) -> Self {
        Self {
            direction: Direction::parse_or(positional(args, 0), default_direction),
            debounce_ms: positional(args, 1).and_then(|raw| raw.trim().parse().ok()),
            debug: positional(args, 2) == Some(DEBUG_SWITCH),
        }
    }
}

fn positional<S: AsRef<str>>(args: &[S], index: usize) -> Option<&str> {
    args.get(index).map(AsRef::as_ref)
}
