//! Stay mode: a debounce window during which repeated invocations of the same
//! command reuse the cached listing.

use serde::Deserialize;
use serde::Serialize;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;
use tracing::info;

/// Debounce values below this never arm stay mode.
pub const STAY_THRESHOLD_MS: u64 = 1000;

pub trait Clock {
    /// Milliseconds on a clock shared by every launch of the command.
    fn now_millis(&self) -> u64;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX))
            .unwrap_or(0)
    }
}

pub fn is_stay_debounce(debounce_ms: u64) -> bool {
    debounce_ms >= STAY_THRESHOLD_MS
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum StayState {
    #[default]
    Idle,
    Armed {
        session: String,
        debounce_ms: u64,
        deadline_ms: u64,
    },
}

/// What the host has to keep alive until `deadline_ms`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StayMarker {
    pub session: String,
    pub debounce_ms: u64,
    pub deadline_ms: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArmOutcome {
    /// No session was running.
    Started,
    /// The same session was running; its window was extended.
    Refreshed,
    /// A different session owned the window and was replaced.
    Replaced,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StayController {
    state: StayState,
}

impl StayController {
    pub fn new(state: StayState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &StayState {
        &self.state
    }

    pub fn is_armed(&self) -> bool {
        matches!(self.state, StayState::Armed { .. })
    }

    /// Start or extend the window for `session`.
    pub fn arm(&mut self, session: &str, debounce_ms: u64, now: u64) -> ArmOutcome {
        let outcome = match &self.state {
            StayState::Idle => ArmOutcome::Started,
            StayState::Armed { session: current, .. } if current == session => {
                ArmOutcome::Refreshed
            }
            StayState::Armed { .. } => ArmOutcome::Replaced,
        };
        self.state = StayState::Armed {
            session: session.to_string(),
            debounce_ms,
            deadline_ms: now.saturating_add(debounce_ms),
        };
        if outcome != ArmOutcome::Refreshed {
            info!("stay session {session} armed for {debounce_ms}ms");
        }
        outcome
    }

    /// Returns to idle once the deadline has passed. Returns `true` when the
    /// session expired on this call.
    pub fn expire_if_due(&mut self, now: u64) -> bool {
        match &self.state {
            StayState::Armed {
                session,
                deadline_ms,
                ..
            } if now > *deadline_ms => {
                info!("stay session {session} expired");
                self.state = StayState::Idle;
                true
            }
            _ => false,
        }
    }

    pub fn release(&mut self) {
        if let StayState::Armed { session, .. } = &self.state {
            info!("stay session {session} released");
        }
        self.state = StayState::Idle;
    }

    pub fn marker(&self) -> Option<StayMarker> {
        match &self.state {
            StayState::Idle => None,
            StayState::Armed {
                session,
                debounce_ms,
                deadline_ms,
            } => Some(StayMarker {
                session: session.clone(),
                debounce_ms: *debounce_ms,
                deadline_ms: *deadline_ms,
            }),
        }
    }

    pub(crate) fn into_state(self) -> StayState {
        self.state
    }
}
