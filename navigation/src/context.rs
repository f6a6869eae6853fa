use crate::cache::ResolutionCache;
use crate::cycle::Step;
use crate::cycle::reconcile_namespace;
use crate::cycle::step;
use crate::direction::Direction;
use crate::direction::SortPolicy;
use crate::error::NavigateError;
use crate::language::Messages;
use crate::listing::DirectoryLister;
use crate::location::Focus;
use crate::location::Location;
use crate::resolver::resolve;
use crate::stay::ArmOutcome;
use crate::stay::Clock;
use crate::stay::StayController;
use crate::stay::StayMarker;
use crate::stay::StayState;
use crate::stay::is_stay_debounce;
use serde::Deserialize;
use serde::Serialize;
use tracing::debug;
use tracing::warn;

pub const DEFAULT_SESSION: &str = "adjacent";

/// One invocation of the navigation command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub focus: Focus,
    pub direction: Direction,
    pub debounce_ms: Option<u64>,
    pub debug: bool,
    /// Correlates repeated invocations of the same command.
    pub session: String,
}

impl Request {
    pub fn new(focus: Focus, direction: Direction) -> Self {
        Self {
            focus,
            direction,
            debounce_ms: None,
            debug: false,
            session: DEFAULT_SESSION.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Status,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub text: String,
    pub level: NoticeLevel,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Outcome {
    pub jump: Option<String>,
    pub notice: Option<Notice>,
    /// Present while a stay session is armed.
    pub stay: Option<StayMarker>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub diagnostics: Vec<String>,
    #[serde(skip)]
    pub failure: Option<NavigateError>,
}

impl Outcome {
    pub fn is_failure(&self) -> bool {
        self.failure.is_some()
    }

    /// Forward the jump and the line message to the host.
    pub fn deliver(&self, sink: &mut dyn HostSink) {
        if let Some(notice) = &self.notice {
            sink.line_message(notice);
        }
        if let Some(target) = &self.jump {
            sink.jump(target);
        }
    }
}

pub trait HostSink {
    fn jump(&mut self, target: &str);
    fn line_message(&mut self, notice: &Notice);
}

/// State that outlives a single invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavSnapshot {
    #[serde(default)]
    pub cache: ResolutionCache,
    #[serde(default)]
    pub stay: StayState,
}

/// Owns the cache and the stay session across invocations.
///
/// Hand it back with [`NavContext::into_snapshot`] when the host is done with
/// it; dropping a context while a stay session is armed is reported.
#[derive(Debug, Default)]
pub struct NavContext {
    cache: ResolutionCache,
    stay: StayController,
    persisted: bool,
}

impl NavContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_snapshot(snapshot: NavSnapshot) -> Self {
        Self {
            cache: snapshot.cache,
            stay: StayController::new(snapshot.stay),
            persisted: false,
        }
    }

    pub fn into_snapshot(mut self) -> NavSnapshot {
        self.persisted = true;
        NavSnapshot {
            cache: std::mem::take(&mut self.cache),
            stay: std::mem::take(&mut self.stay).into_state(),
        }
    }

    pub fn cache(&self) -> &ResolutionCache {
        &self.cache
    }

    pub fn stay(&self) -> &StayController {
        &self.stay
    }

    /// Timer hook for hosts that keep the context alive between invocations.
    /// Returns `true` when the stay session expired and the cache was dropped.
    pub fn tick(&mut self, now: u64) -> bool {
        let expired = self.stay.expire_if_due(now);
        if expired {
            self.cache.invalidate();
        }
        expired
    }

    pub fn release(&mut self) {
        self.stay.release();
        self.cache.invalidate();
    }

    pub fn invoke(
        &mut self,
        request: &Request,
        lister: &dyn DirectoryLister,
        clock: &dyn Clock,
        messages: &Messages,
    ) -> Outcome {
        let mut diagnostics = Vec::new();
        let reuse_cache = self.begin(request, clock.now_millis(), &mut diagnostics);
        let policy = SortPolicy::for_direction(request.direction);

        let mut outcome = match self.navigate(request, &policy, lister, reuse_cache) {
            Ok(moved) => Outcome {
                jump: moved.target,
                notice: moved.boundary.map(|text| Notice {
                    text: text.to_string(),
                    level: NoticeLevel::Status,
                }),
                ..Outcome::default()
            },
            Err(err) => {
                debug!("navigation ended without a jump: {err}");
                Outcome {
                    notice: Some(Notice {
                        text: err.notice(messages),
                        level: NoticeLevel::Error,
                    }),
                    failure: Some(err),
                    ..Outcome::default()
                }
            }
        };
        outcome.stay = self.stay.marker();
        if request.debug {
            outcome.diagnostics = diagnostics;
        }
        outcome
    }

    /// Stay bookkeeping. Returns whether the cache may be reused.
    fn begin(&mut self, request: &Request, now: u64, diagnostics: &mut Vec<String>) -> bool {
        if self.tick(now) {
            diagnostics.push("[DEBUG] stay session expired; cache dropped".to_string());
        }
        let Some(debounce_ms) = request.debounce_ms.filter(|ms| is_stay_debounce(*ms)) else {
            return false;
        };
        match self.stay.arm(&request.session, debounce_ms, now) {
            ArmOutcome::Refreshed => {
                diagnostics.push(format!("[DEBUG] refresh {} {debounce_ms}ms", request.session));
                true
            }
            ArmOutcome::Started => {
                diagnostics.push(format!("[DEBUG] start {} {debounce_ms}ms", request.session));
                false
            }
            ArmOutcome::Replaced => {
                diagnostics.push(format!("[DEBUG] replace {} {debounce_ms}ms", request.session));
                self.cache.invalidate();
                false
            }
        }
    }

    fn navigate(
        &mut self,
        request: &Request,
        policy: &SortPolicy,
        lister: &dyn DirectoryLister,
        reuse_cache: bool,
    ) -> Result<Step, NavigateError> {
        let focus = &request.focus;
        let location = Location::parse(&focus.real_path, focus.directory_type)?;
        let candidates = resolve(&location, policy, lister, &mut self.cache, reuse_cache)?;
        let mut moved = step(&candidates, policy, location.identity());
        debug!(
            "{} is entry {} of {} in {}",
            location.name(),
            moved.current,
            candidates.len(),
            location.parent_dir()
        );
        if let (Some(target), Some(namespace)) = (moved.target.as_mut(), focus.namespace.as_deref()) {
            *target = reconcile_namespace(target, &focus.real_path, namespace);
        }
        Ok(moved)
    }
}

impl Drop for NavContext {
    fn drop(&mut self) {
        if !self.persisted && self.stay.is_armed() {
            warn!("navigation context dropped while a stay session is still armed");
        }
    }
}
