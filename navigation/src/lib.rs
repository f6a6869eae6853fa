//! Move focus to the sibling next to the current directory or file.
//!
//! The host hands over the focused location, a direction and (optionally) a
//! debounce window; [`NavContext::invoke`] answers with at most one jump target
//! and at most one status message.

pub mod args;
pub mod cache;
pub mod config;
pub mod context;
pub mod cycle;
pub mod direction;
pub mod error;
pub mod language;
pub mod lines;
pub mod listing;
pub mod location;
pub mod resolver;
pub mod stay;
pub mod store;

pub use args::InvocationArgs;
pub use cache::CacheKey;
pub use cache::ResolutionCache;
pub use config::ConfigError;
pub use config::NavigatorConfig;
pub use context::HostSink;
pub use context::NavContext;
pub use context::NavSnapshot;
pub use context::Notice;
pub use context::NoticeLevel;
pub use context::Outcome;
pub use context::Request;
pub use direction::Direction;
pub use direction::SortPolicy;
pub use error::NavigateError;
pub use language::Language;
pub use language::Messages;
pub use listing::DirectoryLister;
pub use listing::EntryFilter;
pub use listing::FsLister;
pub use listing::ListingError;
pub use listing::listfile::ListfileLister;
pub use location::ContainerKind;
pub use location::DirectoryType;
pub use location::Focus;
pub use location::Location;
pub use stay::Clock;
pub use stay::STAY_THRESHOLD_MS;
pub use stay::StayController;
pub use stay::StayMarker;
pub use stay::StayState;
pub use stay::SystemClock;
pub use store::StateStore;
pub use store::StoreError;
