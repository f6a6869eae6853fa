use crate::language::Messages;
use crate::listing::ListingError;
use crate::location::DirectoryType;
use thiserror::Error;

pub const ROOT_MESSAGE: &str = "<<Root>>";

/// Reasons an invocation ends without a jump. None of them is fatal to the
/// host; each one is shown as a line message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavigateError {
    #[error("focused location has no parent directory")]
    RootReached,
    #[error("directory type {directory_type} is not supported")]
    UnsupportedType { directory_type: DirectoryType },
    #[error("fewer than two sibling entries")]
    EmptyResult,
    #[error("{message}")]
    EnumerationFailed { message: String },
}

impl NavigateError {
    /// Text for the host's message line, in the active language.
    pub fn notice(&self, messages: &Messages) -> String {
        match self {
            Self::RootReached => ROOT_MESSAGE.to_string(),
            Self::UnsupportedType { directory_type } => {
                format!("DirectoryType: {directory_type}, {}", messages.not_supported)
            }
            Self::EmptyResult => messages.no_item.to_string(),
            Self::EnumerationFailed { message } => message.clone(),
        }
    }
}

impl From<ListingError> for NavigateError {
    fn from(err: ListingError) -> Self {
        Self::EnumerationFailed {
            message: err.to_string(),
        }
    }
}
