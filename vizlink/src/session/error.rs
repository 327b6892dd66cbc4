//! Session error types.

use std::fmt;

use crate::coordination::CoordinationError;
use crate::view_config::ViewConfigError;

/// Errors from opening a session or activating a view.
#[derive(Debug)]
pub enum SessionError {
    /// The view configuration is invalid
    Config(ViewConfigError),
    /// A view could not be bound to the coordination space
    Coordination(CoordinationError),
    /// No view with this uid in the configuration
    UnknownView(String),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "View config error: {}", e),
            Self::Coordination(e) => write!(f, "Coordination error: {}", e),
            Self::UnknownView(uid) => write!(f, "No view with uid '{}'", uid),
        }
    }
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::Coordination(e) => Some(e),
            Self::UnknownView(_) => None,
        }
    }
}

impl From<ViewConfigError> for SessionError {
    fn from(err: ViewConfigError) -> Self {
        Self::Config(err)
    }
}

impl From<CoordinationError> for SessionError {
    fn from(err: CoordinationError) -> Self {
        Self::Coordination(err)
    }
}
