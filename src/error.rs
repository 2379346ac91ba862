use thiserror::Error;

use crate::core::{ProcessId, WindowHandle};

/// Main error type for the window switcher engine
#[derive(Error, Debug)]
pub enum SwitcherError {
    /// The enumeration primitive itself is unavailable
    #[error("Window enumeration failed: {0}")]
    Enumeration(String),

    /// Handle no longer refers to a live window
    #[error("Window {0} is no longer live")]
    WindowGone(WindowHandle),

    /// Owner, title or executable path could not be resolved
    #[error("Cannot resolve {target}: {message}")]
    Resolution { target: ResolutionTarget, message: String },

    /// Window activation errors
    #[error("Cannot activate window {handle}: {message}")]
    Activation { handle: WindowHandle, message: String },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML (config file) errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors
    #[error("{0}")]
    Other(String),
}

/// What a failed resolution was looking up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionTarget {
    Owner(WindowHandle),
    Title(WindowHandle),
    ExecutablePath(ProcessId),
}

impl std::fmt::Display for ResolutionTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResolutionTarget::Owner(handle) => write!(f, "owner of window {}", handle),
            ResolutionTarget::Title(handle) => write!(f, "title of window {}", handle),
            ResolutionTarget::ExecutablePath(pid) => write!(f, "executable path of pid {}", pid),
        }
    }
}

impl SwitcherError {
    pub fn resolution(target: ResolutionTarget, message: impl Into<String>) -> Self {
        SwitcherError::Resolution {
            target,
            message: message.into(),
        }
    }

    /// Only a failing enumeration primitive stops a refresh cycle;
    /// everything else is absorbed per handle.
    pub fn is_fatal(&self) -> bool {
        matches!(self, SwitcherError::Enumeration(_))
    }
}

impl From<String> for SwitcherError {
    fn from(s: String) -> Self {
        SwitcherError::Other(s)
    }
}

impl From<&str> for SwitcherError {
    fn from(s: &str) -> Self {
        SwitcherError::Other(s.to_string())
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, SwitcherError>;
