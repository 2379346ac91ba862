//! Boundary to the host window system.
//!
//! Sources enumerate qualifying top-level windows and resolve owners,
//! titles and executable paths. They never touch the cache; the cache only
//! talks to them through [`WindowSource`].

pub mod filter;
pub mod scripted;
pub mod wmctrl;

use crate::core::{ProcessId, WindowHandle};
use crate::error::Result;

pub use filter::{QualificationRules, WindowCandidate};
pub use scripted::ScriptedSource;
pub use wmctrl::WmctrlSource;

/// Trait for window enumeration/resolution backends
pub trait WindowSource: Send + Sync {
    /// Get source name for logging
    fn name(&self) -> &str;

    /// Called once at the start of every refresh, before any other query.
    ///
    /// Sources that memoize host state drop it here so the whole cycle is
    /// answered from one fresh view of the window system.
    fn begin_refresh(&self) {}

    /// Live handles that pass the host's qualification rules.
    ///
    /// An error here means the enumeration facility itself is unavailable.
    fn enumerate(&self) -> Result<Vec<WindowHandle>>;

    /// Current owning process of `handle`; fails if the window is gone
    fn owner_of(&self, handle: WindowHandle) -> Result<ProcessId>;

    /// Current title of `handle`
    fn title_of(&self, handle: WindowHandle) -> Result<String>;

    /// Full image path of process `pid`
    fn executable_path(&self, pid: ProcessId) -> Result<String>;
}

/// Trait for backends that can bring a window to the foreground
pub trait WindowActivator: Send + Sync {
    fn activate(&self, handle: WindowHandle) -> Result<()>;
}
