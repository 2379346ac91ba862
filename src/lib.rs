//! # WinSwitch Engine
//!
//! Window cache and ranking core of a desktop window switcher:
//! - Incremental window cache with staleness detection (closed windows,
//!   handles recycled to another process)
//! - Copy-on-refresh generations, safe to read from another thread
//! - Token-sort fuzzy ranking over title and executable path
//! - Pluggable window sources (scripted, `wmctrl`)
//!
//! ## Example Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use winswitch_engine::{platform::ScriptedSource, WindowSwitcher};
//!
//! fn main() -> winswitch_engine::Result<()> {
//!     let switcher = WindowSwitcher::new(Arc::new(ScriptedSource::demo()));
//!
//!     for hit in switcher.refresh_and_rank("firefox", 3)? {
//!         println!("{}", hit.display());
//!     }
//!     Ok(())
//! }
//! ```

pub mod cache;
pub mod config;
pub mod core;
pub mod engine;
pub mod error;
pub mod platform;
pub mod ranking;

// Re-export primary types
pub use crate::core::{ProcessId, RankedWindow, WindowHandle, WindowRecord};
pub use cache::{CacheStats, RefreshReport, WindowCache};
pub use config::SwitcherConfig;
pub use engine::WindowSwitcher;
pub use error::{Result, SwitcherError};
pub use platform::{WindowActivator, WindowSource};
pub use ranking::{RankOptions, Scorer, TokenSortScorer};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
