use parking_lot::Mutex;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::core::{ProcessId, WindowHandle};
use crate::error::{ResolutionTarget, Result, SwitcherError};
use crate::platform::{WindowActivator, WindowSource};

#[derive(Debug, Clone)]
struct ScriptedWindow {
    owner: ProcessId,
    title: String,
    listed: bool,
}

#[derive(Debug, Default)]
struct ScriptState {
    windows: BTreeMap<WindowHandle, ScriptedWindow>,
    executables: HashMap<ProcessId, String>,
    denied: HashSet<ProcessId>,
    enumeration_error: Option<String>,
    activated: Option<WindowHandle>,
}

/// In-memory window system.
///
/// Windows are enumerated in handle order. Used for tests, benchmarks and
/// the CLI `--demo` mode.
#[derive(Debug, Default)]
pub struct ScriptedSource {
    state: Mutex<ScriptState>,
    owner_queries: AtomicUsize,
    title_queries: AtomicUsize,
    path_queries: AtomicUsize,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Source preloaded with a handful of desktop windows
    pub fn demo() -> Self {
        let source = Self::new();
        let apps: [(u64, u32, &str, &str); 6] = [
            (0x0400_0003, 1412, "Visual Studio Code", "/usr/share/code/code"),
            (0x0400_0011, 1412, "winswitch-engine - README.md - Visual Studio Code", "/usr/share/code/code"),
            (0x0280_0007, 2230, "Mozilla Firefox", "/usr/lib/firefox/firefox"),
            (0x0160_000a, 3021, "Alacritty", "/usr/bin/alacritty"),
            (0x0320_0001, 3377, "Files - Downloads", "/usr/bin/nautilus"),
            (0x0520_0004, 4102, "Spotify Premium", "/opt/spotify/spotify"),
        ];
        for (raw, pid, title, path) in apps {
            source.set_executable(ProcessId::new(pid), path);
            source.open_window(WindowHandle::from_raw(raw), ProcessId::new(pid), title);
        }
        source
    }

    /// Open (or replace) a listed window
    pub fn open_window(&self, handle: WindowHandle, owner: ProcessId, title: impl Into<String>) {
        self.state.lock().windows.insert(
            handle,
            ScriptedWindow {
                owner,
                title: title.into(),
                listed: true,
            },
        );
    }

    /// Destroy a window; its handle stops resolving
    pub fn close_window(&self, handle: WindowHandle) {
        self.state.lock().windows.remove(&handle);
    }

    /// The OS recycled `handle` for a window of another process
    pub fn reassign(&self, handle: WindowHandle, owner: ProcessId, title: impl Into<String>) {
        self.open_window(handle, owner, title);
    }

    pub fn retitle(&self, handle: WindowHandle, title: impl Into<String>) {
        if let Some(window) = self.state.lock().windows.get_mut(&handle) {
            window.title = title.into();
        }
    }

    /// Keep the window alive but stop enumerating it (hidden, minimized to tray)
    pub fn set_listed(&self, handle: WindowHandle, listed: bool) {
        if let Some(window) = self.state.lock().windows.get_mut(&handle) {
            window.listed = listed;
        }
    }

    pub fn set_executable(&self, pid: ProcessId, path: impl Into<String>) {
        self.state.lock().executables.insert(pid, path.into());
    }

    /// Refuse (or allow again) to open process `pid`
    pub fn deny_process(&self, pid: ProcessId, denied: bool) {
        let mut state = self.state.lock();
        if denied {
            state.denied.insert(pid);
        } else {
            state.denied.remove(&pid);
        }
    }

    /// Make every `enumerate` call fail until cleared with `None`
    pub fn set_enumeration_failure(&self, message: Option<&str>) {
        self.state.lock().enumeration_error = message.map(str::to_string);
    }

    pub fn window_count(&self) -> usize {
        self.state.lock().windows.len()
    }

    pub fn last_activated(&self) -> Option<WindowHandle> {
        self.state.lock().activated
    }

    pub fn owner_queries(&self) -> usize {
        self.owner_queries.load(Ordering::Relaxed)
    }

    pub fn title_queries(&self) -> usize {
        self.title_queries.load(Ordering::Relaxed)
    }

    pub fn path_queries(&self) -> usize {
        self.path_queries.load(Ordering::Relaxed)
    }

    pub fn reset_counters(&self) {
        self.owner_queries.store(0, Ordering::Relaxed);
        self.title_queries.store(0, Ordering::Relaxed);
        self.path_queries.store(0, Ordering::Relaxed);
    }
}

impl WindowSource for ScriptedSource {
    fn name(&self) -> &str {
        "scripted"
    }

    fn enumerate(&self) -> Result<Vec<WindowHandle>> {
        let state = self.state.lock();
        if let Some(message) = &state.enumeration_error {
            return Err(SwitcherError::Enumeration(message.clone()));
        }

        Ok(state
            .windows
            .iter()
            .filter(|(_, window)| window.listed)
            .map(|(handle, _)| *handle)
            .collect())
    }

    fn owner_of(&self, handle: WindowHandle) -> Result<ProcessId> {
        self.owner_queries.fetch_add(1, Ordering::Relaxed);
        self.state
            .lock()
            .windows
            .get(&handle)
            .map(|window| window.owner)
            .ok_or(SwitcherError::WindowGone(handle))
    }

    fn title_of(&self, handle: WindowHandle) -> Result<String> {
        self.title_queries.fetch_add(1, Ordering::Relaxed);
        self.state
            .lock()
            .windows
            .get(&handle)
            .map(|window| window.title.clone())
            .ok_or(SwitcherError::WindowGone(handle))
    }

    fn executable_path(&self, pid: ProcessId) -> Result<String> {
        self.path_queries.fetch_add(1, Ordering::Relaxed);
        let state = self.state.lock();
        if state.denied.contains(&pid) {
            return Err(SwitcherError::resolution(
                ResolutionTarget::ExecutablePath(pid),
                "access denied",
            ));
        }

        state.executables.get(&pid).cloned().ok_or_else(|| {
            SwitcherError::resolution(ResolutionTarget::ExecutablePath(pid), "process has exited")
        })
    }
}

impl WindowActivator for ScriptedSource {
    fn activate(&self, handle: WindowHandle) -> Result<()> {
        let mut state = self.state.lock();
        if !state.windows.contains_key(&handle) {
            return Err(SwitcherError::Activation {
                handle,
                message: "window does not exist".to_string(),
            });
        }
        state.activated = Some(handle);
        Ok(())
    }
}
