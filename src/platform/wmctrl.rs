use parking_lot::Mutex;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::core::{ProcessId, WindowHandle};
use crate::error::{ResolutionTarget, Result, SwitcherError};
use crate::platform::{QualificationRules, WindowActivator, WindowCandidate, WindowSource};

/// Columns of `wmctrl -lpGx` before the title
const LISTING_FIELDS: usize = 9;

/// One row of `wmctrl -lpGx`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListedWindow {
    pub handle: WindowHandle,
    /// -1 for windows shown on every desktop
    pub desktop: i64,
    /// 0 when the client does not set `_NET_WM_PID`
    pub pid: u32,
    pub x: i64,
    pub y: i64,
    pub width: i64,
    pub height: i64,
    pub class_name: String,
    pub title: String,
}

impl ListedWindow {
    fn candidate(&self, self_pid: u32) -> WindowCandidate {
        WindowCandidate {
            is_self: self.pid != 0 && self.pid == self_pid,
            sticky: self.desktop < 0,
            ..WindowCandidate::new(self.class_name.clone(), self.width, self.height)
        }
    }
}

type Listing = HashMap<WindowHandle, ListedWindow>;

/// X11 window source backed by the `wmctrl` tool and `/proc`.
///
/// One `wmctrl -lpGx` listing is taken per refresh cycle: the first query
/// after [`WindowSource::begin_refresh`] lists the windows, and every
/// owner, title and enumeration query of that cycle reads that listing.
pub struct WmctrlSource {
    rules: QualificationRules,
    program: PathBuf,
    self_pid: u32,
    listing: Mutex<Option<Listing>>,
}

impl WmctrlSource {
    pub fn new(rules: QualificationRules) -> Self {
        Self {
            rules,
            program: PathBuf::from("wmctrl"),
            self_pid: std::process::id(),
            listing: Mutex::new(None),
        }
    }

    /// Run `program` instead of the `wmctrl` found on `PATH`
    pub fn with_program(mut self, program: impl Into<PathBuf>) -> Self {
        self.program = program.into();
        self
    }

    /// Check that `wmctrl` runs and can talk to a window manager
    pub fn test(&self) -> Result<()> {
        self.run(&["-m"]).map(|_| ())
    }

    fn run(&self, args: &[&str]) -> Result<String> {
        run_wmctrl(&self.program, args)
    }

    /// Run `f` against this cycle's listing, taking it first if needed
    fn with_listing<T>(&self, f: impl FnOnce(&Listing) -> T) -> Result<T> {
        let mut listing = self.listing.lock();
        if let Some(windows) = listing.as_ref() {
            return Ok(f(windows));
        }

        let stdout = self.run(&["-l", "-p", "-G", "-x"])?;
        let windows: Listing = parse_listing(&stdout)
            .into_iter()
            .map(|window| (window.handle, window))
            .collect();
        tracing::trace!("wmctrl listed {} windows", windows.len());

        let windows = &*listing.insert(windows);
        Ok(f(windows))
    }

    fn lookup(&self, handle: WindowHandle, target: ResolutionTarget) -> Result<ListedWindow> {
        self.with_listing(|windows| windows.get(&handle).cloned())
            .map_err(|e| SwitcherError::resolution(target, e.to_string()))?
            .ok_or(SwitcherError::WindowGone(handle))
    }
}

impl Default for WmctrlSource {
    fn default() -> Self {
        Self::new(QualificationRules::default())
    }
}

impl WindowSource for WmctrlSource {
    fn name(&self) -> &str {
        "wmctrl"
    }

    fn begin_refresh(&self) {
        self.listing.lock().take();
    }

    fn enumerate(&self) -> Result<Vec<WindowHandle>> {
        let mut handles: Vec<WindowHandle> = self.with_listing(|windows| {
            windows
                .values()
                .filter(|window| {
                    let qualifies = self.rules.qualifies(&window.candidate(self.self_pid));
                    if !qualifies {
                        tracing::debug!("Filtering window {} ({})", window.handle, window.class_name);
                    }
                    qualifies
                })
                .map(|window| window.handle)
                .collect()
        })?;
        handles.sort();
        Ok(handles)
    }

    fn owner_of(&self, handle: WindowHandle) -> Result<ProcessId> {
        let target = ResolutionTarget::Owner(handle);
        let window = self.lookup(handle, target)?;
        if window.pid == 0 {
            return Err(SwitcherError::resolution(target, "window does not advertise a pid"));
        }
        Ok(ProcessId::new(window.pid))
    }

    fn title_of(&self, handle: WindowHandle) -> Result<String> {
        self.lookup(handle, ResolutionTarget::Title(handle))
            .map(|window| window.title)
    }

    fn executable_path(&self, pid: ProcessId) -> Result<String> {
        let link = format!("/proc/{}/exe", pid);
        std::fs::read_link(&link)
            .map(|path| path.to_string_lossy().into_owned())
            .map_err(|e| SwitcherError::resolution(ResolutionTarget::ExecutablePath(pid), e.to_string()))
    }
}

impl WindowActivator for WmctrlSource {
    fn activate(&self, handle: WindowHandle) -> Result<()> {
        let id = format!("{:#x}", handle.raw());
        self.run(&["-i", "-a", &id])
            .map(|_| ())
            .map_err(|e| SwitcherError::Activation {
                handle,
                message: e.to_string(),
            })
    }
}

fn run_wmctrl(program: &Path, args: &[&str]) -> Result<String> {
    let output = Command::new(program)
        .args(args)
        .output()
        .map_err(|e| SwitcherError::Enumeration(format!("{} not found: {}", program.display(), e)))?;

    if !output.status.success() {
        return Err(SwitcherError::Enumeration(format!(
            "wmctrl {} exited with {}: {}",
            args.join(" "),
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        )));
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Parse `wmctrl -lpGx` output, skipping rows that do not parse
pub fn parse_listing(stdout: &str) -> Vec<ListedWindow> {
    stdout
        .lines()
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| {
            let parsed = parse_line(line);
            if parsed.is_none() {
                tracing::debug!("Skipping unparsable wmctrl row: {:?}", line);
            }
            parsed
        })
        .collect()
}

fn parse_line(line: &str) -> Option<ListedWindow> {
    let (fields, title) = split_fields(line, LISTING_FIELDS)?;

    let raw = u64::from_str_radix(fields[0].trim_start_matches("0x"), 16).ok()?;

    Some(ListedWindow {
        handle: WindowHandle::from_raw(raw),
        desktop: fields[1].parse().ok()?,
        pid: fields[2].parse().ok()?,
        x: fields[3].parse().ok()?,
        y: fields[4].parse().ok()?,
        width: fields[5].parse().ok()?,
        height: fields[6].parse().ok()?,
        class_name: fields[7].to_string(),
        title: title.to_string(),
    })
}

/// First `n` whitespace-separated fields plus the untouched remainder
fn split_fields(line: &str, n: usize) -> Option<(Vec<&str>, &str)> {
    let mut rest = line.trim_start();
    let mut fields = Vec::with_capacity(n);

    for _ in 0..n {
        if rest.is_empty() {
            return None;
        }
        let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
        fields.push(&rest[..end]);
        rest = rest[end..].trim_start();
    }

    Some((fields, rest.trim_end()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const LISTING: &str = "\
0x01000003 -1 1187   0    0    1920 30   xfce4-panel.Xfce4-panel  desk xfce4-panel
0x01e00003  0 1412   0    27   1920 1053 code.Code  desk main.rs - winswitch  -  Visual Studio Code
0x02800007  1 2230   960  27   960  1053 Navigator.firefox  desk Mozilla Firefox
0x03400001  0 0      10   10   300  200  xterm.XTerm  desk
garbage line
0x0zz00001  0 12 0 0 1 1 a.A desk broken
";

    #[test]
    fn test_parse_listing() {
        let windows = parse_listing(LISTING);
        assert_eq!(windows.len(), 4);

        let panel = &windows[0];
        assert_eq!(panel.handle, WindowHandle::from_raw(0x0100_0003));
        assert_eq!(panel.desktop, -1);
        assert_eq!(panel.class_name, "xfce4-panel.Xfce4-panel");

        let code = &windows[1];
        assert_eq!(code.pid, 1412);
        assert_eq!((code.x, code.y, code.width, code.height), (0, 27, 1920, 1053));
        assert_eq!(code.title, "main.rs - winswitch  -  Visual Studio Code");

        let untitled = &windows[3];
        assert_eq!(untitled.pid, 0);
        assert_eq!(untitled.title, "");
    }

    #[test]
    fn test_candidates_apply_rules() {
        let rules = QualificationRules::default();
        let windows = parse_listing(LISTING);

        let qualifying: Vec<u64> = windows
            .iter()
            .filter(|w| rules.qualifies(&w.candidate(999_999)))
            .map(|w| w.handle.raw())
            .collect();

        assert_eq!(qualifying, vec![0x01e0_0003, 0x0280_0007, 0x0340_0001]);
    }

    #[test]
    fn test_own_window_is_excluded() {
        let rules = QualificationRules::default();
        let windows = parse_listing(LISTING);
        let firefox = &windows[2];

        assert!(!rules.qualifies(&firefox.candidate(2230)));
        assert!(rules.qualifies(&firefox.candidate(1)));
    }

    #[test]
    fn test_split_fields() {
        let (fields, rest) = split_fields("  a  b c   tail  text ", 3).unwrap();
        assert_eq!(fields, vec!["a", "b", "c"]);
        assert_eq!(rest, "tail  text");

        assert!(split_fields("a b", 3).is_none());
        assert_eq!(split_fields("a b c", 3).unwrap().1, "");
    }
}
