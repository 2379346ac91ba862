use serde::{Deserialize, Serialize};

/// Shell and system window classes that never show up in the switcher
pub const DEFAULT_DENIED_CLASSES: &[&str] = &[
    "Windows.UI.Core.CoreWindow",
    "Progman",
    "WorkerW",
    "ThumbnailDeviceHelperWnd",
    "DummyDWMListenerWindow",
    "ApplicationFrameWindow",
    "EdgeUiInputTopWndClass",
    "Shell_TrayWnd",
    "NarratorHelperWindow",
];

/// Windows whose bounding box is at most this many square pixels are ignored
pub const DEFAULT_MIN_WINDOW_AREA: i64 = 10;

/// What a source knows about a window before deciding to report it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowCandidate {
    pub class_name: String,
    pub width: i64,
    pub height: i64,
    pub visible: bool,
    pub enabled: bool,
    /// Window belongs to the switcher itself (its console or main window)
    pub is_self: bool,
    pub child_style: bool,
    pub disabled_style: bool,
    /// Shown on every desktop (panels, docks, desktop backgrounds)
    pub sticky: bool,
}

impl WindowCandidate {
    /// A plain visible top-level window with the given class and size
    pub fn new(class_name: impl Into<String>, width: i64, height: i64) -> Self {
        Self {
            class_name: class_name.into(),
            width,
            height,
            visible: true,
            enabled: true,
            is_self: false,
            child_style: false,
            disabled_style: false,
            sticky: false,
        }
    }

    pub fn area(&self) -> i64 {
        self.width.saturating_mul(self.height)
    }
}

/// Qualification rules applied by sources before reporting a handle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QualificationRules {
    pub min_window_area: i64,
    /// Matched as substrings of the window class name
    pub denied_classes: Vec<String>,
    pub skip_sticky: bool,
}

impl Default for QualificationRules {
    fn default() -> Self {
        Self {
            min_window_area: DEFAULT_MIN_WINDOW_AREA,
            denied_classes: DEFAULT_DENIED_CLASSES.iter().map(|c| c.to_string()).collect(),
            skip_sticky: true,
        }
    }
}

impl QualificationRules {
    pub fn qualifies(&self, candidate: &WindowCandidate) -> bool {
        if !candidate.visible || !candidate.enabled || candidate.is_self {
            return false;
        }

        if candidate.area() <= self.min_window_area {
            return false;
        }

        if let Some(denied) = self
            .denied_classes
            .iter()
            .find(|denied| !denied.is_empty() && candidate.class_name.contains(denied.as_str()))
        {
            tracing::trace!("Class {:?} matches denied {:?}", candidate.class_name, denied);
            return false;
        }

        if candidate.child_style || candidate.disabled_style {
            return false;
        }

        !(self.skip_sticky && candidate.sticky)
    }
}
