use serde::{Deserialize, Serialize};

use crate::core::ProcessId;

/// A tracked window as captured when it entered the cache
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowRecord {
    /// Window title at capture time
    pub title: String,

    /// Full image path of the owning process
    pub executable_path: String,

    /// Owner pid observed at capture time
    pub owner_pid: ProcessId,
}

impl WindowRecord {
    pub fn new(
        title: impl Into<String>,
        executable_path: impl Into<String>,
        owner_pid: ProcessId,
    ) -> Self {
        Self {
            title: title.into(),
            executable_path: executable_path.into(),
            owner_pid,
        }
    }

    /// Final component of the executable path. Accepts both `/` and `\`.
    pub fn executable_name(&self) -> &str {
        self.executable_path
            .rsplit(|c: char| c == '/' || c == '\\')
            .next()
            .unwrap_or(&self.executable_path)
    }

    /// Get display string (for logging/UI)
    pub fn display_name(&self) -> String {
        if self.executable_path.is_empty() {
            self.title.clone()
        } else {
            format!("{} ~ {}", self.title, self.executable_path)
        }
    }

    /// Serialize to JSON string
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Deserialize from JSON string
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_creation() {
        let record = WindowRecord::new("Visual Studio Code", r"C:\VSCode\Code.exe", ProcessId::new(100));
        assert_eq!(record.title, "Visual Studio Code");
        assert_eq!(record.executable_path, r"C:\VSCode\Code.exe");
        assert_eq!(record.owner_pid, ProcessId::new(100));
    }

    #[test]
    fn test_executable_name() {
        let windows = WindowRecord::new("Notepad", r"C:\Windows\notepad.exe", ProcessId::new(200));
        assert_eq!(windows.executable_name(), "notepad.exe");

        let unix = WindowRecord::new("Terminal", "/usr/bin/alacritty", ProcessId::new(300));
        assert_eq!(unix.executable_name(), "alacritty");

        let bare = WindowRecord::new("Bare", "firefox", ProcessId::new(400));
        assert_eq!(bare.executable_name(), "firefox");
    }

    #[test]
    fn test_display_name() {
        let record = WindowRecord::new("Notepad", r"C:\Windows\notepad.exe", ProcessId::new(200));
        assert_eq!(record.display_name(), r"Notepad ~ C:\Windows\notepad.exe");

        let no_path = WindowRecord::new("Orphan", "", ProcessId::new(1));
        assert_eq!(no_path.display_name(), "Orphan");
    }

    #[test]
    fn test_serialization() {
        let record = WindowRecord::new("Terminal", "/usr/bin/alacritty", ProcessId::new(300));
        let json = record.to_json().unwrap();
        assert!(json.contains("\"owner_pid\":300"));
        assert_eq!(WindowRecord::from_json(&json).unwrap(), record);
    }
}
