use serde::{Deserialize, Serialize};

use crate::core::{WindowHandle, WindowRecord};

/// One ranked result, owned by the caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedWindow {
    /// Handle to hand back to the activation collaborator
    pub handle: WindowHandle,

    /// Copy of the cached record
    pub record: WindowRecord,

    /// Weighted score (0.0 - 100.0)
    pub score: f64,

    /// Query vs title score (0.0 - 100.0)
    pub title_score: f64,

    /// Query vs executable path score (0.0 - 100.0)
    pub path_score: f64,
}

impl RankedWindow {
    /// Get display string for logging
    pub fn display(&self) -> String {
        format!(
            "{:5.1}  {}  [pid {}]",
            self.score,
            self.record.display_name(),
            self.record.owner_pid
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ProcessId;

    #[test]
    fn test_display() {
        let ranked = RankedWindow {
            handle: WindowHandle::from_raw(1),
            record: WindowRecord::new("Notepad", r"C:\Windows\notepad.exe", ProcessId::new(200)),
            score: 42.3,
            title_score: 45.0,
            path_score: 17.5,
        };

        assert_eq!(ranked.display(), r" 42.3  Notepad ~ C:\Windows\notepad.exe  [pid 200]");
    }
}
