use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque, OS-assigned identifier of a top-level window.
///
/// The cache only compares and hashes it. Platform bindings are the only
/// code that builds one from, or reads back, the raw value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WindowHandle(u64);

impl WindowHandle {
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for WindowHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:08x}", self.0)
    }
}

/// Owning process of a window at a point in time. Reused by the OS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProcessId(u32);

impl ProcessId {
    pub const fn new(pid: u32) -> Self {
        Self(pid)
    }

    pub const fn get(self) -> u32 {
        self.0
    }
}

impl From<u32> for ProcessId {
    fn from(pid: u32) -> Self {
        Self(pid)
    }
}

impl fmt::Display for ProcessId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_handle_equality_is_exact() {
        let a = WindowHandle::from_raw(0x0400_0003);
        let b = WindowHandle::from_raw(0x0400_0003);
        let c = WindowHandle::from_raw(0x0400_0004);

        assert_eq!(a, b);
        assert_ne!(a, c);

        let set: HashSet<WindowHandle> = [a, b, c].into_iter().collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_handle_display() {
        assert_eq!(WindowHandle::from_raw(0x0400_0003).to_string(), "0x04000003");
        assert_eq!(WindowHandle::from_raw(0x1_0000_0000).to_string(), "0x100000000");
    }

    #[test]
    fn test_serialization_is_transparent() {
        let json = serde_json::to_string(&WindowHandle::from_raw(42)).unwrap();
        assert_eq!(json, "42");
        let pid: ProcessId = serde_json::from_str("1234").unwrap();
        assert_eq!(pid, ProcessId::new(1234));
    }
}
