pub mod ranked_window;
pub mod window_handle;
pub mod window_record;

pub use ranked_window::RankedWindow;
pub use window_handle::{ProcessId, WindowHandle};
pub use window_record::WindowRecord;
