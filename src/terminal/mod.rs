// Terminal mode control
//
// Raw-mode toggling on the controlling terminal and width lookup.

mod raw_mode;

pub use raw_mode::{disable_raw_mode, enable_raw_mode, terminal_width, RawModeGuard, SavedState};
