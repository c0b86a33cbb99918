//! Leveled stderr logging and build-phase timing.

pub mod debugger;
mod macros;
pub mod phases;

pub use debugger::{Component, DebugLevel, get_debug_level, set_debug_level, should_log};
pub use phases::{PhaseTracker, begin_phase, end_phase, get_report, reset};
