pub mod data;
pub mod harness;

use std::sync::Once;

use arbor::config::LOG_ENV;
use arbor::debugger::{DebugLevel, set_debug_level};

#[allow(dead_code)]
static INIT: Once = Once::new();

#[allow(dead_code)]
pub fn init_debug_for_tests() {
    let level = std::env::var(LOG_ENV)
        .ok()
        .and_then(|s| s.parse::<DebugLevel>().ok())
        .unwrap_or(DebugLevel::Off);

    INIT.call_once(|| {
        set_debug_level(level);
    });
}
