/// Logs `format_args!` at `$level` for a [`Component`](crate::debugger::Component).
///
/// The message is only formatted when the level is enabled.
#[macro_export]
macro_rules! db_log {
    ($level:expr, $component:expr, $($arg:tt)*) => {
        if $crate::debugger::debugger::should_log($level) {
            $crate::debugger::debugger::emit($level, $component, format_args!($($arg)*));
        }
    };
}

#[macro_export]
macro_rules! db_error {
    ($component:expr, $($arg:tt)*) => {
        $crate::db_log!($crate::debugger::DebugLevel::Error, $component, $($arg)*)
    };
}

#[macro_export]
macro_rules! db_warn {
    ($component:expr, $($arg:tt)*) => {
        $crate::db_log!($crate::debugger::DebugLevel::Warn, $component, $($arg)*)
    };
}

#[macro_export]
macro_rules! db_info {
    ($component:expr, $($arg:tt)*) => {
        $crate::db_log!($crate::debugger::DebugLevel::Info, $component, $($arg)*)
    };
}

#[macro_export]
macro_rules! db_debug {
    ($component:expr, $($arg:tt)*) => {
        $crate::db_log!($crate::debugger::DebugLevel::Debug, $component, $($arg)*)
    };
}

#[macro_export]
macro_rules! db_trace {
    ($component:expr, $($arg:tt)*) => {
        $crate::db_log!($crate::debugger::DebugLevel::Trace, $component, $($arg)*)
    };
}

/// Runs `$body` with log lines inside it indented one step.
#[macro_export]
macro_rules! db_scope {
    ($level:expr, $component:expr, $name:expr, $body:block) => {{
        let _scope = $crate::debugger::debugger::Scope::enter($level, $component, $name);
        $body
    }};
}
