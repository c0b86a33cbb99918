use std::cell::Cell;
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU8, Ordering};

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum DebugLevel {
    Off = 0,
    Error = 1,
    Warn = 2,
    Info = 3,
    Debug = 4,
    Trace = 5,
}

impl DebugLevel {
    pub fn from_u8(v: u8) -> Self {
        match v {
            0 => DebugLevel::Off,
            1 => DebugLevel::Error,
            2 => DebugLevel::Warn,
            3 => DebugLevel::Info,
            4 => DebugLevel::Debug,
            _ => DebugLevel::Trace,
        }
    }
}

impl FromStr for DebugLevel {
    type Err = String;

    /// Accepts a level name (any case) or its number.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(n) = s.parse::<u8>() {
            return Ok(DebugLevel::from_u8(n));
        }

        match s.to_uppercase().as_str() {
            "OFF" => Ok(DebugLevel::Off),
            "ERROR" => Ok(DebugLevel::Error),
            "WARN" => Ok(DebugLevel::Warn),
            "INFO" => Ok(DebugLevel::Info),
            "DEBUG" => Ok(DebugLevel::Debug),
            "TRACE" => Ok(DebugLevel::Trace),
            _ => Err(format!("unknown debug level '{s}'")),
        }
    }
}

impl fmt::Display for DebugLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DebugLevel::Off => "off",
            DebugLevel::Error => "error",
            DebugLevel::Warn => "warn",
            DebugLevel::Info => "info",
            DebugLevel::Debug => "debug",
            DebugLevel::Trace => "trace",
        };
        write!(f, "{name}")
    }
}

/// Subsystem tag printed with every log line.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Component {
    Builder,
    Validate,
    Heap,
    Render,
    Session,
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Component::Builder => "builder",
            Component::Validate => "validate",
            Component::Heap => "heap",
            Component::Render => "render",
            Component::Session => "session",
        };
        write!(f, "{name}")
    }
}

pub static DEBUG_LEVEL: AtomicU8 = AtomicU8::new(DebugLevel::Off as u8);

thread_local! {
    static INDENT: Cell<usize> = const { Cell::new(0) };
}

pub fn set_debug_level(level: DebugLevel) {
    DEBUG_LEVEL.store(level as u8, Ordering::Relaxed);
}

pub fn get_debug_level() -> DebugLevel {
    DebugLevel::from_u8(DEBUG_LEVEL.load(Ordering::Relaxed))
}

#[inline]
pub fn should_log(level: DebugLevel) -> bool {
    level != DebugLevel::Off && (level as u8) <= DEBUG_LEVEL.load(Ordering::Relaxed)
}

pub fn indent() {
    INDENT.with(|i| i.set(i.get() + 1));
}

pub fn dedent() {
    INDENT.with(|i| i.set(i.get().saturating_sub(1)));
}

pub fn format_indent() -> String {
    INDENT.with(|i| "  ".repeat(i.get()))
}

fn level_tag(level: DebugLevel) -> String {
    use color::*;

    match level {
        DebugLevel::Error => format!("{RED}ERROR{RESET}"),
        DebugLevel::Warn => format!("{YELLOW}WARN{RESET}"),
        DebugLevel::Info => format!("{GREEN}INFO{RESET}"),
        DebugLevel::Debug => format!("{BLUE}DEBUG{RESET}"),
        DebugLevel::Trace => format!("{GRAY}TRACE{RESET}"),
        DebugLevel::Off => String::new(),
    }
}

/// Indentation, colored level tag, component, then the message.
pub fn format_line(level: DebugLevel, component: Component, message: fmt::Arguments<'_>) -> String {
    format!(
        "{}{} [{}] {}",
        format_indent(),
        level_tag(level),
        component,
        message
    )
}

/// Writes one line to stderr if `level` is enabled.
pub fn emit(level: DebugLevel, component: Component, message: fmt::Arguments<'_>) {
    if should_log(level) {
        eprintln!("{}", format_line(level, component, message));
    }
}

/// Indents log output until dropped; see `db_scope!`.
pub struct Scope {
    level: DebugLevel,
    component: Component,
    name: &'static str,
    active: bool,
}

impl Scope {
    pub fn enter(level: DebugLevel, component: Component, name: &'static str) -> Self {
        let active = should_log(level);
        if active {
            emit(level, component, format_args!("→ {name}"));
            indent();
        }
        Self {
            level,
            component,
            name,
            active,
        }
    }
}

impl Drop for Scope {
    fn drop(&mut self) {
        if self.active {
            dedent();
            emit(self.level, self.component, format_args!("← {}", self.name));
        }
    }
}

pub mod color {
    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const BLUE: &str = "\x1b[34m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GRAY: &str = "\x1b[90m";
    pub const BOLD: &str = "\x1b[1m";
    pub const RESET: &str = "\x1b[0m";
}
