use std::fmt;

use crate::{common::value::Value, debugger::DebugLevel};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeapAction {
    Show,
    Hide,
    Shuffle,
    Ordered,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Help,
    Datasets,
    Use(String),
    Keys(Vec<String>),
    /// Empty means `include none`.
    Include(Vec<String>),
    SetLeaf(usize),
    SetInternal(usize),
    Show,
    Chain,
    Records,
    Stats,
    Check,
    Find(Vec<Value>),
    Clear,
    Insert(Vec<(String, Value)>),
    Heap(HeapAction),
    Timeline,
    Debug(DebugLevel),
    Quit,
}

fn join<T: fmt::Display>(items: &[T]) -> String {
    items
        .iter()
        .map(|i| i.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Canonical command text, parseable back into the same command.
impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Help => write!(f, "help"),
            Command::Datasets => write!(f, "datasets"),
            Command::Use(name) => write!(f, "use {name}"),
            Command::Keys(cols) => write!(f, "keys {}", join(cols)),
            Command::Include(cols) if cols.is_empty() => write!(f, "include none"),
            Command::Include(cols) => write!(f, "include {}", join(cols)),
            Command::SetLeaf(n) => write!(f, "set leaf {n}"),
            Command::SetInternal(n) => write!(f, "set internal {n}"),
            Command::Show => write!(f, "show"),
            Command::Chain => write!(f, "chain"),
            Command::Records => write!(f, "records"),
            Command::Stats => write!(f, "stats"),
            Command::Check => write!(f, "check"),
            Command::Find(values) => write!(f, "find {}", join(values)),
            Command::Clear => write!(f, "clear"),
            Command::Insert(pairs) => {
                let pairs = pairs
                    .iter()
                    .map(|(c, v)| format!("{c}={v}"))
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "insert {pairs}")
            }
            Command::Heap(action) => {
                let action = match action {
                    HeapAction::Show => "on",
                    HeapAction::Hide => "off",
                    HeapAction::Shuffle => "shuffle",
                    HeapAction::Ordered => "ordered",
                };
                write!(f, "heap {action}")
            }
            Command::Timeline => write!(f, "timeline"),
            Command::Debug(level) => write!(f, "debug {level}"),
            Command::Quit => write!(f, "quit"),
        }
    }
}
