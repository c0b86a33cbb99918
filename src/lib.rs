pub mod config;

pub mod api;
pub mod common;
pub mod data;
pub mod debugger;
pub mod frontend;
pub mod render;
pub mod storage;

pub use api::{ApiError, Output, Session};
pub use config::{BTreeConfig, Settings};
pub use render::{RenderOptions, render};
pub use storage::btree::{BPlusTree, BTreeBuilder, build, check_invariants};
