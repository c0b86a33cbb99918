//! Text diagrams of a built tree.

pub mod heap;
pub mod tree;

use std::collections::HashMap;

use crate::{
    common::record::Record,
    db_trace,
    debugger::{Component, debugger::color},
    storage::{
        btree::{BPlusTree, NodeId},
        heap::HeapFile,
    },
};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderOptions {
    /// Extra columns printed after the key values on each leaf tuple.
    pub include_columns: Vec<String>,
    pub highlight: Vec<NodeId>,
    pub show_heap: bool,
    pub color: bool,
}

/// Full diagram: tree, leaf chain and, if given and enabled, the heap.
pub fn render(tree: &BPlusTree, heap: Option<&HeapFile>, options: &RenderOptions) -> String {
    let labels = LeafLabels::new(tree);
    let mut out = tree::render_tree(tree, &labels, options);

    out.push('\n');
    out.push_str(&tree::render_chain(tree, &labels, options));

    if let (Some(heap), true) = (heap, options.show_heap) {
        out.push('\n');
        out.push_str(&heap::render_heap(tree, heap, &labels, options));
    }

    db_trace!(Component::Render, "rendered {} lines", out.lines().count());
    out
}

/// Leaf names (`L0`, `L1`, ...) in chain order.
pub struct LeafLabels {
    ordinals: HashMap<NodeId, usize>,
}

impl LeafLabels {
    pub fn new(tree: &BPlusTree) -> Self {
        Self {
            ordinals: tree.leaves().enumerate().map(|(i, id)| (id, i)).collect(),
        }
    }

    pub fn label(&self, id: NodeId) -> String {
        match self.ordinals.get(&id) {
            Some(i) => format!("L{i}"),
            None => format!("#{id}"),
        }
    }
}

/// `[key..., include...]` for one record, strings quoted.
pub fn tuple(record: &Record, key_columns: &[String], include_columns: &[String]) -> String {
    let values = key_columns
        .iter()
        .chain(include_columns)
        .map(|col| match record.get(col) {
            Some(v) => v.to_string(),
            None => "-".to_string(),
        })
        .collect::<Vec<_>>()
        .join(", ");

    format!("[{values}]")
}

pub(crate) fn mark(text: &str, highlighted: bool, options: &RenderOptions) -> String {
    match (highlighted, options.color) {
        (false, _) => text.to_string(),
        (true, true) => format!("{}{}{}{}", color::BOLD, color::CYAN, text, color::RESET),
        (true, false) => format!("*{text}"),
    }
}
