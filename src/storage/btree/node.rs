use crate::{common::record::Record, storage::btree::key::CompositeKey};

/// Index of a node in its tree's arena.
pub type NodeId = usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Internal,
    Leaf,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LeafNode {
    pub keys: Vec<CompositeKey>,
    pub records: Vec<Record>,
    /// Input ordinal of each record; parallel to `records`.
    pub sources: Vec<usize>,
    pub next: Option<NodeId>, // right sibling
}

impl LeafNode {
    pub fn new() -> Self {
        Self {
            keys: Vec::new(),
            records: Vec::new(),
            sources: Vec::new(),
            next: None,
        }
    }

    pub fn push(&mut self, key: CompositeKey, record: Record, source: usize) {
        self.keys.push(key);
        self.records.push(record);
        self.sources.push(source);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn first_key(&self) -> Option<&CompositeKey> {
        self.keys.first()
    }

    pub fn last_key(&self) -> Option<&CompositeKey> {
        self.keys.last()
    }
}

impl Default for LeafNode {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct InternalNode {
    pub keys: Vec<CompositeKey>,
    pub children: Vec<NodeId>, // children.len() = keys.len() + 1 unless synthesized
    /// Single-child node carrying its child's minimum key for display.
    pub synthesized: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum BPlusNode {
    Internal(InternalNode),
    Leaf(LeafNode),
}

impl BPlusNode {
    pub fn kind(&self) -> NodeKind {
        match self {
            BPlusNode::Internal(_) => NodeKind::Internal,
            BPlusNode::Leaf(_) => NodeKind::Leaf,
        }
    }

    pub fn keys(&self) -> &[CompositeKey] {
        match self {
            BPlusNode::Internal(i) => &i.keys,
            BPlusNode::Leaf(l) => &l.keys,
        }
    }

    pub fn as_leaf(&self) -> Option<&LeafNode> {
        match self {
            BPlusNode::Leaf(l) => Some(l),
            BPlusNode::Internal(_) => None,
        }
    }

    pub fn as_internal(&self) -> Option<&InternalNode> {
        match self {
            BPlusNode::Internal(i) => Some(i),
            BPlusNode::Leaf(_) => None,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, BPlusNode::Leaf(_))
    }
}
