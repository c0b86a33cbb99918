use std::collections::VecDeque;

use crate::{
    common::record::Record,
    storage::btree::{
        key::{CompositeKey, KeySpec},
        node::{BPlusNode, LeafNode, NodeId},
    },
};

/// A statically built B+ tree.
///
/// Nodes live in an arena owned by the tree and reference each other by
/// [`NodeId`]. Leaves are linked left to right through `LeafNode::next`.
#[derive(Debug, Clone, PartialEq)]
pub struct BPlusTree {
    root: NodeId,
    first_leaf: NodeId,
    nodes: Vec<BPlusNode>,
    key_spec: KeySpec,
    input_records: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TreeStats {
    pub depth: usize,
    pub leaves: usize,
    pub internal_nodes: usize,
    pub records: usize,
    pub oversized_leaves: usize,
    pub synthesized_nodes: usize,
    /// Records per leaf slot, over all leaves.
    pub fill_ratio: f64,
}

impl BPlusTree {
    pub(crate) fn from_parts(
        nodes: Vec<BPlusNode>,
        root: NodeId,
        first_leaf: NodeId,
        key_spec: KeySpec,
        input_records: usize,
    ) -> Self {
        Self {
            root,
            first_leaf,
            nodes,
            key_spec,
            input_records,
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn root_node(&self) -> &BPlusNode {
        &self.nodes[self.root]
    }

    pub fn first_leaf(&self) -> NodeId {
        self.first_leaf
    }

    pub fn node(&self, id: NodeId) -> Option<&BPlusNode> {
        self.nodes.get(id)
    }

    pub fn leaf(&self, id: NodeId) -> Option<&LeafNode> {
        self.nodes.get(id).and_then(BPlusNode::as_leaf)
    }

    pub fn key_spec(&self) -> &KeySpec {
        &self.key_spec
    }

    pub fn key_columns(&self) -> &[String] {
        self.key_spec.columns()
    }

    /// Number of records the tree was built from.
    pub fn input_records(&self) -> usize {
        self.input_records
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn leaf_count(&self) -> usize {
        self.leaves().count()
    }

    pub fn record_count(&self) -> usize {
        self.leaves()
            .filter_map(|id| self.leaf(id))
            .map(LeafNode::len)
            .sum()
    }

    /// Smallest key reachable from `id`, found on its leftmost leaf.
    pub fn min_key(&self, id: NodeId) -> Option<&CompositeKey> {
        let mut node = id;
        loop {
            match self.nodes.get(node)? {
                BPlusNode::Leaf(l) => return l.first_key(),
                BPlusNode::Internal(i) => node = *i.children.first()?,
            }
        }
    }

    /// Leaf ids in sibling-chain order.
    pub fn leaves(&self) -> LeafChain<'_> {
        LeafChain {
            tree: self,
            next: Some(self.first_leaf),
        }
    }

    /// Levels from root to leaves; a lone leaf has depth 1.
    pub fn depth(&self) -> usize {
        let mut depth = 1;
        let mut node = self.root;
        while let Some(BPlusNode::Internal(i)) = self.nodes.get(node) {
            match i.children.first() {
                Some(child) => node = *child,
                None => break,
            }
            depth += 1;
        }
        depth
    }

    /// Node ids root first, children left to right.
    pub fn preorder(&self) -> Vec<NodeId> {
        let mut out = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![self.root];

        while let Some(id) = stack.pop() {
            out.push(id);
            if let Some(BPlusNode::Internal(i)) = self.nodes.get(id) {
                stack.extend(i.children.iter().rev());
            }
        }

        out
    }

    /// Node ids grouped by level, root level first.
    pub fn levels(&self) -> Vec<Vec<NodeId>> {
        let mut levels: Vec<Vec<NodeId>> = Vec::new();
        let mut queue = VecDeque::from([(self.root, 0usize)]);

        while let Some((id, level)) = queue.pop_front() {
            if levels.len() <= level {
                levels.push(Vec::new());
            }
            levels[level].push(id);

            if let Some(BPlusNode::Internal(i)) = self.nodes.get(id) {
                queue.extend(i.children.iter().map(|c| (*c, level + 1)));
            }
        }

        levels
    }

    /// Nodes visited descending from the root towards `key`.
    ///
    /// A key equal to a separator routes to the right of it.
    pub fn search_path(&self, key: &CompositeKey) -> Vec<NodeId> {
        let mut path = Vec::new();
        let mut node = self.root;

        loop {
            path.push(node);
            match self.nodes.get(node) {
                Some(BPlusNode::Internal(internal)) => {
                    let idx = match internal.keys.binary_search(key) {
                        Ok(i) => i + 1,
                        Err(i) => i,
                    };
                    let idx = idx.min(internal.children.len().saturating_sub(1));
                    match internal.children.get(idx) {
                        Some(child) => node = *child,
                        None => return path,
                    }
                }
                _ => return path,
            }
        }
    }

    /// Records whose key equals `key`.
    pub fn lookup(&self, key: &CompositeKey) -> Vec<&Record> {
        let Some(leaf) = self
            .search_path(key)
            .last()
            .and_then(|id| self.leaf(*id))
        else {
            return Vec::new();
        };

        leaf.keys
            .iter()
            .zip(&leaf.records)
            .filter(|(k, _)| *k == key)
            .map(|(_, r)| r)
            .collect()
    }

    pub fn stats(&self, max_keys_per_leaf: usize) -> TreeStats {
        let mut stats = TreeStats {
            depth: self.depth(),
            leaves: 0,
            internal_nodes: 0,
            records: 0,
            oversized_leaves: 0,
            synthesized_nodes: 0,
            fill_ratio: 0.0,
        };

        for node in &self.nodes {
            match node {
                BPlusNode::Leaf(l) => {
                    stats.leaves += 1;
                    stats.records += l.len();
                    if l.len() > max_keys_per_leaf {
                        stats.oversized_leaves += 1;
                    }
                }
                BPlusNode::Internal(i) => {
                    stats.internal_nodes += 1;
                    if i.synthesized {
                        stats.synthesized_nodes += 1;
                    }
                }
            }
        }

        let slots = stats.leaves * max_keys_per_leaf;
        if slots > 0 {
            stats.fill_ratio = stats.records as f64 / slots as f64;
        }

        stats
    }

    #[cfg(test)]
    pub(crate) fn nodes_mut(&mut self) -> &mut Vec<BPlusNode> {
        &mut self.nodes
    }
}

/// Iterator over the leaf sibling chain.
pub struct LeafChain<'a> {
    tree: &'a BPlusTree,
    next: Option<NodeId>,
}

impl Iterator for LeafChain<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.next?;
        self.next = self.tree.leaf(id).and_then(|l| l.next);
        Some(id)
    }
}
