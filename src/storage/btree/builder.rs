use crate::{
    common::record::Record,
    config::BTreeConfig,
    db_debug, db_info, db_phase, db_trace,
    debugger::Component,
    storage::btree::{
        errors::{BuildError, BuildResult},
        key::{CompositeKey, KeySpec},
        node::{BPlusNode, InternalNode, LeafNode, NodeId},
        tree::BPlusTree,
    },
};

/// Bulk loader producing a static [`BPlusTree`] from unsorted records.
#[derive(Debug, Clone, Default)]
pub struct BTreeBuilder {
    config: BTreeConfig,
}

/// Builds with the default shape (3 records per leaf, 2 keys per internal node).
pub fn build<S: AsRef<str>>(records: &[Record], key_columns: &[S]) -> BuildResult<BPlusTree> {
    BTreeBuilder::default().build(records, key_columns)
}

impl BTreeBuilder {
    pub fn new(config: BTreeConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &BTreeConfig {
        &self.config
    }

    pub fn build<S: AsRef<str>>(
        &self,
        records: &[Record],
        key_columns: &[S],
    ) -> BuildResult<BPlusTree> {
        self.config.validate()?;
        let key_spec = KeySpec::new(key_columns)?;

        if records.is_empty() {
            return Err(BuildError::EmptyInput);
        }

        db_info!(
            Component::Builder,
            "building over {} records, keys {:?}, leaf cap {}, fan-out {}",
            records.len(),
            key_spec.columns(),
            self.config.max_keys_per_leaf,
            self.config.max_children_per_internal()
        );

        let entries = db_phase!("sort", { sort_entries(records, &key_spec) })?;
        let leaves = db_phase!("partition", {
            partition_leaves(&entries, records, self.config.max_keys_per_leaf)
        });

        let mut nodes: Vec<BPlusNode> = Vec::new();
        let leaf_level = db_phase!("link", { link_leaves(leaves, &mut nodes) });
        let root = db_phase!("levels", {
            build_levels(leaf_level, &mut nodes, self.config.max_children_per_internal())
        });

        db_info!(
            Component::Builder,
            "built {} nodes, root {}",
            nodes.len(),
            root
        );

        // Leaves are allocated first, so the leftmost leaf is always node 0.
        Ok(BPlusTree::from_parts(nodes, root, 0, key_spec, records.len()))
    }
}

/// Projects every record and stable-sorts by composite key.
///
/// Returns `(key, input ordinal)` pairs; equal keys keep input order.
fn sort_entries(records: &[Record], key_spec: &KeySpec) -> BuildResult<Vec<(CompositeKey, usize)>> {
    let mut entries = records
        .iter()
        .enumerate()
        .map(|(i, r)| key_spec.project(r, i).map(|k| (k, i)))
        .collect::<BuildResult<Vec<_>>>()?;

    entries.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(entries)
}

/// Cuts the sorted entries into leaves without splitting a duplicate run.
fn partition_leaves(
    entries: &[(CompositeKey, usize)],
    records: &[Record],
    max_keys_per_leaf: usize,
) -> Vec<LeafNode> {
    let mut leaves = Vec::new();
    let mut current = LeafNode::new();
    let mut i = 0;

    while i < entries.len() {
        let run_key = &entries[i].0;
        let run = entries[i..]
            .iter()
            .take_while(|(k, _)| k == run_key)
            .count();

        if !current.is_empty() && current.len() + run > max_keys_per_leaf {
            db_trace!(
                Component::Builder,
                "closing leaf {} at {} records before run {} x{}",
                leaves.len(),
                current.len(),
                run_key,
                run
            );
            leaves.push(std::mem::take(&mut current));
        }

        if run > max_keys_per_leaf {
            db_debug!(
                Component::Builder,
                "duplicate run {} x{} exceeds leaf capacity {}, kept whole",
                run_key,
                run,
                max_keys_per_leaf
            );
        }

        for (key, source) in &entries[i..i + run] {
            current.push(key.clone(), records[*source].clone(), *source);
        }
        i += run;
    }

    if !current.is_empty() {
        leaves.push(current);
    }

    leaves
}

/// Moves leaves into the arena and chains them left to right.
fn link_leaves(leaves: Vec<LeafNode>, nodes: &mut Vec<BPlusNode>) -> Vec<(NodeId, CompositeKey)> {
    let base = nodes.len();
    let count = leaves.len();
    let mut level = Vec::with_capacity(count);

    for (offset, mut leaf) in leaves.into_iter().enumerate() {
        let id = base + offset;
        leaf.next = (offset + 1 < count).then_some(id + 1);

        if let Some(min) = leaf.first_key() {
            level.push((id, min.clone()));
        }
        nodes.push(BPlusNode::Leaf(leaf));
    }

    db_debug!(Component::Builder, "chained {} leaves", count);
    level
}

/// Wraps each level into internal nodes until a single root remains.
///
/// Every level entry carries the minimum key of its subtree, so separators
/// never require a descent.
fn build_levels(
    mut level: Vec<(NodeId, CompositeKey)>,
    nodes: &mut Vec<BPlusNode>,
    max_children: usize,
) -> NodeId {
    let mut height = 1;

    while level.len() > 1 {
        let mut next_level = Vec::with_capacity(level.len().div_ceil(max_children));

        for chunk in level.chunks(max_children) {
            let children: Vec<NodeId> = chunk.iter().map(|(id, _)| *id).collect();
            let min = chunk[0].1.clone();

            let node = if chunk.len() == 1 {
                db_debug!(
                    Component::Builder,
                    "single-child node over {} at height {}, synthesizing key {}",
                    children[0],
                    height,
                    min
                );
                InternalNode {
                    keys: vec![min.clone()],
                    children,
                    synthesized: true,
                }
            } else {
                InternalNode {
                    keys: chunk[1..].iter().map(|(_, k)| k.clone()).collect(),
                    children,
                    synthesized: false,
                }
            };

            let id = nodes.len();
            nodes.push(BPlusNode::Internal(node));
            next_level.push((id, min));
        }

        db_trace!(
            Component::Builder,
            "height {}: {} nodes -> {} nodes",
            height,
            level.len(),
            next_level.len()
        );

        level = next_level;
        height += 1;
    }

    level[0].0
}
