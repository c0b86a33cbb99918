use std::fmt;

use crate::{
    config::BTreeConfig,
    db_debug, db_scope,
    debugger::{Component, DebugLevel},
    storage::btree::{
        node::{BPlusNode, NodeId},
        tree::BPlusTree,
    },
};

#[derive(Debug, Clone, PartialEq)]
pub enum InvariantViolation {
    DanglingChild { node: NodeId, child: NodeId },
    EmptyLeaf { leaf: NodeId },
    ParallelArrays { leaf: NodeId },
    KeyMismatch { leaf: NodeId, slot: usize },
    UnsortedLeaf { leaf: NodeId, slot: usize },
    BrokenChain { reason: String },
    SplitDuplicate { left: NodeId, right: NodeId },
    LeafOverflow { leaf: NodeId, len: usize },
    FanOut { node: NodeId, children: usize },
    KeyCount { node: NodeId, keys: usize, children: usize },
    Separator { node: NodeId, index: usize },
    Unbalanced { leaf: NodeId, depth: usize, expected: usize },
    Coverage { reason: String },
}

pub type ValidationResult = Result<(), InvariantViolation>;

impl fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvariantViolation::DanglingChild { node, child } => {
                write!(f, "node {} references missing child {}", node, child)
            }
            InvariantViolation::EmptyLeaf { leaf } => write!(f, "leaf {} is empty", leaf),
            InvariantViolation::ParallelArrays { leaf } => {
                write!(f, "leaf {} has mismatched keys/records/sources", leaf)
            }
            InvariantViolation::KeyMismatch { leaf, slot } => {
                write!(f, "leaf {} slot {} key is not the record's projection", leaf, slot)
            }
            InvariantViolation::UnsortedLeaf { leaf, slot } => {
                write!(f, "leaf {} is out of order at slot {}", leaf, slot)
            }
            InvariantViolation::BrokenChain { reason } => write!(f, "leaf chain broken: {}", reason),
            InvariantViolation::SplitDuplicate { left, right } => write!(
                f,
                "leaves {} and {} are not strictly ordered across their boundary",
                left, right
            ),
            InvariantViolation::LeafOverflow { leaf, len } => write!(
                f,
                "leaf {} holds {} records of differing keys beyond capacity",
                leaf, len
            ),
            InvariantViolation::FanOut { node, children } => {
                write!(f, "internal node {} has {} children", node, children)
            }
            InvariantViolation::KeyCount {
                node,
                keys,
                children,
            } => write!(
                f,
                "internal node {} has {} keys for {} children",
                node, keys, children
            ),
            InvariantViolation::Separator { node, index } => {
                write!(f, "internal node {} separator {} is not its subtree minimum", node, index)
            }
            InvariantViolation::Unbalanced {
                leaf,
                depth,
                expected,
            } => write!(
                f,
                "leaf {} sits at depth {}, expected {}",
                leaf, depth, expected
            ),
            InvariantViolation::Coverage { reason } => write!(f, "coverage: {}", reason),
        }
    }
}

impl std::error::Error for InvariantViolation {}

/// Walks `tree` and checks every structural invariant of a built index.
pub fn check_invariants(tree: &BPlusTree, config: &BTreeConfig) -> ValidationResult {
    let mut ordered_leaves = Vec::new();
    db_scope!(DebugLevel::Trace, Component::Validate, "node walk", {
        check_node(tree, config, tree.root(), 1, tree.depth(), &mut ordered_leaves)
    })?;
    check_chain(tree, &ordered_leaves)?;
    check_coverage(tree, &ordered_leaves)?;

    db_debug!(
        Component::Validate,
        "tree with {} leaves passed all checks",
        ordered_leaves.len()
    );
    Ok(())
}

fn check_node(
    tree: &BPlusTree,
    config: &BTreeConfig,
    id: NodeId,
    depth: usize,
    expected_depth: usize,
    leaves: &mut Vec<NodeId>,
) -> ValidationResult {
    match tree.node(id) {
        None => Err(InvariantViolation::DanglingChild {
            node: id,
            child: id,
        }),
        Some(BPlusNode::Leaf(_)) => {
            if depth != expected_depth {
                return Err(InvariantViolation::Unbalanced {
                    leaf: id,
                    depth,
                    expected: expected_depth,
                });
            }
            check_leaf(tree, config, id)?;
            leaves.push(id);
            Ok(())
        }
        Some(BPlusNode::Internal(internal)) => {
            let children = internal.children.len();
            if children == 0 || children > config.max_children_per_internal() {
                return Err(InvariantViolation::FanOut { node: id, children });
            }

            if let Some(missing) = internal.children.iter().find(|c| tree.node(**c).is_none()) {
                return Err(InvariantViolation::DanglingChild {
                    node: id,
                    child: *missing,
                });
            }

            if internal.synthesized {
                if children != 1 || internal.keys.len() != 1 {
                    return Err(InvariantViolation::KeyCount {
                        node: id,
                        keys: internal.keys.len(),
                        children,
                    });
                }
                if tree.min_key(internal.children[0]) != internal.keys.first() {
                    return Err(InvariantViolation::Separator { node: id, index: 0 });
                }
            } else {
                if internal.keys.len() + 1 != children {
                    return Err(InvariantViolation::KeyCount {
                        node: id,
                        keys: internal.keys.len(),
                        children,
                    });
                }
                for (index, key) in internal.keys.iter().enumerate() {
                    if tree.min_key(internal.children[index + 1]) != Some(key) {
                        return Err(InvariantViolation::Separator { node: id, index });
                    }
                }
            }

            for child in &internal.children {
                check_node(tree, config, *child, depth + 1, expected_depth, leaves)?;
            }
            Ok(())
        }
    }
}

fn check_leaf(tree: &BPlusTree, config: &BTreeConfig, id: NodeId) -> ValidationResult {
    let Some(leaf) = tree.leaf(id) else {
        return Ok(());
    };

    if leaf.is_empty() {
        return Err(InvariantViolation::EmptyLeaf { leaf: id });
    }
    if leaf.keys.len() != leaf.records.len() || leaf.sources.len() != leaf.records.len() {
        return Err(InvariantViolation::ParallelArrays { leaf: id });
    }

    for (slot, (key, record)) in leaf.keys.iter().zip(&leaf.records).enumerate() {
        let projected = tree.key_spec().project(record, leaf.sources[slot]);
        if projected.as_ref() != Ok(key) {
            return Err(InvariantViolation::KeyMismatch { leaf: id, slot });
        }
    }

    if let Some(slot) = leaf.keys.windows(2).position(|w| w[0] > w[1]) {
        return Err(InvariantViolation::UnsortedLeaf {
            leaf: id,
            slot: slot + 1,
        });
    }

    // An oversized leaf may only hold a single duplicate run.
    if leaf.len() > config.max_keys_per_leaf && leaf.first_key() != leaf.last_key() {
        return Err(InvariantViolation::LeafOverflow {
            leaf: id,
            len: leaf.len(),
        });
    }

    Ok(())
}

fn check_chain(tree: &BPlusTree, ordered: &[NodeId]) -> ValidationResult {
    let chain: Vec<NodeId> = tree.leaves().take(tree.node_count() + 1).collect();

    if chain.len() > ordered.len() {
        return Err(InvariantViolation::BrokenChain {
            reason: format!(
                "chain visits {} leaves but the tree has {}",
                chain.len(),
                ordered.len()
            ),
        });
    }
    if chain != ordered {
        return Err(InvariantViolation::BrokenChain {
            reason: format!("chain order {:?} differs from tree order {:?}", chain, ordered),
        });
    }

    for pair in chain.windows(2) {
        let (left, right) = (pair[0], pair[1]);
        let last = tree.leaf(left).and_then(|l| l.last_key());
        let first = tree.leaf(right).and_then(|l| l.first_key());
        if last >= first {
            return Err(InvariantViolation::SplitDuplicate { left, right });
        }
    }

    Ok(())
}

fn check_coverage(tree: &BPlusTree, ordered: &[NodeId]) -> ValidationResult {
    let mut sources: Vec<usize> = ordered
        .iter()
        .filter_map(|id| tree.leaf(*id))
        .flat_map(|l| l.sources.iter().copied())
        .collect();
    sources.sort_unstable();

    if sources.len() != tree.input_records() {
        return Err(InvariantViolation::Coverage {
            reason: format!(
                "leaves hold {} records but {} were loaded",
                sources.len(),
                tree.input_records()
            ),
        });
    }

    if let Some((expected, found)) = sources
        .iter()
        .enumerate()
        .find(|(expected, found)| *expected != **found)
    {
        return Err(InvariantViolation::Coverage {
            reason: format!("expected record {} but found {}", expected, found),
        });
    }

    Ok(())
}
