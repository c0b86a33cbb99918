use crate::{
    render::{LeafLabels, RenderOptions, mark, tuple},
    storage::btree::{BPlusNode, BPlusTree, NodeId},
};

/// Box-drawing hierarchy, one node per line.
pub fn render_tree(tree: &BPlusTree, labels: &LeafLabels, options: &RenderOptions) -> String {
    let mut out = String::new();
    fmt_node(tree, tree.root(), "", true, true, labels, options, &mut out);
    out
}

#[allow(clippy::too_many_arguments)]
fn fmt_node(
    tree: &BPlusTree,
    id: NodeId,
    prefix: &str,
    is_last: bool,
    is_root: bool,
    labels: &LeafLabels,
    options: &RenderOptions,
    out: &mut String,
) {
    let label = mark(
        &node_label(tree, id, labels, options),
        options.highlight.contains(&id),
        options,
    );

    if is_root {
        out.push_str(&label);
    } else {
        out.push_str(prefix);
        out.push_str(if is_last { "└─ " } else { "├─ " });
        out.push_str(&label);
    }
    out.push('\n');

    let child_prefix = if is_root {
        String::new()
    } else if is_last {
        format!("{prefix}   ")
    } else {
        format!("{prefix}│  ")
    };

    if let Some(BPlusNode::Internal(internal)) = tree.node(id) {
        let count = internal.children.len();
        for (i, child) in internal.children.iter().enumerate() {
            fmt_node(
                tree,
                *child,
                &child_prefix,
                i + 1 == count,
                false,
                labels,
                options,
                out,
            );
        }
    }
}

fn node_label(tree: &BPlusTree, id: NodeId, labels: &LeafLabels, options: &RenderOptions) -> String {
    match tree.node(id) {
        Some(BPlusNode::Internal(internal)) => {
            let keys = internal
                .keys
                .iter()
                .map(|k| k.to_string())
                .collect::<Vec<_>>()
                .join(", ");

            if internal.synthesized {
                format!("Node [{keys}] (single child)")
            } else {
                format!("Node [{keys}]")
            }
        }
        Some(BPlusNode::Leaf(leaf)) => {
            let tuples = leaf
                .records
                .iter()
                .map(|r| tuple(r, tree.key_columns(), &options.include_columns))
                .collect::<Vec<_>>()
                .join(" ");

            format!("Leaf {} {}", labels.label(id), tuples)
        }
        None => format!("<missing node {id}>"),
    }
}

/// Sibling links in chain order.
pub fn render_chain(tree: &BPlusTree, labels: &LeafLabels, options: &RenderOptions) -> String {
    let chain = tree
        .leaves()
        .map(|id| mark(&labels.label(id), options.highlight.contains(&id), options))
        .collect::<Vec<_>>()
        .join(" -> ");

    format!("leaf chain: {chain}\n")
}
