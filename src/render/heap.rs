use crate::{
    render::{LeafLabels, RenderOptions, mark, tuple},
    storage::{btree::BPlusTree, heap::HeapFile},
};

/// Leaf-to-heap pointers followed by the page table.
pub fn render_heap(
    tree: &BPlusTree,
    heap: &HeapFile,
    labels: &LeafLabels,
    options: &RenderOptions,
) -> String {
    let mut out = format!(
        "heap: {} pages x {} rows\n",
        heap.page_count(),
        heap.rows_per_page()
    );

    let mut by_source: Vec<Option<String>> = vec![None; heap.len()];

    for id in tree.leaves() {
        let Some(leaf) = tree.leaf(id) else { continue };

        let pointers = leaf
            .records
            .iter()
            .zip(&leaf.sources)
            .map(|(record, source)| {
                let t = tuple(record, tree.key_columns(), &[]);
                if let Some(slot) = by_source.get_mut(*source) {
                    *slot = Some(t.clone());
                }
                match heap.row_id(*source) {
                    Some(rid) => format!("{t} -> {rid}"),
                    None => format!("{t} -> ?"),
                }
            })
            .collect::<Vec<_>>()
            .join(", ");

        let label = mark(&labels.label(id), options.highlight.contains(&id), options);
        out.push_str(&format!("  {label}: {pointers}\n"));
    }

    for (page, sources) in heap.pages().iter().enumerate() {
        let rows = sources
            .iter()
            .map(|s| {
                by_source
                    .get(*s)
                    .cloned()
                    .flatten()
                    .unwrap_or_else(|| "[?]".to_string())
            })
            .collect::<Vec<_>>()
            .join(" ");
        out.push_str(&format!("  page {page} | {rows}\n"));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::{record::record, value::Value};
    use crate::storage::btree::build;

    #[test]
    fn pointers_follow_heap_placement() {
        let rows: Vec<_> = [3, 1, 2, 4]
            .iter()
            .map(|i| record(&[("id", Value::Int64(*i))]))
            .collect();
        let tree = build(&rows, &["id"]).unwrap();
        let heap = HeapFile::sequential(rows.len(), 2).unwrap();
        let labels = LeafLabels::new(&tree);

        let output = render_heap(&tree, &heap, &labels, &RenderOptions::default());

        let expected = r#"
heap: 2 pages x 2 rows
  L0: [1] -> p0.s1, [2] -> p1.s0, [3] -> p0.s0
  L1: [4] -> p1.s1
  page 0 | [3] [1]
  page 1 | [2] [4]
"#;

        assert_eq!(output.trim(), expected.trim());
    }
}
