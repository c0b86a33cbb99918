mod helpers;

use std::collections::BTreeMap;

use rand::{SeedableRng, rngs::StdRng, seq::SliceRandom};

use arbor::{
    config::BTreeConfig,
    storage::btree::{BPlusNode, BPlusTree, CompositeKey, NodeId},
};
use helpers::{data::random_records, harness::build_checked};

const CONFIGS: [(usize, usize); 6] = [(1, 1), (2, 1), (3, 2), (4, 3), (1, 4), (7, 2)];

fn leaf_keys(tree: &BPlusTree) -> Vec<(NodeId, &CompositeKey)> {
    tree.leaves()
        .filter_map(|id| tree.leaf(id).map(|l| (id, l)))
        .flat_map(|(id, l)| l.keys.iter().map(move |k| (id, k)))
        .collect()
}

fn for_each_random_tree(key_columns: &[&str], mut check: impl FnMut(&BPlusTree, BTreeConfig, usize)) {
    helpers::init_debug_for_tests();

    for seed in 0..40u64 {
        let mut rng = StdRng::seed_from_u64(seed);
        let n = 1 + (seed as usize * 7) % 60;
        let records = random_records(&mut rng, n);

        for (leaf, internal) in CONFIGS {
            let config = BTreeConfig::new(leaf, internal);
            let tree = build_checked(&records, key_columns, config)
                .unwrap_or_else(|e| panic!("seed {seed}, config {config:?}: {e}"));
            check(&tree, config, n);
        }
    }
}

#[test]
fn leaf_chain_is_sorted() {
    for_each_random_tree(&["k"], |tree, _, _| {
        let keys = leaf_keys(tree);
        assert!(keys.windows(2).all(|w| w[0].1 <= w[1].1));
    });
}

#[test]
fn every_record_appears_exactly_once() {
    for_each_random_tree(&["k", "g"], |tree, _, n| {
        let mut sources: Vec<usize> = tree
            .leaves()
            .filter_map(|id| tree.leaf(id))
            .flat_map(|l| l.sources.iter().copied())
            .collect();
        sources.sort_unstable();
        assert_eq!(sources, (0..n).collect::<Vec<_>>());
        assert_eq!(tree.record_count(), n);
    });
}

#[test]
fn duplicate_keys_share_a_leaf() {
    for_each_random_tree(&["k"], |tree, _, _| {
        let mut home: BTreeMap<&CompositeKey, NodeId> = BTreeMap::new();
        for (leaf, key) in leaf_keys(tree) {
            let owner = *home.entry(key).or_insert(leaf);
            assert_eq!(owner, leaf, "key {key} split across leaves");
        }
    });
}

#[test]
fn equal_keys_keep_input_order() {
    for_each_random_tree(&["g"], |tree, _, _| {
        let leaves: Vec<_> = tree.leaves().filter_map(|id| tree.leaf(id)).collect();
        for leaf in leaves {
            for (pair, keys) in leaf.sources.windows(2).zip(leaf.keys.windows(2)) {
                if keys[0] == keys[1] {
                    assert!(pair[0] < pair[1]);
                }
            }
        }
    });
}

#[test]
fn separators_are_right_subtree_minimums() {
    for_each_random_tree(&["k"], |tree, _, _| {
        for id in tree.preorder() {
            let Some(BPlusNode::Internal(node)) = tree.node(id) else {
                continue;
            };
            if node.synthesized {
                assert_eq!(node.keys.first(), tree.min_key(node.children[0]));
                continue;
            }
            for (i, key) in node.keys.iter().enumerate() {
                assert_eq!(Some(key), tree.min_key(node.children[i + 1]));
                assert!(tree.min_key(node.children[i]) < Some(key));
            }
        }
    });
}

#[test]
fn leaves_respect_capacity_unless_single_run() {
    for_each_random_tree(&["k"], |tree, config, _| {
        for id in tree.leaves() {
            let leaf = tree.leaf(id).unwrap();
            assert!(!leaf.is_empty());
            if leaf.len() > config.max_keys_per_leaf {
                assert_eq!(leaf.first_key(), leaf.last_key());
            }
        }
    });
}

#[test]
fn internal_fan_out_is_bounded() {
    for_each_random_tree(&["k", "seq"], |tree, config, _| {
        for id in tree.preorder() {
            if let Some(BPlusNode::Internal(node)) = tree.node(id) {
                let children = node.children.len();
                assert!((1..=config.max_children_per_internal()).contains(&children));
                if node.synthesized {
                    assert_eq!((children, node.keys.len()), (1, 1));
                } else {
                    assert_eq!(node.keys.len() + 1, children);
                }
            }
        }
    });
}

#[test]
fn all_leaves_sit_at_the_same_depth() {
    for_each_random_tree(&["seq"], |tree, _, _| {
        let levels = tree.levels();
        let deepest = levels.last().unwrap();
        assert_eq!(deepest.len(), tree.leaf_count());
        assert!(deepest.iter().all(|id| tree.leaf(*id).is_some()));
        assert_eq!(levels.len(), tree.depth());
    });
}

#[test]
fn search_path_reaches_every_key() {
    for_each_random_tree(&["k"], |tree, _, _| {
        for (leaf, key) in leaf_keys(tree) {
            let path = tree.search_path(key);
            assert_eq!(path.first(), Some(&tree.root()));
            assert_eq!(path.last(), Some(&leaf));
            assert!(!tree.lookup(key).is_empty());
        }
    });
}

#[test]
fn build_is_deterministic() {
    let mut rng = StdRng::seed_from_u64(99);
    let records = random_records(&mut rng, 50);

    for (leaf, internal) in CONFIGS {
        let config = BTreeConfig::new(leaf, internal);
        let a = build_checked(&records, &["k"], config).unwrap();
        let b = build_checked(&records, &["k"], config).unwrap();
        assert_eq!(a, b);
    }
}

#[test]
fn shape_ignores_input_order_for_unique_keys() {
    let mut rng = StdRng::seed_from_u64(3);
    let mut records = random_records(&mut rng, 40);
    let config = BTreeConfig::default();

    let sorted = build_checked(&records, &["seq"], config).unwrap();
    records.shuffle(&mut rng);
    let shuffled = build_checked(&records, &["seq"], config).unwrap();

    let keys = |t: &BPlusTree| -> Vec<CompositeKey> {
        leaf_keys(t).into_iter().map(|(_, k)| k.clone()).collect()
    };
    assert_eq!(keys(&sorted), keys(&shuffled));
    assert_eq!(sorted.depth(), shuffled.depth());
    assert_eq!(sorted.leaf_count(), shuffled.leaf_count());
}
