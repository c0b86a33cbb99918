mod helpers;

use arbor::{
    api::ApiError,
    config::{BTreeConfig, Settings},
    storage::btree::BuildError,
};
use helpers::harness::TestSession;

#[test]
fn walkthrough_of_the_publisher_dataset() {
    let mut t = TestSession::new();

    let outputs = t
        .script(&["show", "find 9", "heap on", "records", "check"])
        .unwrap();

    assert!(outputs[0].starts_with("Node ["));
    assert!(outputs[1].contains("3 record(s) with key 9"));
    assert!(outputs[1].contains("*Leaf L1 [9] [9] [9]"));
    assert!(outputs[2].contains("heap: 6 pages x 4 rows"));
    assert!(outputs[3].lines().any(|l| l.starts_with("L0   [4] -> p0.s0")));
    assert!(outputs[4].starts_with("all invariants hold"));
}

#[test]
fn every_dataset_can_be_loaded() {
    let mut t = TestSession::new();

    for name in arbor::data::names() {
        t.exec(&format!("use {name}")).unwrap();
        assert_eq!(t.session.dataset(), *name);
        t.exec("check").unwrap();
    }
}

#[test]
fn edits_rebuild_and_errors_keep_state() {
    let mut t = TestSession::new();

    t.exec("set leaf 2").unwrap();
    let tree = t.session.tree().clone();
    assert_eq!(t.session.config(), BTreeConfig::new(2, 2));

    let err = t.session.execute("set internal 0").unwrap_err();
    assert!(matches!(err, ApiError::Build(BuildError::Configuration { .. })));
    assert_eq!(t.session.tree(), &tree);

    t.exec("insert publisher=50, title=\"Emma\"").unwrap();
    assert_eq!(t.session.tree().record_count(), 22);
    t.exec("check").unwrap();
}

#[test]
fn settings_choose_the_starting_shape() {
    let settings = Settings::from_sources(
        None,
        ["--dataset=id-title", "--leaf=5", "--no-color"]
            .iter()
            .map(|s| s.to_string()),
    )
    .unwrap();
    let mut t = TestSession::with_settings(settings);

    assert_eq!(t.session.dataset(), "id-title");
    assert_eq!(t.session.tree().leaf_count(), 5);
    assert!(t.exec("show").unwrap().contains("[1, \"The Great Gat...\"]"));
}
