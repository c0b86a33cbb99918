use arbor::{
    api::{Output, Session},
    common::record::Record,
    config::{BTreeConfig, Settings},
    storage::btree::{BPlusTree, BTreeBuilder, check_invariants},
};

/// Builds and runs the invariant checker in one step.
#[allow(dead_code)]
pub fn build_checked(
    records: &[Record],
    key_columns: &[&str],
    config: BTreeConfig,
) -> Result<BPlusTree, anyhow::Error> {
    let tree = BTreeBuilder::new(config).build(records, key_columns)?;
    check_invariants(&tree, &config)?;
    Ok(tree)
}

#[allow(dead_code)]
pub struct TestSession {
    pub session: Session,
}

#[allow(dead_code)]
impl TestSession {
    pub fn new() -> Self {
        Self::with_settings(Settings {
            color: false,
            ..Settings::default()
        })
    }

    pub fn with_settings(settings: Settings) -> Self {
        super::init_debug_for_tests();
        let session = Session::with_seed(&settings, 42).unwrap();
        Self { session }
    }

    pub fn exec(&mut self, command: &str) -> Result<String, anyhow::Error> {
        match self.session.execute(command)? {
            Output::Text(text) => Ok(text),
            Output::Quit => anyhow::bail!("session quit on '{command}'"),
        }
    }

    pub fn script(&mut self, commands: &[&str]) -> Result<Vec<String>, anyhow::Error> {
        commands.iter().map(|c| self.exec(c)).collect()
    }
}
