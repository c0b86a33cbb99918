//! Interactive state behind the visualizer: the current dataset, index
//! definition and tree, rebuilt after every change.

use rand::{SeedableRng, rngs::StdRng};

use crate::{
    api::errors::{ApiError, ApiResult},
    common::{
        record::{Record, column_names},
        value::Value,
    },
    config::{BTreeConfig, Settings},
    data::{self, Dataset},
    db_debug, db_error, db_info, db_phase, db_warn,
    debugger::{self, Component, set_debug_level},
    frontend::command::{Command, HeapAction, parse},
    render::{LeafLabels, RenderOptions, render, tree::render_chain, tuple},
    storage::{
        btree::{BPlusTree, BTreeBuilder, CompositeKey, NodeId, check_invariants},
        heap::HeapFile,
    },
};

const HELP: &str = "\
commands:
  datasets                      list built-in datasets
  use <name>                    load a dataset with its default index
  keys <col>[, ...]             rebuild with a new (composite) key
  include <col>[, ...] | none   columns shown next to each key
  set leaf <n>                  max records per leaf
  set internal <n>              max keys per internal node
  show                          draw the tree
  chain                         draw the leaf chain only
  records                       list records in key order with row ids
  stats                         shape summary
  check                         verify structural invariants
  find <v>[, ...]               highlight the search path for a key
  clear                         remove highlighting
  insert <col>=<v>[, ...]       add a record and rebuild
  heap on|off|shuffle|ordered   heap pointers and record placement
  timeline                      phase timings of the last build
  debug <level>                 off, error, warn, info, debug, trace
  quit | exit";

#[derive(Debug, Clone, PartialEq)]
pub enum Output {
    Text(String),
    Quit,
}

pub struct Session {
    dataset: String,
    records: Vec<Record>,
    key_columns: Vec<String>,
    include_columns: Vec<String>,
    config: BTreeConfig,
    rows_per_page: usize,
    scattered: bool,
    show_heap: bool,
    color: bool,
    highlight: Vec<NodeId>,
    tree: BPlusTree,
    heap: HeapFile,
    rng: StdRng,
}

impl Session {
    pub fn new(settings: &Settings) -> ApiResult<Self> {
        Self::with_rng(settings, StdRng::from_rng(&mut rand::rng()))
    }

    /// Same as [`Session::new`] with reproducible heap shuffles.
    pub fn with_seed(settings: &Settings, seed: u64) -> ApiResult<Self> {
        Self::with_rng(settings, StdRng::seed_from_u64(seed))
    }

    fn with_rng(settings: &Settings, rng: StdRng) -> ApiResult<Self> {
        let dataset = data::load(&settings.dataset)
            .ok_or_else(|| ApiError::UnknownDataset(settings.dataset.clone()))?;

        let tree = build_tree(&dataset.records, &dataset.key_columns, settings.tree)?;
        let heap = HeapFile::sequential(dataset.records.len(), settings.rows_per_page)?;

        db_info!(
            Component::Session,
            "opened dataset '{}' with {} records",
            dataset.name,
            dataset.records.len()
        );

        Ok(Self {
            dataset: dataset.name.to_string(),
            records: dataset.records,
            key_columns: dataset.key_columns,
            include_columns: dataset.include_columns,
            config: settings.tree,
            rows_per_page: settings.rows_per_page,
            scattered: false,
            show_heap: false,
            color: settings.color,
            highlight: Vec::new(),
            tree,
            heap,
            rng,
        })
    }

    pub fn dataset(&self) -> &str {
        &self.dataset
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn key_columns(&self) -> &[String] {
        &self.key_columns
    }

    pub fn include_columns(&self) -> &[String] {
        &self.include_columns
    }

    pub fn config(&self) -> BTreeConfig {
        self.config
    }

    pub fn tree(&self) -> &BPlusTree {
        &self.tree
    }

    pub fn heap(&self) -> &HeapFile {
        &self.heap
    }

    pub fn highlight(&self) -> &[NodeId] {
        &self.highlight
    }

    pub fn show_heap(&self) -> bool {
        self.show_heap
    }

    /// Parses and runs one command line.
    pub fn execute(&mut self, input: &str) -> ApiResult<Output> {
        let command = parse(input)?;
        db_debug!(Component::Session, "command: {}", command);
        self.run(command)
    }

    pub fn run(&mut self, command: Command) -> ApiResult<Output> {
        let text = match command {
            Command::Quit => return Ok(Output::Quit),
            Command::Help => HELP.to_string(),
            Command::Datasets => self.datasets(),
            Command::Use(name) => {
                let Dataset {
                    name,
                    key_columns,
                    include_columns,
                    records,
                    ..
                } = data::load(&name).ok_or(ApiError::UnknownDataset(name))?;

                self.rebuild(records, key_columns, self.config)?;
                self.dataset = name.to_string();
                self.include_columns = include_columns;
                self.show()
            }
            Command::Keys(columns) => {
                self.rebuild(self.records.clone(), columns, self.config)?;
                self.show()
            }
            Command::Include(columns) => {
                let known = column_names(&self.records);
                if let Some(missing) = columns.iter().find(|c| !known.contains(c)) {
                    return Err(ApiError::UnknownColumn(missing.clone()));
                }
                self.include_columns = columns;
                self.show()
            }
            Command::SetLeaf(n) => {
                let config = BTreeConfig {
                    max_keys_per_leaf: n,
                    ..self.config
                };
                self.rebuild(self.records.clone(), self.key_columns.clone(), config)?;
                self.show()
            }
            Command::SetInternal(n) => {
                let config = BTreeConfig {
                    max_keys_per_internal: n,
                    ..self.config
                };
                self.rebuild(self.records.clone(), self.key_columns.clone(), config)?;
                self.show()
            }
            Command::Show => self.show(),
            Command::Chain => render_chain(
                &self.tree,
                &LeafLabels::new(&self.tree),
                &self.render_options(),
            ),
            Command::Records => self.list_records(),
            Command::Stats => self.stats(),
            Command::Check => {
                if let Err(e) = check_invariants(&self.tree, &self.config) {
                    db_error!(Component::Session, "check failed: {}", e);
                    return Err(e.into());
                }
                format!(
                    "all invariants hold ({} leaves, depth {})",
                    self.tree.leaf_count(),
                    self.tree.depth()
                )
            }
            Command::Find(values) => self.find(values)?,
            Command::Clear => {
                self.highlight.clear();
                self.show()
            }
            Command::Insert(pairs) => self.insert(pairs)?,
            Command::Heap(action) => {
                match action {
                    HeapAction::Show => self.show_heap = true,
                    HeapAction::Hide => self.show_heap = false,
                    HeapAction::Shuffle => {
                        self.scattered = true;
                        self.show_heap = true;
                        self.heap = self.place(self.records.len())?;
                    }
                    HeapAction::Ordered => {
                        self.scattered = false;
                        self.show_heap = true;
                        self.heap = self.place(self.records.len())?;
                    }
                }
                self.show()
            }
            Command::Timeline => debugger::get_report(),
            Command::Debug(level) => {
                set_debug_level(level);
                format!("debug level set to {level}")
            }
        };

        Ok(Output::Text(text))
    }

    /// Builds a candidate tree and commits it only if the build succeeds.
    fn rebuild(
        &mut self,
        records: Vec<Record>,
        key_columns: Vec<String>,
        config: BTreeConfig,
    ) -> ApiResult<()> {
        let tree = match build_tree(&records, &key_columns, config) {
            Ok(tree) => tree,
            Err(e) => {
                db_warn!(Component::Session, "rebuild failed, keeping current tree: {}", e);
                return Err(e);
            }
        };
        let heap = self.place(records.len())?;

        self.records = records;
        self.key_columns = key_columns;
        self.config = config;
        self.tree = tree;
        self.heap = heap;
        self.highlight.clear();

        db_info!(
            Component::Session,
            "rebuilt: {} leaves, depth {}",
            self.tree.leaf_count(),
            self.tree.depth()
        );
        Ok(())
    }

    fn place(&mut self, count: usize) -> ApiResult<HeapFile> {
        let heap = if self.scattered {
            HeapFile::scattered(count, self.rows_per_page, &mut self.rng)?
        } else {
            HeapFile::sequential(count, self.rows_per_page)?
        };
        Ok(heap)
    }

    fn render_options(&self) -> RenderOptions {
        RenderOptions {
            include_columns: self.include_columns.clone(),
            highlight: self.highlight.clone(),
            show_heap: self.show_heap,
            color: self.color,
        }
    }

    fn show(&self) -> String {
        render(&self.tree, Some(&self.heap), &self.render_options())
    }

    fn datasets(&self) -> String {
        data::names()
            .iter()
            .filter_map(|name| data::load(name))
            .map(|d| {
                let marker = if d.name == self.dataset { '*' } else { ' ' };
                format!("{} {:<12} {}", marker, d.name, d.description)
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn list_records(&self) -> String {
        let labels = LeafLabels::new(&self.tree);
        let mut lines = Vec::with_capacity(self.records.len());

        for id in self.tree.leaves() {
            let Some(leaf) = self.tree.leaf(id) else {
                continue;
            };
            for (record, source) in leaf.records.iter().zip(&leaf.sources) {
                let rid = self
                    .heap
                    .row_id(*source)
                    .map(|r| r.to_string())
                    .unwrap_or_else(|| "?".to_string());
                lines.push(format!(
                    "{:<4} {} -> {}",
                    labels.label(id),
                    tuple(record, &self.key_columns, &self.include_columns),
                    rid
                ));
            }
        }

        lines.join("\n")
    }

    fn stats(&self) -> String {
        let stats = self.tree.stats(self.config.max_keys_per_leaf);
        format!(
            "depth: {}\nleaves: {} ({} oversized)\ninternal nodes: {} ({} single-child)\nrecords: {}\nleaf fill: {:.1}%",
            stats.depth,
            stats.leaves,
            stats.oversized_leaves,
            stats.internal_nodes,
            stats.synthesized_nodes,
            stats.records,
            stats.fill_ratio * 100.0
        )
    }

    fn find(&mut self, values: Vec<Value>) -> ApiResult<String> {
        if values.len() != self.key_columns.len() {
            return Err(ApiError::KeyArity {
                expected: self.key_columns.len(),
                found: values.len(),
            });
        }

        let key = CompositeKey::new(values);
        self.highlight = self.tree.search_path(&key);
        let found = self.tree.lookup(&key).len();

        let summary = if found == 0 {
            format!("no records with key {key}")
        } else {
            format!("{found} record(s) with key {key}")
        };
        Ok(format!("{}\n{}", self.show(), summary))
    }

    fn insert(&mut self, pairs: Vec<(String, Value)>) -> ApiResult<String> {
        let record: Record = pairs.into_iter().collect();
        let mut records = self.records.clone();
        records.push(record);

        self.rebuild(records, self.key_columns.clone(), self.config)?;

        let ordinal = self.records.len() - 1;
        let key = self
            .tree
            .key_spec()
            .project(&self.records[ordinal], ordinal)?;
        self.highlight = self.tree.search_path(&key);

        Ok(format!("{}\ninserted {}", self.show(), key))
    }
}

/// A fresh build wrapped in its own timeline.
fn build_tree(
    records: &[Record],
    key_columns: &[String],
    config: BTreeConfig,
) -> ApiResult<BPlusTree> {
    debugger::reset();
    let tree = db_phase!("build", {
        BTreeBuilder::new(config).build(records, key_columns)
    })?;
    Ok(tree)
}
