pub mod builder;
pub mod errors;
pub mod key;
pub mod node;
pub mod tree;
pub mod validate;


pub use builder::{BTreeBuilder, build};
pub use errors::{BuildError, BuildResult};
pub use key::{CompositeKey, KeySpec};
pub use node::{BPlusNode, InternalNode, LeafNode, NodeId, NodeKind};
pub use tree::{BPlusTree, LeafChain, TreeStats};
pub use validate::{InvariantViolation, check_invariants};
