pub mod btree;
pub mod errors;
pub mod heap;
pub mod page;
