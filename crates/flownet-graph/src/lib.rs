#![deny(missing_docs)]

//! Dense adjacency-matrix graph store and the traversals the flow network
//! builds on.

mod store;
pub mod traversal;

pub use store::{EdgeSlot, GraphStore};
pub use traversal::{check_paths, reachable_from, shortest_path, PathCheck};
