#![deny(missing_docs)]

//! Capacitated flow networks over a dense matrix store: structural
//! validation, Edmonds–Karp maximum flow, minimum cuts and edge-list I/O.

pub mod edgelist;
mod generators;
mod hash;
pub mod maxflow;
mod network;
mod validation;

pub use edgelist::{parse_line, EdgeLine, ReadReport, SkippedLine};
pub use generators::gen_layered_network;
pub use hash::canonical_hash;
pub use maxflow::{MaxFlowReport, MinCut};
pub use network::{EdgeData, EdgeView, FlowNetwork, NetworkState};
pub use validation::Validation;
