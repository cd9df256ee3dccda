#![deny(missing_docs)]
#![doc = "Core identifiers, configuration and error types for the flownet engine."]

use serde::{Deserialize, Serialize};

pub mod config;
pub mod errors;

pub use config::{is_valid_name, BacktrackRule, NetworkConfig};
pub use errors::{ErrorInfo, FlowError};

/// Identifier for a vertex within a graph store.
///
/// The identifier is the vertex's position in the store and stays valid until
/// the store is cleared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct VertexId(u32);

impl VertexId {
    /// Creates a new identifier from its raw integer representation.
    pub fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Returns the raw integer representation of the identifier.
    pub fn as_raw(&self) -> u32 {
        self.0
    }

    /// Creates an identifier from a matrix index.
    pub fn from_index(index: usize) -> Self {
        Self(index as u32)
    }

    /// Returns the matrix index addressed by this identifier.
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

/// Identity of a matrix cell: the ordered pair `(from, to)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EdgeRef {
    /// Tail of the edge.
    pub from: VertexId,
    /// Head of the edge.
    pub to: VertexId,
}

impl EdgeRef {
    /// Creates a reference to the cell `(from, to)`.
    pub fn new(from: VertexId, to: VertexId) -> Self {
        Self { from, to }
    }

    /// Returns the residual partner cell `(to, from)`.
    pub fn opposite(&self) -> Self {
        Self {
            from: self.to,
            to: self.from,
        }
    }
}

/// Selects which matrix cells an edge iteration yields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeFilter {
    /// Only cells declared as real edges.
    Active,
    /// Every cell, including implicit residual cells.
    All,
}
