//! Network configuration: terminal names and validation rules.

use serde::{Deserialize, Serialize};

use crate::errors::{ErrorInfo, FlowError};

/// Vertex name bound as the source unless configured otherwise.
pub const DEFAULT_SOURCE_NAME: &str = "S";
/// Vertex name bound as the sink unless configured otherwise.
pub const DEFAULT_SINK_NAME: &str = "T";

/// Controls how the structural check treats the edge leading back to the
/// vertex it just arrived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BacktrackRule {
    /// Every active out-edge is followed; an antiparallel pair is a cycle.
    #[default]
    Strict,
    /// The out-edge pointing back at the predecessor is ignored, so an
    /// antiparallel pair passes validation.
    SkipArrivalEdge,
}

/// Configuration options that control the behaviour of a flow network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// Name that binds a vertex as the source when it is first created.
    pub source_name: String,
    /// Name that binds a vertex as the sink when it is first created.
    pub sink_name: String,
    /// Rule applied by structural validation.
    pub backtrack: BacktrackRule,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            source_name: DEFAULT_SOURCE_NAME.to_owned(),
            sink_name: DEFAULT_SINK_NAME.to_owned(),
            backtrack: BacktrackRule::Strict,
        }
    }
}

impl NetworkConfig {
    /// Checks that the terminal names are usable and distinct.
    pub fn validate(&self) -> Result<(), FlowError> {
        for (role, name) in [("source", &self.source_name), ("sink", &self.sink_name)] {
            if !is_valid_name(name) {
                return Err(FlowError::Config(
                    ErrorInfo::new("invalid-terminal-name", "terminal names must be single tokens")
                        .with_context("role", role)
                        .with_context("name", name),
                ));
            }
        }
        if self.source_name == self.sink_name {
            return Err(FlowError::Config(
                ErrorInfo::new("terminals-coincide", "source and sink names must differ")
                    .with_context("name", &self.source_name),
            ));
        }
        Ok(())
    }
}

/// Returns whether `name` can be written to and read back from an edge list.
pub fn is_valid_name(name: &str) -> bool {
    !name.is_empty() && !name.chars().any(char::is_whitespace)
}
