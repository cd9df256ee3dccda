use std::fmt;

use flownet_core::errors::{ErrorInfo, FlowError};
use flownet_graph::{check_paths, PathCheck};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::network::{FlowNetwork, NetworkState};

/// Outcome of structural validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Validation {
    /// Acyclic, and every path from the source ends at the sink.
    Ok,
    /// A vertex is reachable from itself.
    Cycle,
    /// Some path stops at a vertex other than the sink.
    InvalidPath,
    /// Source or sink is not bound.
    NoTerminations,
}

impl Validation {
    /// Returns whether the network may be fed to the max-flow builder.
    pub fn is_ok(&self) -> bool {
        *self == Validation::Ok
    }

    /// Converts a failed outcome into a [`FlowError::Validation`].
    pub fn into_result(self) -> Result<(), FlowError> {
        let code = match self {
            Validation::Ok => return Ok(()),
            Validation::Cycle => "cycle",
            Validation::InvalidPath => "invalid-path",
            Validation::NoTerminations => "no-terminations",
        };
        Err(FlowError::Validation(ErrorInfo::new(code, self.to_string())))
    }
}

impl fmt::Display for Validation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Validation::Ok => "network is valid",
            Validation::Cycle => "network contains a cycle",
            Validation::InvalidPath => "some path does not end at the sink",
            Validation::NoTerminations => "source or sink is not set",
        };
        f.write_str(text)
    }
}

impl FlowNetwork {
    /// Checks that the network is acyclic and that every path from the
    /// source terminates at the sink.
    pub fn validate(&mut self) -> Validation {
        let outcome = self.check_structure();
        self.state = match (outcome, self.state) {
            (Validation::Ok, NetworkState::FlowBuilt) => NetworkState::FlowBuilt,
            (Validation::Ok, _) => NetworkState::Validated,
            _ => NetworkState::Unvalidated,
        };
        outcome
    }

    fn check_structure(&self) -> Validation {
        let (Some(source), Some(sink)) = (self.source, self.sink) else {
            return Validation::NoTerminations;
        };
        match check_paths(&self.graph, source, sink, self.config().backtrack) {
            Ok(PathCheck::Complete) => Validation::Ok,
            Ok(PathCheck::Cycle { at }) => {
                debug!("cycle closes at {}", self.graph.name(at).unwrap_or("?"));
                Validation::Cycle
            }
            Ok(PathCheck::DeadEnd { at }) => {
                debug!("path dead-ends at {}", self.graph.name(at).unwrap_or("?"));
                Validation::InvalidPath
            }
            Err(err) => {
                debug!("terminal lookup failed during validation: {err}");
                Validation::NoTerminations
            }
        }
    }
}
