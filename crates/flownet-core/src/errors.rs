//! Structured error types shared across flownet crates.

use std::collections::BTreeMap;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structured payload attached to every [`FlowError`] variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Stable machine readable error code.
    pub code: String,
    /// Human readable diagnostic message.
    pub message: String,
    /// Contextual key value pairs (vertex names, line numbers, paths).
    #[serde(default)]
    pub context: BTreeMap<String, String>,
    /// Optional hint that may help the caller resolve the issue.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ErrorInfo {
    /// Creates a new error payload with the provided code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            context: BTreeMap::new(),
            hint: None,
        }
    }

    /// Adds a context entry to the payload.
    pub fn with_context(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.context.insert(key.into(), value.to_string());
        self
    }

    /// Sets a human readable hint for remediation.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

impl Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code: {})", self.message, self.code)?;
        if !self.context.is_empty() {
            write!(f, " | context: [")?;
            for (idx, (key, value)) in self.context.iter().enumerate() {
                if idx > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{key}={value}")?;
            }
            write!(f, "]")?;
        }
        if let Some(hint) = &self.hint {
            write!(f, " | hint: {hint}")?;
        }
        Ok(())
    }
}

/// Canonical error type for the flownet engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "family", content = "detail")]
pub enum FlowError {
    /// Graph store errors (unknown vertices, duplicate names, bad capacities).
    #[error("graph error: {0}")]
    Graph(ErrorInfo),
    /// Structural validation failures of a flow network.
    #[error("validation error: {0}")]
    Validation(ErrorInfo),
    /// Malformed edge-list input.
    #[error("parse error: {0}")]
    Parse(ErrorInfo),
    /// File system failures while reading or saving edge lists.
    #[error("io error: {0}")]
    Io(ErrorInfo),
    /// Invalid network configuration.
    #[error("config error: {0}")]
    Config(ErrorInfo),
}

impl FlowError {
    /// Returns a reference to the payload describing the error.
    pub fn info(&self) -> &ErrorInfo {
        match self {
            FlowError::Graph(info)
            | FlowError::Validation(info)
            | FlowError::Parse(info)
            | FlowError::Io(info)
            | FlowError::Config(info) => info,
        }
    }

    /// Returns the stable error code of the payload.
    pub fn code(&self) -> &str {
        &self.info().code
    }

    /// Adds a context entry to the payload regardless of the error family.
    pub fn with_context(self, key: impl Into<String>, value: impl ToString) -> Self {
        match self {
            FlowError::Graph(info) => FlowError::Graph(info.with_context(key, value)),
            FlowError::Validation(info) => FlowError::Validation(info.with_context(key, value)),
            FlowError::Parse(info) => FlowError::Parse(info.with_context(key, value)),
            FlowError::Io(info) => FlowError::Io(info.with_context(key, value)),
            FlowError::Config(info) => FlowError::Config(info.with_context(key, value)),
        }
    }

    /// Wraps an [`std::io::Error`] raised while touching `path`.
    pub fn io(code: impl Into<String>, path: impl fmt::Display, err: &std::io::Error) -> Self {
        FlowError::Io(ErrorInfo::new(code, err.to_string()).with_context("path", path))
    }
}

/// Shorthand for graph-family errors.
pub fn graph_error(code: impl Into<String>, message: impl Into<String>) -> FlowError {
    FlowError::Graph(ErrorInfo::new(code, message))
}
