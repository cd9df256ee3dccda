//! Line-oriented edge-list reading and writing.
//!
//! Each line holds `<FROM> <TO> <CAPACITY>` separated by whitespace. Flows
//! are never persisted.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Read, Write};
use std::path::Path;

use flownet_core::errors::{ErrorInfo, FlowError};
use flownet_core::{EdgeFilter, EdgeRef};
use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::network::FlowNetwork;

/// One parsed edge-list line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeLine<'a> {
    /// Tail vertex name.
    pub from: &'a str,
    /// Head vertex name.
    pub to: &'a str,
    /// Declared capacity.
    pub capacity: i64,
}

/// A line that was not loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedLine {
    /// One-based line number.
    pub line: usize,
    /// Raw line content.
    pub content: String,
    /// Why the line was rejected.
    pub reason: String,
}

/// Summary of an edge-list load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadReport {
    /// Number of edges declared by accepted lines.
    pub edges: usize,
    /// Lines that were reported and skipped.
    pub skipped: Vec<SkippedLine>,
}

/// Parses one line. Blank lines yield `Ok(None)`.
pub fn parse_line(line: &str) -> Result<Option<EdgeLine<'_>>, FlowError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    match tokens.as_slice() {
        [] => Ok(None),
        [from, to, capacity] => {
            let capacity: i64 = capacity.parse().map_err(|_| {
                parse_error("bad-capacity", "capacity is not an integer")
                    .with_context("capacity", *capacity)
            })?;
            if capacity < 0 {
                return Err(parse_error("negative-capacity", "capacity must be non-negative")
                    .with_context("capacity", capacity));
            }
            Ok(Some(EdgeLine {
                from: *from,
                to: *to,
                capacity,
            }))
        }
        other => Err(parse_error("token-count", "expected FROM TO CAPACITY")
            .with_context("tokens", other.len())),
    }
}

fn parse_error(code: &str, message: &str) -> FlowError {
    FlowError::Parse(ErrorInfo::new(code, message))
}

impl FlowNetwork {
    /// Declares the edge described by a single edge-list line.
    pub fn add_edge_from_line(&mut self, line: &str) -> Result<EdgeRef, FlowError> {
        match parse_line(line)? {
            Some(edge) => self.add_edge(edge.from, edge.to, edge.capacity),
            None => Err(parse_error("empty-line", "expected FROM TO CAPACITY")),
        }
    }

    /// Replaces the network with the edges listed in `text`.
    ///
    /// Malformed lines are logged and skipped; loading never aborts.
    pub fn load_str(&mut self, text: &str) -> ReadReport {
        self.clear();
        let mut report = ReadReport::default();
        for (idx, line) in text.lines().enumerate() {
            let outcome = parse_line(line).and_then(|parsed| match parsed {
                Some(edge) => self.add_edge(edge.from, edge.to, edge.capacity).map(Some),
                None => Ok(None),
            });
            match outcome {
                Ok(Some(_)) => report.edges += 1,
                Ok(None) => {}
                Err(err) => {
                    warn!("invalid formatted edge on line {}: {line:?} ({err})", idx + 1);
                    report.skipped.push(SkippedLine {
                        line: idx + 1,
                        content: line.to_owned(),
                        reason: err.info().message.clone(),
                    });
                }
            }
        }
        report
    }

    /// Reads an edge list from `reader`. Input is fully read before the
    /// network is touched.
    pub fn read_from<R: BufRead>(&mut self, mut reader: R) -> Result<ReadReport, FlowError> {
        let mut text = String::new();
        reader
            .read_to_string(&mut text)
            .map_err(|err| FlowError::io("read-failed", "<stream>", &err))?;
        Ok(self.load_str(&text))
    }

    /// Reads an edge-list file. On failure the network is left untouched.
    pub fn read(&mut self, path: impl AsRef<Path>) -> Result<ReadReport, FlowError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|err| FlowError::io("open-failed", path.display(), &err))?;
        let report = self
            .read_from(BufReader::new(file))
            .map_err(|err| err.with_context("path", path.display()))?;
        info!(
            "loaded {} edges from {} ({} skipped)",
            report.edges,
            path.display(),
            report.skipped.len()
        );
        Ok(report)
    }

    /// Writes one line per active edge; returns the number of lines written.
    pub fn write_to<W: Write>(&self, mut writer: W) -> Result<usize, FlowError> {
        let mut written = 0;
        for edge in self.graph.edges(EdgeFilter::Active) {
            let capacity = self.graph.payload(edge)?.capacity;
            writeln!(
                writer,
                "{} {} {}",
                self.graph.name(edge.from)?,
                self.graph.name(edge.to)?,
                capacity
            )
            .map_err(|err| FlowError::io("write-failed", "<stream>", &err))?;
            written += 1;
        }
        writer
            .flush()
            .map_err(|err| FlowError::io("write-failed", "<stream>", &err))?;
        Ok(written)
    }

    /// Renders the edge list as a string.
    pub fn to_edge_list(&self) -> Result<String, FlowError> {
        let mut buffer = Vec::new();
        self.write_to(&mut buffer)?;
        String::from_utf8(buffer).map_err(|err| {
            FlowError::Io(ErrorInfo::new("write-failed", err.to_string()))
        })
    }

    /// Saves the edge list to `path`; nothing is written if the file cannot
    /// be created.
    ///
    /// Reading the file back binds terminals by their configured names only.
    /// See [`FlowNetwork::terminals_follow_names`].
    pub fn save(&self, path: impl AsRef<Path>) -> Result<usize, FlowError> {
        let path = path.as_ref();
        if !self.terminals_follow_names() {
            warn!(
                "terminal bindings {:?} -> {:?} are not named {} -> {} and will not survive a reload of {}",
                self.source_name(),
                self.sink_name(),
                self.config().source_name,
                self.config().sink_name,
                path.display()
            );
        }
        let file =
            File::create(path).map_err(|err| FlowError::io("create-failed", path.display(), &err))?;
        let written = self
            .write_to(BufWriter::new(file))
            .map_err(|err| err.with_context("path", path.display()))?;
        info!("saved {written} edges to {}", path.display());
        Ok(written)
    }
}
