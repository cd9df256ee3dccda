use flownet_core::errors::{graph_error, ErrorInfo, FlowError};
use flownet_core::{EdgeFilter, EdgeRef, NetworkConfig, VertexId};
use flownet_graph::{EdgeSlot, GraphStore};
use log::debug;
use serde::{Deserialize, Serialize};

/// Capacity and flow carried by every matrix cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EdgeData {
    /// Declared capacity; meaningful only while the cell is active.
    pub capacity: i64,
    /// Net flow from the cell's row to its column. Always the negation of
    /// the opposite cell's value, so it goes negative on residual cells and
    /// on the weaker edge of an antiparallel pair.
    pub flow: i64,
}

impl EdgeData {
    /// Creates a payload with zero flow.
    pub fn new(capacity: i64) -> Self {
        Self { capacity, flow: 0 }
    }

    /// `capacity - flow`, saturating at `i64::MAX`.
    pub fn remaining(&self) -> i64 {
        self.capacity.saturating_sub(self.flow)
    }

    /// Flow carried by the declared edge itself.
    ///
    /// When both directions of a pair are declared only the direction the
    /// net flow runs in carries it; the other edge carries zero.
    pub fn carried(&self) -> i64 {
        self.flow.max(0)
    }
}

/// Residual capacity of a cell. Inactive cells count as zero capacity, so
/// they only admit flow that cancels flow pushed along their partner.
pub(crate) fn residual(slot: &EdgeSlot<EdgeData>) -> i64 {
    if slot.is_active() {
        slot.payload().remaining()
    } else {
        slot.payload().flow.saturating_neg()
    }
}

/// Lifecycle of the flow stored in a network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NetworkState {
    /// Structure changed since the last successful validation.
    Unvalidated,
    /// Validation passed; flows are zero.
    Validated,
    /// A maximum flow has been built.
    FlowBuilt,
}

/// Named view of an active edge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeView {
    /// Tail vertex name.
    pub from: String,
    /// Head vertex name.
    pub to: String,
    /// Declared capacity.
    pub capacity: i64,
    /// Flow carried by this edge, between zero and `capacity`.
    pub flow: i64,
}

/// Capacitated directed network with a designated source and sink.
#[derive(Debug, Clone)]
pub struct FlowNetwork {
    config: NetworkConfig,
    pub(crate) graph: GraphStore<EdgeData>,
    pub(crate) source: Option<VertexId>,
    pub(crate) sink: Option<VertexId>,
    pub(crate) state: NetworkState,
}

impl Default for FlowNetwork {
    fn default() -> Self {
        Self {
            config: NetworkConfig::default(),
            graph: GraphStore::new(),
            source: None,
            sink: None,
            state: NetworkState::Unvalidated,
        }
    }
}

impl FlowNetwork {
    /// Creates an empty network after checking the configuration.
    pub fn new(config: NetworkConfig) -> Result<Self, FlowError> {
        config.validate()?;
        Ok(Self {
            config,
            ..Self::default()
        })
    }

    /// Returns the configuration used by this network.
    pub fn config(&self) -> &NetworkConfig {
        &self.config
    }

    /// Read access to the underlying matrix.
    pub fn graph(&self) -> &GraphStore<EdgeData> {
        &self.graph
    }

    /// Current lifecycle state.
    pub fn state(&self) -> NetworkState {
        self.state
    }

    /// The bound source, if any.
    pub fn source(&self) -> Option<VertexId> {
        self.source
    }

    /// The bound sink, if any.
    pub fn sink(&self) -> Option<VertexId> {
        self.sink
    }

    /// Name of the bound source.
    pub fn source_name(&self) -> Option<&str> {
        self.source.and_then(|id| self.graph.name(id).ok())
    }

    /// Name of the bound sink.
    pub fn sink_name(&self) -> Option<&str> {
        self.sink.and_then(|id| self.graph.name(id).ok())
    }

    /// Looks a vertex up by name.
    pub fn vertex(&self, name: &str) -> Option<VertexId> {
        self.graph.vertex(name)
    }

    /// Returns the vertex called `name`, creating it on first use.
    ///
    /// A newly created vertex whose name matches the configured source or
    /// sink name is bound to that role.
    pub fn vertex_or_insert(&mut self, name: &str) -> Result<VertexId, FlowError> {
        if let Some(id) = self.graph.vertex(name) {
            return Ok(id);
        }
        let id = self.graph.add_vertex(name)?;
        if name == self.config.source_name {
            debug!("bound {name} as source");
            self.source = Some(id);
        } else if name == self.config.sink_name {
            debug!("bound {name} as sink");
            self.sink = Some(id);
        }
        self.state = NetworkState::Unvalidated;
        Ok(id)
    }

    /// Declares the edge `from -> to` with `capacity`, creating vertices as
    /// needed. Re-declaring an edge overwrites its capacity.
    pub fn add_edge(&mut self, from: &str, to: &str, capacity: i64) -> Result<EdgeRef, FlowError> {
        if capacity < 0 {
            return Err(graph_error("negative-capacity", "capacities must be non-negative")
                .with_context("from", from)
                .with_context("to", to)
                .with_context("capacity", capacity));
        }
        let from = self.vertex_or_insert(from)?;
        let to = self.vertex_or_insert(to)?;
        let edge = EdgeRef::new(from, to);
        let flow = self.graph.payload(edge)?.flow;
        self.graph.connect(from, to, EdgeData { capacity, flow })?;
        if flow > capacity {
            debug!("capacity dropped below carried flow, discarding flows");
            self.zero_flows();
        }
        self.state = NetworkState::Unvalidated;
        Ok(edge)
    }

    /// Removes the edge `from -> to`. Flows are discarded since they no
    /// longer describe the structure.
    pub fn remove_edge(&mut self, from: &str, to: &str) -> Result<(), FlowError> {
        let edge = EdgeRef::new(self.require(from)?, self.require(to)?);
        if !self.graph.disconnect(edge.from, edge.to)? {
            return Err(graph_error("unknown-edge", "edge does not exist")
                .with_context("from", from)
                .with_context("to", to));
        }
        self.zero_flows();
        self.state = NetworkState::Unvalidated;
        Ok(())
    }

    /// Removes a vertex with all its edges, unbinding it if it was a terminal.
    pub fn remove_vertex(&mut self, name: &str) -> Result<(), FlowError> {
        let id = self.require(name)?;
        self.graph.remove_vertex(id)?;
        if self.source == Some(id) {
            self.source = None;
        }
        if self.sink == Some(id) {
            self.sink = None;
        }
        self.zero_flows();
        self.state = NetworkState::Unvalidated;
        Ok(())
    }

    /// Binds an existing vertex as the source.
    pub fn set_source(&mut self, name: &str) -> Result<(), FlowError> {
        let id = self.require(name)?;
        ensure_distinct(Some(id), self.sink, name)?;
        self.source = Some(id);
        self.state = NetworkState::Unvalidated;
        Ok(())
    }

    /// Binds an existing vertex as the sink.
    pub fn set_sink(&mut self, name: &str) -> Result<(), FlowError> {
        let id = self.require(name)?;
        ensure_distinct(self.source, Some(id), name)?;
        self.sink = Some(id);
        self.state = NetworkState::Unvalidated;
        Ok(())
    }

    /// Returns whether every bound terminal carries its configured name.
    ///
    /// An edge list encodes bindings only through these names, so a terminal
    /// moved with [`FlowNetwork::set_source`] or [`FlowNetwork::set_sink`]
    /// does not survive a save and read.
    pub fn terminals_follow_names(&self) -> bool {
        let named = |bound: Option<VertexId>, expected: &str| {
            bound.map_or(true, |id| self.graph.name(id).ok() == Some(expected))
        };
        named(self.source, &self.config.source_name) && named(self.sink, &self.config.sink_name)
    }

    /// Zeroes every flow while keeping capacities.
    pub fn reset_flows(&mut self) {
        self.zero_flows();
        if self.state == NetworkState::FlowBuilt {
            self.state = NetworkState::Validated;
        }
    }

    /// Drops every vertex and edge and unbinds the terminals.
    pub fn clear(&mut self) {
        self.graph.clear();
        self.source = None;
        self.sink = None;
        self.state = NetworkState::Unvalidated;
    }

    /// Returns whether the network has no vertices.
    pub fn is_empty(&self) -> bool {
        self.graph.is_empty()
    }

    /// Named view of the active edge `from -> to`.
    pub fn edge(&self, from: &str, to: &str) -> Option<EdgeView> {
        let edge = EdgeRef::new(self.graph.vertex(from)?, self.graph.vertex(to)?);
        if !self.graph.is_active(edge) {
            return None;
        }
        self.view(edge).ok()
    }

    /// Named views of every active edge in row-major order.
    pub fn edges(&self) -> Result<Vec<EdgeView>, FlowError> {
        self.graph
            .edges(EdgeFilter::Active)
            .map(|edge| self.view(edge))
            .collect()
    }

    pub(crate) fn view(&self, edge: EdgeRef) -> Result<EdgeView, FlowError> {
        let data = self.graph.payload(edge)?;
        Ok(EdgeView {
            from: self.graph.name(edge.from)?.to_owned(),
            to: self.graph.name(edge.to)?.to_owned(),
            capacity: data.capacity,
            flow: data.carried(),
        })
    }

    pub(crate) fn zero_flows(&mut self) {
        for data in self.graph.payloads_mut() {
            data.flow = 0;
        }
    }

    fn require(&self, name: &str) -> Result<VertexId, FlowError> {
        self.graph.vertex(name).ok_or_else(|| {
            graph_error("unknown-vertex", "vertex does not exist").with_context("name", name)
        })
    }
}

fn ensure_distinct(
    source: Option<VertexId>,
    sink: Option<VertexId>,
    name: &str,
) -> Result<(), FlowError> {
    if source.is_some() && source == sink {
        return Err(FlowError::Config(
            ErrorInfo::new("terminals-coincide", "source and sink must be different vertices")
                .with_context("name", name),
        ));
    }
    Ok(())
}
