//! Edmonds–Karp maximum flow over the residual matrix.
//!
//! Every push along `(i, j)` is mirrored on `(j, i)` with the opposite sign, so
//! `flow(i, j) == -flow(j, i)` holds for every pair of cells.

use flownet_core::errors::{graph_error, FlowError};
use flownet_core::{EdgeRef, VertexId};
use flownet_graph::{reachable_from, shortest_path};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::network::{residual, EdgeView, FlowNetwork, NetworkState};

/// Summary of a max-flow build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaxFlowReport {
    /// Total flow from source to sink.
    pub value: i64,
    /// Number of augmenting paths used.
    pub augmentations: usize,
}

/// Minimum cut separating source from sink after a build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinCut {
    /// Vertices still reachable from the source in the residual graph.
    pub source_side: Vec<String>,
    /// Active edges leaving the source side.
    pub edges: Vec<EdgeView>,
    /// Sum of the capacities of `edges`.
    pub capacity: i64,
}

impl FlowNetwork {
    /// Shortest source-to-sink path over cells with residual capacity.
    ///
    /// Empty when no augmenting path remains or a terminal is unbound.
    pub fn augmenting_path(&self) -> Result<Vec<VertexId>, FlowError> {
        let (Some(source), Some(sink)) = (self.source, self.sink) else {
            return Ok(Vec::new());
        };
        shortest_path(&self.graph, source, sink, |_, slot| residual(slot) > 0)
    }

    /// Builds a maximum flow from scratch.
    ///
    /// Validation is not enforced here; see [`FlowNetwork::solve`]. If the
    /// total flow does not fit in an `i64` the flows are discarded and a
    /// `flow-overflow` error is returned.
    pub fn build_max_flow(&mut self) -> Result<MaxFlowReport, FlowError> {
        self.zero_flows();
        match self.augment_to_saturation() {
            Ok(report) => {
                self.state = NetworkState::FlowBuilt;
                debug!("max flow {} after {} augmentations", report.value, report.augmentations);
                Ok(report)
            }
            Err(err) => {
                self.zero_flows();
                Err(err)
            }
        }
    }

    fn augment_to_saturation(&mut self) -> Result<MaxFlowReport, FlowError> {
        let mut report = MaxFlowReport::default();
        loop {
            let path = self.augmenting_path()?;
            if path.len() < 2 {
                return Ok(report);
            }
            let edges: Vec<EdgeRef> = path
                .windows(2)
                .map(|pair| EdgeRef::new(pair[0], pair[1]))
                .collect();
            let mut bottleneck = i64::MAX;
            for edge in &edges {
                bottleneck = bottleneck.min(residual(self.graph.slot(*edge)?));
            }
            report.augmentations += 1;
            let step = report.augmentations;
            report.value = report
                .value
                .checked_add(bottleneck)
                .ok_or_else(|| overflow("total").with_context("augmentation", step))?;
            for edge in &edges {
                self.push(*edge, bottleneck)?;
            }
            debug!(
                "augmentation {}: {} hops, bottleneck {}",
                report.augmentations,
                edges.len(),
                bottleneck
            );
        }
    }

    /// Validates the network and builds its maximum flow.
    pub fn solve(&mut self) -> Result<MaxFlowReport, FlowError> {
        self.validate().into_result()?;
        self.build_max_flow()
    }

    /// Net inflow at `vertex`.
    ///
    /// Because residual cells carry the negated flow of their partner, the sum
    /// of the vertex's column over all cells already equals inflow minus
    /// outflow. Negative for the source, positive for the sink, zero for
    /// every balanced interior vertex.
    pub fn flow_at(&self, vertex: VertexId) -> Result<i64, FlowError> {
        let mut net: i64 = 0;
        for from in self.graph.vertex_ids() {
            let flow = self.graph.payload(EdgeRef::new(from, vertex))?.flow;
            net = net
                .checked_add(flow)
                .ok_or_else(|| overflow("vertex").with_context("vertex", vertex.index()))?;
        }
        Ok(net)
    }

    /// Flow emitted by the source; zero when no source is bound.
    pub fn flow_at_source(&self) -> Result<i64, FlowError> {
        match self.source {
            Some(source) => self
                .flow_at(source)?
                .checked_neg()
                .ok_or_else(|| overflow("source")),
            None => Ok(0),
        }
    }

    /// Flow received by the sink; zero when no sink is bound.
    pub fn flow_at_sink(&self) -> Result<i64, FlowError> {
        match self.sink {
            Some(sink) => self.flow_at(sink),
            None => Ok(0),
        }
    }

    /// Minimum cut induced by the current flow.
    ///
    /// Only meaningful after [`FlowNetwork::build_max_flow`]; `None` when a
    /// terminal is unbound.
    pub fn min_cut(&self) -> Result<Option<MinCut>, FlowError> {
        let Some(source) = self.source else {
            return Ok(None);
        };
        if self.sink.is_none() {
            return Ok(None);
        }
        let reached = reachable_from(&self.graph, source, |_, slot| residual(slot) > 0)?;
        let mut source_side = Vec::new();
        let mut edges = Vec::new();
        let mut capacity: i64 = 0;
        for from in self.graph.vertex_ids().filter(|id| reached[id.index()]) {
            source_side.push(self.graph.name(from)?.to_owned());
            for to in self.graph.successors(from) {
                if !reached[to.index()] {
                    let view = self.view(EdgeRef::new(from, to))?;
                    capacity = capacity
                        .checked_add(view.capacity)
                        .ok_or_else(|| overflow("cut"))?;
                    edges.push(view);
                }
            }
        }
        Ok(Some(MinCut {
            source_side,
            edges,
            capacity,
        }))
    }

    fn push(&mut self, edge: EdgeRef, amount: i64) -> Result<(), FlowError> {
        let forward = self.graph.payload_mut(edge)?;
        forward.flow = forward.flow.checked_add(amount).ok_or_else(|| overflow("edge"))?;
        let backward = self.graph.payload_mut(edge.opposite())?;
        backward.flow = backward.flow.checked_sub(amount).ok_or_else(|| overflow("edge"))?;
        Ok(())
    }
}

fn overflow(at: &str) -> FlowError {
    graph_error("flow-overflow", "flow exceeds the i64 range").with_context("at", at)
}
