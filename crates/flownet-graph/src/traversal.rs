//! Breadth-first and depth-first traversals over a [`GraphStore`].
//!
//! Scratch state (visit marks, predecessors) lives in vectors owned by each
//! call and indexed by vertex id, so traversals never write to the store.

use std::collections::VecDeque;

use flownet_core::errors::{graph_error, FlowError};
use flownet_core::{BacktrackRule, EdgeRef, VertexId};

use crate::store::{EdgeSlot, GraphStore};

/// Outcome of [`check_paths`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathCheck {
    /// No cycle was found and every explored path ends at the sink.
    Complete,
    /// `at` was reached again while still on the current path.
    Cycle {
        /// Vertex closing the cycle.
        at: VertexId,
    },
    /// `at` has nowhere to go and is not the sink.
    DeadEnd {
        /// Vertex where the path stops.
        at: VertexId,
    },
}

/// Finds the shortest (fewest hops) path from `source` to `sink`.
///
/// Every cell in the row of a dequeued vertex is offered to `admit`, inactive
/// cells included; only admitted cells are traversed. Vertices are marked at
/// discovery so each is enqueued at most once. Returns the vertices from
/// source to sink, or an empty vector when the sink cannot be reached.
pub fn shortest_path<E, F>(
    store: &GraphStore<E>,
    source: VertexId,
    sink: VertexId,
    mut admit: F,
) -> Result<Vec<VertexId>, FlowError>
where
    F: FnMut(EdgeRef, &EdgeSlot<E>) -> bool,
{
    ensure_terminal(store, source, "source")?;
    ensure_terminal(store, sink, "sink")?;

    let side = store.dimension();
    let mut discovered = vec![false; side];
    let mut predecessor: Vec<Option<VertexId>> = vec![None; side];
    let mut queue = VecDeque::new();
    discovered[source.index()] = true;
    queue.push_back(source);

    while let Some(vertex) = queue.pop_front() {
        if vertex == sink {
            let mut path = vec![sink];
            let mut current = sink;
            while let Some(previous) = predecessor[current.index()] {
                path.push(previous);
                current = previous;
            }
            path.reverse();
            return Ok(path);
        }
        for (edge, slot) in store.row(vertex) {
            let next = edge.to;
            if !discovered[next.index()] && admit(edge, slot) {
                discovered[next.index()] = true;
                predecessor[next.index()] = Some(vertex);
                queue.push_back(next);
            }
        }
    }
    Ok(Vec::new())
}

/// Marks every vertex reachable from `source` through admitted cells.
///
/// The returned vector is indexed by vertex index and sized to the matrix.
pub fn reachable_from<E, F>(
    store: &GraphStore<E>,
    source: VertexId,
    mut admit: F,
) -> Result<Vec<bool>, FlowError>
where
    F: FnMut(EdgeRef, &EdgeSlot<E>) -> bool,
{
    ensure_terminal(store, source, "source")?;
    let mut reached = vec![false; store.dimension()];
    let mut queue = VecDeque::from([source]);
    reached[source.index()] = true;
    while let Some(vertex) = queue.pop_front() {
        for (edge, slot) in store.row(vertex) {
            if !reached[edge.to.index()] && admit(edge, slot) {
                reached[edge.to.index()] = true;
                queue.push_back(edge.to);
            }
        }
    }
    Ok(reached)
}

/// Checks that no cycle is reachable from `source` and that every path along
/// active edges ends at `sink`.
///
/// Marks are cleared on backtrack so a vertex may be reached through several
/// paths (diamonds are fine). Under [`BacktrackRule::Strict`] vertices whose
/// subtree already checked out are not explored again.
pub fn check_paths<E>(
    store: &GraphStore<E>,
    source: VertexId,
    sink: VertexId,
    rule: BacktrackRule,
) -> Result<PathCheck, FlowError> {
    ensure_terminal(store, source, "source")?;
    ensure_terminal(store, sink, "sink")?;
    let mut checker = PathChecker {
        store,
        sink,
        rule,
        states: vec![VisitState::NotVisited; store.dimension()],
    };
    Ok(checker.visit(source, None))
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum VisitState {
    NotVisited,
    OnPath,
    Verified,
}

struct PathChecker<'a, E> {
    store: &'a GraphStore<E>,
    sink: VertexId,
    rule: BacktrackRule,
    states: Vec<VisitState>,
}

impl<E> PathChecker<'_, E> {
    fn visit(&mut self, vertex: VertexId, arrived_from: Option<VertexId>) -> PathCheck {
        match self.states[vertex.index()] {
            VisitState::OnPath => return PathCheck::Cycle { at: vertex },
            VisitState::Verified => return PathCheck::Complete,
            VisitState::NotVisited => {}
        }
        self.states[vertex.index()] = VisitState::OnPath;

        let store = self.store;
        let mut any = false;
        for next in store.successors(vertex) {
            if self.rule == BacktrackRule::SkipArrivalEdge && Some(next) == arrived_from {
                continue;
            }
            any = true;
            let outcome = self.visit(next, Some(vertex));
            if outcome != PathCheck::Complete {
                return outcome;
            }
        }
        if !any && vertex != self.sink {
            return PathCheck::DeadEnd { at: vertex };
        }

        self.states[vertex.index()] = match self.rule {
            BacktrackRule::Strict => VisitState::Verified,
            BacktrackRule::SkipArrivalEdge => VisitState::NotVisited,
        };
        PathCheck::Complete
    }
}

fn ensure_terminal<E>(store: &GraphStore<E>, id: VertexId, role: &str) -> Result<(), FlowError> {
    if store.contains(id) {
        Ok(())
    } else {
        Err(graph_error("unknown-vertex", "traversal endpoint does not exist")
            .with_context("role", role)
            .with_context("vertex", id.as_raw()))
    }
}
