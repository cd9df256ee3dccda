use std::collections::BTreeMap;

use flownet_core::errors::{graph_error, FlowError};
use flownet_core::{is_valid_name, EdgeFilter, EdgeRef, VertexId};

/// A single matrix cell: the active flag plus the edge payload.
///
/// Every ordered vertex pair owns exactly one slot. Inactive slots still carry
/// a payload so that residual bookkeeping can be written to them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EdgeSlot<E> {
    active: bool,
    payload: E,
}

impl<E> EdgeSlot<E> {
    /// Returns whether the slot holds a declared edge.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Returns the payload stored in the slot.
    pub fn payload(&self) -> &E {
        &self.payload
    }

    /// Returns the payload stored in the slot for mutation.
    pub fn payload_mut(&mut self) -> &mut E {
        &mut self.payload
    }
}

#[derive(Debug, Clone)]
struct VertexRecord {
    name: String,
    alive: bool,
}

/// Dense adjacency-matrix graph over named vertices.
///
/// Cells are stored row-major in a flat vector of side `dimension()`. Removed
/// vertices keep their row and column (inactive) so identifiers stay stable
/// until [`GraphStore::clear`] is called.
#[derive(Debug, Clone)]
pub struct GraphStore<E> {
    vertices: Vec<VertexRecord>,
    names: BTreeMap<String, VertexId>,
    cells: Vec<EdgeSlot<E>>,
}

impl<E> Default for GraphStore<E> {
    fn default() -> Self {
        Self {
            vertices: Vec::new(),
            names: BTreeMap::new(),
            cells: Vec::new(),
        }
    }
}

impl<E: Default> GraphStore<E> {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a vertex and grows the matrix by one row and one column.
    ///
    /// Existing cells are moved to their new row-major positions; the new row
    /// and column start inactive with default payloads.
    pub fn add_vertex(&mut self, name: &str) -> Result<VertexId, FlowError> {
        if !is_valid_name(name) {
            return Err(graph_error("invalid-name", "vertex names must be single tokens")
                .with_context("name", name));
        }
        if self.names.contains_key(name) {
            return Err(graph_error("duplicate-vertex", "vertex already exists")
                .with_context("name", name));
        }
        let side = self.dimension();
        let grown = side + 1;
        let mut cells = Vec::with_capacity(grown * grown);
        let mut previous = std::mem::take(&mut self.cells).into_iter();
        for _ in 0..side {
            cells.extend(previous.by_ref().take(side));
            cells.push(EdgeSlot::default());
        }
        cells.extend((0..grown).map(|_| EdgeSlot::default()));
        self.cells = cells;

        let id = VertexId::from_index(side);
        self.vertices.push(VertexRecord {
            name: name.to_owned(),
            alive: true,
        });
        self.names.insert(name.to_owned(), id);
        log::trace!("added vertex {name} at index {side}");
        Ok(id)
    }

    /// Removes a vertex: its row and column are reset and deactivated and its
    /// name becomes available again. The index is not reused.
    pub fn remove_vertex(&mut self, id: VertexId) -> Result<(), FlowError> {
        self.ensure_live(id)?;
        let side = self.dimension();
        let idx = id.index();
        for other in 0..side {
            self.cells[idx * side + other] = EdgeSlot::default();
            self.cells[other * side + idx] = EdgeSlot::default();
        }
        let record = &mut self.vertices[idx];
        record.alive = false;
        self.names.remove(&record.name);
        Ok(())
    }
}

impl<E> GraphStore<E> {
    /// Number of rows (and columns) of the matrix, dead vertices included.
    pub fn dimension(&self) -> usize {
        self.vertices.len()
    }

    /// Number of live vertices.
    pub fn vertex_count(&self) -> usize {
        self.names.len()
    }

    /// Returns whether the store has no live vertices.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Returns whether `id` names a live vertex.
    pub fn contains(&self, id: VertexId) -> bool {
        self.vertices
            .get(id.index())
            .map(|record| record.alive)
            .unwrap_or(false)
    }

    /// Looks a vertex up by name.
    pub fn vertex(&self, name: &str) -> Option<VertexId> {
        self.names.get(name).copied()
    }

    /// Returns the name of a live vertex.
    pub fn name(&self, id: VertexId) -> Result<&str, FlowError> {
        self.ensure_live(id)?;
        Ok(&self.vertices[id.index()].name)
    }

    /// Live vertex identifiers in ascending index order.
    pub fn vertex_ids(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.vertices
            .iter()
            .enumerate()
            .filter(|(_, record)| record.alive)
            .map(|(idx, _)| VertexId::from_index(idx))
    }

    /// Activates the cell `(from, to)` and stores `payload` in it.
    ///
    /// The opposite cell is left untouched. Connecting an already active pair
    /// overwrites its payload.
    pub fn connect(&mut self, from: VertexId, to: VertexId, payload: E) -> Result<EdgeRef, FlowError> {
        let edge = EdgeRef::new(from, to);
        let slot = self.slot_mut(edge)?;
        slot.active = true;
        slot.payload = payload;
        Ok(edge)
    }

    /// Deactivates the cell `(from, to)`; returns whether it was active.
    pub fn disconnect(&mut self, from: VertexId, to: VertexId) -> Result<bool, FlowError> {
        let slot = self.slot_mut(EdgeRef::new(from, to))?;
        Ok(std::mem::replace(&mut slot.active, false))
    }

    /// Returns whether the cell holds a declared edge.
    pub fn is_active(&self, edge: EdgeRef) -> bool {
        self.slot(edge).map(EdgeSlot::is_active).unwrap_or(false)
    }

    /// The residual partner of `edge`. Always exists since the matrix is square.
    pub fn opposite(&self, edge: EdgeRef) -> EdgeRef {
        edge.opposite()
    }

    /// Returns the slot at `edge`.
    pub fn slot(&self, edge: EdgeRef) -> Result<&EdgeSlot<E>, FlowError> {
        let idx = self.cell_index(edge)?;
        Ok(&self.cells[idx])
    }

    /// Returns the slot at `edge` for mutation.
    pub fn slot_mut(&mut self, edge: EdgeRef) -> Result<&mut EdgeSlot<E>, FlowError> {
        let idx = self.cell_index(edge)?;
        Ok(&mut self.cells[idx])
    }

    /// Returns the payload at `edge`, active or not.
    pub fn payload(&self, edge: EdgeRef) -> Result<&E, FlowError> {
        self.slot(edge).map(EdgeSlot::payload)
    }

    /// Returns the payload at `edge` for mutation, active or not.
    pub fn payload_mut(&mut self, edge: EdgeRef) -> Result<&mut E, FlowError> {
        self.slot_mut(edge).map(EdgeSlot::payload_mut)
    }

    /// Iterates cells between live vertices in row-major order.
    pub fn edges(&self, filter: EdgeFilter) -> impl Iterator<Item = EdgeRef> + '_ {
        self.vertex_ids()
            .flat_map(move |from| self.row(from).map(|(edge, _)| edge))
            .filter(move |edge| filter == EdgeFilter::All || self.is_active(*edge))
    }

    /// Every cell in the row of `from` whose column is a live vertex.
    pub fn row(&self, from: VertexId) -> impl Iterator<Item = (EdgeRef, &EdgeSlot<E>)> + '_ {
        let side = self.dimension();
        let start = from.index() * side;
        let cells = if self.contains(from) {
            &self.cells[start..start + side]
        } else {
            &self.cells[0..0]
        };
        cells
            .iter()
            .enumerate()
            .filter(move |(to, _)| self.vertices[*to].alive)
            .map(move |(to, slot)| (EdgeRef::new(from, VertexId::from_index(to)), slot))
    }

    /// Heads of the active out-edges of `from`, in column order.
    pub fn successors(&self, from: VertexId) -> impl Iterator<Item = VertexId> + '_ {
        self.row(from)
            .filter(|(_, slot)| slot.active)
            .map(|(edge, _)| edge.to)
    }

    /// Mutable access to every cell payload, active or not.
    pub fn payloads_mut(&mut self) -> impl Iterator<Item = &mut E> + '_ {
        self.cells.iter_mut().map(EdgeSlot::payload_mut)
    }

    /// Drops every vertex and cell.
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.names.clear();
        self.cells.clear();
    }

    fn ensure_live(&self, id: VertexId) -> Result<(), FlowError> {
        if self.contains(id) {
            Ok(())
        } else {
            Err(graph_error("unknown-vertex", "vertex does not exist")
                .with_context("vertex", id.as_raw()))
        }
    }

    fn cell_index(&self, edge: EdgeRef) -> Result<usize, FlowError> {
        self.ensure_live(edge.from)?;
        self.ensure_live(edge.to)?;
        Ok(edge.from.index() * self.dimension() + edge.to.index())
    }
}
