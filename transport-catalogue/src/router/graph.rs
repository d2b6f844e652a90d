//! Directed weighted graph with a fixed vertex set.

use std::fmt::{self, Debug};

use super::weight::Weight;

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VertexId(pub u32);
impl Debug for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v#{}", self.0)
    }
}

impl VertexId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EdgeId(pub u32);
impl Debug for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "e#{}", self.0)
    }
}

impl EdgeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge<W> {
    pub from: VertexId,
    pub to: VertexId,
    pub weight: W,
}

/// A directed graph whose edges carry weights of type `W`.
///
/// Vertices are fixed at construction; edges are appended and identified by
/// their insertion position.
#[derive(Debug, Clone)]
pub struct DirectedWeightedGraph<W> {
    edges: Vec<Edge<W>>,
    outgoing: Vec<Vec<EdgeId>>,
}

impl<W: Weight> DirectedWeightedGraph<W> {
    pub fn with_vertex_count(vertex_count: usize) -> Self {
        Self {
            edges: Vec::new(),
            outgoing: vec![Vec::new(); vertex_count],
        }
    }

    /// Append an edge. Both endpoints must be existing vertices.
    pub fn add_edge(&mut self, edge: Edge<W>) -> EdgeId {
        debug_assert!(edge.from.index() < self.outgoing.len());
        debug_assert!(edge.to.index() < self.outgoing.len());
        let id = EdgeId(self.edges.len() as u32);
        self.outgoing[edge.from.index()].push(id);
        self.edges.push(edge);
        id
    }

    pub fn edge(&self, id: EdgeId) -> &Edge<W> {
        &self.edges[id.index()]
    }

    /// Edges leaving `vertex`, in insertion order.
    pub fn outgoing(&self, vertex: VertexId) -> &[EdgeId] {
        &self.outgoing[vertex.index()]
    }

    pub fn vertex_count(&self) -> usize {
        self.outgoing.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}
