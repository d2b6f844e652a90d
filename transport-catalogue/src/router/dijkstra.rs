//! Single-source shortest paths over a [`DirectedWeightedGraph`].

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use super::graph::{DirectedWeightedGraph, EdgeId, VertexId};
use super::weight::Weight;

#[derive(Debug, Clone, Copy)]
struct QueueItem<W> {
    vertex: VertexId,
    distance: W,
}

impl<W: Weight> PartialEq for QueueItem<W> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}
impl<W: Weight> Eq for QueueItem<W> {}

impl<W: Weight> PartialOrd for QueueItem<W> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl<W: Weight> Ord for QueueItem<W> {
    // Reversed so the max-heap pops the closest vertex first, lowest id on ties.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .distance
            .total_cmp(&self.distance)
            .then_with(|| other.vertex.cmp(&self.vertex))
    }
}

/// A shortest path: its total weight and the edges traversed in order.
#[derive(Debug, Clone, PartialEq)]
pub struct PathInfo<W> {
    pub weight: W,
    pub edges: Vec<EdgeId>,
}

/// Shortest-path queries against one immutable graph.
///
/// The graph is borrowed, so any number of queries can run against it
/// without rebuilding. Weights must be non-negative.
pub struct ShortestPaths<'g, W> {
    graph: &'g DirectedWeightedGraph<W>,
}

impl<'g, W: Weight> ShortestPaths<'g, W> {
    pub fn new(graph: &'g DirectedWeightedGraph<W>) -> Self {
        Self { graph }
    }

    /// Cheapest path from `from` to `to`, or `None` if `to` is unreachable.
    ///
    /// A tentative distance is only replaced on strict improvement, so among
    /// equal-cost paths the one discovered first wins.
    pub fn route(&self, from: VertexId, to: VertexId) -> Option<PathInfo<W>> {
        let vertex_count = self.graph.vertex_count();
        let mut distance: Vec<Option<W>> = vec![None; vertex_count];
        let mut via: Vec<Option<EdgeId>> = vec![None; vertex_count];
        let mut settled = vec![false; vertex_count];

        let mut queue = BinaryHeap::new();
        distance[from.index()] = Some(W::ZERO);
        queue.push(QueueItem {
            vertex: from,
            distance: W::ZERO,
        });

        while let Some(QueueItem { vertex, distance: d }) = queue.pop() {
            if settled[vertex.index()] {
                continue;
            }
            settled[vertex.index()] = true;
            if vertex == to {
                return Some(PathInfo {
                    weight: d,
                    edges: self.trace_back(&via, to),
                });
            }

            for &edge_id in self.graph.outgoing(vertex) {
                let edge = self.graph.edge(edge_id);
                if settled[edge.to.index()] {
                    continue;
                }
                let candidate = d + edge.weight;
                let improves = match distance[edge.to.index()] {
                    None => true,
                    Some(current) => candidate.total_cmp(&current) == Ordering::Less,
                };
                if improves {
                    distance[edge.to.index()] = Some(candidate);
                    via[edge.to.index()] = Some(edge_id);
                    queue.push(QueueItem {
                        vertex: edge.to,
                        distance: candidate,
                    });
                }
            }
        }

        None
    }

    fn trace_back(&self, via: &[Option<EdgeId>], to: VertexId) -> Vec<EdgeId> {
        let mut edges = Vec::new();
        let mut vertex = to;
        while let Some(edge_id) = via[vertex.index()] {
            edges.push(edge_id);
            vertex = self.graph.edge(edge_id).from;
        }
        edges.reverse();
        edges
    }
}
