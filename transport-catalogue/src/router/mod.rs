//! Minimum-time routing over the catalogue.
//!
//! The catalogue is turned into a weighted directed graph once
//! ([`RouteGraph`]); a generic Dijkstra engine ([`ShortestPaths`]) answers
//! queries against it, and [`TransportRouter`] translates the edge sequence
//! back into waits and rides.

mod builder;
mod dijkstra;
mod graph;
mod settings;
mod transport;
mod weight;

pub use builder::{RouteEdge, RouteGraph, arrival_vertex, boarding_vertex};
pub use dijkstra::{PathInfo, ShortestPaths};
pub use graph::{DirectedWeightedGraph, Edge, EdgeId, VertexId};
pub use settings::{RouterSettings, SettingsError};
pub use transport::{RouteAction, RouteResult, TransportRouter};
pub use weight::Weight;
