//! Catalogue of stops, buses and road distances.

mod distance;
mod store;

pub use distance::DistanceTable;
pub use store::TransportCatalogue;
