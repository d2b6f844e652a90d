//! Domain types for the transport catalogue.
//!
//! Stops and buses are plain records owned by the catalogue. Cross
//! references between them use the integer handles [`StopId`] and [`BusId`] rather than
//! pointers, so records can be shared freely once the catalogue is frozen.

mod bus;
mod error;
mod geo;
mod ids;
mod stop;

pub use bus::{Bus, BusStats, RouteKind};
pub use error::CatalogueError;
pub use geo::{Coordinates, EARTH_RADIUS_M};
pub use ids::{BusId, StopId};
pub use stop::Stop;
