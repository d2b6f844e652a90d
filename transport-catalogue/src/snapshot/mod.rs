//! On-disk snapshots of a built catalogue.
//!
//! A snapshot stores the catalogue as the commands that built it: stops in
//! insertion order, measured distances, and buses with their declared stop
//! lists. Restoring replays those commands, so stop and bus handles come
//! back identical and every query answers as it did before saving.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::catalogue::TransportCatalogue;
use crate::domain::{CatalogueError, Coordinates, RouteKind, StopId};
use crate::router::RouterSettings;

/// Errors from reading or writing snapshot files.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("snapshot i/o failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed snapshot: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StopRecord {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistanceRecord {
    pub from: String,
    pub to: String,
    pub meters: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusRecord {
    pub name: String,
    pub is_roundtrip: bool,
    /// Stops as declared; circular routes repeat the first stop at the end.
    pub stops: Vec<String>,
}

/// Serializable image of a catalogue plus the routing settings it was
/// built with.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CatalogueSnapshot {
    pub stops: Vec<StopRecord>,
    pub distances: Vec<DistanceRecord>,
    pub buses: Vec<BusRecord>,
    #[serde(default)]
    pub routing_settings: Option<RouterSettings>,
}

impl CatalogueSnapshot {
    /// Capture the current contents of `catalogue`.
    pub fn capture(catalogue: &TransportCatalogue, routing_settings: Option<RouterSettings>) -> Self {
        let name_of = |id: StopId| catalogue.stop(id).name.clone();

        let stops = catalogue
            .stops()
            .map(|stop| StopRecord {
                name: stop.name.clone(),
                latitude: stop.coordinates.latitude,
                longitude: stop.coordinates.longitude,
            })
            .collect();
        let distances = catalogue
            .distances()
            .map(|(from, to, meters)| DistanceRecord {
                from: name_of(from),
                to: name_of(to),
                meters,
            })
            .collect();
        let buses = catalogue
            .buses()
            .map(|bus| BusRecord {
                name: bus.name.clone(),
                is_roundtrip: bus.kind.is_roundtrip(),
                stops: bus.declared_stops().into_iter().map(name_of).collect(),
            })
            .collect();

        Self {
            stops,
            distances,
            buses,
            routing_settings,
        }
    }

    /// Rebuild the catalogue this snapshot was captured from.
    pub fn restore(&self) -> Result<TransportCatalogue, CatalogueError> {
        let mut catalogue = TransportCatalogue::new();
        for stop in &self.stops {
            catalogue.add_stop(
                stop.name.clone(),
                Coordinates::new(stop.latitude, stop.longitude),
            )?;
        }
        for distance in &self.distances {
            catalogue.set_distance(&distance.from, &distance.to, distance.meters)?;
        }
        for bus in &self.buses {
            catalogue.add_bus(
                bus.name.clone(),
                RouteKind::from_roundtrip(bus.is_roundtrip),
                &bus.stops,
            )?;
        }
        Ok(catalogue)
    }

    /// Write the snapshot as JSON.
    ///
    /// Creates parent directories if they don't exist.
    pub fn save(&self, path: &Path) -> Result<(), SnapshotError> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        info!(
            path = %path.display(),
            stops = self.stops.len(),
            buses = self.buses.len(),
            "snapshot saved"
        );
        Ok(())
    }

    /// Read a snapshot written by [`CatalogueSnapshot::save`].
    pub fn load(path: &Path) -> Result<Self, SnapshotError> {
        let contents = std::fs::read_to_string(path)?;
        let snapshot: Self = serde_json::from_str(&contents)?;
        info!(path = %path.display(), "snapshot loaded");
        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::router::TransportRouter;
    use std::sync::Arc;
    use tempfile::tempdir;

    fn sample() -> TransportCatalogue {
        let mut catalogue = TransportCatalogue::new();
        catalogue.add_stop("A", Coordinates::new(55.60, 37.20)).unwrap();
        catalogue.add_stop("B", Coordinates::new(55.61, 37.21)).unwrap();
        catalogue.add_stop("C", Coordinates::new(55.62, 37.22)).unwrap();
        catalogue.add_stop("Lonely", Coordinates::new(55.70, 37.30)).unwrap();
        catalogue.set_distance("A", "B", 1000).unwrap();
        catalogue.set_distance("B", "C", 1500).unwrap();
        catalogue.set_distance("C", "B", 1700).unwrap();
        catalogue
            .add_bus("ring", RouteKind::Circular, &["A", "B", "C", "A"])
            .unwrap();
        catalogue
            .add_bus("line", RouteKind::Linear, &["A", "B", "C"])
            .unwrap();
        catalogue
    }

    #[test]
    fn restore_preserves_queries() {
        let original = sample();
        let settings = RouterSettings::new(30.0, 4.0).unwrap();
        let restored = CatalogueSnapshot::capture(&original, Some(settings))
            .restore()
            .unwrap();

        for name in ["ring", "line", "missing"] {
            assert_eq!(original.bus_stats(name), restored.bus_stats(name), "{name}");
        }
        for name in ["A", "B", "C", "Lonely", "missing"] {
            assert_eq!(original.stop_info(name), restored.stop_info(name), "{name}");
        }
        for name in ["A", "B", "C", "Lonely"] {
            assert_eq!(original.stop_id(name), restored.stop_id(name));
        }
    }

    #[test]
    fn restore_preserves_routes() {
        let original = Arc::new(sample());
        let settings = RouterSettings::new(30.0, 4.0).unwrap();
        let restored = Arc::new(
            CatalogueSnapshot::capture(&original, Some(settings))
                .restore()
                .unwrap(),
        );

        let before = TransportRouter::new(original, settings);
        let after = TransportRouter::new(restored, settings);
        for (from, to) in [("A", "C"), ("C", "A"), ("B", "A"), ("A", "Lonely")] {
            assert_eq!(before.calc_route(from, to), after.calc_route(from, to));
        }
    }

    #[test]
    fn circular_buses_keep_closing_stop() {
        let snapshot = CatalogueSnapshot::capture(&sample(), None);
        let ring = &snapshot.buses[0];
        assert!(ring.is_roundtrip);
        assert_eq!(ring.stops, ["A", "B", "C", "A"]);
        assert_eq!(snapshot.buses[1].stops, ["A", "B", "C"]);
    }

    #[test]
    fn shortest_loop_survives_restore() {
        let mut catalogue = sample();
        catalogue
            .add_bus("shuttle", RouteKind::Circular, &["Lonely", "Lonely"])
            .unwrap();

        let snapshot = CatalogueSnapshot::capture(&catalogue, None);
        assert_eq!(snapshot.buses[2].stops, ["Lonely", "Lonely"]);

        let restored = snapshot.restore().unwrap();
        assert_eq!(
            restored.bus_stats("shuttle"),
            catalogue.bus_stats("shuttle")
        );
        assert_eq!(restored.stop_info("Lonely"), catalogue.stop_info("Lonely"));
    }

    #[test]
    fn save_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("base.json");
        let settings = RouterSettings::new(40.0, 6.0).unwrap();
        let snapshot = CatalogueSnapshot::capture(&sample(), Some(settings));

        snapshot.save(&path).unwrap();
        let loaded = CatalogueSnapshot::load(&path).unwrap();
        assert_eq!(loaded, snapshot);
        assert_eq!(loaded.routing_settings, Some(settings));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempdir().unwrap();
        let result = CatalogueSnapshot::load(&dir.path().join("absent.json"));
        assert!(matches!(result, Err(SnapshotError::Io(_))));
    }

    #[test]
    fn garbage_is_json_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("base.json");
        std::fs::write(&path, "not json").unwrap();
        assert!(matches!(
            CatalogueSnapshot::load(&path),
            Err(SnapshotError::Json(_))
        ));
    }

    #[test]
    fn inconsistent_snapshot_fails_restore() {
        let snapshot = CatalogueSnapshot {
            buses: vec![BusRecord {
                name: "ghost".into(),
                is_roundtrip: false,
                stops: vec!["Nowhere".into()],
            }],
            ..CatalogueSnapshot::default()
        };
        assert_eq!(
            snapshot.restore().unwrap_err(),
            CatalogueError::UnknownStop("Nowhere".into())
        );
    }
}
