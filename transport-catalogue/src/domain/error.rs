//! Catalogue mutation errors.
//!
//! These indicate malformed input data. Lookups that simply miss are not
//! errors and are reported through `Option` instead.

/// Errors raised while populating a catalogue.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogueError {
    /// A stop with this name is already registered
    #[error("stop {0} already exists")]
    DuplicateStop(String),

    /// A bus with this name is already registered
    #[error("bus {0} already exists")]
    DuplicateBus(String),

    /// Bus declared without any stops
    #[error("bus {0} has an empty stop list")]
    EmptyRoute(String),

    /// Circular bus whose first and last stops differ
    #[error("circular bus {0} must start and end at the same stop")]
    MalformedCircularRoute(String),

    /// Reference to a stop that was never added
    #[error("unknown stop {0}")]
    UnknownStop(String),

    /// Road distance for this ordered pair was already set
    #[error("distance from {from} to {to} has already been set")]
    DuplicateDistance { from: String, to: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = CatalogueError::DuplicateStop("Universam".into());
        assert_eq!(err.to_string(), "stop Universam already exists");

        let err = CatalogueError::DuplicateBus("256".into());
        assert_eq!(err.to_string(), "bus 256 already exists");

        let err = CatalogueError::EmptyRoute("14".into());
        assert_eq!(err.to_string(), "bus 14 has an empty stop list");

        let err = CatalogueError::MalformedCircularRoute("828".into());
        assert_eq!(
            err.to_string(),
            "circular bus 828 must start and end at the same stop"
        );

        let err = CatalogueError::UnknownStop("Samara".into());
        assert_eq!(err.to_string(), "unknown stop Samara");

        let err = CatalogueError::DuplicateDistance {
            from: "A".into(),
            to: "B".into(),
        };
        assert_eq!(err.to_string(), "distance from A to B has already been set");
    }
}
