//! Request processing errors.

use crate::domain::CatalogueError;
use crate::router::SettingsError;
use crate::snapshot::SnapshotError;

/// Errors that abort processing of a request document.
#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    /// The document is not valid request JSON
    #[error("invalid request document: {0}")]
    Json(#[from] serde_json::Error),

    /// Reading input or writing output failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A base request could not be applied to the catalogue
    #[error("failed to load catalogue: {0}")]
    Catalogue(#[from] CatalogueError),

    /// Routing settings are out of range
    #[error("invalid routing settings: {0}")]
    Settings(#[from] SettingsError),

    /// Snapshot could not be read or written
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),

    /// No snapshot file was given on the command line or in the document
    #[error("no snapshot file: pass one explicitly or set serialization_settings.file")]
    MissingSnapshotPath,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = RequestError::from(CatalogueError::UnknownStop("Samara".into()));
        assert_eq!(err.to_string(), "failed to load catalogue: unknown stop Samara");

        let err = RequestError::from(SettingsError::InvalidWaitTime(-1.0));
        assert_eq!(
            err.to_string(),
            "invalid routing settings: bus wait time must be a non-negative number of minutes, got -1"
        );

        let err = RequestError::MissingSnapshotPath;
        assert!(err.to_string().starts_with("no snapshot file"));

        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = RequestError::from(json_err);
        assert!(err.to_string().starts_with("invalid request document"));
    }
}
