//! Controller error types.

use thiserror::Error;

use crate::geo::GeometryError;
use crate::http::HttpError;

/// Errors that can occur during controller operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MapError {
    /// Invalid or incomplete configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Operation needs a canvas but `mount` has not run
    #[error("Map is not mounted")]
    NotMounted,

    /// `mount` called on a controller that already owns a canvas
    #[error("Map is already mounted on '{0}'")]
    AlreadyMounted(String),

    /// Controller was torn down
    #[error("Map controller has been torn down")]
    TornDown,

    /// Map library failed to create or drive the canvas
    #[error("Canvas error: {0}")]
    Canvas(String),

    /// API request failed
    #[error("HTTP error: {0}")]
    Http(#[from] HttpError),

    /// Serialized geometry could not be decoded
    #[error("Geometry error: {0}")]
    Geometry(#[from] GeometryError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_config_error() {
        let err = MapError::Config("map library handle is required".to_string());
        assert!(err.to_string().contains("Configuration error"));
        assert!(err.to_string().contains("map library"));
    }

    #[test]
    fn test_from_http_error() {
        let err: MapError = HttpError::Request("refused".to_string()).into();
        assert!(matches!(err, MapError::Http(_)));
        assert!(err.to_string().contains("refused"));
    }

    #[test]
    fn test_from_geometry_error() {
        let err: MapError = GeometryError::Malformed("POINT(".to_string()).into();
        assert!(matches!(err, MapError::Geometry(_)));
    }

    #[test]
    fn test_error_trait() {
        let err = MapError::NotMounted;
        let _: &dyn std::error::Error = &err;
    }
}
