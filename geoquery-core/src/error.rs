use thiserror::Error;

/// Errors raised while constructing or querying geometry collections.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    #[error("invalid geometry: {detail}")]
    InvalidGeometry { detail: String },

    #[error("unsupported geometry kind: {found:?}")]
    UnsupportedGeometryKind { found: String },

    #[error("coordinate buffer must have at least 2 columns, got {columns}")]
    DimensionMismatch { columns: usize },

    #[error("distance must be finite and non-negative, got {distance}")]
    InvalidDistance { distance: f64 },

    #[error("internal invariant violation: {detail}")]
    InternalError { detail: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_invalid_geometry() {
        let err = GeometryError::InvalidGeometry {
            detail: "row_ptr is not monotonic".to_string(),
        };
        assert_eq!(err.to_string(), "invalid geometry: row_ptr is not monotonic");
    }

    #[test]
    fn error_display_unsupported_kind() {
        let err = GeometryError::UnsupportedGeometryKind {
            found: "multipoint".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "unsupported geometry kind: \"multipoint\""
        );
    }

    #[test]
    fn error_display_dimension_mismatch() {
        let err = GeometryError::DimensionMismatch { columns: 1 };
        assert_eq!(
            err.to_string(),
            "coordinate buffer must have at least 2 columns, got 1"
        );
    }

    #[test]
    fn error_display_invalid_distance() {
        let err = GeometryError::InvalidDistance { distance: -1.0 };
        assert_eq!(
            err.to_string(),
            "distance must be finite and non-negative, got -1"
        );
    }

    #[test]
    fn error_clone_and_eq() {
        let a = GeometryError::InternalError {
            detail: "candidate id out of bounds".to_string(),
        };
        let b = a.clone();
        assert_eq!(a, b);
    }
}
