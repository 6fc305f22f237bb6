use crate::error::GeometryError;

/// The closed set of geometry kinds a [`crate::collection::GeometryCollection`]
/// can hold. Polymorphism here is deliberately closed: exactly these four
/// variants, no extensibility promise, mirroring the teacher's tagged-sum
/// `GeometryType` but trimmed to the kinds this engine actually indexes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryKind {
    Point,
    LineString,
    OpenPolygon,
    ClosedPolygon,
}

impl GeometryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            GeometryKind::Point => "point",
            GeometryKind::LineString => "linestring",
            GeometryKind::OpenPolygon => "open_polygon",
            GeometryKind::ClosedPolygon => "closed_polygon",
        }
    }

    pub fn parse(s: &str) -> Result<Self, GeometryError> {
        match s {
            "point" => Ok(GeometryKind::Point),
            "linestring" => Ok(GeometryKind::LineString),
            "open_polygon" => Ok(GeometryKind::OpenPolygon),
            "closed_polygon" => Ok(GeometryKind::ClosedPolygon),
            other => Err(GeometryError::UnsupportedGeometryKind {
                found: other.to_string(),
            }),
        }
    }

    /// Whether this kind is stored in CSR (row_ptr) form. Only `point` is flat.
    pub fn is_csr(&self) -> bool {
        !matches!(self, GeometryKind::Point)
    }

    /// Whether rows of this kind denote a filled area (vs. a 1D curve).
    pub fn is_areal(&self) -> bool {
        matches!(self, GeometryKind::OpenPolygon | GeometryKind::ClosedPolygon)
    }
}
