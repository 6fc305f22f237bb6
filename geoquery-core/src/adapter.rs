use geo_types::{Geometry, LineString, Point, Polygon};

use crate::collection::GeometryCollection;
use crate::error::GeometryError;
use crate::kind::GeometryKind;

/// Convert row `i` of a [`GeometryCollection`] into a `geo_types::Geometry`.
///
/// This is where per-row structural validity is actually checked (a point
/// row is always valid by construction; a linestring needs at least 2
/// coordinates; a polygon ring needs at least 3 distinct corners before
/// closing). Collection construction only validates the CSR scaffolding,
/// not individual rows. Most rows of a large batch are never converted at
/// all (bbox pre-filtering rules most of them out), so checking here avoids
/// paying for validation nobody needed.
pub fn row_to_geometry(
    collection: &GeometryCollection,
    row: usize,
) -> Result<Geometry<f64>, GeometryError> {
    let coords = collection.row(row);
    match collection.kind() {
        GeometryKind::Point => {
            let c = coords.get(0);
            Ok(Geometry::Point(Point::new(c.x(), c.y())))
        }
        GeometryKind::LineString => {
            if coords.len() < 2 {
                return Err(GeometryError::InvalidGeometry {
                    detail: format!(
                        "row {row}: linestring needs at least 2 coordinates, got {}",
                        coords.len()
                    ),
                });
            }
            let line: LineString<f64> = coords.iter().map(geo_types::Coord::from).collect();
            Ok(Geometry::LineString(line))
        }
        GeometryKind::OpenPolygon => {
            if coords.len() < 3 {
                return Err(GeometryError::InvalidGeometry {
                    detail: format!(
                        "row {row}: open_polygon needs at least 3 coordinates, got {}",
                        coords.len()
                    ),
                });
            }
            // Implicitly close the ring by repeating the first coordinate.
            let mut ring: Vec<geo_types::Coord<f64>> =
                coords.iter().map(geo_types::Coord::from).collect();
            ring.push(ring[0]);
            Ok(Geometry::Polygon(Polygon::new(LineString(ring), vec![])))
        }
        GeometryKind::ClosedPolygon => {
            if coords.len() < 4 {
                return Err(GeometryError::InvalidGeometry {
                    detail: format!(
                        "row {row}: closed_polygon needs at least 4 coordinates, got {}",
                        coords.len()
                    ),
                });
            }
            let first = coords.get(0);
            let last = coords.get(coords.len() - 1);
            if first.x() != last.x() || first.y() != last.y() {
                return Err(GeometryError::InvalidGeometry {
                    detail: format!(
                        "row {row}: closed_polygon ring must start and end at the same coordinate"
                    ),
                });
            }
            let ring: Vec<geo_types::Coord<f64>> =
                coords.iter().map(geo_types::Coord::from).collect();
            Ok(Geometry::Polygon(Polygon::new(LineString(ring), vec![])))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collection::CoordBuffer;

    fn flat(coords: &[(f64, f64)]) -> CoordBuffer {
        let data: Vec<f64> = coords.iter().flat_map(|&(x, y)| [x, y]).collect();
        CoordBuffer::new(data, 2).unwrap()
    }

    #[test]
    fn point_row_converts() {
        let coords = flat(&[(1.0, 2.0)]);
        let gc = GeometryCollection::new(GeometryKind::Point, coords, None).unwrap();
        let geom = row_to_geometry(&gc, 0).unwrap();
        assert_eq!(geom, Geometry::Point(Point::new(1.0, 2.0)));
    }

    #[test]
    fn linestring_row_converts() {
        let coords = flat(&[(0.0, 0.0), (1.0, 1.0), (2.0, 0.0)]);
        let gc =
            GeometryCollection::new(GeometryKind::LineString, coords, Some(vec![0, 3])).unwrap();
        let geom = row_to_geometry(&gc, 0).unwrap();
        match geom {
            Geometry::LineString(ls) => assert_eq!(ls.0.len(), 3),
            other => panic!("expected linestring, got {other:?}"),
        }
    }

    #[test]
    fn linestring_row_too_short_is_invalid() {
        let coords = flat(&[(0.0, 0.0)]);
        let gc =
            GeometryCollection::new(GeometryKind::LineString, coords, Some(vec![0, 1])).unwrap();
        let err = row_to_geometry(&gc, 0).unwrap_err();
        assert!(matches!(err, GeometryError::InvalidGeometry { .. }));
    }

    #[test]
    fn open_polygon_row_implicitly_closes_ring() {
        let coords = flat(&[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)]);
        let gc =
            GeometryCollection::new(GeometryKind::OpenPolygon, coords, Some(vec![0, 4])).unwrap();
        let geom = row_to_geometry(&gc, 0).unwrap();
        match geom {
            Geometry::Polygon(poly) => {
                assert_eq!(poly.exterior().0.len(), 5);
                assert_eq!(poly.exterior().0[0], poly.exterior().0[4]);
            }
            other => panic!("expected polygon, got {other:?}"),
        }
    }

    #[test]
    fn closed_polygon_row_requires_matching_endpoints() {
        let coords = flat(&[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (1.0, 1.0)]);
        let gc = GeometryCollection::new(GeometryKind::ClosedPolygon, coords, Some(vec![0, 4]))
            .unwrap();
        let err = row_to_geometry(&gc, 0).unwrap_err();
        assert!(matches!(err, GeometryError::InvalidGeometry { .. }));
    }

    #[test]
    fn closed_polygon_row_converts_when_already_closed() {
        let coords = flat(&[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 0.0)]);
        let gc = GeometryCollection::new(GeometryKind::ClosedPolygon, coords, Some(vec![0, 4]))
            .unwrap();
        let geom = row_to_geometry(&gc, 0).unwrap();
        match geom {
            Geometry::Polygon(poly) => assert_eq!(poly.exterior().0.len(), 4),
            other => panic!("expected polygon, got {other:?}"),
        }
    }
}
