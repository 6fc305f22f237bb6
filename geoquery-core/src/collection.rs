use crate::bbox::BoundingBox;
use crate::coordinate::Coordinate;
use crate::error::GeometryError;
use crate::kind::GeometryKind;

/// A dense, row-major coordinate buffer of shape `(num_rows, num_columns)`.
///
/// `num_columns` may be 2 or more; only the first two columns (x, y) are ever
/// read. A third-or-later column (Z, M, or anything else a caller packed in)
/// is silently ignored, which is what makes the "extra coordinate columns are
/// ignored" and "adapters must handle strided access" requirements free: a
/// wider buffer is read with exactly the same indexing, just a larger stride.
#[derive(Debug, Clone, PartialEq)]
pub struct CoordBuffer {
    data: Vec<f64>,
    num_columns: usize,
}

impl CoordBuffer {
    pub fn new(data: Vec<f64>, num_columns: usize) -> Result<Self, GeometryError> {
        if num_columns < 2 {
            return Err(GeometryError::DimensionMismatch {
                columns: num_columns,
            });
        }
        if data.len() % num_columns != 0 {
            return Err(GeometryError::InvalidGeometry {
                detail: format!(
                    "coordinate buffer length {} is not a multiple of {} columns",
                    data.len(),
                    num_columns
                ),
            });
        }
        Ok(Self { data, num_columns })
    }

    pub fn len(&self) -> usize {
        self.data.len() / self.num_columns
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, i: usize) -> Coordinate {
        let base = i * self.num_columns;
        Coordinate::new(self.data[base], self.data[base + 1])
    }
}

/// A read-only view over the coordinates of a single row of a
/// [`GeometryCollection`].
#[derive(Debug, Clone, Copy)]
pub struct RowCoords<'a> {
    buffer: &'a CoordBuffer,
    start: usize,
    end: usize,
}

impl<'a> RowCoords<'a> {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn get(&self, i: usize) -> Coordinate {
        self.buffer.get(self.start + i)
    }

    pub fn iter(&self) -> impl Iterator<Item = Coordinate> + 'a {
        let buffer = self.buffer;
        (self.start..self.end).map(move |i| buffer.get(i))
    }

    pub fn bbox(&self) -> Option<BoundingBox> {
        BoundingBox::from_iter(self.iter())
    }
}

/// A columnar batch of `N` geometries of a single [`GeometryKind`], validated
/// once at construction per spec §4.1 and never mutated afterward.
#[derive(Debug, Clone, PartialEq)]
pub struct GeometryCollection {
    kind: GeometryKind,
    coords: CoordBuffer,
    row_ptr: Option<Vec<u32>>,
}

impl GeometryCollection {
    /// Construct and validate a geometry collection.
    ///
    /// This only checks the CSR structural contract (kind/row_ptr presence,
    /// `row_ptr[0] == 0`, monotonicity, terminator agreement). It does not
    /// check that individual rows are non-degenerate geometries (e.g. a
    /// linestring row with a single point). Those checks happen lazily, in
    /// the adapter, when a specific row is actually used.
    pub fn new(
        kind: GeometryKind,
        coords: CoordBuffer,
        row_ptr: Option<Vec<u32>>,
    ) -> Result<Self, GeometryError> {
        if kind.is_csr() {
            let row_ptr = row_ptr.as_ref().ok_or_else(|| GeometryError::InvalidGeometry {
                detail: format!("{} collections require a row_ptr", kind.as_str()),
            })?;
            if row_ptr.is_empty() {
                return Err(GeometryError::InvalidGeometry {
                    detail: "row_ptr must not be empty".to_string(),
                });
            }
            if row_ptr[0] != 0 {
                return Err(GeometryError::InvalidGeometry {
                    detail: format!("row_ptr[0] must be 0, got {}", row_ptr[0]),
                });
            }
            if !row_ptr.windows(2).all(|w| w[0] <= w[1]) {
                return Err(GeometryError::InvalidGeometry {
                    detail: "row_ptr must be non-decreasing".to_string(),
                });
            }
            let terminator = *row_ptr.last().unwrap() as usize;
            if terminator != coords.len() {
                return Err(GeometryError::InvalidGeometry {
                    detail: format!(
                        "row_ptr terminator {} does not match coords length {}",
                        terminator,
                        coords.len()
                    ),
                });
            }
        } else if row_ptr.is_some() {
            return Err(GeometryError::InvalidGeometry {
                detail: format!("{} collections must not carry a row_ptr", kind.as_str()),
            });
        }

        Ok(Self {
            kind,
            coords,
            row_ptr,
        })
    }

    pub fn len(&self) -> usize {
        match &self.row_ptr {
            Some(row_ptr) => row_ptr.len() - 1,
            None => self.coords.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn kind(&self) -> GeometryKind {
        self.kind
    }

    /// Read-only access to the coordinates of row `i`.
    pub fn row(&self, i: usize) -> RowCoords<'_> {
        let (start, end) = match &self.row_ptr {
            Some(row_ptr) => (row_ptr[i] as usize, row_ptr[i + 1] as usize),
            None => (i, i + 1),
        };
        RowCoords {
            buffer: &self.coords,
            start,
            end,
        }
    }

    /// The axis-aligned bounding box of row `i`, or `None` if the row is empty.
    pub fn bbox(&self, i: usize) -> Option<BoundingBox> {
        self.row(i).bbox()
    }
}
