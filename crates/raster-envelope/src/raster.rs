//! Grid-aligned rectangular extents.

use serde::{Deserialize, Serialize};

use crate::envelope::Envelope;
use crate::error::{EnvelopeError, Result};
use crate::grid::GridDescriptor;
use crate::snap::{minimum_bounding_envelope, snapped_window};

/// Absolute tolerance for coordinate and cell-size comparison between
/// raster envelopes. Repeated snapping and union chains accumulate
/// floating-point noise well below this, while true extent mismatches are
/// at least a cell apart.
pub const COORD_TOLERANCE: f64 = 1e-7;

/// An [`Envelope`] partitioned into equal-size square cells.
///
/// The extent is always an exact whole number of cells: construction
/// recomputes `x_max` and `y_min` so that
/// `x_max - x_min == x_size * cell_size` and
/// `y_max - y_min == y_size * cell_size`. The upper-left corner
/// (`x_min`, `y_max`) is the fixed anchor and is never moved; the window
/// only ever grows toward the lower right.
///
/// Equality allows differences up to [`COORD_TOLERANCE`] on coordinates
/// and cell size, and requires exact equality on cell counts.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(into = "RawRasterEnvelope", try_from = "RawRasterEnvelope")]
pub struct RasterEnvelope {
    envelope: Envelope,
    cell_size: f64,
    x_size: usize,
    y_size: usize,
}

/// Corner-and-cell-size form of [`RasterEnvelope`] used for serialization.
/// Deserializing through it re-runs validation and the self-snap, so a
/// stored envelope can never bypass the grid-alignment invariant.
#[derive(Serialize, Deserialize)]
struct RawRasterEnvelope {
    x_min: f64,
    y_min: f64,
    x_max: f64,
    y_max: f64,
    cell_size: f64,
}

impl From<RasterEnvelope> for RawRasterEnvelope {
    fn from(re: RasterEnvelope) -> Self {
        Self {
            x_min: re.x_min(),
            y_min: re.y_min(),
            x_max: re.x_max(),
            y_max: re.y_max(),
            cell_size: re.cell_size,
        }
    }
}

impl TryFrom<RawRasterEnvelope> for RasterEnvelope {
    type Error = EnvelopeError;

    fn try_from(raw: RawRasterEnvelope) -> Result<Self> {
        RasterEnvelope::new(raw.x_min, raw.y_min, raw.x_max, raw.y_max, raw.cell_size)
    }
}

impl RasterEnvelope {
    /// Create a raster envelope from corner coordinates and a cell size.
    ///
    /// If the extent is not a whole multiple of `cell_size`, the lower-right
    /// corner is pushed outward to the next full cell. Fails with
    /// [`EnvelopeError::InvalidEnvelope`] for degenerate or inverted corners
    /// and [`EnvelopeError::InvalidCellSize`] for a non-positive or
    /// non-finite cell size.
    pub fn new(x_min: f64, y_min: f64, x_max: f64, y_max: f64, cell_size: f64) -> Result<Self> {
        if !cell_size.is_finite() || cell_size <= 0.0 {
            return Err(EnvelopeError::InvalidCellSize(cell_size));
        }
        let envelope = Envelope::new(x_min, y_min, x_max, y_max)?;
        let (x_max, y_min, x_size, y_size) = snapped_window(&envelope, cell_size)?;

        Ok(Self {
            envelope: Envelope::new_unchecked(x_min, y_min, x_max, y_max),
            cell_size,
            x_size,
            y_size,
        })
    }

    /// Create a raster envelope from an external grid descriptor
    /// (origin, cell size, and row/column counts).
    pub fn from_descriptor(descriptor: &GridDescriptor) -> Result<Self> {
        let x_min = descriptor.origin_x;
        let y_max = descriptor.origin_y;
        let x_max = x_min + descriptor.columns as f64 * descriptor.cell_size;
        let y_min = y_max - descriptor.rows as f64 * descriptor.cell_size;
        Self::new(x_min, y_min, x_max, y_max, descriptor.cell_size)
    }

    /// The underlying plain envelope.
    pub fn envelope(&self) -> &Envelope {
        &self.envelope
    }

    /// Minimum x coordinate.
    pub fn x_min(&self) -> f64 {
        self.envelope.x_min()
    }

    /// Minimum y coordinate.
    pub fn y_min(&self) -> f64 {
        self.envelope.y_min()
    }

    /// Maximum x coordinate.
    pub fn x_max(&self) -> f64 {
        self.envelope.x_max()
    }

    /// Maximum y coordinate.
    pub fn y_max(&self) -> f64 {
        self.envelope.y_max()
    }

    /// Width of the envelope in coordinate units.
    pub fn width(&self) -> f64 {
        self.envelope.width()
    }

    /// Height of the envelope in coordinate units.
    pub fn height(&self) -> f64 {
        self.envelope.height()
    }

    /// Cell size in coordinate units.
    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    /// Number of cells (columns) spanning the x axis.
    pub fn x_size(&self) -> usize {
        self.x_size
    }

    /// Number of cells (rows) spanning the y axis.
    pub fn y_size(&self) -> usize {
        self.y_size
    }

    /// Boundary-inclusive containment test, see [`Envelope::is_subset`].
    pub fn is_subset(&self, other: &RasterEnvelope) -> bool {
        self.envelope.is_subset(&other.envelope)
    }

    /// Boundary-inclusive containment test, see [`Envelope::is_superset`].
    pub fn is_superset(&self, other: &RasterEnvelope) -> bool {
        self.envelope.is_superset(&other.envelope)
    }

    /// Overlap test, see [`Envelope::is_disjoint`].
    pub fn is_disjoint(&self, other: &RasterEnvelope) -> bool {
        self.envelope.is_disjoint(&other.envelope)
    }

    /// Test whether `self` and `other` lie on the same grid: equal cell
    /// size, with both the x-min and y-max offsets an exact whole number
    /// of cells.
    pub fn is_snapped(&self, other: &RasterEnvelope) -> bool {
        if self.cell_size != other.cell_size {
            return false;
        }
        let x_min_diff = self.x_min() - other.x_min();
        if x_min_diff % self.cell_size != 0.0 {
            return false;
        }
        let y_max_diff = self.y_max() - other.y_max();
        y_max_diff % self.cell_size == 0.0
    }

    /// Test whether `self` is a subset of `other` on the same grid.
    pub fn is_snapped_subset(&self, other: &RasterEnvelope) -> bool {
        self.is_snapped(other) && self.is_subset(other)
    }

    /// Test whether `self` is a superset of `other` on the same grid.
    pub fn is_snapped_superset(&self, other: &RasterEnvelope) -> bool {
        self.is_snapped(other) && self.is_superset(other)
    }

    /// The (column, row) offset of the cell containing coordinate `(x, y)`.
    ///
    /// Offsets count from the upper-left anchor; coordinates left of or
    /// above the envelope yield negative offsets, which the snapping
    /// algorithm uses to extend an envelope outward.
    pub fn offset_from_xy(&self, x: f64, y: f64) -> (i64, i64) {
        let col = ((x - self.x_min()) / self.cell_size).floor() as i64;
        let row = ((self.y_max() - y) / self.cell_size).floor() as i64;
        (col, row)
    }

    /// The upper-left corner coordinate of the cell at `(col, row)`.
    ///
    /// Exact inverse of [`offset_from_xy`](Self::offset_from_xy) for any
    /// offset it produced.
    pub fn xy_from_offset(&self, col: i64, row: i64) -> (f64, f64) {
        let x = self.x_min() + col as f64 * self.cell_size;
        let y = self.y_max() - row as f64 * self.cell_size;
        (x, y)
    }

    /// A GDAL-style geotransform describing this envelope:
    /// `[x_min, cell_size, 0, y_max, 0, -cell_size]`.
    pub fn geotransform(&self) -> [f64; 6] {
        [
            self.x_min(),
            self.cell_size,
            0.0,
            self.y_max(),
            0.0,
            -self.cell_size,
        ]
    }

    /// Union `self` and `other` into a new grid-aligned envelope.
    ///
    /// `snap_to_self` selects which grid the result aligns to: `self`'s
    /// (true) or `other`'s (false). When one input already covers the other
    /// on the same grid, that input is returned unchanged rather than
    /// re-snapped, so repeated unions cannot accumulate drift.
    pub fn union(&self, other: &RasterEnvelope, snap_to_self: bool) -> Result<RasterEnvelope> {
        if self.is_snapped_subset(other) {
            return Ok(*other);
        }
        if self.is_snapped_superset(other) {
            return Ok(*self);
        }
        if self.is_subset(other) {
            return if snap_to_self {
                minimum_bounding_envelope(&other.envelope, self)
            } else {
                Ok(*other)
            };
        }
        if self.is_superset(other) {
            return if snap_to_self {
                Ok(*self)
            } else {
                minimum_bounding_envelope(&self.envelope, other)
            };
        }

        let combined = self.envelope.union(&other.envelope);
        let reference = if snap_to_self { self } else { other };
        minimum_bounding_envelope(&combined, reference)
    }

    /// Intersect `self` and `other` into a new grid-aligned envelope.
    ///
    /// Same alignment policy as [`union`](Self::union). Fails with
    /// [`EnvelopeError::DisjointEnvelopes`] when the inputs share no area.
    pub fn intersection(
        &self,
        other: &RasterEnvelope,
        snap_to_self: bool,
    ) -> Result<RasterEnvelope> {
        if self.is_snapped_subset(other) {
            return Ok(*self);
        }
        if self.is_snapped_superset(other) {
            return Ok(*other);
        }
        if self.is_subset(other) {
            return if snap_to_self {
                Ok(*self)
            } else {
                minimum_bounding_envelope(&self.envelope, other)
            };
        }
        if self.is_superset(other) {
            return if snap_to_self {
                minimum_bounding_envelope(&other.envelope, self)
            } else {
                Ok(*other)
            };
        }

        let overlap = self
            .envelope
            .intersection(&other.envelope)
            .map_err(|_| EnvelopeError::DisjointEnvelopes)?;
        let reference = if snap_to_self { self } else { other };
        minimum_bounding_envelope(&overlap, reference)
    }
}

impl PartialEq for RasterEnvelope {
    fn eq(&self, other: &Self) -> bool {
        (self.x_min() - other.x_min()).abs() <= COORD_TOLERANCE
            && (self.y_min() - other.y_min()).abs() <= COORD_TOLERANCE
            && (self.x_max() - other.x_max()).abs() <= COORD_TOLERANCE
            && (self.y_max() - other.y_max()).abs() <= COORD_TOLERANCE
            && (self.cell_size - other.cell_size).abs() <= COORD_TOLERANCE
            && self.x_size == other.x_size
            && self.y_size == other.y_size
    }
}
