//! External grid descriptors.
//!
//! Raster I/O lives outside this crate. A caller extracts the handful of
//! numbers that describe a dataset's grid (origin, cell size, row/column
//! counts) into a [`GridDescriptor`] and hands it to
//! [`RasterEnvelope::from_descriptor`](crate::RasterEnvelope::from_descriptor);
//! the reverse direction is
//! [`RasterEnvelope::geotransform`](crate::RasterEnvelope::geotransform).

use serde::{Deserialize, Serialize};

/// The numeric footprint of an external raster grid.
///
/// `origin_x`/`origin_y` name the upper-left corner of the grid, matching
/// the GDAL geotransform convention of a north-up raster with square cells.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridDescriptor {
    /// X coordinate of the upper-left corner.
    pub origin_x: f64,
    /// Y coordinate of the upper-left corner.
    pub origin_y: f64,
    /// Cell size in coordinate units.
    pub cell_size: f64,
    /// Number of columns.
    pub columns: usize,
    /// Number of rows.
    pub rows: usize,
}

impl GridDescriptor {
    /// Create a new grid descriptor.
    pub fn new(origin_x: f64, origin_y: f64, cell_size: f64, columns: usize, rows: usize) -> Self {
        Self {
            origin_x,
            origin_y,
            cell_size,
            columns,
            rows,
        }
    }

    /// Create a descriptor from a GDAL-style geotransform plus the raster's
    /// column and row counts. Only the origin (`gt[0]`, `gt[3]`) and the
    /// x resolution (`gt[1]`) are read; rotation terms are ignored.
    pub fn from_geotransform(gt: &[f64; 6], columns: usize, rows: usize) -> Self {
        Self::new(gt[0], gt[3], gt[1], columns, rows)
    }
}
