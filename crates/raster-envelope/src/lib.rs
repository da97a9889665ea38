//! Spatial envelope algebra for raster grids.
//!
//! Raster pipelines that mosaic, clip, or resample grids of differing
//! extents need a single consistent extent with no fractional-cell
//! misalignment. This crate provides the pieces:
//!
//! - [`Envelope`]: a plain rectangular extent with subset/superset/disjoint
//!   predicates and union/intersection.
//! - [`RasterEnvelope`]: an envelope partitioned into equal-size cells,
//!   with snapping-aware set operations and coordinate↔offset conversions.
//! - [`minimum_bounding_envelope`]: the smallest grid-aligned envelope
//!   that fully contains an arbitrary extent.
//! - [`minimum_of`] / [`maximum_of`]: fold many raster envelopes into one
//!   minimal or maximal grid-aligned envelope.
//!
//! All types are immutable value objects; every operation returns a new
//! instance, so everything here is safe to share across threads. The
//! snapped result of any operation is never smaller than its input: windows
//! only ever grow outward to the next full cell, anchored at the upper-left
//! corner.
//!
//! Cell counting uses fixed-precision decimal arithmetic
//! ([`rust_decimal`]) rather than binary floating-point remainders, so an
//! extent that is an exact multiple of the cell size is never misclassified
//! and grown by a spurious cell.

pub mod envelope;
pub mod error;
pub mod grid;
pub mod raster;
pub mod snap;

pub use envelope::Envelope;
pub use error::{EnvelopeError, Result};
pub use grid::GridDescriptor;
pub use raster::{RasterEnvelope, COORD_TOLERANCE};
pub use snap::{maximum_of, minimum_bounding_envelope, minimum_of};
