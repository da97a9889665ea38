//! Grid snapping: cell counting, window expansion, the minimum bounding
//! envelope, and aggregate reducers.

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;

use crate::envelope::Envelope;
use crate::error::{EnvelopeError, Result};
use crate::raster::RasterEnvelope;

/// Number of cells needed to completely cover `range` in one dimension.
///
/// `floor(range / cell_size)`, plus one more cell when there is any
/// remainder. The quotient and remainder are computed over fixed-precision
/// decimal operands: binary floating point can misclassify an exact
/// multiple (e.g. `0.3 / 0.1`) as having a tiny nonzero remainder, which
/// would silently grow or shrink the grid by one cell.
pub(crate) fn cell_span(range: f64, cell_size: f64) -> Result<usize> {
    let range_dec =
        Decimal::from_f64(range).ok_or(EnvelopeError::CoordinateOverflow(range))?;
    let cell_dec =
        Decimal::from_f64(cell_size).ok_or(EnvelopeError::CoordinateOverflow(cell_size))?;

    let mut n_cells = (range_dec / cell_dec)
        .trunc()
        .to_usize()
        .ok_or(EnvelopeError::CoordinateOverflow(range))?;
    if !(range_dec % cell_dec).is_zero() {
        n_cells += 1;
    }
    Ok(n_cells)
}

/// Expand an envelope so its extent is an exact multiple of `cell_size`.
///
/// The upper-left corner (`x_min`, `y_max`) is the fixed anchor; only the
/// lower-right corner moves, and only outward. Returns the adjusted
/// `(x_max, y_min, x_size, y_size)`.
pub(crate) fn snapped_window(env: &Envelope, cell_size: f64) -> Result<(f64, f64, usize, usize)> {
    let x_size = cell_span(env.width(), cell_size)?;
    let y_size = cell_span(env.height(), cell_size)?;

    let x_max = env.x_min() + x_size as f64 * cell_size;
    let y_min = env.y_max() - y_size as f64 * cell_size;

    if x_max != env.x_max() || y_min != env.y_min() {
        tracing::trace!(
            x_max = env.x_max(),
            y_min = env.y_min(),
            snapped_x_max = x_max,
            snapped_y_min = y_min,
            cell_size,
            "expanded envelope to a whole number of cells"
        );
    }

    Ok((x_max, y_min, x_size, y_size))
}

/// The smallest raster envelope, aligned to `reference`'s grid, that fully
/// contains `bound`.
///
/// The bound's upper-left corner is moved outward onto the nearest cell
/// boundary of `reference` at or before it; construction's own self-snap
/// then grows the lower-right corner to the next full cell. The result is
/// always a superset of `bound`.
///
/// Fails with [`EnvelopeError::DisjointEnvelopes`] when `bound` and
/// `reference` do not overlap.
pub fn minimum_bounding_envelope(
    bound: &Envelope,
    reference: &RasterEnvelope,
) -> Result<RasterEnvelope> {
    if bound.is_disjoint(reference.envelope()) {
        return Err(EnvelopeError::DisjointEnvelopes);
    }

    // Align the upper-left corner to the reference grid. The offset may be
    // negative when the bound extends left of or above the reference.
    let (col, row) = reference.offset_from_xy(bound.x_min(), bound.y_max());
    let (x_min, y_max) = reference.xy_from_offset(col, row);

    tracing::debug!(
        col,
        row,
        x_min,
        y_max,
        cell_size = reference.cell_size(),
        "aligned upper-left corner to reference grid"
    );

    RasterEnvelope::new(
        x_min,
        bound.y_min(),
        bound.x_max(),
        y_max,
        reference.cell_size(),
    )
}

/// Fold a sequence of raster envelopes into the minimal envelope covering
/// their common overlap, aligned to `reference`'s grid.
///
/// `reference` defaults to the first element. Each step intersects the
/// running extent with the next element and re-snaps the result against the
/// reference, so the fold always finalizes on the reference grid no matter
/// which element it came from.
///
/// Fails with [`EnvelopeError::DisjointEnvelopes`] when any step has no
/// overlap, and with [`EnvelopeError::EmptySequence`] for an empty input.
pub fn minimum_of(
    envelopes: &[RasterEnvelope],
    reference: Option<&RasterEnvelope>,
) -> Result<RasterEnvelope> {
    let first = envelopes.first().ok_or(EnvelopeError::EmptySequence)?;
    let reference = reference.unwrap_or(first);

    let mut running = *first;
    for next in &envelopes[1..] {
        let overlap = running
            .envelope()
            .intersection(next.envelope())
            .map_err(|_| EnvelopeError::DisjointEnvelopes)?;
        running = minimum_bounding_envelope(&overlap, reference)?;
    }
    Ok(running)
}

/// Fold a sequence of raster envelopes into the minimal envelope covering
/// all of them, aligned to `reference`'s grid.
///
/// `reference` defaults to the first element. The counterpart of
/// [`minimum_of`], folding with union instead of intersection.
pub fn maximum_of(
    envelopes: &[RasterEnvelope],
    reference: Option<&RasterEnvelope>,
) -> Result<RasterEnvelope> {
    let first = envelopes.first().ok_or(EnvelopeError::EmptySequence)?;
    let reference = reference.unwrap_or(first);

    let mut running = *first;
    for next in &envelopes[1..] {
        let combined = running.envelope().union(next.envelope());
        running = minimum_bounding_envelope(&combined, reference)?;
    }
    Ok(running)
}
