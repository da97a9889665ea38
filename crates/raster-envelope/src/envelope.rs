//! Plain rectangular extents and their set algebra.

use serde::{Deserialize, Serialize};

use crate::error::{EnvelopeError, Result};

/// A rectilinear spatial extent defined by min/max coordinates in two
/// dimensions.
///
/// An `Envelope` is always valid: `x_min < x_max` and `y_min < y_max` are
/// enforced at construction, and instances are immutable afterwards.
/// Degenerate (zero-area) and inverted rectangles are rejected.
///
/// Equality is exact numeric comparison of all four coordinates; the
/// tolerance-based comparison lives on [`RasterEnvelope`](crate::RasterEnvelope),
/// where repeated snapping can introduce floating-point noise.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawEnvelope")]
pub struct Envelope {
    x_min: f64,
    y_min: f64,
    x_max: f64,
    y_max: f64,
}

/// Unvalidated mirror of [`Envelope`] used to route deserialization through
/// the validating constructor.
#[derive(Deserialize)]
struct RawEnvelope {
    x_min: f64,
    y_min: f64,
    x_max: f64,
    y_max: f64,
}

impl TryFrom<RawEnvelope> for Envelope {
    type Error = EnvelopeError;

    fn try_from(raw: RawEnvelope) -> Result<Self> {
        Envelope::new(raw.x_min, raw.y_min, raw.x_max, raw.y_max)
    }
}

impl Envelope {
    /// Create a new envelope from corner coordinates.
    ///
    /// Fails with [`EnvelopeError::InvalidEnvelope`] when `x_min >= x_max`
    /// or `y_min >= y_max`.
    pub fn new(x_min: f64, y_min: f64, x_max: f64, y_max: f64) -> Result<Self> {
        if !(x_min < x_max && y_min < y_max) {
            return Err(EnvelopeError::InvalidEnvelope {
                x_min,
                y_min,
                x_max,
                y_max,
            });
        }
        Ok(Self {
            x_min,
            y_min,
            x_max,
            y_max,
        })
    }

    /// Construct without validation. Callers must guarantee the corners
    /// already form a valid envelope.
    pub(crate) fn new_unchecked(x_min: f64, y_min: f64, x_max: f64, y_max: f64) -> Self {
        debug_assert!(x_min < x_max && y_min < y_max);
        Self {
            x_min,
            y_min,
            x_max,
            y_max,
        }
    }

    /// Minimum x coordinate.
    pub fn x_min(&self) -> f64 {
        self.x_min
    }

    /// Minimum y coordinate.
    pub fn y_min(&self) -> f64 {
        self.y_min
    }

    /// Maximum x coordinate.
    pub fn x_max(&self) -> f64 {
        self.x_max
    }

    /// Maximum y coordinate.
    pub fn y_max(&self) -> f64 {
        self.y_max
    }

    /// Width of the envelope in coordinate units.
    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    /// Height of the envelope in coordinate units.
    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }

    /// Test whether `self` is contained within `other`.
    ///
    /// Boundary-inclusive: coincident edges count as contained, so every
    /// envelope is a subset of itself.
    pub fn is_subset(&self, other: &Envelope) -> bool {
        self.x_min >= other.x_min
            && self.x_max <= other.x_max
            && self.y_min >= other.y_min
            && self.y_max <= other.y_max
    }

    /// Test whether `self` contains `other`.
    ///
    /// Boundary-inclusive, the mirror of [`is_subset`](Self::is_subset).
    pub fn is_superset(&self, other: &Envelope) -> bool {
        self.x_min <= other.x_min
            && self.x_max >= other.x_max
            && self.y_min <= other.y_min
            && self.y_max >= other.y_max
    }

    /// Test whether `self` and `other` share no area.
    ///
    /// Touching edges do NOT count as disjoint.
    pub fn is_disjoint(&self, other: &Envelope) -> bool {
        self.x_min > other.x_max
            || self.x_max < other.x_min
            || self.y_min > other.y_max
            || self.y_max < other.y_min
    }

    /// The minimum bounding envelope of `self` and `other`.
    ///
    /// Always valid, because both inputs are.
    pub fn union(&self, other: &Envelope) -> Envelope {
        Envelope::new_unchecked(
            self.x_min.min(other.x_min),
            self.y_min.min(other.y_min),
            self.x_max.max(other.x_max),
            self.y_max.max(other.y_max),
        )
    }

    /// The overlap area of `self` and `other`.
    ///
    /// When the inputs share no area the component-wise result is inverted
    /// or degenerate and this fails with [`EnvelopeError::InvalidEnvelope`].
    /// Callers that may intersect disjoint extents should check
    /// [`is_disjoint`](Self::is_disjoint) first.
    pub fn intersection(&self, other: &Envelope) -> Result<Envelope> {
        Envelope::new(
            self.x_min.max(other.x_min),
            self.y_min.max(other.y_min),
            self.x_max.min(other.x_max),
            self.y_max.min(other.y_max),
        )
    }
}
