//! Magnitude classification
//!
//! Maps an earthquake magnitude to one of six color buckets and to a marker
//! radius. Buckets are half-open intervals `(k, k+1]` with edges at 1 through
//! 5, so `classify(Some(2.0))` is the `(1, 2]` bucket and `classify(Some(2.01))`
//! is `(2, 3]`.
//!
//! Unknown, `NaN`, or infinite magnitudes never reach rendering: they fall back
//! to the lowest bucket and the minimum radius.

mod types;

pub use types::{
    MagnitudeBucket, RadiusScale, BUCKET_COLORS, BUCKET_EDGES, METER_SCALE_FACTOR, MIN_RADIUS,
    PIXEL_SCALE_FACTOR,
};

/// Drops magnitudes that cannot be rendered.
#[inline]
pub fn sanitize(mag: Option<f64>) -> Option<f64> {
    mag.filter(|m| m.is_finite())
}

/// Returns the bucket containing `mag`.
pub fn classify(mag: Option<f64>) -> MagnitudeBucket {
    let Some(m) = sanitize(mag) else {
        return MagnitudeBucket::LOWEST;
    };

    let index = BUCKET_EDGES
        .iter()
        .position(|&edge| m <= edge)
        .unwrap_or(BUCKET_EDGES.len());

    MagnitudeBucket::from_index(index).unwrap_or(MagnitudeBucket::HIGHEST)
}

/// Returns the fill color for `mag`.
#[inline]
pub fn color(mag: Option<f64>) -> &'static str {
    classify(mag).color()
}

/// Returns the marker radius for `mag` in the given scale.
///
/// Non-positive and unknown magnitudes get [`MIN_RADIUS`].
pub fn radius(mag: Option<f64>, scale: RadiusScale) -> f64 {
    match sanitize(mag) {
        Some(m) if m > 0.0 => m * scale.factor(),
        _ => MIN_RADIUS,
    }
}

/// Classifier bound to a single radius scale.
///
/// The stylist holds one of these so every marker on a map uses the same
/// radius convention.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MagnitudeClassifier {
    scale: RadiusScale,
}

impl MagnitudeClassifier {
    /// Creates a classifier using `scale` for radii.
    pub fn new(scale: RadiusScale) -> Self {
        Self { scale }
    }

    /// Radius scale in use.
    pub fn scale(&self) -> RadiusScale {
        self.scale
    }

    /// Bucket for `mag`.
    pub fn bucket(&self, mag: Option<f64>) -> MagnitudeBucket {
        classify(mag)
    }

    /// Fill color for `mag`.
    pub fn color(&self, mag: Option<f64>) -> &'static str {
        color(mag)
    }

    /// Radius for `mag` in this classifier's scale.
    pub fn radius(&self, mag: Option<f64>) -> f64 {
        radius(mag, self.scale)
    }
}
