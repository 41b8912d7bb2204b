//! Magnitude bucket and radius scale definitions

use std::fmt;
use std::str::FromStr;

/// Upper (inclusive) edges of the bounded buckets.
///
/// A magnitude `m` falls in the first bucket whose edge satisfies `m <= edge`.
/// Anything above the last edge lands in the open-ended top bucket.
pub const BUCKET_EDGES: [f64; 5] = [1.0, 2.0, 3.0, 4.0, 5.0];

/// Fill colors per bucket, lightest to most intense.
pub const BUCKET_COLORS: [&str; 6] = [
    "#ADFF2F", "#9ACD32", "#FFFF00", "#FFD700", "#FFA500", "#FF0000",
];

/// Radius used for zero, negative, or unknown magnitudes.
pub const MIN_RADIUS: f64 = 1.0;

/// Radius multiplier for screen-space circle markers (pixels per magnitude unit).
pub const PIXEL_SCALE_FACTOR: f64 = 3.0;

/// Radius multiplier for ground-distance circles (meters per magnitude unit).
pub const METER_SCALE_FACTOR: f64 = 30_000.0;

/// One of the six half-open magnitude intervals `(k, k+1]`.
///
/// Bucket 0 covers `(-inf, 1]` and bucket 5 covers `(5, inf)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MagnitudeBucket(u8);

impl MagnitudeBucket {
    /// Number of buckets.
    pub const COUNT: usize = BUCKET_COLORS.len();

    /// Bucket used for magnitudes at or below 1 and for unknown magnitudes.
    pub const LOWEST: MagnitudeBucket = MagnitudeBucket(0);

    /// Open-ended bucket for magnitudes above 5.
    pub const HIGHEST: MagnitudeBucket = MagnitudeBucket((Self::COUNT - 1) as u8);

    /// Returns the bucket at `index`, or `None` if out of range.
    pub fn from_index(index: usize) -> Option<Self> {
        (index < Self::COUNT).then_some(MagnitudeBucket(index as u8))
    }

    /// Position of this bucket in ascending order.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Fill color token (`#RRGGBB`).
    #[inline]
    pub fn color(self) -> &'static str {
        BUCKET_COLORS[self.index()]
    }

    /// Exclusive lower bound, `None` for the lowest bucket.
    pub fn lower_bound(self) -> Option<f64> {
        self.index().checked_sub(1).map(|i| BUCKET_EDGES[i])
    }

    /// Inclusive upper bound, `None` for the highest bucket.
    pub fn upper_bound(self) -> Option<f64> {
        BUCKET_EDGES.get(self.index()).copied()
    }

    /// Iterates all buckets in ascending order.
    pub fn all() -> impl Iterator<Item = MagnitudeBucket> {
        (0..Self::COUNT as u8).map(MagnitudeBucket)
    }
}

impl fmt::Display for MagnitudeBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.lower_bound(), self.upper_bound()) {
            (None, Some(hi)) => write!(f, "(-inf, {}]", hi),
            (Some(lo), Some(hi)) => write!(f, "({}, {}]", lo, hi),
            (Some(lo), None) => write!(f, "({}, inf)", lo),
            (None, None) => write!(f, "(-inf, inf)"),
        }
    }
}

/// Units in which marker radii are expressed.
///
/// A map uses one scale for every marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RadiusScale {
    /// Screen pixels, for fixed-size circle markers.
    Pixels,
    /// Ground meters, for geographic circles that grow with zoom.
    #[default]
    Meters,
}

impl RadiusScale {
    /// Multiplier applied to positive magnitudes.
    pub fn factor(self) -> f64 {
        match self {
            RadiusScale::Pixels => PIXEL_SCALE_FACTOR,
            RadiusScale::Meters => METER_SCALE_FACTOR,
        }
    }

    /// Config/CLI name of the scale.
    pub fn as_str(self) -> &'static str {
        match self {
            RadiusScale::Pixels => "pixels",
            RadiusScale::Meters => "meters",
        }
    }
}

impl fmt::Display for RadiusScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RadiusScale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pixels" | "px" => Ok(RadiusScale::Pixels),
            "meters" | "m" => Ok(RadiusScale::Meters),
            other => Err(format!("unknown radius scale '{}'", other)),
        }
    }
}
