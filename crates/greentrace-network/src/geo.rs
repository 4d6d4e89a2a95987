//! Geographic positions on a flat latitude/longitude plane.
//!
//! Distances are planar Euclidean over raw degrees. There is no geodesic
//! correction: at city scale the error is irrelevant for drawing map edges,
//! and the threshold is expressed in the same degree units.

use crate::error::{Error, Result};

/// Metres per degree used for display-only conversions.
pub const METERS_PER_DEGREE: f64 = 111_000.0;

/// A validated position in degrees.
///
/// Latitude is within [-90, 90] and longitude within [-180, 180]; both are
/// finite. The only way to build one is through [`GeoPoint::new`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawPoint", into = "RawPoint"))]
pub struct GeoPoint {
    latitude: f64,
    longitude: f64,
}

impl GeoPoint {
    /// Null island.
    pub const ORIGIN: Self = Self {
        latitude: 0.0,
        longitude: 0.0,
    };

    /// Create a point, rejecting non-finite or out-of-range degrees.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
        let valid = latitude.is_finite()
            && longitude.is_finite()
            && (-90.0..=90.0).contains(&latitude)
            && (-180.0..=180.0).contains(&longitude);
        if !valid {
            return Err(Error::InvalidCoordinate {
                latitude,
                longitude,
            });
        }
        // Fold -0.0 into 0.0 so equal points also have equal bit patterns.
        Ok(Self {
            latitude: latitude + 0.0,
            longitude: longitude + 0.0,
        })
    }

    /// Latitude in degrees.
    #[inline]
    pub const fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Longitude in degrees.
    #[inline]
    pub const fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Planar Euclidean distance in degrees.
    ///
    /// sqrt(dlat² + dlng²)
    pub fn distance(&self, other: &Self) -> f64 {
        let dlat = self.latitude - other.latitude;
        let dlng = self.longitude - other.longitude;
        (dlat * dlat + dlng * dlng).sqrt()
    }
}

/// Round a degree distance to whole metres for display.
pub fn degrees_to_meters(degrees: f64) -> u64 {
    (degrees * METERS_PER_DEGREE).round() as u64
}

impl std::fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.latitude, self.longitude)
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct RawPoint {
    latitude: f64,
    longitude: f64,
}

#[cfg(feature = "serde")]
impl TryFrom<RawPoint> for GeoPoint {
    type Error = Error;

    fn try_from(raw: RawPoint) -> Result<Self> {
        GeoPoint::new(raw.latitude, raw.longitude)
    }
}

#[cfg(feature = "serde")]
impl From<GeoPoint> for RawPoint {
    fn from(point: GeoPoint) -> Self {
        Self {
            latitude: point.latitude,
            longitude: point.longitude,
        }
    }
}
