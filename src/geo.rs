//! Geographic points and the great-circle metric shared by every strategy.

use crate::error::{Error, Result};

/// Mean Earth radius in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A latitude/longitude pair in degrees.
///
/// Position in the input slice is the point's identity; there is no separate id.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoPoint {
    /// Latitude in degrees, `[-90, 90]`.
    pub lat: f64,
    /// Longitude in degrees, `[-180, 180]`.
    pub lon: f64,
}

impl GeoPoint {
    /// Create a point without range checks.
    ///
    /// The engine trusts its callers to have filtered coordinates; use
    /// [`GeoPoint::try_new`] or [`collect_valid`] when the source is untrusted.
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Create a point, rejecting non-finite or out-of-range coordinates.
    pub fn try_new(lat: f64, lon: f64) -> Result<Self> {
        if lat.is_finite()
            && lon.is_finite()
            && (-90.0..=90.0).contains(&lat)
            && (-180.0..=180.0).contains(&lon)
        {
            Ok(Self { lat, lon })
        } else {
            Err(Error::InvalidCoordinate { lat, lon })
        }
    }

    /// Whether both coordinates are finite numbers.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lon.is_finite()
    }
}

impl From<(f64, f64)> for GeoPoint {
    fn from((lat, lon): (f64, f64)) -> Self {
        Self::new(lat, lon)
    }
}

/// Keep only the valid `(lat, lon)` pairs, preserving their order.
///
/// Invalid pairs are dropped silently, matching how message geotags are
/// filtered before clustering.
pub fn collect_valid<I>(pairs: I) -> Vec<GeoPoint>
where
    I: IntoIterator<Item = (f64, f64)>,
{
    pairs
        .into_iter()
        .filter_map(|(lat, lon)| GeoPoint::try_new(lat, lon).ok())
        .collect()
}

/// Great-circle distance in kilometres on a sphere of radius [`EARTH_RADIUS_KM`].
///
/// Symmetric bit-for-bit: `haversine_km(a, b) == haversine_km(b, a)`, so two
/// strategies visiting a pair in different orders reach the same verdict.
#[inline]
pub fn haversine_km(a: &GeoPoint, b: &GeoPoint) -> f64 {
    let dlat = (b.lat - a.lat).abs().to_radians();
    let dlon = (b.lon - a.lon).abs().to_radians();
    let h = (dlat / 2.0).sin().powi(2)
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * (dlon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * h.sqrt().min(1.0).asin()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn haversine_small_offset() {
        let a = GeoPoint::new(0.0, 0.0);
        let b = GeoPoint::new(0.0, 0.001);
        let d = haversine_km(&a, &b);
        assert!((d - 0.1112).abs() < 1e-3, "got {d}");
    }

    #[test]
    fn haversine_is_symmetric_and_zero_on_identity() {
        let a = GeoPoint::new(52.52, 13.405);
        let b = GeoPoint::new(48.8566, 2.3522);
        assert_eq!(haversine_km(&a, &b), haversine_km(&b, &a));
        assert_eq!(haversine_km(&a, &a), 0.0);
        // Berlin to Paris is roughly 878 km.
        assert!((haversine_km(&a, &b) - 878.0).abs() < 5.0);
    }

    #[test]
    fn haversine_wraps_antimeridian() {
        let a = GeoPoint::new(0.0, 179.9995);
        let b = GeoPoint::new(0.0, -179.9995);
        assert!(haversine_km(&a, &b) < 0.12);
    }

    #[test]
    fn try_new_rejects_out_of_range() {
        assert!(GeoPoint::try_new(90.0, 180.0).is_ok());
        assert!(GeoPoint::try_new(90.1, 0.0).is_err());
        assert!(GeoPoint::try_new(0.0, -180.5).is_err());
        assert!(GeoPoint::try_new(f64::NAN, 0.0).is_err());
    }

    #[test]
    fn collect_valid_keeps_order() {
        let pts = collect_valid(vec![(1.0, 2.0), (100.0, 0.0), (3.0, 4.0), (0.0, f64::INFINITY)]);
        assert_eq!(pts, vec![GeoPoint::new(1.0, 2.0), GeoPoint::new(3.0, 4.0)]);
    }
}
