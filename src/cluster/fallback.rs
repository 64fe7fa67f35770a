//! Dependency-free single-link clustering: union-find over window-pruned pairs.
//!
//! Every unordered pair `(i, j)` is considered, but most are rejected by a
//! cheap coordinate-window check before the haversine formula runs:
//!
//! 1. **Latitude window**: `max(0.005°, 1.8 · r / 111)`. A great circle of
//!    length `r` cannot change latitude by more than `r / 111.19` degrees.
//! 2. **Longitude window**: `lat_window / max(0.1, cos(lat_i))`, widened to the
//!    exact haversine bound where that heuristic would be too tight (near the
//!    poles) and measured the short way across the antimeridian.
//!
//! Pairs surviving both checks are tested exactly and merged when within the
//! radius. Labels are dense and numbered by the first point of each set.
//!
//! The window is the only pruning. When points share a latitude band around
//! the globe, or all sit within one radius of each other, the search degrades
//! to O(n²) exact distance evaluations.

use super::traits::{Method, RadiusClustering};
use super::util::{self, UnionFind};
use crate::error::Result;
use crate::geo::{haversine_km, GeoPoint, EARTH_RADIUS_KM};

/// Kilometres per degree of latitude used to size the latitude window.
pub const KM_PER_DEGREE: f64 = 111.0;

const MIN_LAT_WINDOW_DEG: f64 = 0.005;
const LAT_WINDOW_MARGIN: f64 = 1.8;
const MIN_COS_LAT: f64 = 0.1;

/// Admissible pre-check for "could these two points be within `radius_km`".
///
/// Never rejects a pair whose haversine distance is `<= radius_km`.
#[derive(Debug, Clone, Copy)]
pub struct CandidateWindow {
    lat_deg: f64,
    // sin(r / 2R), or None once the radius covers half the globe.
    half_chord: Option<f64>,
}

impl CandidateWindow {
    /// Build the window for a clustering radius in kilometres.
    pub fn new(radius_km: f64) -> Self {
        let lat_deg = MIN_LAT_WINDOW_DEG.max(LAT_WINDOW_MARGIN * radius_km / KM_PER_DEGREE);
        let angle = radius_km / EARTH_RADIUS_KM;
        let half_chord = (angle < std::f64::consts::PI).then(|| (angle / 2.0).sin());
        Self {
            lat_deg,
            half_chord,
        }
    }

    /// Maximum latitude difference in degrees.
    pub fn lat_window(&self) -> f64 {
        self.lat_deg
    }

    /// Maximum wrapped longitude difference in degrees for pairs anchored at
    /// latitude `lat`. `f64::INFINITY` disables the longitude check.
    pub fn lon_window(&self, lat: f64) -> f64 {
        let heuristic = self.lat_deg / MIN_COS_LAT.max(lat.to_radians().cos());

        // Both points lie inside this band once the latitude check passes.
        let band_edge = lat.abs() + self.lat_deg;
        let Some(half_chord) = self.half_chord else {
            return f64::INFINITY;
        };
        if band_edge >= 90.0 {
            return f64::INFINITY;
        }
        let ratio = half_chord / band_edge.to_radians().cos();
        if ratio >= 1.0 {
            return f64::INFINITY;
        }
        let exact = 2.0 * ratio.asin().to_degrees() * (1.0 + 1e-9) + 1e-12;
        heuristic.max(exact)
    }

    /// Whether `(a, b)` survives the window, given `a`'s longitude window.
    #[inline]
    pub fn admits_with(&self, a: &GeoPoint, b: &GeoPoint, lon_window: f64) -> bool {
        (a.lat - b.lat).abs() <= self.lat_deg && lon_delta(a.lon, b.lon) <= lon_window
    }

    /// Whether `(a, b)` survives the window.
    pub fn admits(&self, a: &GeoPoint, b: &GeoPoint) -> bool {
        self.admits_with(a, b, self.lon_window(a.lat))
    }
}

/// Longitude difference in degrees, the short way round.
#[inline]
fn lon_delta(a: f64, b: f64) -> f64 {
    let d = (a - b).abs();
    if d > 180.0 {
        360.0 - d
    } else {
        d
    }
}

/// Union-find single-link clusterer. Always available.
#[derive(Debug, Clone, Copy, Default)]
pub struct FallbackClusterer;

impl FallbackClusterer {
    /// Create the clusterer.
    pub fn new() -> Self {
        Self
    }
}

impl RadiusClustering for FallbackClusterer {
    fn method(&self) -> Method {
        Method::Fallback
    }

    fn probe(&self, _points: &[GeoPoint]) -> Result<()> {
        Ok(())
    }

    fn labels(&self, points: &[GeoPoint], radius_km: f64) -> Result<Vec<usize>> {
        util::check_radius(radius_km)?;

        let n = points.len();
        let window = CandidateWindow::new(radius_km);
        let mut forest = UnionFind::new(n);
        let mut exact = 0usize;

        for (i, a) in points.iter().enumerate() {
            let lon_window = window.lon_window(a.lat);
            for (j, b) in points.iter().enumerate().skip(i + 1) {
                if !window.admits_with(a, b, lon_window) {
                    continue;
                }
                exact += 1;
                if haversine_km(a, b) <= radius_km {
                    forest.union(i, j);
                }
            }
        }

        let labels = forest.into_labels();
        log::trace!(
            "union-find: {} points, {} exact comparisons, {} clusters",
            n,
            exact,
            labels.iter().max().map_or(0, |m| m + 1)
        );
        Ok(labels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pts(raw: &[(f64, f64)]) -> Vec<GeoPoint> {
        raw.iter().copied().map(GeoPoint::from).collect()
    }

    #[test]
    fn lat_window_has_floor() {
        assert_eq!(CandidateWindow::new(0.0).lat_window(), 0.005);
        let w = CandidateWindow::new(2.0).lat_window();
        assert!((w - 1.8 * 2.0 / 111.0).abs() < 1e-12);
    }

    #[test]
    fn lon_window_matches_heuristic_at_low_latitude() {
        let window = CandidateWindow::new(2.0);
        let w = window.lon_window(0.0);
        assert!((w - window.lat_window()).abs() < 1e-12);
        assert!(window.lon_window(60.0) > window.lon_window(0.0));
    }

    #[test]
    fn lon_window_opens_near_pole() {
        let window = CandidateWindow::new(2.5);
        assert_eq!(window.lon_window(89.99), f64::INFINITY);
        let a = GeoPoint::new(89.99, 0.0);
        let b = GeoPoint::new(89.99, 180.0);
        assert!(haversine_km(&a, &b) <= 2.5);
        assert!(window.admits(&a, &b));
    }

    #[test]
    fn window_rejects_far_pairs() {
        let window = CandidateWindow::new(1.0);
        assert!(!window.admits(&GeoPoint::new(0.0, 0.0), &GeoPoint::new(10.0, 10.0)));
        assert!(!window.admits(&GeoPoint::new(0.0, 0.0), &GeoPoint::new(0.0, 1.0)));
        assert!(window.admits(&GeoPoint::new(0.0, 179.9999), &GeoPoint::new(0.0, -179.9999)));
    }

    #[test]
    fn clusters_concrete_scenario() {
        let data = pts(&[(0.0, 0.0), (0.0, 0.001), (10.0, 10.0)]);
        let labels = FallbackClusterer.labels(&data, 1.0).unwrap();
        assert_eq!(labels, vec![0, 0, 1]);
    }

    #[test]
    fn chain_links_transitively() {
        // Endpoints are ~2 km apart; every hop is ~0.33 km.
        let data: Vec<GeoPoint> = (0..7).map(|i| GeoPoint::new(0.0, i as f64 * 0.003)).collect();
        let labels = FallbackClusterer.labels(&data, 0.5).unwrap();
        assert!(labels.iter().all(|&l| l == 0));
    }

    #[test]
    fn labels_follow_first_encounter() {
        let data = pts(&[(50.0, 8.0), (10.0, 10.0), (50.0, 8.0001), (10.0, 10.0001)]);
        let labels = FallbackClusterer.labels(&data, 1.0).unwrap();
        assert_eq!(labels, vec![0, 1, 0, 1]);
    }

    #[test]
    fn zero_radius_merges_only_coincident_points() {
        let data = pts(&[(1.0, 1.0), (1.0, 1.0), (1.0, 1.00009)]);
        let labels = FallbackClusterer.labels(&data, 0.0).unwrap();
        assert_eq!(labels, vec![0, 0, 1]);
    }

    #[test]
    fn empty_input_is_not_an_error() {
        assert!(FallbackClusterer.labels(&[], 2.0).unwrap().is_empty());
    }

    #[test]
    fn rejects_negative_radius() {
        assert!(FallbackClusterer.labels(&pts(&[(0.0, 0.0)]), -1.0).is_err());
    }
}
