//! Single-link clustering by way of DBSCAN.
//!
//! DBSCAN with `min_pts = 1` and the haversine metric is exactly single-link
//! clustering cut at the neighborhood radius: every point is core, so cluster
//! expansion walks the whole connected component of the "distance <= r"
//! graph. Any replacement routine must keep that equivalence.

use super::traits::{Method, RadiusClustering};
use super::util;
use crate::error::{Error, Result};
use crate::geo::GeoPoint;

const UNAVAILABLE: &str = "built without the `accelerated` feature";

/// DBSCAN-backed clusterer. Requires the `accelerated` feature.
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceleratedClusterer;

impl AcceleratedClusterer {
    /// Create the clusterer.
    pub fn new() -> Self {
        Self
    }

    /// Whether the density routine is compiled into this build.
    pub const fn compiled() -> bool {
        cfg!(feature = "accelerated")
    }
}

impl RadiusClustering for AcceleratedClusterer {
    fn method(&self) -> Method {
        Method::Accelerated
    }

    fn probe(&self, points: &[GeoPoint]) -> Result<()> {
        if !Self::compiled() {
            return Err(Error::Unavailable(UNAVAILABLE));
        }
        // The spatial index cannot place NaN or infinite coordinates.
        if points.iter().any(|p| !p.is_finite()) {
            return Err(Error::Unavailable("non-finite coordinate in input"));
        }
        Ok(())
    }

    fn labels(&self, points: &[GeoPoint], radius_km: f64) -> Result<Vec<usize>> {
        util::check_radius(radius_km)?;
        self.probe(points)?;
        if points.is_empty() {
            return Ok(Vec::new());
        }
        single_link(points, radius_km)
    }
}

#[cfg(feature = "accelerated")]
fn single_link(points: &[GeoPoint], radius_km: f64) -> Result<Vec<usize>> {
    super::dbscan::Dbscan::new(radius_km, 1).fit_predict(points)
}

#[cfg(not(feature = "accelerated"))]
fn single_link(_points: &[GeoPoint], _radius_km: f64) -> Result<Vec<usize>> {
    Err(Error::Unavailable(UNAVAILABLE))
}

#[cfg(all(test, feature = "accelerated"))]
mod tests {
    use super::*;

    #[test]
    fn clusters_concrete_scenario() {
        let data: Vec<GeoPoint> = vec![(0.0, 0.0), (0.0, 0.001), (10.0, 10.0)]
            .into_iter()
            .map(GeoPoint::from)
            .collect();
        let labels = AcceleratedClusterer.labels(&data, 1.0).unwrap();
        assert_eq!(labels, vec![0, 0, 1]);
    }

    #[test]
    fn probe_rejects_non_finite() {
        let data = vec![GeoPoint::new(0.0, f64::NAN)];
        assert!(matches!(
            AcceleratedClusterer.probe(&data),
            Err(Error::Unavailable(_))
        ));
        assert!(AcceleratedClusterer.probe(&[GeoPoint::new(1.0, 2.0)]).is_ok());
    }

    #[test]
    fn empty_input_is_not_an_error() {
        assert!(AcceleratedClusterer.labels(&[], 2.0).unwrap().is_empty());
    }
}
