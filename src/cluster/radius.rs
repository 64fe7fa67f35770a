//! Strategy selection for single-link radius clustering.

use super::accelerated::AcceleratedClusterer;
use super::fallback::FallbackClusterer;
use super::traits::{Method, RadiusClustering};
use crate::error::{Error, Result};
use crate::geo::GeoPoint;

/// Which clustering strategy [`RadiusClusterer`] runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Strategy {
    /// Accelerated when its probe passes, otherwise fallback. Failures of the
    /// accelerated run are retried once with the fallback and never reported.
    #[default]
    Auto,
    /// Accelerated only; its errors are returned.
    Accelerated,
    /// Fallback only.
    Fallback,
}

/// Labels plus the strategy that produced them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partition {
    /// One label per input point, dense in `0..k`.
    pub labels: Vec<usize>,
    /// Strategy that computed `labels`.
    pub method: Method,
}

impl Partition {
    /// Number of clusters.
    pub fn n_clusters(&self) -> usize {
        self.labels.iter().max().map_or(0, |m| m + 1)
    }
}

/// Single-link radius clustering with automatic strategy selection.
///
/// ```rust
/// use geoclump::{GeoPoint, RadiusClusterer};
///
/// let points = vec![
///     GeoPoint::new(0.0, 0.0),
///     GeoPoint::new(0.0, 0.001),
///     GeoPoint::new(10.0, 10.0),
/// ];
/// let partition = RadiusClusterer::new().cluster(&points, 1.0).unwrap();
/// assert_eq!(partition.labels, vec![0, 0, 1]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct RadiusClusterer<A = AcceleratedClusterer, F = FallbackClusterer> {
    strategy: Strategy,
    accelerated: A,
    fallback: F,
}

impl RadiusClusterer {
    /// Create a clusterer with [`Strategy::Auto`].
    pub fn new() -> Self {
        Self::default()
    }
}

impl<A: RadiusClustering, F: RadiusClustering> RadiusClusterer<A, F> {
    /// Pin the strategy.
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Replace the strategy tried first.
    pub fn with_accelerated<B: RadiusClustering>(self, accelerated: B) -> RadiusClusterer<B, F> {
        RadiusClusterer {
            strategy: self.strategy,
            accelerated,
            fallback: self.fallback,
        }
    }

    /// Replace the strategy used when the first one is unavailable or fails.
    pub fn with_fallback<B: RadiusClustering>(self, fallback: B) -> RadiusClusterer<A, B> {
        RadiusClusterer {
            strategy: self.strategy,
            accelerated: self.accelerated,
            fallback,
        }
    }

    /// The configured strategy.
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Decide which strategy runs first for `points`.
    pub fn select(&self, points: &[GeoPoint]) -> Method {
        if self.use_accelerated(points) {
            self.accelerated.method()
        } else {
            self.fallback.method()
        }
    }

    fn use_accelerated(&self, points: &[GeoPoint]) -> bool {
        match self.strategy {
            Strategy::Accelerated => true,
            Strategy::Fallback => false,
            Strategy::Auto => match self.accelerated.probe(points) {
                Ok(()) => true,
                Err(e) => {
                    log::debug!("accelerated clustering unavailable ({e}); using fallback");
                    false
                }
            },
        }
    }

    /// Cluster `points` so that two points share a label iff they are joined
    /// by hops of at most `radius_km` great-circle kilometres.
    ///
    /// Empty input yields empty labels. `radius_km` must be positive and finite.
    pub fn cluster(&self, points: &[GeoPoint], radius_km: f64) -> Result<Partition> {
        if !(radius_km.is_finite() && radius_km > 0.0) {
            return Err(Error::InvalidParameter {
                name: "radius_km",
                message: "must be positive and finite",
            });
        }

        if self.use_accelerated(points) {
            match self.accelerated.labels(points, radius_km) {
                Ok(labels) => {
                    return Ok(Partition {
                        labels,
                        method: self.accelerated.method(),
                    })
                }
                Err(e) if self.strategy == Strategy::Auto => {
                    log::debug!("accelerated clustering failed ({e}); retrying with fallback");
                }
                Err(e) => return Err(e),
            }
        }

        Ok(Partition {
            labels: self.fallback.labels(points, radius_km)?,
            method: self.fallback.method(),
        })
    }
}
