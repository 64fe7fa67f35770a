use std::fmt;

use crate::error::Result;
use crate::geo::GeoPoint;

/// Which strategy produced a partition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Method {
    /// Density clustering (DBSCAN, `min_pts = 1`) over an R-tree.
    Accelerated,
    /// Union-find over window-pruned candidate pairs.
    Fallback,
}

impl Method {
    /// Human-readable name, stable across releases.
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Accelerated => "dbscan (haversine, r-tree)",
            Method::Fallback => "union-find single-link",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Common interface for single-link radius clustering of geographic points.
///
/// Implementations must produce the same partition for the same input: two
/// points share a label iff a chain of hops, each no longer than `radius_km`
/// great-circle kilometres, connects them. Label numbering may differ.
pub trait RadiusClustering {
    /// The method tag reported alongside the labels.
    fn method(&self) -> Method;

    /// Check whether this strategy can run on `points` in the current build.
    fn probe(&self, points: &[GeoPoint]) -> Result<()>;

    /// Return one label per point.
    ///
    /// `radius_km` must be finite and non-negative; zero merges only
    /// coincident points.
    fn labels(&self, points: &[GeoPoint], radius_km: f64) -> Result<Vec<usize>>;
}
