//! DBSCAN over latitude/longitude points with the haversine metric.
//!
//! # The Algorithm (Ester et al., 1996)
//!
//! DBSCAN groups points by neighborhood density:
//!
//! - **Epsilon (ε)**: maximum great-circle distance between two neighbors.
//! - **MinPts**: minimum neighborhood size (including the point itself) for a
//!   point to be "core".
//! - **Core point**: has at least MinPts points within ε.
//! - **Border point**: within ε of a core point but not core itself.
//! - **Noise point**: neither core nor border.
//!
//! ## Single-link degeneration
//!
//! With `min_pts = 1` every point is core, so expansion follows every
//! ε-edge and the clusters are exactly the connected components of the
//! "distance <= ε" graph: single-link clustering cut at ε. No point is noise.
//!
//! ## Neighborhood queries
//!
//! Points are embedded on the unit sphere and stored in an R-tree. An angular
//! radius `θ` corresponds to a chord of length `2·sin(θ/2)`, so a Euclidean
//! range query returns a superset of the great-circle neighborhood (the chord
//! bound is slightly inflated against rounding). Every candidate is then
//! confirmed with [`haversine_km`], the same test the union-find strategy uses.
//!
//! ## Complexity
//!
//! - **Time**: O(n log n + E) for E neighbor pairs; O(n²) when every point
//!   neighbors every other.
//! - **Space**: O(n) for the index and labels.
//!
//! ## References
//!
//! Ester et al. (1996). "A Density-Based Algorithm for Discovering Clusters
//! in Large Spatial Databases with Noise." KDD-96.

use rstar::primitives::GeomWithData;
use rstar::RTree;

use super::util;
use crate::error::{Error, Result};
use crate::geo::{haversine_km, GeoPoint, EARTH_RADIUS_KM};

/// DBSCAN clustering with a great-circle neighborhood.
#[derive(Debug, Clone)]
pub struct Dbscan {
    /// Neighborhood radius in kilometres.
    radius_km: f64,
    /// Minimum points for core point classification.
    min_pts: usize,
}

/// Sentinel noise label, see [`DbscanExt::is_noise`].
pub const NOISE: usize = usize::MAX;

// Internal label encoding.
// - UNCLASSIFIED: never assigned yet
// - NOISE_LABEL: visited, but not density-reachable from any core point (may be promoted later)
const UNCLASSIFIED: isize = -2;
const NOISE_LABEL: isize = -1;

type IndexedPoint = GeomWithData<[f64; 3], usize>;

/// R-tree over unit-sphere embeddings of the input points.
struct SphereIndex {
    tree: RTree<IndexedPoint>,
    coords: Vec<[f64; 3]>,
    max_chord_sq: f64,
}

impl SphereIndex {
    fn build(points: &[GeoPoint], epsilon: f64) -> Self {
        let coords: Vec<[f64; 3]> = points.iter().map(unit_vector).collect();
        let tree = RTree::bulk_load(
            coords
                .iter()
                .enumerate()
                .map(|(i, c)| IndexedPoint::new(*c, i))
                .collect(),
        );
        Self {
            tree,
            coords,
            max_chord_sq: chord_sq_bound(epsilon),
        }
    }

    fn candidates(&self, idx: usize) -> impl Iterator<Item = usize> + '_ {
        self.tree
            .locate_within_distance(self.coords[idx], self.max_chord_sq)
            .map(|p| p.data)
    }
}

fn unit_vector(p: &GeoPoint) -> [f64; 3] {
    let (lat, lon) = (p.lat.to_radians(), p.lon.to_radians());
    [lat.cos() * lon.cos(), lat.cos() * lon.sin(), lat.sin()]
}

/// Squared chord length for angular radius `epsilon`, inflated so the range
/// query never drops a true neighbor to rounding.
fn chord_sq_bound(epsilon: f64) -> f64 {
    if epsilon >= std::f64::consts::PI {
        return 4.0 + 1e-9;
    }
    let chord = 2.0 * (epsilon / 2.0).sin();
    chord * chord * (1.0 + 1e-9) + 1e-12
}

impl Dbscan {
    /// Create a new DBSCAN clusterer.
    ///
    /// # Arguments
    ///
    /// * `radius_km` - Maximum great-circle distance between two neighbors.
    /// * `min_pts` - Minimum neighborhood size (self included) for a core point.
    pub fn new(radius_km: f64, min_pts: usize) -> Self {
        Self { radius_km, min_pts }
    }

    /// Set the neighborhood radius in kilometres.
    pub fn with_radius_km(mut self, radius_km: f64) -> Self {
        self.radius_km = radius_km;
        self
    }

    /// Set minimum points for core classification.
    pub fn with_min_pts(mut self, min_pts: usize) -> Self {
        self.min_pts = min_pts;
        self
    }

    /// Angular neighborhood radius in radians.
    pub fn epsilon(&self) -> f64 {
        self.radius_km / EARTH_RADIUS_KM
    }

    /// Fit and return one label per point; noise points share one extra
    /// trailing label so the result is always a partition.
    pub fn fit_predict(&self, points: &[GeoPoint]) -> Result<Vec<usize>> {
        let (labels, n_clusters) = self.run(points)?;
        Ok(labels
            .into_iter()
            .map(|l| if l >= 0 { l as usize } else { n_clusters })
            .collect())
    }

    fn validate(&self, points: &[GeoPoint]) -> Result<()> {
        if points.is_empty() {
            return Err(Error::EmptyInput);
        }
        util::check_radius(self.radius_km)?;
        if self.min_pts == 0 {
            return Err(Error::InvalidParameter {
                name: "min_pts",
                message: "must be at least 1",
            });
        }
        if let Some(p) = points.iter().find(|p| !p.is_finite()) {
            return Err(Error::InvalidCoordinate {
                lat: p.lat,
                lon: p.lon,
            });
        }
        Ok(())
    }

    /// Find all neighbors within the radius, excluding the point itself.
    fn region_query(&self, index: &SphereIndex, points: &[GeoPoint], idx: usize) -> Vec<usize> {
        let point = &points[idx];
        index
            .candidates(idx)
            .filter(|&other| {
                other != idx && haversine_km(point, &points[other]) <= self.radius_km
            })
            .collect()
    }

    /// Expand cluster from a core point.
    fn expand_cluster(
        &self,
        index: &SphereIndex,
        points: &[GeoPoint],
        point_idx: usize,
        neighbors: Vec<usize>,
        labels: &mut [isize],
        cluster_id: isize,
        visited: &mut [bool],
    ) {
        labels[point_idx] = cluster_id;

        // Iterative expansion; chains of thousands of points are common.
        let mut to_process = neighbors;

        while let Some(neighbor_idx) = to_process.pop() {
            // A point previously labeled noise can still become a border point,
            // so label before the visited check.
            if labels[neighbor_idx] == UNCLASSIFIED || labels[neighbor_idx] == NOISE_LABEL {
                labels[neighbor_idx] = cluster_id;
            }

            if visited[neighbor_idx] {
                continue;
            }
            visited[neighbor_idx] = true;

            let neighbor_neighbors = self.region_query(index, points, neighbor_idx);

            // MinPts includes the point itself
            if neighbor_neighbors.len() + 1 >= self.min_pts {
                to_process.extend(neighbor_neighbors.into_iter().filter(|&nn| !visited[nn]));
            }
        }
    }

    /// Internal labels (negative = noise) and the number of clusters found.
    ///
    /// Cluster ids follow the index of the first point that seeds each cluster.
    fn run(&self, points: &[GeoPoint]) -> Result<(Vec<isize>, usize)> {
        self.validate(points)?;

        let n = points.len();
        let index = SphereIndex::build(points, self.epsilon());
        let mut labels = vec![UNCLASSIFIED; n];
        let mut visited = vec![false; n];
        let mut cluster_id: isize = 0;

        for point_idx in 0..n {
            if visited[point_idx] {
                continue;
            }
            visited[point_idx] = true;

            let neighbors = self.region_query(&index, points, point_idx);

            if neighbors.len() + 1 < self.min_pts {
                // Not enough neighbors: mark as noise (might be border later)
                labels[point_idx] = NOISE_LABEL;
                continue;
            }

            self.expand_cluster(
                &index,
                points,
                point_idx,
                neighbors,
                &mut labels,
                cluster_id,
                &mut visited,
            );
            cluster_id += 1;
        }

        log::trace!(
            "dbscan: {} points, {} clusters (radius {} km, min_pts {})",
            n,
            cluster_id,
            self.radius_km,
            self.min_pts
        );
        Ok((labels, cluster_id as usize))
    }
}

impl Default for Dbscan {
    fn default() -> Self {
        Self::new(2.0, 1)
    }
}

/// Extended DBSCAN interface with noise detection.
pub trait DbscanExt {
    /// Fit and predict, returning labels where noise is marked as `None`.
    fn fit_predict_with_noise(&self, points: &[GeoPoint]) -> Result<Vec<Option<usize>>>;

    /// Check if a label represents noise.
    fn is_noise(label: usize) -> bool {
        label == NOISE
    }
}

impl DbscanExt for Dbscan {
    fn fit_predict_with_noise(&self, points: &[GeoPoint]) -> Result<Vec<Option<usize>>> {
        let (labels, _) = self.run(points)?;
        Ok(labels
            .into_iter()
            .map(|l| if l >= 0 { Some(l as usize) } else { None })
            .collect())
    }
}
