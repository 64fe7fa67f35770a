//! End-to-end run: cluster, summarize, rank.

use crate::cluster::{summarize, ClusterSummary, Method, RadiusClusterer, RankedCluster, Strategy};
use crate::error::Result;
use crate::geo::GeoPoint;

/// Parameters for a geolocation clustering run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GeoClusters {
    /// Linking radius in kilometres.
    pub radius_km: f64,
    /// Rows kept in the display table (`None` keeps all).
    pub top_n: Option<usize>,
    /// Decimal places for displayed centers.
    pub decimals: u32,
    /// Strategy selection.
    pub strategy: Strategy,
}

impl Default for GeoClusters {
    fn default() -> Self {
        Self {
            radius_km: 2.0,
            top_n: Some(50),
            decimals: 5,
            strategy: Strategy::Auto,
        }
    }
}

impl GeoClusters {
    /// Create a run with the given radius and default presentation settings.
    pub fn new(radius_km: f64) -> Self {
        Self {
            radius_km,
            ..Self::default()
        }
    }

    /// Set how many rows the display table keeps.
    pub fn with_top_n(mut self, top_n: Option<usize>) -> Self {
        self.top_n = top_n;
        self
    }

    /// Set decimal places for displayed centers.
    pub fn with_decimals(mut self, decimals: u32) -> Self {
        self.decimals = decimals;
        self
    }

    /// Pin the clustering strategy.
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Cluster `points` and summarize every cluster.
    pub fn run(&self, points: &[GeoPoint]) -> Result<ClusterReport> {
        let partition = RadiusClusterer::new()
            .with_strategy(self.strategy)
            .cluster(points, self.radius_km)?;
        let clusters = summarize(points, &partition.labels)?;
        log::debug!(
            "clustered {} points into {} clusters within {} km ({})",
            points.len(),
            clusters.len(),
            self.radius_km,
            partition.method
        );
        Ok(ClusterReport {
            method: partition.method,
            radius_km: self.radius_km,
            clusters,
        })
    }

    /// Display rows for `report` using this run's `top_n` and `decimals`.
    pub fn table(&self, report: &ClusterReport) -> Vec<RankedCluster> {
        report.ranked(self.top_n, self.decimals)
    }
}

/// Result of [`GeoClusters::run`].
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterReport {
    /// Strategy that produced the partition.
    pub method: Method,
    /// Radius the partition was computed with.
    pub radius_km: f64,
    /// Every cluster, unrounded, largest first.
    pub clusters: Vec<ClusterSummary>,
}

impl ClusterReport {
    /// Total number of clustered points.
    pub fn n_points(&self) -> usize {
        self.clusters.iter().map(|c| c.count).sum()
    }

    /// Display copy: first `top_n` clusters with centers rounded to `decimals`.
    pub fn ranked(&self, top_n: Option<usize>, decimals: u32) -> Vec<RankedCluster> {
        crate::cluster::rank(&self.clusters, top_n, decimals)
    }

    /// Table caption, e.g. `Geo clusters within 2 km — Chat (union-find single-link)`.
    pub fn title(&self, chat_name: &str) -> String {
        format!(
            "Geo clusters within {:.0} km — {} ({})",
            self.radius_km, chat_name, self.method
        )
        .trim()
        .to_string()
    }
}
