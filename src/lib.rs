//! Geographic radius clustering.
//!
//! `geoclump` groups latitude/longitude points into single-link clusters: two
//! points share a cluster iff a chain of hops, each at most a given number of
//! great-circle kilometres, joins them. It then ranks clusters by size with
//! their mean centers.
//!
//! The primary public API:
//! - [`GeoClusters`]: cluster, summarize and rank in one call
//! - [`cluster`]: the strategies (DBSCAN over an R-tree, union-find fallback)
//!   and the aggregation step
//!
//! ```rust
//! use geoclump::{GeoClusters, GeoPoint};
//!
//! let points = vec![
//!     GeoPoint::new(0.0, 0.0),
//!     GeoPoint::new(0.0, 0.001),
//!     GeoPoint::new(10.0, 10.0),
//! ];
//! let run = GeoClusters::new(1.0);
//! let report = run.run(&points).unwrap();
//! let rows = run.table(&report);
//! assert_eq!(rows[0].count, 2);
//! assert_eq!(rows[1].count, 1);
//! ```
//!
//! ## Features
//!
//! - **`accelerated`** (default): R-tree backed DBSCAN strategy via `rstar`.
//!   Without it every run uses the union-find strategy.
//! - **`serde`**: `Serialize`/`Deserialize` for points, summaries and settings.

#![forbid(unsafe_code)]

pub mod cluster;
pub mod error;
pub mod geo;
pub mod report;

pub use cluster::{
    AcceleratedClusterer, ClusterSummary, FallbackClusterer, Method, Partition, RadiusClusterer,
    RadiusClustering, RankedCluster, Strategy,
};
#[cfg(feature = "accelerated")]
pub use cluster::{Dbscan, DbscanExt, NOISE};
pub use error::{Error, Result};
pub use geo::{collect_valid, haversine_km, GeoPoint, EARTH_RADIUS_KM};
pub use report::{ClusterReport, GeoClusters};
