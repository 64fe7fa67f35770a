//! Single-link radius clustering of geographic points.
//!
//! Two points belong to the same cluster iff a chain of points connects them
//! in which every hop is at most `radius_km` great-circle kilometres. This is
//! the transitive closure of the proximity graph, so the result does not
//! depend on input order (only label numbering does).
//!
//! ## Strategies
//!
//! ### Accelerated (DBSCAN)
//!
//! DBSCAN with `min_pts = 1` and the haversine metric. Every point is core, so
//! density expansion degenerates into exact single-link clustering.
//! Neighborhoods come from an R-tree, so sparse data avoids the quadratic scan.
//! Requires the `accelerated` feature.
//!
//! ### Fallback (union-find)
//!
//! A disjoint-set forest over all pairs, with a latitude/longitude window
//! rejecting most pairs before the exact haversine test. Worst case O(n²).
//!
//! Both strategies make the final "within radius" decision with the same
//! [`haversine_km`](crate::geo::haversine_km) comparison, so they produce the
//! same partition.
//!
//! ## Usage
//!
//! ```rust
//! use geoclump::cluster::{canonical_partition, summarize, FallbackClusterer, RadiusClustering};
//! use geoclump::GeoPoint;
//!
//! let points = vec![
//!     GeoPoint::new(48.8584, 2.2945),
//!     GeoPoint::new(48.8606, 2.3376),
//!     GeoPoint::new(51.5007, -0.1246),
//! ];
//!
//! // The two Paris landmarks are ~3.2 km apart.
//! let labels = FallbackClusterer.labels(&points, 5.0).unwrap();
//! assert_eq!(canonical_partition(&labels), vec![0, 0, 2]);
//!
//! let summaries = summarize(&points, &labels).unwrap();
//! assert_eq!(summaries[0].count, 2);
//! ```

mod accelerated;
#[cfg(feature = "accelerated")]
mod dbscan;
mod fallback;
mod radius;
mod summary;
mod traits;
mod util;

pub use accelerated::AcceleratedClusterer;
#[cfg(feature = "accelerated")]
pub use dbscan::{Dbscan, DbscanExt, NOISE};
pub use fallback::{CandidateWindow, FallbackClusterer, KM_PER_DEGREE};
pub use radius::{Partition, RadiusClusterer, Strategy};
pub use summary::{rank, summarize, ClusterSummary, RankedCluster};
pub use traits::{Method, RadiusClustering};
pub use util::canonical_partition;
