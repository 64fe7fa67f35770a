//! Per-cluster counts and centroids, ranked for display.
//!
//! Centroids are the flat arithmetic mean of member latitudes and longitudes
//! in degrees. That is accurate for small clusters; clusters that straddle the
//! antimeridian or reach a pole get a centroid that may lie far from every
//! member.

use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::geo::GeoPoint;

/// Size and centroid of one cluster.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClusterSummary {
    /// Label the cluster carried in the partition.
    pub label: usize,
    /// Number of member points, at least 1.
    pub count: usize,
    /// Mean member latitude in degrees.
    pub center_lat: f64,
    /// Mean member longitude in degrees.
    pub center_lon: f64,
}

impl ClusterSummary {
    /// The centroid as a point.
    pub fn center(&self) -> GeoPoint {
        GeoPoint::new(self.center_lat, self.center_lon)
    }
}

/// One display row: 1-based rank and rounded centroid.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RankedCluster {
    /// Position in the ranking, starting at 1.
    pub rank: usize,
    /// Number of member points.
    pub count: usize,
    /// Rounded centroid latitude.
    pub center_lat: f64,
    /// Rounded centroid longitude.
    pub center_lon: f64,
}

#[derive(Default)]
struct Acc {
    count: usize,
    lat: f64,
    lon: f64,
}

/// Group `points` by `labels` and rank the groups.
///
/// Sorted by `count` descending, ties by ascending label. Both strategies
/// number clusters in order of first appearance, so ties keep discovery order.
pub fn summarize(points: &[GeoPoint], labels: &[usize]) -> Result<Vec<ClusterSummary>> {
    if points.len() != labels.len() {
        return Err(Error::LengthMismatch {
            points: points.len(),
            labels: labels.len(),
        });
    }

    let mut groups: HashMap<usize, Acc> = HashMap::new();
    for (p, &label) in points.iter().zip(labels) {
        let acc = groups.entry(label).or_default();
        acc.count += 1;
        acc.lat += p.lat;
        acc.lon += p.lon;
    }

    let mut ordered: Vec<(usize, Acc)> = groups.into_iter().collect();
    ordered.sort_by(|(la, a), (lb, b)| b.count.cmp(&a.count).then(la.cmp(lb)));

    Ok(ordered
        .into_iter()
        .map(|(label, acc)| {
            let n = acc.count as f64;
            ClusterSummary {
                label,
                count: acc.count,
                center_lat: acc.lat / n,
                center_lon: acc.lon / n,
            }
        })
        .collect())
}

/// Display copy of `summaries`: first `top_n` (all when `None`), centers
/// rounded to `decimals` places. `summaries` is left untouched.
pub fn rank(
    summaries: &[ClusterSummary],
    top_n: Option<usize>,
    decimals: u32,
) -> Vec<RankedCluster> {
    summaries
        .iter()
        .take(top_n.unwrap_or(usize::MAX))
        .enumerate()
        .map(|(i, s)| RankedCluster {
            rank: i + 1,
            count: s.count,
            center_lat: round_to(s.center_lat, decimals),
            center_lon: round_to(s.center_lon, decimals),
        })
        .collect()
}

fn round_to(value: f64, decimals: u32) -> f64 {
    // Past ~15 places an f64 has nothing left to round.
    if decimals > 15 {
        return value;
    }
    let scale = 10f64.powi(decimals as i32);
    // Halves go to even, matching pandas' `round`.
    (value * scale).round_ties_even() / scale
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pts(raw: &[(f64, f64)]) -> Vec<GeoPoint> {
        raw.iter().copied().map(GeoPoint::from).collect()
    }

    #[test]
    fn summarize_concrete_scenario() {
        let points = pts(&[(0.0, 0.0), (0.0, 0.001), (10.0, 10.0)]);
        let summaries = summarize(&points, &[0, 0, 1]).unwrap();

        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].count, 2);
        assert_eq!(summaries[0].center_lat, 0.0);
        assert!((summaries[0].center_lon - 0.0005).abs() < 1e-12);
        assert_eq!(summaries[1].count, 1);
        assert_eq!(summaries[1].center(), GeoPoint::new(10.0, 10.0));
    }

    #[test]
    fn count_desc_then_label_asc() {
        let points = pts(&[(1.0, 1.0), (2.0, 2.0), (3.0, 3.0), (2.0, 2.0), (3.0, 3.0), (4.0, 4.0)]);
        // Labels not in first-encounter order: ties still go by label value.
        let labels = [9, 5, 2, 5, 2, 0];
        let summaries = summarize(&points, &labels).unwrap();
        let order: Vec<usize> = summaries.iter().map(|s| s.label).collect();
        assert_eq!(order, vec![2, 5, 0, 9]);
    }

    #[test]
    fn first_encounter_ties_keep_discovery_order() {
        let points = pts(&[(1.0, 1.0), (2.0, 2.0), (3.0, 3.0)]);
        let summaries = summarize(&points, &[0, 1, 2]).unwrap();
        let order: Vec<usize> = summaries.iter().map(|s| s.label).collect();
        assert_eq!(order, vec![0, 1, 2]);
    }

    #[test]
    fn counts_are_conserved() {
        let points = pts(&[(0.0, 0.0); 7]);
        let summaries = summarize(&points, &[0, 1, 0, 2, 1, 0, 3]).unwrap();
        assert_eq!(summaries.iter().map(|s| s.count).sum::<usize>(), 7);
    }

    #[test]
    fn empty_and_mismatched_input() {
        assert!(summarize(&[], &[]).unwrap().is_empty());
        assert!(matches!(
            summarize(&pts(&[(0.0, 0.0)]), &[]),
            Err(Error::LengthMismatch { points: 1, labels: 0 })
        ));
    }

    #[test]
    fn rank_truncates_and_rounds_a_copy() {
        let summary = |label, count, center_lat, center_lon| ClusterSummary {
            label,
            count,
            center_lat,
            center_lon,
        };
        let summaries = vec![
            summary(0, 3, 1.234_567, -2.345_678),
            summary(1, 2, 0.0, 0.0),
            summary(2, 1, 5.0, 5.0),
        ];
        let rows = rank(&summaries, Some(2), 2);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].rank, 1);
        assert_eq!(rows[0].center_lat, 1.23);
        assert_eq!(rows[0].center_lon, -2.35);
        assert_eq!(rows[1].rank, 2);
        assert_eq!(summaries[0].center_lat, 1.234_567);

        assert_eq!(rank(&summaries, None, 5).len(), 3);
    }

    #[test]
    fn rounding_ties_go_to_even() {
        // 0.125, 0.375 and 2.5 are exact in binary, so these are true ties.
        assert_eq!(round_to(0.125, 2), 0.12);
        assert_eq!(round_to(0.375, 2), 0.38);
        assert_eq!(round_to(-0.125, 2), -0.12);
        assert_eq!(round_to(2.5, 0), 2.0);
        assert_eq!(round_to(3.5, 0), 4.0);
    }
}
