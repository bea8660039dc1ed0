//! Spatial clustering of geocoded cases into candidate zones.
//!
//! A greedy, seed-anchored partitioning pass: the first unprocessed case
//! seeds a cluster, and every later unprocessed case within
//! [`ZONE_RADIUS_KM`](crate::ZONE_RADIUS_KM) of *the seed* joins it.
//! Membership is never re-tested against other members, so a case 1.9 km
//! from the seed joins even when it is 3 km from another member — this is
//! deliberately not connected-components clustering. Downstream consumers
//! (zone counts, alert thresholds) were tuned against exactly this
//! behavior, so it is pinned by tests rather than "improved".
//!
//! Output is deterministic for a fixed snapshot ordering; the store
//! queries order by case id to keep runs reproducible.

use alert_map_database_models::CaseRow;
use alert_map_geo::distance_km;

use crate::{MIN_ZONE_CASES, ZONE_RADIUS_KM};

/// Indices into the input snapshot forming one cluster.
///
/// The first index is always the seed case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneCluster {
    /// Snapshot indices of member cases, seed first.
    pub member_indices: Vec<usize>,
}

impl ZoneCluster {
    /// Number of member cases.
    #[must_use]
    pub fn len(&self) -> usize {
        self.member_indices.len()
    }

    /// Whether the cluster has no members (never true for emitted
    /// clusters).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.member_indices.is_empty()
    }
}

/// Partitions the snapshot into clusters of at least
/// [`MIN_ZONE_CASES`] cases.
///
/// Cases without both coordinates never join a cluster (their distance to
/// anything is infinite) and are silently left unzoned, as are cases with
/// no neighbor within threshold. The `processed` state is local to one
/// call; nothing is shared across runs.
#[must_use]
pub fn cluster_cases(cases: &[CaseRow]) -> Vec<ZoneCluster> {
    let mut processed = vec![false; cases.len()];
    let mut clusters = Vec::new();

    for i in 0..cases.len() {
        if processed[i] {
            continue;
        }

        let seed = &cases[i];
        let mut member_indices = vec![i];
        processed[i] = true;

        for j in (i + 1)..cases.len() {
            if processed[j] {
                continue;
            }

            // Distance is measured from the seed, not from the nearest
            // existing member.
            let distance = distance_km(
                seed.latitude,
                seed.longitude,
                cases[j].latitude,
                cases[j].longitude,
            );

            if distance <= ZONE_RADIUS_KM {
                member_indices.push(j);
                processed[j] = true;
            }
        }

        if member_indices.len() >= MIN_ZONE_CASES {
            clusters.push(ZoneCluster { member_indices });
        }
    }

    clusters
}

/// Arithmetic-mean centroid of a cluster's member coordinates.
///
/// Not a true spherical centroid; at the 2 km zone scale the difference
/// is negligible. Members are geocoded by construction (an ungeocoded
/// case can never pass the distance threshold).
#[must_use]
pub fn centroid(cases: &[CaseRow], cluster: &ZoneCluster) -> (f64, f64) {
    let coords: Vec<(f64, f64)> = cluster
        .member_indices
        .iter()
        .filter_map(|&ix| cases[ix].latitude.zip(cases[ix].longitude))
        .collect();

    if coords.is_empty() {
        return (0.0, 0.0);
    }

    #[allow(clippy::cast_precision_loss)]
    let n = coords.len() as f64;
    let lat = coords.iter().map(|c| c.0).sum::<f64>() / n;
    let lng = coords.iter().map(|c| c.1).sum::<f64>() / n;
    (lat, lng)
}

#[cfg(test)]
mod tests {
    use alert_map_case_models::{CaseStatus, Gender};
    use chrono::NaiveDate;

    use super::*;

    fn case(id: i32, lat: Option<f64>, lng: Option<f64>) -> CaseRow {
        CaseRow {
            id,
            report_id: format!("case-{id}"),
            name: format!("Child {id}"),
            age: 8,
            gender: Gender::Female,
            location_text: "Main Street".to_string(),
            latitude: lat,
            longitude: lng,
            reported_at: NaiveDate::from_ymd_opt(2025, 6, 1)
                .unwrap()
                .and_hms_opt(12, 0, 0)
                .unwrap(),
            status: CaseStatus::Missing,
        }
    }

    #[test]
    fn two_close_cases_form_one_cluster() {
        let cases = vec![
            case(1, Some(19.0760), Some(72.8777)),
            case(2, Some(19.0850), Some(72.8850)),
        ];
        let clusters = cluster_cases(&cases);
        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].member_indices, vec![0, 1]);
    }

    #[test]
    fn isolated_case_produces_no_cluster() {
        let cases = vec![
            case(1, Some(19.0760), Some(72.8777)),
            // ~55 km away
            case(2, Some(19.5), Some(73.2)),
        ];
        assert!(cluster_cases(&cases).is_empty());
    }

    #[test]
    fn ungeocoded_cases_never_cluster() {
        let cases = vec![
            case(1, None, None),
            case(2, None, None),
            case(3, Some(19.0760), Some(72.8777)),
        ];
        assert!(cluster_cases(&cases).is_empty());
    }

    #[test]
    fn clusters_partition_the_snapshot() {
        let cases = vec![
            case(1, Some(19.0760), Some(72.8777)),
            case(2, Some(19.0850), Some(72.8850)),
            case(3, Some(28.6139), Some(77.2090)),
            case(4, Some(28.6200), Some(77.2150)),
            case(5, None, None),
            case(6, Some(13.0827), Some(80.2707)),
        ];
        let clusters = cluster_cases(&cases);

        let mut seen = std::collections::BTreeSet::new();
        for cluster in &clusters {
            assert!(cluster.len() >= MIN_ZONE_CASES);
            for &ix in &cluster.member_indices {
                assert!(ix < cases.len());
                assert!(seen.insert(ix), "case index {ix} appears in two clusters");
            }
        }
    }

    #[test]
    fn membership_is_tested_against_seed_only() {
        // Three points on a line, each ~1.8 km apart. The middle one is the
        // seed's neighbor; the far one is ~3.6 km from the seed and stays
        // out even though it is within 2 km of the middle member.
        let cases = vec![
            case(1, Some(19.0000), Some(72.8777)),
            case(2, Some(19.0162), Some(72.8777)),
            case(3, Some(19.0324), Some(72.8777)),
        ];
        let clusters = cluster_cases(&cases);
        // Seed cluster takes cases 1 and 2; case 3 is left alone and its
        // singleton is discarded.
        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].member_indices, vec![0, 1]);
    }

    #[test]
    fn far_apart_members_join_via_shared_seed() {
        // Two cases ~1.9 km from the seed on opposite sides are ~3.8 km
        // from each other, yet both join the seed's zone.
        let cases = vec![
            case(1, Some(19.0000), Some(72.8777)),
            case(2, Some(19.0171), Some(72.8777)),
            case(3, Some(18.9829), Some(72.8777)),
        ];
        let clusters = cluster_cases(&cases);
        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].member_indices, vec![0, 1, 2]);
    }

    #[test]
    fn output_depends_on_snapshot_order() {
        // Same three collinear points, reversed: the far endpoint now
        // seeds first and captures the middle, leaving the original seed
        // unzoned. Order dependence is part of the algorithm's contract.
        let cases = vec![
            case(3, Some(19.0324), Some(72.8777)),
            case(2, Some(19.0162), Some(72.8777)),
            case(1, Some(19.0000), Some(72.8777)),
        ];
        let clusters = cluster_cases(&cases);
        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].member_indices, vec![0, 1]);
    }

    #[test]
    fn repeated_runs_are_identical() {
        let cases = vec![
            case(1, Some(19.0760), Some(72.8777)),
            case(2, Some(19.0850), Some(72.8850)),
            case(3, Some(19.0800), Some(72.8800)),
            case(4, Some(28.6139), Some(77.2090)),
        ];
        let first = cluster_cases(&cases);
        let second = cluster_cases(&cases);
        assert_eq!(first, second);
    }

    #[test]
    fn centroid_is_arithmetic_mean() {
        let cases = vec![
            case(1, Some(19.0), Some(72.0)),
            case(2, Some(19.2), Some(72.4)),
        ];
        let cluster = ZoneCluster {
            member_indices: vec![0, 1],
        };
        let (lat, lng) = centroid(&cases, &cluster);
        assert!((lat - 19.1).abs() < 1e-9);
        assert!((lng - 72.2).abs() < 1e-9);
    }
}
