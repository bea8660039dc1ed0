//! Engine orchestration: snapshot in, full-replacement zone set out.
//!
//! [`analyze_risk_zones`] is the pure composition of clustering and
//! scoring. The async operations wrap it with case store access: one
//! snapshot query, in-memory computation, one transactional replace.
//! Demographics and insights are read-only over the same snapshot and
//! never touch the zone table.
//!
//! Concurrent runs must not interleave (the replace is delete-then-insert
//! over the whole table); callers serialize invocations, e.g. the HTTP
//! server holds a single-flight lock around [`update_risk_zones`].

use alert_map_analytics_models::{ComputedZone, DemographicPatterns, ZoneUpdateSummary};
use alert_map_database::queries;
use alert_map_database_models::CaseRow;
use chrono::NaiveDateTime;
use switchy_database::Database;

use crate::clustering::{centroid, cluster_cases};
use crate::demographics::analyze_demographic_patterns;
use crate::insights::generate_insights;
use crate::scoring::risk_score;
use crate::{AnalyticsError, MIN_ZONE_CASES, ZONE_RADIUS_KM};

/// Computes the full zone set for a case snapshot.
///
/// Zones are named `Zone_{n}` in discovery order, 1-indexed. The same
/// snapshot and scoring time always produce the same zones. The
/// computation is O(n²) in snapshot size; callers bound case volume.
#[must_use]
pub fn analyze_risk_zones(cases: &[CaseRow], now: NaiveDateTime) -> Vec<ComputedZone> {
    cluster_cases(cases)
        .iter()
        .enumerate()
        .map(|(ix, cluster)| {
            let (latitude, longitude) = centroid(cases, cluster);
            let members: Vec<&CaseRow> =
                cluster.member_indices.iter().map(|&i| &cases[i]).collect();
            ComputedZone {
                zone_name: format!("Zone_{}", ix + 1),
                latitude,
                longitude,
                risk_score: risk_score(&members, now),
                incident_count: members.len(),
                radius_km: ZONE_RADIUS_KM,
            }
        })
        .collect()
}

/// Recomputes risk zones from the current snapshot and replaces the
/// stored zone set.
///
/// With fewer than [`MIN_ZONE_CASES`] geocoded cases there is nothing to
/// cluster; the previous zone set is preserved rather than cleared so a
/// transient geocoding gap does not flap the map to empty. Readers can
/// detect staleness through each zone's `last_updated`.
///
/// # Errors
///
/// Returns [`AnalyticsError::Snapshot`] if the case snapshot cannot be
/// read (nothing was written), or [`AnalyticsError::Persist`] if the
/// zone replace fails after a successful computation (the transaction
/// rolled back and the previous zone set is intact).
pub async fn update_risk_zones(
    db: &dyn Database,
    now: NaiveDateTime,
) -> Result<ZoneUpdateSummary, AnalyticsError> {
    let cases = queries::geocoded_cases(db)
        .await
        .map_err(AnalyticsError::Snapshot)?;

    if cases.len() < MIN_ZONE_CASES {
        log::info!(
            "Only {} geocoded cases; preserving previous risk zones",
            cases.len()
        );
        return Ok(ZoneUpdateSummary {
            geocoded_cases: cases.len(),
            zones_created: 0,
            preserved_previous: true,
        });
    }

    let zones = analyze_risk_zones(&cases, now);

    queries::replace_risk_zones(db, &zones, now)
        .await
        .map_err(AnalyticsError::Persist)?;

    log::info!(
        "Risk zones updated: {} zones from {} geocoded cases",
        zones.len(),
        cases.len()
    );

    Ok(ZoneUpdateSummary {
        geocoded_cases: cases.len(),
        zones_created: zones.len(),
        preserved_previous: false,
    })
}

/// Aggregates demographic patterns over the full case snapshot.
///
/// Read-only; safe to call concurrently with anything.
///
/// # Errors
///
/// Returns [`AnalyticsError::Snapshot`] if the snapshot cannot be read.
pub async fn demographic_patterns(
    db: &dyn Database,
) -> Result<DemographicPatterns, AnalyticsError> {
    let cases = queries::all_cases(db)
        .await
        .map_err(AnalyticsError::Snapshot)?;
    Ok(analyze_demographic_patterns(&cases))
}

/// Generates insight strings from a fresh in-memory analysis of the
/// current snapshot.
///
/// Zones are recomputed in memory for the insight pass and NOT
/// persisted, so this endpoint is side-effect-free regardless of what
/// [`update_risk_zones`] last wrote.
///
/// # Errors
///
/// Returns [`AnalyticsError::Snapshot`] if the snapshot cannot be read.
pub async fn predictive_insights(
    db: &dyn Database,
    now: NaiveDateTime,
) -> Result<Vec<String>, AnalyticsError> {
    let cases = queries::all_cases(db)
        .await
        .map_err(AnalyticsError::Snapshot)?;

    let zones = analyze_risk_zones(&cases, now);
    let patterns = analyze_demographic_patterns(&cases);

    Ok(generate_insights(&zones, &patterns))
}
