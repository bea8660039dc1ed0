#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Result types for the risk zone engine and demographic aggregation.
//!
//! These are the shapes the engine produces and the API layer re-exposes:
//! computed zones, histogram bundles, and run summaries. The algorithms
//! themselves live in `alert_map_analytics`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A freshly computed risk zone, before persistence.
///
/// Zone names are ordinals in discovery order and carry no identity
/// across engine runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComputedZone {
    /// Ordinal name in discovery order (`Zone_1`, `Zone_2`, ...).
    pub zone_name: String,
    /// Centroid latitude (arithmetic mean of member latitudes).
    pub latitude: f64,
    /// Centroid longitude (arithmetic mean of member longitudes).
    pub longitude: f64,
    /// Composite risk score in `[0, 100]`.
    pub risk_score: f64,
    /// Number of member cases (always >= 2).
    pub incident_count: usize,
    /// Zone radius in kilometers (constant).
    pub radius_km: f64,
}

/// Coarse risk banding used by insight text and map styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskLevel {
    /// Score above 70.
    High,
    /// Score in `[40, 70]`.
    Medium,
    /// Score below 40.
    Low,
}

impl RiskLevel {
    /// Bands a composite risk score.
    #[must_use]
    pub fn from_score(score: f64) -> Self {
        if score > 70.0 {
            Self::High
        } else if score >= 40.0 {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

/// Report-time buckets for the time-of-day histogram.
///
/// Bucketed on the report timestamp's hour of day as stored (UTC).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TimeOfDay {
    /// Hours 6-11.
    Morning,
    /// Hours 12-17.
    Afternoon,
    /// Hours 18-23.
    Evening,
    /// Hours 0-5.
    Night,
}

impl TimeOfDay {
    /// Buckets an hour-of-day (0-23).
    #[must_use]
    pub const fn from_hour(hour: u32) -> Self {
        match hour {
            6..=11 => Self::Morning,
            12..=17 => Self::Afternoon,
            18..=23 => Self::Evening,
            _ => Self::Night,
        }
    }

    /// Histogram label including the hour range.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Morning => "Morning (6-12)",
            Self::Afternoon => "Afternoon (12-18)",
            Self::Evening => "Evening (18-24)",
            Self::Night => "Night (0-6)",
        }
    }
}

/// Location categories derived from the free-text last-seen field.
///
/// Classification is keyword-based with a fixed priority order (first
/// matching category wins); see `alert_map_analytics::demographics`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LocationType {
    /// Parks and playgrounds.
    ParksPlaygrounds,
    /// Schools and universities.
    Educational,
    /// Malls, stores, shops.
    Commercial,
    /// Homes and residences.
    Residential,
    /// Anything that matches no keyword.
    Other,
}

impl LocationType {
    /// Histogram label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::ParksPlaygrounds => "Parks/Playgrounds",
            Self::Educational => "Educational",
            Self::Commercial => "Commercial",
            Self::Residential => "Residential",
            Self::Other => "Other",
        }
    }
}

/// Recovery rate figures, overall and per age group.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecoveryRates {
    /// `found / total * 100` across all cases, `None` when there are no
    /// cases.
    pub overall: Option<f64>,
    /// Recovery rate per age-group label.
    pub by_age: BTreeMap<String, f64>,
}

/// Frequency counters over the full case snapshot.
///
/// Keys are human-readable bucket labels; `BTreeMap` keeps output ordering
/// stable for serialization and tests.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DemographicPatterns {
    /// Case counts per age-group label.
    pub age_groups: BTreeMap<String, u64>,
    /// Case counts per reported gender.
    pub gender_distribution: BTreeMap<String, u64>,
    /// Case counts per time-of-day bucket.
    pub time_patterns: BTreeMap<String, u64>,
    /// Case counts per location type.
    pub location_types: BTreeMap<String, u64>,
    /// Recovery rates.
    pub recovery_rates: RecoveryRates,
}

impl DemographicPatterns {
    /// Whether any case contributed to these patterns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.age_groups.is_empty()
            && self.gender_distribution.is_empty()
            && self.time_patterns.is_empty()
            && self.location_types.is_empty()
    }
}

/// Outcome summary of one risk zone engine run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneUpdateSummary {
    /// Number of geocoded cases in the snapshot.
    pub geocoded_cases: usize,
    /// Number of zones computed and persisted.
    pub zones_created: usize,
    /// `true` when the snapshot had fewer than two geocoded cases and the
    /// previous zone set was left in place instead of being replaced.
    pub preserved_previous: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn risk_level_banding_edges() {
        assert_eq!(RiskLevel::from_score(100.0), RiskLevel::High);
        assert_eq!(RiskLevel::from_score(70.1), RiskLevel::High);
        assert_eq!(RiskLevel::from_score(70.0), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_score(40.0), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_score(39.9), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(0.0), RiskLevel::Low);
    }

    #[test]
    fn time_of_day_hour_edges() {
        assert_eq!(TimeOfDay::from_hour(0), TimeOfDay::Night);
        assert_eq!(TimeOfDay::from_hour(5), TimeOfDay::Night);
        assert_eq!(TimeOfDay::from_hour(6), TimeOfDay::Morning);
        assert_eq!(TimeOfDay::from_hour(11), TimeOfDay::Morning);
        assert_eq!(TimeOfDay::from_hour(12), TimeOfDay::Afternoon);
        assert_eq!(TimeOfDay::from_hour(17), TimeOfDay::Afternoon);
        assert_eq!(TimeOfDay::from_hour(18), TimeOfDay::Evening);
        assert_eq!(TimeOfDay::from_hour(23), TimeOfDay::Evening);
    }
}
