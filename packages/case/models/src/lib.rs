#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Case taxonomy types for the missing child alert platform.
//!
//! This crate defines the canonical closed enums shared across the system:
//! case lifecycle status, reported gender, and the age-group buckets used
//! by both risk scoring and demographic aggregation. All persistence and
//! API layers serialize these through the same `SCREAMING_SNAKE_CASE`
//! string form.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Lifecycle status of a missing child case.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum CaseStatus {
    /// Active case, child not yet located.
    Missing,
    /// Child located and recovered.
    Found,
    /// Case closed without a recovery outcome (withdrawn, duplicate, etc.).
    Closed,
}

impl CaseStatus {
    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Missing, Self::Found, Self::Closed]
    }

    /// Whether the case still counts as an open incident.
    #[must_use]
    pub const fn is_open(self) -> bool {
        matches!(self, Self::Missing)
    }
}

/// Reported gender of the child.
///
/// Intake forms are free-text in some deployments; anything that does not
/// parse as a known variant is stored as [`Gender::Other`].
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Gender {
    /// Reported female.
    Female,
    /// Reported male.
    Male,
    /// Not reported or outside the binary intake options.
    Other,
}

impl Gender {
    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Female, Self::Male, Self::Other]
    }

    /// Parses a stored gender string, mapping unknown values to
    /// [`Gender::Other`] instead of failing.
    #[must_use]
    pub fn parse_lossy(s: &str) -> Self {
        s.trim().to_uppercase().parse().unwrap_or(Self::Other)
    }
}

/// Age-group buckets shared by risk scoring and demographic aggregation.
///
/// The bucket boundaries (5, 10, 15) are policy constants: they drive both
/// the vulnerability sub-score and the per-group recovery rate breakdown,
/// so the same bucketing must be used everywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AgeGroup {
    /// Ages 0-5.
    EarlyChildhood,
    /// Ages 6-10.
    Child,
    /// Ages 11-15.
    Preteen,
    /// Ages 16 and up.
    Teen,
}

impl AgeGroup {
    /// Buckets an age in years into its group.
    #[must_use]
    pub const fn from_age(age: i32) -> Self {
        if age <= 5 {
            Self::EarlyChildhood
        } else if age <= 10 {
            Self::Child
        } else if age <= 15 {
            Self::Preteen
        } else {
            Self::Teen
        }
    }

    /// Human-readable label used in histograms and reports.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::EarlyChildhood => "0-5 years",
            Self::Child => "6-10 years",
            Self::Preteen => "11-15 years",
            Self::Teen => "16+ years",
        }
    }

    /// Returns all variants in ascending age order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::EarlyChildhood, Self::Child, Self::Preteen, Self::Teen]
    }
}

impl std::fmt::Display for AgeGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_string_roundtrip() {
        for status in CaseStatus::all() {
            let s = status.to_string();
            assert_eq!(s.parse::<CaseStatus>().unwrap(), *status);
        }
    }

    #[test]
    fn only_missing_is_open() {
        assert!(CaseStatus::Missing.is_open());
        assert!(!CaseStatus::Found.is_open());
        assert!(!CaseStatus::Closed.is_open());
    }

    #[test]
    fn gender_parse_lossy_known_and_unknown() {
        assert_eq!(Gender::parse_lossy("female"), Gender::Female);
        assert_eq!(Gender::parse_lossy(" MALE "), Gender::Male);
        assert_eq!(Gender::parse_lossy("nonbinary"), Gender::Other);
        assert_eq!(Gender::parse_lossy(""), Gender::Other);
    }

    #[test]
    fn age_group_boundaries() {
        assert_eq!(AgeGroup::from_age(0), AgeGroup::EarlyChildhood);
        assert_eq!(AgeGroup::from_age(5), AgeGroup::EarlyChildhood);
        assert_eq!(AgeGroup::from_age(6), AgeGroup::Child);
        assert_eq!(AgeGroup::from_age(10), AgeGroup::Child);
        assert_eq!(AgeGroup::from_age(11), AgeGroup::Preteen);
        assert_eq!(AgeGroup::from_age(15), AgeGroup::Preteen);
        assert_eq!(AgeGroup::from_age(16), AgeGroup::Teen);
        assert_eq!(AgeGroup::from_age(17), AgeGroup::Teen);
    }

    #[test]
    fn age_group_labels_are_unique() {
        let labels: Vec<&str> = AgeGroup::all().iter().map(|g| g.label()).collect();
        let mut deduped = labels.clone();
        deduped.dedup();
        assert_eq!(labels, deduped);
    }
}
