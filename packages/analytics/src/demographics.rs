//! Demographic pattern aggregation over the full case snapshot.
//!
//! Frequency counters over every case, zoned or not: age groups, gender,
//! report time of day, and a keyword-derived location type, plus overall
//! and per-age-group recovery rates.

use std::collections::BTreeMap;

use alert_map_analytics_models::{DemographicPatterns, LocationType, RecoveryRates, TimeOfDay};
use alert_map_case_models::{AgeGroup, CaseStatus};
use alert_map_database_models::CaseRow;
use chrono::Timelike;

/// Keyword table for location classification, in priority order.
///
/// The first category whose keyword list matches wins; a location text is
/// never counted in more than one bucket. Order is load-bearing: a
/// "school park" is Parks/Playgrounds, not Educational.
const LOCATION_KEYWORDS: &[(LocationType, &[&str])] = &[
    (LocationType::ParksPlaygrounds, &["park", "playground"]),
    (LocationType::Educational, &["school", "university"]),
    (LocationType::Commercial, &["mall", "store", "shop"]),
    (LocationType::Residential, &["home", "house", "residence"]),
];

/// Classifies a free-text location by case-insensitive substring match
/// against [`LOCATION_KEYWORDS`].
#[must_use]
pub fn classify_location(text: &str) -> LocationType {
    let lowered = text.to_lowercase();
    for (location_type, keywords) in LOCATION_KEYWORDS {
        if keywords.iter().any(|keyword| lowered.contains(keyword)) {
            return *location_type;
        }
    }
    LocationType::Other
}

/// Aggregates demographic patterns across all cases in the snapshot.
///
/// Returns an empty [`DemographicPatterns`] for an empty snapshot.
#[must_use]
pub fn analyze_demographic_patterns(cases: &[CaseRow]) -> DemographicPatterns {
    if cases.is_empty() {
        return DemographicPatterns::default();
    }

    let mut age_groups: BTreeMap<String, u64> = BTreeMap::new();
    let mut gender_distribution: BTreeMap<String, u64> = BTreeMap::new();
    let mut time_patterns: BTreeMap<String, u64> = BTreeMap::new();
    let mut location_types: BTreeMap<String, u64> = BTreeMap::new();

    for case in cases {
        let group = AgeGroup::from_age(case.age);
        *age_groups.entry(group.label().to_string()).or_insert(0) += 1;

        *gender_distribution
            .entry(case.gender.to_string())
            .or_insert(0) += 1;

        let bucket = TimeOfDay::from_hour(case.reported_at.hour());
        *time_patterns.entry(bucket.label().to_string()).or_insert(0) += 1;

        let location = classify_location(&case.location_text);
        *location_types
            .entry(location.label().to_string())
            .or_insert(0) += 1;
    }

    DemographicPatterns {
        age_groups,
        gender_distribution,
        time_patterns,
        location_types,
        recovery_rates: recovery_rates(cases),
    }
}

/// Recovery rate (`found / total * 100`), overall and per age group.
fn recovery_rates(cases: &[CaseRow]) -> RecoveryRates {
    if cases.is_empty() {
        return RecoveryRates::default();
    }

    let found = cases
        .iter()
        .filter(|c| c.status == CaseStatus::Found)
        .count();

    #[allow(clippy::cast_precision_loss)]
    let overall = (found as f64 / cases.len() as f64) * 100.0;

    let mut by_age: BTreeMap<String, f64> = BTreeMap::new();
    for group in AgeGroup::all() {
        let group_cases: Vec<&CaseRow> = cases
            .iter()
            .filter(|c| AgeGroup::from_age(c.age) == *group)
            .collect();
        if group_cases.is_empty() {
            continue;
        }
        let group_found = group_cases
            .iter()
            .filter(|c| c.status == CaseStatus::Found)
            .count();
        #[allow(clippy::cast_precision_loss)]
        let rate = (group_found as f64 / group_cases.len() as f64) * 100.0;
        by_age.insert(group.label().to_string(), rate);
    }

    RecoveryRates {
        overall: Some(overall),
        by_age,
    }
}

#[cfg(test)]
mod tests {
    use alert_map_case_models::Gender;
    use chrono::NaiveDate;

    use super::*;

    fn case_at(
        id: i32,
        age: i32,
        gender: Gender,
        location_text: &str,
        hour: u32,
        status: CaseStatus,
    ) -> CaseRow {
        CaseRow {
            id,
            report_id: format!("case-{id}"),
            name: format!("Child {id}"),
            age,
            gender,
            location_text: location_text.to_string(),
            latitude: None,
            longitude: None,
            reported_at: NaiveDate::from_ymd_opt(2025, 5, 20)
                .unwrap()
                .and_hms_opt(hour, 30, 0)
                .unwrap(),
            status,
        }
    }

    #[test]
    fn empty_snapshot_yields_empty_patterns() {
        let patterns = analyze_demographic_patterns(&[]);
        assert!(patterns.is_empty());
        assert_eq!(patterns.recovery_rates.overall, None);
    }

    #[test]
    fn classifies_park_playground_before_other() {
        assert_eq!(
            classify_location("Central Park Playground"),
            LocationType::ParksPlaygrounds
        );
        assert_eq!(classify_location("PLAYGROUND"), LocationType::ParksPlaygrounds);
    }

    #[test]
    fn classification_priority_is_fixed() {
        // "park" beats "school" even when both match.
        assert_eq!(
            classify_location("school park"),
            LocationType::ParksPlaygrounds
        );
        assert_eq!(classify_location("university mall"), LocationType::Educational);
        assert_eq!(classify_location("store near a house"), LocationType::Commercial);
        assert_eq!(classify_location("grandparents' residence"), LocationType::Residential);
        assert_eq!(classify_location("bus terminal"), LocationType::Other);
    }

    #[test]
    fn histograms_count_every_case() {
        let cases = vec![
            case_at(1, 4, Gender::Female, "City Park", 8, CaseStatus::Missing),
            case_at(2, 7, Gender::Male, "Lakeside School", 13, CaseStatus::Found),
            case_at(3, 12, Gender::Female, "Corner Store", 19, CaseStatus::Missing),
            case_at(4, 17, Gender::Other, "Downtown", 2, CaseStatus::Found),
        ];
        let patterns = analyze_demographic_patterns(&cases);

        assert_eq!(patterns.age_groups["0-5 years"], 1);
        assert_eq!(patterns.age_groups["6-10 years"], 1);
        assert_eq!(patterns.age_groups["11-15 years"], 1);
        assert_eq!(patterns.age_groups["16+ years"], 1);

        assert_eq!(patterns.gender_distribution["FEMALE"], 2);
        assert_eq!(patterns.gender_distribution["MALE"], 1);
        assert_eq!(patterns.gender_distribution["OTHER"], 1);

        assert_eq!(patterns.time_patterns["Morning (6-12)"], 1);
        assert_eq!(patterns.time_patterns["Afternoon (12-18)"], 1);
        assert_eq!(patterns.time_patterns["Evening (18-24)"], 1);
        assert_eq!(patterns.time_patterns["Night (0-6)"], 1);

        assert_eq!(patterns.location_types["Parks/Playgrounds"], 1);
        assert_eq!(patterns.location_types["Educational"], 1);
        assert_eq!(patterns.location_types["Commercial"], 1);
        assert_eq!(patterns.location_types["Other"], 1);

        let total: u64 = patterns.age_groups.values().sum();
        assert_eq!(total, 4);
    }

    #[test]
    fn ungeocoded_cases_still_counted() {
        // Demographics cover the whole snapshot, not just zoned cases.
        let cases = vec![case_at(
            1,
            9,
            Gender::Male,
            "Riverside Park",
            10,
            CaseStatus::Missing,
        )];
        let patterns = analyze_demographic_patterns(&cases);
        assert_eq!(patterns.age_groups["6-10 years"], 1);
        assert_eq!(patterns.location_types["Parks/Playgrounds"], 1);
    }

    #[test]
    fn recovery_rates_overall_and_by_age() {
        let cases = vec![
            case_at(1, 4, Gender::Female, "Park", 8, CaseStatus::Found),
            case_at(2, 4, Gender::Male, "Park", 9, CaseStatus::Missing),
            case_at(3, 13, Gender::Female, "School", 14, CaseStatus::Found),
            case_at(4, 13, Gender::Male, "School", 15, CaseStatus::Found),
        ];
        let patterns = analyze_demographic_patterns(&cases);
        let rates = &patterns.recovery_rates;

        assert!((rates.overall.unwrap() - 75.0).abs() < f64::EPSILON);
        assert!((rates.by_age["0-5 years"] - 50.0).abs() < f64::EPSILON);
        assert!((rates.by_age["11-15 years"] - 100.0).abs() < f64::EPSILON);
        assert!(!rates.by_age.contains_key("6-10 years"));
    }

    #[test]
    fn closed_cases_do_not_count_as_recovered() {
        let cases = vec![
            case_at(1, 8, Gender::Female, "Park", 8, CaseStatus::Closed),
            case_at(2, 8, Gender::Male, "Park", 9, CaseStatus::Found),
        ];
        let patterns = analyze_demographic_patterns(&cases);
        assert!((patterns.recovery_rates.overall.unwrap() - 50.0).abs() < f64::EPSILON);
    }
}
