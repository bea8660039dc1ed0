//! Natural-language insight generation over zones and demographics.
//!
//! Pure post-processing with fixed thresholds: no state, deterministic
//! given the aggregates. Ties between equally-sized buckets resolve to
//! the first label in map order.

use std::collections::BTreeMap;

use alert_map_analytics_models::{ComputedZone, DemographicPatterns, RiskLevel};

/// Recovery rate above which the trend is called out as positive.
const RECOVERY_POSITIVE_THRESHOLD: f64 = 80.0;

/// Recovery rate below which the trend is flagged as a concern.
const RECOVERY_CONCERN_THRESHOLD: f64 = 50.0;

/// Generates insight strings from computed zones and demographic
/// patterns.
#[must_use]
pub fn generate_insights(zones: &[ComputedZone], patterns: &DemographicPatterns) -> Vec<String> {
    let mut insights = Vec::new();

    let high_risk = zones
        .iter()
        .filter(|z| RiskLevel::from_score(z.risk_score) == RiskLevel::High)
        .count();
    let medium_risk = zones
        .iter()
        .filter(|z| RiskLevel::from_score(z.risk_score) == RiskLevel::Medium)
        .count();

    if high_risk > 0 {
        insights.push(format!(
            "HIGH RISK: {high_risk} zones identified with elevated risk (score >70)"
        ));
    }
    if medium_risk > 0 {
        insights.push(format!(
            "MEDIUM RISK: {medium_risk} zones require monitoring (score 40-70)"
        ));
    }

    if let Some((label, count)) = largest_bucket(&patterns.age_groups) {
        insights.push(format!(
            "DEMOGRAPHICS: {label} age group has highest incident rate ({count} cases)"
        ));
    }

    if let Some((label, count)) = largest_bucket(&patterns.time_patterns) {
        insights.push(format!(
            "TIMING: Most incidents occur during {label} ({count} cases)"
        ));
    }

    if let Some((label, count)) = largest_bucket(&patterns.location_types) {
        insights.push(format!(
            "LOCATIONS: {label} areas account for most incidents ({count} cases)"
        ));
    }

    if let Some(rate) = patterns.recovery_rates.overall {
        if rate > RECOVERY_POSITIVE_THRESHOLD {
            insights.push(format!("POSITIVE: High recovery rate of {rate:.1}%"));
        } else if rate < RECOVERY_CONCERN_THRESHOLD {
            insights.push(format!(
                "CONCERN: Low recovery rate of {rate:.1}% - review response protocols"
            ));
        }
    }

    insights
}

/// The largest bucket in a histogram; ties resolve to the first key in
/// map order.
fn largest_bucket(histogram: &BTreeMap<String, u64>) -> Option<(&str, u64)> {
    let mut best: Option<(&str, u64)> = None;
    for (label, &count) in histogram {
        match best {
            Some((_, best_count)) if count <= best_count => {}
            _ => best = Some((label.as_str(), count)),
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use alert_map_analytics_models::RecoveryRates;

    use super::*;

    fn zone(name: &str, score: f64) -> ComputedZone {
        ComputedZone {
            zone_name: name.to_string(),
            latitude: 19.0,
            longitude: 72.8,
            risk_score: score,
            incident_count: 2,
            radius_km: 2.0,
        }
    }

    fn patterns_with(
        age: &[(&str, u64)],
        time: &[(&str, u64)],
        location: &[(&str, u64)],
        overall_recovery: Option<f64>,
    ) -> DemographicPatterns {
        DemographicPatterns {
            age_groups: age.iter().map(|(k, v)| ((*k).to_string(), *v)).collect(),
            gender_distribution: BTreeMap::new(),
            time_patterns: time.iter().map(|(k, v)| ((*k).to_string(), *v)).collect(),
            location_types: location.iter().map(|(k, v)| ((*k).to_string(), *v)).collect(),
            recovery_rates: RecoveryRates {
                overall: overall_recovery,
                by_age: BTreeMap::new(),
            },
        }
    }

    #[test]
    fn empty_inputs_produce_no_insights() {
        let insights = generate_insights(&[], &DemographicPatterns::default());
        assert!(insights.is_empty());
    }

    #[test]
    fn zone_risk_banding() {
        let zones = vec![
            zone("Zone_1", 85.0),
            zone("Zone_2", 70.0),
            zone("Zone_3", 40.0),
            zone("Zone_4", 12.0),
        ];
        let insights = generate_insights(&zones, &DemographicPatterns::default());
        assert_eq!(insights.len(), 2);
        assert!(insights[0].starts_with("HIGH RISK: 1 zones"));
        assert!(insights[1].starts_with("MEDIUM RISK: 2 zones"));
    }

    #[test]
    fn largest_buckets_are_reported() {
        let patterns = patterns_with(
            &[("0-5 years", 3), ("6-10 years", 7)],
            &[("Evening (18-24)", 5), ("Morning (6-12)", 2)],
            &[("Parks/Playgrounds", 4), ("Other", 1)],
            None,
        );
        let insights = generate_insights(&[], &patterns);
        assert!(insights.iter().any(|i| i.contains("6-10 years") && i.contains("7 cases")));
        assert!(insights.iter().any(|i| i.contains("Evening (18-24)") && i.contains("5 cases")));
        assert!(insights
            .iter()
            .any(|i| i.contains("Parks/Playgrounds") && i.contains("4 cases")));
    }

    #[test]
    fn recovery_rate_flags() {
        let high = patterns_with(&[], &[], &[], Some(92.5));
        let insights = generate_insights(&[], &high);
        assert_eq!(insights, vec!["POSITIVE: High recovery rate of 92.5%".to_string()]);

        let low = patterns_with(&[], &[], &[], Some(33.3));
        let insights = generate_insights(&[], &low);
        assert_eq!(
            insights,
            vec!["CONCERN: Low recovery rate of 33.3% - review response protocols".to_string()]
        );

        // Between the thresholds: no flag either way.
        let mid = patterns_with(&[], &[], &[], Some(65.0));
        assert!(generate_insights(&[], &mid).is_empty());
        let edge_high = patterns_with(&[], &[], &[], Some(80.0));
        assert!(generate_insights(&[], &edge_high).is_empty());
        let edge_low = patterns_with(&[], &[], &[], Some(50.0));
        assert!(generate_insights(&[], &edge_low).is_empty());
    }
}
