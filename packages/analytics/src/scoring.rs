//! Composite risk scoring for a zone's member cases.
//!
//! Three independently computed sub-scores, summed and capped at 100:
//!
//! * **incident** — `min(member_count * 10, 50)`; saturates at five cases.
//! * **recency** — mean over members of a step function of days since the
//!   report, relative to the scoring time.
//! * **age vulnerability** — mean over members of a step function of the
//!   victim's age; younger children weigh more.
//!
//! Every threshold and weight here is a policy constant. Sub-scores are
//! per-zone, not globally normalized, so two zones scored at different
//! times are not directly comparable.

use alert_map_database_models::CaseRow;
use chrono::NaiveDateTime;

/// Cap on the incident sub-score.
const INCIDENT_SCORE_CAP: f64 = 50.0;

/// Cap on the total composite score.
const TOTAL_SCORE_CAP: f64 = 100.0;

/// Composite risk score in `[0, 100]` for a zone's members.
///
/// `now` is the scoring time; callers hold it fixed across a run so all
/// zones in one run share a scoring basis. An empty member list scores 0
/// (unreachable behind the minimum-zone-size filter, but guarded).
#[must_use]
pub fn risk_score(members: &[&CaseRow], now: NaiveDateTime) -> f64 {
    if members.is_empty() {
        return 0.0;
    }

    let total = incident_score(members.len()) + recency_score(members, now) + age_score(members);
    total.min(TOTAL_SCORE_CAP)
}

/// Incident-density sub-score: 10 points per case, capped at 50.
#[must_use]
pub fn incident_score(member_count: usize) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    let raw = (member_count * 10) as f64;
    raw.min(INCIDENT_SCORE_CAP)
}

/// Mean recency weight across members.
///
/// Uses whole elapsed days (`now - reported_at`), so a case reported
/// 30 days and 23 hours ago still counts as 30 days.
#[must_use]
pub fn recency_score(members: &[&CaseRow], now: NaiveDateTime) -> f64 {
    if members.is_empty() {
        return 0.0;
    }

    let sum: f64 = members
        .iter()
        .map(|case| recency_weight((now - case.reported_at).num_days()))
        .sum();

    #[allow(clippy::cast_precision_loss)]
    let n = members.len() as f64;
    sum / n
}

/// Mean age-vulnerability weight across members.
#[must_use]
pub fn age_score(members: &[&CaseRow]) -> f64 {
    if members.is_empty() {
        return 0.0;
    }

    let sum: f64 = members.iter().map(|case| age_weight(case.age)).sum();

    #[allow(clippy::cast_precision_loss)]
    let n = members.len() as f64;
    sum / n
}

const fn recency_weight(days_ago: i64) -> f64 {
    if days_ago <= 30 {
        20.0
    } else if days_ago <= 90 {
        15.0
    } else if days_ago <= 365 {
        10.0
    } else {
        5.0
    }
}

const fn age_weight(age: i32) -> f64 {
    if age <= 5 {
        15.0
    } else if age <= 10 {
        12.0
    } else if age <= 15 {
        8.0
    } else {
        5.0
    }
}

#[cfg(test)]
mod tests {
    use alert_map_case_models::{CaseStatus, Gender};
    use chrono::{Duration, NaiveDate};

    use super::*;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn case(id: i32, age: i32, reported_at: NaiveDateTime) -> CaseRow {
        CaseRow {
            id,
            report_id: format!("case-{id}"),
            name: format!("Child {id}"),
            age,
            gender: Gender::Male,
            location_text: "Main Street".to_string(),
            latitude: Some(19.0),
            longitude: Some(72.8),
            reported_at,
            status: CaseStatus::Missing,
        }
    }

    #[test]
    fn empty_members_score_zero() {
        assert!((risk_score(&[], now()) - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn incident_score_adds_ten_per_case_then_caps() {
        assert!((incident_score(1) - 10.0).abs() < f64::EPSILON);
        assert!((incident_score(2) - 20.0).abs() < f64::EPSILON);
        assert!((incident_score(3) - 30.0).abs() < f64::EPSILON);
        assert!((incident_score(4) - 40.0).abs() < f64::EPSILON);
        assert!((incident_score(5) - 50.0).abs() < f64::EPSILON);
        assert!((incident_score(6) - 50.0).abs() < f64::EPSILON);
        assert!((incident_score(50) - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn recency_step_boundaries() {
        let cases = [
            (0, 20.0),
            (30, 20.0),
            (31, 15.0),
            (90, 15.0),
            (91, 10.0),
            (365, 10.0),
            (366, 5.0),
            (2000, 5.0),
        ];
        for (days, expected) in cases {
            let c = case(1, 8, now() - Duration::days(days));
            let members = [&c];
            let got = recency_score(&members, now());
            assert!(
                (got - expected).abs() < f64::EPSILON,
                "{days} days ago: expected {expected}, got {got}"
            );
        }
    }

    #[test]
    fn age_step_boundaries() {
        let cases = [(0, 15.0), (5, 15.0), (6, 12.0), (10, 12.0), (11, 8.0), (15, 8.0), (16, 5.0)];
        for (age, expected) in cases {
            let c = case(1, age, now());
            let members = [&c];
            let got = age_score(&members);
            assert!(
                (got - expected).abs() < f64::EPSILON,
                "age {age}: expected {expected}, got {got}"
            );
        }
    }

    #[test]
    fn score_stays_within_bounds() {
        // Five fresh toddler cases max out every sub-score:
        // 50 + 20 + 15 = 85, still under the cap.
        let fresh: Vec<CaseRow> = (0..5).map(|i| case(i, 3, now())).collect();
        let members: Vec<&CaseRow> = fresh.iter().collect();
        let score = risk_score(&members, now());
        assert!((score - 85.0).abs() < f64::EPSILON);
        assert!((0.0..=100.0).contains(&score));

        // Five stale teenagers bottom out recency and age.
        let stale: Vec<CaseRow> =
            (0..5).map(|i| case(i, 17, now() - Duration::days(1000))).collect();
        let members: Vec<&CaseRow> = stale.iter().collect();
        let score = risk_score(&members, now());
        assert!((score - 60.0).abs() < f64::EPSILON);
    }

    #[test]
    fn mixed_ages_average() {
        // Ages 4 and 6: weights 15 and 12, mean 13.5.
        let a = case(1, 4, now());
        let b = case(2, 6, now());
        let members = [&a, &b];
        assert!((age_score(&members) - 13.5).abs() < f64::EPSILON);
    }

    #[test]
    fn two_fresh_young_cases_score() {
        // incident 20 + recency 20 + age (15 + 12) / 2 = 53.5
        let a = case(1, 4, now());
        let b = case(2, 6, now());
        let members = [&a, &b];
        let score = risk_score(&members, now());
        assert!((score - 53.5).abs() < f64::EPSILON);
    }
}
