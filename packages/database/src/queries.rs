//! Database query functions for cases, sightings, and risk zones.
//!
//! Row decoding is lenient (`unwrap_or` fallbacks) in the same spirit as
//! the rest of the platform: a malformed row degrades to defaults rather
//! than failing a whole listing. Writes use positional parameters; the
//! zone replace is the only multi-statement write and runs in a
//! transaction.

use alert_map_analytics_models::ComputedZone;
use alert_map_case_models::{CaseStatus, Gender};
use alert_map_database_models::{CaseQuery, CaseRow, NewCase, NewSighting, RiskZoneRow};
use chrono::NaiveDateTime;
use moosicbox_json_utils::database::ToValue as _;
use switchy_database::{Database, DatabaseValue};

use crate::DbError;

/// Columns selected for every case query, kept in one place so decoding
/// stays in sync.
const CASE_COLUMNS: &str =
    "id, report_id, name, age, gender, location_text, latitude, longitude, reported_at, status";

fn case_from_row(row: &switchy_database::Row) -> CaseRow {
    let gender_raw: String = row.to_value("gender").unwrap_or_default();
    let status_raw: String = row.to_value("status").unwrap_or_default();

    CaseRow {
        id: row.to_value("id").unwrap_or(0),
        report_id: row.to_value("report_id").unwrap_or_default(),
        name: row.to_value("name").unwrap_or_default(),
        age: row.to_value("age").unwrap_or(0),
        gender: Gender::parse_lossy(&gender_raw),
        location_text: row.to_value("location_text").unwrap_or_default(),
        latitude: row.to_value("latitude").unwrap_or(None),
        longitude: row.to_value("longitude").unwrap_or(None),
        reported_at: row.to_value("reported_at").unwrap_or_default(),
        status: status_raw.parse().unwrap_or(CaseStatus::Missing),
    }
}

/// Fetches the snapshot of geocoded cases, ordered by id.
///
/// The stable id ordering is what makes clustering runs reproducible for
/// an unchanged snapshot.
///
/// # Errors
///
/// Returns [`DbError`] if the database query fails.
pub async fn geocoded_cases(db: &dyn Database) -> Result<Vec<CaseRow>, DbError> {
    let rows = db
        .query_raw_params(
            &format!(
                "SELECT {CASE_COLUMNS} FROM cases
                 WHERE latitude IS NOT NULL AND longitude IS NOT NULL
                 ORDER BY id"
            ),
            &[],
        )
        .await?;

    Ok(rows.iter().map(case_from_row).collect())
}

/// Fetches the snapshot of all cases (geocoded or not), ordered by id.
///
/// # Errors
///
/// Returns [`DbError`] if the database query fails.
pub async fn all_cases(db: &dyn Database) -> Result<Vec<CaseRow>, DbError> {
    let rows = db
        .query_raw_params(
            &format!("SELECT {CASE_COLUMNS} FROM cases ORDER BY id"),
            &[],
        )
        .await?;

    Ok(rows.iter().map(case_from_row).collect())
}

/// Lists cases for the API, newest first, with optional status filter.
///
/// # Errors
///
/// Returns [`DbError`] if the database query fails.
pub async fn list_cases(db: &dyn Database, query: &CaseQuery) -> Result<Vec<CaseRow>, DbError> {
    let mut sql = format!("SELECT {CASE_COLUMNS} FROM cases");
    let mut params: Vec<DatabaseValue> = Vec::new();
    let mut idx = 1u32;

    if let Some(status) = query.status {
        sql.push_str(&format!(" WHERE status = ${idx}"));
        params.push(DatabaseValue::String(status.to_string()));
        idx += 1;
    }

    sql.push_str(" ORDER BY reported_at DESC");
    sql.push_str(&format!(" LIMIT ${idx}"));
    params.push(DatabaseValue::Int64(i64::from(query.limit.max(1))));
    idx += 1;
    sql.push_str(&format!(" OFFSET ${idx}"));
    params.push(DatabaseValue::Int64(i64::from(query.offset)));

    let rows = db.query_raw_params(&sql, &params).await?;
    Ok(rows.iter().map(case_from_row).collect())
}

/// Looks up a single case by its public report id.
///
/// # Errors
///
/// Returns [`DbError`] if the database query fails.
pub async fn get_case(db: &dyn Database, report_id: &str) -> Result<Option<CaseRow>, DbError> {
    let rows = db
        .query_raw_params(
            &format!("SELECT {CASE_COLUMNS} FROM cases WHERE report_id = $1"),
            &[DatabaseValue::String(report_id.to_string())],
        )
        .await?;

    Ok(rows.first().map(case_from_row))
}

/// Inserts a new case and returns the stored row.
///
/// Generates the public `report_id` (UUID v4) here so every insert path
/// gets one.
///
/// # Errors
///
/// Returns [`DbError`] if the insert fails or the returned row cannot be
/// decoded.
pub async fn insert_case(
    db: &dyn Database,
    new_case: &NewCase,
    reported_at: NaiveDateTime,
) -> Result<CaseRow, DbError> {
    let report_id = uuid::Uuid::new_v4().to_string();

    let rows = db
        .query_raw_params(
            &format!(
                "INSERT INTO cases (
                    report_id, name, age, gender, location_text,
                    latitude, longitude, reported_at, status
                 ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
                 RETURNING {CASE_COLUMNS}"
            ),
            &[
                DatabaseValue::String(report_id),
                DatabaseValue::String(new_case.name.clone()),
                DatabaseValue::Int32(new_case.age),
                DatabaseValue::String(new_case.gender.to_string()),
                DatabaseValue::String(new_case.location_text.clone()),
                new_case.latitude.map_or(DatabaseValue::Null, DatabaseValue::Real64),
                new_case.longitude.map_or(DatabaseValue::Null, DatabaseValue::Real64),
                DatabaseValue::DateTime(reported_at),
                DatabaseValue::String(CaseStatus::Missing.to_string()),
            ],
        )
        .await?;

    let row = rows.first().ok_or_else(|| DbError::Conversion {
        message: "Insert returned no case row".to_string(),
    })?;

    Ok(case_from_row(row))
}

/// Updates a case's lifecycle status. Returns `false` when no case has
/// the given report id.
///
/// # Errors
///
/// Returns [`DbError`] if the database operation fails.
pub async fn update_case_status(
    db: &dyn Database,
    report_id: &str,
    status: CaseStatus,
) -> Result<bool, DbError> {
    let rows = db
        .query_raw_params(
            "UPDATE cases SET status = $1 WHERE report_id = $2 RETURNING id",
            &[
                DatabaseValue::String(status.to_string()),
                DatabaseValue::String(report_id.to_string()),
            ],
        )
        .await?;

    Ok(!rows.is_empty())
}

/// Records a sighting against an existing case.
///
/// # Errors
///
/// Returns [`DbError::Conversion`] when the referenced case does not
/// exist, or [`DbError::Database`] if the insert fails.
pub async fn insert_sighting(
    db: &dyn Database,
    sighting: &NewSighting,
    sighted_at: NaiveDateTime,
) -> Result<(), DbError> {
    let rows = db
        .query_raw_params(
            "SELECT id FROM cases WHERE report_id = $1",
            &[DatabaseValue::String(sighting.report_id.clone())],
        )
        .await?;

    let row = rows.first().ok_or_else(|| DbError::Conversion {
        message: format!("Case not found: {}", sighting.report_id),
    })?;
    let case_id: i32 = row.to_value("id").map_err(|e| DbError::Conversion {
        message: format!("Failed to parse case id: {e}"),
    })?;

    db.exec_raw_params(
        "INSERT INTO sightings (
            case_id, location_text, latitude, longitude, description, sighted_at
         ) VALUES ($1, $2, $3, $4, $5, $6)",
        &[
            DatabaseValue::Int32(case_id),
            DatabaseValue::String(sighting.location_text.clone()),
            sighting.latitude.map_or(DatabaseValue::Null, DatabaseValue::Real64),
            sighting.longitude.map_or(DatabaseValue::Null, DatabaseValue::Real64),
            sighting
                .description
                .as_ref()
                .map_or(DatabaseValue::Null, |d| DatabaseValue::String(d.clone())),
            DatabaseValue::DateTime(sighted_at),
        ],
    )
    .await?;

    Ok(())
}

/// Total number of cases; used by the health probe.
///
/// # Errors
///
/// Returns [`DbError`] if the database query fails.
pub async fn case_count(db: &dyn Database) -> Result<i64, DbError> {
    let rows = db
        .query_raw_params("SELECT COUNT(*) as total FROM cases", &[])
        .await?;
    Ok(rows.first().map_or(0, |r| r.to_value("total").unwrap_or(0)))
}

/// Lists stored risk zones, highest score first.
///
/// # Errors
///
/// Returns [`DbError`] if the database query fails.
pub async fn list_risk_zones(db: &dyn Database) -> Result<Vec<RiskZoneRow>, DbError> {
    let rows = db
        .query_raw_params(
            "SELECT id, zone_name, latitude, longitude, risk_score,
                    incident_count, radius_km, last_updated
             FROM risk_zones
             ORDER BY risk_score DESC, id",
            &[],
        )
        .await?;

    Ok(rows
        .iter()
        .map(|row| RiskZoneRow {
            id: row.to_value("id").unwrap_or(0),
            zone_name: row.to_value("zone_name").unwrap_or_default(),
            latitude: row.to_value("latitude").unwrap_or(0.0),
            longitude: row.to_value("longitude").unwrap_or(0.0),
            risk_score: row.to_value("risk_score").unwrap_or(0.0),
            incident_count: row.to_value("incident_count").unwrap_or(0),
            radius_km: row.to_value("radius_km").unwrap_or(0.0),
            last_updated: row.to_value("last_updated").unwrap_or_default(),
        })
        .collect())
}

/// Replaces the entire zone set with a freshly computed one.
///
/// Delete-then-insert inside a single transaction: a reader either sees
/// the previous complete set or the new complete set, and a failure
/// mid-write rolls back leaving the previous set intact.
///
/// # Errors
///
/// Returns [`DbError`] if the transaction fails at any step.
pub async fn replace_risk_zones(
    db: &dyn Database,
    zones: &[ComputedZone],
    last_updated: NaiveDateTime,
) -> Result<(), DbError> {
    let txn = db.begin_transaction().await?;

    txn.exec_raw("DELETE FROM risk_zones").await?;

    for zone in zones {
        #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
        let incident_count = zone.incident_count as i32;
        txn.exec_raw_params(
            "INSERT INTO risk_zones (
                zone_name, latitude, longitude, risk_score,
                incident_count, radius_km, last_updated
             ) VALUES ($1, $2, $3, $4, $5, $6, $7)",
            &[
                DatabaseValue::String(zone.zone_name.clone()),
                DatabaseValue::Real64(zone.latitude),
                DatabaseValue::Real64(zone.longitude),
                DatabaseValue::Real64(zone.risk_score),
                DatabaseValue::Int32(incident_count),
                DatabaseValue::Real64(zone.radius_km),
                DatabaseValue::DateTime(last_updated),
            ],
        )
        .await?;
    }

    txn.commit().await?;
    Ok(())
}
