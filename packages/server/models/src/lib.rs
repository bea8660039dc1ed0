#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! API request and response types for the alert map server.
//!
//! These types are serialized to JSON for the REST API. They are separate
//! from the database row types to allow independent evolution of the API
//! contract.

use alert_map_analytics_models::RiskLevel;
use alert_map_case_models::{CaseStatus, Gender};
use alert_map_database_models::{CaseRow, RiskZoneRow};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiHealth {
    /// Whether the service and its database are reachable.
    pub healthy: bool,
    /// Server version.
    pub version: String,
    /// Number of cases in the store (omitted when unhealthy).
    pub case_count: Option<i64>,
}

/// A missing child case as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiCase {
    /// Public case identifier.
    pub report_id: String,
    /// Child's name.
    pub name: String,
    /// Age in years.
    pub age: i32,
    /// Reported gender.
    pub gender: Gender,
    /// Free-text last-seen location.
    pub location_text: String,
    /// Last-seen latitude, if geocoded.
    pub latitude: Option<f64>,
    /// Last-seen longitude, if geocoded.
    pub longitude: Option<f64>,
    /// When the case was reported (UTC).
    pub reported_at: NaiveDateTime,
    /// Case lifecycle status.
    pub status: CaseStatus,
}

impl From<CaseRow> for ApiCase {
    fn from(row: CaseRow) -> Self {
        Self {
            report_id: row.report_id,
            name: row.name,
            age: row.age,
            gender: row.gender,
            location_text: row.location_text,
            latitude: row.latitude,
            longitude: row.longitude,
            reported_at: row.reported_at,
            status: row.status,
        }
    }
}

/// Payload for reporting a new case.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportCasePayload {
    /// Child's name.
    pub name: String,
    /// Age in years.
    pub age: i32,
    /// Reported gender.
    pub gender: Gender,
    /// Free-text last-seen location; geocoded server-side when no
    /// coordinates are provided.
    pub location_text: String,
    /// Last-seen latitude, when the reporter pinned the map.
    pub latitude: Option<f64>,
    /// Last-seen longitude, when the reporter pinned the map.
    pub longitude: Option<f64>,
}

/// Payload for updating a case's lifecycle status.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStatusPayload {
    /// New status.
    pub status: CaseStatus,
}

/// Payload for submitting a sighting.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSightingPayload {
    /// `reportId` of the case the sighting refers to.
    pub report_id: String,
    /// Free-text sighting location.
    pub location_text: String,
    /// Sighting latitude, if known.
    pub latitude: Option<f64>,
    /// Sighting longitude, if known.
    pub longitude: Option<f64>,
    /// Description of what was seen.
    pub description: Option<String>,
}

/// Query parameters for the case listing endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseListParams {
    /// Status filter (`MISSING`, `FOUND`, `CLOSED`).
    pub status: Option<String>,
    /// Maximum number of results (default 100).
    pub limit: Option<u32>,
    /// Offset for pagination.
    pub offset: Option<u32>,
}

/// A risk zone as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiRiskZone {
    /// Ordinal zone name (`Zone_1`, ...); no stability across runs.
    pub zone_name: String,
    /// Centroid latitude.
    pub latitude: f64,
    /// Centroid longitude.
    pub longitude: f64,
    /// Composite risk score in `[0, 100]`.
    pub risk_score: f64,
    /// Coarse risk band derived from the score.
    pub risk_level: RiskLevel,
    /// Number of member cases.
    pub incident_count: i32,
    /// Zone radius in kilometers.
    pub radius_km: f64,
    /// When this zone set was computed.
    pub last_updated: NaiveDateTime,
}

impl From<RiskZoneRow> for ApiRiskZone {
    fn from(row: RiskZoneRow) -> Self {
        Self {
            zone_name: row.zone_name,
            latitude: row.latitude,
            longitude: row.longitude,
            risk_score: row.risk_score,
            risk_level: RiskLevel::from_score(row.risk_score),
            incident_count: row.incident_count,
            radius_km: row.radius_km,
            last_updated: row.last_updated,
        }
    }
}

/// Insight listing response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiInsights {
    /// Natural-language insight strings.
    pub insights: Vec<String>,
}
