#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Database row types and query parameter definitions for the case store.
//!
//! These types represent the shapes of data as stored in and retrieved
//! from Postgres. They are distinct from the API response types in
//! `alert_map_server_models` — the HTTP layer converts between the two.

use alert_map_case_models::{CaseStatus, Gender};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A missing child case row as retrieved from the database.
///
/// `latitude`/`longitude` are `None` until geocoding succeeds; only rows
/// with both present participate in zone clustering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseRow {
    /// Primary key.
    pub id: i32,
    /// Public case identifier (UUID) used in URLs and alert messages.
    pub report_id: String,
    /// Child's name as reported.
    pub name: String,
    /// Age in years at time of report.
    pub age: i32,
    /// Reported gender.
    pub gender: Gender,
    /// Free-text last-seen location from the intake form.
    pub location_text: String,
    /// Last-seen latitude (WGS84), if geocoded.
    pub latitude: Option<f64>,
    /// Last-seen longitude (WGS84), if geocoded.
    pub longitude: Option<f64>,
    /// When the case was reported (UTC).
    pub reported_at: NaiveDateTime,
    /// Case lifecycle status.
    pub status: CaseStatus,
}

impl CaseRow {
    /// Whether the case has both coordinates and can participate in
    /// clustering.
    #[must_use]
    pub const fn is_geocoded(&self) -> bool {
        self.latitude.is_some() && self.longitude.is_some()
    }
}

/// Parameters for a new case insert.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCase {
    /// Child's name as reported.
    pub name: String,
    /// Age in years.
    pub age: i32,
    /// Reported gender.
    pub gender: Gender,
    /// Free-text last-seen location.
    pub location_text: String,
    /// Last-seen latitude, if already known (e.g. map pin on the form).
    pub latitude: Option<f64>,
    /// Last-seen longitude, if already known.
    pub longitude: Option<f64>,
}

/// Parameters for recording a sighting against an existing case.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewSighting {
    /// `report_id` of the case the sighting refers to.
    pub report_id: String,
    /// Free-text sighting location.
    pub location_text: String,
    /// Sighting latitude, if known.
    pub latitude: Option<f64>,
    /// Sighting longitude, if known.
    pub longitude: Option<f64>,
    /// Reporter's description of what was seen.
    pub description: Option<String>,
}

/// Filters for listing cases.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CaseQuery {
    /// Filter by lifecycle status (`None` = all statuses).
    pub status: Option<CaseStatus>,
    /// Maximum number of results to return.
    pub limit: u32,
    /// Number of results to skip.
    pub offset: u32,
}

/// A risk zone row as stored in the database.
///
/// Zones are fully recomputed on every engine run; `id` and `zone_name`
/// carry no identity across runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskZoneRow {
    /// Primary key.
    pub id: i32,
    /// Ordinal name in discovery order (`Zone_1`, `Zone_2`, ...).
    pub zone_name: String,
    /// Zone centroid latitude (arithmetic mean of members).
    pub latitude: f64,
    /// Zone centroid longitude (arithmetic mean of members).
    pub longitude: f64,
    /// Composite risk score in `[0, 100]`.
    pub risk_score: f64,
    /// Number of member cases (always >= 2).
    pub incident_count: i32,
    /// Zone radius in kilometers (constant 2.0).
    pub radius_km: f64,
    /// When this zone set was computed.
    pub last_updated: NaiveDateTime,
}
