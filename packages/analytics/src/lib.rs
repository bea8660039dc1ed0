#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Risk zone clustering and composite risk scoring engine.
//!
//! The core of the platform's analytics: a single-link spatial clustering
//! pass over geocoded case coordinates ([`clustering`]), a multi-factor
//! scoring function combining incident density, recency decay, and
//! victim-age vulnerability ([`scoring`]), frequency aggregation over the
//! full case snapshot ([`demographics`]), and fixed-threshold insight text
//! ([`insights`]). The [`engine`] module ties these to the case store:
//! snapshot in, full-replacement zone set out.
//!
//! All computation is pure and synchronous over an in-memory snapshot; the
//! scoring time is an explicit parameter so results are reproducible.

pub mod clustering;
pub mod demographics;
pub mod engine;
pub mod insights;
pub mod scoring;

use thiserror::Error;

/// Radius of a risk zone in kilometers; also the clustering distance
/// threshold. Policy constant, not a tunable default.
pub const ZONE_RADIUS_KM: f64 = 2.0;

/// Minimum number of member cases for a cluster to become a zone.
pub const MIN_ZONE_CASES: usize = 2;

/// Errors from the risk zone engine.
///
/// Snapshot reads, in-memory computation, and zone persistence fail
/// distinctly so a caller can retry the write without recomputing, or
/// recompute without touching the store.
#[derive(Debug, Error)]
pub enum AnalyticsError {
    /// Reading the case snapshot from the store failed; nothing was
    /// computed or written.
    #[error("Failed to read case snapshot: {0}")]
    Snapshot(#[source] alert_map_database::DbError),

    /// Computation succeeded but replacing the zone set failed. The
    /// transaction rolled back; the previous zone set is intact.
    #[error("Failed to persist risk zones: {0}")]
    Persist(#[source] alert_map_database::DbError),

    /// Data conversion error.
    #[error("Conversion error: {message}")]
    Conversion {
        /// Description of what went wrong.
        message: String,
    },
}
