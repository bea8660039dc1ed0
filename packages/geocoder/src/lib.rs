#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Geocoding collaborator for free-text last-seen locations.
//!
//! Thin client for the Nominatim / OpenStreetMap search API: a location
//! string goes in, `Some((lat, lng))` or `None` comes out. The engine
//! treats this as a black box — a case that fails to geocode simply never
//! participates in clustering.
//!
//! The public Nominatim instance allows **1 request per second**; callers
//! geocode one case at report time, which stays well under that, but bulk
//! backfills must rate-limit themselves.
//!
//! See <https://nominatim.org/release-docs/develop/api/Search/>

pub mod nominatim;

use thiserror::Error;

/// Default search endpoint for the public Nominatim instance.
pub const DEFAULT_NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org/search";

/// Errors that can occur while geocoding.
#[derive(Debug, Error)]
pub enum GeocodeError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider rejected the request for exceeding its rate limit.
    #[error("Geocoding provider rate limit exceeded")]
    RateLimited,

    /// Response body was not in the expected shape.
    #[error("Geocode parse error: {message}")]
    Parse {
        /// Description of what went wrong.
        message: String,
    },
}

/// A geocoding result with coordinates and the provider's canonical name.
#[derive(Debug, Clone, PartialEq)]
pub struct GeocodedLocation {
    /// Latitude (WGS84).
    pub latitude: f64,
    /// Longitude (WGS84).
    pub longitude: f64,
    /// Display name returned by the provider, when present.
    pub display_name: Option<String>,
}

/// Returns the Nominatim base URL from `NOMINATIM_URL`, falling back to
/// the public instance.
#[must_use]
pub fn base_url_from_env() -> String {
    std::env::var("NOMINATIM_URL").unwrap_or_else(|_| DEFAULT_NOMINATIM_URL.to_string())
}

/// Geocodes a free-text location, collapsing every failure to `None`.
///
/// This is the collaborator contract the case intake path relies on:
/// geocoding is best-effort and an error must never fail a case report.
/// Failures are logged and swallowed.
pub async fn geocode_or_none(
    client: &reqwest::Client,
    base_url: &str,
    query: &str,
) -> Option<(f64, f64)> {
    match nominatim::geocode_freeform(client, base_url, query).await {
        Ok(Some(location)) => Some((location.latitude, location.longitude)),
        Ok(None) => {
            log::info!("No geocoding match for location: {query}");
            None
        }
        Err(e) => {
            log::warn!("Geocoding failed for location '{query}': {e}");
            None
        }
    }
}
