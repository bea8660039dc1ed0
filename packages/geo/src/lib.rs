#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Great-circle distance helpers for case clustering.
//!
//! The clustering engine only ever asks one question of geometry: "how far
//! apart are these two last-seen points, in kilometers?" Everything here is
//! plain haversine on a spherical Earth — at the 2 km zone scale the
//! ellipsoidal error is far below the noise in geocoded coordinates.

/// Mean Earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine great-circle distance between two points, in kilometers.
///
/// Symmetric in its arguments up to floating-point rounding.
#[must_use]
pub fn haversine_km(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let dlat = (lat2 - lat1).to_radians();
    let dlng = (lng2 - lng1).to_radians();

    let a = (dlat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (dlng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Distance between two optionally-geocoded points.
///
/// Returns [`f64::INFINITY`] when any of the four coordinates is missing,
/// so an ungeocoded case can never satisfy a distance threshold.
#[must_use]
pub fn distance_km(
    lat1: Option<f64>,
    lng1: Option<f64>,
    lat2: Option<f64>,
    lng2: Option<f64>,
) -> f64 {
    match (lat1, lng1, lat2, lng2) {
        (Some(lat1), Some(lng1), Some(lat2), Some(lng2)) => haversine_km(lat1, lng1, lat2, lng2),
        _ => f64::INFINITY,
    }
}
