//! Nominatim / OpenStreetMap geocoder client.

use crate::{GeocodeError, GeocodedLocation};

/// Geocodes a free-form location query using Nominatim.
///
/// The caller is responsible for rate limiting (1 request per second for
/// the public instance).
///
/// # Errors
///
/// Returns [`GeocodeError`] if the HTTP request or response parsing
/// fails.
pub async fn geocode_freeform(
    client: &reqwest::Client,
    base_url: &str,
    query: &str,
) -> Result<Option<GeocodedLocation>, GeocodeError> {
    let resp = client
        .get(base_url)
        .query(&[("q", query), ("format", "jsonv2"), ("limit", "1")])
        .header("User-Agent", "alert-map/0.1")
        .send()
        .await?;

    if resp.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
        return Err(GeocodeError::RateLimited);
    }

    let body: serde_json::Value = resp.json().await?;
    parse_response(&body)
}

/// Parses a Nominatim JSON response.
fn parse_response(body: &serde_json::Value) -> Result<Option<GeocodedLocation>, GeocodeError> {
    let results = body.as_array().ok_or_else(|| GeocodeError::Parse {
        message: "Nominatim response is not an array".to_string(),
    })?;

    let Some(first) = results.first() else {
        return Ok(None);
    };

    let latitude = first["lat"]
        .as_str()
        .and_then(|s| s.parse::<f64>().ok())
        .ok_or_else(|| GeocodeError::Parse {
            message: "Missing lat in Nominatim response".to_string(),
        })?;

    let longitude = first["lon"]
        .as_str()
        .and_then(|s| s.parse::<f64>().ok())
        .ok_or_else(|| GeocodeError::Parse {
            message: "Missing lon in Nominatim response".to_string(),
        })?;

    let display_name = first["display_name"].as_str().map(String::from);

    Ok(Some(GeocodedLocation {
        latitude,
        longitude,
        display_name,
    }))
}
