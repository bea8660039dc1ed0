//! HTTP handler functions for the alert map API.

use actix_web::{HttpResponse, web};
use alert_map_analytics::engine;
use alert_map_database::queries;
use alert_map_database_models::{CaseQuery, NewCase, NewSighting};
use alert_map_server_models::{
    ApiCase, ApiHealth, ApiInsights, ApiRiskZone, CaseListParams, ReportCasePayload,
    ReportSightingPayload, UpdateStatusPayload,
};
use chrono::Utc;

use crate::AppState;

/// `GET /api/health`
pub async fn health(state: web::Data<AppState>) -> HttpResponse {
    match queries::case_count(state.db.as_ref()).await {
        Ok(count) => HttpResponse::Ok().json(ApiHealth {
            healthy: true,
            version: env!("CARGO_PKG_VERSION").to_string(),
            case_count: Some(count),
        }),
        Err(e) => {
            log::error!("Health check failed: {e}");
            HttpResponse::ServiceUnavailable().json(ApiHealth {
                healthy: false,
                version: env!("CARGO_PKG_VERSION").to_string(),
                case_count: None,
            })
        }
    }
}

/// `GET /api/cases`
///
/// Lists cases newest-first with optional status filter.
pub async fn list_cases(
    state: web::Data<AppState>,
    params: web::Query<CaseListParams>,
) -> HttpResponse {
    let query = CaseQuery {
        status: params.status.as_deref().and_then(|s| s.parse().ok()),
        limit: params.limit.unwrap_or(100),
        offset: params.offset.unwrap_or(0),
    };

    match queries::list_cases(state.db.as_ref(), &query).await {
        Ok(rows) => {
            let cases: Vec<ApiCase> = rows.into_iter().map(ApiCase::from).collect();
            HttpResponse::Ok().json(cases)
        }
        Err(e) => {
            log::error!("Failed to list cases: {e}");
            HttpResponse::InternalServerError().json(serde_json::json!({
                "error": "Failed to list cases"
            }))
        }
    }
}

/// `POST /api/cases`
///
/// Reports a new case. When the reporter did not pin coordinates, the
/// last-seen text is geocoded best-effort; a geocoding miss still files
/// the case (it just won't participate in clustering). Alert fan-out is
/// fire-and-forget so a slow channel never delays the response.
pub async fn report_case(
    state: web::Data<AppState>,
    payload: web::Json<ReportCasePayload>,
) -> HttpResponse {
    let payload = payload.into_inner();

    if payload.name.trim().is_empty() || payload.age < 0 || payload.location_text.trim().is_empty()
    {
        return HttpResponse::BadRequest().json(serde_json::json!({
            "error": "name, age, and locationText are required"
        }));
    }

    let (latitude, longitude) = match (payload.latitude, payload.longitude) {
        (Some(lat), Some(lng)) => (Some(lat), Some(lng)),
        _ => {
            match alert_map_geocoder::geocode_or_none(
                &state.http,
                &state.geocoder_url,
                &payload.location_text,
            )
            .await
            {
                Some((lat, lng)) => (Some(lat), Some(lng)),
                None => (None, None),
            }
        }
    };

    let new_case = NewCase {
        name: payload.name,
        age: payload.age,
        gender: payload.gender,
        location_text: payload.location_text,
        latitude,
        longitude,
    };

    match queries::insert_case(state.db.as_ref(), &new_case, Utc::now().naive_utc()).await {
        Ok(row) => {
            let message = alert_map_notify::format_case_alert(
                &row.name,
                row.age,
                &row.location_text,
                &row.report_id,
            );
            let channels = state.alert_channels.clone();
            tokio::spawn(async move {
                alert_map_notify::broadcast(&channels, &message).await;
            });

            HttpResponse::Created().json(ApiCase::from(row))
        }
        Err(e) => {
            log::error!("Failed to insert case: {e}");
            HttpResponse::InternalServerError().json(serde_json::json!({
                "error": "Failed to report case"
            }))
        }
    }
}

/// `PATCH /api/cases/{report_id}/status`
pub async fn update_case_status(
    state: web::Data<AppState>,
    path: web::Path<String>,
    payload: web::Json<UpdateStatusPayload>,
) -> HttpResponse {
    let report_id = path.into_inner();

    match queries::update_case_status(state.db.as_ref(), &report_id, payload.status).await {
        Ok(true) => HttpResponse::Ok().json(serde_json::json!({
            "reportId": report_id,
            "status": payload.status,
        })),
        Ok(false) => HttpResponse::NotFound().json(serde_json::json!({
            "error": format!("No case with report id {report_id}")
        })),
        Err(e) => {
            log::error!("Failed to update case status: {e}");
            HttpResponse::InternalServerError().json(serde_json::json!({
                "error": "Failed to update case status"
            }))
        }
    }
}

/// `POST /api/sightings`
pub async fn report_sighting(
    state: web::Data<AppState>,
    payload: web::Json<ReportSightingPayload>,
) -> HttpResponse {
    let payload = payload.into_inner();

    if payload.location_text.trim().is_empty() {
        return HttpResponse::BadRequest().json(serde_json::json!({
            "error": "locationText is required"
        }));
    }

    let sighting = NewSighting {
        report_id: payload.report_id,
        location_text: payload.location_text,
        latitude: payload.latitude,
        longitude: payload.longitude,
        description: payload.description,
    };

    match queries::insert_sighting(state.db.as_ref(), &sighting, Utc::now().naive_utc()).await {
        Ok(()) => HttpResponse::Created().json(serde_json::json!({ "success": true })),
        Err(alert_map_database::DbError::Conversion { message }) => {
            HttpResponse::NotFound().json(serde_json::json!({ "error": message }))
        }
        Err(e) => {
            log::error!("Failed to insert sighting: {e}");
            HttpResponse::InternalServerError().json(serde_json::json!({
                "error": "Failed to record sighting"
            }))
        }
    }
}

/// `GET /api/analytics/risk-zones`
///
/// Returns the stored zone set, highest score first.
pub async fn risk_zones(state: web::Data<AppState>) -> HttpResponse {
    match queries::list_risk_zones(state.db.as_ref()).await {
        Ok(rows) => {
            let zones: Vec<ApiRiskZone> = rows.into_iter().map(ApiRiskZone::from).collect();
            HttpResponse::Ok().json(zones)
        }
        Err(e) => {
            log::error!("Failed to list risk zones: {e}");
            HttpResponse::InternalServerError().json(serde_json::json!({
                "error": "Failed to list risk zones"
            }))
        }
    }
}

/// `POST /api/analytics/risk-zones/update`
///
/// Triggers one engine run. At most one run may be in flight; a second
/// request while the lock is held gets 409 rather than queueing behind a
/// snapshot that will immediately be stale.
pub async fn update_risk_zones(state: web::Data<AppState>) -> HttpResponse {
    let Ok(_guard) = state.engine_lock.try_lock() else {
        return HttpResponse::Conflict().json(serde_json::json!({
            "error": "A risk zone update is already running"
        }));
    };

    match engine::update_risk_zones(state.db.as_ref(), Utc::now().naive_utc()).await {
        Ok(summary) => HttpResponse::Ok().json(summary),
        Err(e @ alert_map_analytics::AnalyticsError::Persist(_)) => {
            // Computation succeeded; only the write failed. Distinct body
            // so callers know a retry will not recompute differently.
            log::error!("Risk zone persist failed: {e}");
            HttpResponse::InternalServerError().json(serde_json::json!({
                "error": "Computed zones could not be persisted; previous zones intact"
            }))
        }
        Err(e) => {
            log::error!("Risk zone update failed: {e}");
            HttpResponse::InternalServerError().json(serde_json::json!({
                "error": "Failed to update risk zones"
            }))
        }
    }
}

/// `GET /api/analytics/demographics`
pub async fn demographics(state: web::Data<AppState>) -> HttpResponse {
    match engine::demographic_patterns(state.db.as_ref()).await {
        Ok(patterns) => HttpResponse::Ok().json(patterns),
        Err(e) => {
            log::error!("Failed to aggregate demographics: {e}");
            HttpResponse::InternalServerError().json(serde_json::json!({
                "error": "Failed to aggregate demographics"
            }))
        }
    }
}

/// `GET /api/analytics/insights`
pub async fn insights(state: web::Data<AppState>) -> HttpResponse {
    match engine::predictive_insights(state.db.as_ref(), Utc::now().naive_utc()).await {
        Ok(insights) => HttpResponse::Ok().json(ApiInsights { insights }),
        Err(e) => {
            log::error!("Failed to generate insights: {e}");
            HttpResponse::InternalServerError().json(serde_json::json!({
                "error": "Failed to generate insights"
            }))
        }
    }
}
