use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use log::error;
use std::sync::Arc;

use crate::{
    all_stations, last_year_precipitation, most_active_station_temperatures,
    temperature_summary, AppState, DailyTemperatureSummary, DateRange, Error,
    PrecipitationByDate, Station, TemperatureObservation,
};

fn to_error_response(resource: &str, err: Error) -> (StatusCode, String) {
    error!("error retrieving {}: {}", resource, err);
    if err.is_unavailable() {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            String::from("Climate data store is unavailable"),
        )
    } else {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to retrieve {}", resource),
        )
    }
}

#[utoipa::path(
    get,
    path = "/api/v1.0/precipitation",
    responses(
        (status = OK, description = "Precipitation readings for the last year of data, keyed by date", body = PrecipitationByDate),
        (status = SERVICE_UNAVAILABLE, description = "Climate data store is unreachable"),
        (status = INTERNAL_SERVER_ERROR, description = "Failed to retrieve precipitation")
    ))]
pub async fn precipitation(
    State(state): State<Arc<AppState>>,
) -> Result<Json<PrecipitationByDate>, (StatusCode, String)> {
    last_year_precipitation(state.climate_db.as_ref())
        .await
        .map(Json)
        .map_err(|e| to_error_response("precipitation", e))
}

#[utoipa::path(
    get,
    path = "/api/v1.0/stations",
    responses(
        (status = OK, description = "Every observation station", body = Vec<Station>),
        (status = SERVICE_UNAVAILABLE, description = "Climate data store is unreachable"),
        (status = INTERNAL_SERVER_ERROR, description = "Failed to retrieve stations")
    ))]
pub async fn stations(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Station>>, (StatusCode, String)> {
    all_stations(state.climate_db.as_ref())
        .await
        .map(Json)
        .map_err(|e| to_error_response("stations", e))
}

#[utoipa::path(
    get,
    path = "/api/v1.0/tobs",
    responses(
        (status = OK, description = "Last year of observed temperatures for the most active station", body = Vec<TemperatureObservation>),
        (status = SERVICE_UNAVAILABLE, description = "Climate data store is unreachable"),
        (status = INTERNAL_SERVER_ERROR, description = "Failed to retrieve temperature observations")
    ))]
pub async fn tobs(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<TemperatureObservation>>, (StatusCode, String)> {
    most_active_station_temperatures(state.climate_db.as_ref())
        .await
        .map(Json)
        .map_err(|e| to_error_response("temperature observations", e))
}

#[utoipa::path(
    get,
    path = "/api/v1.0/{start}",
    params(
        ("start" = String, Path, description = "First date to include, YYYY-MM-DD"),
    ),
    responses(
        (status = OK, description = "Daily TMIN/TAVG/TMAX from start onwards", body = Vec<DailyTemperatureSummary>),
        (status = SERVICE_UNAVAILABLE, description = "Climate data store is unreachable"),
        (status = INTERNAL_SERVER_ERROR, description = "Failed to retrieve temperature summary")
    ))]
pub async fn temperatures_from(
    State(state): State<Arc<AppState>>,
    Path(start): Path<String>,
) -> Result<Json<Vec<DailyTemperatureSummary>>, (StatusCode, String)> {
    summarize(&state, DateRange::starting(start)).await
}

#[utoipa::path(
    get,
    path = "/api/v1.0/{start}/{end}",
    params(
        ("start" = String, Path, description = "First date to include, YYYY-MM-DD"),
        ("end" = String, Path, description = "Last date to include, YYYY-MM-DD"),
    ),
    responses(
        (status = OK, description = "Daily TMIN/TAVG/TMAX between start and end inclusive", body = Vec<DailyTemperatureSummary>),
        (status = SERVICE_UNAVAILABLE, description = "Climate data store is unreachable"),
        (status = INTERNAL_SERVER_ERROR, description = "Failed to retrieve temperature summary")
    ))]
pub async fn temperatures_between(
    State(state): State<Arc<AppState>>,
    Path((start, end)): Path<(String, String)>,
) -> Result<Json<Vec<DailyTemperatureSummary>>, (StatusCode, String)> {
    summarize(&state, DateRange::between(start, end)).await
}

async fn summarize(
    state: &AppState,
    range: DateRange,
) -> Result<Json<Vec<DailyTemperatureSummary>>, (StatusCode, String)> {
    temperature_summary(state.climate_db.as_ref(), &range)
        .await
        .map(Json)
        .map_err(|e| to_error_response("temperature summary", e))
}
