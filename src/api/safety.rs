//! Safety snapshot endpoint

use actix_web::{HttpResponse, get, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::api::error::{ApiError, ErrorResponse, query_config};
use crate::app::AppState;
use crate::model::snapshot::score_percent;
use crate::model::{AreaScore, Location, SafetyLevel, SafetySnapshot};

/// Query parameters for the safety snapshot
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct SafetyDataParams {
    /// Display name of the location
    pub name: Option<String>,
    /// Latitude in degrees (defaults to the configured location)
    pub lat: Option<f64>,
    /// Longitude in degrees (defaults to the configured location)
    pub lon: Option<f64>,
    /// Search radius in kilometers
    pub radius: Option<f64>,
}

impl SafetyDataParams {
    /// Resolve against the default location and validate
    pub fn resolve(&self, default: &Location) -> Result<Location, ApiError> {
        let custom_coordinates = self.lat.is_some() || self.lon.is_some();
        let latitude = self.lat.unwrap_or(default.latitude);
        let longitude = self.lon.unwrap_or(default.longitude);

        let name = match &self.name {
            Some(name) => name.clone(),
            None if custom_coordinates => format!("{latitude:.4}, {longitude:.4}"),
            None => default.name.clone(),
        };

        let location = Location::new(
            name,
            latitude,
            longitude,
            self.radius.unwrap_or(default.radius_km),
        );
        location.validate().map_err(ApiError::BadRequest)?;
        Ok(location)
    }
}

/// Area score decorated for display
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AreaView {
    pub id: String,
    pub name: String,
    pub score: f64,
    pub percent: u8,
    pub level: SafetyLevel,
    pub label: String,
    pub insights: String,
}

impl From<&AreaScore> for AreaView {
    fn from(area: &AreaScore) -> Self {
        let level = SafetyLevel::from_score(area.score);
        Self {
            id: area.id.clone(),
            name: area.name.clone(),
            score: area.score,
            percent: score_percent(area.score),
            level,
            label: level.label().to_string(),
            insights: area.insights.clone(),
        }
    }
}

/// Safety snapshot as served to the dashboard
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SafetyDataResponse {
    pub location: Location,
    pub overall_score: f64,
    pub overall_percent: u8,
    pub overall_level: SafetyLevel,
    pub overall_label: String,
    pub areas: Vec<AreaView>,
    pub narrative: String,
    pub captured_at: DateTime<Utc>,
}

impl SafetyDataResponse {
    pub fn new(location: Location, snapshot: &SafetySnapshot) -> Self {
        let level = SafetyLevel::from_score(snapshot.overall_score());
        Self {
            location,
            overall_score: snapshot.overall_score(),
            overall_percent: score_percent(snapshot.overall_score()),
            overall_level: level,
            overall_label: level.label().to_string(),
            areas: snapshot.areas().iter().map(AreaView::from).collect(),
            narrative: snapshot.narrative().to_string(),
            captured_at: snapshot.captured_at(),
        }
    }
}

/// Get the current safety snapshot for a location
#[utoipa::path(
    get,
    path = "/api/safety-data",
    params(SafetyDataParams),
    responses(
        (status = 200, description = "Safety snapshot", body = SafetyDataResponse),
        (status = 400, description = "Invalid location", body = ErrorResponse),
        (status = 503, description = "No data source could produce a snapshot", body = ErrorResponse)
    ),
    tag = "safety"
)]
#[get("/api/safety-data")]
pub async fn get_safety_data(
    state: web::Data<AppState>,
    query: web::Query<SafetyDataParams>,
) -> Result<HttpResponse, ApiError> {
    let location = query.resolve(&state.default_location)?;
    let request = state.request_for(location.clone());

    let snapshot = state.safety_policy.acquire(&request).await?;

    Ok(HttpResponse::Ok().json(SafetyDataResponse::new(location, &snapshot)))
}

/// Configure safety routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(query_config()).service(get_safety_data);
}
