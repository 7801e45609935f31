//! Civic action points endpoint

use std::collections::BTreeMap;

use actix_web::{HttpResponse, get, web};
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::app::AppState;
use crate::model::action::{ActionPoint, LeverageLevel};

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ActionPointsResponse {
    pub action_points: Vec<ActionPoint>,
    pub leverage_points_analysis: BTreeMap<String, LeverageLevel>,
    pub last_updated: DateTime<Utc>,
}

/// Get suggested civic actions and the leverage-level analysis
#[utoipa::path(
    get,
    path = "/api/action-points",
    responses(
        (status = 200, description = "Action points", body = ActionPointsResponse)
    ),
    tag = "actions"
)]
#[get("/api/action-points")]
pub async fn get_action_points(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(ActionPointsResponse {
        action_points: state.actions.action_points.clone(),
        leverage_points_analysis: state.actions.leverage_points_analysis.clone(),
        last_updated: Utc::now(),
    })
}

/// Configure action routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(get_action_points);
}
