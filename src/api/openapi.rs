//! OpenAPI document endpoints

use actix_web::{HttpResponse, Responder, get};
use utoipa::OpenApi;

use crate::api::{actions, error, health, safety, systems};

#[derive(OpenApi)]
#[openapi(
    info(title = "SafeTransit India API"),
    paths(
        safety::get_safety_data,
        systems::get_systems_data,
        actions::get_action_points,
        health::liveness,
        health::readiness,
    ),
    components(schemas(
        safety::SafetyDataResponse,
        safety::AreaView,
        crate::model::SystemsMap,
        actions::ActionPointsResponse,
        crate::model::action::ActionPoint,
        crate::model::action::LeverageLevel,
        crate::model::action::Rating,
        crate::model::action::StatValue,
        crate::model::SafetyLevel,
        crate::model::Location,
        error::ErrorResponse,
        health::HealthStatus,
        health::ReadinessStatus,
    )),
    tags(
        (name = "safety", description = "Safety snapshots for a location"),
        (name = "systems", description = "Causal factors and leverage points"),
        (name = "actions", description = "Suggested civic actions"),
        (name = "health", description = "Probes"),
    )
)]
pub struct ApiDoc;

/// Serve the OpenAPI document as JSON
#[get("/openapi.json")]
pub async fn openapi_json() -> impl Responder {
    HttpResponse::Ok().json(ApiDoc::openapi())
}

/// Serve the OpenAPI document as YAML
#[get("/openapi.yaml")]
pub async fn openapi_yaml() -> impl Responder {
    match ApiDoc::openapi().to_yaml() {
        Ok(yaml) => HttpResponse::Ok().content_type("text/yaml").body(yaml),
        Err(e) => {
            tracing::error!(error = %e, "Failed to render OpenAPI YAML");
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// Configure OpenAPI routes
pub fn configure(cfg: &mut actix_web::web::ServiceConfig) {
    cfg.service(openapi_json).service(openapi_yaml);
}
