//! Health check endpoints for Kubernetes liveness and readiness probes

use actix_web::{HttpResponse, Responder, get, web};
use serde::Serialize;
use utoipa::ToSchema;

use crate::app::AppState;

#[derive(Serialize, ToSchema)]
pub struct HealthStatus {
    pub status: String,
    pub version: String,
}

#[derive(Serialize, ToSchema)]
pub struct ReadinessStatus {
    pub status: String,
    pub version: String,
    pub sources: SourceHealth,
}

#[derive(Serialize, ToSchema)]
pub struct SourceHealth {
    pub remote_safety: String,
    pub remote_systems: String,
    pub generative: String,
    pub fallback: String,
}

fn describe(configured: bool) -> String {
    let status = if configured { "configured" } else { "disabled" };
    status.to_string()
}

/// Liveness probe endpoint
///
/// Always returns 200 OK if the service is running.
#[utoipa::path(
    get,
    path = "/health/live",
    responses(
        (status = 200, description = "Service is alive", body = HealthStatus)
    ),
    tag = "health"
)]
#[get("/health/live")]
pub async fn liveness() -> impl Responder {
    HttpResponse::Ok().json(HealthStatus {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Readiness probe endpoint
///
/// The compiled-in fallback means the service can always answer, so this
/// reports ready and lists which live sources are configured.
#[utoipa::path(
    get,
    path = "/health/ready",
    responses(
        (status = 200, description = "Service is ready", body = ReadinessStatus)
    ),
    tag = "health"
)]
#[get("/health/ready")]
pub async fn readiness(state: web::Data<AppState>) -> impl Responder {
    let sources = state.sources;

    HttpResponse::Ok().json(ReadinessStatus {
        status: "ready".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        sources: SourceHealth {
            remote_safety: describe(sources.remote_safety),
            remote_systems: describe(sources.remote_systems),
            generative: describe(sources.generative),
            fallback: "compiled_in".to_string(),
        },
    })
}

/// Configure health check routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(liveness).service(readiness);
}
