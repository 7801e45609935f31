//! Systems map endpoint

use actix_web::{HttpResponse, get, web};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::api::error::{ApiError, ErrorResponse, query_config};
use crate::app::AppState;
use crate::model::SystemsMap;

#[derive(Debug, Deserialize, IntoParams)]
pub struct SystemsDataParams {
    /// City the map should describe (defaults to the configured location)
    pub name: Option<String>,
}

/// Get the causal factors map and leverage points
#[utoipa::path(
    get,
    path = "/api/systems-data",
    params(SystemsDataParams),
    responses(
        (status = 200, description = "Systems map", body = SystemsMap),
        (status = 503, description = "No data source could produce a map", body = ErrorResponse)
    ),
    tag = "systems"
)]
#[get("/api/systems-data")]
pub async fn get_systems_data(
    state: web::Data<AppState>,
    query: web::Query<SystemsDataParams>,
) -> Result<HttpResponse, ApiError> {
    let mut location = state.default_location.clone();
    if let Some(name) = query.name.as_deref().map(str::trim)
        && !name.is_empty()
    {
        location.name = name.to_string();
    }

    let map = state
        .systems_policy
        .acquire(&state.request_for(location))
        .await?;

    Ok(HttpResponse::Ok().json(map))
}

/// Configure systems routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(query_config()).service(get_systems_data);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_support::state_with_systems;
    use crate::service::AcquisitionPolicy;
    use crate::service::acquisition::{GenerativeTier, RemoteTier};
    use actix_web::{App, test};

    #[actix_web::test]
    async fn test_serves_static_map() {
        let state = state_with_systems(AcquisitionPolicy::standard(
            RemoteTier::unconfigured(),
            GenerativeTier::unconfigured(),
        ));
        let app = test::init_service(App::new().app_data(state).configure(configure)).await;

        let req = test::TestRequest::get()
            .uri("/api/systems-data?name=Mumbai")
            .to_request();
        let map: SystemsMap = test::call_and_read_body_json(&app, req).await;

        assert_eq!(map.elements.len(), 8);
        assert_eq!(map.leverage_points.len(), 4);
        assert!(map.validate().is_ok());
    }
}
