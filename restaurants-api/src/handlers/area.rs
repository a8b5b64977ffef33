use axum::{extract::State, response::Json, routing::get, Router};
use diesel::OptionalExtension;
use diesel_async::RunQueryDsl;
use tracing::instrument;

use crate::error::ApiError;
use crate::extract::PathParam;
use crate::mapper;
use crate::models::*;
use crate::queries;

use super::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/api/areas/{area_id}/restaurants", get(get_area_restaurants))
}

#[utoipa::path(
    get,
    path = "/api/areas/{area_id}/restaurants",
    responses(
        (status = 200, description = "Area with its restaurants", body = AreaResponse),
        (status = 404, description = "Area not found", body = ApiErrorResponse),
        (status = 422, description = "Area ID is not an integer", body = ApiErrorResponse),
        (status = 500, description = "Server error", body = ApiErrorResponse),
    ),
    params(
        ("area_id" = i32, Path, description = "Area ID")
    ),
    tag = "areas"
)]
#[instrument(skip(state))]
pub async fn get_area_restaurants(
    State(state): State<AppState>,
    PathParam(area_id): PathParam<i32>,
) -> Result<Json<AreaResponse>, ApiError> {
    let mut conn = state.connection().await?;

    let area = queries::area_with_restaurants(area_id)
        .get_result::<AreaSummary>(&mut *conn)
        .await
        .optional()?
        .ok_or_else(|| ApiError::area_not_found(area_id))?;

    Ok(Json(AreaResponse {
        area: mapper::map_row(area)?,
    }))
}
