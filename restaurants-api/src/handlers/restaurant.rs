use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
    routing::{delete, get},
    Router,
};
use diesel::OptionalExtension;
use diesel_async::RunQueryDsl;
use tracing::instrument;

use crate::error::ApiError;
use crate::extract::{JsonBody, PathParam};
use crate::mapper;
use crate::models::*;
use crate::queries;

use super::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/api/restaurants",
            get(list_restaurants).post(create_restaurant),
        )
        .route(
            "/api/restaurants/{restaurant_id}",
            delete(delete_restaurant).patch(update_restaurant_area),
        )
}

#[utoipa::path(
    get,
    path = "/api/restaurants",
    responses(
        (status = 200, description = "Rated restaurants with their average rating", body = ListRestaurantsResponse),
        (status = 500, description = "Server error", body = ApiErrorResponse),
    ),
    tag = "restaurants"
)]
#[instrument(skip(state))]
pub async fn list_restaurants(
    State(state): State<AppState>,
) -> Result<Json<ListRestaurantsResponse>, ApiError> {
    let mut conn = state.connection().await?;

    let restaurants = queries::list_restaurants()
        .load::<RatedRestaurant>(&mut *conn)
        .await?;

    Ok(Json(ListRestaurantsResponse {
        restaurants: mapper::map_rows(restaurants)?,
    }))
}

#[utoipa::path(
    post,
    path = "/api/restaurants",
    request_body = NewRestaurant,
    responses(
        (status = 201, description = "Restaurant created", body = RestaurantResponse),
        (status = 422, description = "Missing or malformed field", body = ApiErrorResponse),
        (status = 500, description = "Server error, including unknown area", body = ApiErrorResponse),
    ),
    tag = "restaurants"
)]
#[instrument(skip(state))]
pub async fn create_restaurant(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<NewRestaurant>,
) -> Result<(StatusCode, Json<RestaurantResponse>), ApiError> {
    let mut conn = state.connection().await?;

    // An unknown area_id fails the foreign key and surfaces as a server error.
    let restaurant = queries::insert_restaurant(payload)
        .get_result::<Restaurant>(&mut *conn)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(RestaurantResponse {
            restaurant: mapper::map_row(restaurant)?,
        }),
    ))
}

#[utoipa::path(
    delete,
    path = "/api/restaurants/{restaurant_id}",
    responses(
        (status = 204, description = "Restaurant deleted"),
        (status = 404, description = "Restaurant not found", body = ApiErrorResponse),
        (status = 500, description = "Server error", body = ApiErrorResponse),
    ),
    params(
        ("restaurant_id" = i32, Path, description = "Restaurant ID")
    ),
    tag = "restaurants"
)]
#[instrument(skip(state))]
pub async fn delete_restaurant(
    State(state): State<AppState>,
    PathParam(restaurant_id): PathParam<i32>,
) -> Result<StatusCode, ApiError> {
    let mut conn = state.connection().await?;

    queries::delete_restaurant(restaurant_id)
        .get_result::<Restaurant>(&mut *conn)
        .await
        .optional()?
        .ok_or_else(|| ApiError::restaurant_not_found(restaurant_id))?;

    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    patch,
    path = "/api/restaurants/{restaurant_id}",
    request_body = UpdateRestaurantArea,
    responses(
        (status = 200, description = "Restaurant moved to the new area", body = RestaurantResponse),
        (status = 400, description = "area_id missing or zero", body = ApiErrorResponse),
        (status = 404, description = "Restaurant not found", body = ApiErrorResponse),
        (status = 500, description = "Server error, including unknown area", body = ApiErrorResponse),
    ),
    params(
        ("restaurant_id" = i32, Path, description = "Restaurant ID")
    ),
    tag = "restaurants"
)]
#[instrument(skip(state))]
pub async fn update_restaurant_area(
    State(state): State<AppState>,
    PathParam(restaurant_id): PathParam<i32>,
    JsonBody(payload): JsonBody<UpdateRestaurantArea>,
) -> Result<Json<RestaurantResponse>, ApiError> {
    let area_id = required_area_id(&payload)?;

    let mut conn = state.connection().await?;

    let restaurant = queries::update_restaurant_area(restaurant_id, area_id)
        .get_result::<Restaurant>(&mut *conn)
        .await
        .optional()?
        .ok_or_else(|| ApiError::restaurant_not_found(restaurant_id))?;

    Ok(Json(RestaurantResponse {
        restaurant: mapper::map_row(restaurant)?,
    }))
}

/// Area ids are SERIAL and start at 1, so zero is rejected along with a
/// missing field.
fn required_area_id(payload: &UpdateRestaurantArea) -> Result<i32, ApiError> {
    match payload.area_id {
        Some(area_id) if area_id != 0 => Ok(area_id),
        _ => Err(ApiError::empty_body()),
    }
}
