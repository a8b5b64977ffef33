pub mod area;
pub mod restaurant;

use axum::{response::Json, routing::get, Router};
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer, trace::TraceLayer};
use tracing::instrument;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::db::{Pool, PooledConnection};
use crate::error::{handle_panic, ApiError};
use crate::models::RootResponse;

#[derive(Clone)]
pub struct AppState {
    pub pool: Pool,
}

impl AppState {
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }

    /// Checks out one connection for the current request.
    async fn connection(&self) -> Result<PooledConnection, ApiError> {
        Ok(self.pool.get().await?)
    }
}

/// Builds the full application. Errors raised by any route go through
/// `ApiError`'s response mapping; panics are caught and answered the same way.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api", get(root))
        .merge(area::router())
        .merge(restaurant::router())
        .merge(SwaggerUi::new("/docs").url("/openapi.json", ApiDoc::openapi()))
        .with_state(state)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

#[utoipa::path(
    get,
    path = "/api",
    responses(
        (status = 200, description = "Service is up", body = RootResponse),
    ),
    tag = "health"
)]
#[instrument]
pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "all ok".to_string(),
    })
}

#[derive(OpenApi)]
#[openapi(
    paths(
        root,
        area::get_area_restaurants,
        restaurant::list_restaurants,
        restaurant::create_restaurant,
        restaurant::delete_restaurant,
        restaurant::update_restaurant_area,
    ),
    components(
        schemas(
            crate::models::RootResponse,
            crate::models::Restaurant,
            crate::models::RatedRestaurant,
            crate::models::AreaSummary,
            crate::models::NewRestaurant,
            crate::models::UpdateRestaurantArea,
            crate::models::ListRestaurantsResponse,
            crate::models::RestaurantResponse,
            crate::models::AreaResponse,
            crate::models::ApiErrorResponse
        )
    ),
    tags(
        (name = "health", description = "Liveness endpoint"),
        (name = "areas", description = "Areas and the restaurants in them"),
        (name = "restaurants", description = "Restaurant management endpoints")
    ),
    info(
        title = "Restaurants API",
        description = "CRUD over areas, restaurants and their ratings",
        version = "1.0.0"
    )
)]
pub struct ApiDoc;
