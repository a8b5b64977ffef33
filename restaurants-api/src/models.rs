use diesel::prelude::*;
use diesel::sql_types::{Array, BigInt, Double, Text};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::mapper::{LabeledRow, Record};
use crate::schema::{areas, ratings, restaurants};

#[derive(QueryableByName, Debug, Clone, PartialEq, ToSchema)]
#[diesel(table_name = restaurants)]
pub struct Restaurant {
    pub restaurant_id: i32,
    pub restaurant_name: String,
    pub area_id: i32,
    pub cuisine: String,
    pub website: String,
}

impl LabeledRow for Restaurant {
    const COLUMNS: &'static [&'static str] = &[
        "restaurant_id",
        "restaurant_name",
        "area_id",
        "cuisine",
        "website",
    ];

    fn into_values(self) -> Vec<Value> {
        vec![
            self.restaurant_id.into(),
            self.restaurant_name.into(),
            self.area_id.into(),
            self.cuisine.into(),
            self.website.into(),
        ]
    }
}

/// A restaurant row joined with the rounded mean of its ratings.
#[derive(QueryableByName, Debug, Clone, PartialEq, ToSchema)]
#[diesel(table_name = restaurants)]
pub struct RatedRestaurant {
    pub restaurant_id: i32,
    pub restaurant_name: String,
    pub area_id: i32,
    pub cuisine: String,
    pub website: String,
    #[diesel(sql_type = Double)]
    pub average_rating: f64,
}

impl LabeledRow for RatedRestaurant {
    const COLUMNS: &'static [&'static str] = &[
        "restaurant_id",
        "restaurant_name",
        "area_id",
        "cuisine",
        "website",
        "average_rating",
    ];

    fn into_values(self) -> Vec<Value> {
        vec![
            self.restaurant_id.into(),
            self.restaurant_name.into(),
            self.area_id.into(),
            self.cuisine.into(),
            self.website.into(),
            self.average_rating.into(),
        ]
    }
}

/// An area with the restaurants currently assigned to it.
#[derive(QueryableByName, Debug, Clone, PartialEq, ToSchema)]
#[diesel(table_name = areas)]
pub struct AreaSummary {
    pub area_id: i32,
    pub area_name: String,
    #[diesel(sql_type = BigInt)]
    pub total_restaurants: i64,
    #[diesel(sql_type = Array<Text>)]
    pub restaurants: Vec<String>,
}

impl LabeledRow for AreaSummary {
    const COLUMNS: &'static [&'static str] =
        &["area_id", "area_name", "total_restaurants", "restaurants"];

    fn into_values(self) -> Vec<Value> {
        vec![
            self.area_id.into(),
            self.area_name.into(),
            self.total_restaurants.into(),
            self.restaurants.into(),
        ]
    }
}

#[derive(Insertable, Deserialize, Debug, Clone, PartialEq)]
#[diesel(table_name = areas)]
pub struct NewArea {
    pub area_name: String,
}

#[derive(Insertable, Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
#[diesel(table_name = restaurants)]
pub struct NewRestaurant {
    /// Name of the restaurant
    pub restaurant_name: String,
    /// Area the restaurant belongs to
    pub area_id: i32,
    /// Cuisine label, e.g. "Italian"
    pub cuisine: String,
    /// Website URL
    pub website: String,
}

#[derive(Insertable, Deserialize, Debug, Clone, PartialEq)]
#[diesel(table_name = ratings)]
pub struct NewRating {
    pub restaurant_id: i32,
    pub rating: i32,
}

#[derive(Serialize, Deserialize, Debug, Default, PartialEq, ToSchema)]
pub struct UpdateRestaurantArea {
    /// Area to move the restaurant to. Zero is treated as absent.
    pub area_id: Option<i32>,
}

#[derive(Serialize, Debug, ToSchema)]
pub struct RootResponse {
    pub message: String,
}

#[derive(Serialize, Debug, ToSchema)]
pub struct ListRestaurantsResponse {
    #[schema(value_type = Vec<RatedRestaurant>)]
    pub restaurants: Vec<Record>,
}

#[derive(Serialize, Debug, ToSchema)]
pub struct RestaurantResponse {
    #[schema(value_type = Restaurant)]
    pub restaurant: Record,
}

#[derive(Serialize, Debug, ToSchema)]
pub struct AreaResponse {
    #[schema(value_type = AreaSummary)]
    pub area: Record,
}

#[derive(Serialize, Debug, ToSchema)]
pub struct ApiErrorResponse {
    /// Human readable error message
    pub detail: String,
}
