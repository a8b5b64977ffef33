use std::fs;
use std::path::Path;

use diesel::{insert_into, sql_query};
use diesel_async::{scoped_futures::ScopedFutureExt, AsyncConnection, AsyncPgConnection, RunQueryDsl};
use serde::Deserialize;
use tracing::info;

use crate::models::{NewArea, NewRating, NewRestaurant};
use crate::schema::{areas, ratings, restaurants};

#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("failed to read seed file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid seed file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("failed to write seed data: {0}")]
    Database(#[from] diesel::result::Error),
}

/// Rows to load. Ids restart at 1, so `area_id` and `restaurant_id` refer
/// to the 1-based position of the row in `areas` and `restaurants`.
#[derive(Debug, Deserialize, PartialEq)]
pub struct SeedData {
    pub areas: Vec<NewArea>,
    pub restaurants: Vec<NewRestaurant>,
    #[serde(default)]
    pub ratings: Vec<NewRating>,
}

impl SeedData {
    pub fn from_file(path: &Path) -> Result<Self, SeedError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }
}

/// Replaces every row in the three tables with `data`, atomically.
pub async fn seed(conn: &mut AsyncPgConnection, data: &SeedData) -> Result<(), SeedError> {
    conn.transaction(|conn| {
        async move {
            sql_query("TRUNCATE ratings, restaurants, areas RESTART IDENTITY CASCADE")
                .execute(conn)
                .await?;
            insert_into(areas::table)
                .values(&data.areas)
                .execute(conn)
                .await?;
            insert_into(restaurants::table)
                .values(&data.restaurants)
                .execute(conn)
                .await?;
            if !data.ratings.is_empty() {
                insert_into(ratings::table)
                    .values(&data.ratings)
                    .execute(conn)
                    .await?;
            }
            Ok::<_, diesel::result::Error>(())
        }
        .scope_boxed()
    })
    .await?;

    info!(
        areas = data.areas.len(),
        restaurants = data.restaurants.len(),
        ratings = data.ratings.len(),
        "seeded database"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_seed_data() {
        let data: SeedData = serde_json::from_str(
            r#"{
                "areas": [{"area_name": "Northern Quarter"}],
                "restaurants": [{
                    "restaurant_name": "Rudys Pizza",
                    "area_id": 1,
                    "cuisine": "Neapolitan Pizzeria",
                    "website": "http://rudyspizza.co.uk/"
                }],
                "ratings": [{"restaurant_id": 1, "rating": 5}]
            }"#,
        )
        .unwrap();

        assert_eq!(data.areas[0].area_name, "Northern Quarter");
        assert_eq!(data.restaurants[0].area_id, 1);
        assert_eq!(data.ratings[0].rating, 5);
    }

    #[test]
    fn test_ratings_are_optional() {
        let data: SeedData =
            serde_json::from_str(r#"{"areas": [], "restaurants": []}"#).unwrap();
        assert!(data.ratings.is_empty());
    }

    #[test]
    fn test_bundled_seed_file_parses() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("data/dev.json");
        let data = SeedData::from_file(&path).unwrap();

        assert!(!data.areas.is_empty());
        for restaurant in &data.restaurants {
            assert!(restaurant.area_id >= 1 && restaurant.area_id as usize <= data.areas.len());
        }
        for rating in &data.ratings {
            assert!(
                rating.restaurant_id >= 1
                    && rating.restaurant_id as usize <= data.restaurants.len()
            );
        }
    }

    #[test]
    fn test_missing_file() {
        let result = SeedData::from_file(Path::new("does/not/exist.json"));
        assert!(matches!(result, Err(SeedError::Io(_))));
    }
}
