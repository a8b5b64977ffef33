//! Parameterized statements behind the HTTP routes.
//!
//! Every user supplied value is attached as a bind parameter. Statement text
//! is fixed at compile time.

use diesel::pg::Pg;
use diesel::query_builder::{BoxedSqlQuery, SqlQuery};
use diesel::sql_query;
use diesel::sql_types::{Integer, Text};

use crate::models::NewRestaurant;

pub type Statement = BoxedSqlQuery<'static, Pg, SqlQuery>;

const LIST_RESTAURANTS: &str = "\
SELECT restaurants.restaurant_id, restaurants.restaurant_name, restaurants.area_id, \
restaurants.cuisine, restaurants.website, \
ROUND(AVG(ratings.rating), 1)::FLOAT8 AS average_rating \
FROM restaurants \
INNER JOIN ratings ON ratings.restaurant_id = restaurants.restaurant_id \
GROUP BY restaurants.restaurant_id \
ORDER BY restaurants.restaurant_id ASC";

// `areas` drives the join so that an area without restaurants still yields a row.
const AREA_WITH_RESTAURANTS: &str = "\
SELECT areas.area_id, areas.area_name, \
COUNT(restaurants.restaurant_id) AS total_restaurants, \
COALESCE(\
ARRAY_AGG(restaurants.restaurant_name ORDER BY restaurants.restaurant_id) \
FILTER (WHERE restaurants.restaurant_id IS NOT NULL), \
ARRAY[]::TEXT[]) AS restaurants \
FROM areas \
LEFT JOIN restaurants ON restaurants.area_id = areas.area_id \
WHERE areas.area_id = $1 \
GROUP BY areas.area_id";

const INSERT_RESTAURANT: &str = "\
INSERT INTO restaurants (restaurant_name, area_id, cuisine, website) \
VALUES ($1, $2, $3, $4) \
RETURNING restaurant_id, restaurant_name, area_id, cuisine, website";

const DELETE_RESTAURANT: &str = "\
DELETE FROM restaurants WHERE restaurant_id = $1 \
RETURNING restaurant_id, restaurant_name, area_id, cuisine, website";

const UPDATE_RESTAURANT_AREA: &str = "\
UPDATE restaurants SET area_id = $1 WHERE restaurant_id = $2 \
RETURNING restaurant_id, restaurant_name, area_id, cuisine, website";

/// Restaurants with at least one rating, each with its mean rating rounded
/// to one decimal place. Unrated restaurants are left out by the inner join.
pub fn list_restaurants() -> Statement {
    sql_query(LIST_RESTAURANTS).into_boxed()
}

/// One area with `total_restaurants` and the ordered list of restaurant
/// names. Yields no row when the area does not exist.
pub fn area_with_restaurants(area_id: i32) -> Statement {
    sql_query(AREA_WITH_RESTAURANTS)
        .into_boxed()
        .bind::<Integer, _>(area_id)
}

pub fn insert_restaurant(restaurant: NewRestaurant) -> Statement {
    sql_query(INSERT_RESTAURANT)
        .into_boxed()
        .bind::<Text, _>(restaurant.restaurant_name)
        .bind::<Integer, _>(restaurant.area_id)
        .bind::<Text, _>(restaurant.cuisine)
        .bind::<Text, _>(restaurant.website)
}

pub fn delete_restaurant(restaurant_id: i32) -> Statement {
    sql_query(DELETE_RESTAURANT)
        .into_boxed()
        .bind::<Integer, _>(restaurant_id)
}

pub fn update_restaurant_area(restaurant_id: i32, area_id: i32) -> Statement {
    sql_query(UPDATE_RESTAURANT_AREA)
        .into_boxed()
        .bind::<Integer, _>(area_id)
        .bind::<Integer, _>(restaurant_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use diesel::debug_query;

    fn split(statement: &Statement) -> (String, String) {
        let rendered = debug_query::<Pg, _>(statement).to_string();
        let (sql, binds) = rendered
            .split_once(" -- binds: ")
            .expect("debug output carries binds");
        (sql.to_string(), binds.to_string())
    }

    #[test]
    fn test_list_restaurants_uses_inner_join_and_rounding() {
        let (sql, binds) = split(&list_restaurants());

        assert!(sql.contains("INNER JOIN ratings"));
        assert!(sql.contains("ROUND(AVG(ratings.rating), 1)"));
        assert!(sql.ends_with("ORDER BY restaurants.restaurant_id ASC"));
        assert_eq!(binds, "[]");
    }

    #[test]
    fn test_area_with_restaurants_binds_area_id() {
        let (sql, binds) = split(&area_with_restaurants(7));

        assert!(sql.contains("FROM areas LEFT JOIN restaurants"));
        assert!(sql.contains("WHERE areas.area_id = $1"));
        assert_eq!(binds, "[7]");
    }

    #[test]
    fn test_insert_restaurant_never_inlines_values() {
        let hostile = "Pizza'); DROP TABLE areas; --";
        let statement = insert_restaurant(NewRestaurant {
            restaurant_name: hostile.to_string(),
            area_id: 2,
            cuisine: "Italian".to_string(),
            website: "https://example.com".to_string(),
        });
        let (sql, binds) = split(&statement);

        assert!(!sql.contains(hostile));
        assert!(sql.contains("VALUES ($1, $2, $3, $4)"));
        assert!(sql.contains("RETURNING restaurant_id"));
        assert!(binds.contains("DROP TABLE areas"));
        assert!(binds.contains("Italian"));
    }

    #[test]
    fn test_delete_restaurant_returns_deleted_row() {
        let (sql, binds) = split(&delete_restaurant(12));

        assert!(sql.starts_with("DELETE FROM restaurants WHERE restaurant_id = $1"));
        assert!(sql.contains("RETURNING"));
        assert_eq!(binds, "[12]");
    }

    #[test]
    fn test_update_restaurant_area_bind_order() {
        let (sql, binds) = split(&update_restaurant_area(5, 3));

        assert!(sql.contains("SET area_id = $1 WHERE restaurant_id = $2"));
        assert_eq!(binds, "[3, 5]");
    }
}
