use super::domain::{Area, CuisineCategory, Restaurant, RestaurantId};
use serde::Serialize;

/// Compact listing entry used by the CLI and other list renderings.
#[derive(Debug, Clone, Serialize)]
pub struct RestaurantCard {
    pub id: RestaurantId,
    pub name: String,
    pub slug: String,
    pub area: Area,
    pub area_label: &'static str,
    pub cuisine_types: Vec<String>,
    pub rating: f64,
    pub price_label: String,
    pub date_night_score: u8,
}

impl From<&Restaurant> for RestaurantCard {
    fn from(restaurant: &Restaurant) -> Self {
        Self {
            id: restaurant.id.clone(),
            name: restaurant.name.clone(),
            slug: restaurant.slug.clone(),
            area: restaurant.area,
            area_label: restaurant.area.label(),
            cuisine_types: restaurant.cuisine_types.clone(),
            rating: restaurant.rating,
            price_label: restaurant.price_label(),
            date_night_score: restaurant.date_night_score,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CuisineTagCount {
    pub tag: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CitySummary {
    pub city: String,
    pub restaurant_count: usize,
    pub top_restaurant_ids: Vec<RestaurantId>,
    pub popular_cuisines: Vec<CuisineTagCount>,
    pub average_rating: f64,
    pub average_price_level: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AreaSummary {
    pub area: Area,
    pub area_label: &'static str,
    pub slug: &'static str,
    pub description: &'static str,
    pub restaurant_count: usize,
    pub top_restaurant_ids: Vec<RestaurantId>,
    pub average_rating: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CuisineSummary {
    pub category: CuisineCategory,
    pub category_label: &'static str,
    pub slug: &'static str,
    pub description: &'static str,
    pub restaurant_count: usize,
    pub average_rating: f64,
    pub average_price_level: f64,
}
