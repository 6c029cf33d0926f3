use super::directory::{sort_by_score, Catalog};
use super::domain::{Area, CuisineCategory, Restaurant, RestaurantId};
use super::views::{AreaSummary, CitySummary, CuisineSummary, CuisineTagCount};

const CITY_TOP_RESTAURANTS: usize = 5;
const CITY_POPULAR_CUISINES: usize = 5;
const AREA_TOP_RESTAURANTS: usize = 3;

impl Catalog {
    pub fn city_summary(&self, city: &str) -> CitySummary {
        let restaurants = self.by_city(city);

        CitySummary {
            city: city.to_string(),
            restaurant_count: restaurants.len(),
            top_restaurant_ids: top_ids(&restaurants, CITY_TOP_RESTAURANTS),
            popular_cuisines: popular_tags(&restaurants, CITY_POPULAR_CUISINES),
            average_rating: average(&restaurants, |restaurant| restaurant.rating),
            average_price_level: average(&restaurants, |restaurant| {
                f64::from(restaurant.price_level)
            }),
        }
    }

    /// One entry per area that has at least one restaurant, in area order.
    pub fn area_summaries(&self) -> Vec<AreaSummary> {
        Area::ordered()
            .into_iter()
            .filter_map(|area| {
                let restaurants = self.by_area(area);
                if restaurants.is_empty() {
                    return None;
                }

                Some(AreaSummary {
                    area,
                    area_label: area.label(),
                    slug: area.slug(),
                    description: area.description(),
                    restaurant_count: restaurants.len(),
                    top_restaurant_ids: top_ids(&restaurants, AREA_TOP_RESTAURANTS),
                    average_rating: average(&restaurants, |restaurant| restaurant.rating),
                })
            })
            .collect()
    }

    /// One entry per cuisine category in use, in category order.
    pub fn cuisine_summaries(&self) -> Vec<CuisineSummary> {
        CuisineCategory::ordered()
            .into_iter()
            .filter_map(|category| {
                let restaurants: Vec<&Restaurant> = self
                    .restaurants()
                    .iter()
                    .filter(|restaurant| restaurant.cuisines.contains(&category))
                    .collect();
                if restaurants.is_empty() {
                    return None;
                }

                Some(CuisineSummary {
                    category,
                    category_label: category.label(),
                    slug: category.slug(),
                    description: category.description(),
                    restaurant_count: restaurants.len(),
                    average_rating: average(&restaurants, |restaurant| restaurant.rating),
                    average_price_level: average(&restaurants, |restaurant| {
                        f64::from(restaurant.price_level)
                    }),
                })
            })
            .collect()
    }

    /// Busiest categories first; equal counts keep category order.
    pub fn popular_cuisines(&self, limit: usize) -> Vec<CuisineSummary> {
        let mut summaries = self.cuisine_summaries();
        summaries.sort_by(|left, right| right.restaurant_count.cmp(&left.restaurant_count));
        summaries.truncate(limit);
        summaries
    }
}

fn top_ids(restaurants: &[&Restaurant], limit: usize) -> Vec<RestaurantId> {
    let mut ranked = restaurants.to_vec();
    sort_by_score(&mut ranked);
    ranked
        .into_iter()
        .take(limit)
        .map(|restaurant| restaurant.id.clone())
        .collect()
}

/// Tags by frequency; ties keep the order in which tags were first seen.
fn popular_tags(restaurants: &[&Restaurant], limit: usize) -> Vec<CuisineTagCount> {
    let mut counts: Vec<CuisineTagCount> = Vec::new();
    for tag in restaurants
        .iter()
        .flat_map(|restaurant| restaurant.cuisine_types.iter())
    {
        match counts.iter_mut().find(|entry| &entry.tag == tag) {
            Some(entry) => entry.count += 1,
            None => counts.push(CuisineTagCount {
                tag: tag.clone(),
                count: 1,
            }),
        }
    }

    counts.sort_by(|left, right| right.count.cmp(&left.count));
    counts.truncate(limit);
    counts
}

/// Mean rounded to one decimal; zero for an empty slice.
fn average<F>(restaurants: &[&Restaurant], value: F) -> f64
where
    F: Fn(&Restaurant) -> f64,
{
    if restaurants.is_empty() {
        return 0.0;
    }

    let total: f64 = restaurants.iter().map(|restaurant| value(*restaurant)).sum();
    round_one_decimal(total / restaurants.len() as f64)
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::derive::EnrichmentContext;
    use crate::catalog::domain::{OpeningHours, RawRestaurant};
    use crate::catalog::legacy::categorize_cuisine;
    use chrono::{TimeZone, Utc};

    fn raw(name: &str, area: Area, tags: &[&str], price_level: u8, rating: f64) -> RawRestaurant {
        RawRestaurant {
            id: None,
            name: name.to_string(),
            address: format!("{}, CA 90000", area.label()),
            phone: None,
            website: None,
            rating,
            price_level,
            cuisine_types: tags.iter().map(|tag| tag.to_string()).collect(),
            cuisines: tags.iter().map(|tag| categorize_cuisine(tag)).collect(),
            opening_hours: OpeningHours::new(),
            reviews: Vec::new(),
            photos: Vec::new(),
            place_id: None,
            latitude: None,
            longitude: None,
            city: None,
            area,
            zip_code: "90000".to_string(),
        }
    }

    fn catalog() -> Catalog {
        let context =
            EnrichmentContext::new("Los Angeles", Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap());
        Catalog::build(
            vec![
                raw("A", Area::Venice, &["wine_bar", "californian"], 2, 4.4),
                raw("B", Area::Venice, &["italian_restaurant"], 3, 4.6),
                raw("C", Area::SantaMonica, &["wine_bar"], 2, 4.1),
                raw("D", Area::Hollywood, &["californian", "wine_bar"], 4, 4.8),
            ],
            &context,
        )
    }

    #[test]
    fn city_summary_counts_tags_and_averages() {
        let summary = catalog().city_summary("Los Angeles");

        assert_eq!(summary.restaurant_count, 4);
        assert_eq!(summary.top_restaurant_ids.len(), 4);
        assert_eq!(
            summary.popular_cuisines,
            vec![
                CuisineTagCount { tag: "wine_bar".to_string(), count: 3 },
                CuisineTagCount { tag: "californian".to_string(), count: 2 },
                CuisineTagCount { tag: "italian_restaurant".to_string(), count: 1 },
            ]
        );
        assert_eq!(summary.average_rating, 4.5);
        assert_eq!(summary.average_price_level, 2.8);
    }

    #[test]
    fn unknown_city_yields_empty_summary() {
        let summary = catalog().city_summary("San Diego");
        assert_eq!(summary.restaurant_count, 0);
        assert!(summary.top_restaurant_ids.is_empty());
        assert_eq!(summary.average_rating, 0.0);
    }

    #[test]
    fn area_summaries_skip_empty_areas() {
        let summaries = catalog().area_summaries();
        let areas: Vec<Area> = summaries.iter().map(|summary| summary.area).collect();
        assert_eq!(areas, vec![Area::SantaMonica, Area::Venice, Area::Hollywood]);

        let venice = &summaries[1];
        assert_eq!(venice.restaurant_count, 2);
        assert_eq!(venice.average_rating, 4.5);
        assert_eq!(venice.top_restaurant_ids.len(), 2);
    }

    #[test]
    fn popular_cuisines_sort_by_count() {
        let popular = catalog().popular_cuisines(2);
        assert_eq!(popular.len(), 2);
        assert_eq!(popular[0].category, CuisineCategory::WineBar);
        assert_eq!(popular[0].restaurant_count, 3);
        assert_eq!(popular[1].category, CuisineCategory::Californian);
        assert_eq!(popular[1].average_price_level, 3.0);
    }

    #[test]
    fn rounding_keeps_one_decimal() {
        assert_eq!(round_one_decimal(4.449), 4.4);
        assert_eq!(round_one_decimal(4.45001), 4.5);
    }
}
