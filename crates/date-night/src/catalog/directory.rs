use super::derive::{enrich, EnrichmentContext};
use super::domain::{Area, RawRestaurant, Restaurant};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;

/// Names kept out of random picks when no featured file is loaded.
pub const DEFAULT_FEATURED_NAMES: [&str; 4] = [
    "Providence",
    "République Café Bakery & République Restaurant",
    "Bestia",
    "Osteria Mozza",
];

/// Conjunctive filters applied after the text query. Unset fields match
/// everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchFilters {
    pub cuisine: Option<String>,
    pub price_level: Option<u8>,
    pub min_rating: Option<f64>,
    pub min_score: Option<u8>,
    pub area: Option<Area>,
    pub neighborhood: Option<Area>,
}

impl SearchFilters {
    pub fn matches(&self, restaurant: &Restaurant) -> bool {
        if let Some(cuisine) = &self.cuisine {
            if !restaurant.has_cuisine_tag(cuisine) {
                return false;
            }
        }
        if let Some(price_level) = self.price_level {
            if restaurant.price_level != price_level {
                return false;
            }
        }
        if let Some(min_rating) = self.min_rating {
            if restaurant.rating < min_rating {
                return false;
            }
        }
        if let Some(min_score) = self.min_score {
            if restaurant.date_night_score < min_score {
                return false;
            }
        }
        if let Some(area) = self.area {
            if restaurant.area != area {
                return false;
            }
        }
        if let Some(neighborhood) = self.neighborhood {
            if restaurant.neighborhood != neighborhood {
                return false;
            }
        }
        true
    }
}

/// The enriched, immutable restaurant collection and the read-only views
/// over it. Load order is preserved and duplicates are kept.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    restaurants: Vec<Restaurant>,
    featured_names: Vec<String>,
}

impl Catalog {
    pub fn new(restaurants: Vec<Restaurant>) -> Self {
        Self {
            restaurants,
            featured_names: DEFAULT_FEATURED_NAMES
                .iter()
                .map(|name| name.to_string())
                .collect(),
        }
    }

    /// Derives every record in file order. Synthetic ids follow the
    /// position in `raw`.
    pub fn build(raw: Vec<RawRestaurant>, context: &EnrichmentContext) -> Self {
        let restaurants: Vec<Restaurant> = raw
            .into_iter()
            .enumerate()
            .map(|(index, record)| enrich(record, index, context))
            .collect();

        let mut seen = HashSet::new();
        for restaurant in &restaurants {
            if !seen.insert(restaurant.slug.as_str()) {
                tracing::warn!(slug = %restaurant.slug, name = %restaurant.name, "duplicate restaurant slug");
            }
        }

        tracing::info!(restaurants = restaurants.len(), city = %context.city, "catalog built");
        Self::new(restaurants)
    }

    pub fn with_featured_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.featured_names = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn restaurants(&self) -> &[Restaurant] {
        &self.restaurants
    }

    pub fn featured_names(&self) -> &[String] {
        &self.featured_names
    }

    pub fn len(&self) -> usize {
        self.restaurants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.restaurants.is_empty()
    }

    pub fn by_city(&self, city: &str) -> Vec<&Restaurant> {
        self.filtered(|restaurant| restaurant.city == city)
    }

    pub fn by_area(&self, area: Area) -> Vec<&Restaurant> {
        self.filtered(|restaurant| restaurant.area == area)
    }

    pub fn by_neighborhood(&self, neighborhood: Area) -> Vec<&Restaurant> {
        self.filtered(|restaurant| restaurant.neighborhood == neighborhood)
    }

    pub fn by_cuisine(&self, tag: &str) -> Vec<&Restaurant> {
        self.filtered(|restaurant| restaurant.has_cuisine_tag(tag))
    }

    pub fn by_slug(&self, slug: &str) -> Option<&Restaurant> {
        self.restaurants
            .iter()
            .find(|restaurant| restaurant.slug == slug)
    }

    /// Highest scores first; ties keep load order.
    pub fn top(&self, limit: usize) -> Vec<&Restaurant> {
        let mut ranked: Vec<&Restaurant> = self.restaurants.iter().collect();
        sort_by_score(&mut ranked);
        ranked.truncate(limit);
        ranked
    }

    pub fn random<R>(&self, limit: usize, exclude_featured: bool, rng: &mut R) -> Vec<&Restaurant>
    where
        R: Rng + ?Sized,
    {
        let mut pool: Vec<&Restaurant> = if exclude_featured {
            self.filtered(|restaurant| !self.featured_names.contains(&restaurant.name))
        } else {
            self.restaurants.iter().collect()
        };
        pool.shuffle(rng);
        pool.truncate(limit);
        pool
    }

    /// Case-insensitive match on name, address, cuisine tags or description,
    /// narrowed by `filters` and ranked by score. A blank query skips the
    /// text match.
    pub fn search(&self, query: &str, filters: &SearchFilters) -> Vec<&Restaurant> {
        let blank = query.trim().is_empty();
        let needle = query.to_lowercase();
        let mut results = self.filtered(|restaurant| {
            (blank || text_matches(restaurant, &needle)) && filters.matches(restaurant)
        });
        sort_by_score(&mut results);
        results
    }

    /// Keeps the first record for every slug, dropping later repeats.
    pub fn deduplicated_by_slug(&self) -> Self {
        let mut seen = HashSet::new();
        let restaurants = self
            .restaurants
            .iter()
            .filter(|restaurant| seen.insert(restaurant.slug.clone()))
            .cloned()
            .collect();

        Self {
            restaurants,
            featured_names: self.featured_names.clone(),
        }
    }

    fn filtered<F>(&self, predicate: F) -> Vec<&Restaurant>
    where
        F: Fn(&Restaurant) -> bool,
    {
        self.restaurants
            .iter()
            .filter(|restaurant| predicate(*restaurant))
            .collect()
    }
}

fn text_matches(restaurant: &Restaurant, needle: &str) -> bool {
    restaurant.name.to_lowercase().contains(needle)
        || restaurant.address.to_lowercase().contains(needle)
        || restaurant
            .cuisine_types
            .iter()
            .any(|tag| tag.to_lowercase().contains(needle))
        || restaurant.description.to_lowercase().contains(needle)
}

pub(crate) fn sort_by_score(restaurants: &mut [&Restaurant]) {
    restaurants.sort_by(|left, right| right.date_night_score.cmp(&left.date_night_score));
}
