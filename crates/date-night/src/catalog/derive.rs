use super::domain::{Area, RawRestaurant, Restaurant, RestaurantId};
use super::scoring::DateNightScorer;
use crate::config::DEFAULT_CITY;
use chrono::{DateTime, Utc};

/// Inputs shared by every record in one derivation pass.
#[derive(Debug, Clone)]
pub struct EnrichmentContext {
    pub city: String,
    pub generated_at: DateTime<Utc>,
    pub scorer: DateNightScorer,
}

impl EnrichmentContext {
    pub fn new(city: impl Into<String>, generated_at: DateTime<Utc>) -> Self {
        Self {
            city: city.into(),
            generated_at,
            scorer: DateNightScorer::default(),
        }
    }
}

impl Default for EnrichmentContext {
    fn default() -> Self {
        Self::new(DEFAULT_CITY, Utc::now())
    }
}

/// Lowercases and replaces each run of characters outside `[a-z0-9]` with a
/// single dash. Non-ASCII letters count as separators.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_dash = false;

    for ch in name.chars().flat_map(char::to_lowercase) {
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(ch);
        } else {
            pending_dash = true;
        }
    }

    slug
}

pub fn describe(name: &str, area: Area, cuisine_types: &[String], rating: f64, price_level: u8) -> String {
    format!(
        "{name} in {area} offers {} cuisine perfect for romantic date nights. Rated {rating}/5 stars with {} pricing.",
        cuisine_types.join(", "),
        "$".repeat(price_level as usize),
    )
}

pub fn build_amenities(raw: &RawRestaurant) -> Vec<String> {
    let mut amenities = vec!["WiFi", "Parking", "Reservations Required"];

    if raw.has_cuisine_tag("wine_bar") {
        amenities.extend(["Wine Bar", "Cocktails"]);
    }

    if raw.has_cuisine_tag("rooftop_restaurant") {
        amenities.extend(["Rooftop Views", "Outdoor Seating"]);
    }

    if raw.price_level >= 3 {
        amenities.extend(["Fine Dining", "Valet Parking"]);
    }

    amenities.into_iter().map(str::to_string).collect()
}

pub fn build_special_features(raw: &RawRestaurant, date_night_score: u8) -> Vec<String> {
    let mut features = Vec::new();

    if date_night_score >= 90 {
        features.extend(["Highly Romantic", "Perfect for Anniversaries"]);
    }

    if raw.has_cuisine_tag("fine_dining") {
        features.extend(["Chef's Tasting Menu", "Wine Pairing"]);
    }

    if raw.has_cuisine_tag("rooftop_restaurant") {
        features.extend(["City Views", "Sunset Dining"]);
    }

    if raw.rating >= 4.5 {
        features.extend(["Critically Acclaimed", "Award Winning"]);
    }

    features.into_iter().map(str::to_string).collect()
}

/// Derives every presentation field for one record. `index` is the record's
/// position in the source file and only matters when it carries no id.
pub fn enrich(raw: RawRestaurant, index: usize, context: &EnrichmentContext) -> Restaurant {
    let date_night_score = context.scorer.score(&raw);
    let amenities = build_amenities(&raw);
    let special_features = build_special_features(&raw, date_night_score);
    let description = describe(
        &raw.name,
        raw.area,
        &raw.cuisine_types,
        raw.rating,
        raw.price_level,
    );

    Restaurant {
        id: raw.id.unwrap_or_else(|| RestaurantId::synthetic(index)),
        slug: slugify(&raw.name),
        city: raw.city.unwrap_or_else(|| context.city.clone()),
        neighborhood: raw.area,
        area: raw.area,
        name: raw.name,
        address: raw.address,
        phone: raw.phone,
        website: raw.website,
        rating: raw.rating,
        price_level: raw.price_level,
        cuisine_types: raw.cuisine_types,
        cuisines: raw.cuisines,
        opening_hours: raw.opening_hours,
        reviews: raw.reviews,
        photos: raw.photos,
        place_id: raw.place_id,
        latitude: raw.latitude,
        longitude: raw.longitude,
        date_night_score,
        zip_code: raw.zip_code,
        description,
        amenities,
        special_features,
        last_updated: context.generated_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::domain::{CuisineCategory, OpeningHours};
    use chrono::TimeZone;

    fn raw(cuisine_types: &[&str], cuisines: Vec<CuisineCategory>, price_level: u8, rating: f64) -> RawRestaurant {
        RawRestaurant {
            id: None,
            name: "Perch".to_string(),
            address: "448 S Hill St, Los Angeles, CA 90013".to_string(),
            phone: None,
            website: None,
            rating,
            price_level,
            cuisine_types: cuisine_types.iter().map(|tag| tag.to_string()).collect(),
            cuisines,
            opening_hours: OpeningHours::new(),
            reviews: Vec::new(),
            photos: Vec::new(),
            place_id: None,
            latitude: None,
            longitude: None,
            city: None,
            area: Area::LosAngeles,
            zip_code: "90013".to_string(),
        }
    }

    #[test]
    fn slugify_matches_site_routes() {
        assert_eq!(slugify("Bestia"), "bestia");
        assert_eq!(slugify("Osteria Mozza"), "osteria-mozza");
        assert_eq!(
            slugify("République Café Bakery & République Restaurant"),
            "r-publique-caf-bakery-r-publique-restaurant"
        );
        assert_eq!(slugify("  --Nobu Malibu!! "), "nobu-malibu");
        assert_eq!(slugify("71Above"), "71above");
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn describe_uses_template() {
        let text = describe(
            "Bestia",
            Area::LosAngeles,
            &["italian_restaurant".to_string(), "wine_bar".to_string()],
            4.6,
            3,
        );
        assert_eq!(
            text,
            "Bestia in Los Angeles offers italian_restaurant, wine_bar cuisine perfect for romantic date nights. Rated 4.6/5 stars with $$$ pricing."
        );
        assert!(describe("Spot", Area::Venice, &[], 4.0, 2).contains("Rated 4/5 stars with $$ pricing"));
    }

    #[test]
    fn amenities_follow_tags_and_price() {
        let plain = raw(&["thai_restaurant"], vec![CuisineCategory::Thai], 2, 4.0);
        assert_eq!(build_amenities(&plain), vec!["WiFi", "Parking", "Reservations Required"]);

        let rooftop = raw(
            &["rooftop_restaurant", "wine_bar"],
            vec![CuisineCategory::Rooftop, CuisineCategory::WineBar],
            3,
            4.2,
        );
        assert_eq!(
            build_amenities(&rooftop),
            vec![
                "WiFi",
                "Parking",
                "Reservations Required",
                "Wine Bar",
                "Cocktails",
                "Rooftop Views",
                "Outdoor Seating",
                "Fine Dining",
                "Valet Parking"
            ]
        );
    }

    #[test]
    fn amenities_ignore_tags_that_only_share_a_category() {
        let loose = raw(
            &["rooftop", "Wine Bar"],
            vec![CuisineCategory::Rooftop, CuisineCategory::WineBar],
            2,
            4.0,
        );
        assert_eq!(build_amenities(&loose), vec!["WiFi", "Parking", "Reservations Required"]);
        assert!(build_special_features(&loose, 70).is_empty());

        let tasting = raw(&["Fine Dining"], vec![CuisineCategory::FineDining], 2, 4.0);
        assert!(build_special_features(&tasting, 70).is_empty());
    }

    #[test]
    fn special_features_follow_thresholds() {
        let fine = raw(&["fine_dining"], vec![CuisineCategory::FineDining], 4, 4.7);
        assert_eq!(
            build_special_features(&fine, 92),
            vec![
                "Highly Romantic",
                "Perfect for Anniversaries",
                "Chef's Tasting Menu",
                "Wine Pairing",
                "Critically Acclaimed",
                "Award Winning"
            ]
        );
        assert!(build_special_features(&fine, 89)
            .iter()
            .all(|feature| feature != "Highly Romantic"));

        let casual = raw(&["mexican_restaurant"], vec![CuisineCategory::Mexican], 1, 4.4);
        assert!(build_special_features(&casual, 70).is_empty());
    }

    #[test]
    fn enrich_fills_identity_and_timestamp() {
        let generated_at = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let context = EnrichmentContext::new("Los Angeles", generated_at);
        let restaurant = enrich(
            raw(&["rooftop_restaurant"], vec![CuisineCategory::Rooftop], 3, 4.3),
            6,
            &context,
        );

        assert_eq!(restaurant.id.as_str(), "restaurant-7");
        assert_eq!(restaurant.slug, "perch");
        assert_eq!(restaurant.city, "Los Angeles");
        assert_eq!(restaurant.neighborhood, Area::LosAngeles);
        assert_eq!(restaurant.last_updated, generated_at);
        assert_eq!(restaurant.date_night_score, context.scorer.score(&restaurant));
        assert!(restaurant.special_features.contains(&"City Views".to_string()));
    }

    #[test]
    fn enrich_is_idempotent_for_fixed_context() {
        let context = EnrichmentContext::new("Los Angeles", Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap());
        let record = raw(&["wine_bar"], vec![CuisineCategory::WineBar], 2, 4.1);
        assert_eq!(
            enrich(record.clone(), 0, &context),
            enrich(record, 0, &context)
        );
    }
}
