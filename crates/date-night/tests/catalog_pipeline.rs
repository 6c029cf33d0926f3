use chrono::{TimeZone, Utc};
use date_night::catalog::{
    self, Area, Catalog, CuisineCategory, EnrichmentContext, FeaturedTier, LegacyCatalogImporter,
    SearchFilters,
};
use date_night::config::DataConfig;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;

fn context() -> EnrichmentContext {
    EnrichmentContext::new(
        "Los Angeles",
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap(),
    )
}

fn data_path(file: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../data")
        .join(file)
}

fn sample_catalog() -> Catalog {
    let data = include_bytes!("../../../data/la_date_night_restaurants.json");
    let dataset = LegacyCatalogImporter::from_reader(&data[..]).expect("dataset parses");
    Catalog::build(dataset.into_raw(), &context())
}

fn names<'a>(restaurants: &[&'a date_night::catalog::Restaurant]) -> Vec<&'a str> {
    restaurants
        .iter()
        .map(|restaurant| restaurant.name.as_str())
        .collect()
}

#[test]
fn sample_dataset_validates_cleanly() {
    let data = include_bytes!("../../../data/la_date_night_restaurants.json");
    let dataset = LegacyCatalogImporter::from_reader(&data[..]).expect("dataset parses");
    let report = dataset.validate();

    assert_eq!(report.total_restaurants, 10);
    assert!(report.is_clean(), "unexpected issues: {:?}", report.issues);
    assert_eq!(report.quality.has_phone_pct, 100.0);
    assert_eq!(report.quality.has_photos_pct, 50.0);
}

#[test]
fn enrichment_fills_every_derived_field() {
    let catalog = sample_catalog();
    assert_eq!(catalog.len(), 10);

    let bazaar = catalog
        .by_slug("the-bazaar-by-jos-andr-s")
        .expect("bazaar present");
    assert_eq!(bazaar.id.as_str(), "restaurant-1");
    assert_eq!(bazaar.area, Area::LosAngeles);
    assert_eq!(bazaar.zip_code, "90048");
    assert_eq!(bazaar.city, "Los Angeles");
    assert!(bazaar.description.starts_with("The Bazaar by José Andrés in Los Angeles offers"));
    assert!(catalog
        .restaurants()
        .iter()
        .all(|restaurant| restaurant.date_night_score <= 100));

    let nobu = catalog.by_slug("nobu-los-angeles").expect("nobu present");
    assert_eq!(nobu.area, Area::WestHollywood);
    assert!(nobu.cuisines.contains(&CuisineCategory::Japanese));
    assert!(nobu
        .special_features
        .contains(&"Highly Romantic".to_string()));
}

#[test]
fn top_puts_the_unique_maximum_first() {
    let catalog = sample_catalog();
    let top = catalog.top(3);

    assert_eq!(
        names(&top),
        vec!["Nobu Los Angeles", "Catch LA", "Spago Beverly Hills"]
    );
    assert_eq!(top[0].date_night_score, 95);
    let max = catalog
        .restaurants()
        .iter()
        .map(|restaurant| restaurant.date_night_score)
        .max()
        .expect("non-empty");
    assert_eq!(top[0].date_night_score, max);
}

#[test]
fn search_text_is_an_or_over_fields() {
    let catalog = sample_catalog();

    let wine = catalog.search("WINE", &SearchFilters::default());
    assert_eq!(wine.len(), 4);
    assert!(wine
        .windows(2)
        .all(|pair| pair[0].date_night_score >= pair[1].date_night_score));

    let by_address = catalog.search("abbot kinney", &SearchFilters::default());
    assert_eq!(names(&by_address), vec!["Gjelina"]);

    let by_tag_or_name = catalog.search("french", &SearchFilters::default());
    assert_eq!(by_tag_or_name.len(), 2);
}

#[test]
fn filters_are_conjunctive() {
    let catalog = sample_catalog();
    let filters = SearchFilters {
        cuisine: Some("wine_bar".to_string()),
        price_level: Some(3),
        ..SearchFilters::default()
    };

    let results = catalog.search("", &filters);
    assert_eq!(
        names(&results),
        vec!["The Little Door", "Bottega Louie", "Gjelina"]
    );

    let narrowed = catalog.search(
        "",
        &SearchFilters {
            area: Some(Area::Venice),
            ..filters.clone()
        },
    );
    assert_eq!(names(&narrowed), vec!["Gjelina"]);

    let none = catalog.search(
        "",
        &SearchFilters {
            min_score: Some(90),
            ..filters
        },
    );
    assert!(none.is_empty());
}

#[test]
fn summaries_cover_present_areas_only() {
    let catalog = sample_catalog();

    let areas: Vec<Area> = catalog
        .area_summaries()
        .iter()
        .map(|summary| summary.area)
        .collect();
    assert_eq!(
        areas,
        vec![
            Area::BeverlyHills,
            Area::WestHollywood,
            Area::Venice,
            Area::LosAngeles
        ]
    );

    let city = catalog.city_summary("Los Angeles");
    assert_eq!(city.restaurant_count, 10);
    assert_eq!(city.top_restaurant_ids.len(), 5);
    assert_eq!(city.popular_cuisines[0].tag, "fine_dining");
}

#[test]
fn load_wires_featured_names_into_random_view() {
    let data = DataConfig {
        restaurants_path: data_path("la_date_night_restaurants.json"),
        featured_path: Some(data_path("featured_restaurants.json")),
    };
    let loaded = catalog::load(&data, &context()).expect("data files load");
    let now = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();

    let active: Vec<&str> = loaded
        .featured
        .active(now, 10)
        .iter()
        .map(|entry| entry.restaurant.name.as_str())
        .collect();
    assert_eq!(active, vec!["Providence", "Bestia", "Osteria Mozza"]);
    assert_eq!(loaded.featured.by_tier(FeaturedTier::Gold, now).len(), 2);
    assert!(loaded
        .featured
        .by_tier(FeaturedTier::Premium, now)
        .is_empty());

    let mut rng = StdRng::seed_from_u64(2025);
    let picks = loaded.catalog.random(20, true, &mut rng);
    assert_eq!(picks.len(), 7);
    assert!(picks.iter().all(|restaurant| {
        !loaded
            .featured
            .names()
            .contains(&restaurant.name)
    }));

    let everything = loaded.catalog.random(20, false, &mut rng);
    assert_eq!(everything.len(), 10);
}

#[test]
fn load_reports_missing_files() {
    let data = DataConfig {
        restaurants_path: data_path("missing.json"),
        featured_path: None,
    };
    let error = catalog::load(&data, &context()).expect_err("missing file");
    assert!(matches!(error, catalog::CatalogImportError::Io(_)));
}
