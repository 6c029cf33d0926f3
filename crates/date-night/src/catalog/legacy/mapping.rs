use super::normalizer::tag_key;
use crate::catalog::domain::{Area, CuisineCategory};
use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;

pub const DEFAULT_ZIP_CODE: &str = "90210";

static ZIP_PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
static CUISINE_MAP: OnceLock<HashMap<String, CuisineCategory>> = OnceLock::new();

/// First known area whose label appears in the address, else Los Angeles.
pub fn extract_area(address: &str) -> Area {
    Area::ordered()
        .into_iter()
        .find(|area| address.contains(area.label()))
        .unwrap_or_else(|| {
            tracing::debug!(address, "no known area in address, using default");
            Area::default()
        })
}

pub fn extract_zip_code(address: &str) -> String {
    let pattern = ZIP_PATTERN.get_or_init(|| Regex::new(r"CA (\d{5})").ok());

    pattern
        .as_ref()
        .and_then(|regex| regex.captures(address))
        .and_then(|captures| captures.get(1))
        .map(|zip| zip.as_str().to_string())
        .unwrap_or_else(|| {
            tracing::debug!(address, "no zip code in address, using default");
            DEFAULT_ZIP_CODE.to_string()
        })
}

pub fn categorize_cuisine(tag: &str) -> CuisineCategory {
    let key = tag_key(tag);
    let map = cuisine_map();

    if let Some(category) = map.get(&key) {
        return *category;
    }

    key.strip_suffix("_restaurant")
        .and_then(|stem| map.get(stem))
        .copied()
        .unwrap_or(CuisineCategory::Other)
}

/// Distinct categories in first-seen tag order.
pub(crate) fn categorize_all(tags: &[String]) -> Vec<CuisineCategory> {
    let mut categories = Vec::with_capacity(tags.len());
    for tag in tags {
        let category = categorize_cuisine(tag);
        if !categories.contains(&category) {
            categories.push(category);
        }
    }
    categories
}

fn cuisine_map() -> &'static HashMap<String, CuisineCategory> {
    CUISINE_MAP.get_or_init(|| {
        const TAG_TO_CATEGORY: &[(&str, CuisineCategory)] = &[
            ("fine_dining", CuisineCategory::FineDining),
            ("italian", CuisineCategory::Italian),
            ("pizza", CuisineCategory::Italian),
            ("french", CuisineCategory::French),
            ("bistro", CuisineCategory::French),
            ("japanese", CuisineCategory::Japanese),
            ("sushi", CuisineCategory::Japanese),
            ("ramen", CuisineCategory::Japanese),
            ("mediterranean", CuisineCategory::Mediterranean),
            ("greek", CuisineCategory::Mediterranean),
            ("steakhouse", CuisineCategory::Steakhouse),
            ("steak_house", CuisineCategory::Steakhouse),
            ("seafood", CuisineCategory::Seafood),
            ("californian", CuisineCategory::Californian),
            ("california", CuisineCategory::Californian),
            ("contemporary", CuisineCategory::Contemporary),
            ("new_american", CuisineCategory::Contemporary),
            ("wine_bar", CuisineCategory::WineBar),
            ("rooftop", CuisineCategory::Rooftop),
            ("mexican", CuisineCategory::Mexican),
            ("thai", CuisineCategory::Thai),
        ];

        let mut map = HashMap::with_capacity(TAG_TO_CATEGORY.len());
        for (tag, category) in TAG_TO_CATEGORY {
            map.insert(tag_key(tag), *category);
        }
        map
    })
}
