pub mod derive;
mod directory;
pub mod domain;
pub mod export;
pub mod featured;
pub mod legacy;
pub mod scoring;
mod summary;
pub mod validation;
pub mod views;

pub use derive::{enrich, slugify, EnrichmentContext};
pub use directory::{Catalog, SearchFilters, DEFAULT_FEATURED_NAMES};
pub use domain::{Area, CuisineCategory, RawRestaurant, Restaurant, RestaurantId, Review};
pub use featured::{FeaturedError, FeaturedListing, FeaturedRestaurant, FeaturedStore, FeaturedTier};
pub use legacy::{CatalogImportError, LegacyCatalogImporter, LegacyDataset};
pub use scoring::{DateNightScorer, ScoreBreakdown, ScoringWeights, SubScoreKind};

use crate::config::DataConfig;

/// Everything the front ends need after one load of the data files.
#[derive(Debug, Clone)]
pub struct LoadedCatalog {
    pub catalog: Catalog,
    pub featured: FeaturedStore,
}

/// Reads the restaurant file (and the featured file when configured),
/// derives every record and wires the featured names into the random view.
pub fn load(data: &DataConfig, context: &EnrichmentContext) -> Result<LoadedCatalog, CatalogImportError> {
    let dataset = LegacyCatalogImporter::from_path(&data.restaurants_path)?;
    let mut catalog = Catalog::build(dataset.into_raw(), context);

    let featured = match &data.featured_path {
        Some(path) => featured_store(LegacyCatalogImporter::featured_from_path(path)?, context),
        None => FeaturedStore::new(),
    };

    if !featured.is_empty() {
        catalog = catalog.with_featured_names(featured.names());
    }

    Ok(LoadedCatalog { catalog, featured })
}

pub fn featured_store(
    records: Vec<(RawRestaurant, FeaturedListing)>,
    context: &EnrichmentContext,
) -> FeaturedStore {
    FeaturedStore::from_entries(records.into_iter().enumerate().map(
        |(index, (raw, listing))| FeaturedRestaurant {
            restaurant: enrich(raw, index, context),
            listing,
        },
    ))
}
