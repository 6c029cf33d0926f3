//! Boundary adapter for the hand-maintained and script-generated data files.
//!
//! Everything stringly-typed about the legacy dataset stays in here: key
//! spelling variants, hours formats, review timestamps, and the address and
//! cuisine-tag lookups that turn free text into [`Area`] and
//! [`CuisineCategory`] values.
//!
//! [`Area`]: crate::catalog::domain::Area
//! [`CuisineCategory`]: crate::catalog::domain::CuisineCategory

mod mapping;
mod normalizer;
mod parser;

pub use mapping::{categorize_cuisine, extract_area, extract_zip_code, DEFAULT_ZIP_CODE};

pub(crate) use normalizer::digits;
pub(crate) use parser::LegacyRecord;

use crate::catalog::domain::RawRestaurant;
use crate::catalog::featured::FeaturedListing;
use serde::Deserialize;
use std::io::Read;
use std::path::Path;

#[derive(Debug)]
pub enum CatalogImportError {
    Io(std::io::Error),
    Json(serde_json::Error),
}

impl std::fmt::Display for CatalogImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogImportError::Io(err) => write!(f, "failed to read restaurant data: {}", err),
            CatalogImportError::Json(err) => write!(f, "invalid restaurant JSON: {}", err),
        }
    }
}

impl std::error::Error for CatalogImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CatalogImportError::Io(err) => Some(err),
            CatalogImportError::Json(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for CatalogImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for CatalogImportError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

/// Records as read from disk, not yet cleaned. Validation runs against this
/// form so that problems are reported before clamping hides them.
#[derive(Debug, Clone, Default)]
pub struct LegacyDataset {
    pub(crate) records: Vec<LegacyRecord>,
}

impl LegacyDataset {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn into_raw(self) -> Vec<RawRestaurant> {
        self.records
            .into_iter()
            .map(LegacyRecord::into_raw)
            .collect()
    }
}

#[derive(Debug, Deserialize)]
struct LegacyFeaturedRecord {
    #[serde(flatten)]
    record: LegacyRecord,
    #[serde(flatten)]
    listing: FeaturedListing,
}

pub struct LegacyCatalogImporter;

impl LegacyCatalogImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<LegacyDataset, CatalogImportError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)?;
        let dataset = Self::from_reader(std::io::BufReader::new(file))?;
        tracing::info!(path = %path.display(), records = dataset.len(), "loaded restaurant data");
        Ok(dataset)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<LegacyDataset, CatalogImportError> {
        let records = parser::parse_records(reader)?;
        Ok(LegacyDataset { records })
    }

    pub fn featured_from_path<P: AsRef<Path>>(
        path: P,
    ) -> Result<Vec<(RawRestaurant, FeaturedListing)>, CatalogImportError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)?;
        let featured = Self::featured_from_reader(std::io::BufReader::new(file))?;
        tracing::info!(path = %path.display(), records = featured.len(), "loaded featured data");
        Ok(featured)
    }

    pub fn featured_from_reader<R: Read>(
        reader: R,
    ) -> Result<Vec<(RawRestaurant, FeaturedListing)>, CatalogImportError> {
        let records: Vec<LegacyFeaturedRecord> = serde_json::from_reader(reader)?;
        Ok(records
            .into_iter()
            .map(|featured| (featured.record.into_raw(), featured.listing))
            .collect())
    }
}
