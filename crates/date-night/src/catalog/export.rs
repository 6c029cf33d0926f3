use super::domain::Restaurant;
use serde::Serialize;
use std::io::Write;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write export: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to encode csv: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to encode json: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Csv,
}

impl ExportFormat {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
        }
    }

    /// Picks the format from a file extension, defaulting to JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|extension| extension.to_str()) {
            Some(extension) if extension.eq_ignore_ascii_case("csv") => Self::Csv,
            _ => Self::Json,
        }
    }
}

/// Flattened spreadsheet row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CsvRow<'a> {
    pub name: &'a str,
    pub address: &'a str,
    pub phone: &'a str,
    pub website: &'a str,
    pub rating: f64,
    pub price_level: u8,
    pub cuisine_types: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub date_night_score: u8,
    pub review_count: usize,
    pub photo_count: usize,
}

impl<'a> From<&'a Restaurant> for CsvRow<'a> {
    fn from(restaurant: &'a Restaurant) -> Self {
        Self {
            name: &restaurant.name,
            address: &restaurant.address,
            phone: restaurant.phone.as_deref().unwrap_or_default(),
            website: restaurant.website.as_deref().unwrap_or_default(),
            rating: restaurant.rating,
            price_level: restaurant.price_level,
            cuisine_types: restaurant.cuisine_types.join(", "),
            latitude: restaurant.latitude,
            longitude: restaurant.longitude,
            date_night_score: restaurant.date_night_score,
            review_count: restaurant.reviews.len(),
            photo_count: restaurant.photos.len(),
        }
    }
}

/// Pretty-printed camelCase records, the shape the site reads.
pub fn write_json<W: Write>(mut writer: W, restaurants: &[Restaurant]) -> Result<(), ExportError> {
    serde_json::to_writer_pretty(&mut writer, restaurants)?;
    writer.flush()?;
    Ok(())
}

pub fn write_csv<W: Write>(writer: W, restaurants: &[Restaurant]) -> Result<(), ExportError> {
    let mut csv = csv::Writer::from_writer(writer);
    for restaurant in restaurants {
        csv.serialize(CsvRow::from(restaurant))?;
    }
    csv.flush()?;
    Ok(())
}

pub fn export_to_path(
    path: &Path,
    format: ExportFormat,
    restaurants: &[Restaurant],
) -> Result<(), ExportError> {
    let file = std::fs::File::create(path)?;
    let mut writer = std::io::BufWriter::new(file);
    match format {
        ExportFormat::Json => write_json(&mut writer, restaurants)?,
        ExportFormat::Csv => write_csv(&mut writer, restaurants)?,
    }
    writer.flush()?;

    tracing::info!(
        path = %path.display(),
        format = format.label(),
        records = restaurants.len(),
        "exported restaurants"
    );
    Ok(())
}
