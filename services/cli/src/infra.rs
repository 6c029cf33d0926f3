use chrono::{DateTime, NaiveDate, Utc};
use date_night::catalog::{self, Area, EnrichmentContext, FeaturedTier, LoadedCatalog};
use date_night::config::AppConfig;
use date_night::error::AppError;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;

pub(crate) fn parse_area(raw: &str) -> Result<Area, String> {
    Area::from_label(raw).ok_or_else(|| {
        let known: Vec<&str> = Area::ordered().iter().map(|area| area.slug()).collect();
        format!("unknown area '{raw}' (expected one of: {})", known.join(", "))
    })
}

pub(crate) fn parse_tier(raw: &str) -> Result<FeaturedTier, String> {
    FeaturedTier::from_label(raw)
        .ok_or_else(|| format!("unknown tier '{raw}' (expected premium, gold or platinum)"))
}

/// Accepts RFC 3339 timestamps or plain `YYYY-MM-DD` dates (midnight UTC).
pub(crate) fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, String> {
    let trimmed = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(parsed.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| format!("failed to parse '{raw}' as RFC 3339 or YYYY-MM-DD"))
}

pub(crate) fn enrichment_context(config: &AppConfig) -> EnrichmentContext {
    EnrichmentContext::new(config.catalog.city.clone(), Utc::now())
}

pub(crate) fn load_catalog(config: &AppConfig) -> Result<LoadedCatalog, AppError> {
    Ok(catalog::load(&config.data, &enrichment_context(config))?)
}

pub(crate) fn rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

pub(crate) fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), AppError> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{json}");
    Ok(())
}
