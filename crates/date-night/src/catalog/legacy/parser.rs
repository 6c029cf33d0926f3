use super::mapping::{categorize_all, extract_area, extract_zip_code};
use super::normalizer::{clean_optional, clean_text, clean_website};
use crate::catalog::domain::{OpeningHours, RawRestaurant, RestaurantId, Review};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer};
use std::io::Read;

pub(crate) fn parse_records<R: Read>(reader: R) -> Result<Vec<LegacyRecord>, serde_json::Error> {
    serde_json::from_reader(reader)
}

/// Number as it shows up in the generated files: usually a JSON number,
/// occasionally a quoted string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub(crate) enum LooseNumber {
    Number(f64),
    Text(String),
}

impl LooseNumber {
    pub(crate) fn value(&self) -> Option<f64> {
        let value = match self {
            LooseNumber::Number(value) => Some(*value),
            LooseNumber::Text(raw) => raw.trim().parse::<f64>().ok(),
        };
        value.filter(|value| value.is_finite())
    }

    /// The value only when the source held an actual JSON number.
    pub(crate) fn as_number(&self) -> Option<f64> {
        match self {
            LooseNumber::Number(value) => Some(*value),
            LooseNumber::Text(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub(crate) enum LooseList {
    Items(Vec<String>),
    Joined(String),
}

impl Default for LooseList {
    fn default() -> Self {
        LooseList::Items(Vec::new())
    }
}

impl LooseList {
    fn into_items(self) -> Vec<String> {
        let items = match self {
            LooseList::Items(items) => items,
            LooseList::Joined(joined) => joined.split(',').map(str::to_string).collect(),
        };
        items
            .iter()
            .map(|item| clean_text(item))
            .filter(|item| !item.is_empty())
            .collect()
    }
}

/// Hours either as a weekday map or as Google `weekday_text` lines
/// ("Monday: 5:00 PM – 10:00 PM").
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub(crate) enum LegacyHours {
    Map(OpeningHours),
    Lines(Vec<String>),
}

impl Default for LegacyHours {
    fn default() -> Self {
        LegacyHours::Map(OpeningHours::new())
    }
}

impl LegacyHours {
    fn into_hours(self) -> OpeningHours {
        match self {
            LegacyHours::Map(map) => map
                .into_iter()
                .map(|(day, hours)| (clean_text(&day), clean_text(&hours)))
                .filter(|(day, _)| !day.is_empty())
                .collect(),
            LegacyHours::Lines(lines) => lines
                .iter()
                .filter_map(|line| line.split_once(": "))
                .map(|(day, hours)| (clean_text(day), clean_text(hours)))
                .filter(|(day, _)| !day.is_empty())
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub(crate) enum LegacyTime {
    Epoch(i64),
    Text(String),
}

impl LegacyTime {
    fn to_utc(&self) -> Option<DateTime<Utc>> {
        match self {
            LegacyTime::Epoch(seconds) => DateTime::from_timestamp(*seconds, 0),
            LegacyTime::Text(raw) => parse_datetime(raw).map(|naive| naive.and_utc()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub(crate) struct LegacyReview {
    #[serde(default, alias = "author_name")]
    pub(crate) author: Option<String>,
    #[serde(default)]
    pub(crate) rating: Option<LooseNumber>,
    #[serde(default)]
    pub(crate) text: Option<String>,
    #[serde(default, alias = "date")]
    pub(crate) time: Option<LegacyTime>,
    #[serde(default)]
    pub(crate) helpful: Option<u32>,
}

/// One record of the raw dataset, before any cleanup. Keys may be snake_case
/// (scraper output) or camelCase (site literals); anything may be missing.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub(crate) struct LegacyRecord {
    #[serde(default)]
    pub(crate) id: Option<String>,
    #[serde(default)]
    pub(crate) name: Option<String>,
    #[serde(default)]
    pub(crate) address: Option<String>,
    #[serde(default)]
    pub(crate) phone: Option<String>,
    #[serde(default)]
    pub(crate) website: Option<String>,
    #[serde(default)]
    pub(crate) rating: Option<LooseNumber>,
    #[serde(default, alias = "priceLevel")]
    pub(crate) price_level: Option<LooseNumber>,
    #[serde(default, alias = "cuisineTypes", deserialize_with = "null_as_default")]
    pub(crate) cuisine_types: LooseList,
    #[serde(default, alias = "openingHours", deserialize_with = "null_as_default")]
    pub(crate) opening_hours: LegacyHours,
    #[serde(default, deserialize_with = "null_as_default")]
    pub(crate) reviews: Vec<LegacyReview>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub(crate) photos: LooseList,
    #[serde(default, alias = "placeId")]
    pub(crate) place_id: Option<String>,
    #[serde(default)]
    pub(crate) latitude: Option<LooseNumber>,
    #[serde(default)]
    pub(crate) longitude: Option<LooseNumber>,
    #[serde(default)]
    pub(crate) city: Option<String>,
    #[serde(default, alias = "dateNightScore")]
    pub(crate) date_night_score: Option<LooseNumber>,
}

impl LegacyRecord {
    pub(crate) fn rating_value(&self) -> Option<f64> {
        self.rating.as_ref().and_then(LooseNumber::value)
    }

    pub(crate) fn price_level_value(&self) -> Option<f64> {
        self.price_level.as_ref().and_then(LooseNumber::value)
    }

    pub(crate) fn coordinates(&self) -> Option<(f64, f64)> {
        let latitude = self.latitude.as_ref().and_then(LooseNumber::value)?;
        let longitude = self.longitude.as_ref().and_then(LooseNumber::value)?;
        Some((latitude, longitude))
    }

    pub(crate) fn legacy_score(&self) -> Option<f64> {
        self.date_night_score.as_ref().and_then(LooseNumber::value)
    }

    pub(crate) fn has_reviews(&self) -> bool {
        !self.reviews.is_empty()
    }

    pub(crate) fn has_photos(&self) -> bool {
        match &self.photos {
            LooseList::Items(items) => !items.is_empty(),
            LooseList::Joined(joined) => !joined.trim().is_empty(),
        }
    }

    /// Cleans the record and resolves every text-derived field. Out-of-range
    /// numbers are clamped: rating into [0, 5], price level into 1..=4.
    pub(crate) fn into_raw(self) -> RawRestaurant {
        let rating = self.rating_value().unwrap_or(0.0).clamp(0.0, 5.0);
        let price_level = self
            .price_level_value()
            .map(|value| value.round().clamp(1.0, 4.0) as u8)
            .unwrap_or(1);
        let coordinates = self.coordinates();

        let name = self.name.as_deref().map(clean_text).unwrap_or_default();
        let address = self.address.as_deref().map(clean_text).unwrap_or_default();
        let cuisine_types = self.cuisine_types.into_items();
        let cuisines = categorize_all(&cuisine_types);
        let fallback_review_rating = rating.round().clamp(1.0, 5.0) as u8;
        let reviews = self
            .reviews
            .into_iter()
            .map(|review| review.into_review(fallback_review_rating))
            .collect();

        RawRestaurant {
            id: clean_optional(self.id).map(RestaurantId),
            area: extract_area(&address),
            zip_code: extract_zip_code(&address),
            name,
            address,
            phone: clean_optional(self.phone),
            website: clean_website(self.website),
            rating,
            price_level,
            cuisine_types,
            cuisines,
            opening_hours: self.opening_hours.into_hours(),
            reviews,
            photos: self.photos.into_items(),
            place_id: clean_optional(self.place_id),
            latitude: coordinates.map(|(latitude, _)| latitude),
            longitude: coordinates.map(|(_, longitude)| longitude),
            city: clean_optional(self.city),
        }
    }
}

impl LegacyReview {
    fn into_review(self, fallback_rating: u8) -> Review {
        Review {
            author: self
                .author
                .as_deref()
                .map(clean_text)
                .filter(|author| !author.is_empty())
                .unwrap_or_else(|| "Anonymous".to_string()),
            rating: self
                .rating
                .as_ref()
                .and_then(LooseNumber::value)
                .map(|value| value.round().clamp(1.0, 5.0) as u8)
                .unwrap_or(fallback_rating),
            text: self.text.as_deref().map(clean_text).unwrap_or_default(),
            posted_at: self.time.as_ref().and_then(LegacyTime::to_utc),
            helpful: self.helpful,
        }
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn parse_datetime(value: &str) -> Option<NaiveDateTime> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.naive_utc());
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0);
    }

    None
}

#[cfg(test)]
pub(crate) fn parse_datetime_for_tests(value: &str) -> Option<NaiveDateTime> {
    parse_datetime(value)
}
