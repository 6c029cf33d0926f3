use super::legacy::{digits, LegacyDataset, LegacyRecord};
use serde::Serialize;
use std::fmt;

const LATITUDE_BOUNDS: (f64, f64) = (33.7, 34.3);
const LONGITUDE_BOUNDS: (f64, f64) = (-118.7, -118.0);
const PHONE_DIGITS: (usize, usize) = (10, 15);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RequiredField {
    Name,
    Address,
    Rating,
    PlaceId,
}

impl RequiredField {
    pub const fn ordered() -> [Self; 4] {
        [Self::Name, Self::Address, Self::Rating, Self::PlaceId]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Address => "address",
            Self::Rating => "rating",
            Self::PlaceId => "place_id",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValidationProblem {
    MissingField { field: RequiredField },
    RatingNotNumeric,
    RatingOutOfRange { value: f64 },
    PriceLevelNotInteger,
    PriceLevelOutOfRange { value: f64 },
    CoordinatesNotNumeric,
    LatitudeOutOfBounds { value: f64 },
    LongitudeOutOfBounds { value: f64 },
    PhoneTooShort { digits: usize },
    PhoneTooLong { digits: usize },
    WebsiteMissingScheme,
    WebsiteMalformed,
}

impl fmt::Display for ValidationProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingField { field } => write!(f, "missing or empty {}", field.label()),
            Self::RatingNotNumeric => f.write_str("rating must be a number"),
            Self::RatingOutOfRange { value } => {
                write!(f, "rating {value} must be between 0 and 5")
            }
            Self::PriceLevelNotInteger => f.write_str("price level must be an integer"),
            Self::PriceLevelOutOfRange { value } => {
                write!(f, "price level {value} must be between 0 and 4")
            }
            Self::CoordinatesNotNumeric => f.write_str("coordinates must be numbers"),
            Self::LatitudeOutOfBounds { value } => {
                write!(f, "latitude {value} is outside the LA area")
            }
            Self::LongitudeOutOfBounds { value } => {
                write!(f, "longitude {value} is outside the LA area")
            }
            Self::PhoneTooShort { digits } => {
                write!(f, "phone number has only {digits} digits")
            }
            Self::PhoneTooLong { digits } => write!(f, "phone number has {digits} digits"),
            Self::WebsiteMissingScheme => {
                f.write_str("website should start with http:// or https://")
            }
            Self::WebsiteMalformed => f.write_str("website appears to be invalid"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordIssue {
    /// One-based position in the source file.
    pub position: usize,
    pub name: String,
    pub problems: Vec<ValidationProblem>,
}

impl fmt::Display for RecordIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let problems: Vec<String> = self.problems.iter().map(ToString::to_string).collect();
        write!(
            f,
            "restaurant {} ({}): {}",
            self.position,
            self.name,
            problems.join(", ")
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValueRange {
    pub average: f64,
    pub min: f64,
    pub max: f64,
}

impl ValueRange {
    fn from_values(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }

        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        Some(Self {
            average: values.iter().sum::<f64>() / values.len() as f64,
            min,
            max,
        })
    }
}

/// Completeness percentages and value ranges over the records that passed.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct QualityMetrics {
    pub has_phone_pct: f64,
    pub has_website_pct: f64,
    pub has_reviews_pct: f64,
    pub has_photos_pct: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ratings: Option<ValueRange>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_night_scores: Option<ValueRange>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationReport {
    pub total_restaurants: usize,
    pub valid_restaurants: usize,
    pub invalid_restaurants: usize,
    pub issues: Vec<RecordIssue>,
    pub quality: QualityMetrics,
}

impl ValidationReport {
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}

impl LegacyDataset {
    /// Checks every record as it appears on disk, before any clamping.
    pub fn validate(&self) -> ValidationReport {
        let mut issues = Vec::new();
        let mut valid = Vec::new();

        for (index, record) in self.records.iter().enumerate() {
            let problems = record_problems(record);
            if problems.is_empty() {
                valid.push(record);
                continue;
            }

            let issue = RecordIssue {
                position: index + 1,
                name: record
                    .name
                    .clone()
                    .unwrap_or_else(|| "Unknown".to_string()),
                problems,
            };
            tracing::warn!(issue = %issue, "restaurant failed validation");
            issues.push(issue);
        }

        ValidationReport {
            total_restaurants: self.records.len(),
            valid_restaurants: valid.len(),
            invalid_restaurants: issues.len(),
            issues,
            quality: quality_metrics(&valid),
        }
    }
}

pub(crate) fn record_problems(record: &LegacyRecord) -> Vec<ValidationProblem> {
    let mut problems = Vec::new();
    required_field_problems(record, &mut problems);
    rating_problems(record, &mut problems);
    price_level_problems(record, &mut problems);
    coordinate_problems(record, &mut problems);
    phone_problems(record, &mut problems);
    website_problems(record, &mut problems);
    problems
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, |text| text.trim().is_empty())
}

fn required_field_problems(record: &LegacyRecord, problems: &mut Vec<ValidationProblem>) {
    for field in RequiredField::ordered() {
        let missing = match field {
            RequiredField::Name => is_blank(&record.name),
            RequiredField::Address => is_blank(&record.address),
            RequiredField::Rating => record.rating.is_none(),
            RequiredField::PlaceId => is_blank(&record.place_id),
        };
        if missing {
            problems.push(ValidationProblem::MissingField { field });
        }
    }
}

fn rating_problems(record: &LegacyRecord, problems: &mut Vec<ValidationProblem>) {
    let Some(rating) = &record.rating else {
        return;
    };

    match rating.as_number() {
        None => problems.push(ValidationProblem::RatingNotNumeric),
        Some(value) if !(0.0..=5.0).contains(&value) => {
            problems.push(ValidationProblem::RatingOutOfRange { value })
        }
        Some(_) => {}
    }
}

fn price_level_problems(record: &LegacyRecord, problems: &mut Vec<ValidationProblem>) {
    let Some(price_level) = &record.price_level else {
        return;
    };

    match price_level.as_number() {
        Some(value) if value.fract() == 0.0 => {
            if !(0.0..=4.0).contains(&value) {
                problems.push(ValidationProblem::PriceLevelOutOfRange { value });
            }
        }
        _ => problems.push(ValidationProblem::PriceLevelNotInteger),
    }
}

fn coordinate_problems(record: &LegacyRecord, problems: &mut Vec<ValidationProblem>) {
    let (latitude, longitude) = match (&record.latitude, &record.longitude) {
        (None, None) => return,
        (Some(latitude), Some(longitude)) => (latitude.as_number(), longitude.as_number()),
        _ => (None, None),
    };

    let (Some(latitude), Some(longitude)) = (latitude, longitude) else {
        problems.push(ValidationProblem::CoordinatesNotNumeric);
        return;
    };

    if !(LATITUDE_BOUNDS.0..=LATITUDE_BOUNDS.1).contains(&latitude) {
        problems.push(ValidationProblem::LatitudeOutOfBounds { value: latitude });
    } else if !(LONGITUDE_BOUNDS.0..=LONGITUDE_BOUNDS.1).contains(&longitude) {
        problems.push(ValidationProblem::LongitudeOutOfBounds { value: longitude });
    }
}

fn phone_problems(record: &LegacyRecord, problems: &mut Vec<ValidationProblem>) {
    let Some(phone) = record.phone.as_deref().filter(|phone| !phone.trim().is_empty()) else {
        return;
    };

    let count = digits(phone);
    if count < PHONE_DIGITS.0 {
        problems.push(ValidationProblem::PhoneTooShort { digits: count });
    } else if count > PHONE_DIGITS.1 {
        problems.push(ValidationProblem::PhoneTooLong { digits: count });
    }
}

fn website_problems(record: &LegacyRecord, problems: &mut Vec<ValidationProblem>) {
    let Some(website) = record
        .website
        .as_deref()
        .map(str::trim)
        .filter(|website| !website.is_empty())
    else {
        return;
    };

    if !(website.starts_with("http://") || website.starts_with("https://")) {
        problems.push(ValidationProblem::WebsiteMissingScheme);
    } else if !website.contains('.') {
        problems.push(ValidationProblem::WebsiteMalformed);
    }
}

fn quality_metrics(valid: &[&LegacyRecord]) -> QualityMetrics {
    if valid.is_empty() {
        return QualityMetrics::default();
    }

    let percent = |predicate: fn(&LegacyRecord) -> bool| {
        let hits = valid.iter().filter(|record| predicate(**record)).count();
        hits as f64 / valid.len() as f64 * 100.0
    };

    let ratings: Vec<f64> = valid
        .iter()
        .filter_map(|record| record.rating_value())
        .filter(|rating| *rating > 0.0)
        .collect();
    let scores: Vec<f64> = valid
        .iter()
        .filter_map(|record| record.legacy_score())
        .filter(|score| *score > 0.0)
        .collect();

    QualityMetrics {
        has_phone_pct: percent(|record| !is_blank(&record.phone)),
        has_website_pct: percent(|record| !is_blank(&record.website)),
        has_reviews_pct: percent(LegacyRecord::has_reviews),
        has_photos_pct: percent(LegacyRecord::has_photos),
        ratings: ValueRange::from_values(&ratings),
        date_night_scores: ValueRange::from_values(&scores),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::legacy::LegacyCatalogImporter;
    use std::io::Cursor;

    fn dataset(json: &str) -> LegacyDataset {
        LegacyCatalogImporter::from_reader(Cursor::new(json)).expect("parse")
    }

    const CLEAN: &str = r#"{
        "name": "Bestia",
        "address": "2121 E 7th Pl, Los Angeles, CA 90021",
        "phone": "(213) 514-5724",
        "website": "https://bestiala.com",
        "rating": 4.6,
        "price_level": 3,
        "reviews": [{"author": "A", "rating": 5, "text": "Great"}],
        "photos": [],
        "place_id": "abc",
        "latitude": 34.03,
        "longitude": -118.23,
        "date_night_score": 88
    }"#;

    #[test]
    fn clean_record_passes() {
        let report = dataset(&format!("[{CLEAN}]")).validate();
        assert!(report.is_clean());
        assert_eq!(report.valid_restaurants, 1);
        assert_eq!(report.quality.has_phone_pct, 100.0);
        assert_eq!(report.quality.has_photos_pct, 0.0);
        assert_eq!(
            report.quality.ratings,
            Some(ValueRange { average: 4.6, min: 4.6, max: 4.6 })
        );
    }

    #[test]
    fn reports_every_problem_on_a_bad_record() {
        let report = dataset(
            r#"[{
                "name": "Far Away",
                "address": "",
                "phone": "555-1234",
                "website": "www.example.com",
                "rating": 6,
                "price_level": 2.5,
                "latitude": 40.7,
                "longitude": -74.0
            }]"#,
        )
        .validate();

        assert_eq!(report.invalid_restaurants, 1);
        let issue = &report.issues[0];
        assert_eq!(issue.position, 1);
        assert_eq!(
            issue.problems,
            vec![
                ValidationProblem::MissingField { field: RequiredField::Address },
                ValidationProblem::MissingField { field: RequiredField::PlaceId },
                ValidationProblem::RatingOutOfRange { value: 6.0 },
                ValidationProblem::PriceLevelNotInteger,
                ValidationProblem::LatitudeOutOfBounds { value: 40.7 },
                ValidationProblem::PhoneTooShort { digits: 7 },
                ValidationProblem::WebsiteMissingScheme,
            ]
        );
        assert!(issue.to_string().starts_with("restaurant 1 (Far Away): missing or empty address"));
        assert_eq!(report.quality, QualityMetrics::default());
    }

    #[test]
    fn textual_numbers_are_flagged() {
        let report = dataset(
            r#"[{"name": "Quoted", "address": "x", "place_id": "p", "rating": "4.5", "price_level": "2"}]"#,
        )
        .validate();
        assert_eq!(
            report.issues[0].problems,
            vec![
                ValidationProblem::RatingNotNumeric,
                ValidationProblem::PriceLevelNotInteger
            ]
        );
    }

    #[test]
    fn metrics_cover_only_valid_records() {
        let report = dataset(&format!(
            r#"[{CLEAN}, {{"name": "Nameless Rating"}}]"#
        ))
        .validate();
        assert_eq!(report.total_restaurants, 2);
        assert_eq!(report.valid_restaurants, 1);
        assert_eq!(report.invalid_restaurants, 1);
        assert_eq!(
            report.quality.date_night_scores,
            Some(ValueRange { average: 88.0, min: 88.0, max: 88.0 })
        );
    }
}
