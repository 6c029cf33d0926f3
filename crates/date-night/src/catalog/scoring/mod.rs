mod config;
mod rules;

pub use config::ScoringWeights;

use super::domain::{Area, RawRestaurant, Restaurant};
use serde::{Deserialize, Serialize};

/// The six signals blended into the date-night score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubScoreKind {
    Ambiance,
    SocialBuzz,
    OccasionFit,
    Quality,
    Freshness,
    Practicality,
}

impl SubScoreKind {
    pub const fn ordered() -> [Self; 6] {
        [
            Self::Ambiance,
            Self::SocialBuzz,
            Self::OccasionFit,
            Self::Quality,
            Self::Freshness,
            Self::Practicality,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Ambiance => "Ambiance & Vibe",
            Self::SocialBuzz => "Social Buzz",
            Self::OccasionFit => "Occasion Fit",
            Self::Quality => "Quality & Popularity",
            Self::Freshness => "Freshness & Momentum",
            Self::Practicality => "Practicality",
        }
    }
}

/// Fields the score depends on, borrowed from either a raw or an enriched record.
#[derive(Debug, Clone, Copy)]
pub struct ScoreInputs<'a> {
    pub cuisine_types: &'a [String],
    pub price_level: u8,
    pub rating: f64,
    pub review_count: usize,
    pub area: Area,
    pub neighborhood: Area,
    pub has_opening_hours: bool,
    pub has_website: bool,
}

impl<'a> From<&'a RawRestaurant> for ScoreInputs<'a> {
    fn from(raw: &'a RawRestaurant) -> Self {
        Self {
            cuisine_types: &raw.cuisine_types,
            price_level: raw.price_level,
            rating: raw.rating,
            review_count: raw.reviews.len(),
            area: raw.area,
            neighborhood: raw.area,
            has_opening_hours: !raw.opening_hours.is_empty(),
            has_website: raw.website.is_some(),
        }
    }
}

impl<'a> From<&'a Restaurant> for ScoreInputs<'a> {
    fn from(restaurant: &'a Restaurant) -> Self {
        Self {
            cuisine_types: &restaurant.cuisine_types,
            price_level: restaurant.price_level,
            rating: restaurant.rating,
            review_count: restaurant.reviews.len(),
            area: restaurant.area,
            neighborhood: restaurant.neighborhood,
            has_opening_hours: !restaurant.opening_hours.is_empty(),
            has_website: restaurant.website.is_some(),
        }
    }
}

/// Discrete contribution to a score, kept for audits and the CLI breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreComponent {
    pub kind: SubScoreKind,
    /// Rule output before clamping.
    pub raw: f64,
    /// Clamped to [0, 100].
    pub value: f64,
    pub weight: f64,
    pub contribution: f64,
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub total: u8,
    pub components: Vec<ScoreComponent>,
}

impl ScoreBreakdown {
    pub fn component(&self, kind: SubScoreKind) -> Option<&ScoreComponent> {
        self.components
            .iter()
            .find(|component| component.kind == kind)
    }
}

/// Stateless scorer applying a weight set to restaurant signals.
#[derive(Debug, Clone, Default)]
pub struct DateNightScorer {
    weights: ScoringWeights,
}

impl DateNightScorer {
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    pub fn breakdown<'a>(&self, inputs: impl Into<ScoreInputs<'a>>) -> ScoreBreakdown {
        let components = rules::score_components(&inputs.into(), &self.weights);
        let weighted: f64 = components
            .iter()
            .map(|component| component.contribution)
            .sum();

        ScoreBreakdown {
            // Standard weights sum to 1.0, so this clamp only guards custom sets.
            total: weighted.round().clamp(0.0, rules::MAX_SUB_SCORE) as u8,
            components,
        }
    }

    pub fn score<'a>(&self, inputs: impl Into<ScoreInputs<'a>>) -> u8 {
        self.breakdown(inputs).total
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::domain::{CuisineCategory, OpeningHours, Review};

    fn venice_italian() -> RawRestaurant {
        let mut opening_hours = OpeningHours::new();
        opening_hours.insert("Friday".to_string(), "5:00 PM – 11:00 PM".to_string());

        RawRestaurant {
            id: None,
            name: "Trattoria Canale".to_string(),
            address: "1 Windward Ave, Venice, CA 90291".to_string(),
            phone: None,
            website: Some("https://example.com".to_string()),
            rating: 4.5,
            price_level: 3,
            cuisine_types: vec!["italian_restaurant".to_string(), "fine_dining".to_string()],
            cuisines: vec![CuisineCategory::Italian, CuisineCategory::FineDining],
            opening_hours,
            reviews: (0..5)
                .map(|n| Review {
                    author: format!("Guest {n}"),
                    rating: 5,
                    text: "Lovely".to_string(),
                    posted_at: None,
                    helpful: None,
                })
                .collect(),
            photos: Vec::new(),
            place_id: None,
            latitude: None,
            longitude: None,
            city: None,
            area: Area::Venice,
            zip_code: "90291".to_string(),
        }
    }

    #[test]
    fn worked_example_lands_in_high_eighties() {
        let raw = venice_italian();
        let breakdown = DateNightScorer::default().breakdown(&raw);

        let ambiance = breakdown
            .component(SubScoreKind::Ambiance)
            .expect("ambiance component");
        assert_eq!(ambiance.value, 85.0);
        let quality = breakdown
            .component(SubScoreKind::Quality)
            .expect("quality component");
        assert_eq!(quality.value, 100.0);
        assert_eq!(breakdown.total, 90);

        let mut without_hours = raw.clone();
        without_hours.opening_hours.clear();
        assert_eq!(DateNightScorer::default().score(&without_hours), 89);
    }

    #[test]
    fn scoring_is_deterministic() {
        let raw = venice_italian();
        let scorer = DateNightScorer::default();
        assert_eq!(scorer.breakdown(&raw), scorer.breakdown(&raw));
    }

    #[test]
    fn empty_reviews_and_hours_only_lower_the_score() {
        let mut raw = venice_italian();
        raw.reviews.clear();
        raw.opening_hours.clear();
        raw.website = None;
        let breakdown = DateNightScorer::default().breakdown(&raw);
        let quality = breakdown
            .component(SubScoreKind::Quality)
            .expect("quality component");
        assert_eq!(quality.value, 90.0);
        assert!(breakdown.total < 90);
    }

    #[test]
    fn cuisine_bonuses_follow_literal_tags() {
        let mut pizza = venice_italian();
        pizza.area = Area::Hollywood;
        pizza.price_level = 2;
        pizza.rating = 4.0;
        pizza.reviews.clear();
        pizza.cuisine_types = vec!["pizza_restaurant".to_string()];
        pizza.cuisines = vec![CuisineCategory::Italian];

        let mut thai = pizza.clone();
        thai.cuisine_types = vec!["thai_restaurant".to_string()];
        thai.cuisines = vec![CuisineCategory::Thai];

        let scorer = DateNightScorer::default();
        let pizza_breakdown = scorer.breakdown(&pizza);
        let ambiance = pizza_breakdown
            .component(SubScoreKind::Ambiance)
            .expect("ambiance component");
        assert_eq!(ambiance.value, 70.0);
        let occasion = pizza_breakdown
            .component(SubScoreKind::OccasionFit)
            .expect("occasion component");
        assert_eq!(occasion.value, 70.0);
        assert_eq!(pizza_breakdown.total, scorer.score(&thai));

        let mut bare_italian = pizza.clone();
        bare_italian.cuisine_types = vec!["Italian".to_string()];
        assert!(scorer.score(&bare_italian) > pizza_breakdown.total);
    }

    #[test]
    fn standard_weights_sum_to_one() {
        assert!((ScoringWeights::standard().total() - 1.0).abs() < 1e-9);
    }
}
