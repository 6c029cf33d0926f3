use super::SubScoreKind;
use serde::{Deserialize, Serialize};

/// Share of the final score contributed by each sub-score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub ambiance: f64,
    pub social_buzz: f64,
    pub occasion_fit: f64,
    pub quality: f64,
    pub freshness: f64,
    pub practicality: f64,
}

impl ScoringWeights {
    pub const fn standard() -> Self {
        Self {
            ambiance: 0.30,
            social_buzz: 0.20,
            occasion_fit: 0.15,
            quality: 0.15,
            freshness: 0.10,
            practicality: 0.10,
        }
    }

    pub const fn weight(&self, kind: SubScoreKind) -> f64 {
        match kind {
            SubScoreKind::Ambiance => self.ambiance,
            SubScoreKind::SocialBuzz => self.social_buzz,
            SubScoreKind::OccasionFit => self.occasion_fit,
            SubScoreKind::Quality => self.quality,
            SubScoreKind::Freshness => self.freshness,
            SubScoreKind::Practicality => self.practicality,
        }
    }

    pub fn total(&self) -> f64 {
        SubScoreKind::ordered()
            .into_iter()
            .map(|kind| self.weight(kind))
            .sum()
    }
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self::standard()
    }
}
