use super::config::ScoringWeights;
use super::{ScoreComponent, ScoreInputs, SubScoreKind};
use crate::catalog::domain::Area;

pub(crate) const MAX_SUB_SCORE: f64 = 100.0;

const ROMANTIC_CUISINES: [&str; 4] = ["italian", "french", "japanese", "mediterranean"];

const OCCASION_CUISINES: [&str; 4] = ["french", "italian", "japanese", "steakhouse"];

const ROMANTIC_NEIGHBORHOODS: [Area; 4] = [
    Area::BeverlyHills,
    Area::WestHollywood,
    Area::Malibu,
    Area::SantaMonica,
];

const UPSCALE_NEIGHBORHOODS: [Area; 3] = [Area::BeverlyHills, Area::WestHollywood, Area::Malibu];

const ACCESSIBLE_NEIGHBORHOODS: [Area; 4] = [
    Area::BeverlyHills,
    Area::WestHollywood,
    Area::SantaMonica,
    Area::DowntownLa,
];

pub(crate) fn score_components(
    inputs: &ScoreInputs<'_>,
    weights: &ScoringWeights,
) -> Vec<ScoreComponent> {
    SubScoreKind::ordered()
        .into_iter()
        .map(|kind| {
            let (raw, notes) = match kind {
                SubScoreKind::Ambiance => ambiance(inputs),
                SubScoreKind::SocialBuzz => social_buzz(inputs),
                SubScoreKind::OccasionFit => occasion_fit(inputs),
                SubScoreKind::Quality => quality(inputs),
                SubScoreKind::Freshness => freshness(inputs),
                SubScoreKind::Practicality => practicality(inputs),
            };
            let value = raw.clamp(0.0, MAX_SUB_SCORE);
            let weight = weights.weight(kind);

            ScoreComponent {
                kind,
                raw,
                value,
                weight,
                contribution: value * weight,
                notes,
            }
        })
        .collect()
}

/// `italian` and `italian_restaurant` both count for the `italian` stem;
/// synonyms such as `pizza` do not.
fn tag_matches(tag: &str, stem: &str) -> bool {
    let tag = tag.to_ascii_lowercase();
    tag == stem
        || tag
            .strip_suffix("_restaurant")
            .is_some_and(|base| base == stem)
}

fn any_cuisine_in(inputs: &ScoreInputs<'_>, stems: &[&str]) -> bool {
    inputs
        .cuisine_types
        .iter()
        .any(|tag| stems.iter().any(|stem| tag_matches(tag, stem)))
}

fn ambiance(inputs: &ScoreInputs<'_>) -> (f64, String) {
    let mut score = 50.0;
    let mut notes = Vec::new();

    if any_cuisine_in(inputs, &ROMANTIC_CUISINES) {
        score += 20.0;
        notes.push("romantic cuisine +20".to_string());
    } else {
        score += 10.0;
        notes.push("cuisine +10".to_string());
    }

    let price = f64::from(inputs.price_level) * 5.0;
    score += price;
    notes.push(format!("price level {} +{price}", inputs.price_level));

    if ROMANTIC_NEIGHBORHOODS.contains(&inputs.neighborhood) {
        score += 15.0;
        notes.push(format!("{} is a romantic neighborhood +15", inputs.neighborhood));
    }

    if matches!(inputs.area, Area::BeverlyHills | Area::WestHollywood) {
        score += 10.0;
        notes.push(format!("{} +10", inputs.area));
    }

    (score, notes.join("; "))
}

fn social_buzz(inputs: &ScoreInputs<'_>) -> (f64, String) {
    (
        inputs.rating * 20.0,
        format!("rating {} used as buzz proxy", inputs.rating),
    )
}

fn occasion_fit(inputs: &ScoreInputs<'_>) -> (f64, String) {
    let mut score = 50.0 + f64::from(inputs.price_level) * 10.0;
    let mut notes = vec![format!("price level {}", inputs.price_level)];

    if any_cuisine_in(inputs, &OCCASION_CUISINES) {
        score += 20.0;
        notes.push("special-occasion cuisine +20".to_string());
    }

    if UPSCALE_NEIGHBORHOODS.contains(&inputs.neighborhood) {
        score += 15.0;
        notes.push(format!("{} is upscale +15", inputs.neighborhood));
    }

    (score, notes.join("; "))
}

fn quality(inputs: &ScoreInputs<'_>) -> (f64, String) {
    let volume = (inputs.review_count as f64 * 2.0).min(20.0);
    (
        inputs.rating * 20.0 + volume,
        format!(
            "rating {} with {} review(s) +{volume}",
            inputs.rating, inputs.review_count
        ),
    )
}

fn freshness(inputs: &ScoreInputs<'_>) -> (f64, String) {
    (
        inputs.rating * 15.0 + f64::from(inputs.price_level) * 5.0,
        "rating and price level used as momentum proxy".to_string(),
    )
}

fn practicality(inputs: &ScoreInputs<'_>) -> (f64, String) {
    let mut score = 50.0;
    let mut notes = Vec::new();

    let price_bonus = match inputs.price_level {
        2..=4 => 20.0,
        1 => 10.0,
        5 => 15.0,
        _ => 0.0,
    };
    score += price_bonus;
    notes.push(format!("price level {} +{price_bonus}", inputs.price_level));

    if ACCESSIBLE_NEIGHBORHOODS.contains(&inputs.neighborhood) {
        score += 15.0;
        notes.push(format!("{} is accessible +15", inputs.neighborhood));
    }

    if inputs.has_opening_hours {
        score += 10.0;
        notes.push("opening hours listed +10".to_string());
    }

    if inputs.has_website {
        score += 5.0;
        notes.push("website +5".to_string());
    }

    (score, notes.join("; "))
}
