//! @acp:module "Importance Weighting"
//! @acp:summary "Weight slides by type, concept density and service mentions"
//! @acp:domain timing
//! @acp:layer logic

use super::types::{SlideDescriptor, SlideType};

const BASE_SCORE: f64 = 0.5;
const CORE_TYPE_BOOST: f64 = 0.3;
const FRAMING_TYPE_BOOST: f64 = 0.15;
const SERVICE_WEIGHT: f64 = 0.02;
const CONCEPT_WEIGHT: f64 = 0.04;
const DENSITY_CAP: f64 = 0.2;
const CONFIDENCE_THRESHOLD: f64 = 0.8;
const CONFIDENCE_BOOST: f64 = 0.1;

/// Importance score in [0, 1].
///
/// Core slides (architecture, demo, technical) get the largest boost,
/// framing slides (title, agenda, summary) a smaller one. Service mentions and
/// key concepts each contribute up to 0.2, and a confident upstream analysis
/// adds 0.1.
pub fn importance_score(slide: &SlideDescriptor) -> f64 {
    let mut score = BASE_SCORE;

    score += match slide.slide_type {
        SlideType::Architecture | SlideType::Demo | SlideType::Technical => CORE_TYPE_BOOST,
        SlideType::Title | SlideType::Agenda | SlideType::Summary => FRAMING_TYPE_BOOST,
        _ => 0.0,
    };

    score += (SERVICE_WEIGHT * slide.mentioned_services.len() as f64).min(DENSITY_CAP);
    score += (CONCEPT_WEIGHT * slide.key_concepts.len() as f64).min(DENSITY_CAP);

    if slide.confidence_score > CONFIDENCE_THRESHOLD {
        score += CONFIDENCE_BOOST;
    }

    score.clamp(0.0, 1.0)
}

/// Map an importance score onto the [0.8, 1.2] time multiplier
pub fn importance_multiplier(score: f64) -> f64 {
    0.8 + 0.4 * score
}

/// Apply importance multipliers to complexity-adjusted allocations
pub fn apply_importance_weighting(adjusted: &[f64], slides: &[SlideDescriptor]) -> Vec<f64> {
    let weighted = adjusted
        .iter()
        .zip(slides)
        .map(|(minutes, slide)| minutes * importance_multiplier(importance_score(slide)))
        .collect();

    tracing::debug!("Applied importance weighting to {} slides", slides.len());
    weighted
}
