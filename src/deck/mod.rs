//! @acp:module "Deck Loader"
//! @acp:summary "Load slide descriptors from JSON or YAML deck files"
//! @acp:domain timing
//! @acp:layer io
//!
//! Deck entries may carry a full upstream analysis, raw slide text, or both.
//! Fields missing from the analysis are filled from the text heuristics in
//! [`crate::classify`], then from analyzer defaults.

use std::collections::BTreeSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::allocation::{
    Audience, InteractionLevel, PresentationContext, SlideDescriptor, SlideType,
};
use crate::classify;
use crate::error::{Result, TimingError};

/// On-disk deck format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeckFormat {
    Json,
    Yaml,
}

impl DeckFormat {
    /// Detect format from the file extension
    pub fn from_path(path: &Path) -> Result<Self> {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .as_deref()
        {
            Some("json") => Ok(DeckFormat::Json),
            Some("yaml") | Some("yml") => Ok(DeckFormat::Yaml),
            _ => Err(TimingError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// @acp:summary "A presentation deck as stored on disk"
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Deck {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Context stored with the deck; CLI flags take precedence
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<DeckContext>,

    pub slides: Vec<DeckSlide>,
}

/// Context fields a deck may set; unset fields fall through to config
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckContext {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_audience: Option<Audience>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interaction_level: Option<InteractionLevel>,
}

impl DeckContext {
    /// Overlay the fields this deck sets onto `base`
    pub fn merged_onto(&self, base: PresentationContext) -> PresentationContext {
        PresentationContext {
            target_audience: self.target_audience.unwrap_or(base.target_audience),
            interaction_level: self.interaction_level.unwrap_or(base.interaction_level),
        }
    }
}

/// One slide entry; every analysis field is optional
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeckSlide {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slide_number: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slide_type: Option<SlideType>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub technical_depth: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_concepts: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mentioned_services: Option<BTreeSet<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence_score: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl DeckSlide {
    /// Title and body joined for classification
    fn combined_text(&self) -> Option<String> {
        match (&self.title, &self.text) {
            (Some(title), Some(text)) => Some(format!("{}\n{}", title, text)),
            (Some(title), None) => Some(title.clone()),
            (None, Some(text)) => Some(text.clone()),
            (None, None) => None,
        }
    }
}

impl Deck {
    /// Resolve entries into descriptors.
    ///
    /// Slides without a number are numbered by position (1-based). Depth and
    /// confidence are clamped into [1, 5] and [0, 1].
    pub fn descriptors(&self) -> Vec<SlideDescriptor> {
        let total = self.slides.len() as u32;

        self.slides
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                let position = i as u32 + 1;
                let slide_number = entry.slide_number.unwrap_or(position);
                let text = entry.combined_text();
                let text = text.as_deref();

                let slide_type = entry.slide_type.unwrap_or_else(|| {
                    text.map(|t| classify::classify_slide_type(t, position, total))
                        .unwrap_or_default()
                });
                let technical_depth = entry
                    .technical_depth
                    .or_else(|| text.map(classify::assess_technical_depth))
                    .unwrap_or(3.0)
                    .clamp(1.0, 5.0);
                let key_concepts = entry
                    .key_concepts
                    .clone()
                    .or_else(|| text.map(classify::detect_key_concepts))
                    .unwrap_or_default();
                let mentioned_services = entry
                    .mentioned_services
                    .clone()
                    .or_else(|| text.map(classify::detect_services))
                    .unwrap_or_default();
                let confidence_score = entry.confidence_score.unwrap_or(0.5).clamp(0.0, 1.0);

                SlideDescriptor {
                    slide_number,
                    slide_type,
                    technical_depth,
                    key_concepts,
                    mentioned_services,
                    confidence_score,
                }
            })
            .collect()
    }
}

/// Parse deck content in the given format
pub fn parse_deck(content: &str, format: DeckFormat) -> Result<Deck> {
    let deck = match format {
        DeckFormat::Json => serde_json::from_str(content)?,
        DeckFormat::Yaml => serde_yaml::from_str(content)?,
    };
    Ok(deck)
}

/// Load a deck file, choosing the parser by extension
pub fn load_deck(path: &Path) -> Result<Deck> {
    let format = DeckFormat::from_path(path)?;
    let content = std::fs::read_to_string(path)?;
    let deck = parse_deck(&content, format)?;
    tracing::debug!("Loaded {} slides from {:?}", deck.slides.len(), path);
    Ok(deck)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(
            DeckFormat::from_path(Path::new("talk.JSON")).unwrap(),
            DeckFormat::Json
        );
        assert_eq!(
            DeckFormat::from_path(Path::new("talk.yml")).unwrap(),
            DeckFormat::Yaml
        );
        assert!(DeckFormat::from_path(Path::new("talk.pptx")).is_err());
    }

    #[test]
    fn test_explicit_fields_win_over_text() {
        let deck = parse_deck(
            r#"{"slides": [{"slide_type": "demo", "technical_depth": 2, "text": "Agenda"}]}"#,
            DeckFormat::Json,
        )
        .unwrap();
        let slides = deck.descriptors();
        assert_eq!(slides[0].slide_number, 1);
        assert_eq!(slides[0].slide_type, SlideType::Demo);
        assert_eq!(slides[0].technical_depth, 2.0);
    }

    #[test]
    fn test_defaults_without_text() {
        let deck = parse_deck("slides:\n  - slide_number: 7\n", DeckFormat::Yaml).unwrap();
        assert_eq!(deck.descriptors(), vec![SlideDescriptor::new(7, SlideType::Content)]);
    }

    #[test]
    fn test_out_of_range_values_clamped() {
        let deck = parse_deck(
            r#"{"slides": [{"technical_depth": 9, "confidence_score": 1.4}]}"#,
            DeckFormat::Json,
        )
        .unwrap();
        let slides = deck.descriptors();
        assert_eq!(slides[0].technical_depth, 5.0);
        assert_eq!(slides[0].confidence_score, 1.0);
    }

    #[test]
    fn test_partial_context_keeps_base_fields() {
        let deck = parse_deck(
            "context:\n  target_audience: business\nslides: []\n",
            DeckFormat::Yaml,
        )
        .unwrap();
        let base = PresentationContext::new(Audience::Executive, InteractionLevel::High);

        let merged = deck.context.unwrap_or_default().merged_onto(base);
        assert_eq!(
            merged,
            PresentationContext::new(Audience::Business, InteractionLevel::High)
        );
        assert_eq!(DeckContext::default().merged_onto(base), base);
    }

    #[test]
    fn test_text_drives_classification() {
        let deck = parse_deck(
            r#"
title: Serverless Patterns
context:
  target_audience: technical
slides:
  - title: Introduction
  - title: Agenda
  - title: Event-driven architecture
    text: Lambda functions behind API Gateway with failover
  - title: Q&A
"#,
            DeckFormat::Yaml,
        )
        .unwrap();

        assert_eq!(
            deck.context.and_then(|c| c.target_audience),
            Some(Audience::Technical)
        );
        assert_eq!(deck.context.and_then(|c| c.interaction_level), None);

        let slides = deck.descriptors();
        let types: Vec<_> = slides.iter().map(|s| s.slide_type).collect();
        assert_eq!(
            types,
            vec![
                SlideType::Title,
                SlideType::Agenda,
                SlideType::Technical,
                SlideType::Qa
            ]
        );
        assert!(slides[2].mentioned_services.contains("Lambda"));
        assert!(slides[2].mentioned_services.contains("API Gateway"));
        assert!(slides[2].technical_depth > 1.0);
    }
}
