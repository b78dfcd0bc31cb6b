//! @acp:module "Allocation Types"
//! @acp:summary "Slide descriptors, presentation context and allocation results"
//! @acp:domain timing
//! @acp:layer types

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::error::TimingError;

/// Coarse role of a slide in the presentation
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum SlideType {
    Title,
    Agenda,
    #[default]
    Content,
    Technical,
    Architecture,
    Demo,
    Comparison,
    Summary,
    Conclusion,
    Qa,
}

impl SlideType {
    /// Get all slide types in table order
    pub fn all() -> &'static [SlideType] {
        &[
            SlideType::Title,
            SlideType::Agenda,
            SlideType::Content,
            SlideType::Technical,
            SlideType::Architecture,
            SlideType::Demo,
            SlideType::Comparison,
            SlideType::Summary,
            SlideType::Conclusion,
            SlideType::Qa,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SlideType::Title => "title",
            SlideType::Agenda => "agenda",
            SlideType::Content => "content",
            SlideType::Technical => "technical",
            SlideType::Architecture => "architecture",
            SlideType::Demo => "demo",
            SlideType::Comparison => "comparison",
            SlideType::Summary => "summary",
            SlideType::Conclusion => "conclusion",
            SlideType::Qa => "qa",
        }
    }

    /// Parse a slide type label, falling back to `Content` for anything unknown
    pub fn from_label(label: &str) -> SlideType {
        match label.trim().to_lowercase().as_str() {
            "title" | "cover" => SlideType::Title,
            "agenda" | "outline" => SlideType::Agenda,
            "content" => SlideType::Content,
            "technical" => SlideType::Technical,
            "architecture" => SlideType::Architecture,
            "demo" => SlideType::Demo,
            "comparison" => SlideType::Comparison,
            "summary" => SlideType::Summary,
            "conclusion" => SlideType::Conclusion,
            "qa" | "q&a" | "questions" => SlideType::Qa,
            other => {
                tracing::warn!("Unknown slide type '{}', treating as content", other);
                SlideType::Content
            }
        }
    }
}

impl From<String> for SlideType {
    fn from(label: String) -> Self {
        SlideType::from_label(&label)
    }
}

impl fmt::Display for SlideType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Who the presentation is for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Audience {
    Technical,
    Business,
    #[default]
    Mixed,
    Executive,
}

impl Audience {
    pub fn as_str(&self) -> &'static str {
        match self {
            Audience::Technical => "technical",
            Audience::Business => "business",
            Audience::Mixed => "mixed",
            Audience::Executive => "executive",
        }
    }
}

impl FromStr for Audience {
    type Err = TimingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "technical" => Ok(Audience::Technical),
            "business" => Ok(Audience::Business),
            "mixed" => Ok(Audience::Mixed),
            "executive" => Ok(Audience::Executive),
            _ => Err(TimingError::unknown("audience", s)),
        }
    }
}

impl fmt::Display for Audience {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How much audience interaction the presenter plans for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InteractionLevel {
    Minimal,
    #[default]
    Moderate,
    High,
}

impl InteractionLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            InteractionLevel::Minimal => "minimal",
            InteractionLevel::Moderate => "moderate",
            InteractionLevel::High => "high",
        }
    }
}

impl FromStr for InteractionLevel {
    type Err = TimingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "minimal" => Ok(InteractionLevel::Minimal),
            "moderate" => Ok(InteractionLevel::Moderate),
            "high" => Ok(InteractionLevel::High),
            _ => Err(TimingError::unknown("interaction level", s)),
        }
    }
}

impl fmt::Display for InteractionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// @acp:summary "Audience and interaction settings for one generation run"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PresentationContext {
    #[serde(default)]
    pub target_audience: Audience,

    #[serde(default)]
    pub interaction_level: InteractionLevel,
}

impl PresentationContext {
    pub fn new(target_audience: Audience, interaction_level: InteractionLevel) -> Self {
        Self {
            target_audience,
            interaction_level,
        }
    }
}

fn default_depth() -> f64 {
    3.0
}

fn default_confidence() -> f64 {
    0.5
}

/// @acp:summary "Per-slide analysis result consumed by the allocator"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlideDescriptor {
    pub slide_number: u32,

    #[serde(default)]
    pub slide_type: SlideType,

    /// Complexity score in [1.0, 5.0]
    #[serde(default = "default_depth")]
    pub technical_depth: f64,

    #[serde(default)]
    pub key_concepts: Vec<String>,

    #[serde(default)]
    pub mentioned_services: BTreeSet<String>,

    /// Upstream analysis confidence in [0.0, 1.0]
    #[serde(default = "default_confidence")]
    pub confidence_score: f64,
}

impl SlideDescriptor {
    /// Create a descriptor with analyzer defaults (depth 3, confidence 0.5)
    pub fn new(slide_number: u32, slide_type: SlideType) -> Self {
        Self {
            slide_number,
            slide_type,
            technical_depth: default_depth(),
            key_concepts: Vec::new(),
            mentioned_services: BTreeSet::new(),
            confidence_score: default_confidence(),
        }
    }

    pub fn with_depth(mut self, depth: f64) -> Self {
        self.technical_depth = depth;
        self
    }

    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence_score = confidence;
        self
    }

    pub fn with_concepts<I, S>(mut self, concepts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.key_concepts = concepts.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_services<I, S>(mut self, services: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.mentioned_services = services.into_iter().map(Into::into).collect();
        self
    }
}

/// Inclusive [min, max] range in minutes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
}

impl Bounds {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Scale both ends by the same factor
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            min: self.min * factor,
            max: self.max * factor,
        }
    }

    pub fn clamp(&self, minutes: f64) -> f64 {
        minutes.max(self.min).min(self.max)
    }

    pub fn contains(&self, minutes: f64) -> bool {
        minutes >= self.min && minutes <= self.max
    }
}

/// @acp:summary "Final time allocation for one slide"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeAllocation {
    pub slide_number: u32,
    pub allocated_minutes: f64,
    pub min_minutes: f64,
    pub max_minutes: f64,
    pub complexity_factor: f64,
    pub importance_factor: f64,
    /// Empty unless clamping or an unresolved bound conflict touched this slide
    #[serde(default)]
    pub adjustment_reason: String,
}

impl TimeAllocation {
    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.min_minutes, self.max_minutes)
    }

    pub fn was_adjusted(&self) -> bool {
        !self.adjustment_reason.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slide_type_from_label() {
        assert_eq!(SlideType::from_label("Architecture"), SlideType::Architecture);
        assert_eq!(SlideType::from_label(" q&a "), SlideType::Qa);
        assert_eq!(SlideType::from_label("transition"), SlideType::Content);
    }

    #[test]
    fn test_slide_type_serde_fallback() {
        let parsed: SlideType = serde_json::from_str("\"divider\"").unwrap();
        assert_eq!(parsed, SlideType::Content);
        assert_eq!(serde_json::to_string(&SlideType::Qa).unwrap(), "\"qa\"");
    }

    #[test]
    fn test_context_from_str() {
        assert_eq!("Executive".parse::<Audience>().unwrap(), Audience::Executive);
        assert_eq!(
            "high".parse::<InteractionLevel>().unwrap(),
            InteractionLevel::High
        );
        assert!("expert".parse::<Audience>().is_err());
    }

    #[test]
    fn test_descriptor_defaults_from_json() {
        let slide: SlideDescriptor = serde_json::from_str(r#"{"slide_number": 4}"#).unwrap();
        assert_eq!(slide, SlideDescriptor::new(4, SlideType::Content));
    }

    #[test]
    fn test_bounds_clamp() {
        let bounds = Bounds::new(1.0, 3.0);
        assert_eq!(bounds.clamp(0.2), 1.0);
        assert_eq!(bounds.clamp(4.5), 3.0);
        assert_eq!(bounds.clamp(2.0), 2.0);
        assert_eq!(bounds.scaled(0.5), Bounds::new(0.5, 1.5));
    }
}
