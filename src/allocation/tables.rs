//! @acp:module "Timing Tables"
//! @acp:summary "Read-only lookup tables driving base times, bounds and multipliers"
//! @acp:domain timing
//! @acp:layer config
//!
//! Every table is keyed by a closed enum through an exhaustive `match`, so a
//! new slide type cannot be added without giving it a base time and bounds.

use serde::{Deserialize, Serialize};

use super::types::{Audience, Bounds, InteractionLevel, SlideType};
use crate::error::{Result, TimingError};

/// One value per slide type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerSlideType<T> {
    pub title: T,
    pub agenda: T,
    pub content: T,
    pub technical: T,
    pub architecture: T,
    pub demo: T,
    pub comparison: T,
    pub summary: T,
    pub conclusion: T,
    pub qa: T,
}

impl<T> PerSlideType<T> {
    pub fn get(&self, slide_type: SlideType) -> &T {
        match slide_type {
            SlideType::Title => &self.title,
            SlideType::Agenda => &self.agenda,
            SlideType::Content => &self.content,
            SlideType::Technical => &self.technical,
            SlideType::Architecture => &self.architecture,
            SlideType::Demo => &self.demo,
            SlideType::Comparison => &self.comparison,
            SlideType::Summary => &self.summary,
            SlideType::Conclusion => &self.conclusion,
            SlideType::Qa => &self.qa,
        }
    }
}

/// Time multiplier per audience
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AudienceFactors {
    pub technical: f64,
    pub business: f64,
    pub mixed: f64,
    pub executive: f64,
}

impl AudienceFactors {
    pub fn get(&self, audience: Audience) -> f64 {
        match audience {
            Audience::Technical => self.technical,
            Audience::Business => self.business,
            Audience::Mixed => self.mixed,
            Audience::Executive => self.executive,
        }
    }
}

/// Time multiplier per interaction level
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InteractionFactors {
    pub minimal: f64,
    pub moderate: f64,
    pub high: f64,
}

impl InteractionFactors {
    pub fn get(&self, level: InteractionLevel) -> f64 {
        match level {
            InteractionLevel::Minimal => self.minimal,
            InteractionLevel::Moderate => self.moderate,
            InteractionLevel::High => self.high,
        }
    }
}

/// @acp:summary "All lookup tables used by the allocation pipeline"
/// @acp:lock normal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingTables {
    /// Starting minutes per slide type
    pub base_minutes: PerSlideType<f64>,

    /// Allowed [min, max] minutes per slide type, before context scaling
    pub bounds: PerSlideType<Bounds>,

    pub audience_factors: AudienceFactors,

    pub interaction_factors: InteractionFactors,

    /// Multipliers for rounded technical depth 1..=5
    pub complexity_multipliers: [f64; 5],
}

impl Default for TimingTables {
    fn default() -> Self {
        Self {
            base_minutes: PerSlideType {
                title: 0.5,
                agenda: 1.0,
                content: 2.0,
                technical: 3.0,
                architecture: 3.0,
                demo: 2.5,
                comparison: 2.0,
                summary: 1.5,
                conclusion: 1.5,
                qa: 3.0,
            },
            bounds: PerSlideType {
                title: Bounds::new(0.5, 1.5),
                agenda: Bounds::new(1.0, 2.0),
                content: Bounds::new(1.5, 4.0),
                technical: Bounds::new(2.0, 5.0),
                architecture: Bounds::new(2.0, 6.0),
                demo: Bounds::new(2.0, 6.0),
                comparison: Bounds::new(1.5, 4.0),
                summary: Bounds::new(1.0, 3.0),
                conclusion: Bounds::new(1.0, 3.0),
                qa: Bounds::new(2.0, 8.0),
            },
            audience_factors: AudienceFactors {
                technical: 0.95,
                business: 1.05,
                mixed: 1.0,
                executive: 0.9,
            },
            interaction_factors: InteractionFactors {
                minimal: 0.9,
                moderate: 1.0,
                high: 1.15,
            },
            complexity_multipliers: [0.7, 0.85, 1.0, 1.15, 1.3],
        }
    }
}

impl TimingTables {
    /// Reject tables that would produce non-positive or inverted allocations
    pub fn validate(&self) -> Result<()> {
        for &slide_type in SlideType::all() {
            let base = *self.base_minutes.get(slide_type);
            if !(base.is_finite() && base > 0.0) {
                return Err(TimingError::InvalidTables(format!(
                    "base time for {} must be positive, got {}",
                    slide_type, base
                )));
            }

            let bounds = self.bounds.get(slide_type);
            if !(bounds.min.is_finite() && bounds.max.is_finite())
                || bounds.min <= 0.0
                || bounds.min > bounds.max
            {
                return Err(TimingError::InvalidTables(format!(
                    "bounds for {} must satisfy 0 < min <= max, got [{}, {}]",
                    slide_type, bounds.min, bounds.max
                )));
            }
        }

        let factors = [
            ("audience factor", self.audience_factors.technical),
            ("audience factor", self.audience_factors.business),
            ("audience factor", self.audience_factors.mixed),
            ("audience factor", self.audience_factors.executive),
            ("interaction factor", self.interaction_factors.minimal),
            ("interaction factor", self.interaction_factors.moderate),
            ("interaction factor", self.interaction_factors.high),
        ];
        let multipliers = self
            .complexity_multipliers
            .iter()
            .map(|&m| ("complexity multiplier", m));

        for (name, value) in factors.into_iter().chain(multipliers) {
            if !(value.is_finite() && value > 0.0) {
                return Err(TimingError::InvalidTables(format!(
                    "{} must be positive, got {}",
                    name, value
                )));
            }
        }

        Ok(())
    }
}
