//! @acp:module "Time Plan"
//! @acp:summary "Presentation budget (Q&A, buffer) to per-slide plan"
//! @acp:domain timing
//! @acp:layer service
//!
//! The allocation target is the talk time left after Q&A and a safety buffer:
//! `target = (total - qa) * (1 - buffer)`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::allocation::{
    allocate_time, complexity::complexity_multiplier, importance, normalize::equal_split,
    slide_bounds, summarize, validate_input, AllocationSummary, Allocations, PresentationContext,
    SlideDescriptor, TimeAllocation, TimingTables,
};
use crate::error::{Result, TimingError};

/// Total talk length with Q&A and buffer reservations
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PresentationBudget {
    pub total_minutes: f64,
    #[serde(default)]
    pub qa_minutes: f64,
    /// Fraction of content time held back, in [0, 1)
    #[serde(default)]
    pub buffer_fraction: f64,
}

impl PresentationBudget {
    pub fn new(total_minutes: f64, qa_minutes: f64, buffer_fraction: f64) -> Self {
        Self {
            total_minutes,
            qa_minutes,
            buffer_fraction,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.total_minutes.is_finite() && self.total_minutes > 0.0) {
            return Err(TimingError::InvalidPlan(format!(
                "total duration must be positive, got {}",
                self.total_minutes
            )));
        }
        if !(self.qa_minutes.is_finite() && self.qa_minutes >= 0.0)
            || self.qa_minutes >= self.total_minutes
        {
            return Err(TimingError::InvalidPlan(format!(
                "Q&A time must be in [0, {}), got {}",
                self.total_minutes, self.qa_minutes
            )));
        }
        if !(0.0..1.0).contains(&self.buffer_fraction) {
            return Err(TimingError::InvalidPlan(format!(
                "buffer fraction must be in [0, 1), got {}",
                self.buffer_fraction
            )));
        }
        Ok(())
    }

    /// Minutes left after Q&A
    pub fn content_minutes(&self) -> f64 {
        self.total_minutes - self.qa_minutes
    }

    pub fn buffer_minutes(&self) -> f64 {
        self.content_minutes() * self.buffer_fraction
    }

    /// Minutes to distribute across slides
    pub fn target_minutes(&self) -> f64 {
        self.content_minutes() - self.buffer_minutes()
    }
}

/// How slide time is distributed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanStrategy {
    /// Full weighting pipeline with bounds
    #[default]
    Weighted,
    /// Same time for every slide
    Equal,
}

impl PlanStrategy {
    pub fn description(&self) -> &'static str {
        match self {
            PlanStrategy::Weighted => "Weighted by slide type, depth and importance",
            PlanStrategy::Equal => "Equal time distribution",
        }
    }
}

impl FromStr for PlanStrategy {
    type Err = TimingError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "weighted" => Ok(PlanStrategy::Weighted),
            "equal" => Ok(PlanStrategy::Equal),
            _ => Err(TimingError::unknown("strategy", s)),
        }
    }
}

impl fmt::Display for PlanStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanStrategy::Weighted => write!(f, "weighted"),
            PlanStrategy::Equal => write!(f, "equal"),
        }
    }
}

/// @acp:summary "Complete timing plan for one presentation"
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimePlan {
    pub total_minutes: f64,
    pub qa_minutes: f64,
    pub content_minutes: f64,
    pub buffer_minutes: f64,
    pub target_minutes: f64,
    pub strategy: PlanStrategy,
    pub timing_strategy: String,
    pub context: PresentationContext,
    pub allocations: Vec<TimeAllocation>,
    pub summary: AllocationSummary,
}

/// Build a time plan for `slides` under `budget`
pub fn build_time_plan(
    slides: &[SlideDescriptor],
    context: &PresentationContext,
    budget: &PresentationBudget,
    strategy: PlanStrategy,
    tables: &TimingTables,
) -> Result<TimePlan> {
    budget.validate()?;
    let target = budget.target_minutes();

    let allocations = match strategy {
        PlanStrategy::Weighted => allocate_time(slides, context, target, tables)?,
        PlanStrategy::Equal => equal_distribution(slides, context, target, tables)?,
    };
    let summary = summarize(&allocations, target);

    tracing::info!(
        "Built {} plan: {:.1} of {:.1} minutes across {} slides ({:.1} Q&A, {:.1} buffer)",
        strategy,
        summary.total_time,
        budget.total_minutes,
        summary.total_slides,
        budget.qa_minutes,
        budget.buffer_minutes()
    );

    Ok(TimePlan {
        total_minutes: budget.total_minutes,
        qa_minutes: budget.qa_minutes,
        content_minutes: budget.content_minutes(),
        buffer_minutes: budget.buffer_minutes(),
        target_minutes: target,
        strategy,
        timing_strategy: strategy.description().to_string(),
        context: *context,
        allocations: allocations.into_values().collect(),
        summary,
    })
}

/// Split `target_minutes` evenly, reporting bounds without enforcing them
pub fn equal_distribution(
    slides: &[SlideDescriptor],
    context: &PresentationContext,
    target_minutes: f64,
    tables: &TimingTables,
) -> Result<Allocations> {
    validate_input(slides, target_minutes)?;
    tables.validate()?;

    let minutes = equal_split(slides.len(), target_minutes);
    Ok(slides
        .iter()
        .zip(minutes)
        .map(|(slide, minutes)| {
            let bounds = slide_bounds(slide.slide_type, context, tables);
            let allocation = TimeAllocation {
                slide_number: slide.slide_number,
                allocated_minutes: minutes,
                min_minutes: bounds.min,
                max_minutes: bounds.max,
                complexity_factor: complexity_multiplier(slide.technical_depth, tables),
                importance_factor: importance::importance_multiplier(
                    importance::importance_score(slide),
                ),
                adjustment_reason: String::new(),
            };
            (slide.slide_number, allocation)
        })
        .collect())
}
