//! @acp:module "Time Allocator"
//! @acp:summary "Six-stage pipeline distributing a fixed duration across slides"
//! @acp:domain timing
//! @acp:layer logic

use std::collections::{BTreeMap, HashSet};

use super::base::calculate_base_allocations;
use super::complexity::{apply_complexity_adjustments, complexity_multiplier};
use super::constraints::{
    blocks_residual, clamp_allocations, rebalance, slide_bounds, Adjustment, SUM_TOLERANCE,
};
use super::importance::{apply_importance_weighting, importance_multiplier, importance_score};
use super::normalize::normalize_to_target;
use super::tables::TimingTables;
use super::types::{Bounds, PresentationContext, SlideDescriptor, TimeAllocation};
use crate::error::{Result, TimingError};

/// Allocations keyed by slide number
pub type Allocations = BTreeMap<u32, TimeAllocation>;

/// Allocate `target_minutes` across `slides` using the 6-stage pipeline:
/// 1. Base time from slide type and context
/// 2. Complexity adjustment from technical depth
/// 3. Importance weighting from type, concepts and services
/// 4. Normalization to the target
/// 5. Clamping into context-adjusted per-type bounds
/// 6. Proportional rebalancing back to the target
pub fn allocate_time(
    slides: &[SlideDescriptor],
    context: &PresentationContext,
    target_minutes: f64,
    tables: &TimingTables,
) -> Result<Allocations> {
    validate_input(slides, target_minutes)?;
    tables.validate()?;

    let base = calculate_base_allocations(slides, context, tables);
    let adjusted = apply_complexity_adjustments(&base, slides, tables);
    let weighted = apply_importance_weighting(&adjusted, slides);
    let normalized = normalize_to_target(&weighted, target_minutes);

    let bounds: Vec<Bounds> = slides
        .iter()
        .map(|slide| slide_bounds(slide.slide_type, context, tables))
        .collect();
    let (mut minutes, mut adjustments) = clamp_allocations(&normalized, &bounds);
    let outcome = rebalance(&mut minutes, &bounds, &mut adjustments, target_minutes);

    if !outcome.is_resolved() {
        tracing::warn!(
            "Slide bounds leave {:+.2} minutes unallocated against a {:.1} minute target",
            outcome.residual,
            target_minutes
        );
    }

    let allocations: Allocations = slides
        .iter()
        .enumerate()
        .map(|(i, slide)| {
            let mut reason = adjustments[i].to_string();
            if !outcome.is_resolved() && blocks_residual(minutes[i], &bounds[i], outcome.residual)
            {
                append_reason(&mut reason, &residual_note(outcome.residual));
            }

            let allocation = TimeAllocation {
                slide_number: slide.slide_number,
                allocated_minutes: minutes[i],
                min_minutes: bounds[i].min,
                max_minutes: bounds[i].max,
                complexity_factor: complexity_multiplier(slide.technical_depth, tables),
                importance_factor: importance_multiplier(importance_score(slide)),
                adjustment_reason: reason,
            };
            (slide.slide_number, allocation)
        })
        .collect();

    let constrained: Vec<String> = adjustments
        .iter()
        .zip(slides)
        .filter(|(a, _)| **a != Adjustment::None)
        .map(|(a, s)| format!("slide {}: {}", s.slide_number, a))
        .collect();
    if !constrained.is_empty() {
        tracing::info!("Applied constraints: {}", constrained.join(", "));
    }

    tracing::info!(
        "Calculated time allocations for {} slides, total: {:.1} minutes",
        slides.len(),
        minutes.iter().sum::<f64>()
    );

    Ok(allocations)
}

/// Reject inputs the pipeline cannot produce meaningful allocations for
pub fn validate_input(slides: &[SlideDescriptor], target_minutes: f64) -> Result<()> {
    if slides.is_empty() {
        return Err(TimingError::NoSlides);
    }
    if !(target_minutes.is_finite() && target_minutes > 0.0) {
        return Err(TimingError::InvalidDuration(target_minutes));
    }

    let mut seen = HashSet::with_capacity(slides.len());
    for slide in slides {
        if slide.slide_number == 0 {
            return Err(TimingError::InvalidSlideNumber(0));
        }
        if !seen.insert(slide.slide_number) {
            return Err(TimingError::DuplicateSlide(slide.slide_number));
        }
        if !slide.technical_depth.is_finite() {
            return Err(TimingError::InvalidDescriptor {
                slide: slide.slide_number,
                reason: format!("technical depth must be finite, got {}", slide.technical_depth),
            });
        }
        if !slide.confidence_score.is_finite() {
            return Err(TimingError::InvalidDescriptor {
                slide: slide.slide_number,
                reason: format!(
                    "confidence score must be finite, got {}",
                    slide.confidence_score
                ),
            });
        }
    }

    Ok(())
}

fn residual_note(residual: f64) -> String {
    let direction = if residual > 0.0 { "short of" } else { "over" };
    format!(
        "bounds leave total {:.2} min {} target",
        residual.abs(),
        direction
    )
}

fn append_reason(reason: &mut String, note: &str) {
    if !reason.is_empty() {
        reason.push_str("; ");
    }
    reason.push_str(note);
}

/// Sum of allocated minutes
pub fn total_minutes(allocations: &Allocations) -> f64 {
    allocations.values().map(|a| a.allocated_minutes).sum()
}

/// Whether the allocated total is within tolerance of `target`
pub fn meets_target(allocations: &Allocations, target_minutes: f64) -> bool {
    (total_minutes(allocations) - target_minutes).abs() <= SUM_TOLERANCE
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::allocation::types::SlideType;

    fn deck() -> Vec<SlideDescriptor> {
        vec![
            SlideDescriptor::new(1, SlideType::Title).with_depth(1.0),
            SlideDescriptor::new(2, SlideType::Agenda).with_depth(1.0),
            SlideDescriptor::new(3, SlideType::Technical)
                .with_depth(4.0)
                .with_services(["Lambda", "S3"]),
            SlideDescriptor::new(4, SlideType::Content),
            SlideDescriptor::new(5, SlideType::Summary).with_depth(2.0),
        ]
    }

    #[test]
    fn test_allocations_hit_target_within_bounds() {
        let tables = TimingTables::default();
        let allocations =
            allocate_time(&deck(), &PresentationContext::default(), 12.0, &tables).unwrap();

        assert_eq!(allocations.len(), 5);
        assert!(meets_target(&allocations, 12.0));
        for allocation in allocations.values() {
            assert!(allocation.allocated_minutes > 0.0);
            assert!(allocation.bounds().contains(allocation.allocated_minutes));
        }
    }

    #[test]
    fn test_factors_reported() {
        let tables = TimingTables::default();
        let allocations =
            allocate_time(&deck(), &PresentationContext::default(), 12.0, &tables).unwrap();

        let technical = &allocations[&3];
        assert_eq!(technical.complexity_factor, 1.15);
        // 0.5 + 0.3 + 0.04 -> 0.8 + 0.4 * 0.84
        assert!((technical.importance_factor - 1.136).abs() < 1e-9);
    }

    #[test]
    fn test_rejects_empty_and_bad_duration() {
        let tables = TimingTables::default();
        let context = PresentationContext::default();
        assert!(matches!(
            allocate_time(&[], &context, 10.0, &tables),
            Err(TimingError::NoSlides)
        ));
        assert!(matches!(
            allocate_time(&deck(), &context, 0.0, &tables),
            Err(TimingError::InvalidDuration(_))
        ));
        assert!(matches!(
            allocate_time(&deck(), &context, f64::NAN, &tables),
            Err(TimingError::InvalidDuration(_))
        ));
    }

    #[test]
    fn test_rejects_duplicate_and_zero_slide_numbers() {
        let tables = TimingTables::default();
        let context = PresentationContext::default();
        let duplicate = vec![
            SlideDescriptor::new(1, SlideType::Title),
            SlideDescriptor::new(1, SlideType::Content),
        ];
        assert!(matches!(
            allocate_time(&duplicate, &context, 5.0, &tables),
            Err(TimingError::DuplicateSlide(1))
        ));

        let zero = vec![SlideDescriptor::new(0, SlideType::Title)];
        assert!(matches!(
            allocate_time(&zero, &context, 5.0, &tables),
            Err(TimingError::InvalidSlideNumber(0))
        ));
    }

    #[test]
    fn test_residual_noted_when_bounds_conflict() {
        let tables = TimingTables::default();
        let slides = vec![
            SlideDescriptor::new(1, SlideType::Title),
            SlideDescriptor::new(2, SlideType::Agenda),
        ];
        // Maximum possible is 1.5 + 2.0
        let allocations =
            allocate_time(&slides, &PresentationContext::default(), 10.0, &tables).unwrap();

        assert!(!meets_target(&allocations, 10.0));
        assert_eq!(allocations[&1].allocated_minutes, 1.5);
        assert_eq!(allocations[&2].allocated_minutes, 2.0);
        for allocation in allocations.values() {
            assert!(allocation.adjustment_reason.starts_with("reduced to maximum"));
            assert!(allocation.adjustment_reason.contains("short of target"));
        }
    }
}
