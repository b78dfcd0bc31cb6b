//! @acp:module "Base Allocation"
//! @acp:summary "Starting minutes per slide from its type and the presentation context"
//! @acp:domain timing
//! @acp:layer logic

use super::tables::TimingTables;
use super::types::{PresentationContext, SlideDescriptor, SlideType};

/// Combined audience and interaction multiplier.
///
/// Also scales the per-type bounds, so executive audiences tighten both the
/// starting time and the allowed range while high interaction loosens them.
pub fn context_factor(context: &PresentationContext, tables: &TimingTables) -> f64 {
    tables.audience_factors.get(context.target_audience)
        * tables.interaction_factors.get(context.interaction_level)
}

/// Starting minutes for a single slide type
pub fn base_minutes(
    slide_type: SlideType,
    context: &PresentationContext,
    tables: &TimingTables,
) -> f64 {
    tables.base_minutes.get(slide_type) * context_factor(context, tables)
}

/// Base allocation for every slide, in input order
pub fn calculate_base_allocations(
    slides: &[SlideDescriptor],
    context: &PresentationContext,
    tables: &TimingTables,
) -> Vec<f64> {
    let factor = context_factor(context, tables);
    let allocations: Vec<f64> = slides
        .iter()
        .map(|slide| tables.base_minutes.get(slide.slide_type) * factor)
        .collect();

    tracing::debug!(
        "Calculated base allocations for {} slides (context factor {:.3})",
        slides.len(),
        factor
    );
    allocations
}
