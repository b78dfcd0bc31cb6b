//! @acp:module "Complexity Adjustment"
//! @acp:summary "Scale base time by the slide's technical depth"
//! @acp:domain timing
//! @acp:layer logic

use super::tables::TimingTables;
use super::types::SlideDescriptor;

/// Round a depth score into the 1..=5 table range
pub fn depth_level(technical_depth: f64) -> usize {
    technical_depth.clamp(1.0, 5.0).round() as usize
}

/// Multiplier for a technical depth score
pub fn complexity_multiplier(technical_depth: f64, tables: &TimingTables) -> f64 {
    tables.complexity_multipliers[depth_level(technical_depth) - 1]
}

/// Apply depth multipliers to base allocations
pub fn apply_complexity_adjustments(
    base: &[f64],
    slides: &[SlideDescriptor],
    tables: &TimingTables,
) -> Vec<f64> {
    let adjusted = base
        .iter()
        .zip(slides)
        .map(|(minutes, slide)| minutes * complexity_multiplier(slide.technical_depth, tables))
        .collect();

    tracing::debug!("Applied complexity adjustments to {} slides", slides.len());
    adjusted
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_depth_level_clamps_and_rounds() {
        assert_eq!(depth_level(0.2), 1);
        assert_eq!(depth_level(2.4), 2);
        assert_eq!(depth_level(2.5), 3);
        assert_eq!(depth_level(4.6), 5);
        assert_eq!(depth_level(9.0), 5);
    }

    #[test]
    fn test_multiplier_table() {
        let tables = TimingTables::default();
        assert_eq!(complexity_multiplier(1.0, &tables), 0.7);
        assert_eq!(complexity_multiplier(3.0, &tables), 1.0);
        assert_eq!(complexity_multiplier(5.0, &tables), 1.3);
    }

    #[test]
    fn test_deepest_slide_needs_nearly_twice_the_shallowest() {
        let tables = TimingTables::default();
        let ratio = complexity_multiplier(5.0, &tables) / complexity_multiplier(1.0, &tables);
        assert!(ratio > 1.8 && ratio < 1.9);
    }
}
