//! @acp:module "Allocation Constraints"
//! @acp:summary "Per-type bound clamping and proportional rebalancing"
//! @acp:domain timing
//! @acp:layer logic
//!
//! Clamping can move the total away from the target. Rebalancing pushes the
//! difference back proportionally to each slide's own time, first across all
//! slides and then across slides that still have room. When every slide that
//! could move is pinned at a bound, bounds win and the residual is reported.

use std::fmt;

use super::base::context_factor;
use super::tables::TimingTables;
use super::types::{Bounds, PresentationContext, SlideType};

/// Allowed difference between the allocated total and the target, in minutes
pub const SUM_TOLERANCE: f64 = 0.01;

const HEADROOM_EPSILON: f64 = 1e-9;

/// Context-adjusted bounds for a slide type
pub fn slide_bounds(
    slide_type: SlideType,
    context: &PresentationContext,
    tables: &TimingTables,
) -> Bounds {
    tables
        .bounds
        .get(slide_type)
        .scaled(context_factor(context, tables))
}

/// Why a slide's time was moved onto a bound
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Adjustment {
    #[default]
    None,
    RaisedToMinimum,
    ReducedToMaximum,
}

impl fmt::Display for Adjustment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Adjustment::None => Ok(()),
            Adjustment::RaisedToMinimum => f.write_str("increased to minimum"),
            Adjustment::ReducedToMaximum => f.write_str("reduced to maximum"),
        }
    }
}

/// Clamp one value and report which bound, if any, was applied
pub fn clamp_to_bounds(minutes: f64, bounds: &Bounds) -> (f64, Adjustment) {
    if minutes < bounds.min {
        (bounds.min, Adjustment::RaisedToMinimum)
    } else if minutes > bounds.max {
        (bounds.max, Adjustment::ReducedToMaximum)
    } else {
        (minutes, Adjustment::None)
    }
}

/// Clamp every allocation into its bounds
pub fn clamp_allocations(normalized: &[f64], bounds: &[Bounds]) -> (Vec<f64>, Vec<Adjustment>) {
    let (clamped, adjustments): (Vec<f64>, Vec<Adjustment>) = normalized
        .iter()
        .zip(bounds)
        .map(|(&minutes, bounds)| clamp_to_bounds(minutes, bounds))
        .unzip();

    let adjusted = adjustments
        .iter()
        .filter(|a| **a != Adjustment::None)
        .count();
    if adjusted > 0 {
        tracing::debug!("Clamped {} of {} slides to their bounds", adjusted, bounds.len());
    }

    (clamped, adjustments)
}

/// Outcome of rebalancing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rebalance {
    pub passes: usize,
    /// `target - total` after the last pass
    pub residual: f64,
}

impl Rebalance {
    pub fn is_resolved(&self) -> bool {
        self.residual.abs() <= SUM_TOLERANCE
    }
}

/// Redistribute the difference between the clamped total and the target.
///
/// Pass one spreads the difference over all slides in proportion to their
/// current minutes and re-clamps. Later passes only include slides that can
/// still move in the needed direction, so each pass either closes the gap or
/// pins at least one more slide; `minutes.len() + 1` passes always suffice.
///
/// On return, `adjustments` describe where each slide ended up: a slide
/// pulled back off the bound it was clamped to loses its adjustment.
pub fn rebalance(
    minutes: &mut [f64],
    bounds: &[Bounds],
    adjustments: &mut [Adjustment],
    target: f64,
) -> Rebalance {
    let outcome = redistribute(minutes, bounds, adjustments, target);
    settle_adjustments(minutes, bounds, adjustments);
    outcome
}

fn redistribute(
    minutes: &mut [f64],
    bounds: &[Bounds],
    adjustments: &mut [Adjustment],
    target: f64,
) -> Rebalance {
    let max_passes = minutes.len() + 1;
    let mut passes = 0;

    loop {
        let total: f64 = minutes.iter().sum();
        let difference = target - total;

        if difference.abs() <= SUM_TOLERANCE || passes >= max_passes {
            return Rebalance {
                passes,
                residual: difference,
            };
        }

        let movable: Vec<usize> = (0..minutes.len())
            .filter(|&i| passes == 0 || has_headroom(minutes[i], &bounds[i], difference))
            .collect();
        let pool: f64 = movable.iter().map(|&i| minutes[i]).sum();

        if movable.is_empty() || pool <= 0.0 {
            tracing::debug!(
                "No slide can absorb {:+.2} minutes, stopping after {} passes",
                difference,
                passes
            );
            return Rebalance {
                passes,
                residual: difference,
            };
        }

        for &i in &movable {
            let proposed = minutes[i] + minutes[i] / pool * difference;
            let (clamped, adjustment) = clamp_to_bounds(proposed, &bounds[i]);
            if adjustment != Adjustment::None {
                adjustments[i] = adjustment;
            }
            minutes[i] = clamped;
        }

        passes += 1;
        tracing::debug!(
            "Rebalance pass {}: {:.2} -> {:.2} minutes",
            passes,
            total,
            minutes.iter().sum::<f64>()
        );
    }
}

/// Drop adjustments whose bound the slide no longer sits on
fn settle_adjustments(minutes: &[f64], bounds: &[Bounds], adjustments: &mut [Adjustment]) {
    for ((&value, range), adjustment) in minutes.iter().zip(bounds).zip(adjustments) {
        let still_pinned = match adjustment {
            Adjustment::None => continue,
            Adjustment::RaisedToMinimum => value <= range.min + HEADROOM_EPSILON,
            Adjustment::ReducedToMaximum => value >= range.max - HEADROOM_EPSILON,
        };
        if !still_pinned {
            *adjustment = Adjustment::None;
        }
    }
}

fn has_headroom(minutes: f64, bounds: &Bounds, difference: f64) -> bool {
    if difference > 0.0 {
        minutes < bounds.max - HEADROOM_EPSILON
    } else {
        minutes > bounds.min + HEADROOM_EPSILON
    }
}

/// Whether a slide is pinned at the bound that blocks the residual
pub fn blocks_residual(minutes: f64, bounds: &Bounds, residual: f64) -> bool {
    !has_headroom(minutes, bounds, residual)
}
