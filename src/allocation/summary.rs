//! @acp:module "Allocation Summary"
//! @acp:summary "Aggregate statistics over a set of time allocations"
//! @acp:domain timing
//! @acp:layer output

use serde::{Deserialize, Serialize};

use super::allocator::Allocations;

/// Slide counts per duration bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TimeDistribution {
    /// Under 2 minutes
    pub short: usize,
    /// 2 to 5 minutes inclusive
    pub medium: usize,
    /// Over 5 minutes
    pub long: usize,
}

/// @acp:summary "Aggregate view of an allocation run"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationSummary {
    pub total_slides: usize,
    pub total_time: f64,
    pub average_time: f64,
    pub time_distribution: TimeDistribution,
    pub min_time: f64,
    pub max_time: f64,
    /// Slides whose time was clamped or flagged
    pub constrained_slides: Vec<u32>,
    pub target_time: f64,
    /// `target_time - total_time`; non-zero only when bounds conflict with the target
    pub residual_minutes: f64,
}

/// Summarize allocations against the target they were computed for
pub fn summarize(allocations: &Allocations, target_minutes: f64) -> AllocationSummary {
    let total_time: f64 = allocations.values().map(|a| a.allocated_minutes).sum();

    let mut distribution = TimeDistribution::default();
    for allocation in allocations.values() {
        if allocation.allocated_minutes < 2.0 {
            distribution.short += 1;
        } else if allocation.allocated_minutes <= 5.0 {
            distribution.medium += 1;
        } else {
            distribution.long += 1;
        }
    }

    let (min_time, max_time) = if allocations.is_empty() {
        (0.0, 0.0)
    } else {
        allocations
            .values()
            .map(|a| a.allocated_minutes)
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), m| {
                (lo.min(m), hi.max(m))
            })
    };

    let average_time = if allocations.is_empty() {
        0.0
    } else {
        total_time / allocations.len() as f64
    };

    AllocationSummary {
        total_slides: allocations.len(),
        total_time,
        average_time,
        time_distribution: distribution,
        min_time,
        max_time,
        constrained_slides: allocations
            .values()
            .filter(|a| a.was_adjusted())
            .map(|a| a.slide_number)
            .collect(),
        target_time: target_minutes,
        residual_minutes: target_minutes - total_time,
    }
}
