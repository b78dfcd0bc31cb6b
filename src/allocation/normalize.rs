//! @acp:module "Normalization"
//! @acp:summary "Rescale weighted allocations to the target duration"
//! @acp:domain timing
//! @acp:layer logic

/// Rescale so the allocations sum to `target`.
///
/// A zero (or non-finite) weighted total falls back to an equal split.
pub fn normalize_to_target(weighted: &[f64], target: f64) -> Vec<f64> {
    if weighted.is_empty() {
        return Vec::new();
    }

    let current: f64 = weighted.iter().sum();
    if !(current.is_finite() && current > 0.0) {
        tracing::warn!(
            "Weighted allocations sum to {}, falling back to equal distribution",
            current
        );
        return equal_split(weighted.len(), target);
    }

    let scale = target / current;
    tracing::debug!(
        "Normalized allocations: {:.2} -> {:.2} minutes (scale {:.3})",
        current,
        target,
        scale
    );
    weighted.iter().map(|minutes| minutes * scale).collect()
}

/// Split `target` evenly across `count` slides
pub fn equal_split(count: usize, target: f64) -> Vec<f64> {
    if count == 0 {
        return Vec::new();
    }
    vec![target / count as f64; count]
}
