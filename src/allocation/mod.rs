//! @acp:module "Allocation"
//! @acp:summary "Per-slide speaking time allocation: base, complexity, importance, normalize, constrain"
//! @acp:domain timing
//! @acp:layer feature

pub mod allocator;
pub mod base;
pub mod complexity;
pub mod constraints;
pub mod importance;
pub mod normalize;
pub mod summary;
pub mod tables;
pub mod types;

pub use allocator::{allocate_time, meets_target, total_minutes, validate_input, Allocations};
pub use constraints::{slide_bounds, Adjustment, SUM_TOLERANCE};
pub use importance::importance_score;
pub use summary::{summarize, AllocationSummary, TimeDistribution};
pub use tables::TimingTables;
pub use types::*;
