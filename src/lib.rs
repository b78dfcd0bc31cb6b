#![forbid(unsafe_code)]

//! @acp:module "Slide Timing Library"
//! @acp:summary "Per-slide speaking time allocation for presentation scripts"
//! @acp:domain timing
//! @acp:layer api
//! @acp:stability experimental
//!
//! # Slide Timing
//!
//! Distributes a fixed presentation duration across slides, weighted by slide
//! type, technical depth and content importance, then clamped to per-type
//! bounds and rebalanced so the total still matches the target.
//!
//! ## Example
//!
//! ```rust
//! use slidetime::{allocate_time, summarize, PresentationContext, SlideDescriptor, SlideType, TimingTables};
//!
//! fn main() -> slidetime::Result<()> {
//!     let slides = vec![
//!         SlideDescriptor::new(1, SlideType::Title).with_depth(1.0),
//!         SlideDescriptor::new(2, SlideType::Technical).with_depth(4.0),
//!         SlideDescriptor::new(3, SlideType::Summary),
//!     ];
//!
//!     let allocations = allocate_time(
//!         &slides,
//!         &PresentationContext::default(),
//!         7.0,
//!         &TimingTables::default(),
//!     )?;
//!
//!     let summary = summarize(&allocations, 7.0);
//!     assert!((summary.total_time - 7.0).abs() <= 0.01);
//!     Ok(())
//! }
//! ```

pub mod allocation;
pub mod classify;
pub mod commands;
pub mod config;
pub mod deck;
pub mod error;
pub mod plan;

// Re-exports
pub use allocation::{
    allocate_time, summarize, AllocationSummary, Allocations, Audience, Bounds, InteractionLevel,
    PresentationContext, SlideDescriptor, SlideType, TimeAllocation, TimeDistribution,
    TimingTables,
};
pub use config::Config;
pub use deck::{load_deck, Deck, DeckContext, DeckFormat, DeckSlide};
pub use error::{Result, TimingError};
pub use plan::{build_time_plan, PlanStrategy, PresentationBudget, TimePlan};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
