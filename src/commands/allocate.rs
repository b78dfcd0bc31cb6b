//! @acp:module "Allocate Command"
//! @acp:summary "Build and print a per-slide time plan for a deck file"
//! @acp:domain timing
//! @acp:layer handler

use std::path::PathBuf;

use anyhow::{Context, Result};
use console::style;

use crate::config::{Config, Overrides};
use crate::deck::load_deck;
use crate::plan::{build_time_plan, TimePlan};

/// Options for the allocate command
#[derive(Debug, Clone)]
pub struct AllocateOptions {
    /// Deck file (.json, .yaml, .yml)
    pub deck: PathBuf,
    /// Total presentation length in minutes, Q&A included
    pub duration: f64,
    /// Flags that override config and deck values
    pub overrides: Overrides,
    /// Output as JSON
    pub json: bool,
}

/// Execute the allocate command
pub fn execute_allocate(options: AllocateOptions, config: Config) -> Result<()> {
    let plan = generate_plan(&options, config)?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
    } else {
        print_plan(&plan);
    }

    Ok(())
}

/// Load the deck and compute its plan.
///
/// Context precedence: CLI flags, then the deck's own context, then config.
pub fn generate_plan(options: &AllocateOptions, config: Config) -> Result<TimePlan> {
    let deck = load_deck(&options.deck)
        .with_context(|| format!("Failed to load deck from {:?}", options.deck))?;

    let mut config = config;
    if let Some(context) = deck.context {
        config.context = context.merged_onto(config.context);
    }
    let config = config.with_overrides(&options.overrides);

    let slides = deck.descriptors();
    let plan = build_time_plan(
        &slides,
        &config.context,
        &config.budget(options.duration),
        config.plan.strategy,
        &config.tables,
    )
    .with_context(|| format!("Failed to plan {:?}", options.deck))?;

    Ok(plan)
}

fn print_plan(plan: &TimePlan) {
    println!(
        "{} {:.1} min talk: {:.1} min content, {:.1} min Q&A, {:.1} min buffer",
        style("⏱").cyan(),
        plan.total_minutes,
        plan.target_minutes,
        plan.qa_minutes,
        plan.buffer_minutes
    );
    println!(
        "  {} audience, {} interaction, {}\n",
        plan.context.target_audience, plan.context.interaction_level, plan.timing_strategy
    );

    println!(
        "  {:>5}  {:>7}  {:>13}  {:>6}  {:>6}  note",
        "slide", "minutes", "bounds", "cplx", "imp"
    );
    for allocation in &plan.allocations {
        let minutes = format!("{:7.2}", allocation.allocated_minutes);
        let minutes = if allocation.was_adjusted() {
            style(minutes).yellow().to_string()
        } else {
            minutes
        };
        println!(
            "  {:>5}  {}  {:>5.2} – {:<5.2}  {:>6.2}  {:>6.2}  {}",
            allocation.slide_number,
            minutes,
            allocation.min_minutes,
            allocation.max_minutes,
            allocation.complexity_factor,
            allocation.importance_factor,
            allocation.adjustment_reason
        );
    }

    let summary = &plan.summary;
    println!(
        "\n  {} slides, {:.1} min total, {:.1} min average ({:.1}–{:.1})",
        summary.total_slides,
        summary.total_time,
        summary.average_time,
        summary.min_time,
        summary.max_time
    );
    println!(
        "  short: {}  medium: {}  long: {}",
        summary.time_distribution.short,
        summary.time_distribution.medium,
        summary.time_distribution.long
    );

    if summary.residual_minutes.abs() > crate::allocation::SUM_TOLERANCE {
        println!(
            "{} Slide bounds leave {:+.2} min unallocated",
            style("⚠").yellow(),
            summary.residual_minutes
        );
    } else {
        println!("{} Allocation matches target", style("✓").green());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::allocation::{Audience, InteractionLevel};

    fn write_deck(dir: &tempfile::TempDir) -> PathBuf {
        let path = dir.path().join("deck.yaml");
        std::fs::write(
            &path,
            r#"
context:
  target_audience: executive
  interaction_level: high
slides:
  - slide_type: title
  - slide_type: content
    technical_depth: 3
  - slide_type: architecture
    technical_depth: 4
  - slide_type: summary
"#,
        )
        .unwrap();
        path
    }

    #[test]
    fn test_deck_context_used_when_no_flags() {
        let dir = tempfile::tempdir().unwrap();
        let options = AllocateOptions {
            deck: write_deck(&dir),
            duration: 15.0,
            overrides: Overrides::default(),
            json: true,
        };

        let plan = generate_plan(&options, Config::default()).unwrap();
        assert_eq!(plan.context.target_audience, Audience::Executive);
        assert_eq!(plan.context.interaction_level, InteractionLevel::High);
        assert_eq!(plan.allocations.len(), 4);
    }

    #[test]
    fn test_flags_override_deck_context() {
        let dir = tempfile::tempdir().unwrap();
        let options = AllocateOptions {
            deck: write_deck(&dir),
            duration: 15.0,
            overrides: Overrides {
                audience: Some(Audience::Technical),
                qa_minutes: Some(3.0),
                ..Default::default()
            },
            json: true,
        };

        let plan = generate_plan(&options, Config::default()).unwrap();
        assert_eq!(plan.context.target_audience, Audience::Technical);
        assert_eq!(plan.context.interaction_level, InteractionLevel::High);
        assert_eq!(plan.qa_minutes, 3.0);
    }

    #[test]
    fn test_deck_and_config_each_set_one_field() {
        let dir = tempfile::tempdir().unwrap();
        let deck = dir.path().join("deck.yaml");
        std::fs::write(
            &deck,
            "context:\n  target_audience: technical\nslides:\n  - slide_type: content\n",
        )
        .unwrap();

        let mut config = Config::default();
        config.context.interaction_level = InteractionLevel::High;

        let options = AllocateOptions {
            deck,
            duration: 10.0,
            overrides: Overrides::default(),
            json: true,
        };
        let plan = generate_plan(&options, config).unwrap();
        assert_eq!(plan.context.target_audience, Audience::Technical);
        assert_eq!(plan.context.interaction_level, InteractionLevel::High);
    }

    #[test]
    fn test_missing_deck_reports_path() {
        let options = AllocateOptions {
            deck: PathBuf::from("does-not-exist.json"),
            duration: 10.0,
            overrides: Overrides::default(),
            json: false,
        };
        let err = generate_plan(&options, Config::default()).unwrap_err();
        assert!(err.to_string().contains("does-not-exist.json"));
    }
}
