//! @acp:module "Tables Command"
//! @acp:summary "Show the active timing tables for a presentation context"
//! @acp:domain timing
//! @acp:layer handler

use anyhow::Result;
use console::style;
use serde::Serialize;

use crate::allocation::{base::base_minutes, slide_bounds, SlideType};
use crate::config::{Config, Overrides};

/// Options for the tables command
#[derive(Debug, Clone, Default)]
pub struct TablesOptions {
    pub overrides: Overrides,
    /// Output as JSON
    pub json: bool,
}

/// Effective timing for one slide type under a context
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeTiming {
    pub slide_type: SlideType,
    pub base_minutes: f64,
    pub min_minutes: f64,
    pub max_minutes: f64,
}

/// Base times and bounds per slide type after context scaling
pub fn effective_tables(config: &Config) -> Vec<TypeTiming> {
    SlideType::all()
        .iter()
        .map(|&slide_type| {
            let bounds = slide_bounds(slide_type, &config.context, &config.tables);
            TypeTiming {
                slide_type,
                base_minutes: base_minutes(slide_type, &config.context, &config.tables),
                min_minutes: bounds.min,
                max_minutes: bounds.max,
            }
        })
        .collect()
}

/// Execute the tables command
pub fn execute_tables(options: TablesOptions, config: Config) -> Result<()> {
    let config = config.with_overrides(&options.overrides);
    let rows = effective_tables(&config);

    if options.json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    println!(
        "Timing for {} audience, {} interaction:\n",
        style(config.context.target_audience).bold(),
        style(config.context.interaction_level).bold()
    );
    println!("  {:14} {:>6} {:>6} {:>6}", "type", "base", "min", "max");
    for row in rows {
        println!(
            "  {:14} {:>6.2} {:>6.2} {:>6.2}",
            row.slide_type.as_str(),
            row.base_minutes,
            row.min_minutes,
            row.max_minutes
        );
    }

    let multipliers = config
        .tables
        .complexity_multipliers
        .iter()
        .enumerate()
        .map(|(i, m)| format!("{}→{:.2}", i + 1, m))
        .collect::<Vec<_>>()
        .join("  ");
    println!("\n  depth multipliers: {}", multipliers);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::allocation::Audience;

    #[test]
    fn test_effective_tables_cover_every_type() {
        let rows = effective_tables(&Config::default());
        assert_eq!(rows.len(), SlideType::all().len());
        let qa = rows.iter().find(|r| r.slide_type == SlideType::Qa).unwrap();
        assert_eq!(qa.base_minutes, 3.0);
        assert_eq!((qa.min_minutes, qa.max_minutes), (2.0, 8.0));
    }

    #[test]
    fn test_executive_tightens_everything() {
        let config = Config::default().with_overrides(&Overrides {
            audience: Some(Audience::Executive),
            ..Default::default()
        });
        let neutral = effective_tables(&Config::default());
        for (tight, base) in effective_tables(&config).iter().zip(&neutral) {
            assert!(tight.base_minutes < base.base_minutes);
            assert!(tight.max_minutes < base.max_minutes);
        }
    }
}
