//! @acp:module "Configuration"
//! @acp:summary "Project configuration loading, defaults and CLI overrides"
//! @acp:domain timing
//! @acp:layer config

use serde::{Deserialize, Serialize};

use crate::allocation::{Audience, InteractionLevel, PresentationContext, TimingTables};
use crate::plan::{PlanStrategy, PresentationBudget};

/// Default config file name, looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = ".slidetime.config.json";

fn default_version() -> String {
    "1.0.0".to_string()
}

/// @acp:summary "Main slide timing configuration structure"
/// @acp:lock normal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_version")]
    pub version: String,

    /// Default audience and interaction level
    #[serde(default)]
    pub context: PresentationContext,

    /// Q&A and buffer reservations
    #[serde(default)]
    pub plan: PlanConfig,

    /// Lookup tables; any table left out keeps its built-in values
    #[serde(default)]
    pub tables: TimingTables,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: default_version(),
            context: PresentationContext::default(),
            plan: PlanConfig::default(),
            tables: TimingTables::default(),
        }
    }
}

impl Config {
    /// @acp:summary "Load config from a JSON file"
    pub fn load<P: AsRef<std::path::Path>>(path: P) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        config.tables.validate()?;
        Ok(config)
    }

    /// @acp:summary "Save config to a file"
    pub fn save<P: AsRef<std::path::Path>>(&self, path: P) -> crate::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// @acp:summary "Load config if the file exists, defaults otherwise"
    ///
    /// A file that exists but fails to parse or validate is an error.
    pub fn load_or_default<P: AsRef<std::path::Path>>(path: P) -> crate::Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            tracing::debug!("No config at {:?}, using defaults", path);
            Ok(Self::default())
        }
    }

    /// Apply CLI overrides on top of file values
    pub fn with_overrides(mut self, overrides: &Overrides) -> Self {
        if let Some(audience) = overrides.audience {
            self.context.target_audience = audience;
        }
        if let Some(level) = overrides.interaction {
            self.context.interaction_level = level;
        }
        if let Some(qa) = overrides.qa_minutes {
            self.plan.qa_minutes = qa;
        }
        if let Some(buffer) = overrides.buffer_fraction {
            self.plan.buffer_fraction = buffer;
        }
        if let Some(strategy) = overrides.strategy {
            self.plan.strategy = strategy;
        }
        self
    }

    /// Budget for a talk of `total_minutes`
    pub fn budget(&self, total_minutes: f64) -> PresentationBudget {
        PresentationBudget::new(total_minutes, self.plan.qa_minutes, self.plan.buffer_fraction)
    }
}

/// @acp:summary "Plan reservations applied before allocation"
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlanConfig {
    /// Minutes reserved for questions at the end
    #[serde(default)]
    pub qa_minutes: f64,

    /// Fraction of content time held back as buffer
    #[serde(default = "default_buffer_fraction")]
    pub buffer_fraction: f64,

    #[serde(default)]
    pub strategy: PlanStrategy,
}

fn default_buffer_fraction() -> f64 {
    0.1
}

impl Default for PlanConfig {
    fn default() -> Self {
        Self {
            qa_minutes: 0.0,
            buffer_fraction: default_buffer_fraction(),
            strategy: PlanStrategy::default(),
        }
    }
}

/// CLI overrides for configuration
#[derive(Debug, Default, Clone, Copy)]
pub struct Overrides {
    pub audience: Option<Audience>,
    pub interaction: Option<InteractionLevel>,
    pub qa_minutes: Option<f64>,
    pub buffer_fraction: Option<f64>,
    pub strategy: Option<PlanStrategy>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_round_trip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_CONFIG_FILE);

        let mut config = Config::default();
        config.context.target_audience = Audience::Executive;
        config.plan.qa_minutes = 5.0;
        config.save(&path).unwrap();

        assert_eq!(Config::load(&path).unwrap(), config);
    }

    #[test]
    fn test_sparse_file_keeps_defaults() {
        let config: Config =
            serde_json::from_str(r#"{"plan": {"qa_minutes": 10}}"#).unwrap();
        assert_eq!(config.plan.qa_minutes, 10.0);
        assert_eq!(config.plan.buffer_fraction, 0.1);
        assert_eq!(config.tables, TimingTables::default());
    }

    #[test]
    fn test_invalid_tables_rejected_on_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(
            &path,
            r#"{"tables": {"complexity_multipliers": [0, 1, 1, 1, 1]}}"#,
        )
        .unwrap();
        assert!(Config::load(&path).is_err());
    }

    #[test]
    fn test_load_or_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_CONFIG_FILE);
        assert_eq!(Config::load_or_default(&path).unwrap(), Config::default());

        std::fs::write(&path, r#"{"plan": {"buffer_fraction": 0.2}}"#).unwrap();
        assert_eq!(Config::load_or_default(&path).unwrap().plan.buffer_fraction, 0.2);

        std::fs::write(&path, r#"{"tables": {"complexity_multipliers": [1, 1, -1, 1, 1]}}"#)
            .unwrap();
        assert!(Config::load_or_default(&path).is_err());
    }

    #[test]
    fn test_overrides_win() {
        let overrides = Overrides {
            audience: Some(Audience::Business),
            qa_minutes: Some(3.0),
            ..Default::default()
        };
        let config = Config::default().with_overrides(&overrides);
        assert_eq!(config.context.target_audience, Audience::Business);
        assert_eq!(config.context.interaction_level, InteractionLevel::Moderate);
        assert_eq!(config.budget(20.0), PresentationBudget::new(20.0, 3.0, 0.1));
    }
}
