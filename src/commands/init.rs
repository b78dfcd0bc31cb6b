//! @acp:module "Init Command"
//! @acp:summary "Write a default configuration file"
//! @acp:domain timing
//! @acp:layer handler

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use console::style;

use crate::config::Config;

/// Options for the init command
#[derive(Debug, Clone)]
pub struct InitOptions {
    /// Where to write the config
    pub path: PathBuf,
    /// Overwrite an existing file
    pub force: bool,
}

/// Execute the init command
pub fn execute_init(options: InitOptions) -> Result<()> {
    if options.path.exists() && !options.force {
        bail!(
            "{} already exists (use --force to overwrite)",
            options.path.display()
        );
    }

    Config::default()
        .save(&options.path)
        .with_context(|| format!("Failed to write {}", options.path.display()))?;

    println!(
        "{} Created {}",
        style("✓").green(),
        style(options.path.display()).bold()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{}").unwrap();

        let options = InitOptions {
            path: path.clone(),
            force: false,
        };
        assert!(execute_init(options).is_err());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{}");

        let options = InitOptions { path: path.clone(), force: true };
        execute_init(options).unwrap();
        assert_eq!(Config::load(&path).unwrap(), Config::default());
    }

    #[test]
    fn test_force_repairs_corrupt_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(Config::load_or_default(&path).is_err());

        let options = InitOptions {
            path: path.clone(),
            force: true,
        };
        execute_init(options).unwrap();
        assert_eq!(Config::load_or_default(&path).unwrap(), Config::default());
    }
}
