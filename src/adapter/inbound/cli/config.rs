//! Handler for the `config` command group.

use std::fs;
use std::path::Path;

use serde_json::json;

use crate::adapter::inbound::cli::output;
use crate::error::{ConfigError, Result};
use crate::infrastructure::config::Config;

/// Default config template with documentation.
pub const CONFIG_TEMPLATE: &str = include_str!("../../../../config.toml.example");

/// Execute `config init`.
pub fn execute_init(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(ConfigError::InvalidValue {
            field: "config",
            reason: "file already exists (use --force to overwrite)".to_string(),
        }
        .into());
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    fs::write(path, CONFIG_TEMPLATE)?;
    output::success("Created configuration file");
    output::field("Path", path.display());
    output::hint(&format!("edit {} to change the defaults", path.display()));
    Ok(())
}

/// Execute `config show`.
pub fn execute_show(path: &Path, config: &Config) -> Result<()> {
    if output::is_json() {
        output::json_output(json!({
            "command": "config.show",
            "path": path.display().to_string(),
            "loaded": path.exists(),
            "config": config,
        }));
        return Ok(());
    }

    output::section("Effective Configuration");
    output::field(
        "File",
        if path.exists() {
            path.display().to_string()
        } else {
            output::muted(format!("{} (not found, defaults)", path.display()))
        },
    );
    output::field("Database", &config.database);

    output::section("Logging");
    output::field("Level", &config.logging.level);
    output::field("Format", format!("{:?}", config.logging.format).to_lowercase());

    output::section("Settlement");
    output::field(
        "VOID policy",
        format!("{:?}", config.settlement.void_policy).to_lowercase(),
    );

    output::section("Advisor");
    output::field("Target", format!("{}%", config.advisor.target_pct));
    output::field("Odds buffer", config.advisor.odds_buffer);
    output::field(
        "Presets",
        config
            .advisor
            .buffer_presets
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", "),
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_parses_to_defaults() {
        let mut config = Config::parse_toml(CONFIG_TEMPLATE).unwrap();
        let mut defaults = Config::default();
        config.database = String::new();
        defaults.database = String::new();
        assert_eq!(config, defaults);
    }

    #[test]
    fn init_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        execute_init(&path, false).unwrap();
        assert!(execute_init(&path, false).is_err());
        assert!(execute_init(&path, true).is_ok());
    }
}
