//! Configuration file loader for the `.pipeboard/` directory structure.
//!
//! This module provides functionality to load and parse configuration
//! files from the `.pipeboard/` directory:
//! - `config.toml`: Global settings (timing overrides)
//! - `stages.yaml`: Stage catalog override

use crate::catalog;
use crate::config::error::ConfigError;
use crate::config::error::ConfigResult;
use crate::config::models::AppConfig;
use crate::config::models::GlobalConfig;
use pb_protocol::StageDefinition;
use std::collections::HashSet;
use std::path::Path;

/// Loads all configuration from the `.pipeboard/` directory.
///
/// # Arguments
///
/// * `root` - Root directory containing the `.pipeboard/` folder
///
/// # Returns
///
/// An `AppConfig` with the loaded settings. If the directory or
/// individual files are missing, the built-in defaults are used
/// rather than returning an error.
///
/// # Errors
///
/// Returns `ConfigError` if:
/// - Files exist but cannot be read
/// - Files have invalid syntax (TOML or YAML)
/// - The stage catalog contains duplicate or empty stage ids
///
/// # Example
///
/// ```rust,no_run
/// use pb_core::config::loader::load_config;
/// use std::path::Path;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = load_config(Path::new("."))?;
/// println!("Loaded {} stages", config.stages.len());
/// # Ok(())
/// # }
/// ```
pub fn load_config(root: &Path) -> ConfigResult<AppConfig> {
    let pb_dir = root.join(".pipeboard");

    // If .pipeboard doesn't exist, return default config
    if !pb_dir.exists() {
        return Ok(AppConfig::default());
    }

    let global = load_global_config(&pb_dir)?;
    let stages = load_stages(&pb_dir)?;

    Ok(AppConfig { global, stages })
}

/// Loads global configuration from `config.toml`.
fn load_global_config(pb_dir: &Path) -> ConfigResult<GlobalConfig> {
    let config_path = pb_dir.join("config.toml");

    // If config.toml doesn't exist, return default
    if !config_path.exists() {
        return Ok(GlobalConfig::default());
    }

    let content =
        std::fs::read_to_string(&config_path).map_err(|source| ConfigError::FileRead {
            path: config_path.clone(),
            source,
        })?;

    let config: GlobalConfig =
        toml::from_str(&content).map_err(|source| ConfigError::TomlParse {
            path: config_path,
            source,
        })?;

    Ok(config)
}

/// Loads the stage catalog override from `stages.yaml`.
fn load_stages(pb_dir: &Path) -> ConfigResult<Vec<StageDefinition>> {
    let stages_path = pb_dir.join("stages.yaml");

    // If stages.yaml doesn't exist, use the built-in catalog
    if !stages_path.exists() {
        return Ok(catalog::default_stages());
    }

    let content =
        std::fs::read_to_string(&stages_path).map_err(|source| ConfigError::FileRead {
            path: stages_path.clone(),
            source,
        })?;

    let stages: Vec<StageDefinition> =
        serde_yaml::from_str(&content).map_err(|source| ConfigError::YamlParse {
            path: stages_path.clone(),
            source,
        })?;

    validate_stages(&stages, &stages_path)?;

    Ok(stages)
}

/// Validates that stage ids are non-empty and unique.
fn validate_stages(stages: &[StageDefinition], path: &Path) -> ConfigResult<()> {
    let mut seen = HashSet::new();

    for stage in stages {
        if stage.id.is_empty() {
            return Err(ConfigError::InvalidCatalog {
                path: path.to_path_buf(),
                reason: format!("stage '{}' has an empty id", stage.name),
            });
        }
        if !seen.insert(stage.id.as_str()) {
            return Err(ConfigError::InvalidCatalog {
                path: path.to_path_buf(),
                reason: format!("duplicate stage id '{}'", stage.id),
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_pipeboard_file(dir: &TempDir, name: &str, content: &str) {
        let pb_dir = dir.path().join(".pipeboard");
        fs::create_dir_all(&pb_dir).expect("Failed to create .pipeboard");
        fs::write(pb_dir.join(name), content).expect("Failed to write file");
    }

    #[test]
    fn test_load_config_without_pipeboard_dir_uses_defaults() {
        let dir = TempDir::new().expect("Failed to create temp dir");

        let config = load_config(dir.path()).expect("Failed to load config");

        assert_eq!(config.stages, catalog::default_stages());
        assert_eq!(config.global.timing.start_delay_ms, 500);
    }

    #[test]
    fn test_load_config_with_stage_override() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        write_pipeboard_file(
            &dir,
            "stages.yaml",
            r#"
- id: lint
  name: Lint
  icon: "🧹"
  nominal-duration: 10s
- id: build
  name: Build
  icon: "🔨"
  nominal-duration: 45s
"#,
        );

        let config = load_config(dir.path()).expect("Failed to load config");

        assert_eq!(config.stages.len(), 2);
        assert_eq!(config.stages[0].id, "lint");
        assert_eq!(config.stages[1].name, "Build");
    }

    #[test]
    fn test_load_config_with_timing_override() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        write_pipeboard_file(
            &dir,
            "config.toml",
            r#"
[timing]
start-delay-ms = 50
stage-delay-ms = 80
"#,
        );

        let config = load_config(dir.path()).expect("Failed to load config");

        assert_eq!(config.global.timing.start_delay_ms, 50);
        assert_eq!(config.global.timing.stage_delay_ms, 80);
    }

    #[test]
    fn test_load_config_rejects_duplicate_stage_ids() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        write_pipeboard_file(
            &dir,
            "stages.yaml",
            r#"
- id: build
  name: Build
  icon: "🔨"
  nominal-duration: 45s
- id: build
  name: Build Again
  icon: "🔨"
  nominal-duration: 45s
"#,
        );

        let result = load_config(dir.path());
        assert!(matches!(
            result,
            Err(ConfigError::InvalidCatalog { .. })
        ));
    }

    #[test]
    fn test_load_config_rejects_invalid_yaml() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        write_pipeboard_file(&dir, "stages.yaml", "not: [valid, catalog");

        let result = load_config(dir.path());
        assert!(matches!(result, Err(ConfigError::YamlParse { .. })));
    }

    #[test]
    fn test_load_config_allows_empty_catalog() {
        // An empty stage list is legal; a run over it produces only the
        // start and completion log lines.
        let dir = TempDir::new().expect("Failed to create temp dir");
        write_pipeboard_file(&dir, "stages.yaml", "[]");

        let config = load_config(dir.path()).expect("Failed to load config");
        assert!(config.stages.is_empty());
    }
}
