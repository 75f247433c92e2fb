//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.campus/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.
//!
//! Loading and resolution run before the file logger exists, so they do not
//! log. Anything worth reporting is carried in `ResolvedConfig` and logged by
//! `main` once the logger is up.

use log::{LevelFilter, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct CampusConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Catalog file (TOML or JSON). Relative paths resolve against `~/.campus/`.
    pub catalog: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub file: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Info;
pub const DEFAULT_LOG_FILE: &str = "campus.log";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// `None` means the built-in catalog.
    pub catalog_path: Option<PathBuf>,
    pub log_level: LevelFilter,
    pub log_file: PathBuf,
    /// Log level settings that did not parse, in the order they were tried.
    pub rejected_log_levels: Vec<String>,
}

/// Values given on the command line (None = not specified).
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub catalog: Option<PathBuf>,
    pub log_level: Option<String>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns `~/.campus/`.
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".campus"))
}

/// Returns the path to `~/.campus/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Load config from `~/.campus/config.toml`.
///
/// A missing file (or no home directory) yields `CampusConfig::default()`.
/// A malformed file returns `ConfigError::Parse`.
pub fn load_config() -> Result<CampusConfig, ConfigError> {
    let Some(path) = config_path() else {
        return Ok(CampusConfig::default());
    };
    if !path.exists() {
        return Ok(CampusConfig::default());
    }

    let contents = fs::read_to_string(&path).map_err(ConfigError::Io)?;
    parse_config(&contents)
}

/// Writes the commented default config on first run. Call after logging is
/// initialised; returns the path when a file was generated.
pub fn ensure_default_config() -> Option<PathBuf> {
    let Some(path) = config_path() else {
        warn!("Could not determine home directory, using default config");
        return None;
    };
    if path.exists() {
        info!("Loaded config from {}", path.display());
        return None;
    }

    info!("No config file found, generating default at {}", path.display());
    generate_default_config(&path).then_some(path)
}

pub fn parse_config(contents: &str) -> Result<CampusConfig, ConfigError> {
    toml::from_str(contents).map_err(ConfigError::Parse)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) -> bool {
    let default_content = r#"# Campus Configuration
# All settings are optional. Defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# catalog = "catalog.toml"     # TOML or JSON; relative to ~/.campus/. Or set CAMPUS_CATALOG
#                              # Omit to use the built-in catalog.

# [logging]
# level = "info"               # "off", "error", "warn", "info", "debug", "trace"
# file = "campus.log"          # Or set CAMPUS_LOG_FILE
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return false;
        }
    }
    match fs::write(path, default_content) {
        Ok(()) => true,
        Err(e) => {
            warn!("Failed to write default config: {}", e);
            false
        }
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &CampusConfig, cli: &CliOverrides) -> ResolvedConfig {
    resolve_with_env(config, cli, |key| std::env::var(key).ok())
}

/// Same as [`resolve`], with the environment lookup injected.
pub fn resolve_with_env(
    config: &CampusConfig,
    cli: &CliOverrides,
    env: impl Fn(&str) -> Option<String>,
) -> ResolvedConfig {
    // Catalog: CLI → env → config → built-in
    let catalog_path = cli.catalog.clone().or_else(|| {
        env("CAMPUS_CATALOG")
            .map(PathBuf::from)
            .or_else(|| config.general.catalog.as_deref().map(relative_to_config_dir))
    });

    // Log level: CLI → env → config → default. Each layer is parsed on its
    // own, so a bad value only skips that layer.
    let mut rejected_log_levels = Vec::new();
    let mut accept = |level: Option<String>| -> Option<LevelFilter> {
        let level = level?;
        let parsed = parse_level(&level);
        if parsed.is_none() {
            rejected_log_levels.push(level);
        }
        parsed
    };
    let log_level = accept(cli.log_level.clone())
        .or_else(|| accept(env("CAMPUS_LOG_LEVEL")))
        .or_else(|| accept(config.logging.level.clone()))
        .unwrap_or(DEFAULT_LOG_LEVEL);

    // Log file: env → config → default
    let log_file = env("CAMPUS_LOG_FILE")
        .or_else(|| config.logging.file.clone())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE));

    ResolvedConfig {
        catalog_path,
        log_level,
        log_file,
        rejected_log_levels,
    }
}

fn relative_to_config_dir(file: &str) -> PathBuf {
    let path = PathBuf::from(file);
    if path.is_absolute() {
        return path;
    }
    match config_dir() {
        Some(dir) => dir.join(path),
        None => path,
    }
}

/// Parses a level name (`off` through `trace`, any case).
pub fn parse_level(level: &str) -> Option<LevelFilter> {
    level.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_default_config_parses() {
        let config = CampusConfig::default();
        assert!(config.general.catalog.is_none());
        assert!(config.logging.level.is_none());
    }

    #[test]
    fn test_resolve_uses_defaults_when_empty() {
        let resolved = resolve_with_env(&CampusConfig::default(), &CliOverrides::default(), no_env);
        assert!(resolved.catalog_path.is_none());
        assert_eq!(resolved.log_level, DEFAULT_LOG_LEVEL);
        assert_eq!(resolved.log_file, PathBuf::from(DEFAULT_LOG_FILE));
    }

    #[test]
    fn test_resolve_config_values_override_defaults() {
        let config = CampusConfig {
            general: GeneralConfig {
                catalog: Some("/srv/courses.json".to_string()),
            },
            logging: LoggingConfig {
                level: Some("debug".to_string()),
                file: Some("/tmp/campus-test.log".to_string()),
            },
        };
        let resolved = resolve_with_env(&config, &CliOverrides::default(), no_env);
        assert_eq!(resolved.catalog_path, Some(PathBuf::from("/srv/courses.json")));
        assert_eq!(resolved.log_level, LevelFilter::Debug);
        assert_eq!(resolved.log_file, PathBuf::from("/tmp/campus-test.log"));
    }

    #[test]
    fn test_env_beats_config_and_cli_beats_env() {
        let config = CampusConfig {
            general: GeneralConfig {
                catalog: Some("/from/config.toml".to_string()),
            },
            logging: LoggingConfig {
                level: Some("warn".to_string()),
                file: None,
            },
        };
        let env = |key: &str| match key {
            "CAMPUS_CATALOG" => Some("/from/env.toml".to_string()),
            "CAMPUS_LOG_LEVEL" => Some("trace".to_string()),
            _ => None,
        };

        let resolved = resolve_with_env(&config, &CliOverrides::default(), env);
        assert_eq!(resolved.catalog_path, Some(PathBuf::from("/from/env.toml")));
        assert_eq!(resolved.log_level, LevelFilter::Trace);

        let cli = CliOverrides {
            catalog: Some(PathBuf::from("/from/cli.toml")),
            log_level: Some("error".to_string()),
        };
        let resolved = resolve_with_env(&config, &cli, env);
        assert_eq!(resolved.catalog_path, Some(PathBuf::from("/from/cli.toml")));
        assert_eq!(resolved.log_level, LevelFilter::Error);
    }

    #[test]
    fn test_relative_catalog_resolves_under_config_dir() {
        let config = CampusConfig {
            general: GeneralConfig {
                catalog: Some("mine.toml".to_string()),
            },
            ..Default::default()
        };
        let resolved = resolve_with_env(&config, &CliOverrides::default(), no_env);
        let path = resolved.catalog_path.unwrap();
        assert!(path.ends_with("mine.toml"));
        if let Some(dir) = config_dir() {
            assert!(path.starts_with(dir));
        }
    }

    #[test]
    fn test_bad_log_level_falls_back() {
        let config = CampusConfig {
            logging: LoggingConfig {
                level: Some("loud".to_string()),
                file: None,
            },
            ..Default::default()
        };
        let resolved = resolve_with_env(&config, &CliOverrides::default(), no_env);
        assert_eq!(resolved.log_level, DEFAULT_LOG_LEVEL);
        assert_eq!(resolved.rejected_log_levels, vec!["loud".to_string()]);
    }

    #[test]
    fn test_bad_env_log_level_falls_through_to_config() {
        let config = CampusConfig {
            logging: LoggingConfig {
                level: Some("debug".to_string()),
                file: None,
            },
            ..Default::default()
        };
        let env = |key: &str| (key == "CAMPUS_LOG_LEVEL").then(|| "shouty".to_string());
        let resolved = resolve_with_env(&config, &CliOverrides::default(), env);
        assert_eq!(resolved.log_level, LevelFilter::Debug);
        assert_eq!(resolved.rejected_log_levels, vec!["shouty".to_string()]);
    }

    #[test]
    fn test_bad_cli_log_level_is_reported_and_skipped() {
        let env = |key: &str| (key == "CAMPUS_LOG_LEVEL").then(|| "warn".to_string());
        let cli = CliOverrides {
            catalog: None,
            log_level: Some("verbose".to_string()),
        };
        let resolved = resolve_with_env(&CampusConfig::default(), &cli, env);
        assert_eq!(resolved.log_level, LevelFilter::Warn);
        assert_eq!(resolved.rejected_log_levels, vec!["verbose".to_string()]);
    }

    #[test]
    fn test_valid_levels_report_nothing() {
        let cli = CliOverrides {
            catalog: None,
            log_level: Some("TRACE".to_string()),
        };
        let resolved = resolve_with_env(&CampusConfig::default(), &cli, no_env);
        assert_eq!(resolved.log_level, LevelFilter::Trace);
        assert!(resolved.rejected_log_levels.is_empty());
    }

    #[test]
    fn test_sparse_toml_parses() {
        // Only override one thing, everything else stays default
        let config = parse_config("[logging]\nlevel = \"debug\"\n").unwrap();
        assert_eq!(config.logging.level.as_deref(), Some("debug"));
        assert!(config.logging.file.is_none());
        assert!(config.general.catalog.is_none());
    }

    #[test]
    fn test_malformed_toml_is_parse_error() {
        let err = parse_config("[general\ncatalog = ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(err.to_string().starts_with("config parse error"));
    }
}
