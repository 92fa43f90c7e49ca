//! Front-end configuration (`vidset.toml`) and command-line overrides.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use serde::{Deserialize, Serialize};
use vidset_core::Resolution;

const CONFIG_FILE_NAME: &str = "vidset.toml";

/// Settings for the terminal front end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Seconds the user has to confirm new video settings (default: 15)
    #[serde(default = "default_revert_timeout")]
    pub revert_timeout_secs: u32,
    /// Modes offered by the simulated display, as `WIDTHxHEIGHT`
    #[serde(default = "default_modes")]
    pub modes: Vec<String>,
    /// Preferences file; the platform config directory when unset
    #[serde(default)]
    pub prefs_path: Option<PathBuf>,
}

fn default_revert_timeout() -> u32 {
    15
}

fn default_modes() -> Vec<String> {
    ["1280x720", "1600x900", "1920x1080", "2560x1440"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            revert_timeout_secs: default_revert_timeout(),
            modes: default_modes(),
            prefs_path: None,
        }
    }
}

impl AppConfig {
    /// Parsed display modes, in configured order.
    pub fn resolutions(&self) -> anyhow::Result<Vec<Resolution>> {
        self.modes
            .iter()
            .map(|m| Resolution::parse(m).with_context(|| format!("invalid mode in config: {m}")))
            .collect()
    }

    /// Preferences file location, falling back to the platform default.
    pub fn resolve_prefs_path(&self) -> anyhow::Result<PathBuf> {
        match &self.prefs_path {
            Some(path) => Ok(path.clone()),
            None => vidset_core::prefs::default_prefs_path()
                .context("could not determine a config directory; pass --prefs <path>"),
        }
    }
}

/// Read a config file. Missing fields take their defaults.
pub fn load_from(path: &Path) -> anyhow::Result<AppConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    toml::from_str(&content).with_context(|| format!("failed to parse config {}", path.display()))
}

/// Load the config from `explicit`, or from the config directory if a file is there.
pub fn load(explicit: Option<&Path>) -> anyhow::Result<AppConfig> {
    if let Some(path) = explicit {
        return load_from(path);
    }

    match vidset_core::prefs::config_dir().map(|dir| dir.join(CONFIG_FILE_NAME)) {
        Some(path) if path.exists() => load_from(&path),
        _ => Ok(AppConfig::default()),
    }
}

/// Terminal video settings panel with a confirm-or-revert window
#[derive(Debug, Clone, Default, PartialEq, Parser)]
#[command(name = "vidset")]
#[command(version)]
pub struct CliArgs {
    /// Config file (default: vidset.toml in the config directory)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Preferences file, overriding `prefs_path` from the config
    #[arg(long, value_name = "PATH")]
    pub prefs: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    // =============================================================
    // Config file
    // =============================================================

    #[test]
    fn test_config_default() {
        let config = AppConfig::default();
        assert_eq!(config.revert_timeout_secs, 15);
        assert_eq!(config.modes.len(), 4);
        assert_eq!(config.prefs_path, None);
        assert_eq!(
            config.resolutions().unwrap().last(),
            Some(&Resolution::new(2560, 1440))
        );
    }

    #[test]
    fn test_config_deserialize_empty() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_config_deserialize_partial() {
        let toml_str = r#"
revert_timeout_secs = 5
modes = ["800x600", "1024x768"]
"#;
        let config: AppConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.revert_timeout_secs, 5);
        assert_eq!(
            config.resolutions().unwrap(),
            vec![Resolution::new(800, 600), Resolution::new(1024, 768)]
        );
        assert_eq!(config.prefs_path, None);
    }

    #[test]
    fn test_bad_mode_is_reported() {
        let config = AppConfig {
            modes: vec!["1920x1080".to_string(), "huge".to_string()],
            ..AppConfig::default()
        };
        let err = config.resolutions().unwrap_err();
        assert!(err.to_string().contains("huge"));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vidset.toml");
        std::fs::write(&path, "prefs_path = \"/tmp/p.toml\"\n").unwrap();

        let config = load(Some(&path)).unwrap();
        assert_eq!(config.prefs_path, Some(PathBuf::from("/tmp/p.toml")));
        assert_eq!(config.resolve_prefs_path().unwrap(), PathBuf::from("/tmp/p.toml"));
    }

    #[test]
    fn test_load_missing_explicit_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load(Some(&dir.path().join("nope.toml"))).is_err());
    }

    // =============================================================
    // Command line
    // =============================================================

    #[test]
    fn test_cli_definition_is_valid() {
        CliArgs::command().debug_assert();
    }

    #[test]
    fn test_cli_empty() {
        assert_eq!(CliArgs::try_parse_from(["vidset"]).unwrap(), CliArgs::default());
    }

    #[test]
    fn test_cli_paths() {
        let parsed =
            CliArgs::try_parse_from(["vidset", "--prefs", "p.toml", "--config", "c.toml"]).unwrap();
        assert_eq!(parsed.prefs, Some(PathBuf::from("p.toml")));
        assert_eq!(parsed.config, Some(PathBuf::from("c.toml")));
    }

    #[test]
    fn test_cli_rejects_unknown_and_dangling() {
        assert!(CliArgs::try_parse_from(["vidset", "--fast"]).is_err());
        assert!(CliArgs::try_parse_from(["vidset", "--prefs"]).is_err());
    }
}
