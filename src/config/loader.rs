// Configuration loader
// Reads an explicit TOML file, else ~/.interpreter/config.toml, else defaults

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::constants::{CONFIG_DIR, CONFIG_FILE};
use super::settings::Config;

/// Load configuration.
///
/// An explicit `path` must exist. Without one, the file in the home
/// directory is used when present; otherwise the defaults apply.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let config = match path {
        Some(path) => read_config(path)?,
        None => match default_config_path().filter(|p| p.exists()) {
            Some(path) => read_config(&path)?,
            None => {
                debug!("no config file found, using defaults");
                Config::default()
            }
        },
    };
    config.validate()?;
    Ok(config)
}

/// `~/.interpreter/config.toml`, if the home directory is known.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(CONFIG_DIR).join(CONFIG_FILE))
}

/// Parse TOML text; missing keys take their defaults.
pub fn parse_config(contents: &str) -> Result<Config> {
    toml::from_str(contents).context("Failed to parse configuration")
}

fn read_config(path: &Path) -> Result<Config> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    let config = parse_config(&contents)
        .with_context(|| format!("Invalid config file {}", path.display()))?;
    debug!("loaded config from {}", path.display());
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_partial_config_keeps_defaults() {
        let config = parse_config("prompt = \"q> \"\nmax_args = 4\n").unwrap();
        assert_eq!(config.prompt, "q> ");
        assert_eq!(config.max_args, 4);
        assert_eq!(config.max_line, 4096);
        assert_eq!(config.history_capacity, 200);
    }

    #[test]
    fn test_parse_rejects_wrong_types() {
        assert!(parse_config("max_line = \"long\"").is_err());
    }

    #[test]
    fn test_load_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "history_capacity = 10\nhistory_file = \"/tmp/h\"\n").unwrap();

        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.history_capacity, 10);
        assert_eq!(config.history_file, PathBuf::from("/tmp/h"));
    }

    #[test]
    fn test_load_missing_explicit_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_config(Some(&dir.path().join("nope.toml"))).unwrap_err();
        assert!(err.to_string().contains("nope.toml"));
    }

    #[test]
    fn test_load_invalid_values_fail_validation() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "max_line = 0\n").unwrap();
        assert!(load_config(Some(&path)).is_err());
    }
}
