//! Advent calendar configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::NaiveDate;
use config::{Config, File, FileFormat};
use serde::Deserialize;

use crate::error::{AdventError, AdventResult};

static DEFAULT_START_DATE: &str = "2024-12-01";
static DEFAULT_DATA_DIR: &str = "~/.local/share/advent";
static DEFAULT_REJECTION_DELAY: &str = "3s";

fn default_start_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 12, 1).unwrap_or(NaiveDate::MIN)
}

fn default_data_dir() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_DIR)
}

fn default_rejection_delay() -> String {
    DEFAULT_REJECTION_DELAY.to_string()
}

/// Configuration at ~/.config/advent/config.toml
#[derive(Debug, Deserialize, Clone)]
pub struct AdventConfig {
    /// Date the first door opens.
    #[serde(default = "default_start_date")]
    pub start_date: NaiveDate,

    /// Where unlock state is stored.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Where door artwork lives. Defaults to `<data_dir>/images`.
    #[serde(default)]
    pub image_dir: Option<PathBuf>,

    /// How long the "not yet" cue stays up, e.g. "3s" or "1500ms".
    #[serde(default = "default_rejection_delay")]
    pub rejection_delay: String,
}

impl Default for AdventConfig {
    fn default() -> Self {
        AdventConfig {
            start_date: default_start_date(),
            data_dir: default_data_dir(),
            image_dir: None,
            rejection_delay: default_rejection_delay(),
        }
    }
}

impl AdventConfig {
    pub fn config_path() -> AdventResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| AdventError::Config("Could not determine config directory".into()))?
            .join("advent");

        Ok(config_dir.join("config.toml"))
    }

    /// Load from the default location, writing a commented template first
    /// if no config file exists yet.
    pub fn load() -> AdventResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    /// Load from an explicit path. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> AdventResult<Self> {
        let config: AdventConfig = Config::builder()
            .add_source(File::from(path).format(FileFormat::Toml).required(false))
            .build()
            .map_err(|e| AdventError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| AdventError::Config(e.to_string()))?;

        // Fail early on a bad delay rather than at the first early click
        config.rejection_delay()?;

        Ok(config)
    }

    pub fn data_path(&self) -> PathBuf {
        expand(&self.data_dir)
    }

    pub fn image_path(&self) -> PathBuf {
        match &self.image_dir {
            Some(dir) => expand(dir),
            None => self.data_path().join("images"),
        }
    }

    pub fn rejection_delay(&self) -> AdventResult<Duration> {
        humantime::parse_duration(&self.rejection_delay).map_err(|e| {
            AdventError::Config(format!(
                "Invalid rejection_delay '{}': {e}",
                self.rejection_delay
            ))
        })
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> AdventResult<()> {
        let contents = format!(
            "\
# advent calendar configuration

# Date the first door opens:
# start_date = \"{}\"

# Where unlock state is kept:
# data_dir = \"{}\"

# Where door artwork lives (defaults to <data_dir>/images):
# image_dir = \"~/Pictures/advent\"

# How long the \"not yet\" cue stays up:
# rejection_delay = \"{}\"
",
            DEFAULT_START_DATE, DEFAULT_DATA_DIR, DEFAULT_REJECTION_DELAY
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                AdventError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| AdventError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}

fn expand(path: &Path) -> PathBuf {
    PathBuf::from(shellexpand::tilde(&path.to_string_lossy()).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AdventConfig::load_from(&dir.path().join("config.toml")).unwrap();

        assert_eq!(config.start_date, NaiveDate::from_ymd_opt(2024, 12, 1).unwrap());
        assert_eq!(config.rejection_delay().unwrap(), Duration::from_secs(3));
        assert_eq!(config.image_path(), config.data_path().join("images"));
    }

    #[test]
    fn commented_template_parses_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("advent/config.toml");

        AdventConfig::create_default_config(&path).unwrap();
        let config = AdventConfig::load_from(&path).unwrap();

        assert_eq!(config.data_dir, PathBuf::from(DEFAULT_DATA_DIR));
        assert!(config.image_dir.is_none());
    }

    #[test]
    fn reads_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "start_date = \"2025-12-01\"\n\
             data_dir = \"/tmp/advent\"\n\
             image_dir = \"/tmp/art\"\n\
             rejection_delay = \"1500ms\"\n",
        )
        .unwrap();

        let config = AdventConfig::load_from(&path).unwrap();
        assert_eq!(config.start_date, NaiveDate::from_ymd_opt(2025, 12, 1).unwrap());
        assert_eq!(config.data_path(), PathBuf::from("/tmp/advent"));
        assert_eq!(config.image_path(), PathBuf::from("/tmp/art"));
        assert_eq!(config.rejection_delay().unwrap(), Duration::from_millis(1500));
    }

    #[test]
    fn rejects_bad_delay() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "rejection_delay = \"soon\"\n").unwrap();

        assert!(matches!(
            AdventConfig::load_from(&path),
            Err(AdventError::Config(_))
        ));
    }
}
