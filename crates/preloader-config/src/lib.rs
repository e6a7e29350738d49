//! Configuration for the preloader terminal app.
//!
//! Read from `config.toml` in the platform config directory. Every field has
//! a default, so a missing file or a partial file both work.

mod site;

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use preloader_core::{
    CellMetrics, ColorTheme, ConfigValueError, DEFAULT_WORD, ResizePolicy, Timings,
    validate_word,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use site::{LinkConfig, PageConfig, SectionConfig, default_pages};

const CONFIG_FILE: &str = "config.toml";
const LOG_FILE: &str = "preloader.log";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not determine the config directory")]
    NoConfigDir,
    #[error("failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error(transparent)]
    Value(#[from] ConfigValueError),
    #[error("start page {0:?} is not one of the configured pages")]
    UnknownStartPage(String),
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Word spelled across the matrix columns.
    pub word: String,
    pub color_theme: ColorTheme,
    pub resize_policy: ResizePolicy,
    /// Path of the page shown on startup.
    pub start_page: String,
    pub timings: Timings,
    /// Pixel size of one terminal cell, for the layout rules.
    pub cell_px: CellMetrics,
    pub pages: Vec<PageConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            word: DEFAULT_WORD.to_string(),
            color_theme: ColorTheme::default(),
            resize_policy: ResizePolicy::default(),
            start_page: "/".to_string(),
            timings: Timings::default(),
            cell_px: CellMetrics::default(),
            pages: default_pages(),
        }
    }
}

impl Config {
    /// Path of the config file.
    pub fn path() -> Result<PathBuf, ConfigError> {
        Ok(project_dirs()?.config_dir().join(CONFIG_FILE))
    }

    /// Path of the log file.
    pub fn log_path() -> Result<PathBuf, ConfigError> {
        Ok(project_dirs()?.data_dir().join(LOG_FILE))
    }

    /// Load the config from the default location, falling back to defaults
    /// when the file does not exist.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path()?)
    }

    /// Load the config from `path`, falling back to defaults when missing.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match fs::read_to_string(path) {
            Ok(contents) => {
                tracing::debug!(path = %path.display(), "loading config");
                Self::from_toml_str(&contents)
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                Ok(Self::default())
            }
            Err(source) => Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let mut config: Self = toml::from_str(contents)?;
        if config.pages.is_empty() {
            config.pages = default_pages();
        }
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Write the config to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let io_err = |source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        fs::write(path, self.to_toml_string()?).map_err(io_err)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_word(&self.word)?;
        self.timings.validate()?;
        if self.page(&self.start_page).is_none() {
            return Err(ConfigError::UnknownStartPage(self.start_page.clone()));
        }
        Ok(())
    }

    /// Page configured at `path`.
    pub fn page(&self, path: &str) -> Option<&PageConfig> {
        self.pages.iter().find(|p| p.path == path)
    }
}

fn project_dirs() -> Result<ProjectDirs, ConfigError> {
    ProjectDirs::from("", "", "preloader").ok_or(ConfigError::NoConfigDir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert!(config.page("/").is_some());
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config = Config::from_toml_str(
            r#"
            word = "loading"
            resize_policy = "resume"

            [timings]
            run_ms = 1500
            "#,
        )
        .unwrap();

        assert_eq!(config.word, "loading");
        assert_eq!(config.resize_policy, ResizePolicy::Resume);
        assert_eq!(config.timings.run_ms, 1500);
        assert_eq!(config.timings.fade_ms, 650);
        assert_eq!(config.pages, default_pages());
    }

    #[test]
    fn test_round_trip() {
        let mut config = Config::default();
        config.color_theme = ColorTheme::Magenta;
        config.cell_px = CellMetrics {
            width: 10,
            height: 20,
        };
        let text = config.to_toml_string().unwrap();
        assert_eq!(Config::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            Config::from_toml_str(r#"word = """#),
            Err(ConfigError::Value(ConfigValueError::EmptyWord))
        ));
        assert!(matches!(
            Config::from_toml_str("[timings]\ntick_min_ms = 300"),
            Err(ConfigError::Value(ConfigValueError::EmptyTickRange { .. }))
        ));
        let huge = i64::MAX;
        assert!(matches!(
            Config::from_toml_str(&format!(
                "[timings]\nrun_ms = {huge}\nfreeze_ms = {huge}\nfade_ms = {huge}"
            )),
            Err(ConfigError::Value(ConfigValueError::SequenceOverflow { .. }))
        ));
        assert!(matches!(
            Config::from_toml_str(r#"start_page = "/nowhere""#),
            Err(ConfigError::UnknownStartPage(_))
        ));
        assert!(matches!(
            Config::from_toml_str("word = 3"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let path = std::env::temp_dir().join("preloader-config-test-missing/config.toml");
        assert_eq!(Config::load_from(&path).unwrap(), Config::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = std::env::temp_dir().join(format!("preloader-config-test-{}", std::process::id()));
        let path = dir.join("nested").join(CONFIG_FILE);
        let mut config = Config::default();
        config.word = "matrix".to_string();

        config.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), config);
        let _ = fs::remove_dir_all(&dir);
    }
}
