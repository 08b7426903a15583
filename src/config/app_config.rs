use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Optional override file, read from the working directory.
pub const CONFIG_FILE: &str = "emotion_wordclouds.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Knobs for the emotion labeler. Compiled-in defaults; there are no CLI
/// flags for these.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelingConfig {
    /// A class counts as present only above this probability.
    pub threshold: f32,
    /// Sentences per inference batch.
    pub batch_size: usize,
}

impl Default for LabelingConfig {
    fn default() -> Self {
        Self {
            threshold: 0.8,
            batch_size: 5,
        }
    }
}

impl LabelingConfig {
    pub fn validate(&self) -> Result<(), String> {
        if !(self.threshold > 0.0 && self.threshold < 1.0) {
            return Err(format!(
                "Labeling threshold is {}, but must be strictly between 0.0 and 1.0",
                self.threshold
            ));
        }
        if self.batch_size == 0 {
            return Err("Labeling batch_size must be at least 1".to_string());
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Word cap per cloud.
    pub max_words: u32,
    /// Canvas size used when no mask is available.
    pub width: u32,
    pub height: u32,
    /// Layout RNG seed, fixed so repeated runs over the same buckets agree.
    pub seed: u64,
    /// Directory holding `{emotion}.png` silhouettes; silently skipped when
    /// it does not exist.
    pub mask_dir: PathBuf,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            max_words: 50,
            width: 600,
            height: 400,
            seed: 0,
            mask_dir: PathBuf::from("masks"),
        }
    }
}

impl RenderConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.max_words == 0 {
            return Err("Render max_words must be at least 1".to_string());
        }
        if self.width == 0 || self.height == 0 {
            return Err(format!(
                "Render canvas is {}x{}, but both dimensions must be positive",
                self.width, self.height
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub file: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            file: PathBuf::from("word_clouds.png"),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub labeling: LabelingConfig,
    pub render: RenderConfig,
    pub output: OutputConfig,
}

impl AppConfig {
    /// Reads the TOML override file when present, otherwise the defaults.
    pub fn load_or_default(path: &Path) -> Result<AppConfig, ConfigError> {
        if !path.exists() {
            return Ok(AppConfig::default());
        }

        let raw = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&raw)?;
        config.validate().map_err(ConfigError::Invalid)?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), String> {
        self.labeling.validate()?;
        self.render.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{AppConfig, LabelingConfig, RenderConfig};
    use std::path::Path;

    #[test]
    fn test_app_config_default() {
        let config = AppConfig::default();
        assert_eq!(config.labeling.threshold, 0.8);
        assert_eq!(config.labeling.batch_size, 5);
        assert_eq!(config.render.max_words, 50);
        assert_eq!(config.output.file, Path::new("word_clouds.png"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_labeling_config_validation() {
        let mut labeling = LabelingConfig::default();
        assert!(labeling.validate().is_ok());

        labeling.threshold = 0.0;
        assert!(labeling.validate().is_err());

        labeling.threshold = 1.0;
        assert!(labeling.validate().is_err());

        labeling.threshold = 0.5;
        labeling.batch_size = 0;
        assert!(labeling.validate().is_err());
    }

    #[test]
    fn test_render_config_validation() {
        let mut render = RenderConfig::default();
        assert!(render.validate().is_ok());

        render.max_words = 0;
        assert!(render.validate().is_err());

        render.max_words = 50;
        render.width = 0;
        assert!(render.validate().is_err());
    }

    #[test]
    fn test_load_missing_file_yields_defaults() {
        let config = AppConfig::load_or_default(Path::new("/nonexistent/emotion_wordclouds.toml")).unwrap();
        assert_eq!(config.labeling.batch_size, 5);
    }

    #[test]
    fn test_partial_override() {
        let config: AppConfig = toml::from_str("[labeling]\nthreshold = 0.6\n").unwrap();
        assert_eq!(config.labeling.threshold, 0.6);
        assert_eq!(config.labeling.batch_size, 5);
        assert_eq!(config.render.max_words, 50);
    }
}
