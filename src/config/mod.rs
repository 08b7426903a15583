pub mod app_config;

pub use app_config::{AppConfig, ConfigError, LabelingConfig, OutputConfig, RenderConfig, CONFIG_FILE};
