pub mod config;
pub mod modules;
pub mod utils;

pub use config::{AppConfig, ConfigError, LabelingConfig, OutputConfig, RenderConfig};
pub use modules::cloud::{compose_grid, group_sentences, EmotionBuckets, GridError, MaskSet, RenderError, WordcloudRenderer};
pub use modules::emotion::{Emotion, EmotionClassifier, EmotionClassifierError, SentenceLabel};
pub use modules::sentences::{load_sentences, SentenceLoadError};
