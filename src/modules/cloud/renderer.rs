use image::{GrayImage, Luma, Rgba, RgbaImage};
use lazy_static::lazy_static;
use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};
use thiserror::Error;
use wcloud::{Tokenizer, WordCloud, WordCloudSize};

use crate::config::RenderConfig;
use crate::modules::emotion::Emotion;
use super::grouper::EmotionBuckets;

/// Placeholder rendered for a bucket with no sentences, so an empty emotion
/// still yields a valid image.
pub const EMPTY_BUCKET_TOKEN: &str = "NAN";

/// Matches the original export's whitesmoke figure background.
pub const BACKGROUND: Rgba<u8> = Rgba([245, 245, 245, 255]);

lazy_static! {
    static ref DEFAULT_STOPWORDS: HashSet<&'static str> = include_str!("../../../assets/stopwords.txt")
        .lines()
        .map(str::trim)
        .filter(|word| !word.is_empty())
        .collect();
}

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to load mask image {path}: {source}")]
    Mask {
        path: String,
        source: image::ImageError,
    },

    #[error("Missing mask for emotion '{emotion}' at {path}")]
    MissingMask { emotion: Emotion, path: String },
}

/// One binary silhouette mask per emotion, or none at all.
///
/// Mask pixels follow the layout convention: dark silhouette pixels are
/// drawable, light background pixels are blocked.
pub struct MaskSet {
    masks: Option<BTreeMap<Emotion, GrayImage>>,
}

impl MaskSet {
    /// Clouds render into plain rectangles instead of silhouettes.
    pub fn none() -> Self {
        Self { masks: None }
    }

    /// Loads `{emotion}.png` for all six emotions from `dir`. Every file
    /// must be present.
    pub fn load(dir: &Path) -> Result<Self, RenderError> {
        let mut masks = BTreeMap::new();
        for emotion in Emotion::ALL {
            let path = mask_path(dir, emotion);
            if !path.exists() {
                return Err(RenderError::MissingMask {
                    emotion,
                    path: path.display().to_string(),
                });
            }
            let img = image::open(&path).map_err(|source| RenderError::Mask {
                path: path.display().to_string(),
                source,
            })?;
            masks.insert(emotion, binarize(&img.to_luma8()));
        }
        Ok(Self { masks: Some(masks) })
    }

    /// [`MaskSet::load`] when `dir` exists, [`MaskSet::none`] otherwise.
    pub fn discover(dir: &Path) -> Result<Self, RenderError> {
        if dir.is_dir() {
            Self::load(dir)
        } else {
            Ok(Self::none())
        }
    }

    pub fn get(&self, emotion: Emotion) -> Option<&GrayImage> {
        self.masks.as_ref().and_then(|masks| masks.get(&emotion))
    }
}

fn mask_path(dir: &Path, emotion: Emotion) -> PathBuf {
    dir.join(format!("{}.png", emotion))
}

/// Thresholds a grayscale image into the binary mask the layout expects:
/// 0 where words may be placed (the dark silhouette), 255 where not.
fn binarize(luma: &GrayImage) -> GrayImage {
    let mut mask = GrayImage::new(luma.width(), luma.height());
    for (x, y, pixel) in luma.enumerate_pixels() {
        let blocked = pixel.0[0] >= 128;
        mask.put_pixel(x, y, Luma([if blocked { 255 } else { 0 }]));
    }
    mask
}

pub struct WordcloudRenderer {
    config: RenderConfig,
    stopwords: HashSet<String>,
}

impl WordcloudRenderer {
    pub fn new(config: RenderConfig) -> Self {
        Self {
            config,
            stopwords: DEFAULT_STOPWORDS.iter().map(|word| word.to_string()).collect(),
        }
    }

    pub fn with_stopwords(mut self, words: impl IntoIterator<Item = String>) -> Self {
        self.stopwords = words.into_iter().collect();
        self
    }

    /// Renders one cloud per emotion, in canonical order.
    pub fn render_all(
        &self,
        buckets: &EmotionBuckets,
        masks: &MaskSet,
    ) -> Result<Vec<RgbaImage>, RenderError> {
        buckets
            .iter()
            .map(|(emotion, sentences)| Ok(self.render_bucket(sentences, masks.get(emotion))))
            .collect()
    }

    /// Renders a single bucket, into the mask silhouette when one is given.
    pub fn render_bucket(&self, sentences: &[String], mask: Option<&GrayImage>) -> RgbaImage {
        let text = if sentences.is_empty() {
            EMPTY_BUCKET_TOKEN.to_string()
        } else {
            sentences.join(" ")
        };

        let filter: HashSet<&str> = self.stopwords.iter().map(String::as_str).collect();
        let tokenizer = Tokenizer::default()
            .with_max_words(self.config.max_words)
            .with_filter(filter);

        let wordcloud = WordCloud::default()
            .with_tokenizer(tokenizer)
            .with_background_color(BACKGROUND)
            .with_rng_seed(self.config.seed);

        let size = match mask {
            Some(mask) => WordCloudSize::FromMask(mask.clone()),
            None => WordCloudSize::FromDimensions {
                width: self.config.width,
                height: self.config.height,
            },
        };

        wordcloud.generate_from_text(&text, size, 1.0)
    }
}
